//! Endpoint flattening for cluster load assignments.

use crate::xds::reflect::element_view;
use envoy_types::pb::envoy::config::cluster::v3::Cluster;
use envoy_types::pb::envoy::config::core::v3::address::Address as AddressType;
use envoy_types::pb::envoy::config::core::v3::socket_address::PortSpecifier;
use envoy_types::pb::envoy::config::endpoint::v3::{lb_endpoint, ClusterLoadAssignment, LbEndpoint};
use std::collections::HashMap;
use tracing::debug;

/// Borrowed view of where an `LbEndpoint` points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointAddress<'a> {
    /// Network socket; `port` is `None` for named ports.
    Socket { address: &'a str, port: Option<u32> },
    /// Unix domain socket path.
    Pipe { path: &'a str },
    /// Named endpoint, internal address, or no address at all.
    Unresolved,
}

impl<'a> EndpointAddress<'a> {
    /// Resolve the address of an endpoint. A socket address wins over a pipe.
    pub fn of(lb: &'a LbEndpoint) -> Self {
        let address = match &lb.host_identifier {
            Some(lb_endpoint::HostIdentifier::Endpoint(endpoint)) => endpoint.address.as_ref(),
            Some(lb_endpoint::HostIdentifier::EndpointName(_)) | None => None,
        };

        match address.and_then(|a| a.address.as_ref()) {
            Some(AddressType::SocketAddress(socket)) => EndpointAddress::Socket {
                address: socket.address.as_str(),
                port: match socket.port_specifier {
                    Some(PortSpecifier::PortValue(port)) => Some(port),
                    Some(PortSpecifier::NamedPort(_)) | None => None,
                },
            },
            Some(AddressType::Pipe(pipe)) => EndpointAddress::Pipe { path: pipe.path.as_str() },
            Some(AddressType::EnvoyInternalAddress(_)) | None => EndpointAddress::Unresolved,
        }
    }

    /// The host string: socket address, else pipe path, else empty.
    pub fn host(&self) -> &'a str {
        match *self {
            EndpointAddress::Socket { address, .. } => address,
            EndpointAddress::Pipe { path } => path,
            EndpointAddress::Unresolved => "",
        }
    }
}

/// Addresses of every endpoint in an assignment, localities then endpoints in
/// order. `None` yields an empty list.
pub fn endpoints(assignment: Option<&ClusterLoadAssignment>) -> Vec<String> {
    let Some(assignment) = assignment else {
        return Vec::new();
    };

    assignment
        .endpoints
        .iter()
        .flat_map(|locality| element_view(&locality.lb_endpoints))
        .map(|lb| EndpointAddress::of(lb).host().to_string())
        .collect()
}

/// Flatten many assignments, grouped by cluster name.
///
/// `None` entries are skipped. Assignments for the same cluster have their
/// addresses concatenated in input order, duplicates included.
pub fn load_assignment_endpoints<'a, I>(assignments: I) -> HashMap<String, Vec<String>>
where
    I: IntoIterator<Item = Option<&'a ClusterLoadAssignment>>,
{
    let mut grouped: HashMap<String, Vec<String>> = HashMap::new();
    for assignment in assignments.into_iter().flatten() {
        grouped
            .entry(assignment.cluster_name.clone())
            .or_default()
            .extend(endpoints(Some(assignment)));
    }
    debug!(cluster_count = grouped.len(), "Grouped load assignment endpoints");
    grouped
}

/// Endpoints of each cluster's inline load assignment, grouped by the
/// assignment's cluster name.
pub fn cluster_endpoints(clusters: &[Cluster]) -> HashMap<String, Vec<String>> {
    load_assignment_endpoints(clusters.iter().map(|c| c.load_assignment.as_ref()))
}
