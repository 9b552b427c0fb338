//! Packing resources back into a `DiscoveryResponse`.

use crate::xds::reflect::element_view;
use crate::xds::typed_config::AsTypedPayload;
use envoy_types::pb::envoy::config::cluster::v3::Cluster;
use envoy_types::pb::envoy::config::endpoint::v3::ClusterLoadAssignment;
use envoy_types::pb::envoy::config::listener::v3::Listener;
use envoy_types::pb::envoy::config::route::v3::RouteConfiguration;
use envoy_types::pb::envoy::extensions::transport_sockets::tls::v3::Secret;
use envoy_types::pb::envoy::service::discovery::v3::DiscoveryResponse;
use envoy_types::pb::google::protobuf::Any;

/// Any snapshot resource, for assembling mixed collections.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Listener(Listener),
    Cluster(Cluster),
    LoadAssignment(ClusterLoadAssignment),
    RouteConfiguration(RouteConfiguration),
    Secret(Secret),
}

impl Resource {
    /// The resource's own name.
    pub fn name(&self) -> &str {
        match self {
            Resource::Listener(l) => &l.name,
            Resource::Cluster(c) => &c.name,
            Resource::LoadAssignment(cla) => &cla.cluster_name,
            Resource::RouteConfiguration(rc) => &rc.name,
            Resource::Secret(s) => &s.name,
        }
    }
}

impl AsTypedPayload for Resource {
    fn to_typed_payload(&self) -> Any {
        match self {
            Resource::Listener(l) => l.to_typed_payload(),
            Resource::Cluster(c) => c.to_typed_payload(),
            Resource::LoadAssignment(cla) => cla.to_typed_payload(),
            Resource::RouteConfiguration(rc) => rc.to_typed_payload(),
            Resource::Secret(s) => s.to_typed_payload(),
        }
    }
}

impl From<Listener> for Resource {
    fn from(value: Listener) -> Self {
        Resource::Listener(value)
    }
}

impl From<Cluster> for Resource {
    fn from(value: Cluster) -> Self {
        Resource::Cluster(value)
    }
}

impl From<ClusterLoadAssignment> for Resource {
    fn from(value: ClusterLoadAssignment) -> Self {
        Resource::LoadAssignment(value)
    }
}

impl From<RouteConfiguration> for Resource {
    fn from(value: RouteConfiguration) -> Self {
        Resource::RouteConfiguration(value)
    }
}

impl From<Secret> for Resource {
    fn from(value: Secret) -> Self {
        Resource::Secret(value)
    }
}

/// Wrap a collection of resources in a `DiscoveryResponse`.
///
/// Resources keep their input order. The response's `type_url` is taken from
/// the first resource only: callers must pass a homogeneous collection, a
/// mixed one produces a response whose type URL matches just its first
/// element. An empty collection gives an empty response with an empty type URL.
pub fn to_discovery_response<'a, C, R>(resources: &'a C) -> DiscoveryResponse
where
    C: ?Sized,
    &'a C: IntoIterator<Item = &'a R>,
    R: AsTypedPayload + 'a,
{
    let view = element_view(resources);
    if view.is_empty() {
        return DiscoveryResponse::default();
    }

    let resources: Vec<Any> = view.into_iter().map(AsTypedPayload::to_typed_payload).collect();
    let type_url = resources[0].type_url.clone();

    DiscoveryResponse { resources, type_url, ..Default::default() }
}
