//! A decoded snapshot from one full xDS push, and its normalized summary.

use crate::config::ExtractConfig;
use crate::xds::reflect::sorted_keys;
use crate::xds::typed_config::{decode, ResourceKind};
use crate::xds::{cluster, endpoint, listener, secret};
use crate::{Error, Result};
use envoy_types::pb::envoy::config::cluster::v3::Cluster;
use envoy_types::pb::envoy::config::endpoint::v3::ClusterLoadAssignment;
use envoy_types::pb::envoy::config::listener::v3::Listener;
use envoy_types::pb::envoy::config::route::v3::RouteConfiguration;
use envoy_types::pb::envoy::extensions::transport_sockets::tls::v3::Secret;
use envoy_types::pb::envoy::service::discovery::v3::DiscoveryResponse;
use envoy_types::pb::google::protobuf::Any;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// All resources of a push, decoded by kind. Secrets stay as raw payloads so
/// that [`secret::secrets_by_name`] owns their decoding.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub listeners: Vec<Listener>,
    pub clusters: Vec<Cluster>,
    pub load_assignments: Vec<ClusterLoadAssignment>,
    pub route_configurations: Vec<RouteConfiguration>,
    pub secrets: Vec<Any>,
}

/// Names appearing more than once within one resource kind.
///
/// Load assignments are not listed: several assignments for one cluster are
/// legal and their endpoints are concatenated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateNames {
    pub listeners: Vec<String>,
    pub clusters: Vec<String>,
    pub route_configurations: Vec<String>,
    pub secrets: Vec<String>,
}

impl DuplicateNames {
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
            && self.clusters.is_empty()
            && self.route_configurations.is_empty()
            && self.secrets.is_empty()
    }
}

/// Normalized projections of a snapshot. Map-valued fields are ordered so the
/// JSON rendering is stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub listeners: Vec<String>,
    pub routes: Vec<String>,
    pub clusters: Vec<String>,
    pub eds_clusters: Vec<String>,
    pub endpoints: BTreeMap<String, Vec<String>>,
    pub cluster_endpoints: BTreeMap<String, Vec<String>>,
    pub secrets: Vec<String>,
}

impl SnapshotSummary {
    /// Pretty JSON rendering, for diffing in verification output.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Snapshot {
    /// Decode the resources of every response by their own type URL.
    ///
    /// Filter-level kinds (HTTP connection manager, TCP proxy) are not
    /// top-level resources and are rejected along with unregistered URLs.
    pub fn from_responses<'a, I>(responses: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a DiscoveryResponse>,
    {
        let mut snapshot = Snapshot::default();

        for response in responses {
            for resource in &response.resources {
                match ResourceKind::from_type_url(&resource.type_url)? {
                    ResourceKind::Listener => snapshot.listeners.push(decode(resource)?),
                    ResourceKind::Cluster => snapshot.clusters.push(decode(resource)?),
                    ResourceKind::ClusterLoadAssignment => {
                        snapshot.load_assignments.push(decode(resource)?)
                    }
                    ResourceKind::RouteConfiguration => {
                        snapshot.route_configurations.push(decode(resource)?)
                    }
                    ResourceKind::Secret => snapshot.secrets.push(resource.clone()),
                    kind @ (ResourceKind::HttpConnectionManager | ResourceKind::TcpProxy) => {
                        return Err(Error::validation(format!(
                            "{} is a filter config, not a snapshot resource",
                            kind
                        )));
                    }
                }
            }
        }

        debug!(
            listeners = snapshot.listeners.len(),
            clusters = snapshot.clusters.len(),
            load_assignments = snapshot.load_assignments.len(),
            route_configurations = snapshot.route_configurations.len(),
            secrets = snapshot.secrets.len(),
            "Assembled snapshot from discovery responses"
        );

        Ok(snapshot)
    }

    /// Per-kind names that occur more than once, in first-seen order.
    ///
    /// Secret payloads are decoded to read their names, so a malformed secret
    /// fails the call.
    pub fn duplicate_names(&self) -> Result<DuplicateNames> {
        let secrets = self
            .secrets
            .iter()
            .map(|payload| decode::<Secret>(payload).map(|secret| secret.name))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(DuplicateNames {
            listeners: duplicates(self.listeners.iter().map(|l| l.name.as_str())),
            clusters: duplicates(self.clusters.iter().map(|c| c.name.as_str())),
            route_configurations: duplicates(
                self.route_configurations.iter().map(|rc| rc.name.as_str()),
            ),
            secrets: duplicates(secrets.iter().map(String::as_str)),
        })
    }

    /// Check the snapshot against `config`.
    ///
    /// Duplicate names are an error only when `reject_duplicate_names` is set;
    /// otherwise they are logged and accepted.
    pub fn validate(&self, config: &ExtractConfig) -> Result<()> {
        let duplicates = self.duplicate_names()?;
        if duplicates.is_empty() {
            return Ok(());
        }

        if config.reject_duplicate_names {
            return Err(Error::validation(format!(
                "Duplicate resource names in snapshot: {}",
                serde_json::to_string(&duplicates)?
            )));
        }

        warn!(
            listeners = ?duplicates.listeners,
            clusters = ?duplicates.clusters,
            route_configurations = ?duplicates.route_configurations,
            secrets = ?duplicates.secrets,
            "Snapshot contains duplicate resource names"
        );
        Ok(())
    }

    /// Compute every normalized projection of the snapshot.
    pub fn summary(&self) -> Result<SnapshotSummary> {
        let secrets = secret::secrets_by_name(&self.secrets)?;

        Ok(SnapshotSummary {
            listeners: listener::listener_names(&self.listeners),
            routes: listener::route_names(&self.listeners)?,
            clusters: cluster::cluster_names(&self.clusters),
            eds_clusters: cluster::eds_cluster_names(&self.clusters),
            endpoints: ordered(endpoint::load_assignment_endpoints(
                self.load_assignments.iter().map(Some),
            )),
            cluster_endpoints: ordered(endpoint::cluster_endpoints(&self.clusters)),
            secrets: sorted_keys(&secrets),
        })
    }
}

fn duplicates<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut order = Vec::new();
    for name in names {
        let count = seen.entry(name).or_insert(0);
        *count += 1;
        if *count == 2 {
            order.push(name.to_string());
        }
    }
    order
}

fn ordered(grouped: HashMap<String, Vec<String>>) -> BTreeMap<String, Vec<String>> {
    grouped.into_iter().collect()
}
