//! Cluster queries: name index, lookup, filtering and EDS detection.

use envoy_types::pb::envoy::config::cluster::v3::cluster::{ClusterDiscoveryType, DiscoveryType};
use envoy_types::pb::envoy::config::cluster::v3::Cluster;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Cluster names in input order.
pub fn cluster_names(clusters: &[Cluster]) -> Vec<String> {
    clusters.iter().map(|c| c.name.clone()).collect()
}

/// Index clusters by name.
///
/// When two clusters share a name the later one replaces the earlier one. The
/// overwrite is logged at WARN so callers can tighten validation upstream.
pub fn clusters_by_name(clusters: &[Cluster]) -> HashMap<String, &Cluster> {
    let mut index = HashMap::with_capacity(clusters.len());
    for cluster in clusters {
        if index.insert(cluster.name.clone(), cluster).is_some() {
            warn!(cluster_name = %cluster.name, "Duplicate cluster name, keeping the later cluster");
        }
    }
    index
}

/// Cluster named `name`. Matches [`clusters_by_name`]: the last duplicate wins.
pub fn find_cluster<'a>(name: &str, clusters: &'a [Cluster]) -> Option<&'a Cluster> {
    clusters.iter().rev().find(|c| c.name == name)
}

/// Clusters satisfying `predicate`, in input order.
pub fn filter_clusters<'a, F>(clusters: &'a [Cluster], mut predicate: F) -> Vec<&'a Cluster>
where
    F: FnMut(&Cluster) -> bool,
{
    let mut res = Vec::with_capacity(clusters.len());
    for cluster in clusters {
        if predicate(cluster) {
            res.push(cluster);
        }
    }
    res
}

/// Names of clusters whose discovery type is explicitly `EDS`.
///
/// Clusters with no discovery type set (for example ones that only carry an
/// inline load assignment) and custom cluster types are excluded.
pub fn eds_cluster_names(clusters: &[Cluster]) -> Vec<String> {
    let names: Vec<String> =
        clusters.iter().filter(|c| is_eds(c)).map(|c| c.name.clone()).collect();
    debug!(total = clusters.len(), eds = names.len(), "Extracted EDS cluster names");
    names
}

fn is_eds(cluster: &Cluster) -> bool {
    match &cluster.cluster_discovery_type {
        Some(ClusterDiscoveryType::Type(t)) => *t == DiscoveryType::Eds as i32,
        Some(ClusterDiscoveryType::ClusterType(_)) | None => false,
    }
}
