//! # xDS Snapshot Extraction
//!
//! Read-only queries over an already-decoded xDS push: listeners, clusters,
//! endpoint assignments and secrets. Every function borrows its input and
//! never mutates it, so one snapshot can be queried from several threads.
//!
//! - [`listener`]: listener names, lookup, RDS route names, TCP proxy configs
//! - [`cluster`]: cluster index, lookup, filtering, EDS cluster names
//! - [`endpoint`]: endpoint addresses flattened per cluster
//! - [`secret`]: SDS payloads decoded into a name index
//! - [`response`]: resources packed back into a `DiscoveryResponse`
//! - [`snapshot`]: a whole push decoded by kind, plus its summary
//! - [`typed_config`]: registered payload kinds and checked decode/encode
//! - [`reflect`]: generic collection helpers

pub mod cluster;
pub mod endpoint;
pub mod listener;
pub mod reflect;
pub mod response;
pub mod secret;
pub mod snapshot;
pub mod typed_config;

pub use cluster::{cluster_names, clusters_by_name, eds_cluster_names, filter_clusters, find_cluster};
pub use endpoint::{cluster_endpoints, endpoints, load_assignment_endpoints, EndpointAddress};
pub use listener::{find_listener, listener_names, route_names, tcp_proxy};
pub use reflect::{element_view, sorted_keys};
pub use response::{to_discovery_response, Resource};
pub use secret::secrets_by_name;
pub use snapshot::{DuplicateNames, Snapshot, SnapshotSummary};
pub use typed_config::{decode, encode, AsTypedPayload, ResourceKind, TypedResource};
