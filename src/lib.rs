//! # Flowplane xDS test extraction
//!
//! Normalized, queryable projections over a fully materialized xDS
//! configuration snapshot (listeners, clusters, endpoint assignments and
//! secrets), for verification code asserting that a computed configuration
//! contains what it should.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use flowplane_xdstest::xds::{eds_cluster_names, route_names, Snapshot};
//! use flowplane_xdstest::Result;
//! # use envoy_types::pb::envoy::service::discovery::v3::DiscoveryResponse;
//!
//! fn check(responses: &[DiscoveryResponse]) -> Result<()> {
//!     let snapshot = Snapshot::from_responses(responses)?;
//!     assert_eq!(route_names(&snapshot.listeners)?, vec!["ingress-routes"]);
//!     assert!(eds_cluster_names(&snapshot.clusters).contains(&"backend".to_string()));
//!     Ok(())
//! }
//! ```
//!
//! The wire session (handshake, ACK/NACK, versions) and the proxy data plane
//! are out of scope: inputs arrive already decoded.

pub mod config;
pub mod errors;
pub mod observability;
pub mod xds;

// Re-export commonly used types
pub use config::ExtractConfig;
pub use errors::{DecodeError, Error, Result};
pub use observability::init_logging;

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
