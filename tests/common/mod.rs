//! Common test utilities for all integration tests.
//!
//! Builders for the Envoy resources a snapshot is made of.

#![allow(dead_code)]
#![allow(clippy::duplicate_mod)]

use envoy_types::pb::envoy::config::cluster::v3::cluster::{ClusterDiscoveryType, DiscoveryType};
use envoy_types::pb::envoy::config::cluster::v3::Cluster;
use envoy_types::pb::envoy::config::core::v3::address::Address as AddressType;
use envoy_types::pb::envoy::config::core::v3::socket_address::PortSpecifier;
use envoy_types::pb::envoy::config::core::v3::{
    data_source::Specifier, Address, DataSource, Pipe, SocketAddress,
};
use envoy_types::pb::envoy::config::endpoint::v3::{
    lb_endpoint, ClusterLoadAssignment, Endpoint, LbEndpoint, LocalityLbEndpoints,
};
use envoy_types::pb::envoy::config::listener::v3::filter::ConfigType;
use envoy_types::pb::envoy::config::listener::v3::{Filter, FilterChain, Listener};
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::http_connection_manager::RouteSpecifier;
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::{
    HttpConnectionManager, Rds,
};
use envoy_types::pb::envoy::extensions::filters::network::tcp_proxy::v3::tcp_proxy::ClusterSpecifier;
use envoy_types::pb::envoy::extensions::filters::network::tcp_proxy::v3::TcpProxy;
use envoy_types::pb::envoy::extensions::transport_sockets::tls::v3::{
    secret, GenericSecret, Secret,
};
use flowplane_xdstest::xds::listener::{HTTP_CONNECTION_MANAGER_FILTER, TCP_PROXY_FILTER};
use flowplane_xdstest::xds::typed_config::encode;

/// HTTP connection manager filter referencing `route_config_name` over RDS.
pub fn rds_filter(route_config_name: &str) -> Filter {
    let hcm = HttpConnectionManager {
        stat_prefix: "ingress_http".to_string(),
        route_specifier: Some(RouteSpecifier::Rds(Rds {
            route_config_name: route_config_name.to_string(),
            ..Default::default()
        })),
        ..Default::default()
    };
    Filter {
        name: HTTP_CONNECTION_MANAGER_FILTER.to_string(),
        config_type: Some(ConfigType::TypedConfig(encode(&hcm))),
    }
}

/// TCP proxy filter forwarding to `cluster`.
pub fn tcp_proxy_filter(cluster: &str) -> Filter {
    let proxy = TcpProxy {
        stat_prefix: "tcp".to_string(),
        cluster_specifier: Some(ClusterSpecifier::Cluster(cluster.to_string())),
        ..Default::default()
    };
    Filter {
        name: TCP_PROXY_FILTER.to_string(),
        config_type: Some(ConfigType::TypedConfig(encode(&proxy))),
    }
}

pub fn listener(name: &str, chains: Vec<Vec<Filter>>) -> Listener {
    Listener {
        name: name.to_string(),
        filter_chains: chains
            .into_iter()
            .map(|filters| FilterChain { filters, ..Default::default() })
            .collect(),
        ..Default::default()
    }
}

pub fn socket_address(address: &str, port: u32) -> Address {
    Address {
        address: Some(AddressType::SocketAddress(SocketAddress {
            address: address.to_string(),
            port_specifier: Some(PortSpecifier::PortValue(port)),
            ..Default::default()
        })),
    }
}

pub fn pipe_address(path: &str) -> Address {
    Address {
        address: Some(AddressType::Pipe(Pipe { path: path.to_string(), ..Default::default() })),
    }
}

/// Single-locality load assignment with one endpoint per address.
pub fn load_assignment(cluster_name: &str, addresses: Vec<Address>) -> ClusterLoadAssignment {
    ClusterLoadAssignment {
        cluster_name: cluster_name.to_string(),
        endpoints: vec![LocalityLbEndpoints {
            lb_endpoints: addresses
                .into_iter()
                .map(|address| LbEndpoint {
                    host_identifier: Some(lb_endpoint::HostIdentifier::Endpoint(Endpoint {
                        address: Some(address),
                        ..Default::default()
                    })),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }],
        ..Default::default()
    }
}

pub fn eds_cluster(name: &str) -> Cluster {
    Cluster {
        name: name.to_string(),
        cluster_discovery_type: Some(ClusterDiscoveryType::Type(DiscoveryType::Eds as i32)),
        ..Default::default()
    }
}

pub fn static_cluster(name: &str, addresses: Vec<Address>) -> Cluster {
    Cluster {
        name: name.to_string(),
        cluster_discovery_type: Some(ClusterDiscoveryType::Type(DiscoveryType::Static as i32)),
        load_assignment: Some(load_assignment(name, addresses)),
        ..Default::default()
    }
}

/// Cluster with no discovery type, relying only on its inline assignment.
pub fn inline_only_cluster(name: &str, addresses: Vec<Address>) -> Cluster {
    Cluster {
        name: name.to_string(),
        load_assignment: Some(load_assignment(name, addresses)),
        ..Default::default()
    }
}

pub fn generic_secret(name: &str, value: &[u8]) -> Secret {
    Secret {
        name: name.to_string(),
        r#type: Some(secret::Type::GenericSecret(GenericSecret {
            secret: Some(DataSource {
                specifier: Some(Specifier::InlineBytes(value.to_vec())),
                ..Default::default()
            }),
            ..Default::default()
        })),
    }
}
