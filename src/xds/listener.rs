//! Listener queries: names, lookup, RDS route names and TCP proxy configs.

use crate::errors::DecodeError;
use crate::xds::typed_config::decode;
use crate::Result;
use envoy_types::pb::envoy::config::listener::v3::filter::ConfigType;
use envoy_types::pb::envoy::config::listener::v3::{Filter, FilterChain, Listener};
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::http_connection_manager::RouteSpecifier;
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::HttpConnectionManager;
use envoy_types::pb::envoy::extensions::filters::network::tcp_proxy::v3::TcpProxy;
use envoy_types::pb::google::protobuf::Any;
use tracing::{debug, warn};

/// Well-known name of the HTTP connection manager network filter
pub const HTTP_CONNECTION_MANAGER_FILTER: &str = "envoy.filters.network.http_connection_manager";

/// Well-known name of the TCP proxy network filter
pub const TCP_PROXY_FILTER: &str = "envoy.filters.network.tcp_proxy";

/// Listener names in input order.
pub fn listener_names(listeners: &[Listener]) -> Vec<String> {
    listeners.iter().map(|l| l.name.clone()).collect()
}

/// First listener named `name`, if any.
pub fn find_listener<'a>(name: &str, listeners: &'a [Listener]) -> Option<&'a Listener> {
    listeners.iter().find(|l| l.name == name)
}

/// Route configuration names referenced over RDS by HTTP connection managers.
///
/// Walks listeners, then filter chains, then filters, all in order. Inline
/// and scoped route configs contribute nothing. Duplicates are kept. Any HCM
/// whose typed config is missing or does not decode fails the whole call.
pub fn route_names(listeners: &[Listener]) -> Result<Vec<String>> {
    let _span = crate::extract_span!("route_names", listeners.len()).entered();
    let mut routes = Vec::new();

    for listener in listeners {
        for filter_chain in &listener.filter_chains {
            for filter in &filter_chain.filters {
                if filter.name != HTTP_CONNECTION_MANAGER_FILTER {
                    continue;
                }

                let hcm = decode_hcm(filter).inspect_err(|e| {
                    warn!(
                        listener = %listener.name,
                        filter = %filter.name,
                        error = %e,
                        "Failed to decode http connection manager"
                    );
                })?;

                match hcm.route_specifier {
                    Some(RouteSpecifier::Rds(rds)) => routes.push(rds.route_config_name),
                    Some(RouteSpecifier::RouteConfig(_))
                    | Some(RouteSpecifier::ScopedRoutes(_))
                    | None => {}
                }
            }
        }
    }

    debug!(route_count = routes.len(), "Extracted RDS route names from listeners");
    Ok(routes)
}

/// The first TCP proxy filter of a chain, decoded.
///
/// A TCP proxy filter without a typed config yields `TcpProxy::default()`;
/// a chain without one yields `None`.
pub fn tcp_proxy(filter_chain: &FilterChain) -> Result<Option<TcpProxy>> {
    let Some(filter) = filter_chain.filters.iter().find(|f| f.name == TCP_PROXY_FILTER) else {
        return Ok(None);
    };

    let proxy = match typed_config(filter) {
        Some(payload) => decode::<TcpProxy>(payload)?,
        None => TcpProxy::default(),
    };

    Ok(Some(proxy))
}

fn decode_hcm(filter: &Filter) -> std::result::Result<HttpConnectionManager, DecodeError> {
    let payload = typed_config(filter)
        .ok_or_else(|| DecodeError::MissingPayload { filter: filter.name.clone() })?;
    decode(payload)
}

fn typed_config(filter: &Filter) -> Option<&Any> {
    match &filter.config_type {
        Some(ConfigType::TypedConfig(any)) => Some(any),
        Some(ConfigType::ConfigDiscovery(_)) | None => None,
    }
}
