//! Registry of typed payloads understood by the extractors.
//!
//! Filter configs and secrets arrive as `google.protobuf.Any`. Instead of a
//! generic unmarshal keyed on whatever type URL is present, every shape the
//! extractors decode is registered here as a [`ResourceKind`], and decoding
//! checks the payload's URL against the requested kind before touching bytes.

use crate::errors::DecodeError;
use envoy_types::pb::envoy::config::cluster::v3::Cluster;
use envoy_types::pb::envoy::config::endpoint::v3::ClusterLoadAssignment;
use envoy_types::pb::envoy::config::listener::v3::Listener;
use envoy_types::pb::envoy::config::route::v3::RouteConfiguration;
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::HttpConnectionManager;
use envoy_types::pb::envoy::extensions::filters::network::tcp_proxy::v3::TcpProxy;
use envoy_types::pb::envoy::extensions::transport_sockets::tls::v3::Secret;
use envoy_types::pb::google::protobuf::Any;
use prost::Message;
use std::fmt;

pub const TYPE_URL_PREFIX: &str = "type.googleapis.com/";

pub const LISTENER_TYPE_URL: &str = "type.googleapis.com/envoy.config.listener.v3.Listener";
pub const CLUSTER_TYPE_URL: &str = "type.googleapis.com/envoy.config.cluster.v3.Cluster";
pub const ENDPOINT_TYPE_URL: &str =
    "type.googleapis.com/envoy.config.endpoint.v3.ClusterLoadAssignment";
pub const ROUTE_TYPE_URL: &str = "type.googleapis.com/envoy.config.route.v3.RouteConfiguration";
pub const SECRET_TYPE_URL: &str =
    "type.googleapis.com/envoy.extensions.transport_sockets.tls.v3.Secret";
pub const HTTP_CONNECTION_MANAGER_TYPE_URL: &str =
    "type.googleapis.com/envoy.extensions.filters.network.http_connection_manager.v3.HttpConnectionManager";
pub const TCP_PROXY_TYPE_URL: &str =
    "type.googleapis.com/envoy.extensions.filters.network.tcp_proxy.v3.TcpProxy";

/// A payload shape registered for decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Listener,
    Cluster,
    ClusterLoadAssignment,
    RouteConfiguration,
    Secret,
    HttpConnectionManager,
    TcpProxy,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Listener,
        ResourceKind::Cluster,
        ResourceKind::ClusterLoadAssignment,
        ResourceKind::RouteConfiguration,
        ResourceKind::Secret,
        ResourceKind::HttpConnectionManager,
        ResourceKind::TcpProxy,
    ];

    /// Canonical `type.googleapis.com/...` URL for this kind.
    pub fn type_url(self) -> &'static str {
        match self {
            ResourceKind::Listener => LISTENER_TYPE_URL,
            ResourceKind::Cluster => CLUSTER_TYPE_URL,
            ResourceKind::ClusterLoadAssignment => ENDPOINT_TYPE_URL,
            ResourceKind::RouteConfiguration => ROUTE_TYPE_URL,
            ResourceKind::Secret => SECRET_TYPE_URL,
            ResourceKind::HttpConnectionManager => HTTP_CONNECTION_MANAGER_TYPE_URL,
            ResourceKind::TcpProxy => TCP_PROXY_TYPE_URL,
        }
    }

    /// Fully-qualified protobuf message name.
    pub fn full_name(self) -> &'static str {
        let url = self.type_url();
        &url[TYPE_URL_PREFIX.len()..]
    }

    /// Resolve a type URL to a registered kind.
    ///
    /// Only the message name after the last `/` is significant, so payloads
    /// produced with a non-default host prefix still resolve.
    pub fn from_type_url(type_url: &str) -> Result<Self, DecodeError> {
        let name = type_url.rsplit('/').next().unwrap_or(type_url);
        Self::ALL
            .into_iter()
            .find(|kind| kind.full_name() == name)
            .ok_or_else(|| DecodeError::UnregisteredType { type_url: type_url.to_string() })
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// A protobuf message bound to a registered [`ResourceKind`].
pub trait TypedResource: Message + Default {
    const KIND: ResourceKind;
}

/// Anything that can be packed into a typed `Any` payload.
pub trait AsTypedPayload {
    fn to_typed_payload(&self) -> Any;
}

macro_rules! register_typed_resources {
    ($($ty:ty => $kind:ident),+ $(,)?) => {
        $(
            impl TypedResource for $ty {
                const KIND: ResourceKind = ResourceKind::$kind;
            }

            impl AsTypedPayload for $ty {
                fn to_typed_payload(&self) -> Any {
                    encode(self)
                }
            }
        )+
    };
}

register_typed_resources! {
    Listener => Listener,
    Cluster => Cluster,
    ClusterLoadAssignment => ClusterLoadAssignment,
    RouteConfiguration => RouteConfiguration,
    Secret => Secret,
    HttpConnectionManager => HttpConnectionManager,
    TcpProxy => TcpProxy,
}

/// Decode a typed payload into `T`.
///
/// Fails on an unregistered URL, on a URL naming another kind, and on bytes
/// that do not decode as `T`. A failed decode never yields `T::default()`.
pub fn decode<T: TypedResource>(payload: &Any) -> Result<T, DecodeError> {
    let kind = ResourceKind::from_type_url(&payload.type_url)?;
    if kind != T::KIND {
        return Err(DecodeError::TypeMismatch {
            expected: T::KIND.full_name(),
            found: payload.type_url.clone(),
        });
    }

    T::decode(payload.value.as_slice())
        .map_err(|source| DecodeError::Malformed { kind: T::KIND.full_name(), source })
}

/// Encode `value` as a typed payload carrying its canonical type URL.
pub fn encode<T: TypedResource>(value: &T) -> Any {
    Any { type_url: T::KIND.type_url().to_string(), value: value.encode_to_vec() }
}
