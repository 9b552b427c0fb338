//! Secret decoding for SDS payloads.

use crate::xds::typed_config::decode;
use crate::Result;
use envoy_types::pb::envoy::extensions::transport_sockets::tls::v3::Secret;
use envoy_types::pb::google::protobuf::Any;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Decode SDS payloads and index the secrets by name.
///
/// The first payload that fails to decode aborts the call; no partial map is
/// returned. Later secrets replace earlier ones with the same name.
pub fn secrets_by_name(payloads: &[Any]) -> Result<HashMap<String, Secret>> {
    let _span = crate::extract_span!("secrets_by_name", payloads.len()).entered();

    let mut secrets = HashMap::with_capacity(payloads.len());
    for payload in payloads {
        let secret: Secret = decode(payload)?;
        if secrets.contains_key(&secret.name) {
            warn!(secret_name = %secret.name, "Duplicate secret name, keeping the later secret");
        }
        secrets.insert(secret.name.clone(), secret);
    }

    debug!(secret_count = secrets.len(), "Decoded secrets");
    Ok(secrets)
}
