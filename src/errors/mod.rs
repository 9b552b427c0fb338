//! # Error Handling
//!
//! Error types for snapshot extraction. Decoding failures are always fatal to
//! the operation that hit them; "not found" is never an error and is expressed
//! with `Option` instead.

/// Custom result type for extraction operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for snapshot extraction
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A typed payload could not be interpreted as the requested shape
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (duplicate names, invalid config fields)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure to turn an opaque `Any` payload into a concrete resource.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    /// The type URL does not name a registered resource kind
    #[error("unregistered type url '{type_url}'")]
    UnregisteredType { type_url: String },

    /// The type URL names a registered kind other than the one requested
    #[error("expected {expected} payload, found '{found}'")]
    TypeMismatch { expected: &'static str, found: String },

    /// A filter that must carry a typed config has none
    #[error("filter '{filter}' has no typed config")]
    MissingPayload { filter: String },

    /// The bytes are not a valid encoding of the requested message
    #[error("malformed {kind} payload: {source}")]
    Malformed {
        kind: &'static str,
        #[source]
        source: prost::DecodeError,
    },
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .iter()
            .map(|(field, field_errors)| {
                let error_messages: Vec<String> = field_errors
                    .iter()
                    .map(|e| e.message.as_ref().map_or("Invalid value".to_string(), |m| m.to_string()))
                    .collect();
                format!("{}: {}", field, error_messages.join(", "))
            })
            .collect::<Vec<_>>()
            .join("; ");

        Self::validation(format!("Validation failed: {}", message))
    }
}
