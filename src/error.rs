//! Error types exposed by the gateway.

use thiserror::Error;

/// Coarse failure class used to pick an HTTP status for a [`GatewayError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller supplied something malformed; fixing the request fixes it.
    Validation,
    /// The upstream provider failed or could not be reached.
    Remote,
    /// The gateway itself failed (unexpected payload, configuration, I/O).
    Internal,
}

/// Errors surfaced while resolving identifiers or talking to a provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The repository string does not fit the provider's identifier shape.
    #[error("invalid repository identifier: {message}")]
    InvalidIdentifier {
        /// Why the identifier was rejected.
        message: String,
    },

    /// The provider tag is not one the gateway knows about.
    #[error("unsupported provider: {provider}")]
    UnsupportedProvider {
        /// The tag as supplied by the caller.
        provider: String,
    },

    /// The provider answered with a non-success status.
    #[error("{operation} failed with status {status}: {body}")]
    Remote {
        /// Operation that was being performed (e.g. `github branches`).
        operation: String,
        /// Upstream HTTP status code.
        status: u16,
        /// Raw upstream response body.
        body: String,
    },

    /// The provider could not be reached.
    #[error("network error: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The provider answered with a payload missing an expected field.
    #[error("unexpected response shape: {message}")]
    Mapping {
        /// Decoder detail naming the offending field.
        message: String,
    },

    /// Configuration could not be loaded or is inconsistent.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Local I/O operation failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}

impl GatewayError {
    /// Returns the failure class of this error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidIdentifier { .. } | Self::UnsupportedProvider { .. } => {
                ErrorClass::Validation
            }
            Self::Remote { .. } | Self::Network { .. } => ErrorClass::Remote,
            Self::Mapping { .. } | Self::Configuration { .. } | Self::Io { .. } => {
                ErrorClass::Internal
            }
        }
    }

    /// Upstream status code when the error carries one.
    #[must_use]
    pub const fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}
