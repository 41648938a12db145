//! Collector error type

use thiserror::Error;

pub use godaddy_provider::{CredentialValidationError, ProviderError};

/// Errors raised while validating the configuration or running collection steps.
#[derive(Error, Debug)]
pub enum CollectorError {
    /// Configuration is incomplete; raised before any network call.
    #[error("Config requires all of {{apiKey, apiSecret, shopperId}}: {0}")]
    Config(#[from] CredentialValidationError),

    /// Config file could not be read or decoded.
    #[error("Invalid config file {path}: {detail}")]
    ConfigFile { path: String, detail: String },

    /// An entity with the same key was already collected.
    #[error("Duplicate entity key: {0}")]
    DuplicateKey(String),

    /// The account resource came back absent.
    #[error("Account not found for shopper {0}")]
    AccountNotFound(String),

    /// A step read job data that an earlier step should have written.
    #[error("Missing job data: {0}")]
    MissingData(String),

    /// A step depends on a step that is not registered, or dependencies form a cycle.
    #[error("Invalid step graph: {0}")]
    StepGraph(String),

    /// A step failed; wraps the underlying cause.
    #[error("Step '{step}' failed: {source}")]
    Step {
        step: String,
        #[source]
        source: Box<CollectorError>,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CollectorError {
    /// Whether the failure is caused by user input or upstream state rather than a bug.
    ///
    /// Used to pick `warn` over `error` when logging.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Config(_) | Self::ConfigFile { .. } | Self::AccountNotFound(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Step { source, .. } => source.is_expected(),
            _ => false,
        }
    }
}

/// Collector Result type alias
pub type CollectorResult<T> = std::result::Result<T, CollectorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_names_required_fields() {
        let err = CollectorError::from(CredentialValidationError::MissingField {
            field: "apiKey".to_string(),
            label: "API Key".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Config requires all of {apiKey, apiSecret, shopperId}: Missing required field: API Key"
        );
        assert!(err.is_expected());
    }

    #[test]
    fn step_error_wraps_cause() {
        let err = CollectorError::Step {
            step: "fetch-account".to_string(),
            source: Box::new(CollectorError::AccountNotFound("123".to_string())),
        };
        assert_eq!(
            err.to_string(),
            "Step 'fetch-account' failed: Account not found for shopper 123"
        );
        assert!(err.is_expected());
    }

    #[test]
    fn provider_expectation_is_forwarded() {
        let denied = CollectorError::from(ProviderError::PermissionDenied {
            endpoint: "/v1/domains".to_string(),
            status: 403,
            status_text: "Forbidden".to_string(),
        });
        assert!(denied.is_expected());

        let network = CollectorError::from(ProviderError::NetworkError {
            endpoint: "/v1/domains".to_string(),
            detail: "connection refused".to_string(),
        });
        assert!(!network.is_expected());
        assert!(!CollectorError::DuplicateKey("k".to_string()).is_expected());
    }
}
