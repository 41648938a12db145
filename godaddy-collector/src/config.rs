//! Integration configuration: config file, environment and command line.

use std::collections::HashMap;
use std::path::Path;

use godaddy_provider::{CredentialValidationError, Credentials};
use serde::{Deserialize, Serialize};

use crate::error::{CollectorError, CollectorResult};

/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "GODADDY_API_KEY";
/// Environment variable holding the API secret.
pub const ENV_API_SECRET: &str = "GODADDY_API_SECRET";
/// Environment variable holding the shopper ID.
pub const ENV_SHOPPER_ID: &str = "GODADDY_SHOPPER_ID";
/// Environment variable overriding the API host.
pub const ENV_API_BASE: &str = "GODADDY_API_BASE";

/// Raw instance configuration. Every field is optional until validation.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default)]
    pub shopper_id: Option<String>,
    /// API host override; defaults to the production host.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl IntegrationConfig {
    /// Read a JSON config file (`apiKey`, `apiSecret`, `shopperId`, `baseUrl`).
    pub fn from_file(path: &Path) -> CollectorResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| CollectorError::ConfigFile {
            path: path.display().to_string(),
            detail: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| CollectorError::ConfigFile {
            path: path.display().to_string(),
            detail: e.to_string(),
        })
    }

    /// Fields set in `overrides` replace the ones in `self`.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            api_key: overrides.api_key.or(self.api_key),
            api_secret: overrides.api_secret.or(self.api_secret),
            shopper_id: overrides.shopper_id.or(self.shopper_id),
            base_url: overrides.base_url.or(self.base_url),
        }
    }

    /// Validated credentials; fails when any of the three fields is missing or blank.
    pub fn credentials(&self) -> Result<Credentials, CredentialValidationError> {
        let fields = [
            (Credentials::API_KEY, &self.api_key),
            (Credentials::API_SECRET, &self.api_secret),
            (Credentials::SHOPPER_ID, &self.shopper_id),
        ];
        let map: HashMap<String, String> = fields
            .into_iter()
            .filter_map(|(key, value)| value.clone().map(|v| (key.to_string(), v)))
            .collect();
        Credentials::from_map(&map)
    }
}

impl std::fmt::Debug for IntegrationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntegrationConfig")
            .field("api_key", &self.api_key)
            .field(
                "api_secret",
                &self
                    .api_secret
                    .as_deref()
                    .map(godaddy_provider::log_sanitizer::mask_secret),
            )
            .field("shopper_id", &self.shopper_id)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> IntegrationConfig {
        IntegrationConfig {
            api_key: Some("k".to_string()),
            api_secret: Some("s".to_string()),
            shopper_id: Some("123".to_string()),
            base_url: None,
        }
    }

    #[test]
    fn complete_config_yields_credentials() {
        let creds = full().credentials().unwrap();
        assert_eq!(creds.shopper_id(), "123");
        assert_eq!(creds.authorization_header(), "sso-key k:s");
    }

    #[test]
    fn missing_secret_is_reported() {
        let config = IntegrationConfig {
            api_secret: None,
            ..full()
        };
        assert!(matches!(
            config.credentials(),
            Err(CredentialValidationError::MissingField { ref field, .. }) if field == "apiSecret"
        ));
    }

    #[test]
    fn blank_shopper_is_reported() {
        let config = IntegrationConfig {
            shopper_id: Some(String::new()),
            ..full()
        };
        assert!(matches!(
            config.credentials(),
            Err(CredentialValidationError::EmptyField { ref field, .. }) if field == "shopperId"
        ));
    }

    #[test]
    fn overrides_take_precedence() {
        let file = IntegrationConfig {
            base_url: Some("https://api.ote-godaddy.com".to_string()),
            ..full()
        };
        let cli = IntegrationConfig {
            api_key: Some("other".to_string()),
            ..IntegrationConfig::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.api_key.as_deref(), Some("other"));
        assert_eq!(merged.api_secret.as_deref(), Some("s"));
        assert_eq!(merged.base_url.as_deref(), Some("https://api.ote-godaddy.com"));
    }

    #[test]
    fn reads_camel_case_file() {
        let path = std::env::temp_dir().join(format!("godaddy-config-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"apiKey":"k","apiSecret":"s","shopperId":"123"}"#).unwrap();
        let config = IntegrationConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config, full());
    }

    #[test]
    fn unreadable_file_is_config_error() {
        let err = IntegrationConfig::from_file(Path::new("/nonexistent/godaddy.json")).unwrap_err();
        assert!(matches!(err, CollectorError::ConfigFile { .. }));
    }

    #[test]
    fn debug_masks_secret() {
        let config = IntegrationConfig {
            api_secret: Some("supersecretvalue".to_string()),
            ..full()
        };
        assert!(!format!("{config:?}").contains("supersecretvalue"));
    }
}
