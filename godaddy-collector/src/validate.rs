//! Pre-flight check run before any collection step.

use godaddy_provider::GodaddyClient;

use crate::config::IntegrationConfig;
use crate::error::CollectorResult;

/// Client for `config`; fails on incomplete credentials without touching the network.
pub fn create_client(config: &IntegrationConfig) -> CollectorResult<GodaddyClient> {
    let credentials = config.credentials()?;
    let mut builder = GodaddyClient::builder(credentials);
    if let Some(base_url) = config.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
        builder = builder.base_url(base_url);
    }
    Ok(builder.build()?)
}

/// Reject incomplete configuration, then check the credentials against the API.
///
/// Returns the verified client so the steps can reuse it.
pub async fn validate_invocation(config: &IntegrationConfig) -> CollectorResult<GodaddyClient> {
    let client = create_client(config)?;
    client.verify_authentication().await?;
    tracing::info!(
        "Credentials verified for shopper {}",
        client.credentials().shopper_id()
    );
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CollectorError;

    #[tokio::test]
    async fn incomplete_config_fails_before_any_request() {
        let config = IntegrationConfig {
            api_key: Some("k".to_string()),
            api_secret: None,
            shopper_id: Some("123".to_string()),
            base_url: Some("http://127.0.0.1:1".to_string()),
        };
        let err = validate_invocation(&config).await.unwrap_err();
        assert!(matches!(err, CollectorError::Config(_)));
    }

    #[test]
    fn blank_base_url_keeps_default_host() {
        let config = IntegrationConfig {
            api_key: Some("k".to_string()),
            api_secret: Some("s".to_string()),
            shopper_id: Some("123".to_string()),
            base_url: Some(" ".to_string()),
        };
        let client = create_client(&config).unwrap();
        assert_eq!(client.base_url(), godaddy_provider::GODADDY_API_BASE);
    }
}
