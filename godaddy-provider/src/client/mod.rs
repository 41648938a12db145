//! GoDaddy API client

mod error;
mod http;
mod operations;

use std::time::Duration;

use reqwest::Client;

use crate::error::Result;
use crate::http_client::create_http_client;
use crate::types::Credentials;

/// Production API host.
pub const GODADDY_API_BASE: &str = "https://api.godaddy.com";
/// Page size for both the record listing and the domain listing.
pub const PAGE_SIZE: u32 = 50;
/// Requests issued for one call while the API keeps answering `429`.
pub const MAX_RATE_LIMIT_ATTEMPTS: u32 = 3;
/// Wait used when a `429` body carries no usable `retryAfterSec`.
pub const RATE_LIMIT_FALLBACK: Duration = Duration::from_millis(5000);

/// GoDaddy API client
///
/// Issues one request at a time; pagination and rate-limit retries are strictly
/// sequential. Holds no state besides its configuration.
#[derive(Debug)]
pub struct GodaddyClient {
    pub(crate) client: Client,
    pub(crate) credentials: Credentials,
    pub(crate) base_url: String,
    pub(crate) max_attempts: u32,
    pub(crate) rate_limit_fallback: Duration,
    pub(crate) page_size: u32,
}

/// `GodaddyClient` Builder
pub struct GodaddyClientBuilder {
    credentials: Credentials,
    base_url: String,
    max_attempts: u32,
    rate_limit_fallback: Duration,
    page_size: u32,
}

impl GodaddyClientBuilder {
    fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: GODADDY_API_BASE.to_string(),
            max_attempts: MAX_RATE_LIMIT_ATTEMPTS,
            rate_limit_fallback: RATE_LIMIT_FALLBACK,
            page_size: PAGE_SIZE,
        }
    }

    /// Override the API host (e.g. the OTE sandbox or a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Requests issued per call while rate limited. Clamped to at least 1.
    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn rate_limit_fallback(mut self, delay: Duration) -> Self {
        self.rate_limit_fallback = delay;
        self
    }

    /// Page size for paginated listings. Clamped to at least 1.
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn build(self) -> Result<GodaddyClient> {
        Ok(GodaddyClient {
            client: create_http_client()?,
            credentials: self.credentials,
            base_url: self.base_url,
            max_attempts: self.max_attempts,
            rate_limit_fallback: self.rate_limit_fallback,
            page_size: self.page_size,
        })
    }
}

impl GodaddyClient {
    /// Client against the production host with default limits.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::builder(credentials).build()
    }

    pub fn builder(credentials: Credentials) -> GodaddyClientBuilder {
        GodaddyClientBuilder::new(credentials)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
