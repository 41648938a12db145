//! # godaddy-provider
//!
//! Typed client for the GoDaddy registrar API: account details, domains and
//! DNS records.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* - Use the platform's native TLS implementation.
//! - **`rustls`** - Use rustls. Recommended for static and cross-compiled builds.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use godaddy_provider::{Credentials, GodaddyClient, ProviderError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("key", "secret", "1234567890")?;
//!     let client = GodaddyClient::new(credentials)?;
//!
//!     client.verify_authentication().await?;
//!
//!     client
//!         .iterate_domains(|domain| {
//!             let client = &client;
//!             async move {
//!                 let records = client.get_domain_records(&domain.domain).await?;
//!                 println!("{}: {} records", domain.domain, records.len());
//!                 Ok::<_, ProviderError>(())
//!             }
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Operations return [`Result<T, ProviderError>`](ProviderError). Single-resource
//! accessors return `Ok(None)` when the API answers `404`, and when it keeps
//! answering `429` after the last attempt:
//!
//! - [`ProviderError::InvalidCredentials`] - `401`, or any failure of
//!   [`GodaddyClient::verify_authentication`]
//! - [`ProviderError::PermissionDenied`] - `403`
//! - [`ProviderError::ApiError`] - any other non-2xx status
//! - [`ProviderError::NetworkError`] / [`ProviderError::Timeout`] - no response

mod client;
mod error;
mod http_client;
mod pagination;
mod types;
mod utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export the client and its defaults
pub use client::{
    GODADDY_API_BASE, GodaddyClient, GodaddyClientBuilder, MAX_RATE_LIMIT_ATTEMPTS, PAGE_SIZE,
    RATE_LIMIT_FALLBACK,
};

// Re-export pagination cursors
pub use pagination::{MarkerCursor, OffsetCursor, PageStep};

// Re-export types
pub use types::{
    Contact, CredentialValidationError, Credentials, DomainDetail, DomainRecord, DomainSummary,
    Payload, Shopper,
};

// Re-export utils module
pub use utils::datetime;
pub use utils::log_sanitizer;
