//! Typed accessors and pagination loops built on [`GodaddyClient::get_data`].
//!
//! Payloads are decoded through [`Payload`](crate::Payload) so explicit nulls survive.

use std::future::Future;

use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::pagination::{MarkerCursor, OffsetCursor, PageStep};
use crate::types::{DomainDetail, DomainRecord, DomainSummary, Shopper};

use super::GodaddyClient;

const AGREEMENTS_PATH: &str = "v1/agreements";
const DOMAINS_PATH: &str = "/v1/domains";

impl GodaddyClient {
    /// Check the credentials with a lightweight request.
    ///
    /// Every failure is reported as [`ProviderError::InvalidCredentials`] carrying
    /// the original status, status text and endpoint; callers only need a yes/no.
    pub async fn verify_authentication(&self) -> Result<()> {
        match self.get_data::<Value>(AGREEMENTS_PATH, &[]).await {
            Ok(_) => Ok(()),
            Err(e) => {
                log::warn!("[godaddy] Credential check failed: {e}");
                Err(ProviderError::InvalidCredentials {
                    endpoint: self.endpoint(AGREEMENTS_PATH),
                    status: e.status(),
                    status_text: e.status_text().map(str::to_string),
                    raw_message: Some(e.to_string()),
                })
            }
        }
    }

    /// Account resource of the configured shopper.
    pub async fn get_account_details(&self) -> Result<Option<Shopper>> {
        let path = format!(
            "/v1/shoppers/{}",
            urlencoding::encode(self.credentials.shopper_id())
        );
        self.get_payload(&path, &[]).await
    }

    /// Details of one domain. `domain` must not be blank.
    pub async fn get_domain_details(&self, domain: &str) -> Result<Option<DomainDetail>> {
        let domain = require_domain(domain)?;
        self.get_payload(&format!("{DOMAINS_PATH}/{}", urlencoding::encode(domain)), &[])
            .await
    }

    /// Every DNS record of `domain`.
    ///
    /// Pages through `limit`/`offset` (offset 1, 1 + page size, ...) until a page
    /// comes back empty or absent, and returns the pages concatenated in order.
    pub async fn get_domain_records(&self, domain: &str) -> Result<Vec<DomainRecord>> {
        let domain = require_domain(domain)?;
        let path = format!("{DOMAINS_PATH}/{}/records", urlencoding::encode(domain));

        let mut cursor = OffsetCursor::new(self.page_size);
        let mut records = Vec::new();

        loop {
            let page: Option<Vec<DomainRecord>> =
                self.get_payload_page(&path, &cursor.query()).await?;
            if cursor.advance(page.as_deref()) == PageStep::Done {
                break;
            }
            records.extend(page.unwrap_or_default());
        }

        log::debug!("[godaddy] Fetched {} records for {domain}", records.len());
        Ok(records)
    }

    /// Walk every domain of the account, calling `visit` once per domain.
    ///
    /// Pages through `limit`/`marker`, where the marker is the `domain` of the last
    /// item of the previous page, until a page comes back empty or absent. Each
    /// `visit` is awaited before the next item or page is requested, and the first
    /// error it returns stops the walk.
    pub async fn iterate_domains<F, Fut, E>(&self, mut visit: F) -> std::result::Result<(), E>
    where
        F: FnMut(DomainSummary) -> Fut,
        Fut: Future<Output = std::result::Result<(), E>>,
        E: From<ProviderError>,
    {
        let mut cursor = MarkerCursor::new(self.page_size);

        loop {
            let page: Option<Vec<DomainSummary>> =
                self.get_payload_page(DOMAINS_PATH, &cursor.query()).await?;
            if cursor.advance(page.as_deref(), |d| d.domain.as_str()) == PageStep::Done {
                break;
            }
            for domain in page.unwrap_or_default() {
                visit(domain).await?;
            }
        }

        Ok(())
    }
}

fn require_domain(domain: &str) -> Result<&str> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(ProviderError::InvalidParameter {
            param: "domain".to_string(),
            detail: "domain name must not be empty".to_string(),
        });
    }
    Ok(domain)
}
