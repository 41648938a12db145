//! GoDaddy HTTP 请求方法

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ProviderError, Result};
use crate::http_client::{HttpUtils, ResponseClass, rate_limit_delay};
use crate::types::Payload;

use super::GodaddyClient;
use super::error::map_failure;

impl GodaddyClient {
    /// Full URL for `path`; a leading `/` is inserted when missing.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    /// Authenticated GET returning the decoded body.
    ///
    /// - `2xx`: the decoded body.
    /// - `404`: `Ok(None)`; several record types 404 under benign configurations.
    /// - `429`: waits (`retryAfterSec` from the body, else the fallback) and reissues
    ///   the identical request. After `max_attempts` rate-limited responses the call
    ///   gives up with `Ok(None)` rather than an error.
    /// - `401` / `403` / anything else: the matching [`ProviderError`](crate::ProviderError).
    /// - No response at all: `NetworkError` / `Timeout`, never `Ok(None)`.
    pub async fn get_data<T>(&self, path: &str, params: &[(&str, String)]) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);

        for attempt in 1..=self.max_attempts {
            let request = self
                .client
                .get(&url)
                .header(ACCEPT, "application/json")
                .header(AUTHORIZATION, self.credentials.authorization_header())
                .query(params);

            let response = HttpUtils::execute_request(request, "GET", &url).await?;

            match ResponseClass::from_status(response.status) {
                ResponseClass::Success => {
                    return HttpUtils::parse_json(&response.body, &url).map(Some);
                }
                ResponseClass::NotFound => {
                    log::warn!("[godaddy] Unable to query {url} due to 404 error, treating as no data");
                    return Ok(None);
                }
                class if class.is_retryable() => {
                    if attempt == self.max_attempts {
                        break;
                    }
                    let delay = rate_limit_delay(&response.body, self.rate_limit_fallback);
                    log::info!(
                        "[godaddy] Encountered a rate limit (attempt {}/{}). Retrying in {:.1} seconds.",
                        attempt,
                        self.max_attempts,
                        delay.as_secs_f32()
                    );
                    tokio::time::sleep(delay).await;
                }
                class => return Err(map_failure(class, response, &url)),
            }
        }

        log::warn!(
            "[godaddy] Still rate limited after {} attempts, treating {url} as no data",
            self.max_attempts
        );
        Ok(None)
    }
}

impl GodaddyClient {
    /// [`get_data`](Self::get_data) decoding one payload object, explicit nulls kept.
    pub(crate) async fn get_payload<T: Payload>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>> {
        let Some(value) = self.get_data::<Value>(path, params).await? else {
            return Ok(None);
        };
        decode_payload(value, &self.endpoint(path)).map(Some)
    }

    /// [`get_data`](Self::get_data) decoding a page (JSON array) of payloads.
    pub(crate) async fn get_payload_page<T: Payload>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Option<Vec<T>>> {
        let Some(items) = self.get_data::<Vec<Value>>(path, params).await? else {
            return Ok(None);
        };
        let endpoint = self.endpoint(path);
        items
            .into_iter()
            .map(|item| decode_payload(item, &endpoint))
            .collect::<Result<Vec<T>>>()
            .map(Some)
    }
}

fn decode_payload<T: Payload>(value: Value, endpoint: &str) -> Result<T> {
    T::from_json(value).map_err(|e| {
        log::error!("[godaddy] Payload decode failed for {endpoint}: {e}");
        ProviderError::ParseError {
            endpoint: endpoint.to_string(),
            detail: e.to_string(),
        }
    })
}
