//! HTTP 请求工具
//!
//! 负责发送请求、记录日志、读取响应与状态分类。
//! 重试策略与分页不在这里处理，由 [`GodaddyClient`](crate::GodaddyClient) 决定。

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::{ProviderError, Result};
use crate::utils::log_sanitizer::truncate_for_log;

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
pub(crate) fn create_http_client() -> Result<Client> {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .map_err(|e| ProviderError::ClientBuild {
            detail: e.to_string(),
        })
}

/// A response that was received, whatever its status.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

/// Classification of an HTTP status.
///
/// Every status maps to exactly one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ResponseClass {
    /// 2xx
    Success,
    /// 429, retried after a delay
    RateLimited,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404, benign absence
    NotFound,
    /// anything else
    Failed,
}

impl ResponseClass {
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => Self::Success,
            429 => Self::RateLimited,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            _ => Self::Failed,
        }
    }

    /// Only rate limiting is retried; auth, permission and API failures are terminal.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

/// HTTP 工具函数集
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// 执行 HTTP 请求并返回状态码、状态文本与响应体
    ///
    /// 只有在未收到响应（连接失败、超时、读取响应体失败）时返回错误；
    /// 非 2xx 状态由调用方分类处理。
    pub async fn execute_request(
        request_builder: RequestBuilder,
        method_name: &str,
        endpoint: &str,
    ) -> Result<RawResponse> {
        log::debug!("[godaddy] {method_name} {endpoint}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout {
                    endpoint: endpoint.to_string(),
                    detail: e.to_string(),
                }
            } else {
                ProviderError::NetworkError {
                    endpoint: endpoint.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        log::debug!("[godaddy] Response Status: {status}");

        let body = response
            .text()
            .await
            .map_err(|e| ProviderError::NetworkError {
                endpoint: endpoint.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!("[godaddy] Response Body: {}", truncate_for_log(&body));

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }

    /// 解析 JSON 响应
    pub fn parse_json<T>(response_text: &str, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[godaddy] JSON parse failed for {endpoint}: {e}");
            log::error!("[godaddy] Raw response: {}", truncate_for_log(response_text));
            ProviderError::ParseError {
                endpoint: endpoint.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

/// Delay before retrying a rate-limited request.
///
/// GoDaddy puts the wait in the body as `retryAfterSec`. A missing, zero,
/// negative or unreadable value falls back to `fallback`.
pub(crate) fn rate_limit_delay(body: &str, fallback: Duration) -> Duration {
    let Ok(payload) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback;
    };

    let secs = match payload.get("retryAfterSec") {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    secs.filter(|s| *s > 0.0)
        .and_then(|s| Duration::try_from_secs_f64(s).ok())
        .unwrap_or(fallback)
}
