use serde::{Deserialize, Serialize};

/// Unified error type for all GoDaddy API operations.
///
/// Every non-2xx response that reaches the caller is mapped to exactly one
/// variant. Two classifications never show up here: a `404` is absorbed by the
/// request layer and surfaces as `Ok(None)`, and rate limiting is retried and,
/// once exhausted, also surfaces as `Ok(None)`.
///
/// All variants are serializable for structured error reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// The credentials were rejected (HTTP 401), or the credential check failed.
    ///
    /// `status` and `status_text` are `None` when the failure happened before a
    /// response was received (e.g. a network error during the credential check).
    InvalidCredentials {
        /// Endpoint that was being requested.
        endpoint: String,
        /// HTTP status, if a response was received.
        status: Option<u16>,
        /// HTTP status text, if a response was received.
        status_text: Option<String>,
        /// Message of the underlying failure, if any.
        raw_message: Option<String>,
    },

    /// The credentials are valid but lack permission for the resource (HTTP 403).
    PermissionDenied {
        /// Endpoint that was being requested.
        endpoint: String,
        /// HTTP status.
        status: u16,
        /// HTTP status text.
        status_text: String,
    },

    /// Any other non-2xx response.
    ApiError {
        /// Endpoint that was being requested.
        endpoint: String,
        /// HTTP status.
        status: u16,
        /// HTTP status text.
        status_text: String,
        /// Response body (truncated), if any.
        raw_message: Option<String>,
    },

    /// No response was received (connection refused, DNS failure, broken body, ...).
    NetworkError {
        /// Endpoint that was being requested.
        endpoint: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Endpoint that was being requested.
        endpoint: String,
        /// Error details.
        detail: String,
    },

    /// A 2xx response body could not be decoded into the expected shape.
    ParseError {
        /// Endpoint that was being requested.
        endpoint: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// A caller-supplied argument was rejected before any request was made.
    InvalidParameter {
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The underlying HTTP client could not be constructed.
    ClientBuild {
        /// Error details.
        detail: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（凭证错误、权限不足、参数错误），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials { .. }
                | Self::PermissionDenied { .. }
                | Self::InvalidParameter { .. }
        )
    }

    /// HTTP status attached to this error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidCredentials { status, .. } => *status,
            Self::PermissionDenied { status, .. } | Self::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// HTTP status text attached to this error, if a response was received.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            Self::InvalidCredentials { status_text, .. } => status_text.as_deref(),
            Self::PermissionDenied { status_text, .. } | Self::ApiError { status_text, .. } => {
                Some(status_text.as_str())
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials {
                endpoint,
                status,
                status_text,
                ..
            } => write_http(
                f,
                "Authentication failed",
                *status,
                status_text.as_deref(),
                endpoint,
            ),
            Self::PermissionDenied {
                endpoint,
                status,
                status_text,
            } => write_http(
                f,
                "Permission denied",
                Some(*status),
                Some(status_text.as_str()),
                endpoint,
            ),
            Self::ApiError {
                endpoint,
                status,
                status_text,
                ..
            } => write_http(
                f,
                "API request failed",
                Some(*status),
                Some(status_text.as_str()),
                endpoint,
            ),
            Self::NetworkError { endpoint, detail } => {
                write!(f, "Network error calling {endpoint}: {detail}")
            }
            Self::Timeout { endpoint, detail } => {
                write!(f, "Request to {endpoint} timed out: {detail}")
            }
            Self::ParseError { endpoint, detail } => {
                write!(f, "Failed to parse response from {endpoint}: {detail}")
            }
            Self::InvalidParameter { param, detail } => {
                write!(f, "Invalid parameter '{param}': {detail}")
            }
            Self::ClientBuild { detail } => write!(f, "Failed to build HTTP client: {detail}"),
        }
    }
}

fn write_http(
    f: &mut std::fmt::Formatter<'_>,
    kind: &str,
    status: Option<u16>,
    status_text: Option<&str>,
    endpoint: &str,
) -> std::fmt::Result {
    match (status, status_text) {
        (Some(code), Some(text)) if !text.is_empty() => {
            write!(f, "{kind}: {code} {text} ({endpoint})")
        }
        (Some(code), _) => write!(f, "{kind}: {code} ({endpoint})"),
        (None, _) => write!(f, "{kind} ({endpoint})"),
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
