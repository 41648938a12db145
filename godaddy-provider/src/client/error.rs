//! GoDaddy 状态码到错误类型的映射

use crate::error::ProviderError;
use crate::http_client::{RawResponse, ResponseClass};
use crate::utils::log_sanitizer::truncate_for_log;

/// Map a terminal failure to the error surfaced to the caller.
///
/// Only called for `Unauthorized`, `Forbidden` and `Failed`; the other classes
/// never become errors.
pub(super) fn map_failure(
    class: ResponseClass,
    response: RawResponse,
    endpoint: &str,
) -> ProviderError {
    let RawResponse {
        status,
        status_text,
        body,
    } = response;
    let raw_message = (!body.trim().is_empty()).then(|| truncate_for_log(&body));

    match class {
        ResponseClass::Unauthorized => ProviderError::InvalidCredentials {
            endpoint: endpoint.to_string(),
            status: Some(status),
            status_text: Some(status_text),
            raw_message,
        },
        ResponseClass::Forbidden => ProviderError::PermissionDenied {
            endpoint: endpoint.to_string(),
            status,
            status_text,
        },
        _ => ProviderError::ApiError {
            endpoint: endpoint.to_string(),
            status,
            status_text,
            raw_message,
        },
    }
}
