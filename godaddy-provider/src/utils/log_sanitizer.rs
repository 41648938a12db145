//! Log sanitization utilities
//!
//! Registrar payloads carry contact details (names, emails, postal addresses)
//! and every request carries the API secret, so neither may land in the logs
//! verbatim.

/// Maximum number of bytes of a response body included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading characters of a secret left visible by [`mask_secret`].
const VISIBLE_SECRET_PREFIX: usize = 4;

/// Largest char boundary `<= index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    (0..=index).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0)
}

/// Truncate a response body for logging.
///
/// Bodies within [`TRUNCATE_LIMIT`] bytes are returned as-is; longer ones are
/// cut on a char boundary and suffixed with the original length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask a credential, keeping only a short prefix.
///
/// `"abcdef123456"` becomes `"abcd********"`. Secrets no longer than the
/// prefix are masked entirely.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= VISIBLE_SECRET_PREFIX {
        return "*".repeat(count);
    }
    let prefix: String = secret.chars().take(VISIBLE_SECRET_PREFIX).collect();
    format!("{prefix}{}", "*".repeat(count - VISIBLE_SECRET_PREFIX))
}
