//! Utility modules.

/// Timestamp helpers for registrar payloads.
pub mod datetime;

/// Log sanitization so response bodies and secrets stay out of the logs.
pub mod log_sanitizer;
