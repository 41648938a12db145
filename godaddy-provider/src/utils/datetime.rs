//! 时间戳工具
//!
//! GoDaddy 以 RFC3339 字符串返回 `createdAt`、`expires` 等字段，
//! 下游图对象则使用 Unix 毫秒时间戳。原始字符串保留在记录中，按需解析。

use chrono::{DateTime, Utc};

/// 解析 RFC3339 时间戳并转换为 UTC；空串或格式错误返回 `None`
pub fn parse_rfc3339(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    match DateTime::parse_from_rfc3339(s) {
        Ok(dt) => Some(dt.with_timezone(&Utc)),
        Err(e) => {
            log::debug!("Ignoring malformed timestamp {s:?}: {e}");
            None
        }
    }
}

/// RFC3339 字符串 -> Unix 毫秒时间戳
pub fn rfc3339_to_epoch_millis(s: Option<&str>) -> Option<i64> {
    s.and_then(parse_rfc3339).map(|dt| dt.timestamp_millis())
}
