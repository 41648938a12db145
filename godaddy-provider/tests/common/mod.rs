//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::time::Duration;

use godaddy_provider::{Credentials, GodaddyClient};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const API_KEY: &str = "k";
pub const API_SECRET: &str = "s";
pub const SHOPPER_ID: &str = "123";
pub const AUTH_HEADER: &str = "sso-key k:s";

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

pub fn credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET, SHOPPER_ID).expect("test credentials are valid")
}

/// Client pointed at the mock server, with a short rate-limit fallback.
pub fn client_for(server: &MockServer) -> GodaddyClient {
    GodaddyClient::builder(credentials())
        .base_url(server.uri())
        .rate_limit_fallback(Duration::from_millis(10))
        .build()
        .expect("client builds")
}

/// `count` DNS records named `host-{start}` .. `host-{start + count - 1}`.
pub fn record_page(start: usize, count: usize) -> Value {
    Value::Array(
        (start..start + count)
            .map(|i| {
                json!({
                    "type": "A",
                    "name": format!("host-{i}"),
                    "data": format!("192.0.2.{}", i % 250),
                    "ttl": 600
                })
            })
            .collect(),
    )
}

/// Domain listing page for the given names.
pub fn domain_page(names: &[&str]) -> Value {
    Value::Array(
        names
            .iter()
            .map(|name| json!({ "domain": name, "status": "ACTIVE" }))
            .collect(),
    )
}
