//! End-to-end collection against a mock GoDaddy API.

use godaddy_collector::{CollectorError, IntegrationConfig, collect, validate_invocation};
use godaddy_provider::ProviderError;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(server: &MockServer) -> IntegrationConfig {
    IntegrationConfig {
        api_key: Some("k".to_string()),
        api_secret: Some("s".to_string()),
        shopper_id: Some("123".to_string()),
        base_url: Some(server.uri()),
    }
}

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

async fn mount_account(server: &MockServer) {
    mount_json(server, "/v1/agreements", json!([])).await;
    mount_json(
        server,
        "/v1/shoppers/123",
        json!({ "shopperId": "123", "email": "owner@example.com" }),
    )
    .await;
}

async fn mount_domain_listing(server: &MockServer, names: &[&str]) {
    let page: Vec<Value> = names.iter().map(|d| json!({ "domain": d })).collect();
    let last = names.last().copied().unwrap_or_default();

    Mock::given(method("GET"))
        .and(path("/v1/domains"))
        .and(query_param_is_missing("marker"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/domains"))
        .and(query_param("marker", last))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

async fn mount_records(server: &MockServer, domain: &str, records: Value) {
    let route = format!("/v1/domains/{domain}/records");
    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(route.as_str()))
        .and(query_param("offset", "51"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

fn keys<T>(items: &[T], key: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|i| key(i).to_string()).collect()
}

#[tokio::test]
async fn collects_account_domains_and_records() {
    let server = MockServer::start().await;
    mount_account(&server).await;
    mount_domain_listing(&server, &["a.com", "b.com"]).await;
    mount_json(
        &server,
        "/v1/domains/a.com",
        json!({ "domainId": 1, "domain": "a.com", "status": "ACTIVE" }),
    )
    .await;
    mount_json(
        &server,
        "/v1/domains/b.com",
        json!({ "domainId": 2, "domain": "b.com", "status": "EXPIRED" }),
    )
    .await;
    mount_records(
        &server,
        "a.com",
        json!([
            { "type": "A", "name": "@", "data": "192.0.2.1", "ttl": 600 },
            { "type": "MX", "name": "@", "data": "mail.a.com", "priority": 10, "ttl": 3600 }
        ]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/v1/domains/b.com/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let graph = collect(&config(&server)).await.unwrap();

    let entity_types = keys(&graph.entities, |e| e.entity_type.as_str());
    assert_eq!(
        entity_types,
        [
            "godaddy_account",
            "godaddy_domain",
            "godaddy_domain_record",
            "godaddy_domain_record",
            "godaddy_domain",
        ]
    );
    assert_eq!(graph.entities[0].key, "godaddy:account:123");
    assert_eq!(graph.entities[1].key, "godaddy-domain:a.com");
    assert_eq!(graph.entities[4].key, "godaddy-domain:b.com");
    assert_eq!(
        graph.entities[2].key,
        "godaddy-domain-record:a.com:A:@:e7ac7ecd794e71914a63e2cbdca798fceb5afd12"
    );

    let relationship_types = keys(&graph.relationships, |r| r.relationship_type.as_str());
    assert_eq!(
        relationship_types,
        [
            "godaddy_account_has_domain",
            "godaddy_domain_has_record",
            "godaddy_domain_has_record",
            "godaddy_account_has_domain",
        ]
    );
    assert_eq!(graph.relationships[0].from_key, "godaddy:account:123");
    assert_eq!(graph.relationships[1].from_key, "godaddy-domain:a.com");
}

#[tokio::test]
async fn domain_without_details_is_skipped() {
    let server = MockServer::start().await;
    mount_account(&server).await;
    mount_domain_listing(&server, &["gone.com", "a.com"]).await;
    Mock::given(method("GET"))
        .and(path("/v1/domains/gone.com"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    mount_json(
        &server,
        "/v1/domains/a.com",
        json!({ "domainId": 1, "domain": "a.com", "status": "CANCELLED" }),
    )
    .await;

    let graph = collect(&config(&server)).await.unwrap();

    let entity_keys = keys(&graph.entities, |e| e.key.as_str());
    assert_eq!(entity_keys, ["godaddy:account:123", "godaddy-domain:a.com"]);
    assert_eq!(graph.relationships.len(), 1);
}

#[tokio::test]
async fn missing_account_fails_the_run() {
    let server = MockServer::start().await;
    mount_json(&server, "/v1/agreements", json!([])).await;
    Mock::given(method("GET"))
        .and(path("/v1/shoppers/123"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/domains"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let err = collect(&config(&server)).await.unwrap_err();
    match err {
        CollectorError::Step { step, source } => {
            assert_eq!(step, "fetch-account");
            assert!(matches!(*source, CollectorError::AccountNotFound(ref id) if id == "123"));
        }
        other => panic!("expected step failure, got {other:?}"),
    }
}

#[tokio::test]
async fn records_failure_aborts_domain_walk() {
    let server = MockServer::start().await;
    mount_account(&server).await;
    mount_domain_listing(&server, &["a.com", "b.com"]).await;
    mount_json(
        &server,
        "/v1/domains/a.com",
        json!({ "domainId": 1, "domain": "a.com", "status": "ACTIVE" }),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/v1/domains/a.com/records"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/domains/b.com"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = collect(&config(&server)).await.unwrap_err();
    match err {
        CollectorError::Step { step, source } => {
            assert_eq!(step, "fetch-domains");
            assert!(matches!(
                *source,
                CollectorError::Provider(ProviderError::PermissionDenied { status: 403, .. })
            ));
        }
        other => panic!("expected step failure, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_credentials_stop_before_steps() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/agreements"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/shoppers/123"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = validate_invocation(&config(&server)).await.unwrap_err();
    assert!(matches!(
        err,
        CollectorError::Provider(ProviderError::InvalidCredentials {
            status: Some(401),
            ..
        })
    ));
    assert!(collect(&config(&server)).await.is_err());
}
