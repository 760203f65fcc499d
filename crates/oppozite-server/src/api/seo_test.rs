//! Route tests for `/api/seo`.
//!
//! One wiremock server plays both upstreams: the Storefront GraphQL endpoint
//! and the deployment serving `/index.html`, reached via `x-forwarded-host`.

use axum::body::{to_bytes, Body};
use axum::http::Request;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::api::build_app;
use crate::api::test_support::{test_config, test_state};

const GRAPHQL_PATH: &str = "/api/2025-07/graphql.json";

const BASE_HTML: &str = r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <title>Oppozite Wears | Premium Streetwear</title>
    <meta name="description" content="Premium streetwear for those who dare to be different" />
    <meta property="og:title" content="Oppozite Wears" />
    <meta property="og:description" content="Premium streetwear" />
    <meta property="og:image" content="https://www.oppozitewears.com/og-image.png" />
    <meta name="twitter:title" content="Oppozite Wears" />
    <meta name="twitter:description" content="Premium streetwear" />
    <meta name="twitter:image" content="https://www.oppozitewears.com/og-image.png" />
  </head>
  <body>
    <div id="root"></div>
  </body>
</html>
"#;

struct Served {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

async fn mount_index(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BASE_HTML))
        .mount(server)
        .await;
}

async fn mount_graphql(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn get(server: &MockServer, uri: &str, config: oppozite_core::AppConfig) -> Served {
    let app = build_app(test_state(
        config,
        &format!("{}{GRAPHQL_PATH}", server.uri()),
    ));
    let response = app
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("x-forwarded-proto", "http")
                .header("x-forwarded-host", server.address().to_string())
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    Served {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("utf-8 body"),
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: header::HeaderName) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn hoodie_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "data": {
            "productByHandle": {
                "title": "Classic Hoodie",
                "description": "Soft cotton blend",
                "images": { "edges": [{ "node": { "url": "https://cdn/x.jpg" } }] }
            }
        }
    }))
}

fn assert_default_tags(body: &str) {
    assert!(body.contains("<title>Oppozite Wears</title>"), "{body}");
    assert!(body.contains(
        r#"<meta name="description" content="Premium streetwear for those who dare to be different" />"#
    ));
    assert!(body.contains(
        r#"<meta property="og:image" content="https://www.oppozitewears.com/og-image.png" />"#
    ));
}

#[tokio::test]
async fn no_identifier_redirects_to_root() {
    let server = MockServer::start().await;
    let served = get(&server, "/api/seo", test_config()).await;

    assert_eq!(served.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(header_str(&served.headers, header::LOCATION), Some("/"));
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn empty_identifiers_redirect_to_root() {
    let server = MockServer::start().await;
    let served = get(&server, "/api/seo?handle=&collection=", test_config()).await;

    assert_eq!(served.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(header_str(&served.headers, header::LOCATION), Some("/"));
}

#[tokio::test]
async fn found_product_rewrites_tags() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    mount_graphql(&server, hoodie_response()).await;

    let served = get(&server, "/api/seo?handle=classic-hoodie", test_config()).await;

    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(
        header_str(&served.headers, header::CACHE_CONTROL),
        Some("s-maxage=60, stale-while-revalidate=300")
    );
    assert_eq!(
        header_str(&served.headers, header::CONTENT_TYPE),
        Some("text/html; charset=utf-8")
    );

    let body = &served.body;
    assert!(body.contains("<title>Classic Hoodie | Oppozite Wears</title>"));
    assert!(body.contains(r#"<meta property="og:image" content="https://cdn/x.jpg" />"#));
    assert!(body.contains(r#"<meta name="twitter:image" content="https://cdn/x.jpg" />"#));
    assert!(body.contains(
        r#"<meta property="og:title" content="Classic Hoodie | Oppozite Wears" />"#
    ));
    assert!(body.contains(
        r#"<meta name="twitter:title" content="Classic Hoodie | Oppozite Wears" />"#
    ));
    assert!(body.contains(r#"<meta name="description" content="Soft cotton blend" />"#));
    assert_eq!(body.matches("<title>").count(), 1);
    assert_eq!(body.matches("og:image").count(), 1);
}

#[tokio::test]
async fn trace_comment_is_appended_before_body_close() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    mount_graphql(&server, hoodie_response()).await;

    let served = get(&server, "/api/seo?handle=classic-hoodie", test_config()).await;
    let body = &served.body;

    let comment_at = body.find("<!-- SEO Debug:").expect("trace comment");
    let body_close = body.rfind("</body>").expect("body close");
    assert!(comment_at < body_close);
    assert!(body.contains("handle: classic-hoodie"));
    assert!(body.contains("collection: (none)"));
    assert!(body.contains("query: productByHandle"));
    assert!(body.contains("found: true"));
    assert!(body.contains("image: https://cdn/x.jpg"));
    assert!(body.contains(&format!(
        "html_source: http://{}/index.html",
        server.address()
    )));
}

#[tokio::test]
async fn trace_comment_can_be_disabled() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    mount_graphql(&server, hoodie_response()).await;

    let mut config = test_config();
    config.seo_trace_enabled = false;
    let served = get(&server, "/api/seo?handle=classic-hoodie", config).await;

    assert_eq!(served.status, StatusCode::OK);
    assert!(!served.body.contains("SEO Debug"));
    assert!(served.body.contains("<title>Classic Hoodie | Oppozite Wears</title>"));
}

#[tokio::test]
async fn unknown_handle_serves_defaults() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    mount_graphql(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "data": { "productByHandle": null } })),
    )
    .await;

    let served = get(&server, "/api/seo?handle=does-not-exist", test_config()).await;

    assert_eq!(served.status, StatusCode::OK);
    assert_default_tags(&served.body);
    assert!(served.body.contains("found: false"));
    assert!(!served.body.contains("lookup_error"));
}

#[tokio::test]
async fn lookup_failure_serves_defaults_with_error_trace() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    mount_graphql(&server, ResponseTemplate::new(500)).await;

    let served = get(&server, "/api/seo?handle=classic-hoodie", test_config()).await;

    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(
        header_str(&served.headers, header::CACHE_CONTROL),
        Some("s-maxage=60, stale-while-revalidate=300")
    );
    assert_default_tags(&served.body);
    assert!(served.body.contains("lookup_error: unexpected HTTP status 500"));
}

#[tokio::test]
async fn malformed_lookup_payload_serves_defaults() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    mount_graphql(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

    let served = get(&server, "/api/seo?handle=classic-hoodie", test_config()).await;

    assert_eq!(served.status, StatusCode::OK);
    assert_default_tags(&served.body);
}

#[tokio::test]
async fn missing_base_document_redirects_to_root() {
    let server = MockServer::start().await;
    mount_graphql(&server, hoodie_response()).await;
    Mock::given(method("GET"))
        .and(path("/index.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let served = get(&server, "/api/seo?handle=classic-hoodie", test_config()).await;

    assert_eq!(served.status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(header_str(&served.headers, header::LOCATION), Some("/"));
}

#[tokio::test]
async fn request_without_host_redirects_to_root() {
    let server = MockServer::start().await;
    mount_graphql(&server, hoodie_response()).await;

    let app = build_app(test_state(
        test_config(),
        &format!("{}{GRAPHQL_PATH}", server.uri()),
    ));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/seo?handle=classic-hoodie")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn collection_takes_precedence_over_handle() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    Mock::given(method("POST"))
        .and(path(GRAPHQL_PATH))
        .and(body_partial_json(json!({ "variables": { "handle": "winter" } })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "collectionByHandle": {
                    "title": "Winter Drop",
                    "description": "",
                    "image": null
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let served = get(
        &server,
        "/api/seo?handle=classic-hoodie&collection=winter",
        test_config(),
    )
    .await;

    assert_eq!(served.status, StatusCode::OK);
    let body = &served.body;
    assert!(body.contains("<title>Winter Drop | Oppozite Wears</title>"));
    assert!(body.contains(
        r#"<meta name="description" content="Premium streetwear for those who dare to be different" />"#
    ));
    assert!(body.contains(
        r#"<meta property="og:image" content="https://www.oppozitewears.com/og-image.png" />"#
    ));
    assert!(body.contains("query: collectionByHandle"));
}

#[tokio::test]
async fn quotes_in_entity_fields_are_escaped() {
    let server = MockServer::start().await;
    mount_index(&server).await;
    mount_graphql(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "productByHandle": {
                    "title": "The \"Opp\" Tee",
                    "description": "Printed \"different\" on the back",
                    "images": { "edges": [] }
                }
            }
        })),
    )
    .await;

    let served = get(&server, "/api/seo?handle=opp-tee", test_config()).await;

    let body = &served.body;
    assert!(body.contains(
        r#"<meta property="og:title" content="The &quot;Opp&quot; Tee | Oppozite Wears" />"#
    ));
    assert!(body.contains(
        r#"<meta name="description" content="Printed &quot;different&quot; on the back" />"#
    ));
}
