#![allow(dead_code)]

use axum_test::TestServer;
use feedql::api::routes::routes;
use feedql::graphql::{FetchErrorMode, build_schema};
use feedql::infrastructure::feed::{FetchOptions, HttpFeedParser};
use feedql::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// URL nothing listens on (discard port).
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9/feed.xml";

pub fn fixture(name: &str) -> String {
    let file = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&file).unwrap_or_else(|e| panic!("fixture {file}: {e}"))
}

/// Raw fixture bytes, for documents that are not UTF-8.
pub fn fixture_bytes(name: &str) -> Vec<u8> {
    let file = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read(&file).unwrap_or_else(|e| panic!("fixture {file}: {e}"))
}

pub fn create_test_state(mode: FetchErrorMode, graphiql: bool) -> AppState {
    let parser = HttpFeedParser::new(FetchOptions {
        timeout: Duration::from_secs(5),
        ..FetchOptions::default()
    })
    .unwrap();

    let schema = build_schema(Arc::new(parser), mode).unwrap();
    AppState::new(schema, graphiql)
}

pub fn create_test_server(mode: FetchErrorMode) -> TestServer {
    let app = routes().with_state(create_test_state(mode, true));
    TestServer::new(app).unwrap()
}

/// Serves `body` as an RSS/Atom document at `route` and returns its full URL.
pub async fn mount_feed(mock: &MockServer, route: &str, body: impl Into<Vec<u8>>) -> String {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.into(), "application/xml"))
        .mount(mock)
        .await;

    format!("{}{}", mock.uri(), route)
}

/// Minimal RSS document with a distinct title and one item per entry of `items`.
pub fn rss_document(title: &str, items: &[&str]) -> String {
    let items: String = items
        .iter()
        .map(|item| format!("<item><title>{item}</title></item>"))
        .collect();

    format!(
        r#"<?xml version="1.0"?><rss version="2.0"><channel><title>{title}</title>{items}</channel></rss>"#
    )
}
