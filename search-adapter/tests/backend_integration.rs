//! Integration tests for the search backend.
//!
//! These tests wire the backend exactly as the binary does, through
//! `Dependencies`, and point the REST client at a mock HTTP server.

use std::collections::HashMap;

use mockito::{Matcher, Server, ServerGuard};
use search_adapter::status::{self, TARGET_INDEX_LABEL};
use search_adapter::Dependencies;
use search_adapter_repository::{SearchBackend, SearchIndexError};
use search_adapter_shared::{Collection, IndexItem, SearchQuery, StatusEntry};
use serde_json::json;

/// Helper to build dependencies targeting the mock server
fn dependencies_for(server: &ServerGuard, extra: &[(&str, &str)]) -> Dependencies {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("ALGOLIA_APPLICATION_ID".to_string(), "A1".to_string());
    vars.insert("ALGOLIA_API_KEY".to_string(), "K1".to_string());
    vars.insert("ALGOLIA_INDEX".to_string(), "products".to_string());
    vars.insert("ALGOLIA_WRITE_HOST".to_string(), server.url());
    vars.insert("ALGOLIA_READ_HOST".to_string(), server.url());
    for (key, value) in extra {
        vars.insert(key.to_string(), value.to_string());
    }

    Dependencies::from_lookup(move |key| vars.get(key).cloned()).expect("valid configuration")
}

fn catalog_items() -> Vec<IndexItem> {
    vec![
        IndexItem::new("p1").with_field("title", vec!["Shoe"]),
        IndexItem::new("p2").with_field("title", vec!["Hat"]),
    ]
}

#[tokio::test]
async fn test_index_items_end_to_end() {
    let mut server = Server::new_async().await;
    let batch = server
        .mock("POST", "/1/indexes/products/batch")
        .match_header("x-algolia-application-id", "A1")
        .match_header("x-algolia-api-key", "K1")
        .match_body(Matcher::Json(json!({
            "requests": [
                { "action": "updateObject", "body": { "objectID": "p1", "title": ["Shoe"] } },
                { "action": "updateObject", "body": { "objectID": "p2", "title": ["Hat"] } }
            ]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"taskID": 42, "objectIDs": ["p1", "p2"]}"#)
        .expect(1)
        .create_async()
        .await;

    let deps = dependencies_for(&server, &[]);
    let collection = deps.collection.clone().expect("ALGOLIA_INDEX is set");

    let summary = deps
        .backend
        .index_items(&collection, &catalog_items())
        .await
        .unwrap();

    assert_eq!(summary.confirmed_ids(), vec!["p1", "p2"]);
    assert!(summary.is_complete());
    batch.assert_async().await;
}

#[tokio::test]
async fn test_index_items_remote_failure_is_reported() {
    let mut server = Server::new_async().await;
    let _batch = server
        .mock("POST", "/1/indexes/products/batch")
        .with_status(503)
        .with_body("service unavailable")
        .create_async()
        .await;

    let deps = dependencies_for(&server, &[]);

    let summary = deps
        .backend
        .index_items(&Collection::new("products"), &catalog_items())
        .await
        .unwrap();

    assert_eq!(summary.attempted_ids(), vec!["p1", "p2"]);
    assert!(summary.confirmed_ids().is_empty());
    assert_eq!(summary.failed, 2);
}

#[tokio::test]
async fn test_index_items_remote_failure_is_propagated() {
    let mut server = Server::new_async().await;
    let _batch = server
        .mock("POST", "/1/indexes/products/batch")
        .with_status(403)
        .with_body(r#"{"message": "Invalid Application-ID or API key"}"#)
        .create_async()
        .await;

    let deps = dependencies_for(&server, &[("ADAPTER_FAILURE_POLICY", "propagate")]);

    let result = deps
        .backend
        .index_items(&Collection::new("products"), &catalog_items())
        .await;

    match result {
        Err(SearchIndexError::IndexError(msg)) => assert!(msg.contains("403")),
        other => panic!("expected IndexError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_delete_items_partial_failure() {
    let mut server = Server::new_async().await;
    let first = server
        .mock("DELETE", "/1/indexes/products/p1")
        .with_status(200)
        .with_body(r#"{"taskID": 1}"#)
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("DELETE", "/1/indexes/products/p2")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    let third = server
        .mock("DELETE", "/1/indexes/products/p3")
        .with_status(200)
        .with_body(r#"{"taskID": 3}"#)
        .expect(1)
        .create_async()
        .await;

    let deps = dependencies_for(&server, &[]);
    let ids: Vec<String> = ["p1", "p2", "p3"].iter().map(|s| s.to_string()).collect();

    let summary = deps
        .backend
        .delete_items(&Collection::new("products"), &ids)
        .await
        .unwrap();

    assert_eq!(summary.confirmed_ids(), vec!["p1", "p3"]);
    assert_eq!(summary.failed, 1);
    first.assert_async().await;
    second.assert_async().await;
    third.assert_async().await;
}

#[tokio::test]
async fn test_remove_collection_guards_read_only() {
    let mut server = Server::new_async().await;
    let archive_clear = server
        .mock("POST", "/1/indexes/archive/clear")
        .expect(0)
        .create_async()
        .await;
    let products_clear = server
        .mock("POST", "/1/indexes/products/clear")
        .with_status(200)
        .with_body(r#"{"taskID": 7}"#)
        .expect(1)
        .create_async()
        .await;

    let deps = dependencies_for(&server, &[]);

    deps.backend
        .remove_collection(&Collection::read_only("archive"))
        .await
        .unwrap();
    let summary = deps
        .backend
        .remove_collection(&Collection::new("products"))
        .await
        .unwrap();

    assert_eq!(summary.confirmed_ids(), vec!["products"]);
    archive_clear.assert_async().await;
    products_clear.assert_async().await;
}

#[tokio::test]
async fn test_delete_all_items_without_collection() {
    let mut server = Server::new_async().await;
    let clear = server
        .mock("POST", Matcher::Regex(r"^/1/indexes/.+/clear$".to_string()))
        .expect(0)
        .create_async()
        .await;

    let deps = dependencies_for(&server, &[]);
    let summary = deps.backend.delete_all_items(None).await.unwrap();

    assert_eq!(summary.total, 0);
    clear.assert_async().await;
}

#[tokio::test]
async fn test_view_status_lists_indexes() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/1/indexes")
        .match_header("x-algolia-api-key", "K1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [{"name": "products"}, {"name": "articles"}], "nbPages": 1}"#)
        .expect(1)
        .create_async()
        .await;

    let deps = dependencies_for(&server, &[]);
    let status = deps.backend.view_status().await.unwrap();

    assert_eq!(
        status,
        vec![
            StatusEntry::new("Application ID", "A1"),
            StatusEntry::new("API Key", "K1"),
            StatusEntry::new("Available Algolia indexes", "products, articles"),
        ]
    );
    list.assert_async().await;
}

#[tokio::test]
async fn test_status_report_checks_target_index() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/1/indexes")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"items": [{"name": "articles"}], "nbPages": 1}"#)
        .expect(2)
        .create_async()
        .await;

    let deps = dependencies_for(&server, &[]);
    let entries = status::report(&deps).await.unwrap();

    assert_eq!(
        entries.last(),
        Some(&StatusEntry::new(TARGET_INDEX_LABEL, "products (missing)"))
    );
    assert_eq!(status::redact(&entries)[1].value, "**");
    list.assert_async().await;
}

#[tokio::test]
async fn test_index_items_over_a_thousand_items_in_one_request() {
    let mut server = Server::new_async().await;
    let batch = server
        .mock("POST", "/1/indexes/products/batch")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"taskID": 9}"#)
        .expect(1)
        .create_async()
        .await;

    let deps = dependencies_for(&server, &[]);
    let items: Vec<IndexItem> = (0..1001).map(|i| IndexItem::new(format!("p{}", i))).collect();

    let summary = deps
        .backend
        .index_items(&Collection::new("products"), &items)
        .await
        .unwrap();

    assert_eq!(summary.confirmed_ids().len(), 1001);
    batch.assert_async().await;
}

#[tokio::test]
async fn test_search_never_contacts_service() {
    let mut server = Server::new_async().await;
    let reads = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let writes = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let deps = dependencies_for(&server, &[]);
    let results = deps
        .backend
        .search(&SearchQuery::keys("shoe").with_limit(10));

    assert!(results.is_empty());
    assert_eq!(results.count, 0);
    reads.assert_async().await;
    writes.assert_async().await;
}
