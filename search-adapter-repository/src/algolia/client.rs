//! Algolia REST client implementation.
//!
//! This module provides the concrete implementation of `SearchClient` on top of
//! `reqwest`, speaking the hosted service's `/1/indexes` HTTP API.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, info};
use url::Url;

use crate::algolia::AlgoliaClientConfig;
use crate::config::BackendConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::{SearchClient, SearchClientFactory};
use crate::types::Record;

const APPLICATION_ID_HEADER: &str = "x-algolia-application-id";
const API_KEY_HEADER: &str = "x-algolia-api-key";

/// Batch action that creates a record or replaces it entirely.
const UPSERT_ACTION: &str = "updateObject";

#[derive(Debug, Deserialize)]
struct ListIndicesResponse {
    #[serde(default)]
    items: Vec<IndexSummary>,
}

#[derive(Debug, Deserialize)]
struct IndexSummary {
    name: String,
}

/// REST client for the hosted search service.
///
/// Credentials are sent as default headers on every request.
///
/// # Example
///
/// ```no_run
/// use search_adapter_repository::algolia::{AlgoliaClient, AlgoliaClientConfig};
/// use search_adapter_repository::{BackendConfig, SearchClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = BackendConfig::new("A1", "K1");
/// let client = AlgoliaClient::new(&credentials, &AlgoliaClientConfig::default())?;
/// let names = client.list_indices().await?;
/// # Ok(())
/// # }
/// ```
pub struct AlgoliaClient {
    http: ReqwestClient,
    write_url: Url,
    read_url: Url,
}

impl AlgoliaClient {
    /// Create a client for the given credentials.
    ///
    /// # Returns
    ///
    /// * `Ok(AlgoliaClient)` - A new client; nothing is sent yet
    /// * `Err(SearchIndexError)` - If a credential is invalid, cannot be sent
    ///   as a header, or the HTTP client cannot be built
    pub fn new(
        credentials: &BackendConfig,
        config: &AlgoliaClientConfig,
    ) -> Result<Self, SearchIndexError> {
        credentials.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(
            APPLICATION_ID_HEADER,
            HeaderValue::from_str(&credentials.application_id).map_err(|_| {
                SearchIndexError::configuration("application_id contains invalid characters")
            })?,
        );
        let mut api_key = HeaderValue::from_str(&credentials.api_key).map_err(|_| {
            SearchIndexError::configuration("api_key contains invalid characters")
        })?;
        api_key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, api_key);

        let http = ReqwestClient::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let write_url = config.write_url(&credentials.application_id)?;
        let read_url = config.read_url(&credentials.application_id)?;

        info!(
            application_id = %credentials.application_id,
            write_host = %write_url,
            read_host = %read_url,
            "Created Algolia client"
        );

        Ok(Self {
            http,
            write_url,
            read_url,
        })
    }

    /// Append percent-encoded path segments to a base URL.
    fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, SearchIndexError> {
        let mut url = base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                SearchIndexError::connection(format!("host '{}' cannot be a base URL", base))
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Turn a non-2xx response into an error built by `make_error`.
    async fn check_status(
        response: Response,
        operation: &str,
        make_error: fn(String) -> SearchIndexError,
    ) -> Result<Response, SearchIndexError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, operation, "Request failed");
        Err(make_error(format!(
            "{} failed with status {}: {}",
            operation, status, error_body
        )))
    }
}

#[async_trait]
impl SearchClient for AlgoliaClient {
    async fn list_indices(&self) -> Result<Vec<String>, SearchIndexError> {
        let url = Self::endpoint(&self.read_url, &["1", "indexes"])?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SearchIndexError::list(e.to_string()))?;
        let response =
            Self::check_status(response, "List indices", SearchIndexError::ListError).await?;

        let body: ListIndicesResponse = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        debug!(count = body.items.len(), "Listed indices");
        Ok(body.items.into_iter().map(|index| index.name).collect())
    }

    async fn save_records(&self, index: &str, records: &[Record]) -> Result<(), SearchIndexError> {
        let url = Self::endpoint(&self.write_url, &["1", "indexes", index, "batch"])?;

        let requests: Vec<_> = records
            .iter()
            .map(|record| json!({ "action": UPSERT_ACTION, "body": record }))
            .collect();

        let response = self
            .http
            .post(url)
            .json(&json!({ "requests": requests }))
            .send()
            .await
            .map_err(|e| SearchIndexError::index(e.to_string()))?;
        Self::check_status(response, "Batch", SearchIndexError::IndexError).await?;

        debug!(index = %index, count = records.len(), "Records saved");
        Ok(())
    }

    async fn delete_record(&self, index: &str, object_id: &str) -> Result<(), SearchIndexError> {
        let url = Self::endpoint(&self.write_url, &["1", "indexes", index, object_id])?;

        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| SearchIndexError::delete(e.to_string()))?;

        // 404 is acceptable - the record may already be gone
        if response.status().as_u16() != 404 {
            Self::check_status(response, "Delete", SearchIndexError::DeleteError).await?;
        }

        debug!(index = %index, object_id = %object_id, "Record deleted");
        Ok(())
    }

    async fn clear_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let url = Self::endpoint(&self.write_url, &["1", "indexes", index, "clear"])?;

        let response = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| SearchIndexError::clear(e.to_string()))?;
        Self::check_status(response, "Clear", SearchIndexError::ClearError).await?;

        debug!(index = %index, "Index cleared");
        Ok(())
    }
}

/// Factory building [`AlgoliaClient`]s with fixed transport settings.
#[derive(Debug, Clone, Default)]
pub struct AlgoliaClientFactory {
    config: AlgoliaClientConfig,
}

impl AlgoliaClientFactory {
    pub fn new(config: AlgoliaClientConfig) -> Self {
        Self { config }
    }
}

impl SearchClientFactory for AlgoliaClientFactory {
    fn create(
        &self,
        credentials: &BackendConfig,
    ) -> Result<Arc<dyn SearchClient>, SearchIndexError> {
        Ok(Arc::new(AlgoliaClient::new(credentials, &self.config)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client_for(server: &Server) -> AlgoliaClient {
        AlgoliaClient::new(
            &BackendConfig::new("A1", "K1"),
            &AlgoliaClientConfig::with_host(server.url()),
        )
        .unwrap()
    }

    fn record(id: &str, title: &str) -> Record {
        let mut record = Record::new();
        record.insert("objectID".to_string(), json!(id));
        record.insert("title".to_string(), json!([title]));
        record
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let base = Url::parse("https://a1.algolia.net").unwrap();
        let url = AlgoliaClient::endpoint(&base, &["1", "indexes", "my index", "a/b"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://a1.algolia.net/1/indexes/my%20index/a%2Fb"
        );
    }

    #[test]
    fn test_new_rejects_header_unsafe_credentials() {
        let result = AlgoliaClient::new(
            &BackendConfig::new("A1", "bad\nkey"),
            &AlgoliaClientConfig::default(),
        );
        assert!(matches!(
            result,
            Err(SearchIndexError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_new_rejects_application_id_outside_host_label() {
        let result = AlgoliaClient::new(
            &BackendConfig::new("evil.example#", "K1"),
            &AlgoliaClientConfig::default(),
        );
        assert!(matches!(
            result,
            Err(SearchIndexError::ConfigurationError(_))
        ));
    }

    #[tokio::test]
    async fn test_save_records_sends_one_batch() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/1/indexes/products/batch")
            .match_header(APPLICATION_ID_HEADER, "A1")
            .match_header(API_KEY_HEADER, "K1")
            .match_body(Matcher::Json(json!({
                "requests": [
                    { "action": "updateObject", "body": { "objectID": "p1", "title": ["Shoe"] } },
                    { "action": "updateObject", "body": { "objectID": "p2", "title": ["Hat"] } }
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"taskID": 1, "objectIDs": ["p1", "p2"]}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        client
            .save_records("products", &[record("p1", "Shoe"), record("p2", "Hat")])
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_save_records_surfaces_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/1/indexes/products/batch")
            .with_status(400)
            .with_body(r#"{"message": "Record is too big"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client
            .save_records("products", &[record("p1", "Shoe")])
            .await
            .unwrap_err();

        match err {
            SearchIndexError::IndexError(msg) => {
                assert!(msg.contains("400"));
                assert!(msg.contains("Record is too big"));
            }
            other => panic!("expected IndexError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_list_indices() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/1/indexes")
            .match_header(API_KEY_HEADER, "K1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"items": [{"name": "products", "entries": 2}, {"name": "articles"}], "nbPages": 1}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let names = client.list_indices().await.unwrap();

        assert_eq!(names, vec!["products", "articles"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_indices_unauthorized() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/1/indexes")
            .with_status(403)
            .with_body(r#"{"message": "Invalid Application-ID or API key"}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.list_indices().await,
            Err(SearchIndexError::ListError(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_record() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/1/indexes/products/p1")
            .with_status(200)
            .with_body(r#"{"taskID": 2}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        client.delete_record("products", "p1").await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_missing_record_is_ok() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/1/indexes/products/gone")
            .with_status(404)
            .create_async()
            .await;

        let client = client_for(&server);
        assert!(client.delete_record("products", "gone").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_record_server_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/1/indexes/products/p1")
            .with_status(500)
            .create_async()
            .await;

        let client = client_for(&server);
        assert!(matches!(
            client.delete_record("products", "p1").await,
            Err(SearchIndexError::DeleteError(_))
        ));
    }

    #[tokio::test]
    async fn test_clear_index() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/1/indexes/products/clear")
            .with_status(200)
            .with_body(r#"{"taskID": 3}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server);
        client.clear_index("products").await.unwrap();

        mock.assert_async().await;
    }

    #[test]
    fn test_factory_creates_client() {
        let factory = AlgoliaClientFactory::default();
        assert!(factory.create(&BackendConfig::new("A1", "K1")).is_ok());
    }
}
