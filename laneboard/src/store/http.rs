//! HTTP client for the card store API.

use super::CardStore;
use crate::config::BoardConfig;
use crate::error::{BoardError, Result};
use crate::plan::CardUpdate;
use crate::types::{CardId, StoredCard};
use async_trait::async_trait;
use reqwest::{Client, Response};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Card store reached over HTTP.
///
/// `GET {collection}` lists every card and `PUT {collection}/{id}` sets one
/// card's status and priority.
#[derive(Debug, Clone)]
pub struct HttpCardStore {
    client: Client,
    collection: Url,
}

impl HttpCardStore {
    /// Create a store for `base_url` using the default resource path and timeout
    pub fn new(base_url: &str) -> Result<Self> {
        let config = BoardConfig {
            base_url: base_url.to_string(),
            ..BoardConfig::default()
        };
        Self::from_config(&config)
    }

    /// Create a store from loaded configuration
    pub fn from_config(config: &BoardConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        let collection = collection_url(&config.base_url, &config.clients_path)?;
        Ok(Self { client, collection })
    }

    /// URL of the card collection
    pub fn collection_url(&self) -> &Url {
        &self.collection
    }

    /// URL of one card; the id is encoded as a single path segment
    pub fn card_url(&self, id: &CardId) -> Result<Url> {
        let mut url = self.collection.clone();
        url.path_segments_mut()
            .map_err(|_| BoardError::invalid_endpoint(self.collection.as_str(), "cannot be a base"))?
            .push(id.as_str());
        Ok(url)
    }

    /// Map a non-success response to [`BoardError::Rejected`]
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let url = response.url().to_string();
        let body = response.text().await.unwrap_or_default();
        Err(BoardError::rejected(status.as_u16(), url, body))
    }
}

fn collection_url(base_url: &str, clients_path: &str) -> Result<Url> {
    let mut url =
        Url::parse(base_url).map_err(|e| BoardError::invalid_endpoint(base_url, e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| BoardError::invalid_endpoint(base_url, "cannot be a base"))?
        .pop_if_empty()
        .extend(clients_path.split('/').filter(|segment| !segment.is_empty()));
    Ok(url)
}

#[async_trait]
impl CardStore for HttpCardStore {
    #[instrument(skip(self), fields(url = %self.collection))]
    async fn fetch_all(&self) -> Result<Vec<StoredCard>> {
        debug!("fetching all cards");
        let response = self.client.get(self.collection.clone()).send().await?;
        let response = Self::check_response(response).await?;
        let body = response.bytes().await?;
        let cards: Vec<StoredCard> = serde_json::from_slice(&body)?;
        debug!(count = cards.len(), "fetched cards");
        Ok(cards)
    }

    #[instrument(skip(self, update), fields(id = %update.id, status = %update.status, priority = update.priority))]
    async fn update(&self, update: &CardUpdate) -> Result<()> {
        let url = self.card_url(&update.id)?;
        // .json() sets Content-Type: application/json
        let response = self.client.put(url).json(update).send().await?;
        Self::check_response(response).await?;
        debug!("card updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_collection_url_joins_path() {
        let url = collection_url("http://localhost:3000", "/api/v1/clients").unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/clients");

        let nested = collection_url("http://example.com/board/", "api/v1/clients").unwrap();
        assert_eq!(nested.as_str(), "http://example.com/board/api/v1/clients");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = collection_url("not a url", "/api/v1/clients");
        assert!(matches!(result, Err(BoardError::InvalidEndpoint { .. })));
    }

    #[test]
    fn test_card_url_encodes_id() {
        let store = HttpCardStore::new("http://localhost:3000").unwrap();
        let url = store.card_url(&"a b/c".into()).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/clients/a%20b%2Fc");
    }

    #[tokio::test]
    async fn test_fetch_all_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/clients"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "status": "backlog", "priority": 1, "name": "Acme"},
                {"id": "2", "status": "complete", "priority": 1}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = HttpCardStore::new(&mock_server.uri()).unwrap();
        let cards = store.fetch_all().await.unwrap();

        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].id.as_str(), "1");
        assert_eq!(cards[0].attributes["name"], "Acme");
    }

    #[tokio::test]
    async fn test_update_sends_status_and_priority() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v1/clients/7"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"status": "in-progress", "priority": 2})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = HttpCardStore::new(&mock_server.uri()).unwrap();
        store
            .update(&CardUpdate::new("7", Status::InProgress, 2))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_update_rejected() {
        let mock_server = MockServer::start().await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(422).set_body_string("bad priority"))
            .mount(&mock_server)
            .await;

        let store = HttpCardStore::new(&mock_server.uri()).unwrap();
        let result = store.update(&CardUpdate::new("7", Status::Backlog, 1)).await;

        match result {
            Err(BoardError::Rejected { status, body, .. }) => {
                assert_eq!(status, 422);
                assert_eq!(body, "bad priority");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_all_malformed_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/clients"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"not\": \"a list\"}"))
            .mount(&mock_server)
            .await;

        let store = HttpCardStore::new(&mock_server.uri()).unwrap();
        let err = store.fetch_all().await.unwrap_err();
        assert!(matches!(err, BoardError::Json(_)));
        assert!(!err.is_retryable());
    }

    #[tokio::test]
    async fn test_fetch_all_server_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&mock_server)
            .await;

        let store = HttpCardStore::new(&mock_server.uri()).unwrap();
        let err = store.fetch_all().await.unwrap_err();
        assert!(err.is_retryable());
    }
}
