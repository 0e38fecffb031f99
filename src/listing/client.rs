//! HTTP client for Mercado Livre listing pages.

use crate::config::Config;
use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};
use wreq::Client;

/// Why a listing page could not be fetched.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("listing request failed with status: {0}")]
    Status(u16),

    /// The request never completed or the body could not be read.
    #[error("listing request failed: {0}")]
    Transport(String),
}

/// Trait for fetching listing pages - enables mocking for tests.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetches the listing page for a free-text query and returns its HTML.
    async fn fetch(&self, query: &str) -> Result<String, FetchError>;
}

/// Listing HTTP client.
pub struct ListingClient {
    client: Client,
    base_url: String,
    user_agent: String,
}

impl ListingClient {
    /// Creates a new listing client with the given configuration.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(config, config.base_url.clone())
    }

    /// Creates a new listing client against a custom base URL (for testing).
    pub fn with_base_url(config: &Config, base_url: String) -> Result<Self> {
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .redirect(wreq::redirect::Policy::limited(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
        })
    }

    /// Builds the listing URL for a query.
    pub fn listing_url(&self, query: &str) -> String {
        format!("{}/{}", self.base_url, listing_slug(query))
    }
}

/// Turns a query into a listing path segment: spaces become hyphens.
pub fn listing_slug(query: &str) -> String {
    urlencoding::encode(&query.trim().replace(' ', "-")).into_owned()
}

#[async_trait]
impl ListingSource for ListingClient {
    async fn fetch(&self, query: &str) -> Result<String, FetchError> {
        let url = self.listing_url(query);

        info!("Fetching listing: {}", query);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("User-Agent", self.user_agent.as_str())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response.text().await.map_err(|e| FetchError::Transport(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_listing_slug() {
        assert_eq!(listing_slug("notebook"), "notebook");
        assert_eq!(listing_slug("notebook gamer"), "notebook-gamer");
        assert_eq!(listing_slug("  fone bluetooth  "), "fone-bluetooth");
        assert_eq!(listing_slug("café"), "caf%C3%A9");
    }

    #[tokio::test]
    async fn test_listing_url() {
        let config = Config::default();
        let client = ListingClient::new(&config).unwrap();
        assert_eq!(
            client.listing_url("placa de video"),
            "https://lista.mercadolivre.com.br/placa-de-video"
        );
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash() {
        let config = Config::default();
        let client = ListingClient::with_base_url(&config, "http://localhost/".to_string()).unwrap();
        assert_eq!(client.listing_url("mouse"), "http://localhost/mouse");
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mock_server = MockServer::start().await;

        let html = r#"<html><body><div class="poly-card__content">Notebook</div></body></html>"#;

        Mock::given(method("GET"))
            .and(path("/notebook-gamer"))
            .and(header("User-Agent", "Mozilla/5.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(html))
            .mount(&mock_server)
            .await;

        let config = Config::default();
        let client = ListingClient::with_base_url(&config, mock_server.uri()).unwrap();

        let body = client.fetch("notebook gamer").await.unwrap();
        assert!(body.contains("poly-card__content"));
    }

    #[tokio::test]
    async fn test_fetch_custom_user_agent() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(header("User-Agent", "price-bot/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&mock_server)
            .await;

        let config = Config { user_agent: "price-bot/1.0".to_string(), ..Config::default() };
        let client = ListingClient::with_base_url(&config, mock_server.uri()).unwrap();

        assert_eq!(client.fetch("mouse").await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let config = Config::default();
        let client = ListingClient::with_base_url(&config, mock_server.uri()).unwrap();

        let err = client.fetch("mouse").await.unwrap_err();
        assert!(matches!(err, FetchError::Status(404)));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let config = Config::default();
        let client = ListingClient::with_base_url(&config, mock_server.uri()).unwrap();

        let err = client.fetch("mouse").await.unwrap_err();
        assert!(matches!(err, FetchError::Status(500)));
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        let config = Config::default();
        // Nothing listens on port 9 (discard) on a test machine.
        let client =
            ListingClient::with_base_url(&config, "http://127.0.0.1:9".to_string()).unwrap();

        let err = client.fetch("mouse").await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_fetch_follows_redirect() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/notebook"))
            .respond_with(
                ResponseTemplate::new(301)
                    .insert_header("Location", format!("{}/final", mock_server.uri()).as_str()),
            )
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/final"))
            .respond_with(ResponseTemplate::new(200).set_body_string("redirected page"))
            .mount(&mock_server)
            .await;

        let config = Config::default();
        let client = ListingClient::with_base_url(&config, mock_server.uri()).unwrap();

        assert_eq!(client.fetch("notebook").await.unwrap(), "redirected page");
    }

    #[tokio::test]
    async fn test_fetch_empty_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(""))
            .mount(&mock_server)
            .await;

        let config = Config::default();
        let client = ListingClient::with_base_url(&config, mock_server.uri()).unwrap();

        assert!(client.fetch("mouse").await.unwrap().is_empty());
    }
}
