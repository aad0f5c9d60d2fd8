// src/crawl/fetch.rs
// =============================================================================
// This module downloads pages for the crawler.
//
// Key behavior:
// - One GET per URL, no retries
// - Any transport failure (timeout, refused connection, DNS, redirect loop,
//   undecodable body) is logged and turned into "no body"
// - HTTP error statuses (404, 500, ...) are NOT failures: their body is
//   returned and scanned like any other page
//
// The crawl engine talks to the `Fetch` trait rather than to reqwest
// directly, so tests can swap in an in-memory site.
// =============================================================================

use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use reqwest::{redirect, Client};
use thiserror::Error;

use crate::config::CrawlConfig;
use crate::error::Result;

// Something that can turn a URL into a page body.
//
// Returns None when the page could not be fetched. Implementations must not
// return errors: a failed page is simply skipped by the crawl.
pub trait Fetch: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Option<String>>;
}

// Why a fetch produced no body.
//
// Mirrors the categories reqwest can tell apart; only used for logging.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("too many redirects")]
    TooManyRedirects,
    #[error("connection failed: {0}")]
    Connect(String),
    #[error("could not decode body: {0}")]
    Decode(String),
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_redirect() {
            FetchError::TooManyRedirects
        } else if error.is_connect() {
            FetchError::Connect(error.to_string())
        } else if error.is_decode() || error.is_body() {
            FetchError::Decode(error.to_string())
        } else {
            FetchError::Other(error.to_string())
        }
    }
}

// Fetcher backed by a shared reqwest client (connection pooling across workers)
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the client from the crawl configuration.
    // Fails only if reqwest can't initialize (e.g. TLS backend problems).
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.request_timeout.min(Duration::from_secs(5)))
            .redirect(redirect::Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }

    // Performs the GET and reads the whole body as text.
    // The status code is deliberately ignored, see the module header.
    pub async fn try_fetch(&self, url: &str) -> std::result::Result<String, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = status.as_u16(), "non-success status, scanning body anyway");
        }

        Ok(response.text().await?)
    }
}

impl Fetch for HttpFetcher {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Option<String>> {
        async move {
            match self.try_fetch(url).await {
                Ok(body) => Some(body),
                Err(e) => {
                    tracing::warn!(url, error = %e, "failed to fetch");
                    None
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn fetcher() -> HttpFetcher {
        let config = CrawlConfig::builder()
            .request_timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        HttpFetcher::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/page")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<p>hello@example.test</p>")
            .expect(1)
            .create_async()
            .await;

        let url = format!("{}/page", server.url());
        let body = fetcher().fetch(&url).await;
        assert_eq!(body.as_deref(), Some("<p>hello@example.test</p>"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_body_is_still_returned() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/missing")
            .with_status(404)
            .with_body("not found, write to admin@example.test")
            .create_async()
            .await;

        let url = format!("{}/missing", server.url());
        let body = fetcher().fetch(&url).await;
        assert_eq!(body.as_deref(), Some("not found, write to admin@example.test"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_sends_user_agent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("user-agent", mockito::Matcher::Regex("^mail-trawler/".to_string()))
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let body = fetcher().fetch(&format!("{}/", server.url())).await;
        assert_eq!(body.as_deref(), Some("ok"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_connection_failure_yields_none() {
        // Bind then drop a listener so the port is known to be closed
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let body = fetcher().fetch(&format!("http://127.0.0.1:{port}/")).await;
        assert!(body.is_none());
    }

    #[tokio::test]
    async fn test_invalid_url_yields_none() {
        assert!(fetcher().fetch("not a url").await.is_none());
    }

    #[tokio::test]
    async fn test_try_fetch_categorizes_connect_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let result = fetcher().try_fetch(&format!("http://127.0.0.1:{port}/")).await;
        assert!(matches!(result, Err(FetchError::Connect(_))));
    }
}
