//! Resilient HTTP fetcher
//!
//! Wraps all outbound requests in a reusable client with fixed headers,
//! timeout, and retry/backoff. `fetch` converts every failure into an empty
//! parseable document, so downstream selectors treat a failed fetch exactly
//! like a page with no matching content.

use crate::config::HttpConfig;
use crate::fetch::retry::RetryPolicy;
use crate::{ImportError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use scraper::Html;
use std::time::Duration;

/// Result of the orchestrator's unretried liveness probe
#[derive(Debug, Clone, Copy)]
pub struct ProbeReport {
    /// HTTP status code
    pub status: u16,
    /// Response body length in bytes
    pub length: usize,
}

/// Reusable HTTP client with retry policy baked in at construction
pub struct PageFetcher {
    client: Client,
    retry: RetryPolicy,
}

/// Builds an HTTP client with the configured headers and timeout
pub fn build_http_client(config: &HttpConfig) -> std::result::Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(accept) = HeaderValue::from_str(&config.accept) {
        headers.insert(ACCEPT, accept);
    }

    Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

impl PageFetcher {
    pub fn new(config: &HttpConfig) -> std::result::Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
            retry: RetryPolicy::from_config(&config.retry),
        })
    }

    /// Fetches a URL and parses the body as HTML. Never fails: after the
    /// retry budget is exhausted a warning is logged and an empty document
    /// is returned.
    pub async fn fetch(&self, url: &str) -> Html {
        match self.fetch_body(url).await {
            Ok(body) => Html::parse_document(&body),
            Err(e) => {
                tracing::warn!("could not load {}: {}", url, e);
                Html::parse_document("")
            }
        }
    }

    /// GET with retry on transient statuses and connection-level errors
    async fn fetch_body(&self, url: &str) -> Result<String> {
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return response.text().await.map_err(|e| ImportError::Http {
                            url: url.to_string(),
                            source: e,
                        });
                    }

                    let code = status.as_u16();
                    if self.retry.should_retry_status(code)
                        && self.retry.has_attempts_left(attempt)
                    {
                        let delay = self.retry.backoff_delay(attempt);
                        tracing::debug!(
                            "got {} from {}, retrying in {:?} (attempt {}/{})",
                            code,
                            url,
                            delay,
                            attempt,
                            self.retry.max_attempts
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    return Err(ImportError::HttpStatus {
                        url: url.to_string(),
                        status: code,
                    });
                }
                Err(e) => {
                    let transient = e.is_timeout() || e.is_connect() || e.is_request();
                    if transient && self.retry.has_attempts_left(attempt) {
                        let delay = self.retry.backoff_delay(attempt);
                        tracing::debug!(
                            "request to {} failed ({}), retrying in {:?}",
                            url,
                            e,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }

                    return Err(ImportError::Http {
                        url: url.to_string(),
                        source: e,
                    });
                }
            }
        }
    }

    /// Single unretried GET used as a liveness probe. Errors propagate to
    /// the caller and abort the run.
    pub async fn probe(&self, url: &str) -> Result<ProbeReport> {
        let response = self
            .client
            .get(url)
            .timeout(Duration::from_secs(30))
            .send()
            .await
            .map_err(|e| ImportError::Http {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ImportError::Http {
            url: url.to_string(),
            source: e,
        })?;

        Ok(ProbeReport {
            status,
            length: body.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let config = HttpConfig::default();
        let client = build_http_client(&config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_fetcher_construction() {
        let config = HttpConfig::default();
        let fetcher = PageFetcher::new(&config);
        assert!(fetcher.is_ok());
    }

    // Retry and degraded-success behavior are covered by the wiremock
    // integration tests.
}
