// src/utils/http.rs

//! HTTP fetch capability.
//!
//! Extractors only see the [`Fetcher`] trait. [`HttpFetcher`] is the real
//! implementation: one `reqwest` client shared by the whole run, with the
//! retry policy applied to every request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::{AppError, Result};
use crate::models::HttpConfig;

/// Issues GET requests and returns the body of successful responses.
///
/// Connection errors, timeouts and non-2xx statuses are errors.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn get(&self, url: &str) -> Result<String>;
}

/// Retry schedule for transient failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_factor: Duration,
    pub max_backoff: Duration,
    pub statuses: Vec<u16>,
}

impl RetryPolicy {
    pub fn from_config(config: &HttpConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff_factor: Duration::from_millis(config.backoff_factor_ms),
            max_backoff: Duration::from_secs(config.max_backoff_secs),
            statuses: config.retry_statuses.clone(),
        }
    }

    pub fn is_retryable(&self, status: StatusCode) -> bool {
        self.statuses.contains(&status.as_u16())
    }

    /// Sleep before retry number `retry` (1-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        let exp = retry.saturating_sub(1).min(31);
        self.backoff_factor
            .saturating_mul(1u32 << exp)
            .min(self.max_backoff)
    }
}

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout())
        .build()?;
    Ok(client)
}

/// `reqwest`-backed fetcher with retry and backoff.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    policy: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            policy: RetryPolicy::from_config(config),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &str) -> Result<String> {
        let mut retry = 0;
        loop {
            let failure = match self.client.get(url).send().await {
                Ok(response) if response.status().is_success() => {
                    return Ok(response.text().await?);
                }
                Ok(response) => {
                    let status = response.status();
                    let err = AppError::HttpStatus {
                        url: url.to_string(),
                        status: status.as_u16(),
                    };
                    if !self.policy.is_retryable(status) {
                        return Err(err);
                    }
                    err
                }
                Err(e) if e.is_connect() || e.is_timeout() => AppError::Http(e),
                Err(e) => return Err(e.into()),
            };

            if retry >= self.policy.max_retries {
                return Err(failure);
            }
            retry += 1;

            let delay = self.policy.backoff(retry);
            log::debug!(
                "GET {} failed ({}), retry {}/{} in {:?}",
                url,
                failure,
                retry,
                self.policy.max_retries,
                delay
            );
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_config(max_retries: u32) -> HttpConfig {
        HttpConfig {
            max_retries,
            backoff_factor_ms: 0,
            ..HttpConfig::default()
        }
    }

    #[test]
    fn test_backoff_schedule() {
        let policy = RetryPolicy::from_config(&HttpConfig::default());
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
        assert_eq!(policy.backoff(20), Duration::from_secs(120));
    }

    #[test]
    fn test_retryable_statuses() {
        let policy = RetryPolicy::from_config(&HttpConfig::default());
        for code in [429, 500, 502, 503, 504] {
            assert!(policy.is_retryable(StatusCode::from_u16(code).unwrap()));
        }
        assert!(!policy.is_retryable(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_retries_transient_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed/"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/feed/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<rss/>"))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&fast_config(3)).unwrap();
        let body = fetcher
            .get(&format!("{}/feed/", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<rss/>");
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .expect(3)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&fast_config(2)).unwrap();
        let err = fetcher.get(&server.uri()).await.unwrap_err();
        assert!(matches!(err, AppError::HttpStatus { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&fast_config(3)).unwrap();
        let err = fetcher.get(&server.uri()).await.unwrap_err();
        assert!(matches!(err, AppError::HttpStatus { status: 404, .. }));
    }
}
