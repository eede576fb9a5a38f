use crate::config::{ClientConfig, DelayConfig};
use crate::error::{Result, ScraperError};
use async_trait::async_trait;
use log::debug;
use rand::Rng;
use reqwest::cookie::Jar;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;

/// Status code and body of a finished request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Transport used by [`AuthSession`](crate::AuthSession).
///
/// Implementations must keep cookies between calls, since the portal tracks the
/// login and the selected profile in its session cookie.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a GET request with the given query parameters.
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse>;
    /// Sends a POST request with an `application/x-www-form-urlencoded` body.
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse>;
}

/// [`HttpClient`] backed by `reqwest` with a cookie jar.
pub struct ReqwestHttpClient {
    client: reqwest::Client,
    delay: DelayConfig,
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let cookie_jar = Arc::new(Jar::default());

        let mut headers = HeaderMap::new();
        let user_agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            ScraperError::ConfigError(format!("Invalid User-Agent {:?}: {}", config.user_agent, e))
        })?;
        headers.insert(USER_AGENT, user_agent);

        let client = reqwest::Client::builder()
            .cookie_provider(cookie_jar)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            delay: config.delay,
        })
    }

    async fn pause(&self) {
        if !self.delay.enabled {
            return;
        }

        let (low, high) = if self.delay.min_delay_ms <= self.delay.max_delay_ms {
            (self.delay.min_delay_ms, self.delay.max_delay_ms)
        } else {
            (self.delay.max_delay_ms, self.delay.min_delay_ms)
        };
        let millis = rand::rng().random_range(low..=high);

        debug!("Sleeping {}ms before request", millis);
        tokio::time::sleep(Duration::from_millis(millis)).await;
    }

    async fn finish(response: reqwest::Response) -> Result<HttpResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<HttpResponse> {
        self.pause().await;
        debug!("GET {}", url);

        let response = self.client.get(url).query(query).send().await?;
        Self::finish(response).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<HttpResponse> {
        self.pause().await;
        debug!("POST {}", url);

        let response = self.client.post(url).form(form).send().await?;
        Self::finish(response).await
    }
}
