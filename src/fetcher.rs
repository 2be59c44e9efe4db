use std::error::Error as _;
use std::future::Future;
use std::time::{Duration, Instant};

use reqwest::header::USER_AGENT;
use reqwest::{Client, Url};
use tracing::{debug, error};

use crate::config::Config;
use crate::data_models::SearchRequest;
use crate::errors::{ConfigError, FetchError};

/// Performs the single search request for one address.
///
/// Implementations return a classified [`FetchError`] instead of panicking or
/// propagating anything else; the caller moves on to the next address.
pub trait SearchClient {
    fn search(
        &self,
        url: &Url,
        address: &str,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

pub struct HttpFetcher {
    client: Client,
    query_param: String,
    user_agent: String,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(
        query_param: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            query_param: query_param.into(),
            user_agent: user_agent.into(),
            timeout,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(&config.query_param, &config.user_agent, config.timeout)
    }

    async fn send(&self, request: &SearchRequest<'_>) -> Result<String, FetchError> {
        let response = self
            .client
            .get(request.url.clone())
            .query(&[(request.query_param, request.address)])
            .header(USER_AGENT, request.user_agent)
            .send()
            .await
            .map_err(|e| classify(e, request.timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| classify(e, request.timeout))
    }
}

impl SearchClient for HttpFetcher {
    async fn search(&self, url: &Url, address: &str) -> Result<String, FetchError> {
        let request = SearchRequest {
            url,
            query_param: &self.query_param,
            address,
            user_agent: &self.user_agent,
            timeout: self.timeout,
        };

        let started = Instant::now();
        let outcome = self.send(&request).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &outcome {
            Ok(body) => debug!(address, bytes = body.len(), elapsed_ms, "fetched search page"),
            Err(e) => error!(
                address,
                kind = e.kind(),
                elapsed_ms,
                "failed to retrieve the webpage for address {address:?}: {e}"
            ),
        }
        outcome
    }
}

fn classify(err: reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        return FetchError::Timeout(timeout);
    }

    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    FetchError::Transport(message)
}
