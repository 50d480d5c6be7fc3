use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::debug;

use crate::{Config, QueryParams, Result, BASE_PARAM};

/// Extra request headers, merged over the client's defaults.
pub type Headers = BTreeMap<String, String>;

/// Black-box access to the remote search endpoint.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, params: &QueryParams, headers: &Headers) -> Result<String>;
}

/// Throttled reqwest client for the review database.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    headers: Headers,
    timer: Duration,
}

impl Client {
    pub fn new(config: &Config) -> Self {
        let headers = Headers::from([
            ("From".to_string(), config.from.clone()),
            ("User-Agent".to_string(), config.user_agent.clone()),
        ]);
        Self {
            // Client uses Arc so we can clone cheaply
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            headers,
            timer: config.timer,
        }
    }

    /// The database selector first, then the caller's params, which may override it.
    fn request_params(&self, params: &QueryParams) -> QueryParams {
        let (key, value) = BASE_PARAM;
        let mut merged: QueryParams = [(key, value)].into_iter().collect();
        for (k, v) in params.iter() {
            merged.insert(k, v);
        }
        merged
    }

    fn request_headers(&self, headers: &Headers) -> Headers {
        let mut merged = self.headers.clone();
        merged.extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

#[async_trait]
impl Fetch for Client {
    /// Sleeps for the configured timer, then sends a single GET. Failures are not retried.
    async fn fetch(&self, params: &QueryParams, headers: &Headers) -> Result<String> {
        let params = self.request_params(params);
        let headers = self.request_headers(headers);

        sleep(self.timer).await;

        debug!(query = %params.canonical(), "requesting {}", self.base_url);
        let mut req = self.http.get(&self.base_url).query(&params);
        for (key, value) in &headers {
            req = req.header(key.as_str(), value.as_str());
        }
        let html = req.send().await?.text().await?;
        Ok(html)
    }
}
