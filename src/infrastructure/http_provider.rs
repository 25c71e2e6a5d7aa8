// HTTP JSON health provider
use super::config::EndpointConfig;
use crate::application::health_provider::{FetchError, HealthProvider};
use crate::domain::snapshot::Snapshot;
use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpHealthProvider {
    client: reqwest::Client,
    base_url: String,
    endpoints: Vec<EndpointConfig>,
}

impl HttpHealthProvider {
    pub fn new(
        base_url: &str,
        endpoints: Vec<EndpointConfig>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            endpoints,
        })
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn fetch_one(&self, path: &str) -> Result<Snapshot, FetchError> {
        let url = self.url_for(path);

        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.clone(),
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url,
                status: response.status().as_u16(),
            });
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| FetchError::Decode {
                url: url.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!("Fetched health payload from {}", url);
        Ok(Snapshot::new(body))
    }
}

#[async_trait]
impl HealthProvider for HttpHealthProvider {
    async fn fetch(&self) -> Result<Snapshot, FetchError> {
        let responses = try_join_all(self.endpoints.iter().map(|e| self.fetch_one(&e.path))).await?;

        let mut parts = self.endpoints.iter().zip(responses);
        let Some((_, mut snapshot)) = parts.next() else {
            return Ok(Snapshot::new(serde_json::Value::Null));
        };
        for (endpoint, extra) in parts {
            match &endpoint.merge_key {
                Some(key) => snapshot.merge(key, extra),
                None => tracing::warn!("Ignoring {} response: no merge key configured", endpoint.path),
            }
        }
        Ok(snapshot)
    }
}
