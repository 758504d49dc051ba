//! `reqwest`-backed directory client.

use std::time::Duration;

use reqwest::Client;
use reqwest::header;
use serde_json::Value;
use url::Url;

use crate::error::{DirectoryError, Result};

use super::{ListRequest, RemoteClient};

/// HTTP client bound to one API base URL
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client for `base_url` with the given total request timeout.
    ///
    /// The base may carry a path prefix (`https://host/api`); request paths
    /// are appended to it rather than resolved against it.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(DirectoryError::Config(format!(
                "API base URL '{base_url}' cannot carry a path"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the absolute URL for a request, query string included
    pub fn url_for(&self, request: &ListRequest) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{}", self.base_url, request.path))?;
        if request.has_params() {
            url.query_pairs_mut().extend_pairs(
                request
                    .params
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str())),
            );
        }
        Ok(url)
    }
}

impl RemoteClient for HttpClient {
    async fn get_json(&self, request: &ListRequest) -> Result<Value> {
        let url = self.url_for(request)?;
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(url.clone())
            .header(
                header::ACCEPT,
                header::HeaderValue::from_static("application/json"),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Status {
                status,
                url: url.to_string(),
            });
        }

        Ok(response.json::<Value>().await?)
    }
}
