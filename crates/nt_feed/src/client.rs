use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nt_core::{NewsResponse, NewsSource, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://newsdata.io";
pub const LATEST_PATH: &str = "api/1/latest";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the newsdata.io `latest` endpoint.
pub struct NewsDataClient {
    client: Client,
    api_key: String,
    endpoint: Url,
}

impl NewsDataClient {
    pub fn new(api_key: impl Into<String>, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: latest_endpoint(base_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn latest_endpoint(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(LATEST_PATH)?)
}

impl fmt::Debug for NewsDataClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsDataClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

#[async_trait]
impl NewsSource for NewsDataClient {
    fn name(&self) -> &str {
        "newsdata.io"
    }

    async fn latest(&self, query: &str) -> Result<NewsResponse> {
        debug!("GET {} q={:?}", self.endpoint, query);

        // The provider sends its status envelope with 4xx codes too, so the
        // HTTP status is logged but not turned into an error.
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("apikey", self.api_key.as_str()), ("q", query)])
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        debug!("Provider answered {}", response.status());

        // Errors carry the request URL, which holds the key.
        let body = response.bytes().await.map_err(reqwest::Error::without_url)?;
        Ok(serde_json::from_slice::<NewsResponse>(&body)?)
    }
}
