use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::ACCEPT,
    Client,
    Response,
    Url,
};
use serde_json::Value;

use super::fetch::JsonFetcher;
use crate::core::ZukanError;

const USER_AGENT: &str = "zukan/0.1 (+reqwest)";

/// Read-only client shared by both catalogs. No retries and no caching: every
/// call goes to the network.
#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
}

impl CatalogClient {
    pub fn new(timeout: Duration) -> Result<Self, ZukanError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ZukanError::Custom(format!("HTTP client build failed: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl JsonFetcher for CatalogClient {
    async fn get_json(&self, url: &str) -> Result<Value, ZukanError> {
        tracing::debug!(url, "GET");

        let resp = self.client.get(url).header(ACCEPT, "application/json").send().await?;
        ensure_success(&resp)?;

        Ok(resp.json::<Value>().await?)
    }
}

fn ensure_success(resp: &Response) -> Result<(), ZukanError> {
    if !resp.status().is_success() {
        return Err(ZukanError::Status {
            status: resp.status().as_u16(),
            url: resp.url().to_string(),
        });
    }
    Ok(())
}

/// Builds `{base}/{segment}/{segment}...`, percent-encoding each segment.
/// A trailing slash on `base` is tolerated.
pub fn resource_url(base: &str, segments: &[&str]) -> Result<Url, ZukanError> {
    let mut url = Url::parse(base).map_err(|e| ZukanError::Url(format!("{base}: {e}")))?;

    url.path_segments_mut()
        .map_err(|_| ZukanError::Url(format!("{base} cannot be used as a base URL")))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
