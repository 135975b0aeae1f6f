use crate::domain::ports::Fetcher;
use crate::utils::error::Result;
use reqwest::Client;

#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?;
        tracing::debug!("GET {} -> {}", url, response.status());

        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.get_text(url).await.inspect_err(|e| {
            tracing::warn!("Failed to download {}: {}", url, e);
        })
    }
}
