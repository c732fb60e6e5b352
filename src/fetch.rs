use anyhow::{Context, Result};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://thunderskill.com";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Source of raw page markup, addressed by site-relative reference.
pub trait Fetch {
    async fn fetch(&self, reference: &str) -> Result<String>;
}

/// Fetches pages over HTTP, one request at a time.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn resolve(&self, reference: &str) -> String {
        resolve(&self.base_url, reference)
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, reference: &str) -> Result<String> {
        let url = self.resolve(reference);
        debug!(url = %url, "fetching");
        let body = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .with_context(|| format!("Failed to get {}", url))?
            .text()
            .await
            .with_context(|| format!("Failed to read body of {}", url))?;
        Ok(body)
    }
}

fn resolve(base_url: &str, reference: &str) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") {
        return reference.to_string();
    }
    if reference.starts_with('/') {
        format!("{}{}", base_url, reference)
    } else {
        format!("{}/{}", base_url, reference)
    }
}
