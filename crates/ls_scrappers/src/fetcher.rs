use async_trait::async_trait;
use ls_core::Result;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// User-Agent string identifying this scraper
pub const USER_AGENT: &str = concat!("lingua-scraper/", env!("CARGO_PKG_VERSION"));

/// Default timeout for page requests
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A fetched page body.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub body: String,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Single GET. Non-2xx answers, timeouts and connection errors all fail.
    async fn fetch(&self, url: &str) -> Result<Page>;
}

/// Fetches pages over HTTP with one shared client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Page> {
        debug!("🌐 GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;
        Ok(Page {
            url: url.to_string(),
            body,
        })
    }
}

/// Writes raw page bodies next to each other for debugging selectors.
///
/// Files are overwritten on every run.
#[derive(Debug, Clone)]
pub struct HtmlDump {
    dir: PathBuf,
}

impl HtmlDump {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn listing_path(&self) -> PathBuf {
        self.dir.join("debug_archive.html")
    }

    pub fn article_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("debug_article_{}.html", index))
    }

    /// Failures are logged and otherwise ignored.
    pub async fn write(&self, path: &Path, page: &Page) {
        let result: std::io::Result<()> = async {
            tokio::fs::create_dir_all(&self.dir).await?;
            tokio::fs::write(path, &page.body).await
        }
        .await;

        match result {
            Ok(()) => debug!("🗂️ Saved raw HTML of {} to {}", page.url, path.display()),
            Err(e) => warn!("⚠️ Could not save raw HTML to {}: {}", path.display(), e),
        }
    }
}
