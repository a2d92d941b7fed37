use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use ls_core::{ArticleRecord, CefrLevel, Error, LevelOrigin, RecordStorage, Result};
use ls_inference::LevelClassifier;
use tracing::info;
use crate::fetcher::{HtmlDump, PageFetcher};
use crate::logging::Logger;
use crate::scrapers::{get_scraper_factories, BoxedScraper, Scraper, ScraperFactory};

/// How far an article got through the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleStage {
    Pending,
    Fetched,
    Extracted,
    Classified,
    Recorded,
}

impl fmt::Display for ArticleStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArticleStage::Pending => "pending",
            ArticleStage::Fetched => "fetched",
            ArticleStage::Extracted => "extracted",
            ArticleStage::Classified => "classified",
            ArticleStage::Recorded => "recorded",
        };
        f.write_str(name)
    }
}

/// An article dropped from the batch, with the last stage it reached.
#[derive(Debug)]
pub struct SkippedArticle {
    pub url: String,
    pub stage: ArticleStage,
    pub error: Error,
}

impl SkippedArticle {
    fn new(url: &str, stage: ArticleStage, error: Error) -> Self {
        Self {
            url: url.to_string(),
            stage,
            error,
        }
    }
}

#[derive(Debug, Default)]
pub struct RunSummary {
    pub links_found: usize,
    pub attempted: usize,
    pub records: Vec<ArticleRecord>,
    pub skipped: Vec<SkippedArticle>,
}

impl RunSummary {
    pub fn level_counts(&self) -> BTreeMap<CefrLevel, usize> {
        level_counts(&self.records)
    }

    /// Records whose level is the default because the model gave no usable answer
    pub fn fallback_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.level_origin, LevelOrigin::Unrecognized(_) | LevelOrigin::Failed(_)))
            .count()
    }
}

pub fn level_counts(records: &[ArticleRecord]) -> BTreeMap<CefrLevel, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.level).or_insert(0) += 1;
    }
    counts
}

/// Runs the listing → article → level → batch pipeline, one request at a time.
pub struct ScraperManager {
    fetcher: Arc<dyn PageFetcher>,
    classifier: Option<LevelClassifier>,
    storage: Arc<dyn RecordStorage>,
    factories: Vec<ScraperFactory>,
    dump: Option<HtmlDump>,
}

impl ScraperManager {
    /// A manager without a classifier can list sources and read the stored
    /// batch, scraping needs [`ScraperManager::with_classifier`].
    pub fn new(fetcher: Arc<dyn PageFetcher>, storage: Arc<dyn RecordStorage>) -> Self {
        Self {
            fetcher,
            classifier: None,
            storage,
            factories: get_scraper_factories(),
            dump: None,
        }
    }

    pub fn with_classifier(mut self, classifier: LevelClassifier) -> Self {
        self.classifier = Some(classifier);
        self
    }

    fn classifier(&self) -> Result<&LevelClassifier> {
        self.classifier
            .as_ref()
            .ok_or_else(|| Error::Config("No level classifier configured".to_string()))
    }

    /// Save every fetched page under `dir`
    pub fn with_html_dump(mut self, dir: impl AsRef<Path>) -> Self {
        self.dump = Some(HtmlDump::new(dir));
        self
    }

    pub fn get_scrapers(&self) -> Result<Vec<BoxedScraper>> {
        self.factories.iter().map(|f| f()).collect()
    }

    pub fn get_scraper(&self, name: &str) -> Result<BoxedScraper> {
        let name = name.to_lowercase();
        for factory in &self.factories {
            let scraper = factory()?;
            if scraper.cli_names().contains(&name.as_str()) {
                return Ok(scraper);
            }
        }
        Err(Error::Scraping(format!("No scraper found for source: {}", name)))
    }

    pub fn get_scraper_for_url(&self, url: &str) -> Result<BoxedScraper> {
        for factory in &self.factories {
            let scraper = factory()?;
            if scraper.can_handle(url) {
                return Ok(scraper);
            }
        }
        Err(Error::Scraping(format!("No scraper found for URL: {}", url)))
    }

    /// Scrape up to `limit` articles from `source` and replace the stored batch.
    ///
    /// Only a failure to fetch the listing page or to write the batch aborts
    /// the run; per-article failures are recorded in the summary.
    pub async fn scrape_source(&self, source: &str, limit: usize) -> Result<RunSummary> {
        let scraper = self.get_scraper(source)?;
        let summary = self.collect(scraper.as_ref(), limit).await?;

        info!("💾 Storing {} records", summary.records.len());
        self.storage.store_records(&summary.records).await?;
        Ok(summary)
    }

    /// Run the pipeline over the first `limit` links without storing anything.
    pub async fn collect(&self, scraper: &dyn Scraper, limit: usize) -> Result<RunSummary> {
        let classifier = self.classifier()?;
        let meta = scraper.source_metadata();
        let listing_url = scraper.listing_url();
        info!("{} Starting scraper for {}. Target: {}", meta.emoji, meta.name, listing_url);

        let listing = self.fetcher.fetch(&listing_url).await?;
        if let Some(dump) = &self.dump {
            dump.write(&dump.listing_path(), &listing).await;
        }

        let links = scraper.extract_links(&listing.body);
        info!("🔗 Found {} potential articles. Scraping up to {}...", links.len(), limit);

        let mut summary = RunSummary {
            links_found: links.len(),
            ..RunSummary::default()
        };
        let total = links.len().min(limit);

        for (index, href) in links.iter().take(limit).enumerate() {
            let logger = Logger::new().with_prefix(format!("[{}/{}]", index + 1, total));
            summary.attempted += 1;

            match self.process_link(scraper, classifier, href, index, &logger).await {
                Ok(record) => {
                    logger.info(&format!("✅ Success. Level: {}", record.level));
                    summary.records.push(record);
                }
                Err(skipped) => {
                    logger.warn(&format!(
                        "⏭️ Skipped {} after stage {}: {}",
                        skipped.url, skipped.stage, skipped.error
                    ));
                    summary.skipped.push(skipped);
                }
            }
        }

        Ok(summary)
    }

    /// Fetch, extract and classify a single article URL.
    pub async fn scrape_url(&self, url: &str) -> Result<ArticleRecord> {
        let classifier = self.classifier()?;
        let scraper = self.get_scraper_for_url(url)?;
        let logger = Logger::new().with_prefix("[url]".to_string());
        self.process_link(scraper.as_ref(), classifier, url, 0, &logger)
            .await
            .map_err(|skipped| skipped.error)
    }

    pub async fn load_records(&self) -> Result<Vec<ArticleRecord>> {
        self.storage.load_records().await
    }

    async fn process_link(
        &self,
        scraper: &dyn Scraper,
        classifier: &LevelClassifier,
        href: &str,
        index: usize,
        logger: &Logger,
    ) -> std::result::Result<ArticleRecord, SkippedArticle> {
        let url = scraper
            .resolve_url(href)
            .map_err(|e| SkippedArticle::new(href, ArticleStage::Pending, e))?;
        logger.info(&format!("📰 Scraping article: {}", url));

        let page = self
            .fetcher
            .fetch(&url)
            .await
            .map_err(|e| SkippedArticle::new(&url, ArticleStage::Pending, e))?;
        if let Some(dump) = &self.dump {
            dump.write(&dump.article_path(index), &page).await;
        }
        logger.debug(&format!("🌐 {} {} bytes", ArticleStage::Fetched, page.body.len()));

        let article = scraper
            .extract_article(&page.body)
            .map_err(|e| SkippedArticle::new(&url, ArticleStage::Fetched, e))?;
        logger.debug(&format!("📑 {} \"{}\"", ArticleStage::Extracted, article.title));

        let classification = classifier.classify(&article.content).await;
        if classification.is_fallback() {
            logger.warn(&format!(
                "🤖 {} gave no usable level ({:?}), using {}",
                classifier.model_name(),
                classification.origin,
                classification.level
            ));
        }
        logger.debug(&format!("🏷️ {} as {}", ArticleStage::Classified, classification.level));

        let record = ArticleRecord::new(article, &url, classification)
            .map_err(|e| SkippedArticle::new(&url, ArticleStage::Extracted, e))?;
        logger.debug(&format!("🧾 {} as {}", ArticleStage::Recorded, record.slug));
        Ok(record)
    }

    pub fn list_scrapers(&self) -> Result<()> {
        for scraper in self.get_scrapers()? {
            let meta = scraper.source_metadata();
            println!(
                "  {} {} [{}] {}",
                meta.emoji,
                meta.name,
                scraper.cli_names().join(", "),
                scraper.listing_url()
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::Page;
    use crate::test_utils::*;
    use async_trait::async_trait;
    use ls_inference::models::DummyModel;
    use ls_storage::MemoryStorage;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const LISTING_URL: &str = "https://practiceespanol.com/news/";
    const UNO: &str = "https://practiceespanol.com/news/uno/";
    const DOS: &str = "https://practiceespanol.com/news/dos/";
    const TRES: &str = "https://practiceespanol.com/news/tres/";

    struct MockFetcher {
        pages: HashMap<String, String>,
        requested: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        fn with_pages(pages: &[(&str, &str)]) -> Arc<Self> {
            Arc::new(Self {
                pages: pages.iter().map(|(u, b)| (u.to_string(), b.to_string())).collect(),
                requested: Mutex::new(Vec::new()),
            })
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for MockFetcher {
        async fn fetch(&self, url: &str) -> Result<Page> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .map(|body| Page { url: url.to_string(), body: body.clone() })
                .ok_or_else(|| Error::Scraping(format!("404 Not Found: {}", url)))
        }
    }

    fn manager(fetcher: Arc<MockFetcher>, reply: &str) -> (ScraperManager, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let classifier = LevelClassifier::new(Arc::new(DummyModel::with_reply(reply)));
        let manager = ScraperManager::new(fetcher, storage.clone()).with_classifier(classifier);
        (manager, storage)
    }

    #[test]
    fn test_stage_names() {
        let names: Vec<String> = [
            ArticleStage::Pending,
            ArticleStage::Fetched,
            ArticleStage::Extracted,
            ArticleStage::Classified,
            ArticleStage::Recorded,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(names, ["pending", "fetched", "extracted", "classified", "recorded"]);
    }

    #[tokio::test]
    async fn test_limit_stops_before_third_link() {
        let fetcher = MockFetcher::with_pages(&[
            (LISTING_URL, LISTING_HTML),
            (UNO, ARTICLE_HTML),
            (DOS, WIDGET_ARTICLE_HTML),
            (TRES, ARTICLE_HTML),
        ]);
        let (manager, storage) = manager(fetcher.clone(), "A2");

        let summary = manager.scrape_source("practiceespanol", 2).await.unwrap();

        assert_eq!(summary.links_found, 3);
        assert_eq!(summary.attempted, 2);
        assert_eq!(summary.records.len(), 2);
        assert_eq!(fetcher.requested(), vec![LISTING_URL, UNO, DOS]);

        let stored = storage.load_records().await.unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].slug, "hola-mundo-2024");
        assert_eq!(stored[0].source_url, UNO);
        assert_eq!(stored[1].source_url, DOS);
        assert!(stored.iter().all(|r| r.level == CefrLevel::A2));
    }

    #[tokio::test]
    async fn test_failures_consume_slots() {
        // `uno` is unreachable, `dos` has no Spanish text.
        let fetcher = MockFetcher::with_pages(&[
            (LISTING_URL, LISTING_HTML),
            (DOS, EMPTY_SOURCE_HTML),
            (TRES, ARTICLE_HTML),
        ]);
        let (manager, storage) = manager(fetcher.clone(), "B2");

        let summary = manager.scrape_source("practiceespanol", 2).await.unwrap();

        assert_eq!(summary.attempted, 2);
        assert!(summary.records.is_empty());
        assert_eq!(summary.skipped.len(), 2);
        assert_eq!(summary.skipped[0].stage, ArticleStage::Pending);
        assert_eq!(summary.skipped[1].stage, ArticleStage::Fetched);
        assert!(!fetcher.requested().contains(&TRES.to_string()));
        assert!(storage.load_records().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_container_is_skipped() {
        let fetcher = MockFetcher::with_pages(&[
            (LISTING_URL, LISTING_HTML),
            (UNO, NO_CONTAINER_HTML),
            (DOS, ARTICLE_HTML),
            (TRES, ARTICLE_HTML),
        ]);
        let (manager, _) = manager(fetcher, "C1");

        let summary = manager.scrape_source("practiceespanol", 10).await.unwrap();

        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.records.len(), 2);
        assert_eq!(summary.skipped.len(), 1);
        assert!(matches!(summary.skipped[0].error, Error::Extraction(_)));
    }

    #[tokio::test]
    async fn test_empty_source_dropped_every_run() {
        let fetcher = MockFetcher::with_pages(&[
            (LISTING_URL, LISTING_HTML),
            (UNO, EMPTY_SOURCE_HTML),
        ]);
        let (manager, storage) = manager(fetcher, "A1");

        for _ in 0..2 {
            let summary = manager.scrape_source("practiceespanol", 1).await.unwrap();
            assert!(summary.records.is_empty());
            assert!(storage.load_records().await.unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_unrecognized_level_defaults() {
        let fetcher = MockFetcher::with_pages(&[(LISTING_URL, LISTING_HTML), (UNO, ARTICLE_HTML)]);
        let (manager, _) = manager(fetcher, "C2");

        let summary = manager.scrape_source("practiceespanol", 1).await.unwrap();

        assert_eq!(summary.records[0].level, CefrLevel::B1);
        assert_eq!(summary.records[0].level_origin, LevelOrigin::Unrecognized("C2".to_string()));
        assert_eq!(summary.fallback_count(), 1);
        assert_eq!(summary.level_counts().get(&CefrLevel::B1), Some(&1));
    }

    #[tokio::test]
    async fn test_listing_failure_aborts() {
        let fetcher = MockFetcher::with_pages(&[]);
        let (manager, _) = manager(fetcher, "A1");
        assert!(manager.scrape_source("practiceespanol", 5).await.is_err());
    }

    #[tokio::test]
    async fn test_repeat_runs_same_length() {
        let fetcher = MockFetcher::with_pages(&[
            (LISTING_URL, LISTING_HTML),
            (UNO, ARTICLE_HTML),
            (DOS, ARTICLE_HTML),
            (TRES, NO_CONTAINER_HTML),
        ]);
        let (manager, _) = manager(fetcher, "B1");

        let first = manager.scrape_source("practiceespanol", 3).await.unwrap();
        let second = manager.scrape_source("practiceespanol", 3).await.unwrap();
        assert_eq!(first.records.len(), second.records.len());
    }

    #[tokio::test]
    async fn test_unknown_source() {
        let (manager, _) = manager(MockFetcher::with_pages(&[]), "A1");
        assert!(manager.scrape_source("lanacion", 5).await.is_err());
        assert!(manager.get_scraper("PracticeEspanol").is_ok());
    }

    #[tokio::test]
    async fn test_scrape_url() {
        let fetcher = MockFetcher::with_pages(&[(UNO, ARTICLE_HTML), (DOS, NO_CONTAINER_HTML)]);
        let (manager, _) = manager(fetcher, "A2");

        let record = manager.scrape_url(UNO).await.unwrap();
        assert_eq!(record.content_reference, "First paragraph.\n\nSecond paragraph.");
        assert!(manager.scrape_url(DOS).await.is_err());
        assert!(manager.scrape_url("https://example.com/a").await.is_err());
    }

    #[tokio::test]
    async fn test_scraping_requires_classifier() {
        let fetcher = MockFetcher::with_pages(&[(LISTING_URL, LISTING_HTML), (UNO, ARTICLE_HTML)]);
        let storage = Arc::new(MemoryStorage::new());
        let manager = ScraperManager::new(fetcher.clone(), storage);

        assert!(matches!(
            manager.scrape_source("practiceespanol", 1).await,
            Err(Error::Config(_))
        ));
        assert!(matches!(manager.scrape_url(UNO).await, Err(Error::Config(_))));
        assert!(fetcher.requested().is_empty());

        // Reading the batch and listing sources work without one.
        assert!(manager.load_records().await.unwrap().is_empty());
        assert!(manager.list_scrapers().is_ok());
    }

    #[tokio::test]
    async fn test_html_dump() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = MockFetcher::with_pages(&[(LISTING_URL, LISTING_HTML), (UNO, ARTICLE_HTML)]);
        let (manager, _) = manager(fetcher, "A1");
        let manager = manager.with_html_dump(dir.path());

        manager.scrape_source("practiceespanol", 1).await.unwrap();

        assert!(dir.path().join("debug_archive.html").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("debug_article_0.html")).unwrap(),
            ARTICLE_HTML
        );
    }
}
