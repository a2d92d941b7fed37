pub mod scrapers;
pub mod cli;
pub mod fetcher;
pub mod logging;
pub mod manager;

#[cfg(test)]
mod test_utils;

pub use manager::{ArticleStage, RunSummary, ScraperManager, SkippedArticle};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use cli::{ScraperArgs, ScraperCommands, handle_command};
pub use scrapers::Scraper;

pub mod prelude {
    pub use super::scrapers::Scraper;
    pub use super::fetcher::PageFetcher;
    pub use ls_core::{ArticleRecord, Result, Error};
}
