use ls_core::{Error, ExtractedArticle, Result};
use url::Url;

pub mod bilingual;
pub mod rules;

use bilingual::PracticeEspanolScraper;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceMetadata {
    pub name: &'static str,
    pub emoji: &'static str,
    /// Origin used to resolve relative links
    pub base_url: &'static str,
}

/// A site the pipeline knows how to read.
///
/// Implementations only parse markup; fetching is done by the caller so
/// parsed documents never cross an await point.
pub trait Scraper: Send + Sync {
    /// Returns the metadata of the news source
    fn source_metadata(&self) -> SourceMetadata;

    /// Page that lists the articles to scrape
    fn listing_url(&self) -> String;

    /// Returns true if this scraper can handle the given URL
    fn can_handle(&self, url: &str) -> bool;

    /// Returns a list of CLI shorthand names for this scraper
    fn cli_names(&self) -> Vec<&str> {
        vec![]
    }

    /// Article links of a listing page, in document order
    fn extract_links(&self, html: &str) -> Vec<String>;

    /// Title, source text and translation of an article page
    fn extract_article(&self, html: &str) -> Result<ExtractedArticle>;

    /// Absolute URL for a link found on the listing page
    fn resolve_url(&self, href: &str) -> Result<String> {
        utils::resolve_url(self.source_metadata().base_url, href)
    }
}

pub type BoxedScraper = Box<dyn Scraper>;
pub type ScraperFactory = Box<dyn Fn() -> Result<BoxedScraper> + Send + Sync>;

fn practice_espanol() -> Result<BoxedScraper> {
    let scraper: BoxedScraper = Box::new(PracticeEspanolScraper::new()?);
    Ok(scraper)
}

/// Factories for every available scraper
pub fn get_scraper_factories() -> Vec<ScraperFactory> {
    let practice: ScraperFactory = Box::new(practice_espanol);
    vec![practice]
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use super::*;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::InvalidUrl(format!("{}: {}", url, e)))
    }

    /// Links that already carry a scheme are kept as they are, anything
    /// else is joined onto the site origin.
    pub fn resolve_url(base_url: &str, href: &str) -> Result<String> {
        if href.starts_with("http") {
            return Ok(href.to_string());
        }
        parse_url(base_url)?
            .join(href)
            .map(String::from)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", href, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::utils;

    #[test]
    fn test_parse_url() {
        assert!(utils::parse_url("https://example.com").is_ok());
        assert!(utils::parse_url("invalid-url").is_err());
    }

    #[test]
    fn test_resolve_url() {
        let base = "https://practiceespanol.com";
        assert_eq!(
            utils::resolve_url(base, "/news/el-tiempo/").unwrap(),
            "https://practiceespanol.com/news/el-tiempo/"
        );
        assert_eq!(
            utils::resolve_url(base, "https://other.com/a").unwrap(),
            "https://other.com/a"
        );
        assert!(utils::resolve_url("not a base", "/news/").is_err());
    }

    #[test]
    fn test_get_scraper_factories() {
        let scrapers: Vec<BoxedScraper> = get_scraper_factories()
            .iter()
            .map(|factory| factory().unwrap())
            .collect();
        assert!(!scrapers.is_empty());
        assert!(scrapers.iter().any(|s| s.can_handle("https://practiceespanol.com/news/")));
    }
}
