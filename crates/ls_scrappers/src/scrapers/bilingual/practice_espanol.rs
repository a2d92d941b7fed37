use scraper::Html;
use ls_core::{ExtractedArticle, Result};
use crate::scrapers::rules::{parse_pattern, parse_selector, SelectorChain, SiteRules};
use crate::scrapers::{Scraper, SourceMetadata};

/// Practica Español news archive: each article holds a Spanish column and
/// an English translation column.
#[derive(Debug)]
pub struct PracticeEspanolScraper {
    rules: SiteRules,
}

impl PracticeEspanolScraper {
    const BASE_URL: &'static str = "https://practiceespanol.com";

    pub fn new() -> Result<Self> {
        // Two generations of the listing template are live.
        let rules = SiteRules {
            links: parse_selector("h3.entry-title a, h3.elementor-post__title a")?,
            title: SelectorChain::new("title", &["h1.entry-title"])?,
            fallback_title: "No Title",
            container: SelectorChain::new(
                "content container",
                &[
                    "div.entry-content",
                    r#"div[data-widget_type="theme-post-content.default"]"#,
                    "article",
                ],
            )?,
            column: parse_selector("div")?,
            column_class: parse_pattern("wp-block-column")?,
            heading: parse_selector("h2")?,
            source_label: parse_pattern("(?i)spanish news")?,
            reference_label: parse_pattern("(?i)english translation")?,
            paragraph: parse_selector("p")?,
        };
        Ok(Self { rules })
    }
}

impl Scraper for PracticeEspanolScraper {
    fn source_metadata(&self) -> SourceMetadata {
        SourceMetadata {
            name: "Practica Español",
            emoji: "📰",
            base_url: Self::BASE_URL,
        }
    }

    fn listing_url(&self) -> String {
        format!("{}/news/", Self::BASE_URL)
    }

    fn can_handle(&self, url: &str) -> bool {
        url.contains("practiceespanol.com")
    }

    fn cli_names(&self) -> Vec<&str> {
        vec!["practiceespanol", "practica"]
    }

    fn extract_links(&self, html: &str) -> Vec<String> {
        self.rules.extract_links(&Html::parse_document(html))
    }

    fn extract_article(&self, html: &str) -> Result<ExtractedArticle> {
        self.rules.extract_article(&Html::parse_document(html))
    }
}
