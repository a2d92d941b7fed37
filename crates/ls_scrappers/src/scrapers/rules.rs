//! Named extraction rules for template-driven sites.
//!
//! Every piece of site-specific markup knowledge lives in a [`SiteRules`]
//! value, so a template change only touches the rule set.

use ls_core::{Error, ExtractedArticle, Result};
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

pub(crate) fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| Error::Scraping(format!("Invalid selector {:?}: {:?}", selector, e)))
}

pub(crate) fn parse_pattern(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| Error::Scraping(format!("Invalid pattern {:?}: {}", pattern, e)))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Alternative selectors for one piece of a page, tried in priority order.
#[derive(Debug)]
pub struct SelectorChain {
    name: &'static str,
    candidates: Vec<Selector>,
}

impl SelectorChain {
    pub fn new(name: &'static str, candidates: &[&str]) -> Result<Self> {
        let candidates = candidates
            .iter()
            .map(|c| parse_selector(c))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { name, candidates })
    }

    pub fn name(&self) -> &str {
        self.name
    }

    /// First element matched by the highest-priority candidate that matches
    /// anything, regardless of where the other candidates match.
    pub fn first_in<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        self.candidates
            .iter()
            .find_map(|selector| document.select(selector).next())
    }
}

#[derive(Debug)]
pub struct SiteRules {
    /// Anchors on the listing page pointing to articles
    pub links: Selector,
    pub title: SelectorChain,
    pub fallback_title: &'static str,
    pub container: SelectorChain,
    /// Candidate column blocks inside the container
    pub column: Selector,
    /// Matched against each class of a column candidate
    pub column_class: Regex,
    pub heading: Selector,
    pub source_label: Regex,
    pub reference_label: Regex,
    pub paragraph: Selector,
}

impl SiteRules {
    pub fn extract_links(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.links)
            .filter_map(|a| a.value().attr("href"))
            .map(|href| href.to_string())
            .collect()
    }

    pub fn extract_article(&self, document: &Html) -> Result<ExtractedArticle> {
        let title = self
            .title
            .first_in(document)
            .map(element_text)
            .unwrap_or_else(|| self.fallback_title.to_string());

        let container = self.container.first_in(document).ok_or_else(|| {
            Error::Extraction(format!("No {} found", self.container.name()))
        })?;

        let mut source = String::new();
        let mut reference = String::new();

        for (column, part) in self.labelled_columns(container) {
            let buffer = match part {
                Part::Source => &mut source,
                Part::Reference => &mut reference,
            };
            for paragraph in column.select(&self.paragraph) {
                buffer.push_str(&element_text(paragraph));
                buffer.push_str("\n\n");
            }
        }

        let content = source.trim().to_string();
        if content.is_empty() {
            return Err(Error::Extraction("Source text is empty".to_string()));
        }

        Ok(ExtractedArticle {
            title,
            content,
            content_reference: reference.trim().to_string(),
        })
    }

    fn is_column(&self, element: ElementRef<'_>) -> bool {
        element.value().classes().any(|class| self.column_class.is_match(class))
    }

    /// Source label wins when a block carries both headings.
    fn part_of(&self, column: ElementRef<'_>) -> Option<Part> {
        if self.has_heading(column, &self.source_label) {
            Some(Part::Source)
        } else if self.has_heading(column, &self.reference_label) {
            Some(Part::Reference)
        } else {
            None
        }
    }

    /// Column blocks carrying a recognized heading. Wrappers count too, unless
    /// one of their inner blocks is labelled itself, so no paragraph is read twice.
    fn labelled_columns<'a>(&self, container: ElementRef<'a>) -> Vec<(ElementRef<'a>, Part)> {
        container
            .select(&self.column)
            .filter(|el| self.is_column(*el))
            .filter_map(|el| self.part_of(el).map(|part| (el, part)))
            .filter(|(el, _)| {
                !el.select(&self.column).any(|inner| {
                    inner.id() != el.id() && self.is_column(inner) && self.part_of(inner).is_some()
                })
            })
            .collect()
    }

    fn has_heading(&self, column: ElementRef<'_>, label: &Regex) -> bool {
        column
            .select(&self.heading)
            .any(|h| label.is_match(&element_text(h)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Source,
    Reference,
}
