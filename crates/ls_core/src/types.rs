use std::fmt;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// Difficulty codes a record can carry. C2 is deliberately not part of the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
}

impl CefrLevel {
    pub const ALL: [CefrLevel; 5] = [
        CefrLevel::A1,
        CefrLevel::A2,
        CefrLevel::B1,
        CefrLevel::B2,
        CefrLevel::C1,
    ];

    /// Level used whenever the classifier cannot produce a recognized code
    pub const DEFAULT: CefrLevel = CefrLevel::B1;

    pub fn as_str(&self) -> &'static str {
        match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
        }
    }

    /// Parses a raw model reply. Surrounding whitespace and case are ignored,
    /// anything else has to match a code exactly.
    pub fn from_reply(reply: &str) -> Option<Self> {
        let code = reply.trim().to_uppercase();
        Self::ALL.into_iter().find(|level| level.as_str() == code)
    }
}

impl fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a record's level came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LevelOrigin {
    /// The model answered with a recognized code
    Model,
    /// The model answered, but with something outside the recognized set
    Unrecognized(String),
    /// The remote call failed
    Failed(String),
    /// Loaded back from storage, origin not recorded
    #[default]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub level: CefrLevel,
    pub origin: LevelOrigin,
}

impl Classification {
    pub fn from_model(level: CefrLevel) -> Self {
        Self { level, origin: LevelOrigin::Model }
    }

    pub fn fallback(origin: LevelOrigin) -> Self {
        Self { level: CefrLevel::DEFAULT, origin }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, LevelOrigin::Unrecognized(_) | LevelOrigin::Failed(_))
    }
}

/// Raw output of the content extractor for one article page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedArticle {
    pub title: String,
    pub content: String,
    pub content_reference: String,
}

/// One scraped lesson, as written to the output file.
///
/// Field order and names are the external contract of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub title: String,
    pub slug: String,
    #[serde(rename = "url")]
    pub source_url: String,
    pub content: String,
    #[serde(rename = "contentEnglish")]
    pub content_reference: String,
    #[serde(rename = "cefrLevel")]
    pub level: CefrLevel,
    #[serde(skip)]
    pub level_origin: LevelOrigin,
}

impl ArticleRecord {
    pub fn new(article: ExtractedArticle, source_url: &str, classification: Classification) -> Result<Self> {
        if article.content.trim().is_empty() {
            return Err(Error::Extraction(format!("Empty source text for {}", source_url)));
        }

        Ok(Self {
            slug: slugify_title(&article.title),
            title: article.title,
            source_url: source_url.to_string(),
            content: article.content,
            content_reference: article.content_reference,
            level: classification.level,
            level_origin: classification.origin,
        })
    }
}

/// Lowercase ASCII slug: letters and digits, single hyphens, no hyphen at either end.
pub fn slugify_title(title: &str) -> String {
    slug::slugify(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extracted(title: &str, content: &str) -> ExtractedArticle {
        ExtractedArticle {
            title: title.to_string(),
            content: content.to_string(),
            content_reference: String::new(),
        }
    }

    fn is_clean_slug(slug: &str) -> bool {
        slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
            && !slug.starts_with('-')
            && !slug.ends_with('-')
            && !slug.contains("--")
    }

    #[test]
    fn test_slug_from_mixed_title() {
        assert_eq!(slugify_title("¡Hola, Mundo! 2024"), "hola-mundo-2024");
    }

    #[test]
    fn test_slug_charset() {
        let titles = [
            "El Niño y la economía: ¿qué pasará en 2025?",
            "  --Espacios al principio--  ",
            "Mayúsculas Y minúsculas 123!!!",
            "C'est l'été à Málaga",
        ];
        for title in titles {
            let slug = slugify_title(title);
            assert!(is_clean_slug(&slug), "bad slug {:?} for {:?}", slug, title);
        }
    }

    #[test]
    fn test_slug_is_deterministic() {
        let title = "Noticias de Perú";
        assert_eq!(slugify_title(title), slugify_title(title));
    }

    #[test]
    fn test_level_from_reply() {
        assert_eq!(CefrLevel::from_reply(" b2\n"), Some(CefrLevel::B2));
        assert_eq!(CefrLevel::from_reply("A1"), Some(CefrLevel::A1));
        assert_eq!(CefrLevel::from_reply("C2"), None);
        assert_eq!(CefrLevel::from_reply("Level: B1"), None);
        assert_eq!(CefrLevel::from_reply(""), None);
    }

    #[test]
    fn test_record_requires_content() {
        let result = ArticleRecord::new(
            extracted("Título", "   "),
            "https://example.com/a",
            Classification::from_model(CefrLevel::A2),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_record_serialization_contract() {
        let record = ArticleRecord::new(
            ExtractedArticle {
                title: "Año Nuevo".to_string(),
                content: "Hola a todos.".to_string(),
                content_reference: "Hello everyone.".to_string(),
            },
            "https://example.com/ano-nuevo",
            Classification::fallback(LevelOrigin::Failed("timeout".to_string())),
        )
        .unwrap();

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Año Nuevo","slug":"ano-nuevo","url":"https://example.com/ano-nuevo","content":"Hola a todos.","contentEnglish":"Hello everyone.","cefrLevel":"B1"}"#
        );

        let back: ArticleRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.level, CefrLevel::B1);
        assert_eq!(back.level_origin, LevelOrigin::Unknown);
    }
}
