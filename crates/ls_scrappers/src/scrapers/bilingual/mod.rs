//! Sites that publish Spanish text next to its English translation.

pub mod practice_espanol;

pub use practice_espanol::PracticeEspanolScraper;
