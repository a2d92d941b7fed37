use clap::{Args, Subcommand};
use ls_core::Result;
use crate::manager::{level_counts, ScraperManager};

pub const DEFAULT_SOURCE: &str = "practiceespanol";
pub const DEFAULT_LIMIT: usize = 10;

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// Scrape articles from a source and replace the stored batch
    Scrape {
        /// The source to scrape (see `list`)
        #[arg(long, default_value = DEFAULT_SOURCE)]
        source: String,
        /// Maximum number of article links to visit
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
    /// Scrape a single article and print it as JSON
    Url {
        url: String,
    },
    /// List available scrapers
    List,
    /// Summarize the stored batch
    Show,
}

impl ScraperCommands {
    /// Whether the command classifies articles and so needs a model
    pub fn needs_model(&self) -> bool {
        matches!(self, ScraperCommands::Scrape { .. } | ScraperCommands::Url { .. })
    }
}

pub async fn handle_command(args: ScraperArgs, manager: &ScraperManager) -> Result<()> {
    match args.command {
        ScraperCommands::Scrape { source, limit } => {
            let summary = manager.scrape_source(&source, limit).await?;
            println!(
                "\nScraping complete. Saved {} lessons ({} of {} attempted links skipped).",
                summary.records.len(),
                summary.skipped.len(),
                summary.attempted
            );
            for (level, count) in summary.level_counts() {
                println!("  {}: {}", level, count);
            }
            if summary.fallback_count() > 0 {
                println!("  ({} levels defaulted)", summary.fallback_count());
            }
        }
        ScraperCommands::Url { url } => {
            let record = manager.scrape_url(&url).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        ScraperCommands::List => {
            println!("Available scrapers:");
            manager.list_scrapers()?;
        }
        ScraperCommands::Show => {
            let records = manager.load_records().await?;
            println!("{} stored lessons", records.len());
            for (level, count) in level_counts(&records) {
                println!("  {}: {}", level, count);
            }
        }
    }
    Ok(())
}
