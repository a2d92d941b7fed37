use clap::Parser;
use ls_core::{Error, Result};
use ls_scrappers::cli::{handle_command, ScraperArgs, ScraperCommands};
use ls_scrappers::fetcher::{self, HttpFetcher};
use ls_scrappers::logging::init_logging;
use ls_scrappers::ScraperManager;
use ls_inference::LevelClassifier;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scrape bilingual Spanish news into CEFR-tagged lessons", long_about = None)]
pub struct Cli {
    /// Model used for level classification. Available models: openai (default), dummy
    #[arg(long, global = true, default_value = "openai")]
    model: String,
    /// Model identifier sent to the completion endpoint
    #[arg(long, global = true)]
    model_name: Option<String>,
    /// Base URL of an OpenAI compatible API
    #[arg(long, global = true)]
    model_url: Option<String>,
    #[arg(long, global = true, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// Storage backend: json (default) or memory
    #[arg(long, global = true, default_value = "json")]
    storage: String,
    /// Output file of the json storage
    #[arg(long, global = true, default_value = ls_storage::DEFAULT_OUTPUT_PATH)]
    output: PathBuf,
    /// Save raw HTML of every fetched page into this directory
    #[arg(long, global = true)]
    dump_html: Option<PathBuf>,
    /// Page request timeout in seconds
    #[arg(long, global = true, default_value_t = fetcher::DEFAULT_TIMEOUT.as_secs())]
    timeout_secs: u64,
    #[command(subcommand)]
    command: ScraperCommands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    dotenvy::dotenv().ok();
    init_logging();
    let cli = Cli::parse();

    let manager = build_manager(&cli)?;
    handle_command(ScraperArgs { command: cli.command }, &manager).await
}

/// Wires storage, fetcher and, for commands that classify, the model.
fn build_manager(cli: &Cli) -> Result<ScraperManager> {
    if cli.timeout_secs == 0 {
        return Err(Error::Config("--timeout-secs must be greater than zero".to_string()));
    }

    let storage = ls_storage::create_storage(&cli.storage, &cli.output)?;
    info!("🏦 Storage initialized (using {})", cli.storage);

    let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(cli.timeout_secs))?);
    let mut manager = ScraperManager::new(fetcher, storage);

    if cli.command.needs_model() {
        let inference_config = ls_inference::Config {
            provider: cli.model.clone(),
            api_key: cli.api_key.clone(),
            model_name: cli.model_name.clone(),
            model_url: cli.model_url.clone(),
            ..ls_inference::Config::default()
        };
        let model = ls_inference::create_model(&inference_config)?;
        info!("🧠 Inference model initialized (using {})", model.name());
        manager = manager.with_classifier(LevelClassifier::new(model));
    }

    if let Some(dir) = &cli.dump_html {
        info!("🗂️ Saving raw HTML to {}", dir.display());
        manager = manager.with_html_dump(dir);
    }

    Ok(manager)
}
