use std::fmt;
use std::time::Duration;

pub mod models;
pub mod classifier;

pub const DEFAULT_MODEL_NAME: &str = "gpt-4.1-mini";
pub const DEFAULT_MODEL_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct Config {
    /// Backend to use: `openai` or `dummy`
    pub provider: String,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub model_url: Option<String>,
    pub timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("model_url", &self.model_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            api_key: None,
            model_name: None,
            model_url: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl Config {
    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL_NAME)
    }

    pub fn model_url(&self) -> &str {
        self.model_url.as_deref().unwrap_or(DEFAULT_MODEL_URL)
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::classifier::LevelClassifier;
    pub use super::models::create_model;
    pub use ls_core::{CefrLevel, Classification, Result, Error};
}

pub use classifier::LevelClassifier;
pub use models::create_model;
