use std::sync::Arc;
use ls_core::{CompletionModel, Error, Result};
use crate::Config;

pub mod openai;
pub mod dummy;

pub use dummy::DummyModel;
pub use openai::OpenAiModel;

/// Builds the model client once; callers share the returned handle.
pub fn create_model(config: &Config) -> Result<Arc<dyn CompletionModel>> {
    match config.provider.to_lowercase().as_str() {
        "openai" => Ok(Arc::new(OpenAiModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::default())),
        other => Err(Error::Config(format!(
            "Unknown model '{}'. Available models: openai, dummy",
            other
        ))),
    }
}
