use std::fmt;
use ls_core::{CompletionModel, CompletionRequest, Result};

/// Offline model that answers every request with the same reply.
pub struct DummyModel {
    reply: String,
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").field("reply", &self.reply).finish()
    }
}

impl DummyModel {
    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self { reply: reply.into() }
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::with_reply("B1")
    }
}

#[async_trait::async_trait]
impl CompletionModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        tracing::debug!("Dummy completion for {} prompt chars", request.prompt.chars().count());
        Ok(self.reply.clone())
    }
}
