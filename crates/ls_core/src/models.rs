use std::fmt;
use async_trait::async_trait;
use crate::Result;

/// A single-turn request to a text-generation model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait CompletionModel: Send + Sync + fmt::Debug {
    /// Human readable name of the backend
    fn name(&self) -> &str;

    /// Run the request and return the raw text of the first choice
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
