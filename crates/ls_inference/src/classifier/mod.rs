use ls_core::{CefrLevel, Classification, CompletionModel, CompletionRequest, LevelOrigin};
use std::sync::Arc;
use std::fmt;
use tracing::{debug, warn};

/// Characters of article text sent to the model.
pub const MAX_INPUT_CHARS: usize = 2000;
pub const MAX_OUTPUT_TOKENS: u32 = 5;

const SYSTEM_PROMPT: &str = "You are an expert in the Common European Framework of Reference for Languages (CEFR). \
Your task is to analyze Spanish text and output only the corresponding CEFR level (A1, A2, B1, B2, C1).";

/// Assigns a CEFR level to Spanish text through a completion model.
///
/// Never fails: unrecognized replies and transport errors both resolve to
/// [`CefrLevel::DEFAULT`], with the reason kept in [`LevelOrigin`].
pub struct LevelClassifier {
    model: Arc<dyn CompletionModel>,
    max_input_chars: usize,
}

impl fmt::Debug for LevelClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelClassifier")
            .field("model", &self.model.name())
            .field("max_input_chars", &self.max_input_chars)
            .finish()
    }
}

impl LevelClassifier {
    pub fn new(model: Arc<dyn CompletionModel>) -> Self {
        Self {
            model,
            max_input_chars: MAX_INPUT_CHARS,
        }
    }

    pub fn with_max_input_chars(mut self, max_input_chars: usize) -> Self {
        self.max_input_chars = max_input_chars;
        self
    }

    pub fn model_name(&self) -> &str {
        self.model.name()
    }

    pub fn build_request(&self, text: &str) -> CompletionRequest {
        let excerpt = truncate_chars(text, self.max_input_chars);
        let prompt = format!(
            "Analyze the following Spanish text and determine its CEFR level (A1, A2, B1, B2, C1).\n\
             Return ONLY the CEFR code (e.g., A1, B2, C1) and nothing else.\n\n\
             TEXT:\n---\n{}\n---\n",
            excerpt
        );

        CompletionRequest {
            system: SYSTEM_PROMPT.to_string(),
            prompt,
            temperature: 0.0,
            max_tokens: MAX_OUTPUT_TOKENS,
        }
    }

    pub async fn classify(&self, text: &str) -> Classification {
        let request = self.build_request(text);
        debug!("🧠 Asking {} for a CEFR level", self.model.name());

        match self.model.complete(&request).await {
            Ok(reply) => resolve_reply(&reply),
            Err(e) => {
                warn!("⚠️ Level classification failed, defaulting to {}: {}", CefrLevel::DEFAULT, e);
                Classification::fallback(LevelOrigin::Failed(e.to_string()))
            }
        }
    }
}

/// Maps a raw model reply onto the recognized set.
pub fn resolve_reply(reply: &str) -> Classification {
    match CefrLevel::from_reply(reply) {
        Some(level) => Classification::from_model(level),
        None => {
            warn!("⚠️ Unrecognized level {:?}, defaulting to {}", reply.trim(), CefrLevel::DEFAULT);
            Classification::fallback(LevelOrigin::Unrecognized(reply.trim().to_string()))
        }
    }
}

/// First `max_chars` characters of `text`, cut on a char boundary.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
