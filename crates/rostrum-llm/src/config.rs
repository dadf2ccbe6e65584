//! Backend configuration
//!
//! API key, model choice, and the debate-wide sentence cap come from the
//! environment.

use std::env;

use serde::{Deserialize, Serialize};

/// Generative backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Gemini API key (env: GEMINI_API_KEY)
    pub gemini_api_key: Option<String>,
    /// Model name (env: GEMINI_MODEL_NAME)
    pub model: String,
    /// Sentence cap embedded in every debater prompt (env: MAX_SENTENCES)
    pub max_sentences: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: "gemini-2.0-flash".to_string(),
            max_sentences: 2,
        }
    }
}

impl LlmConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            model: env::var("GEMINI_MODEL_NAME")
                .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
            max_sentences: env::var("MAX_SENTENCES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(2),
        }
    }

    /// Whether a real backend can be constructed from this config.
    pub fn is_configured(&self) -> bool {
        self.gemini_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LlmConfig::default();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.max_sentences, 2);
        assert!(!config.is_configured());
    }
}
