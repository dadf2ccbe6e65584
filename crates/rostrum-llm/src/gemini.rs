//! Gemini chat backend

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use rostrum_core::Turn;

use crate::backend::{ChatBackend, LlmError};

/// Gemini generateContent request format
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    system_instruction: GeminiContent,
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

/// Gemini generateContent response format
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

/// Gemini provider for the debaters and the judge.
#[derive(Debug)]
pub struct GeminiBackend {
    /// API key
    api_key: String,
    /// Model to use (e.g., "gemini-2.0-flash")
    model: String,
    /// HTTP client
    client: reqwest::Client,
    /// Base URL
    base_url: String,
    /// Optional output cap for single-shot generation
    max_output_tokens: Option<u32>,
}

impl GeminiBackend {
    /// Create a new Gemini backend.
    pub fn new(api_key: &str, model: &str) -> Self {
        Self {
            api_key: api_key.to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            max_output_tokens: None,
        }
    }

    /// Create with a custom base URL (testing against a local stub).
    pub fn with_url(base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Self::new(api_key, model)
        }
    }

    /// Cap generated output, mirroring the judge's short-answer setting.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    fn request_body(&self, system: &str, turns: &[Turn]) -> GeminiRequest {
        GeminiRequest {
            system_instruction: GeminiContent {
                role: None,
                parts: vec![GeminiPart {
                    text: system.to_string(),
                }],
            },
            contents: turns
                .iter()
                .map(|t| GeminiContent {
                    role: Some(t.role.as_str().to_string()),
                    parts: vec![GeminiPart {
                        text: t.content.clone(),
                    }],
                })
                .collect(),
            generation_config: self
                .max_output_tokens
                .map(|max_output_tokens| GenerationConfig { max_output_tokens }),
        }
    }
}

#[async_trait]
impl ChatBackend for GeminiBackend {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn is_available(&self) -> bool {
        let url = format!("{}/v1beta/models", self.base_url);
        self.client
            .get(&url)
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .is_ok()
    }

    async fn converse(&self, system: &str, turns: &[Turn]) -> Result<String, LlmError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );

        tracing::debug!(model = %self.model, turns = turns.len(), "Calling generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(system, turns))
            .send()
            .await
            .map_err(|e| LlmError::ConnectionFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LlmError::RequestFailed(format!(
                "Status: {}",
                response.status()
            )));
        }

        let api_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let text = api_response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| LlmError::InvalidResponse("no candidates in response".to_string()))?;

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let backend = GeminiBackend::new("key", "gemini-2.0-flash").with_max_output_tokens(100);
        let turns = vec![Turn::user("hello"), Turn::model("hi")];

        let body = serde_json::to_value(backend.request_body("be brief", &turns)).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][1]["role"], "model");
        assert_eq!(body["contents"][1]["parts"][0]["text"], "hi");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 100);
    }

    #[tokio::test]
    #[ignore] // Requires a live GEMINI_API_KEY
    async fn test_gemini_live() {
        let key = std::env::var("GEMINI_API_KEY").unwrap();
        let backend = GeminiBackend::new(&key, "gemini-2.0-flash");
        let reply = backend
            .generate("You are terse.", "Say hello in one word")
            .await
            .unwrap();
        assert!(!reply.is_empty());
    }
}
