//! HTTP client for the Gemini `generateContent` API

use super::generator::{GenerationError, QuestionModel};
use crate::core::config::AiConfig;
use crate::debug;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// Environment variable consulted when the config has no API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize, Serialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize, Serialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Blocking Gemini client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Build a client from the `[ai]` config section
    ///
    /// An empty `api_key` falls back to the `GEMINI_API_KEY` environment
    /// variable; if both are empty the client is built anyway and every call
    /// fails with [`GenerationError::NotConfigured`].
    ///
    /// # Errors
    /// Returns [`GenerationError::Network`] if the HTTP client cannot be
    /// constructed (e.g., TLS backend initialization fails).
    pub fn from_config(config: &AiConfig) -> Result<Self, GenerationError> {
        let api_key = if config.api_key.is_empty() {
            std::env::var(API_KEY_ENV).unwrap_or_default()
        } else {
            config.api_key.clone()
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    /// Full request URL for the configured model
    #[must_use]
    pub fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl QuestionModel for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        if self.api_key.is_empty() {
            return Err(GenerationError::NotConfigured(format!(
                "no API key (set ai.api_key or {API_KEY_ENV})"
            )));
        }

        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.7,
                "responseMimeType": "application/json"
            }
        });

        let url = self.url();
        debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| GenerationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(GenerationError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| GenerationError::Parse(e.to_string()))?;

        parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text.filter(|t| !t.trim().is_empty()))
            .ok_or(GenerationError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str, key: &str) -> AiConfig {
        AiConfig {
            endpoint: endpoint.to_string(),
            model: "gemini-test".to_string(),
            api_key: key.to_string(),
            timeout_secs: 2,
        }
    }

    #[test]
    fn test_url() {
        let client = GeminiClient::from_config(&config("https://example.test/v1beta/", "k")).unwrap();
        assert_eq!(client.url(), "https://example.test/v1beta/models/gemini-test:generateContent");
    }

    #[test]
    fn test_unreachable_endpoint_is_network_error() {
        // Port 9 (discard) on loopback refuses connections on test hosts
        let client = GeminiClient::from_config(&config("http://127.0.0.1:9", "k")).unwrap();
        assert!(matches!(client.generate("hi"), Err(GenerationError::Network(_))));
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":""},{"text":"{\"q\":1}"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let text = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .find_map(|p| p.text.filter(|t| !t.trim().is_empty()));
        assert_eq!(text.as_deref(), Some("{\"q\":1}"));
    }
}
