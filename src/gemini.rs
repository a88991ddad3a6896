//! Minimal Gemini `generateContent` client.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::Error;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "VERTEX_API_KEY";

/// Client settings for the review command.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

pub fn default_model() -> String {
    "gemini-1.0-pro-latest".to_string()
}

pub fn default_endpoint() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

impl GeminiConfig {
    /// Read the API key from the environment.
    pub fn from_env(model: Option<String>) -> Result<Self, Error> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        Self::new(api_key, model)
    }

    pub fn new(api_key: String, model: Option<String>) -> Result<Self, Error> {
        if api_key.trim().is_empty() {
            return Err(Error::MissingApiKey(API_KEY_ENV));
        }
        Ok(Self {
            api_key,
            model: model.unwrap_or_else(default_model),
            endpoint: default_endpoint(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub safety_settings: Vec<SafetySetting>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub candidate_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateRequest {
    /// Single-turn text prompt with one candidate.
    pub fn text(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            safety_settings: vec![SafetySetting {
                category: "HARM_CATEGORY_DANGEROUS_CONTENT".to_string(),
                threshold: "HARM_BLOCK_THRESHOLD_UNSPECIFIED".to_string(),
            }],
            generation_config: GenerationConfig { candidate_count: 1 },
        }
    }
}

impl GenerateResponse {
    /// Trimmed text of the first candidate's first text part.
    pub fn first_text(&self) -> Result<String, Error> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.iter().find_map(|p| p.text.as_deref()))
            .map(|text| text.trim().to_string())
            .ok_or_else(|| Error::Llm("response contained no text candidate".to_string()))
    }
}

/// Gemini API client.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { config, http })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a prompt and return the generated text.
    pub async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let request = GenerateRequest::text(prompt);
        debug!(model = %self.config.model, prompt_len = prompt.len(), "Sending generateContent request");

        let response = self
            .http
            .post(self.config.url())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "Gemini request failed");
            return Err(Error::Llm(format!("{}: {}", status, body.trim())));
        }

        let parsed: GenerateResponse = response.json().await?;
        parsed.first_text()
    }
}
