//! OpenAI-compatible client for embeddings and chat completions.
//! Blocking HTTP, one attempt per call; failures surface to the caller.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::answer::{ChatProvider, GenerationError};
use crate::config::Config;
use crate::embedding::{EmbeddingError, EmbeddingProvider};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_EMBED_MODEL: &str = "text-embedding-ada-002";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-3.5-turbo";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Thin wrapper around an OpenAI-compatible HTTP API. Implements both the
/// embedding and the completion capability behind their trait seams.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_base: String,
    embed_model: String,
    chat_model: String,
    max_answer_tokens: u32,
    temperature: f32,
}

impl OpenAiClient {
    /// Build a client from the resolved configuration. Validates the base
    /// URL and bakes the credential into the default headers.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        let base = url::Url::parse(&config.api_base)?;
        let auth = format!("Bearer {}", config.api_key.trim());
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth).map_err(|_| ClientError::InvalidApiKey)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Http)?;
        Ok(Self {
            client,
            api_base: base.as_str().trim_end_matches('/').to_string(),
            embed_model: config.embed_model.clone(),
            chat_model: config.chat_model.clone(),
            max_answer_tokens: config.max_answer_tokens,
            temperature: config.temperature,
        })
    }
}

impl EmbeddingProvider for OpenAiClient {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let request = EmbeddingRequest {
            model: &self.embed_model,
            input: text,
        };
        let resp = self
            .client
            .post(format!("{}/embeddings", self.api_base))
            .json(&request)
            .send()?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(EmbeddingError::Service { status, body });
        }
        let parsed: EmbeddingResponse = resp.json()?;
        parsed
            .data
            .into_iter()
            .next()
            .map(|entry| entry.embedding)
            .ok_or(EmbeddingError::EmptyResponse)
    }
}

impl ChatProvider for OpenAiClient {
    fn complete(&self, system: &str, user: &str) -> Result<String, GenerationError> {
        let request = ChatRequest {
            model: &self.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: self.max_answer_tokens,
            temperature: self.temperature,
        };
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .json(&request)
            .send()?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().unwrap_or_else(|_| "<body unavailable>".to_string());
            return Err(GenerationError::Service { status, body });
        }
        let parsed: ChatResponse = resp.json()?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(GenerationError::NoChoices)
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("invalid API base URL: {0}")]
    ParseUrl(#[from] url::ParseError),
    #[error("API key contains characters not allowed in a header")]
    InvalidApiKey,
    #[error("failed to build HTTP client: {0}")]
    Http(reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Settings};

    fn config_with_base(base: &str) -> Config {
        let settings = Settings {
            api_base: Some(base.to_string()),
            ..Settings::default()
        };
        Config::resolve(settings, Some("sk-test".to_string())).unwrap()
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let err = OpenAiClient::new(&config_with_base("not a url")).unwrap_err();
        assert!(matches!(err, ClientError::ParseUrl(_)));
    }

    #[test]
    fn trailing_slash_on_base_url_is_tolerated() {
        let client = OpenAiClient::new(&config_with_base("https://example.test/v1/")).unwrap();
        assert_eq!(client.api_base, "https://example.test/v1");
    }

    #[test]
    fn rejects_api_key_with_control_characters() {
        let settings = Settings::default();
        let config = Config::resolve(settings, Some("bad\nkey".to_string())).unwrap();
        let err = OpenAiClient::new(&config).unwrap_err();
        assert!(matches!(err, ClientError::InvalidApiKey));
    }
}
