//! Gemini `generateContent` client over blocking HTTP.

use std::time::Duration;

use serde::Deserialize;

use super::{AiError, AiResult, GenerateRequest, GenerateResponse, GenerativeBackend, ResponseFormat};
use crate::config::AiConfig;

/// Client for the Gemini REST API.
pub struct GeminiClient {
    base_url: String,
    api_key: Option<String>,
    api_key_env: String,
    agent: ureq::Agent,
}

impl GeminiClient {
    /// Build a client, reading the API key from the configured environment variable.
    pub fn from_config(config: &AiConfig) -> Self {
        Self::new(config, config.api_key())
    }

    /// Build a client with an explicit key.
    pub fn new(config: &AiConfig, api_key: Option<String>) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            agent,
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{model}:generateContent", self.base_url)
    }
}

impl GenerativeBackend for GeminiClient {
    fn generate(&self, request: &GenerateRequest) -> AiResult<GenerateResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| AiError::MissingCredential {
            var: self.api_key_env.clone(),
        })?;

        let body_str = serde_json::to_string(&request_body(request)).map_err(|e| {
            AiError::RequestFailed {
                message: format!("JSON serialize error: {e}"),
            }
        })?;

        let resp = self
            .agent
            .post(&self.endpoint(&request.model))
            .set("Content-Type", "application/json")
            .set("x-goog-api-key", api_key)
            .send_string(&body_str)
            .map_err(|e| match e {
                ureq::Error::Status(status, resp) => AiError::Status {
                    status,
                    message: error_message(resp),
                },
                ureq::Error::Transport(t) => AiError::RequestFailed {
                    message: t.to_string(),
                },
            })?;

        let resp_str = resp.into_string().map_err(|e| AiError::Decode {
            message: e.to_string(),
        })?;

        Ok(GenerateResponse {
            text: response_text(&resp_str)?,
        })
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish()
    }
}

/// JSON body for a `generateContent` call.
pub fn request_body(request: &GenerateRequest) -> serde_json::Value {
    let mut body = serde_json::json!({
        "contents": [
            { "role": "user", "parts": [ { "text": request.prompt } ] }
        ],
    });

    let mut generation = serde_json::Map::new();
    if let Some(t) = request.temperature {
        generation.insert("temperature".into(), serde_json::json!(t));
    }
    if let ResponseFormat::Json { schema } = &request.format {
        generation.insert("responseMimeType".into(), "application/json".into());
        generation.insert("responseSchema".into(), schema.clone());
    }
    if !generation.is_empty() {
        body["generationConfig"] = serde_json::Value::Object(generation);
    }
    body
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Concatenated text parts of the first candidate, or `None` if it has none.
pub fn response_text(body: &str) -> AiResult<Option<String>> {
    let parsed: ApiResponse = serde_json::from_str(body).map_err(|e| AiError::Decode {
        message: format!("unexpected response envelope: {e}"),
    })?;

    let texts: Vec<String> = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if texts.is_empty() {
        Ok(None)
    } else {
        Ok(Some(texts.concat()))
    }
}

/// Pull `error.message` out of an error body, falling back to the raw body.
fn error_message(resp: ureq::Response) -> String {
    let body = resp.into_string().unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(body)
}
