//! AI gateway: document summaries and training roadmaps from a generative model.
//!
//! The gateway owns prompt construction, the declared response format, and
//! decoding. Transport is behind [`GenerativeBackend`]; [`gemini::GeminiClient`]
//! is the production implementation.
//!
//! The two operations fail differently on purpose:
//! - [`AiGateway::summarize`] turns an empty payload into a fixed fallback string.
//! - [`AiGateway::generate_roadmap`] fails on an empty or undecodable payload and
//!   never returns a partially-populated roadmap.
//!
//! Neither operation retries.

pub mod gemini;
pub mod prompt;

use miette::Diagnostic;
use thiserror::Error;

use crate::config::AiConfig;
use crate::model::{Document, TrainingRoadmap};

/// Returned by [`AiGateway::summarize`] when the model produced no text.
pub const SUMMARY_FALLBACK: &str = "Failed to generate summary.";

/// Errors from the AI gateway and its backends.
#[derive(Debug, Error, Diagnostic)]
pub enum AiError {
    #[error("no API credential: environment variable {var} is not set")]
    #[diagnostic(
        code(lumina::ai::missing_credential),
        help("Export {var}=<your key>, or point `ai.api_key_env` at the variable holding it.")
    )]
    MissingCredential { var: String },

    #[error("generation request failed: {message}")]
    #[diagnostic(
        code(lumina::ai::request_failed),
        help("Check network connectivity and `ai.base_url`.")
    )]
    RequestFailed { message: String },

    #[error("generation endpoint returned status {status}: {message}")]
    #[diagnostic(
        code(lumina::ai::status),
        help("401/403 usually means a bad key, 404 an unknown model, 429 an exhausted quota.")
    )]
    Status { status: u16, message: String },

    #[error("model {model} returned an empty response")]
    #[diagnostic(
        code(lumina::ai::empty_response),
        help("The model produced no structured output. Try again or rephrase the topic.")
    )]
    EmptyResponse { model: String },

    #[error("failed to decode model response: {message}")]
    #[diagnostic(
        code(lumina::ai::decode),
        help("The model returned output that does not match the declared schema.")
    )]
    Decode { message: String },
}

pub type AiResult<T> = std::result::Result<T, AiError>;

/// Shape the response is requested in.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// Free text.
    Text,
    /// JSON constrained by a declared schema.
    Json { schema: serde_json::Value },
}

/// One generation call: model, prompt, and sampling/format options.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: Option<f64>,
    pub format: ResponseFormat,
}

/// What came back. `text` is `None` when the endpoint returned no text part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResponse {
    pub text: Option<String>,
}

impl GenerateResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn empty() -> Self {
        Self { text: None }
    }

    /// The payload, treating an empty string as absent.
    fn payload(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// Transport to a text-generation endpoint.
pub trait GenerativeBackend: Send + Sync {
    fn generate(&self, request: &GenerateRequest) -> AiResult<GenerateResponse>;
}

/// Stateless request/response façade over a [`GenerativeBackend`].
pub struct AiGateway {
    backend: Box<dyn GenerativeBackend>,
    summary_model: String,
    roadmap_model: String,
    summary_temperature: f64,
}

impl AiGateway {
    pub fn new(backend: Box<dyn GenerativeBackend>, config: &AiConfig) -> Self {
        Self {
            backend,
            summary_model: config.summary_model.clone(),
            roadmap_model: config.roadmap_model.clone(),
            summary_temperature: config.summary_temperature,
        }
    }

    /// Gateway backed by the Gemini REST API.
    pub fn gemini(config: &AiConfig) -> Self {
        Self::new(Box::new(gemini::GeminiClient::from_config(config)), config)
    }

    /// The request [`summarize`](Self::summarize) sends for `doc`.
    pub fn summary_request(&self, doc: &Document) -> GenerateRequest {
        GenerateRequest {
            model: self.summary_model.clone(),
            prompt: prompt::summary_prompt(doc),
            temperature: Some(self.summary_temperature),
            format: ResponseFormat::Text,
        }
    }

    /// The request [`generate_roadmap`](Self::generate_roadmap) sends.
    pub fn roadmap_request(&self, topic: &str, documents: &[Document]) -> GenerateRequest {
        GenerateRequest {
            model: self.roadmap_model.clone(),
            prompt: prompt::roadmap_prompt(topic, documents),
            temperature: None,
            format: ResponseFormat::Json {
                schema: prompt::roadmap_schema(),
            },
        }
    }

    /// Summarize a single document. Empty output yields [`SUMMARY_FALLBACK`].
    pub fn summarize(&self, doc: &Document) -> AiResult<String> {
        let request = self.summary_request(doc);
        tracing::debug!(model = %request.model, document = %doc.id, "requesting summary");
        let response = self.backend.generate(&request)?;
        Ok(response
            .payload()
            .map(str::to_string)
            .unwrap_or_else(|| SUMMARY_FALLBACK.to_string()))
    }

    /// Synthesize a training roadmap for `topic` from document titles and summaries.
    ///
    /// `topic` is not validated here; callers gate on it.
    pub fn generate_roadmap(&self, topic: &str, documents: &[Document]) -> AiResult<TrainingRoadmap> {
        let request = self.roadmap_request(topic, documents);
        tracing::debug!(
            model = %request.model,
            topic,
            context_docs = documents.len(),
            "requesting training roadmap"
        );
        let response = self.backend.generate(&request)?;
        let payload = response.payload().ok_or_else(|| AiError::EmptyResponse {
            model: request.model.clone(),
        })?;
        decode_roadmap(payload)
    }
}

impl std::fmt::Debug for AiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiGateway")
            .field("summary_model", &self.summary_model)
            .field("roadmap_model", &self.roadmap_model)
            .field("summary_temperature", &self.summary_temperature)
            .finish()
    }
}

/// Decode a roadmap payload. Missing required fields are an error.
pub fn decode_roadmap(payload: &str) -> AiResult<TrainingRoadmap> {
    serde_json::from_str(payload.trim()).map_err(|e| AiError::Decode {
        message: e.to_string(),
    })
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::testing::ScriptedBackend;
    use super::*;
    use crate::model::TrainingStep;
    use crate::store::DocumentStore;

    fn gateway(replies: Vec<AiResult<GenerateResponse>>) -> (AiGateway, Arc<ScriptedBackend>) {
        let backend = Arc::new(ScriptedBackend::with_replies(replies));
        let gw = AiGateway::new(Box::new(backend.clone()), &AiConfig::default());
        (gw, backend)
    }

    fn handbook() -> Document {
        DocumentStore::bundled().unwrap().get("1").unwrap().clone()
    }

    const ROADMAP_JSON: &str = r#"{
        "title": "Security Onboarding",
        "objective": "Bring new hires up to ISO 27001 speed",
        "steps": [
            {"title": "Policies", "description": "Read the handbook", "duration": "1 day", "resources": ["Handbook"]},
            {"title": "Controls", "description": "Study access control", "duration": "1 week", "resources": []},
            {"title": "Drill", "description": "Run an incident drill", "duration": "2 hours"}
        ]
    }"#;

    #[test]
    fn summary_request_uses_flash_model_and_temperature() {
        let (gw, backend) = gateway(vec![Ok(GenerateResponse::text("Short summary."))]);
        let doc = handbook();
        assert_eq!(gw.summarize(&doc).unwrap(), "Short summary.");

        let requests = backend.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let req = &requests[0];
        assert_eq!(req.model, "gemini-3-flash-preview");
        assert_eq!(req.temperature, Some(0.7));
        assert_eq!(req.format, ResponseFormat::Text);
        assert!(req.prompt.contains("Manual document titled \"Employee Conduct Handbook 2024\""));
        assert!(req.prompt.ends_with(&doc.content));
    }

    #[test]
    fn summary_falls_back_on_absent_or_empty_text() {
        let (gw, _) = gateway(vec![
            Ok(GenerateResponse::empty()),
            Ok(GenerateResponse::text("")),
        ]);
        let doc = handbook();
        assert_eq!(gw.summarize(&doc).unwrap(), SUMMARY_FALLBACK);
        assert_eq!(gw.summarize(&doc).unwrap(), SUMMARY_FALLBACK);
    }

    #[test]
    fn summary_propagates_transport_errors() {
        let (gw, _) = gateway(vec![Err(AiError::Status {
            status: 429,
            message: "quota".into(),
        })]);
        let err = gw.summarize(&handbook()).unwrap_err();
        assert!(matches!(err, AiError::Status { status: 429, .. }));
    }

    #[test]
    fn roadmap_decodes_and_keeps_step_order() {
        let (gw, backend) = gateway(vec![Ok(GenerateResponse::text(ROADMAP_JSON))]);
        let store = DocumentStore::bundled().unwrap();
        let roadmap = gw.generate_roadmap("Security onboarding", store.documents()).unwrap();

        let step = |title: &str, description: &str, duration: &str, resources: &[&str]| TrainingStep {
            title: title.into(),
            description: description.into(),
            duration: duration.into(),
            resources: resources.iter().map(|r| r.to_string()).collect(),
        };
        assert_eq!(
            roadmap,
            TrainingRoadmap {
                title: "Security Onboarding".into(),
                objective: "Bring new hires up to ISO 27001 speed".into(),
                steps: vec![
                    step("Policies", "Read the handbook", "1 day", &["Handbook"]),
                    step("Controls", "Study access control", "1 week", &[]),
                    step("Drill", "Run an incident drill", "2 hours", &[]),
                ],
            }
        );

        let requests = backend.requests.lock().unwrap();
        let req = &requests[0];
        assert_eq!(req.model, "gemini-3-pro-preview");
        assert_eq!(req.temperature, None);
        assert!(matches!(req.format, ResponseFormat::Json { .. }));
        assert!(req.prompt.contains("for the topic: \"Security onboarding\""));
        assert!(!req.prompt.contains(&store.documents()[0].content));
    }

    #[test]
    fn roadmap_empty_payload_is_an_error() {
        let (gw, _) = gateway(vec![Ok(GenerateResponse::empty()), Ok(GenerateResponse::text(""))]);
        let docs = vec![handbook()];
        assert!(matches!(
            gw.generate_roadmap("t", &docs),
            Err(AiError::EmptyResponse { .. })
        ));
        assert!(matches!(
            gw.generate_roadmap("t", &docs),
            Err(AiError::EmptyResponse { .. })
        ));
    }

    #[test]
    fn roadmap_malformed_or_partial_payload_fails() {
        let (gw, _) = gateway(vec![
            Ok(GenerateResponse::text("{\"title\": \"Half")),
            Ok(GenerateResponse::text("{}")),
            Ok(GenerateResponse::text(
                r#"{"title":"T","objective":"O","steps":[{"title":"S","description":"D"}]}"#,
            )),
        ]);
        let docs = vec![handbook()];
        for _ in 0..3 {
            assert!(matches!(gw.generate_roadmap("t", &docs), Err(AiError::Decode { .. })));
        }
    }

    #[test]
    fn roadmap_with_no_documents_still_requests() {
        let (gw, backend) = gateway(vec![Ok(GenerateResponse::text(
            r#"{"title":"T","objective":"O","steps":[]}"#,
        ))]);
        let roadmap = gw.generate_roadmap("Anything", &[]).unwrap();
        assert!(roadmap.steps.is_empty());
        assert!(backend.requests.lock().unwrap()[0].prompt.ends_with("Context:\n"));
    }

    #[test]
    fn decode_tolerates_surrounding_whitespace() {
        let roadmap = decode_roadmap(&format!("\n  {ROADMAP_JSON}\n")).unwrap();
        assert_eq!(roadmap.steps.len(), 3);
        assert_eq!(roadmap.steps[0].resources, ["Handbook"]);
    }
}
