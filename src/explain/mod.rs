//! Narrow contract to the external explanation generator. The engine hands
//! over the computed verdict and its evidence; the service only rephrases
//! the validated advice for the patient. Failures here never alter a score.

pub mod ollama;
pub mod prompt;

pub use ollama::OllamaExplainer;

use serde::Serialize;
use thiserror::Error;

use crate::engine::types::TriggerRecord;
use crate::models::enums::{Gender, RiskLevel};

#[derive(Error, Debug)]
pub enum ExplainError {
    #[error("Cannot reach explanation service at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Explanation service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Failed to parse service response: {0}")]
    ResponseParsing(String),
}

/// Everything the generator may ground its text on.
#[derive(Debug, Clone, Serialize)]
pub struct ExplanationRequest {
    pub drug_name: String,
    pub score: RiskLevel,
    /// Validated advice texts from the triggered rules.
    pub details: Vec<String>,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub has_other_meds: bool,
    /// Substance names of the evaluated brand.
    pub substances: Vec<String>,
    pub triggers: Vec<TriggerRecord>,
    /// Language the reply should be written in.
    pub lang: String,
}

/// The single seam the orchestrator talks through.
pub trait ExplanationClient {
    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplainError>;
}

/// Mock client for testing: configurable response or failure.
pub struct MockExplainer {
    response: Option<String>,
}

impl MockExplainer {
    pub fn new(response: &str) -> Self {
        Self {
            response: Some(response.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { response: None }
    }
}

impl ExplanationClient for MockExplainer {
    fn explain(&self, _request: &ExplanationRequest) -> Result<String, ExplainError> {
        match &self.response {
            Some(text) => Ok(text.clone()),
            None => Err(ExplainError::Connection("http://mock".to_string())),
        }
    }
}
