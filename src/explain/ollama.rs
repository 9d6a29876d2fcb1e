use serde::{Deserialize, Serialize};

use super::{prompt, ExplainError, ExplanationClient, ExplanationRequest};
use crate::config::ExplainConfig;

/// Ollama HTTP client for local LLM inference.
pub struct OllamaExplainer {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaExplainer {
    pub fn new(config: &ExplainConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            client,
            timeout_secs: config.timeout_secs,
        }
    }

    fn generate(&self, system: &str, prompt: &str) -> Result<String, ExplainError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                ExplainError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                ExplainError::HttpClient(format!(
                    "Request timed out after {}s",
                    self.timeout_secs
                ))
            } else {
                ExplainError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ExplainError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| ExplainError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response)
    }
}

impl ExplanationClient for OllamaExplainer {
    fn explain(&self, request: &ExplanationRequest) -> Result<String, ExplainError> {
        let system = prompt::system_prompt(&request.lang);
        let user = prompt::user_prompt(request);
        let text = self.generate(&system, &user)?;
        Ok(text.trim().to_string())
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_trims_trailing_slash() {
        let explainer = OllamaExplainer::new(&ExplainConfig {
            base_url: "http://localhost:11434/".into(),
            model: "medgemma:4b".into(),
            timeout_secs: 60,
        });
        assert_eq!(explainer.base_url, "http://localhost:11434");
        assert_eq!(explainer.model, "medgemma:4b");
        assert_eq!(explainer.timeout_secs, 60);
    }

    #[test]
    fn default_config_uses_standard_port() {
        let explainer = OllamaExplainer::new(&ExplainConfig::default());
        assert_eq!(explainer.base_url, "http://localhost:11434");
    }
}
