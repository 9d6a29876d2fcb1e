use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::db::StoreError;
use crate::explain::ExplainError;
use crate::models::enums::{Gender, RiskLevel};

// ---------------------------------------------------------------------------
// TriggerRecord
// ---------------------------------------------------------------------------

/// Evidence that one rule fired for the current request. Collected for
/// every trigger, never just the first: downstream explanation generation
/// needs the full set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerRecord {
    pub question_code: String,
    pub answer: String,
    pub risk_level: RiskLevel,
    pub triggers_alert: bool,
}

impl TriggerRecord {
    pub fn yes(question_code: &str, risk_level: RiskLevel) -> Self {
        Self {
            question_code: question_code.to_string(),
            answer: "yes".to_string(),
            risk_level,
            triggers_alert: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Verdict: pure aggregation outcome
// ---------------------------------------------------------------------------

/// What the aggregator computes, before response enrichment.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub level: RiskLevel,
    /// Deduplicated advice texts, first-seen order.
    pub advice: Vec<String>,
    pub triggers: Vec<TriggerRecord>,
}

// ---------------------------------------------------------------------------
// Request / response
// ---------------------------------------------------------------------------

/// One evaluation request as received from the transport collaborator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EvaluationRequest {
    /// Brand regulatory code or bare substance identifier.
    pub identifier: String,
    pub answers: HashMap<String, bool>,
    pub has_other_meds: bool,
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub lang: Option<String>,
}

/// The evaluation response.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    /// Correlation id for log lines about this request.
    pub request_id: Uuid,
    pub score: RiskLevel,
    /// Advice texts, prescription warning first when applicable.
    pub details: Vec<String>,
    /// True iff any rule at all applies to the identifier; distinguishes
    /// "verified safe" from "nothing known".
    pub has_coverage: bool,
    pub triggers: Vec<TriggerRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    pub evaluated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Rule store error: {0}")]
    Store(#[from] StoreError),

    #[error("Explanation service error: {0}")]
    Explain(#[from] ExplainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_record_yes_shape() {
        let record = TriggerRecord::yes("Q_LIVER", RiskLevel::Avoid);
        assert_eq!(record.question_code, "Q_LIVER");
        assert_eq!(record.answer, "yes");
        assert_eq!(record.risk_level, RiskLevel::Avoid);
        assert!(record.triggers_alert);
    }

    #[test]
    fn evaluation_serializes_without_empty_explanation() {
        let eval = Evaluation {
            request_id: Uuid::new_v4(),
            score: RiskLevel::Safe,
            details: vec![],
            has_coverage: false,
            triggers: vec![],
            explanation: None,
            evaluated_at: Utc::now(),
        };
        let json = serde_json::to_string(&eval).unwrap();
        assert!(!json.contains("explanation"));
        assert!(json.contains("\"Safe\""));
    }
}
