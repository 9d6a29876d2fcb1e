use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::enums::Gender;

/// Per-request patient profile and screening answers. Built fresh for each
/// evaluation, never persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientContext {
    pub gender: Option<Gender>,
    pub age: Option<u32>,
    pub has_other_meds: bool,
    /// question code -> yes/no. Missing codes count as "no".
    pub answers: HashMap<String, bool>,
}

impl PatientContext {
    pub fn new(
        gender: Option<Gender>,
        age: Option<u32>,
        has_other_meds: bool,
        answers: HashMap<String, bool>,
    ) -> Self {
        Self {
            gender,
            age,
            has_other_meds,
            answers,
        }
    }

    /// An unanswered question never contributes risk.
    pub fn answer(&self, question_code: &str) -> bool {
        self.answers.get(question_code).copied().unwrap_or(false)
    }
}
