//! Safedose: self-medication risk screening engine.
//!
//! Given a medication (or active substance) and a patient profile, the
//! engine resolves which safety rules apply, filters them by patient
//! context, aggregates the triggered rules into one ordered risk level
//! with supporting evidence, and assembles the question flow a client
//! presents to collect the answers. Transport, ingestion and UI live in
//! external collaborators; this crate is the decision core.

pub mod config;
pub mod db;
pub mod engine;
pub mod explain;
pub mod i18n;
pub mod models;

pub use config::{init_tracing, EngineConfig, ExplainConfig};
pub use db::{RuleRepository, SearchHit, SearchKind, StoreError};
pub use engine::{
    EngineError, Evaluation, EvaluationRequest, FlowQuestion, Orchestrator, TriggerRecord,
};
pub use explain::{ExplanationClient, OllamaExplainer};
pub use i18n::TranslationCatalog;
pub use models::enums::{Gender, RiskLevel};
pub use models::{Brand, PatientContext, Rule};
