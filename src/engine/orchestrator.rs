use chrono::Utc;
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::db::{RuleRepository, SearchHit};
use crate::explain::{ExplanationClient, ExplanationRequest, OllamaExplainer};
use crate::i18n::TranslationCatalog;
use crate::models::enums::RiskLevel;
use crate::models::{Brand, PatientContext, Rule};

use super::filters;
use super::flow::{build_flow, FlowQuestion};
use super::risk;
use super::types::{EngineError, Evaluation, EvaluationRequest, Verdict};

/// Single entry point for one evaluation request: repository resolution,
/// context filtering, automatic answer injection, aggregation, response
/// enrichment, and the trailing explanation call.
pub struct Orchestrator<E: ExplanationClient> {
    repository: RuleRepository,
    explainer: E,
    catalog: TranslationCatalog,
    default_lang: String,
}

impl Orchestrator<OllamaExplainer> {
    /// Production wiring from an explicit startup configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(
            RuleRepository::new(&config.db_path),
            OllamaExplainer::new(&config.explain),
            TranslationCatalog::embedded(),
            &config.default_lang,
        )
    }
}

impl<E: ExplanationClient> Orchestrator<E> {
    pub fn new(
        repository: RuleRepository,
        explainer: E,
        catalog: TranslationCatalog,
        default_lang: &str,
    ) -> Self {
        Self {
            repository,
            explainer,
            catalog,
            default_lang: default_lang.to_string(),
        }
    }

    /// Evaluate one request. Never fails: a scoring failure is elevated to
    /// the worst case and reported, not propagated. An unevaluable request
    /// must never present as "safe".
    pub fn evaluate(&self, request: &EvaluationRequest) -> Evaluation {
        let lang = request.lang.as_deref().unwrap_or(&self.default_lang).to_string();
        let request_id = Uuid::new_v4();

        match self.try_evaluate(request, &lang, request_id) {
            Ok(evaluation) => evaluation,
            Err(err) => {
                tracing::error!(
                    request_id = %request_id,
                    identifier = %request.identifier,
                    error = %err,
                    "Evaluation failed, answering fail-safe"
                );
                self.fail_safe(request_id, &lang)
            }
        }
    }

    fn try_evaluate(
        &self,
        request: &EvaluationRequest,
        lang: &str,
        request_id: Uuid,
    ) -> Result<Evaluation, EngineError> {
        let resolved = self.repository.resolve_rules(&request.identifier)?;
        let has_coverage = !resolved.is_empty();
        let brand = self.repository.brand_details(&request.identifier)?;
        let route = brand.as_ref().and_then(|b| b.route.clone());

        let mut context = PatientContext::new(
            request.gender,
            request.age,
            request.has_other_meds,
            request.answers.clone(),
        );

        let in_scope = filters::for_scoring(
            resolved,
            route.as_deref(),
            context.gender,
            context.age,
            context.has_other_meds,
        );
        risk::inject_polymedication_answers(&in_scope, &mut context);
        let verdict = risk::compute_score(&in_scope, &context);

        let mut details = verdict.advice.clone();
        let is_otc = brand.as_ref().map(|b| b.is_otc).unwrap_or(true);
        if !is_otc {
            let warning = self.catalog.prescription_warning(lang);
            if !details.contains(&warning) {
                details.insert(0, warning);
            }
        }

        let explanation = if verdict.level > RiskLevel::Safe {
            Some(self.explain(brand.as_ref(), &verdict, &details, &context, lang))
        } else {
            None
        };

        tracing::info!(
            request_id = %request_id,
            identifier = %request.identifier,
            score = verdict.level.as_str(),
            triggers = verdict.triggers.len(),
            has_coverage,
            "Evaluation complete"
        );

        Ok(Evaluation {
            request_id,
            score: verdict.level,
            details,
            has_coverage,
            triggers: verdict.triggers,
            explanation,
            evaluated_at: Utc::now(),
        })
    }

    /// Explanation failures degrade to a fixed apology string; they never
    /// change the computed score.
    fn explain(
        &self,
        brand: Option<&Brand>,
        verdict: &Verdict,
        details: &[String],
        context: &PatientContext,
        lang: &str,
    ) -> String {
        let request = ExplanationRequest {
            drug_name: brand
                .map(|b| b.name.clone())
                .unwrap_or_else(|| self.catalog.unknown_drug(lang)),
            score: verdict.level,
            details: details.to_vec(),
            gender: context.gender,
            age: context.age,
            has_other_meds: context.has_other_meds,
            substances: brand.map(|b| b.substance_names()).unwrap_or_default(),
            triggers: verdict.triggers.clone(),
            lang: lang.to_string(),
        };

        match self.explainer.explain(&request) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "Explanation service unavailable");
                self.catalog.explanation_unavailable(lang)
            }
        }
    }

    fn fail_safe(&self, request_id: Uuid, lang: &str) -> Evaluation {
        Evaluation {
            request_id,
            score: RiskLevel::Contraindicated,
            details: vec![self.catalog.technical_error(lang)],
            has_coverage: false,
            triggers: Vec::new(),
            explanation: None,
            evaluated_at: Utc::now(),
        }
    }

    /// Ordered question flow for an identifier (profile + medical
    /// questions), empty when no interview is needed.
    pub fn flow(
        &self,
        identifier: &str,
        lang: Option<&str>,
    ) -> Result<Vec<FlowQuestion>, EngineError> {
        let lang = lang.unwrap_or(&self.default_lang);
        let rules = self.repository.resolve_rules(identifier)?;
        let route = self.repository.resolve_route(identifier)?;
        Ok(build_flow(&rules, route.as_deref(), &self.catalog, lang))
    }

    /// Catalog name search for identifier pickers.
    pub fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, EngineError> {
        Ok(self.repository.search(query, limit)?)
    }

    /// Resolved rules narrowed to one patient, fully server-side filtered.
    /// For clients that collect the profile up front instead of walking the
    /// conditional flow.
    pub fn applicable_rules(
        &self,
        identifier: &str,
        context: &PatientContext,
    ) -> Result<Vec<Rule>, EngineError> {
        let rules = self.repository.resolve_rules(identifier)?;
        let route = self.repository.resolve_route(identifier)?;
        Ok(filters::for_display(
            rules,
            route.as_deref(),
            context.gender,
            context.age,
            context.has_other_meds,
        ))
    }
}
