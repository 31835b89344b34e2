//! Plan generation: prompt, one model call, decode and validate.

use crate::config::PlannerConfig;
use crate::models::GeneratedPlan;
use crate::services::metrics;
use crate::services::prompt::build_prompt;
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::{FinishReason, GenerationParams, ProviderError, TextProvider};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use validator::Validate;

#[derive(Error, Debug)]
pub enum PlanError {
    #[error("Critical: Gemini client is not initialized. Please check the server logs and API key.")]
    NotInitialized,

    #[error("The AI returned an invalid format. Please try rephrasing your request.")]
    InvalidFormat,

    #[error("The AI returned a plan that does not match the expected structure: {0}")]
    SchemaMismatch(String),

    #[error("An unexpected error occurred: {0}")]
    Provider(#[from] ProviderError),
}

impl PlanError {
    /// Uniform `{"error": message}` payload.
    pub fn payload(&self) -> Value {
        json!({ "error": self.to_string() })
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            PlanError::NotInitialized => "not_initialized",
            PlanError::InvalidFormat => "invalid_format",
            PlanError::SchemaMismatch(_) => "schema_mismatch",
            PlanError::Provider(_) => "provider_error",
        }
    }
}

/// Turns free-text requests into structured plans.
///
/// The provider handle is fixed at construction. Without one every request
/// fails with [`PlanError::NotInitialized`] and nothing is sent anywhere.
#[derive(Clone)]
pub struct EventPlanner {
    provider: Option<Arc<dyn TextProvider>>,
}

impl EventPlanner {
    pub fn new(provider: Option<Arc<dyn TextProvider>>) -> Self {
        Self { provider }
    }

    /// Build the Gemini-backed planner. A missing key or a client that
    /// fails to build leaves the planner without a provider.
    pub fn from_config(config: &PlannerConfig) -> Self {
        let Some(api_key) = config.google.api_key.clone() else {
            tracing::warn!("GOOGLE_API_KEY not set; plan generation is disabled");
            return Self::new(None);
        };

        let gemini_config = GeminiConfig {
            api_key,
            model: config.models.text_model.clone(),
            api_base: config.models.api_base.clone(),
        };

        match GeminiTextProvider::new(gemini_config) {
            Ok(provider) => {
                tracing::info!(
                    model = %config.models.text_model,
                    "Initialized Gemini text provider"
                );
                Self::new(Some(Arc::new(provider)))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize Gemini text provider");
                Self::new(None)
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.provider.is_some()
    }

    /// Generate a plan for `query`. `existing_details` is accepted for API
    /// compatibility and does not influence the prompt.
    pub async fn generate_event_plan(
        &self,
        query: &str,
        existing_details: Option<&Value>,
    ) -> Result<GeneratedPlan, PlanError> {
        let result = self.generate(query, existing_details).await;
        metrics::record_plan_outcome(match &result {
            Ok(_) => "success",
            Err(e) => e.kind(),
        });
        result
    }

    async fn generate(
        &self,
        query: &str,
        existing_details: Option<&Value>,
    ) -> Result<GeneratedPlan, PlanError> {
        let provider = self.provider.as_ref().ok_or(PlanError::NotInitialized)?;

        if existing_details.is_some() {
            tracing::debug!("Ignoring existing_details; the prompt does not use them");
        }

        let prompt = build_prompt(query);

        tracing::info!(
            provider = provider.name(),
            model = provider.model(),
            query_len = query.len(),
            "Sending plan prompt to model"
        );

        let start = Instant::now();
        let response = provider
            .generate(&prompt, &GenerationParams::json())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Plan generation call failed");
                metrics::record_provider_error(provider.name(), e.kind());
                e
            })?;
        metrics::record_provider_call(
            provider.name(),
            provider.model(),
            start.elapsed().as_secs_f64(),
            response.input_tokens,
            response.output_tokens,
        );

        if response.finish_reason == FinishReason::Length {
            tracing::warn!(
                output_tokens = response.output_tokens,
                "Model output hit the token limit and may be truncated"
            );
        }

        let text = response.text.ok_or_else(|| {
            metrics::record_provider_error(provider.name(), ProviderError::EmptyResponse.kind());
            ProviderError::EmptyResponse
        })?;
        parse_plan(&text)
    }
}

/// Decode model output into a plan, rejecting anything that is not JSON or
/// does not have the plan's shape.
pub fn parse_plan(text: &str) -> Result<GeneratedPlan, PlanError> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        tracing::error!(error = %e, raw = %text, "Model output is not valid JSON");
        PlanError::InvalidFormat
    })?;

    let plan: GeneratedPlan = serde_json::from_value(value).map_err(|e| {
        tracing::error!(error = %e, "Model output does not match the plan schema");
        PlanError::SchemaMismatch(e.to_string())
    })?;

    plan.validate().map_err(|e| {
        tracing::error!(error = %e, "Model output failed plan validation");
        PlanError::SchemaMismatch(e.to_string())
    })?;

    Ok(plan)
}
