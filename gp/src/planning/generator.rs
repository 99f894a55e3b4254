//! Plan generation orchestrator
//!
//! Tries the LLM path once; any failure at all (no client, provider
//! error, unparsable or invalid output) branches to the deterministic
//! fallback. Fallback is total: there is no retry against the provider,
//! no per-task merging, and no failure mode of its own, so `generate`
//! always returns a usable plan.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use planstore::{Task, Timeline};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::analyzer::classify_goal;
use super::{dangling_dependencies, fallback, prompt, response};
use crate::llm::{LlmClient, LlmError};

/// Which path produced a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanSource {
    Llm,
    Fallback,
}

/// A normalized generation result, identical in shape for both paths
#[derive(Debug, Clone)]
pub struct GeneratedPlan {
    pub tasks: Vec<Task>,
    pub timeline: Timeline,
    pub source: PlanSource,
    /// Dangling dependency names and other non-fatal conditions
    pub warnings: Vec<String>,
}

/// Why the LLM attempt failed; consumed internally, never surfaced
#[derive(Debug, Error)]
enum AttemptError {
    #[error("no LLM client configured")]
    NotConfigured,

    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error(transparent)]
    Response(#[from] response::ResponseError),

    #[error("prompt rendering failed: {0}")]
    Prompt(String),
}

/// Orchestrates prompt → LLM → response processing with total fallback
pub struct PlanGenerator {
    llm: Option<Arc<dyn LlmClient>>,
}

impl PlanGenerator {
    /// Create a generator; pass None to force the fallback path
    pub fn new(llm: Option<Arc<dyn LlmClient>>) -> Self {
        Self { llm }
    }

    /// Generate a plan for a goal and optional timeframe
    ///
    /// Infallible by design: the caller validates the goal upstream, and
    /// every LLM-path error is converted into a fallback plan here.
    pub async fn generate(&self, goal: &str, timeframe: &str) -> GeneratedPlan {
        let now = Utc::now();
        self.generate_at(goal, timeframe, now).await
    }

    /// Generation with an injected "now" instant, for deterministic tests
    pub async fn generate_at(&self, goal: &str, timeframe: &str, now: DateTime<Utc>) -> GeneratedPlan {
        debug!(goal_len = goal.len(), %timeframe, "generate_at: called");

        let (tasks, timeline, source) = match self.attempt_llm(goal, timeframe, now).await {
            Ok((tasks, timeline)) => {
                info!(task_count = tasks.len(), "Plan generated via LLM");
                (tasks, timeline, PlanSource::Llm)
            }
            Err(e) => {
                // Silent total fallback: log and synthesize locally
                warn!(error = %e, "LLM path failed, using fallback generator");
                let category = classify_goal(goal);
                let (tasks, timeline) = fallback::synthesize(category, goal, timeframe, now);
                info!(?category, task_count = tasks.len(), "Plan generated via fallback");
                (tasks, timeline, PlanSource::Fallback)
            }
        };

        let warnings = dangling_dependencies(&tasks);
        for warning in &warnings {
            warn!(%warning, "generate_at: dangling dependency");
        }

        GeneratedPlan {
            tasks,
            timeline,
            source,
            warnings,
        }
    }

    /// One shot at the LLM path; every error routes to fallback
    async fn attempt_llm(
        &self,
        goal: &str,
        timeframe: &str,
        now: DateTime<Utc>,
    ) -> Result<(Vec<Task>, Timeline), AttemptError> {
        let llm = self.llm.as_ref().ok_or(AttemptError::NotConfigured)?;

        let prompt = prompt::build_prompt(goal, timeframe, now.date_naive())
            .map_err(|e| AttemptError::Prompt(e.to_string()))?;
        let raw = llm.generate(&prompt).await?;
        let processed = response::process_response(&raw, now)?;

        Ok(processed)
    }
}
