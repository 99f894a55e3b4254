//! Prompt construction for the breakdown request
//!
//! The template is compiled into the binary from a .pmt file and rendered
//! with Handlebars. Purely textual; no retries or side effects.

use chrono::NaiveDate;
use eyre::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

/// Embedded task breakdown prompt
pub const BREAKDOWN: &str = include_str!("../../prompts/breakdown.pmt");

#[derive(Serialize)]
struct PromptData<'a> {
    goal: &'a str,
    timeframe: &'a str,
    timeframe_label: &'a str,
    today: String,
}

/// Render the breakdown prompt for a goal and optional timeframe
///
/// `today` is injected by the caller so generation is deterministic in
/// tests; the binary passes the current UTC date.
pub fn build_prompt(goal: &str, timeframe: &str, today: NaiveDate) -> Result<String> {
    debug!(goal_len = goal.len(), %timeframe, "build_prompt: called");

    let timeframe_label = if timeframe.is_empty() {
        "Not specified - use reasonable estimates"
    } else {
        timeframe
    };

    let mut registry = Handlebars::new();
    registry.register_escape_fn(handlebars::no_escape);

    let data = PromptData {
        goal,
        timeframe,
        timeframe_label,
        today: today.format("%Y-%m-%d").to_string(),
    };

    registry
        .render_template(BREAKDOWN, &data)
        .context("Failed to render breakdown prompt")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_first() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_prompt_embeds_goal_and_date() {
        let prompt = build_prompt("Learn Python programming", "1 month", june_first()).unwrap();

        assert!(prompt.contains("GOAL: Learn Python programming"));
        assert!(prompt.contains("TIMEFRAME: 1 month"));
        assert!(prompt.contains("current date as reference: 2025-06-01"));
        assert!(prompt.contains("within 1 month"));
    }

    #[test]
    fn test_prompt_without_timeframe() {
        let prompt = build_prompt("Launch a bakery", "", june_first()).unwrap();

        assert!(prompt.contains("TIMEFRAME: Not specified - use reasonable estimates"));
        assert!(!prompt.contains("within"));
    }

    #[test]
    fn test_prompt_states_output_contract() {
        let prompt = build_prompt("Get fit", "", june_first()).unwrap();

        assert!(prompt.contains("STRICT JSON ONLY"));
        assert!(prompt.contains("estimatedHours"));
        assert!(prompt.contains("5-8 tasks"));
        assert!(prompt.contains("1-8 hours per task"));
    }

    #[test]
    fn test_prompt_does_not_escape_goal() {
        let prompt = build_prompt("Read \"War & Peace\"", "", june_first()).unwrap();
        assert!(prompt.contains("Read \"War & Peace\""));
        assert!(!prompt.contains("&amp;"));
    }
}
