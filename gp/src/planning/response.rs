//! LLM response processing
//!
//! Takes the raw text returned by the provider and turns it into tasks
//! and a timeline, or a typed error. Recovery is limited to stripping
//! code fences and extracting the outermost brace-delimited substring;
//! anything beyond that is the orchestrator's problem (it falls back).

use chrono::{DateTime, NaiveDate, Utc};
use planstore::{Priority, Task, Timeline};
use regex::Regex;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use super::{finalize_tasks, TaskSeed};

/// How much of an unparsable response to keep for diagnostics
const SNIPPET_LEN: usize = 200;

/// Errors raised while processing an LLM response
#[derive(Debug, Error)]
pub enum ResponseError {
    #[error("Invalid JSON response from AI: {snippet}")]
    Parse { snippet: String },

    #[error("Invalid plan data: tasks array missing")]
    MissingTasks,

    #[error("Invalid plan data: tasks array is empty")]
    EmptyTasks,

    #[error("Invalid plan data: timeline missing")]
    MissingTimeline,

    #[error("Task {index} missing required fields")]
    TaskMissingFields { index: usize },

    #[error("Task {index} has negative estimated hours")]
    NegativeHours { index: usize },

    #[error("Invalid date in '{field}': {value}")]
    BadDate { field: String, value: String },

    #[error("Timeline end date precedes start date")]
    InvertedTimeline,
}

/// Process a raw LLM response into finalized tasks and a timeline
pub fn process_response(raw: &str, now: DateTime<Utc>) -> Result<(Vec<Task>, Timeline), ResponseError> {
    debug!(raw_len = raw.len(), "process_response: called");

    let cleaned = strip_code_fences(raw);
    let data = parse_json(&cleaned)?;
    let (seeds, timeline) = validate_plan_data(&data)?;

    Ok((finalize_tasks(seeds, now), timeline))
}

/// Remove Markdown code fence markers around the payload
pub fn strip_code_fences(raw: &str) -> String {
    let re = Regex::new(r"```json\n?|\n?```").expect("fence pattern is valid");
    re.replace_all(raw, "").trim().to_string()
}

/// Parse cleaned text as JSON, recovering the outermost braced substring
/// on failure
fn parse_json(cleaned: &str) -> Result<Value, ResponseError> {
    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        debug!("parse_json: parsed directly");
        return Ok(value);
    }

    // Greedy: first '{' to last '}', not nesting-aware, matches the
    // widest candidate
    if let (Some(start), Some(end)) = (cleaned.find('{'), cleaned.rfind('}'))
        && start < end
        && let Ok(value) = serde_json::from_str::<Value>(&cleaned[start..=end])
    {
        debug!("parse_json: extracted braced substring");
        return Ok(value);
    }

    Err(ResponseError::Parse {
        snippet: cleaned.chars().take(SNIPPET_LEN).collect(),
    })
}

/// Validate required fields and coerce into seeds plus timeline
fn validate_plan_data(data: &Value) -> Result<(Vec<TaskSeed>, Timeline), ResponseError> {
    let tasks = data
        .get("tasks")
        .and_then(Value::as_array)
        .ok_or(ResponseError::MissingTasks)?;

    if tasks.is_empty() {
        return Err(ResponseError::EmptyTasks);
    }

    let timeline_value = data.get("timeline").ok_or(ResponseError::MissingTimeline)?;
    let start_raw = timeline_value
        .get("startDate")
        .and_then(Value::as_str)
        .ok_or(ResponseError::MissingTimeline)?;
    let end_raw = timeline_value
        .get("endDate")
        .and_then(Value::as_str)
        .ok_or(ResponseError::MissingTimeline)?;

    let timeline = Timeline {
        start_date: parse_date("timeline.startDate", start_raw)?,
        end_date: parse_date("timeline.endDate", end_raw)?,
    };

    if timeline.end_date < timeline.start_date {
        return Err(ResponseError::InvertedTimeline);
    }

    let mut seeds = Vec::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        let name = non_empty_str(task.get("name"));
        let description = non_empty_str(task.get("description"));

        let (Some(name), Some(description)) = (name, description) else {
            return Err(ResponseError::TaskMissingFields { index });
        };

        let estimated_hours = task.get("estimatedHours").and_then(Value::as_f64).unwrap_or(0.0);
        if estimated_hours < 0.0 {
            return Err(ResponseError::NegativeHours { index });
        }

        let deadline = match task.get("deadline").and_then(Value::as_str) {
            Some(raw) => Some(parse_date(&format!("tasks[{index}].deadline"), raw)?),
            None => None,
        };

        let dependencies = task
            .get("dependencies")
            .and_then(Value::as_array)
            .map(|deps| deps.iter().filter_map(Value::as_str).map(String::from).collect())
            .unwrap_or_default();

        let priority = match task.get("priority").and_then(Value::as_str) {
            Some("high") => Priority::High,
            Some("low") => Priority::Low,
            _ => Priority::Medium,
        };

        seeds.push(TaskSeed {
            name: name.to_string(),
            description: description.to_string(),
            estimated_hours,
            dependencies,
            priority,
            deadline,
        });
    }

    Ok((seeds, timeline))
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())
}

/// Coerce a textual date: RFC 3339 first, then bare YYYY-MM-DD at
/// midnight UTC
fn parse_date(field: &str, raw: &str) -> Result<DateTime<Utc>, ResponseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is a valid time");
        return Ok(midnight.and_utc());
    }

    Err(ResponseError::BadDate {
        field: field.to_string(),
        value: raw.to_string(),
    })
}
