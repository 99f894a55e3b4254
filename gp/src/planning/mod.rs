//! Plan generation pipeline
//!
//! goal → (prompt → LLM → response processing) or (analyzer → fallback
//! synthesizer) → normalized plan. Both paths feed the same finalization
//! so the output shape is identical either way.

use chrono::{DateTime, Duration, Utc};
use planstore::{Task, TaskStatus};

pub mod analyzer;
pub mod fallback;
pub mod generator;
pub mod prompt;
pub mod response;

pub use analyzer::{analyze_goal, classify_goal, GoalCategory, GoalSignals};
pub use generator::{GeneratedPlan, PlanGenerator, PlanSource};
pub use planstore::Priority;
pub use response::ResponseError;

/// A task before ids, deadlines, and status are assigned
///
/// Both the fallback templates and validated LLM output reduce to seeds;
/// `finalize_tasks` turns them into persisted-shape tasks.
#[derive(Debug, Clone)]
pub struct TaskSeed {
    pub name: String,
    pub description: String,
    pub estimated_hours: f64,
    pub dependencies: Vec<String>,
    pub priority: Priority,
    /// Deadline supplied by the LLM; fallback seeds leave this unset and
    /// get the index-based default
    pub deadline: Option<DateTime<Utc>>,
}

/// Assign task ids, deadlines, and initial status
///
/// Ids are `task_<unix_millis>_<index>`; a seed without a deadline gets
/// now + (index+1) × 3 days.
pub fn finalize_tasks(seeds: Vec<TaskSeed>, now: DateTime<Utc>) -> Vec<Task> {
    let millis = now.timestamp_millis();

    seeds
        .into_iter()
        .enumerate()
        .map(|(index, seed)| Task {
            task_id: format!("task_{}_{}", millis, index),
            name: seed.name,
            description: seed.description,
            estimated_hours: seed.estimated_hours,
            deadline: seed
                .deadline
                .unwrap_or_else(|| now + Duration::days(3 * (index as i64 + 1))),
            dependencies: seed.dependencies,
            priority: seed.priority,
            status: TaskStatus::NotStarted,
        })
        .collect()
}

/// Validate a goal before generation is invoked
///
/// Empty (after trimming) and over-length goals are rejected here, at
/// the request boundary; generation itself never sees them. Length is
/// counted in characters, not bytes, so multi-byte text is not penalized.
pub fn validate_goal(goal: &str, max_length: usize) -> eyre::Result<()> {
    if goal.trim().is_empty() {
        eyre::bail!("Goal is required and cannot be empty");
    }
    if goal.chars().count() > max_length {
        eyre::bail!("Goal is too long. Maximum {} characters allowed.", max_length);
    }
    Ok(())
}

/// Collect dependency names that do not match any task name in the plan
///
/// The name-based dependency contract is preserved as-is; unresolvable
/// names are reported rather than silently dropped.
pub fn dangling_dependencies(tasks: &[Task]) -> Vec<String> {
    let mut dangling = Vec::new();
    for task in tasks {
        for dep in &task.dependencies {
            if !tasks.iter().any(|t| &t.name == dep) {
                dangling.push(format!("task '{}' depends on unknown task '{}'", task.name, dep));
            }
        }
    }
    dangling
}
