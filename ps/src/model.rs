//! Plan document model
//!
//! Field names on the wire stay camelCase (taskId, estimatedHours,
//! startDate) for compatibility with existing plan documents; `created_at`
//! is the one snake_case holdout from the original schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Task lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not-started"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// A single task within a plan
///
/// Dependencies reference other tasks in the same plan by `name`, not by
/// id. A rename breaks the edge; callers resolve names once per plan and
/// treat unresolved names as dangling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub task_id: String,
    pub name: String,
    pub description: String,
    pub estimated_hours: f64,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Plan timeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// A persisted plan document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    pub goal: String,
    #[serde(default)]
    pub timeframe: String,
    pub tasks: Vec<Task>,
    pub timeline: Timeline,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a plan; the store assigns id and created_at
#[derive(Debug, Clone)]
pub struct NewPlan {
    pub goal: String,
    pub timeframe: String,
    pub tasks: Vec<Task>,
    pub timeline: Timeline,
}

/// Listing projection: goal, timeframe, timeline, created_at
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub id: String,
    pub goal: String,
    #[serde(default)]
    pub timeframe: String,
    pub timeline: Timeline,
    pub created_at: DateTime<Utc>,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        Self {
            id: plan.id.clone(),
            goal: plan.goal.clone(),
            timeframe: plan.timeframe.clone(),
            timeline: plan.timeline.clone(),
            created_at: plan.created_at,
        }
    }
}
