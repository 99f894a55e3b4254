//! Integration tests for goalplanner
//!
//! These tests verify end-to-end behavior of the generation pipeline and
//! the plan store working together.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use goalplanner::llm::{LlmClient, LlmError};
use goalplanner::planning::{PlanGenerator, PlanSource};
use planstore::{NewPlan, PlanStore};

/// Scripted LLM client for integration tests
struct ScriptedClient {
    response: Result<String, String>,
}

impl ScriptedClient {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            response: Ok(text.into()),
        }
    }

    fn failing(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
        }
    }
}

#[async_trait]
impl LlmClient for ScriptedClient {
    async fn generate(&self, _prompt: &str) -> Result<String, LlmError> {
        match &self.response {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(LlmError::InvalidResponse(message.clone())),
        }
    }
}

fn fixed_now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

fn valid_llm_payload() -> String {
    serde_json::json!({
        "tasks": [
            {
                "name": "Pick a route",
                "description": "Choose a training route with some elevation",
                "estimatedHours": 2,
                "deadline": "2025-06-05",
                "dependencies": [],
                "priority": "high"
            },
            {
                "name": "Run three times a week",
                "description": "Follow the schedule for four weeks",
                "estimatedHours": 20,
                "deadline": "2025-06-28",
                "dependencies": ["Pick a route"],
                "priority": "medium"
            }
        ],
        "timeline": { "startDate": "2025-06-01", "endDate": "2025-06-30" }
    })
    .to_string()
}

// =============================================================================
// Generation → persistence round trips
// =============================================================================

#[tokio::test]
async fn test_llm_plan_persisted_and_retrieved() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let store = PlanStore::open(temp.path()).unwrap();

    let generator = PlanGenerator::new(Some(Arc::new(ScriptedClient::ok(valid_llm_payload()))));
    let generated = generator.generate_at("Train for a 10k", "1 month", fixed_now()).await;
    assert_eq!(generated.source, PlanSource::Llm);

    let plan = store
        .create(NewPlan {
            goal: "Train for a 10k".to_string(),
            timeframe: "1 month".to_string(),
            tasks: generated.tasks,
            timeline: generated.timeline,
        })
        .unwrap();

    let found = store.find_by_id(&plan.id).unwrap().expect("plan should exist");
    assert_eq!(found.goal, "Train for a 10k");
    assert_eq!(found.tasks.len(), 2);
    assert_eq!(found.tasks[1].dependencies, vec!["Pick a route".to_string()]);
    assert!(found.timeline.end_date >= found.timeline.start_date);
}

#[tokio::test]
async fn test_fallback_plan_persisted_when_llm_fails() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let store = PlanStore::open(temp.path()).unwrap();

    let generator = PlanGenerator::new(Some(Arc::new(ScriptedClient::failing("provider down"))));
    let generated = generator
        .generate_at("Learn Python programming", "1 month", fixed_now())
        .await;

    assert_eq!(generated.source, PlanSource::Fallback);
    assert_eq!(generated.tasks.len(), 7);

    let plan = store
        .create(NewPlan {
            goal: "Learn Python programming".to_string(),
            timeframe: "1 month".to_string(),
            tasks: generated.tasks,
            timeline: generated.timeline,
        })
        .unwrap();

    let found = store.find_by_id(&plan.id).unwrap().unwrap();
    assert_eq!(found.tasks.len(), 7);
    assert_eq!((found.timeline.end_date - found.timeline.start_date).num_days(), 30);
}

#[tokio::test]
async fn test_fenced_response_missing_timeline_still_succeeds() {
    // Fence stripped, JSON parses, validation fails on timeline, and
    // the fallback produces the final plan
    let fenced = "```json\n{\"tasks\":[{\"name\":\"a\",\"description\":\"b\"}]}\n```";
    let generator = PlanGenerator::new(Some(Arc::new(ScriptedClient::ok(fenced))));

    let plan = generator.generate_at("Launch a bakery", "", fixed_now()).await;

    assert_eq!(plan.source, PlanSource::Fallback);
    assert_eq!(plan.tasks.len(), 6); // business template
    assert!(plan.timeline.end_date >= plan.timeline.start_date);
}

#[tokio::test]
async fn test_both_paths_produce_identical_shape() {
    let llm_generator = PlanGenerator::new(Some(Arc::new(ScriptedClient::ok(valid_llm_payload()))));
    let fallback_generator = PlanGenerator::new(None);

    let llm_plan = llm_generator.generate_at("anything", "", fixed_now()).await;
    let fb_plan = fallback_generator.generate_at("anything", "", fixed_now()).await;

    for task in llm_plan.tasks.iter().chain(fb_plan.tasks.iter()) {
        assert!(task.task_id.starts_with("task_"));
        assert!(!task.name.is_empty());
        assert!(!task.description.is_empty());
        assert!(task.estimated_hours >= 0.0);
        assert_eq!(task.status, planstore::TaskStatus::NotStarted);
    }
}

// =============================================================================
// Store behavior at the API boundary
// =============================================================================

#[test]
fn test_delete_missing_plan_reports_not_found() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let store = PlanStore::open(temp.path()).unwrap();

    let deleted = store.delete("0199a7e0-0000-7000-8000-000000000000").unwrap();
    assert!(!deleted);
}

#[tokio::test]
async fn test_list_returns_summaries_newest_first() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let store = PlanStore::open(temp.path()).unwrap();
    let generator = PlanGenerator::new(None);

    for goal in ["first goal", "second goal"] {
        let generated = generator.generate_at(goal, "", fixed_now()).await;
        store
            .create(NewPlan {
                goal: goal.to_string(),
                timeframe: String::new(),
                tasks: generated.tasks,
                timeline: generated.timeline,
            })
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
    }

    let summaries = store.find_all().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].goal, "second goal");
    assert_eq!(summaries[1].goal, "first goal");
}
