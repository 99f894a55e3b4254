//! File-backed plan store
//!
//! One JSON document per plan under the base directory, named by plan id.
//! UUIDv7 ids sort by creation time, which keeps directory listings cheap.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use eyre::{Context, Result};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::model::{NewPlan, Plan, PlanSummary};
use crate::DEFAULT_LIST_LIMIT;

/// The plan document store
pub struct PlanStore {
    base_path: PathBuf,
}

impl PlanStore {
    /// Open or create a plan store at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).context("Failed to create store directory")?;
        debug!(?base_path, "Opened plan store");
        Ok(Self { base_path })
    }

    /// Persist a new plan, assigning its id and creation timestamp
    pub fn create(&self, new_plan: NewPlan) -> Result<Plan> {
        let plan = Plan {
            id: Uuid::now_v7().to_string(),
            goal: new_plan.goal.trim().to_string(),
            timeframe: new_plan.timeframe,
            tasks: new_plan.tasks,
            timeline: new_plan.timeline,
            created_at: Utc::now(),
        };

        let path = self.plan_path(&plan.id);
        let content = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
        fs::write(&path, content).context(format!("Failed to write plan: {}", path.display()))?;

        info!(plan_id = %plan.id, task_count = plan.tasks.len(), "Plan saved");
        Ok(plan)
    }

    /// Fetch a plan by id; None when no document exists
    pub fn find_by_id(&self, id: &str) -> Result<Option<Plan>> {
        let path = self.plan_path(id);
        if !path.exists() {
            debug!(%id, "find_by_id: no document");
            return Ok(None);
        }

        let content = fs::read_to_string(&path).context(format!("Failed to read plan: {}", path.display()))?;
        let plan: Plan = serde_json::from_str(&content).context("Failed to parse plan document")?;
        Ok(Some(plan))
    }

    /// List plan summaries, newest first, capped at DEFAULT_LIST_LIMIT
    pub fn find_all(&self) -> Result<Vec<PlanSummary>> {
        let mut summaries = Vec::new();

        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                let content = fs::read_to_string(&path)?;
                // A corrupt document degrades the listing, not kills it
                match serde_json::from_str::<Plan>(&content) {
                    Ok(plan) => summaries.push(PlanSummary::from(&plan)),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping corrupt plan document");
                    }
                }
            }
        }

        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        summaries.truncate(DEFAULT_LIST_LIMIT);

        debug!(count = summaries.len(), "find_all: listed plans");
        Ok(summaries)
    }

    /// Delete a plan by id; returns false when no document existed
    pub fn delete(&self, id: &str) -> Result<bool> {
        let path = self.plan_path(id);
        if !path.exists() {
            debug!(%id, "delete: no document");
            return Ok(false);
        }

        fs::remove_file(&path).context(format!("Failed to delete plan: {}", path.display()))?;
        info!(plan_id = %id, "Plan deleted");
        Ok(true)
    }

    fn plan_path(&self, id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, Timeline};
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn sample_plan(goal: &str) -> NewPlan {
        let now = Utc::now();
        NewPlan {
            goal: goal.to_string(),
            timeframe: "2 weeks".to_string(),
            tasks: vec![Task {
                task_id: "task_0_0".to_string(),
                name: "First step".to_string(),
                description: "Do the first thing".to_string(),
                estimated_hours: 3.0,
                deadline: now + Duration::days(3),
                dependencies: vec![],
                priority: Default::default(),
                status: Default::default(),
            }],
            timeline: Timeline {
                start_date: now,
                end_date: now + Duration::days(14),
            },
        }
    }

    #[test]
    fn test_create_and_find() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        let plan = store.create(sample_plan("  Learn Rust  ")).unwrap();
        assert_eq!(plan.goal, "Learn Rust"); // trimmed on create
        assert!(!plan.id.is_empty());

        let found = store.find_by_id(&plan.id).unwrap().unwrap();
        assert_eq!(found.goal, plan.goal);
        assert_eq!(found.tasks.len(), 1);
        assert_eq!(found.tasks[0].name, "First step");
    }

    #[test]
    fn test_find_by_id_missing() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        let found = store.find_by_id("0199a7e0-0000-7000-8000-000000000000").unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_find_all_sorted_newest_first() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        store.create(sample_plan("first")).unwrap();
        std::thread::sleep(std::time::Duration::from_millis(5));
        store.create(sample_plan("second")).unwrap();

        let summaries = store.find_all().unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].goal, "second");
        assert_eq!(summaries[1].goal, "first");
    }

    #[test]
    fn test_find_all_skips_corrupt_documents() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        store.create(sample_plan("good plan")).unwrap();
        std::fs::write(temp.path().join("broken.json"), "{not json").unwrap();

        let summaries = store.find_all().unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].goal, "good plan");
    }

    #[test]
    fn test_delete_missing_returns_false() {
        let temp = TempDir::new().unwrap();
        let store = PlanStore::open(temp.path()).unwrap();

        let plan = store.create(sample_plan("keep me")).unwrap();
        assert!(!store.delete("0199a7e0-0000-7000-8000-000000000000").unwrap());

        // No state change: the existing plan is still there
        assert!(store.find_by_id(&plan.id).unwrap().is_some());

        assert!(store.delete(&plan.id).unwrap());
        assert!(store.find_by_id(&plan.id).unwrap().is_none());
    }
}
