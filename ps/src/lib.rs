//! planstore - document store for generated goal plans
//!
//! Each plan is persisted as a single JSON document: the goal, its task
//! breakdown, and a timeline. Plans are created and deleted as one unit;
//! tasks are never written independently.

pub mod cli;
pub mod config;
pub mod model;
pub mod store;

pub use model::{NewPlan, Plan, PlanSummary, Priority, Task, TaskStatus, Timeline};
pub use store::PlanStore;

/// Maximum number of plans returned by a listing
pub const DEFAULT_LIST_LIMIT: usize = 50;
