//! goalplanner - goal-to-task breakdown planner
//!
//! A user submits a free-text goal and an optional timeframe. The planner
//! asks an LLM provider to decompose the goal into dependent tasks with
//! estimates, deadlines, and priorities. When the provider is missing,
//! over quota, or returns unusable output, a deterministic rule-based
//! synthesizer produces the plan instead. Either way the caller gets a
//! usable plan; LLM failures never surface past the generator.

pub mod cli;
pub mod config;
pub mod llm;
pub mod planning;
