//! goalplanner - goal-to-task breakdown planner
//!
//! CLI entry point. Plays the API-layer role: validates the request
//! shape, runs generation, persists the result, and maps store misses to
//! user-facing errors. LLM failures never reach this layer.

use std::sync::Arc;

use clap::Parser;
use colored::*;
use eyre::{bail, Context, Result};
use tracing::{info, warn};
use uuid::Uuid;

use goalplanner::cli::{Cli, Command};
use goalplanner::config::Config;
use goalplanner::llm::{create_client, LlmClient};
use goalplanner::planning::{PlanGenerator, PlanSource};
use planstore::{NewPlan, Plan, PlanStore};

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    let level = match cli_log_level.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") => tracing::Level::INFO,
        Some("WARN") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => bail!("Invalid log level: {}", other),
        None => tracing::Level::WARN,
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Generate { goal, timeframe } => generate(&config, &goal, &timeframe).await,
        Command::List => list(&config),
        Command::Show { id } => show(&config, &id),
        Command::Delete { id } => delete(&config, &id),
    }
}

async fn generate(config: &Config, goal: &str, timeframe: &str) -> Result<()> {
    // Request validation happens before generation is ever invoked
    goalplanner::planning::validate_goal(goal, config.generation.max_goal_length)?;

    let client: Option<Arc<dyn LlmClient>> = if config.llm.is_configured() {
        match create_client(&config.llm) {
            Ok(client) => Some(client),
            Err(e) => {
                // Missing/misconfigured provider is not fatal: the
                // generator falls back
                warn!(error = %e, "LLM client unavailable");
                None
            }
        }
    } else {
        info!(env = %config.llm.api_key_env, "No API key configured, using fallback generator");
        None
    };

    let generator = PlanGenerator::new(client);
    let generated = generator.generate(goal, timeframe).await;

    let store = PlanStore::open(&config.storage.store_path)?;
    let plan = store.create(NewPlan {
        goal: goal.to_string(),
        timeframe: timeframe.to_string(),
        tasks: generated.tasks,
        timeline: generated.timeline,
    })?;

    let source_label = match generated.source {
        PlanSource::Llm => "AI-generated".to_string(),
        PlanSource::Fallback => "rule-based".to_string(),
    };
    println!("{} Plan created ({}): {}", "✓".green(), source_label, plan.id.cyan());
    print_plan(&plan);

    for warning in &generated.warnings {
        println!("{} {}", "warning:".yellow(), warning);
    }

    Ok(())
}

fn list(config: &Config) -> Result<()> {
    let store = PlanStore::open(&config.storage.store_path)?;
    let summaries = store.find_all()?;

    if summaries.is_empty() {
        println!("No plans found");
        return Ok(());
    }

    for summary in summaries {
        println!(
            "{} {} {}",
            summary.id.cyan(),
            summary.goal,
            format!(
                "({} → {})",
                summary.timeline.start_date.format("%Y-%m-%d"),
                summary.timeline.end_date.format("%Y-%m-%d")
            )
            .dimmed()
        );
    }

    Ok(())
}

fn show(config: &Config, id: &str) -> Result<()> {
    validate_plan_id(id)?;

    let store = PlanStore::open(&config.storage.store_path)?;
    match store.find_by_id(id)? {
        Some(plan) => {
            print_plan(&plan);
            Ok(())
        }
        None => bail!("Plan not found: {}", id),
    }
}

fn delete(config: &Config, id: &str) -> Result<()> {
    validate_plan_id(id)?;

    let store = PlanStore::open(&config.storage.store_path)?;
    if store.delete(id)? {
        println!("{} Deleted plan: {}", "✓".green(), id);
        Ok(())
    } else {
        bail!("Plan not found: {}", id);
    }
}

/// Reject malformed ids before the store is consulted
fn validate_plan_id(id: &str) -> Result<()> {
    Uuid::parse_str(id).map_err(|_| eyre::eyre!("Invalid plan ID: {}", id))?;
    Ok(())
}

fn print_plan(plan: &Plan) {
    println!();
    println!("{} {}", "Goal:".bold(), plan.goal);
    if !plan.timeframe.is_empty() {
        println!("{} {}", "Timeframe:".bold(), plan.timeframe);
    }
    println!(
        "{} {} → {}",
        "Timeline:".bold(),
        plan.timeline.start_date.format("%Y-%m-%d"),
        plan.timeline.end_date.format("%Y-%m-%d")
    );
    println!();

    for (i, task) in plan.tasks.iter().enumerate() {
        let priority = match task.priority {
            planstore::Priority::High => "high".red(),
            planstore::Priority::Medium => "medium".yellow(),
            planstore::Priority::Low => "low".green(),
        };
        println!(
            "{:>2}. {} [{}] {}h, due {}",
            i + 1,
            task.name.bold(),
            priority,
            task.estimated_hours,
            task.deadline.format("%Y-%m-%d")
        );
        println!("    {}", task.description.dimmed());
        if !task.dependencies.is_empty() {
            println!("    {} {}", "after:".dimmed(), task.dependencies.join(", ").dimmed());
        }
    }
}
