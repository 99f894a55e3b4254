use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use planstore::cli::{Cli, Command};
use planstore::config::Config;
use planstore::PlanStore;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("planstore starting");

    match cli.command {
        Command::List => {
            let store = PlanStore::open(&config.store_path)?;
            let summaries = store.find_all()?;
            if summaries.is_empty() {
                println!("No plans found");
            } else {
                for summary in summaries {
                    println!(
                        "{} {} ({})",
                        summary.id.cyan(),
                        summary.goal,
                        summary.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
                    );
                }
            }
        }
        Command::Show { id } => {
            let store = PlanStore::open(&config.store_path)?;
            match store.find_by_id(&id)? {
                Some(plan) => println!("{}", serde_json::to_string_pretty(&plan)?),
                None => eyre::bail!("Plan not found: {}", id),
            }
        }
        Command::Delete { id } => {
            let store = PlanStore::open(&config.store_path)?;
            if store.delete(&id)? {
                println!("{} Deleted plan: {}", "✓".green(), id);
            } else {
                eyre::bail!("Plan not found: {}", id);
            }
        }
    }

    Ok(())
}
