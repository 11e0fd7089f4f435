// ABOUTME: Adherence CLI - command-line tool for running weekly checks and managing plans
// ABOUTME: Handles schema setup, single and batch weekly checks, adjustment plans, and flag listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Create or upgrade the database schema
//! adherence-cli migrate
//!
//! # Check one user against the current week
//! adherence-cli check --user 6f1c...
//!
//! # Check one user against the week containing a date
//! adherence-cli check --user 6f1c... --week-start 2025-03-10
//!
//! # Check every user with an active program
//! adherence-cli check-all
//!
//! # Plan a four-week chest ramp from 10 to 18 sets
//! adherence-cli plan create --user 6f1c... --muscle chest --current 10 --target 18
//!
//! # List a user's active plans, then complete one
//! adherence-cli plan list --user 6f1c... --status active
//! adherence-cli plan complete 2b9e...
//!
//! # List a user's open flags
//! adherence-cli flags list --user 6f1c... --status alerted
//! ```

mod commands;
mod helpers;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::info;
use training_adherence::config::MonitorConfig;
use training_adherence::database::Database;
use training_adherence::logging::LoggingConfig;
use training_adherence::models::{FlagStatus, PlanStatus};
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "adherence-cli",
    about = "Training Adherence Monitor CLI",
    long_about = "Runs weekly program adherence checks and manages volume adjustment plans."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Create or upgrade the database schema
    Migrate,

    /// Run the weekly check for one user
    Check {
        /// User id
        #[arg(long)]
        user: Uuid,

        /// Any date inside the week to check (defaults to the current week)
        #[arg(long)]
        week_start: Option<NaiveDate>,
    },

    /// Run the weekly check for every user with an active program
    CheckAll,

    /// Volume adjustment plan commands
    Plan {
        #[command(subcommand)]
        action: PlanCommand,
    },

    /// Adherence flag commands
    Flags {
        #[command(subcommand)]
        action: FlagsCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum PlanCommand {
    /// Create a new plan
    Create {
        /// User id
        #[arg(long)]
        user: Uuid,

        /// Muscle group (e.g. chest, hamstrings, quads)
        #[arg(long)]
        muscle: String,

        /// Current weekly sets
        #[arg(long, allow_negative_numbers = true)]
        current: i64,

        /// Target weekly sets
        #[arg(long, allow_negative_numbers = true)]
        target: i64,

        /// Plan length in weeks, 1 to 52 (default: 4)
        #[arg(long)]
        weeks: Option<i64>,
    },

    /// List a user's plans
    List {
        /// User id
        #[arg(long)]
        user: Uuid,

        /// Only plans with this status (active, completed, cancelled)
        #[arg(long, value_parser = parse_plan_status)]
        status: Option<PlanStatus>,
    },

    /// Mark an active plan completed
    Complete {
        /// Plan id
        plan_id: Uuid,
    },

    /// Cancel an active plan
    Cancel {
        /// Plan id
        plan_id: Uuid,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum FlagsCommand {
    /// List a user's adherence flags
    List {
        /// User id
        #[arg(long)]
        user: Uuid,

        /// Only flags with this status (monitoring, alerted, resolved)
        #[arg(long, value_parser = parse_flag_status)]
        status: Option<FlagStatus>,
    },
}

fn parse_plan_status(raw: &str) -> std::result::Result<PlanStatus, String> {
    PlanStatus::parse(&raw.to_lowercase())
        .ok_or_else(|| format!("unknown plan status '{raw}' (active, completed, cancelled)"))
}

fn parse_flag_status(raw: &str) -> std::result::Result<FlagStatus, String> {
    FlagStatus::parse(&raw.to_lowercase())
        .ok_or_else(|| format!("unknown flag status '{raw}' (monitoring, alerted, resolved)"))
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is normal outside development
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = MonitorConfig::from_env()?;
    if let Some(url) = cli.database_url {
        config.database.url = url;
    }
    info!("{}", config.summary());

    let database = Database::connect(&config.database.url, config.database.max_connections).await?;
    let json = cli.json;

    match cli.command {
        Command::Migrate => {
            info!("Database schema is up to date");
        }
        Command::Check { user, week_start } => {
            commands::check::run_one(&database, &config.check, user, week_start, json).await?;
        }
        Command::CheckAll => {
            commands::check::run_all(&database, &config.check, json).await?;
        }
        Command::Plan { action } => match action {
            PlanCommand::Create {
                user,
                muscle,
                current,
                target,
                weeks,
            } => {
                commands::plan::create(&database, user, &muscle, current, target, weeks, json)
                    .await?;
            }
            PlanCommand::List { user, status } => {
                commands::plan::list(&database, user, status, json).await?;
            }
            PlanCommand::Complete { plan_id } => {
                commands::plan::close(&database, plan_id, PlanStatus::Completed, json).await?;
            }
            PlanCommand::Cancel { plan_id } => {
                commands::plan::close(&database, plan_id, PlanStatus::Cancelled, json).await?;
            }
        },
        Command::Flags { action } => match action {
            FlagsCommand::List { user, status } => {
                commands::flags::list(&database, user, status, json).await?;
            }
        },
    }

    Ok(())
}
