//! Command-line interface for airwaves.
//!
//! Provides commands for initializing a store, inspecting the resolved
//! configuration, and managing site content, staff, programs and the
//! radio/TV schedules.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use crate::config;
use crate::store::Store;

pub mod programs;
pub mod site;
pub mod staff;

/// airwaves - Content store for a radio/TV station website
#[derive(Parser, Debug)]
#[command(name = "airwaves")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides configuration)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the database and apply migrations
    Init,

    /// Show resolved configuration (debug)
    Config,

    /// Manage editorial content pages
    Content {
        #[command(subcommand)]
        command: site::ContentCommands,
    },

    /// Manage job categories
    Category {
        #[command(subcommand)]
        command: staff::CategoryCommands,
    },

    /// Manage staff bios
    Bio {
        #[command(subcommand)]
        command: staff::BioCommands,
    },

    /// Manage announcements
    Announcement {
        #[command(subcommand)]
        command: site::AnnouncementCommands,
    },

    /// Manage programs
    Program {
        #[command(subcommand)]
        command: programs::ProgramCommands,
    },

    /// Manage the radio and TV schedules
    Schedule {
        #[command(subcommand)]
        command: programs::ScheduleCommands,
    },

    /// Manage article bylines
    Article {
        #[command(subcommand)]
        command: staff::ArticleCommands,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        match self.command {
            Commands::Init => init(self.db),
            Commands::Config => show_config(),
            Commands::Content { command } => site::execute_content(&mut open_store(self.db)?, command),
            Commands::Category { command } => {
                staff::execute_category(&mut open_store(self.db)?, command)
            }
            Commands::Bio { command } => staff::execute_bio(&mut open_store(self.db)?, command),
            Commands::Announcement { command } => {
                site::execute_announcement(&mut open_store(self.db)?, command)
            }
            Commands::Program { command } => {
                programs::execute_program(&mut open_store(self.db)?, command)
            }
            Commands::Schedule { command } => {
                programs::execute_schedule(&mut open_store(self.db)?, command)
            }
            Commands::Article { command } => {
                staff::execute_article(&mut open_store(self.db)?, command)
            }
        }
    }
}

/// Open the store at `--db` or the configured path, creating its directory
fn open_store(db: Option<PathBuf>) -> Result<Store> {
    let cfg = config::config()?;
    let path = db.unwrap_or_else(|| cfg.database.clone());

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    debug!(path = %path.display(), "Using database");
    Store::open_with(&path, &cfg.store)
        .with_context(|| format!("Failed to open store: {}", path.display()))
}

fn init(db: Option<PathBuf>) -> Result<()> {
    let path = match &db {
        Some(path) => path.clone(),
        None => config::database_path()?,
    };
    let store = open_store(db)?;

    eprintln!("Store ready at {}", path.display());
    eprintln!("   Schema version: {}", store.schema_version()?);
    Ok(())
}

fn show_config() -> Result<()> {
    let cfg = config::config()?;

    println!("airwaves configuration");
    println!("{}", "=".repeat(40));
    println!(
        "Config file: {}",
        cfg.config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home:     {}", cfg.home.display());
    println!("  Database: {}", cfg.database.display());
    println!();
    println!("Store:");
    println!("  Busy timeout: {}ms", cfg.store.busy_timeout.as_millis());
    println!();
    println!("Permalinks:");
    println!("  Bio:     {}", cfg.permalinks.bio);
    println!("  Program: {}", cfg.permalinks.program);
    println!("  Content: {}", cfg.permalinks.content);

    Ok(())
}

/// Print a record as pretty JSON
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Shorten `text` to `max` characters for table output
pub(crate) fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}

/// Display an optional field, with `-` for unset
pub(crate) fn or_dash(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}
