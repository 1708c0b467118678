//! Program and schedule subcommands.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use chrono::NaiveTime;
use clap::Subcommand;

use crate::config;
use crate::domain::{
    BioId, Day, Medium, NewProgram, NewScheduleSlot, Permalink, Program, ProgramId,
    ScheduleSlotId,
};
use crate::store::Store;

use super::{or_dash, print_json, truncate};

/// Program subcommands
#[derive(Subcommand, Debug)]
pub enum ProgramCommands {
    /// Add a program (its slug is derived from the title)
    Add {
        /// Program title (must be unique)
        title: String,

        /// Description (rich text)
        #[arg(short, long, default_value = "")]
        description: String,

        /// Producing staff member (bio ID)
        #[arg(short, long)]
        producer: Option<BioId>,

        /// Free-text producer credit
        #[arg(long)]
        producer_name: Option<String>,

        /// External link
        #[arg(long)]
        link: Option<String>,
    },

    /// List programs alphabetically
    List {
        /// Only programs produced by this bio
        #[arg(short, long)]
        producer: Option<BioId>,
    },

    /// Show a program by ID or slug, with its schedule
    Show {
        /// Program ID or slug
        key: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a program and its schedule slots
    Delete {
        /// Program ID
        id: ProgramId,
    },
}

/// Schedule subcommands
#[derive(Subcommand, Debug)]
pub enum ScheduleCommands {
    /// Add a schedule slot
    Add {
        /// Program ID
        program: ProgramId,

        /// Day: weekday name, daily, weekdays, weekends, or code -3..6
        #[arg(allow_hyphen_values = true)]
        day: Day,

        /// Start time (HH:MM)
        #[arg(value_parser = parse_time)]
        start: NaiveTime,

        /// End time (HH:MM)
        #[arg(value_parser = parse_time)]
        end: NaiveTime,

        /// Which schedule: radio or tv
        #[arg(short, long, default_value = "radio")]
        medium: Medium,
    },

    /// List a schedule
    List {
        /// Which schedule: radio or tv
        #[arg(short, long, default_value = "radio")]
        medium: Medium,

        /// Only slots of this program
        #[arg(short, long)]
        program: Option<ProgramId>,
    },

    /// Delete a schedule slot
    Delete {
        /// Slot ID
        id: ScheduleSlotId,
    },
}

pub fn execute_program(store: &mut Store, command: ProgramCommands) -> Result<()> {
    match command {
        ProgramCommands::Add {
            title,
            description,
            producer,
            producer_name,
            link,
        } => {
            let mut new = NewProgram::new(title, description);
            if let Some(producer) = producer {
                new = new.produced_by(producer);
            }
            if let Some(producer_name) = producer_name {
                new = new.with_producer_name(producer_name);
            }
            if let Some(link) = link {
                new = new.with_link(link);
            }

            let program = store.create_program(new)?;
            eprintln!("Created program {}: {}", program.id, program.title);
            eprintln!("   Slug: {}", or_dash(program.slug.as_deref()));
            Ok(())
        }
        ProgramCommands::List { producer } => {
            let programs = match producer {
                Some(producer) => store.programs_by_producer(producer)?,
                None => store.list_programs()?,
            };
            if programs.is_empty() {
                println!("No programs");
                return Ok(());
            }

            println!("{:<6} {:<40} {:<30}", "ID", "TITLE", "SLUG");
            println!("{}", "-".repeat(78));
            for program in &programs {
                println!(
                    "{:<6} {:<40} {:<30}",
                    program.id,
                    truncate(&program.title, 40),
                    truncate(or_dash(program.slug.as_deref()), 30)
                );
            }
            println!("\nTotal: {} programs", programs.len());
            Ok(())
        }
        ProgramCommands::Show { key, json } => {
            let program = find_program(store, &key)?;
            if json {
                return print_json(&program);
            }

            let template = &config::config()?.permalinks.program;
            let producer = match program.producer {
                Some(id) => store.get_bio(id)?,
                None => None,
            };

            println!("ID: {}", program.id);
            println!("Title: {}", program.title);
            println!("Slug: {}", or_dash(program.slug.as_deref()));
            println!("URL: {}", or_dash(program.permalink(template).as_deref()));
            println!("Producer: {}", or_dash(program.producer_credit(producer.as_ref())));
            println!("Link: {}", or_dash(program.link.as_deref()));

            for medium in [Medium::Radio, Medium::Tv] {
                let slots = store.slots_for_program(program.id, Some(medium))?;
                if slots.is_empty() {
                    continue;
                }
                println!("\n{} schedule:", medium);
                for slot in &slots {
                    println!("  {}", slot);
                }
            }

            if !program.description.is_empty() {
                println!("\n{}", program.description);
            }
            Ok(())
        }
        ProgramCommands::Delete { id } => {
            store.delete_program(id)?;
            eprintln!("Deleted program {}", id);
            Ok(())
        }
    }
}

pub fn execute_schedule(store: &mut Store, command: ScheduleCommands) -> Result<()> {
    match command {
        ScheduleCommands::Add {
            program,
            day,
            start,
            end,
            medium,
        } => {
            let slot = store.create_slot(NewScheduleSlot::new(program, medium, day, start, end))?;
            eprintln!("Created {} slot {}: {}", slot.medium, slot.id, slot);
            Ok(())
        }
        ScheduleCommands::List { medium, program } => {
            let slots = match program {
                Some(program) => store.slots_for_program(program, Some(medium))?,
                None => store.list_slots(medium)?,
            };
            if slots.is_empty() {
                println!("The {} schedule is empty", medium);
                return Ok(());
            }

            let titles: HashMap<ProgramId, String> = store
                .list_programs()?
                .into_iter()
                .map(|p| (p.id, p.title))
                .collect();

            println!("{:<6} {:<11} {:<12} {:<40}", "ID", "DAY", "TIME", "PROGRAM");
            println!("{}", "-".repeat(72));
            let mut group = None;
            for slot in &slots {
                if group != Some(slot.day.group()) {
                    group = Some(slot.day.group());
                    println!("[{}]", slot.day.group().label());
                }
                let title = titles.get(&slot.program).map(String::as_str).unwrap_or("?");
                println!(
                    "{:<6} {:<11} {:<12} {:<40}",
                    slot.id,
                    slot.day,
                    format!("{}-{}", slot.start_time.format("%H:%M"), slot.end_time.format("%H:%M")),
                    truncate(title, 40)
                );
            }
            Ok(())
        }
        ScheduleCommands::Delete { id } => {
            store.delete_slot(id)?;
            eprintln!("Deleted schedule slot {}", id);
            Ok(())
        }
    }
}

/// Parse "HH:MM" or "HH:MM:SS"
fn parse_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .with_context(|| format!("Invalid time '{}', expected HH:MM", s))
}

fn find_program(store: &Store, key: &str) -> Result<Program> {
    let found = match key.parse::<ProgramId>() {
        Ok(id) => store.get_program(id)?,
        Err(_) => store.get_program_by_slug(key)?,
    };
    match found {
        Some(program) => Ok(program),
        None => bail!("Program not found: {}", key),
    }
}
