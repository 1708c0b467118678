//! airwaves - Content store for a radio/TV station website
//!
//! Keeps the editorial records behind a station's public site in one
//! SQLite database: content pages, staff bios and their job categories,
//! announcements, programs, and the weekly radio and TV schedules.
//!
//! # Architecture
//!
//! - Records are plain structs with field rules (`Validate`)
//! - A single `Store` owns the connection; every write is validated and
//!   runs in a transaction
//! - Foreign keys are enforced by SQLite: deleting a job category or a
//!   producer clears the reference, deleting a program removes its slots
//! - Deleting a bio first credits its unauthored articles to the bio's name
//!
//! # Modules
//!
//! - `domain`: Records, ids, slugs, broadcast days, validation
//! - `store`: SQLite persistence and the bio deletion cascade
//! - `config`: Configuration resolution
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! airwaves init
//! airwaves program add "Morning Show" -d "News and music"
//! airwaves schedule add 1 weekdays 06:00 09:00 --medium radio
//! airwaves bio delete 3
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod store;

// Re-export main types at crate root for convenience
pub use domain::{
    Announcement, Article, Bio, Content, Day, JobCategory, Medium, Program, ScheduleSlot,
    ValidationError,
};
pub use store::{CascadeReport, Store, StoreError, StoreResult, StoreSettings};
