//! Content page and announcement subcommands.

use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::config;
use crate::domain::{AnnouncementId, Content, ContentId, NewAnnouncement, NewContent, Permalink};
use crate::store::Store;

use super::{or_dash, print_json, truncate};

/// Content page subcommands
#[derive(Subcommand, Debug)]
pub enum ContentCommands {
    /// Add a content page
    Add {
        /// Page title
        title: String,

        /// Page body (rich text)
        #[arg(short, long, default_value = "")]
        text: String,

        /// Image reference
        #[arg(long)]
        image: Option<String>,

        /// Explicit slug (derived from the title if omitted)
        #[arg(long)]
        slug: Option<String>,
    },

    /// List content pages
    List,

    /// Show a content page by ID or slug
    Show {
        /// Content ID or slug
        key: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a content page
    Delete {
        /// Content ID
        id: ContentId,
    },
}

/// Announcement subcommands
#[derive(Subcommand, Debug)]
pub enum AnnouncementCommands {
    /// Add an announcement
    Add {
        /// Headline
        title: String,

        /// Body (rich text)
        #[arg(short, long, default_value = "")]
        text: String,

        /// Publication date (RFC 3339, e.g. 2024-05-01T08:00:00Z)
        #[arg(long)]
        pub_date: Option<DateTime<Utc>>,

        /// Image reference
        #[arg(long)]
        image: Option<String>,

        /// Store as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// List announcements
    List {
        /// Only active announcements, newest first
        #[arg(long)]
        active: bool,
    },

    /// Delete an announcement
    Delete {
        /// Announcement ID
        id: AnnouncementId,
    },
}

pub fn execute_content(store: &mut Store, command: ContentCommands) -> Result<()> {
    match command {
        ContentCommands::Add {
            title,
            text,
            image,
            slug,
        } => {
            let mut new = NewContent::new(title, text);
            if let Some(image) = image {
                new = new.with_image(image);
            }
            if let Some(slug) = slug {
                new = new.with_slug(slug);
            }

            let content = store.create_content(new)?;
            eprintln!("Created content {}", content.id);
            eprintln!("   Slug: {}", or_dash(content.slug.as_deref()));
            Ok(())
        }
        ContentCommands::List => {
            let contents = store.list_contents()?;
            if contents.is_empty() {
                println!("No content pages. Use 'airwaves content add <title>' to create one.");
                return Ok(());
            }

            println!("{:<6} {:<30} {:<40}", "ID", "SLUG", "TITLE");
            println!("{}", "-".repeat(78));
            for content in &contents {
                println!(
                    "{:<6} {:<30} {:<40}",
                    content.id,
                    truncate(or_dash(content.slug.as_deref()), 30),
                    truncate(&content.title, 40)
                );
            }
            println!("\nTotal: {} pages", contents.len());
            Ok(())
        }
        ContentCommands::Show { key, json } => {
            let content = find_content(store, &key)?;
            if json {
                return print_json(&content);
            }

            let template = &config::config()?.permalinks.content;
            println!("ID: {}", content.id);
            println!("Title: {}", content.title);
            println!("Slug: {}", or_dash(content.slug.as_deref()));
            println!("URL: {}", or_dash(content.permalink(template).as_deref()));
            println!("Image: {}", or_dash(content.image.as_deref()));
            println!("\n{}", content.text);
            Ok(())
        }
        ContentCommands::Delete { id } => {
            store.delete_content(id)?;
            eprintln!("Deleted content {}", id);
            Ok(())
        }
    }
}

pub fn execute_announcement(store: &mut Store, command: AnnouncementCommands) -> Result<()> {
    match command {
        AnnouncementCommands::Add {
            title,
            text,
            pub_date,
            image,
            inactive,
        } => {
            let mut new = NewAnnouncement::new(title, text, !inactive);
            if let Some(pub_date) = pub_date {
                new = new.published_at(pub_date);
            }
            if let Some(image) = image {
                new = new.with_image(image);
            }

            let announcement = store.create_announcement(new)?;
            eprintln!("Created announcement {}", announcement.id);
            Ok(())
        }
        AnnouncementCommands::List { active } => {
            let announcements = if active {
                store.list_active_announcements()?
            } else {
                store.list_announcements()?
            };
            if announcements.is_empty() {
                println!("No announcements");
                return Ok(());
            }

            println!("{:<6} {:<20} {:<7} {:<40}", "ID", "PUBLISHED", "ACTIVE", "TITLE");
            println!("{}", "-".repeat(76));
            for announcement in &announcements {
                let published = announcement
                    .pub_date
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string());
                println!(
                    "{:<6} {:<20} {:<7} {:<40}",
                    announcement.id,
                    or_dash(published.as_deref()),
                    if announcement.active { "yes" } else { "no" },
                    truncate(&announcement.title, 40)
                );
            }
            Ok(())
        }
        AnnouncementCommands::Delete { id } => {
            store.delete_announcement(id)?;
            eprintln!("Deleted announcement {}", id);
            Ok(())
        }
    }
}

fn find_content(store: &Store, key: &str) -> Result<Content> {
    let found = match key.parse::<ContentId>() {
        Ok(id) => store.get_content(id)?,
        Err(_) => store.get_content_by_slug(key)?,
    };
    match found {
        Some(content) => Ok(content),
        None => bail!("Content not found: {}", key),
    }
}
