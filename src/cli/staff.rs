//! Staff subcommands: job categories, bios and article bylines.

use anyhow::{bail, Result};
use clap::Subcommand;

use crate::config;
use crate::domain::{Bio, BioId, JobCategoryId, NewArticle, NewBio, NewJobCategory, Permalink, UserId};
use crate::store::Store;

use super::{or_dash, print_json, truncate};

/// Job category subcommands
#[derive(Subcommand, Debug)]
pub enum CategoryCommands {
    /// Add a job category
    Add {
        /// Category name
        name: String,

        /// Sort priority (lower first)
        #[arg(short, long)]
        priority: Option<i32>,
    },

    /// List job categories in display order
    List,

    /// Delete a job category (its bios are kept, uncategorized)
    Delete {
        /// Category ID
        id: JobCategoryId,
    },
}

/// Bio subcommands
#[derive(Subcommand, Debug)]
pub enum BioCommands {
    /// Add a staff bio
    Add {
        /// Job title
        job_title: String,

        /// Display name (must be unique)
        #[arg(short, long)]
        name: Option<String>,

        /// Job category ID
        #[arg(short, long)]
        category: Option<JobCategoryId>,

        /// Linked user account ID
        #[arg(long)]
        user: Option<UserId>,

        /// Image reference
        #[arg(long)]
        image: Option<String>,

        /// Biography (rich text)
        #[arg(short, long)]
        text: Option<String>,

        /// Explicit slug (derived from the name if omitted)
        #[arg(long)]
        slug: Option<String>,

        /// Hide from the public staff page
        #[arg(long)]
        hidden: bool,
    },

    /// List bios
    List {
        /// Only bios shown on the staff page
        #[arg(long)]
        visible: bool,
    },

    /// Show a bio by ID or slug
    Show {
        /// Bio ID or slug
        key: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a bio, crediting its unauthored articles to the bio's name
    Delete {
        /// Bio ID
        id: BioId,

        /// Print the deletion report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Unlink a removed user account from its bios
    DetachUser {
        /// User account ID
        user: UserId,
    },
}

/// Article byline subcommands
#[derive(Subcommand, Debug)]
pub enum ArticleCommands {
    /// Add an article byline
    Add {
        /// Article title
        title: String,

        /// Staff author (bio ID)
        #[arg(short, long)]
        author: Option<BioId>,

        /// Free-text author name
        #[arg(long)]
        author_name: Option<String>,
    },

    /// List the articles linked to a staff author
    List {
        /// Staff author (bio ID)
        #[arg(short, long)]
        author: BioId,
    },
}

pub fn execute_category(store: &mut Store, command: CategoryCommands) -> Result<()> {
    match command {
        CategoryCommands::Add { name, priority } => {
            let mut new = NewJobCategory::new(name);
            if let Some(priority) = priority {
                new = new.with_priority(priority);
            }

            let category = store.create_job_category(new)?;
            eprintln!("Created job category {}: {}", category.id, category.name);
            Ok(())
        }
        CategoryCommands::List => {
            let categories = store.list_job_categories()?;
            if categories.is_empty() {
                println!("No job categories");
                return Ok(());
            }

            println!("{:<6} {:<9} {:<40}", "ID", "PRIORITY", "NAME");
            println!("{}", "-".repeat(57));
            for category in &categories {
                let priority = category.priority.map(|p| p.to_string());
                println!(
                    "{:<6} {:<9} {:<40}",
                    category.id,
                    or_dash(priority.as_deref()),
                    truncate(&category.name, 40)
                );
            }
            Ok(())
        }
        CategoryCommands::Delete { id } => {
            store.delete_job_category(id)?;
            eprintln!("Deleted job category {}", id);
            Ok(())
        }
    }
}

pub fn execute_bio(store: &mut Store, command: BioCommands) -> Result<()> {
    match command {
        BioCommands::Add {
            job_title,
            name,
            category,
            user,
            image,
            text,
            slug,
            hidden,
        } => {
            let mut new = NewBio::new(job_title);
            if let Some(name) = name {
                new = new.with_name(name);
            }
            if let Some(category) = category {
                new = new.with_category(category);
            }
            if let Some(user) = user {
                new = new.with_user(user);
            }
            if let Some(image) = image {
                new = new.with_image(image);
            }
            if let Some(text) = text {
                new = new.with_text(text);
            }
            if let Some(slug) = slug {
                new = new.with_slug(slug);
            }
            if hidden {
                new = new.hidden();
            }

            let bio = store.create_bio(new)?;
            eprintln!("Created bio {}: {}", bio.id, bio);
            eprintln!("   Slug: {}", or_dash(bio.slug.as_deref()));
            Ok(())
        }
        BioCommands::List { visible } => {
            let bios = if visible {
                store.list_visible_bios()?
            } else {
                store.list_bios()?
            };
            if bios.is_empty() {
                println!("No bios");
                return Ok(());
            }

            println!("{:<6} {:<25} {:<30} {:<8}", "ID", "NAME", "JOB TITLE", "VISIBLE");
            println!("{}", "-".repeat(72));
            for bio in &bios {
                println!(
                    "{:<6} {:<25} {:<30} {:<8}",
                    bio.id,
                    truncate(or_dash(bio.name.as_deref()), 25),
                    truncate(&bio.job_title, 30),
                    if bio.visible { "yes" } else { "no" }
                );
            }
            println!("\nTotal: {} bios", bios.len());
            Ok(())
        }
        BioCommands::Show { key, json } => {
            let bio = find_bio(store, &key)?;
            if json {
                return print_json(&bio);
            }

            let template = &config::config()?.permalinks.bio;
            let category = match bio.job_category {
                Some(id) => store.get_job_category(id)?.map(|c| c.name),
                None => None,
            };

            println!("ID: {}", bio.id);
            println!("Name: {}", or_dash(bio.name.as_deref()));
            println!("Job title: {}", bio.job_title);
            println!("Category: {}", or_dash(category.as_deref()));
            println!("Slug: {}", or_dash(bio.slug.as_deref()));
            println!("URL: {}", or_dash(bio.permalink(template).as_deref()));
            println!("Visible: {}", if bio.visible { "yes" } else { "no" });
            if let Some(user) = bio.user {
                println!("User: {}", user);
            }

            let programs = store.programs_by_producer(bio.id)?;
            if !programs.is_empty() {
                println!("\nPrograms:");
                for program in &programs {
                    println!("  {} {}", program.id, program.title);
                }
            }

            let articles = store.articles_by_author(bio.id)?;
            if !articles.is_empty() {
                println!("\nArticles:");
                for article in &articles {
                    println!("  {} {}", article.id, article.title);
                }
            }

            if !bio.text.is_empty() {
                println!("\n{}", bio.text);
            }
            Ok(())
        }
        BioCommands::Delete { id, json } => {
            let report = store.delete_bio_and_reassign_articles(id)?;
            if json {
                return print_json(&report);
            }

            eprintln!("Deleted bio {}", report.bio_id);
            eprintln!("   Articles credited: {}", report.reassigned.len());
            eprintln!("   Articles unchanged: {}", report.skipped.len());
            Ok(())
        }
        BioCommands::DetachUser { user } => {
            let detached = store.detach_user(user)?;
            eprintln!("Detached user {} from {} bio(s)", user, detached);
            Ok(())
        }
    }
}

pub fn execute_article(store: &mut Store, command: ArticleCommands) -> Result<()> {
    match command {
        ArticleCommands::Add {
            title,
            author,
            author_name,
        } => {
            let mut new = NewArticle::new(title);
            if let Some(author) = author {
                new = new.by(author);
            }
            if let Some(author_name) = author_name {
                new = new.with_author_name(author_name);
            }

            let article = store.create_article(new)?;
            eprintln!("Created article {}", article.id);
            Ok(())
        }
        ArticleCommands::List { author } => {
            let articles = store.articles_by_author(author)?;
            if articles.is_empty() {
                println!("No articles by bio {}", author);
                return Ok(());
            }

            println!("{:<6} {:<25} {:<40}", "ID", "AUTHOR NAME", "TITLE");
            println!("{}", "-".repeat(73));
            for article in &articles {
                println!(
                    "{:<6} {:<25} {:<40}",
                    article.id,
                    truncate(or_dash(article.author_name.as_deref()), 25),
                    truncate(&article.title, 40)
                );
            }
            Ok(())
        }
    }
}

fn find_bio(store: &Store, key: &str) -> Result<Bio> {
    let found = match key.parse::<BioId>() {
        Ok(id) => store.get_bio(id)?,
        Err(_) => store.get_bio_by_slug(key)?,
    };
    match found {
        Some(bio) => Ok(bio),
        None => bail!("Bio not found: {}", key),
    }
}
