//! CLI administration tool for clicktag.
//!
//! Manages per-link software selections and inspects the software map
//! without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # List tracked links with their selections
//! cargo run --bin admin -- link list
//!
//! # Show one link
//! cargo run --bin admin -- link show 7
//!
//! # Set / clear a link's software selection
//! cargo run --bin admin -- link set-software 7 smartico
//! cargo run --bin admin -- link clear-software 7
//!
//! # List the software map
//! cargo run --bin admin -- software list
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use clicktag::config::Config;
use clicktag::domain::repositories::{LinkRepository, MetadataRepository, SOFTWARE_META_KEY};
use clicktag::domain::software_map::SoftwareMap;
use clicktag::infrastructure::persistence::{PgLinkRepository, PgMetadataRepository};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::{PgPool, Row};
use std::sync::Arc;

/// CLI tool for managing clicktag.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage tracked links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Inspect the software map
    Software {
        #[command(subcommand)]
        action: SoftwareAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// List tracked links with their software selections
    List,

    /// Show one link
    Show {
        /// Link id
        id: i64,
    },

    /// Set a link's software selection
    SetSoftware {
        /// Link id
        id: i64,

        /// Software key (must exist in the software map)
        software: String,
    },

    /// Clear a link's software selection
    ClearSoftware {
        /// Link id
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Software map subcommands.
#[derive(Subcommand)]
enum SoftwareAction {
    /// List known software keys and their templates
    List,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = Arc::new(
        PgPool::connect(&database_url)
            .await
            .context("failed to connect to database")?,
    );

    let links = PgLinkRepository::new(pool.clone());
    let metadata = PgMetadataRepository::new(pool.clone());
    let software_map = load_software_map()?;

    match cli.command {
        Commands::Link { action } => match action {
            LinkAction::List => list_links(&pool, &metadata).await?,
            LinkAction::Show { id } => show_link(&links, &metadata, &software_map, id).await?,
            LinkAction::SetSoftware { id, software } => {
                set_software(&links, &metadata, &software_map, id, &software).await?
            }
            LinkAction::ClearSoftware { id, yes } => {
                clear_software(&links, &metadata, id, yes).await?
            }
        },
        Commands::Software { action } => match action {
            SoftwareAction::List => list_software(&software_map),
        },
        Commands::Db { action } => match action {
            DbAction::Check => db_check(&links).await?,
        },
    }

    Ok(())
}

/// Built-in software map plus any `SOFTWARE_OVERRIDES` from the environment,
/// matching what the server registers at startup.
fn load_software_map() -> Result<SoftwareMap> {
    let mut builder = SoftwareMap::builder();
    if let Ok(raw) = std::env::var("SOFTWARE_OVERRIDES") {
        for (key, template) in Config::parse_software_overrides(&raw)? {
            builder = builder
                .register(key.clone(), &template)
                .with_context(|| format!("invalid SOFTWARE_OVERRIDES entry for '{key}'"))?;
        }
    }
    Ok(builder.build())
}

async fn list_links(pool: &PgPool, metadata: &PgMetadataRepository) -> Result<()> {
    let rows = sqlx::query(
        "SELECT id, slug, target_url, status FROM links ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    if rows.is_empty() {
        println!("{}", "No tracked links.".yellow());
        return Ok(());
    }

    println!(
        "{:<6} {:<24} {:<12} {:<16} {}",
        "ID".bold(),
        "SLUG".bold(),
        "STATUS".bold(),
        "SOFTWARE".bold(),
        "TARGET".bold()
    );

    for row in rows {
        let id: i64 = row.try_get("id")?;
        let slug: String = row.try_get("slug")?;
        let target_url: String = row.try_get("target_url")?;
        let status: String = row.try_get("status")?;

        let software = metadata
            .get(id, SOFTWARE_META_KEY)
            .await?
            .unwrap_or_else(|| "-".to_string());

        let status_colored = if status == "enabled" {
            status.green()
        } else {
            status.red()
        };

        println!(
            "{:<6} {:<24} {:<12} {:<16} {}",
            id, slug, status_colored, software, target_url
        );
    }

    Ok(())
}

async fn show_link(
    links: &PgLinkRepository,
    metadata: &PgMetadataRepository,
    software_map: &SoftwareMap,
    id: i64,
) -> Result<()> {
    let Some(link) = links.find_by_id(id).await? else {
        println!("{}", format!("Link {} not found.", id).red());
        return Ok(());
    };

    println!("{}:      {}", "Id".bold(), link.id);
    println!("{}:    {}", "Slug".bold(), link.slug);
    println!("{}:  {}", "Target".bold(), link.target_url);
    println!("{}:  {}", "Status".bold(), link.status.as_str());
    if let Some(content_id) = link.content_id {
        println!("{}: {}", "Content".bold(), content_id);
    }

    match metadata.get(id, SOFTWARE_META_KEY).await? {
        Some(software) => {
            let template = software_map
                .template_for(&software)
                .map(|t| t.as_str().to_string())
                .unwrap_or_else(|| "(no template in map!)".red().to_string());
            println!("{}: {} ({})", "Software".bold(), software.green(), template);
        }
        None => println!("{}: {}", "Software".bold(), "not configured".yellow()),
    }

    Ok(())
}

async fn set_software(
    links: &PgLinkRepository,
    metadata: &PgMetadataRepository,
    software_map: &SoftwareMap,
    id: i64,
    software: &str,
) -> Result<()> {
    if !software_map.contains(software) {
        println!(
            "{}",
            format!(
                "Unknown software key '{}'. Run 'software list' to see valid keys.",
                software
            )
            .red()
        );
        return Ok(());
    }

    let Some(link) = links.find_by_id(id).await? else {
        println!("{}", format!("Link {} not found.", id).red());
        return Ok(());
    };

    metadata.set(link.id, SOFTWARE_META_KEY, software).await?;
    println!(
        "{}",
        format!("Set software '{}' for link '{}'.", software, link.slug).green()
    );

    Ok(())
}

async fn clear_software(
    links: &PgLinkRepository,
    metadata: &PgMetadataRepository,
    id: i64,
    yes: bool,
) -> Result<()> {
    let Some(link) = links.find_by_id(id).await? else {
        println!("{}", format!("Link {} not found.", id).red());
        return Ok(());
    };

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Clear the software selection for '{}'? The link will redirect without a click id.",
                link.slug
            ))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Aborted.".yellow());
            return Ok(());
        }
    }

    metadata.delete(link.id, SOFTWARE_META_KEY).await?;
    println!(
        "{}",
        format!("Cleared software selection for '{}'.", link.slug).green()
    );

    Ok(())
}

fn list_software(software_map: &SoftwareMap) {
    println!("{:<22} {:<12} {}", "KEY".bold(), "PARAM".bold(), "TEMPLATE".bold());
    for (key, template) in software_map.entries() {
        println!(
            "{:<22} {:<12} {}",
            key,
            template.param_name(),
            template.as_str()
        );
    }
}

async fn db_check(links: &PgLinkRepository) -> Result<()> {
    match links.table_exists().await {
        Ok(true) => println!("{}", "Database OK, links table present.".green()),
        Ok(false) => println!("{}", "Connected, but the links table is missing.".yellow()),
        Err(e) => println!("{}", format!("Database check failed: {}", e).red()),
    }
    Ok(())
}
