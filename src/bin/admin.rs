//! CLI administration tool for link-registry.
//!
//! Works directly against the configured storage, without the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL with a custom code that expires in two hours
//! cargo run --bin admin -- add example.com/docs --code docs --expiry 120
//!
//! # List all links
//! cargo run --bin admin -- list
//!
//! # Show one link with its recent clicks
//! cargo run --bin admin -- show docs
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Remove expired links
//! cargo run --bin admin -- sweep
//!
//! # Remove every link
//! cargo run --bin admin -- clear
//! ```
//!
//! # Environment Variables
//!
//! Uses the same storage variables as the server (`STORAGE_BACKEND`,
//! `DATA_DIR`, `REDIS_URL`, `STORAGE_SLOT`, ...).

use link_registry::config;
use link_registry::domain::clock::SystemClock;
use link_registry::domain::entities::ShortLink;
use link_registry::domain::validation::LinkCandidate;
use link_registry::infrastructure::event_log::EventLogger;
use link_registry::server::open_storage;
use link_registry::state::{AppState, RegistrySettings};
use link_registry::utils::time_format::format_time_remaining;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;
use tokio::sync::mpsc;

/// CLI tool for managing link-registry.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Add {
        /// The URL to shorten (scheme optional)
        url: String,

        /// Custom shortcode (generated if omitted)
        #[arg(short, long)]
        code: Option<String>,

        /// Minutes until the link expires (default: 30)
        #[arg(short, long)]
        expiry: Option<i64>,
    },

    /// List all links
    List,

    /// Show one link with its click history
    Show {
        /// Shortcode to look up
        code: String,
    },

    /// Show statistics
    Stats,

    /// Remove expired links
    Sweep,

    /// Remove every link
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    let storage = open_storage(&config)
        .await
        .context("Failed to open storage")?;

    // Redirects are never resolved here, so queued clicks have no consumer.
    let (click_tx, _click_rx) = mpsc::channel(1);
    let state = AppState::new(
        storage,
        Arc::new(SystemClock),
        EventLogger::disabled(),
        click_tx,
        RegistrySettings::from(&config),
    );

    match cli.command {
        Commands::Add { url, code, expiry } => add_link(&state, url, code, expiry).await?,
        Commands::List => list_links(&state).await,
        Commands::Show { code } => show_link(&state, &code).await?,
        Commands::Stats => show_stats(&state).await,
        Commands::Sweep => sweep(&state).await,
        Commands::Clear { yes } => clear(&state, yes).await?,
    }

    Ok(())
}

async fn add_link(
    state: &AppState,
    url: String,
    code: Option<String>,
    expiry: Option<i64>,
) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let mut candidate = LinkCandidate::new(url);
    if let Some(code) = code {
        candidate = candidate.with_shortcode(code);
    }
    if let Some(minutes) = expiry {
        candidate = candidate.with_expiry(minutes);
    }

    let outcome = state
        .link_service
        .add_links(&[candidate])
        .await
        .map_err(|e| anyhow::anyhow!("Failed to add link: {}", e))?;

    if let Some(failure) = outcome.errors.first() {
        println!("{} {}", "❌".red(), failure.error.to_string().red());
        return Ok(());
    }

    for link in &outcome.created {
        println!("{}", "✅ Link created".green().bold());
        println!();
        print_link(link, &state.public_origin, Utc::now());
    }

    Ok(())
}

/// Lists all links with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 Links
///
///   Code       Clicks  Expires              Status   URL
///   ─────────────────────────────────────────────────────────────────
///   docs       3       2026-01-15 10:30     ACTIVE   https://example.com/docs
///   aB3xY9     0       2026-01-15 09:00     EXPIRED  https://example.com/old
/// ```
async fn list_links(state: &AppState) {
    println!("{}", "📋 Links".bright_blue().bold());
    println!();

    let links = state.link_service.list_links().await;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin add <url>",
            "cargo run --bin".bright_cyan()
        );
        return;
    }

    println!(
        "  {:<20} {:<7} {:<20} {:<8} {}",
        "Code".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Expires".bright_white().bold(),
        "Status".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(90).bright_black());

    let now = Utc::now();
    for link in &links {
        let status = if link.is_active_at(now) {
            "ACTIVE".green()
        } else {
            "EXPIRED".red()
        };

        println!(
            "  {:<20} {:<7} {:<20} {:<8} {}",
            link.shortcode.cyan(),
            link.click_count,
            link.expiry_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status,
            link.original_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();
}

async fn show_link(state: &AppState, code: &str) -> Result<()> {
    let link = state
        .link_service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_link(&link, &state.public_origin, Utc::now());

    if !link.clicks.is_empty() {
        println!();
        println!("  {}", "Recent clicks:".bright_white().bold());
        for click in link.clicks.iter().rev().take(10) {
            let referrer = if click.referrer.is_empty() {
                "direct"
            } else {
                click.referrer.as_str()
            };
            println!(
                "    {}  {}  {}",
                click
                    .timestamp
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
                    .bright_black(),
                referrer,
                click.user_agent.bright_black()
            );
        }
    }
    println!();

    Ok(())
}

fn print_link(link: &ShortLink, origin: &str, now: DateTime<Utc>) {
    println!("  Short URL: {}", link.short_url(origin).bright_yellow().bold());
    println!("  Target:    {}", link.original_url.cyan());
    println!(
        "  Created:   {}",
        link.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!(
        "  Expires:   {} ({})",
        link.expiry_at.format("%Y-%m-%d %H:%M:%S"),
        format_time_remaining(link.time_remaining(now))
    );
    println!("  Clicks:    {}", link.click_count.to_string().bright_green());
}

/// Displays registry statistics.
async fn show_stats(state: &AppState) {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let stats = state.stats_service.statistics().await;

    println!(
        "  Links:          {}",
        stats.total_urls.to_string().bright_green().bold()
    );
    println!(
        "  Active:         {}",
        stats.active_urls.to_string().bright_green().bold()
    );
    println!(
        "  Expired:        {}",
        stats.expired_urls.to_string().yellow().bold()
    );
    println!(
        "  Clicks:         {}",
        stats.total_clicks.to_string().bright_green().bold()
    );
    println!(
        "  Avg per link:   {:.2}",
        stats.average_clicks_per_url
    );

    if let Some(top) = &stats.most_clicked_url {
        println!(
            "  Most clicked:   {} ({} clicks)",
            top.shortcode.cyan(),
            top.click_count
        );
    }
    println!();
}

async fn sweep(state: &AppState) {
    let removed = state.sweep_service.sweep().await;

    if removed == 0 {
        println!("{}", "✨ No expired links".green());
    } else {
        println!(
            "{} {}",
            "🧹 Removed expired links:".green().bold(),
            removed.to_string().bright_white().bold()
        );
    }
}

/// Removes every link after confirmation (default: No).
async fn clear(state: &AppState, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete ALL links? This cannot be undone")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    state
        .link_service
        .clear_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to clear links: {}", e))?;

    println!("{}", "✅ All links removed".green().bold());

    Ok(())
}
