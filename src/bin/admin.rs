//! CLI tool for inspecting the feedql schema and parser.
//!
//! # Usage
//!
//! ```bash
//! # Print the schema in SDL form
//! cargo run --bin admin -- schema
//!
//! # List canonical types with their fields
//! cargo run --bin admin -- types
//!
//! # Fetch a feed and print the canonical JSON
//! cargo run --bin admin -- parse https://example.com/podcast.xml
//! ```
//!
//! `parse` honours the same `FETCH_TIMEOUT_SECS`, `MAX_FEED_BYTES` and
//! `USER_AGENT` variables as the server.

use feedql::config::Config;
use feedql::domain::FeedParser;
use feedql::graphql::{FetchErrorMode, build_schema, canonical_types};
use feedql::infrastructure::feed::HttpFeedParser;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for feedql.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the GraphQL schema (SDL)
    Schema,

    /// List canonical types in declaration order
    Types {
        /// Also print every field with its type
        #[arg(short, long)]
        fields: bool,
    },

    /// Fetch and parse a feed, printing the canonical JSON
    Parse {
        /// Feed URL
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Schema => print_schema(&config)?,
        Commands::Types { fields } => list_types(fields)?,
        Commands::Parse { url } => parse_feed(&config, &url).await?,
    }

    Ok(())
}

fn http_parser(config: &Config) -> Result<Arc<HttpFeedParser>> {
    Ok(Arc::new(
        HttpFeedParser::new(config.fetch_options()).context("Failed to build HTTP client")?,
    ))
}

fn print_schema(config: &Config) -> Result<()> {
    let schema = build_schema(http_parser(config)?, FetchErrorMode::default())
        .context("Failed to build GraphQL schema")?;

    println!("{}", schema.sdl());
    Ok(())
}

fn list_types(with_fields: bool) -> Result<()> {
    let registry = canonical_types().context("Failed to build type registry")?;

    println!("{}", "📋 Canonical types".bright_blue().bold());
    println!();
    println!(
        "  {:<24} {:>6}  {}",
        "TYPE".bright_white().bold(),
        "FIELDS".bright_white().bold(),
        "DESCRIPTION".bright_white().bold()
    );

    for def in registry.types() {
        println!(
            "  {:<24} {:>6}  {}",
            def.name.cyan(),
            def.fields.len(),
            def.description.dimmed()
        );

        if with_fields {
            for (name, ty) in def.fields.iter() {
                println!("      {}: {}", name, ty.sdl().yellow());
            }
        }
    }

    println!();
    println!("Total: {} types", registry.len().to_string().green().bold());
    Ok(())
}

async fn parse_feed(config: &Config, url: &str) -> Result<()> {
    let parser = http_parser(config)?;

    eprintln!("{} {}", "🔎 Fetching".bright_blue().bold(), url.cyan());

    let feed = match parser.parse_url(url).await {
        Ok(feed) => feed,
        Err(e) => {
            eprintln!("{} [{}] {}", "❌".red(), e.code().red().bold(), e);
            anyhow::bail!("Failed to parse {url}");
        }
    };

    eprintln!(
        "{} {} items ({} {})",
        "✅".green(),
        feed.items.len().to_string().green().bold(),
        feed.feed_type,
        feed.feed_version
    );

    println!("{}", serde_json::to_string_pretty(&feed)?);
    Ok(())
}
