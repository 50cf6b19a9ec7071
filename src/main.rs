use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use feedmd::config::Config;
use feedmd::update::{self, Outcome};

#[derive(Parser, Debug)]
#[command(
    name = "feedmd",
    about = "Appends this week's RSS posts to a markdown articles page"
)]
struct Args {
    /// Path to the TOML config file
    #[arg(long, value_name = "FILE", default_value = "feedmd.toml")]
    config: PathBuf,

    /// Articles page to update (overrides the config)
    #[arg(long, value_name = "FILE")]
    document: Option<PathBuf>,

    /// Report what would change without writing the page
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Diagnostics on stderr; stdout carries only the summary line CI greps.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = Config::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;
    if let Some(document) = args.document {
        config.document = document;
    }

    if !config.document.exists() {
        eprintln!(
            "Error: Expected file not found: {}",
            config.document.display()
        );
        eprintln!();
        eprintln!("feedmd edits an existing articles page; it will not create one.");
        eprintln!("Point --document (or the config's `document` key) at the page to update.");
        std::process::exit(1);
    }

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .build()
        .context("Failed to build HTTP client")?;

    match update::run(&config, &client, args.dry_run).await? {
        Outcome::NoFreshPosts => {
            println!("No new RSS posts found for the last week. No changes made.");
        }
        Outcome::Added(count) if args.dry_run => {
            println!(
                "Would add {} new post(s) to {} (dry run)",
                count,
                config.document.display()
            );
        }
        Outcome::Added(count) => {
            println!(
                "Added {} new post(s) to {}",
                count,
                config.document.display()
            );
        }
    }

    Ok(())
}
