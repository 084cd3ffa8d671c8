//! commi - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use commi::clipboard::copy_to_clipboard;
use commi::git::{commit_changes, get_diff, has_changes, open_repository, with_co_author};
use commi::llm::build_service;
use commi::{MessageGenerator, Provider, Settings};

const LONG_ABOUT: &str = "AI-powered Git commit message generator.

Generates commit messages following standard Git commit message format:
- Short (72 chars or less) summary line in imperative mood
- Blank line separating summary from body
- Detailed explanatory text wrapped at 72 characters
- Use bullet points for multiple changes";

/// Generate a commit message for the current changes.
#[derive(Parser, Debug)]
#[command(name = "commi")]
#[command(about = "AI-powered Git commit message generator")]
#[command(long_about = LONG_ABOUT)]
#[command(version)]
struct Cli {
    /// Path to Git repository (defaults to current directory)
    #[arg(long)]
    repo: Option<PathBuf>,

    /// Gemini API key (can also be set via COMMI_API_KEY or GEMINI_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Generate message from staged changes only (git diff --cached)
    #[arg(long)]
    cached: bool,

    /// Copy the generated message to clipboard
    #[arg(long)]
    copy: bool,

    /// Automatically commit the changes with the generated message.
    /// Without --cached, modified tracked files are staged first (like `git commit -a`)
    #[arg(long)]
    commit: bool,

    /// Add a co-author to the commit (format: email@example.com)
    #[arg(long = "co-author", value_name = "EMAIL", value_parser = parse_email)]
    co_author: Option<String>,

    /// Completion provider
    #[arg(long, value_enum, default_value_t = Provider::Gemini)]
    provider: Provider,

    /// Gemini model name (can also be set via MODEL_NAME)
    #[arg(long)]
    model: Option<String>,

    /// Regenerations allowed when a message does not follow the format
    #[arg(long)]
    max_retries: Option<u32>,

    /// Show progress logs on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_email(value: &str) -> Result<String, String> {
    match value.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
            Ok(value.to_string())
        }
        _ => Err(format!("'{value}' is not an email address")),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,commi={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Print help if no arguments provided
    if std::env::args_os().len() == 1 {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::resolve(cli.provider, cli.api_key, cli.model, cli.max_retries);

    // Step 1: Initialize repository and provider before doing any work
    let repo = open_repository(cli.repo.as_deref())
        .context("Not a git repository. Run commi from within a git repository or pass --repo.")?;

    let service = build_service(&settings)
        .await
        .with_context(|| format!("Failed to initialize {}", settings.provider))?;

    // Step 2: Collect the diff
    if !has_changes(&repo, cli.cached).context("Failed to inspect repository status")? {
        println!("No changes found. Nothing to describe.");
        return Ok(());
    }

    let diff = get_diff(&repo, cli.cached).context("Failed to fetch git diff")?;
    if diff.trim().is_empty() {
        println!("Only untracked files changed. Stage them with `git add` and run with --cached.");
        return Ok(());
    }

    if cli.cached {
        println!("Generating commit message from staged changes...");
    } else {
        println!("Generating commit message...");
    }

    // Step 3: Generate
    let generator = MessageGenerator::new(service).with_max_retries(settings.max_retries);
    let generated = generator
        .generate(&diff)
        .await
        .context("Could not generate a commit message")?;

    if !generated.conforms {
        eprintln!(
            "Warning: no message followed the expected format after {} attempts; using the last one.",
            generated.attempts
        );
    }

    let message = match cli.co_author.as_deref() {
        Some(email) => with_co_author(&generated.text, email),
        None => generated.text,
    };

    println!("\n{message}\n");

    // Step 4: Side effects
    if cli.copy {
        match copy_to_clipboard(&message) {
            Ok(()) => println!("The commit message has been copied to your clipboard!"),
            Err(e) => eprintln!("Warning: {e}"),
        }
    }

    if cli.commit {
        let oid = commit_changes(&repo, &message, !cli.cached)
            .context("Failed to commit changes")?;
        println!("✓ Committed {}", &oid.to_string()[..7]);
    }

    Ok(())
}
