//! Terminal front end for the decision debate service.
//!
//! Streams one debate, prints agent progress as it arrives, then renders the
//! arguments, scorecard and verdict.

mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use debate_client::{DebateClient, DebateConfig, DebateRequest, DebateSession, Language, Phase};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "debate")]
#[command(about = "Three-agent decision debate (PRO / CON / JUDGE)")]
struct Cli {
    /// The decision to evaluate
    decision: String,

    /// Additional context for the decision
    #[arg(short, long, default_value = "")]
    context: String,

    /// Model ID passed to the debate service
    #[arg(short, long)]
    model: Option<String>,

    /// Answer language (en or ru)
    #[arg(short, long, value_parser = parse_language)]
    language: Option<Language>,

    /// Base URL of the debate service
    #[arg(long)]
    url: Option<String>,

    /// Save the final debate state to a JSON file
    #[arg(long)]
    save_json: Option<PathBuf>,
}

fn parse_language(code: &str) -> std::result::Result<Language, String> {
    Language::parse(code).ok_or_else(|| format!("unsupported language {:?} (use en or ru)", code))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,debate_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = DebateConfig::from_env().context("Failed to load configuration")?;
    if let Some(url) = cli.url {
        config.api_url = url;
    }
    let model = cli.model.unwrap_or_else(|| config.model.clone());
    let language = cli.language.unwrap_or(config.language);

    let client = DebateClient::from_config(&config).context("Failed to create debate client")?;
    let session = DebateSession::new(Arc::new(client));

    render::decision_banner(&cli.decision);

    let progress = tokio::spawn(render::follow_progress(session.subscribe()));

    session
        .start(
            DebateRequest::new(&cli.decision)
                .context(cli.context)
                .model(model)
                .language(language),
        )
        .await;

    let state = session.snapshot();
    // The session owns the sender; dropping it ends the progress task.
    drop(session);
    progress.await.context("Progress printer panicked")?;

    if state.phase == Phase::Error {
        render::failure(state.error.as_deref().unwrap_or("unknown error"));
    } else {
        render::debate(&state);
    }

    if let Some(path) = &cli.save_json {
        let json = serde_json::to_string_pretty(&state).context("Failed to serialize debate")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\n{} {}", "Saved to".dimmed(), path.display());
    }

    if state.phase == Phase::Error {
        std::process::exit(1);
    }
    Ok(())
}
