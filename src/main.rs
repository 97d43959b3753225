use anyhow::{Context, Result};
use clap::Parser;
use debtlens::cli::{Cli, Commands, InputArgs, RequestEnvelope};
use debtlens::config::{load_config, load_config_from};
use debtlens::{Engine, EngineConfig, ErrorReport};
use serde::Serialize;
use std::io::Read;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!("{err:#}");
            let report = ErrorReport::EngineError {
                message: format!("{err:#}"),
            };
            if let Ok(text) = serde_json::to_string(&report) {
                println!("{text}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    match cli.command {
        Commands::Analyze { input } => {
            let engine = Engine::new(resolve_config(&input));
            let (source, label) = read_source(&input)?;
            emit(engine.analyze(&source, label.as_deref()), input.pretty)
        }
        Commands::Suggest { input, limit } => {
            let mut config = resolve_config(&input);
            if let Some(limit) = limit {
                config.suggestions.max_suggestions = limit;
            }
            let engine = Engine::new(config);
            let (source, label) = read_source(&input)?;
            emit(engine.suggest(&source, label.as_deref()), input.pretty)
        }
    }
}

fn resolve_config(input: &InputArgs) -> EngineConfig {
    match &input.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    }
}

/// Source text and display label, from a file or stdin, raw or enveloped.
fn read_source(input: &InputArgs) -> Result<(String, Option<String>)> {
    let text = match &input.path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        }
    };

    if input.request {
        let envelope = RequestEnvelope::parse(&text).context("Invalid request envelope")?;
        let label = input.resolve_label(Some(&envelope.filename));
        Ok((envelope.code, label))
    } else {
        Ok((text, input.resolve_label(None)))
    }
}

/// Print a result or its error report. Parse errors are an answer, not a failure.
fn emit<T: Serialize>(outcome: debtlens::Result<T>, pretty: bool) -> Result<ExitCode> {
    match outcome {
        Ok(value) => {
            print_json(&value, pretty)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_json(&err.to_report(), pretty)?;
            if err.is_parse_error() {
                Ok(ExitCode::SUCCESS)
            } else {
                tracing::error!("{err}");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("Failed to serialize JSON")?;
    println!("{text}");
    Ok(())
}
