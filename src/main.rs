mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{parse_email_lines, Cli, Command};
use email_vet_core::core::config::load_config;
use email_vet_core::{validate_syntax, Validator};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("email_vet_core={0},email_vet={0}", default_level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read emails from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }
}

#[derive(Serialize)]
struct SyntaxReport<'a> {
    email: &'a str,
    valid: bool,
    message: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut builder = load_config(cli.config.as_deref())?;
    if let Some(url) = &cli.resolver_url {
        builder = builder.resolver_url(url.clone());
    }
    let config = builder.build()?;
    tracing::debug!("Running with {:?}", config);

    match cli.command {
        Command::Syntax { emails } => {
            let reports: Vec<SyntaxReport> = emails
                .iter()
                .map(|email| {
                    let check = validate_syntax(email);
                    SyntaxReport {
                        email,
                        valid: check.valid,
                        message: check.message,
                    }
                })
                .collect();
            println!("{}", to_json(&reports, cli.pretty)?);
        }
        Command::Check { emails } => {
            let validator = Validator::new(config)?;
            let mut results = Vec::with_capacity(emails.len());
            for email in &emails {
                results.push(validator.validate_email(email).await);
            }
            println!("{}", to_json(&results, cli.pretty)?);
        }
        Command::Bulk { input, output } => {
            let raw = read_input(&input)?;
            let emails = parse_email_lines(&raw);
            let validator = Validator::new(config)?;

            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::with_template("{spinner} {msg} [{elapsed}]")
                    .context("Invalid progress template")?,
            );
            bar.enable_steady_tick(Duration::from_millis(120));
            bar.set_message(format!("Validating {} emails", emails.len()));

            let results = validator
                .validate_bulk_with_progress(&emails, |done, total| {
                    bar.set_message(format!("Validated {}/{} unique emails", done, total));
                })
                .await?;
            bar.finish_and_clear();

            let json = to_json(&results, cli.pretty)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!("Wrote {} results to {}", results.len(), path.display());
                }
                None => println!("{}", json),
            }
        }
    }

    Ok(())
}
