//! Veil CLI
//!
//! Command-line front end for PII detection, highlighting, and anonymization
//! against an external anonymization service.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use veil_client::{ServiceClient, ServiceConfig};
use veil_core::{AnonymizationResult, OperatorConfig};
use veil_detect::{Recognizer, RegexRecognizer};
use veil_markup::annotate;

#[derive(Parser)]
#[command(name = "veil")]
#[command(about = "Veil - PII detection and anonymization", long_about = None)]
struct Cli {
    /// Base URL of the anonymization service
    #[arg(
        long,
        global = true,
        env = "VEIL_SERVICE_URL",
        default_value = "http://localhost:5001"
    )]
    service_url: String,

    /// Key for the DEFAULT decrypt operator on de-anonymize calls
    #[arg(long, global = true, env = "VEIL_DECRYPT_KEY")]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect PII entities and print them as JSON
    Analyze {
        /// Text to analyze (reads stdin if neither text nor --file is given)
        text: Option<String>,

        /// Read input from a file instead
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print highlighted HTML markup for detected entities
    Annotate {
        text: Option<String>,

        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Anonymize text via the external service
    Anonymize {
        text: Option<String>,

        #[arg(long)]
        file: Option<PathBuf>,

        /// JSON operator configuration (defaults to the stock configuration)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Recover original values from previously anonymized text
    Deanonymize {
        /// The anonymized text
        #[arg(long)]
        text: String,

        /// JSON file holding the operator results from the anonymize call
        /// (either the raw array or a saved anonymization result)
        #[arg(long)]
        results: PathBuf,
    },
    /// Probe the service health endpoint
    Health,
}

fn read_input(text: Option<String>, file: Option<&Path>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}

fn load_operator_config(path: Option<&Path>) -> anyhow::Result<OperatorConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid operator configuration in {}", path.display()))
        }
        None => Ok(OperatorConfig::default()),
    }
}

fn load_operator_results(path: &Path) -> anyhow::Result<Vec<serde_json::Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    // Accept either the raw operator-result array or a whole saved
    // anonymization result
    if let Ok(results) = serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        return Ok(results);
    }
    let result: AnonymizationResult = serde_json::from_str(&raw)
        .with_context(|| format!("no operator results found in {}", path.display()))?;
    Ok(result.operator_results)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut service_config = ServiceConfig::new(&cli.service_url);
    if let Some(key) = &cli.key {
        service_config = service_config.with_deanonymize_key(key);
    }

    match cli.command {
        Commands::Analyze { text, file } => {
            let input = read_input(text, file.as_deref())?;
            let recognizer = RegexRecognizer::new()?;
            let entities = recognizer.detect(&input);
            println!("{}", serde_json::to_string_pretty(&entities)?);
        }
        Commands::Annotate { text, file } => {
            let input = read_input(text, file.as_deref())?;
            let recognizer = RegexRecognizer::new()?;
            let entities = recognizer.detect(&input);
            println!("{}", annotate(&input, &entities));
        }
        Commands::Anonymize { text, file, config } => {
            let input = read_input(text, file.as_deref())?;
            let operator_config = load_operator_config(config.as_deref())?;
            let client = ServiceClient::new(service_config)?;
            let result = client.anonymize(&input, &operator_config).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Deanonymize { text, results } => {
            let operator_results = load_operator_results(&results)?;
            let client = ServiceClient::new(service_config)?;
            let result = client.deanonymize(&text, &operator_results).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Health => {
            let client = ServiceClient::new(service_config)?;
            if client.health().await {
                println!("service is up");
            } else {
                eprintln!("service is down");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
