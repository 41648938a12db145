//! GoDaddy collector entry point
//!
//! Logs go to stderr so `collect` can write the graph to stdout.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use godaddy_collector::config::{ENV_API_BASE, ENV_API_KEY, ENV_API_SECRET, ENV_SHOPPER_ID};
use godaddy_collector::{
    CollectedGraph, CollectorError, IntegrationConfig, collect, validate_invocation,
};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(name = "godaddy-collector")]
#[command(about = "Collect GoDaddy accounts, domains and DNS records", long_about = None)]
#[command(version)]
struct Cli {
    /// GoDaddy API key
    #[arg(long, env = ENV_API_KEY, hide_env_values = true, global = true)]
    api_key: Option<String>,
    /// GoDaddy API secret
    #[arg(long, env = ENV_API_SECRET, hide_env_values = true, global = true)]
    api_secret: Option<String>,
    /// Shopper ID (customer number) of the account
    #[arg(long, env = ENV_SHOPPER_ID, global = true)]
    shopper_id: Option<String>,
    /// API host, e.g. the OTE sandbox
    #[arg(long, env = ENV_API_BASE, global = true)]
    base_url: Option<String>,
    /// JSON config file with `apiKey`, `apiSecret`, `shopperId`; flags and env win
    #[arg(long, short = 'c', value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
enum Command {
    /// Check the configuration and credentials
    Validate,
    /// Run every step and write the collected graph as JSON
    Collect {
        /// Output file (defaults to stdout)
        #[arg(long, short = 'o', value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

impl Cli {
    fn integration_config(&self) -> anyhow::Result<IntegrationConfig> {
        let base = match &self.config {
            Some(path) => IntegrationConfig::from_file(path)?,
            None => IntegrationConfig::default(),
        };
        Ok(base.merge(IntegrationConfig {
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
            shopper_id: self.shopper_id.clone(),
            base_url: self.base_url.clone(),
        }))
    }
}

/// `RUST_LOG` directives when set and valid, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .with(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<CollectorError>() {
                Some(err) if err.is_expected() => tracing::warn!("{err}"),
                _ => tracing::error!("{e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.integration_config()?;
    tracing::debug!("Using {config:?}");

    match cli.command {
        Command::Validate => {
            validate_invocation(&config).await?;
            tracing::info!("Configuration is valid");
        }
        Command::Collect { output } => {
            let graph = collect(&config).await?;
            write_graph(&graph, output.as_deref())?;
        }
    }
    Ok(())
}

fn write_graph(graph: &CollectedGraph, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(graph)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote collected graph to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn parses_collect_with_output() {
        let cli = Cli::try_parse_from([
            "godaddy-collector",
            "collect",
            "--output",
            "graph.json",
            "--api-key",
            "k",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Collect { output: Some(ref p) } if p == Path::new("graph.json")
        ));
        assert_eq!(cli.api_key.as_deref(), Some("k"));
    }

    #[test]
    fn flags_override_config_file() {
        let path = std::env::temp_dir().join(format!("godaddy-cli-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"apiKey":"file-key","apiSecret":"s","shopperId":"123"}"#)
            .unwrap();

        let cli = Cli::try_parse_from([
            "godaddy-collector",
            "validate",
            "--config",
            path.to_str().unwrap(),
            "--api-key",
            "flag-key",
        ])
        .unwrap();
        let config = cli.integration_config().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("flag-key"));
        assert_eq!(config.shopper_id.as_deref(), Some("123"));
    }

    #[test]
    fn log_filter_honours_env_level() {
        assert_eq!(log_filter(Some("debug")).max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(log_filter(Some("warn")).max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn log_filter_defaults_to_info() {
        assert_eq!(log_filter(None).max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn subcommand_required() {
        assert!(Cli::try_parse_from(["godaddy-collector"]).is_err());
    }
}
