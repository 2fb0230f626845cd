//! Command-line entry point for the compensation rollup engine.
//!
//! ```text
//! comp-rollup serve --port 8080 --data-dir ./projects
//! comp-rollup report --input roster.json
//! comp-rollup export-csv --input roster.json --output roster.csv
//! ```
//!
//! Logging is controlled with `RUST_LOG`; set `COMP_ROLLUP_LOG_FORMAT=json`
//! for machine-parseable output.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use comp_rollup::api::{AppState, create_router};
use comp_rollup::calculation::compute_report_with_rates;
use comp_rollup::config::ConfigLoader;
use comp_rollup::error::EngineError;
use comp_rollup::export::write_csv;
use comp_rollup::models::{BudgetSettings, Employee, Roster};
use comp_rollup::storage::{FileProjectStore, MemoryProjectStore, ProjectStore};

/// Compensation review rollup engine
#[derive(Parser, Debug)]
#[command(name = "comp-rollup")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration directory holding budget.yaml and exchange_rates.yaml.
    /// Built-in defaults are used when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,

        /// Directory for saved projects; projects are kept in memory when omitted
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },

    /// Print the budget report for a roster file as JSON
    Report {
        /// Roster file: {"employees": [...], "budget_settings": {...}}
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Export a roster file as CSV
    ExportCsv {
        /// Roster file: {"employees": [...]}
        #[arg(short, long)]
        input: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Shape of a roster input file.
#[derive(Debug, Deserialize)]
struct RosterFile {
    employees: Vec<Employee>,
    #[serde(default)]
    budget_settings: Option<BudgetSettings>,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid roster file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },

    #[error("Cannot write output: {0}")]
    Write(#[source] std::io::Error),

    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let log_format = std::env::var("COMP_ROLLUP_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "comp_rollup=info,tower_http=info".into());

    // Logs go to stderr so report and CSV output on stdout stay clean.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(dir) => {
            let loader = ConfigLoader::load(dir)?;
            info!(config_dir = %dir.display(), "Configuration loaded");
            loader
        }
        None => ConfigLoader::default(),
    };

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_dir,
        } => serve(config, &host, port, data_dir).await,
        Commands::Report { input } => report(&config, &input),
        Commands::ExportCsv { input, output } => export_csv(&input, output.as_deref()),
    }
}

async fn serve(
    config: ConfigLoader,
    host: &str,
    port: u16,
    data_dir: Option<PathBuf>,
) -> Result<(), CliError> {
    let store: Arc<dyn ProjectStore> = match data_dir {
        Some(dir) => {
            let store = FileProjectStore::open(&dir)?;
            info!(data_dir = %dir.display(), "Using file project store");
            Arc::new(store)
        }
        None => {
            info!("Using in-memory project store");
            Arc::new(MemoryProjectStore::new())
        }
    };

    let router = create_router(AppState::new(config, store));
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(CliError::Server)?;

    info!("Compensation rollup API listening on {}", addr);
    axum::serve(listener, router).await.map_err(CliError::Server)
}

fn report(config: &ConfigLoader, input: &Path) -> Result<(), CliError> {
    let file = read_roster_file(input)?;
    let settings = file
        .budget_settings
        .unwrap_or_else(|| config.budget_settings().clone());

    let roster = Roster::from_employees(file.employees)?;
    let report = compute_report_with_rates(roster.employees(), &settings, config.exchange_rates());

    info!(
        employees_count = roster.len(),
        over_budget = report.budget.is_over_budget,
        "Report computed"
    );

    let json = serde_json::to_string_pretty(&report).map_err(|e| EngineError::ExportError {
        message: e.to_string(),
    })?;
    println!("{}", json);
    Ok(())
}

fn export_csv(input: &Path, output: Option<&Path>) -> Result<(), CliError> {
    let file = read_roster_file(input)?;

    match output {
        Some(path) => {
            let out = fs::File::create(path).map_err(CliError::Write)?;
            write_csv(&file.employees, out)?;
            info!(output = %path.display(), employees_count = file.employees.len(), "CSV written");
        }
        None => write_csv(&file.employees, std::io::stdout().lock())?,
    }
    Ok(())
}

fn read_roster_file(path: &Path) -> Result<RosterFile, CliError> {
    let path_str = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path_str.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Parse {
        path: path_str,
        source,
    })
}
