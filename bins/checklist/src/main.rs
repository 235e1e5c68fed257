//! KYC checklist CLI
//!
//! Generates the document checklist for a case exported from the case store
//! and prints it, with progress and gates, as JSON.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use kyc_core::workflow::UserRole;
use kyc_shared::{AppConfig, LoggingConfig};

/// KYC checklist engine.
#[derive(Parser, Debug)]
#[command(name = "kyc-checklist", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Extra configuration file layered over `config/`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the checklist for a case.
    Generate {
        /// Case JSON as exported by the case store.
        #[arg(long)]
        case: PathBuf,

        /// JSON array with the full party roster.
        #[arg(long)]
        parties: PathBuf,

        /// Role whose progress view is reported (rm, checker, compliance, gm).
        #[arg(long, default_value = "rm", value_parser = parse_role)]
        role: UserRole,

        /// Evaluate document expiry as of this date (defaults to today, UTC).
        #[arg(long)]
        as_of: Option<NaiveDate>,

        /// JSON catalog replacing the configured one.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// List valid relationship roles for an entity type.
    Roles {
        /// Entity type, e.g. "Trust".
        #[arg(long)]
        entity_type: String,

        /// JSON catalog replacing the configured one.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Parse and validate a catalog file.
    ValidateCatalog {
        /// Catalog JSON to check.
        #[arg(long)]
        catalog: PathBuf,
    },
}

fn parse_role(s: &str) -> Result<UserRole, String> {
    UserRole::parse(s).ok_or_else(|| format!("unknown role '{s}'"))
}

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load_with(cli.config.as_deref().and_then(|p| p.to_str())) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::from(2);
        }
    };

    init_tracing(&config.logging, cli.verbose, cli.json_logs);
    tracing::debug!(category_mode = ?config.checklist.category_mode, "configuration loaded");

    let result = match cli.command {
        Commands::Generate {
            case,
            parties,
            role,
            as_of,
            catalog,
        } => commands::run_generate(
            &config.checklist,
            &commands::GenerateArgs {
                case,
                parties,
                role,
                as_of,
                catalog,
            },
        ),
        Commands::Roles {
            entity_type,
            catalog,
        } => commands::run_roles(&config.checklist, &entity_type, catalog.as_deref()),
        Commands::ValidateCatalog { catalog } => commands::run_validate_catalog(&catalog),
    };

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

/// Logs go to stderr so stdout stays valid JSON.
fn init_tracing(logging: &LoggingConfig, verbose: u8, json_logs: bool) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter)),
        1 => EnvFilter::new("kyc=debug"),
        _ => EnvFilter::new("trace"),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json_logs || logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
