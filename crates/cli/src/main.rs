//! Coopcomply CLI - training compliance operations from the command line
//!
//! Usage:
//! ```bash
//! coopcomply login officer officer123
//! coopcomply trainings --status upcoming --sort-by-date
//! coopcomply dashboard officer-456
//! coopcomply report compliance --format markdown --output compliance.md
//! coopcomply run commands.json --save ledger.json
//! coopcomply --data ledger.json verify
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use coopcomply_ledger::LedgerConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{batch, officers, reports, session};

/// Coopcomply - cooperative officer training compliance ledger
#[derive(Parser)]
#[command(name = "coopcomply")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Ledger configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Ledger snapshot to start from (defaults to the demo data)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check credentials against the demo accounts
    Login {
        username: String,
        password: String,
    },

    /// List trainings
    Trainings {
        /// Only trainings with this status
        #[arg(long)]
        status: Option<StatusArg>,
        /// Sort by date instead of creation order
        #[arg(long)]
        sort_by_date: bool,
    },

    /// List officers and their compliance status
    Officers,

    /// Show an officer's self-service dashboard
    Dashboard {
        /// Officer ID (e.g., officer-456)
        officer_id: String,
    },

    /// Generate reports
    Report {
        /// Report type
        kind: ReportKind,
        /// Report format
        #[arg(long, default_value = "markdown")]
        format: ReportFormat,
        /// Output file path
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Apply a JSON file of commands in order
    Run {
        /// File containing a JSON array of commands
        file: PathBuf,
        /// Keep going after a rejected command
        #[arg(long)]
        keep_going: bool,
        /// Write the resulting snapshot here
        #[arg(long)]
        save: Option<PathBuf>,
    },

    /// Write the demo data set as a snapshot
    Seed {
        /// Output file path (stdout when omitted)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Check the ledger for consistency problems
    Verify,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Upcoming,
    Completed,
}

impl StatusArg {
    pub fn to_core_status(&self) -> coopcomply_core::TrainingStatus {
        match self {
            StatusArg::Upcoming => coopcomply_core::TrainingStatus::Upcoming,
            StatusArg::Completed => coopcomply_core::TrainingStatus::Completed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportKind {
    Attendance,
    Compliance,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Csv,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn to_render_format(self) -> coopcomply_reports::ReportFormat {
        match self {
            ReportFormat::Csv => coopcomply_reports::ReportFormat::Csv,
            ReportFormat::Json => coopcomply_reports::ReportFormat::Json,
            ReportFormat::Markdown => coopcomply_reports::ReportFormat::Markdown,
        }
    }
}

fn init_tracing(config: &LedgerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = LedgerConfig::load(cli.config.as_deref())?;
    init_tracing(&config);

    match cli.command {
        Commands::Login { username, password } => {
            session::login(&username, &password)?;
        }

        Commands::Trainings {
            status,
            sort_by_date,
        } => {
            let ledger = batch::open(config, cli.data.as_deref())?;
            officers::list_trainings(&ledger, status, sort_by_date);
        }

        Commands::Officers => {
            let ledger = batch::open(config, cli.data.as_deref())?;
            officers::list_officers(&ledger);
        }

        Commands::Dashboard { officer_id } => {
            let ledger = batch::open(config, cli.data.as_deref())?;
            officers::dashboard(&ledger, &officer_id)?;
        }

        Commands::Report {
            kind,
            format,
            output,
        } => {
            let ledger = batch::open(config, cli.data.as_deref())?;
            reports::generate(&ledger, kind, format, output)?;
        }

        Commands::Run {
            file,
            keep_going,
            save,
        } => {
            let mut ledger = batch::open(config, cli.data.as_deref())?;
            batch::run(&mut ledger, &file, keep_going, save.as_deref())?;
        }

        Commands::Seed { output } => {
            batch::seed(output.as_deref())?;
        }

        Commands::Verify => {
            let ledger = batch::open(config, cli.data.as_deref())?;
            batch::verify(&ledger)?;
        }
    }

    Ok(())
}
