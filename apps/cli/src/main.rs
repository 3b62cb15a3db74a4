//! DRT CLI
//!
//! Keeps a local SQLite copy of DIU student results in step with the
//! university's result service.
//!
//! # Commands
//!
//! - `sync-students` - Refresh student identity records
//! - `sync-results` - Sync course results for students and semesters
//! - `detect-ranges` - Discover which student identifiers exist
//! - `stats` - Show what is stored

mod commands;
mod config;
mod context;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::OutputFormat;
use config::{Config, LogFormat};
use context::AppContext;

/// DIU result synchronization tools.
#[derive(Parser)]
#[command(name = "drt")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the SQLite database file (overrides DRT_DB_PATH)
    #[arg(global = true, long)]
    db_path: Option<String>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Report format
    #[arg(global = true, short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh identity records for the given students
    SyncStudents {
        /// Student identifiers, e.g. 181-15-955
        #[arg(required = true)]
        student_ids: Vec<String>,
    },

    /// Sync course results for every student and semester pair
    SyncResults {
        /// Student identifiers (comma separated)
        #[arg(short, long, value_delimiter = ',', required = true)]
        students: Vec<String>,

        /// Semester identifiers, e.g. 221 (comma separated)
        #[arg(short = 'S', long, value_delimiter = ',', required = true)]
        semesters: Vec<String>,
    },

    /// Probe sequence numbers and report the ranges that exist remotely
    DetectRanges {
        /// Admission semester code, the first identifier part
        semester_code: String,

        /// Department code, the second identifier part
        dept_code: String,

        /// First sequence number to probe
        #[arg(long, default_value = "1")]
        from: u32,

        /// Last sequence number to probe
        #[arg(long)]
        to: u32,

        /// Sync results of every discovered student for these semesters
        #[arg(long = "sync-semester", value_delimiter = ',')]
        sync_semesters: Vec<String>,
    },

    /// Show stored row counts
    Stats {
        /// Also list the stored students
        #[arg(long)]
        students: bool,

        /// Also list the stored result lines of this student
        #[arg(long)]
        student: Option<String>,
    },
}

fn init_tracing(log_format: LogFormat, verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false).with_writer(std::io::stderr))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    init_tracing(config.log_format, cli.verbose);
    if let Some(db_path) = cli.db_path {
        config.db_path = db_path;
    }

    let ctx = AppContext::build(&config)?;

    match cli.command {
        Commands::SyncStudents { student_ids } => {
            commands::sync_students::run(&ctx, &student_ids, cli.format).await?;
        }
        Commands::SyncResults {
            students,
            semesters,
        } => {
            commands::sync_results::run(&ctx, &students, &semesters, cli.format).await?;
        }
        Commands::DetectRanges {
            semester_code,
            dept_code,
            from,
            to,
            sync_semesters,
        } => {
            commands::detect_ranges::run(
                &ctx,
                &semester_code,
                &dept_code,
                from,
                to,
                &sync_semesters,
                cli.format,
            )
            .await?;
        }
        Commands::Stats { students, student } => {
            commands::stats::run(&ctx, students, student.as_deref(), cli.format)?;
        }
    }

    Ok(())
}
