//! classbook CLI: manage a class list backed by a remote student store.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use classbook_core::chart::ChartMode;

mod commands;

#[derive(Parser)]
#[command(name = "classbook", version, about = "Student grade-book client")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Store base URL (overrides config and CLASSBOOK_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List students with their status
    List,

    /// Add a student
    Add {
        #[arg(long)]
        name: String,

        #[arg(long, allow_hyphen_values = true)]
        average: String,
    },

    /// Edit a student's name and/or average
    Edit {
        #[arg(long)]
        id: i64,

        /// New name (unchanged if omitted)
        #[arg(long)]
        name: Option<String>,

        /// New average (unchanged if omitted)
        #[arg(long, allow_hyphen_values = true)]
        average: Option<String>,
    },

    /// Delete a student after confirmation
    Delete {
        #[arg(long)]
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show class mean, max, min and status counts
    Stats,

    /// Draw the class chart
    Chart {
        /// Chart type: line, pie
        #[arg(long, default_value = "line")]
        mode: ChartMode,

        /// Chart width in characters
        #[arg(long, default_value = "40")]
        width: usize,
    },

    /// Write a class report
    Report {
        /// Output file (default: ./classbook-report-<timestamp>.<format>)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: html, json
        #[arg(long, default_value = "html")]
        format: String,

        /// Chart shown first in the HTML report: line, pie
        #[arg(long, default_value = "line")]
        mode: ChartMode,
    },

    /// Interactive session over stdin
    Shell,

    /// Create a starter config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("classbook=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let conn = commands::Connection {
        config_path: cli.config,
        base_url: cli.base_url,
    };

    let result = match cli.command {
        Commands::List => commands::list::execute(&conn).await,
        Commands::Add { name, average } => commands::add::execute(&conn, name, average).await,
        Commands::Edit { id, name, average } => {
            commands::edit::execute(&conn, id, name, average).await
        }
        Commands::Delete { id, yes } => commands::delete::execute(&conn, id, yes).await,
        Commands::Stats => commands::stats::execute(&conn).await,
        Commands::Chart { mode, width } => commands::chart::execute(&conn, mode, width).await,
        Commands::Report {
            output,
            format,
            mode,
        } => commands::report::execute(&conn, output, format, mode).await,
        Commands::Shell => commands::shell::execute(&conn).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
