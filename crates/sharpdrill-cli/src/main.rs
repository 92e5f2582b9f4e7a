//! The sharpdrill command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use sharpdrill_core::model::QuestionKind;

mod commands;
mod signals;
mod terminal;

#[derive(Parser)]
#[command(name = "sharpdrill", version, about = "Adaptive German vocabulary drill")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a drill
    Drill {
        /// Number of questions (1 to 99)
        #[arg(short, long)]
        questions: Option<usize>,

        /// Offer the review phase at the end
        #[arg(long, conflicts_with = "no_review")]
        review: bool,

        /// Skip the review phase
        #[arg(long)]
        no_review: bool,

        /// Question types to drill (e.g. "noun,adjprep")
        #[arg(long, value_delimiter = ',')]
        types: Option<Vec<QuestionKind>>,

        /// Start with casual mode on (records are not saved)
        #[arg(long)]
        casual: bool,

        /// Seed for reproducible question selection
        #[arg(long)]
        seed: Option<u64>,

        /// Skip the interactive settings step
        #[arg(short, long)]
        yes: bool,
    },

    /// Show per-item statistics, hardest first
    Stats {
        /// Show at most this many items
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Reset every record to its initial state
    Reset {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Copy the records file
    Backup {
        /// Destination file (default: timestamped file next to the records)
        #[arg(long)]
        target: Option<PathBuf>,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Check the material file for problems
    Validate,

    /// Create starter config, material and records files
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("sharpdrill=warn,sharpdrill_core=warn")
            }),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Drill {
            questions,
            review,
            no_review,
            types,
            casual,
            seed,
            yes,
        } => {
            let review = match (review, no_review) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            commands::drill::execute(
                commands::drill::DrillOptions {
                    questions,
                    review,
                    types,
                    casual,
                    seed,
                    skip_settings: yes,
                },
                config,
            )
            .await
        }
        Commands::Stats { limit } => commands::stats::execute(limit, config),
        Commands::Reset { yes } => commands::reset::execute(yes, config),
        Commands::Backup { target, yes } => commands::backup::execute(target, yes, config),
        Commands::Validate => commands::validate::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
