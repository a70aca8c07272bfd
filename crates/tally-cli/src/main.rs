use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tally_session::{MatchConfig, NoMatchPolicy, SessionPaths};

mod commands;

/// Tally: match benchmark items to priced store items, one row at a time.
#[derive(Parser, Debug)]
#[command(name = "tally", version, about)]
pub struct Cli {
    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Benchmark table (CSV) whose price columns are filled in
    #[arg(long, global = true, default_value = "updated_benchmark.csv")]
    benchmark: PathBuf,

    /// Reference catalog (CSV) with per-vendor prices
    #[arg(long, global = true, default_value = "store_prices.csv")]
    reference: PathBuf,

    /// Cursor file recording the next row to handle
    #[arg(long, global = true, default_value = "progress.json")]
    progress: PathBuf,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum candidates per row
    #[arg(long, global = true)]
    limit: Option<usize>,

    /// Drop candidates scoring below this (0-100)
    #[arg(long, global = true)]
    min_score: Option<f64>,

    /// Skip rows without candidates instead of asking
    #[arg(long, global = true)]
    auto_skip: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Confirm matches interactively (default)
    Run,
    /// Show candidates for a row without changing anything
    Candidates {
        /// Row to inspect (default: the row awaiting a decision)
        #[arg(long)]
        row: Option<usize>,

        #[arg(long, value_enum, default_value_t = Format::Human)]
        format: Format,
    },
    /// Apply a candidate's prices to the row awaiting a decision
    Confirm {
        #[arg(long)]
        row: usize,

        /// Candidate number as listed (1-based)
        #[arg(long, default_value_t = 1)]
        index: usize,
    },
    /// Leave the row awaiting a decision unpriced and move on
    Skip {
        #[arg(long)]
        row: usize,
    },
    /// Show progress and catalog counts
    Status,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Human,
    Jsonl,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn paths(&self) -> SessionPaths {
        SessionPaths {
            benchmark: self.benchmark.clone(),
            reference: self.reference.clone(),
            progress: self.progress.clone(),
        }
    }

    /// Config file values, overridden by any flags given.
    pub fn match_config(&self) -> Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::load(path)?,
            None => MatchConfig::default(),
        };
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if let Some(min_score) = self.min_score {
            config.min_score = min_score;
        }
        if self.auto_skip {
            config.no_match_policy = NoMatchPolicy::AutoSkip;
        }
        config.validate()?;
        Ok(config)
    }

    fn log_filter(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn init_logging(cli: &Cli) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_filter()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    match cli.command.as_ref().unwrap_or(&Command::Run) {
        Command::Run => commands::run::run(&cli),
        Command::Candidates { row, format } => commands::candidates::run(&cli, *row, *format),
        Command::Confirm { row, index } => commands::confirm::run(&cli, *row, *index),
        Command::Skip { row } => commands::skip::run(&cli, *row),
        Command::Status => commands::status::run(&cli),
    }
}
