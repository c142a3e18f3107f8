//! CLI command definitions and handlers

mod classify;
mod init;
mod lexicon;
mod report;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use stylecoach::config::{load_config, StyleConfig};

/// Parse and validate workers count (1-64)
fn parse_workers(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("workers must be at least 1".to_string())
    } else if n > 64 {
        Err("workers cannot exceed 64".to_string())
    } else {
        Ok(n)
    }
}

/// stylecoach - developer interaction style classification
#[derive(Parser, Debug)]
#[command(name = "stylecoach")]
#[command(
    version,
    about = "Classify developer interaction styles from conversation transcripts and generate coaching",
    long_about = "stylecoach scores developer messages against a weighted pattern lexicon, \
ranks five interaction styles (strategic architect, technical implementer, learning explorer, \
rapid prototyper, creative collaborator) and labels each profile pure, hybrid or balanced.\n\n\
Transcripts are JSON arrays or JSON Lines of message records:\n  \
{\"id\": \"m1\", \"subject_id\": \"dev-1\", \"text\": \"...\", \"timestamp\": \"2026-01-01T10:00:00Z\", \"role\": \"user\"}",
    after_help = "\
Examples:
  stylecoach classify transcript.jsonl              Profile every developer in a transcript
  stylecoach classify - -f json -o profiles.json    Read stdin, save profiles for reporting
  stylecoach report profiles.json --days 30         Per-developer summary for the last 30 days
  stylecoach lexicon --verbose                      Show the active pattern lexicon
  stylecoach init                                   Write an example stylecoach.toml"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace); RUST_LOG takes priority
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: ./stylecoach.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of parallel workers (1-64, default: one per CPU)
    #[arg(long, global = true, value_parser = parse_workers)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify each developer in a transcript
    #[command(after_help = "\
Examples:
  stylecoach classify chat.jsonl                     Text report
  stylecoach classify chat.jsonl --subject dev-1     Only one developer
  stylecoach classify chat.json -f markdown -o styles.md
  stylecoach classify chat.jsonl --lexicon-file team.toml")]
    Classify {
        /// Transcript file (JSON array or JSON Lines); `-` reads stdin
        input: PathBuf,

        /// Output format: text, json, markdown (or md) [default: text]
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Only classify this subject
        #[arg(long)]
        subject: Option<String>,

        /// Score every message, not only role=user
        #[arg(long)]
        all_roles: bool,

        /// Custom lexicon TOML file
        #[arg(long, conflicts_with = "lexicon_version")]
        lexicon_file: Option<PathBuf>,

        /// Built-in lexicon version
        #[arg(long)]
        lexicon_version: Option<String>,
    },

    /// Summarize saved profiles per developer over a time window
    #[command(after_help = "\
Examples:
  stylecoach report profiles.json
  stylecoach report profiles.json --subject dev-1 --days 14
  stylecoach report profiles.json --since 2026-01-01T00:00:00Z --until 2026-02-01T00:00:00Z")]
    Report {
        /// Profiles JSON written by `classify -f json`
        profiles: PathBuf,

        /// Only summarize this subject
        #[arg(long)]
        subject: Option<String>,

        /// Only profiles generated in the last N days
        #[arg(long, conflicts_with_all = ["since", "until"])]
        days: Option<u32>,

        /// Window start, inclusive (RFC 3339)
        #[arg(long)]
        since: Option<String>,

        /// Window end, exclusive (RFC 3339)
        #[arg(long)]
        until: Option<String>,

        /// Output format: text, json, markdown (or md) [default: text]
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,
    },

    /// Validate and list the active pattern lexicon
    Lexicon {
        /// Custom lexicon TOML file
        #[arg(long, conflicts_with = "lexicon_version")]
        lexicon_file: Option<PathBuf>,

        /// Built-in lexicon version
        #[arg(long)]
        lexicon_version: Option<String>,

        /// List every pattern and weight
        #[arg(long, short = 'v')]
        verbose: bool,
    },

    /// Initialize a stylecoach.toml config file with example settings
    Init,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if let Some(workers) = cli.workers {
        rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build_global()
            .context("Failed to configure worker pool")?;
    }

    let cwd = std::env::current_dir().context("Failed to read current directory")?;

    match cli.command {
        Commands::Init => init::run(&cwd),

        Commands::Classify {
            input,
            format,
            output,
            subject,
            all_roles,
            lexicon_file,
            lexicon_version,
        } => {
            let config = resolve_config(&cwd, cli.config.as_deref(), lexicon_file, lexicon_version)?;
            classify::run(
                &config,
                &input,
                format.as_deref(),
                output.as_deref(),
                subject.as_deref(),
                all_roles,
            )
        }

        Commands::Report {
            profiles,
            subject,
            days,
            since,
            until,
            format,
        } => {
            let config = load_config(&cwd, cli.config.as_deref())?;
            let format = format.as_deref().unwrap_or(config.default_format());
            report::run(&profiles, subject.as_deref(), days, since.as_deref(), until.as_deref(), format)
        }

        Commands::Lexicon {
            lexicon_file,
            lexicon_version,
            verbose,
        } => {
            let config = resolve_config(&cwd, cli.config.as_deref(), lexicon_file, lexicon_version)?;
            lexicon::run(&config, verbose)
        }
    }
}

/// Load layered config, then apply lexicon flags on top
fn resolve_config(
    cwd: &Path,
    config_path: Option<&Path>,
    lexicon_file: Option<PathBuf>,
    lexicon_version: Option<String>,
) -> Result<StyleConfig> {
    let mut config = load_config(cwd, config_path)?;
    let mut flags = StyleConfig::default();
    if lexicon_version.is_some() {
        // A version flag beats a path inherited from config files
        config.lexicon.path = None;
    }
    flags.lexicon.path = lexicon_file;
    flags.lexicon.version = lexicon_version;
    config.merge(flags);
    Ok(config)
}
