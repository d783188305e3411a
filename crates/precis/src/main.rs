// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Precis - local usage metering for the summarizer front end.
//!
//! This is the binary entry point for the `precis` command.

mod history;
mod prefs;
mod usage;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use precis_config::PrecisConfig;
use precis_core::{BlobStore, PrecisError};
use precis_usage::MAX_WINDOW_DAYS;

/// Precis - usage metering and preferences.
#[derive(Parser, Debug)]
#[command(name = "precis", version, about, long_about = None)]
struct Cli {
    /// Config file to use instead of the standard lookup.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Record token usage directly.
    Record {
        #[arg(long)]
        input_tokens: u64,
        #[arg(long)]
        output_tokens: u64,
        #[arg(long, default_value_t = 1)]
        requests: u64,
        /// Day to attribute the usage to (default: today, UTC).
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Estimate and record a completed model call. Prefix a value with `@` to read a file.
    Report {
        #[arg(long)]
        prompt: String,
        #[arg(long)]
        response: String,
    },
    /// Estimate the token count of a text.
    Estimate { text: String },
    /// Show all-time totals and the current tier.
    Stats,
    /// Show per-day usage for a trailing window.
    Window {
        /// Window length (default: `usage.window_days`).
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..=MAX_WINDOW_DAYS as u64))]
        days: Option<u64>,
        /// Last day of the window (default: today, UTC).
        #[arg(long)]
        anchor: Option<NaiveDate>,
    },
    /// Write the usage ledger as JSON.
    Export {
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Replace the usage ledger with a previously exported file.
    Import { file: PathBuf },
    /// Delete all recorded usage.
    Reset,
    /// Manage profile, settings and preference documents.
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// Browse and manage the summary history.
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// List summaries, newest first.
    List {
        /// Only saved summaries.
        #[arg(long)]
        saved: bool,
    },
    /// Add a summary. Prefix a value with `@` to read a file.
    Add {
        #[arg(long)]
        text: String,
        #[arg(long)]
        summary: String,
        /// Requested summary length in sentences.
        #[arg(long, default_value_t = 10)]
        length: u32,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Mark the new summary as saved.
        #[arg(long)]
        saved: bool,
    },
    /// Toggle the saved flag of a summary.
    Save { id: String },
    Delete { id: String },
    /// Delete every summary.
    Clear,
    Tag { id: String, tag: String },
    Untag { id: String, tag: String },
    /// Show history totals.
    Stats,
}

#[derive(Subcommand, Debug)]
enum PrefsAction {
    Show { doc: DocKind },
    Export { doc: DocKind },
    Reset { doc: DocKind },
    Import { doc: DocKind, file: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DocKind {
    Profile,
    Settings,
    Preferences,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => precis_config::load_and_validate_path(path),
        None => precis_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            precis_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.app.log_level);

    match run(cli, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("precis: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, config: &PrecisConfig) -> Result<ExitCode, PrecisError> {
    // Estimation needs no storage.
    if let Commands::Estimate { text } = &cli.command {
        usage::run_estimate(text, cli.json)?;
        return Ok(ExitCode::SUCCESS);
    }

    let store: Arc<dyn BlobStore> = precis_storage::open_store(&config.storage)?;
    tracing::debug!(backend = store.name(), "store opened");

    match cli.command {
        Commands::Prefs { action } => prefs::run(store, action, cli.json),
        Commands::History { action } => history::run(store, action, cli.json),
        command => usage::run(store, config, command, cli.json),
    }
}

/// Initialize tracing with an env filter, writing to stderr.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("precis={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Resolve an argument that is either literal text or `@path`.
fn read_text_arg(value: &str) -> Result<String, PrecisError> {
    match value.strip_prefix('@') {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => Ok(value.to_string()),
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), PrecisError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn binary_loads_config_defaults() {
        let config = precis_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.app.name, "precis");
        assert_eq!(config.usage.window_days, 7);
    }

    #[test]
    fn parses_record_with_date() {
        let cli = Cli::try_parse_from([
            "precis",
            "record",
            "--input-tokens",
            "120",
            "--output-tokens",
            "30",
            "--date",
            "2026-10-19",
        ])
        .unwrap();
        match cli.command {
            Commands::Record {
                input_tokens,
                output_tokens,
                requests,
                date,
            } => {
                assert_eq!((input_tokens, output_tokens, requests), (120, 30, 1));
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 19));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_date() {
        let result = Cli::try_parse_from(["precis", "window", "--anchor", "19/10/2026"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["precis", "stats", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Stats));
    }

    #[test]
    fn window_days_are_bounded() {
        let max = MAX_WINDOW_DAYS.to_string();
        let cli = Cli::try_parse_from(["precis", "window", "--days", max.as_str()]).unwrap();
        assert!(matches!(cli.command, Commands::Window { days: Some(366), .. }));

        let over = (MAX_WINDOW_DAYS + 1).to_string();
        assert!(Cli::try_parse_from(["precis", "window", "--days", over.as_str()]).is_err());
        assert!(Cli::try_parse_from(["precis", "window", "--days", "0"]).is_err());
        assert!(Cli::try_parse_from(["precis", "window", "--days", "2000000000"]).is_err());
    }

    #[test]
    fn parses_prefs_import() {
        let cli = Cli::try_parse_from(["precis", "prefs", "import", "preferences", "p.json"]).unwrap();
        match cli.command {
            Commands::Prefs {
                action: PrefsAction::Import { doc, file },
            } => {
                assert_eq!(doc, DocKind::Preferences);
                assert_eq!(file, PathBuf::from("p.json"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_history_add_with_tags() {
        let cli = Cli::try_parse_from([
            "precis", "history", "add", "--text", "@in.txt", "--summary", "short", "--tag", "a", "--tag",
            "b",
        ])
        .unwrap();
        match cli.command {
            Commands::History {
                action:
                    HistoryAction::Add {
                        text,
                        length,
                        tags,
                        saved,
                        ..
                    },
            } => {
                assert_eq!(text, "@in.txt");
                assert_eq!(length, 10);
                assert_eq!(tags, vec!["a".to_string(), "b".to_string()]);
                assert!(!saved);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn text_arg_reads_file_with_at_prefix() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "from disk").unwrap();
        let arg = format!("@{}", file.path().display());
        assert_eq!(read_text_arg(&arg).unwrap(), "from disk");
        assert_eq!(read_text_arg("literal").unwrap(), "literal");
    }

    #[test]
    fn missing_text_file_is_io_error() {
        let err = read_text_arg("@/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, PrecisError::Io(_)));
    }
}
