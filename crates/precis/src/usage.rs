// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Usage ledger subcommands.
//!
//! Human output is coloured only when stdout is a TTY; `--json` prints the
//! serialized records or stats instead.

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use colored::Colorize;
use precis_config::PrecisConfig;
use precis_core::{BlobStore, PrecisError, TokenUsage};
use precis_usage::{
    LedgerOptions, TierWatch, UsageLedger, UsageRecord, UsageStats, estimate_tokens,
    estimate_usage, today_utc,
};
use serde::Serialize;

use crate::{Commands, print_json, read_text_arg};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Estimate {
    characters: usize,
    estimated_tokens: u64,
}

pub(crate) fn run_estimate(text: &str, json: bool) -> Result<(), PrecisError> {
    let text = read_text_arg(text)?;
    let estimate = Estimate {
        characters: text.chars().count(),
        estimated_tokens: estimate_tokens(&text),
    };
    if json {
        print_json(&estimate)
    } else {
        println!("~{} tokens ({} characters)", estimate.estimated_tokens, estimate.characters);
        Ok(())
    }
}

pub(crate) fn run(
    store: Arc<dyn BlobStore>,
    config: &PrecisConfig,
    command: Commands,
    json: bool,
) -> Result<ExitCode, PrecisError> {
    let mut ledger = UsageLedger::open(store, LedgerOptions::from_config(config));
    ledger.subscribe(Box::new(TierWatch::seeded(ledger.stats().current_tier)));
    let use_color = std::io::stdout().is_terminal();

    match command {
        Commands::Record {
            input_tokens,
            output_tokens,
            requests,
            date,
        } => {
            let date = date.unwrap_or_else(today_utc);
            let record = ledger.record_at(date, TokenUsage::new(input_tokens, output_tokens), requests);
            print_record(&record, json)?;
        }
        Commands::Report { prompt, response } => {
            let usage = estimate_usage(&read_text_arg(&prompt)?, &read_text_arg(&response)?);
            let record = ledger.record_at(today_utc(), usage, 1);
            print_record(&record, json)?;
        }
        Commands::Stats => {
            let stats = ledger.stats();
            if json {
                print_json(&stats)?;
            } else {
                print_stats(&stats, ledger.len(), use_color);
            }
        }
        Commands::Window { days, anchor } => {
            let days = days.map_or(config.usage.window_days, |d| d as usize);
            let window = match anchor {
                Some(anchor) => ledger.window(days, anchor),
                None => ledger.last_n_days(days),
            }
            .map_err(|e| PrecisError::Config(e.to_string()))?;
            if json {
                print_json(&window)?;
            } else {
                print_window(&window, use_color);
            }
        }
        Commands::Export { output } => {
            let exported = ledger.export()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, exported)?;
                    eprintln!("precis: exported {} records to {}", ledger.len(), path.display());
                }
                None => println!("{exported}"),
            }
        }
        Commands::Import { file } => {
            let payload = std::fs::read_to_string(&file)?;
            let outcome = ledger.import(&payload);
            if json {
                print_json(&outcome)?;
            } else {
                println!("{}", outcome.message);
            }
            if !outcome.success {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Reset => {
            ledger.reset();
            if !json {
                println!("usage history cleared");
            }
        }
        Commands::Estimate { .. } | Commands::Prefs { .. } | Commands::History { .. } => {
            return Err(PrecisError::Internal("not a ledger command".to_string()));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_record(record: &UsageRecord, json: bool) -> Result<(), PrecisError> {
    if json {
        return print_json(record);
    }
    let tokens = TokenUsage::new(record.input_tokens, record.output_tokens);
    println!(
        "{}: {} requests, {} tokens ({} in / {} out), ${:.4}",
        record.date,
        record.requests,
        tokens.total(),
        tokens.input_tokens,
        tokens.output_tokens,
        record.estimated_cost
    );
    Ok(())
}

fn print_stats(stats: &UsageStats, days: usize, use_color: bool) {
    println!();
    println!("  precis usage");
    println!("  {}", "-".repeat(35));
    println!("    Requests:      {}", stats.total_requests);
    println!("    Input tokens:  {}", stats.total_input_tokens);
    println!("    Output tokens: {}", stats.total_output_tokens);
    println!("    Est. cost:     ${:.4}", stats.total_cost);
    if use_color {
        println!(
            "    Tier:          {} ({} req/min)",
            stats.current_tier.to_string().green(),
            stats.rate_limit
        );
    } else {
        println!("    Tier:          {} ({} req/min)", stats.current_tier, stats.rate_limit);
    }
    println!("    Days tracked:  {days}");
    println!();
}

fn print_window(window: &[UsageRecord], use_color: bool) {
    for record in window {
        let line = format!(
            "{}  {:>6} req  {:>10} in  {:>10} out  ${:.4}",
            record.date, record.requests, record.input_tokens, record.output_tokens, record.estimated_cost
        );
        if use_color && record.requests == 0 {
            println!("{}", line.dimmed());
        } else {
            println!("{line}");
        }
    }
}
