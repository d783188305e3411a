// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `precis history` subcommands.

use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;

use chrono::DateTime;
use colored::Colorize;
use precis_core::{BlobStore, PrecisError};
use precis_profile::{NewSummary, Summary, SummaryHistory, SummaryStats};

use crate::{HistoryAction, print_json, read_text_arg};

/// Characters of a summary shown per line in `history list`.
const PREVIEW_CHARS: usize = 60;

pub(crate) fn run(store: Arc<dyn BlobStore>, action: HistoryAction, json: bool) -> Result<ExitCode, PrecisError> {
    let mut history = SummaryHistory::load(store);
    let use_color = std::io::stdout().is_terminal();

    let found = match action {
        HistoryAction::List { saved } => {
            let entries: Vec<&Summary> = if saved {
                history.saved().collect()
            } else {
                history.entries().iter().collect()
            };
            if json {
                print_json(&entries)?;
            } else {
                for entry in entries {
                    print_entry(entry, use_color);
                }
            }
            true
        }
        HistoryAction::Add {
            text,
            summary,
            length,
            tags,
            saved,
        } => {
            let mut new = NewSummary::new(read_text_arg(&text)?, read_text_arg(&summary)?, length);
            new.is_saved = saved;
            if !tags.is_empty() {
                new.tags = Some(tags);
            }
            let entry = history.add(new);
            if json {
                print_json(&entry)?;
            } else {
                println!("{}", entry.id);
            }
            true
        }
        HistoryAction::Save { id } => match history.toggle_save(&id) {
            Some(saved) => {
                println!("{id}: {}", if saved { "saved" } else { "unsaved" });
                true
            }
            None => false,
        },
        HistoryAction::Delete { id } => history.delete(&id),
        HistoryAction::Clear => {
            history.clear();
            true
        }
        HistoryAction::Tag { id, tag } => {
            history.add_tag(&id, &tag);
            history.get(&id).is_some()
        }
        HistoryAction::Untag { id, tag } => {
            history.remove_tag(&id, &tag);
            history.get(&id).is_some()
        }
        HistoryAction::Stats => {
            print_stats(history.stats(), json)?;
            true
        }
    };

    if found {
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("precis: no summary with that id");
        Ok(ExitCode::FAILURE)
    }
}

fn print_entry(entry: &Summary, use_color: bool) {
    let when = DateTime::from_timestamp_millis(entry.timestamp)
        .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default();
    let mut preview: String = entry.summary.chars().take(PREVIEW_CHARS).collect();
    if entry.summary.chars().count() > PREVIEW_CHARS {
        preview.push_str("...");
    }
    let marker = if entry.is_saved { "*" } else { " " };
    let tags = entry.tags.as_deref().unwrap_or_default().join(",");
    if use_color {
        println!("{} {} {} {} {}", entry.id.dimmed(), when, marker.yellow(), preview, tags.cyan());
    } else {
        println!("{} {when} {marker} {preview} {tags}", entry.id);
    }
}

fn print_stats(stats: SummaryStats, json: bool) -> Result<(), PrecisError> {
    if json {
        return print_json(&stats);
    }
    println!("summaries: {}, saved: {}, words summarized: {}", stats.total, stats.saved, stats.total_words);
    Ok(())
}
