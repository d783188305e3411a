// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `precis prefs` subcommands.

use std::process::ExitCode;
use std::sync::Arc;

use precis_core::{BlobStore, PrecisError};
use precis_profile::{AccountSettings, Document, DocumentStore, UserPreferences, UserProfile};

use crate::{DocKind, PrefsAction, print_json};

pub(crate) fn run(store: Arc<dyn BlobStore>, action: PrefsAction, json: bool) -> Result<ExitCode, PrecisError> {
    let doc = match &action {
        PrefsAction::Show { doc }
        | PrefsAction::Export { doc }
        | PrefsAction::Reset { doc }
        | PrefsAction::Import { doc, .. } => *doc,
    };
    match doc {
        DocKind::Profile => apply::<UserProfile>(store, action, json),
        DocKind::Settings => apply::<AccountSettings>(store, action, json),
        DocKind::Preferences => apply::<UserPreferences>(store, action, json),
    }
}

fn apply<T: Document>(
    store: Arc<dyn BlobStore>,
    action: PrefsAction,
    json: bool,
) -> Result<ExitCode, PrecisError> {
    let mut docs = DocumentStore::<T>::load(store);
    match action {
        PrefsAction::Show { .. } | PrefsAction::Export { .. } => {
            println!("{}", docs.export()?);
        }
        PrefsAction::Reset { .. } => {
            docs.reset();
            if !json {
                println!("{} reset to defaults", T::KEY);
            }
        }
        PrefsAction::Import { file, .. } => {
            let payload = std::fs::read_to_string(&file)?;
            let outcome = docs.import(&payload);
            if json {
                print_json(&outcome)?;
            } else {
                println!("{}", outcome.message);
            }
            if !outcome.success {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
