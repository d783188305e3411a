// SPDX-FileCopyrightText: 2026 Precis Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end runs of the `precis` binary against a temp SQLite file.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let db = dir.path().join("data").join("precis.db");
        let config = format!(
            "[storage]\nbackend = \"sqlite\"\ndatabase_path = \"{}\"\n\n[usage]\nretention_days = 3\n",
            db.display()
        );
        std::fs::write(dir.path().join("precis.toml"), config).unwrap();
        Self { dir }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_precis"))
            .arg("--config")
            .arg(self.path().join("precis.toml"))
            .args(args)
            .current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path())
            .env("RUST_LOG", "off")
            .output()
            .unwrap()
    }

    fn json(&self, args: &[&str]) -> serde_json::Value {
        let mut full = vec!["--json"];
        full.extend_from_slice(args);
        let output = self.run(&full);
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        serde_json::from_slice(&output.stdout).unwrap()
    }
}

fn record(sandbox: &Sandbox, date: &str, input: &str, output: &str) {
    let out = sandbox.run(&[
        "record",
        "--input-tokens",
        input,
        "--output-tokens",
        output,
        "--date",
        date,
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
}

#[test]
fn records_persist_across_invocations() {
    let sandbox = Sandbox::new();
    record(&sandbox, "2026-10-18", "1000000", "0");
    record(&sandbox, "2026-10-18", "0", "1000000");

    let stats = sandbox.json(&["stats"]);
    assert_eq!(stats["totalRequests"], 2);
    assert_eq!(stats["currentTier"], "Tier 1");
    assert_eq!(stats["rateLimit"], 50);
    assert!((stats["totalCost"].as_f64().unwrap() - 18.0).abs() < 1e-9);
}

#[test]
fn retention_from_config_caps_history() {
    let sandbox = Sandbox::new();
    for date in ["2026-10-01", "2026-10-02", "2026-10-03", "2026-10-04"] {
        record(&sandbox, date, "10", "10");
    }

    let exported = sandbox.json(&["export"]);
    let dates: Vec<&str> = exported
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2026-10-04", "2026-10-03", "2026-10-02"]);
}

#[test]
fn window_is_zero_filled() {
    let sandbox = Sandbox::new();
    record(&sandbox, "2026-10-17", "40", "8");

    let window = sandbox.json(&["window", "--days", "3", "--anchor", "2026-10-18"]);
    let window = window.as_array().unwrap();
    assert_eq!(window.len(), 3);
    assert_eq!(window[0]["date"], "2026-10-16");
    assert_eq!(window[0]["requests"], 0);
    assert_eq!(window[1]["inputTokens"], 40);
    assert_eq!(window[2]["date"], "2026-10-18");
}

#[test]
fn bad_import_exits_nonzero_and_keeps_history() {
    let sandbox = Sandbox::new();
    record(&sandbox, "2026-10-18", "4", "4");
    let bad = sandbox.path().join("bad.json");
    std::fs::write(&bad, "{oops").unwrap();

    let out = sandbox.run(&["import", bad.to_str().unwrap()]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Invalid JSON format"));

    let stats = sandbox.json(&["stats"]);
    assert_eq!(stats["totalRequests"], 1);
}

#[test]
fn estimate_needs_no_store() {
    let sandbox = Sandbox::new();
    let estimate = sandbox.json(&["estimate", "hello world"]);
    assert_eq!(estimate["estimatedTokens"], 3);
    assert!(!sandbox.path().join("data").exists());
}

#[test]
fn preferences_import_and_reset() {
    let sandbox = Sandbox::new();
    let file = sandbox.path().join("prefs.json");
    std::fs::write(&file, r#"{"theme":"dark","defaultSummaryLength":5}"#).unwrap();

    let out = sandbox.run(&["prefs", "import", "preferences", file.to_str().unwrap()]);
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Preferences imported successfully"));

    let shown = sandbox.json(&["prefs", "show", "preferences"]);
    assert_eq!(shown["theme"], "dark");
    assert_eq!(shown["defaultSummaryLength"], 5);
    assert_eq!(shown["dateFormat"], "MM/DD/YYYY");

    assert!(sandbox.run(&["prefs", "reset", "preferences"]).status.success());
    let shown = sandbox.json(&["prefs", "show", "preferences"]);
    assert_eq!(shown["theme"], "auto");
}

#[test]
fn invalid_config_exits_nonzero() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.path().join("precis.toml"), "[usage]\nretension_days = 3\n").unwrap();
    let out = sandbox.run(&["stats"]);
    assert!(!out.status.success());
}

#[test]
fn window_days_beyond_cap_are_rejected() {
    let sandbox = Sandbox::new();
    let out = sandbox.run(&["window", "--days", "2000000000"]);
    assert!(!out.status.success());

    let full_year = sandbox.json(&["window", "--days", "366", "--anchor", "2026-10-18"]);
    assert_eq!(full_year.as_array().unwrap().len(), 366);
}

#[test]
fn default_window_ends_today() {
    let sandbox = Sandbox::new();
    let window = sandbox.json(&["window"]);
    let window = window.as_array().unwrap();
    assert_eq!(window.len(), 7);
    let last = window[6]["date"].as_str().unwrap();
    let today = chrono::Utc::now().date_naive().to_string();
    let yesterday = (chrono::Utc::now().date_naive() - chrono::Days::new(1)).to_string();
    assert!(last == today || last == yesterday, "{last}");
}

#[test]
fn oversized_window_in_config_exits_nonzero() {
    let sandbox = Sandbox::new();
    std::fs::write(sandbox.path().join("precis.toml"), "[usage]\nwindow_days = 1000\n").unwrap();
    let out = sandbox.run(&["stats"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("window_days"));
}

#[test]
fn history_add_tag_save_and_stats() {
    let sandbox = Sandbox::new();
    let text = sandbox.path().join("article.txt");
    std::fs::write(&text, "one two three four five").unwrap();
    let arg = format!("@{}", text.display());

    let added = sandbox.json(&["history", "add", "--text", &arg, "--summary", "Count.", "--tag", "demo"]);
    let id = added["id"].as_str().unwrap().to_string();
    assert_eq!(added["wordCount"], 5);
    assert_eq!(added["tags"][0], "demo");

    assert!(sandbox.run(&["history", "save", &id]).status.success());
    assert!(sandbox.run(&["history", "tag", &id, "news"]).status.success());
    assert!(!sandbox.run(&["history", "save", "no-such-id"]).status.success());

    let saved = sandbox.json(&["history", "list", "--saved"]);
    assert_eq!(saved.as_array().unwrap().len(), 1);
    assert_eq!(saved[0]["tags"], serde_json::json!(["demo", "news"]));

    let stats = sandbox.json(&["history", "stats"]);
    assert_eq!(stats["total"], 1);
    assert_eq!(stats["saved"], 1);
    assert_eq!(stats["totalWords"], 5);

    assert!(sandbox.run(&["history", "clear"]).status.success());
    let stats = sandbox.json(&["history", "stats"]);
    assert_eq!(stats["total"], 0);
}

#[test]
fn record_prints_total_tokens() {
    let sandbox = Sandbox::new();
    let out = sandbox.run(&[
        "record",
        "--input-tokens",
        "120",
        "--output-tokens",
        "30",
        "--date",
        "2026-10-18",
    ]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("150 tokens (120 in / 30 out)"), "{stdout}");
}

#[test]
fn report_estimates_and_records_today() {
    let sandbox = Sandbox::new();
    let prompt = "x".repeat(400);
    let record = sandbox.json(&["report", "--prompt", &prompt, "--response", "A short summary."]);
    assert_eq!(record["requests"], 1);
    assert_eq!(record["inputTokens"], 100);
    assert_eq!(record["outputTokens"], 4);

    let stats = sandbox.json(&["stats"]);
    assert_eq!(stats["totalRequests"], 1);
}
