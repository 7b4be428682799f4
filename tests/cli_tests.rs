// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use assert_cmd::Command;
use assert_cmd::assert::Assert;
use predicates::prelude::*;
use predicates::str::contains;
use std::fs;
use tallybook::store::HOME_ENV;
use tempfile::{TempDir, tempdir};

fn tallybook(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tallybook").unwrap();
    cmd.env(HOME_ENV, home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn init_seeds_categories() {
    let home = tempdir().unwrap();
    tallybook(&home)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("Data directory initialized"));
    tallybook(&home)
        .args(["category", "list", "--json"])
        .assert()
        .success()
        .stdout(contains("\"Food\""));
}

#[test]
fn tx_requires_a_current_user() {
    let home = tempdir().unwrap();
    tallybook(&home)
        .args(["tx", "income", "--amount", "10", "--source", "job"])
        .assert()
        .failure()
        .stderr(contains("No current user"));
}

#[test]
fn record_and_report_a_month() {
    let home = tempdir().unwrap();
    tallybook(&home)
        .args(["user", "add", "sam", "sam@example.com"])
        .assert()
        .success();
    tallybook(&home)
        .args(["user", "switch", "sam@example.com"])
        .assert()
        .success();

    let entries: [&[&str]; 4] = [
        &["tx", "income", "-a", "100", "-s", "Payroll", "--date", "2024-03-05"],
        &["tx", "expense", "-a", "40", "-c", "Food", "--date", "2024-03-05 12:30"],
        &["tx", "expense", "-a", "20", "-c", "Food", "--date", "2024-03-10"],
        &["tx", "income", "-a", "50", "-s", "Gift", "--date", "2024-03-20"],
    ];
    for args in entries {
        tallybook(&home).args(args).assert().success();
    }

    tallybook(&home)
        .args(["report", "summary", "--month", "2024-03", "--no-color"])
        .assert()
        .success()
        .stdout(contains("income 150.00 | expense 60.00"))
        .stdout(contains("Food: 60.00"))
        .stdout(contains("2024-03-10: -20.00"))
        .stdout(contains("Income: 150.00 (71%)"));

    tallybook(&home)
        .args(["report", "summary", "--month", "2024-04", "--no-color"])
        .assert()
        .success()
        .stdout(contains("No income or expense recorded for this month."));

    tallybook(&home)
        .args(["report", "daily", "--month", "2024-03", "--json"])
        .assert()
        .success()
        .stdout(contains("\"2024-03-20\""));
}

/// A user with one March 2024 income entry.
fn seed_march(home: &TempDir) {
    tallybook(home)
        .args(["user", "add", "sam", "sam@example.com"])
        .assert()
        .success();
    tallybook(home)
        .args([
            "--user",
            "sam@example.com",
            "tx",
            "income",
            "-a",
            "1",
            "-s",
            "x",
            "--date",
            "2024-03-01",
        ])
        .assert()
        .success();
}

fn summary(home: &TempDir, extra: &[&str]) -> Assert {
    tallybook(home)
        .args(["report", "summary", "-m", "2024-03", "--no-color", "--user", "sam@example.com"])
        .args(extra)
        .assert()
}

#[test]
fn width_is_remembered() {
    let home = tempdir().unwrap();
    seed_march(&home);
    summary(&home, &["-w", "5"])
        .success()
        .stdout(contains("[■■■■■]"));
    summary(&home, &[]).success().stdout(contains("[■■■■■]"));
}

#[test]
fn oversized_width_is_rejected_and_not_saved() {
    let home = tempdir().unwrap();
    seed_march(&home);
    summary(&home, &["-w", "5"]).success();
    let settings = home.path().join("settings.json");
    let before = fs::read_to_string(&settings).unwrap();

    for width in ["201", "100000", "18446744073709551615"] {
        summary(&home, &["-w", width])
            .failure()
            .code(2)
            .stderr(contains("--width"));
    }
    assert_eq!(fs::read_to_string(&settings).unwrap(), before);
    summary(&home, &[]).success().stdout(contains("[■■■■■]"));
}

#[test]
fn hand_edited_width_fails_without_panicking() {
    let home = tempdir().unwrap();
    seed_march(&home);
    fs::write(home.path().join("settings.json"), r#"{"chart_width": 100000}"#).unwrap();
    summary(&home, &[])
        .failure()
        .code(1)
        .stderr(contains("Chart width 100000 is too large"))
        .stderr(contains("panicked").not());
    // A valid width on the command line replaces the bad one.
    summary(&home, &["-w", "4"]).success().stdout(contains("[■■■■]"));
    summary(&home, &[]).success().stdout(contains("[■■■■]"));
}

#[test]
fn json_summary_carries_chart_and_saves_width() {
    let home = tempdir().unwrap();
    seed_march(&home);
    summary(&home, &["--json", "-w", "7"])
        .success()
        .stdout(contains("\"summary\""))
        .stdout(contains("\"chart\""))
        .stdout(contains("\"kind\": \"split\""))
        .stdout(contains("\"income_chars\": 7"));
    summary(&home, &[]).success().stdout(contains("[■■■■■■■]"));
}
