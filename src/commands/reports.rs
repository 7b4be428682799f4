// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{Report, build_report, category_breakdown, daily_balances};
use crate::models::{Period, Transaction};
use crate::render::{RatioChart, ratio_chart, render_summary};
use crate::store::Store;
use crate::utils::{fmt_money, maybe_print_json, parse_month_or_current, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::debug;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("categories", sub)) => categories(store, sub)?,
        Some(("daily", sub)) => daily(store, sub)?,
        _ => {}
    }
    Ok(())
}

/// Loads the snapshot a report runs over: the acting user's transactions and
/// the requested period.
fn snapshot(store: &Store, sub: &clap::ArgMatches) -> Result<(Vec<Transaction>, Period)> {
    let email = store.current_user(sub.get_one::<String>("user").map(String::as_str))?;
    let period = parse_month_or_current(sub.get_one::<String>("month").map(String::as_str))?;
    let txs = store.transactions_for(&email)?;
    debug!(%period, count = txs.len(), "loaded report snapshot");
    Ok((txs, period))
}

fn summary(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let (txs, period) = snapshot(store, sub)?;
    let report =
        build_report(&txs, period).with_context(|| format!("Build report for {}", period))?;

    let mut settings = store.settings()?;
    let width = sub
        .get_one::<u16>("width")
        .map(|w| usize::from(*w))
        .unwrap_or(settings.chart_width);
    let chart = ratio_chart(
        report.summary.income_total,
        report.summary.expense_total,
        width,
    )
    .with_context(|| format!("Build ratio chart of width {}", width))?;

    let output = SummaryOutput {
        report: &report,
        chart: &chart,
    };
    if !maybe_print_json(sub.get_flag("json"), false, &output)? {
        let color = !sub.get_flag("no_color");
        print!(
            "{}",
            render_summary(
                &report.summary,
                &report.categories,
                &report.daily,
                &chart,
                color
            )
        );
    }

    // Only a width that rendered successfully is remembered.
    if width != settings.chart_width {
        settings.chart_width = width;
        store.save_settings(&settings)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct SummaryOutput<'a> {
    #[serde(flatten)]
    report: &'a Report,
    chart: &'a RatioChart,
}

fn categories(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let (txs, period) = snapshot(store, sub)?;
    let data = category_breakdown(&txs, period)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|c| vec![c.category.clone(), fmt_money(&c.total)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn daily(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let (txs, period) = snapshot(store, sub)?;
    let data = daily_balances(&txs, period)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|d| vec![d.date.to_string(), fmt_money(&d.balance)])
            .collect();
        println!("{}", pretty_table(&["Date", "Balance"], rows));
    }
    Ok(())
}
