// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionKind};
use crate::store::Store;
use crate::utils::{
    fmt_money, maybe_print_json, parse_amount, parse_datetime_or_now, parse_month, pretty_table,
};
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("income", sub)) => add(store, sub, true)?,
        Some(("expense", sub)) => add(store, sub, false)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(store: &Store, sub: &clap::ArgMatches, is_income: bool) -> Result<()> {
    let email = store.current_user(sub.get_one::<String>("user").map(String::as_str))?;
    let amount_raw = sub.get_one::<String>("amount").unwrap();
    let amount = parse_amount(amount_raw)?;
    let date = parse_datetime_or_now(sub.get_one::<String>("date").map(String::as_str))?;
    let description = sub.get_one::<String>("description").unwrap().trim();

    let transaction = if is_income {
        let source = sub.get_one::<String>("source").unwrap().trim();
        Transaction::income(&email, amount, date, source, description)?
    } else {
        let category = sub.get_one::<String>("category").unwrap().trim();
        if !store.has_category(category)? {
            warn!(category, "expense category is not in the category list");
        }
        Transaction::expense(&email, amount, date, category, description)?
    };
    let id = transaction.id;
    let label = transaction.label();
    store
        .add_transaction(transaction)
        .context("Failed to record transaction")?;
    println!("Recorded {} {} on {} ({})", label, amount, date.date(), id);
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.clone(),
                    r.date.clone(),
                    r.title.clone(),
                    r.amount.clone(),
                    r.detail.clone(),
                    r.description.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Title", "Amount", "Source/Category", "Description"],
                rows,
            )
        );
    }
    Ok(())
}

fn remove(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let email = store.current_user(sub.get_one::<String>("user").map(String::as_str))?;
    let raw = sub.get_one::<String>("id").unwrap().trim();
    let id = Uuid::parse_str(raw).with_context(|| format!("Invalid transaction id '{}'", raw))?;
    if store.delete_transaction(&email, id)? {
        println!("Removed transaction {}", id);
    } else {
        anyhow::bail!("No transaction {} for {}", id, email);
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub title: String,
    pub amount: String,
    pub detail: String,
    pub description: String,
}

impl From<&Transaction> for TransactionRow {
    fn from(t: &Transaction) -> Self {
        let detail = match &t.kind {
            TransactionKind::Income { source } => source.clone(),
            TransactionKind::Expense { category } => category.clone(),
        };
        Self {
            id: t.id.to_string(),
            date: t.date.format("%Y-%m-%d %H:%M").to_string(),
            title: t.label().to_string(),
            amount: fmt_money(&t.amount),
            detail,
            description: t.description.clone(),
        }
    }
}

/// Current user's transactions, newest first, optionally limited to a month
/// and a row count.
pub fn query_rows(store: &Store, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let email = store.current_user(sub.get_one::<String>("user").map(String::as_str))?;
    let mut txs = store.transactions_for(&email)?;
    if let Some(month) = sub.get_one::<String>("month") {
        let period = parse_month(month)?;
        txs.retain(|t| period.contains(t.date));
    }
    txs.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txs.truncate(*limit);
    }
    Ok(txs.iter().map(TransactionRow::from).collect())
}
