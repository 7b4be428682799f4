// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::store::Store;
use anyhow::{Result, bail};
use serde_json::json;

pub fn handle(store: &Store, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(store, sub),
        _ => Ok(()),
    }
}

fn export_transactions(store: &Store, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }

    let email = store.current_user(sub.get_one::<String>("user").map(String::as_str))?;
    let mut txs = store.transactions_for(&email)?;
    txs.sort_by(|a, b| a.date.cmp(&b.date));

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(out)?;
        wtr.write_record([
            "id",
            "date",
            "title",
            "amount",
            "source",
            "category",
            "description",
        ])?;
        for t in &txs {
            wtr.write_record([
                t.id.to_string(),
                t.date.format("%Y-%m-%d %H:%M:%S").to_string(),
                t.label().to_string(),
                t.amount.to_string(),
                t.source().unwrap_or_default().to_string(),
                t.category().unwrap_or_default().to_string(),
                t.description.clone(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = txs
            .iter()
            .map(|t| {
                json!({
                    "id": t.id, "date": t.date.format("%Y-%m-%d %H:%M:%S").to_string(),
                    "title": t.label(), "amount": t.amount.to_string(), "source": t.source(),
                    "category": t.category(), "description": t.description
                })
            })
            .collect();
        std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported {} transactions to {}", txs.len(), out);
    Ok(())
}
