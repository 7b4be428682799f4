// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashSet;

use crate::store::Store;
use crate::utils::pretty_table;
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: &'static str,
    pub detail: String,
}

impl Issue {
    fn new(kind: &'static str, detail: String) -> Self {
        Self { kind, detail }
    }
}

/// Scans every stored transaction, across all users.
pub fn find_issues(store: &Store) -> Result<Vec<Issue>> {
    let txs = store.all_transactions()?;
    let users: HashSet<String> = store.users()?.into_iter().map(|u| u.email).collect();
    let categories: HashSet<String> = store.categories()?.into_iter().map(|c| c.name).collect();

    let mut issues = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut flagged_categories = HashSet::new();
    for t in &txs {
        if !seen_ids.insert(t.id) {
            issues.push(Issue::new("duplicate_id", t.id.to_string()));
        }
        if !users.contains(&t.user_email) {
            issues.push(Issue::new(
                "unknown_user",
                format!("{} ({})", t.user_email, t.id),
            ));
        }
        if t.amount.is_sign_negative() && !t.amount.is_zero() {
            issues.push(Issue::new("negative_amount", format!("{} ({})", t.amount, t.id)));
        }
        if let Some(cat) = t.category() {
            if !categories.contains(cat) && flagged_categories.insert(cat.to_string()) {
                issues.push(Issue::new("unknown_category", cat.to_string()));
            }
        }
    }
    Ok(issues)
}

pub fn handle(store: &Store) -> Result<()> {
    let issues = find_issues(store)?;
    if issues.is_empty() {
        println!("doctor: no issues found");
    } else {
        let rows = issues
            .into_iter()
            .map(|i| vec![i.kind.to_string(), i.detail])
            .collect();
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
