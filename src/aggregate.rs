// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly aggregation over a snapshot of one user's transactions.
//!
//! Every function here borrows the input and returns owned values. Sums use
//! checked fixed-point arithmetic so an overflowing total surfaces as
//! [`LedgerError::Overflow`] instead of wrapping.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::errors::{LedgerError, Result};
use crate::models::{Period, Transaction, TransactionKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub period: Period,
    pub income_total: Decimal,
    pub expense_total: Decimal,
}

impl MonthlySummary {
    pub fn net(&self) -> Result<Decimal> {
        self.income_total
            .checked_sub(self.expense_total)
            .ok_or(LedgerError::Overflow("net total"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBalance {
    pub date: NaiveDate,
    pub balance: Decimal,
}

/// All three views for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub summary: MonthlySummary,
    pub categories: Vec<CategoryTotal>,
    pub daily: Vec<DailyBalance>,
}

fn add(acc: Decimal, amount: Decimal, what: &'static str) -> Result<Decimal> {
    acc.checked_add(amount).ok_or(LedgerError::Overflow(what))
}

fn in_period(transactions: &[Transaction], period: Period) -> impl Iterator<Item = &Transaction> {
    transactions.iter().filter(move |t| period.contains(t.date))
}

pub fn monthly_summary(transactions: &[Transaction], period: Period) -> Result<MonthlySummary> {
    let mut income_total = Decimal::ZERO;
    let mut expense_total = Decimal::ZERO;
    for t in in_period(transactions, period) {
        match t.kind {
            TransactionKind::Income { .. } => {
                income_total = add(income_total, t.amount, "income total")?
            }
            TransactionKind::Expense { .. } => {
                expense_total = add(expense_total, t.amount, "expense total")?
            }
        }
    }
    Ok(MonthlySummary {
        period,
        income_total,
        expense_total,
    })
}

/// Expense totals per category, in the order each category is first seen in
/// the input. Names are compared exactly, so `Food` and `food` are separate
/// groups.
pub fn category_breakdown(
    transactions: &[Transaction],
    period: Period,
) -> Result<Vec<CategoryTotal>> {
    let mut groups: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for t in in_period(transactions, period) {
        let TransactionKind::Expense { category } = &t.kind else {
            continue;
        };
        let slot = *index.entry(category.as_str()).or_insert_with(|| {
            groups.push(CategoryTotal {
                category: category.clone(),
                total: Decimal::ZERO,
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.total = add(group.total, t.amount, "category total")?;
    }
    Ok(groups)
}

/// Net amount per calendar day, ascending. Days without transactions are
/// omitted.
pub fn daily_balances(transactions: &[Transaction], period: Period) -> Result<Vec<DailyBalance>> {
    let mut days: BTreeMap<NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for t in in_period(transactions, period) {
        let entry = days.entry(t.day()).or_insert((Decimal::ZERO, Decimal::ZERO));
        match t.kind {
            TransactionKind::Income { .. } => entry.0 = add(entry.0, t.amount, "daily income")?,
            TransactionKind::Expense { .. } => entry.1 = add(entry.1, t.amount, "daily expense")?,
        }
    }
    days.into_iter()
        .map(|(date, (income, expense))| {
            let balance = income
                .checked_sub(expense)
                .ok_or(LedgerError::Overflow("daily balance"))?;
            Ok(DailyBalance { date, balance })
        })
        .collect()
}

pub fn build_report(transactions: &[Transaction], period: Period) -> Result<Report> {
    Ok(Report {
        summary: monthly_summary(transactions, period)?,
        categories: category_breakdown(transactions, period)?,
        daily: daily_balances(transactions, period)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    const USER: &str = "sam@example.com";

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn income(amount: &str, date: NaiveDateTime) -> Transaction {
        Transaction::income(USER, dec(amount), date, "salary", "").unwrap()
    }

    fn expense(amount: &str, category: &str, date: NaiveDateTime) -> Transaction {
        Transaction::expense(USER, dec(amount), date, category, "").unwrap()
    }

    fn march_fixture() -> Vec<Transaction> {
        vec![
            income("100", at(2024, 3, 5, 9)),
            expense("40", "Food", at(2024, 3, 5, 13)),
            expense("20", "Food", at(2024, 3, 10, 19)),
            income("50", at(2024, 3, 20, 8)),
        ]
    }

    fn march() -> Period {
        Period::new(2024, 3).unwrap()
    }

    #[test]
    fn march_scenario() {
        let txs = march_fixture();
        let summary = monthly_summary(&txs, march()).unwrap();
        assert_eq!(summary.income_total, dec("150"));
        assert_eq!(summary.expense_total, dec("60"));

        let cats = category_breakdown(&txs, march()).unwrap();
        assert_eq!(
            cats,
            vec![CategoryTotal {
                category: "Food".into(),
                total: dec("60")
            }]
        );

        let daily = daily_balances(&txs, march()).unwrap();
        let got: Vec<(NaiveDate, Decimal)> = daily.iter().map(|d| (d.date, d.balance)).collect();
        assert_eq!(
            got,
            vec![
                (NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(), dec("60")),
                (NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), dec("-20")),
                (NaiveDate::from_ymd_opt(2024, 3, 20).unwrap(), dec("50")),
            ]
        );
    }

    #[test]
    fn other_month_is_empty() {
        let txs = march_fixture();
        let april = Period::new(2024, 4).unwrap();
        let report = build_report(&txs, april).unwrap();
        assert_eq!(report.summary.income_total, Decimal::ZERO);
        assert_eq!(report.summary.expense_total, Decimal::ZERO);
        assert!(report.categories.is_empty());
        assert!(report.daily.is_empty());
    }

    #[test]
    fn empty_input_yields_zeros() {
        let report = build_report(&[], march()).unwrap();
        assert_eq!(report.summary.income_total, Decimal::ZERO);
        assert_eq!(report.summary.expense_total, Decimal::ZERO);
        assert!(report.categories.is_empty());
        assert!(report.daily.is_empty());
    }

    #[test]
    fn income_only_sums_exactly() {
        let txs: Vec<Transaction> = (1..=28)
            .map(|d| income("0.10", at(2024, 3, d, 10)))
            .collect();
        let summary = monthly_summary(&txs, march()).unwrap();
        assert_eq!(summary.income_total, dec("2.80"));
        assert_eq!(summary.expense_total, Decimal::ZERO);
    }

    #[test]
    fn input_order_does_not_change_totals() {
        let mut txs = march_fixture();
        let forward = monthly_summary(&txs, march()).unwrap();
        let daily_forward = daily_balances(&txs, march()).unwrap();
        txs.reverse();
        assert_eq!(monthly_summary(&txs, march()).unwrap(), forward);
        assert_eq!(daily_balances(&txs, march()).unwrap(), daily_forward);
    }

    #[test]
    fn categories_keep_first_seen_order_and_exact_names() {
        let txs = vec![
            expense("5", "Transport", at(2024, 3, 2, 8)),
            expense("7", "food", at(2024, 3, 3, 8)),
            expense("3", "Food", at(2024, 3, 4, 8)),
            expense("1", "Transport", at(2024, 3, 5, 8)),
            expense("2", "Food ", at(2024, 3, 6, 8)),
            expense("9", "Unlisted", at(2024, 2, 6, 8)),
        ];
        let cats = category_breakdown(&txs, march()).unwrap();
        let names: Vec<&str> = cats.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Transport", "food", "Food", "Food "]);
        assert_eq!(cats[0].total, dec("6"));
    }

    #[test]
    fn category_totals_partition_expenses() {
        let txs = vec![
            expense("12.34", "Food", at(2024, 3, 1, 8)),
            expense("0.66", "Bills", at(2024, 3, 1, 9)),
            income("400", at(2024, 3, 1, 10)),
            expense("7.01", "Food", at(2024, 3, 31, 23)),
            expense("100", "Bills", at(2024, 4, 1, 0)),
        ];
        let summary = monthly_summary(&txs, march()).unwrap();
        let sum: Decimal = category_breakdown(&txs, march())
            .unwrap()
            .iter()
            .map(|c| c.total)
            .sum();
        assert_eq!(sum, summary.expense_total);
        assert_eq!(sum, dec("20.01"));
    }

    #[test]
    fn daily_balances_are_strictly_ascending_and_sum_to_net() {
        let txs = vec![
            expense("3", "Food", at(2024, 3, 30, 8)),
            income("10", at(2024, 3, 2, 23)),
            expense("4", "Food", at(2024, 3, 2, 0)),
            income("1.5", at(2024, 3, 15, 12)),
            expense("8", "Bills", at(2024, 3, 15, 6)),
        ];
        let daily = daily_balances(&txs, march()).unwrap();
        assert!(daily.windows(2).all(|w| w[0].date < w[1].date));
        let sum: Decimal = daily.iter().map(|d| d.balance).sum();
        let net = monthly_summary(&txs, march()).unwrap().net().unwrap();
        assert_eq!(sum, net);
        assert_eq!(daily.len(), 3);
    }

    #[test]
    fn overflow_fails_loudly() {
        let txs = vec![
            Transaction::income(USER, Decimal::MAX, at(2024, 3, 1, 8), "a", "").unwrap(),
            Transaction::income(USER, Decimal::MAX, at(2024, 3, 2, 8), "b", "").unwrap(),
        ];
        let err = monthly_summary(&txs, march()).unwrap_err();
        assert!(matches!(err, LedgerError::Overflow(_)));
    }
}
