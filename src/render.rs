// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Text rendering of monthly reports and the income/expense ratio bar.

use colored::Colorize;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::aggregate::{CategoryTotal, DailyBalance, MonthlySummary, Report};
use crate::errors::{LedgerError, Result};
use crate::utils::fmt_money;

pub const DEFAULT_CHART_WIDTH: usize = 30;
pub const MAX_CHART_WIDTH: usize = 200;
pub const BAR_MARK: char = '■';
pub const NO_DATA_MESSAGE: &str = "No income or expense recorded for this month.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RatioChart {
    NoData,
    Split {
        income_total: Decimal,
        expense_total: Decimal,
        income_chars: usize,
        expense_chars: usize,
        income_percent: u32,
        expense_percent: u32,
    },
}

/// `part * scale / total`, multiplying first when that fits so the result
/// stays exact for ordinary amounts.
fn scaled_share(part: Decimal, total: Decimal, scale: Decimal) -> Result<Decimal> {
    match part.checked_mul(scale) {
        Some(scaled) => scaled.checked_div(total),
        None => part.checked_div(total).and_then(|s| s.checked_mul(scale)),
    }
    .ok_or(LedgerError::Overflow("ratio chart"))
}

/// Splits `width` bar cells between income and expense. The income side is
/// floored and the expense side takes the remainder, so the two always add
/// up to `width`. Widths above [`MAX_CHART_WIDTH`] are rejected.
pub fn ratio_chart(income_total: Decimal, expense_total: Decimal, width: usize) -> Result<RatioChart> {
    if width > MAX_CHART_WIDTH {
        return Err(LedgerError::InvalidWidth(width));
    }
    let total = income_total
        .checked_add(expense_total)
        .ok_or(LedgerError::Overflow("ratio chart total"))?;
    if total.is_zero() {
        return Ok(RatioChart::NoData);
    }

    let cells = scaled_share(income_total, total, Decimal::from(width))?.floor();
    let income_chars = cells.to_usize().unwrap_or(0).min(width);
    let expense_chars = width - income_chars;

    let percent = scaled_share(income_total, total, Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let income_percent = percent.to_u32().unwrap_or(0).min(100);

    Ok(RatioChart::Split {
        income_total,
        expense_total,
        income_chars,
        expense_chars,
        income_percent,
        expense_percent: 100 - income_percent,
    })
}

impl RatioChart {
    pub fn render(&self, color: bool) -> String {
        match self {
            RatioChart::NoData => NO_DATA_MESSAGE.to_string(),
            RatioChart::Split {
                income_total,
                expense_total,
                income_chars,
                expense_chars,
                income_percent,
                expense_percent,
            } => {
                let income_bar = BAR_MARK.to_string().repeat(*income_chars);
                let expense_bar = BAR_MARK.to_string().repeat(*expense_chars);
                let bar = if color {
                    format!("[{}{}]", income_bar.green(), expense_bar.red())
                } else {
                    format!("[{}{}]", income_bar, expense_bar)
                };
                format!(
                    "{}\nIncome: {} ({}%)\nExpense: {} ({}%)",
                    bar,
                    fmt_money(income_total),
                    income_percent,
                    fmt_money(expense_total),
                    expense_percent
                )
            }
        }
    }
}

pub fn render_summary(
    summary: &MonthlySummary,
    categories: &[CategoryTotal],
    daily: &[DailyBalance],
    chart: &RatioChart,
    color: bool,
) -> String {
    let mut out = format!(
        "Monthly summary {}: income {} | expense {}\n",
        summary.period,
        fmt_money(&summary.income_total),
        fmt_money(&summary.expense_total)
    );
    out.push_str("Expenses by category:\n");
    for c in categories {
        out.push_str(&format!("{}: {}\n", c.category, fmt_money(&c.total)));
    }
    out.push_str("Daily balance:\n");
    for d in daily {
        out.push_str(&format!(
            "{}: {}\n",
            d.date.format("%Y-%m-%d"),
            fmt_money(&d.balance)
        ));
    }
    out.push_str("\nIncome vs expense:\n");
    out.push_str(&chart.render(color));
    out.push('\n');
    out
}

/// Renders a full report with a ratio chart of the given width.
pub fn render_report(report: &Report, width: usize, color: bool) -> Result<String> {
    let chart = ratio_chart(
        report.summary.income_total,
        report.summary.expense_total,
        width,
    )?;
    Ok(render_summary(
        &report.summary,
        &report.categories,
        &report.daily,
        &chart,
        color,
    ))
}
