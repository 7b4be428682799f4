// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::LedgerError;
use crate::models::Period;

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// Accepts `YYYY-MM-DD` (taken as midnight) or `YYYY-MM-DD HH:MM[:SS]`.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, LedgerError> {
    let s = s.trim();
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| LedgerError::InvalidDate(s.to_string()))
}

pub fn parse_datetime_or_now(s: Option<&str>) -> Result<NaiveDateTime, LedgerError> {
    match s {
        Some(s) => parse_datetime(s),
        None => Ok(Local::now().naive_local()),
    }
}

pub fn parse_month(s: &str) -> Result<Period, LedgerError> {
    s.parse()
}

pub fn parse_month_or_current(s: Option<&str>) -> Result<Period, LedgerError> {
    s.map(parse_month).unwrap_or_else(|| Ok(Period::current()))
}

/// Parses a non-negative fixed-point amount with at most two decimal places.
pub fn parse_amount(s: &str) -> Result<Decimal, LedgerError> {
    let s = s.trim();
    let d = s
        .parse::<Decimal>()
        .map_err(|_| LedgerError::InvalidAmount(s.to_string()))?;
    if d.is_sign_negative() && !d.is_zero() {
        return Err(LedgerError::NegativeAmount(d));
    }
    if d.normalize().scale() > 2 {
        return Err(LedgerError::InvalidAmount(s.to_string()));
    }
    Ok(d)
}

/// Two decimal places, rounding half away from zero.
pub fn fmt_money(d: &Decimal) -> String {
    format!(
        "{:.2}",
        d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
