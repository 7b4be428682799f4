// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

/// Category names every fresh data directory starts with.
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Bills",
    "Shopping",
    "Entertainment",
    "Other",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    pub active: bool,
}

impl User {
    /// New users start inactive.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            active: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Variant payload of a transaction. The serialized `title` tag is also the
/// display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "title", rename_all = "lowercase")]
pub enum TransactionKind {
    Income { source: String },
    Expense { category: String },
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income { .. } => "income",
            TransactionKind::Expense { .. } => "expense",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: Decimal,
    pub date: NaiveDateTime,
    pub description: String,
    pub user_email: String,
    #[serde(flatten)]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Builds a transaction with a fresh id. Negative amounts are rejected;
    /// the variant carries the direction of the money flow.
    pub fn new(
        user_email: impl Into<String>,
        amount: Decimal,
        date: NaiveDateTime,
        description: impl Into<String>,
        kind: TransactionKind,
    ) -> Result<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(LedgerError::NegativeAmount(amount));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            amount,
            date,
            description: description.into(),
            user_email: user_email.into(),
            kind,
        })
    }

    pub fn income(
        user_email: impl Into<String>,
        amount: Decimal,
        date: NaiveDateTime,
        source: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let kind = TransactionKind::Income {
            source: source.into(),
        };
        Self::new(user_email, amount, date, description, kind)
    }

    pub fn expense(
        user_email: impl Into<String>,
        amount: Decimal,
        date: NaiveDateTime,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self> {
        let kind = TransactionKind::Expense {
            category: category.into(),
        };
        Self::new(user_email, amount, date, description, kind)
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// Calendar day of the transaction, time of day dropped.
    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }

    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            TransactionKind::Expense { category } => Some(category),
            TransactionKind::Income { .. } => None,
        }
    }

    pub fn source(&self) -> Option<&str> {
        match &self.kind {
            TransactionKind::Income { source } => Some(source),
            TransactionKind::Expense { .. } => None,
        }
    }
}

/// A single calendar month used to scope reports. Dates are naive; no
/// timezone conversion ever happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(LedgerError::InvalidPeriod(format!("{}-{:02}", year, month)));
        }
        Ok(Self { year, month })
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::containing(Local::now().date_naive())
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, date: NaiveDateTime) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl FromStr for Period {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || LedgerError::InvalidPeriod(s.to_string());
        let (y, m) = s.split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
