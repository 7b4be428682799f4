// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

/// Error type that captures ledger, report and storage failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidPeriod(String),
    #[error("Invalid date '{0}', expected YYYY-MM-DD or YYYY-MM-DD HH:MM[:SS]")]
    InvalidDate(String),
    #[error("Chart width {0} is too large (at most 200)")]
    InvalidWidth(usize),
    #[error("Amount overflow while computing {0}")]
    Overflow(&'static str),
    #[error("Transaction id {0} already exists")]
    DuplicateId(Uuid),
    #[error("A user with email '{0}' already exists")]
    DuplicateUser(String),
    #[error("User '{0}' not found")]
    UserNotFound(String),
    #[error("No current user; run `tallybook user switch <email>` or pass --user")]
    NoCurrentUser,
}

pub type Result<T> = std::result::Result<T, LedgerError>;
