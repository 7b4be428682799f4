// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! JSON-file persistence for users, categories, transactions and settings.
//!
//! Each collection lives in its own pretty-printed JSON file under the data
//! directory. Every mutation reloads the collection, applies the change and
//! rewrites the file atomically.

use anyhow::Context;
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};
use crate::models::{Category, DEFAULT_CATEGORIES, Transaction, User};
use crate::render::DEFAULT_CHART_WIDTH;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.tallybook", "Tallybook", "tallybook"));

/// Overrides the platform data directory when set.
pub const HOME_ENV: &str = "TALLYBOOK_HOME";

const TRANSACTIONS_FILE: &str = "transactions.json";
const USERS_FILE: &str = "users.json";
const CATEGORIES_FILE: &str = "categories.json";
const SETTINGS_FILE: &str = "settings.json";

pub fn data_dir() -> anyhow::Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    Ok(proj.data_dir().to_path_buf())
}

pub fn open_or_init() -> anyhow::Result<Store> {
    let dir = data_dir()?;
    Store::open(&dir).with_context(|| format!("Open data dir at {}", dir.display()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub current_user: Option<String>,
    pub chart_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            current_user: None,
            chart_width: DEFAULT_CHART_WIDTH,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Opens the store rooted at `root`, creating the directory and seeding
    /// the default categories on first use.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let store = Self { root };
        if !store.path(CATEGORIES_FILE).exists() {
            let seed: Vec<Category> = DEFAULT_CATEGORIES.iter().map(|n| Category::new(*n)).collect();
            store.save(CATEGORIES_FILE, &seed)?;
            info!(dir = %store.root.display(), "seeded default categories");
        }
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }

    fn load<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>> {
        let path = self.path(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn save<T: Serialize + ?Sized>(&self, file: &str, data: &T) -> Result<()> {
        let path = self.path(file);
        let json = serde_json::to_string_pretty(data)?;
        write_atomic(&path, &json)?;
        debug!(file, "saved collection");
        Ok(())
    }

    pub fn settings(&self) -> Result<Settings> {
        let path = self.path(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Settings::default());
        }
        let data = fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Settings::default());
        }
        Ok(serde_json::from_str(&data)?)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.save(SETTINGS_FILE, settings)
    }

    pub fn users(&self) -> Result<Vec<User>> {
        self.load(USERS_FILE)
    }

    pub fn user(&self, email: &str) -> Result<Option<User>> {
        Ok(self.users()?.into_iter().find(|u| u.email == email))
    }

    pub fn add_user(&self, user: User) -> Result<()> {
        let mut users = self.users()?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(LedgerError::DuplicateUser(user.email));
        }
        info!(email = %user.email, "adding user");
        users.push(user);
        self.save(USERS_FILE, &users)
    }

    pub fn set_user_active(&self, email: &str, active: bool) -> Result<()> {
        let mut users = self.users()?;
        let user = users
            .iter_mut()
            .find(|u| u.email == email)
            .ok_or_else(|| LedgerError::UserNotFound(email.to_string()))?;
        user.active = active;
        self.save(USERS_FILE, &users)
    }

    /// Records `email` as the current user in settings.
    pub fn switch_user(&self, email: &str) -> Result<User> {
        let user = self
            .user(email)?
            .ok_or_else(|| LedgerError::UserNotFound(email.to_string()))?;
        if !user.active {
            warn!(email, "switching to an inactive user");
        }
        let mut settings = self.settings()?;
        settings.current_user = Some(user.email.clone());
        self.save_settings(&settings)?;
        Ok(user)
    }

    /// Resolves the user commands act for: an explicit override wins over
    /// the stored current user. Either way the user must exist.
    pub fn current_user(&self, override_email: Option<&str>) -> Result<String> {
        let email = match override_email {
            Some(e) => e.to_string(),
            None => self
                .settings()?
                .current_user
                .ok_or(LedgerError::NoCurrentUser)?,
        };
        if self.user(&email)?.is_none() {
            return Err(LedgerError::UserNotFound(email));
        }
        Ok(email)
    }

    pub fn categories(&self) -> Result<Vec<Category>> {
        self.load(CATEGORIES_FILE)
    }

    pub fn has_category(&self, name: &str) -> Result<bool> {
        Ok(self.categories()?.iter().any(|c| c.name == name))
    }

    /// Adds a category unless an identically named one exists. Returns
    /// whether anything was added.
    pub fn add_category(&self, name: &str) -> Result<bool> {
        let mut categories = self.categories()?;
        if categories.iter().any(|c| c.name == name) {
            return Ok(false);
        }
        categories.push(Category::new(name));
        self.save(CATEGORIES_FILE, &categories)?;
        Ok(true)
    }

    pub fn all_transactions(&self) -> Result<Vec<Transaction>> {
        self.load(TRANSACTIONS_FILE)
    }

    /// Snapshot of one user's transactions, in stored order.
    pub fn transactions_for(&self, email: &str) -> Result<Vec<Transaction>> {
        let mut all = self.all_transactions()?;
        all.retain(|t| t.user_email == email);
        Ok(all)
    }

    pub fn add_transaction(&self, transaction: Transaction) -> Result<()> {
        let mut all = self.all_transactions()?;
        if all.iter().any(|t| t.id == transaction.id) {
            return Err(LedgerError::DuplicateId(transaction.id));
        }
        debug!(id = %transaction.id, kind = transaction.label(), "recording transaction");
        all.push(transaction);
        self.save(TRANSACTIONS_FILE, &all)
    }

    /// Deletes the transaction with `id` if it belongs to `email`. Returns
    /// whether a record was removed.
    pub fn delete_transaction(&self, email: &str, id: Uuid) -> Result<bool> {
        let mut all = self.all_transactions()?;
        let before = all.len();
        all.retain(|t| !(t.id == id && t.user_email == email));
        if all.len() == before {
            return Ok(false);
        }
        self.save(TRANSACTIONS_FILE, &all)?;
        Ok(true)
    }
}

/// Writes through a sibling temp file and renames it into place.
fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
