// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The ledger store is the only module that touches the key-value keys.
//! Every mutation goes read-modify-write through here, is persisted with
//! one atomic write, and only then broadcast to subscribers — no observer
//! can see a half-applied expansion.

use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;
use tracing::warn;

use crate::currency;
use crate::errors::LedgerError;
use crate::kv::KvStore;
use crate::models::{Frequency, RecurringRule, Settings, Transaction, TxnType, User};
use crate::recurrence;

const KEY_USERS: &str = "users";
const KEY_ACTIVE_USER: &str = "activeUser";
const KEY_TRANSACTIONS: &str = "transactions";
const KEY_RECURRING: &str = "recurringTxns";
const KEY_DARK_MODE: &str = "darkMode";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerEvent {
    TransactionsUpdated,
    CurrencyChanged,
}

pub struct LedgerStore {
    kv: KvStore,
    subscribers: Vec<Box<dyn Fn(&LedgerEvent)>>,
}

/// Input for a new manual transaction; `amount` is already canonical.
#[derive(Debug, Clone)]
pub struct TxnDraft {
    pub user: String,
    pub txn_type: TxnType,
    pub category: Option<String>,
    pub description: String,
    pub quantity: u32,
    pub amount: Decimal,
    pub payment_method: String,
}

/// Partial update for an existing transaction; absent fields are kept.
#[derive(Debug, Clone, Default)]
pub struct TxnPatch {
    pub description: Option<String>,
    pub amount: Option<Decimal>,
    pub txn_type: Option<TxnType>,
    pub category: Option<String>,
}

impl LedgerStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(LedgerStore {
            kv: KvStore::open(path)?,
            subscribers: Vec::new(),
        })
    }

    pub fn open_default() -> Result<Self> {
        Ok(LedgerStore {
            kv: KvStore::open_default()?,
            subscribers: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        self.kv.path()
    }

    /// Registers an observer. Events fire strictly after the durable write
    /// for the mutation they describe.
    pub fn subscribe(&mut self, f: impl Fn(&LedgerEvent) + 'static) {
        self.subscribers.push(Box::new(f));
    }

    fn notify(&self, event: LedgerEvent) {
        for sub in &self.subscribers {
            sub(&event);
        }
    }

    // ----- users & settings -----

    pub fn users(&self) -> Vec<User> {
        self.decode_vec(KEY_USERS)
    }

    pub fn active_user(&self) -> Option<String> {
        self.kv.get::<String>(KEY_ACTIVE_USER)
    }

    pub fn register(&mut self, username: &str, email: &str, password: &str) -> Result<User> {
        let username = username.trim().to_lowercase();
        if username.is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(LedgerError::Validation(
                "username, email and password are all required".to_string(),
            )
            .into());
        }
        let mut users = self.users();
        if users.iter().any(|u| u.username.eq_ignore_ascii_case(&username)) {
            return Err(
                LedgerError::Validation(format!("username '{username}' already exists")).into(),
            );
        }
        let user = User {
            username,
            email: email.trim().to_string(),
            password: password.to_string(),
            settings: Settings::default(),
        };
        users.push(user.clone());
        self.kv.set(KEY_USERS, &users)?;
        self.kv.persist()?;
        Ok(user)
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let wanted = username.trim().to_lowercase();
        let user = self
            .users()
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(&wanted) && u.password == password)
            .ok_or_else(|| LedgerError::Validation("invalid credentials".to_string()))?;
        self.kv.set(KEY_ACTIVE_USER, &user.username)?;
        self.kv.persist()?;
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.kv.remove(KEY_ACTIVE_USER);
        self.kv.persist()?;
        Ok(())
    }

    /// The active user's settings, or defaults when nobody is logged in.
    pub fn settings(&self) -> Settings {
        let Some(active) = self.active_user() else {
            return Settings::default();
        };
        self.users()
            .into_iter()
            .find(|u| u.username.eq_ignore_ascii_case(&active))
            .map(|u| u.settings)
            .unwrap_or_default()
    }

    pub fn save_settings(&mut self, settings: Settings) -> Result<()> {
        let active = self.active_user().ok_or(LedgerError::NoActiveUser)?;
        let mut users = self.users();
        let user = users
            .iter_mut()
            .find(|u| u.username.eq_ignore_ascii_case(&active))
            .ok_or(LedgerError::NoActiveUser)?;
        // Mirror the theme flag at the top level for pre-paint reads.
        let dark = if settings.dark_mode { "enabled" } else { "disabled" };
        user.settings = settings;
        self.kv.set(KEY_USERS, &users)?;
        self.kv.set(KEY_DARK_MODE, &dark)?;
        self.kv.persist()?;
        Ok(())
    }

    pub fn reset_settings(&mut self) -> Result<Settings> {
        let fresh = Settings::default();
        self.save_settings(fresh.clone())?;
        Ok(fresh)
    }

    /// Changes the display currency only; stored canonical amounts are
    /// untouched. Unknown codes are allowed and degrade to identity
    /// conversion downstream.
    pub fn set_display_currency(&mut self, code: &str) -> Result<Settings> {
        let code = code.trim().to_uppercase();
        let mut settings = self.settings();
        settings.currency_code = code.clone();
        settings.currency_symbol = currency::symbol_for(&code).to_string();
        self.save_settings(settings.clone())?;
        self.notify(LedgerEvent::CurrencyChanged);
        Ok(settings)
    }

    // ----- transactions -----

    pub fn transactions(&self) -> Vec<Transaction> {
        self.decode_vec(KEY_TRANSACTIONS)
    }

    pub fn transactions_for(&self, user: &str) -> Vec<Transaction> {
        self.transactions()
            .into_iter()
            .filter(|t| t.user == user)
            .collect()
    }

    pub fn add_transaction(&mut self, draft: TxnDraft, now: DateTime<Utc>) -> Result<Transaction> {
        if draft.description.trim().is_empty() {
            return Err(LedgerError::Validation("description is required".to_string()).into());
        }
        if draft.amount <= Decimal::ZERO {
            return Err(
                LedgerError::Validation("amount must be greater than zero".to_string()).into(),
            );
        }
        let mut txns = self.transactions();
        let txn = Transaction {
            id: next_id(&txns, now),
            user: draft.user,
            txn_type: draft.txn_type,
            category: draft.category,
            description: draft.description.trim().to_string(),
            quantity: draft.quantity.max(1),
            amount: draft.amount,
            payment_method: draft.payment_method,
            recurring: false,
            recurring_id: None,
            frequency: Frequency::None,
            end_date: None,
            date: Some(now),
        };
        txns.push(txn.clone());
        self.kv.set(KEY_TRANSACTIONS, &txns)?;
        self.kv.persist()?;
        self.notify(LedgerEvent::TransactionsUpdated);
        Ok(txn)
    }

    /// Returns false (a no-op, not an error) when the id no longer exists.
    pub fn edit_transaction(&mut self, id: i64, patch: TxnPatch) -> Result<bool> {
        if let Some(desc) = &patch.description {
            if desc.trim().is_empty() {
                return Err(LedgerError::Validation("description is required".to_string()).into());
            }
        }
        if let Some(amount) = patch.amount {
            if amount <= Decimal::ZERO {
                return Err(
                    LedgerError::Validation("amount must be greater than zero".to_string()).into(),
                );
            }
        }
        let mut txns = self.transactions();
        let Some(txn) = txns.iter_mut().find(|t| t.id == id) else {
            return Ok(false);
        };
        if let Some(desc) = patch.description {
            txn.description = desc.trim().to_string();
        }
        if let Some(amount) = patch.amount {
            txn.amount = amount;
        }
        if let Some(txn_type) = patch.txn_type {
            txn.txn_type = txn_type;
        }
        if let Some(category) = patch.category {
            txn.category = Some(category);
        }
        self.kv.set(KEY_TRANSACTIONS, &txns)?;
        self.kv.persist()?;
        self.notify(LedgerEvent::TransactionsUpdated);
        Ok(true)
    }

    pub fn delete_transaction(&mut self, id: i64) -> Result<bool> {
        let mut txns = self.transactions();
        let before = txns.len();
        txns.retain(|t| t.id != id);
        if txns.len() == before {
            return Ok(false);
        }
        self.kv.set(KEY_TRANSACTIONS, &txns)?;
        self.kv.persist()?;
        self.notify(LedgerEvent::TransactionsUpdated);
        Ok(true)
    }

    // ----- recurring rules -----

    pub fn recurring_rules(&self) -> Vec<RecurringRule> {
        self.decode_vec(KEY_RECURRING)
    }

    pub fn rules_for(&self, user: &str) -> Vec<RecurringRule> {
        self.recurring_rules()
            .into_iter()
            .filter(|r| r.user == user)
            .collect()
    }

    pub fn add_recurring(
        &mut self,
        user: &str,
        description: &str,
        amount: Decimal,
        txn_type: TxnType,
        category: Option<String>,
        frequency: Frequency,
        now: DateTime<Utc>,
    ) -> Result<RecurringRule> {
        if description.trim().is_empty() {
            return Err(LedgerError::Validation("description is required".to_string()).into());
        }
        if amount <= Decimal::ZERO {
            return Err(
                LedgerError::Validation("amount must be greater than zero".to_string()).into(),
            );
        }
        let mut rules = self.recurring_rules();
        let rule = RecurringRule {
            id: now
                .timestamp_millis()
                .max(rules.iter().map(|r| r.id).max().unwrap_or(0) + 1),
            user: user.to_string(),
            description: description.trim().to_string(),
            amount,
            txn_type,
            category,
            frequency,
            last_generated: Some(now),
        };
        rules.push(rule.clone());
        self.kv.set(KEY_RECURRING, &rules)?;
        self.kv.persist()?;
        Ok(rule)
    }

    pub fn delete_recurring(&mut self, id: i64) -> Result<bool> {
        let mut rules = self.recurring_rules();
        let before = rules.len();
        rules.retain(|r| r.id != id);
        if rules.len() == before {
            return Ok(false);
        }
        self.kv.set(KEY_RECURRING, &rules)?;
        self.kv.persist()?;
        Ok(true)
    }

    /// Expands every recurring rule up to `as_of` and applies the result —
    /// generated transactions and advanced rule cursors — in one persisted
    /// write, then broadcasts a single `TransactionsUpdated`. Returns the
    /// number of transactions generated.
    pub fn materialize(&mut self, as_of: DateTime<Utc>) -> Result<usize> {
        let rules = self.recurring_rules();
        if rules.is_empty() {
            return Ok(0);
        }
        let mut txns = self.transactions();
        let expansion = recurrence::expand(&rules, &txns, as_of);
        let generated = expansion.transactions.len();
        txns.extend(expansion.transactions);
        self.kv.set(KEY_TRANSACTIONS, &txns)?;
        self.kv.set(KEY_RECURRING, &expansion.rules)?;
        self.kv.persist()?;
        if generated > 0 {
            self.notify(LedgerEvent::TransactionsUpdated);
        }
        Ok(generated)
    }

    // ----- decode at the boundary -----

    /// Per-element decode: one unreadable record is skipped with a
    /// diagnostic instead of blanking the whole collection.
    fn decode_vec<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let Some(Value::Array(items)) = self.kv.get_raw(key) else {
            return Vec::new();
        };
        items
            .iter()
            .filter_map(|v| match serde_json::from_value(v.clone()) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(key, %err, "skipping unreadable record");
                    None
                }
            })
            .collect()
    }
}

fn next_id(txns: &[Transaction], now: DateTime<Utc>) -> i64 {
    let mut id = now.timestamp_millis();
    while txns.iter().any(|t| t.id == id) {
        id += 1;
    }
    id
}
