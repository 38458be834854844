// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxnType {
    Income,
    Expense,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::Income => "income",
            TxnType::Expense => "expense",
        }
    }
}

impl std::fmt::Display for TxnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TxnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "income" => Ok(TxnType::Income),
            "expense" => Ok(TxnType::Expense),
            other => Err(format!("unknown transaction type '{other}'")),
        }
    }
}

/// Recurrence cadence. Unrecognized values survive a load/save round-trip
/// unchanged so a stalled rule stays visible rather than being rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    #[default]
    None,
    Other(String),
}

impl Frequency {
    pub fn as_str(&self) -> &str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::None => "none",
            Frequency::Other(s) => s,
        }
    }
}

impl From<String> for Frequency {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            "" | "none" => Frequency::None,
            _ => Frequency::Other(s),
        }
    }
}

impl From<Frequency> for String {
    fn from(f: Frequency) -> Self {
        f.as_str().to_string()
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    pub email: String,
    // Plaintext by product decision; this is a local profile gate, not auth.
    pub password: String,
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency_code: String,
    pub currency_symbol: String,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default = "default_true")]
    pub confetti: bool,
    /// Overall monthly budget in canonical currency; 0 means "no explicit
    /// budget", which flips budget reporting into balance-as-budget mode.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub budget: Decimal,
    #[serde(default)]
    pub category_budgets: BTreeMap<String, Decimal>,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub transaction_reminder: bool,
    #[serde(default)]
    pub budget_alert: bool,
    #[serde(default)]
    pub income_alert: bool,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub weekly_goal: Decimal,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub savings_goal: Decimal,
}

pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "General",
    "Food",
    "Transport",
    "Rent",
    "Utilities",
    "Entertainment",
    "Salary",
    "Others",
];

impl Default for Settings {
    fn default() -> Self {
        Settings {
            currency_code: "NGN".to_string(),
            currency_symbol: "₦".to_string(),
            dark_mode: false,
            confetti: true,
            budget: Decimal::ZERO,
            category_budgets: DEFAULT_CATEGORIES
                .iter()
                .map(|c| (c.to_string(), Decimal::ZERO))
                .collect(),
            date_format: default_date_format(),
            transaction_reminder: false,
            budget_alert: false,
            income_alert: false,
            weekly_goal: Decimal::ZERO,
            savings_goal: Decimal::ZERO,
        }
    }
}

/// A ledger entry. `amount` is always a non-negative value in the canonical
/// currency; `txn_type` carries the sign semantics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(default)]
    pub user: String,
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub recurring: bool,
    #[serde(default)]
    pub recurring_id: Option<i64>,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringRule {
    pub id: i64,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default, deserialize_with = "lenient_date")]
    pub last_generated: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

fn default_quantity() -> u32 {
    1
}

fn default_date_format() -> String {
    "dd/mm/yyyy".to_string()
}

/// Accepts a number, a numeric string, or garbage; garbage decodes to zero
/// with a diagnostic so one bad record cannot fail a whole load.
fn lenient_amount<'de, D>(de: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(de)?;
    let parsed = match &v {
        serde_json::Value::Number(n) => n.to_string().parse::<Decimal>().ok(),
        serde_json::Value::String(s) => s.trim().parse::<Decimal>().ok(),
        serde_json::Value::Null => Some(Decimal::ZERO),
        _ => None,
    };
    Ok(parsed.unwrap_or_else(|| {
        warn!(value = %v, "unreadable amount coerced to 0");
        Decimal::ZERO
    }))
}

/// RFC 3339 instants; anything else decodes to `None` with a diagnostic and
/// is skipped by date-bucketed aggregation.
fn lenient_date<'de, D>(de: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(de)?;
    match &v {
        serde_json::Value::String(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(dt) => Ok(Some(dt.with_timezone(&Utc))),
            Err(_) => {
                warn!(value = %s, "unreadable date dropped");
                Ok(None)
            }
        },
        serde_json::Value::Null => Ok(None),
        _ => {
            warn!(value = %v, "unreadable date dropped");
            Ok(None)
        }
    }
}
