// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure query functions over canonical-currency transaction slices. All of
//! them tolerate malformed records: amounts that failed to decode are
//! already zero, and entries without a usable date are skipped from
//! date-bucketed views with a diagnostic instead of failing the batch.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use crate::models::{Settings, Transaction, TxnType};

/// Sentinel category filter meaning "no filter".
pub const ALL_CATEGORIES: &str = "All Categories";

/// Narrows a ledger to one user and, optionally, one category
/// (case-insensitive; a missing category matches as "Others").
pub fn filter(txns: &[Transaction], user: &str, category: Option<&str>) -> Vec<Transaction> {
    let category = category.filter(|c| !c.eq_ignore_ascii_case(ALL_CATEGORIES));
    txns.iter()
        .filter(|t| t.user == user)
        .filter(|t| match category {
            Some(wanted) => t
                .category
                .as_deref()
                .unwrap_or("Others")
                .eq_ignore_ascii_case(wanted),
            None => true,
        })
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

pub fn totals(txns: &[Transaction]) -> Totals {
    let mut t = Totals::default();
    for txn in txns {
        match txn.txn_type {
            TxnType::Income => t.income += txn.amount,
            TxnType::Expense => t.expenses += txn.amount,
        }
    }
    t.balance = t.income - t.expenses;
    t
}

/// Group-sums by category in first-encountered order. Transactions without
/// a category land under `default_category` ("Others" on dashboards,
/// "General" in the transaction table).
pub fn category_totals(
    txns: &[Transaction],
    txn_type: TxnType,
    default_category: &str,
) -> Vec<(String, Decimal)> {
    let mut out: Vec<(String, Decimal)> = Vec::new();
    for txn in txns.iter().filter(|t| t.txn_type == txn_type) {
        let cat = txn.category.as_deref().unwrap_or(default_category);
        match out.iter_mut().find(|(c, _)| c == cat) {
            Some((_, sum)) => *sum += txn.amount,
            None => out.push((cat.to_string(), txn.amount)),
        }
    }
    out
}

/// Fixed 12-slot series indexed Jan=0..Dec=11, year-blind: multi-year data
/// collapses into the same buckets. That is the product's behavior, kept.
pub fn monthly_series(txns: &[Transaction], txn_type: TxnType) -> [Decimal; 12] {
    let mut series = [Decimal::ZERO; 12];
    for txn in txns.iter().filter(|t| t.txn_type == txn_type) {
        match txn.date {
            Some(date) => series[date.month0() as usize] += txn.amount,
            None => warn!(id = txn.id, "transaction without date skipped from monthly series"),
        }
    }
    series
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub remaining: Decimal,
    pub overspent: Decimal,
}

/// Two-mode budget policy: with an explicit budget, remaining/overspent
/// are clamped against it; with budget 0 the balance itself acts as the
/// budget and nothing ever counts as overspent.
pub fn budget_status(totals: &Totals, budget: Decimal) -> BudgetStatus {
    if budget > Decimal::ZERO {
        BudgetStatus {
            remaining: (budget - totals.expenses).max(Decimal::ZERO),
            overspent: (totals.expenses - budget).max(Decimal::ZERO),
        }
    } else {
        BudgetStatus {
            remaining: totals.balance,
            overspent: Decimal::ZERO,
        }
    }
}

/// Per-day expense sums keyed by UTC calendar date.
pub fn daily_expense_totals(txns: &[Transaction]) -> BTreeMap<NaiveDate, Decimal> {
    let mut daily = BTreeMap::new();
    for txn in txns.iter().filter(|t| t.txn_type == TxnType::Expense) {
        if let Some(date) = txn.date {
            *daily.entry(date.date_naive()).or_insert(Decimal::ZERO) += txn.amount;
        }
    }
    daily
}

/// Consecutive days at or under `daily_budget`, walking backward from
/// `as_of` inclusive, stopping at the first violation. Days with no
/// expenses count as within budget. Look-back is capped at 365 days.
pub fn streak(txns: &[Transaction], daily_budget: Decimal, as_of: NaiveDate) -> u32 {
    let daily = daily_expense_totals(txns);
    let mut count = 0u32;
    for i in 0..=365i64 {
        let day = as_of - Duration::days(i);
        let spent = daily.get(&day).copied().unwrap_or(Decimal::ZERO);
        if spent <= daily_budget {
            count += 1;
        } else {
            break;
        }
    }
    count
}

/// Strict argmax over category sums; ties go to the first encountered.
/// Empty input is `None`, which views render as "-".
pub fn top_category(category_totals: &[(String, Decimal)]) -> Option<(&str, Decimal)> {
    let mut best: Option<(&str, Decimal)> = None;
    for (cat, amount) in category_totals {
        match best {
            Some((_, top)) if *amount <= top => {}
            _ => best = Some((cat.as_str(), *amount)),
        }
    }
    best
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct WeeklyGoal {
    pub spent: Decimal,
    pub goal: Decimal,
    pub remaining: Decimal,
    pub achieved: bool,
}

/// Expense total over the trailing seven days against the weekly goal.
pub fn weekly_goal(txns: &[Transaction], goal: Decimal, as_of: DateTime<Utc>) -> WeeklyGoal {
    let week_ago = as_of - Duration::days(7);
    let spent = txns
        .iter()
        .filter(|t| t.txn_type == TxnType::Expense)
        .filter(|t| t.date.is_some_and(|d| d >= week_ago))
        .fold(Decimal::ZERO, |sum, t| sum + t.amount);
    WeeklyGoal {
        spent,
        goal,
        remaining: (goal - spent).max(Decimal::ZERO),
        achieved: spent <= goal,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetAlert {
    pub category: String,
    pub spent: Decimal,
    pub budget: Decimal,
    pub remaining: Decimal,
    pub percent_spent: Decimal,
}

/// Per-category budget standing. A category without a configured budget
/// defaults to 25% of total income; a configured zero budget with any
/// spend at all counts as fully spent.
pub fn category_budget_alerts(txns: &[Transaction], settings: &Settings) -> Vec<BudgetAlert> {
    let t = totals(txns);
    let default_budget = t.income * Decimal::new(25, 2);
    category_totals(txns, TxnType::Expense, "Others")
        .into_iter()
        .map(|(category, spent)| {
            let budget = settings
                .category_budgets
                .get(&category)
                .copied()
                .unwrap_or(default_budget);
            let percent_spent = if budget > Decimal::ZERO {
                spent / budget * Decimal::ONE_HUNDRED
            } else if spent.is_zero() {
                Decimal::ZERO
            } else {
                Decimal::ONE_HUNDRED
            };
            BudgetAlert {
                remaining: budget - spent,
                category,
                spent,
                budget,
                percent_spent,
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct Projection {
    pub description: String,
    #[serde(rename = "type")]
    pub txn_type: TxnType,
    pub category: String,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// Naive next-month estimates: each expense category at 110% of its
/// running total, each income category at 105%, rounded to whole canonical
/// units, dated one clamped calendar month ahead of `as_of`.
pub fn project_next_month(txns: &[Transaction], as_of: NaiveDate) -> Vec<Projection> {
    let date = as_of
        .checked_add_months(Months::new(1))
        .unwrap_or(as_of);
    let mut out = Vec::new();
    for (category, total) in category_totals(txns, TxnType::Expense, "Others") {
        out.push(Projection {
            description: format!("Projected {category}"),
            txn_type: TxnType::Expense,
            amount: scaled(total, Decimal::new(11, 1)),
            category,
            date,
        });
    }
    for (category, total) in category_totals(txns, TxnType::Income, "Others") {
        out.push(Projection {
            description: format!("Projected income: {category}"),
            txn_type: TxnType::Income,
            amount: scaled(total, Decimal::new(105, 2)),
            category,
            date,
        });
    }
    out
}

fn scaled(total: Decimal, factor: Decimal) -> Decimal {
    (total * factor).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
