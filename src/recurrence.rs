// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, Days, Months, Utc};
use tracing::warn;

use crate::models::{Frequency, RecurringRule, Transaction};

/// Result of expanding recurring rules up to a point in time. Computed
/// entirely in memory; the ledger store persists both halves in one write
/// so a partial failure can never double-generate.
#[derive(Debug, Default)]
pub struct Expansion {
    pub transactions: Vec<Transaction>,
    pub rules: Vec<RecurringRule>,
}

/// Materializes every elapsed period of every rule into a concrete
/// transaction, exactly once.
///
/// Per rule the cursor starts at `last_generated` and advances one period
/// at a time while it stays within `as_of`; each advanced position emits
/// one transaction dated at the cursor. Afterwards `last_generated` is
/// reset to `as_of` itself, not the last emitted occurrence — the
/// fractional trailing period is deliberately absorbed (see DESIGN.md).
/// Idempotence follows: a second call at the same `as_of` starts its
/// cursor at the window's end and emits nothing.
///
/// Monthly steps use calendar months with end-of-month clamping
/// (Jan 31 + 1 month = Feb 28/29).
pub fn expand(
    rules: &[RecurringRule],
    existing: &[Transaction],
    as_of: DateTime<Utc>,
) -> Expansion {
    let mut out = Expansion::default();
    // Time-derived ids, kept clear of everything already in the ledger.
    let mut next_id = existing
        .iter()
        .map(|t| t.id)
        .max()
        .unwrap_or(0)
        .max(as_of.timestamp_millis());

    for rule in rules {
        let mut rule = rule.clone();
        let start = match rule.last_generated {
            Some(ts) => ts,
            // A rule that never generated starts its window now: no
            // back-fill, next call picks up from here.
            None => as_of,
        };

        if start > as_of {
            // Clock skew. Emit nothing and never move the cursor backward.
            warn!(rule = rule.id, "recurring rule is ahead of now; skipped");
            out.rules.push(rule);
            continue;
        }

        if !matches!(
            rule.frequency,
            Frequency::Daily | Frequency::Weekly | Frequency::Monthly
        ) {
            warn!(
                rule = rule.id,
                frequency = %rule.frequency,
                "recurring rule has unrecognized frequency; stalled"
            );
            out.rules.push(rule);
            continue;
        }

        let mut cursor = start;
        loop {
            cursor = match step(cursor, &rule.frequency) {
                Some(next) => next,
                None => break,
            };
            if cursor > as_of {
                break;
            }
            next_id += 1;
            out.transactions.push(Transaction {
                id: next_id,
                user: rule.user.clone(),
                txn_type: rule.txn_type,
                category: rule.category.clone(),
                description: rule.description.clone(),
                quantity: 1,
                amount: rule.amount,
                payment_method: "recurring".to_string(),
                recurring: true,
                recurring_id: Some(rule.id),
                frequency: rule.frequency.clone(),
                end_date: None,
                date: Some(cursor),
            });
        }

        rule.last_generated = Some(as_of);
        out.rules.push(rule);
    }

    out
}

fn step(cursor: DateTime<Utc>, frequency: &Frequency) -> Option<DateTime<Utc>> {
    match frequency {
        Frequency::Daily => cursor.checked_add_days(Days::new(1)),
        Frequency::Weekly => cursor.checked_add_days(Days::new(7)),
        Frequency::Monthly => cursor.checked_add_months(Months::new(1)),
        _ => None,
    }
}
