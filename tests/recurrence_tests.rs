// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;

use kudiflow::models::{Frequency, RecurringRule, TxnType};
use kudiflow::recurrence::expand;

fn dt(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn rule(id: i64, frequency: Frequency, last_generated: Option<DateTime<Utc>>) -> RecurringRule {
    RecurringRule {
        id,
        user: "ada".to_string(),
        description: "Rent".to_string(),
        amount: Decimal::new(500, 0),
        txn_type: TxnType::Expense,
        category: Some("Rent".to_string()),
        frequency,
        last_generated,
    }
}

#[test]
fn daily_rule_emits_one_transaction_per_elapsed_day() {
    let rules = vec![rule(1, Frequency::Daily, Some(dt(2026, 1, 1)))];
    let out = expand(&rules, &[], dt(2026, 1, 4));

    assert_eq!(out.transactions.len(), 3);
    let dates: Vec<_> = out.transactions.iter().map(|t| t.date.unwrap()).collect();
    assert_eq!(dates, vec![dt(2026, 1, 2), dt(2026, 1, 3), dt(2026, 1, 4)]);
    assert_eq!(out.rules[0].last_generated, Some(dt(2026, 1, 4)));

    for t in &out.transactions {
        assert!(t.recurring);
        assert_eq!(t.recurring_id, Some(1));
        assert_eq!(t.payment_method, "recurring");
        assert_eq!(t.amount, Decimal::new(500, 0));
        assert_eq!(t.user, "ada");
    }
}

#[test]
fn weekly_rule_steps_seven_days() {
    let rules = vec![rule(1, Frequency::Weekly, Some(dt(2026, 1, 1)))];
    let out = expand(&rules, &[], dt(2026, 1, 20));

    let dates: Vec<_> = out.transactions.iter().map(|t| t.date.unwrap()).collect();
    assert_eq!(dates, vec![dt(2026, 1, 8), dt(2026, 1, 15)]);
}

#[test]
fn monthly_rule_clamps_to_end_of_month() {
    // Jan 31 + 1 month lands on Feb 28, and the cursor stays on the 28th
    // from then on.
    let rules = vec![rule(1, Frequency::Monthly, Some(dt(2026, 1, 31)))];
    let out = expand(&rules, &[], dt(2026, 4, 15));

    let dates: Vec<_> = out.transactions.iter().map(|t| t.date.unwrap()).collect();
    assert_eq!(dates, vec![dt(2026, 2, 28), dt(2026, 3, 28)]);
}

#[test]
fn expansion_is_idempotent_at_the_same_instant() {
    let rules = vec![rule(1, Frequency::Daily, Some(dt(2026, 1, 1)))];
    let first = expand(&rules, &[], dt(2026, 1, 10));
    assert_eq!(first.transactions.len(), 9);

    let again = expand(&first.rules, &first.transactions, dt(2026, 1, 10));
    assert!(again.transactions.is_empty());
    assert_eq!(again.rules[0].last_generated, Some(dt(2026, 1, 10)));
}

#[test]
fn cursor_reset_absorbs_the_trailing_partial_period() {
    let noon = Utc.with_ymd_and_hms(2026, 1, 3, 12, 0, 0).unwrap();
    let rules = vec![rule(1, Frequency::Daily, Some(dt(2026, 1, 1)))];
    let out = expand(&rules, &[], noon);
    assert_eq!(out.transactions.len(), 2);
    assert_eq!(out.rules[0].last_generated, Some(noon));

    // The next whole period now counts from noon, so midnight of the 4th
    // is not yet due.
    let next = expand(&out.rules, &out.transactions, dt(2026, 1, 4));
    assert!(next.transactions.is_empty());
}

#[test]
fn never_generated_rule_starts_its_window_now() {
    let rules = vec![rule(1, Frequency::Daily, None)];
    let out = expand(&rules, &[], dt(2026, 1, 10));
    assert!(out.transactions.is_empty());
    assert_eq!(out.rules[0].last_generated, Some(dt(2026, 1, 10)));

    let next = expand(&out.rules, &[], dt(2026, 1, 12));
    assert_eq!(next.transactions.len(), 2);
}

#[test]
fn rule_ahead_of_now_is_left_untouched() {
    let future = dt(2026, 6, 1);
    let rules = vec![rule(1, Frequency::Daily, Some(future))];
    let out = expand(&rules, &[], dt(2026, 1, 10));

    assert!(out.transactions.is_empty());
    // The cursor must never move backward.
    assert_eq!(out.rules[0].last_generated, Some(future));
}

#[test]
fn unrecognized_frequency_stalls_the_rule() {
    let rules = vec![
        rule(1, Frequency::Other("yearly".to_string()), Some(dt(2026, 1, 1))),
        rule(2, Frequency::None, Some(dt(2026, 1, 1))),
    ];
    let out = expand(&rules, &[], dt(2026, 3, 1));

    assert!(out.transactions.is_empty());
    assert_eq!(out.rules[0].last_generated, Some(dt(2026, 1, 1)));
    assert_eq!(out.rules[0].frequency, Frequency::Other("yearly".to_string()));
    assert_eq!(out.rules[1].last_generated, Some(dt(2026, 1, 1)));
}

#[test]
fn generated_ids_are_unique_and_clear_of_the_ledger() {
    let rules = vec![
        rule(1, Frequency::Daily, Some(dt(2026, 1, 1))),
        rule(2, Frequency::Daily, Some(dt(2026, 1, 1))),
    ];
    let out = expand(&rules, &[], dt(2026, 1, 5));

    let mut ids: Vec<_> = out.transactions.iter().map(|t| t.id).collect();
    let len = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), len);
    let floor = dt(2026, 1, 5).timestamp_millis();
    assert!(ids.iter().all(|id| *id > floor));
}
