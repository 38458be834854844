// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use kudiflow::aggregate;
use kudiflow::models::{Frequency, Settings, Transaction, TxnType};

fn dt(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn txn(
    id: i64,
    txn_type: TxnType,
    category: Option<&str>,
    amount: i64,
    date: Option<DateTime<Utc>>,
) -> Transaction {
    Transaction {
        id,
        user: "ada".to_string(),
        txn_type,
        category: category.map(str::to_string),
        description: format!("txn {id}"),
        quantity: 1,
        amount: Decimal::new(amount, 0),
        payment_method: "cash".to_string(),
        recurring: false,
        recurring_id: None,
        frequency: Frequency::None,
        end_date: None,
        date,
    }
}

#[test]
fn totals_split_by_type() {
    let txns = vec![
        txn(1, TxnType::Income, Some("Salary"), 5000, Some(dt(2026, 1, 5))),
        txn(2, TxnType::Expense, Some("Food"), 1200, Some(dt(2026, 1, 6))),
        txn(3, TxnType::Expense, Some("Rent"), 800, Some(dt(2026, 1, 7))),
    ];
    let t = aggregate::totals(&txns);
    assert_eq!(t.income, Decimal::new(5000, 0));
    assert_eq!(t.expenses, Decimal::new(2000, 0));
    assert_eq!(t.balance, Decimal::new(3000, 0));
}

#[test]
fn filter_scopes_to_user_and_category() {
    let mut other = txn(9, TxnType::Expense, Some("Food"), 999, Some(dt(2026, 1, 1)));
    other.user = "bob".to_string();
    let txns = vec![
        txn(1, TxnType::Expense, Some("Food"), 10, Some(dt(2026, 1, 1))),
        txn(2, TxnType::Expense, Some("food"), 20, Some(dt(2026, 1, 2))),
        txn(3, TxnType::Expense, None, 30, Some(dt(2026, 1, 3))),
        other,
    ];

    assert_eq!(aggregate::filter(&txns, "ada", None).len(), 3);
    // Category matching is case-insensitive.
    assert_eq!(aggregate::filter(&txns, "ada", Some("FOOD")).len(), 2);
    // A missing category matches as "Others".
    assert_eq!(aggregate::filter(&txns, "ada", Some("Others")).len(), 1);
    // The sentinel means "no filter".
    assert_eq!(aggregate::filter(&txns, "ada", Some("All Categories")).len(), 3);
}

#[test]
fn category_totals_keep_first_encountered_order() {
    let txns = vec![
        txn(1, TxnType::Expense, Some("Transport"), 10, Some(dt(2026, 1, 1))),
        txn(2, TxnType::Expense, Some("Food"), 20, Some(dt(2026, 1, 2))),
        txn(3, TxnType::Expense, Some("Transport"), 5, Some(dt(2026, 1, 3))),
        txn(4, TxnType::Expense, None, 7, Some(dt(2026, 1, 4))),
        txn(5, TxnType::Income, Some("Salary"), 100, Some(dt(2026, 1, 5))),
    ];
    let out = aggregate::category_totals(&txns, TxnType::Expense, "Others");
    assert_eq!(
        out,
        vec![
            ("Transport".to_string(), Decimal::new(15, 0)),
            ("Food".to_string(), Decimal::new(20, 0)),
            ("Others".to_string(), Decimal::new(7, 0)),
        ]
    );
}

#[test]
fn monthly_series_is_year_blind() {
    let txns = vec![
        txn(1, TxnType::Expense, None, 100, Some(dt(2025, 3, 10))),
        txn(2, TxnType::Expense, None, 50, Some(dt(2026, 3, 20))),
        txn(3, TxnType::Expense, None, 40, None), // no date: skipped
        txn(4, TxnType::Expense, None, 9, Some(dt(2026, 12, 31))),
    ];
    let series = aggregate::monthly_series(&txns, TxnType::Expense);
    assert_eq!(series[2], Decimal::new(150, 0));
    assert_eq!(series[11], Decimal::new(9, 0));
    assert_eq!(series[0], Decimal::ZERO);
}

#[test]
fn budget_status_with_explicit_budget_clamps_both_sides() {
    let under = aggregate::totals(&[txn(1, TxnType::Expense, None, 300, Some(dt(2026, 1, 1)))]);
    let s = aggregate::budget_status(&under, Decimal::new(1000, 0));
    assert_eq!(s.remaining, Decimal::new(700, 0));
    assert_eq!(s.overspent, Decimal::ZERO);

    let over = aggregate::totals(&[txn(1, TxnType::Expense, None, 1300, Some(dt(2026, 1, 1)))]);
    let s = aggregate::budget_status(&over, Decimal::new(1000, 0));
    assert_eq!(s.remaining, Decimal::ZERO);
    assert_eq!(s.overspent, Decimal::new(300, 0));
}

#[test]
fn zero_budget_means_balance_is_the_budget() {
    let totals = aggregate::totals(&[
        txn(1, TxnType::Income, None, 500, Some(dt(2026, 1, 1))),
        txn(2, TxnType::Expense, None, 900, Some(dt(2026, 1, 2))),
    ]);
    let s = aggregate::budget_status(&totals, Decimal::ZERO);
    // Remaining tracks the (possibly negative) balance and nothing ever
    // counts as overspent.
    assert_eq!(s.remaining, Decimal::new(-400, 0));
    assert_eq!(s.overspent, Decimal::ZERO);
}

#[test]
fn streak_stops_at_the_first_violation() {
    let budget = Decimal::new(100, 0);
    let txns = vec![
        txn(1, TxnType::Expense, None, 50, Some(dt(2026, 8, 25))),
        txn(2, TxnType::Expense, None, 200, Some(dt(2026, 8, 24))),
        txn(3, TxnType::Expense, None, 10, Some(dt(2026, 8, 23))),
    ];
    assert_eq!(aggregate::streak(&txns, budget, day(2026, 8, 25)), 1);
}

#[test]
fn streak_counts_empty_days_as_within_budget() {
    let budget = Decimal::new(100, 0);
    // Nothing spent on the 24th; the violation sits two days back.
    let txns = vec![
        txn(1, TxnType::Expense, None, 50, Some(dt(2026, 8, 25))),
        txn(2, TxnType::Expense, None, 200, Some(dt(2026, 8, 23))),
    ];
    assert_eq!(aggregate::streak(&txns, budget, day(2026, 8, 25)), 2);
}

#[test]
fn streak_with_no_expenses_at_all_runs_the_full_window() {
    assert_eq!(aggregate::streak(&[], Decimal::new(100, 0), day(2026, 8, 25)), 366);
}

#[test]
fn top_category_is_a_strict_argmax() {
    let sums = vec![
        ("Food".to_string(), Decimal::new(40, 0)),
        ("Rent".to_string(), Decimal::new(90, 0)),
        ("Fun".to_string(), Decimal::new(90, 0)),
    ];
    // Ties go to the first encountered.
    assert_eq!(aggregate::top_category(&sums), Some(("Rent", Decimal::new(90, 0))));
    assert_eq!(aggregate::top_category(&[]), None);
}

#[test]
fn weekly_goal_covers_the_trailing_seven_days() {
    let as_of = dt(2026, 8, 25);
    let txns = vec![
        txn(1, TxnType::Expense, None, 30, Some(dt(2026, 8, 24))),
        txn(2, TxnType::Expense, None, 20, Some(dt(2026, 8, 19))),
        txn(3, TxnType::Expense, None, 500, Some(dt(2026, 8, 10))), // too old
        txn(4, TxnType::Income, None, 999, Some(dt(2026, 8, 24))),  // ignored
    ];
    let g = aggregate::weekly_goal(&txns, Decimal::new(100, 0), as_of);
    assert_eq!(g.spent, Decimal::new(50, 0));
    assert_eq!(g.remaining, Decimal::new(50, 0));
    assert!(g.achieved);

    let tight = aggregate::weekly_goal(&txns, Decimal::new(40, 0), as_of);
    assert_eq!(tight.remaining, Decimal::ZERO);
    assert!(!tight.achieved);
}

#[test]
fn category_alerts_default_to_a_quarter_of_income_when_unset() {
    // "Groceries" is not seeded in Settings::default(), so it has no
    // configured budget and falls back to 25% of total income. Seeded
    // categories carry an explicit zero and do not fall back.
    let txns = vec![
        txn(1, TxnType::Income, Some("Salary"), 1000, Some(dt(2026, 1, 1))),
        txn(2, TxnType::Expense, Some("Groceries"), 100, Some(dt(2026, 1, 2))),
    ];
    let alerts = aggregate::category_budget_alerts(&txns, &Settings::default());
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].category, "Groceries");
    assert_eq!(alerts[0].budget, Decimal::new(250, 0));
    assert_eq!(alerts[0].remaining, Decimal::new(150, 0));
    assert_eq!(alerts[0].percent_spent, Decimal::new(40, 0));
}

#[test]
fn configured_zero_budget_with_spend_reads_fully_spent() {
    let txns = vec![txn(1, TxnType::Expense, Some("Food"), 100, Some(dt(2026, 1, 2)))];
    // Settings::default() seeds every default category, Food included,
    // with a zero budget.
    let alerts = aggregate::category_budget_alerts(&txns, &Settings::default());
    assert_eq!(alerts[0].budget, Decimal::ZERO);
    assert_eq!(alerts[0].percent_spent, Decimal::ONE_HUNDRED);
}

#[test]
fn projections_scale_categories_and_land_next_month() {
    let txns = vec![
        txn(1, TxnType::Expense, Some("Food"), 200, Some(dt(2026, 1, 10))),
        txn(2, TxnType::Income, Some("Salary"), 1000, Some(dt(2026, 1, 1))),
    ];
    let out = aggregate::project_next_month(&txns, day(2026, 1, 31));
    assert_eq!(out.len(), 2);

    let food = out.iter().find(|p| p.category == "Food").unwrap();
    assert_eq!(food.amount, Decimal::new(220, 0));
    assert_eq!(food.txn_type, TxnType::Expense);
    // +1 calendar month from Jan 31 clamps to Feb 28.
    assert_eq!(food.date, day(2026, 2, 28));

    let salary = out.iter().find(|p| p.category == "Salary").unwrap();
    assert_eq!(salary.amount, Decimal::new(1050, 0));
    assert_eq!(salary.txn_type, TxnType::Income);
}

#[test]
fn projections_round_half_away_from_zero() {
    // 35 * 1.05 = 36.75 -> 37
    let txns = vec![txn(1, TxnType::Income, Some("Tips"), 35, Some(dt(2026, 1, 1)))];
    let out = aggregate::project_next_month(&txns, day(2026, 1, 15));
    assert_eq!(out[0].amount, Decimal::new(37, 0));
}
