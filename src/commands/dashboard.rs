// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Dashboard views. Every render starts by materializing elapsed
//! recurring periods so the numbers on screen always include them, then
//! runs the requested aggregations over the active user's slice of the
//! ledger. Tables show display-currency values; JSON output carries
//! canonical amounts so it is stable under currency switches.

use anyhow::Result;
use chrono::Utc;
use serde_json::json;

use crate::aggregate::{self, Totals};
use crate::context::AppContext;
use crate::currency;
use crate::models::{Settings, Transaction, TxnType};
use crate::utils::{maybe_print_json, parse_instant, pretty_table};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewId {
    Summary,
    Categories,
    Monthly,
    Budget,
    Streak,
    Weekly,
    Projections,
}

impl ViewId {
    pub const ALL: [ViewId; 7] = [
        ViewId::Summary,
        ViewId::Categories,
        ViewId::Monthly,
        ViewId::Budget,
        ViewId::Streak,
        ViewId::Weekly,
        ViewId::Projections,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ViewId::Summary => "summary",
            ViewId::Categories => "categories",
            ViewId::Monthly => "monthly",
            ViewId::Budget => "budget",
            ViewId::Streak => "streak",
            ViewId::Weekly => "weekly",
            ViewId::Projections => "projections",
        }
    }
}

impl std::str::FromStr for ViewId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "summary" => Ok(ViewId::Summary),
            "categories" => Ok(ViewId::Categories),
            "monthly" => Ok(ViewId::Monthly),
            "budget" => Ok(ViewId::Budget),
            "streak" => Ok(ViewId::Streak),
            "weekly" => Ok(ViewId::Weekly),
            "projections" => Ok(ViewId::Projections),
            other => Err(format!("unknown view '{other}'")),
        }
    }
}

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    let jsonl_flag = m.get_flag("jsonl");
    let user = ctx.require_active_user()?;
    let as_of = match m.get_one::<String>("as-of") {
        Some(raw) => parse_instant(raw)?,
        None => Utc::now(),
    };

    let views: Vec<ViewId> = match m.get_many::<String>("view") {
        Some(raw) => {
            let mut picked = Vec::new();
            for v in raw {
                let view = v.parse::<ViewId>().map_err(anyhow::Error::msg)?;
                if !picked.contains(&view) {
                    picked.push(view);
                }
            }
            picked
        }
        None => ViewId::ALL.to_vec(),
    };

    // Bring the ledger up to date before reading it, same order as an
    // interactive refresh.
    ctx.store.materialize(as_of)?;

    let settings = ctx.store.settings();
    let display_code = ctx.display_currency();
    let txns = aggregate::filter(
        &ctx.store.transactions(),
        &user,
        m.get_one::<String>("category").map(|s| s.as_str()),
    );
    let totals = aggregate::totals(&txns);

    if json_flag || jsonl_flag {
        let mut sections = serde_json::Map::new();
        for view in &views {
            sections.insert(view.name().to_string(), json_section(*view, &txns, &totals, &settings, as_of));
        }
        maybe_print_json(json_flag, jsonl_flag, &sections)?;
        return Ok(());
    }

    for view in &views {
        render(*view, &txns, &totals, &settings, &display_code, as_of);
    }
    Ok(())
}

fn json_section(
    view: ViewId,
    txns: &[Transaction],
    totals: &Totals,
    settings: &Settings,
    as_of: chrono::DateTime<Utc>,
) -> serde_json::Value {
    match view {
        ViewId::Summary => json!(totals),
        ViewId::Categories => {
            let expenses = aggregate::category_totals(txns, TxnType::Expense, "Others");
            let income = aggregate::category_totals(txns, TxnType::Income, "Others");
            json!({
                "expenses": expenses,
                "income": income,
                "topExpense": aggregate::top_category(&expenses),
                "topIncome": aggregate::top_category(&income),
            })
        }
        ViewId::Monthly => json!({
            "income": aggregate::monthly_series(txns, TxnType::Income),
            "expenses": aggregate::monthly_series(txns, TxnType::Expense),
        }),
        ViewId::Budget => json!({
            "overall": aggregate::budget_status(totals, settings.budget),
            "categories": aggregate::category_budget_alerts(txns, settings),
        }),
        ViewId::Streak => {
            json!({ "days": aggregate::streak(txns, settings.budget, as_of.date_naive()) })
        }
        ViewId::Weekly => json!(aggregate::weekly_goal(txns, settings.weekly_goal, as_of)),
        ViewId::Projections => json!(aggregate::project_next_month(txns, as_of.date_naive())),
    }
}

fn render(
    view: ViewId,
    txns: &[Transaction],
    totals: &Totals,
    settings: &Settings,
    code: &str,
    as_of: chrono::DateTime<Utc>,
) {
    let money = |v| currency::format_canonical(v, code, 2);
    match view {
        ViewId::Summary => {
            let data = vec![
                vec!["Income".to_string(), money(totals.income)],
                vec!["Expenses".to_string(), money(totals.expenses)],
                vec!["Balance".to_string(), money(totals.balance)],
            ];
            println!("{}", pretty_table(&["Summary", "Amount"], data));
        }
        ViewId::Categories => {
            let expenses = aggregate::category_totals(txns, TxnType::Expense, "Others");
            let income = aggregate::category_totals(txns, TxnType::Income, "Others");
            let mut data: Vec<Vec<String>> = expenses
                .iter()
                .map(|(c, v)| vec!["expense".to_string(), c.clone(), money(*v)])
                .collect();
            data.extend(
                income
                    .iter()
                    .map(|(c, v)| vec!["income".to_string(), c.clone(), money(*v)]),
            );
            println!("{}", pretty_table(&["Type", "Category", "Total"], data));
            let top = |label: &str, best: Option<(&str, rust_decimal::Decimal)>| match best {
                Some((cat, v)) => println!("Top {label}: {cat} ({})", money(v)),
                None => println!("Top {label}: -"),
            };
            top("expense category", aggregate::top_category(&expenses));
            top("income category", aggregate::top_category(&income));
        }
        ViewId::Monthly => {
            let income = aggregate::monthly_series(txns, TxnType::Income);
            let expenses = aggregate::monthly_series(txns, TxnType::Expense);
            let data = (0..12)
                .map(|i| {
                    vec![
                        MONTH_NAMES[i].to_string(),
                        money(income[i]),
                        money(expenses[i]),
                    ]
                })
                .collect();
            println!("{}", pretty_table(&["Month", "Income", "Expenses"], data));
        }
        ViewId::Budget => {
            let status = aggregate::budget_status(totals, settings.budget);
            if settings.budget > rust_decimal::Decimal::ZERO {
                println!(
                    "Budget {}: remaining {}, overspent {}",
                    money(settings.budget),
                    money(status.remaining),
                    money(status.overspent)
                );
            } else {
                println!("No explicit budget; remaining balance {}", money(status.remaining));
            }
            let data = aggregate::category_budget_alerts(txns, settings)
                .into_iter()
                .map(|a| {
                    vec![
                        a.category,
                        money(a.spent),
                        money(a.budget),
                        money(a.remaining),
                        format!("{}%", a.percent_spent.round_dp(1)),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Category", "Spent", "Budget", "Remaining", "Spent %"], data)
            );
        }
        ViewId::Streak => {
            let days = aggregate::streak(txns, settings.budget, as_of.date_naive());
            println!("Days within budget streak: {days}");
        }
        ViewId::Weekly => {
            let goal = aggregate::weekly_goal(txns, settings.weekly_goal, as_of);
            println!(
                "Last 7 days: spent {} of {} goal ({}; {} remaining)",
                money(goal.spent),
                money(goal.goal),
                if goal.achieved { "on track" } else { "over" },
                money(goal.remaining)
            );
        }
        ViewId::Projections => {
            let data = aggregate::project_next_month(txns, as_of.date_naive())
                .into_iter()
                .map(|p| {
                    vec![
                        p.date.format("%Y-%m-%d").to_string(),
                        p.description,
                        p.category,
                        p.txn_type.to_string(),
                        money(p.amount),
                    ]
                })
                .collect();
            println!(
                "{}",
                pretty_table(&["Date", "Description", "Category", "Type", "Amount"], data)
            );
        }
    }
}
