// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::context::AppContext;
use crate::currency;
use crate::models::{Frequency, RecurringRule};
use crate::utils::{maybe_print_json, parse_decimal, parse_instant, parse_type, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        Some(("delete", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            if ctx.store.delete_recurring(id)? {
                println!("Deleted rule #{id}");
            } else {
                println!("Rule #{id} not found; nothing to do");
            }
        }
        Some(("run", sub)) => run(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let user = ctx.require_active_user()?;
    let display_code = ctx.display_currency();
    let amount_display = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let frequency = Frequency::from(sub.get_one::<String>("frequency").unwrap().clone());
    if matches!(frequency, Frequency::None | Frequency::Other(_)) {
        anyhow::bail!("frequency must be daily, weekly or monthly");
    }
    let rule = ctx.store.add_recurring(
        &user,
        sub.get_one::<String>("description").unwrap(),
        currency::to_canonical(amount_display, &display_code),
        parse_type(sub.get_one::<String>("type").unwrap())?,
        sub.get_one::<String>("category").cloned(),
        frequency,
        Utc::now(),
    )?;
    println!(
        "Added {} rule '{}' as #{}; periods start counting from now",
        rule.frequency, rule.description, rule.id
    );
    Ok(())
}

/// Listing row. `amount` stays a canonical `Decimal` so `--json` output
/// is stable under display-currency switches; only the table path formats.
#[derive(Serialize)]
pub struct RuleRow {
    pub id: i64,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub txn_type: String,
    pub frequency: String,
    pub last_generated: String,
}

pub fn rows(rules: &[RecurringRule]) -> Vec<RuleRow> {
    rules
        .iter()
        .map(|r| RuleRow {
            id: r.id,
            description: r.description.clone(),
            category: r.category.clone().unwrap_or_else(|| "Others".to_string()),
            amount: r.amount,
            txn_type: r.txn_type.to_string(),
            frequency: r.frequency.to_string(),
            last_generated: r
                .last_generated
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        })
        .collect()
}

fn list(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = ctx.require_active_user()?;
    let display_code = ctx.display_currency();

    let rows = rows(&ctx.store.rules_for(&user));

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.description.clone(),
                    r.category.clone(),
                    currency::format_canonical(r.amount, &display_code, 2),
                    r.txn_type.clone(),
                    r.frequency.clone(),
                    r.last_generated.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Description", "Category", "Amount", "Type", "Frequency", "Last run"],
                data,
            )
        );
    }
    Ok(())
}

fn run(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let as_of = match sub.get_one::<String>("as-of") {
        Some(raw) => parse_instant(raw)?,
        None => Utc::now(),
    };
    let generated = ctx.store.materialize(as_of)?;
    if generated == 0 {
        println!("No periods due; ledger unchanged");
    } else {
        println!("Generated {generated} transaction(s)");
    }
    Ok(())
}
