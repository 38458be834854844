// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregate;
use crate::context::AppContext;
use crate::currency;
use crate::models::Transaction;
use crate::store::{TxnDraft, TxnPatch};
use crate::utils::{maybe_print_json, parse_decimal, parse_type, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ctx, sub)?,
        Some(("edit", sub)) => edit(ctx, sub)?,
        Some(("delete", sub)) => delete(ctx, sub)?,
        Some(("list", sub)) => list(ctx, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let user = ctx.require_active_user()?;
    let display_code = ctx.display_currency();
    let description = sub.get_one::<String>("description").unwrap().clone();
    let amount_display = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let txn_type = parse_type(sub.get_one::<String>("type").unwrap())?;

    // Entered in the display currency, stored canonical.
    let draft = TxnDraft {
        user,
        txn_type,
        category: sub.get_one::<String>("category").cloned(),
        description,
        quantity: *sub.get_one::<u32>("quantity").unwrap_or(&1),
        amount: currency::to_canonical(amount_display, &display_code),
        payment_method: sub
            .get_one::<String>("payment-method")
            .cloned()
            .unwrap_or_else(|| "cash".to_string()),
    };
    let txn = ctx.store.add_transaction(draft, Utc::now())?;
    println!(
        "Recorded {} '{}' ({}) as #{}",
        currency::format_canonical(txn.amount, &display_code, 2),
        txn.description,
        txn.txn_type,
        txn.id
    );
    Ok(())
}

fn edit(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let display_code = ctx.display_currency();
    let patch = TxnPatch {
        description: sub.get_one::<String>("description").cloned(),
        amount: match sub.get_one::<String>("amount") {
            Some(raw) => Some(currency::to_canonical(parse_decimal(raw)?, &display_code)),
            None => None,
        },
        txn_type: match sub.get_one::<String>("type") {
            Some(raw) => Some(parse_type(raw)?),
            None => None,
        },
        category: sub.get_one::<String>("category").cloned(),
    };
    if ctx.store.edit_transaction(id, patch)? {
        println!("Updated transaction #{id}");
    } else {
        println!("Transaction #{id} not found; nothing to do");
    }
    Ok(())
}

fn delete(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    if ctx.store.delete_transaction(id)? {
        println!("Deleted transaction #{id}");
    } else {
        println!("Transaction #{id} not found; nothing to do");
    }
    Ok(())
}

/// Listing row. `amount` stays a canonical `Decimal` so `--json` output
/// is stable under display-currency switches; only the table path formats.
#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub txn_type: String,
    pub recurring: bool,
}

pub fn rows(txns: &[Transaction]) -> Vec<TransactionRow> {
    txns.iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            description: t.description.clone(),
            // The transaction table's default bucket is "General".
            category: t.category.clone().unwrap_or_else(|| "General".to_string()),
            amount: t.amount,
            txn_type: t.txn_type.to_string(),
            recurring: t.recurring,
        })
        .collect()
}

fn list(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let user = ctx.require_active_user()?;
    let display_code = ctx.display_currency();

    let category = sub.get_one::<String>("category").map(|s| s.as_str());
    let type_filter = match sub.get_one::<String>("type") {
        Some(raw) => Some(parse_type(raw)?),
        None => None,
    };
    let search = sub
        .get_one::<String>("search")
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    let mut txns = aggregate::filter(&ctx.store.transactions(), &user, category);
    txns.retain(|t| type_filter.is_none_or(|ty| t.txn_type == ty));
    if !search.is_empty() {
        txns.retain(|t| {
            t.description.to_lowercase().contains(&search)
                || t.category
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase().contains(&search))
        });
    }
    txns.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txns.truncate(*limit);
    }

    let rows = rows(&txns);

    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.description.clone(),
                    r.category.clone(),
                    currency::format_canonical(r.amount, &display_code, 2),
                    r.txn_type.clone(),
                    if r.recurring { "yes" } else { "" }.to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Date", "Description", "Category", "Amount", "Type", "Recurring"],
                data,
            )
        );
    }
    Ok(())
}
