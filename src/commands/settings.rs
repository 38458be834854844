// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::context::AppContext;
use crate::utils::{maybe_print_json, parse_decimal, pretty_table};

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", sub)) => show(ctx, sub)?,
        Some(("set-currency", sub)) => {
            let code = sub.get_one::<String>("code").unwrap();
            ctx.require_active_user()?;
            let settings = ctx.store.set_display_currency(code)?;
            println!(
                "Display currency is now {} ({})",
                settings.currency_code, settings.currency_symbol
            );
        }
        Some(("set-budget", sub)) => {
            ctx.require_active_user()?;
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let mut settings = ctx.store.settings();
            settings.budget = amount;
            ctx.store.save_settings(settings)?;
            if amount.is_zero() {
                println!("Budget cleared; balance acts as the budget");
            } else {
                println!("Monthly budget set to {amount}");
            }
        }
        Some(("set-category-budget", sub)) => {
            ctx.require_active_user()?;
            let category = sub.get_one::<String>("category").unwrap().clone();
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let mut settings = ctx.store.settings();
            settings.category_budgets.insert(category.clone(), amount);
            ctx.store.save_settings(settings)?;
            println!("Budget for '{category}' set to {amount}");
        }
        Some(("set-weekly-goal", sub)) => {
            ctx.require_active_user()?;
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let mut settings = ctx.store.settings();
            settings.weekly_goal = amount;
            ctx.store.save_settings(settings)?;
            println!("Weekly spending goal set to {amount}");
        }
        Some(("set-savings-goal", sub)) => {
            ctx.require_active_user()?;
            let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
            let mut settings = ctx.store.settings();
            settings.savings_goal = amount;
            ctx.store.save_settings(settings)?;
            println!("Savings goal set to {amount}");
        }
        Some(("toggle-dark-mode", _)) => {
            ctx.require_active_user()?;
            let mut settings = ctx.store.settings();
            settings.dark_mode = !settings.dark_mode;
            let on = settings.dark_mode;
            ctx.store.save_settings(settings)?;
            println!("Dark mode {}", if on { "enabled" } else { "disabled" });
        }
        Some(("toggle-confetti", _)) => {
            ctx.require_active_user()?;
            let mut settings = ctx.store.settings();
            settings.confetti = !settings.confetti;
            let on = settings.confetti;
            ctx.store.save_settings(settings)?;
            println!("Confetti {}", if on { "enabled" } else { "disabled" });
        }
        Some(("toggle-transaction-reminder", _)) => {
            ctx.require_active_user()?;
            let mut settings = ctx.store.settings();
            settings.transaction_reminder = !settings.transaction_reminder;
            let on = settings.transaction_reminder;
            ctx.store.save_settings(settings)?;
            println!("Transaction reminder {}", if on { "enabled" } else { "disabled" });
        }
        Some(("toggle-budget-alert", _)) => {
            ctx.require_active_user()?;
            let mut settings = ctx.store.settings();
            settings.budget_alert = !settings.budget_alert;
            let on = settings.budget_alert;
            ctx.store.save_settings(settings)?;
            println!("Budget alert {}", if on { "enabled" } else { "disabled" });
        }
        Some(("toggle-income-alert", _)) => {
            ctx.require_active_user()?;
            let mut settings = ctx.store.settings();
            settings.income_alert = !settings.income_alert;
            let on = settings.income_alert;
            ctx.store.save_settings(settings)?;
            println!("Income alert {}", if on { "enabled" } else { "disabled" });
        }
        Some(("reset", _)) => {
            ctx.require_active_user()?;
            ctx.store.reset_settings()?;
            println!("Settings restored to defaults");
        }
        _ => {}
    }
    Ok(())
}

fn show(ctx: &mut AppContext, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    ctx.require_active_user()?;
    let settings = ctx.store.settings();

    if !maybe_print_json(json_flag, jsonl_flag, &settings)? {
        let mut data = vec![
            vec![
                "Display currency".to_string(),
                format!("{} ({})", settings.currency_code, settings.currency_symbol),
            ],
            vec!["Monthly budget".to_string(), settings.budget.to_string()],
            vec!["Weekly goal".to_string(), settings.weekly_goal.to_string()],
            vec!["Savings goal".to_string(), settings.savings_goal.to_string()],
            vec!["Date format".to_string(), settings.date_format.clone()],
            vec!["Dark mode".to_string(), settings.dark_mode.to_string()],
            vec!["Confetti".to_string(), settings.confetti.to_string()],
            vec![
                "Transaction reminder".to_string(),
                settings.transaction_reminder.to_string(),
            ],
            vec!["Budget alert".to_string(), settings.budget_alert.to_string()],
            vec!["Income alert".to_string(), settings.income_alert.to_string()],
        ];
        for (category, budget) in &settings.category_budgets {
            data.push(vec![format!("Budget: {category}"), budget.to_string()]);
        }
        println!("{}", pretty_table(&["Setting", "Value"], data));
    }
    Ok(())
}
