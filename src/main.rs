// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use kudiflow::{cli, commands, context::AppContext, store::LedgerStore};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut store = LedgerStore::open_default()?;
    store.subscribe(|event| tracing::debug!(?event, "ledger event"));
    let mut ctx = AppContext::new(store);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Ledger initialized at {}", ctx.store.path().display());
        }
        Some(("user", sub)) => commands::users::handle(&mut ctx, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&mut ctx, sub)?,
        Some(("recurring", sub)) => commands::recurring::handle(&mut ctx, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut ctx, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&mut ctx, sub)?,
        Some(("currencies", _)) => commands::currencies::handle()?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
