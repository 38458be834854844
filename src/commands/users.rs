// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::context::AppContext;

pub fn handle(ctx: &mut AppContext, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("register", sub)) => {
            let username = sub.get_one::<String>("username").unwrap();
            let email = sub.get_one::<String>("email").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let user = ctx.store.register(username, email, password)?;
            println!("Registered '{}'", user.username);
        }
        Some(("login", sub)) => {
            let username = sub.get_one::<String>("username").unwrap();
            let password = sub.get_one::<String>("password").unwrap();
            let user = ctx.store.login(username, password)?;
            println!("Logged in as '{}'", user.username);
        }
        Some(("logout", _)) => {
            ctx.store.logout()?;
            println!("Logged out");
        }
        Some(("whoami", _)) => match ctx.store.active_user() {
            Some(user) => println!("{user}"),
            None => println!("(not logged in)"),
        },
        _ => {}
    }
    Ok(())
}
