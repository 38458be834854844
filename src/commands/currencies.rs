// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::currency::{CANONICAL, CURRENCIES};
use crate::utils::pretty_table;

pub fn handle() -> Result<()> {
    let data = CURRENCIES
        .iter()
        .map(|(code, info)| {
            vec![
                code.to_string(),
                info.symbol.to_string(),
                format!("{} per {CANONICAL}", info.rate),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Code", "Symbol", "Rate"], data));
    Ok(())
}
