// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use once_cell::sync::Lazy;
use rust_decimal::{Decimal, RoundingStrategy};

/// Display units per one canonical unit (NGN). The table is static product
/// configuration; there is no rate history and no fetching. Historical
/// amounts are re-priced at these rates on display, by design.
pub struct CurrencyInfo {
    pub rate: Decimal,
    pub symbol: &'static str,
}

pub const CANONICAL: &str = "NGN";

pub static CURRENCIES: Lazy<Vec<(&'static str, CurrencyInfo)>> = Lazy::new(|| {
    vec![
        ("NGN", info(Decimal::ONE, "₦")),
        ("USD", info(Decimal::new(27, 4), "$")),
        ("EUR", info(Decimal::new(25, 4), "€")),
        ("GBP", info(Decimal::new(21, 4), "£")),
        ("QAR", info(Decimal::new(99, 4), "ر.ق")),
        ("AED", info(Decimal::new(10, 3), "د.إ")),
        ("SAR", info(Decimal::new(105, 4), "﷼")),
        ("JPY", info(Decimal::new(36, 2), "¥")),
        ("CHF", info(Decimal::new(25, 4), "CHF")),
        ("CAD", info(Decimal::new(36, 4), "$")),
        ("AUD", info(Decimal::new(39, 4), "$")),
        ("CNY", info(Decimal::new(18, 3), "¥")),
        ("INR", info(Decimal::new(22, 2), "₹")),
        ("BRL", info(Decimal::new(14, 3), "R$")),
        ("ZAR", info(Decimal::new(45, 3), "R")),
        ("EGP", info(Decimal::new(49, 3), "£")),
        ("KES", info(Decimal::new(37, 2), "KSh")),
    ]
});

fn info(rate: Decimal, symbol: &'static str) -> CurrencyInfo {
    CurrencyInfo { rate, symbol }
}

pub fn lookup(code: &str) -> Option<&'static CurrencyInfo> {
    CURRENCIES
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, i)| i)
}

/// Unknown codes fall back to rate 1: conversion becomes a no-op rather
/// than an error, so stored settings can reference a since-removed code.
pub fn rate(code: &str) -> Decimal {
    lookup(code).map(|i| i.rate).unwrap_or(Decimal::ONE)
}

pub fn symbol_for(code: &str) -> &str {
    match lookup(code) {
        Some(i) => i.symbol,
        None => code,
    }
}

/// Canonical -> display. Pure multiplication by the static rate.
pub fn to_display(amount_canonical: Decimal, display_code: &str) -> Decimal {
    amount_canonical * rate(display_code)
}

/// Display -> canonical, for entry-time conversion. Table rates are never
/// zero and unknown codes are identity, so the division is total.
pub fn to_canonical(amount_display: Decimal, display_code: &str) -> Decimal {
    amount_display / rate(display_code)
}

/// Symbol-prefixed, thousands-grouped rendering of a display-currency
/// amount. `decimals` is 0 or 2, chosen by the caller.
pub fn format(amount_display: Decimal, code: &str, decimals: u32) -> String {
    let rounded =
        amount_display.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let raw = if decimals == 0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.2}")
    };
    format!("{}{}", symbol_for(code), group_thousands(&raw))
}

/// Convenience: convert a canonical amount and format it in one step.
pub fn format_canonical(amount_canonical: Decimal, code: &str, decimals: u32) -> String {
    format(to_display(amount_canonical, code), code, decimals)
}

fn group_thousands(num: &str) -> String {
    let (sign, rest) = match num.strip_prefix('-') {
        Some(r) => ("-", r),
        None => ("", num),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
