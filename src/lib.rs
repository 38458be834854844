// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod context;
pub mod currency;
pub mod errors;
pub mod kv;
pub mod models;
pub mod recurrence;
pub mod store;
pub mod utils;
