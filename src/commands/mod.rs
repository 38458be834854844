// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod currencies;
pub mod dashboard;
pub mod recurring;
pub mod settings;
pub mod transactions;
pub mod users;
