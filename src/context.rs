// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::errors::LedgerError;
use crate::store::LedgerStore;

/// Explicit application context handed to command handlers in place of any
/// ambient globals. The display currency is always read through the store
/// so a currency change is visible to every consumer immediately.
pub struct AppContext {
    pub store: LedgerStore,
}

impl AppContext {
    pub fn new(store: LedgerStore) -> Self {
        AppContext { store }
    }

    pub fn display_currency(&self) -> String {
        self.store.settings().currency_code
    }

    pub fn require_active_user(&self) -> Result<String> {
        self.store.active_user().ok_or(LedgerError::NoActiveUser.into())
    }
}
