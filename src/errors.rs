// Copyright (c) 2025 Kudiflow Authors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Errors the ledger surfaces to the caller. Data-quality problems in
/// stored records are not errors; they degrade with a diagnostic instead.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Validation(String),

    #[error("no active user; log in first")]
    NoActiveUser,
}
