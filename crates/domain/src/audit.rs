// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeMap;

/// An audit trail entry for a user-visible action.
///
/// The actor is always the account that performed the action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// The account that performed the action.
    pub account_id: i64,
    /// Short description, e.g. "Booked appointment 12".
    pub action: String,
    /// Optional key/value details stored alongside the action.
    pub details: BTreeMap<String, String>,
}

impl AuditEntry {
    /// Creates an entry with no details.
    #[must_use]
    pub const fn new(account_id: i64, action: String) -> Self {
        Self {
            account_id,
            action,
            details: BTreeMap::new(),
        }
    }

    /// Adds a detail field.
    #[must_use]
    pub fn with_detail(mut self, key: &str, value: impl Into<String>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }
}
