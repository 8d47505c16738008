// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log mutations.

use clinic_domain::AuditEntry;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;

/// Appends an audit entry. Details are stored as a JSON object, or NULL
/// when there are none.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_audit_entry(
    conn: &mut SqliteConnection,
    entry: &AuditEntry,
) -> Result<i64, PersistenceError> {
    let details_json: Option<String> = if entry.details.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&entry.details)?)
    };

    let audit_id: i64 = diesel::insert_into(audit_log::table)
        .values((
            audit_log::account_id.eq(entry.account_id),
            audit_log::action.eq(&entry.action),
            audit_log::details_json.eq(details_json),
        ))
        .returning(audit_log::audit_id)
        .get_result(conn)?;

    debug!(audit_id, account_id = entry.account_id, action = %entry.action, "Recorded audit entry");

    Ok(audit_id)
}
