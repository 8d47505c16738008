// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::AuditLogData;
use crate::diesel_schema::audit_log;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_log)]
struct AuditLogRow {
    audit_id: i64,
    account_id: i64,
    action: String,
    details_json: Option<String>,
    recorded_at: String,
}

/// Lists the audit entries recorded for an account, oldest first.
///
/// # Errors
///
/// Returns an error if the database query fails or stored details are not
/// valid JSON.
pub fn list_audit_for_account(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Vec<AuditLogData>, PersistenceError> {
    let rows: Vec<AuditLogRow> = audit_log::table
        .filter(audit_log::account_id.eq(account_id))
        .order(audit_log::audit_id.asc())
        .select(AuditLogRow::as_select())
        .load(conn)?;

    rows.into_iter()
        .map(|row| {
            let details: Option<serde_json::Value> = row
                .details_json
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?;

            Ok(AuditLogData {
                audit_id: row.audit_id,
                account_id: row.account_id,
                action: row.action,
                details,
                recorded_at: row.recorded_at,
            })
        })
        .collect()
}
