// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account queries.

use clinic_domain::Role;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::AccountData;
use crate::diesel_schema::accounts;
use crate::error::PersistenceError;
use crate::queries::parse_role;

/// Diesel Queryable struct for account rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = accounts)]
struct AccountRow {
    account_id: i64,
    username: String,
    display_name: String,
    password_hash: String,
    role: String,
    created_at: String,
}

impl TryFrom<AccountRow> for AccountData {
    type Error = PersistenceError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Self {
            account_id: row.account_id,
            username: row.username,
            display_name: row.display_name,
            password_hash: row.password_hash,
            role: parse_role(&row.role)?,
            created_at: row.created_at,
        })
    }
}

/// Retrieves an account by username.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no account has that username.
pub fn get_account_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<Option<AccountData>, PersistenceError> {
    debug!(username, "Looking up account by username");

    let row: Option<AccountRow> = accounts::table
        .filter(accounts::username.eq(username))
        .select(AccountRow::as_select())
        .first(conn)
        .optional()?;

    row.map(AccountData::try_from).transpose()
}

/// Retrieves an account by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the account does not exist.
pub fn get_account_by_id(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Option<AccountData>, PersistenceError> {
    let row: Option<AccountRow> = accounts::table
        .find(account_id)
        .select(AccountRow::as_select())
        .first(conn)
        .optional()?;

    row.map(AccountData::try_from).transpose()
}

/// Checks whether a username is taken.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn username_exists(
    conn: &mut SqliteConnection,
    username: &str,
) -> Result<bool, PersistenceError> {
    let exists: bool = diesel::select(diesel::dsl::exists(
        accounts::table.filter(accounts::username.eq(username)),
    ))
    .get_result(conn)?;

    Ok(exists)
}

/// Checks whether any account holds `role`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn role_exists(conn: &mut SqliteConnection, role: Role) -> Result<bool, PersistenceError> {
    let exists: bool = diesel::select(diesel::dsl::exists(
        accounts::table.filter(accounts::role.eq(role.as_str())),
    ))
    .get_result(conn)?;

    Ok(exists)
}

/// Lists all accounts holding `role`, ordered by account ID.
///
/// Account ID order is creation order, which is what keeps the staff
/// rotation stable between runs.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored role is invalid.
pub fn list_accounts_with_role(
    conn: &mut SqliteConnection,
    role: Role,
) -> Result<Vec<AccountData>, PersistenceError> {
    let rows: Vec<AccountRow> = accounts::table
        .filter(accounts::role.eq(role.as_str()))
        .order(accounts::account_id.asc())
        .select(AccountRow::as_select())
        .load(conn)?;

    rows.into_iter().map(AccountData::try_from).collect()
}
