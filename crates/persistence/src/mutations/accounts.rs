// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account mutations.

use clinic_domain::Role;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::diesel_schema::accounts;
use crate::error::PersistenceError;

/// Password hash stored on accounts that cannot log in yet.
///
/// bcrypt never produces this value, so verification always fails.
pub const UNUSABLE_PASSWORD_HASH: &str = "!";

/// Hashes a password with bcrypt at the given cost.
///
/// # Errors
///
/// Returns an error if hashing fails.
pub fn hash_password(password: &str, cost: u32) -> Result<String, PersistenceError> {
    bcrypt::hash(password, cost)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))
}

/// Inserts an account with an already-computed password hash.
///
/// # Errors
///
/// Returns `UniqueViolation` if the username is taken, or another error if
/// the insert fails.
pub fn insert_account(
    conn: &mut SqliteConnection,
    username: &str,
    display_name: &str,
    password_hash: &str,
    role: Role,
) -> Result<i64, PersistenceError> {
    let account_id: i64 = diesel::insert_into(accounts::table)
        .values((
            accounts::username.eq(username),
            accounts::display_name.eq(display_name),
            accounts::password_hash.eq(password_hash),
            accounts::role.eq(role.as_str()),
        ))
        .returning(accounts::account_id)
        .get_result(conn)?;

    info!(account_id, username, role = role.as_str(), "Created account");

    Ok(account_id)
}

/// Replaces an account's password hash.
///
/// # Errors
///
/// Returns `AccountNotFound` if no row was updated.
pub fn update_password_hash(
    conn: &mut SqliteConnection,
    account_id: i64,
    password_hash: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(accounts::table.find(account_id))
        .set(accounts::password_hash.eq(password_hash))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::AccountNotFound(format!(
            "account {account_id}"
        )));
    }

    info!(account_id, "Updated account password");
    Ok(())
}

/// Replaces an account's display name.
///
/// # Errors
///
/// Returns `AccountNotFound` if no row was updated.
pub fn update_display_name(
    conn: &mut SqliteConnection,
    account_id: i64,
    display_name: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(accounts::table.find(account_id))
        .set(accounts::display_name.eq(display_name))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::AccountNotFound(format!(
            "account {account_id}"
        )));
    }

    Ok(())
}
