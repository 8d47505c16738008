// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student profile queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::ProfileData;
use crate::diesel_schema::student_profiles;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = student_profiles)]
struct ProfileRow {
    profile_id: i64,
    account_id: i64,
    matric_no: Option<String>,
    department: Option<String>,
    phone_number: Option<String>,
}

impl From<ProfileRow> for ProfileData {
    fn from(row: ProfileRow) -> Self {
        Self {
            profile_id: row.profile_id,
            account_id: row.account_id,
            matric_no: row.matric_no,
            department: row.department,
            phone_number: row.phone_number,
        }
    }
}

/// Retrieves the profile owned by an account.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_profile_by_account(
    conn: &mut SqliteConnection,
    account_id: i64,
) -> Result<Option<ProfileData>, PersistenceError> {
    let row: Option<ProfileRow> = student_profiles::table
        .filter(student_profiles::account_id.eq(account_id))
        .select(ProfileRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(ProfileData::from))
}

/// Retrieves the profile carrying a matriculation number.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_profile_by_matric(
    conn: &mut SqliteConnection,
    matric_no: &str,
) -> Result<Option<ProfileData>, PersistenceError> {
    let row: Option<ProfileRow> = student_profiles::table
        .filter(student_profiles::matric_no.eq(matric_no))
        .select(ProfileRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(ProfileData::from))
}
