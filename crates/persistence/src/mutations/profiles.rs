// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student profile mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::diesel_schema::student_profiles;
use crate::error::PersistenceError;

/// Inserts a profile for an account.
///
/// # Errors
///
/// Returns `UniqueViolation` if the account already has a profile or the
/// matriculation number is taken.
pub fn insert_profile(
    conn: &mut SqliteConnection,
    account_id: i64,
    matric_no: Option<&str>,
    department: Option<&str>,
    phone_number: Option<&str>,
) -> Result<i64, PersistenceError> {
    let profile_id: i64 = diesel::insert_into(student_profiles::table)
        .values((
            student_profiles::account_id.eq(account_id),
            student_profiles::matric_no.eq(matric_no),
            student_profiles::department.eq(department),
            student_profiles::phone_number.eq(phone_number),
        ))
        .returning(student_profiles::profile_id)
        .get_result(conn)?;

    info!(profile_id, account_id, "Created student profile");

    Ok(profile_id)
}

/// Sets the matriculation number and department on a profile.
///
/// `None` leaves the stored value untouched. `Some(None)` clears the
/// department.
///
/// # Errors
///
/// Returns `NotFound` if the profile does not exist, or `UniqueViolation`
/// if the matriculation number belongs to another profile.
pub fn update_profile_details(
    conn: &mut SqliteConnection,
    profile_id: i64,
    matric_no: Option<&str>,
    department: Option<Option<&str>>,
) -> Result<(), PersistenceError> {
    if let Some(matric_no) = matric_no {
        let updated: usize = diesel::update(student_profiles::table.find(profile_id))
            .set(student_profiles::matric_no.eq(matric_no))
            .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::NotFound(format!("profile {profile_id}")));
        }
    }

    if let Some(department) = department {
        let updated: usize = diesel::update(student_profiles::table.find(profile_id))
            .set(student_profiles::department.eq(department))
            .execute(conn)?;
        if updated == 0 {
            return Err(PersistenceError::NotFound(format!("profile {profile_id}")));
        }
    }

    debug!(profile_id, "Updated student profile details");
    Ok(())
}
