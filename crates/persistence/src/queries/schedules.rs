// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Medical test schedule queries.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{ScheduleData, ScheduleFilter};
use crate::diesel_schema::{accounts, medical_test_schedules, student_profiles};
use crate::error::PersistenceError;
use crate::queries::{parse_date, parse_time};

/// Joined schedule row: schedule columns, then profile, then student account.
type ScheduleTuple = (
    i64,
    i64,
    String,
    String,
    i64,
    String,
    Option<String>,
    Option<String>,
    String,
    String,
);

/// Checks whether a profile already holds a schedule.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn schedule_exists_for_profile(
    conn: &mut SqliteConnection,
    profile_id: i64,
) -> Result<bool, PersistenceError> {
    let exists: bool = diesel::select(diesel::dsl::exists(
        medical_test_schedules::table.filter(medical_test_schedules::profile_id.eq(profile_id)),
    ))
    .get_result(conn)?;

    Ok(exists)
}

/// Lists schedules matching `filter`, ordered by date then time.
///
/// Each row is joined with the student's profile and account, and the
/// assigned staff member's username.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored date or time
/// cannot be parsed.
pub fn list_schedules(
    conn: &mut SqliteConnection,
    filter: ScheduleFilter,
) -> Result<Vec<ScheduleData>, PersistenceError> {
    debug!(?filter, "Listing medical test schedules");

    let mut query = medical_test_schedules::table
        .inner_join(student_profiles::table.inner_join(accounts::table))
        .select((
            medical_test_schedules::schedule_id,
            medical_test_schedules::profile_id,
            medical_test_schedules::scheduled_date,
            medical_test_schedules::scheduled_time,
            medical_test_schedules::staff_account_id,
            medical_test_schedules::ward_number,
            student_profiles::matric_no,
            student_profiles::department,
            accounts::username,
            accounts::display_name,
        ))
        .order((
            medical_test_schedules::scheduled_date.asc(),
            medical_test_schedules::scheduled_time.asc(),
            medical_test_schedules::schedule_id.asc(),
        ))
        .into_boxed();

    if let Some(staff_account_id) = filter.staff_account_id {
        query = query.filter(medical_test_schedules::staff_account_id.eq(staff_account_id));
    }
    if let Some(profile_id) = filter.profile_id {
        query = query.filter(medical_test_schedules::profile_id.eq(profile_id));
    }
    if let Some(department) = filter.department {
        query = query.filter(student_profiles::department.eq(department));
    }

    let rows: Vec<ScheduleTuple> = query.load(conn)?;

    let mut staff_ids: Vec<i64> = rows.iter().map(|row| row.4).collect();
    staff_ids.sort_unstable();
    staff_ids.dedup();

    let staff_usernames: HashMap<i64, String> = accounts::table
        .filter(accounts::account_id.eq_any(&staff_ids))
        .select((accounts::account_id, accounts::username))
        .load::<(i64, String)>(conn)?
        .into_iter()
        .collect();

    rows.into_iter()
        .map(
            |(
                schedule_id,
                profile_id,
                scheduled_date,
                scheduled_time,
                staff_account_id,
                ward_number,
                matric_no,
                department,
                student_username,
                student_name,
            )| {
                let staff_username: String = staff_usernames
                    .get(&staff_account_id)
                    .cloned()
                    .ok_or_else(|| {
                        PersistenceError::AccountNotFound(format!(
                            "staff account {staff_account_id}"
                        ))
                    })?;

                Ok(ScheduleData {
                    schedule_id,
                    profile_id,
                    student_username,
                    student_name,
                    matric_no,
                    department,
                    scheduled_date: parse_date(&scheduled_date)?,
                    scheduled_time: parse_time(&scheduled_time)?,
                    staff_account_id,
                    staff_username,
                    ward_number,
                })
            },
        )
        .collect()
}
