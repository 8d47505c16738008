// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Medical test schedule mutations.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::data_models::{DATE_FORMAT, NewSchedule, TIME_FORMAT};
use crate::diesel_schema::medical_test_schedules;
use crate::error::PersistenceError;

/// Inserts a schedule.
///
/// # Errors
///
/// Returns `UniqueViolation` if the profile is already scheduled, or a
/// database error if the profile or staff account does not exist.
pub fn insert_schedule(
    conn: &mut SqliteConnection,
    schedule: &NewSchedule,
) -> Result<i64, PersistenceError> {
    let scheduled_date: String = schedule.scheduled_date.format(DATE_FORMAT).to_string();
    let scheduled_time: String = schedule.scheduled_time.format(TIME_FORMAT).to_string();

    let schedule_id: i64 = diesel::insert_into(medical_test_schedules::table)
        .values((
            medical_test_schedules::profile_id.eq(schedule.profile_id),
            medical_test_schedules::scheduled_date.eq(&scheduled_date),
            medical_test_schedules::scheduled_time.eq(&scheduled_time),
            medical_test_schedules::staff_account_id.eq(schedule.staff_account_id),
            medical_test_schedules::ward_number.eq(&schedule.ward_number),
        ))
        .returning(medical_test_schedules::schedule_id)
        .get_result(conn)?;

    info!(
        schedule_id,
        profile_id = schedule.profile_id,
        staff_account_id = schedule.staff_account_id,
        scheduled_date = %scheduled_date,
        scheduled_time = %scheduled_time,
        ward = %schedule.ward_number,
        "Created medical test schedule"
    );

    Ok(schedule_id)
}
