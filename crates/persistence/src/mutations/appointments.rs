// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment mutations.

use chrono::NaiveDateTime;
use clinic_domain::AppointmentStatus;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::data_models::DATE_TIME_FORMAT;
use crate::diesel_schema::appointments;
use crate::error::PersistenceError;

/// Inserts a pending appointment.
///
/// # Errors
///
/// Returns `UniqueViolation` if the staff member is already booked at
/// `date_time`.
pub fn insert_appointment(
    conn: &mut SqliteConnection,
    student_account_id: i64,
    staff_account_id: i64,
    date_time: NaiveDateTime,
    reason_for_visit: &str,
) -> Result<i64, PersistenceError> {
    let stored: String = date_time.format(DATE_TIME_FORMAT).to_string();

    let appointment_id: i64 = diesel::insert_into(appointments::table)
        .values((
            appointments::student_account_id.eq(student_account_id),
            appointments::staff_account_id.eq(staff_account_id),
            appointments::date_time.eq(&stored),
            appointments::status.eq(AppointmentStatus::Pending.as_str()),
            appointments::reason_for_visit.eq(reason_for_visit),
        ))
        .returning(appointments::appointment_id)
        .get_result(conn)?;

    info!(
        appointment_id,
        student_account_id, staff_account_id, date_time = %stored, "Created appointment"
    );

    Ok(appointment_id)
}

/// Writes a new status and bumps `updated_at`.
///
/// # Errors
///
/// Returns `NotFound` if the appointment does not exist.
pub fn update_appointment_status(
    conn: &mut SqliteConnection,
    appointment_id: i64,
    status: AppointmentStatus,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(appointments::table.find(appointment_id))
        .set((
            appointments::status.eq(status.as_str()),
            appointments::updated_at.eq(diesel::dsl::sql::<diesel::sql_types::Text>(
                "CURRENT_TIMESTAMP",
            )),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "appointment {appointment_id}"
        )));
    }

    info!(appointment_id, status = status.as_str(), "Updated appointment status");
    Ok(())
}
