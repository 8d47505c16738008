// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment queries.

use chrono::NaiveDateTime;
use clinic_domain::AppointmentStatus;
use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{AppointmentData, DATE_TIME_FORMAT};
use crate::diesel_schema::appointments;
use crate::error::PersistenceError;
use crate::queries::{parse_date_time, parse_status};

#[derive(Queryable, Selectable)]
#[diesel(table_name = appointments)]
struct AppointmentRow {
    appointment_id: i64,
    student_account_id: i64,
    staff_account_id: i64,
    date_time: String,
    status: String,
    reason_for_visit: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<AppointmentRow> for AppointmentData {
    type Error = PersistenceError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            appointment_id: row.appointment_id,
            student_account_id: row.student_account_id,
            staff_account_id: row.staff_account_id,
            date_time: parse_date_time(&row.date_time)?,
            status: parse_status(&row.status)?,
            reason_for_visit: row.reason_for_visit,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Retrieves an appointment by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn get_appointment(
    conn: &mut SqliteConnection,
    appointment_id: i64,
) -> Result<Option<AppointmentData>, PersistenceError> {
    let row: Option<AppointmentRow> = appointments::table
        .find(appointment_id)
        .select(AppointmentRow::as_select())
        .first(conn)
        .optional()?;

    row.map(AppointmentData::try_from).transpose()
}

/// Checks whether a staff member already has an appointment at `at`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn staff_has_appointment_at(
    conn: &mut SqliteConnection,
    staff_account_id: i64,
    at: NaiveDateTime,
) -> Result<bool, PersistenceError> {
    let stored: String = at.format(DATE_TIME_FORMAT).to_string();
    let exists: bool = diesel::select(diesel::dsl::exists(
        appointments::table
            .filter(appointments::staff_account_id.eq(staff_account_id))
            .filter(appointments::date_time.eq(&stored)),
    ))
    .get_result(conn)?;

    Ok(exists)
}

/// Lists a student's appointments, newest first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_appointments_for_student(
    conn: &mut SqliteConnection,
    student_account_id: i64,
) -> Result<Vec<AppointmentData>, PersistenceError> {
    let rows: Vec<AppointmentRow> = appointments::table
        .filter(appointments::student_account_id.eq(student_account_id))
        .order((
            appointments::date_time.desc(),
            appointments::appointment_id.desc(),
        ))
        .select(AppointmentRow::as_select())
        .load(conn)?;

    rows.into_iter().map(AppointmentData::try_from).collect()
}

/// Lists a staff member's appointments in chronological order.
///
/// `status` restricts the listing to one status; `from` drops anything
/// scheduled before it.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_appointments_for_staff(
    conn: &mut SqliteConnection,
    staff_account_id: i64,
    status: Option<AppointmentStatus>,
    from: Option<NaiveDateTime>,
) -> Result<Vec<AppointmentData>, PersistenceError> {
    let mut query = appointments::table
        .filter(appointments::staff_account_id.eq(staff_account_id))
        .order((
            appointments::date_time.asc(),
            appointments::appointment_id.asc(),
        ))
        .select(AppointmentRow::as_select())
        .into_boxed();

    if let Some(status) = status {
        query = query.filter(appointments::status.eq(status.as_str()));
    }
    if let Some(from) = from {
        query = query.filter(appointments::date_time.ge(from.format(DATE_TIME_FORMAT).to_string()));
    }

    let rows: Vec<AppointmentRow> = query.load(conn)?;

    rows.into_iter().map(AppointmentData::try_from).collect()
}
