// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Appointment booking workflow.
//!
//! Students book and cancel their own appointments. Staff confirm or
//! reject requests addressed to them. Every state change writes an audit
//! entry attributed to the acting account.

use chrono::NaiveDateTime;
use clinic_domain::{
    AppointmentStatus, AuditEntry, Role, StaffResponse, validate_booking_time,
    validate_cancellation,
};
use clinic_persistence::{
    AccountData, AppointmentData, DATE_TIME_FORMAT, Persistence, PersistenceError, ScheduleData,
    ScheduleFilter,
};
use tracing::info;

use crate::auth::{Actor, require_role};
use crate::error::{ApiError, translate_domain_error};

/// What a student sees on their dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentDashboard {
    /// Appointments, newest first.
    pub appointments: Vec<AppointmentData>,
    /// Assigned medical tests in date and time order.
    pub medical_tests: Vec<ScheduleData>,
}

/// What a staff member sees on their dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaffDashboard {
    /// Requests awaiting a response.
    pub pending: Vec<AppointmentData>,
    /// Confirmed appointments from now on.
    pub upcoming_confirmed: Vec<AppointmentData>,
    /// Medical test slots this staff member supervises.
    pub medical_tests: Vec<ScheduleData>,
}

fn slot_taken(staff: &str, at: NaiveDateTime) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: String::from("staff_slot_available"),
        message: format!("{staff} already has an appointment at {at}"),
    }
}

fn appointment_not_found(appointment_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Appointment"),
        message: format!("Appointment {appointment_id} not found"),
    }
}

/// Loads an appointment and checks that `owns` accepts it.
///
/// Appointments belonging to someone else are reported as not found.
fn load_owned(
    persistence: &mut Persistence,
    appointment_id: i64,
    owns: impl Fn(&AppointmentData) -> bool,
) -> Result<AppointmentData, ApiError> {
    let appointment: AppointmentData = match persistence.get_appointment(appointment_id) {
        Ok(appointment) => appointment,
        Err(PersistenceError::NotFound(_)) => return Err(appointment_not_found(appointment_id)),
        Err(err) => return Err(err.into()),
    };

    if !owns(&appointment) {
        return Err(appointment_not_found(appointment_id));
    }

    Ok(appointment)
}

/// Books a pending appointment with a staff member.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor is a student, `InvalidInput` if
/// `staff_username` is not a staff account, and `DomainRuleViolation` if
/// `at` is in the past or the staff member is already booked then.
pub fn book_appointment(
    persistence: &mut Persistence,
    actor: &Actor,
    staff_username: &str,
    at: NaiveDateTime,
    reason_for_visit: &str,
    now: NaiveDateTime,
) -> Result<AppointmentData, ApiError> {
    require_role(actor, Role::Student, "book appointment")?;

    let staff: AccountData = persistence
        .get_account_by_username(staff_username)?
        .filter(|account| account.role == Role::Staff)
        .ok_or_else(|| ApiError::InvalidInput {
            field: String::from("staff"),
            message: format!("'{staff_username}' is not a staff member"),
        })?;

    validate_booking_time(at, now).map_err(translate_domain_error)?;

    if persistence.staff_has_appointment_at(staff.account_id, at)? {
        return Err(slot_taken(&staff.username, at));
    }

    let appointment: AppointmentData = persistence
        .create_appointment(actor.account_id, staff.account_id, at, reason_for_visit.trim())
        .map_err(|err| match err {
            PersistenceError::UniqueViolation(_) => slot_taken(&staff.username, at),
            other => other.into(),
        })?;

    persistence.record_audit(
        &AuditEntry::new(
            actor.account_id,
            format!("Booked appointment {}", appointment.appointment_id),
        )
        .with_detail("staff", staff.username.as_str())
        .with_detail("date_time", at.format(DATE_TIME_FORMAT).to_string()),
    )?;

    info!(
        appointment_id = appointment.appointment_id,
        student = %actor.username,
        staff = %staff.username,
        "Appointment booked"
    );

    Ok(appointment)
}

/// Cancels one of the actor's own appointments.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the appointment is not the actor's, and
/// `DomainRuleViolation` if it can no longer be cancelled or fewer than
/// four hours remain before it.
pub fn cancel_appointment(
    persistence: &mut Persistence,
    actor: &Actor,
    appointment_id: i64,
    now: NaiveDateTime,
) -> Result<AppointmentData, ApiError> {
    require_role(actor, Role::Student, "cancel appointment")?;

    let mut appointment: AppointmentData = load_owned(persistence, appointment_id, |a| {
        a.student_account_id == actor.account_id
    })?;

    let status: AppointmentStatus = appointment
        .status
        .transition_to(AppointmentStatus::Cancelled)
        .map_err(translate_domain_error)?;
    validate_cancellation(appointment.date_time, now).map_err(translate_domain_error)?;

    persistence.update_appointment_status(appointment_id, status)?;
    persistence.record_audit(
        &AuditEntry::new(actor.account_id, format!("Cancelled appointment {appointment_id}"))
            .with_detail(
                "date_time",
                appointment.date_time.format(DATE_TIME_FORMAT).to_string(),
            ),
    )?;

    info!(appointment_id, student = %actor.username, "Appointment cancelled");

    appointment.status = status;
    Ok(appointment)
}

/// Confirms or rejects a pending request addressed to the actor.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor is staff, `ResourceNotFound` if
/// the appointment is not addressed to them, and `DomainRuleViolation` if
/// it is no longer pending.
pub fn respond_to_appointment(
    persistence: &mut Persistence,
    actor: &Actor,
    appointment_id: i64,
    response: StaffResponse,
) -> Result<AppointmentData, ApiError> {
    require_role(actor, Role::Staff, "respond to appointment")?;

    let mut appointment: AppointmentData = load_owned(persistence, appointment_id, |a| {
        a.staff_account_id == actor.account_id
    })?;

    let status: AppointmentStatus = appointment
        .status
        .transition_to(response.target_status())
        .map_err(translate_domain_error)?;

    let student: AccountData = persistence.get_account_by_id(appointment.student_account_id)?;

    persistence.update_appointment_status(appointment_id, status)?;
    persistence.record_audit(
        &AuditEntry::new(
            actor.account_id,
            format!("{} appointment {appointment_id}", response.verb()),
        )
        .with_detail("student", student.username.as_str())
        .with_detail(
            "date_time",
            appointment.date_time.format(DATE_TIME_FORMAT).to_string(),
        ),
    )?;

    info!(
        appointment_id,
        staff = %actor.username,
        status = status.as_str(),
        "Appointment response recorded"
    );

    appointment.status = status;
    Ok(appointment)
}

/// Loads the student dashboard for the actor.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor is a student.
pub fn student_dashboard(
    persistence: &mut Persistence,
    actor: &Actor,
) -> Result<StudentDashboard, ApiError> {
    require_role(actor, Role::Student, "view student dashboard")?;

    let appointments: Vec<AppointmentData> =
        persistence.list_appointments_for_student(actor.account_id)?;

    let medical_tests: Vec<ScheduleData> =
        match persistence.find_profile_by_account(actor.account_id)? {
            Some(profile) => persistence.list_schedules(ScheduleFilter {
                staff_account_id: None,
                profile_id: Some(profile.profile_id),
                department: None,
            })?,
            None => Vec::new(),
        };

    Ok(StudentDashboard {
        appointments,
        medical_tests,
    })
}

/// Loads the staff dashboard for the actor.
///
/// # Errors
///
/// Returns `Unauthorized` unless the actor is staff.
pub fn staff_dashboard(
    persistence: &mut Persistence,
    actor: &Actor,
    now: NaiveDateTime,
) -> Result<StaffDashboard, ApiError> {
    require_role(actor, Role::Staff, "view staff dashboard")?;

    let pending: Vec<AppointmentData> = persistence.list_appointments_for_staff(
        actor.account_id,
        Some(AppointmentStatus::Pending),
        None,
    )?;
    let upcoming_confirmed: Vec<AppointmentData> = persistence.list_appointments_for_staff(
        actor.account_id,
        Some(AppointmentStatus::Confirmed),
        Some(now),
    )?;
    let medical_tests: Vec<ScheduleData> = persistence.list_schedules(ScheduleFilter {
        staff_account_id: Some(actor.account_id),
        profile_id: None,
        department: None,
    })?;

    Ok(StaffDashboard {
        pending,
        upcoming_confirmed,
        medical_tests,
    })
}
