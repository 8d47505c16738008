// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the appointment booking workflow.

use clinic_domain::{AllocationPlan, AppointmentStatus, Role, StaffResponse};
use clinic_persistence::Persistence;

use crate::allocation::allocate_medical_tests;
use crate::appointments::{
    book_appointment, cancel_appointment, respond_to_appointment, staff_dashboard,
    student_dashboard,
};
use crate::auth::Actor;
use crate::error::ApiError;
use crate::tests::{create_actor, create_test_persistence, date, date_time, student_row};

struct Clinic {
    persistence: Persistence,
    student: Actor,
    other_student: Actor,
    nurse: Actor,
    doctor: Actor,
}

fn clinic() -> Clinic {
    let mut persistence = create_test_persistence();
    let student = create_actor(&mut persistence, "student", Role::Student);
    let other_student = create_actor(&mut persistence, "other", Role::Student);
    let nurse = create_actor(&mut persistence, "nurse", Role::Staff);
    let doctor = create_actor(&mut persistence, "doctor", Role::Staff);
    Clinic {
        persistence,
        student,
        other_student,
        nurse,
        doctor,
    }
}

#[test]
fn test_book_appointment_starts_pending_and_is_audited() {
    let mut c = clinic();
    let now = date_time(1, 8, 0);

    let appointment = book_appointment(
        &mut c.persistence,
        &c.student,
        "nurse",
        date_time(2, 10, 0),
        "  Sore throat ",
        now,
    )
    .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.staff_account_id, c.nurse.account_id);
    assert_eq!(appointment.reason_for_visit, "Sore throat");

    let audit = c
        .persistence
        .list_audit_for_account(c.student.account_id)
        .unwrap();
    assert_eq!(
        audit[0].action,
        format!("Booked appointment {}", appointment.appointment_id)
    );
}

#[test]
fn test_booking_requires_student_role() {
    let mut c = clinic();

    let result = book_appointment(
        &mut c.persistence,
        &c.doctor,
        "nurse",
        date_time(2, 10, 0),
        "",
        date_time(1, 8, 0),
    );

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_booking_target_must_be_staff() {
    let mut c = clinic();

    let result = book_appointment(
        &mut c.persistence,
        &c.student,
        "other",
        date_time(2, 10, 0),
        "",
        date_time(1, 8, 0),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "staff"
    ));
}

#[test]
fn test_booking_in_the_past_is_rejected() {
    let mut c = clinic();

    let result = book_appointment(
        &mut c.persistence,
        &c.student,
        "nurse",
        date_time(1, 7, 59),
        "",
        date_time(1, 8, 0),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "booking_in_future"
    ));
}

#[test]
fn test_staff_cannot_be_double_booked() {
    let mut c = clinic();
    let now = date_time(1, 8, 0);
    book_appointment(&mut c.persistence, &c.student, "nurse", date_time(2, 10, 0), "", now)
        .unwrap();

    let clash = book_appointment(
        &mut c.persistence,
        &c.other_student,
        "nurse",
        date_time(2, 10, 0),
        "",
        now,
    );
    assert!(matches!(
        clash,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "staff_slot_available"
    ));

    // Same time with a different staff member is fine.
    assert!(
        book_appointment(
            &mut c.persistence,
            &c.other_student,
            "doctor",
            date_time(2, 10, 0),
            "",
            now,
        )
        .is_ok()
    );
}

#[test]
fn test_cancel_with_enough_notice() {
    let mut c = clinic();
    let appointment = book_appointment(
        &mut c.persistence,
        &c.student,
        "nurse",
        date_time(2, 14, 0),
        "",
        date_time(1, 8, 0),
    )
    .unwrap();

    let cancelled = cancel_appointment(
        &mut c.persistence,
        &c.student,
        appointment.appointment_id,
        date_time(2, 10, 0),
    )
    .unwrap();

    assert_eq!(cancelled.status, AppointmentStatus::Cancelled);
    let stored = c
        .persistence
        .get_appointment(appointment.appointment_id)
        .unwrap();
    assert_eq!(stored.status, AppointmentStatus::Cancelled);
}

#[test]
fn test_cancel_inside_notice_window_is_rejected() {
    let mut c = clinic();
    let appointment = book_appointment(
        &mut c.persistence,
        &c.student,
        "nurse",
        date_time(2, 14, 0),
        "",
        date_time(1, 8, 0),
    )
    .unwrap();

    let result = cancel_appointment(
        &mut c.persistence,
        &c.student,
        appointment.appointment_id,
        date_time(2, 10, 1),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "cancellation_notice"
    ));
    let stored = c
        .persistence
        .get_appointment(appointment.appointment_id)
        .unwrap();
    assert_eq!(stored.status, AppointmentStatus::Pending);
}

#[test]
fn test_cannot_cancel_someone_elses_appointment() {
    let mut c = clinic();
    let appointment = book_appointment(
        &mut c.persistence,
        &c.student,
        "nurse",
        date_time(3, 14, 0),
        "",
        date_time(1, 8, 0),
    )
    .unwrap();

    let result = cancel_appointment(
        &mut c.persistence,
        &c.other_student,
        appointment.appointment_id,
        date_time(1, 9, 0),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_cancel_missing_appointment() {
    let mut c = clinic();

    let result = cancel_appointment(&mut c.persistence, &c.student, 999, date_time(1, 9, 0));

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_staff_confirms_pending_request() {
    let mut c = clinic();
    let appointment = book_appointment(
        &mut c.persistence,
        &c.student,
        "nurse",
        date_time(3, 14, 0),
        "",
        date_time(1, 8, 0),
    )
    .unwrap();

    let confirmed = respond_to_appointment(
        &mut c.persistence,
        &c.nurse,
        appointment.appointment_id,
        StaffResponse::Confirm,
    )
    .unwrap();
    assert_eq!(confirmed.status, AppointmentStatus::Confirmed);

    let audit = c
        .persistence
        .list_audit_for_account(c.nurse.account_id)
        .unwrap();
    assert_eq!(
        audit[0].action,
        format!("Confirmed appointment {}", appointment.appointment_id)
    );

    // Only pending requests can be answered.
    let again = respond_to_appointment(
        &mut c.persistence,
        &c.nurse,
        appointment.appointment_id,
        StaffResponse::Reject,
    );
    assert!(matches!(
        again,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "status_transition"
    ));
}

#[test]
fn test_staff_cannot_answer_another_staff_members_request() {
    let mut c = clinic();
    let appointment = book_appointment(
        &mut c.persistence,
        &c.student,
        "nurse",
        date_time(3, 14, 0),
        "",
        date_time(1, 8, 0),
    )
    .unwrap();

    let result = respond_to_appointment(
        &mut c.persistence,
        &c.doctor,
        appointment.appointment_id,
        StaffResponse::Reject,
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_rejected_appointment_cannot_be_cancelled() {
    let mut c = clinic();
    let appointment = book_appointment(
        &mut c.persistence,
        &c.student,
        "nurse",
        date_time(3, 14, 0),
        "",
        date_time(1, 8, 0),
    )
    .unwrap();
    respond_to_appointment(
        &mut c.persistence,
        &c.nurse,
        appointment.appointment_id,
        StaffResponse::Reject,
    )
    .unwrap();

    let result = cancel_appointment(
        &mut c.persistence,
        &c.student,
        appointment.appointment_id,
        date_time(1, 9, 0),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "status_transition"
    ));
}

#[test]
fn test_dashboards() {
    let mut c = clinic();
    let now = date_time(1, 8, 0);
    let pending = book_appointment(
        &mut c.persistence,
        &c.student,
        "nurse",
        date_time(4, 9, 0),
        "",
        now,
    )
    .unwrap();
    let confirmed = book_appointment(
        &mut c.persistence,
        &c.student,
        "nurse",
        date_time(5, 9, 0),
        "",
        now,
    )
    .unwrap();
    respond_to_appointment(
        &mut c.persistence,
        &c.nurse,
        confirmed.appointment_id,
        StaffResponse::Confirm,
    )
    .unwrap();

    let staff_view = staff_dashboard(&mut c.persistence, &c.nurse, now).unwrap();
    assert_eq!(staff_view.pending.len(), 1);
    assert_eq!(staff_view.pending[0].appointment_id, pending.appointment_id);
    assert_eq!(staff_view.upcoming_confirmed.len(), 1);
    assert_eq!(
        staff_view.upcoming_confirmed[0].appointment_id,
        confirmed.appointment_id
    );

    let later = staff_dashboard(&mut c.persistence, &c.nurse, date_time(6, 0, 0)).unwrap();
    assert!(later.upcoming_confirmed.is_empty());

    let student_view = student_dashboard(&mut c.persistence, &c.student).unwrap();
    let ids: Vec<i64> = student_view
        .appointments
        .iter()
        .map(|a| a.appointment_id)
        .collect();
    assert_eq!(ids, vec![confirmed.appointment_id, pending.appointment_id]);
    assert!(student_view.medical_tests.is_empty());

    assert!(matches!(
        student_dashboard(&mut c.persistence, &c.nurse),
        Err(ApiError::Unauthorized { .. })
    ));
}

#[test]
fn test_dashboards_show_medical_tests() {
    let mut c = clinic();
    allocate_medical_tests(
        &mut c.persistence,
        &[student_row("Ada Lovelace", "M1", "CPT")],
        &AllocationPlan::default(),
        date(2030, 3, 1),
    )
    .unwrap();

    let ada = crate::auth::resolve_actor(&mut c.persistence, "ada").unwrap();
    let student_view = student_dashboard(&mut c.persistence, &ada).unwrap();
    assert_eq!(student_view.medical_tests.len(), 1);
    assert_eq!(student_view.medical_tests[0].staff_username, "nurse");

    let nurse_view = staff_dashboard(&mut c.persistence, &c.nurse, date_time(1, 0, 0)).unwrap();
    assert_eq!(nurse_view.medical_tests.len(), 1);
    let doctor_view = staff_dashboard(&mut c.persistence, &c.doctor, date_time(1, 0, 0)).unwrap();
    assert!(doctor_view.medical_tests.is_empty());
}
