// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveDateTime};
use std::str::FromStr;

use crate::{
    AppointmentStatus, DomainError, StaffResponse, validate_booking_time, validate_cancellation,
};

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 2)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

#[test]
fn test_status_round_trips_through_stored_form() {
    for status in [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::Attended,
        AppointmentStatus::NoShow,
        AppointmentStatus::Rejected,
        AppointmentStatus::Cancelled,
    ] {
        assert_eq!(AppointmentStatus::from_str(status.as_str()).unwrap(), status);
    }
    assert!(AppointmentStatus::from_str("lost").is_err());
}

#[test]
fn test_pending_transitions() {
    let pending = AppointmentStatus::Pending;
    assert!(pending.can_transition_to(AppointmentStatus::Confirmed));
    assert!(pending.can_transition_to(AppointmentStatus::Rejected));
    assert!(pending.can_transition_to(AppointmentStatus::Cancelled));
    assert!(!pending.can_transition_to(AppointmentStatus::Attended));
}

#[test]
fn test_terminal_statuses_cannot_move() {
    assert_eq!(
        AppointmentStatus::Rejected.transition_to(AppointmentStatus::Confirmed),
        Err(DomainError::InvalidStatusTransition {
            from: String::from("rejected"),
            to: String::from("confirmed"),
        })
    );
    assert!(
        AppointmentStatus::Cancelled
            .transition_to(AppointmentStatus::Cancelled)
            .is_err()
    );
}

#[test]
fn test_staff_response_parsing() {
    assert_eq!(StaffResponse::from_str("confirm").unwrap(), StaffResponse::Confirm);
    assert_eq!(StaffResponse::from_str("REJECT").unwrap(), StaffResponse::Reject);
    assert_eq!(
        StaffResponse::Reject.target_status(),
        AppointmentStatus::Rejected
    );
    assert!(StaffResponse::from_str("maybe").is_err());
}

#[test]
fn test_booking_in_past_rejected() {
    assert!(validate_booking_time(at(10, 0), at(9, 0)).is_ok());
    assert!(validate_booking_time(at(9, 0), at(9, 0)).is_ok());
    assert_eq!(
        validate_booking_time(at(8, 59), at(9, 0)),
        Err(DomainError::BookingInPast {
            requested: at(8, 59)
        })
    );
}

#[test]
fn test_cancellation_window() {
    // Exactly four hours of notice is enough.
    assert!(validate_cancellation(at(13, 0), at(9, 0)).is_ok());
    assert!(matches!(
        validate_cancellation(at(12, 59), at(9, 0)),
        Err(DomainError::CancellationWindowClosed {
            hours_required: 4,
            ..
        })
    ));
}
