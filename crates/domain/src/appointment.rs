// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;

/// Minimum notice, in hours, a student must give to cancel.
pub const CANCELLATION_NOTICE_HOURS: i64 = 4;

/// Lifecycle status of a clinic appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AppointmentStatus {
    /// Requested by the student, awaiting staff.
    #[default]
    Pending,
    /// Accepted by staff.
    Confirmed,
    /// The student attended.
    Attended,
    /// The student did not show up.
    NoShow,
    /// Declined by staff.
    Rejected,
    /// Withdrawn by the student.
    Cancelled,
}

impl AppointmentStatus {
    /// Converts this status to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Attended => "attended",
            Self::NoShow => "no_show",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks whether a transition from this status to `target` is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Confirmed | Rejected | Cancelled
    /// - Confirmed → Cancelled | Attended | `NoShow`
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Pending,
                Self::Confirmed | Self::Rejected | Self::Cancelled
            ) | (
                Self::Confirmed,
                Self::Cancelled | Self::Attended | Self::NoShow
            )
        )
    }

    /// Validates a transition, returning the target on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not permitted.
    pub fn transition_to(self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "attended" => Ok(Self::Attended),
            "no_show" => Ok(Self::NoShow),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidAppointmentStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A staff member's answer to a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffResponse {
    /// Accept the appointment.
    Confirm,
    /// Decline the appointment.
    Reject,
}

impl StaffResponse {
    /// The status this response moves an appointment to.
    #[must_use]
    pub const fn target_status(&self) -> AppointmentStatus {
        match self {
            Self::Confirm => AppointmentStatus::Confirmed,
            Self::Reject => AppointmentStatus::Rejected,
        }
    }

    /// Past-tense verb used in audit entries.
    #[must_use]
    pub const fn verb(&self) -> &'static str {
        match self {
            Self::Confirm => "Confirmed",
            Self::Reject => "Rejected",
        }
    }
}

impl FromStr for StaffResponse {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "confirm" => Ok(Self::Confirm),
            "reject" => Ok(Self::Reject),
            _ => Err(DomainError::InvalidStaffResponse(s.to_string())),
        }
    }
}

/// Rejects appointment times earlier than `now`.
///
/// # Errors
///
/// Returns `BookingInPast` if `requested < now`.
pub fn validate_booking_time(
    requested: NaiveDateTime,
    now: NaiveDateTime,
) -> Result<(), DomainError> {
    if requested < now {
        return Err(DomainError::BookingInPast { requested });
    }
    Ok(())
}

/// Rejects cancellations inside the notice window.
///
/// # Errors
///
/// Returns `CancellationWindowClosed` when fewer than
/// [`CANCELLATION_NOTICE_HOURS`] remain before the appointment.
pub fn validate_cancellation(
    appointment_at: NaiveDateTime,
    now: NaiveDateTime,
) -> Result<(), DomainError> {
    if appointment_at - now < Duration::hours(CANCELLATION_NOTICE_HOURS) {
        return Err(DomainError::CancellationWindowClosed {
            appointment_at,
            hours_required: CANCELLATION_NOTICE_HOURS,
        });
    }
    Ok(())
}
