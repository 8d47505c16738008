// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDateTime, NaiveTime};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A person's name is empty or has no usable first token.
    InvalidName(String),
    /// A matriculation number is empty or invalid.
    InvalidMatricNo(String),
    /// The department code is not one of the known departments.
    UnknownDepartment(String),
    /// The stored or supplied role string is not a known role.
    InvalidRole(String),
    /// The stored or supplied appointment status is not a known status.
    InvalidAppointmentStatus(String),
    /// A staff response other than confirm or reject was supplied.
    InvalidStaffResponse(String),
    /// The daily slot list is empty.
    EmptySlotList,
    /// Daily slots must be strictly ascending within the day.
    SlotsNotAscending {
        /// The slot that was not later than its predecessor.
        slot: NaiveTime,
    },
    /// The ward pool is empty.
    EmptyWardPool,
    /// No staff are available to supervise medical tests.
    EmptyStaffRoster,
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// An appointment was requested for a time that has already passed.
    BookingInPast {
        /// The requested appointment time.
        requested: NaiveDateTime,
    },
    /// The appointment is too close to be cancelled.
    CancellationWindowClosed {
        /// The appointment time.
        appointment_at: NaiveDateTime,
        /// Minimum notice in hours.
        hours_required: i64,
    },
    /// The appointment cannot move from its current status to the requested one.
    InvalidStatusTransition {
        /// Current status.
        from: String,
        /// Requested status.
        to: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidMatricNo(msg) => write!(f, "Invalid matric number: {msg}"),
            Self::UnknownDepartment(code) => write!(f, "Unknown department: '{code}'"),
            Self::InvalidRole(role) => write!(f, "Invalid role: '{role}'"),
            Self::InvalidAppointmentStatus(status) => {
                write!(f, "Invalid appointment status: '{status}'")
            }
            Self::InvalidStaffResponse(response) => write!(
                f,
                "Invalid staff response: '{response}'. Must be 'confirm' or 'reject'"
            ),
            Self::EmptySlotList => write!(f, "Daily slot list must contain at least one slot"),
            Self::SlotsNotAscending { slot } => write!(
                f,
                "Daily slots must be strictly ascending, but {} does not follow its predecessor",
                slot.format("%H:%M")
            ),
            Self::EmptyWardPool => write!(f, "Ward pool must contain at least one ward"),
            Self::EmptyStaffRoster => {
                write!(f, "No staff accounts are available to supervise medical tests")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::BookingInPast { requested } => write!(
                f,
                "Cannot book an appointment in the past ({})",
                requested.format("%Y-%m-%d %H:%M")
            ),
            Self::CancellationWindowClosed {
                appointment_at,
                hours_required,
            } => write!(
                f,
                "Cannot cancel within {hours_required} hours of the appointment time ({})",
                appointment_at.format("%Y-%m-%d %H:%M")
            ),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Appointment cannot move from '{from}' to '{to}'")
            }
        }
    }
}

impl std::error::Error for DomainError {}
