// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod appointment;
mod audit;
mod error;
mod normalize;
mod rotation;
mod types;
mod username;

#[cfg(test)]
mod tests;

pub use appointment::{
    AppointmentStatus, CANCELLATION_NOTICE_HOURS, StaffResponse, validate_booking_time,
    validate_cancellation,
};
pub use audit::AuditEntry;
pub use error::DomainError;
pub use normalize::{
    DEPARTMENT_KEYS, MATRIC_NO_KEYS, NAME_KEYS, RawRow, lookup_field, normalize_header,
    normalize_row, normalize_rows,
};
pub use rotation::{
    AllocationPlan, Assignment, DailySlots, RotationAssigner, WardPool, first_scheduling_date,
};
pub use types::{Department, Role, StudentRow, Ward};
pub use username::{MAX_USERNAME_SUFFIX, base_username, username_candidates};
