// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Use-case layer for the campus clinic.
//!
//! Every operation takes the acting identity and, where time matters, the
//! current date or date-time explicitly. Nothing in this crate reads the
//! clock.

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

mod accounts;
mod allocation;
mod appointments;
mod auth;
mod collaborators;
mod csv_import;
mod error;
mod identity;
mod password_policy;
mod registration;
mod schedules;

#[cfg(test)]
mod tests;

pub use accounts::provision_account;
pub use allocation::{
    AllocationOutcome, AllocationReport, CreatedSchedule, allocate_medical_tests,
};
pub use appointments::{
    StaffDashboard, StudentDashboard, book_appointment, cancel_appointment,
    respond_to_appointment, staff_dashboard, student_dashboard,
};
pub use auth::{Actor, require_any_role, require_role, resolve_actor};
pub use collaborators::{AccountDirectory, ScheduleStore, StaffRoster};
pub use csv_import::{
    ImportError, ImportSummary, decode_upload, import_medical_tests, parse_rows, summarize,
};
pub use error::{ApiError, translate_domain_error};
pub use identity::{ResolvedIdentity, USERNAME_RACE_RETRIES, resolve_identity};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use registration::{RegisteredStudent, RegistrationRequest, register_student};
pub use schedules::list_medical_tests;
