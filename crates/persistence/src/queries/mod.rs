// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `accounts`: Account lookups and role listings
//! - `profiles`: Student profile lookups
//! - `schedules`: Medical test schedule listings
//! - `appointments`: Appointment lookups and dashboards
//! - `audit`: Audit log queries
//!
//! Dates, times and enums are stored as text. The helpers below convert
//! them back and report anything unparseable as `InvalidStoredValue`.

pub mod accounts;
pub mod appointments;
pub mod audit;
pub mod profiles;
pub mod schedules;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clinic_domain::{AppointmentStatus, Role};

use crate::data_models::{DATE_FORMAT, DATE_TIME_FORMAT, TIME_FORMAT};
use crate::error::PersistenceError;

pub(crate) fn parse_role(value: &str) -> Result<Role, PersistenceError> {
    value
        .parse::<Role>()
        .map_err(|e| PersistenceError::InvalidStoredValue(format!("role '{value}': {e}")))
}

pub(crate) fn parse_status(value: &str) -> Result<AppointmentStatus, PersistenceError> {
    value
        .parse::<AppointmentStatus>()
        .map_err(|e| PersistenceError::InvalidStoredValue(format!("status '{value}': {e}")))
}

pub(crate) fn parse_date(value: &str) -> Result<NaiveDate, PersistenceError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|e| PersistenceError::InvalidStoredValue(format!("date '{value}': {e}")))
}

pub(crate) fn parse_time(value: &str) -> Result<NaiveTime, PersistenceError> {
    NaiveTime::parse_from_str(value, TIME_FORMAT)
        .map_err(|e| PersistenceError::InvalidStoredValue(format!("time '{value}': {e}")))
}

pub(crate) fn parse_date_time(value: &str) -> Result<NaiveDateTime, PersistenceError> {
    NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT)
        .map_err(|e| PersistenceError::InvalidStoredValue(format!("date-time '{value}': {e}")))
}
