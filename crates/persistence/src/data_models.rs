// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clinic_domain::{AppointmentStatus, Role};

/// Stored date format for schedule dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Stored time format for schedule slots.
pub const TIME_FORMAT: &str = "%H:%M";
/// Stored format for appointment date-times. Sorts lexicographically.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountData {
    pub account_id: i64,
    pub username: String,
    pub display_name: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: String,
}

/// A stored student profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileData {
    pub profile_id: i64,
    pub account_id: i64,
    pub matric_no: Option<String>,
    pub department: Option<String>,
    pub phone_number: Option<String>,
}

/// Input for a new medical test schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSchedule {
    pub profile_id: i64,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub staff_account_id: i64,
    pub ward_number: String,
}

/// A stored medical test schedule joined with its student and staff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleData {
    pub schedule_id: i64,
    pub profile_id: i64,
    pub student_username: String,
    pub student_name: String,
    pub matric_no: Option<String>,
    pub department: Option<String>,
    pub scheduled_date: NaiveDate,
    pub scheduled_time: NaiveTime,
    pub staff_account_id: i64,
    pub staff_username: String,
    pub ward_number: String,
}

/// A stored clinic appointment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentData {
    pub appointment_id: i64,
    pub student_account_id: i64,
    pub staff_account_id: i64,
    pub date_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub reason_for_visit: String,
    pub created_at: String,
    pub updated_at: String,
}

/// A stored audit log entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditLogData {
    pub audit_id: i64,
    pub account_id: i64,
    pub action: String,
    pub details: Option<serde_json::Value>,
    pub recorded_at: String,
}

/// Narrows a schedule listing. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleFilter {
    pub staff_account_id: Option<i64>,
    pub profile_id: Option<i64>,
    /// Exact match on the student's stored department.
    pub department: Option<String>,
}
