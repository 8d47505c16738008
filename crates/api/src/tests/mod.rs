// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the API crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod allocation_tests;
mod appointment_tests;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clinic_domain::{RawRow, Role, normalize_header};
use clinic_persistence::Persistence;

use crate::auth::Actor;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory()
        .expect("in-memory database")
        .with_hash_cost(4)
}

pub fn create_actor(persistence: &mut Persistence, username: &str, role: Role) -> Actor {
    let account = persistence
        .create_account(username, username, "long-password", role)
        .expect("account");
    Actor::from(&account)
}

pub fn raw_row(pairs: &[(&str, &str)]) -> RawRow {
    pairs
        .iter()
        .map(|(k, v)| (normalize_header(k), (*v).to_string()))
        .collect()
}

pub fn student_row(name: &str, matric_no: &str, department: &str) -> RawRow {
    raw_row(&[("name", name), ("matric_no", matric_no), ("department", department)])
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub fn time(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
}

pub fn date_time(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    date(2030, 3, day).and_time(time(hour, minute))
}
