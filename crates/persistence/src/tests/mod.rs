// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the persistence crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod profile_tests;

use crate::{AccountData, Persistence};
use clinic_domain::Role;

/// bcrypt's minimum cost. Keeps hashing out of the test runtime.
pub const TEST_HASH_COST: u32 = 4;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory()
        .expect("in-memory database")
        .with_hash_cost(TEST_HASH_COST)
}

pub fn create_staff(persistence: &mut Persistence, username: &str) -> AccountData {
    persistence
        .create_account(username, username, "staff-password", Role::Staff)
        .expect("staff account")
}

pub fn create_student(persistence: &mut Persistence, username: &str) -> AccountData {
    persistence
        .create_account(username, username, "student-password", Role::Student)
        .expect("student account")
}
