// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage seams used by the medical test allocator.
//!
//! The allocator only talks to storage through these traits. `Persistence`
//! implements all three; tests substitute in-memory fakes.

use clinic_domain::Role;
use clinic_persistence::{AccountData, NewSchedule, Persistence, PersistenceError, ProfileData};

/// Creates and looks up student identities.
pub trait AccountDirectory {
    /// Checks whether a username is taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn exists(&mut self, username: &str) -> Result<bool, PersistenceError>;

    /// Returns the student account named `username`, creating it if absent.
    ///
    /// The flag is `true` when this call created the account.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if another writer won the insert.
    fn find_or_create(
        &mut self,
        username: &str,
        display_name: &str,
    ) -> Result<(AccountData, bool), PersistenceError>;

    /// Retrieves an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist.
    fn get_account(&mut self, account_id: i64) -> Result<AccountData, PersistenceError>;

    /// Sets the first-login secret on a freshly created account.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing or the update fails.
    fn set_initial_password(
        &mut self,
        account_id: i64,
        secret: &str,
    ) -> Result<(), PersistenceError>;

    /// Retrieves the profile carrying a matriculation number.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn find_profile_by_matric(
        &mut self,
        matric_no: &str,
    ) -> Result<Option<ProfileData>, PersistenceError>;

    /// Returns the account's profile, creating an empty one if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or insert fails.
    fn get_or_create_student_profile(
        &mut self,
        account_id: i64,
    ) -> Result<(ProfileData, bool), PersistenceError>;

    /// Overwrites the given profile fields. `None` leaves a field untouched
    /// and `Some(None)` clears the department.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    fn update_profile(
        &mut self,
        profile_id: i64,
        matric_no: Option<&str>,
        department: Option<Option<&str>>,
    ) -> Result<(), PersistenceError>;
}

/// The staff available to supervise medical tests.
pub trait StaffRoster {
    /// Lists staff in a stable order.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn list_staff(&mut self) -> Result<Vec<AccountData>, PersistenceError>;
}

/// Where allocated schedules are written.
pub trait ScheduleStore {
    /// Checks whether a profile already holds a schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fails.
    fn has_schedule(&mut self, profile_id: i64) -> Result<bool, PersistenceError>;

    /// Stores a schedule and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    fn create_schedule(&mut self, schedule: &NewSchedule) -> Result<i64, PersistenceError>;
}

impl AccountDirectory for Persistence {
    fn exists(&mut self, username: &str) -> Result<bool, PersistenceError> {
        self.username_exists(username)
    }

    fn find_or_create(
        &mut self,
        username: &str,
        display_name: &str,
    ) -> Result<(AccountData, bool), PersistenceError> {
        self.find_or_create_account(username, display_name, Role::Student)
    }

    fn get_account(&mut self, account_id: i64) -> Result<AccountData, PersistenceError> {
        self.get_account_by_id(account_id)
    }

    fn set_initial_password(
        &mut self,
        account_id: i64,
        secret: &str,
    ) -> Result<(), PersistenceError> {
        self.set_password(account_id, secret)
    }

    fn find_profile_by_matric(
        &mut self,
        matric_no: &str,
    ) -> Result<Option<ProfileData>, PersistenceError> {
        Self::find_profile_by_matric(self, matric_no)
    }

    fn get_or_create_student_profile(
        &mut self,
        account_id: i64,
    ) -> Result<(ProfileData, bool), PersistenceError> {
        Self::get_or_create_student_profile(self, account_id)
    }

    fn update_profile(
        &mut self,
        profile_id: i64,
        matric_no: Option<&str>,
        department: Option<Option<&str>>,
    ) -> Result<(), PersistenceError> {
        self.update_profile_details(profile_id, matric_no, department)
    }
}

impl StaffRoster for Persistence {
    fn list_staff(&mut self) -> Result<Vec<AccountData>, PersistenceError> {
        Self::list_staff(self)
    }
}

impl ScheduleStore for Persistence {
    fn has_schedule(&mut self, profile_id: i64) -> Result<bool, PersistenceError> {
        self.schedule_exists_for_profile(profile_id)
    }

    fn create_schedule(&mut self, schedule: &NewSchedule) -> Result<i64, PersistenceError> {
        Self::create_schedule(self, schedule)
    }
}
