// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the campus clinic.
//!
//! This crate stores accounts, student profiles, medical test schedules,
//! appointments, and the audit log in `SQLite` via Diesel.
//!
//! ## Storage Conventions
//!
//! - Dates are stored as `YYYY-MM-DD`, slot times as `HH:MM`, and appointment
//!   date-times as `YYYY-MM-DDTHH:MM`. All three sort lexicographically.
//! - Roles and appointment statuses are stored as lowercase text and checked
//!   by the schema.
//! - Every connection has foreign keys enabled and migrations applied before
//!   the adapter is handed out.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory()` gives each caller an isolated shared-cache
//! in-memory database, so tests never touch disk.

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

use chrono::NaiveDateTime;
use clinic_domain::{AppointmentStatus, AuditEntry, Role};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

mod connection;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    AccountData, AppointmentData, AuditLogData, DATE_FORMAT, DATE_TIME_FORMAT, NewSchedule,
    ProfileData, ScheduleData, ScheduleFilter, TIME_FORMAT,
};
pub use error::PersistenceError;
pub use mutations::accounts::UNUSABLE_PASSWORD_HASH;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the clinic database.
pub struct Persistence {
    conn: SqliteConnection,
    hash_cost: u32,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = connection::open(&shared_memory_url, false)?;

        Ok(Self {
            conn,
            hash_cost: bcrypt::DEFAULT_COST,
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// The file is created if missing and switched to WAL journaling.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = connection::open(path_str, true)?;

        Ok(Self {
            conn,
            hash_cost: bcrypt::DEFAULT_COST,
        })
    }

    /// Sets the bcrypt cost used for new password hashes.
    ///
    /// Tests lower this to keep hashing fast.
    #[must_use]
    pub const fn with_hash_cost(mut self, cost: u32) -> Self {
        self.hash_cost = cost;
        self
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        connection::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Accounts
    // ========================================================================

    /// Creates an account with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the username is taken, or another error
    /// if hashing or the insert fails.
    pub fn create_account(
        &mut self,
        username: &str,
        display_name: &str,
        password: &str,
        role: Role,
    ) -> Result<AccountData, PersistenceError> {
        let password_hash: String = mutations::accounts::hash_password(password, self.hash_cost)?;
        let account_id: i64 = mutations::accounts::insert_account(
            &mut self.conn,
            username,
            display_name,
            &password_hash,
            role,
        )?;
        self.get_account_by_id(account_id)
    }

    /// Returns the account named `username`, creating it if absent.
    ///
    /// New accounts get [`UNUSABLE_PASSWORD_HASH`] until a password is set.
    /// The flag is `true` when this call created the account.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if another writer created the username
    /// between the lookup and the insert.
    pub fn find_or_create_account(
        &mut self,
        username: &str,
        display_name: &str,
        role: Role,
    ) -> Result<(AccountData, bool), PersistenceError> {
        if let Some(existing) = queries::accounts::get_account_by_username(&mut self.conn, username)?
        {
            debug!(username, "Account already exists");
            return Ok((existing, false));
        }

        let account_id: i64 = mutations::accounts::insert_account(
            &mut self.conn,
            username,
            display_name,
            UNUSABLE_PASSWORD_HASH,
            role,
        )?;
        Ok((self.get_account_by_id(account_id)?, true))
    }

    /// Retrieves an account by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_account_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<AccountData>, PersistenceError> {
        queries::accounts::get_account_by_username(&mut self.conn, username)
    }

    /// Retrieves an account by ID.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if the account does not exist.
    pub fn get_account_by_id(&mut self, account_id: i64) -> Result<AccountData, PersistenceError> {
        queries::accounts::get_account_by_id(&mut self.conn, account_id)?
            .ok_or_else(|| PersistenceError::AccountNotFound(format!("account {account_id}")))
    }

    /// Checks whether a username is taken.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn username_exists(&mut self, username: &str) -> Result<bool, PersistenceError> {
        queries::accounts::username_exists(&mut self.conn, username)
    }

    /// Checks whether any account holds `role`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn role_exists(&mut self, role: Role) -> Result<bool, PersistenceError> {
        queries::accounts::role_exists(&mut self.conn, role)
    }

    /// Hashes and stores a new password for an account.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the account does not exist.
    pub fn set_password(&mut self, account_id: i64, password: &str) -> Result<(), PersistenceError> {
        let password_hash: String = mutations::accounts::hash_password(password, self.hash_cost)?;
        mutations::accounts::update_password_hash(&mut self.conn, account_id, &password_hash)
    }

    /// Changes an account's display name.
    ///
    /// # Errors
    ///
    /// Returns an error if the account does not exist.
    pub fn set_display_name(
        &mut self,
        account_id: i64,
        display_name: &str,
    ) -> Result<(), PersistenceError> {
        mutations::accounts::update_display_name(&mut self.conn, account_id, display_name)
    }

    /// Checks a password against the stored hash for `username`.
    ///
    /// Returns the account on a match and `None` otherwise, including when
    /// the username is unknown or the account has no usable password.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or bcrypt verification fails.
    pub fn verify_password(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountData>, PersistenceError> {
        let Some(account) = queries::accounts::get_account_by_username(&mut self.conn, username)?
        else {
            return Ok(None);
        };

        if account.password_hash == UNUSABLE_PASSWORD_HASH {
            return Ok(None);
        }

        let matches: bool = bcrypt::verify(password, &account.password_hash)
            .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))?;

        Ok(matches.then_some(account))
    }

    /// Lists staff accounts in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_staff(&mut self) -> Result<Vec<AccountData>, PersistenceError> {
        queries::accounts::list_accounts_with_role(&mut self.conn, Role::Staff)
    }

    // ========================================================================
    // Student Profiles
    // ========================================================================

    /// Retrieves the profile owned by an account.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_profile_by_account(
        &mut self,
        account_id: i64,
    ) -> Result<Option<ProfileData>, PersistenceError> {
        queries::profiles::get_profile_by_account(&mut self.conn, account_id)
    }

    /// Retrieves the profile carrying a matriculation number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_profile_by_matric(
        &mut self,
        matric_no: &str,
    ) -> Result<Option<ProfileData>, PersistenceError> {
        queries::profiles::get_profile_by_matric(&mut self.conn, matric_no)
    }

    /// Returns the account's profile, creating an empty one if absent.
    ///
    /// The flag is `true` when this call created the profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the query or insert fails.
    pub fn get_or_create_student_profile(
        &mut self,
        account_id: i64,
    ) -> Result<(ProfileData, bool), PersistenceError> {
        if let Some(profile) = queries::profiles::get_profile_by_account(&mut self.conn, account_id)?
        {
            return Ok((profile, false));
        }

        mutations::profiles::insert_profile(&mut self.conn, account_id, None, None, None)?;
        let profile = queries::profiles::get_profile_by_account(&mut self.conn, account_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("profile for account {account_id}")))?;
        Ok((profile, true))
    }

    /// Creates a fully populated profile.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the account already has a profile or the
    /// matriculation number is taken.
    pub fn create_student_profile(
        &mut self,
        account_id: i64,
        matric_no: &str,
        department: &str,
        phone_number: Option<&str>,
    ) -> Result<ProfileData, PersistenceError> {
        mutations::profiles::insert_profile(
            &mut self.conn,
            account_id,
            Some(matric_no),
            Some(department),
            phone_number,
        )?;
        queries::profiles::get_profile_by_account(&mut self.conn, account_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("profile for account {account_id}")))
    }

    /// Sets the matriculation number and department on a profile.
    ///
    /// `None` leaves a field untouched; `Some(None)` clears the department.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile does not exist or the matriculation
    /// number belongs to another profile.
    pub fn update_profile_details(
        &mut self,
        profile_id: i64,
        matric_no: Option<&str>,
        department: Option<Option<&str>>,
    ) -> Result<(), PersistenceError> {
        mutations::profiles::update_profile_details(
            &mut self.conn,
            profile_id,
            matric_no,
            department,
        )
    }

    // ========================================================================
    // Medical Test Schedules
    // ========================================================================

    /// Stores a schedule and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the profile is already scheduled.
    pub fn create_schedule(&mut self, schedule: &NewSchedule) -> Result<i64, PersistenceError> {
        mutations::schedules::insert_schedule(&mut self.conn, schedule)
    }

    /// Checks whether a profile already holds a schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn schedule_exists_for_profile(&mut self, profile_id: i64) -> Result<bool, PersistenceError> {
        queries::schedules::schedule_exists_for_profile(&mut self.conn, profile_id)
    }

    /// Lists schedules matching `filter`, ordered by date then time.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_schedules(
        &mut self,
        filter: ScheduleFilter,
    ) -> Result<Vec<ScheduleData>, PersistenceError> {
        queries::schedules::list_schedules(&mut self.conn, filter)
    }

    // ========================================================================
    // Appointments
    // ========================================================================

    /// Stores a pending appointment and returns it.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the staff member is already booked at
    /// `date_time`.
    pub fn create_appointment(
        &mut self,
        student_account_id: i64,
        staff_account_id: i64,
        date_time: NaiveDateTime,
        reason_for_visit: &str,
    ) -> Result<AppointmentData, PersistenceError> {
        let appointment_id: i64 = mutations::appointments::insert_appointment(
            &mut self.conn,
            student_account_id,
            staff_account_id,
            date_time,
            reason_for_visit,
        )?;
        self.get_appointment(appointment_id)
    }

    /// Retrieves an appointment by ID.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the appointment does not exist.
    pub fn get_appointment(
        &mut self,
        appointment_id: i64,
    ) -> Result<AppointmentData, PersistenceError> {
        queries::appointments::get_appointment(&mut self.conn, appointment_id)?
            .ok_or_else(|| PersistenceError::NotFound(format!("appointment {appointment_id}")))
    }

    /// Checks whether a staff member already has an appointment at `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn staff_has_appointment_at(
        &mut self,
        staff_account_id: i64,
        at: NaiveDateTime,
    ) -> Result<bool, PersistenceError> {
        queries::appointments::staff_has_appointment_at(&mut self.conn, staff_account_id, at)
    }

    /// Writes a new appointment status.
    ///
    /// Transition rules are enforced by the caller.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the appointment does not exist.
    pub fn update_appointment_status(
        &mut self,
        appointment_id: i64,
        status: AppointmentStatus,
    ) -> Result<(), PersistenceError> {
        mutations::appointments::update_appointment_status(&mut self.conn, appointment_id, status)
    }

    /// Lists a student's appointments, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_appointments_for_student(
        &mut self,
        student_account_id: i64,
    ) -> Result<Vec<AppointmentData>, PersistenceError> {
        queries::appointments::list_appointments_for_student(&mut self.conn, student_account_id)
    }

    /// Lists a staff member's appointments in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_appointments_for_staff(
        &mut self,
        staff_account_id: i64,
        status: Option<AppointmentStatus>,
        from: Option<NaiveDateTime>,
    ) -> Result<Vec<AppointmentData>, PersistenceError> {
        queries::appointments::list_appointments_for_staff(
            &mut self.conn,
            staff_account_id,
            status,
            from,
        )
    }

    // ========================================================================
    // Audit Log
    // ========================================================================

    /// Appends an audit entry and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails.
    pub fn record_audit(&mut self, entry: &AuditEntry) -> Result<i64, PersistenceError> {
        let audit_id: i64 = mutations::audit::insert_audit_entry(&mut self.conn, entry)?;
        info!(audit_id, action = %entry.action, "Audit entry recorded");
        Ok(audit_id)
    }

    /// Lists the audit entries for an account, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_for_account(
        &mut self,
        account_id: i64,
    ) -> Result<Vec<AuditLogData>, PersistenceError> {
        queries::audit::list_audit_for_account(&mut self.conn, account_id)
    }
}
