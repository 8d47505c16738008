// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Medical test allocation.
//!
//! A batch of uploaded rows is normalized, each valid row is resolved to a
//! student identity, and each newly scheduled student draws the next slot,
//! staff member and ward from a [`RotationAssigner`] built for this batch.
//!
//! Rows are processed strictly in input order. A batch stops at the first
//! unrecoverable error; schedules written before that point are kept.

use chrono::{NaiveDate, NaiveTime};
use clinic_domain::{
    AllocationPlan, Assignment, RawRow, RotationAssigner, StudentRow, first_scheduling_date,
    normalize_rows,
};
use clinic_persistence::{AccountData, NewSchedule};
use tracing::{debug, info};

use crate::collaborators::{AccountDirectory, ScheduleStore, StaffRoster};
use crate::error::{ApiError, translate_domain_error};
use crate::identity::{ResolvedIdentity, resolve_identity};

/// Counts describing one allocation batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationReport {
    /// Rows in the upload.
    pub rows_read: usize,
    /// Rows dropped for a missing name or matric number.
    pub skipped_invalid: usize,
    /// Schedules written by this batch.
    pub schedules_created: usize,
    /// Student accounts created by this batch.
    pub accounts_created: usize,
    /// Existing profiles whose matric number or department changed.
    pub profiles_updated: usize,
    /// Valid rows whose student already had a schedule.
    pub already_scheduled: usize,
}

/// A schedule written by an allocation batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedSchedule {
    pub schedule_id: i64,
    pub username: String,
    pub matric_no: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub staff_username: String,
    pub ward: String,
}

/// The result of an allocation batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocationOutcome {
    pub report: AllocationReport,
    /// Created schedules in input order.
    pub schedules: Vec<CreatedSchedule>,
}

/// Allocates medical test slots for a batch of uploaded rows.
///
/// `today` is the local date of the upload; the first slot lands on the
/// following day.
///
/// # Errors
///
/// Returns `EmptyStaffRoster` before any writes when there are valid rows
/// but no staff. Identity and storage failures abort the batch.
pub fn allocate_medical_tests<S>(
    store: &mut S,
    rows: &[RawRow],
    plan: &AllocationPlan,
    today: NaiveDate,
) -> Result<AllocationOutcome, ApiError>
where
    S: AccountDirectory + StaffRoster + ScheduleStore + ?Sized,
{
    let (valid, skipped_invalid): (Vec<StudentRow>, usize) = normalize_rows(rows);
    let mut outcome = AllocationOutcome {
        report: AllocationReport {
            rows_read: rows.len(),
            skipped_invalid,
            ..AllocationReport::default()
        },
        schedules: Vec::new(),
    };

    info!(
        rows = rows.len(),
        valid = valid.len(),
        skipped = skipped_invalid,
        "Starting medical test allocation"
    );

    if valid.is_empty() {
        return Ok(outcome);
    }

    let staff: Vec<AccountData> = store.list_staff()?;
    if staff.is_empty() {
        return Err(ApiError::EmptyStaffRoster);
    }
    info!(staff = staff.len(), "Loaded staff roster");

    let start: NaiveDate = first_scheduling_date(today).map_err(translate_domain_error)?;
    let mut assigner: RotationAssigner<AccountData> =
        RotationAssigner::new(plan, staff, start).map_err(translate_domain_error)?;

    for row in &valid {
        let identity: ResolvedIdentity = resolve_identity(store, row)?;
        if identity.account_created {
            outcome.report.accounts_created += 1;
        }
        if identity.profile_updated {
            outcome.report.profiles_updated += 1;
        }

        if store.has_schedule(identity.profile.profile_id)? {
            debug!(matric_no = %row.matric_no, "Student already scheduled");
            outcome.report.already_scheduled += 1;
            continue;
        }

        let assignment: Assignment<AccountData> =
            assigner.next_assignment().map_err(translate_domain_error)?;
        let schedule_id: i64 = store.create_schedule(&NewSchedule {
            profile_id: identity.profile.profile_id,
            scheduled_date: assignment.date,
            scheduled_time: assignment.time,
            staff_account_id: assignment.staff.account_id,
            ward_number: assignment.ward.label().to_string(),
        })?;

        outcome.report.schedules_created += 1;
        outcome.schedules.push(CreatedSchedule {
            schedule_id,
            username: identity.account.username,
            matric_no: row.matric_no.clone(),
            date: assignment.date,
            time: assignment.time,
            staff_username: assignment.staff.username,
            ward: assignment.ward.label().to_string(),
        });
    }

    info!(
        created = outcome.report.schedules_created,
        accounts_created = outcome.report.accounts_created,
        profiles_updated = outcome.report.profiles_updated,
        already_scheduled = outcome.report.already_scheduled,
        "Medical test allocation complete"
    );

    Ok(outcome)
}
