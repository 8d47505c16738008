// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identity resolution for bulk-imported students.
//!
//! A row resolves to an existing identity when its matriculation number is
//! already on file. Otherwise a new account is created under the first free
//! username derived from the name, and its profile is filled in from the row.

use clinic_domain::{StudentRow, base_username, username_candidates};
use clinic_persistence::{AccountData, PersistenceError, ProfileData};
use tracing::{debug, info, warn};

use crate::collaborators::AccountDirectory;
use crate::error::{ApiError, translate_domain_error};

/// How many times a lost username race is retried before the batch fails.
pub const USERNAME_RACE_RETRIES: usize = 1;

/// The account and profile a row resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIdentity {
    /// The student's account.
    pub account: AccountData,
    /// The student's profile, reflecting any updates made.
    pub profile: ProfileData,
    /// Whether the account was created by this resolution.
    pub account_created: bool,
    /// Whether an existing profile's details were overwritten.
    pub profile_updated: bool,
}

/// Resolves a normalized row to an account and profile.
///
/// # Errors
///
/// Returns `UsernameConflict` if the username race is lost more than
/// [`USERNAME_RACE_RETRIES`] times, `UsernameExhausted` if every candidate
/// is taken, or any storage error.
pub fn resolve_identity<D>(
    directory: &mut D,
    row: &StudentRow,
) -> Result<ResolvedIdentity, ApiError>
where
    D: AccountDirectory + ?Sized,
{
    if let Some(profile) = directory.find_profile_by_matric(&row.matric_no)? {
        let account: AccountData = directory.get_account(profile.account_id)?;
        debug!(
            matric_no = %row.matric_no,
            username = %account.username,
            "Matric number already on file"
        );
        let (profile, profile_updated) = sync_profile(directory, profile, row)?;
        return Ok(ResolvedIdentity {
            account,
            profile,
            account_created: false,
            profile_updated,
        });
    }

    let base: String = base_username(&row.name).map_err(translate_domain_error)?;
    let account: AccountData = claim_username(directory, &base, &row.name)?;
    directory.set_initial_password(account.account_id, &row.matric_no)?;

    let (profile, profile_created) = directory.get_or_create_student_profile(account.account_id)?;
    let (profile, changed) = sync_profile(directory, profile, row)?;

    info!(
        username = %account.username,
        matric_no = %row.matric_no,
        "Created student account"
    );

    Ok(ResolvedIdentity {
        account,
        profile,
        account_created: true,
        profile_updated: changed && !profile_created,
    })
}

/// Returns the first candidate username nobody holds yet.
pub(crate) fn first_free_username<D>(directory: &mut D, base: &str) -> Result<String, ApiError>
where
    D: AccountDirectory + ?Sized,
{
    for candidate in username_candidates(base) {
        if !directory.exists(&candidate)? {
            return Ok(candidate);
        }
    }

    Err(ApiError::UsernameExhausted {
        base: base.to_string(),
    })
}

/// Creates an account under the first free username.
///
/// Between the free check and the insert another writer may take the
/// candidate. That shows up either as `find_or_create` returning an existing
/// account or as a unique violation, and triggers a fresh search.
fn claim_username<D>(
    directory: &mut D,
    base: &str,
    display_name: &str,
) -> Result<AccountData, ApiError>
where
    D: AccountDirectory + ?Sized,
{
    let mut lost: String = String::new();

    for attempt in 0..=USERNAME_RACE_RETRIES {
        let candidate: String = first_free_username(directory, base)?;
        match directory.find_or_create(&candidate, display_name) {
            Ok((account, true)) => return Ok(account),
            Ok((_, false)) | Err(PersistenceError::UniqueViolation(_)) => {
                warn!(attempt, username = %candidate, "Username claimed concurrently");
                lost = candidate;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(ApiError::UsernameConflict { username: lost })
}

/// Overwrites the profile's matric number and department where they differ
/// from the row. A row without a department clears the stored one.
fn sync_profile<D>(
    directory: &mut D,
    mut profile: ProfileData,
    row: &StudentRow,
) -> Result<(ProfileData, bool), ApiError>
where
    D: AccountDirectory + ?Sized,
{
    let matric_no: Option<&str> = Some(row.matric_no.as_str())
        .filter(|matric| profile.matric_no.as_deref() != Some(*matric));
    let department: Option<Option<&str>> = Some(row.department.as_deref())
        .filter(|dept| profile.department.as_deref() != *dept);

    if matric_no.is_none() && department.is_none() {
        return Ok((profile, false));
    }

    directory.update_profile(profile.profile_id, matric_no, department)?;
    debug!(
        profile_id = profile.profile_id,
        matric_changed = matric_no.is_some(),
        department_changed = department.is_some(),
        "Updated student profile"
    );

    if let Some(matric_no) = matric_no {
        profile.matric_no = Some(matric_no.to_string());
    }
    if let Some(department) = department {
        profile.department = department.map(str::to_string);
    }

    Ok((profile, true))
}
