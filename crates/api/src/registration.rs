// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Student self-registration.

use clinic_domain::{AuditEntry, Department, Role, base_username};
use clinic_persistence::{AccountData, Persistence, PersistenceError, ProfileData};
use tracing::info;

use crate::error::{ApiError, translate_domain_error};
use crate::identity::first_free_username;
use crate::password_policy::PasswordPolicy;

/// A student's registration form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub full_name: String,
    pub matric_no: String,
    /// Department code, e.g. `CPT`.
    pub department: String,
    pub phone_number: Option<String>,
    pub password: String,
    pub confirmation: String,
}

/// The account and profile created by a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredStudent {
    pub account: AccountData,
    pub profile: ProfileData,
}

/// Registers a student account and profile.
///
/// The username is derived from the full name the same way bulk imports
/// derive it.
///
/// # Errors
///
/// Returns `InvalidInput` for a missing name or matric number or an unknown
/// department, `PasswordPolicyViolation` if the password is rejected, and
/// `DomainRuleViolation` if the matric number is already registered.
pub fn register_student(
    persistence: &mut Persistence,
    request: &RegistrationRequest,
    policy: &PasswordPolicy,
) -> Result<RegisteredStudent, ApiError> {
    let full_name: &str = request.full_name.trim();
    let base: String = base_username(full_name).map_err(translate_domain_error)?;

    let matric_no: &str = request.matric_no.trim();
    if matric_no.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("matric_no"),
            message: String::from("Matric number cannot be empty"),
        });
    }

    let department: Department = request
        .department
        .parse::<Department>()
        .map_err(translate_domain_error)?;

    if persistence.find_profile_by_matric(matric_no)?.is_some() {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("unique_matric_no"),
            message: format!("Matric number '{matric_no}' is already registered"),
        });
    }

    let username: String = first_free_username(persistence, &base)?;
    policy.validate(&request.password, &request.confirmation, &username)?;

    let account: AccountData = persistence
        .create_account(&username, full_name, &request.password, Role::Student)
        .map_err(|err| match err {
            PersistenceError::UniqueViolation(_) => ApiError::UsernameConflict {
                username: username.clone(),
            },
            other => other.into(),
        })?;

    let phone_number: Option<&str> = request
        .phone_number
        .as_deref()
        .map(str::trim)
        .filter(|phone| !phone.is_empty());
    let profile: ProfileData = persistence.create_student_profile(
        account.account_id,
        matric_no,
        department.code(),
        phone_number,
    )?;

    persistence.record_audit(
        &AuditEntry::new(account.account_id, String::from("Registered"))
            .with_detail("matric_no", matric_no)
            .with_detail("department", department.code()),
    )?;

    info!(
        username = %account.username,
        department = department.code(),
        "Registered student"
    );

    Ok(RegisteredStudent { account, profile })
}
