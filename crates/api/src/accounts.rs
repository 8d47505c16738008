// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Staff and administrator provisioning.
//!
//! A fresh database has no administrator, so the first admin account is
//! created without an acting identity. Once an admin exists every further
//! account needs an admin actor.

use clinic_domain::{AuditEntry, Role};
use clinic_persistence::{AccountData, Persistence, PersistenceError};
use tracing::info;

use crate::auth::{Actor, require_role};
use crate::error::ApiError;
use crate::password_policy::PasswordPolicy;

/// Checks whether `actor` may provision an account with `role`.
///
/// Returns whether this is the bootstrap case.
fn authorize_provisioning(
    persistence: &mut Persistence,
    actor: Option<&Actor>,
    role: Role,
) -> Result<bool, ApiError> {
    if persistence.role_exists(Role::Admin)? {
        let actor: &Actor = actor.ok_or_else(|| ApiError::Unauthorized {
            action: String::from("provision account"),
            required_role: Role::Admin.as_str().to_string(),
        })?;
        require_role(actor, Role::Admin, "provision account")?;
        return Ok(false);
    }

    if role != Role::Admin {
        return Err(ApiError::DomainRuleViolation {
            rule: String::from("bootstrap_admin_first"),
            message: String::from("Create an admin account before any staff account"),
        });
    }

    Ok(true)
}

/// Creates a staff or admin account.
///
/// Student accounts come from registration or bulk import, never from here.
/// Without an existing admin only an admin account may be created, and no
/// actor is needed; afterwards `actor` must be an admin.
///
/// # Errors
///
/// Returns `Unauthorized` when an admin exists and the actor is missing or
/// not an admin, `DomainRuleViolation` for a non-admin account before the
/// first admin or a taken username, `InvalidInput` for a student role or
/// blank username, and `PasswordPolicyViolation` for a rejected password.
pub fn provision_account(
    persistence: &mut Persistence,
    actor: Option<&Actor>,
    username: &str,
    display_name: &str,
    password: &str,
    role: Role,
    policy: &PasswordPolicy,
) -> Result<AccountData, ApiError> {
    if role == Role::Student {
        return Err(ApiError::InvalidInput {
            field: String::from("role"),
            message: String::from("Students register themselves or arrive via bulk import"),
        });
    }

    let bootstrap: bool = authorize_provisioning(persistence, actor, role)?;

    let username: &str = username.trim();
    if username.is_empty() || username.contains(char::is_whitespace) {
        return Err(ApiError::InvalidInput {
            field: String::from("username"),
            message: String::from("Username must be a single non-empty word"),
        });
    }

    policy.validate(password, password, username)?;

    let display_name: &str = match display_name.trim() {
        "" => username,
        name => name,
    };

    let account: AccountData = persistence
        .create_account(username, display_name, password, role)
        .map_err(|err| match err {
            PersistenceError::UniqueViolation(_) => ApiError::DomainRuleViolation {
                rule: String::from("unique_username"),
                message: format!("Username '{username}' is already taken"),
            },
            other => other.into(),
        })?;

    let recorded_by: i64 = actor.map_or(account.account_id, |a| a.account_id);
    persistence.record_audit(
        &AuditEntry::new(recorded_by, format!("Provisioned {role} account"))
            .with_detail("username", username)
            .with_detail("bootstrap", bootstrap.to_string()),
    )?;

    info!(username, role = role.as_str(), bootstrap, "Provisioned account");
    Ok(account)
}
