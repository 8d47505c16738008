// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Acting identity and role capability checks.
//!
//! The clinic has three roles. Capabilities are checked against the role of
//! the acting account, never inferred from what the account owns.

use clinic_domain::Role;
use clinic_persistence::{AccountData, Persistence};
use tracing::debug;

use crate::error::ApiError;

/// The account performing an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The acting account's ID.
    pub account_id: i64,
    /// The acting account's username.
    pub username: String,
    /// The acting account's role.
    pub role: Role,
}

impl From<&AccountData> for Actor {
    fn from(account: &AccountData) -> Self {
        Self {
            account_id: account.account_id,
            username: account.username.clone(),
            role: account.role,
        }
    }
}

/// Looks up the account named `username` and returns it as an actor.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if no such account exists.
pub fn resolve_actor(persistence: &mut Persistence, username: &str) -> Result<Actor, ApiError> {
    let account: AccountData = persistence.get_account_by_username(username)?.ok_or_else(|| {
        ApiError::AuthenticationFailed {
            reason: format!("Unknown account '{username}'"),
        }
    })?;

    debug!(username, role = %account.role, "Resolved acting account");
    Ok(Actor::from(&account))
}

/// Checks that the actor holds `required`.
///
/// # Errors
///
/// Returns `Unauthorized` naming `action` when the role differs.
pub fn require_role(actor: &Actor, required: Role, action: &str) -> Result<(), ApiError> {
    if actor.role == required {
        return Ok(());
    }

    Err(ApiError::Unauthorized {
        action: action.to_string(),
        required_role: required.as_str().to_string(),
    })
}

/// Checks that the actor holds one of `allowed`.
///
/// # Errors
///
/// Returns `Unauthorized` naming `action` when no role matches.
pub fn require_any_role(actor: &Actor, allowed: &[Role], action: &str) -> Result<(), ApiError> {
    if allowed.contains(&actor.role) {
        return Ok(());
    }

    Err(ApiError::Unauthorized {
        action: action.to_string(),
        required_role: allowed
            .iter()
            .map(Role::as_str)
            .collect::<Vec<&str>>()
            .join(" or "),
    })
}
