// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use clinic_domain::DomainError;
use clinic_persistence::PersistenceError;

use crate::password_policy::PasswordPolicyError;

/// API-level errors.
///
/// These are distinct from domain and persistence errors and represent the
/// contract callers program against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The acting identity could not be resolved.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The uploaded CSV could not be parsed.
    InvalidCsvFormat {
        /// The parse error.
        reason: String,
    },
    /// A batch had valid rows but no staff to supervise them.
    EmptyStaffRoster,
    /// Every suffixed username for a base name is taken.
    UsernameExhausted {
        /// The base username.
        base: String,
    },
    /// Another writer kept claiming the chosen username.
    UsernameConflict {
        /// The last candidate that was lost.
        username: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InvalidCsvFormat { reason } => write!(f, "Invalid CSV: {reason}"),
            Self::EmptyStaffRoster => {
                write!(f, "No staff available to supervise medical tests")
            }
            Self::UsernameExhausted { base } => {
                write!(f, "No free username derived from '{base}'")
            }
            Self::UsernameConflict { username } => {
                write!(f, "Username '{username}' was claimed concurrently; retry the upload")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::AccountNotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Account"),
                message,
            },
            PersistenceError::NotFound(message) => Self::ResourceNotFound {
                resource_type: String::from("Record"),
                message,
            },
            other => Self::Internal {
                message: other.to_string(),
            },
        }
    }
}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidMatricNo(msg) => ApiError::InvalidInput {
            field: String::from("matric_no"),
            message: msg,
        },
        DomainError::UnknownDepartment(code) => ApiError::InvalidInput {
            field: String::from("department"),
            message: format!("Unknown department '{code}'"),
        },
        DomainError::InvalidRole(role) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown role '{role}'"),
        },
        DomainError::InvalidAppointmentStatus(status) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown appointment status '{status}'"),
        },
        DomainError::InvalidStaffResponse(response) => ApiError::InvalidInput {
            field: String::from("response"),
            message: format!("Expected 'confirm' or 'reject', got '{response}'"),
        },
        DomainError::EmptyStaffRoster => ApiError::EmptyStaffRoster,
        err @ (DomainError::EmptySlotList
        | DomainError::SlotsNotAscending { .. }
        | DomainError::EmptyWardPool) => ApiError::InvalidInput {
            field: String::from("allocation_plan"),
            message: err.to_string(),
        },
        err @ DomainError::DateArithmeticOverflow { .. } => ApiError::Internal {
            message: err.to_string(),
        },
        err @ DomainError::BookingInPast { .. } => ApiError::DomainRuleViolation {
            rule: String::from("booking_in_future"),
            message: err.to_string(),
        },
        err @ DomainError::CancellationWindowClosed { .. } => ApiError::DomainRuleViolation {
            rule: String::from("cancellation_notice"),
            message: err.to_string(),
        },
        err @ DomainError::InvalidStatusTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("status_transition"),
            message: err.to_string(),
        },
    }
}
