// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The role attached to an account.
///
/// Roles gate what an account may do; they are checked as capabilities
/// on the acting identity rather than modelled as separate account types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// A registered student. Books appointments and receives medical test slots.
    #[default]
    Student,
    /// Clinic staff. Confirms or rejects appointments and supervises medical tests.
    Staff,
    /// Clinic administrator. Runs bulk imports and provisions accounts.
    Admin,
}

impl Role {
    /// Converts this role to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "staff" => Ok(Self::Staff),
            "admin" => Ok(Self::Admin),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Academic departments offered at student self-registration.
///
/// Bulk imports store whatever department text the upload carries; this
/// list only constrains the registration path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    /// Computer Science.
    Cpt,
    /// Physics.
    Phy,
    /// Cyber Security Science.
    Css,
    /// Information and Media Technology.
    Imt,
}

impl Department {
    /// All known departments in display order.
    pub const ALL: [Self; 4] = [Self::Cpt, Self::Phy, Self::Css, Self::Imt];

    /// The short code stored on the profile.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Cpt => "CPT",
            Self::Phy => "PHY",
            Self::Css => "CSS",
            Self::Imt => "IMT",
        }
    }

    /// The human-readable department name.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Cpt => "Computer Science",
            Self::Phy => "Physics",
            Self::Css => "Cyber Security Science",
            Self::Imt => "Information and Media Technology",
        }
    }
}

impl FromStr for Department {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code: String = s.trim().to_uppercase();
        Self::ALL
            .into_iter()
            .find(|d| d.code() == code)
            .ok_or_else(|| DomainError::UnknownDepartment(s.to_string()))
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code(), self.label())
    }
}

/// One student row from a bulk upload, after normalization.
///
/// `name` and `matric_no` are guaranteed non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRow {
    /// The student's full name as uploaded.
    pub name: String,
    /// The matriculation number.
    pub matric_no: String,
    /// The department, if the row carried one.
    pub department: Option<String>,
}

impl StudentRow {
    /// Creates a row from already-trimmed values.
    ///
    /// An empty department is stored as `None`.
    #[must_use]
    pub fn new(name: String, matric_no: String, department: String) -> Self {
        Self {
            name,
            matric_no,
            department: if department.is_empty() {
                None
            } else {
                Some(department)
            },
        }
    }
}

/// A ward label such as `W3`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ward(String);

impl Ward {
    /// Creates a ward from its label.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self(label.to_string())
    }

    /// The ward label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Ward {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
