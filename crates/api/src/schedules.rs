// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Medical test schedule listings for clinic staff.

use clinic_domain::Role;
use clinic_persistence::{Persistence, ScheduleData, ScheduleFilter};

use crate::auth::{Actor, require_any_role};
use crate::error::ApiError;

/// Lists medical test schedules, optionally narrowed to one staff member,
/// one student, or one department.
///
/// # Errors
///
/// Returns `Unauthorized` for students and `ResourceNotFound` when the
/// named staff member or matric number is unknown.
pub fn list_medical_tests(
    persistence: &mut Persistence,
    actor: &Actor,
    staff_username: Option<&str>,
    matric_no: Option<&str>,
    department: Option<&str>,
) -> Result<Vec<ScheduleData>, ApiError> {
    require_any_role(actor, &[Role::Staff, Role::Admin], "list medical tests")?;

    let mut filter = ScheduleFilter::default();

    if let Some(username) = staff_username {
        let staff = persistence
            .get_account_by_username(username)?
            .filter(|account| account.role == Role::Staff)
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Staff"),
                message: format!("No staff member named '{username}'"),
            })?;
        filter.staff_account_id = Some(staff.account_id);
    }

    if let Some(matric_no) = matric_no {
        let profile = persistence
            .find_profile_by_matric(matric_no.trim())?
            .ok_or_else(|| ApiError::ResourceNotFound {
                resource_type: String::from("Student"),
                message: format!("No student with matric number '{matric_no}'"),
            })?;
        filter.profile_id = Some(profile.profile_id);
    }

    filter.department = department
        .map(str::trim)
        .filter(|dept| !dept.is_empty())
        .map(str::to_string);

    Ok(persistence.list_schedules(filter)?)
}
