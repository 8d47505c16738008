// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::PersistenceError;
use crate::tests::{create_student, create_test_persistence};

#[test]
fn test_get_or_create_student_profile_is_idempotent() {
    let mut persistence = create_test_persistence();
    let student = create_student(&mut persistence, "student");

    let (profile, created) = persistence
        .get_or_create_student_profile(student.account_id)
        .unwrap();
    assert!(created);
    assert_eq!(profile.account_id, student.account_id);
    assert_eq!(profile.matric_no, None);

    let (again, created_again) = persistence
        .get_or_create_student_profile(student.account_id)
        .unwrap();
    assert!(!created_again);
    assert_eq!(again.profile_id, profile.profile_id);
}

#[test]
fn test_update_profile_details_and_lookup_by_matric() {
    let mut persistence = create_test_persistence();
    let student = create_student(&mut persistence, "student");
    let (profile, _) = persistence
        .get_or_create_student_profile(student.account_id)
        .unwrap();

    persistence
        .update_profile_details(profile.profile_id, Some("U2024001"), Some(Some("CPT")))
        .unwrap();

    let found = persistence.find_profile_by_matric("U2024001").unwrap().unwrap();
    assert_eq!(found.profile_id, profile.profile_id);
    assert_eq!(found.department.as_deref(), Some("CPT"));

    persistence
        .update_profile_details(profile.profile_id, None, Some(Some("PHY")))
        .unwrap();
    let found = persistence
        .find_profile_by_account(student.account_id)
        .unwrap()
        .unwrap();
    assert_eq!(found.matric_no.as_deref(), Some("U2024001"));
    assert_eq!(found.department.as_deref(), Some("PHY"));

    persistence
        .update_profile_details(profile.profile_id, None, Some(None))
        .unwrap();
    let found = persistence
        .find_profile_by_account(student.account_id)
        .unwrap()
        .unwrap();
    assert_eq!(found.matric_no.as_deref(), Some("U2024001"));
    assert_eq!(found.department, None);
}

#[test]
fn test_matric_number_is_unique() {
    let mut persistence = create_test_persistence();
    let first = create_student(&mut persistence, "first");
    let second = create_student(&mut persistence, "second");

    persistence
        .create_student_profile(first.account_id, "U1", "CPT", None)
        .unwrap();
    let result = persistence.create_student_profile(second.account_id, "U1", "PHY", Some("555"));

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_update_missing_profile_fails() {
    let mut persistence = create_test_persistence();

    let result = persistence.update_profile_details(77, Some("U9"), None);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}
