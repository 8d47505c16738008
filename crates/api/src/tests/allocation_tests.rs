// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for medical test allocation.

use chrono::{Days, NaiveDate};
use clinic_domain::{AllocationPlan, DailySlots, RawRow, WardPool};
use clinic_persistence::ScheduleFilter;

use crate::allocation::{AllocationReport, allocate_medical_tests};
use crate::error::ApiError;
use crate::tests::fake_store::FakeStore;
use crate::tests::{create_test_persistence, date, raw_row, student_row, time};

fn today() -> NaiveDate {
    date(2024, 1, 1)
}

#[test]
fn test_two_rows_sharing_a_first_name() {
    let mut store = FakeStore::with_staff(&["staffA"]);
    let rows = vec![
        student_row("Ada Lovelace", "M1", "CPT"),
        student_row("Ada King", "M2", "PHY"),
    ];

    let outcome =
        allocate_medical_tests(&mut store, &rows, &AllocationPlan::default(), today()).unwrap();

    assert_eq!(outcome.schedules.len(), 2);

    let first = &outcome.schedules[0];
    assert_eq!(first.username, "ada");
    assert_eq!(first.date, date(2024, 1, 2));
    assert_eq!(first.time, time(9, 0));
    assert_eq!(first.ward, "W1");
    assert_eq!(first.staff_username, "staffA");

    let second = &outcome.schedules[1];
    assert_eq!(second.username, "ada1");
    assert_eq!(second.date, date(2024, 1, 2));
    assert_eq!(second.time, time(9, 30));
    assert_eq!(second.ward, "W2");
    assert_eq!(second.staff_username, "staffA");
}

#[test]
fn test_usernames_follow_input_order() {
    let mut store = FakeStore::with_staff(&["staffA"]);
    let rows = vec![
        student_row("John Smith", "U1", "CPT"),
        student_row("John Doe", "U2", "CPT"),
        student_row("john  Quincy", "U3", "CPT"),
    ];

    let outcome =
        allocate_medical_tests(&mut store, &rows, &AllocationPlan::default(), today()).unwrap();

    let usernames: Vec<&str> = outcome
        .schedules
        .iter()
        .map(|s| s.username.as_str())
        .collect();
    assert_eq!(usernames, vec!["john", "john1", "john2"]);
}

#[test]
fn test_schedule_count_equals_valid_row_count() {
    let mut store = FakeStore::with_staff(&["staffA", "staffB"]);
    let rows = vec![
        student_row("Ada Lovelace", "M1", "CPT"),
        student_row("", "M2", "CPT"),
        student_row("Grace Hopper", "", "CPT"),
        student_row("   ", "  ", ""),
        student_row("Alan Turing", "M5", ""),
    ];

    let outcome =
        allocate_medical_tests(&mut store, &rows, &AllocationPlan::default(), today()).unwrap();

    assert_eq!(
        outcome.report,
        AllocationReport {
            rows_read: 5,
            skipped_invalid: 3,
            schedules_created: 2,
            accounts_created: 2,
            profiles_updated: 0,
            already_scheduled: 0,
        }
    );
    assert_eq!(store.schedules.len(), 2);
}

#[test]
fn test_slot_period_advances_date_by_one_day() {
    let mut store = FakeStore::with_staff(&["s1", "s2", "s3"]);
    let rows: Vec<RawRow> = (0..15)
        .map(|i| student_row(&format!("Student{i} Test"), &format!("M{i}"), "CPT"))
        .collect();

    let outcome =
        allocate_medical_tests(&mut store, &rows, &AllocationPlan::default(), today()).unwrap();
    let schedules = &outcome.schedules;

    let slots = DailySlots::default();
    for i in 0..schedules.len() {
        assert_eq!(schedules[i].time, slots.times()[i % slots.len()]);
        let expected_date = date(2024, 1, 2)
            .checked_add_days(Days::new(u64::try_from(i / slots.len()).unwrap()))
            .unwrap();
        assert_eq!(schedules[i].date, expected_date, "row {i}");
    }

    for i in 0..schedules.len() - 7 {
        assert_eq!(schedules[i].time, schedules[i + 7].time);
        assert_eq!(
            schedules[i].date.checked_add_days(Days::new(1)).unwrap(),
            schedules[i + 7].date
        );
    }
}

#[test]
fn test_staff_and_wards_rotate_independently() {
    let mut store = FakeStore::with_staff(&["s1", "s2", "s3"]);
    let rows: Vec<RawRow> = (0..23)
        .map(|i| student_row(&format!("Student{i}"), &format!("M{i}"), "CPT"))
        .collect();

    let outcome =
        allocate_medical_tests(&mut store, &rows, &AllocationPlan::default(), today()).unwrap();

    let staff = ["s1", "s2", "s3"];
    for (i, schedule) in outcome.schedules.iter().enumerate() {
        assert_eq!(schedule.staff_username, staff[i % 3], "row {i}");
        assert_eq!(schedule.ward, format!("W{}", i % 10 + 1), "row {i}");
    }
}

#[test]
fn test_custom_plan_is_honoured() {
    let mut store = FakeStore::with_staff(&["s1"]);
    let plan = AllocationPlan::new(
        DailySlots::new(vec![time(14, 0), time(15, 0)]).unwrap(),
        WardPool::numbered("B", 3).unwrap(),
    );
    let rows: Vec<RawRow> = (0..4)
        .map(|i| student_row(&format!("S{i}"), &format!("M{i}"), ""))
        .collect();

    let outcome = allocate_medical_tests(&mut store, &rows, &plan, today()).unwrap();

    let got: Vec<(NaiveDate, String)> = outcome
        .schedules
        .iter()
        .map(|s| (s.date, format!("{} {}", s.time.format("%H:%M"), s.ward)))
        .collect();
    assert_eq!(
        got,
        vec![
            (date(2024, 1, 2), String::from("14:00 B1")),
            (date(2024, 1, 2), String::from("15:00 B2")),
            (date(2024, 1, 3), String::from("14:00 B3")),
            (date(2024, 1, 3), String::from("15:00 B1")),
        ]
    );
}

#[test]
fn test_empty_roster_aborts_before_any_write() {
    let mut store = FakeStore::new();
    let rows = vec![student_row("Ada Lovelace", "M1", "CPT")];

    let result = allocate_medical_tests(&mut store, &rows, &AllocationPlan::default(), today());

    assert_eq!(result, Err(ApiError::EmptyStaffRoster));
    assert!(store.accounts.is_empty());
    assert!(store.profiles.is_empty());
    assert!(store.schedules.is_empty());
}

#[test]
fn test_empty_roster_without_valid_rows_is_not_an_error() {
    let mut store = FakeStore::new();
    let rows = vec![student_row("", "", "")];

    let outcome =
        allocate_medical_tests(&mut store, &rows, &AllocationPlan::default(), today()).unwrap();

    assert_eq!(outcome.report.rows_read, 1);
    assert_eq!(outcome.report.skipped_invalid, 1);
    assert_eq!(outcome.report.schedules_created, 0);
    assert_eq!(store.list_staff_calls, 0);
}

#[test]
fn test_roster_is_read_once_per_batch() {
    let mut store = FakeStore::with_staff(&["s1", "s2"]);
    let rows: Vec<RawRow> = (0..5)
        .map(|i| student_row(&format!("S{i}"), &format!("M{i}"), ""))
        .collect();

    allocate_medical_tests(&mut store, &rows, &AllocationPlan::default(), today()).unwrap();

    assert_eq!(store.list_staff_calls, 1);
}

#[test]
fn test_rerun_updates_department_without_duplicates() {
    let mut store = FakeStore::with_staff(&["staffA"]);
    let first_batch = vec![student_row("Ada Lovelace", "M1", "CPT")];
    allocate_medical_tests(&mut store, &first_batch, &AllocationPlan::default(), today())
        .unwrap();

    let second_batch = vec![
        student_row("Ada Lovelace", "M1", "PHY"),
        student_row("Grace Hopper", "M2", "CSS"),
    ];
    let outcome = allocate_medical_tests(
        &mut store,
        &second_batch,
        &AllocationPlan::default(),
        date(2024, 2, 1),
    )
    .unwrap();

    assert_eq!(store.students().len(), 2);
    assert_eq!(store.profiles.len(), 2);
    assert_eq!(store.profiles[0].department.as_deref(), Some("PHY"));

    assert_eq!(outcome.report.already_scheduled, 1);
    assert_eq!(outcome.report.profiles_updated, 1);
    assert_eq!(outcome.report.accounts_created, 1);
    assert_eq!(outcome.report.schedules_created, 1);

    // The skipped row does not consume a slot.
    let grace = &outcome.schedules[0];
    assert_eq!(grace.username, "grace");
    assert_eq!(grace.date, date(2024, 2, 2));
    assert_eq!(grace.time, time(9, 0));
    assert_eq!(grace.ward, "W1");
}

#[test]
fn test_new_accounts_get_matric_number_as_initial_password() {
    let mut store = FakeStore::with_staff(&["staffA"]);
    let rows = vec![student_row("Ada Lovelace", "M1", "CPT")];

    allocate_medical_tests(&mut store, &rows, &AllocationPlan::default(), today()).unwrap();

    let ada = store.students()[0].account_id;
    assert_eq!(store.passwords.get(&ada).map(String::as_str), Some("M1"));
}

#[test]
fn test_header_variants_are_accepted() {
    let mut store = FakeStore::with_staff(&["staffA"]);
    let rows = vec![raw_row(&[
        ("Full Name", " Ada Lovelace "),
        ("Matric No", " M1 "),
        ("Dept", "CPT"),
    ])];

    let outcome =
        allocate_medical_tests(&mut store, &rows, &AllocationPlan::default(), today()).unwrap();

    assert_eq!(outcome.schedules[0].matric_no, "M1");
    assert_eq!(store.profiles[0].department.as_deref(), Some("CPT"));
    assert_eq!(store.students()[0].display_name, "Ada Lovelace");
}

#[test]
fn test_allocation_against_sqlite() {
    let mut persistence = create_test_persistence();
    let staff = persistence
        .create_account("staffA", "Staff A", "long-password", clinic_domain::Role::Staff)
        .unwrap();
    let rows = vec![
        student_row("Ada Lovelace", "M1", "CPT"),
        student_row("Ada King", "M2", "PHY"),
    ];

    let outcome =
        allocate_medical_tests(&mut persistence, &rows, &AllocationPlan::default(), today())
            .unwrap();
    assert_eq!(outcome.report.schedules_created, 2);

    let stored = persistence
        .list_schedules(ScheduleFilter {
            staff_account_id: Some(staff.account_id),
            profile_id: None,
            department: None,
        })
        .unwrap();
    let summary: Vec<(String, String, String)> = stored
        .iter()
        .map(|s| {
            (
                s.student_username.clone(),
                s.scheduled_time.format("%H:%M").to_string(),
                s.ward_number.clone(),
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            (String::from("ada"), String::from("09:00"), String::from("W1")),
            (String::from("ada1"), String::from("09:30"), String::from("W2")),
        ]
    );

    assert!(persistence.verify_password("ada", "M1").unwrap().is_some());

    // A second run with the same rows creates nothing new.
    let rerun =
        allocate_medical_tests(&mut persistence, &rows, &AllocationPlan::default(), today())
            .unwrap();
    assert_eq!(rerun.report.schedules_created, 0);
    assert_eq!(rerun.report.already_scheduled, 2);
    assert_eq!(rerun.report.accounts_created, 0);
}
