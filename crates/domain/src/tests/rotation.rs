// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{NaiveDate, NaiveTime};

use crate::{
    AllocationPlan, Assignment, DailySlots, DomainError, RotationAssigner, Ward, WardPool,
    first_scheduling_date,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn draw<S: Clone>(assigner: &mut RotationAssigner<S>, n: usize) -> Vec<Assignment<S>> {
    (0..n).map(|_| assigner.next_assignment().unwrap()).collect()
}

#[test]
fn test_default_plan_matches_reference_clinic() {
    let plan = AllocationPlan::default();

    assert_eq!(plan.slots.len(), 7);
    assert_eq!(plan.slots.first(), hm(9, 0));
    assert_eq!(plan.slots.times()[6], hm(12, 0));
    assert_eq!(plan.wards.len(), 10);
    assert_eq!(plan.wards.wards()[0], Ward::new("W1"));
    assert_eq!(plan.wards.wards()[9], Ward::new("W10"));
}

#[test]
fn test_every_builds_inclusive_cadence() {
    let slots = DailySlots::every(hm(9, 0), hm(12, 0), 30).unwrap();
    assert_eq!(slots, DailySlots::default());
}

#[test]
fn test_slots_must_be_ascending_and_non_empty() {
    assert_eq!(DailySlots::new(vec![]), Err(DomainError::EmptySlotList));
    assert_eq!(
        DailySlots::new(vec![hm(9, 0), hm(9, 0)]),
        Err(DomainError::SlotsNotAscending { slot: hm(9, 0) })
    );
    assert_eq!(
        DailySlots::new(vec![hm(10, 0), hm(9, 0)]),
        Err(DomainError::SlotsNotAscending { slot: hm(9, 0) })
    );
}

#[test]
fn test_ward_pool_must_be_non_empty() {
    assert_eq!(WardPool::numbered("W", 0), Err(DomainError::EmptyWardPool));
    assert_eq!(WardPool::numbered("W", 10).unwrap(), WardPool::default());
}

#[test]
fn test_first_scheduling_date_is_tomorrow() {
    assert_eq!(first_scheduling_date(date(2024, 1, 1)).unwrap(), date(2024, 1, 2));
    assert_eq!(
        first_scheduling_date(date(2024, 12, 31)).unwrap(),
        date(2025, 1, 1)
    );
}

#[test]
fn test_empty_roster_is_rejected() {
    let result = RotationAssigner::<&str>::new(&AllocationPlan::default(), vec![], date(2024, 1, 2));
    assert!(matches!(result, Err(DomainError::EmptyStaffRoster)));
}

#[test]
fn test_two_rows_single_staff() {
    let mut assigner =
        RotationAssigner::new(&AllocationPlan::default(), vec!["staffA"], date(2024, 1, 2))
            .unwrap();

    let drawn = draw(&mut assigner, 2);

    assert_eq!(
        drawn[0],
        Assignment {
            date: date(2024, 1, 2),
            time: hm(9, 0),
            staff: "staffA",
            ward: Ward::new("W1"),
        }
    );
    assert_eq!(
        drawn[1],
        Assignment {
            date: date(2024, 1, 2),
            time: hm(9, 30),
            staff: "staffA",
            ward: Ward::new("W2"),
        }
    );
}

#[test]
fn test_slot_period_and_date_advance() {
    let plan = AllocationPlan::default();
    let mut assigner = RotationAssigner::new(&plan, vec![1, 2, 3], date(2024, 1, 2)).unwrap();

    let drawn = draw(&mut assigner, 30);
    let period: usize = plan.slots.len();

    for i in 0..drawn.len() - period {
        assert_eq!(drawn[i].time, drawn[i + period].time);
        assert_eq!(drawn[i + period].date, drawn[i].date.succ_opt().unwrap());
    }

    // Exactly seven tests per day, consecutive days, no gaps.
    assert_eq!(drawn[6].date, date(2024, 1, 2));
    assert_eq!(drawn[7].date, date(2024, 1, 3));
    assert_eq!(drawn[7].time, hm(9, 0));
    assert_eq!(drawn[29].date, date(2024, 1, 6));
}

#[test]
fn test_staff_and_ward_cycles_are_independent_of_days() {
    let plan = AllocationPlan::default();
    let staff: Vec<&str> = vec!["a", "b", "c"];
    let mut assigner = RotationAssigner::new(&plan, staff.clone(), date(2024, 1, 2)).unwrap();

    let drawn = draw(&mut assigner, 25);

    for (i, assignment) in drawn.iter().enumerate() {
        assert_eq!(assignment.staff, staff[i % staff.len()]);
        assert_eq!(assignment.ward, plan.wards.wards()[i % plan.wards.len()]);
    }

    // Day boundary at index 7 does not reset staff or ward.
    assert_eq!(drawn[7].staff, "b");
    assert_eq!(drawn[7].ward, Ward::new("W8"));
}

#[test]
fn test_custom_single_slot_plan_advances_every_draw() {
    let plan = AllocationPlan::new(
        DailySlots::new(vec![hm(14, 0)]).unwrap(),
        WardPool::numbered("B", 2).unwrap(),
    );
    let mut assigner = RotationAssigner::new(&plan, vec!["x"], date(2024, 2, 28)).unwrap();

    let drawn = draw(&mut assigner, 3);

    assert_eq!(drawn[0].date, date(2024, 2, 28));
    assert_eq!(drawn[1].date, date(2024, 2, 29));
    assert_eq!(drawn[2].date, date(2024, 3, 1));
    assert_eq!(drawn[2].ward, Ward::new("B1"));
    assert_eq!(assigner.current_date(), date(2024, 3, 1));
}
