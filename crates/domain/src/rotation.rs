// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Round-robin assignment of medical test slots.
//!
//! A batch draws from three independent cycles: the daily slot list,
//! the staff roster, and the ward pool. The scheduling date starts on
//! the first scheduling day and moves forward one day every time the
//! slot cycle wraps back to its first slot. Staff and ward cycles wrap
//! on their own periods and never affect the date.
//!
//! The assigner is owned by exactly one batch and is rebuilt for every
//! batch, so each batch starts at the first slot, the first staff member
//! and the first ward.

use chrono::{Days, NaiveDate, NaiveTime};
use std::iter::Cycle;
use std::vec::IntoIter;

use crate::error::DomainError;
use crate::types::Ward;

/// The ordered slot times offered each day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySlots(Vec<NaiveTime>);

impl DailySlots {
    /// Creates a slot list.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or not strictly ascending.
    pub fn new(slots: Vec<NaiveTime>) -> Result<Self, DomainError> {
        if slots.is_empty() {
            return Err(DomainError::EmptySlotList);
        }

        if let Some(pair) = slots.windows(2).find(|pair| pair[1] <= pair[0]) {
            return Err(DomainError::SlotsNotAscending { slot: pair[1] });
        }

        Ok(Self(slots))
    }

    /// Builds slots from `first` to `last` inclusive, `step_minutes` apart.
    ///
    /// # Errors
    ///
    /// Returns an error if the range yields no slot.
    pub fn every(
        first: NaiveTime,
        last: NaiveTime,
        step_minutes: u32,
    ) -> Result<Self, DomainError> {
        let step: chrono::Duration = chrono::Duration::minutes(i64::from(step_minutes.max(1)));
        let mut slots: Vec<NaiveTime> = Vec::new();
        let mut current: NaiveTime = first;

        while current <= last {
            slots.push(current);
            let (next, wrapped_secs) = current.overflowing_add_signed(step);
            if wrapped_secs != 0 {
                break;
            }
            current = next;
        }

        Self::new(slots)
    }

    /// The first slot of the day. Drawing it again marks a new day.
    #[must_use]
    pub fn first(&self) -> NaiveTime {
        self.0[0]
    }

    /// Number of slots per day.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; construction rejects empty lists.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The slot times in order.
    #[must_use]
    pub fn times(&self) -> &[NaiveTime] {
        &self.0
    }
}

impl Default for DailySlots {
    /// 09:00 through 12:00 every 30 minutes: seven slots.
    fn default() -> Self {
        let slots: Vec<NaiveTime> = [(9, 0), (9, 30), (10, 0), (10, 30), (11, 0), (11, 30), (12, 0)]
            .into_iter()
            .filter_map(|(h, m)| NaiveTime::from_hms_opt(h, m, 0))
            .collect();
        Self(slots)
    }
}

/// The ordered pool of wards tests are held in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WardPool(Vec<Ward>);

impl WardPool {
    /// Creates a ward pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool is empty.
    pub fn new(wards: Vec<Ward>) -> Result<Self, DomainError> {
        if wards.is_empty() {
            return Err(DomainError::EmptyWardPool);
        }
        Ok(Self(wards))
    }

    /// Creates `count` wards labelled `{prefix}1..={prefix}{count}`.
    ///
    /// # Errors
    ///
    /// Returns an error if `count` is zero.
    pub fn numbered(prefix: &str, count: u16) -> Result<Self, DomainError> {
        Self::new(
            (1..=count)
                .map(|n| Ward::new(&format!("{prefix}{n}")))
                .collect(),
        )
    }

    /// Number of wards.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; construction rejects empty pools.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The wards in order.
    #[must_use]
    pub fn wards(&self) -> &[Ward] {
        &self.0
    }
}

impl Default for WardPool {
    /// Wards `W1` through `W10`.
    fn default() -> Self {
        Self((1..=10).map(|n| Ward::new(&format!("W{n}"))).collect())
    }
}

/// Fixed capacity inputs for an allocation batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AllocationPlan {
    /// Slot times offered each day.
    pub slots: DailySlots,
    /// Wards to rotate through.
    pub wards: WardPool,
}

impl AllocationPlan {
    /// Creates a plan from explicit slots and wards.
    #[must_use]
    pub const fn new(slots: DailySlots, wards: WardPool) -> Self {
        Self { slots, wards }
    }
}

/// The first day a batch schedules tests on: the day after `today`.
///
/// # Errors
///
/// Returns an error on calendar overflow.
pub fn first_scheduling_date(today: NaiveDate) -> Result<NaiveDate, DomainError> {
    today
        .checked_add_days(Days::new(1))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing the day after {today}"),
        })
}

/// One drawn assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment<S> {
    /// The scheduled date.
    pub date: NaiveDate,
    /// The slot time on that date.
    pub time: NaiveTime,
    /// The supervising staff member.
    pub staff: S,
    /// The ward.
    pub ward: Ward,
}

/// Per-batch rotation state.
///
/// `S` is whatever the caller uses to identify a staff member.
#[derive(Debug, Clone)]
pub struct RotationAssigner<S: Clone> {
    first_slot: NaiveTime,
    slots: Cycle<IntoIter<NaiveTime>>,
    staff: Cycle<IntoIter<S>>,
    wards: Cycle<IntoIter<Ward>>,
    current_date: NaiveDate,
}

impl<S: Clone> RotationAssigner<S> {
    /// Creates the rotation state for one batch.
    ///
    /// The first drawn assignment lands on `start_date`.
    ///
    /// # Errors
    ///
    /// Returns an error if the staff roster is empty or on calendar overflow.
    pub fn new(
        plan: &AllocationPlan,
        staff: Vec<S>,
        start_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        if staff.is_empty() {
            return Err(DomainError::EmptyStaffRoster);
        }

        // Drawing the first slot advances the date, so start one day early.
        let current_date: NaiveDate = start_date
            .checked_sub_days(Days::new(1))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("computing the day before {start_date}"),
            })?;

        Ok(Self {
            first_slot: plan.slots.first(),
            slots: plan.slots.times().to_vec().into_iter().cycle(),
            staff: staff.into_iter().cycle(),
            wards: plan.wards.wards().to_vec().into_iter().cycle(),
            current_date,
        })
    }

    /// Draws the next slot, staff member and ward.
    ///
    /// # Errors
    ///
    /// Returns an error on calendar overflow.
    pub fn next_assignment(&mut self) -> Result<Assignment<S>, DomainError> {
        let time: NaiveTime = self.slots.next().ok_or(DomainError::EmptySlotList)?;
        if time == self.first_slot {
            self.current_date = self
                .current_date
                .checked_add_days(Days::new(1))
                .ok_or_else(|| DomainError::DateArithmeticOverflow {
                    operation: format!("advancing past {}", self.current_date),
                })?;
        }

        let staff: S = self.staff.next().ok_or(DomainError::EmptyStaffRoster)?;
        let ward: Ward = self.wards.next().ok_or(DomainError::EmptyWardPool)?;

        Ok(Assignment {
            date: self.current_date,
            time,
            staff,
            ward,
        })
    }

    /// The date the most recent assignment landed on.
    #[must_use]
    pub const fn current_date(&self) -> NaiveDate {
        self.current_date
    }
}
