// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `accounts`: Account creation and password updates
//! - `profiles`: Student profile creation and updates
//! - `schedules`: Medical test schedule inserts
//! - `appointments`: Appointment inserts and status changes
//! - `audit`: Audit log inserts
//!
//! Every insert returns the new row's ID via `RETURNING`.

pub mod accounts;
pub mod appointments;
pub mod audit;
pub mod profiles;
pub mod schedules;
