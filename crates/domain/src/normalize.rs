// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row normalization for bulk student uploads.
//!
//! Upload headers vary in case and spelling. Rows are keyed by the
//! normalized header, and each field has an ordered list of accepted
//! spellings; the first one present with a non-empty value wins. Rows that
//! end up without a name or a matric number are dropped without being
//! reported.

use std::collections::HashMap;

use crate::types::StudentRow;

/// A raw upload row keyed by normalized header (see [`normalize_header`]).
pub type RawRow = HashMap<String, String>;

/// Accepted header spellings for the student's name, in priority order.
pub const NAME_KEYS: &[&str] = &["name", "full name"];

/// Accepted header spellings for the matric number, in priority order.
pub const MATRIC_NO_KEYS: &[&str] = &["matric_no", "matric no"];

/// Accepted header spellings for the department, in priority order.
pub const DEPARTMENT_KEYS: &[&str] = &["department", "dept"];

/// Normalizes a header for comparison: trimmed, lowercased, and with
/// internal whitespace runs collapsed to a single space.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

/// Looks up the first candidate header carrying a non-empty value.
///
/// Falls back to an empty string when no candidate matches. The result
/// is trimmed.
#[must_use]
pub fn lookup_field(row: &RawRow, candidates: &[&str]) -> String {
    candidates
        .iter()
        .filter_map(|candidate| row.get(*candidate))
        .find(|value| !value.is_empty())
        .map_or("", |value| value.trim())
        .to_string()
}

/// Normalizes one raw row.
///
/// Returns `None` when the name or matric number is empty after trimming.
#[must_use]
pub fn normalize_row(row: &RawRow) -> Option<StudentRow> {
    let name: String = lookup_field(row, NAME_KEYS);
    let matric_no: String = lookup_field(row, MATRIC_NO_KEYS);
    let department: String = lookup_field(row, DEPARTMENT_KEYS);

    if name.is_empty() || matric_no.is_empty() {
        return None;
    }

    Some(StudentRow::new(name, matric_no, department))
}

/// Normalizes a batch, keeping input order.
///
/// Returns the valid rows and the number of rows dropped.
#[must_use]
pub fn normalize_rows(rows: &[RawRow]) -> (Vec<StudentRow>, usize) {
    let valid: Vec<StudentRow> = rows.iter().filter_map(normalize_row).collect();
    let skipped: usize = rows.len() - valid.len();
    (valid, skipped)
}
