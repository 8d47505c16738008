// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Username derivation.
//!
//! Student logins are the lowercased first token of the full name. When
//! that is taken, an increasing integer suffix is appended: `john`,
//! `john1`, `john2`, ...

use crate::error::DomainError;

/// Upper bound on the numeric suffix tried before giving up.
pub const MAX_USERNAME_SUFFIX: u32 = 10_000;

/// Derives the base username from a full name.
///
/// # Errors
///
/// Returns an error if the name has no non-whitespace token.
pub fn base_username(full_name: &str) -> Result<String, DomainError> {
    let first: &str = full_name
        .split_whitespace()
        .next()
        .ok_or_else(|| DomainError::InvalidName(String::from("Name cannot be empty")))?;

    Ok(first.to_lowercase().replace(' ', ""))
}

/// Yields `base`, then `base1`, `base2`, ... up to [`MAX_USERNAME_SUFFIX`].
pub fn username_candidates(base: &str) -> impl Iterator<Item = String> + '_ {
    std::iter::once(base.to_string())
        .chain((1..=MAX_USERNAME_SUFFIX).map(move |n| format!("{base}{n}")))
}
