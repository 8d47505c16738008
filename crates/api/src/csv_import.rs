// Copyright (C) 2026 Campus Clinic Contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bulk medical test import from an uploaded CSV file.
//!
//! Uploads arrive as raw bytes in whatever encoding the spreadsheet tool
//! used. The encoding is guessed, the bytes are decoded with replacement
//! characters for invalid sequences, and the CSV is parsed in full before
//! any row is allocated. A malformed file therefore allocates nothing.

use chardetng::EncodingDetector;
use chrono::NaiveDate;
use clinic_domain::{AllocationPlan, AuditEntry, RawRow, Role, normalize_header};
use clinic_persistence::Persistence;
use encoding_rs::Encoding;
use thiserror::Error;
use tracing::{info, warn};

use crate::allocation::{AllocationOutcome, AllocationReport, allocate_medical_tests};
use crate::auth::{Actor, require_role};
use crate::error::ApiError;

/// Errors raised by a bulk import.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    /// The upload is not well-formed CSV.
    #[error("Malformed CSV: {0}")]
    MalformedCsv(String),

    /// The upload has no header row.
    #[error("CSV upload has no header row")]
    MissingHeader,

    /// Authorization or allocation failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Api(inner) => inner,
            other => Self::InvalidCsvFormat {
                reason: other.to_string(),
            },
        }
    }
}

/// The outcome of an import plus a one-line summary for the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub outcome: AllocationOutcome,
    pub message: String,
}

/// Decodes an upload of unknown encoding.
///
/// A byte order mark takes precedence over the guess. Invalid sequences
/// become U+FFFD. Returns the text and the encoding used.
#[must_use]
pub fn decode_upload(raw: &[u8]) -> (String, &'static Encoding) {
    let mut detector = EncodingDetector::new();
    detector.feed(raw, true);
    let guessed: &'static Encoding = detector.guess(None, true);

    let (text, used, had_errors) = guessed.decode(raw);
    if had_errors {
        warn!(encoding = used.name(), "Upload contained undecodable bytes");
    }

    (text.into_owned(), used)
}

/// Parses CSV text with a header row into raw rows keyed by header.
///
/// Headers are normalized before keying, and when two headers normalize to
/// the same key the later column wins. A record shorter than the header
/// leaves its trailing fields empty; extra trailing fields are ignored.
///
/// # Errors
///
/// Returns `MissingHeader` for an empty upload and `MalformedCsv` when the
/// reader fails.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::MalformedCsv(e.to_string()))?
        .iter()
        .map(normalize_header)
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(ImportError::MissingHeader);
    }

    let mut rows: Vec<RawRow> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ImportError::MalformedCsv(e.to_string()))?;
        let row: RawRow = headers
            .iter()
            .enumerate()
            .filter(|(_, header)| !header.is_empty())
            .map(|(index, header)| {
                (header.clone(), record.get(index).unwrap_or_default().to_string())
            })
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Renders the one-line summary shown after an import.
#[must_use]
pub fn summarize(report: &AllocationReport) -> String {
    format!(
        "Medical tests scheduled. {} created, {} new accounts, {} profiles updated, {} already scheduled, {} rows skipped.",
        report.schedules_created,
        report.accounts_created,
        report.profiles_updated,
        report.already_scheduled,
        report.skipped_invalid
    )
}

/// Imports an uploaded CSV and allocates medical tests for it.
///
/// # Errors
///
/// Returns `Api(Unauthorized)` unless the actor is an admin, a CSV error if
/// the upload cannot be parsed, or the allocation error that aborted the
/// batch.
pub fn import_medical_tests(
    persistence: &mut Persistence,
    actor: &Actor,
    raw: &[u8],
    plan: &AllocationPlan,
    today: NaiveDate,
) -> Result<ImportSummary, ImportError> {
    require_role(actor, Role::Admin, "import medical tests")?;

    let (text, encoding) = decode_upload(raw);
    info!(
        bytes = raw.len(),
        encoding = encoding.name(),
        actor = %actor.username,
        "Decoded medical test upload"
    );

    let rows: Vec<RawRow> = parse_rows(&text)?;
    let outcome: AllocationOutcome = allocate_medical_tests(persistence, &rows, plan, today)?;
    let message: String = summarize(&outcome.report);

    let report: &AllocationReport = &outcome.report;
    persistence
        .record_audit(
            &AuditEntry::new(actor.account_id, String::from("Imported medical tests"))
                .with_detail("rows_read", report.rows_read.to_string())
                .with_detail("schedules_created", report.schedules_created.to_string())
                .with_detail("skipped_invalid", report.skipped_invalid.to_string()),
        )
        .map_err(ApiError::from)?;

    Ok(ImportSummary { outcome, message })
}
