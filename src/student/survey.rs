//! Survey row decoding
//!
//! The data source collaborator (spreadsheet, CSV, whatever the application
//! wires up) hands the engine an ordered sequence of [`SurveyRow`] values
//! with the raw string cells of one response each. Decoding is a
//! schema-validated step: each row either yields a [`StudentRecord`] or a
//! [`RecordParseError`], and a malformed row never aborts the load: it is
//! collected in the [`LoadReport`] and skipped.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::RecordParseError;
use crate::roster::project::ProjectId;
use crate::student::record::{StudentId, StudentRecord};

/// Raw survey cells for one student, as the data source produces them
///
/// List-valued cells are comma or semicolon separated, matching the survey
/// export format. Every field except `id` may be blank.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyRow {
    /// Student id cell (full name or email); blank makes the row malformed
    #[serde(default)]
    pub id: String,
    /// Skill tokens, e.g. `"rust, sql; statistics"`
    #[serde(default)]
    pub skills: String,
    /// Ranked project ids, most-preferred first
    #[serde(default)]
    pub project_preferences: String,
    /// Ranked teammate ids, most-preferred first
    #[serde(default)]
    pub teammate_preferences: String,
    /// Time-slot tokens the student is available in
    #[serde(default)]
    pub availability: String,
}

/// A row the loader skipped, with the reason
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRow {
    /// Index of the row in the input sequence (0-based)
    pub row: usize,
    /// Why the row was skipped
    pub error: RecordParseError,
}

/// Outcome of decoding a batch of survey rows
///
/// Order-preserving: `records` keeps the input order of the valid rows, and
/// `skipped` keeps the input order of the rejected ones.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Successfully decoded records
    pub records: Vec<StudentRecord>,
    /// Rows that were rejected, with their errors
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    /// True when no row was rejected
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Split a list-valued survey cell into trimmed, non-empty tokens
fn split_tokens(cell: &str) -> impl Iterator<Item = &str> {
    cell.split([',', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Deduplicate tokens while preserving first-occurrence order
fn dedup_ordered(tokens: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for token in tokens {
        if seen.insert(token.clone()) {
            out.push(token);
        }
    }
    out
}

/// Decode one survey row into a student record
///
/// `row` is the 0-based position of the row in the input sequence, used only
/// for error reporting. Teammate preferences are sanitized: duplicates and
/// self-references are dropped, order is kept.
pub fn decode_row(raw: &SurveyRow, row: usize) -> Result<StudentRecord, RecordParseError> {
    let id = raw.id.trim();
    if id.is_empty() {
        return Err(RecordParseError::MissingId { row });
    }
    let id = StudentId::from(id);

    let skills: BTreeSet<String> = split_tokens(&raw.skills).map(str::to_string).collect();
    let availability: BTreeSet<String> = split_tokens(&raw.availability)
        .map(str::to_string)
        .collect();

    let project_preferences: Vec<ProjectId> =
        dedup_ordered(split_tokens(&raw.project_preferences).map(str::to_string))
            .into_iter()
            .map(ProjectId::from)
            .collect();

    let teammate_preferences: Vec<StudentId> =
        dedup_ordered(split_tokens(&raw.teammate_preferences).map(str::to_string))
            .into_iter()
            .map(StudentId::from)
            .filter(|teammate| *teammate != id)
            .collect();

    Ok(StudentRecord {
        id,
        skills,
        project_preferences,
        teammate_preferences,
        availability,
    })
}

/// Decode a batch of survey rows into a load report
///
/// Rows with a missing id, and rows reusing an id claimed by an earlier row,
/// are skipped and reported; the rest of the load continues.
pub fn decode_rows(rows: &[SurveyRow]) -> LoadReport {
    let mut report = LoadReport::default();
    let mut seen: BTreeSet<StudentId> = BTreeSet::new();

    for (index, raw) in rows.iter().enumerate() {
        match decode_row(raw, index) {
            Ok(record) => {
                if seen.contains(&record.id) {
                    let error = RecordParseError::DuplicateId {
                        row: index,
                        id: record.id.clone(),
                    };
                    warn!(row = index, %error, "skipping survey row");
                    report.skipped.push(SkippedRow { row: index, error });
                } else {
                    seen.insert(record.id.clone());
                    report.records.push(record);
                }
            }
            Err(error) => {
                warn!(row = index, %error, "skipping survey row");
                report.skipped.push(SkippedRow { row: index, error });
            }
        }
    }

    info!(
        loaded = report.records.len(),
        skipped = report.skipped.len(),
        "survey load complete"
    );
    report
}
