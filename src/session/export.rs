//! Report export
//!
//! On finalize the session builds a [`TeamReport`] snapshot of the roster
//! and hands it to a [`ReportSink`] exactly once. Delivering the report to
//! a spreadsheet, file, or anything else is the application's adapter; the
//! engine only defines the contract and a JSON renderer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ExportError;
use crate::roster::project::ProjectId;
use crate::roster::roster::Roster;
use crate::roster::team::TeamNumber;
use crate::student::record::{StudentId, StudentRecord};

/// Destination for a finalized report
///
/// Implementations may fail; a failed export leaves the session open so
/// finalize can be retried, and must not have consumed the roster.
pub trait ReportSink {
    /// Deliver a finalized report
    fn export(&mut self, report: &TeamReport) -> Result<(), ExportError>;
}

/// Survey answers of one member, as exported
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSummary {
    /// Student id
    pub id: StudentId,
    /// Reported skills, sorted
    pub skills: Vec<String>,
    /// Ranked project choices
    pub project_preferences: Vec<ProjectId>,
    /// Requested teammates
    pub teammate_preferences: Vec<StudentId>,
    /// Available time slots, sorted
    pub availability: Vec<String>,
}

impl From<&StudentRecord> for MemberSummary {
    fn from(record: &StudentRecord) -> Self {
        Self {
            id: record.id.clone(),
            skills: record.skills.iter().cloned().collect(),
            project_preferences: record.project_preferences.clone(),
            teammate_preferences: record.teammate_preferences.clone(),
            availability: record.availability.iter().cloned().collect(),
        }
    }
}

/// One team in the report
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamEntry {
    /// Team number
    pub team: TeamNumber,
    /// Assigned project
    pub project: Option<ProjectId>,
    /// Member summaries, in member order
    pub members: Vec<MemberSummary>,
    /// Compatibility score at finalize time
    pub score: f64,
}

/// Snapshot of a finalized roster
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamReport {
    /// When the session finalized
    pub generated_at: DateTime<Utc>,
    /// Teams in ascending team-number order
    pub teams: Vec<TeamEntry>,
}

impl TeamReport {
    /// Snapshot a roster
    pub fn from_roster(roster: &Roster, generated_at: DateTime<Utc>) -> Self {
        let teams = roster
            .teams()
            .iter()
            .map(|team| TeamEntry {
                team: team.number,
                project: team.project.clone(),
                members: roster
                    .members_of(team)
                    .into_iter()
                    .map(MemberSummary::from)
                    .collect(),
                score: team.cached_score,
            })
            .collect();
        Self {
            generated_at,
            teams,
        }
    }
}

/// Sink that renders the report to pretty JSON in memory
///
/// Useful as the last engine-side step before an application adapter
/// uploads the document, and as a test double.
#[derive(Clone, Debug, Default)]
pub struct JsonReportSink {
    rendered: Option<String>,
}

impl JsonReportSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered JSON document, if an export happened
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }
}

impl ReportSink for JsonReportSink {
    fn export(&mut self, report: &TeamReport) -> Result<(), ExportError> {
        let json = serde_json::to_string_pretty(report)
            .map_err(|e| ExportError::Serialization(e.to_string()))?;
        self.rendered = Some(json);
        Ok(())
    }
}
