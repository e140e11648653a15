//! Error types for capstone-match
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

use crate::roster::team::TeamNumber;
use crate::session::machine::SessionPhase;
use crate::student::record::StudentId;

/// Error type for a single malformed survey row
///
/// These are per-row and recoverable: the loader skips the row, records the
/// failure in the load report, and continues with the remaining rows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    /// The row carries no usable student id
    #[error("Row {row}: missing student id")]
    MissingId { row: usize },

    /// The row reuses an id already claimed by an earlier row
    #[error("Row {row}: duplicate student id {id}")]
    DuplicateId { row: usize, id: StudentId },
}

/// Error type for team formation
///
/// All variants are raised before any team exists.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormationError {
    /// Team count must be at least 1
    #[error("Invalid team count: {0} (must be at least 1)")]
    InvalidTeamCount(usize),

    /// Fewer projects than requested teams
    #[error("Insufficient projects: {projects} available for {teams} teams")]
    InsufficientProjects { projects: usize, teams: usize },

    /// No students to partition
    #[error("No students to partition into teams")]
    NoStudents,
}

/// Error type for roster mutations
///
/// Recoverable: a failed operation leaves every team untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// The named team number does not exist in this roster
    #[error("{0} does not exist")]
    TeamNotFound(TeamNumber),

    /// The student is not a member of the named source team
    #[error("Student {student} is not a member of {team}")]
    StudentNotFound { student: StudentId, team: TeamNumber },
}

/// Error type for report export
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    /// The report could not be serialized
    #[error("Report serialization failed: {0}")]
    Serialization(String),

    /// The sink rejected the report
    #[error("Report sink failed: {0}")]
    Sink(String),
}

/// Error type for interactive session commands
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session has reached a terminal phase and accepts no commands
    #[error("Session is closed ({0}); no further commands are accepted")]
    Closed(SessionPhase),

    /// A move failed; the roster is unchanged
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// Export failed; the session stays open and finalize may be retried
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Error type for command-line parsing in the interactive loop
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    /// Unrecognized command word
    #[error("Unknown command: {0}")]
    Unknown(String),

    /// The command word was recognized but its arguments were incomplete
    #[error("Missing arguments for '{command}' (usage: {usage})")]
    MissingArguments {
        command: &'static str,
        usage: &'static str,
    },

    /// A team argument was not a positive number
    #[error("Invalid team number: {0}")]
    InvalidTeamNumber(String),
}

/// Error type for configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading a configuration file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed configuration document
    #[error("Configuration parse error: {0}")]
    Parse(String),
}

/// Top-level error type for matching operations
#[derive(Debug, Error)]
pub enum MatchError {
    /// Survey row error
    #[error("Record error: {0}")]
    Record(#[from] RecordParseError),

    /// Formation error
    #[error("Formation error: {0}")]
    Formation(#[from] FormationError),

    /// Roster error
    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    /// Session error
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    /// Export error
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Command parse error
    #[error("Command error: {0}")]
    Command(#[from] CommandParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for matching operations
pub type MatchResult<T> = Result<T, MatchError>;
