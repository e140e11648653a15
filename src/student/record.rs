//! Student record types
//!
//! A [`StudentRecord`] is the normalized form of one survey response. Records
//! are loaded once per session and never mutated afterwards; every later
//! stage (scoring, formation, roster edits) borrows them read-only.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::roster::project::ProjectId;

/// Unique, session-stable identifier for a student
///
/// Typically the full name or email address exactly as it appears in the
/// survey. Used as the key for roster membership and teammate preferences.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub String);

impl StudentId {
    /// View the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StudentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for StudentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// One normalized survey response
///
/// Preference lists are ordered most-preferred first and hold no duplicates;
/// `teammate_preferences` never contains the student's own id (the survey
/// decoder sanitizes both). References to unknown students or projects are
/// legal and simply ignored by the scorer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Unique key, stable across the session
    pub id: StudentId,
    /// Skills the student reports (ordered set for deterministic iteration)
    pub skills: BTreeSet<String>,
    /// Ranked project choices, most-preferred first
    pub project_preferences: Vec<ProjectId>,
    /// Requested teammates, most-preferred first
    pub teammate_preferences: Vec<StudentId>,
    /// Time-slot tokens the student is available in
    pub availability: BTreeSet<String>,
}

impl StudentRecord {
    /// Create a record with the given id and no survey answers
    pub fn new(id: impl Into<StudentId>) -> Self {
        Self {
            id: id.into(),
            skills: BTreeSet::new(),
            project_preferences: Vec::new(),
            teammate_preferences: Vec::new(),
            availability: BTreeSet::new(),
        }
    }

    /// Set the skills set
    pub fn with_skills<I, T>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Set the ranked project preferences
    pub fn with_projects<I, T>(mut self, projects: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<ProjectId>,
    {
        self.project_preferences = projects.into_iter().map(Into::into).collect();
        self
    }

    /// Set the ranked teammate preferences
    pub fn with_teammates<I, T>(mut self, teammates: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<StudentId>,
    {
        self.teammate_preferences = teammates.into_iter().map(Into::into).collect();
        self
    }

    /// Set the availability slots
    pub fn with_availability<I, T>(mut self, slots: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.availability = slots.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this student requested `other` as a teammate
    pub fn prefers(&self, other: &StudentId) -> bool {
        self.teammate_preferences.iter().any(|id| id == other)
    }

    /// Rank of `project` in this student's ballot (0 = top choice)
    pub fn preference_rank(&self, project: &ProjectId) -> Option<usize> {
        self.project_preferences.iter().position(|p| p == project)
    }
}
