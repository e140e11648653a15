//! Project types
//!
//! A project is assigned to exactly one team during formation and stays
//! fixed for the rest of the session.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a project
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    /// View the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A project available for assignment
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique key referenced by student ballots and team assignments
    pub id: ProjectId,
    /// Human-readable name for listings and reports
    pub display_name: String,
}

impl Project {
    /// Create a project
    pub fn new(id: impl Into<ProjectId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}
