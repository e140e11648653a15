//! Team type
//!
//! A team wraps its member ids with the assigned project and the last
//! computed compatibility score. The score is a cache: any membership
//! change must recompute it before it is displayed or exported, which the
//! roster's move operation guarantees.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::roster::project::ProjectId;
use crate::student::record::StudentId;

/// 1-based team number, stable for the session
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamNumber(pub usize);

impl fmt::Display for TeamNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

impl From<usize> for TeamNumber {
    fn from(number: usize) -> Self {
        Self(number)
    }
}

/// A team in the roster
///
/// `members` has set semantics (no duplicate ids) but keeps insertion order
/// so listings and exports are deterministic. Size is not hard-capped:
/// moves that unbalance a team are accepted and surfaced as warnings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Team {
    /// Stable team number (1..K)
    pub number: TeamNumber,
    /// Member ids, insertion-ordered
    pub members: Vec<StudentId>,
    /// The project assigned at formation, fixed afterwards
    pub project: Option<ProjectId>,
    /// Last computed compatibility score in [0,1]
    pub cached_score: f64,
}

impl Team {
    /// Create an empty team with a neutral cached score
    pub fn new(number: TeamNumber) -> Self {
        Self {
            number,
            members: Vec::new(),
            project: None,
            cached_score: 0.5,
        }
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the team has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the given student is a member
    pub fn contains(&self, id: &StudentId) -> bool {
        self.members.iter().any(|member| member == id)
    }

    /// Add a member; duplicate ids are ignored
    pub fn add_member(&mut self, id: StudentId) {
        if !self.contains(&id) {
            self.members.push(id);
        }
    }

    /// Remove a member, returning whether it was present
    pub fn remove_member(&mut self, id: &StudentId) -> bool {
        match self.members.iter().position(|member| member == id) {
            Some(index) => {
                self.members.remove(index);
                true
            }
            None => false,
        }
    }
}
