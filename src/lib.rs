//! # capstone-match
//!
//! A deterministic team-matching engine for capstone course rosters.
//!
//! The engine partitions a roster of students into fixed-size teams and
//! assigns each team a project, optimizing for inter-member compatibility
//! derived from survey responses. The heuristic is local and explainable,
//! not globally optimal: reciprocal teammate requests seed teams, sizes
//! stay level, projects go to the teams that want them most, and every
//! score is a reproducible weighted formula over deterministic features.
//!
//! ## Core Concepts
//!
//! - **Compatibility score**: a scalar in [0,1] combining project-ballot
//!   agreement, mutual teammate requests, skills balance, and availability
//!   overlap under configurable weights
//! - **Formation**: the one-time deterministic partition of students into
//!   teams, each with a distinct project
//! - **Session**: the edit/finalize state machine; moves re-score the
//!   affected teams immediately, finalize exports exactly once, quit
//!   exports nothing
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use capstone_match::prelude::*;
//!
//! let report = decode_rows(&survey_rows);
//! let config = MatcherConfig::default();
//! let scorer = WeightedScorer::new(config.weights, config.top_choices);
//!
//! let roster = form_teams(&report.records, &projects, 5, &scorer)?;
//! let mut session = MatchSession::new(roster, config, JsonReportSink::new());
//!
//! session.execute(Command::parse("m Ann 1 2")?)?;
//! session.execute(Command::Finalize)?;
//! ```

pub mod config;
pub mod error;
pub mod formation;
pub mod roster;
pub mod scoring;
pub mod session;
pub mod student;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::*;
    pub use crate::formation::*;
    pub use crate::roster::prelude::*;
    pub use crate::scoring::prelude::*;
    pub use crate::session::prelude::*;
    pub use crate::student::prelude::*;
}
