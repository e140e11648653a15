//! Roster: teams, projects, and the move operation
//!
//! The mutable session state. A [`Roster`](roster::Roster) is produced once
//! by formation and then edited only through single-student moves, each of
//! which re-scores the two affected teams before returning.

pub mod project;
#[allow(clippy::module_inception)]
pub mod roster;
pub mod team;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::project::*;
    pub use super::roster::*;
    pub use super::team::*;
}
