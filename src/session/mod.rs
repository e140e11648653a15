//! Interactive session layer
//!
//! This module wraps the roster in the edit/finalize state machine: typed
//! commands in, typed outputs or recoverable errors out, and a single
//! export on the finalize transition. The surrounding application owns the
//! actual terminal loop; the engine owns the semantics.

pub mod command;
pub mod export;
pub mod machine;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::command::*;
    pub use super::export::*;
    pub use super::machine::*;
}
