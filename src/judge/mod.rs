//! Order adjudication.
//!
//! The movement resolver turns a set of simultaneous orders into a verdict
//! over a decision graph; the retreat and build resolvers handle their
//! simpler phases directly. Verdicts describe mutations without applying
//! them; the turn controller owns the board.

pub mod build;
pub mod decision;
pub mod resolver;
pub mod retreat;

pub use build::{resolve_builds, BuildVerdict};
pub use resolver::{resolve_movement, MovementVerdict};
pub use retreat::{resolve_retreats, RetreatVerdict};
