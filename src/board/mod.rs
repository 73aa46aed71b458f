//! Mutable game state: unit occupancy, ownership, dislodgements.

pub mod position;
pub mod unit;

pub use position::{Dislodgement, Location, Position, SetupError};
pub use unit::{Unit, UnitType};
