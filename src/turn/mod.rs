//! The season/year/phase state machine and the turn controller.

pub mod controller;

pub use controller::{GameResult, TurnController};

use std::fmt;

/// The season of a game turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Fall,
}

/// The phase within a game turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Movement,
    Retreat,
    Build,
}

/// A point in game time: year, season, and phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Turn {
    pub year: u16,
    pub season: Season,
    pub phase: Phase,
}

impl Turn {
    /// Spring 1901, movement phase.
    pub const fn first() -> Turn {
        Turn { year: 1901, season: Season::Spring, phase: Phase::Movement }
    }

    /// The turn that follows this one.
    ///
    /// Flow within a year:
    /// Spring Movement -> Spring Retreat (iff dislodgements) -> Fall Movement
    /// -> Fall Retreat (iff dislodgements) -> Build -> next Spring Movement.
    /// The build phase always closes the year so that center/unit surpluses
    /// and deficits are settled exactly once per year.
    pub fn next(self, has_dislodgements: bool) -> Turn {
        match self.phase {
            Phase::Movement if has_dislodgements => {
                Turn { phase: Phase::Retreat, ..self }
            }
            Phase::Movement | Phase::Retreat => match self.season {
                Season::Spring => Turn { season: Season::Fall, phase: Phase::Movement, ..self },
                Season::Fall => Turn { phase: Phase::Build, ..self },
            },
            Phase::Build => Turn {
                year: self.year + 1,
                season: Season::Spring,
                phase: Phase::Movement,
            },
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let season = match self.season {
            Season::Spring => "spring",
            Season::Fall => "fall",
        };
        let phase = match self.phase {
            Phase::Movement => "movement",
            Phase::Retreat => "retreat",
            Phase::Build => "build",
        };
        write!(f, "{} {} {}", season, self.year, phase)
    }
}
