//! Adjudication reports: what the surrounding server broadcasts.
//!
//! One entry per submitted order, carrying the validation note (when the
//! order never reached the resolver) or the resolved outcome, plus the
//! convoy route actually used and the retreat choices of every dislodged
//! unit.

use std::fmt;

use crate::board::{Location, Unit};
use crate::map::{Power, Province};
use crate::order::{Order, OrderNote};
use crate::turn::Turn;

/// The resolved fate of one order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The order did what it said.
    Success,
    /// A move failed against equal or greater strength.
    Bounced,
    /// A support was cut by an attack.
    Cut,
    /// A convoyed move (or convoying fleet) lost its route.
    Disrupted,
    /// A retreat reached its destination.
    Retreated,
    /// A retreat failed or no retreat was possible; the unit disbands.
    NoRetreat,
    /// The order was ignored: invalid, irrelevant, or displaced by a
    /// phase default.
    Void,
}

impl Outcome {
    pub const fn code(self) -> &'static str {
        match self {
            Outcome::Success => "SUC",
            Outcome::Bounced => "BNC",
            Outcome::Cut => "CUT",
            Outcome::Disrupted => "DSR",
            Outcome::Retreated => "RET",
            Outcome::NoRetreat => "NRP",
            Outcome::Void => "VOID",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The report line for a single order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReport {
    pub order: Order,
    pub power: Power,
    /// `Mbv` unless the order failed validation and never reached the
    /// resolver.
    pub note: OrderNote,
    pub outcome: Outcome,
    /// True if the ordered unit was dislodged this turn.
    pub dislodged: bool,
    /// For convoyed moves that succeeded: the sea route actually used.
    pub convoy_route: Option<Vec<Province>>,
}

/// A dislodged unit awaiting a retreat decision, with its legal choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetreatRequirement {
    pub province: Province,
    pub unit: Unit,
    pub choices: Vec<Location>,
}

/// Everything the server layer needs to broadcast after one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjudicationReport {
    /// The turn that was adjudicated (not the one that follows).
    pub turn: Turn,
    pub orders: Vec<OrderReport>,
    pub retreats_needed: Vec<RetreatRequirement>,
}

impl AdjudicationReport {
    /// The outcome for the unit ordered in `province`, if any order named it.
    pub fn outcome_of(&self, province: Province) -> Option<Outcome> {
        self.orders
            .iter()
            .find(|r| r.order.province() == Some(province))
            .map(|r| r.outcome)
    }

    /// The report line for the unit ordered in `province`.
    pub fn report_for(&self, province: Province) -> Option<&OrderReport> {
        self.orders.iter().find(|r| r.order.province() == Some(province))
    }
}
