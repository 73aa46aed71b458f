//! Orders: the closed set of instructions a power may give.
//!
//! One variant per order kind across all three phases. Each variant carries
//! exactly the data needed to specify the order; resolution never needs to
//! ask "what kind is this" at runtime beyond a single exhaustive match.

pub mod note;
pub mod validate;

pub use note::OrderNote;
pub use validate::{normalize, validate};

use std::fmt;

use crate::board::{Location, UnitType};
use crate::map::Province;

/// The unit an order addresses: its type and current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderUnit {
    pub unit_type: UnitType,
    pub location: Location,
}

impl OrderUnit {
    pub const fn new(unit_type: UnitType, location: Location) -> Self {
        OrderUnit { unit_type, location }
    }

    pub const fn province(&self) -> Province {
        self.location.province
    }
}

impl fmt::Display for OrderUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.unit_type, self.location)
    }
}

/// A Diplomacy order.
///
/// Movement phase: `Hold`, `Move`, `SupportHold`, `SupportMove`,
/// `ConvoyingFleet`, `ConvoyedArmy`. Retreat phase: `Retreat`, `Disband`.
/// Build phase: `Build`, `Remove`, `Waive`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Order {
    /// `A vie H`
    Hold { unit: OrderUnit },

    /// `A bud - rum`, `F nrg - stp/nc`. Always a direct (land/sea) move;
    /// armies travelling by sea use `ConvoyedArmy`.
    Move { unit: OrderUnit, dest: Location },

    /// `A tyr S A vie`
    SupportHold { unit: OrderUnit, supported: OrderUnit },

    /// `A gal S A bud - rum`
    SupportMove { unit: OrderUnit, supported: OrderUnit, dest: Location },

    /// `F nth C A lon - nwy`: a fleet offering one leg of a convoy.
    ConvoyingFleet { unit: OrderUnit, army_from: Location, army_to: Location },

    /// `A lon - nwy via nth`: an army moving by convoy. `path: None` means
    /// "any route the convoying fleets provide"; the resolver then picks the
    /// shortest intact chain and reports it.
    ConvoyedArmy { unit: OrderUnit, dest: Location, path: Option<Vec<Province>> },

    /// `A vie R boh` (retreat phase)
    Retreat { unit: OrderUnit, dest: Location },

    /// `A vie D` (retreat phase)
    Disband { unit: OrderUnit },

    /// `A vie B` or `F stp/sc B` (build phase)
    Build { unit: OrderUnit },

    /// `A war REM` (build phase)
    Remove { unit: OrderUnit },

    /// Voluntarily skip one build (build phase).
    Waive,
}

impl Order {
    /// The ordered unit, or `None` for `Waive`.
    pub fn unit(&self) -> Option<&OrderUnit> {
        match self {
            Order::Hold { unit }
            | Order::Move { unit, .. }
            | Order::SupportHold { unit, .. }
            | Order::SupportMove { unit, .. }
            | Order::ConvoyingFleet { unit, .. }
            | Order::ConvoyedArmy { unit, .. }
            | Order::Retreat { unit, .. }
            | Order::Disband { unit }
            | Order::Build { unit }
            | Order::Remove { unit } => Some(unit),
            Order::Waive => None,
        }
    }

    /// The province of the ordered unit, or `None` for `Waive`.
    pub fn province(&self) -> Option<Province> {
        self.unit().map(|u| u.province())
    }

    /// True if this order kind belongs to the movement phase.
    pub fn is_movement_order(&self) -> bool {
        matches!(
            self,
            Order::Hold { .. }
                | Order::Move { .. }
                | Order::SupportHold { .. }
                | Order::SupportMove { .. }
                | Order::ConvoyingFleet { .. }
                | Order::ConvoyedArmy { .. }
        )
    }

    /// True if this order kind belongs to the retreat phase.
    pub fn is_retreat_order(&self) -> bool {
        matches!(self, Order::Retreat { .. } | Order::Disband { .. })
    }

    /// True if this order kind belongs to the build phase.
    pub fn is_build_order(&self) -> bool {
        matches!(self, Order::Build { .. } | Order::Remove { .. } | Order::Waive)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::Hold { unit } => write!(f, "{} H", unit),
            Order::Move { unit, dest } => write!(f, "{} - {}", unit, dest),
            Order::SupportHold { unit, supported } => write!(f, "{} S {}", unit, supported),
            Order::SupportMove { unit, supported, dest } => {
                write!(f, "{} S {} - {}", unit, supported, dest)
            }
            Order::ConvoyingFleet { unit, army_from, army_to } => {
                write!(f, "{} C A {} - {}", unit, army_from, army_to)
            }
            Order::ConvoyedArmy { unit, dest, path } => {
                write!(f, "{} - {} via", unit, dest)?;
                match path {
                    Some(hops) => {
                        for hop in hops {
                            write!(f, " {}", hop)?;
                        }
                        Ok(())
                    }
                    None => write!(f, " convoy"),
                }
            }
            Order::Retreat { unit, dest } => write!(f, "{} R {}", unit, dest),
            Order::Disband { unit } => write!(f, "{} D", unit),
            Order::Build { unit } => write!(f, "{} B", unit),
            Order::Remove { unit } => write!(f, "{} REM", unit),
            Order::Waive => write!(f, "W"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{Coast, Province};

    fn army(province: Province) -> OrderUnit {
        OrderUnit::new(UnitType::Army, Location::new(province))
    }

    #[test]
    fn phase_kind_partition() {
        let hold = Order::Hold { unit: army(Province::Vie) };
        assert!(hold.is_movement_order());
        assert!(!hold.is_retreat_order());
        assert!(!hold.is_build_order());
        assert!(Order::Waive.is_build_order());
        assert!(Order::Disband { unit: army(Province::Vie) }.is_retreat_order());
    }

    #[test]
    fn waive_has_no_unit() {
        assert!(Order::Waive.unit().is_none());
        assert!(Order::Waive.province().is_none());
    }

    #[test]
    fn display_notation() {
        let unit = army(Province::Lon);
        let order = Order::ConvoyedArmy {
            unit,
            dest: Location::new(Province::Nwy),
            path: Some(vec![Province::Nth]),
        };
        assert_eq!(order.to_string(), "A lon - nwy via nth");

        let fleet = OrderUnit::new(UnitType::Fleet, Location::with_coast(Province::Stp, Coast::South));
        let order = Order::Move { unit: fleet, dest: Location::new(Province::Bot) };
        assert_eq!(order.to_string(), "F stp/sc - bot");
    }
}
