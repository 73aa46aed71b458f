//! Units: armies and fleets.

use std::fmt;

use crate::map::{Category, Coast, Power};

/// The type of a military unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitType {
    Army,
    Fleet,
}

impl UnitType {
    /// Uppercase letter used in order notation.
    pub const fn letter(self) -> char {
        match self {
            UnitType::Army => 'A',
            UnitType::Fleet => 'F',
        }
    }

    /// True if this unit type may occupy a province of the given category.
    pub const fn can_occupy(self, category: Category) -> bool {
        match self {
            UnitType::Army => matches!(category, Category::Inland | Category::Coastal),
            UnitType::Fleet => matches!(category, Category::Sea | Category::Coastal),
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A unit on the board. Its province is implied by where it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Unit {
    pub unit_type: UnitType,
    pub power: Power,
    pub coast: Coast,
}

impl Unit {
    pub const fn army(power: Power) -> Unit {
        Unit { unit_type: UnitType::Army, power, coast: Coast::None }
    }

    pub const fn fleet(power: Power) -> Unit {
        Unit { unit_type: UnitType::Fleet, power, coast: Coast::None }
    }

    pub const fn fleet_on(power: Power, coast: Coast) -> Unit {
        Unit { unit_type: UnitType::Fleet, power, coast }
    }
}
