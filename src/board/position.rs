//! The mutable board position.
//!
//! Holds unit occupancy, supply-center ownership, and dislodged-unit records
//! for one game. Fixed-size arrays indexed by `Province as usize` give O(1)
//! lookup. All mutating methods are invoked by the turn controller after
//! resolution has completed; the resolver itself only reads a position.

use std::fmt;

use thiserror::Error;

use crate::map::{Coast, Power, Province, ALL_PROVINCES, PROVINCE_COUNT};
use crate::turn::Turn;

use super::unit::{Unit, UnitType};

/// A province plus an optional coast qualifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
    pub province: Province,
    pub coast: Coast,
}

impl Location {
    pub const fn new(province: Province) -> Self {
        Location { province, coast: Coast::None }
    }

    pub const fn with_coast(province: Province, coast: Coast) -> Self {
        Location { province, coast }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coast == Coast::None {
            write!(f, "{}", self.province)
        } else {
            write!(f, "{}/{}", self.province, self.coast)
        }
    }
}

/// A unit knocked out of its province, awaiting retreat or disbandment.
///
/// The retreat options are computed during movement adjudication: adjacent
/// locations reachable by the unit type, minus occupied provinces, provinces
/// contested by a standoff this turn, and the attacker's origin unless the
/// attacker arrived by convoy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dislodgement {
    pub unit: Unit,
    pub attacker_from: Province,
    pub by_convoy: bool,
    pub retreat_options: Vec<Location>,
}

/// Errors raised when assembling a position by hand.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("{0} is already occupied")]
    Occupied(Province),

    #[error("a {unit_type} cannot occupy {province}")]
    Terrain { unit_type: UnitType, province: Province },

    #[error("a fleet in {0} must name a coast")]
    CoastRequired(Province),

    #[error("{province} has no {coast} coast")]
    NoSuchCoast { province: Province, coast: Coast },
}

/// Complete board state at one point in a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub turn: Turn,
    units: [Option<Unit>; PROVINCE_COUNT],
    sc_owner: [Option<Power>; PROVINCE_COUNT],
    dislodged: [Option<Dislodgement>; PROVINCE_COUNT],
}

impl Position {
    /// An empty board with no units or ownership.
    pub fn empty(turn: Turn) -> Self {
        Position {
            turn,
            units: [None; PROVINCE_COUNT],
            sc_owner: [None; PROVINCE_COUNT],
            dislodged: std::array::from_fn(|_| None),
        }
    }

    /// The Spring 1901 opening position: 22 units, each power owning its
    /// home centers, the 12 neutral centers unowned.
    pub fn standard_opening() -> Self {
        use Province::*;
        let mut pos = Position::empty(Turn::first());
        let setup: [(Province, Unit); 22] = [
            (Vie, Unit::army(Power::Austria)),
            (Bud, Unit::army(Power::Austria)),
            (Tri, Unit::fleet(Power::Austria)),
            (Lon, Unit::fleet(Power::England)),
            (Edi, Unit::fleet(Power::England)),
            (Lvp, Unit::army(Power::England)),
            (Bre, Unit::fleet(Power::France)),
            (Par, Unit::army(Power::France)),
            (Mar, Unit::army(Power::France)),
            (Kie, Unit::fleet(Power::Germany)),
            (Ber, Unit::army(Power::Germany)),
            (Mun, Unit::army(Power::Germany)),
            (Nap, Unit::fleet(Power::Italy)),
            (Rom, Unit::army(Power::Italy)),
            (Ven, Unit::army(Power::Italy)),
            (Stp, Unit::fleet_on(Power::Russia, Coast::South)),
            (Mos, Unit::army(Power::Russia)),
            (War, Unit::army(Power::Russia)),
            (Sev, Unit::fleet(Power::Russia)),
            (Ank, Unit::fleet(Power::Turkey)),
            (Con, Unit::army(Power::Turkey)),
            (Smy, Unit::army(Power::Turkey)),
        ];
        for (province, unit) in setup {
            pos.place(province, unit).unwrap_or_else(|e| {
                panic!("standard opening placement failed: {}", e);
            });
        }
        for province in ALL_PROVINCES {
            if let Some(power) = province.home_power() {
                pos.sc_owner[province as usize] = Some(power);
            }
        }
        pos
    }

    // --- queries ------------------------------------------------------

    pub fn unit_at(&self, province: Province) -> Option<Unit> {
        self.units[province as usize]
    }

    pub fn is_occupied(&self, province: Province) -> bool {
        self.units[province as usize].is_some()
    }

    pub fn owner_of(&self, province: Province) -> Option<Power> {
        self.sc_owner[province as usize]
    }

    pub fn dislodgement_at(&self, province: Province) -> Option<&Dislodgement> {
        self.dislodged[province as usize].as_ref()
    }

    pub fn has_dislodgements(&self) -> bool {
        self.dislodged.iter().any(|d| d.is_some())
    }

    /// All dislodged units, in province order.
    pub fn dislodgements(&self) -> impl Iterator<Item = (Province, &Dislodgement)> {
        self.dislodged
            .iter()
            .enumerate()
            .filter_map(|(i, d)| d.as_ref().map(|d| (ALL_PROVINCES[i], d)))
    }

    /// All units on the board, in province order.
    pub fn units(&self) -> impl Iterator<Item = (Province, Unit)> + '_ {
        self.units
            .iter()
            .enumerate()
            .filter_map(|(i, u)| u.map(|u| (ALL_PROVINCES[i], u)))
    }

    /// A power's units, in province order.
    pub fn units_of(&self, power: Power) -> impl Iterator<Item = (Province, Unit)> + '_ {
        self.units().filter(move |(_, u)| u.power == power)
    }

    pub fn unit_count(&self, power: Power) -> usize {
        self.units_of(power).count()
    }

    /// A power's owned supply centers, in province order.
    pub fn centers_of(&self, power: Power) -> impl Iterator<Item = Province> + '_ {
        ALL_PROVINCES
            .into_iter()
            .filter(move |p| self.sc_owner[*p as usize] == Some(power))
    }

    pub fn center_count(&self, power: Power) -> usize {
        self.centers_of(power).count()
    }

    /// Home centers a power may currently build in: owned and vacant.
    pub fn open_home_centers(&self, power: Power) -> Vec<Province> {
        ALL_PROVINCES
            .into_iter()
            .filter(|p| {
                p.home_power() == Some(power)
                    && self.sc_owner[*p as usize] == Some(power)
                    && self.units[*p as usize].is_none()
            })
            .collect()
    }

    /// A power with no units and no centers is out of the game.
    pub fn is_eliminated(&self, power: Power) -> bool {
        self.unit_count(power) == 0 && self.center_count(power) == 0
    }

    // --- setup --------------------------------------------------------

    /// Places a unit, checking occupancy, terrain, and coast legality.
    pub fn place(&mut self, province: Province, unit: Unit) -> Result<(), SetupError> {
        if self.units[province as usize].is_some() {
            return Err(SetupError::Occupied(province));
        }
        if !unit.unit_type.can_occupy(province.category()) {
            return Err(SetupError::Terrain { unit_type: unit.unit_type, province });
        }
        match unit.unit_type {
            UnitType::Fleet if province.has_coasts() => {
                if unit.coast == Coast::None {
                    return Err(SetupError::CoastRequired(province));
                }
                if !province.coasts().contains(&unit.coast) {
                    return Err(SetupError::NoSuchCoast { province, coast: unit.coast });
                }
            }
            _ => {
                if unit.coast != Coast::None {
                    return Err(SetupError::NoSuchCoast { province, coast: unit.coast });
                }
            }
        }
        self.units[province as usize] = Some(unit);
        Ok(())
    }

    pub fn set_owner(&mut self, province: Province, owner: Option<Power>) {
        self.sc_owner[province as usize] = owner;
    }

    // --- mutations applied after resolution ---------------------------

    /// Moves the unit in `from` to `to`, updating its coast.
    ///
    /// Panics if `from` is empty or `to` is occupied: resolution guarantees
    /// both, so a violation means the adjudication itself is wrong.
    pub fn apply_move(&mut self, from: Province, to: Province, to_coast: Coast) {
        let mut unit = self.units[from as usize]
            .take()
            .unwrap_or_else(|| panic!("apply_move: no unit in {}", from));
        if self.units[to as usize].is_some() {
            panic!("apply_move: {} already occupied", to);
        }
        unit.coast = to_coast;
        self.units[to as usize] = Some(unit);
    }

    /// Applies a whole turn's successful moves at once. Units leave their
    /// sources before anyone arrives, so rotations and convoyed swaps do
    /// not trip over each other.
    pub fn apply_moves(&mut self, moves: &[(Province, Location)]) {
        let mut in_flight = Vec::with_capacity(moves.len());
        for (from, dest) in moves {
            let unit = self.units[*from as usize]
                .take()
                .unwrap_or_else(|| panic!("apply_moves: no unit in {}", from));
            in_flight.push((unit, *dest));
        }
        for (mut unit, dest) in in_flight {
            if self.units[dest.province as usize].is_some() {
                panic!("apply_moves: {} already occupied", dest.province);
            }
            unit.coast = dest.coast;
            self.units[dest.province as usize] = Some(unit);
        }
    }

    /// Removes a defeated unit from the board and records its dislodgement.
    pub fn dislodge(&mut self, province: Province, record: Dislodgement) {
        if self.units[province as usize].take().is_none() {
            panic!("dislodge: no unit in {}", province);
        }
        self.dislodged[province as usize] = Some(record);
    }

    /// Returns a dislodged unit to the board at its retreat destination.
    pub fn retreat(&mut self, from: Province, dest: Location) {
        let record = self.dislodged[from as usize]
            .take()
            .unwrap_or_else(|| panic!("retreat: no dislodged unit in {}", from));
        if self.units[dest.province as usize].is_some() {
            panic!("retreat: {} already occupied", dest.province);
        }
        let mut unit = record.unit;
        unit.coast = dest.coast;
        self.units[dest.province as usize] = Some(unit);
    }

    /// Disbands a dislodged unit (retreat phase).
    pub fn disband(&mut self, province: Province) {
        if self.dislodged[province as usize].take().is_none() {
            panic!("disband: no dislodged unit in {}", province);
        }
    }

    /// Removes a standing unit (build phase).
    pub fn remove(&mut self, province: Province) {
        if self.units[province as usize].take().is_none() {
            panic!("remove: no unit in {}", province);
        }
    }

    /// Builds a new unit in an owned, vacant home center.
    pub fn build(&mut self, province: Province, unit: Unit) -> Result<(), SetupError> {
        self.place(province, unit)
    }

    pub fn transfer_ownership(&mut self, province: Province, power: Power) {
        self.sc_owner[province as usize] = Some(power);
    }

    /// Captures supply centers: each occupied SC passes to the occupant's
    /// power. Called after Fall movement or Fall retreats; unoccupied
    /// centers keep their owner.
    pub fn capture_centers(&mut self) {
        for province in ALL_PROVINCES {
            if !province.is_supply_center() {
                continue;
            }
            if let Some(unit) = self.units[province as usize] {
                self.sc_owner[province as usize] = Some(unit.power);
            }
        }
    }

    pub fn clear_dislodged(&mut self) {
        for slot in self.dislodged.iter_mut() {
            *slot = None;
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::{Phase, Season};

    fn spring_1901() -> Turn {
        Turn { year: 1901, season: Season::Spring, phase: Phase::Movement }
    }

    #[test]
    fn empty_has_no_units() {
        let pos = Position::empty(spring_1901());
        assert!(pos.units().next().is_none());
        assert!(!pos.has_dislodgements());
    }

    #[test]
    fn standard_opening_counts() {
        let pos = Position::standard_opening();
        assert_eq!(pos.units().count(), 22);
        assert_eq!(pos.unit_count(Power::Russia), 4);
        assert_eq!(pos.unit_count(Power::Austria), 3);
        assert_eq!(pos.center_count(Power::Russia), 4);
        assert_eq!(pos.center_count(Power::England), 3);
        let neutral_owned: usize = ALL_PROVINCES
            .iter()
            .filter(|p| p.is_supply_center() && pos.owner_of(**p).is_some())
            .count();
        assert_eq!(neutral_owned, 22);
    }

    #[test]
    fn place_rejects_double_occupancy() {
        let mut pos = Position::empty(spring_1901());
        pos.place(Province::Vie, Unit::army(Power::Austria)).unwrap();
        assert_eq!(
            pos.place(Province::Vie, Unit::army(Power::Italy)),
            Err(SetupError::Occupied(Province::Vie))
        );
    }

    #[test]
    fn place_rejects_terrain_mismatch() {
        let mut pos = Position::empty(spring_1901());
        assert!(matches!(
            pos.place(Province::Nth, Unit::army(Power::England)),
            Err(SetupError::Terrain { .. })
        ));
        assert!(matches!(
            pos.place(Province::Boh, Unit::fleet(Power::Austria)),
            Err(SetupError::Terrain { .. })
        ));
    }

    #[test]
    fn fleet_on_split_coast_needs_coast() {
        let mut pos = Position::empty(spring_1901());
        assert_eq!(
            pos.place(Province::Stp, Unit::fleet(Power::Russia)),
            Err(SetupError::CoastRequired(Province::Stp))
        );
        assert!(pos.place(Province::Stp, Unit::fleet_on(Power::Russia, Coast::South)).is_ok());
    }

    #[test]
    fn apply_move_updates_occupancy() {
        let mut pos = Position::empty(spring_1901());
        pos.place(Province::Vie, Unit::army(Power::Austria)).unwrap();
        pos.apply_move(Province::Vie, Province::Bud, Coast::None);
        assert!(pos.unit_at(Province::Vie).is_none());
        assert_eq!(pos.unit_at(Province::Bud), Some(Unit::army(Power::Austria)));
    }

    #[test]
    fn dislodge_and_retreat_roundtrip() {
        let mut pos = Position::empty(spring_1901());
        pos.place(Province::Ser, Unit::army(Power::Austria)).unwrap();
        pos.dislodge(
            Province::Ser,
            Dislodgement {
                unit: Unit::army(Power::Austria),
                attacker_from: Province::Bul,
                by_convoy: false,
                retreat_options: vec![Location::new(Province::Alb)],
            },
        );
        assert!(pos.unit_at(Province::Ser).is_none());
        assert!(pos.dislodgement_at(Province::Ser).is_some());

        pos.retreat(Province::Ser, Location::new(Province::Alb));
        assert_eq!(pos.unit_at(Province::Alb), Some(Unit::army(Power::Austria)));
        assert!(pos.dislodgement_at(Province::Ser).is_none());
    }

    #[test]
    fn capture_centers_transfers_occupied_only() {
        let mut pos = Position::empty(spring_1901());
        pos.place(Province::Bul, Unit::army(Power::Turkey)).unwrap();
        pos.set_owner(Province::Vie, Some(Power::Austria));
        pos.capture_centers();
        assert_eq!(pos.owner_of(Province::Bul), Some(Power::Turkey));
        assert_eq!(pos.owner_of(Province::Vie), Some(Power::Austria));
    }

    #[test]
    fn elimination_needs_no_units_and_no_centers() {
        let mut pos = Position::empty(spring_1901());
        assert!(pos.is_eliminated(Power::Italy));
        pos.set_owner(Province::Rom, Some(Power::Italy));
        assert!(!pos.is_eliminated(Power::Italy));
    }

    #[test]
    fn open_home_centers_requires_ownership_and_vacancy() {
        let mut pos = Position::standard_opening();
        // All home centers are occupied at the start.
        assert!(pos.open_home_centers(Power::France).is_empty());
        pos.remove(Province::Par);
        assert_eq!(pos.open_home_centers(Power::France), vec![Province::Par]);
    }
}
