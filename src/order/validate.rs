//! Per-order validation and coast normalization.
//!
//! Validation inspects one order against the board alone: adjacency,
//! ownership, coast legality, unit existence, phase fit. It never looks at
//! the other orders in the set, so a note is stable from the moment of
//! submission. Cross-order questions (does the support match a real move,
//! does the convoy chain hold) belong to the resolver.

use crate::board::{Location, Position, UnitType};
use crate::config::{MissingCoast, RuleOptions};
use crate::map::{
    army_reaches, fleet_coasts_to, fleet_reaches, sea_touches, Category, Coast, Power,
};
use crate::turn::Phase;

use super::note::OrderNote;
use super::{Order, OrderUnit};

/// Fills in coasts left implicit by the order where the rules allow it.
///
/// A fleet moving or retreating to a split-coast province without naming a
/// coast gets the unique reachable coast under `MissingCoast::InferUnique`.
/// Everything else passes through unchanged; validation decides whether an
/// unfilled coast is an error.
pub fn normalize(order: Order, position: &Position, options: &RuleOptions) -> Order {
    if options.missing_coast != MissingCoast::InferUnique {
        return order;
    }
    match order {
        Order::Move { unit, dest }
            if unit.unit_type == UnitType::Fleet
                && dest.province.has_coasts()
                && dest.coast == Coast::None =>
        {
            let src_coast = actual_coast(position, &unit);
            let coasts = fleet_coasts_to(unit.province(), src_coast, dest.province);
            match coasts.as_slice() {
                [only] => Order::Move {
                    unit,
                    dest: Location::with_coast(dest.province, *only),
                },
                _ => Order::Move { unit, dest },
            }
        }
        Order::Retreat { unit, dest }
            if unit.unit_type == UnitType::Fleet
                && dest.province.has_coasts()
                && dest.coast == Coast::None =>
        {
            let coasts: Vec<Coast> = position
                .dislodgement_at(unit.province())
                .map(|d| {
                    d.retreat_options
                        .iter()
                        .filter(|l| l.province == dest.province)
                        .map(|l| l.coast)
                        .collect()
                })
                .unwrap_or_default();
            match coasts.as_slice() {
                [only] => Order::Retreat {
                    unit,
                    dest: Location::with_coast(dest.province, *only),
                },
                _ => Order::Retreat { unit, dest },
            }
        }
        other => other,
    }
}

/// Judges one order, returning `Mbv` or the reason it is rejected.
pub fn validate(
    order: &Order,
    position: &Position,
    power: Power,
    options: &RuleOptions,
) -> OrderNote {
    let phase_ok = match position.turn.phase {
        Phase::Movement => order.is_movement_order(),
        Phase::Retreat => order.is_retreat_order(),
        Phase::Build => order.is_build_order(),
    };
    if !phase_ok {
        return OrderNote::Nrs;
    }

    match order {
        Order::Hold { unit } => unit_note(position, unit, power, options),

        Order::Move { unit, dest } => {
            let note = unit_note(position, unit, power, options);
            if !note.accepted() {
                return note;
            }
            validate_move_target(position, unit, *dest, options)
        }

        Order::SupportHold { unit, supported } => {
            let note = unit_note(position, unit, power, options);
            if !note.accepted() {
                return note;
            }
            if supported.province() == unit.province() {
                return OrderNote::Far;
            }
            if let Some(n) = presence_note(position, supported, options) {
                return n;
            }
            if !reaches(position, unit, supported.province()) {
                return OrderNote::Far;
            }
            OrderNote::Mbv
        }

        Order::SupportMove { unit, supported, dest } => {
            let note = unit_note(position, unit, power, options);
            if !note.accepted() {
                return note;
            }
            if supported.province() == unit.province() {
                return OrderNote::Far;
            }
            if let Some(n) = presence_note(position, supported, options) {
                return n;
            }
            // Support names the destination province; coasts are irrelevant.
            if !reaches(position, unit, dest.province) {
                return OrderNote::Far;
            }
            if !supported_can_reach(position, supported, dest.province) {
                return OrderNote::Far;
            }
            OrderNote::Mbv
        }

        Order::ConvoyingFleet { unit, army_from, army_to } => {
            let note = unit_note(position, unit, power, options);
            if !note.accepted() {
                return note;
            }
            if unit.province().category() != Category::Sea {
                return OrderNote::Nas;
            }
            let army_present = matches!(
                position.unit_at(army_from.province),
                Some(u) if u.unit_type == UnitType::Army
            );
            if !army_present && !options.any_orders {
                return OrderNote::Nsa;
            }
            if army_to.province.category() != Category::Coastal {
                return OrderNote::Far;
            }
            OrderNote::Mbv
        }

        Order::ConvoyedArmy { unit, dest, path } => {
            let note = unit_note(position, unit, power, options);
            if !note.accepted() {
                return note;
            }
            if unit.province().category() != Category::Coastal
                || dest.province.category() != Category::Coastal
                || dest.province == unit.province()
            {
                return OrderNote::Far;
            }
            if dest.coast != Coast::None {
                return OrderNote::Cst;
            }
            if let Some(hops) = path {
                if hops.is_empty() {
                    return OrderNote::Far;
                }
                for hop in hops {
                    if hop.category() != Category::Sea {
                        return OrderNote::Nsf;
                    }
                    let fleet_present = matches!(
                        position.unit_at(*hop),
                        Some(u) if u.unit_type == UnitType::Fleet
                    );
                    if !fleet_present && !options.any_orders {
                        return OrderNote::Nsf;
                    }
                }
                let chained = sea_touches(hops[0], unit.province())
                    && hops.windows(2).all(|w| sea_touches(w[0], w[1]))
                    && sea_touches(hops[hops.len() - 1], dest.province);
                if !chained {
                    return OrderNote::Far;
                }
            }
            OrderNote::Mbv
        }

        Order::Retreat { unit, dest } => {
            let Some(d) = position.dislodgement_at(unit.province()) else {
                return if position.unit_at(unit.province()).is_some() {
                    OrderNote::Nrn
                } else {
                    OrderNote::Nsu
                };
            };
            if d.unit.power != power {
                return OrderNote::Nyu;
            }
            if d.unit.unit_type != unit.unit_type {
                return OrderNote::Nsu;
            }
            let matching: Vec<&Location> = d
                .retreat_options
                .iter()
                .filter(|l| l.province == dest.province)
                .collect();
            match (dest.coast, matching.as_slice()) {
                (_, []) => OrderNote::Nvr,
                (Coast::None, [_]) => OrderNote::Mbv,
                (Coast::None, _) => OrderNote::Cst,
                (c, opts) => {
                    if opts.iter().any(|l| l.coast == c) {
                        OrderNote::Mbv
                    } else {
                        OrderNote::Nvr
                    }
                }
            }
        }

        Order::Disband { unit } => {
            let Some(d) = position.dislodgement_at(unit.province()) else {
                return if position.unit_at(unit.province()).is_some() {
                    OrderNote::Nrn
                } else {
                    OrderNote::Nsu
                };
            };
            if d.unit.power != power {
                return OrderNote::Nyu;
            }
            if d.unit.unit_type != unit.unit_type {
                return OrderNote::Nsu;
            }
            OrderNote::Mbv
        }

        Order::Build { unit } => {
            let province = unit.province();
            if !province.is_supply_center() {
                return OrderNote::Nsc;
            }
            if province.home_power() != Some(power) {
                return OrderNote::Hsc;
            }
            if position.owner_of(province) != Some(power) {
                return OrderNote::Ysc;
            }
            if position.is_occupied(province) {
                return OrderNote::Esc;
            }
            match unit.unit_type {
                UnitType::Army => {
                    if unit.location.coast != Coast::None {
                        return OrderNote::Cst;
                    }
                }
                UnitType::Fleet => {
                    if province.category() == Category::Inland {
                        return OrderNote::Cst;
                    }
                    if province.has_coasts() {
                        if !province.coasts().contains(&unit.location.coast) {
                            return OrderNote::Cst;
                        }
                    } else if unit.location.coast != Coast::None {
                        return OrderNote::Cst;
                    }
                }
            }
            OrderNote::Mbv
        }

        Order::Remove { unit } => unit_note(position, unit, power, options),

        Order::Waive => OrderNote::Mbv,
    }
}

/// Checks that the ordered unit exists as described and belongs to the
/// submitting power. Under the any-orders flag these checks are waived.
fn unit_note(
    position: &Position,
    ordered: &OrderUnit,
    power: Power,
    options: &RuleOptions,
) -> OrderNote {
    if options.any_orders {
        return OrderNote::Mbv;
    }
    match position.unit_at(ordered.province()) {
        None => OrderNote::Nsu,
        Some(u) if u.unit_type != ordered.unit_type => OrderNote::Nsu,
        Some(u) if u.power != power => OrderNote::Nyu,
        Some(_) => OrderNote::Mbv,
    }
}

/// Checks that a referenced (supported) unit exists as described; ownership
/// is irrelevant since any power's unit may be supported.
fn presence_note(
    position: &Position,
    referenced: &OrderUnit,
    options: &RuleOptions,
) -> Option<OrderNote> {
    if options.any_orders {
        return None;
    }
    match position.unit_at(referenced.province()) {
        Some(u) if u.unit_type == referenced.unit_type => None,
        _ => Some(OrderNote::Nsu),
    }
}

/// The coast the ordered unit actually occupies, falling back to the coast
/// written in the order when the unit is absent (any-orders games).
fn actual_coast(position: &Position, ordered: &OrderUnit) -> Coast {
    position
        .unit_at(ordered.province())
        .map(|u| u.coast)
        .unwrap_or(ordered.location.coast)
}

/// True if the ordered unit can reach the province by its own movement,
/// ignoring destination coasts.
fn reaches(position: &Position, ordered: &OrderUnit, to: crate::map::Province) -> bool {
    match ordered.unit_type {
        UnitType::Army => army_reaches(ordered.province(), to),
        UnitType::Fleet => {
            fleet_reaches(ordered.province(), actual_coast(position, ordered), to, Coast::None)
        }
    }
}

/// True if the supported unit could arrive at the destination: directly for
/// fleets, directly or by some convoy for armies.
fn supported_can_reach(
    position: &Position,
    supported: &OrderUnit,
    dest: crate::map::Province,
) -> bool {
    match supported.unit_type {
        UnitType::Fleet => reaches(position, supported, dest),
        UnitType::Army => {
            army_reaches(supported.province(), dest)
                || (supported.province().category() == Category::Coastal
                    && dest.category() == Category::Coastal)
        }
    }
}

/// Validates the destination of a direct move.
fn validate_move_target(
    position: &Position,
    unit: &OrderUnit,
    dest: Location,
    options: &RuleOptions,
) -> OrderNote {
    match unit.unit_type {
        UnitType::Army => {
            if dest.coast != Coast::None {
                return OrderNote::Cst;
            }
            if !army_reaches(unit.province(), dest.province) {
                return OrderNote::Far;
            }
            OrderNote::Mbv
        }
        UnitType::Fleet => {
            let src_coast = actual_coast(position, unit);
            if dest.province.has_coasts() {
                match dest.coast {
                    Coast::None => {
                        let coasts = fleet_coasts_to(unit.province(), src_coast, dest.province);
                        match (options.missing_coast, coasts.len()) {
                            (_, 0) => OrderNote::Far,
                            (MissingCoast::InferUnique, 1) => OrderNote::Mbv,
                            _ => OrderNote::Cst,
                        }
                    }
                    coast => {
                        if !dest.province.coasts().contains(&coast) {
                            return OrderNote::Cst;
                        }
                        if !fleet_reaches(unit.province(), src_coast, dest.province, coast) {
                            return OrderNote::Far;
                        }
                        OrderNote::Mbv
                    }
                }
            } else {
                if dest.coast != Coast::None {
                    return OrderNote::Cst;
                }
                if !fleet_reaches(unit.province(), src_coast, dest.province, Coast::None) {
                    return OrderNote::Far;
                }
                OrderNote::Mbv
            }
        }
    }
}
