//! Retreat-phase adjudication.
//!
//! Only dislodged units act. Retreats to the same province collide and all
//! colliding units disband; a dislodged unit with no standing order
//! disbands at the end of the phase.

use crate::board::{Location, Position};
use crate::map::{Power, Province, PROVINCE_COUNT};
use crate::order::{Order, OrderNote, OrderUnit};
use crate::report::{OrderReport, Outcome};

/// Everything the retreat resolver decides, before any board mutation.
#[derive(Debug, Clone)]
pub struct RetreatVerdict {
    /// Reports for submitted orders, plus synthesized disbands for
    /// dislodged units that were never ordered.
    pub reports: Vec<OrderReport>,
    /// Successful retreats: dislodged province and destination.
    pub retreats: Vec<(Province, Location)>,
    /// Dislodged provinces whose unit disbands.
    pub disbands: Vec<Province>,
}

/// Resolves one retreat phase. Orders must already be validated.
pub fn resolve_retreats(position: &Position, orders: &[(Order, Power)]) -> RetreatVerdict {
    // Who is retreating where; colliding destinations fail everyone.
    let mut target_count = [0u8; PROVINCE_COUNT];
    for (order, power) in orders {
        if let Order::Retreat { unit, dest } = order {
            if retreat_stands(position, unit, dest, *power) {
                target_count[dest.province as usize] += 1;
            }
        }
    }

    let mut reports = Vec::with_capacity(orders.len());
    let mut retreats = Vec::new();
    let mut disbands = Vec::new();
    let mut ordered = [false; PROVINCE_COUNT];

    for (order, power) in orders {
        match order {
            Order::Retreat { unit, dest } => {
                let province = unit.province();
                if !retreat_stands(position, unit, dest, *power) {
                    reports.push(void(order.clone(), *power));
                    continue;
                }
                ordered[province as usize] = true;
                if target_count[dest.province as usize] > 1 {
                    disbands.push(province);
                    reports.push(OrderReport {
                        order: order.clone(),
                        power: *power,
                        note: OrderNote::Mbv,
                        outcome: Outcome::NoRetreat,
                        dislodged: true,
                        convoy_route: None,
                    });
                } else {
                    retreats.push((province, *dest));
                    reports.push(OrderReport {
                        order: order.clone(),
                        power: *power,
                        note: OrderNote::Mbv,
                        outcome: Outcome::Retreated,
                        dislodged: true,
                        convoy_route: None,
                    });
                }
            }
            Order::Disband { unit } => {
                let province = unit.province();
                let valid = matches!(
                    position.dislodgement_at(province),
                    Some(d) if d.unit.power == *power && d.unit.unit_type == unit.unit_type
                );
                if !valid {
                    reports.push(void(order.clone(), *power));
                    continue;
                }
                ordered[province as usize] = true;
                disbands.push(province);
                reports.push(OrderReport {
                    order: order.clone(),
                    power: *power,
                    note: OrderNote::Mbv,
                    outcome: Outcome::Success,
                    dislodged: true,
                    convoy_route: None,
                });
            }
            _ => reports.push(void(order.clone(), *power)),
        }
    }

    // Unordered dislodged units disband rather than hold in limbo.
    for (province, d) in position.dislodgements() {
        if ordered[province as usize] {
            continue;
        }
        disbands.push(province);
        reports.push(OrderReport {
            order: Order::Disband {
                unit: OrderUnit::new(
                    d.unit.unit_type,
                    Location::with_coast(province, d.unit.coast),
                ),
            },
            power: d.unit.power,
            note: OrderNote::Mbv,
            outcome: Outcome::Success,
            dislodged: true,
            convoy_route: None,
        });
    }

    RetreatVerdict { reports, retreats, disbands }
}

/// True if the retreat order addresses a real dislodgement and a legal
/// destination. Validation already answered this for submitted orders; the
/// resolver rechecks so it never moves a unit somewhere illegal.
fn retreat_stands(position: &Position, unit: &OrderUnit, dest: &Location, power: Power) -> bool {
    match position.dislodgement_at(unit.province()) {
        Some(d) => {
            d.unit.power == power
                && d.unit.unit_type == unit.unit_type
                && d.retreat_options.contains(dest)
        }
        None => false,
    }
}

fn void(order: Order, power: Power) -> OrderReport {
    OrderReport {
        order,
        power,
        note: OrderNote::Mbv,
        outcome: Outcome::Void,
        dislodged: false,
        convoy_route: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Dislodgement, Position, Unit, UnitType};
    use crate::map::Coast;
    use crate::turn::{Phase, Season, Turn};

    fn retreat_position() -> Position {
        Position::empty(Turn { year: 1901, season: Season::Spring, phase: Phase::Retreat })
    }

    fn dislodge_army(pos: &mut Position, province: Province, power: Power, from: Province, options: Vec<Location>) {
        pos.place(province, Unit::army(power)).unwrap();
        pos.dislodge(
            province,
            Dislodgement {
                unit: Unit::army(power),
                attacker_from: from,
                by_convoy: false,
                retreat_options: options,
            },
        );
    }

    fn army(province: Province) -> OrderUnit {
        OrderUnit::new(UnitType::Army, Location::new(province))
    }

    #[test]
    fn legal_retreat_succeeds() {
        let mut pos = retreat_position();
        dislodge_army(&mut pos, Province::Ser, Power::Austria, Province::Bul,
            vec![Location::new(Province::Alb)]);
        let orders = vec![(
            Order::Retreat { unit: army(Province::Ser), dest: Location::new(Province::Alb) },
            Power::Austria,
        )];
        let v = resolve_retreats(&pos, &orders);
        assert_eq!(v.reports[0].outcome, Outcome::Retreated);
        assert_eq!(v.retreats, vec![(Province::Ser, Location::new(Province::Alb))]);
        assert!(v.disbands.is_empty());
    }

    #[test]
    fn colliding_retreats_both_disband() {
        let mut pos = retreat_position();
        dislodge_army(&mut pos, Province::Ser, Power::Austria, Province::Bul,
            vec![Location::new(Province::Alb)]);
        dislodge_army(&mut pos, Province::Gre, Power::Italy, Province::Ion,
            vec![Location::new(Province::Alb)]);
        let orders = vec![
            (
                Order::Retreat { unit: army(Province::Ser), dest: Location::new(Province::Alb) },
                Power::Austria,
            ),
            (
                Order::Retreat { unit: army(Province::Gre), dest: Location::new(Province::Alb) },
                Power::Italy,
            ),
        ];
        let v = resolve_retreats(&pos, &orders);
        assert!(v.reports.iter().all(|r| r.outcome == Outcome::NoRetreat));
        assert!(v.retreats.is_empty());
        assert_eq!(v.disbands.len(), 2);
    }

    #[test]
    fn unordered_dislodged_unit_disbands() {
        let mut pos = retreat_position();
        dislodge_army(&mut pos, Province::Vie, Power::Austria, Province::Boh,
            vec![Location::new(Province::Tyr)]);
        let v = resolve_retreats(&pos, &[]);
        assert_eq!(v.reports.len(), 1);
        assert!(matches!(v.reports[0].order, Order::Disband { .. }));
        assert_eq!(v.reports[0].power, Power::Austria);
        assert_eq!(v.disbands, vec![Province::Vie]);
    }

    #[test]
    fn illegal_destination_is_void() {
        let mut pos = retreat_position();
        dislodge_army(&mut pos, Province::Ser, Power::Austria, Province::Bul,
            vec![Location::new(Province::Alb)]);
        let orders = vec![(
            Order::Retreat { unit: army(Province::Ser), dest: Location::new(Province::Bul) },
            Power::Austria,
        )];
        let v = resolve_retreats(&pos, &orders);
        assert_eq!(v.reports[0].outcome, Outcome::Void);
        // The unit still disbands, as if unordered.
        assert_eq!(v.disbands, vec![Province::Ser]);
    }

    #[test]
    fn fleet_retreats_onto_named_coast() {
        let mut pos = retreat_position();
        pos.place(Province::Aeg, Unit::fleet(Power::Turkey)).unwrap();
        pos.dislodge(
            Province::Aeg,
            Dislodgement {
                unit: Unit::fleet(Power::Turkey),
                attacker_from: Province::Ion,
                by_convoy: false,
                retreat_options: vec![Location::with_coast(Province::Bul, Coast::South)],
            },
        );
        let orders = vec![(
            Order::Retreat {
                unit: OrderUnit::new(UnitType::Fleet, Location::new(Province::Aeg)),
                dest: Location::with_coast(Province::Bul, Coast::South),
            },
            Power::Turkey,
        )];
        let v = resolve_retreats(&pos, &orders);
        assert_eq!(v.reports[0].outcome, Outcome::Retreated);
        assert_eq!(v.retreats[0].1, Location::with_coast(Province::Bul, Coast::South));
    }
}
