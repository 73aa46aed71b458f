//! Build-phase adjudication.
//!
//! Once per year each power's unit count is squared with its center count:
//! a deficit grants builds in owned, vacant home centers (unused builds are
//! waived), a surplus demands removals, and a power that fails to remove
//! enough loses its units furthest from home.

use crate::board::{Location, Position, Unit};
use crate::config::RuleOptions;
use crate::map::{
    army_borders, fleet_borders, Power, Province, ALL_POWERS, ALL_PROVINCES, PROVINCE_COUNT,
};
use crate::order::{validate, Order, OrderNote, OrderUnit};
use crate::report::{OrderReport, Outcome};

/// Everything the build resolver decides, before any board mutation.
#[derive(Debug, Clone)]
pub struct BuildVerdict {
    /// Reports for submitted orders, plus synthesized removals forced by
    /// civil disorder.
    pub reports: Vec<OrderReport>,
    pub builds: Vec<(Province, Unit)>,
    pub removals: Vec<Province>,
}

/// Resolves one build phase for all powers.
pub fn resolve_builds(
    position: &Position,
    orders: &[(Order, Power)],
    options: &RuleOptions,
) -> BuildVerdict {
    let mut reports = Vec::with_capacity(orders.len());
    let mut builds: Vec<(Province, Unit)> = Vec::new();
    let mut removals: Vec<Province> = Vec::new();

    for &power in &ALL_POWERS {
        let centers = position.center_count(power);
        let units = position.unit_count(power);
        let allowed_builds = centers.saturating_sub(units);
        let needed_removals = units.saturating_sub(centers);

        let mut built = 0usize;
        let mut removed = 0usize;

        for (order, order_power) in orders {
            if *order_power != power {
                continue;
            }
            match order {
                Order::Build { unit } => {
                    let province = unit.province();
                    let already_built = builds.iter().any(|(p, _)| *p == province);
                    let note = if built >= allowed_builds {
                        OrderNote::Nmb
                    } else if already_built {
                        OrderNote::Esc
                    } else {
                        validate(order, position, power, options)
                    };
                    if note.accepted() {
                        built += 1;
                        builds.push((
                            province,
                            Unit { unit_type: unit.unit_type, power, coast: unit.location.coast },
                        ));
                        reports.push(report(order, power, OrderNote::Mbv, Outcome::Success));
                    } else {
                        reports.push(report(order, power, note, Outcome::Void));
                    }
                }
                Order::Waive => {
                    if built >= allowed_builds {
                        reports.push(report(order, power, OrderNote::Nmb, Outcome::Void));
                    } else {
                        built += 1;
                        reports.push(report(order, power, OrderNote::Mbv, Outcome::Success));
                    }
                }
                Order::Remove { unit } => {
                    let province = unit.province();
                    let present = matches!(
                        position.unit_at(province),
                        Some(u) if u.power == power && u.unit_type == unit.unit_type
                    );
                    let note = if removed >= needed_removals {
                        OrderNote::Nmr
                    } else if removals.contains(&province) || !present {
                        // Already gone, or an any-orders phantom: nothing to
                        // take off the board.
                        OrderNote::Nsu
                    } else {
                        validate(order, position, power, options)
                    };
                    if note.accepted() {
                        removed += 1;
                        removals.push(province);
                        reports.push(report(order, power, OrderNote::Mbv, Outcome::Success));
                    } else {
                        reports.push(report(order, power, note, Outcome::Void));
                    }
                }
                _ => reports.push(report(order, power, OrderNote::Nrs, Outcome::Void)),
            }
        }

        // Civil disorder: the units furthest from home go first.
        if removed < needed_removals {
            for (province, unit) in forced_removals(position, power, needed_removals - removed, &removals) {
                removals.push(province);
                reports.push(report(
                    &Order::Remove {
                        unit: OrderUnit::new(
                            unit.unit_type,
                            Location::with_coast(province, unit.coast),
                        ),
                    },
                    power,
                    OrderNote::Mbv,
                    Outcome::Success,
                ));
            }
        }
        // A deficit the power did not fill is an implicit waive.
    }

    BuildVerdict { reports, builds, removals }
}

fn report(order: &Order, power: Power, note: OrderNote, outcome: Outcome) -> OrderReport {
    OrderReport {
        order: order.clone(),
        power,
        note,
        outcome,
        dislodged: false,
        convoy_route: None,
    }
}

/// Picks `count` of the power's units to remove: furthest from any home
/// center first, ties broken by higher province index.
fn forced_removals(
    position: &Position,
    power: Power,
    count: usize,
    already: &[Province],
) -> Vec<(Province, Unit)> {
    let mut candidates: Vec<(Province, Unit, u32)> = position
        .units_of(power)
        .filter(|(p, _)| !already.contains(p))
        .map(|(p, u)| (p, u, distance_to_home(p, power)))
        .collect();
    candidates.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| (b.0 as u8).cmp(&(a.0 as u8))));
    candidates.into_iter().take(count).map(|(p, u, _)| (p, u)).collect()
}

/// Minimum hops from a province to any home center of the power, over the
/// union of army and fleet borders (how the unit would get home is not the
/// question; roughly how far away it is, is).
fn distance_to_home(from: Province, power: Power) -> u32 {
    let mut is_home = [false; PROVINCE_COUNT];
    for province in ALL_PROVINCES {
        if province.home_power() == Some(power) {
            is_home[province as usize] = true;
        }
    }
    if is_home[from as usize] {
        return 0;
    }

    let mut visited = [false; PROVINCE_COUNT];
    visited[from as usize] = true;
    let mut queue = vec![from];
    let mut dist = 0;
    while !queue.is_empty() {
        dist += 1;
        let mut next = Vec::new();
        for &province in &queue {
            let fleet_neighbors = fleet_borders(province).iter().map(|e| e.to);
            for to in army_borders(province).iter().copied().chain(fleet_neighbors) {
                if visited[to as usize] {
                    continue;
                }
                if is_home[to as usize] {
                    return dist;
                }
                visited[to as usize] = true;
                next.push(to);
            }
        }
        queue = next;
    }
    u32::MAX
}
