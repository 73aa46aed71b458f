//! The turn controller: standing orders, resolution, and game end.
//!
//! The controller owns the authoritative position and the standing-order
//! stacks. Clients submit and retract orders freely until the surrounding
//! server decides the deadline has passed and calls [`TurnController::resolve`];
//! the active set at that moment is the top of each unit's stack, with
//! phase defaults filling every gap. Resolution is pure and synchronous --
//! callers are responsible for snapshotting under their own lock.

use std::collections::HashMap;

use crate::board::Position;
use crate::config::RuleOptions;
use crate::judge::{resolve_builds, resolve_movement, resolve_retreats};
use crate::map::{Power, Province, ALL_POWERS};
use crate::order::{normalize, validate, Order, OrderNote};
use crate::report::{AdjudicationReport, RetreatRequirement};
use crate::turn::{Phase, Season};

/// How a finished game ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    Solo(Power),
    Draw(Vec<Power>),
}

/// Drives one game from opening to solo victory or draw.
pub struct TurnController {
    position: Position,
    options: RuleOptions,
    /// Submission history per ordered unit. The most recent standing order
    /// is active; retracting it reinstates the one beneath.
    unit_orders: HashMap<Province, Vec<(Order, Power)>>,
    /// Build-phase orders per power, in submission order.
    adjustment_orders: HashMap<Power, Vec<Order>>,
    result: Option<GameResult>,
}

impl TurnController {
    pub fn new(position: Position, options: RuleOptions) -> Self {
        TurnController {
            position,
            options,
            unit_orders: HashMap::new(),
            adjustment_orders: HashMap::new(),
            result: None,
        }
    }

    /// A fresh game from the standard opening.
    pub fn standard_game(options: RuleOptions) -> Self {
        Self::new(Position::standard_opening(), options)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn options(&self) -> &RuleOptions {
        &self.options
    }

    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Validates and files an order. An accepted order replaces any earlier
    /// order standing for the same unit (the earlier one stays underneath
    /// and returns if the new one is retracted); resubmitting an identical
    /// order changes nothing. Rejected orders are not filed.
    pub fn submit(&mut self, power: Power, order: Order) -> OrderNote {
        if self.result.is_some() {
            return OrderNote::Nrs;
        }
        let order = normalize(order, &self.position, &self.options);
        let note = validate(&order, &self.position, power, &self.options);
        if !note.accepted() {
            return note;
        }

        if order.is_build_order() && self.position.turn.phase == Phase::Build {
            let list = self.adjustment_orders.entry(power).or_default();
            list.retain(|o| *o != order);
            let centers = self.position.center_count(power);
            let units = self.position.unit_count(power);
            match order {
                Order::Build { .. } | Order::Waive => {
                    let standing = list
                        .iter()
                        .filter(|o| matches!(o, Order::Build { .. } | Order::Waive))
                        .count();
                    if standing >= centers.saturating_sub(units) {
                        return OrderNote::Nmb;
                    }
                }
                Order::Remove { .. } => {
                    let standing =
                        list.iter().filter(|o| matches!(o, Order::Remove { .. })).count();
                    if standing >= units.saturating_sub(centers) {
                        return OrderNote::Nmr;
                    }
                }
                _ => {}
            }
            list.push(order);
        } else {
            let province = order.province().expect("unit order without a unit");
            let stack = self.unit_orders.entry(province).or_default();
            stack.retain(|(o, _)| *o != order);
            stack.push((order, power));
        }
        OrderNote::Mbv
    }

    /// Withdraws one specific standing order. If it was the active order
    /// for its unit, the previous submission becomes active again; once the
    /// stack is empty the unit is simply unordered, exactly as if nothing
    /// had ever been filed. Returns false if no such order stands.
    pub fn retract(&mut self, power: Power, order: &Order) -> bool {
        let order = normalize(order.clone(), &self.position, &self.options);
        if order.is_build_order() && self.position.turn.phase == Phase::Build {
            let Some(list) = self.adjustment_orders.get_mut(&power) else { return false };
            let before = list.len();
            list.retain(|o| *o != order);
            list.len() != before
        } else {
            let Some(province) = order.province() else { return false };
            let Some(stack) = self.unit_orders.get_mut(&province) else { return false };
            let before = stack.len();
            stack.retain(|(o, p)| !(*o == order && *p == power));
            stack.len() != before
        }
    }

    /// The active order set: the top of each unit's stack, in province
    /// order. Units without a stack fall to the phase default during
    /// resolution.
    fn active_unit_orders(&self) -> Vec<(Order, Power)> {
        let mut active: Vec<(Province, (Order, Power))> = self
            .unit_orders
            .iter()
            .filter_map(|(p, stack)| stack.last().cloned().map(|entry| (*p, entry)))
            .collect();
        active.sort_by_key(|(p, _)| *p as u8);
        active.into_iter().map(|(_, entry)| entry).collect()
    }

    fn active_adjustment_orders(&self) -> Vec<(Order, Power)> {
        let mut orders = Vec::new();
        for &power in &ALL_POWERS {
            if let Some(list) = self.adjustment_orders.get(&power) {
                orders.extend(list.iter().cloned().map(|o| (o, power)));
            }
        }
        orders
    }

    /// Adjudicates the current phase with whatever orders stand, applies
    /// the outcome to the board, advances the turn, and clears the stacks.
    pub fn resolve(&mut self) -> AdjudicationReport {
        let turn = self.position.turn;
        tracing::debug!(%turn, "resolving");
        let report = match turn.phase {
            Phase::Movement => self.resolve_movement_phase(),
            Phase::Retreat => self.resolve_retreat_phase(),
            Phase::Build => self.resolve_build_phase(),
        };
        self.unit_orders.clear();
        self.adjustment_orders.clear();
        self.check_victory();
        report
    }

    fn resolve_movement_phase(&mut self) -> AdjudicationReport {
        let turn = self.position.turn;
        let orders = self.active_unit_orders();
        let verdict = resolve_movement(&self.position, &orders, &self.options);

        for (province, record) in &verdict.dislodgements {
            self.position.dislodge(*province, record.clone());
        }
        self.position.apply_moves(&verdict.moves);
        if turn.season == Season::Fall {
            self.position.capture_centers();
        }

        let retreats_needed = verdict
            .dislodgements
            .iter()
            .map(|(province, d)| RetreatRequirement {
                province: *province,
                unit: d.unit,
                choices: d.retreat_options.clone(),
            })
            .collect();

        let has_dislodgements = !verdict.dislodgements.is_empty();
        self.position.turn = turn.next(has_dislodgements);
        AdjudicationReport { turn, orders: verdict.reports, retreats_needed }
    }

    fn resolve_retreat_phase(&mut self) -> AdjudicationReport {
        let turn = self.position.turn;
        let orders = self.active_unit_orders();
        let verdict = resolve_retreats(&self.position, &orders);

        for (province, dest) in &verdict.retreats {
            self.position.retreat(*province, *dest);
        }
        for province in &verdict.disbands {
            self.position.disband(*province);
        }
        if turn.season == Season::Fall {
            self.position.capture_centers();
        }

        self.position.turn = turn.next(false);
        AdjudicationReport { turn, orders: verdict.reports, retreats_needed: Vec::new() }
    }

    fn resolve_build_phase(&mut self) -> AdjudicationReport {
        let turn = self.position.turn;
        let orders = self.active_adjustment_orders();
        let verdict = resolve_builds(&self.position, &orders, &self.options);

        for (province, unit) in &verdict.builds {
            self.position
                .build(*province, *unit)
                .unwrap_or_else(|e| panic!("resolved build failed to apply: {}", e));
        }
        for province in &verdict.removals {
            self.position.remove(*province);
        }

        self.position.turn = turn.next(false);
        AdjudicationReport { turn, orders: verdict.reports, retreats_needed: Vec::new() }
    }

    fn check_victory(&mut self) {
        if self.result.is_some() {
            return;
        }
        for &power in &ALL_POWERS {
            if self.position.center_count(power) >= self.options.victory_centers {
                tracing::info!(winner = %power, "solo victory");
                self.result = Some(GameResult::Solo(power));
                return;
            }
        }
    }

    /// Records a draw among the named powers. The agreement protocol is the
    /// server's business; the controller only checks every party is still
    /// alive and the game is still running.
    pub fn record_draw(&mut self, mut powers: Vec<Power>) -> bool {
        if self.result.is_some() || powers.is_empty() {
            return false;
        }
        if powers.iter().any(|p| self.position.is_eliminated(*p)) {
            return false;
        }
        powers.sort();
        powers.dedup();
        self.result = Some(GameResult::Draw(powers));
        true
    }
}
