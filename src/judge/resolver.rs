//! Movement-phase adjudication over a lazily built decision graph.
//!
//! Every order spawns a handful of decisions (move success, path intact,
//! support given, strengths, dislodgement) whose dependencies may be
//! mutually recursive. Evaluation marks a decision in-progress before
//! recursing into its dependencies; re-entering an in-progress decision
//! yields its tightest current interval instead of recursing, so cycles
//! terminate. A sweep loop narrows every cell to a fixed point; if
//! unresolved decisions remain, the deadlock is either circular movement
//! (all cycle moves succeed) or a convoy paradox settled by the configured
//! rule option.

use crate::board::{Dislodgement, Location, Position, Unit, UnitType};
use crate::config::{ConvoyParadox, DisruptedConvoy, RuleOptions};
use crate::map::{army_borders, army_reaches, fleet_borders, sea_touches, Coast, Power, Province,
    PROVINCE_COUNT};
use crate::order::{Order, OrderNote};
use crate::report::{OrderReport, Outcome};

use super::decision::{Cell, CellState, Dec, DecId};

/// Everything the movement resolver decides, before any board mutation.
#[derive(Debug, Clone)]
pub struct MovementVerdict {
    /// One report per submitted order, in submission order.
    pub reports: Vec<OrderReport>,
    /// Successful moves: unit's province and its destination.
    pub moves: Vec<(Province, Location)>,
    /// Dislodged units with their computed retreat choices.
    pub dislodgements: Vec<(Province, Dislodgement)>,
    /// Provinces where a standoff occurred this turn.
    pub contested: Vec<Province>,
}

/// What one ordered (or unordered) unit is doing this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Action {
    Stay,
    MoveTo { dest: Location, convoyed: bool, via: Option<Vec<Province>> },
    SupportHold { target: Province },
    SupportMove { mover: Province, dest: Province },
    Convoying { from: Province, to: Province },
}

/// One unit's standing instruction, after pairing orders with board units.
#[derive(Debug, Clone)]
struct Slot {
    /// Index into the submitted order set; `usize::MAX` for units that
    /// received no order and default to holding.
    order_idx: usize,
    power: Power,
    src: Province,
    unit: Unit,
    action: Action,
}

const NO_ORDER: usize = usize::MAX;

struct Resolver<'a> {
    position: &'a Position,
    options: &'a RuleOptions,
    slots: Vec<Slot>,
    by_province: [Option<usize>; PROVINCE_COUNT],
    /// Move slots targeting each province, in slot order.
    entrants: [Vec<usize>; PROVINCE_COUNT],

    cells: Vec<Cell>,
    decs: Vec<Dec>,
    move_d: Vec<Option<DecId>>,
    path_d: Vec<Option<DecId>>,
    attack_d: Vec<Option<DecId>>,
    defend_d: Vec<Option<DecId>>,
    prevent_d: Vec<Option<DecId>>,
    support_d: Vec<Option<DecId>>,
    hold_d: [Option<DecId>; PROVINCE_COUNT],
    dislodge_d: [Option<DecId>; PROVINCE_COUNT],
}

/// Resolves one movement phase. Orders must already be validated; orders
/// whose unit is absent or mismatched (possible in any-orders games) are
/// reported void and the unit, if any, defaults to holding.
pub fn resolve_movement(
    position: &Position,
    orders: &[(Order, Power)],
    options: &RuleOptions,
) -> MovementVerdict {
    let mut resolver = Resolver::new(position, orders, options);
    resolver.solve();
    resolver.verdict(orders)
}

impl<'a> Resolver<'a> {
    fn new(position: &'a Position, orders: &[(Order, Power)], options: &'a RuleOptions) -> Self {
        let mut slots: Vec<Slot> = Vec::with_capacity(orders.len() + 4);
        let mut by_province = [None; PROVINCE_COUNT];

        for (idx, (order, power)) in orders.iter().enumerate() {
            let Some(ordered) = order.unit() else { continue };
            let src = ordered.province();
            let matches_unit = matches!(
                position.unit_at(src),
                Some(u) if u.unit_type == ordered.unit_type && u.power == *power
            );
            if !matches_unit {
                continue; // reported void below
            }
            let unit = position.unit_at(src).unwrap();
            let action = match order {
                Order::Hold { .. } => Action::Stay,
                Order::Move { dest, .. } => {
                    Action::MoveTo { dest: *dest, convoyed: false, via: None }
                }
                Order::SupportHold { supported, .. } => {
                    Action::SupportHold { target: supported.province() }
                }
                Order::SupportMove { supported, dest, .. } => {
                    Action::SupportMove { mover: supported.province(), dest: dest.province }
                }
                Order::ConvoyingFleet { army_from, army_to, .. } => {
                    Action::Convoying { from: army_from.province, to: army_to.province }
                }
                Order::ConvoyedArmy { dest, path, .. } => {
                    Action::MoveTo { dest: *dest, convoyed: true, via: path.clone() }
                }
                // Retreat/build orders never reach the movement resolver.
                _ => continue,
            };
            match by_province[src as usize] {
                // Resubmission should have replaced the old order upstream;
                // if both arrive, the later one stands.
                Some(existing) => {
                    slots[existing] = Slot { order_idx: idx, power: *power, src, unit, action };
                }
                None => {
                    by_province[src as usize] = Some(slots.len());
                    slots.push(Slot { order_idx: idx, power: *power, src, unit, action });
                }
            }
        }

        // Units without a standing order hold.
        for (province, unit) in position.units() {
            if by_province[province as usize].is_none() {
                by_province[province as usize] = Some(slots.len());
                slots.push(Slot {
                    order_idx: NO_ORDER,
                    power: unit.power,
                    src: province,
                    unit,
                    action: Action::Stay,
                });
            }
        }

        let mut entrants: [Vec<usize>; PROVINCE_COUNT] = std::array::from_fn(|_| Vec::new());
        for (i, slot) in slots.iter().enumerate() {
            if let Action::MoveTo { dest, .. } = &slot.action {
                entrants[dest.province as usize].push(i);
            }
        }

        let mut resolver = Resolver {
            position,
            options,
            slots,
            by_province,
            entrants,
            cells: Vec::new(),
            decs: Vec::new(),
            move_d: Vec::new(),
            path_d: Vec::new(),
            attack_d: Vec::new(),
            defend_d: Vec::new(),
            prevent_d: Vec::new(),
            support_d: Vec::new(),
            hold_d: [None; PROVINCE_COUNT],
            dislodge_d: [None; PROVINCE_COUNT],
        };
        resolver.build_cells();
        resolver
    }

    fn add_cell(&mut self, dec: Dec, cell: Cell) -> DecId {
        let id = self.cells.len();
        self.cells.push(cell);
        self.decs.push(dec);
        id
    }

    fn build_cells(&mut self) {
        let cap = self.slots.len() as u8 + 1;
        let n = self.slots.len();
        self.move_d = vec![None; n];
        self.path_d = vec![None; n];
        self.attack_d = vec![None; n];
        self.defend_d = vec![None; n];
        self.prevent_d = vec![None; n];
        self.support_d = vec![None; n];

        for i in 0..n {
            match self.slots[i].action.clone() {
                Action::MoveTo { dest, convoyed, via } => {
                    let path_cell = self.initial_path_cell(i, &dest, convoyed, via.as_deref());
                    self.path_d[i] = Some(self.add_cell(Dec::Path(i), path_cell));
                    self.move_d[i] = Some(self.add_cell(Dec::Move(i), Cell::boolean()));
                    self.attack_d[i] = Some(self.add_cell(Dec::Attack(i), Cell::strength(cap)));
                    self.defend_d[i] = Some(self.add_cell(Dec::Defend(i), Cell::strength(cap)));
                    self.prevent_d[i] = Some(self.add_cell(Dec::Prevent(i), Cell::strength(cap)));
                }
                Action::SupportHold { .. } | Action::SupportMove { .. } => {
                    self.support_d[i] = Some(self.add_cell(Dec::Support(i), Cell::boolean()));
                }
                Action::Stay | Action::Convoying { .. } => {}
            }
        }
        for i in 0..n {
            let p = self.slots[i].src;
            self.hold_d[p as usize] = Some(self.add_cell(Dec::Hold(p), Cell::strength(cap)));
            self.dislodge_d[p as usize] =
                Some(self.add_cell(Dec::Dislodge(p), Cell::boolean()));
        }
    }

    /// Path decisions that are known immediately: a direct move always has a
    /// path; an explicit convoy chain with a missing or mismatched fleet
    /// order never does.
    fn initial_path_cell(
        &self,
        i: usize,
        dest: &Location,
        convoyed: bool,
        via: Option<&[Province]>,
    ) -> Cell {
        if !convoyed {
            return Cell::resolved(1);
        }
        let src = self.slots[i].src;
        if self.options.disrupted_convoy_to_adjacent == DisruptedConvoy::UseLandRoute
            && army_reaches(src, dest.province)
        {
            return Cell::resolved(1);
        }
        if let Some(hops) = via {
            for &hop in hops {
                if !self.convoys_match(hop, src, dest.province) {
                    return Cell::resolved(0);
                }
            }
        }
        Cell::boolean()
    }

    /// True if the fleet in `hop` is ordered to convoy exactly this move.
    fn convoys_match(&self, hop: Province, from: Province, to: Province) -> bool {
        matches!(
            self.by_province[hop as usize].map(|k| &self.slots[k].action),
            Some(Action::Convoying { from: f, to: t }) if *f == from && *t == to
        )
    }

    /// Fleets ordered to convoy this exact move, in province order.
    fn convoyers_for(&self, from: Province, to: Province) -> Vec<Province> {
        let mut fleets: Vec<Province> = self
            .slots
            .iter()
            .filter(|s| matches!(&s.action, Action::Convoying { from: f, to: t } if *f == from && *t == to))
            .map(|s| s.src)
            .collect();
        fleets.sort();
        fleets
    }

    // --- evaluation ---------------------------------------------------

    /// Evaluates a decision, recursing into dependencies. A cell already
    /// in progress answers with its current interval; that substitution is
    /// what lets genuinely cyclic graphs reach a fixed point.
    fn eval(&mut self, id: DecId) -> (u8, u8) {
        match self.cells[id].state {
            CellState::Resolved | CellState::InProgress => self.cells[id].bound(),
            CellState::Unresolved => {
                self.cells[id].state = CellState::InProgress;
                let (lo, hi) = self.compute(id);
                let dec = self.decs[id];
                self.cells[id].narrow(lo, hi, dec);
                self.cells[id].bound()
            }
        }
    }

    fn compute(&mut self, id: DecId) -> (u8, u8) {
        match self.decs[id] {
            Dec::Move(i) => self.compute_move(i),
            Dec::Path(i) => self.compute_path(i),
            Dec::Support(i) => self.compute_support(i),
            Dec::Attack(i) => self.compute_attack(i),
            Dec::Defend(i) => self.compute_defend(i),
            Dec::Prevent(i) => self.compute_prevent(i),
            Dec::Hold(p) => self.compute_hold(p),
            Dec::Dislodge(p) => self.compute_dislodge(p),
        }
    }

    fn move_dest(&self, i: usize) -> Location {
        match &self.slots[i].action {
            Action::MoveTo { dest, .. } => *dest,
            other => panic!("slot {} is not a move: {:?}", i, other),
        }
    }

    /// The unit this move directly swaps against, if any. Convoyed moves
    /// never fight head-to-head: a convoyed swap simply passes at sea.
    fn direct_opponent(&self, i: usize) -> Option<usize> {
        let Action::MoveTo { dest, convoyed: false, .. } = &self.slots[i].action else {
            return None;
        };
        let k = self.by_province[dest.province as usize]?;
        match &self.slots[k].action {
            Action::MoveTo { dest: back, convoyed: false, .. }
                if back.province == self.slots[i].src =>
            {
                Some(k)
            }
            _ => None,
        }
    }

    /// Total strength of supports for the move `mover -> dest`, optionally
    /// discounting supports given by one power (a power's support never
    /// helps dislodge its own unit).
    fn support_strength(
        &mut self,
        mover: Province,
        dest: Province,
        exclude: Option<Power>,
    ) -> (u8, u8) {
        let mut lo = 0;
        let mut hi = 0;
        for s in 0..self.slots.len() {
            let matched = matches!(
                &self.slots[s].action,
                Action::SupportMove { mover: m, dest: d } if *m == mover && *d == dest
            );
            if !matched || exclude == Some(self.slots[s].power) {
                continue;
            }
            let (slo, shi) = self.eval(self.support_d[s].unwrap());
            lo += slo;
            hi += shi;
        }
        (lo, hi)
    }

    /// Total strength of supports for the unit in `province` to hold.
    fn hold_supports(&mut self, province: Province) -> (u8, u8) {
        let mut lo = 0;
        let mut hi = 0;
        for s in 0..self.slots.len() {
            let matched = matches!(
                &self.slots[s].action,
                Action::SupportHold { target } if *target == province
            );
            if !matched {
                continue;
            }
            let (slo, shi) = self.eval(self.support_d[s].unwrap());
            lo += slo;
            hi += shi;
        }
        (lo, hi)
    }

    fn compute_move(&mut self, i: usize) -> (u8, u8) {
        let (_, path_hi) = self.eval(self.path_d[i].unwrap());
        if path_hi == 0 {
            return (0, 0);
        }
        let dest = self.move_dest(i).province;
        let (attack_lo, attack_hi) = self.eval(self.attack_d[i].unwrap());
        let (opp_lo, opp_hi) = match self.direct_opponent(i) {
            Some(k) => self.eval(self.defend_d[k].unwrap()),
            None => match self.hold_d[dest as usize] {
                Some(h) => self.eval(h),
                None => (0, 0),
            },
        };
        let mut lo = attack_lo > opp_hi;
        let mut hi = attack_hi > opp_lo;
        let rivals: Vec<usize> =
            self.entrants[dest as usize].iter().copied().filter(|&j| j != i).collect();
        for j in rivals {
            let (r_lo, r_hi) = self.eval(self.prevent_d[j].unwrap());
            lo &= attack_lo > r_hi;
            hi &= attack_hi > r_lo;
        }
        (lo as u8, hi as u8)
    }

    fn compute_attack(&mut self, i: usize) -> (u8, u8) {
        let (path_lo, path_hi) = self.eval(self.path_d[i].unwrap());
        if path_hi == 0 {
            return (0, 0);
        }
        let src = self.slots[i].src;
        let dest = self.move_dest(i).province;
        let attacker = self.slots[i].power;

        let (lo, hi) = match self.position.unit_at(dest) {
            None => {
                let (s_lo, s_hi) = self.support_strength(src, dest, None);
                (1 + s_lo, 1 + s_hi)
            }
            Some(victim) => {
                let k = self.by_province[dest as usize].unwrap();
                let i_convoyed =
                    matches!(self.slots[i].action, Action::MoveTo { convoyed: true, .. });
                // The occupant vacates unless it is the other half of a
                // head-to-head battle; convoyed units pass each other at sea.
                let leaving = matches!(
                    &self.slots[k].action,
                    Action::MoveTo { dest: kd, convoyed, .. }
                        if *convoyed || i_convoyed || kd.province != src
                );
                let (away_lo, away_hi) =
                    if leaving { self.eval(self.move_d[k].unwrap()) } else { (0, 0) };

                let (s_lo, s_hi) = self.support_strength(src, dest, None);
                let full = (1 + s_lo, 1 + s_hi);
                let against_stander = if self.options.allow_self_dislodgement {
                    full
                } else if victim.power == attacker {
                    (0, 0)
                } else {
                    let (e_lo, e_hi) = self.support_strength(src, dest, Some(victim.power));
                    (1 + e_lo, 1 + e_hi)
                };

                if away_lo == 1 {
                    full
                } else if away_hi == 0 {
                    against_stander
                } else {
                    (full.0.min(against_stander.0), full.1.max(against_stander.1))
                }
            }
        };
        (if path_lo == 1 { lo } else { 0 }, hi)
    }

    fn compute_defend(&mut self, i: usize) -> (u8, u8) {
        let src = self.slots[i].src;
        let dest = self.move_dest(i).province;
        let (s_lo, s_hi) = self.support_strength(src, dest, None);
        (1 + s_lo, 1 + s_hi)
    }

    fn compute_prevent(&mut self, i: usize) -> (u8, u8) {
        let (path_lo, path_hi) = self.eval(self.path_d[i].unwrap());
        if path_hi == 0 {
            return (0, 0);
        }
        // A head-to-head loser no longer contests its destination.
        let (opp_lo, opp_hi) = match self.direct_opponent(i) {
            Some(k) => self.eval(self.move_d[k].unwrap()),
            None => (0, 0),
        };
        if opp_lo == 1 {
            return (0, 0);
        }
        let src = self.slots[i].src;
        let dest = self.move_dest(i).province;
        let (s_lo, s_hi) = self.support_strength(src, dest, None);
        let lo = if path_lo == 1 && opp_hi == 0 { 1 + s_lo } else { 0 };
        (lo, 1 + s_hi)
    }

    fn compute_hold(&mut self, p: Province) -> (u8, u8) {
        let k = self.by_province[p as usize].unwrap();
        match &self.slots[k].action {
            Action::MoveTo { .. } => {
                let (m_lo, m_hi) = self.eval(self.move_d[k].unwrap());
                if m_lo == 1 {
                    (0, 0)
                } else if m_hi == 0 {
                    (1, 1)
                } else {
                    (0, 1)
                }
            }
            _ => {
                let (s_lo, s_hi) = self.hold_supports(p);
                (1 + s_lo, 1 + s_hi)
            }
        }
    }

    fn compute_dislodge(&mut self, p: Province) -> (u8, u8) {
        let k = self.by_province[p as usize].unwrap();
        let (leave_lo, leave_hi) = match &self.slots[k].action {
            Action::MoveTo { .. } => self.eval(self.move_d[k].unwrap()),
            _ => (0, 0),
        };
        if leave_lo == 1 {
            return (0, 0);
        }
        let mut in_lo = 0;
        let mut in_hi = 0;
        let entrants = self.entrants[p as usize].clone();
        for m in entrants {
            let (m_lo, m_hi) = self.eval(self.move_d[m].unwrap());
            in_lo = in_lo.max(m_lo);
            in_hi = in_hi.max(m_hi);
        }
        let lo = (leave_hi == 0 && in_lo == 1) as u8;
        (lo, in_hi)
    }

    fn compute_support(&mut self, s: usize) -> (u8, u8) {
        let here = self.slots[s].src;
        let giver = self.slots[s].power;
        // An attack from the province the support is directed against
        // cannot cut it; it can only break the support by dislodgement.
        let directed = match &self.slots[s].action {
            Action::SupportMove { dest, .. } => Some(*dest),
            Action::SupportHold { .. } => None,
            other => panic!("slot {} is not a support: {:?}", s, other),
        };

        let mut cut_possible = false;
        let mut cut_certain = false;
        let entrants = self.entrants[here as usize].clone();
        for m in entrants {
            if self.slots[m].power == giver {
                continue;
            }
            if directed == Some(self.slots[m].src) {
                continue;
            }
            // An attack cuts whether or not it wins, as long as its path
            // holds; a convoyed attack with a broken route touches nothing.
            let (p_lo, p_hi) = self.eval(self.path_d[m].unwrap());
            if p_hi > 0 {
                cut_possible = true;
            }
            if p_lo == 1 {
                cut_certain = true;
            }
        }
        let (d_lo, d_hi) = self.eval(self.dislodge_d[here as usize].unwrap());
        if d_hi == 1 {
            cut_possible = true;
        }
        if d_lo == 1 {
            cut_certain = true;
        }
        (if cut_possible { 0 } else { 1 }, if cut_certain { 0 } else { 1 })
    }

    fn compute_path(&mut self, i: usize) -> (u8, u8) {
        let src = self.slots[i].src;
        let dest = self.move_dest(i).province;
        let via = match &self.slots[i].action {
            Action::MoveTo { via, .. } => via.clone(),
            _ => unreachable!("path decision on a non-move"),
        };
        match via {
            Some(hops) => {
                // Fleet orders were matched when the cell was created; the
                // route now lives or dies with its fleets.
                let mut lo = 1;
                for hop in hops {
                    let (d_lo, d_hi) = self.eval(self.dislodge_d[hop as usize].unwrap());
                    if d_hi == 1 {
                        lo = 0;
                    }
                    if d_lo == 1 {
                        return (0, 0);
                    }
                }
                (lo, 1)
            }
            None => {
                let fleets = self.convoyers_for(src, dest);
                let mut safe = Vec::with_capacity(fleets.len());
                let mut alive = Vec::with_capacity(fleets.len());
                for f in fleets {
                    let (d_lo, d_hi) = self.eval(self.dislodge_d[f as usize].unwrap());
                    if d_hi == 0 {
                        safe.push(f);
                    }
                    if d_lo == 0 {
                        alive.push(f);
                    }
                }
                (chain_exists(src, dest, &safe) as u8, chain_exists(src, dest, &alive) as u8)
            }
        }
    }

    // --- fixed point and deadlock breaking ----------------------------

    fn solve(&mut self) {
        loop {
            let mut progress = false;
            let mut open = 0usize;
            for id in 0..self.cells.len() {
                if self.cells[id].is_resolved() {
                    continue;
                }
                let before = self.cells[id].bound();
                self.eval(id);
                if self.cells[id].is_resolved() || self.cells[id].bound() != before {
                    progress = true;
                }
                if !self.cells[id].is_resolved() {
                    open += 1;
                }
            }
            if open == 0 {
                break;
            }
            if !progress {
                self.break_deadlock();
            }
        }
        tracing::trace!(cells = self.cells.len(), "decision graph reached a fixed point");
    }

    /// Settles a fixed point that still has open decisions. A core with an
    /// open convoy route is a convoy paradox, resolved per the configured
    /// rule; a core of plain moves is circular movement, which succeeds.
    fn break_deadlock(&mut self) {
        let open: Vec<DecId> =
            (0..self.cells.len()).filter(|&id| !self.cells[id].is_resolved()).collect();
        let convoy_core = open.iter().any(|&id| matches!(self.decs[id], Dec::Path(_)));
        if convoy_core {
            match self.options.convoy_paradox {
                ConvoyParadox::Szykman => {
                    tracing::debug!("convoy paradox: disrupting the convoyed moves");
                    for &id in &open {
                        if matches!(self.decs[id], Dec::Path(_)) {
                            self.cells[id].force(0);
                        }
                    }
                }
                ConvoyParadox::AllHold => {
                    tracing::debug!("convoy paradox: all moves in the core fail");
                    for &id in &open {
                        if matches!(self.decs[id], Dec::Path(_) | Dec::Move(_)) {
                            self.cells[id].force(0);
                        }
                    }
                }
            }
        } else {
            let moves: Vec<DecId> = open
                .iter()
                .copied()
                .filter(|&id| matches!(self.decs[id], Dec::Move(_)))
                .collect();
            if moves.is_empty() {
                panic!("adjudication deadlock with no move or convoy cycle to break");
            }
            tracing::debug!(moves = moves.len(), "circular movement: the cycle rotates");
            for id in moves {
                self.cells[id].force(1);
            }
        }
    }

    // --- verdict assembly ---------------------------------------------

    fn move_succeeded(&self, i: usize) -> bool {
        self.move_d[i].map(|id| self.cells[id].certainly_true()).unwrap_or(false)
    }

    fn is_dislodged(&self, p: Province) -> bool {
        self.dislodge_d[p as usize]
            .map(|id| self.cells[id].certainly_true())
            .unwrap_or(false)
    }

    fn verdict(&self, orders: &[(Order, Power)]) -> MovementVerdict {
        let mut moves = Vec::new();
        for (i, slot) in self.slots.iter().enumerate() {
            if let Action::MoveTo { dest, .. } = &slot.action {
                if self.move_succeeded(i) {
                    moves.push((slot.src, *dest));
                }
            }
        }

        // A province is contested when several units tried to enter and
        // none made it; dislodged units may not retreat there.
        let mut contested_set = [false; PROVINCE_COUNT];
        for p in 0..PROVINCE_COUNT {
            if self.entrants[p].len() >= 2
                && !self.entrants[p].iter().any(|&i| self.move_succeeded(i))
            {
                contested_set[p] = true;
            }
        }

        let mut occupied_after = [false; PROVINCE_COUNT];
        for (i, slot) in self.slots.iter().enumerate() {
            let leaves = matches!(slot.action, Action::MoveTo { .. }) && self.move_succeeded(i);
            if !leaves && !self.is_dislodged(slot.src) {
                occupied_after[slot.src as usize] = true;
            }
        }
        for (_, dest) in &moves {
            occupied_after[dest.province as usize] = true;
        }

        let mut dislodgements = Vec::new();
        for slot in &self.slots {
            let p = slot.src;
            if !self.is_dislodged(p) {
                continue;
            }
            let winner = self.entrants[p as usize]
                .iter()
                .copied()
                .find(|&m| self.move_succeeded(m))
                .unwrap_or_else(|| panic!("dislodged {} without a successful entrant", p));
            let by_convoy =
                matches!(self.slots[winner].action, Action::MoveTo { convoyed: true, .. });
            let attacker_from = self.slots[winner].src;
            let retreat_options = self.retreat_choices(
                p,
                slot.unit,
                attacker_from,
                by_convoy,
                &occupied_after,
                &contested_set,
            );
            dislodgements.push((
                p,
                Dislodgement { unit: slot.unit, attacker_from, by_convoy, retreat_options },
            ));
        }

        let reports = orders
            .iter()
            .enumerate()
            .map(|(idx, (order, power))| self.report_one(idx, order, *power))
            .collect();

        let contested = (0..PROVINCE_COUNT)
            .filter(|&p| contested_set[p])
            .map(|p| Province::from_index(p).unwrap())
            .collect();

        MovementVerdict { reports, moves, dislodgements, contested }
    }

    fn report_one(&self, idx: usize, order: &Order, power: Power) -> OrderReport {
        let slot_i = order
            .province()
            .and_then(|p| self.by_province[p as usize])
            .filter(|&i| self.slots[i].order_idx == idx);

        let Some(i) = slot_i else {
            return OrderReport {
                order: order.clone(),
                power,
                note: OrderNote::Mbv,
                outcome: Outcome::Void,
                dislodged: false,
                convoy_route: None,
            };
        };
        let slot = &self.slots[i];
        let dislodged = self.is_dislodged(slot.src);

        let (outcome, convoy_route) = match &slot.action {
            Action::Stay => (Outcome::Success, None),
            Action::MoveTo { dest, convoyed, via } => {
                if self.move_succeeded(i) {
                    let route = if *convoyed {
                        self.used_route(slot.src, dest.province, via.as_deref())
                    } else {
                        None
                    };
                    (Outcome::Success, route)
                } else if *convoyed && self.path_failed(i) {
                    (Outcome::Disrupted, None)
                } else {
                    (Outcome::Bounced, None)
                }
            }
            Action::SupportHold { target } => (self.support_outcome(i, *target, None), None),
            Action::SupportMove { mover, dest } => {
                (self.support_outcome(i, *mover, Some(*dest)), None)
            }
            Action::Convoying { from, to } => (self.convoying_outcome(slot.src, *from, *to), None),
        };

        OrderReport { order: order.clone(), power, note: OrderNote::Mbv, outcome, dislodged, convoy_route }
    }

    fn path_failed(&self, i: usize) -> bool {
        self.path_d[i].map(|id| self.cells[id].certainly_false()).unwrap_or(false)
    }

    /// A support that matches no actual order is void; otherwise it is
    /// either given or cut.
    fn support_outcome(&self, s: usize, target: Province, move_dest: Option<Province>) -> Outcome {
        let matched = self.by_province[target as usize].is_some_and(|k| match move_dest {
            None => !matches!(self.slots[k].action, Action::MoveTo { .. }),
            Some(d) => {
                matches!(&self.slots[k].action, Action::MoveTo { dest, .. } if dest.province == d)
            }
        });
        if !matched {
            return Outcome::Void;
        }
        let given = self.support_d[s].map(|id| self.cells[id].certainly_true()).unwrap_or(false);
        if given {
            Outcome::Success
        } else {
            Outcome::Cut
        }
    }

    fn convoying_outcome(&self, fleet: Province, from: Province, to: Province) -> Outcome {
        let army = self.by_province[from as usize].filter(|&k| {
            matches!(&self.slots[k].action, Action::MoveTo { dest, convoyed: true, .. }
                if dest.province == to)
        });
        let Some(k) = army else { return Outcome::Void };
        if self.is_dislodged(fleet) {
            return Outcome::Disrupted;
        }
        if self.move_succeeded(k) {
            let via = match &self.slots[k].action {
                Action::MoveTo { via, .. } => via.clone(),
                _ => None,
            };
            match self.used_route(from, to, via.as_deref()) {
                Some(route) if route.contains(&fleet) => Outcome::Success,
                _ => Outcome::Void,
            }
        } else if self.path_failed(k) {
            Outcome::Disrupted
        } else {
            // The chain held; the army simply lost at the far shore.
            Outcome::Success
        }
    }

    /// The route a successful convoyed move used: the explicit chain if one
    /// was ordered, else the shortest chain of surviving fleets, ties going
    /// to the earliest provinces examined.
    fn used_route(&self, src: Province, dest: Province, via: Option<&[Province]>) -> Option<Vec<Province>> {
        if let Some(hops) = via {
            return Some(hops.to_vec());
        }
        let fleets: Vec<Province> = self
            .convoyers_for(src, dest)
            .into_iter()
            .filter(|&f| !self.is_dislodged(f))
            .collect();
        shortest_chain(src, dest, &fleets)
    }

    fn retreat_choices(
        &self,
        p: Province,
        unit: Unit,
        attacker_from: Province,
        by_convoy: bool,
        occupied_after: &[bool; PROVINCE_COUNT],
        contested: &[bool; PROVINCE_COUNT],
    ) -> Vec<Location> {
        let blocked = |q: Province| {
            occupied_after[q as usize]
                || contested[q as usize]
                || (q == attacker_from && !by_convoy)
        };
        let mut choices = Vec::new();
        match unit.unit_type {
            UnitType::Army => {
                for &q in army_borders(p) {
                    if !blocked(q) {
                        choices.push(Location::new(q));
                    }
                }
            }
            UnitType::Fleet => {
                for e in fleet_borders(p) {
                    if e.from_coast != Coast::None && e.from_coast != unit.coast {
                        continue;
                    }
                    if !blocked(e.to) {
                        choices.push(Location::with_coast(e.to, e.to_coast));
                    }
                }
            }
        }
        choices
    }
}

/// True if the fleets can carry an army from `src` to `dest`: breadth-first
/// over seas that touch each other, starting from those touching `src`.
fn chain_exists(src: Province, dest: Province, fleets: &[Province]) -> bool {
    shortest_chain(src, dest, fleets).is_some()
}

/// The shortest convoy chain through the given fleets, or `None`. Fleets
/// are explored in the order given, which fixes tie-breaking.
fn shortest_chain(src: Province, dest: Province, fleets: &[Province]) -> Option<Vec<Province>> {
    let mut parent: [Option<Province>; PROVINCE_COUNT] = [None; PROVINCE_COUNT];
    let mut visited = [false; PROVINCE_COUNT];
    let mut queue: Vec<Province> = Vec::with_capacity(fleets.len());
    for &f in fleets {
        if sea_touches(f, src) {
            visited[f as usize] = true;
            queue.push(f);
        }
    }
    let mut head = 0;
    while head < queue.len() {
        let cur = queue[head];
        head += 1;
        if sea_touches(cur, dest) {
            let mut route = vec![cur];
            let mut back = cur;
            while let Some(prev) = parent[back as usize] {
                route.push(prev);
                back = prev;
            }
            route.reverse();
            return Some(route);
        }
        for &f in fleets {
            if !visited[f as usize] && sea_touches(cur, f) {
                visited[f as usize] = true;
                parent[f as usize] = Some(cur);
                queue.push(f);
            }
        }
    }
    None
}
