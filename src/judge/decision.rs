//! Decision cells: the memoized questions the resolver answers.
//!
//! Every decision is an integer interval `[min, max]` that only ever
//! narrows. Boolean questions use the interval over {0, 1}. A decision is
//! resolved exactly when the interval collapses to a single value; until
//! then it may be re-entered during cyclic evaluation, in which case its
//! tightest current bound stands in for the unknown answer.

use crate::map::Province;

/// Identifies a decision cell within the resolver's arena.
pub type DecId = usize;

/// What a decision is about. Index payloads refer to order slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dec {
    /// Does this move order succeed?
    Move(usize),
    /// Is this convoyed move's route intact?
    Path(usize),
    /// Is this support given (not cut)?
    Support(usize),
    /// Strength of this move against its destination.
    Attack(usize),
    /// Strength with which this move defends its own province in a
    /// head-to-head battle.
    Defend(usize),
    /// Strength with which this move keeps competitors out of its
    /// destination.
    Prevent(usize),
    /// Strength with which this province resists being entered.
    Hold(Province),
    /// Is the unit in this province dislodged?
    Dislodge(Province),
}

/// Evaluation state of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Unresolved,
    /// Currently being evaluated; re-entry returns the current bound
    /// instead of recursing, which is what lets cyclic graphs terminate.
    InProgress,
    Resolved,
}

/// One decision's evaluation state and interval.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub state: CellState,
    pub min: u8,
    pub max: u8,
}

impl Cell {
    pub const fn boolean() -> Cell {
        Cell { state: CellState::Unresolved, min: 0, max: 1 }
    }

    pub const fn strength(cap: u8) -> Cell {
        Cell { state: CellState::Unresolved, min: 0, max: cap }
    }

    pub const fn resolved(value: u8) -> Cell {
        Cell { state: CellState::Resolved, min: value, max: value }
    }

    pub const fn bound(&self) -> (u8, u8) {
        (self.min, self.max)
    }

    pub const fn is_resolved(&self) -> bool {
        matches!(self.state, CellState::Resolved)
    }

    /// True once the interval has collapsed to 1 (boolean cells only).
    pub const fn certainly_true(&self) -> bool {
        self.min == 1
    }

    pub const fn certainly_false(&self) -> bool {
        self.max == 0
    }

    /// Narrows the interval toward `[lo, hi]`, marking the cell resolved if
    /// it collapses. Panics if the new bound would invert the interval,
    /// which can only happen if the decision graph itself is wrong.
    pub fn narrow(&mut self, lo: u8, hi: u8, what: Dec) {
        let min = self.min.max(lo);
        let max = self.max.min(hi);
        if min > max {
            panic!("decision interval inverted for {:?}: [{}, {}]", what, min, max);
        }
        self.min = min;
        self.max = max;
        self.state = if min == max { CellState::Resolved } else { CellState::Unresolved };
    }

    /// Forces a final value, used by the cycle-breaking rules.
    pub fn force(&mut self, value: u8) {
        self.min = value;
        self.max = value;
        self.state = CellState::Resolved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_cell_collapses() {
        let mut cell = Cell::boolean();
        assert!(!cell.is_resolved());
        cell.narrow(1, 1, Dec::Move(0));
        assert!(cell.is_resolved());
        assert!(cell.certainly_true());
    }

    #[test]
    fn narrowing_is_monotone() {
        let mut cell = Cell::strength(10);
        cell.narrow(2, 7, Dec::Attack(0));
        assert_eq!(cell.bound(), (2, 7));
        // A looser bound cannot widen the interval again.
        cell.narrow(1, 9, Dec::Attack(0));
        assert_eq!(cell.bound(), (2, 7));
        cell.narrow(4, 4, Dec::Attack(0));
        assert!(cell.is_resolved());
    }

    #[test]
    #[should_panic(expected = "interval inverted")]
    fn inverted_interval_panics() {
        let mut cell = Cell::strength(10);
        cell.narrow(5, 7, Dec::Hold(Province::Vie));
        cell.narrow(0, 3, Dec::Hold(Province::Vie));
    }
}
