//! Per-order legality notes.
//!
//! Every submitted order is answered with exactly one note. `Mbv` accepts
//! the order into the standing set; every other note rejects it, leaving the
//! unit to its phase default. Notes are purely local judgments: they never
//! depend on the other orders in the set (quota notes, which do, are issued
//! by the turn controller).

use std::fmt;

/// The legality note returned for a submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderNote {
    /// Order accepted ("might be valid" -- full legality is only known once
    /// the whole set is adjudicated).
    Mbv,
    /// Destination or supported province is not reachable from here.
    Far,
    /// No such province. Reserved for order-decoding layers; a typed
    /// [`crate::order::Order`] cannot name an unknown province.
    Nsp,
    /// No unit of the named type in the named province.
    Nsu,
    /// Convoying fleet is not at sea.
    Nas,
    /// A convoy-path province holds no fleet.
    Nsf,
    /// No army to convoy in the named province.
    Nsa,
    /// The named unit belongs to another power.
    Nyu,
    /// The unit was not dislodged, so no retreat is needed.
    Nrn,
    /// Not a valid retreat destination.
    Nvr,
    /// Not your supply center.
    Ysc,
    /// Supply center is not empty.
    Esc,
    /// Not one of your home supply centers.
    Hsc,
    /// Not a supply center.
    Nsc,
    /// Coast missing, ambiguous, or illegal.
    Cst,
    /// No more builds allowed this phase.
    Nmb,
    /// No more removals allowed this phase.
    Nmr,
    /// Wrong phase for this kind of order.
    Nrs,
}

impl OrderNote {
    /// True when the order was accepted into the standing set.
    pub const fn accepted(self) -> bool {
        matches!(self, OrderNote::Mbv)
    }

    pub const fn code(self) -> &'static str {
        match self {
            OrderNote::Mbv => "MBV",
            OrderNote::Far => "FAR",
            OrderNote::Nsp => "NSP",
            OrderNote::Nsu => "NSU",
            OrderNote::Nas => "NAS",
            OrderNote::Nsf => "NSF",
            OrderNote::Nsa => "NSA",
            OrderNote::Nyu => "NYU",
            OrderNote::Nrn => "NRN",
            OrderNote::Nvr => "NVR",
            OrderNote::Ysc => "YSC",
            OrderNote::Esc => "ESC",
            OrderNote::Hsc => "HSC",
            OrderNote::Nsc => "NSC",
            OrderNote::Cst => "CST",
            OrderNote::Nmb => "NMB",
            OrderNote::Nmr => "NMR",
            OrderNote::Nrs => "NRS",
        }
    }
}

impl fmt::Display for OrderNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_mbv_accepts() {
        assert!(OrderNote::Mbv.accepted());
        assert!(!OrderNote::Far.accepted());
        assert!(!OrderNote::Nrs.accepted());
    }

    #[test]
    fn codes_are_three_letters() {
        let all = [
            OrderNote::Mbv, OrderNote::Far, OrderNote::Nsp, OrderNote::Nsu,
            OrderNote::Nas, OrderNote::Nsf, OrderNote::Nsa, OrderNote::Nyu,
            OrderNote::Nrn, OrderNote::Nvr, OrderNote::Ysc, OrderNote::Esc,
            OrderNote::Hsc, OrderNote::Nsc, OrderNote::Cst, OrderNote::Nmb,
            OrderNote::Nmr, OrderNote::Nrs,
        ];
        for note in all {
            assert_eq!(note.code().len(), 3);
        }
    }
}
