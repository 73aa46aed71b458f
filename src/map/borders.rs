//! Directed border lists for the standard Diplomacy map.
//!
//! Each province carries its outgoing borders, split by the unit type that
//! may cross them: a plain province list for armies and a coast-qualified
//! edge list for fleets. The standard map is symmetric, but the encoding is
//! directed, so one-way borders are representable on variant maps.
//!
//! Split-coast provinces (bul, spa, stp) qualify their fleet edges with the
//! coast the fleet occupies; army borders never carry coasts.

use super::province::{Coast, Province, PROVINCE_COUNT};

/// A fleet-passable border from one coast to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetEdge {
    pub from_coast: Coast,
    pub to: Province,
    pub to_coast: Coast,
}

/// Outgoing borders of one province.
pub struct Borders {
    pub army: &'static [Province],
    pub fleet: &'static [FleetEdge],
}

/// A fleet edge with no coast qualifiers on either end.
const fn flt(to: Province) -> FleetEdge {
    FleetEdge { from_coast: Coast::None, to, to_coast: Coast::None }
}

/// A fleet edge with explicit coast qualifiers.
const fn edge(from_coast: Coast, to: Province, to_coast: Coast) -> FleetEdge {
    FleetEdge { from_coast, to, to_coast }
}

const N: Coast = Coast::None;
const NC: Coast = Coast::North;
const SC: Coast = Coast::South;
const EC: Coast = Coast::East;

use Province::*;

/// Border table, indexed by `Province as usize`.
///
/// Army lists are sorted by province index; fleet lists by (coast, index).
pub static BORDERS: [Borders; PROVINCE_COUNT] = [
    // adr
    Borders { army: &[], fleet: &[flt(Alb), flt(Apu), flt(Ion), flt(Tri), flt(Ven)] },
    // aeg
    Borders { army: &[], fleet: &[edge(N, Bul, SC), flt(Con), flt(Eas), flt(Gre), flt(Ion), flt(Smy)] },
    // alb
    Borders { army: &[Gre, Ser, Tri], fleet: &[flt(Adr), flt(Gre), flt(Ion), flt(Tri)] },
    // ank
    Borders { army: &[Arm, Con, Smy], fleet: &[flt(Arm), flt(Bla), flt(Con)] },
    // apu
    Borders { army: &[Nap, Rom, Ven], fleet: &[flt(Adr), flt(Ion), flt(Nap), flt(Ven)] },
    // arm
    Borders { army: &[Ank, Sev, Smy, Syr], fleet: &[flt(Ank), flt(Bla), flt(Sev)] },
    // bal
    Borders { army: &[], fleet: &[flt(Ber), flt(Bot), flt(Den), flt(Kie), flt(Lvn), flt(Pru), flt(Swe)] },
    // bar
    Borders { army: &[], fleet: &[flt(Nrg), flt(Nwy), edge(N, Stp, NC)] },
    // bel
    Borders { army: &[Bur, Hol, Pic, Ruh], fleet: &[flt(Eng), flt(Hol), flt(Nth), flt(Pic)] },
    // ber
    Borders { army: &[Kie, Mun, Pru, Sil], fleet: &[flt(Bal), flt(Kie), flt(Pru)] },
    // bla
    Borders { army: &[], fleet: &[flt(Ank), flt(Arm), edge(N, Bul, EC), flt(Con), flt(Rum), flt(Sev)] },
    // boh
    Borders { army: &[Gal, Mun, Sil, Tyr, Vie], fleet: &[] },
    // bot
    Borders { army: &[], fleet: &[flt(Bal), flt(Fin), flt(Lvn), edge(N, Stp, SC), flt(Swe)] },
    // bre
    Borders { army: &[Gas, Par, Pic], fleet: &[flt(Eng), flt(Gas), flt(Mao), flt(Pic)] },
    // bud
    Borders { army: &[Gal, Rum, Ser, Tri, Vie], fleet: &[] },
    // bul
    Borders { army: &[Con, Gre, Rum, Ser], fleet: &[edge(SC, Aeg, N), edge(SC, Con, N), edge(SC, Gre, N), edge(EC, Bla, N), edge(EC, Con, N), edge(EC, Rum, N)] },
    // bur
    Borders { army: &[Bel, Gas, Mar, Mun, Par, Pic, Ruh], fleet: &[] },
    // cly
    Borders { army: &[Edi, Lvp], fleet: &[flt(Edi), flt(Lvp), flt(Nao), flt(Nrg)] },
    // con
    Borders { army: &[Ank, Bul, Smy], fleet: &[flt(Aeg), flt(Ank), flt(Bla), edge(N, Bul, SC), edge(N, Bul, EC), flt(Smy)] },
    // den
    Borders { army: &[Kie, Swe], fleet: &[flt(Bal), flt(Hel), flt(Kie), flt(Nth), flt(Ska), flt(Swe)] },
    // eas
    Borders { army: &[], fleet: &[flt(Aeg), flt(Ion), flt(Smy), flt(Syr)] },
    // edi
    Borders { army: &[Cly, Lvp, Yor], fleet: &[flt(Cly), flt(Nrg), flt(Nth), flt(Yor)] },
    // eng
    Borders { army: &[], fleet: &[flt(Bel), flt(Bre), flt(Iri), flt(Lon), flt(Mao), flt(Nth), flt(Pic), flt(Wal)] },
    // fin
    Borders { army: &[Nwy, Stp, Swe], fleet: &[flt(Bot), edge(N, Stp, SC), flt(Swe)] },
    // gal
    Borders { army: &[Boh, Bud, Rum, Sil, Ukr, Vie, War], fleet: &[] },
    // gas
    Borders { army: &[Bre, Bur, Mar, Par, Spa], fleet: &[flt(Bre), flt(Mao), edge(N, Spa, NC)] },
    // gol
    Borders { army: &[], fleet: &[flt(Mar), flt(Pie), edge(N, Spa, SC), flt(Tus), flt(Tys), flt(Wes)] },
    // gre
    Borders { army: &[Alb, Bul, Ser], fleet: &[flt(Aeg), flt(Alb), edge(N, Bul, SC), flt(Ion)] },
    // hel
    Borders { army: &[], fleet: &[flt(Den), flt(Hol), flt(Kie), flt(Nth)] },
    // hol
    Borders { army: &[Bel, Ruh], fleet: &[flt(Bel), flt(Hel), flt(Nth)] },
    // ion
    Borders { army: &[], fleet: &[flt(Adr), flt(Aeg), flt(Alb), flt(Apu), flt(Eas), flt(Gre), flt(Nap), flt(Tun), flt(Tys)] },
    // iri
    Borders { army: &[], fleet: &[flt(Eng), flt(Lvp), flt(Mao), flt(Nao), flt(Wal)] },
    // kie
    Borders { army: &[Ber, Den, Mun, Ruh], fleet: &[flt(Bal), flt(Ber), flt(Den), flt(Hel)] },
    // lon
    Borders { army: &[Wal, Yor], fleet: &[flt(Eng), flt(Nth), flt(Wal), flt(Yor)] },
    // lvn
    Borders { army: &[Mos, Pru, Stp, War], fleet: &[flt(Bal), flt(Bot), flt(Pru), edge(N, Stp, SC)] },
    // lvp
    Borders { army: &[Cly, Edi, Wal, Yor], fleet: &[flt(Cly), flt(Iri), flt(Nao), flt(Wal)] },
    // mao
    Borders { army: &[], fleet: &[flt(Bre), flt(Eng), flt(Gas), flt(Iri), flt(Naf), flt(Nao), flt(Por), edge(N, Spa, NC), edge(N, Spa, SC), flt(Wes)] },
    // mar
    Borders { army: &[Bur, Gas, Pie, Spa], fleet: &[flt(Gol), flt(Pie), edge(N, Spa, SC)] },
    // mos
    Borders { army: &[Lvn, Sev, Stp, Ukr, War], fleet: &[] },
    // mun
    Borders { army: &[Ber, Boh, Bur, Kie, Ruh, Sil, Tyr], fleet: &[] },
    // naf
    Borders { army: &[Tun], fleet: &[flt(Mao), flt(Tun), flt(Wes)] },
    // nao
    Borders { army: &[], fleet: &[flt(Cly), flt(Iri), flt(Lvp), flt(Mao), flt(Nrg)] },
    // nap
    Borders { army: &[Apu, Rom], fleet: &[flt(Apu), flt(Ion), flt(Rom), flt(Tys)] },
    // nrg
    Borders { army: &[], fleet: &[flt(Bar), flt(Cly), flt(Edi), flt(Nao), flt(Nth), flt(Nwy)] },
    // nth
    Borders { army: &[], fleet: &[flt(Bel), flt(Den), flt(Edi), flt(Eng), flt(Hel), flt(Hol), flt(Lon), flt(Nrg), flt(Nwy), flt(Ska), flt(Yor)] },
    // nwy
    Borders { army: &[Fin, Stp, Swe], fleet: &[flt(Bar), flt(Nrg), flt(Nth), flt(Ska), edge(N, Stp, NC), flt(Swe)] },
    // par
    Borders { army: &[Bre, Bur, Gas, Pic], fleet: &[] },
    // pic
    Borders { army: &[Bel, Bre, Bur, Par], fleet: &[flt(Bel), flt(Bre), flt(Eng)] },
    // pie
    Borders { army: &[Mar, Tus, Tyr, Ven], fleet: &[flt(Gol), flt(Mar), flt(Tus)] },
    // por
    Borders { army: &[Spa], fleet: &[flt(Mao), edge(N, Spa, NC), edge(N, Spa, SC)] },
    // pru
    Borders { army: &[Ber, Lvn, Sil, War], fleet: &[flt(Bal), flt(Ber), flt(Lvn)] },
    // rom
    Borders { army: &[Apu, Nap, Tus, Ven], fleet: &[flt(Nap), flt(Tus), flt(Tys)] },
    // ruh
    Borders { army: &[Bel, Bur, Hol, Kie, Mun], fleet: &[] },
    // rum
    Borders { army: &[Bud, Bul, Gal, Ser, Sev, Ukr], fleet: &[flt(Bla), edge(N, Bul, EC), flt(Sev)] },
    // ser
    Borders { army: &[Alb, Bud, Bul, Gre, Rum, Tri], fleet: &[] },
    // sev
    Borders { army: &[Arm, Mos, Rum, Ukr], fleet: &[flt(Arm), flt(Bla), flt(Rum)] },
    // sil
    Borders { army: &[Ber, Boh, Gal, Mun, Pru, War], fleet: &[] },
    // ska
    Borders { army: &[], fleet: &[flt(Den), flt(Nth), flt(Nwy), flt(Swe)] },
    // smy
    Borders { army: &[Ank, Arm, Con, Syr], fleet: &[flt(Aeg), flt(Con), flt(Eas), flt(Syr)] },
    // spa
    Borders { army: &[Gas, Mar, Por], fleet: &[edge(NC, Gas, N), edge(NC, Mao, N), edge(NC, Por, N), edge(SC, Gol, N), edge(SC, Mao, N), edge(SC, Mar, N), edge(SC, Por, N), edge(SC, Wes, N)] },
    // stp
    Borders { army: &[Fin, Lvn, Mos, Nwy], fleet: &[edge(NC, Bar, N), edge(NC, Nwy, N), edge(SC, Bot, N), edge(SC, Fin, N), edge(SC, Lvn, N)] },
    // swe
    Borders { army: &[Den, Fin, Nwy], fleet: &[flt(Bal), flt(Bot), flt(Den), flt(Fin), flt(Nwy), flt(Ska)] },
    // syr
    Borders { army: &[Arm, Smy], fleet: &[flt(Eas), flt(Smy)] },
    // tri
    Borders { army: &[Alb, Bud, Ser, Tyr, Ven, Vie], fleet: &[flt(Adr), flt(Alb), flt(Ven)] },
    // tun
    Borders { army: &[Naf], fleet: &[flt(Ion), flt(Naf), flt(Tys), flt(Wes)] },
    // tus
    Borders { army: &[Pie, Rom, Ven], fleet: &[flt(Gol), flt(Pie), flt(Rom), flt(Tys)] },
    // tyr
    Borders { army: &[Boh, Mun, Pie, Tri, Ven, Vie], fleet: &[] },
    // tys
    Borders { army: &[], fleet: &[flt(Gol), flt(Ion), flt(Nap), flt(Rom), flt(Tun), flt(Tus), flt(Wes)] },
    // ukr
    Borders { army: &[Gal, Mos, Rum, Sev, War], fleet: &[] },
    // ven
    Borders { army: &[Apu, Pie, Rom, Tri, Tus, Tyr], fleet: &[flt(Adr), flt(Apu), flt(Tri)] },
    // vie
    Borders { army: &[Boh, Bud, Gal, Tri, Tyr], fleet: &[] },
    // wal
    Borders { army: &[Lon, Lvp, Yor], fleet: &[flt(Eng), flt(Iri), flt(Lon), flt(Lvp)] },
    // war
    Borders { army: &[Gal, Lvn, Mos, Pru, Sil, Ukr], fleet: &[] },
    // wes
    Borders { army: &[], fleet: &[flt(Gol), flt(Mao), flt(Naf), edge(N, Spa, SC), flt(Tun), flt(Tys)] },
    // yor
    Borders { army: &[Edi, Lon, Lvp, Wal], fleet: &[flt(Edi), flt(Lon), flt(Nth)] },
];

/// Provinces an army in `from` may move to directly.
pub fn army_borders(from: Province) -> &'static [Province] {
    BORDERS[from as usize].army
}

/// All fleet edges out of `from`, regardless of coast.
pub fn fleet_borders(from: Province) -> &'static [FleetEdge] {
    BORDERS[from as usize].fleet
}

/// True if an army may move directly from `from` to `to`.
pub fn army_reaches(from: Province, to: Province) -> bool {
    army_borders(from).contains(&to)
}

/// True if a fleet on `(from, from_coast)` may move to `(to, to_coast)`.
///
/// A `Coast::None` qualifier on either side matches any coast, mirroring an
/// order that has not yet committed to a specific coast.
pub fn fleet_reaches(from: Province, from_coast: Coast, to: Province, to_coast: Coast) -> bool {
    fleet_borders(from).iter().any(|e| {
        e.to == to
            && (from_coast == Coast::None || e.from_coast == Coast::None || e.from_coast == from_coast)
            && (to_coast == Coast::None || e.to_coast == Coast::None || e.to_coast == to_coast)
    })
}

/// The destination coasts a fleet on `(from, from_coast)` may land on in `to`.
pub fn fleet_coasts_to(from: Province, from_coast: Coast, to: Province) -> Vec<Coast> {
    let mut coasts: Vec<Coast> = fleet_borders(from)
        .iter()
        .filter(|e| {
            e.to == to
                && (from_coast == Coast::None
                    || e.from_coast == Coast::None
                    || e.from_coast == from_coast)
        })
        .map(|e| e.to_coast)
        .collect();
    coasts.dedup();
    coasts
}

/// True if a fleet in the sea province `sea` borders `p` on any coast.
///
/// This is the adjacency used when walking convoy chains: the army's origin,
/// each next fleet, and the landing province must all touch the current sea.
pub fn sea_touches(sea: Province, p: Province) -> bool {
    fleet_borders(sea).iter().any(|e| e.to == p)
}
