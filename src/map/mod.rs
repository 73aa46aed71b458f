//! Static data for the standard Diplomacy map.
//!
//! Provinces, powers, coasts, and the directed border graph. Everything in
//! this module is immutable; mutable game state lives in [`crate::board`].

pub mod borders;
pub mod province;

pub use borders::{
    army_borders, army_reaches, fleet_borders, fleet_coasts_to, fleet_reaches, sea_touches,
    Borders, FleetEdge, BORDERS,
};
pub use province::{
    Category, Coast, Power, Province, ProvinceMeta, ALL_POWERS, ALL_PROVINCES, METADATA,
    PROVINCE_COUNT, SUPPLY_CENTER_COUNT,
};
