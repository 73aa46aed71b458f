//! Entente -- a Diplomacy order-adjudication engine.
//!
//! The crate is the "judge" at the heart of a Diplomacy server: it holds an
//! authoritative board position, takes one order per unit from the
//! surrounding network layer, adjudicates the whole set simultaneously
//! (including support cuts, convoy disruptions, and genuine paradoxes), and
//! hands back a report plus the next position. The wire protocol, lobby,
//! and any order-generating bots live outside and talk to this crate
//! through [`turn::TurnController`].

pub mod board;
pub mod config;
pub mod judge;
pub mod map;
pub mod order;
pub mod report;
pub mod turn;
