//! Rule-option switches.
//!
//! The published rules leave a handful of situations ambiguous; servers pick
//! among the documented alternatives per game. Every such choice is an
//! explicit switch here so that each paradox path is reachable and testable,
//! never an accident of implementation. Options load from JSON so a server
//! can ship per-variant files.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// How to settle a convoy paradox: a cycle in which a convoyed move's
/// success decides the fate of its own convoying fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvoyParadox {
    /// The convoyed moves in the paradox core fail; everything else then
    /// resolves normally (the Szykman rule).
    Szykman,
    /// Every move in the paradox core fails.
    AllHold,
}

/// What happens to a convoyed army whose route collapses while its
/// destination is also reachable overland.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisruptedConvoy {
    /// The move fails: a convoy order means convoy.
    Fail,
    /// The army walks instead.
    UseLandRoute,
}

/// How to treat a fleet move to a split-coast province with no coast named.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCoast {
    /// Fill in the coast when exactly one is reachable; ambiguous is CST.
    InferUnique,
    /// Always require an explicit coast.
    Fail,
}

/// The full rule-option surface of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    pub convoy_paradox: ConvoyParadox,
    pub disrupted_convoy_to_adjacent: DisruptedConvoy,
    pub missing_coast: MissingCoast,
    /// When true, a power may dislodge (or support the dislodgement of) its
    /// own units. Standard play forbids it.
    pub allow_self_dislodgement: bool,
    /// "Any orders allowed": validation accepts well-formed orders for
    /// nonexistent or foreign units; they resolve as void. Used by
    /// permissive testing modes.
    pub any_orders: bool,
    /// Supply centers needed for a solo victory.
    pub victory_centers: usize,
}

impl Default for RuleOptions {
    fn default() -> Self {
        RuleOptions {
            convoy_paradox: ConvoyParadox::Szykman,
            disrupted_convoy_to_adjacent: DisruptedConvoy::Fail,
            missing_coast: MissingCoast::InferUnique,
            allow_self_dislodgement: false,
            any_orders: false,
            victory_centers: 18,
        }
    }
}

/// Errors from loading rule options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rule options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Loads rule options from a JSON file.
pub fn load_options(path: &Path) -> Result<RuleOptions, ConfigError> {
    let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&data)?)
}

/// Loads rule options from a JSON string.
pub fn load_options_from_str(json: &str) -> Result<RuleOptions, ConfigError> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_standard_play() {
        let opts = RuleOptions::default();
        assert_eq!(opts.convoy_paradox, ConvoyParadox::Szykman);
        assert_eq!(opts.disrupted_convoy_to_adjacent, DisruptedConvoy::Fail);
        assert_eq!(opts.missing_coast, MissingCoast::InferUnique);
        assert!(!opts.allow_self_dislodgement);
        assert!(!opts.any_orders);
        assert_eq!(opts.victory_centers, 18);
    }

    #[test]
    fn partial_json_overrides_defaults() {
        let opts = load_options_from_str(r#"{"convoy_paradox": "all_hold", "any_orders": true}"#)
            .unwrap();
        assert_eq!(opts.convoy_paradox, ConvoyParadox::AllHold);
        assert!(opts.any_orders);
        assert_eq!(opts.victory_centers, 18);
    }

    #[test]
    fn unknown_option_value_is_an_error() {
        assert!(load_options_from_str(r#"{"convoy_paradox": "coin_flip"}"#).is_err());
    }
}
