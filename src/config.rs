//! Engine configuration (spec §6's configuration table).
//!
//! A `Config` is a plain value, passed by reference into [`crate::engine`];
//! there is no global mutable configuration state anywhere in this crate.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// The four turn-cost multipliers, in the order (straight, right, left,
/// u_turn). Kept as one type so `validate()` can enforce the ordering
/// invariant (right < straight < left < u_turn) against a single value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnMultipliers {
    pub straight: f64,
    pub right: f64,
    pub left: f64,
    pub u_turn: f64,
}

impl Default for TurnMultipliers {
    fn default() -> Self {
        Self {
            straight: 1.0,
            right: 0.5,
            left: 2.0,
            u_turn: 3.0,
        }
    }
}

/// Engine configuration. Every field corresponds to a row of spec §6's
/// configuration table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `highway` values accepted by the filter.
    pub allowed_highways: BTreeSet<String>,
    /// `highway` values forcibly rejected, even if also in `allowed_highways`.
    pub excluded_highways: BTreeSet<String>,
    /// `service` tag values rejected.
    pub excluded_service_values: BTreeSet<String>,
    /// `access` tag values rejected.
    pub excluded_access_values: BTreeSet<String>,
    /// Must be `true` in this version of the engine; one-way restrictions
    /// are deliberately ignored so both curbs are serviced.
    pub ignore_oneway: bool,
    pub turn_multipliers: TurnMultipliers,
    /// `|theta|` below which a turn counts as straight.
    pub straight_threshold_deg: f64,
    /// `|theta|` above which a turn counts as a U-turn.
    pub u_turn_threshold_deg: f64,
    /// Used only for the drive-time estimate; never affects routing.
    pub average_speed_kmh: f64,
    /// Optional override for start-node selection.
    pub start_node_id: Option<i64>,
}

fn string_set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_highways: string_set(&[
                "residential",
                "unclassified",
                "service",
                "tertiary",
                "secondary",
            ]),
            excluded_highways: string_set(&[
                "footway", "cycleway", "steps", "path", "track", "pedestrian",
            ]),
            excluded_service_values: string_set(&["parking_aisle", "parking"]),
            excluded_access_values: string_set(&["private", "no"]),
            ignore_oneway: true,
            turn_multipliers: TurnMultipliers::default(),
            straight_threshold_deg: 10.0,
            u_turn_threshold_deg: 150.0,
            average_speed_kmh: 30.0,
            start_node_id: None,
        }
    }
}

impl Config {
    /// Checks the invariants spec §6 calls out explicitly: the
    /// right < straight < left < u_turn multiplier ordering,
    /// `ignore_oneway == true`, and a sane threshold ordering.
    pub fn validate(&self) -> ConfigResult<()> {
        let m = &self.turn_multipliers;
        if !(m.straight.is_finite()
            && m.right.is_finite()
            && m.left.is_finite()
            && m.u_turn.is_finite()
            && self.straight_threshold_deg.is_finite()
            && self.u_turn_threshold_deg.is_finite()
            && m.straight >= 0.0
            && m.right >= 0.0
            && m.left >= 0.0
            && m.u_turn >= 0.0)
        {
            return Err(ConfigError::NonFinite);
        }
        if !(m.right < m.straight && m.straight < m.left && m.left < m.u_turn) {
            return Err(ConfigError::TurnMultiplierOrdering(*m));
        }
        if !self.ignore_oneway {
            return Err(ConfigError::OnewayNotIgnored);
        }
        if !(self.straight_threshold_deg < self.u_turn_threshold_deg) {
            return Err(ConfigError::ThresholdOrdering {
                straight: self.straight_threshold_deg,
                u_turn: self.u_turn_threshold_deg,
            });
        }
        Ok(())
    }
}
