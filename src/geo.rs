//! Geodesic utilities: haversine distance, forward bearing, signed turn
//! angle, and turn-cost multiplier (spec §4.1), computed on a spherical
//! Earth of radius 6,371,000 m.

use geo::HaversineDistance;
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::config::TurnMultipliers;

/// A WGS-84 coordinate, decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// `true` iff both components are within their WGS-84 ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Great-circle distance between two points, in meters. Non-negative,
/// symmetric, zero for coincident points.
pub fn haversine_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let p1 = Point::new(a.lon, a.lat);
    let p2 = Point::new(b.lon, b.lat);
    p1.haversine_distance(&p2)
}

/// Forward bearing from `a` to `b`, in degrees, 0 = north, +90 = east,
/// range `[-180, 180]`. Undefined (returns `0.0`) when `a == b`; callers
/// must not rely on the value in that case — the graph builder rejects
/// zero-length segments before this is ever invoked on one.
pub fn forward_bearing_deg(a: Coordinate, b: Coordinate) -> f64 {
    if a.lat == b.lat && a.lon == b.lon {
        return 0.0;
    }
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    y.atan2(x).to_degrees()
}

/// Signed turn angle from an inbound bearing to an outbound bearing,
/// degrees in `(-180, 180]`. Positive = right turn, negative = left turn.
/// Computed with the required modulo form: no iterative normalization.
pub fn signed_turn_angle_deg(bearing_in: f64, bearing_out: f64) -> f64 {
    ((bearing_out - bearing_in + 180.0).rem_euclid(360.0)) - 180.0
}

/// Turn classification derived from a signed turn angle, using the
/// configured straight/U-turn thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnKind {
    Straight,
    Right,
    Left,
    UTurn,
}

/// Classify a signed turn angle per spec §4.6: U-turn overrides the other
/// three checks, straight is `|theta| < straight_threshold`, otherwise the
/// sign of `theta` decides right vs. left.
pub fn classify_turn(theta_deg: f64, straight_threshold_deg: f64, u_turn_threshold_deg: f64) -> TurnKind {
    if theta_deg.abs() > u_turn_threshold_deg {
        TurnKind::UTurn
    } else if theta_deg.abs() < straight_threshold_deg {
        TurnKind::Straight
    } else if theta_deg >= 0.0 {
        TurnKind::Right
    } else {
        TurnKind::Left
    }
}

/// Turn-cost multiplier applied to edge length (spec §4.1's table),
/// configurable but order-invariant (right < straight < left < u_turn).
pub fn turn_cost_multiplier(
    theta_deg: f64,
    straight_threshold_deg: f64,
    u_turn_threshold_deg: f64,
    multipliers: &TurnMultipliers,
) -> f64 {
    match classify_turn(theta_deg, straight_threshold_deg, u_turn_threshold_deg) {
        TurnKind::UTurn => multipliers.u_turn,
        TurnKind::Straight => multipliers.straight,
        TurnKind::Right => multipliers.right,
        TurnKind::Left => multipliers.left,
    }
}
