//! The statistics block (spec §6): every field the engine exposes about
//! a completed route generation, consumed by the external report writer.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::geo::{forward_bearing_deg, signed_turn_angle_deg, TurnKind};
use crate::graph::{components::ComponentStats, EdgeIndex, Graph};
use crate::osm::FilterStats;

/// Counts of each turn classification observed in the final circuit
/// (spec §4.6: "derived from the final circuit; outputs, not inputs").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnCounts {
    pub straight: u64,
    pub right: u64,
    pub left: u64,
    pub u_turn: u64,
}

/// Full statistics block, field-for-field per spec §6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_length_m: f64,
    pub estimated_drive_time_s: f64,
    pub turn_counts: TurnCounts,
    pub unique_segment_count: u64,
    pub edge_count: u64,
    pub kept_component_node_count: usize,
    pub discarded_component_count: usize,
    pub discarded_component_sizes: Vec<usize>,
    pub one_way_ignored: bool,
    /// Soft failures (spec §7): ways dropped for referencing an unknown
    /// or dropped node.
    pub invalid_node_ways: u64,
    /// Soft failures (spec §7): nodes dropped for an out-of-range
    /// latitude or longitude.
    pub invalid_coordinate_nodes: u64,
}

/// Classify every turn in the closed circuit (wrapping around from the
/// last edge back to the first) and tally them.
pub fn compute_turn_counts(graph: &Graph, circuit: &[EdgeIndex], config: &Config) -> TurnCounts {
    let mut counts = TurnCounts::default();
    let n = circuit.len();
    for i in 0..n {
        let prev = circuit[(i + n - 1) % n];
        let cur = circuit[i];

        let (p, u) = graph.edge_endpoints(prev);
        let (u2, v) = graph.edge_endpoints(cur);
        debug_assert_eq!(u, u2, "circuit must be a continuous walk");

        let bearing_in = forward_bearing_deg(graph.coordinate(p), graph.coordinate(u));
        let bearing_out = forward_bearing_deg(graph.coordinate(u), graph.coordinate(v));
        let theta = signed_turn_angle_deg(bearing_in, bearing_out);

        match crate::geo::classify_turn(theta, config.straight_threshold_deg, config.u_turn_threshold_deg) {
            TurnKind::Straight => counts.straight += 1,
            TurnKind::Right => counts.right += 1,
            TurnKind::Left => counts.left += 1,
            TurnKind::UTurn => counts.u_turn += 1,
        }
    }
    counts
}

/// Assemble the full statistics block from the pipeline's intermediate
/// results.
#[allow(clippy::too_many_arguments)]
pub fn build_statistics(
    graph: &Graph,
    circuit: &[EdgeIndex],
    config: &Config,
    unique_segment_count: u64,
    component_stats: &ComponentStats,
    filter_stats: &FilterStats,
    invalid_coordinate_nodes: u64,
) -> Statistics {
    let total_length_m: f64 = circuit.iter().map(|&e| graph.edge_length_m(e)).sum();
    let avg_speed_mps = config.average_speed_kmh * 1000.0 / 3600.0;
    let estimated_drive_time_s = if avg_speed_mps > 0.0 {
        total_length_m / avg_speed_mps
    } else {
        0.0
    };

    Statistics {
        total_length_m,
        estimated_drive_time_s,
        turn_counts: compute_turn_counts(graph, circuit, config),
        unique_segment_count,
        edge_count: graph.edge_count() as u64,
        kept_component_node_count: component_stats.kept_node_count,
        discarded_component_count: component_stats.discarded_count,
        discarded_component_sizes: component_stats.discarded_sizes.clone(),
        one_way_ignored: config.ignore_oneway,
        invalid_node_ways: filter_stats.rejected_unknown_node,
        invalid_coordinate_nodes,
    }
}
