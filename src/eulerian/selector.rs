//! The turn-preferring emitter's selector (spec §4.6).
//!
//! Exposed as a small trait, per spec §9's explicit guidance, so
//! alternate strategies (shortest-edge-first, a deterministic stub for
//! tests) can be swapped in without touching [`super::circuit`]. The
//! concrete strategy used by the engine is known at job start, so
//! [`super::circuit::extract_circuit`] takes `&dyn TurnSelector` exactly
//! once per job rather than per call site — no dispatch overhead beyond
//! one vtable lookup per visited node, which dominates neither the
//! selector's own `O(out_degree)` scan nor the haversine/bearing math it
//! performs.

use crate::config::{Config, TurnMultipliers};
use crate::geo::{forward_bearing_deg, signed_turn_angle_deg, turn_cost_multiplier};
use crate::graph::{EdgeIndex, Graph, NodeIndex};

/// Everything the selector needs to pick among the unused outgoing edges
/// of the node currently on top of the Hierholzer stack.
pub struct SelectorContext<'a> {
    pub graph: &'a Graph,
    pub current: NodeIndex,
    /// The edge previously traversed to arrive at `current`, if any.
    pub incoming_edge: Option<EdgeIndex>,
    /// Unused outgoing edges from `current`. Never empty when `choose` is
    /// called (spec §4.5's Hierholzer loop only calls the selector when
    /// at least one unused outgoing edge exists).
    pub candidates: &'a [EdgeIndex],
}

/// A strategy for picking one outgoing edge among several, consulted once
/// per node visit during circuit extraction.
pub trait TurnSelector {
    fn choose(&self, ctx: SelectorContext) -> EdgeIndex;
}

/// The default selector (spec §4.6): scores each candidate by
/// `turn_cost_multiplier * length`, picks the lowest score, and breaks
/// ties by smaller destination node id, then smaller edge key.
pub struct GreedyTurnCostSelector {
    straight_threshold_deg: f64,
    u_turn_threshold_deg: f64,
    multipliers: TurnMultipliers,
}

impl GreedyTurnCostSelector {
    pub fn new(config: &Config) -> Self {
        Self {
            straight_threshold_deg: config.straight_threshold_deg,
            u_turn_threshold_deg: config.u_turn_threshold_deg,
            multipliers: config.turn_multipliers,
        }
    }

    fn score(&self, graph: &Graph, p: Option<NodeIndex>, u: NodeIndex, v: NodeIndex, length_m: f64) -> f64 {
        match p {
            // Defensive: zero-length incoming edge, or this candidate is a
            // self-loop. Neither should occur given the graph builder's
            // invariants, but spec §4.6 calls them out explicitly.
            Some(p) if p != u && v != u => {
                let bearing_in = forward_bearing_deg(graph.coordinate(p), graph.coordinate(u));
                let bearing_out = forward_bearing_deg(graph.coordinate(u), graph.coordinate(v));
                let theta = signed_turn_angle_deg(bearing_in, bearing_out);
                let m = turn_cost_multiplier(
                    theta,
                    self.straight_threshold_deg,
                    self.u_turn_threshold_deg,
                    &self.multipliers,
                );
                m * length_m
            }
            _ => length_m,
        }
    }
}

impl TurnSelector for GreedyTurnCostSelector {
    fn choose(&self, ctx: SelectorContext) -> EdgeIndex {
        let p = ctx.incoming_edge.map(|e| ctx.graph.edge_endpoints(e).0);

        let mut best: Option<(f64, i64, EdgeIndex)> = None;
        for &candidate in ctx.candidates {
            let (_from, v) = ctx.graph.edge_endpoints(candidate);
            let length_m = ctx.graph.edge_length_m(candidate);
            let score = self.score(ctx.graph, p, ctx.current, v, length_m);
            let v_id = ctx.graph.osm_id(v);

            let is_better = match &best {
                None => true,
                Some((best_score, best_v_id, best_edge)) => {
                    score < *best_score
                        || (score == *best_score && v_id < *best_v_id)
                        || (score == *best_score && v_id == *best_v_id && candidate.0 < best_edge.0)
                }
            };
            if is_better {
                best = Some((score, v_id, candidate));
            }
        }

        best.expect("selector invoked with no candidates").2
    }
}
