//! The top-level entry point (spec §2, §5): one synchronous call from
//! parsed OSM input to an ordered waypoint sequence plus statistics.
//! Single-threaded; allocates its own graph and releases it at the end
//! of the call. No state crosses job boundaries.

use log::{debug, info};

use crate::config::Config;
use crate::error::{EngineError, EngineResult};
use crate::eulerian::circuit::extract_circuit;
use crate::eulerian::selector::GreedyTurnCostSelector;
use crate::eulerian::{eulerize, select_start_node};
use crate::geo::Coordinate;
use crate::graph::{components, GraphBuilder};
use crate::model::{NodeTable, WayList};
use crate::osm::filter_ways;
use crate::stats::{build_statistics, Statistics};

/// The engine's output (spec §6): the closed-loop coordinate sequence
/// plus the full statistics block.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub waypoints: Vec<Coordinate>,
    pub statistics: Statistics,
}

/// Drop nodes with an out-of-range latitude or longitude, returning the
/// sanitized table and a count of how many were dropped (spec §7,
/// `InvalidCoordinate`). Ways that referenced a dropped node are caught
/// downstream by the filter's node-existence check and counted as
/// `InvalidNode`/unknown-node rejections.
fn sanitize_nodes(nodes: &NodeTable) -> (NodeTable, u64) {
    let mut dropped = 0u64;
    let sanitized = nodes
        .iter()
        .filter(|(_, coord)| {
            let ok = coord.is_valid();
            if !ok {
                dropped += 1;
            }
            ok
        })
        .map(|(&id, &coord)| (id, coord))
        .collect();
    (sanitized, dropped)
}

/// Run the full pipeline: filter -> build -> select component -> eulerize
/// -> extract circuit -> statistics. Returns a hard error (spec §7) on
/// `EmptyNetwork`, `NotEulerizable`, or `Disconnected`; soft failures are
/// folded into the returned statistics instead of aborting the job.
pub fn generate_route(nodes: &NodeTable, ways: &WayList, config: &Config) -> EngineResult<RouteResult> {
    config
        .validate()
        .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;

    let (sanitized_nodes, invalid_coordinate_nodes) = sanitize_nodes(nodes);
    debug!("sanitized {} nodes, dropped {}", sanitized_nodes.len(), invalid_coordinate_nodes);

    let (accepted_ways, filter_stats) = filter_ways(ways, &sanitized_nodes, config);
    debug!(
        "filter: {} accepted of {} considered",
        filter_stats.accepted,
        filter_stats.total()
    );

    let (full_graph, build_stats) = GraphBuilder::new().build(&accepted_ways, &sanitized_nodes);
    debug!(
        "graph built: {} nodes, {} edges, {} segments",
        full_graph.node_count(),
        full_graph.edge_count(),
        build_stats.segments
    );

    let (mut graph, component_stats) = components::select_largest(&full_graph);
    info!(
        "kept component: {} nodes, {} discarded components",
        component_stats.kept_node_count, component_stats.discarded_count
    );
    if graph.edge_count() == 0 {
        return Err(EngineError::EmptyNetwork);
    }
    // Bidirectional Pairing still holds on the kept component (every
    // surviving u->v edge's v->u mate is also kept, since both endpoints
    // of a segment always land in the same component), so this is exactly
    // the unique-segment count for the network actually routed -- counted
    // before the defensive Eulerization pass might add further edges.
    let kept_segment_count = graph.edge_count() as u64 / 2;

    eulerize(&mut graph)?;

    let start = select_start_node(&graph, config.start_node_id)?;

    let selector = GreedyTurnCostSelector::new(config);
    let circuit = extract_circuit(&graph, start, &selector);
    info!("circuit extracted: {} edges", circuit.len());

    let mut waypoints = Vec::with_capacity(circuit.len() + 1);
    waypoints.push(graph.coordinate(graph.edge_endpoints(circuit[0]).0));
    for &edge in &circuit {
        waypoints.push(graph.coordinate(graph.edge_endpoints(edge).1));
    }

    let statistics = build_statistics(
        &graph,
        &circuit,
        config,
        kept_segment_count,
        &component_stats,
        &filter_stats,
        invalid_coordinate_nodes,
    );

    Ok(RouteResult { waypoints, statistics })
}
