//! Eulerization and circuit extraction (spec §4.5): the defensive
//! imbalance fallback, start-node selection, and the Hierholzer circuit
//! solver that consults the turn-preferring selector (§4.6) at each step.

pub mod circuit;
pub mod selector;

use crate::error::EngineError;
use crate::graph::{EdgeIndex, Graph, NodeIndex};

/// Restore in-degree == out-degree everywhere, if it doesn't already
/// hold. The Bidirectional Pairing invariant makes this a no-op for
/// ordinary builder output (every edge has a same-length mate in the
/// opposite direction); this exists only as the defensive fallback spec
/// §4.5 mandates for a relaxed builder.
///
/// For each imbalanced node, repeatedly pick the lowest-id node with a
/// deficit of outgoing edges (a sink: in-degree > out-degree) and
/// duplicate edges along the shortest directed path (by length) to the
/// nearest node with a surplus of outgoing edges (a source: out-degree >
/// in-degree, ties broken by smallest node id), until every deficit is
/// absorbed. Duplicating a path from a sink to a source adds one
/// outgoing edge at the sink and one incoming edge at the source, moving
/// both toward balance; the reverse direction would widen both
/// imbalances instead of closing them. Re-verifies degree balance before
/// returning.
pub fn eulerize(graph: &mut Graph) -> Result<(), EngineError> {
    loop {
        let deficits = degree_deficits(graph);
        if deficits.iter().all(|&d| d == 0) {
            break;
        }

        let sink = (0..graph.node_count())
            .find(|&i| deficits[i] < 0)
            .map(|i| NodeIndex(i as u32));
        let sink = match sink {
            Some(s) => s,
            None => {
                return Err(EngineError::NotEulerizable {
                    reason: "surplus and deficit totals disagree".to_string(),
                })
            }
        };

        let (dist, prev_edge) = dijkstra_from(graph, sink);

        let source = (0..graph.node_count())
            .filter(|&i| deficits[i] > 0)
            .filter_map(|i| dist[i].map(|d| (d, i)))
            .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap().then(a.1.cmp(&b.1)))
            .map(|(_, i)| NodeIndex(i as u32));
        let source = match source {
            Some(s) => s,
            None => {
                return Err(EngineError::NotEulerizable {
                    reason: format!("no reachable source for deficit at node index {}", sink.0),
                })
            }
        };

        let mut path_edges: Vec<EdgeIndex> = Vec::new();
        let mut cur = source;
        while cur != sink {
            let e = prev_edge[cur.index()].expect("dijkstra reachability guarantees a predecessor");
            path_edges.push(e);
            cur = graph.edge_endpoints(e).0;
        }
        path_edges.reverse();
        for e in path_edges {
            graph.duplicate_edge(e);
        }
    }

    let deficits = degree_deficits(graph);
    if deficits.iter().any(|&d| d != 0) {
        return Err(EngineError::NotEulerizable {
            reason: "degree balance could not be restored".to_string(),
        });
    }
    Ok(())
}

fn degree_deficits(graph: &Graph) -> Vec<i64> {
    let in_degrees = graph.in_degrees();
    graph
        .node_indices()
        .map(|n| graph.out_degree(n) as i64 - in_degrees[n.index()] as i64)
        .collect()
}

/// Single-source shortest paths by edge length, over the graph's own
/// adjacency. `O(n^2)`: acceptable since this only runs on the defensive
/// Eulerization path, never in the ordinary case.
fn dijkstra_from(graph: &Graph, source: NodeIndex) -> (Vec<Option<f64>>, Vec<Option<EdgeIndex>>) {
    let n = graph.node_count();
    let mut dist = vec![None; n];
    let mut prev_edge = vec![None; n];
    let mut visited = vec![false; n];
    dist[source.index()] = Some(0.0);

    for _ in 0..n {
        let mut u = None;
        let mut best = f64::INFINITY;
        for i in 0..n {
            if !visited[i] {
                if let Some(d) = dist[i] {
                    if d < best {
                        best = d;
                        u = Some(i);
                    }
                }
            }
        }
        let u = match u {
            Some(u) => u,
            None => break,
        };
        visited[u] = true;
        for &e in graph.out_edges(NodeIndex(u as u32)) {
            let (_from, v) = graph.edge_endpoints(e);
            let candidate = best + graph.edge_length_m(e);
            if dist[v.index()].map_or(true, |d| candidate < d) {
                dist[v.index()] = Some(candidate);
                prev_edge[v.index()] = Some(e);
            }
        }
    }
    (dist, prev_edge)
}

/// Pick the circuit's start node (spec §4.5): the caller's override if it
/// belongs to the graph and has out-degree > 0, otherwise the
/// smallest-id node with out-degree > 0.
pub fn select_start_node(graph: &Graph, start_node_id: Option<i64>) -> Result<NodeIndex, EngineError> {
    if let Some(id) = start_node_id {
        if let Some(n) = graph.node_indices().find(|&n| graph.osm_id(n) == id) {
            if graph.out_degree(n) > 0 {
                return Ok(n);
            }
        }
    }
    graph
        .node_indices()
        .filter(|&n| graph.out_degree(n) > 0)
        .min_by_key(|&n| graph.osm_id(n))
        .ok_or(EngineError::Disconnected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use crate::graph::GraphBuilder;
    use crate::model::{NodeTable, Way};
    use std::collections::BTreeMap;

    fn way(id: i64, nodes: &[i64]) -> Way {
        Way {
            id,
            nodes: nodes.to_vec(),
            tags: BTreeMap::new(),
        }
    }

    #[test]
    fn balanced_graph_needs_no_eulerization() {
        let nodes: NodeTable = [
            (1, Coordinate::new(0.0, 0.0)),
            (2, Coordinate::new(0.0, 0.001)),
            (3, Coordinate::new(0.001, 0.0)),
        ]
        .into_iter()
        .collect();
        let ways = vec![way(1, &[1, 2, 3, 1])];
        let (mut graph, _) = GraphBuilder::new().build(&ways, &nodes);
        let edges_before = graph.edge_count();
        eulerize(&mut graph).unwrap();
        assert_eq!(graph.edge_count(), edges_before);
    }

    #[test]
    fn imbalanced_graph_is_rebalanced_and_terminates() {
        // Artificially break Bidirectional Pairing (as the defensive fallback
        // assumes could happen upstream): duplicate one edge of an otherwise
        // balanced triangle, giving its tail a +1 (out > in) deficit and its
        // head a -1 (in > out) deficit. The fix must run the augmenting path
        // from the -1 node to the +1 node; the reverse direction widens both
        // imbalances every iteration and never terminates.
        let nodes: NodeTable = [
            (1, Coordinate::new(0.0, 0.0)),
            (2, Coordinate::new(0.0, 0.001)),
            (3, Coordinate::new(0.001, 0.0)),
        ]
        .into_iter()
        .collect();
        let ways = vec![way(1, &[1, 2, 3, 1])];
        let (mut graph, _) = GraphBuilder::new().build(&ways, &nodes);

        let one = graph.node_indices().find(|&n| graph.osm_id(n) == 1).unwrap();
        let edge_from_one = graph
            .out_edges(one)
            .first()
            .copied()
            .expect("node 1 has outgoing edges");
        graph.duplicate_edge(edge_from_one);

        eulerize(&mut graph).unwrap();

        let in_degrees = graph.in_degrees();
        for n in graph.node_indices() {
            assert_eq!(graph.out_degree(n) as u32, in_degrees[n.index()]);
        }
    }

    #[test]
    fn start_node_prefers_override_when_valid() {
        let nodes: NodeTable = [(5, Coordinate::new(0.0, 0.0)), (7, Coordinate::new(0.0, 0.001))]
            .into_iter()
            .collect();
        let ways = vec![way(1, &[5, 7])];
        let (graph, _) = GraphBuilder::new().build(&ways, &nodes);
        let start = select_start_node(&graph, Some(7)).unwrap();
        assert_eq!(graph.osm_id(start), 7);
    }

    #[test]
    fn start_node_falls_back_to_smallest_id_with_out_degree() {
        let nodes: NodeTable = [(5, Coordinate::new(0.0, 0.0)), (7, Coordinate::new(0.0, 0.001))]
            .into_iter()
            .collect();
        let ways = vec![way(1, &[5, 7])];
        let (graph, _) = GraphBuilder::new().build(&ways, &nodes);
        let start = select_start_node(&graph, None).unwrap();
        assert_eq!(graph.osm_id(start), 5);
    }
}
