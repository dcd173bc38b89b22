//! Hierholzer's algorithm, adapted to consult an external selector for
//! which unused outgoing edge to take at each step (spec §4.5).
//!
//! No direct reference implementation of this algorithm exists anywhere
//! in the retrieval pack; this follows spec §4.5's algorithmic
//! description directly, expressed over the arena graph in [`super::super::graph`].

use super::selector::{SelectorContext, TurnSelector};
use crate::graph::{EdgeIndex, Graph, NodeIndex};

/// Extract a closed Eulerian circuit starting and ending at `start`.
///
/// `graph` must already satisfy in-degree == out-degree for every node
/// and be connected (restricted to non-isolated nodes) — callers run
/// [`super::eulerize`] first. Marks edges used in a local bitset rather
/// than mutating `graph`, per spec §9.
///
/// Panics if `start` has out-degree zero; callers select a start node
/// with out-degree > 0 (spec §4.5's start-node selection rule).
pub fn extract_circuit(graph: &Graph, start: NodeIndex, selector: &dyn TurnSelector) -> Vec<EdgeIndex> {
    assert!(graph.out_degree(start) > 0, "start node must have out-degree > 0");

    let mut used = vec![false; graph.edge_count()];
    let mut node_stack: Vec<NodeIndex> = vec![start];
    let mut incoming_stack: Vec<Option<EdgeIndex>> = vec![None];
    let mut circuit: Vec<EdgeIndex> = Vec::with_capacity(graph.edge_count());

    while let Some(&u) = node_stack.last() {
        let incoming = *incoming_stack.last().unwrap();
        let candidates: Vec<EdgeIndex> = graph
            .out_edges(u)
            .iter()
            .copied()
            .filter(|e| !used[e.index()])
            .collect();

        if candidates.is_empty() {
            node_stack.pop();
            if let Some(edge) = incoming_stack.pop().unwrap() {
                circuit.push(edge);
            }
        } else {
            let chosen = selector.choose(SelectorContext {
                graph,
                current: u,
                incoming_edge: incoming,
                candidates: &candidates,
            });
            used[chosen.index()] = true;
            let (_from, v) = graph.edge_endpoints(chosen);
            node_stack.push(v);
            incoming_stack.push(Some(chosen));
        }
    }

    circuit.reverse();
    circuit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::eulerian::selector::GreedyTurnCostSelector;
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
    fn triangle_circuit_covers_every_edge_exactly_once() {
        let nodes: NodeTable = [
            (1, Coordinate::new(0.0, 0.0)),
            (2, Coordinate::new(0.0, 0.001)),
            (3, Coordinate::new(0.001, 0.0)),
        ]
        .into_iter()
        .collect();
        let ways = vec![way(1, &[1, 2, 3, 1])];
        let (graph, _) = GraphBuilder::new().build(&ways, &nodes);

        let start = graph.node_indices().find(|&n| graph.osm_id(n) == 1).unwrap();
        let selector = GreedyTurnCostSelector::new(&Config::default());
        let circuit = extract_circuit(&graph, start, &selector);

        assert_eq!(circuit.len(), graph.edge_count());
        let mut seen = vec![false; graph.edge_count()];
        for &e in &circuit {
            assert!(!seen[e.index()], "edge visited twice");
            seen[e.index()] = true;
        }
        assert!(seen.iter().all(|&s| s));

        // Closed: first edge's tail equals last edge's head.
        let first_tail = graph.edge_endpoints(circuit[0]).0;
        let last_head = graph.edge_endpoints(*circuit.last().unwrap()).1;
        assert_eq!(first_tail, last_head);
    }

    #[test]
    fn straight_chain_covers_every_edge_exactly_once() {
        let nodes: NodeTable = [
            (1, Coordinate::new(0.0, 0.002)),
            (2, Coordinate::new(0.0, 0.001)),
            (3, Coordinate::new(0.0, 0.0)),
        ]
        .into_iter()
        .collect();
        let ways = vec![way(1, &[1, 2, 3])];
        let (graph, _) = GraphBuilder::new().build(&ways, &nodes);

        let start = graph.node_indices().find(|&n| graph.osm_id(n) == 1).unwrap();
        let selector = GreedyTurnCostSelector::new(&Config::default());
        let circuit = extract_circuit(&graph, start, &selector);

        assert_eq!(circuit.len(), 4);
        let first_tail = graph.edge_endpoints(circuit[0]).0;
        let last_head = graph.edge_endpoints(*circuit.last().unwrap()).1;
        assert_eq!(first_tail, last_head);
    }
}
