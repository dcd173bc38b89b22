//! Directed multigraph with enforced Bidirectional Pairing (spec §4.3),
//! represented as a dense arena of nodes and edges addressed by index.
//!
//! Nodes hold no edge references; edges hold node indices; adjacency is a
//! separate structure derived from the edge array. This is the "arena +
//! indices, not cyclic references" shape spec §9 calls for, generalizing
//! the CSR-style `RoadNetwork`/`RoadNetworkBuilder` split used for road
//! networks elsewhere in the pack to a graph that must also support the
//! rare defensive Eulerization augmentation (cheap to extend because
//! nothing but flat `Vec`s needs touching).

pub mod components;

use std::collections::HashMap;

use crate::geo::{haversine_distance_m, Coordinate};
use crate::model::{NodeId, NodeTable, WayList};

/// Dense index of a node within a [`Graph`]. Distinct from the OSM
/// [`NodeId`] the node was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Dense index of an edge within a [`Graph`]. Also serves as the `key`
/// spec §3 requires to disambiguate parallel edges between the same
/// ordered node pair: two edges with the same `(from, to)` are
/// distinguished by comparing their `EdgeIndex`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeIndex(pub u32);

impl EdgeIndex {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Directed multigraph: arena of nodes and edges plus per-node outgoing
/// adjacency (lists of edge indices, per spec §9, to avoid both hashing
/// node pairs and mutating containers mid-iteration).
#[derive(Debug, Clone)]
pub struct Graph {
    node_osm_id: Vec<NodeId>,
    coord: Vec<Coordinate>,
    edge_from: Vec<NodeIndex>,
    edge_to: Vec<NodeIndex>,
    edge_length_m: Vec<f64>,
    out_adj: Vec<Vec<EdgeIndex>>,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.node_osm_id.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_from.len()
    }

    pub fn osm_id(&self, n: NodeIndex) -> NodeId {
        self.node_osm_id[n.index()]
    }

    pub fn coordinate(&self, n: NodeIndex) -> Coordinate {
        self.coord[n.index()]
    }

    pub fn out_edges(&self, n: NodeIndex) -> &[EdgeIndex] {
        &self.out_adj[n.index()]
    }

    pub fn out_degree(&self, n: NodeIndex) -> usize {
        self.out_adj[n.index()].len()
    }

    /// O(E); in-degree is not tracked incrementally since it is only
    /// needed at a handful of checkpoints (post-build, post-Eulerization),
    /// never inside the Hierholzer hot loop.
    pub fn in_degrees(&self) -> Vec<u32> {
        let mut deg = vec![0u32; self.node_count()];
        for &to in &self.edge_to {
            deg[to.index()] += 1;
        }
        deg
    }

    pub fn edge_endpoints(&self, e: EdgeIndex) -> (NodeIndex, NodeIndex) {
        (self.edge_from[e.index()], self.edge_to[e.index()])
    }

    pub fn edge_length_m(&self, e: EdgeIndex) -> f64 {
        self.edge_length_m[e.index()]
    }

    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.node_count() as u32).map(NodeIndex)
    }

    pub fn edge_indices(&self) -> impl Iterator<Item = EdgeIndex> {
        (0..self.edge_count() as u32).map(EdgeIndex)
    }

    /// Append a new edge and update adjacency. Used by the defensive
    /// Eulerization pass (spec §4.5) to duplicate existing edges along a
    /// shortest path; never used by ordinary graph construction, which
    /// goes through [`GraphBuilder`].
    pub fn duplicate_edge(&mut self, e: EdgeIndex) -> EdgeIndex {
        let from = self.edge_from[e.index()];
        let to = self.edge_to[e.index()];
        let len = self.edge_length_m[e.index()];
        let new_id = EdgeIndex(self.edge_from.len() as u32);
        self.edge_from.push(from);
        self.edge_to.push(to);
        self.edge_length_m.push(len);
        self.out_adj[from.index()].push(new_id);
        new_id
    }
}

/// Accumulates nodes and directed edges, then finalizes them into a
/// [`Graph`]'s dense arrays. Mirrors the accumulate-then-finalize builder
/// shape used for CSR road networks elsewhere in the pack.
pub struct GraphBuilder {
    node_osm_id: Vec<NodeId>,
    coord: Vec<Coordinate>,
    node_index: HashMap<NodeId, NodeIndex>,
    edge_from: Vec<NodeIndex>,
    edge_to: Vec<NodeIndex>,
    edge_length_m: Vec<f64>,
}

/// Counts surfaced alongside a built [`Graph`] for the statistics block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub segments: u64,
    pub self_loops_skipped: u64,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            node_osm_id: Vec::new(),
            coord: Vec::new(),
            node_index: HashMap::new(),
            edge_from: Vec::new(),
            edge_to: Vec::new(),
            edge_length_m: Vec::new(),
        }
    }

    fn node_index(&mut self, id: NodeId, nodes: &NodeTable) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(&id) {
            return idx;
        }
        let idx = NodeIndex(self.node_osm_id.len() as u32);
        self.node_osm_id.push(id);
        self.coord.push(nodes[&id]);
        self.node_index.insert(id, idx);
        idx
    }

    /// Build the directed multigraph for an already-filtered way list
    /// (spec §4.3): for every adjacent node pair in every way, skip
    /// self-loops, then insert a u->v and a v->u edge, each a fresh key.
    pub fn build(mut self, ways: &WayList, nodes: &NodeTable) -> (Graph, BuildStats) {
        let mut stats = BuildStats::default();
        for way in ways {
            for pair in way.nodes.windows(2) {
                let (u_id, v_id) = (pair[0], pair[1]);
                if u_id == v_id {
                    stats.self_loops_skipped += 1;
                    continue;
                }
                let u = self.node_index(u_id, nodes);
                let v = self.node_index(v_id, nodes);
                let d = haversine_distance_m(self.coord[u.index()], self.coord[v.index()]);

                self.edge_from.push(u);
                self.edge_to.push(v);
                self.edge_length_m.push(d);

                self.edge_from.push(v);
                self.edge_to.push(u);
                self.edge_length_m.push(d);

                stats.segments += 1;
            }
        }

        let node_count = self.node_osm_id.len();
        let mut out_adj = vec![Vec::new(); node_count];
        for (i, &from) in self.edge_from.iter().enumerate() {
            out_adj[from.index()].push(EdgeIndex(i as u32));
        }

        (
            Graph {
                node_osm_id: self.node_osm_id,
                coord: self.coord,
                edge_from: self.edge_from,
                edge_to: self.edge_to,
                edge_length_m: self.edge_length_m,
                out_adj,
            },
            stats,
        )
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
