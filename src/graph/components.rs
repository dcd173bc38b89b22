//! Weakly connected component selection (spec §4.4).

use petgraph::unionfind::UnionFind;

use super::{Graph, GraphBuilder, NodeIndex};
use crate::model::NodeId;

/// Sizes and counts of components discarded by [`select_largest`], for the
/// statistics block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentStats {
    pub kept_node_count: usize,
    pub discarded_count: usize,
    pub discarded_sizes: Vec<usize>,
}

/// Compute weakly connected components over `graph`'s undirected
/// projection, keep the one with the most nodes (ties broken by smallest
/// minimum OSM node id), and return a fresh [`Graph`] containing only
/// that component's nodes and edges.
///
/// Edges with either endpoint outside the kept component are dropped, per
/// spec §4.4. Node indices are renumbered densely in the returned graph.
pub fn select_largest(graph: &Graph) -> (Graph, ComponentStats) {
    let n = graph.node_count();
    let mut uf = UnionFind::new(n.max(1));
    for e in graph.edge_indices() {
        let (a, b) = graph.edge_endpoints(e);
        uf.union(a.index(), b.index());
    }

    // Group nodes by root, tracking size and minimum OSM id per group.
    let mut group_size: std::collections::HashMap<usize, usize> = std::collections::HashMap::new();
    let mut group_min_id: std::collections::HashMap<usize, NodeId> = std::collections::HashMap::new();
    for node in graph.node_indices() {
        let root = uf.find(node.index());
        *group_size.entry(root).or_insert(0) += 1;
        let osm_id = graph.osm_id(node);
        group_min_id
            .entry(root)
            .and_modify(|m| *m = (*m).min(osm_id))
            .or_insert(osm_id);
    }

    // Deterministic selection: sort candidate roots by (-size, min_id),
    // never rely on HashMap iteration order for the decision itself.
    let mut roots: Vec<usize> = group_size.keys().copied().collect();
    roots.sort_unstable();
    roots.sort_by(|&a, &b| {
        let size_a = group_size[&a];
        let size_b = group_size[&b];
        size_b
            .cmp(&size_a)
            .then_with(|| group_min_id[&a].cmp(&group_min_id[&b]))
    });

    let mut discarded_sizes: Vec<usize> = roots
        .iter()
        .skip(1)
        .map(|r| group_size[r])
        .collect();
    discarded_sizes.sort_unstable();

    let kept_root = roots.first().copied();

    let mut kept_node_count = 0usize;

    if let Some(kept_root) = kept_root {
        let mut kept_nodes = crate::model::NodeTable::new();
        for node in graph.node_indices() {
            if uf.find(node.index()) == kept_root {
                kept_nodes.insert(graph.osm_id(node), graph.coordinate(node));
                kept_node_count += 1;
            }
        }

        // Every kept directed edge keeps its own length unchanged, so the
        // pruned graph's arrays are built straight from the source
        // graph's edge list without recomputing haversine distances.
        let filtered_edges: Vec<(NodeIndex, NodeIndex, f64)> = graph
            .edge_indices()
            .filter(|&e| {
                let (a, _b) = graph.edge_endpoints(e);
                uf.find(a.index()) == kept_root
            })
            .map(|e| {
                let (a, b) = graph.edge_endpoints(e);
                (a, b, graph.edge_length_m(e))
            })
            .collect();

        return (
            build_pruned(graph, &kept_nodes, &filtered_edges),
            ComponentStats {
                kept_node_count,
                discarded_count: discarded_sizes.len(),
                discarded_sizes,
            },
        );
    }

    (
        GraphBuilder::new().build(&Vec::new(), &crate::model::NodeTable::new()).0,
        ComponentStats {
            kept_node_count,
            discarded_count: discarded_sizes.len(),
            discarded_sizes,
        },
    )
}

/// Construct a new dense [`Graph`] directly from a kept node table and an
/// explicit edge list (source, dest, length), preserving original edge
/// lengths rather than recomputing them from coordinates.
fn build_pruned(
    source: &Graph,
    kept_nodes: &crate::model::NodeTable,
    edges: &[(NodeIndex, NodeIndex, f64)],
) -> Graph {
    use std::collections::HashMap;

    let mut node_osm_id = Vec::with_capacity(kept_nodes.len());
    let mut coord = Vec::with_capacity(kept_nodes.len());
    let mut remap: HashMap<NodeIndex, NodeIndex> = HashMap::new();

    // Deterministic order: sort kept nodes by OSM id before assigning new
    // dense indices, so pruning never depends on HashMap iteration order.
    let mut kept_ids: Vec<NodeId> = kept_nodes.keys().copied().collect();
    kept_ids.sort_unstable();

    let mut old_index_by_osm_id: HashMap<NodeId, NodeIndex> = HashMap::new();
    for n in source.node_indices() {
        old_index_by_osm_id.insert(source.osm_id(n), n);
    }

    for (new_idx, osm_id) in kept_ids.iter().enumerate() {
        let old = old_index_by_osm_id[osm_id];
        remap.insert(old, NodeIndex(new_idx as u32));
        node_osm_id.push(*osm_id);
        coord.push(kept_nodes[osm_id]);
    }

    let mut edge_from = Vec::with_capacity(edges.len());
    let mut edge_to = Vec::with_capacity(edges.len());
    let mut edge_length_m = Vec::with_capacity(edges.len());
    for &(a, b, len) in edges {
        edge_from.push(remap[&a]);
        edge_to.push(remap[&b]);
        edge_length_m.push(len);
    }

    let mut out_adj = vec![Vec::new(); node_osm_id.len()];
    for (i, &from) in edge_from.iter().enumerate() {
        out_adj[from.index()].push(super::EdgeIndex(i as u32));
    }

    Graph {
        node_osm_id,
        coord,
        edge_from,
        edge_to,
        edge_length_m,
        out_adj,
    }
}
