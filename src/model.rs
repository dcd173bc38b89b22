//! Input data model (spec §3): nodes, ways, and the table/list types the
//! engine accepts as programmatic input. The engine never parses OSM
//! itself (see the optional `osm::pbf` adapter for that).

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// 64-bit OSM node identifier.
pub type NodeId = i64;

/// Node table: every known node id mapped to its coordinate. Owned by the
/// caller; the engine only ever borrows it.
pub type NodeTable = HashMap<NodeId, Coordinate>;

/// An OSM way: an ordered list of node ids (length >= 2 once accepted) plus
/// its tag mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Way {
    pub id: i64,
    pub nodes: Vec<NodeId>,
    pub tags: BTreeMap<String, String>,
}

impl Way {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(|s| s.as_str())
    }
}

/// Ordered collection of ways, as supplied by an external parser.
pub type WayList = Vec<Way>;

/// A plain-JSON stand-in for a parsed OSM extract, used by the CLI's
/// `--input some.json` path and by integration tests: a named node list
/// plus a way list, in the same shape [`NodeTable`]/[`WayList`] expect
/// once collected. Not used by the engine itself, which only ever takes
/// [`NodeTable`]/[`WayList`] by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fixture {
    pub nodes: Vec<FixtureNode>,
    pub ways: WayList,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureNode {
    pub id: NodeId,
    pub lat: f64,
    pub lon: f64,
}

impl Fixture {
    /// Collect into the `(NodeTable, WayList)` pair the engine expects.
    pub fn into_parts(self) -> (NodeTable, WayList) {
        let nodes = self
            .nodes
            .into_iter()
            .map(|n| (n.id, Coordinate::new(n.lat, n.lon)))
            .collect();
        (nodes, self.ways)
    }
}
