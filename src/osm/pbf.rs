//! Optional OSM PBF reader (Cargo feature `pbf`): a convenience adapter
//! producing the [`NodeTable`]/[`WayList`] the engine takes as input. The
//! engine itself never depends on this module or on `osmpbf`.
//!
//! Grounded on the teacher's own `parse.rs` (`osmpbf::ElementReader`,
//! `Element::Node`/`DenseNode`/`Way` handling); simplified to the fields
//! the filter (spec §4.2) actually reads (`highway`, `service`, `access`,
//! `oneway`) rather than the teacher's mode-specific `maxspeed`/`oneway`
//! typed fields, since this crate's `Way` keeps the full raw tag map.

use std::collections::BTreeMap;
use std::path::Path;

use osmpbf::{Element, ElementReader};
use thiserror::Error;

use crate::geo::Coordinate;
use crate::model::{NodeTable, Way, WayList};

#[derive(Debug, Error)]
pub enum PbfError {
    #[error("failed to read PBF file: {0}")]
    Read(#[from] osmpbf::Error),
}

/// Read every node and way from a PBF file into an in-memory
/// [`NodeTable`]/[`WayList`] pair. No filtering is applied here; that is
/// the engine's job (spec §4.2) once this adapter hands off its output.
///
/// Every way is collected regardless of tags, including ones with no
/// `highway` tag at all — the filter is the single place that decides
/// driveability, so this reader does not duplicate that judgment.
pub fn read_pbf<P: AsRef<Path>>(path: P) -> Result<(NodeTable, WayList), PbfError> {
    let reader = ElementReader::from_path(path)?;

    let mut nodes = NodeTable::new();
    let mut ways = WayList::new();

    reader.for_each(|element| match element {
        Element::Node(node) => {
            nodes.insert(node.id(), Coordinate::new(node.lat(), node.lon()));
        }
        Element::DenseNode(node) => {
            nodes.insert(node.id(), Coordinate::new(node.lat(), node.lon()));
        }
        Element::Way(way) => {
            let tags: BTreeMap<String, String> = way
                .tags()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            ways.push(Way {
                id: way.id(),
                nodes: way.refs().collect(),
                tags,
            });
        }
        Element::Relation(_) => {}
    })?;

    Ok((nodes, ways))
}
