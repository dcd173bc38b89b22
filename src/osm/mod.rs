//! OSM tag-based driveability filter (spec §4.2).
//!
//! Mirrors the shape of a tag-driven vehicle profile — one boolean
//! predicate built from a handful of independently testable checks, the
//! way `profiles/car.rs` and the pack's `routex::Profile::is_allowed`
//! express the same idea for a richer set of modes. This module only
//! needs one mode (driveable street), so it stays a free function rather
//! than a trait.

#[cfg(feature = "pbf")]
pub mod pbf;

use crate::config::Config;
use crate::model::{NodeTable, Way};

/// Why a way was rejected by the filter. Used only for reporting; it has
/// no effect on which ways survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    HighwayNotAllowed,
    HighwayExcluded,
    ServiceExcluded,
    AccessExcluded,
    TooFewNodes,
    UnknownNode,
}

/// Per-run filter statistics, surfaced through [`crate::stats::Statistics`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStats {
    pub accepted: u64,
    pub rejected_highway_not_allowed: u64,
    pub rejected_highway_excluded: u64,
    pub rejected_service_excluded: u64,
    pub rejected_access_excluded: u64,
    pub rejected_too_few_nodes: u64,
    pub rejected_unknown_node: u64,
}

impl FilterStats {
    fn record(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::HighwayNotAllowed => self.rejected_highway_not_allowed += 1,
            RejectReason::HighwayExcluded => self.rejected_highway_excluded += 1,
            RejectReason::ServiceExcluded => self.rejected_service_excluded += 1,
            RejectReason::AccessExcluded => self.rejected_access_excluded += 1,
            RejectReason::TooFewNodes => self.rejected_too_few_nodes += 1,
            RejectReason::UnknownNode => self.rejected_unknown_node += 1,
        }
    }

    /// Total ways considered (accepted + rejected).
    pub fn total(&self) -> u64 {
        self.accepted
            + self.rejected_highway_not_allowed
            + self.rejected_highway_excluded
            + self.rejected_service_excluded
            + self.rejected_access_excluded
            + self.rejected_too_few_nodes
            + self.rejected_unknown_node
    }
}

fn highway_allowed(way: &Way, config: &Config) -> bool {
    way.tag("highway")
        .map(|h| config.allowed_highways.contains(h))
        .unwrap_or(false)
}

fn highway_not_excluded(way: &Way, config: &Config) -> bool {
    way.tag("highway")
        .map(|h| !config.excluded_highways.contains(h))
        .unwrap_or(true)
}

fn service_not_excluded(way: &Way, config: &Config) -> bool {
    way.tag("service")
        .map(|s| !config.excluded_service_values.contains(s))
        .unwrap_or(true)
}

fn access_not_excluded(way: &Way, config: &Config) -> bool {
    way.tag("access")
        .map(|a| !config.excluded_access_values.contains(a))
        .unwrap_or(true)
}

fn nodes_resolvable(way: &Way, nodes: &NodeTable) -> Result<(), RejectReason> {
    if way.nodes.len() < 2 {
        return Err(RejectReason::TooFewNodes);
    }
    if way.nodes.iter().any(|id| !nodes.contains_key(id)) {
        return Err(RejectReason::UnknownNode);
    }
    Ok(())
}

/// Evaluate the five checks of spec §4.2 in order, returning the first
/// failure reason, or `Ok(())` if the way is driveable.
pub fn classify(way: &Way, nodes: &NodeTable, config: &Config) -> Result<(), RejectReason> {
    if !highway_allowed(way, config) {
        return Err(RejectReason::HighwayNotAllowed);
    }
    if !highway_not_excluded(way, config) {
        return Err(RejectReason::HighwayExcluded);
    }
    if !service_not_excluded(way, config) {
        return Err(RejectReason::ServiceExcluded);
    }
    if !access_not_excluded(way, config) {
        return Err(RejectReason::AccessExcluded);
    }
    nodes_resolvable(way, nodes)?;
    Ok(())
}

/// `true` iff `way` passes every check of spec §4.2.
pub fn is_driveable(way: &Way, nodes: &NodeTable, config: &Config) -> bool {
    classify(way, nodes, config).is_ok()
}

/// Filter a way list, returning only driveable ways plus statistics on
/// what was rejected and why. Ways that fail any check are dropped
/// silently from the returned list; only `FilterStats` records the
/// reason.
pub fn filter_ways(ways: &[Way], nodes: &NodeTable, config: &Config) -> (Vec<Way>, FilterStats) {
    let mut stats = FilterStats::default();
    let mut accepted = Vec::new();
    for way in ways {
        match classify(way, nodes, config) {
            Ok(()) => {
                stats.accepted += 1;
                accepted.push(way.clone());
            }
            Err(reason) => stats.record(reason),
        }
    }
    (accepted, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::Coordinate;
    use std::collections::BTreeMap;

    fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn nodes(ids: &[i64]) -> NodeTable {
        ids.iter().map(|&id| (id, Coordinate::new(0.0, 0.0))).collect()
    }

    fn way(id: i64, node_ids: &[i64], tag_pairs: &[(&str, &str)]) -> Way {
        Way {
            id,
            nodes: node_ids.to_vec(),
            tags: tags(tag_pairs),
        }
    }

    #[test]
    fn accepts_plain_residential() {
        let cfg = Config::default();
        let w = way(1, &[1, 2], &[("highway", "residential")]);
        assert!(is_driveable(&w, &nodes(&[1, 2]), &cfg));
    }

    #[test]
    fn rejects_missing_highway_tag() {
        let cfg = Config::default();
        let w = way(1, &[1, 2], &[]);
        assert_eq!(classify(&w, &nodes(&[1, 2]), &cfg), Err(RejectReason::HighwayNotAllowed));
    }

    #[test]
    fn rejects_footway() {
        let cfg = Config::default();
        let w = way(1, &[1, 2], &[("highway", "footway")]);
        assert_eq!(classify(&w, &nodes(&[1, 2]), &cfg), Err(RejectReason::HighwayNotAllowed));
    }

    #[test]
    fn rejects_private_access() {
        let cfg = Config::default();
        let w = way(1, &[1, 2], &[("highway", "residential"), ("access", "private")]);
        assert_eq!(classify(&w, &nodes(&[1, 2]), &cfg), Err(RejectReason::AccessExcluded));
    }

    #[test]
    fn rejects_parking_aisle_service() {
        let cfg = Config::default();
        let w = way(1, &[1, 2], &[("highway", "service"), ("service", "parking_aisle")]);
        assert_eq!(classify(&w, &nodes(&[1, 2]), &cfg), Err(RejectReason::ServiceExcluded));
    }

    #[test]
    fn rejects_unknown_node() {
        let cfg = Config::default();
        let w = way(1, &[1, 99], &[("highway", "residential")]);
        assert_eq!(classify(&w, &nodes(&[1, 2]), &cfg), Err(RejectReason::UnknownNode));
    }

    #[test]
    fn rejects_single_node_way() {
        let cfg = Config::default();
        let w = way(1, &[1], &[("highway", "residential")]);
        assert_eq!(classify(&w, &nodes(&[1]), &cfg), Err(RejectReason::TooFewNodes));
    }

    #[test]
    fn oneway_tag_does_not_affect_classification() {
        let cfg = Config::default();
        let w = way(1, &[1, 2], &[("highway", "residential"), ("oneway", "yes")]);
        assert!(is_driveable(&w, &nodes(&[1, 2]), &cfg));
    }

    #[test]
    fn filter_is_idempotent() {
        let cfg = Config::default();
        let all_nodes = nodes(&[1, 2, 3]);
        let ways = vec![
            way(1, &[1, 2], &[("highway", "residential")]),
            way(2, &[2, 3], &[("highway", "footway")]),
            way(3, &[1, 3], &[("highway", "secondary"), ("access", "private")]),
        ];
        let (first_pass, _) = filter_ways(&ways, &all_nodes, &cfg);
        let (second_pass, _) = filter_ways(&first_pass, &all_nodes, &cfg);
        assert_eq!(first_pass, second_pass);
    }
}
