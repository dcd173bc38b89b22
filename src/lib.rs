//! `postman_route`: deterministic directed Chinese Postman route generation
//! for right-side waste collection over OpenStreetMap street networks.
//!
//! The library has no knowledge of argv, files, or process exit codes; see
//! the `postman-route` binary (built with the default `cli` feature) for a
//! filesystem-facing wrapper around [`engine::generate_route`].
//!
//! Pipeline: [`osm`] filter -> [`graph`] builder -> [`graph::components`]
//! selector -> [`eulerian`] (Eulerization + Hierholzer circuit, consulting
//! the [`eulerian::selector`] turn-preferring emitter) -> [`engine`]'s
//! ordered waypoint sequence plus [`stats::Statistics`].

pub mod config;
pub mod engine;
pub mod error;
pub mod eulerian;
pub mod geo;
pub mod graph;
pub mod model;
pub mod osm;
pub mod report;
pub mod stats;

#[cfg(feature = "gpx_export")]
pub mod gpx_export;

pub use config::Config;
pub use engine::{generate_route, RouteResult};
pub use error::{ConfigError, EngineError, EngineResult};
pub use geo::Coordinate;
pub use model::{NodeId, NodeTable, Way, WayList};
pub use stats::Statistics;
