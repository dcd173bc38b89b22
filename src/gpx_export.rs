//! Optional GPX track writer (Cargo feature `gpx_export`): translates the
//! engine's waypoint sequence into a `gpx::Gpx` document with exactly one
//! track containing exactly one segment, one point per coordinate, in
//! order, duplicates preserved (spec §6's "Downstream GPX contract" — no
//! deduplication, no smoothing). A thin translation layer with no
//! influence on engine semantics.
//!
//! Grounded on `valhalla-client-rs::route::Leg`'s `From<&Leg> for
//! gpx::TrackSegment` / `From<Trip> for gpx::Gpx` conversions: build the
//! `geo_types::Point` per waypoint, wrap each in a `gpx::Waypoint`, and
//! assemble one `Track`/`TrackSegment`.

use std::io::Write;
use std::path::Path;

use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};
use thiserror::Error;

use crate::geo::Coordinate;

#[derive(Debug, Error)]
pub enum GpxExportError {
    #[error("failed to write GPX file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode GPX: {0}")]
    Encode(#[from] gpx::errors::GpxError),
}

/// Build a `gpx::Gpx` document from an ordered waypoint sequence. Caller
/// supplies the track name (e.g. the area being serviced); no other
/// metadata is invented.
pub fn to_gpx(waypoints: &[Coordinate], track_name: &str) -> Gpx {
    let points: Vec<Waypoint> = waypoints
        .iter()
        .map(|c| Waypoint::new(geo::Point::new(c.lon, c.lat)))
        .collect();

    let segment = TrackSegment { points };
    let track = Track {
        name: Some(track_name.to_string()),
        segments: vec![segment],
        ..Default::default()
    };

    Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("postman-route".to_string()),
        tracks: vec![track],
        ..Default::default()
    }
}

/// Write the waypoint sequence to `path` as a GPX 1.1 file.
pub fn write_gpx_file<P: AsRef<Path>>(
    waypoints: &[Coordinate],
    track_name: &str,
    path: P,
) -> Result<(), GpxExportError> {
    let gpx = to_gpx(waypoints, track_name);
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    gpx::write(&gpx, &mut writer)?;
    writer.flush()?;
    Ok(())
}
