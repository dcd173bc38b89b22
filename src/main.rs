//! Thin CLI wrapper around the `postman_route` library: no routing logic
//! lives here, only argv parsing, file I/O, structured logging, and
//! wiring the engine to the optional PBF/GPX adapters.
//!
//! Grounded on the teacher's `tools/butterfly-route/src/cli.rs` +
//! `src/main.rs` `Commands` enum shape: one `clap::Subcommand` per
//! pipeline entry point, `anyhow::Result` at this application boundary,
//! typed `EngineError`/`ConfigError` only inside the library.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use postman_route::model::Fixture;
use postman_route::{generate_route, Config};

#[derive(Parser)]
#[command(name = "postman-route")]
#[command(about = "Generate a closed-loop right-side waste-collection route from an OSM extract", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a route from a parsed OSM extract.
    Generate {
        /// Input file: a `.osm.pbf` file (requires the `pbf` build
        /// feature) or a JSON fixture (`{"nodes": [...], "ways": [...]}`).
        #[arg(short, long)]
        input: PathBuf,

        /// Optional config file (JSON), overriding built-in defaults.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Optional start-node override (spec §6 `start_node_id`).
        #[arg(long)]
        start_node: Option<i64>,

        /// Write the route as a GPX track to this path (requires the
        /// `gpx_export` build feature).
        #[arg(long)]
        out_gpx: Option<PathBuf>,

        /// Write the human-readable text report to this path; printed to
        /// stdout if omitted.
        #[arg(long)]
        out_report: Option<PathBuf>,

        /// Write the JSON statistics report to this path.
        #[arg(long)]
        out_report_json: Option<PathBuf>,
    },
}

fn load_input(path: &PathBuf) -> Result<(postman_route::model::NodeTable, postman_route::model::WayList)> {
    let is_pbf = path.extension().and_then(|e| e.to_str()) == Some("pbf");

    if is_pbf {
        #[cfg(feature = "pbf")]
        {
            return postman_route::osm::pbf::read_pbf(path)
                .with_context(|| format!("reading PBF file {}", path.display()));
        }
        #[cfg(not(feature = "pbf"))]
        {
            anyhow::bail!(
                "{} looks like a PBF file, but this binary was built without the `pbf` feature",
                path.display()
            );
        }
    }

    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let fixture: Fixture =
        serde_json::from_str(&text).with_context(|| format!("parsing JSON fixture {}", path.display()))?;
    Ok(fixture.into_parts())
}

fn load_config(path: &Option<PathBuf>) -> Result<Config> {
    match path {
        None => Ok(Config::default()),
        Some(path) => {
            let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            let config: Config =
                serde_json::from_str(&text).with_context(|| format!("parsing config file {}", path.display()))?;
            config.validate().context("config file failed validation")?;
            Ok(config)
        }
    }
}

fn run_generate(
    input: PathBuf,
    config: Option<PathBuf>,
    start_node: Option<i64>,
    out_gpx: Option<PathBuf>,
    out_report: Option<PathBuf>,
    out_report_json: Option<PathBuf>,
) -> Result<()> {
    let (nodes, ways) = load_input(&input)?;
    info!("loaded {} nodes, {} ways from {}", nodes.len(), ways.len(), input.display());

    let mut config = load_config(&config)?;
    if let Some(id) = start_node {
        config.start_node_id = Some(id);
    }

    let start = Instant::now();
    let result = generate_route(&nodes, &ways, &config)?;
    info!(
        "route generated in {:.2}s: {} waypoints, {:.0} m",
        start.elapsed().as_secs_f64(),
        result.waypoints.len(),
        result.statistics.total_length_m
    );

    if let Some(gpx_path) = out_gpx {
        #[cfg(feature = "gpx_export")]
        {
            let track_name = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("collection route")
                .to_string();
            postman_route::gpx_export::write_gpx_file(&result.waypoints, &track_name, &gpx_path)
                .with_context(|| format!("writing GPX file {}", gpx_path.display()))?;
            info!("wrote GPX track to {}", gpx_path.display());
        }
        #[cfg(not(feature = "gpx_export"))]
        {
            anyhow::bail!(
                "--out-gpx was given, but this binary was built without the `gpx_export` feature: {}",
                gpx_path.display()
            );
        }
    }

    let text_report = postman_route::report::to_text(&result.statistics);
    match out_report {
        Some(path) => {
            fs::write(&path, &text_report).with_context(|| format!("writing report to {}", path.display()))?;
        }
        None => print!("{text_report}"),
    }

    if let Some(path) = out_report_json {
        let json_report =
            postman_route::report::to_json(&result.statistics).context("encoding JSON report")?;
        fs::write(&path, json_report).with_context(|| format!("writing JSON report to {}", path.display()))?;
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Generate {
            input,
            config,
            start_node,
            out_gpx,
            out_report,
            out_report_json,
        } => run_generate(input, config, start_node, out_gpx, out_report, out_report_json),
    }
}
