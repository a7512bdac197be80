use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use inscribe::prelude::{analyze_sites, hex_lattice_seeded, run_pipeline, SpadeVoronoi};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;
use tracing_subscriber::EnvFilter;

mod params;
mod provenance;
mod report;
mod table;

use params::{AnalysisArgs, LatticeArgs, RunParams};
use provenance::{Artifact, Sidecar};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Inscribed circles of jittered hexagonal Voronoi cells")]
struct Cmd {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Generate, triangulate and analyze; write a JSON report
    Run {
        #[command(flatten)]
        lattice: LatticeArgs,
        /// Analyze the `x`/`y` sites of this table instead of the generated lattice;
        /// the canvas still comes from --width/--height
        #[arg(long)]
        sites: Option<PathBuf>,
        #[command(flatten)]
        analysis: AnalysisArgs,
        #[arg(long, default_value = "data/run/report.json")]
        out: PathBuf,
        /// Optional per-cell table (.csv or .parquet)
        #[arg(long)]
        table: Option<PathBuf>,
    },
    /// Write the jittered lattice points as a table
    Lattice {
        #[command(flatten)]
        lattice: LatticeArgs,
        #[arg(long, default_value = "data/lattice/points.csv")]
        out: PathBuf,
    },
    /// Print row count and radius minima of a per-cell table
    Summarize {
        #[arg(long)]
        from: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    SubscriberBuilder::default()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    init_logging(cmd.verbose);
    match cmd.action {
        Action::Run {
            lattice,
            sites,
            analysis,
            out,
            table,
        } => run(
            RunParams {
                lattice,
                analysis,
                sites,
            },
            &out,
            table.as_deref(),
        ),
        Action::Lattice { lattice, out } => lattice_points(&lattice, &out),
        Action::Summarize { from } => summarize(&from),
        Action::Report => report(),
    }
}

fn run(params: RunParams, out: &Path, table_out: Option<&Path>) -> Result<()> {
    let lattice = params.lattice.lattice_cfg();
    let region = params.lattice.region();
    let cfg = params.analysis.analysis_cfg();
    tracing::info!(
        rows = lattice.rows,
        scale_y = lattice.scale_y,
        jitter = lattice.jitter,
        seed = params.lattice.seed,
        method = ?cfg.method,
        "run"
    );

    let output = match &params.sites {
        Some(path) => {
            let sites = table::points_from_frame(&table::read_frame(path)?)
                .with_context(|| format!("reading sites from {}", path.display()))?;
            tracing::info!(path = %path.display(), sites = sites.len(), "sites_loaded");
            analyze_sites(&SpadeVoronoi, sites, &region, &cfg).context("analyzing sites")?
        }
        None => run_pipeline(&SpadeVoronoi, &lattice, &region, &cfg, params.lattice.seed)
            .context("running pipeline")?,
    };
    let analysis = &output.analysis;
    tracing::info!(
        sites = output.sites.len(),
        cells = output.cells.len(),
        analyzed = analysis.cells.len(),
        skipped = analysis.skipped.total(),
        min_site_radius = ?analysis.minima.site_radius,
        min_incenter_radius = ?analysis.minima.incenter_radius,
        "pipeline_done"
    );
    if analysis.minima.is_empty() {
        tracing::warn!("no cell qualified; minima are empty");
    }

    let doc = report::Report::new(&params, output.sites.len(), output.cells.len(), analysis);
    table::ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let params_json = serde_json::to_value(&params)?;
    let mut sidecar = Sidecar::new(Artifact::Report, params_json.clone());
    if let Some(path) = &params.sites {
        sidecar = sidecar.derived_from(path);
    }
    sidecar.write(out)?;
    tracing::info!(path = %out.display(), "report_written");

    if let Some(path) = table_out {
        let mut df = table::cells_frame(&analysis.cells)?;
        table::write_frame(&mut df, path)?;
        Sidecar::new(Artifact::CellTable, params_json)
            .derived_from(out)
            .write(path)?;
    }
    Ok(())
}

fn lattice_points(args: &LatticeArgs, out: &Path) -> Result<()> {
    let cfg = args.lattice_cfg();
    let points = hex_lattice_seeded(&cfg, args.seed).context("generating lattice")?;
    let geometry = cfg.geometry();
    tracing::info!(points = points.len(), cols = geometry.cols, "lattice");
    let mut df = table::lattice_frame(&points, geometry.cols)?;
    table::write_frame(&mut df, out)?;
    Sidecar::new(Artifact::LatticeTable, serde_json::to_value(args)?).write(out)?;
    Ok(())
}

fn summarize(from: &Path) -> Result<()> {
    let df = table::read_frame(from)?;
    let (cells, site, incenter) = table::summarize_frame(&df)?;
    let obj = serde_json::json!({
        "from": from.to_string_lossy(),
        "cells": cells,
        "min_site_radius": site,
        "min_incenter_radius": incenter,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let mut obj = provenance::header();
    obj["params"] = serde_json::json!({});
    obj["outputs"] = serde_json::json!([]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
