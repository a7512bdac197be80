//! Sweep the vertical scale and print the two minima per setting.
//!
//! Usage:
//!   cargo run -p inscribe --example scale_sweep
//!   cargo run -p inscribe --example scale_sweep -- exact

use inscribe::prelude::*;

fn main() {
    let method = match std::env::args().nth(1).as_deref() {
        Some("exact") => Method::Exact,
        None | Some("climb") => Method::HillClimb,
        Some(other) => {
            eprintln!("usage: scale_sweep [climb|exact] (got {other})");
            return;
        }
    };
    let region = BoundingRegion::canvas(960.0, 500.0);
    let cfg = AnalysisCfg {
        method,
        ..AnalysisCfg::default()
    };
    for scale_y in [0.25, 0.31, 0.5, 0.75, 1.0] {
        let lattice = LatticeCfg {
            scale_y,
            ..LatticeCfg::default()
        };
        match run_pipeline(&SpadeVoronoi, &lattice, &region, &cfg, 2025) {
            Ok(out) => {
                let m = out.analysis.minima;
                let fmt = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |r| format!("{r:.2}"));
                println!(
                    "scale_y={scale_y:.2}: cells={} min_site={} min_incircle={}",
                    out.analysis.cells.len(),
                    fmt(m.site_radius),
                    fmt(m.incenter_radius)
                );
            }
            Err(e) => eprintln!("scale_y={scale_y:.2}: {e}"),
        }
    }
}
