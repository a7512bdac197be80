//! JSON report of one run: params, minima, skip counts and per-cell rows.

use inscribe::prelude::{Analysis, CellReport, RadiusResult};
use serde::Serialize;

use crate::params::RunParams;

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl From<RadiusResult> for Circle {
    fn from(c: RadiusResult) -> Self {
        Self {
            x: c.center.x,
            y: c.center.y,
            r: c.radius,
        }
    }
}

#[derive(Serialize, Debug, Clone)]
pub struct CellRow {
    pub index: usize,
    pub site: [f64; 2],
    pub edges: usize,
    pub nearest_edge: usize,
    pub site_circle: Circle,
    pub incircle: Circle,
    pub iterations: usize,
    pub hit_cap: bool,
}

impl From<&CellReport> for CellRow {
    fn from(r: &CellReport) -> Self {
        Self {
            index: r.index,
            site: [r.site.x, r.site.y],
            edges: r.edges,
            nearest_edge: r.nearest_edge,
            site_circle: r.site_circle.into(),
            incircle: r.incircle.into(),
            iterations: r.iterations,
            hit_cap: r.hit_cap,
        }
    }
}

/// Minima as JSON; `null` means no cell qualified.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct MinimaRow {
    pub site_radius: Option<f64>,
    pub incenter_radius: Option<f64>,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedRow {
    pub on_boundary: usize,
    pub unexpected_shape: usize,
    pub degenerate: usize,
    pub failed: usize,
}

#[derive(Serialize, Debug, Clone)]
pub struct Report<'a> {
    pub params: &'a RunParams,
    pub sites: usize,
    pub cells: usize,
    pub analyzed: usize,
    pub capped: usize,
    pub skipped: SkippedRow,
    pub minima: MinimaRow,
    pub rows: Vec<CellRow>,
}

impl<'a> Report<'a> {
    pub fn new(params: &'a RunParams, sites: usize, cells: usize, analysis: &Analysis) -> Self {
        let s = analysis.skipped;
        Self {
            params,
            sites,
            cells,
            analyzed: analysis.cells.len(),
            capped: analysis.cells.iter().filter(|r| r.hit_cap).count(),
            skipped: SkippedRow {
                on_boundary: s.on_boundary,
                unexpected_shape: s.unexpected_shape,
                degenerate: s.degenerate,
                failed: s.failed,
            },
            minima: MinimaRow {
                site_radius: analysis.minima.site_radius,
                incenter_radius: analysis.minima.incenter_radius,
            },
            rows: analysis.cells.iter().map(CellRow::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{AnalysisArgs, LatticeArgs};
    use clap::Parser;
    use inscribe::prelude::{CellClass, CellOutcome, Point};

    #[derive(Parser)]
    struct Flags {
        #[command(flatten)]
        lattice: LatticeArgs,
        #[command(flatten)]
        analysis: AnalysisArgs,
    }

    fn params() -> RunParams {
        let p = Flags::parse_from(["cli", "--rows", "4"]);
        RunParams {
            lattice: p.lattice,
            analysis: p.analysis,
            sites: None,
        }
    }

    fn report(index: usize, r: f64, hit_cap: bool) -> CellReport {
        let site = Point::new(10.0 * index as f64, 5.0);
        CellReport {
            index,
            site,
            edges: 6,
            site_circle: RadiusResult::new(site, r),
            nearest_edge: 2,
            incircle: RadiusResult::new(site, r + 1.0),
            iterations: 4,
            hit_cap,
        }
    }

    #[test]
    fn report_carries_minima_counts_and_rows() {
        let mut a = Analysis::default();
        a.push(CellOutcome::Analyzed(report(0, 3.0, false)));
        a.push(CellOutcome::Analyzed(report(3, 2.0, true)));
        a.push(CellOutcome::Skipped(CellClass::OnBoundary));
        let params = params();
        let json = serde_json::to_value(Report::new(&params, 5, 4, &a)).unwrap();
        assert_eq!(json["analyzed"], 2);
        assert_eq!(json["capped"], 1);
        assert_eq!(json["skipped"]["on_boundary"], 1);
        assert_eq!(json["minima"]["site_radius"], 2.0);
        assert_eq!(json["minima"]["incenter_radius"], 3.0);
        assert_eq!(json["rows"][1]["index"], 3);
        assert_eq!(json["rows"][1]["site"][0], 30.0);
        assert_eq!(json["params"]["lattice"]["rows"], 4);
    }

    #[test]
    fn empty_analysis_serializes_null_minima() {
        let params = params();
        let json = serde_json::to_value(Report::new(&params, 0, 0, &Analysis::default())).unwrap();
        assert!(json["minima"]["site_radius"].is_null());
        assert!(json["minima"]["incenter_radius"].is_null());
        assert_eq!(json["rows"].as_array().map(Vec::len), Some(0));
    }
}
