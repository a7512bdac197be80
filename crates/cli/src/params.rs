//! Command-line parameters and their mapping onto the library configs.
//!
//! Defaults match the viewer: radius 60, vertical scale 0.31, jitter 20 on a
//! 960×500 canvas with 120 lattice rows.

use clap::{Args, ValueEnum};
use inscribe::prelude::{
    AnalysisCfg, BoundingRegion, ClassifyCfg, LatticeCfg, Method, SearchCfg, Validity,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Clone, Debug, Serialize)]
pub struct LatticeArgs {
    /// Base hex radius
    #[arg(long, default_value_t = 60.0)]
    pub radius: f64,
    /// Vertical scale factor, conceptually in (0, 1]
    #[arg(long, default_value_t = 0.31)]
    pub scale_y: f64,
    /// Jitter window width (uniform in ±jitter/2 per axis)
    #[arg(long, default_value_t = 20.0)]
    pub jitter: f64,
    /// Canvas width
    #[arg(long, default_value_t = 960.0)]
    pub width: f64,
    /// Canvas height
    #[arg(long, default_value_t = 500.0)]
    pub height: f64,
    /// Lattice rows
    #[arg(long, default_value_t = 120)]
    pub rows: usize,
    /// RNG seed for the jitter
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
}

impl LatticeArgs {
    pub fn lattice_cfg(&self) -> LatticeCfg {
        LatticeCfg {
            radius: self.radius,
            scale_y: self.scale_y,
            jitter: self.jitter,
            width: self.width,
            rows: self.rows,
        }
    }

    pub fn region(&self) -> BoundingRegion {
        BoundingRegion::canvas(self.width, self.height)
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ValidityArg {
    /// Accept every candidate (distance >= 0 always holds)
    Unsigned,
    /// Accept only candidates inside the cell
    Inside,
}

#[derive(ValueEnum, Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum MethodArg {
    HillClimb,
    Exact,
}

fn non_negative_finite(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() && v >= 0.0 {
        Ok(v)
    } else {
        Err(format!("expected a finite value >= 0, got {s}"))
    }
}

#[derive(Args, Clone, Debug, Serialize)]
pub struct AnalysisArgs {
    /// Hill-climbing grid step
    #[arg(long, default_value_t = 1.0)]
    pub step: f64,
    /// Hill-climbing round cap
    #[arg(long, default_value_t = 100)]
    pub max_iterations: usize,
    #[arg(long, value_enum, default_value_t = ValidityArg::Unsigned)]
    pub validity: ValidityArg,
    #[arg(long, value_enum, default_value_t = MethodArg::HillClimb)]
    pub method: MethodArg,
    /// Tolerance for boundary contact (0 = exact equality)
    #[arg(long, default_value_t = 0.0, value_parser = non_negative_finite)]
    pub boundary_tol: f64,
    /// Edge count a cell needs to be analyzed
    #[arg(long, default_value_t = 6)]
    pub expected_edges: usize,
}

impl AnalysisArgs {
    pub fn analysis_cfg(&self) -> AnalysisCfg {
        AnalysisCfg {
            classify: ClassifyCfg {
                expected_edges: self.expected_edges,
                boundary_tol: self.boundary_tol,
            },
            search: SearchCfg {
                step: self.step,
                max_iterations: self.max_iterations,
                validity: match self.validity {
                    ValidityArg::Unsigned => Validity::Unsigned,
                    ValidityArg::Inside => Validity::Inside,
                },
            },
            method: match self.method {
                MethodArg::HillClimb => Method::HillClimb,
                MethodArg::Exact => Method::Exact,
            },
        }
    }
}

/// Snapshot of everything a run depends on; serialized into reports and sidecars.
#[derive(Clone, Debug, Serialize)]
pub struct RunParams {
    pub lattice: LatticeArgs,
    pub analysis: AnalysisArgs,
    /// Site table used instead of the generated lattice.
    pub sites: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Flags {
        #[command(flatten)]
        lattice: LatticeArgs,
        #[command(flatten)]
        analysis: AnalysisArgs,
    }

    #[test]
    fn defaults_match_library_defaults() {
        let p = Flags::parse_from(["cli"]);
        assert_eq!(p.lattice.lattice_cfg(), LatticeCfg::default());
        assert_eq!(p.analysis.analysis_cfg(), AnalysisCfg::default());
        assert_eq!(p.lattice.region(), BoundingRegion::canvas(960.0, 500.0));
    }

    #[test]
    fn flags_map_onto_configs() {
        let p = Flags::parse_from([
            "cli",
            "--scale-y",
            "0.5",
            "--validity",
            "inside",
            "--method",
            "exact",
            "--max-iterations",
            "7",
            "--boundary-tol",
            "1e-9",
        ]);
        let cfg = p.analysis.analysis_cfg();
        assert_eq!(p.lattice.lattice_cfg().scale_y, 0.5);
        assert_eq!(cfg.search.validity, Validity::Inside);
        assert_eq!(cfg.method, Method::Exact);
        assert_eq!(cfg.search.max_iterations, 7);
        assert_eq!(cfg.classify.boundary_tol, 1e-9);
        let json = serde_json::to_value(&p.analysis).unwrap();
        assert_eq!(json["method"], "exact");
        assert_eq!(json["validity"], "inside");
    }

    #[test]
    fn boundary_tol_must_be_finite_and_non_negative() {
        for bad in ["NaN", "-0.5", "inf", "abc"] {
            assert!(
                Flags::try_parse_from(["cli", "--boundary-tol", bad]).is_err(),
                "{bad}"
            );
        }
        let p = Flags::try_parse_from(["cli", "--boundary-tol", "0.25"]).unwrap();
        assert_eq!(p.analysis.analysis_cfg().classify.boundary_tol, 0.25);
    }
}
