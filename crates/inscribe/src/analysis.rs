//! Per-cell analysis and global minima.
//!
//! Each qualifying cell (see `classify`) yields a `CellReport` with its
//! site-centered circle and its incircle. Non-qualifying cells are skipped and
//! only counted. The minima over all reports are returned as values; `None`
//! means no cell qualified and is never confused with a real radius.
//!
//! Cells are independent, so callers may analyze them in any order or in
//! parallel and combine partial results with `Minima::merge` / `Analysis::merge`.

use crate::classify::{classify, CellClass, ClassifyCfg};
use crate::diagram::DiagramBuilder;
use crate::error::{CellError, DiagramError, PipelineError};
use crate::geom::{BoundingRegion, Cell, Point, RadiusResult};
use crate::incenter::{incircle, Method, SearchCfg};
use crate::inradius::nearest_edge;
use crate::lattice::{hex_lattice_seeded, LatticeCfg};

/// Everything that shapes one analysis pass.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AnalysisCfg {
    pub classify: ClassifyCfg,
    pub search: SearchCfg,
    pub method: Method,
}

/// Result for one analyzed cell.
#[derive(Clone, Debug, PartialEq)]
pub struct CellReport {
    /// Position of the cell in the input slice.
    pub index: usize,
    pub site: Point,
    pub edges: usize,
    pub site_circle: RadiusResult,
    /// Boundary segment closest to the site.
    pub nearest_edge: usize,
    pub incircle: RadiusResult,
    pub iterations: usize,
    pub hit_cap: bool,
}

/// Running minima; `None` until a cell is observed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Minima {
    pub site_radius: Option<f64>,
    pub incenter_radius: Option<f64>,
}

#[inline]
fn min_opt(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

impl Minima {
    pub fn observe(&mut self, site_radius: f64, incenter_radius: f64) {
        self.site_radius = min_opt(self.site_radius, Some(site_radius));
        self.incenter_radius = min_opt(self.incenter_radius, Some(incenter_radius));
    }

    /// Associative, commutative; `Minima::default()` is the identity.
    pub fn merge(self, other: Minima) -> Minima {
        Minima {
            site_radius: min_opt(self.site_radius, other.site_radius),
            incenter_radius: min_opt(self.incenter_radius, other.incenter_radius),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.site_radius.is_none() && self.incenter_radius.is_none()
    }
}

/// Why cells were left out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SkipCounts {
    pub on_boundary: usize,
    pub unexpected_shape: usize,
    pub degenerate: usize,
    /// Qualified, but a radius computation rejected the cell.
    pub failed: usize,
}

impl SkipCounts {
    pub fn total(&self) -> usize {
        self.on_boundary + self.unexpected_shape + self.degenerate + self.failed
    }

    fn merge(self, o: SkipCounts) -> SkipCounts {
        SkipCounts {
            on_boundary: self.on_boundary + o.on_boundary,
            unexpected_shape: self.unexpected_shape + o.unexpected_shape,
            degenerate: self.degenerate + o.degenerate,
            failed: self.failed + o.failed,
        }
    }
}

/// Outcome of `analyze_cell`.
#[derive(Clone, Debug, PartialEq)]
pub enum CellOutcome {
    Analyzed(CellReport),
    Skipped(CellClass),
    Failed(CellError),
}

/// Output of one analysis pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Analysis {
    pub cells: Vec<CellReport>,
    pub skipped: SkipCounts,
    pub minima: Minima,
}

impl Analysis {
    /// Fold one outcome into the pass.
    pub fn push(&mut self, outcome: CellOutcome) {
        match outcome {
            CellOutcome::Analyzed(r) => {
                self.minima.observe(r.site_circle.radius, r.incircle.radius);
                self.cells.push(r);
            }
            CellOutcome::Skipped(CellClass::OnBoundary) => self.skipped.on_boundary += 1,
            CellOutcome::Skipped(CellClass::UnexpectedShape { .. }) => {
                self.skipped.unexpected_shape += 1
            }
            CellOutcome::Skipped(_) => self.skipped.degenerate += 1,
            CellOutcome::Failed(_) => self.skipped.failed += 1,
        }
    }

    /// Combine two partial passes; reports keep their `index` and are re-sorted by it.
    pub fn merge(mut self, other: Analysis) -> Analysis {
        self.cells.extend(other.cells);
        self.cells.sort_by_key(|r| r.index);
        self.skipped = self.skipped.merge(other.skipped);
        self.minima = self.minima.merge(other.minima);
        self
    }
}

fn compute_report(index: usize, cell: &Cell, cfg: &AnalysisCfg) -> Result<CellReport, CellError> {
    let (nearest, site_r) = nearest_edge(cell, cell.site)?;
    let trace = incircle(cell, cfg.method, &cfg.search)?;
    Ok(CellReport {
        index,
        site: cell.site,
        edges: cell.edge_count(),
        site_circle: RadiusResult::new(cell.site, site_r),
        nearest_edge: nearest,
        incircle: trace.result,
        iterations: trace.iterations,
        hit_cap: trace.hit_cap,
    })
}

/// Classify one cell and, if it qualifies, compute both circles.
pub fn analyze_cell(
    index: usize,
    cell: &Cell,
    region: &BoundingRegion,
    cfg: &AnalysisCfg,
) -> CellOutcome {
    match classify(cell, region, &cfg.classify) {
        CellClass::Analyzable => match compute_report(index, cell, cfg) {
            Ok(r) => CellOutcome::Analyzed(r),
            Err(e) => {
                tracing::debug!(index, error = %e, "cell rejected by radius computation");
                CellOutcome::Failed(e)
            }
        },
        other => CellOutcome::Skipped(other),
    }
}

/// Analyze every cell of a diagram.
pub fn analyze(cells: &[Cell], region: &BoundingRegion, cfg: &AnalysisCfg) -> Analysis {
    let mut out = Analysis::default();
    for (index, cell) in cells.iter().enumerate() {
        out.push(analyze_cell(index, cell, region, cfg));
    }
    let capped = out.cells.iter().filter(|r| r.hit_cap).count();
    tracing::debug!(
        cells = cells.len(),
        analyzed = out.cells.len(),
        skipped = out.skipped.total(),
        capped,
        min_site_radius = ?out.minima.site_radius,
        min_incenter_radius = ?out.minima.incenter_radius,
        "analysis finished"
    );
    out
}

/// Sites, cells and analysis of one end-to-end run.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub sites: Vec<Point>,
    pub cells: Vec<Cell>,
    pub analysis: Analysis,
}

/// Diagram → analysis for an arbitrary site set.
pub fn analyze_sites<B: DiagramBuilder>(
    builder: &B,
    sites: Vec<Point>,
    region: &BoundingRegion,
    cfg: &AnalysisCfg,
) -> Result<PipelineOutput, DiagramError> {
    let cells = builder.build(&sites, region)?;
    let analysis = analyze(&cells, region, cfg);
    Ok(PipelineOutput {
        sites,
        cells,
        analysis,
    })
}

/// Lattice → diagram → analysis.
pub fn run_pipeline<B: DiagramBuilder>(
    builder: &B,
    lattice: &LatticeCfg,
    region: &BoundingRegion,
    cfg: &AnalysisCfg,
    seed: u64,
) -> Result<PipelineOutput, PipelineError> {
    let sites = hex_lattice_seeded(lattice, seed)?;
    Ok(analyze_sites(builder, sites, region, cfg)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::tests::{axis_square, regular_hexagon};
    use nalgebra::vector;
    use proptest::prelude::*;

    fn region() -> BoundingRegion {
        BoundingRegion::canvas(100.0, 100.0)
    }

    #[test]
    fn qualifying_cells_feed_the_minima() {
        let cells = vec![
            regular_hexagon(vector![30.0, 30.0], 4.0),
            regular_hexagon(vector![70.0, 30.0], 2.5),
            axis_square(vector![50.0, 70.0], 5.0),
        ];
        let a = analyze(&cells, &region(), &AnalysisCfg::default());
        assert_eq!(a.cells.len(), 2);
        assert_eq!(a.cells[1].index, 1);
        assert_eq!(a.skipped.unexpected_shape, 1);
        let min_site = a.minima.site_radius.unwrap();
        let min_inc = a.minima.incenter_radius.unwrap();
        assert!((min_site - 2.5).abs() < 1e-9);
        assert!((min_inc - 2.5).abs() < 1e-9);
    }

    #[test]
    fn nothing_qualifies_leaves_sentinel() {
        let mut touching = regular_hexagon(vector![50.0, 50.0], 3.0);
        touching.segments[0].start.x = 0.0;
        let cells = vec![touching, Cell::new(vector![1.0, 1.0], Vec::new())];
        let a = analyze(&cells, &region(), &AnalysisCfg::default());
        assert!(a.cells.is_empty());
        assert!(a.minima.is_empty());
        assert_eq!(a.minima.site_radius, None);
        assert_eq!(a.skipped.on_boundary, 1);
        assert_eq!(a.skipped.degenerate, 1);
        assert_eq!(a.skipped.total(), 2);
    }

    #[test]
    fn exact_failures_are_counted_not_reported() {
        // Six collinear vertices: six edges, zero area.
        let verts: Vec<Point> = (0..6).map(|k| vector![40.0 + k as f64, 50.0]).collect();
        let flat = Cell::from_vertices(vector![42.0, 50.0], &verts);
        let cfg = AnalysisCfg {
            method: Method::Exact,
            ..AnalysisCfg::default()
        };
        let a = analyze(&[flat], &region(), &cfg);
        assert!(a.cells.is_empty());
        assert_eq!(a.skipped.failed, 1);
        assert!(a.minima.is_empty());
    }

    #[test]
    fn minima_merge_identity_and_order() {
        let mut a = Minima::default();
        a.observe(3.0, 4.0);
        let mut b = Minima::default();
        b.observe(5.0, 1.0);
        assert_eq!(a.merge(Minima::default()), a);
        assert_eq!(Minima::default().merge(a), a);
        assert_eq!(a.merge(b), b.merge(a));
        assert_eq!(a.merge(b).site_radius, Some(3.0));
        assert_eq!(a.merge(b).incenter_radius, Some(1.0));
    }

    fn minima() -> impl Strategy<Value = Minima> {
        let radius = proptest::option::of(0.0..100.0f64);
        (radius.clone(), radius).prop_map(|(site_radius, incenter_radius)| Minima {
            site_radius,
            incenter_radius,
        })
    }

    proptest! {
        #[test]
        fn prop_minima_merge_is_associative(a in minima(), b in minima(), c in minima()) {
            prop_assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
            prop_assert_eq!(a.merge(b), b.merge(a));
            prop_assert_eq!(a.merge(Minima::default()), a);
        }
    }

    #[test]
    fn minima_merge_groups_with_missing_sides() {
        let none = Minima::default();
        let only_site = Minima {
            site_radius: Some(2.0),
            incenter_radius: None,
        };
        let mut full = Minima::default();
        full.observe(4.0, 3.0);
        for (a, b, c) in [
            (none, only_site, full),
            (only_site, none, full),
            (full, only_site, none),
            (none, none, only_site),
        ] {
            assert_eq!(a.merge(b).merge(c), a.merge(b.merge(c)));
        }
        let all = none.merge(only_site).merge(full);
        assert_eq!(all.site_radius, Some(2.0));
        assert_eq!(all.incenter_radius, Some(3.0));
    }

    #[test]
    fn split_passes_merge_to_the_full_pass() {
        let cells: Vec<Cell> = (0..6)
            .map(|k| regular_hexagon(vector![15.0 + 12.0 * k as f64, 50.0], 1.0 + k as f64 * 0.5))
            .collect();
        let cfg = AnalysisCfg::default();
        let full = analyze(&cells, &region(), &cfg);
        let mut left = Analysis::default();
        let mut right = Analysis::default();
        for (i, c) in cells.iter().enumerate() {
            let target = if i % 2 == 0 { &mut left } else { &mut right };
            target.push(analyze_cell(i, c, &region(), &cfg));
        }
        assert_eq!(right.merge(left), full);
    }

    #[test]
    fn pipeline_on_default_canvas() {
        let lattice = LatticeCfg {
            rows: 20,
            ..LatticeCfg::default()
        };
        let region = BoundingRegion::canvas(960.0, 500.0);
        let cfg = AnalysisCfg::default();
        let out = run_pipeline(&crate::diagram::SpadeVoronoi, &lattice, &region, &cfg, 1).unwrap();
        assert_eq!(out.sites.len(), 200);
        assert!(!out.analysis.cells.is_empty());
        for r in &out.analysis.cells {
            assert_eq!(r.edges, 6);
            assert!(r.incircle.radius >= r.site_circle.radius);
        }
        let m = out.analysis.minima;
        assert!(m.site_radius.unwrap() > 0.0);
        assert!(m.incenter_radius.unwrap() >= m.site_radius.unwrap());
    }

    #[test]
    fn custom_sites_are_analyzed_like_a_lattice() {
        // Centre site ringed by six neighbours at distance 20: its cell is a
        // regular hexagon with apothem 10.
        let region = region();
        let centre = vector![50.0, 50.0];
        let mut sites = vec![centre];
        for k in 0..6 {
            let th = k as f64 * std::f64::consts::FRAC_PI_3;
            sites.push(centre + vector![20.0 * th.cos(), 20.0 * th.sin()]);
        }
        let out = analyze_sites(
            &crate::diagram::SpadeVoronoi,
            sites,
            &region,
            &AnalysisCfg::default(),
        )
        .unwrap();
        assert_eq!(out.sites.len(), 7);
        assert_eq!(out.cells.len(), 7);
        assert_eq!(out.analysis.cells.len(), 1);
        let r = &out.analysis.cells[0];
        assert_eq!(r.index, 0);
        assert!((r.site_circle.radius - 10.0).abs() < 1e-9);
        assert_eq!(out.analysis.skipped.on_boundary, 6);

        let bad = analyze_sites(
            &crate::diagram::SpadeVoronoi,
            vec![vector![f64::NAN, 0.0]],
            &region,
            &AnalysisCfg::default(),
        );
        assert!(matches!(bad, Err(DiagramError::NonFiniteSite { index: 0 })));
    }
}
