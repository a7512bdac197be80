//! Inscribed circles of Voronoi cells.
//!
//! For each convex cell of a bounded Voronoi diagram built from a jittered
//! hexagonal lattice, compute the largest circle centered at the cell's site
//! and an (approximate or exact) largest circle anywhere inside the cell, and
//! track the minima of both over the diagram.
//!
//! Pipeline: `lattice` → `diagram` (spade) → `classify` → {`inradius`, `incenter`} → `analysis`.
//!
//! API Policy
//! - Project-internal crate; the API follows the CLI's needs and may change.

pub mod analysis;
pub mod classify;
pub mod diagram;
pub mod error;
pub mod geom;
pub mod incenter;
pub mod inradius;
pub mod lattice;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for callers.
pub mod prelude {
    pub use crate::analysis::{
        analyze, analyze_cell, analyze_sites, run_pipeline, Analysis, AnalysisCfg, CellOutcome,
        CellReport, Minima, PipelineOutput, SkipCounts,
    };
    pub use crate::classify::{classify, has_expected_shape, touches_boundary, CellClass, ClassifyCfg};
    pub use crate::diagram::{build_cells, DiagramBuilder, SpadeVoronoi};
    pub use crate::error::{CellError, DiagramError, LatticeError, PipelineError};
    pub use crate::geom::{
        point_segment_distance, BoundingRegion, Cell, Orientation, Point, RadiusResult, Segment,
    };
    pub use crate::incenter::{
        chebyshev_center, find_incenter, find_incenter_traced, incircle, Method, SearchCfg,
        SearchTrace, Validity,
    };
    pub use crate::inradius::{nearest_edge, site_radius};
    pub use crate::lattice::{
        hex_lattice, hex_lattice_seeded, LatticeCfg, LatticeGeometry, MAX_POINTS,
    };
}
