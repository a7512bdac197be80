//! Tabular artifacts (polars): lattice points and per-cell results.
//!
//! The file extension picks the format: `.parquet` → Parquet, anything else → CSV.

use anyhow::{bail, Context, Result};
use inscribe::prelude::{CellReport, Point};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

fn is_parquet(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("parquet"))
}

pub fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

pub fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    ensure_parent(path)?;
    let mut file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if is_parquet(path) {
        ParquetWriter::new(&mut file).finish(df)?;
    } else {
        CsvWriter::new(&mut file).finish(df)?;
    }
    tracing::info!(path = %path.display(), rows = df.height(), "table_written");
    Ok(())
}

pub fn read_frame(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        bail!("no such table: {}", path.display());
    }
    let lf = if is_parquet(path) {
        LazyFrame::scan_parquet(path, ScanArgsParquet::default())?
    } else {
        LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?
    };
    Ok(lf.collect()?)
}

/// Lattice points with their (row, col) node.
pub fn lattice_frame(points: &[Point], cols: usize) -> Result<DataFrame> {
    let cols = cols.max(1);
    let row: Vec<u32> = (0..points.len()).map(|k| (k / cols) as u32).collect();
    let col: Vec<u32> = (0..points.len()).map(|k| (k % cols) as u32).collect();
    let x: Vec<f64> = points.iter().map(|p| p.x).collect();
    let y: Vec<f64> = points.iter().map(|p| p.y).collect();
    Ok(df!(
        "row" => row,
        "col" => col,
        "x" => x,
        "y" => y
    )?)
}

/// Site coordinates from the `x` and `y` columns of a table (extra columns ignored).
pub fn points_from_frame(df: &DataFrame) -> Result<Vec<Point>> {
    let coord = |name: &str| -> Result<Vec<f64>> {
        let s = df
            .column(name)
            .with_context(|| format!("missing column {name}"))?
            .cast(&DataType::Float64)?;
        let values = s.f64()?;
        if values.null_count() > 0 {
            bail!("column {name} has {} empty cells", values.null_count());
        }
        Ok(values.into_no_null_iter().collect())
    };
    let xs = coord("x")?;
    let ys = coord("y")?;
    Ok(xs.into_iter().zip(ys).map(|(x, y)| Point::new(x, y)).collect())
}

/// One row per analyzed cell.
pub fn cells_frame(reports: &[CellReport]) -> Result<DataFrame> {
    let index: Vec<u32> = reports.iter().map(|r| r.index as u32).collect();
    let site_x: Vec<f64> = reports.iter().map(|r| r.site.x).collect();
    let site_y: Vec<f64> = reports.iter().map(|r| r.site.y).collect();
    let edges: Vec<u32> = reports.iter().map(|r| r.edges as u32).collect();
    let nearest_edge: Vec<u32> = reports.iter().map(|r| r.nearest_edge as u32).collect();
    let site_radius: Vec<f64> = reports.iter().map(|r| r.site_circle.radius).collect();
    let incenter_x: Vec<f64> = reports.iter().map(|r| r.incircle.center.x).collect();
    let incenter_y: Vec<f64> = reports.iter().map(|r| r.incircle.center.y).collect();
    let incenter_radius: Vec<f64> = reports.iter().map(|r| r.incircle.radius).collect();
    let iterations: Vec<u32> = reports.iter().map(|r| r.iterations as u32).collect();
    let hit_cap: Vec<bool> = reports.iter().map(|r| r.hit_cap).collect();
    Ok(df!(
        "index" => index,
        "site_x" => site_x,
        "site_y" => site_y,
        "edges" => edges,
        "nearest_edge" => nearest_edge,
        "site_radius" => site_radius,
        "incenter_x" => incenter_x,
        "incenter_y" => incenter_y,
        "incenter_radius" => incenter_radius,
        "iterations" => iterations,
        "hit_cap" => hit_cap
    )?)
}

/// Row count and the two radius minima of a per-cell table (`None` when empty).
pub fn summarize_frame(df: &DataFrame) -> Result<(usize, Option<f64>, Option<f64>)> {
    if df.height() == 0 {
        return Ok((0, None, None));
    }
    let min_of = |name: &str| -> Result<Option<f64>> {
        let s = df
            .column(name)
            .with_context(|| format!("missing column {name}"))?
            .cast(&DataType::Float64)?;
        Ok(s.f64()?.min())
    };
    Ok((
        df.height(),
        min_of("site_radius")?,
        min_of("incenter_radius")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use inscribe::prelude::RadiusResult;
    use tempfile::tempdir;

    fn report(index: usize, site_r: f64, inc_r: f64) -> CellReport {
        let site = Point::new(index as f64, 2.0);
        CellReport {
            index,
            site,
            edges: 6,
            site_circle: RadiusResult::new(site, site_r),
            nearest_edge: 0,
            incircle: RadiusResult::new(site, inc_r),
            iterations: 3,
            hit_cap: false,
        }
    }

    #[test]
    fn csv_round_trip_keeps_minima() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cells.csv");
        let reports = vec![report(0, 3.0, 4.0), report(4, 2.5, 5.0), report(9, 7.0, 3.5)];
        let mut df = cells_frame(&reports).unwrap();
        write_frame(&mut df, &path).unwrap();
        let back = read_frame(&path).unwrap();
        let (n, site, inc) = summarize_frame(&back).unwrap();
        assert_eq!(n, 3);
        assert_eq!(site, Some(2.5));
        assert_eq!(inc, Some(3.5));
    }

    #[test]
    fn parquet_is_picked_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/points.parquet");
        let pts = vec![Point::new(0.0, 1.0), Point::new(2.0, 3.0), Point::new(4.0, 5.0)];
        let mut df = lattice_frame(&pts, 2).unwrap();
        write_frame(&mut df, &path).unwrap();
        let back = read_frame(&path).unwrap();
        assert_eq!(back.height(), 3);
        assert_eq!(back.width(), 4);
    }

    #[test]
    fn empty_table_has_no_minima() {
        let df = cells_frame(&[]).unwrap();
        assert_eq!(summarize_frame(&df).unwrap(), (0, None, None));
        assert!(read_frame(Path::new("/nonexistent/cells.csv")).is_err());
    }

    #[test]
    fn lattice_table_reads_back_as_sites() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sites.csv");
        let pts = vec![Point::new(10.5, 20.0), Point::new(30.0, 40.25), Point::new(-1.0, 7.0)];
        let mut df = lattice_frame(&pts, 3).unwrap();
        write_frame(&mut df, &path).unwrap();
        let back = points_from_frame(&read_frame(&path).unwrap()).unwrap();
        assert_eq!(back, pts);

        let no_y = df!("x" => [1.0f64, 2.0]).unwrap();
        assert!(points_from_frame(&no_y).is_err());
    }
}
