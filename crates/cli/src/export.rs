//! Flatten a collision map into a table (one row per point) and write it as CSV or Parquet.

use anyhow::{Context, Result};
use collision_map::series::CollisionMap;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// Columns: `series, couch_angle, gantry_angle, marker_size`, in series then point order.
pub fn series_frame(map: &CollisionMap) -> PolarsResult<DataFrame> {
    let n: usize = map.series.iter().map(|s| s.len()).sum();
    let mut names = Vec::with_capacity(n);
    let mut couch = Vec::with_capacity(n);
    let mut gantry = Vec::with_capacity(n);
    let mut sizes = Vec::with_capacity(n);
    for s in &map.series {
        for p in &s.points {
            names.push(s.name.clone());
            couch.push(p.couch);
            gantry.push(p.gantry);
            sizes.push(s.marker_size);
        }
    }
    df!(
        "series" => names,
        "couch_angle" => couch,
        "gantry_angle" => gantry,
        "marker_size" => sizes
    )
}

/// Write `df` to `out`; `.parquet` selects Parquet, anything else CSV.
pub fn write_table(df: &mut DataFrame, out: &Path) -> Result<()> {
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    let is_parquet = out
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        ParquetWriter::new(file)
            .finish(df)
            .with_context(|| format!("writing parquet {}", out.display()))?;
    } else {
        let mut file = file;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .with_context(|| format!("writing csv {}", out.display()))?;
    }
    Ok(())
}
