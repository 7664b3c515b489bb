use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use super::model::DataSet;

// ---------------------------------------------------------------------------
// DEFRA-format output
// ---------------------------------------------------------------------------

/// Column-label line written between the preamble and the data rows.
const COLUMN_LABELS: &str = "ukgridcode,x,y,value";

/// Write a dataset in the DEFRA PCM file layout: the four single-value
/// header lines, a blank line, the column-label line, then one
/// `gridcode,x,y,value` row per point, in dataset order.
///
/// This is the file the repository's live slot re-reads, so the output
/// must round-trip through [`loader::parse`](super::loader::parse).
pub fn write_file(dataset: &DataSet, path: &Path) -> csv::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);

    writeln!(out, "{}", dataset.pollutant)?;
    writeln!(out, "{}", dataset.year)?;
    writeln!(out, "{}", dataset.metric)?;
    writeln!(out, "{}", dataset.units)?;
    writeln!(out)?;
    writeln!(out, "{COLUMN_LABELS}")?;

    let mut rows = csv::Writer::from_writer(out);
    for point in dataset.points() {
        rows.write_record(&[
            point.grid_code.to_string(),
            point.x.to_string(),
            point.y.to_string(),
            point.value.to_string(),
        ])?;
    }
    rows.flush()?;

    info!("wrote {} to {}", dataset, path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
