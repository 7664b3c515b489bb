use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use log::info;
use thiserror::Error;

use super::model::DataSet;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Loading fails only when the file itself cannot be read. A file that
/// opens successfully always yields a dataset, whatever its rows contain:
/// unreadable fields become sentinel values instead of errors.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read dataset file {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a DEFRA air pollution file from disk.
///
/// DEFRA PCM files are csv files in a fixed layout: four header lines whose
/// first column holds (in order) the pollutant, year, metric, and units;
/// one blank line; one column-label line; then one `gridcode,x,y,value`
/// row per data point.
pub fn load_file(path: &Path) -> Result<DataSet, LoadError> {
    info!("loading dataset file {}", path.display());

    let file = File::open(path).map_err(|e| LoadError::Unreadable {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    let dataset = parse(BufReader::new(file)).map_err(|e| LoadError::Unreadable {
        path: path.to_path_buf(),
        source: e,
    })?;

    info!("loaded {dataset}");
    Ok(dataset)
}

/// Parse a dataset from any buffered reader. Same contract as
/// [`load_file`]; split out so tests can run on in-memory fixtures.
pub fn parse<R: BufRead>(mut reader: R) -> csv::Result<DataSet> {
    // The first four lines hold one meaningful value each, in the first
    // comma-separated column; the remaining columns are padding.
    let pollutant = read_header_field(&mut reader)?;
    let year = read_header_field(&mut reader)?;
    let metric = read_header_field(&mut reader)?;
    let units = read_header_field(&mut reader)?;

    // Discard the blank separator line and the column-label line.
    skip_line(&mut reader)?;
    skip_line(&mut reader)?;

    let mut dataset = DataSet::new(pollutant, year, metric, units);

    // The body is plain comma-separated rows. `flexible` keeps short or
    // long rows in play (missing fields become sentinels downstream), and
    // quoting is off because the format never quotes.
    let mut body = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut record = csv::StringRecord::new();
    while body.read_record(&mut record)? {
        dataset.push_raw(
            record.get(0).unwrap_or(""),
            record.get(1).unwrap_or(""),
            record.get(2).unwrap_or(""),
            record.get(3).unwrap_or(""),
        );
    }

    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Header helpers
// ---------------------------------------------------------------------------

/// Read one header line and return its first comma-separated column.
/// A missing line reads as an empty field.
fn read_header_field<R: BufRead>(reader: &mut R) -> csv::Result<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let first = line
        .trim_end_matches(['\r', '\n'])
        .split(',')
        .next()
        .unwrap_or("");
    Ok(first.to_string())
}

fn skip_line<R: BufRead>(reader: &mut R) -> csv::Result<()> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DataPoint;
    use std::io::Cursor;

    const FIXTURE: &str = "\
NO2,,,
2018,,,
annual mean,,,
ug m-3,,,

ukgridcode,x,y,value
1,510500,168500,23.4
2,511500,168500,18.1
3,512500,169500,31.0
";

    #[test]
    fn parse_extracts_the_first_column_of_each_header_line() {
        let ds = parse(Cursor::new(FIXTURE)).expect("fixture should parse");
        assert_eq!(ds.pollutant, "NO2");
        assert_eq!(ds.year, "2018");
        assert_eq!(ds.metric, "annual mean");
        assert_eq!(ds.units, "ug m-3");
    }

    #[test]
    fn parse_reads_every_data_row_in_file_order() {
        let ds = parse(Cursor::new(FIXTURE)).expect("fixture should parse");
        assert_eq!(ds.len(), 3);
        assert_eq!(
            ds.points()[0],
            DataPoint {
                grid_code: 1,
                x: 510500,
                y: 168500,
                value: 23.4
            }
        );
        assert_eq!(ds.points()[2].value, 31.0);
    }

    #[test]
    fn parse_accepts_header_lines_without_padding_columns() {
        // The live-data writer emits bare header lines with no trailing
        // commas; both spellings must read identically.
        let bare = "NO2\nlive\nannual mean\nug m-3\n\nukgridcode,x,y,value\n5,1500,2500,9.0\n";
        let ds = parse(Cursor::new(bare)).expect("bare headers should parse");
        assert_eq!(ds.pollutant, "NO2");
        assert_eq!(ds.year, "live");
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn unparseable_fields_become_sentinels_not_errors() {
        let fixture = "\
NO2,,,
2018,,,
annual mean,,,
ug m-3,,,

ukgridcode,x,y,value
abc,10,20,5.5
1,511500,168500,MISSING
";
        let ds = parse(Cursor::new(fixture)).expect("bad rows must still parse");
        assert_eq!(
            ds.points()[0],
            DataPoint {
                grid_code: -1,
                x: 10,
                y: 20,
                value: 5.5
            }
        );
        assert_eq!(ds.points()[1].value, -1.0);
    }

    #[test]
    fn short_rows_fill_missing_fields_with_sentinels() {
        let fixture = "\
NO2,,,
2018,,,
annual mean,,,
ug m-3,,,

ukgridcode,x,y,value
9,100
";
        let ds = parse(Cursor::new(fixture)).expect("short rows must still parse");
        assert_eq!(
            ds.points()[0],
            DataPoint {
                grid_code: 9,
                x: 100,
                y: -1,
                value: -1.0
            }
        );
    }

    #[test]
    fn truncated_preamble_yields_an_empty_dataset() {
        let ds = parse(Cursor::new("NO2,,,\n2018,,,\n")).expect("truncated file must still parse");
        assert_eq!(ds.pollutant, "NO2");
        assert_eq!(ds.metric, "");
        assert!(ds.is_empty());
    }

    #[test]
    fn load_file_reports_missing_files_as_unreadable() {
        let err = load_file(Path::new("/no/such/dir/mapno22018.csv"))
            .expect_err("missing file must not load");
        let LoadError::Unreadable { path, .. } = err;
        assert!(path.ends_with("mapno22018.csv"));
    }
}
