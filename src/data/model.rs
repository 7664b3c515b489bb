use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Pollutant – the closed set of measured pollutant families
// ---------------------------------------------------------------------------

/// One of the three pollutant families covered by the DEFRA PCM datasets.
///
/// All key, folder, and file-name conventions for a pollutant live here, so
/// adding a pollutant is a data change rather than new branching logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pollutant {
    No2,
    Pm10,
    Pm25,
}

impl Pollutant {
    /// Every pollutant, in the order the datasets are published.
    pub const ALL: [Pollutant; 3] = [Pollutant::No2, Pollutant::Pm10, Pollutant::Pm25];

    /// Parse a user-supplied pollutant string. Case-insensitive, trimmed.
    /// Anything outside the known set yields `None`, never an error.
    pub fn parse(s: &str) -> Option<Pollutant> {
        match s.trim().to_lowercase().as_str() {
            "no2" => Some(Pollutant::No2),
            "pm10" => Some(Pollutant::Pm10),
            "pm2.5" => Some(Pollutant::Pm25),
            _ => None,
        }
    }

    /// Canonical lookup key, as used in query strings and live file names.
    pub fn key(self) -> &'static str {
        match self {
            Pollutant::No2 => "no2",
            Pollutant::Pm10 => "pm10",
            Pollutant::Pm25 => "pm2.5",
        }
    }

    /// Display name, as published in the dataset headers.
    pub fn display_name(self) -> &'static str {
        match self {
            Pollutant::No2 => "NO2",
            Pollutant::Pm10 => "PM10",
            Pollutant::Pm25 => "PM2.5",
        }
    }

    /// Folder under the data root that holds this pollutant's files.
    pub fn data_dir(self) -> &'static str {
        match self {
            Pollutant::No2 => "NO2",
            Pollutant::Pm10 => "pm10",
            Pollutant::Pm25 => "pm2.5",
        }
    }

    /// File name of the published yearly dataset. The PM datasets carry a
    /// trailing `g` (gravimetric) marker in their published names.
    pub fn yearly_file_name(self, year: &str) -> String {
        match self {
            Pollutant::No2 => format!("mapno2{year}.csv"),
            Pollutant::Pm10 => format!("mappm10{year}g.csv"),
            Pollutant::Pm25 => format!("mappm25{year}g.csv"),
        }
    }

    /// File name the live-data writer produces and the repository re-reads.
    pub fn live_file_name(self) -> String {
        format!("map{}live.csv", self.key())
    }
}

impl fmt::Display for Pollutant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ---------------------------------------------------------------------------
// DataPoint – one measurement at one grid location
// ---------------------------------------------------------------------------

/// A single pollution value at one geographic location.
///
/// The location is given both as a UK Ordnance Survey grid code and as an
/// easting/northing pair on the National Grid. Fields that could not be
/// parsed from the source file hold the sentinel `-1` / `-1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub grid_code: i32,
    /// National Grid easting.
    pub x: i32,
    /// National Grid northing.
    pub y: i32,
    pub value: f64,
}

// ---------------------------------------------------------------------------
// DataSet – the complete contents of one pollution data file
// ---------------------------------------------------------------------------

/// All the data from one DEFRA pollution file: the four header fields and
/// the list of data points, in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    pub pollutant: String,
    pub year: String,
    pub metric: String,
    pub units: String,
    points: Vec<DataPoint>,
}

impl DataSet {
    pub fn new(pollutant: String, year: String, metric: String, units: String) -> Self {
        DataSet {
            pollutant,
            year,
            metric,
            units,
            points: Vec::new(),
        }
    }

    /// The data points of this dataset, in file order.
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    /// Number of data points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the dataset holds no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append one data row given as raw text fields, in the file order
    /// `gridcode, x, y, value`. A field that fails to parse is stored as
    /// `-1` / `-1.0` rather than rejected; a missing field counts as failed.
    pub fn push_raw(&mut self, grid_code: &str, x: &str, y: &str, value: &str) {
        self.points.push(DataPoint {
            grid_code: to_int(grid_code),
            x: to_int(x),
            y: to_int(y),
            value: to_double(value),
        });
    }
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Dataset: Pollutant: {}, Year: {}, Metric: {}, Units: {} ({} data points)",
            self.pollutant,
            self.year,
            self.metric,
            self.units,
            self.points.len()
        )
    }
}

/// Convert a raw field to int, or the sentinel `-1` if it is unreadable.
fn to_int(field: &str) -> i32 {
    field.parse().unwrap_or(-1)
}

/// Convert a raw field to float, or the sentinel `-1.0` if it is unreadable.
fn to_double(field: &str) -> f64 {
    field.parse().unwrap_or(-1.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
