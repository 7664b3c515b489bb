use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::model::{DataPoint, DataSet, Pollutant};
use crate::region::Region;

// ---------------------------------------------------------------------------
// PollutionLevel – the six severity bands
// ---------------------------------------------------------------------------

/// Severity band of a pollution reading, in ascending order. Each band
/// carries the colour key the viewer draws it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PollutionLevel {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
    Hazardous,
}

impl PollutionLevel {
    /// All bands, lowest first.
    pub const ALL: [PollutionLevel; 6] = [
        PollutionLevel::VeryLow,
        PollutionLevel::Low,
        PollutionLevel::Moderate,
        PollutionLevel::High,
        PollutionLevel::VeryHigh,
        PollutionLevel::Hazardous,
    ];

    /// Band number, 1 (Very Low) through 6 (Hazardous).
    pub fn band(self) -> u8 {
        self as u8 + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            PollutionLevel::VeryLow => "Very Low",
            PollutionLevel::Low => "Low",
            PollutionLevel::Moderate => "Moderate",
            PollutionLevel::High => "High",
            PollutionLevel::VeryHigh => "Very High",
            PollutionLevel::Hazardous => "Hazardous",
        }
    }

    /// Colour key for this band, as an `0xrrggbbaa` string.
    pub fn color_key(self) -> &'static str {
        match self {
            PollutionLevel::VeryLow => "0x800080ff",   // purple
            PollutionLevel::Low => "0x00ffffff",       // cyan
            PollutionLevel::Moderate => "0x008000ff",  // green
            PollutionLevel::High => "0xffff00ff",      // yellow
            PollutionLevel::VeryHigh => "0xffa500ff",  // orange
            PollutionLevel::Hazardous => "0xff0000ff", // red
        }
    }
}

impl fmt::Display for PollutionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ---------------------------------------------------------------------------
// Classification – value → band, per pollutant
// ---------------------------------------------------------------------------

// Upper bounds (exclusive) of the first five bands; the sixth band is
// open-ended. One table per pollutant, ascending.
const NO2_BOUNDS: [f64; 5] = [10.0, 15.0, 25.0, 32.0, 37.0];
const PM25_BOUNDS: [f64; 5] = [5.0, 7.5, 9.5, 10.25, 10.9];
const PM10_BOUNDS: [f64; 5] = [10.0, 12.5, 15.0, 17.5, 19.0];

/// The band upper bounds used to classify a pollutant's values.
pub fn thresholds(pollutant: Pollutant) -> &'static [f64; 5] {
    match pollutant {
        Pollutant::No2 => &NO2_BOUNDS,
        Pollutant::Pm25 => &PM25_BOUNDS,
        Pollutant::Pm10 => &PM10_BOUNDS,
    }
}

/// Classify a pollution value into its severity band.
pub fn classify(pollutant: Pollutant, value: f64) -> PollutionLevel {
    let bounds = thresholds(pollutant);
    for (level, bound) in PollutionLevel::ALL.iter().zip(bounds) {
        if value < *bound {
            return *level;
        }
    }
    PollutionLevel::Hazardous
}

// ---------------------------------------------------------------------------
// Marker – a classified data point placed on a region canvas
// ---------------------------------------------------------------------------

/// Radius, in pixels, of the circle a marker is drawn with.
pub const MARKER_RADIUS: f64 = 50.0;

// Inset of the clickable box relative to the marker anchor.
const CLICK_INSET: f64 = 2.5;

/// A data point anchored to canvas pixel coordinates, with its severity
/// colouring and click hit-test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// Canvas anchor (the centre the circle is drawn around).
    pub x: f64,
    pub y: f64,
    pub pollutant: Pollutant,
    pub point: DataPoint,
    pub year: String,
}

impl Marker {
    pub fn new(x: f64, y: f64, pollutant: Pollutant, point: DataPoint, year: &str) -> Marker {
        Marker {
            x,
            y,
            pollutant,
            point,
            year: year.to_string(),
        }
    }

    pub fn value(&self) -> f64 {
        self.point.value
    }

    /// Severity band of this marker's reading.
    pub fn level(&self) -> PollutionLevel {
        classify(self.pollutant, self.point.value)
    }

    /// Whether a click at canvas coordinates `(i, j)` hits this marker.
    ///
    /// The hit area is a square inset from the anchor toward +x/+y, not
    /// the drawn circle (see DESIGN.md before changing this).
    pub fn in_range(&self, i: f64, j: f64) -> bool {
        i >= self.x + CLICK_INSET
            && i <= self.x + (MARKER_RADIUS - CLICK_INSET)
            && j > self.y + CLICK_INSET
            && j < self.y + (MARKER_RADIUS - CLICK_INSET)
    }

    /// Multi-line description shown when the marker is inspected.
    pub fn info(&self) -> String {
        format!(
            "Pollutant: {}\nX: {}\nY: {}\nValue: {}\nGrid Code: {}\nYear: {}",
            self.pollutant.key(),
            self.point.x,
            self.point.y,
            self.point.value,
            self.point.grid_code,
            self.year
        )
    }
}

/// Place one marker per data point that lands on (or within a marker
/// radius of) the region's canvas; points further out are dropped.
///
/// A dataset whose pollutant header is unrecognised is classified on the
/// PM10 table.
pub fn place_markers(region: &Region, dataset: &DataSet) -> Vec<Marker> {
    let pollutant = Pollutant::parse(&dataset.pollutant).unwrap_or(Pollutant::Pm10);

    dataset
        .points()
        .iter()
        .filter_map(|&point| {
            let (x, y) = region.to_screen(f64::from(point.x), f64::from(point.y));
            let on_canvas = x >= -MARKER_RADIUS
                && x < region.canvas_width + MARKER_RADIUS
                && y >= -MARKER_RADIUS
                && y < region.canvas_height + MARKER_RADIUS;
            on_canvas.then(|| Marker::new(x, y, pollutant, point, &dataset.year))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
