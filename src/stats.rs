use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::model::DataPoint;
use crate::region::Region;

// ---------------------------------------------------------------------------
// Zone – compass partitions of a region's bounding box
// ---------------------------------------------------------------------------

/// Where a point falls when a region's bounding box is split into thirds
/// along both axes. Always computed from coordinates, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Northwest,
    North,
    Northeast,
    West,
    Central,
    East,
    Southwest,
    South,
    Southeast,
    /// The point is outside the bounding box entirely.
    Outside,
}

impl Zone {
    /// The label shown for this zone.
    pub fn name(self) -> &'static str {
        match self {
            Zone::Northwest => "Northwest",
            Zone::North => "North",
            Zone::Northeast => "Northeast",
            Zone::West => "West",
            Zone::Central => "Central",
            Zone::East => "East",
            Zone::Southwest => "Southwest",
            Zone::South => "South",
            Zone::Southeast => "Southeast",
            Zone::Outside => "Outside map range",
        }
    }

    /// Parse a zone label. Unknown labels yield `None`, never an error.
    pub fn from_name(name: &str) -> Option<Zone> {
        match name {
            "Northwest" => Some(Zone::Northwest),
            "North" => Some(Zone::North),
            "Northeast" => Some(Zone::Northeast),
            "West" => Some(Zone::West),
            "Central" => Some(Zone::Central),
            "East" => Some(Zone::East),
            "Southwest" => Some(Zone::Southwest),
            "South" => Some(Zone::South),
            "Southeast" => Some(Zone::Southeast),
            "Outside map range" => Some(Zone::Outside),
            _ => None,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A zone filter choice: either everything on the map or one zone.
/// This is what zone selectors in the viewer resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZoneSelection {
    AllZones,
    Only(Zone),
}

impl ZoneSelection {
    pub fn name(self) -> &'static str {
        match self {
            ZoneSelection::AllZones => "All Zones",
            ZoneSelection::Only(zone) => zone.name(),
        }
    }

    /// Parse a selector label ("All Zones" or a zone name).
    pub fn from_name(name: &str) -> Option<ZoneSelection> {
        if name == "All Zones" {
            return Some(ZoneSelection::AllZones);
        }
        Zone::from_name(name).map(ZoneSelection::Only)
    }
}

impl fmt::Display for ZoneSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ---------------------------------------------------------------------------
// Statistics – aggregation over one region's bounding box
// ---------------------------------------------------------------------------

/// Filtering and aggregation over the data points of one region.
///
/// The region's bounding box is captured once, truncated to whole grid
/// units, when the engine is built; every query is then a pure function
/// over the points it is given.
pub struct Statistics {
    easting_min: i32,
    easting_max: i32,
    northing_min: i32,
    northing_max: i32,
}

impl Statistics {
    pub fn new(region: &Region) -> Statistics {
        Statistics {
            easting_min: region.left as i32,
            easting_max: region.right as i32,
            northing_min: region.bottom as i32,
            northing_max: region.top as i32,
        }
    }

    /// Whether a coordinate pair lies within the region's bounding box.
    /// Inclusive at both bounds on both axes.
    pub fn is_in_zone(&self, easting: i32, northing: i32) -> bool {
        (easting >= self.easting_min && easting <= self.easting_max)
            && (northing >= self.northing_min && northing <= self.northing_max)
    }

    /// Classify a coordinate pair into one of the nine compass zones, or
    /// [`Zone::Outside`] if it is beyond the bounding box.
    ///
    /// Each axis is split at two cut lines a third of the way along
    /// (integer division). A point exactly on a cut joins the column to
    /// its west; on the y axis the upper cut joins the north row and the
    /// lower cut the south row.
    pub fn determine_zone(&self, x: i32, y: i32) -> Zone {
        if x < self.easting_min
            || x > self.easting_max
            || y < self.northing_min
            || y > self.northing_max
        {
            return Zone::Outside;
        }

        let l1_x = self.easting_min + (self.easting_max - self.easting_min) / 3;
        let l2_x = self.easting_min + 2 * (self.easting_max - self.easting_min) / 3;
        let l1_y = self.northing_min + (self.northing_max - self.northing_min) / 3;
        let l2_y = self.northing_min + 2 * (self.northing_max - self.northing_min) / 3;

        if x <= l1_x && y >= l2_y {
            return Zone::Northwest;
        }
        if x > l1_x && x <= l2_x && y >= l2_y {
            return Zone::North;
        }
        if x > l2_x && y >= l2_y {
            return Zone::Northeast;
        }
        if x <= l1_x && y > l1_y && y <= l2_y {
            return Zone::West;
        }
        if x > l1_x && x <= l2_x && y > l1_y && y <= l2_y {
            return Zone::Central;
        }
        if x > l2_x && y > l1_y && y <= l2_y {
            return Zone::East;
        }
        if x <= l1_x && y <= l1_y {
            return Zone::Southwest;
        }
        if x > l1_x && x <= l2_x && y <= l1_y {
            return Zone::South;
        }
        if x > l2_x && y <= l1_y {
            return Zone::Southeast;
        }

        // In-bounds points always match one of the cases above.
        Zone::Outside
    }

    /// Keep only the points inside the region's bounding box, preserving
    /// input order.
    pub fn filter_within_zone(&self, points: &[DataPoint]) -> Vec<DataPoint> {
        points
            .iter()
            .copied()
            .filter(|p| self.is_in_zone(p.x, p.y))
            .collect()
    }

    /// Keep only the points whose computed zone matches the selection.
    /// `AllZones` is the identity: it keeps every input point, including
    /// any outside the bounding box.
    pub fn filter_by_zone(&self, points: &[DataPoint], selection: ZoneSelection) -> Vec<DataPoint> {
        match selection {
            ZoneSelection::AllZones => points.to_vec(),
            ZoneSelection::Only(zone) => points
                .iter()
                .copied()
                .filter(|p| self.determine_zone(p.x, p.y) == zone)
                .collect(),
        }
    }

    /// Mean value of the points inside the bounding box. Points outside
    /// are excluded even if the caller already filtered; an empty or
    /// fully-excluded input yields `0.0`.
    pub fn calculate_average(&self, points: &[DataPoint]) -> f64 {
        let mut total = 0.0;
        let mut count = 0u32;
        for point in points {
            if self.is_in_zone(point.x, point.y) {
                total += point.value;
                count += 1;
            }
        }
        if count == 0 {
            return 0.0;
        }
        total / f64::from(count)
    }

    /// The point with the highest value inside the bounding box, or `None`
    /// if no point qualifies. The first point in input order wins ties.
    pub fn get_highest(&self, points: &[DataPoint]) -> Option<DataPoint> {
        let mut highest: Option<DataPoint> = None;
        for point in points {
            if !self.is_in_zone(point.x, point.y) {
                continue;
            }
            match highest {
                Some(best) if point.value > best.value => highest = Some(*point),
                None => highest = Some(*point),
                _ => {}
            }
        }
        highest
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
