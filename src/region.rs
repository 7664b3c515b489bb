use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Region – a named map area on the British National Grid
// ---------------------------------------------------------------------------

/// A region pairs a National Grid bounding box with the pixel dimensions of
/// the map canvas it is drawn on, and owns the conversion between the two
/// coordinate systems. Bounds satisfy `right > left` and `top > bottom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    /// Bounding box in National Grid units (eastings/northings).
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    /// Map canvas size in pixels.
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Region {
    pub fn new(
        name: &str,
        right: f64,
        left: f64,
        bottom: f64,
        top: f64,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Region {
        debug_assert!(right > left && top > bottom);
        Region {
            name: name.to_string(),
            left,
            right,
            bottom,
            top,
            canvas_width,
            canvas_height,
        }
    }

    /// Width of the bounding box in grid units.
    pub fn data_width(&self) -> f64 {
        self.right - self.left
    }

    /// Height of the bounding box in grid units.
    pub fn data_height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Scale factor from a canvas x offset to grid units.
    pub fn to_region_scale_x(&self) -> f64 {
        self.data_width() / self.canvas_width
    }

    /// Scale factor from a canvas y offset to grid units. Negative: pixel
    /// rows grow downward while northings grow upward.
    pub fn to_region_scale_y(&self) -> f64 {
        -self.data_height() / self.canvas_height
    }

    /// Scale factor from grid units to canvas x pixels.
    pub fn to_screen_scale_x(&self) -> f64 {
        self.canvas_width / self.data_width()
    }

    /// Scale factor from grid units to canvas y pixels. Negative, see
    /// [`to_region_scale_y`](Self::to_region_scale_y).
    pub fn to_screen_scale_y(&self) -> f64 {
        self.canvas_height / -self.data_height()
    }

    /// Map an easting/northing pair to canvas pixel coordinates.
    pub fn to_screen(&self, easting: f64, northing: f64) -> (f64, f64) {
        (
            (easting - self.left) * self.to_screen_scale_x(),
            (northing - self.top) * self.to_screen_scale_y(),
        )
    }

    /// Map canvas pixel coordinates back to an easting/northing pair.
    /// Inverse of [`to_screen`](Self::to_screen) up to float rounding.
    pub fn to_region(&self, px: f64, py: f64) -> (f64, f64) {
        (
            self.left + px * self.to_region_scale_x(),
            self.top + py * self.to_region_scale_y(),
        )
    }
}

// ---------------------------------------------------------------------------
// RegionManager – the fixed set of mapped regions
// ---------------------------------------------------------------------------

/// The regions with published map coverage, retrievable by name.
pub struct RegionManager {
    regions: BTreeMap<String, Region>,
}

impl Default for RegionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionManager {
    /// Build the manager with the four mapped regions. Bounds are National
    /// Grid references of each map's corners; canvas sizes match the
    /// region map images shipped with the viewer.
    pub fn new() -> Self {
        // right, left, bottom, top
        let all = [
            Region::new("London", 553297.0, 510394.0, 168504.0, 193305.0, 960.0, 555.0),
            Region::new("Manchester", 393973.0, 363528.0, 389216.0, 407541.0, 880.0, 530.0),
            Region::new("Birmingham", 418380.0, 387874.0, 275375.0, 293377.0, 880.0, 519.0),
            Region::new("Nottingham", 471649.0, 441022.0, 325594.0, 343384.0, 900.0, 523.0),
        ];

        let regions = all
            .into_iter()
            .map(|r| (r.name.to_lowercase(), r))
            .collect();
        RegionManager { regions }
    }

    /// Look up a region by name, trimmed and case-insensitive.
    pub fn get(&self, location: &str) -> Option<&Region> {
        self.regions.get(&location.trim().to_lowercase())
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterate the regions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
