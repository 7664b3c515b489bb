use super::model::{DataPoint, DataSet};

// ---------------------------------------------------------------------------
// Point lookup over a dataset
// ---------------------------------------------------------------------------

/// Grid codes present in the published survey files fall in this range;
/// anything outside it cannot match and is not scanned for.
const GRID_CODE_MIN: i32 = 55671;
const GRID_CODE_MAX: i32 = 892955;

/// Snap a coordinate onto the 500 m cell centres the datasets use.
/// Published points sit at `…500` on both axes, 1 km apart.
pub fn snap_to_grid(value: i32) -> i32 {
    (value / 1000) * 1000 + 500
}

/// Find the data point at an easting/northing pair. Coordinates that do
/// not already sit on a cell centre are snapped to the nearest one first.
pub fn find_by_coordinate(dataset: &DataSet, easting: i32, northing: i32) -> Option<DataPoint> {
    let x = if easting % 500 != 0 {
        snap_to_grid(easting)
    } else {
        easting
    };
    let y = if northing % 500 != 0 {
        snap_to_grid(northing)
    } else {
        northing
    };

    dataset.points().iter().copied().find(|p| p.x == x && p.y == y)
}

/// Find the data point carrying a survey grid code. Codes outside the
/// published range resolve to `None` without scanning the dataset.
pub fn find_by_grid_code(dataset: &DataSet, grid_code: i32) -> Option<DataPoint> {
    if !(GRID_CODE_MIN..=GRID_CODE_MAX).contains(&grid_code) {
        return None;
    }
    dataset
        .points()
        .iter()
        .copied()
        .find(|p| p.grid_code == grid_code)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::DataSet;

    fn sample_set() -> DataSet {
        let mut ds = DataSet::new(
            "NO2".into(),
            "2018".into(),
            "annual mean".into(),
            "ug m-3".into(),
        );
        ds.push_raw("60000", "510500", "168500", "23.4");
        ds.push_raw("60001", "511500", "168500", "18.1");
        ds.push_raw("60002", "511500", "169500", "31.0");
        ds
    }

    #[test]
    fn snap_to_grid_rounds_onto_cell_centres() {
        assert_eq!(snap_to_grid(4619400), 4619500);
        assert_eq!(snap_to_grid(461900), 461500);
    }

    #[test]
    fn coordinate_lookup_matches_exact_centres() {
        let found = find_by_coordinate(&sample_set(), 510500, 168500);
        assert_eq!(found.map(|p| p.value), Some(23.4));
    }

    #[test]
    fn coordinate_lookup_snaps_off_grid_input() {
        // 511623 and 169101 are off-centre; both snap to …500.
        let found = find_by_coordinate(&sample_set(), 511623, 169101);
        assert_eq!(found.map(|p| p.value), Some(31.0));
    }

    #[test]
    fn coordinate_lookup_misses_cleanly() {
        assert!(find_by_coordinate(&sample_set(), 900500, 900500).is_none());
    }

    #[test]
    fn grid_code_lookup_finds_points_in_range() {
        let found = find_by_grid_code(&sample_set(), 60001);
        assert_eq!(found.map(|p| p.value), Some(18.1));
    }

    #[test]
    fn grid_code_lookup_rejects_codes_outside_the_survey_range() {
        assert!(find_by_grid_code(&sample_set(), 55670).is_none());
        assert!(find_by_grid_code(&sample_set(), 892956).is_none());
        assert!(find_by_grid_code(&sample_set(), -1).is_none());
    }
}
