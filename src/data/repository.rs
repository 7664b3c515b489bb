use std::collections::BTreeMap;
use std::path::PathBuf;

use log::{info, warn};

use super::loader::{self, LoadError};
use super::model::{DataSet, Pollutant};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// The years covered by the published datasets, in publication order.
pub const YEARS: [&str; 6] = ["2018", "2019", "2020", "2021", "2022", "2023"];

/// Repository key under which a runtime-fetched dataset is stored.
pub const LIVE_KEY: &str = "live";

// ---------------------------------------------------------------------------
// DataRepository – the in-memory index of every loaded dataset
// ---------------------------------------------------------------------------

/// Holds all datasets used by the application, one `year → DataSet` map per
/// pollutant. Built once at startup; the only later mutation is replacing
/// the `"live"` entry of one pollutant's map.
pub struct DataRepository {
    base_dir: PathBuf,
    sets: BTreeMap<Pollutant, BTreeMap<String, DataSet>>,
}

impl DataRepository {
    /// Build the repository by loading every published year of every
    /// pollutant from the data root. Each file is attempted independently:
    /// a failed load leaves that year absent and the remaining loads run.
    pub fn load(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let mut sets = BTreeMap::new();

        for pollutant in Pollutant::ALL {
            let mut years = BTreeMap::new();
            for year in YEARS {
                let path = base_dir
                    .join(pollutant.data_dir())
                    .join(pollutant.yearly_file_name(year));
                match loader::load_file(&path) {
                    Ok(dataset) => {
                        years.insert(year.to_string(), dataset);
                    }
                    Err(err) => warn!("no {pollutant} dataset for {year}: {err}"),
                }
            }
            sets.insert(pollutant, years);
        }

        DataRepository { base_dir, sets }
    }

    /// Locate a dataset by year and pollutant name. The pollutant string is
    /// trimmed and case-normalised; an unknown pollutant or an unloaded
    /// year yields `None`, never an error.
    pub fn locate(&self, year: &str, pollutant: &str) -> Option<&DataSet> {
        self.get(Pollutant::parse(pollutant)?, year)
    }

    /// Typed variant of [`locate`](Self::locate).
    pub fn get(&self, pollutant: Pollutant, year: &str) -> Option<&DataSet> {
        self.sets.get(&pollutant)?.get(year)
    }

    /// Load the live dataset for a pollutant from its conventional file
    /// name and store it under the `"live"` key, replacing any previous
    /// live dataset. On failure the previous live dataset (if any) stays.
    pub fn load_live(&mut self, pollutant: Pollutant) -> Result<(), LoadError> {
        let path = self
            .base_dir
            .join(pollutant.data_dir())
            .join(pollutant.live_file_name());
        let dataset = loader::load_file(&path)?;

        info!("replacing live {pollutant} dataset ({} points)", dataset.len());
        self.sets
            .entry(pollutant)
            .or_default()
            .insert(LIVE_KEY.to_string(), dataset);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
