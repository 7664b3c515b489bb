//! Generate a synthetic DEFRA-format pollution file for a region, for
//! manual testing without the published datasets.
//!
//! Usage: `generate_sample [region] [pollutant] [output.csv]`

use std::path::PathBuf;

use anyhow::{Context, Result};

use ukair::data::model::{DataSet, Pollutant};
use ukair::data::writer;
use ukair::region::{Region, RegionManager};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// First 500 m cell centre at or above `bound`.
fn first_centre(bound: f64) -> i32 {
    let mut centre = (bound as i32 / 1000) * 1000 + 500;
    if f64::from(centre) < bound {
        centre += 1000;
    }
    centre
}

/// Walk the region's 500 m grid centres and synthesise a value for each:
/// a pollutant-level baseline that falls off toward the region edges,
/// plus gaussian noise.
fn generate_dataset(region: &Region, pollutant: Pollutant, rng: &mut SimpleRng) -> DataSet {
    let baseline = match pollutant {
        Pollutant::No2 => 28.0,
        Pollutant::Pm10 => 16.0,
        Pollutant::Pm25 => 9.5,
    };

    let mut dataset = DataSet::new(
        pollutant.display_name().to_string(),
        "2018".to_string(),
        "annual mean".to_string(),
        "ug m-3".to_string(),
    );

    let centre_x = (region.left + region.right) / 2.0;
    let centre_y = (region.bottom + region.top) / 2.0;
    let half_width = region.data_width() / 2.0;

    let mut grid_code = 60000;
    let mut y = first_centre(region.bottom);
    while f64::from(y) <= region.top {
        let mut x = first_centre(region.left);
        while f64::from(x) <= region.right {
            // Distance from the region centre, as a 0..1 fraction.
            let dx = (f64::from(x) - centre_x) / half_width;
            let dy = (f64::from(y) - centre_y) / half_width;
            let falloff = 1.0 - 0.5 * (dx * dx + dy * dy).sqrt();

            let value = (baseline * falloff + rng.gauss(0.0, baseline * 0.08)).max(0.1);
            dataset.push_raw(
                &grid_code.to_string(),
                &x.to_string(),
                &y.to_string(),
                &format!("{value:.5}"),
            );

            grid_code += 1;
            x += 1000;
        }
        y += 1000;
    }

    dataset
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let region_name = args.next().unwrap_or_else(|| "London".to_string());
    let pollutant_name = args.next().unwrap_or_else(|| "no2".to_string());
    let output: PathBuf = args
        .next()
        .unwrap_or_else(|| "sample_data.csv".to_string())
        .into();

    let manager = RegionManager::new();
    let region = manager
        .get(&region_name)
        .with_context(|| format!("unknown region '{region_name}'"))?;
    let pollutant = Pollutant::parse(&pollutant_name)
        .with_context(|| format!("unknown pollutant '{pollutant_name}'"))?;

    let mut rng = SimpleRng::new(42);
    let dataset = generate_dataset(region, pollutant, &mut rng);
    writer::write_file(&dataset, &output)
        .with_context(|| format!("writing {}", output.display()))?;

    println!(
        "Wrote {} {} points for {} to {}",
        dataset.len(),
        pollutant,
        region.name,
        output.display()
    );
    Ok(())
}
