//! Column-at-a-time generation of the base rows.

use chrono::{Duration, NaiveDate};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::config::CitySpec;
use crate::error::GenError;
use crate::record::DateFormat;

/// `n` consecutive ids from `base`. The caller keeps `base + n` within `u64`, which
/// [`GeneratorConfig::validate`](crate::config::GeneratorConfig::validate) checks.
#[must_use]
pub fn generate_ids(n: usize, base: u64) -> Vec<u64> {
    (0..n as u64).map(|i| base + i).collect()
}

/// Uniform ages in `[min, max]`.
pub fn generate_ages<R: Rng + ?Sized>(rng: &mut R, n: usize, min: u8, max: u8) -> Vec<u8> {
    (0..n).map(|_| rng.gen_range(min..=max)).collect()
}

/// Weighted draw over the city table; returns indices into `cities`.
///
/// # Errors
/// Errors when the weights are all zero, negative or otherwise unusable.
pub fn generate_cities<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    cities: &[CitySpec],
) -> Result<Vec<usize>, GenError> {
    let dist = WeightedIndex::new(cities.iter().map(|c| c.weight))?;
    Ok((0..n).map(|_| dist.sample(rng)).collect())
}

/// Uniform dates over the half-open window `[start, end)`. An empty window yields `start`.
pub fn generate_dates<R: Rng + ?Sized>(
    rng: &mut R,
    n: usize,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<NaiveDate> {
    let span = (end - start).num_days();
    if span <= 0 {
        return vec![start; n];
    }
    (0..n)
        .map(|_| start + Duration::days(rng.gen_range(0..span)))
        .collect()
}

/// Renders each date in a format chosen by one uniform float per date, tested against the
/// cumulative probabilities in `weights`.
pub fn render_dates<R: Rng + ?Sized>(
    rng: &mut R,
    dates: &[NaiveDate],
    weights: &[(DateFormat, f64)],
) -> Vec<String> {
    dates
        .iter()
        .map(|date| pick_format(rng.gen::<f64>(), weights).render(*date))
        .collect()
}

fn pick_format(roll: f64, weights: &[(DateFormat, f64)]) -> DateFormat {
    let mut cumulative = 0.0;
    for (format, weight) in weights {
        cumulative += weight;
        if roll < cumulative {
            return *format;
        }
    }
    // Rounding left the roll above the final threshold
    weights.last().map_or(DateFormat::Iso, |(format, _)| *format)
}
