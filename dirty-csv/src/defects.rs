//! Deliberate data-quality defects: misspelled cities and duplicated rows.

use log::info;
use rand::seq::{index, SliceRandom};
use rand::Rng;

use crate::config::CitySpec;
use crate::record::Record;

/// `round(n * rate)`, never more than `n`.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn defect_count(n: usize, rate: f64) -> usize {
    let count = (n as f64 * rate).round();
    if count <= 0.0 {
        0
    } else {
        (count as usize).min(n)
    }
}

/// Replaces the city of `round(n * rate)` distinct rows, picked without replacement, by one of
/// that city's typo variants. Values that are not in `cities` are left alone.
///
/// Returns the number of rows that were corrupted.
pub fn corrupt_cities<R: Rng + ?Sized>(
    rng: &mut R,
    column: &mut [String],
    cities: &[CitySpec],
    rate: f64,
) -> usize {
    let amount = defect_count(column.len(), rate);
    let mut corrupted = 0;
    for i in index::sample(rng, column.len(), amount).into_iter() {
        let typo = cities
            .iter()
            .find(|c| c.name == column[i])
            .and_then(|c| c.typos.choose(rng));
        if let Some(typo) = typo {
            column[i] = typo.clone();
            corrupted += 1;
        }
    }
    info!("Corrupted {} of {} city values", corrupted, column.len());
    corrupted
}

/// Appends `round(n * rate)` rows sampled with replacement from the current table, then
/// stable-sorts by `customer_id` so every copy lands right after its original.
///
/// Returns the number of rows appended.
pub fn duplicate_rows<R: Rng + ?Sized>(rng: &mut R, rows: &mut Vec<Record>, rate: f64) -> usize {
    let base = rows.len();
    let amount = if base == 0 { 0 } else { defect_count(base, rate) };
    rows.reserve(amount);
    for _ in 0..amount {
        let pick = rng.gen_range(0..base);
        rows.push(rows[pick].clone());
    }
    rows.sort_by_key(|r| r.customer_id);
    info!("Appended {} duplicate rows to {} base rows", amount, base);
    amount
}
