use std::path::PathBuf;

use chrono::{Local, Months, NaiveDate};

use crate::error::GenError;
use crate::record::DateFormat;

pub const DEFAULT_OUTPUT: &str = "data/archivo_sucio_ray50MB.csv";
pub const DEFAULT_ROWS: usize = 780_000;
pub const DEFAULT_TARGET_MB: u64 = 50;
pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_ID_BASE: u64 = 100;
pub const DEFAULT_WINDOW_MONTHS: u32 = 24;
pub const DEFAULT_MAX_NAME_BATCHES: usize = 64;

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// # Errors
/// Errors with [`GenError::InvalidConfig`] when the byte count does not fit in a `u64`.
pub fn megabytes(mb: u64) -> Result<u64, GenError> {
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| GenError::InvalidConfig(format!("{mb} MiB does not fit in a byte count")))
}

/// A canonical city, how often it is picked, and the misspellings it can be
/// corrupted into.
#[derive(Debug, Clone, PartialEq)]
pub struct CitySpec {
    pub name: String,
    pub weight: f64,
    pub typos: Vec<String>,
}

impl CitySpec {
    #[must_use]
    pub fn new(name: &str, weight: f64, typos: &[&str]) -> Self {
        CitySpec {
            name: name.to_string(),
            weight,
            typos: typos.iter().map(ToString::to_string).collect(),
        }
    }
}

#[must_use]
pub fn default_cities() -> Vec<CitySpec> {
    vec![
        CitySpec::new("Madrid", 0.35, &["Mdrid", "Madird"]),
        CitySpec::new("Barcelona", 0.3, &["Barcleona", "Brcelona"]),
        CitySpec::new("Valencia", 0.2, &["Valenca", "Vlencia"]),
        CitySpec::new("Sevilla", 0.15, &["Svilla", "Sevila"]),
    ]
}

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub output: PathBuf,
    pub rows: usize,
    /// `None` leaves the serialized output unpadded
    pub target_bytes: Option<u64>,
    pub typo_rate: f64,
    pub duplicate_rate: f64,
    pub seed: u64,
    pub id_base: u64,
    pub min_age: u8,
    pub max_age: u8,
    /// Inclusive
    pub window_start: NaiveDate,
    /// Exclusive
    pub window_end: NaiveDate,
    /// Probabilities for [`DateFormat::ALL`], in that order
    pub date_weights: Vec<f64>,
    pub cities: Vec<CitySpec>,
    pub max_name_batches: usize,
    pub create_dirs: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let window_end = Local::now().date_naive();
        GeneratorConfig {
            output: PathBuf::from(DEFAULT_OUTPUT),
            rows: DEFAULT_ROWS,
            target_bytes: Some(DEFAULT_TARGET_MB * 1024 * 1024),
            typo_rate: 0.03,
            duplicate_rate: 0.01,
            seed: DEFAULT_SEED,
            id_base: DEFAULT_ID_BASE,
            min_age: 18,
            max_age: 90,
            window_start: window_start_before(window_end),
            window_end,
            date_weights: vec![0.33, 0.33, 0.34],
            cities: default_cities(),
            max_name_batches: DEFAULT_MAX_NAME_BATCHES,
            create_dirs: true,
        }
    }
}

/// The default window length counted back from `end`.
#[must_use]
pub fn window_start_before(end: NaiveDate) -> NaiveDate {
    end.checked_sub_months(Months::new(DEFAULT_WINDOW_MONTHS))
        .unwrap_or(NaiveDate::MIN)
}

impl GeneratorConfig {
    /// Pairs every date format with its probability.
    pub fn date_format_weights(&self) -> impl Iterator<Item = (DateFormat, f64)> + '_ {
        DateFormat::ALL
            .into_iter()
            .zip(self.date_weights.iter().copied())
    }

    /// # Errors
    /// Errors with [`GenError::InvalidConfig`] when a rate or probability is out of range, the
    /// weights do not sum to one, the city table is unusable, or a range is empty.
    pub fn validate(&self) -> Result<(), GenError> {
        check_rate("typo rate", self.typo_rate)?;
        check_rate("duplicate rate", self.duplicate_rate)?;

        if self.min_age > self.max_age {
            return Err(GenError::InvalidConfig(format!(
                "minimum age {} is above maximum age {}",
                self.min_age, self.max_age
            )));
        }
        if self.window_start >= self.window_end {
            return Err(GenError::InvalidConfig(format!(
                "date window {} .. {} is empty",
                self.window_start, self.window_end
            )));
        }
        if self.id_base.checked_add(self.rows as u64).is_none() {
            return Err(GenError::InvalidConfig(format!(
                "{} ids starting at {} overflow the id range",
                self.rows, self.id_base
            )));
        }
        if self.max_name_batches == 0 {
            return Err(GenError::InvalidConfig(
                "at least one name batch is required".to_string(),
            ));
        }

        if self.date_weights.len() != DateFormat::ALL.len() {
            return Err(GenError::InvalidConfig(format!(
                "expected {} date format weights, got {}",
                DateFormat::ALL.len(),
                self.date_weights.len()
            )));
        }
        check_distribution("date format", &self.date_weights)?;

        if self.cities.is_empty() {
            return Err(GenError::InvalidConfig("city table is empty".to_string()));
        }
        if let Some(city) = self.cities.iter().find(|c| c.typos.is_empty()) {
            return Err(GenError::InvalidConfig(format!(
                "city {} has no typo variants",
                city.name
            )));
        }
        let weights: Vec<f64> = self.cities.iter().map(|c| c.weight).collect();
        check_distribution("city", &weights)
    }
}

fn check_rate(what: &str, rate: f64) -> Result<(), GenError> {
    if (0.0..=1.0).contains(&rate) {
        Ok(())
    } else {
        Err(GenError::InvalidConfig(format!(
            "{what} must be within [0, 1], got {rate}"
        )))
    }
}

fn check_distribution(what: &str, weights: &[f64]) -> Result<(), GenError> {
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(GenError::InvalidConfig(format!(
            "{what} weights must be non-negative"
        )));
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(GenError::InvalidConfig(format!(
            "{what} weights sum to {sum}, expected 1"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_bytes, Some(52_428_800));
    }

    #[test]
    fn test_window_start_is_two_years_back() {
        let end = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            window_start_before(end),
            NaiveDate::from_ymd_opt(2024, 10, 19).unwrap()
        );
    }

    #[test]
    fn test_rejects_bad_rates() {
        let config = GeneratorConfig {
            typo_rate: 1.5,
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(GenError::InvalidConfig(_))));

        let config = GeneratorConfig {
            duplicate_rate: -0.1,
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(GenError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_bad_weights() {
        let config = GeneratorConfig {
            date_weights: vec![0.5, 0.5],
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GeneratorConfig {
            date_weights: vec![0.5, 0.5, 0.5],
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());

        let mut cities = default_cities();
        cities[0].weight = 0.9;
        let config = GeneratorConfig {
            cities,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_id_overflow() {
        let config = GeneratorConfig {
            id_base: u64::MAX,
            rows: 1,
            ..GeneratorConfig::default()
        };
        assert!(matches!(config.validate(), Err(GenError::InvalidConfig(_))));

        let config = GeneratorConfig {
            id_base: u64::MAX - 10,
            rows: 10,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_megabytes() {
        assert_eq!(megabytes(50).unwrap(), 52_428_800);
        assert!(matches!(
            megabytes(u64::MAX / 1024),
            Err(GenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_city_without_typos() {
        let config = GeneratorConfig {
            cities: vec![CitySpec::new("Bilbao", 1.0, &[])],
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_ranges() {
        let config = GeneratorConfig {
            min_age: 40,
            max_age: 30,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());

        let day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let config = GeneratorConfig {
            window_start: day,
            window_end: day,
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
