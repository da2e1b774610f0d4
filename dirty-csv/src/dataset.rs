//! The whole generation pipeline: seed, synthesize, corrupt, duplicate, serialize, pad, write.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::NamedTempFile;

use crate::config::GeneratorConfig;
use crate::defects::{corrupt_cities, duplicate_rows};
use crate::error::GenError;
use crate::names::{generate_unique_names, NameSource, SpanishNames};
use crate::padding::{pad_to_size, write_filler};
use crate::record::{DateFormat, Record};
use crate::serialize::to_csv_bytes;
use crate::synth::{generate_ages, generate_cities, generate_dates, generate_ids, render_dates};

/// The generated table, already sorted by `customer_id`.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub rows: Vec<Record>,
    pub base_rows: usize,
    pub corrupted_cities: usize,
    pub duplicates: usize,
}

/// What a finished run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub path: PathBuf,
    pub rows: usize,
    pub base_rows: usize,
    pub corrupted_cities: usize,
    pub duplicates: usize,
    pub unpadded_bytes: u64,
    pub padding_bytes: u64,
    pub file_bytes: u64,
}

impl Dataset {
    /// # Errors
    /// Errors if the configuration is invalid or not enough unique names could be drawn.
    pub fn generate(config: &GeneratorConfig) -> Result<Self, GenError> {
        Dataset::generate_with(config, &SpanishNames)
    }

    /// Same as [`Dataset::generate`] with a caller-provided name source.
    ///
    /// # Errors
    /// Errors if the configuration is invalid or `source` runs out of unique values.
    pub fn generate_with<S: NameSource>(
        config: &GeneratorConfig,
        source: &S,
    ) -> Result<Self, GenError> {
        config.validate()?;
        let n = config.rows;
        let mut rng = StdRng::seed_from_u64(config.seed);
        info!("Generating {} base rows with seed {}", n, config.seed);

        let ids = generate_ids(n, config.id_base);
        let ages = generate_ages(&mut rng, n, config.min_age, config.max_age);
        let names = generate_unique_names(source, &mut rng, n, config.max_name_batches)?;

        let mut cities: Vec<String> = generate_cities(&mut rng, n, &config.cities)?
            .into_iter()
            .map(|i| config.cities[i].name.clone())
            .collect();
        let corrupted_cities =
            corrupt_cities(&mut rng, &mut cities, &config.cities, config.typo_rate);

        let dates = generate_dates(&mut rng, n, config.window_start, config.window_end);
        let weights: Vec<(DateFormat, f64)> = config.date_format_weights().collect();
        let dates = render_dates(&mut rng, &dates, &weights);

        let mut rows: Vec<Record> = ids
            .into_iter()
            .zip(names)
            .zip(ages)
            .zip(cities)
            .zip(dates)
            .map(|((((id, name), age), city), date)| Record::new(id, name, age, city, date))
            .collect();

        let duplicates = duplicate_rows(&mut rng, &mut rows, config.duplicate_rate);

        Ok(Dataset {
            rows,
            base_rows: n,
            corrupted_cities,
            duplicates,
        })
    }

    /// Serializes the table and, when `target` is set, works out how many filler bytes bring
    /// it to exactly that size. Returns the unpadded bytes and the filler count.
    ///
    /// # Errors
    /// Errors if serialization fails or the unpadded output is already over `target`.
    pub fn to_bytes(&self, target: Option<u64>) -> Result<(Vec<u8>, u64), GenError> {
        let bytes = to_csv_bytes(&self.rows)?;
        let padding = match target {
            Some(target) => pad_to_size(bytes.len() as u64, target)?,
            None => 0,
        };
        Ok((bytes, padding))
    }
}

/// Runs the full pipeline for `config` and writes the output file.
///
/// # Errors
/// Errors on invalid configuration, name exhaustion, oversize output (no file is written),
/// a missing output directory when directory creation is off, or any I/O failure.
pub fn run(config: &GeneratorConfig) -> Result<(Dataset, Report), GenError> {
    let dataset = Dataset::generate(config)?;
    let report = write_dataset(&dataset, config)?;
    Ok((dataset, report))
}

/// # Errors
/// See [`run`].
pub fn write_dataset(dataset: &Dataset, config: &GeneratorConfig) -> Result<Report, GenError> {
    let (bytes, padding_bytes) = dataset.to_bytes(config.target_bytes)?;
    let unpadded_bytes = bytes.len() as u64;

    write_atomically(&config.output, &bytes, padding_bytes, config.create_dirs)?;
    let file_bytes = fs::metadata(&config.output)?.len();
    info!("Wrote {} bytes to {}", file_bytes, config.output.display());

    Ok(Report {
        path: config.output.clone(),
        rows: dataset.rows.len(),
        base_rows: dataset.base_rows,
        corrupted_cities: dataset.corrupted_cities,
        duplicates: dataset.duplicates,
        unpadded_bytes,
        padding_bytes,
        file_bytes,
    })
}

/// Writes `bytes` followed by `padding` filler bytes to a temporary file next to `path` and
/// renames it into place, so `path` never holds a partial file.
///
/// # Errors
/// Errors with [`GenError::PathNotFound`] when the parent directory is missing and
/// `create_dirs` is off, or with the underlying I/O error.
pub fn write_atomically(
    path: &Path,
    bytes: &[u8],
    padding: u64,
    create_dirs: bool,
) -> Result<(), GenError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        if create_dirs {
            info!("Creating output directory {}", parent.display());
            fs::create_dir_all(parent)?;
        } else {
            return Err(GenError::PathNotFound(parent.to_path_buf()));
        }
    }

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(bytes)?;
    write_filler(&mut file, padding)?;
    file.as_file().sync_all()?;
    file.persist(path)?;
    Ok(())
}
