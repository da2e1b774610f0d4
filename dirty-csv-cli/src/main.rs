use std::error::Error;
use std::io;
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;
use csv::WriterBuilder;
use log::info;

use dirty_csv::config::{
    megabytes, window_start_before, GeneratorConfig, DEFAULT_ID_BASE, DEFAULT_MAX_NAME_BATCHES,
    DEFAULT_OUTPUT, DEFAULT_ROWS, DEFAULT_SEED, DEFAULT_TARGET_MB,
};
use dirty_csv::dataset::{run, Dataset, Report};
use dirty_csv::error::GenError;
use dirty_csv::record::HEADER;

#[derive(Parser)]
#[clap(author, version, about = "Generates a dirty customer CSV of an exact size", long_about = None)]
struct Cli {
    /// Where to write the CSV file
    #[clap(long, short, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Number of base rows, before duplicates are added
    #[clap(long, short, default_value_t = DEFAULT_ROWS)]
    rows: usize,

    /// Target file size in MiB
    #[clap(long, default_value_t = DEFAULT_TARGET_MB)]
    target_mb: u64,

    /// Target file size in bytes, overrides --target-mb
    #[clap(long)]
    target_bytes: Option<u64>,

    /// Leave the file at its natural size instead of padding it
    #[clap(long)]
    no_pad: bool,

    /// Fraction of rows whose city gets misspelled
    #[clap(long, default_value_t = 0.03)]
    typo_rate: f64,

    /// Fraction of rows appended again as duplicates
    #[clap(long, default_value_t = 0.01)]
    duplicate_rate: f64,

    #[clap(long, short, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// First customer id
    #[clap(long, default_value_t = DEFAULT_ID_BASE)]
    id_base: u64,

    #[clap(long, default_value_t = 18)]
    min_age: u8,

    #[clap(long, default_value_t = 90)]
    max_age: u8,

    /// First possible registration date (YYYY-MM-DD), defaults to two years before --end-date
    #[clap(long)]
    start_date: Option<NaiveDate>,

    /// Registration dates fall strictly before this date (YYYY-MM-DD), defaults to today
    #[clap(long)]
    end_date: Option<NaiveDate>,

    /// Probabilities of the ISO, European and US date formats
    #[clap(long, value_delimiter = ',', default_value = "0.33,0.33,0.34")]
    date_weights: Vec<f64>,

    /// Give up on unique names after this many resampling batches
    #[clap(long, default_value_t = DEFAULT_MAX_NAME_BATCHES)]
    max_name_batches: usize,

    /// Fail instead of creating a missing output directory
    #[clap(long)]
    no_create_dirs: bool,

    /// Number of rows to print in the summary
    #[clap(long, default_value_t = 5)]
    sample_rows: usize,
}

impl Cli {
    fn config(&self) -> Result<GeneratorConfig, GenError> {
        let window_end = self.end_date.unwrap_or_else(|| Local::now().date_naive());
        let target_bytes = if self.no_pad {
            None
        } else {
            match self.target_bytes {
                Some(bytes) => Some(bytes),
                None => Some(megabytes(self.target_mb)?),
            }
        };
        Ok(GeneratorConfig {
            output: self.output.clone(),
            rows: self.rows,
            target_bytes,
            typo_rate: self.typo_rate,
            duplicate_rate: self.duplicate_rate,
            seed: self.seed,
            id_base: self.id_base,
            min_age: self.min_age,
            max_age: self.max_age,
            window_start: self
                .start_date
                .unwrap_or_else(|| window_start_before(window_end)),
            window_end,
            date_weights: self.date_weights.clone(),
            max_name_batches: self.max_name_batches,
            create_dirs: !self.no_create_dirs,
            ..GeneratorConfig::default()
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn print_summary(
    dataset: &Dataset,
    report: &Report,
    sample_rows: usize,
) -> Result<(), Box<dyn Error>> {
    println!("File written: {}", report.path.display());
    println!(
        "Final size: {:.2} MB ({} bytes, {} of them padding)",
        report.file_bytes as f64 / (1024.0 * 1024.0),
        report.file_bytes,
        report.padding_bytes
    );
    println!(
        "Total rows: {} ({} base, {} duplicates, {} misspelled cities)",
        report.rows, report.base_rows, report.duplicates, report.corrupted_cities
    );
    println!("First rows:");

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(io::stdout());
    writer.write_record(HEADER)?;
    for row in dataset.rows.iter().take(sample_rows) {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli.config()?;
    info!(
        "Writing {} rows to {} with seed {}",
        config.rows,
        config.output.display(),
        config.seed
    );
    let (dataset, report) = run(&config)?;
    print_summary(&dataset, &report, cli.sample_rows)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library() {
        let cli = Cli::parse_from(["dirty-csv", "--end-date", "2026-10-19"]);
        let config = cli.config().unwrap();
        assert_eq!(config.rows, 780_000);
        assert_eq!(config.target_bytes, Some(52_428_800));
        assert_eq!(config.seed, 42);
        assert_eq!(config.date_weights, vec![0.33, 0.33, 0.34]);
        assert_eq!(
            config.window_start,
            NaiveDate::from_ymd_opt(2024, 10, 19).unwrap()
        );
        assert!(config.create_dirs);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_no_pad_and_overrides() {
        let cli = Cli::parse_from([
            "dirty-csv",
            "--no-pad",
            "--rows",
            "10",
            "--date-weights",
            "1,0,0",
            "--no-create-dirs",
        ]);
        let config = cli.config().unwrap();
        assert_eq!(config.target_bytes, None);
        assert_eq!(config.rows, 10);
        assert_eq!(config.date_weights, vec![1.0, 0.0, 0.0]);
        assert!(!config.create_dirs);
    }

    #[test]
    fn test_target_bytes_overrides_mb() {
        let cli = Cli::parse_from(["dirty-csv", "--target-mb", "1", "--target-bytes", "1000"]);
        assert_eq!(cli.config().unwrap().target_bytes, Some(1000));
        let cli = Cli::parse_from(["dirty-csv", "--target-mb", "1"]);
        assert_eq!(cli.config().unwrap().target_bytes, Some(1_048_576));
    }

    #[test]
    fn test_huge_target_mb_rejected() {
        let cli = Cli::parse_from(["dirty-csv", "--target-mb", "18446744073709551615"]);
        assert!(matches!(cli.config(), Err(GenError::InvalidConfig(_))));

        let cli = Cli::parse_from([
            "dirty-csv",
            "--target-mb",
            "18446744073709551615",
            "--no-pad",
        ]);
        assert_eq!(cli.config().unwrap().target_bytes, None);
    }
}
