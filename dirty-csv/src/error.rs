use std::io;
use std::path::PathBuf;

use rand::distributions::WeightedError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("Could not move the finished file into place")]
    PersistError(#[from] tempfile::PersistError),
    #[error("Invalid selection weights")]
    InvalidWeights(#[from] WeightedError),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Name source produced only {produced} of {requested} unique names after {batches} batches")]
    ExhaustedUniqueSource {
        requested: usize,
        produced: usize,
        batches: usize,
    },
    #[error("Serialized output is {actual} bytes, over the {target} byte target; generate fewer rows")]
    Oversize { actual: u64, target: u64 },
    #[error("Output directory does not exist: {0}")]
    PathNotFound(PathBuf),
}
