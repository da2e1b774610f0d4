#![deny(rust_2018_idioms)]
#![deny(clippy::correctness)]
#![deny(clippy::perf)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod dataset;
pub mod defects;
pub mod error;
pub mod names;
pub mod padding;
pub mod record;
pub mod serialize;
pub mod synth;
