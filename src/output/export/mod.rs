//! Export module for simulation results.
//!
//! Each format is an independent implementation in its own sub-module.
//!
//! # Available formats
//!
//! | Format | Module     | Content                                         |
//! |--------|------------|-------------------------------------------------|
//! | CSV    | [`csv`]    | One row per time point, one column per curve    |
//! | JSON   | [`json`]   | Full [`CascadeResult`](crate::solver::CascadeResult), reloadable |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use leach_rs::output::export::{export_cascade_csv, export_cascade_json, CsvConfig};
//!
//! // Full export (all time steps)
//! export_cascade_csv(&result, &["NO3", "Mg"], "heap.csv", None)?;
//!
//! // Downsampled export to 100 rows, first and last time points kept
//! let config = CsvConfig::default().downsample(100);
//! export_cascade_csv(&result, &["NO3", "Mg"], "heap_light.csv", Some(&config))?;
//!
//! export_cascade_json(&result, "heap.json")?;
//! ```

pub mod csv;
pub mod json;

pub use csv::{export_cascade_csv, CsvConfig, CsvMetadata};
pub use json::{export_cascade_json, load_cascade_json};
