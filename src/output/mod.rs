//! Output module for simulation results
//!
//! This module provides tools to output simulation results in various formats:
//! - **Visualization**: PNG/SVG concentration curves using plotters
//! - **Export**: CSV/JSON data export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Plots and graphics
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   └── cascade.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     ├── csv.rs
//!     └── json.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use leach_rs::output::{export_cascade_csv, plot_cascade};
//!
//! plot_cascade(&result, &["NO3", "Mg"], "leaching.png", None)?;
//! export_cascade_csv(&result, &["NO3", "Mg"], "leaching.csv", None)?;
//! ```
//!
//! Both sub-modules read a [`CascadeResult`](crate::solver::CascadeResult)
//! and never modify it.

pub mod export;
pub mod visualization;

pub use export::{export_cascade_csv, export_cascade_json, load_cascade_json, CsvConfig, CsvMetadata};
pub use visualization::{plot_cascade, PlotConfig, NO_TITLE};
