//! Visualization module for leaching simulation results
//!
//! This module provides tools to visualize simulation results using the `plotters` library.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **cascade**: Concentration vs time, one curve per species and stage
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use leach_rs::output::visualization::{plot_cascade, PlotConfig};
//!
//! let result = simulator.run()?;
//!
//! // Default configuration
//! plot_cascade(&result, &["NO3", "Mg"], "leaching.png", None)?;
//!
//! // Custom title, SVG output
//! let config = PlotConfig::cascade("Heap 4");
//! plot_cascade(&result, &["NO3", "Mg"], "heap4.svg", Some(&config))?;
//! ```

pub mod cascade;
pub mod config;

pub use cascade::plot_cascade;
pub use config::{PlotConfig, NO_TITLE};
