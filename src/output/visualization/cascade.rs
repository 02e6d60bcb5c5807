//! Concentration curves of a cascade run
//!
//! One chart with one curve per (species, stage): stages are told apart by
//! color, species A is a plain line and species B a line with point markers.
//! With the default three stages this gives the six classic leaching curves.
//!
//! # Usage
//!
//! ```rust,ignore
//! use leach_rs::output::visualization::{plot_cascade, PlotConfig};
//!
//! let result = simulator.run()?;
//! plot_cascade(&result, &["NO3", "Mg"], "leaching.png", None)?;
//! ```

use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use crate::physics::Species;
use crate::solver::CascadeResult;

// =================================================================================================
// Curve extraction
// =================================================================================================

/// One concentration curve of the chart
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Curve {
    pub stage: usize,
    pub species: Species,
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Extract every (species, stage) curve, species A first
///
/// Labels read `"<species name> - stage <n>"` with stages counted from 1.
pub(crate) fn extract_curves(result: &CascadeResult, species_names: &[&str; 2]) -> Vec<Curve> {
    let mut curves = Vec::with_capacity(2 * result.stage_count());
    for (species, name) in Species::ALL.into_iter().zip(species_names) {
        for stage in 0..result.stage_count() {
            curves.push(Curve {
                stage,
                species,
                label: format!("{name} - stage {}", stage + 1),
                points: result.concentration_series(stage, species),
            });
        }
    }
    curves
}

/// Axis ranges `(max_time, max_concentration)` covering every curve
pub(crate) fn axis_ranges(curves: &[Curve]) -> (f64, f64) {
    let points = curves.iter().flat_map(|curve| curve.points.iter());
    let max_time = points.clone().map(|(t, _)| *t).fold(0.0_f64, f64::max);
    let max_conc = points.map(|(_, c)| *c).fold(0.0_f64, f64::max);
    (max_time.max(1e-10), max_conc.max(1e-10))
}

// =================================================================================================
// Public API
// =================================================================================================

/// Plot the concentration curves of every stage and species
///
/// # Arguments
///
/// * `result`        - Cascade result
/// * `species_names` - Legend names of species A and B
/// * `output_path`   - Output file path (`.svg` → vector, anything else → bitmap)
/// * `config`        - Optional plot configuration; `None` uses
///   [`PlotConfig::cascade`] defaults
///
/// # Errors
///
/// Returns `Err` if the result holds no data, contains non-finite values, or
/// the backend cannot write to `output_path`.
pub fn plot_cascade(
    result: &CascadeResult,
    species_names: &[&str; 2],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if result.is_empty() || result.stage_count() == 0 {
        return Err("Empty result: nothing to plot".into());
    }

    let curves = extract_curves(result, species_names);
    if curves
        .iter()
        .flat_map(|curve| curve.points.iter())
        .any(|(t, c)| !t.is_finite() || !c.is_finite())
    {
        return Err("Invalid data: NaN or Inf detected in concentration curves".into());
    }

    let default_config = PlotConfig::cascade(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let (max_time, max_conc) = axis_ranges(&curves);

    log::debug!("Plotting {} curves to {}", curves.len(), output_path);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_cascade_impl(backend, &curves, config, max_time, max_conc)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_cascade_impl(backend, &curves, config, max_time, max_conc)
        }
    }
}

// =================================================================================================
// Private Plot Implementation
// =================================================================================================

/// Render the cascade curves with the given drawing backend
fn plot_cascade_impl<DB: DrawingBackend>(
    backend: DB,
    curves: &[Curve],
    config: &PlotConfig,
    max_time: f64,
    max_conc: f64,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..max_time, 0.0..(max_conc * 1.1))?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.0}", x))
            .y_label_formatter(&|y| format!("{:.1}", y))
            .draw()?;
    }

    let spacing = config.marker_spacing.max(1);

    for curve in curves {
        let color = config.get_stage_color(curve.stage);
        let style = ShapeStyle::from(&color).stroke_width(config.line_width);

        match curve.species {
            Species::A => {
                chart
                    .draw_series(LineSeries::new(curve.points.iter().copied(), style))?
                    .label(curve.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }
            Species::B => {
                chart.draw_series(LineSeries::new(curve.points.iter().copied(), style))?;
                chart
                    .draw_series(
                        curve
                            .points
                            .iter()
                            .step_by(spacing)
                            .map(|(t, c)| Circle::new((*t, *c), 3, color.filled())),
                    )?
                    .label(curve.label.as_str())
                    .legend(move |(x, y)| {
                        EmptyElement::at((x + 10, y))
                            + PathElement::new(vec![(-10, 0), (10, 0)], color)
                            + Circle::new((0, 0), 3, color.filled())
                    });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
