//! Temperature profile plots
//!
//! The backend follows the file extension: `.svg` renders with the SVG
//! backend, anything else as a bitmap (PNG).
//!
//! ```rust,ignore
//! use heateq::output::visualization::plot_profile;
//!
//! let result = solver.run();
//! plot_profile(&result, "profile.png", None)?;
//! ```

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use super::config::{PlotConfig, NO_TITLE};
use crate::output::export::{check_profile, ExportError};
use crate::solver::SimulationResult;

/// One labelled curve: `(label, x, u)`
pub type Profile<'a> = (&'a str, &'a [f64], &'a [f64]);

/// Plot the final profile of a run
///
/// # Errors
///
/// [`ExportError::EmptyProfile`] / [`ExportError::NonFinite`] for unusable
/// data, [`ExportError::Plot`] when rendering fails.
pub fn plot_profile(
    result: &SimulationResult,
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), ExportError> {
    let positions = result.positions();
    let label = format!("{} t={:.3}", result.scheme, result.time);

    let default_config = PlotConfig::profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let profile: Profile<'_> = (label.as_str(), positions.as_slice(), result.values.as_slice());
    plot_profiles(&[profile], output_path, Some(config))
}

/// Overlay several profiles on the same axes
///
/// Series colors come from [`PlotConfig::series_color`]; a single profile
/// uses `line_color`.
pub fn plot_profiles(
    profiles: &[Profile<'_>],
    output_path: impl AsRef<Path>,
    config: Option<&PlotConfig>,
) -> Result<(), ExportError> {
    if profiles.is_empty() {
        return Err(ExportError::EmptyProfile);
    }
    for (_, _, values) in profiles {
        check_profile(values)?;
    }

    let default_config = PlotConfig::profile(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let (x_range, y_range) = ranges(profiles);
    let path = output_path.as_ref();
    let size = (config.width, config.height);

    let outcome = match path.extension().and_then(|s| s.to_str()) {
        Some("svg") => draw(SVGBackend::new(path, size), profiles, config, x_range, y_range),
        _ => draw(BitMapBackend::new(path, size), profiles, config, x_range, y_range),
    };

    outcome.map_err(|e| ExportError::Plot(e.to_string()))?;
    log::debug!("plotted {} profile(s) to {}", profiles.len(), path.display());
    Ok(())
}

// Axis ranges covering every profile, padded by 10% vertically
fn ranges(profiles: &[Profile<'_>]) -> ((f64, f64), (f64, f64)) {
    let xs = profiles.iter().flat_map(|(_, x, _)| x.iter().copied());
    let us = profiles.iter().flat_map(|(_, _, u)| u.iter().copied());

    let (x_min, x_max) = bounds(xs);
    let (u_min, u_max) = bounds(us);

    let x_max = if x_max > x_min { x_max } else { x_min + 1.0 };
    let pad = if u_max > u_min { 0.1 * (u_max - u_min) } else { 1.0 };

    ((x_min, x_max), (u_min - pad, u_max + pad))
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

fn draw<DB: DrawingBackend>(
    backend: DB,
    profiles: &[Profile<'_>],
    config: &PlotConfig,
    (x_min, x_max): (f64, f64),
    (y_min, y_max): (f64, f64),
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15).x_label_area_size(45).y_label_area_size(60);
    if !config.title.is_empty() {
        builder.caption(&config.title, ("sans-serif", 40).into_font());
    }
    let mut chart = builder.build_cartesian_2d(x_min..x_max, y_min..y_max)?;

    if config.show_grid {
        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .x_label_formatter(&|x| format!("{:.3}", x))
            .y_label_formatter(&|y| format!("{:.3}", y))
            .draw()?;
    }

    for (index, (label, x, u)) in profiles.iter().enumerate() {
        let color = if profiles.len() == 1 {
            config.line_color
        } else {
            config.series_color(index)
        };

        chart
            .draw_series(LineSeries::new(
                x.iter().zip(u.iter()).map(|(x, u)| (*x, *u)),
                ShapeStyle::from(&color).stroke_width(config.line_width),
            ))?
            .label(*label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if config.show_legend {
        chart
            .configure_series_labels()
            .background_style(config.background.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    root.present()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::HeatParameters;
    use crate::solver::{HeatSolver, SchemeKind};
    use tempfile::tempdir;

    #[test]
    fn test_ranges_are_padded() {
        let x = [0.0, 0.5, 1.0];
        let u = [-1.0, 0.0, 1.0];
        let ((x0, x1), (y0, y1)) = ranges(&[("u", &x[..], &u[..])]);

        assert_eq!((x0, x1), (0.0, 1.0));
        assert!((y0 + 1.2).abs() < 1e-12);
        assert!((y1 - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_flat_profile_gets_nonempty_range() {
        let x = [0.0, 1.0];
        let u = [3.0, 3.0];
        let (_, (y0, y1)) = ranges(&[("u", &x[..], &u[..])]);
        assert!(y1 > y0);
    }

    #[test]
    fn test_plot_final_profile_svg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profile.svg");
        let result = HeatSolver::new(HeatParameters::default().with_max_time(0.1), SchemeKind::Ftcs)
            .unwrap()
            .run();

        plot_profile(&result, &path, Some(&PlotConfig::minimal())).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_plot_several_profiles_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("profiles.png");
        let x = [0.0, 0.5, 1.0];
        let a = [0.0, 0.5, 1.0];
        let b = [0.0, 0.25, 1.0];

        plot_profiles(&[("a", &x[..], &a[..]), ("b", &x[..], &b[..])], &path, Some(&PlotConfig::minimal())).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_empty_and_non_finite_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("never.png");

        assert!(matches!(plot_profiles(&[], &path, None), Err(ExportError::EmptyProfile)));

        let x = [0.0, 1.0];
        let u = [0.0, f64::INFINITY];
        assert!(matches!(
            plot_profiles(&[("u", &x[..], &u[..])], &path, None),
            Err(ExportError::NonFinite { index: 1, .. })
        ));
        assert!(!path.exists());
    }
}
