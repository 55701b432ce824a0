//! Indoor vs. outdoor temperature charts.
//!
//! # Usage
//!
//! ```rust,ignore
//! use factory_sim::plot::plot_trajectory;
//!
//! let result = run_scenario(&config)?;
//! plot_trajectory(&result.trajectory, Path::new("temperature.svg"), "Baseline")?;
//! ```

use std::error::Error;
use std::path::Path;

use plotters::prelude::*;

use crate::sim::types::Trajectory;

const SIZE: (u32, u32) = (1024, 640);

/// Renders indoor and outdoor temperature over time as an SVG chart.
///
/// # Errors
///
/// Returns an error for an empty trajectory or if drawing fails.
pub fn plot_trajectory(
    trajectory: &Trajectory,
    output_path: &Path,
    title: &str,
) -> Result<(), Box<dyn Error>> {
    let series = [
        Series::new("Indoor", trajectory.points(), RED),
        Series::new("Outdoor", trajectory.outdoor_points(), BLUE),
    ];
    plot_series(&series, trajectory, output_path, title)
}

/// Overlays a heated and a non-heated run with the shared outdoor driver.
///
/// # Errors
///
/// Returns an error if either trajectory is empty or drawing fails.
pub fn plot_comparison(
    heated: &Trajectory,
    unheated: &Trajectory,
    output_path: &Path,
    title: &str,
) -> Result<(), Box<dyn Error>> {
    if unheated.is_empty() {
        return Err("empty trajectory".into());
    }
    let series = [
        Series::new("Heated", heated.points(), RED),
        Series::new("Non-heated", unheated.points(), GREEN),
        Series::new("Outdoor", heated.outdoor_points(), BLUE),
    ];
    plot_series(&series, heated, output_path, title)
}

struct Series {
    label: &'static str,
    points: Vec<(f64, f64)>,
    color: RGBColor,
}

impl Series {
    fn new(label: &'static str, points: impl Iterator<Item = (f64, f64)>, color: RGBColor) -> Self {
        Self {
            label,
            points: points.collect(),
            color,
        }
    }
}

/// Draws every series on one time axis spanning `timeline`.
fn plot_series(
    series: &[Series],
    timeline: &Trajectory,
    output_path: &Path,
    title: &str,
) -> Result<(), Box<dyn Error>> {
    if timeline.is_empty() {
        return Err("empty trajectory".into());
    }

    let (t_min, t_max) = (timeline.times[0], timeline.end_time);
    let (y_min, y_max) = series
        .iter()
        .flat_map(|s| s.points.iter().map(|&(_, y)| y))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let pad = ((y_max - y_min) * 0.05).max(1e-6);

    let root = SVGBackend::new(output_path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(t_min..t_max, (y_min - pad)..(y_max + pad))?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Temperature")
        .y_label_formatter(&|y| format!("{y:.3}"))
        .draw()?;

    for s in series {
        let color = s.color;
        chart
            .draw_series(LineSeries::new(s.points.iter().copied(), color))?
            .label(s.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::grid::evenly_spaced;
    use crate::sim::model::{NdFactory, ThermalModel};

    #[test]
    fn writes_svg_with_both_series() {
        let grid = evenly_spaced(0.0, 2.0, 0.01);
        let mut model = NdFactory::new(1.0, 1.0, 10.0, 1.0, 0.05, true);
        let trajectory = model.simulate(&grid, None).expect("valid grid");

        let path = std::env::temp_dir().join("factory_sim_plot_test.svg");
        plot_trajectory(&trajectory, &path, "Test").expect("plot renders");
        let svg = std::fs::read_to_string(&path).unwrap_or_default();
        std::fs::remove_file(&path).ok();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Indoor"));
        assert!(svg.contains("Outdoor"));
    }

    #[test]
    fn empty_trajectory_is_an_error() {
        let path = std::env::temp_dir().join("factory_sim_plot_empty.svg");
        assert!(plot_trajectory(&Trajectory::default(), &path, "Empty").is_err());
    }

    #[test]
    fn comparison_chart_labels_every_series() {
        let grid = evenly_spaced(0.0, 2.0, 0.01);
        let mut heated = NdFactory::new(1.0, 1.0, 10.0, 1.0, 0.05, true);
        let mut unheated = NdFactory::new(1.0, 1.0, 10.0, 1.0, 0.05, false);
        let heated = heated.simulate(&grid, None).expect("valid grid");
        let unheated = unheated.simulate(&grid, None).expect("valid grid");

        let path = std::env::temp_dir().join("factory_sim_plot_comparison.svg");
        plot_comparison(&heated, &unheated, &path, "Comparison").expect("plot renders");
        let svg = std::fs::read_to_string(&path).unwrap_or_default();
        std::fs::remove_file(&path).ok();
        assert!(svg.contains("Heated"));
        assert!(svg.contains("Non-heated"));
        assert!(svg.contains("Outdoor"));
    }
}
