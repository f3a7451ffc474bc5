//! Chart rendering to PNG files
//!
//! Charts carry no text (the crate is built without a font backend, so
//! rendering works on headless machines with no fonts installed); the file
//! name says which chart is which, and the numbers behind every chart are
//! printed to stdout by the reports.

use crate::error::{Error, Result};
use plotters::prelude::*;
use std::path::Path;

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 900;

fn plot_error<E: std::fmt::Display>(e: E) -> Error {
    Error::Plot(e.to_string())
}

/// Diverging blue-white-red color for a correlation in [-1, 1], centered
/// on 0
fn diverging_color(r: f64) -> RGBColor {
    let t = r.clamp(-1.0, 1.0);
    if t >= 0.0 {
        let u = (255.0 * (1.0 - t)) as u8;
        RGBColor(255, u, u)
    } else {
        let u = (255.0 * (1.0 + t)) as u8;
        RGBColor(u, u, 255)
    }
}

/// Correlation matrix heatmap. `matrix` must be square.
pub fn heatmap(path: &Path, matrix: &[Vec<f64>]) -> Result<()> {
    let n = matrix.len();
    if n == 0 {
        return Ok(());
    }

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(0..n as i32, 0..n as i32)
        .map_err(plot_error)?;

    let mut cells = Vec::with_capacity(n * n);
    for (i, row) in matrix.iter().enumerate() {
        for (j, &r) in row.iter().enumerate() {
            cells.push(Rectangle::new(
                [
                    (j as i32, i as i32),
                    (j as i32 + 1, i as i32 + 1),
                ],
                diverging_color(r).filled(),
            ));
        }
    }
    chart.draw_series(cells).map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

/// Horizontal bar chart of signed values (one bar per entry, top to bottom)
pub fn barh(path: &Path, values: &[(String, f64)]) -> Result<()> {
    if values.is_empty() {
        return Ok(());
    }

    let lo = values.iter().map(|(_, v)| *v).fold(0.0_f64, f64::min);
    let mut hi = values.iter().map(|(_, v)| *v).fold(0.0_f64, f64::max);
    if hi <= lo {
        hi = lo + 1.0;
    }

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(lo..hi, 0..values.len() as i32)
        .map_err(plot_error)?;

    chart
        .draw_series(values.iter().enumerate().map(|(i, (_, v))| {
            let color = if *v >= 0.0 { RED.mix(0.6) } else { BLUE.mix(0.6) };
            Rectangle::new([(0.0, i as i32), (*v, i as i32 + 1)], color.filled())
        }))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

/// Vertical bar chart of counts (one bar per entry, left to right)
pub fn bars(path: &Path, counts: &[(String, usize)]) -> Result<()> {
    if counts.is_empty() {
        return Ok(());
    }

    let mut max = counts.iter().map(|(_, c)| *c as u64).max().unwrap_or(0);
    if max == 0 {
        max = 1;
    }

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(0..counts.len() as i32, 0u64..max)
        .map_err(plot_error)?;

    chart
        .draw_series(counts.iter().enumerate().map(|(i, (_, c))| {
            Rectangle::new(
                [(i as i32, 0u64), (i as i32 + 1, *c as u64)],
                BLUE.mix(0.6).filled(),
            )
        }))
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

/// Line chart with point markers over integer-keyed counts
pub fn line(path: &Path, points: &[(i64, usize)]) -> Result<()> {
    if points.is_empty() {
        return Ok(());
    }

    let x_min = points.iter().map(|(x, _)| *x).min().unwrap_or(0);
    let x_max = points.iter().map(|(x, _)| *x).max().unwrap_or(0) + 1;
    let mut y_max = points.iter().map(|(_, c)| *c as u64).max().unwrap_or(0);
    if y_max == 0 {
        y_max = 1;
    }

    let root = BitMapBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_2d(x_min..x_max, 0u64..y_max)
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(
            points.iter().map(|&(x, c)| (x, c as u64)),
            &BLUE,
        ))
        .map_err(plot_error)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, c)| Circle::new((x, c as u64), 3, BLUE.filled())),
        )
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}
