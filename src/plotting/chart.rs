use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::fmt::Display;
use std::ops::Range;
use std::path::Path;

use super::styles::{ChartStyle, ChartTheme, TANGO_COLORS};
use crate::error::{Error, Result};
use crate::types::{BenchCommand, ResultMatrix, Revision};
use crate::utils::series_means;

// Helper function to wrap plotters errors
fn plot_err<E: Display>(e: E) -> Error {
    Error::Plot(e.to_string())
}

/// Fail when there are more commands than colors to tell them apart.
pub fn ensure_palette_capacity(command_count: usize) -> Result<()> {
    if command_count > TANGO_COLORS.len() {
        return Err(Error::TooManyCommands {
            count: command_count,
            max: TANGO_COLORS.len(),
        });
    }
    Ok(())
}

/// Plot the evolution of every command's results over `revisions` and write
/// the chart to `output` as a PNG.
///
/// Each sample is drawn as a marker, and the per-revision mean as a line
/// labeled with the command in the legend. An empty `y_label` leaves the y
/// axis without description.
pub fn render(
    commands: &[BenchCommand],
    revisions: &[Revision],
    results: &ResultMatrix,
    output: &Path,
    y_label: &str,
) -> Result<()> {
    ensure_palette_capacity(commands.len())?;
    if revisions.is_empty() {
        return Err(Error::NoRevisions);
    }
    if !results.has_shape(commands.len(), revisions.len()) {
        return Err(Error::ShapeMismatch {
            commands: commands.len(),
            revisions: revisions.len(),
        });
    }

    let style = ChartStyle::default();
    let theme = ChartTheme::default();
    let root = BitMapBackend::new(output, (style.width, style.height)).into_drawing_area();
    draw_chart(&root, commands, revisions, results, y_label, &style, &theme)?;
    root.present().map_err(plot_err)?;

    info!("Chart written to {}", output.display());
    Ok(())
}

fn draw_chart(
    root: &DrawingArea<BitMapBackend, Shift>,
    commands: &[BenchCommand],
    revisions: &[Revision],
    results: &ResultMatrix,
    y_label: &str,
    style: &ChartStyle,
    theme: &ChartTheme,
) -> Result<()> {
    root.fill(&theme.background_color).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(root)
        .margin_top(style.margin_top)
        .margin_right(style.margin_right)
        .x_label_area_size(style.x_label_area_size)
        .y_label_area_size(style.y_label_area_size)
        .build_cartesian_2d(x_range(revisions.len()), value_range(results))
        .map_err(plot_err)?;

    let labels: Vec<String> = revisions.iter().map(Revision::tick_label).collect();
    let x_label_formatter = |x: &f64| tick_label_at(&labels, *x);
    let font = ("sans-serif", style.font_size).into_font();

    let mut mesh = chart.configure_mesh();
    mesh.light_line_style(TRANSPARENT)
        .bold_line_style(theme.grid_color)
        .axis_style(theme.axis_color)
        .x_labels(revisions.len())
        .x_label_formatter(&x_label_formatter)
        // Vertical revision labels hanging below the axis
        .x_label_style(
            font.color(&theme.text_color)
                .transform(FontTransform::Rotate90)
                .pos(Pos::new(HPos::Right, VPos::Center)),
        )
        .y_label_style(font.color(&theme.text_color));
    if !y_label.is_empty() {
        mesh.y_desc(y_label);
    }
    mesh.draw().map_err(plot_err)?;

    let marker_size = style.marker_size;
    for (index, command) in commands.iter().enumerate() {
        let color = TANGO_COLORS[index];
        let series = results.series(index);

        // All samples of a revision share its x position
        chart
            .draw_series(series.iter().enumerate().flat_map(|(x, samples)| {
                samples
                    .iter()
                    .map(move |&y| Circle::new((x as f64, y), marker_size, color.filled()))
            }))
            .map_err(plot_err)?;

        let means = series_means(series);
        chart
            .draw_series(LineSeries::new(
                means.into_iter().enumerate().map(|(x, y)| (x as f64, y)),
                color.stroke_width(style.line_width),
            ))
            .map_err(plot_err)?
            .label(command.label())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&theme.legend_background)
        .border_style(&theme.axis_color)
        .label_font(font.color(&theme.text_color))
        .position(SeriesLabelPosition::UpperRight)
        .draw()
        .map_err(plot_err)?;

    Ok(())
}

/// X axis range, one unit per revision.
///
/// A single revision gets a unit-wide range centered on it, since an empty
/// range can't be mapped to pixels.
pub fn x_range(revision_count: usize) -> Range<f64> {
    if revision_count <= 1 {
        -0.5..0.5
    } else {
        0.0..(revision_count - 1) as f64
    }
}

/// Y axis range covering every sample, with a 5% margin on both ends.
pub fn value_range(results: &ResultMatrix) -> Range<f64> {
    let (min, max) = results
        .iter()
        .flatten()
        .flatten()
        .copied()
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), value| {
            (min.min(value), max.max(value))
        });

    if min > max {
        return 0.0..1.0;
    }

    let span = max - min;
    let margin = if span > 0.0 {
        span * 0.05
    } else {
        // Flat series, keep the line off the chart borders
        max.abs().max(1.0) * 0.05
    };
    (min - margin)..(max + margin)
}

/// Label of the revision at position `x`, empty between revisions.
pub(crate) fn tick_label_at(labels: &[String], x: f64) -> String {
    let position = x.round();
    if (x - position).abs() > 1e-6 || position < 0.0 {
        return String::new();
    }
    labels.get(position as usize).cloned().unwrap_or_default()
}
