use std::fs;
use std::ops::Range;
use std::path::Path;

use log::{debug, info};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::TRANSPARENT;

use super::config::{validate_dpi, RenderConfig};
use super::style::{
    grid_style, Scale, ScatterStyle, AXIS_LABEL_PT, FONT_FAMILY, TICK_LABEL_PT, TITLE_PT,
};
use crate::data::EventSeries;
use crate::error::{RasterError, Result};

pub const X_LABEL: &str = "Time (ms)";
pub const Y_LABEL: &str = "Neuron ID";
pub const EMPTY_MESSAGE: &str = "No spikes in selected window";

/// Fraction of the data span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

/// Pixel extent of the plotting area inside the figure (end-exclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotArea {
    pub x: Range<i32>,
    pub y: Range<i32>,
}

// ---------------------------------------------------------------------------
// Raster plot
// ---------------------------------------------------------------------------

/// Render `series` as a spike raster and write it to `config.output`.
///
/// Missing parent directories are created. The image format follows the
/// output extension. An empty series produces a figure with a centred
/// placeholder message instead of points.
pub fn render_raster(series: &EventSeries, config: &RenderConfig) -> Result<()> {
    validate_dpi(config.dpi)?;
    ensure_parent_dir(&config.output)?;

    let scale = Scale::new(config.dpi);
    let (width, height) = scale.canvas_size();
    let mut buffer = pixel_buffer(width, height)?;
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        let area = draw_figure(&root, series, config, scale)?;
        root.present()?;
        debug!("Plotting area x={:?} y={:?}", area.x, area.y);
    }

    image::save_buffer(
        &config.output,
        &buffer,
        width,
        height,
        image::ExtendedColorType::Rgb8,
    )
    .map_err(|source| RasterError::ImageWrite {
        path: config.output.clone(),
        source,
    })?;

    info!(
        "Wrote {}x{} raster with {} spikes to {}",
        width,
        height,
        series.len(),
        config.output.display()
    );
    Ok(())
}

/// Zeroed RGB buffer for a `width` x `height` canvas.
fn pixel_buffer(width: u32, height: u32) -> Result<Vec<u8>> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or_else(|| {
            RasterError::Config(format!("{width}x{height} canvas does not fit in memory"))
        })?;
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|e| {
        RasterError::Render(format!("cannot allocate {width}x{height} canvas: {e}"))
    })?;
    buffer.resize(len, 0);
    Ok(buffer)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|source| RasterError::Filesystem {
                path: parent.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

fn draw_figure(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    series: &EventSeries,
    config: &RenderConfig,
    scale: Scale,
) -> Result<PlotArea> {
    root.fill(&WHITE)?;

    let x_range = axis_range(series.times().iter().copied());
    let y_range = axis_range(series.neuron_ids().iter().map(|&id| id as f64));
    debug!("Axis ranges x={x_range:?} y={y_range:?}");

    // Label areas sized from the fonts they hold so nothing is clipped.
    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, (FONT_FAMILY, scale.font(TITLE_PT)).into_font())
        .margin(scale.px(TITLE_PT))
        .x_label_area_size(scale.px(AXIS_LABEL_PT + TICK_LABEL_PT * 2.0))
        .y_label_area_size(scale.px(AXIS_LABEL_PT + TICK_LABEL_PT * 4.0))
        .build_cartesian_2d(x_range, y_range)?;

    chart
        .configure_mesh()
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style((FONT_FAMILY, scale.font(AXIS_LABEL_PT)).into_font())
        .label_style((FONT_FAMILY, scale.font(TICK_LABEL_PT)).into_font())
        .bold_line_style(grid_style(scale))
        .light_line_style(TRANSPARENT)
        .draw()?;

    let (x, y) = chart.plotting_area().get_pixel_range();
    let plot_area = PlotArea { x, y };

    if series.is_empty() {
        // Pixel coordinates of the plotting area, independent of the axes.
        let area = chart.plotting_area().strip_coord_spec();
        let (w, h) = area.dim_in_pixel();
        let text_style = TextStyle::from((FONT_FAMILY, scale.font(AXIS_LABEL_PT)).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw_text(EMPTY_MESSAGE, &text_style, ((w / 2) as i32, (h / 2) as i32))?;
        return Ok(plot_area);
    }

    let style = ScatterStyle::new(scale, config.marker_size, config.opacity);
    chart.draw_series(
        series
            .iter()
            .filter(|ev| ev.time_ms.is_finite())
            .map(|ev| Circle::new((ev.time_ms, ev.neuron_id as f64), style.radius, style.shape)),
    )?;

    Ok(plot_area)
}

/// Data bounds padded by [`AXIS_MARGIN`]; `0..1` when there is nothing finite.
fn axis_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }
    let span = max - min;
    if span == 0.0 {
        return (min - 0.5)..(max + 0.5);
    }
    let pad = span * AXIS_MARGIN;
    (min - pad)..(max + pad)
}
