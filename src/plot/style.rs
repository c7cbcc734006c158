use plotters::style::{Color, RGBColor, ShapeStyle, BLACK};

// ---------------------------------------------------------------------------
// Fixed figure styling
// ---------------------------------------------------------------------------

/// Spike marker colour (`#111111`).
pub const POINT_COLOR: RGBColor = RGBColor(0x11, 0x11, 0x11);

/// Figure size in inches (width, height).
pub const CANVAS_INCHES: (f64, f64) = (12.0, 6.0);

/// Default font family for every text element.
pub const FONT_FAMILY: &str = "sans-serif";

/// Font sizes in points.
pub const TITLE_PT: f64 = 12.0;
pub const AXIS_LABEL_PT: f64 = 10.0;
pub const TICK_LABEL_PT: f64 = 9.0;

/// Grid overlay opacity and line width (points).
pub const GRID_ALPHA: f64 = 0.15;
pub const GRID_WIDTH_PT: f64 = 0.5;

const POINTS_PER_INCH: f64 = 72.0;

// ---------------------------------------------------------------------------
// Point → pixel scaling
// ---------------------------------------------------------------------------

/// Converts typographic sizes to pixels at a given resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    dpi: u32,
}

impl Scale {
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    /// Canvas size in pixels.
    pub fn canvas_size(&self) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            (CANVAS_INCHES.0 * dpi).round() as u32,
            (CANVAS_INCHES.1 * dpi).round() as u32,
        )
    }

    /// Font size in pixels for a size given in points.
    pub fn font(&self, pt: f64) -> f64 {
        pt * f64::from(self.dpi) / POINTS_PER_INCH
    }

    /// Whole-pixel length for a size in points, never below one pixel.
    pub fn px(&self, pt: f64) -> u32 {
        self.font(pt).round().max(1.0) as u32
    }

    /// Marker radius in pixels. `size` is the marker area in square points.
    pub fn marker_radius(&self, size: f64) -> u32 {
        let diameter_pt = size.max(0.0).sqrt();
        self.px(diameter_pt / 2.0)
    }
}

// ---------------------------------------------------------------------------
// Layer styles
// ---------------------------------------------------------------------------

/// How the spike scatter layer is drawn.
#[derive(Debug, Clone, Copy)]
pub struct ScatterStyle {
    pub shape: ShapeStyle,
    pub radius: u32,
}

impl ScatterStyle {
    pub fn new(scale: Scale, marker_size: f64, opacity: f64) -> Self {
        // Backend blending expects alpha in [0, 1].
        let alpha = opacity.clamp(0.0, 1.0);
        Self {
            shape: POINT_COLOR.mix(alpha).filled(),
            radius: scale.marker_radius(marker_size),
        }
    }
}

/// Thin, faint grid lines.
pub fn grid_style(scale: Scale) -> ShapeStyle {
    BLACK.mix(GRID_ALPHA).stroke_width(scale.px(GRID_WIDTH_PT))
}
