use std::path::PathBuf;

use super::style::CANVAS_INCHES;
use crate::error::{RasterError, Result};

pub const DEFAULT_TITLE: &str = "Spike Raster Plot";
pub const DEFAULT_MARKER_SIZE: f64 = 1.0;
pub const DEFAULT_OPACITY: f64 = 0.8;
pub const DEFAULT_DPI: u32 = 160;

/// Canvas sides must stay below this many pixels.
pub const MAX_CANVAS_PX: u64 = 1 << 16;

/// Everything the renderer needs besides the spikes themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Plot title.
    pub title: String,
    /// Marker area in square points.
    pub marker_size: f64,
    /// Point opacity, nominally 0–1.
    pub opacity: f64,
    /// Output resolution in dots per inch.
    pub dpi: u32,
    /// Image path; the format follows the extension.
    pub output: PathBuf,
}

impl RenderConfig {
    pub fn new(
        output: impl Into<PathBuf>,
        title: impl Into<String>,
        marker_size: f64,
        opacity: f64,
        dpi: u32,
    ) -> Result<Self> {
        validate_dpi(dpi)?;
        Ok(Self {
            title: title.into(),
            marker_size,
            opacity,
            dpi,
            output: output.into(),
        })
    }

    /// Defaults for everything but the output path.
    pub fn with_defaults(output: impl Into<PathBuf>) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            marker_size: DEFAULT_MARKER_SIZE,
            opacity: DEFAULT_OPACITY,
            dpi: DEFAULT_DPI,
            output: output.into(),
        }
    }
}

/// Reject resolutions that give an empty canvas or one too large to allocate.
pub fn validate_dpi(dpi: u32) -> Result<()> {
    if dpi == 0 {
        return Err(RasterError::Config("dpi must be greater than 0".into()));
    }
    let longest_side = (CANVAS_INCHES.0.max(CANVAS_INCHES.1) * f64::from(dpi)).round() as u64;
    if longest_side >= MAX_CANVAS_PX {
        return Err(RasterError::Config(format!(
            "dpi {dpi} gives a {longest_side} px canvas side, must be less than {MAX_CANVAS_PX}"
        )));
    }
    Ok(())
}
