use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors raised while loading spike logs or rendering raster images.
#[derive(Debug, Error)]
pub enum RasterError {
    /// Invalid render or filter settings.
    #[error("configuration error: {0}")]
    Config(String),

    /// Missing header columns or a field that does not parse.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Input cannot be opened, or an output directory/file cannot be created.
    #[error("filesystem error at {}: {source}", .path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The encoder rejected the output path (unknown extension, write failure).
    #[error("cannot write image {}: {source}", .path.display())]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Drawing backend failure (fonts, geometry).
    #[error("render error: {0}")]
    Render(String),
}

impl<E> From<DrawingAreaErrorKind<E>> for RasterError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RasterError::Render(err.to_string())
    }
}

/// Type alias for Results using [`RasterError`].
pub type Result<T> = std::result::Result<T, RasterError>;
