//! Spike raster plots from CSV spike logs.
//!
//! [`data`] streams and filters the log into an [`data::EventSeries`];
//! [`plot`] draws that series into a bitmap and writes it to disk.

pub mod cache;
pub mod data;
pub mod error;
pub mod plot;

pub use error::{RasterError, Result};
