/// Rendering layer: figure configuration, fixed styling, and the raster plot.
///
/// ```text
///   EventSeries + RenderConfig
///        │
///        ▼
///   ┌──────────┐   pixel buffer   ┌─────────┐
///   │  raster   │ ───────────────► │  image   │  encoder picked by extension
///   └──────────┘                  └─────────┘
/// ```

pub mod config;
pub mod raster;
pub mod style;

pub use config::RenderConfig;
pub use raster::render_raster;
