/// Data layer: spike types, loading, and filtering.
///
/// Architecture:
/// ```text
///     spikes.csv
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  loader   │ ◄─── │  filter   │  time window + event cap
///   └──────────┘      └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ EventSeries  │  parallel times / neuron ids, file order
///   └─────────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;

pub use filter::SpikeFilter;
pub use loader::{load_spikes, load_spikes_from_reader};
pub use model::{Event, EventSeries, LoadSummary};
