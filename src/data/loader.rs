use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info};

use super::filter::SpikeFilter;
use super::model::{Event, EventSeries};
use crate::error::{RasterError, Result};

/// Column holding the spike time in milliseconds.
pub const TIME_COLUMN: &str = "time_ms";
/// Column holding the source neuron id.
pub const NEURON_COLUMN: &str = "neuron_id";

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a spike log from a CSV file, applying `filter` while streaming.
///
/// Expected layout (extra columns such as `step` are ignored):
///
/// ```text
/// time_ms,neuron_id,step
/// 0.500,3,5
/// 1.200,7,12
/// ```
pub fn load_spikes(path: &Path, filter: &SpikeFilter) -> Result<EventSeries> {
    let file = File::open(path).map_err(|source| RasterError::Filesystem {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Reading spikes from {}", path.display());

    let series = load_spikes_from_reader(file, filter)?;
    info!("Loaded {} spikes from {}", series.len(), path.display());
    Ok(series)
}

/// Same as [`load_spikes`] for any byte source.
///
/// The header is validated before any data row is read. The first field that
/// fails to parse aborts the whole load. Once the cap in `filter` is reached
/// nothing further is read from `reader`.
pub fn load_spikes_from_reader<R: Read>(reader: R, filter: &SpikeFilter) -> Result<EventSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| RasterError::MalformedInput(format!("reading CSV header: {e}")))?;
    let time_idx = column_index(headers, TIME_COLUMN)?;
    let neuron_idx = column_index(headers, NEURON_COLUMN)?;

    let mut series = EventSeries::new();
    let mut record = csv::StringRecord::new();
    let mut skipped = 0usize;

    while reader
        .read_record(&mut record)
        .map_err(|e| RasterError::MalformedInput(format!("reading CSV row: {e}")))?
    {
        let line = record.position().map_or(0, |p| p.line());

        let time_ms: f64 = parse_field(&record, time_idx, TIME_COLUMN, line)?;
        if !filter.admits(time_ms) {
            skipped += 1;
            continue;
        }
        let neuron_id: i64 = parse_field(&record, neuron_idx, NEURON_COLUMN, line)?;
        series.push(Event { time_ms, neuron_id });

        if filter.is_full(series.len()) {
            debug!("Event cap of {} reached at line {line}", filter.max_events);
            break;
        }
    }

    debug!("{} spikes kept, {skipped} outside the time window", series.len());
    Ok(series)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        RasterError::MalformedInput(format!(
            "CSV must contain at least: {TIME_COLUMN}, {NEURON_COLUMN} (missing '{name}')"
        ))
    })
}

fn parse_field<T>(record: &csv::StringRecord, idx: usize, column: &str, line: u64) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = record.get(idx).ok_or_else(|| {
        RasterError::MalformedInput(format!("line {line}: missing '{column}' field"))
    })?;
    raw.trim().parse::<T>().map_err(|e| {
        RasterError::MalformedInput(format!("line {line}: {column} value '{raw}': {e}"))
    })
}
