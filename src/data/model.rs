use serde::Serialize;

// ---------------------------------------------------------------------------
// Event – one row of the spike log
// ---------------------------------------------------------------------------

/// A single spike: when it happened and which neuron fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Spike time in milliseconds.
    pub time_ms: f64,
    /// Source neuron identifier.
    pub neuron_id: i64,
}

// ---------------------------------------------------------------------------
// EventSeries – the loaded spikes, in file order
// ---------------------------------------------------------------------------

/// Spikes that survived filtering, kept as two parallel columns.
///
/// Both columns are only ever appended to together, so they always have the
/// same length and index `i` of each refers to the same spike. Events stay in
/// the order they were read; nothing here sorts them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventSeries {
    times: Vec<f64>,
    neuron_ids: Vec<i64>,
}

impl EventSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one event to the end of the series.
    pub fn push(&mut self, event: Event) {
        self.times.push(event.time_ms);
        self.neuron_ids.push(event.neuron_id);
    }

    /// Spike times in milliseconds.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Neuron ids, parallel to [`times`](Self::times).
    pub fn neuron_ids(&self) -> &[i64] {
        &self.neuron_ids
    }

    /// Number of events.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether no event survived filtering.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.times
            .iter()
            .zip(self.neuron_ids.iter())
            .map(|(&time_ms, &neuron_id)| Event { time_ms, neuron_id })
    }

    /// Count and bounds of the loaded series.
    pub fn summary(&self) -> LoadSummary {
        let finite_times = || self.times.iter().copied().filter(|t| t.is_finite());
        LoadSummary {
            events: self.len(),
            first_time_ms: self.times.first().copied(),
            last_time_ms: self.times.last().copied(),
            min_time_ms: finite_times().reduce(f64::min),
            max_time_ms: finite_times().reduce(f64::max),
            min_neuron_id: self.neuron_ids.iter().copied().min(),
            max_neuron_id: self.neuron_ids.iter().copied().max(),
        }
    }
}

impl FromIterator<Event> for EventSeries {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        let mut series = EventSeries::new();
        for event in iter {
            series.push(event);
        }
        series
    }
}

// ---------------------------------------------------------------------------
// LoadSummary – what ended up in the series
// ---------------------------------------------------------------------------

/// Snapshot of a loaded series, written by `--summary-json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadSummary {
    pub events: usize,
    pub first_time_ms: Option<f64>,
    pub last_time_ms: Option<f64>,
    pub min_time_ms: Option<f64>,
    pub max_time_ms: Option<f64>,
    pub min_neuron_id: Option<i64>,
    pub max_neuron_id: Option<i64>,
}
