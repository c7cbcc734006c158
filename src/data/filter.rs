// ---------------------------------------------------------------------------
// Filter predicate: time window plus an event cap
// ---------------------------------------------------------------------------

/// Which spikes to keep while loading.
///
/// * `start_ms` / `end_ms`: inclusive time bounds, `None` → unbounded
/// * `max_events`: stop after this many accepted events, `0` → unbounded
///
/// A window with `start_ms > end_ms` is valid and admits nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SpikeFilter {
    pub start_ms: Option<f64>,
    pub end_ms: Option<f64>,
    pub max_events: usize,
}

impl SpikeFilter {
    /// Whether a spike at `time_ms` lies inside the window.
    pub fn admits(&self, time_ms: f64) -> bool {
        if let Some(start) = self.start_ms {
            if time_ms < start {
                return false;
            }
        }
        if let Some(end) = self.end_ms {
            if time_ms > end {
                return false;
            }
        }
        true
    }

    /// Whether `accepted` events already satisfy the cap.
    pub fn is_full(&self, accepted: usize) -> bool {
        self.max_events > 0 && accepted >= self.max_events
    }
}
