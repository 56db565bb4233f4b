//! Recording [`TraceSink`] for asserting on emitted trace records.

use parking_lot::Mutex;

use crate::trace::{TraceRecord, TraceSink};

/// Collects every record it receives.
#[derive(Default)]
pub struct RecordingTraceSink {
    records: Mutex<Vec<TraceRecord>>,
}

impl RecordingTraceSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records received so far, in emission order.
    pub fn records(&self) -> Vec<TraceRecord> {
        self.records.lock().clone()
    }

    /// `(component, operation)` pairs in emission order, for compact
    /// sequence assertions.
    pub fn operations(&self) -> Vec<(&'static str, &'static str)> {
        self.records
            .lock()
            .iter()
            .map(|r| (r.component, r.operation))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl TraceSink for RecordingTraceSink {
    fn record(&self, record: TraceRecord) {
        self.records.lock().push(record);
    }
}
