//! Optional trace instrumentation for the adapter pipeline.
//!
//! Operational visibility without wiring a logger into the hot path:
//! - `TraceSink` is the observer contract, implemented by callers
//! - `TraceHandle` is the shared slot the pipeline components emit through
//! - at most one observer is installed at a time; installing replaces,
//!   clearing removes, and with no observer every emit is a cheap no-op

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;

/// Component names stamped on trace records.
pub mod component {
    pub const NORMALIZER: &str = "contract_normalizer";
    pub const TRANSLATOR: &str = "order_translator";
    pub const SINK: &str = "correlation_sink";
}

/// One observed pipeline operation.
#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord {
    /// Capture time, UTC.
    pub at: DateTime<Utc>,
    /// Which component emitted the record.
    pub component: &'static str,
    /// The operation that was performed.
    pub operation: &'static str,
    /// Correlated request or order id, when the operation has one.
    pub request_id: Option<i64>,
    /// Free-form human-readable context.
    pub detail: String,
}

/// Receiver for trace records.
///
/// Implementations must be cheap and non-blocking; records are delivered
/// synchronously on the emitting thread.
pub trait TraceSink: Send + Sync {
    fn record(&self, record: TraceRecord);
}

/// Cloneable handle to a single optional observer slot.
///
/// Clones share the slot, so one handle distributed across the pipeline
/// means a single install covers every component. Installing is
/// last-write-wins; there is no fan-out to multiple observers.
#[derive(Clone, Default)]
pub struct TraceHandle {
    slot: Arc<RwLock<Option<Arc<dyn TraceSink>>>>,
}

impl TraceHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an observer, replacing any previous one.
    pub fn install(&self, sink: Arc<dyn TraceSink>) {
        *self.slot.write() = Some(sink);
    }

    /// Remove the current observer, if any.
    pub fn clear(&self) {
        *self.slot.write() = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Emit one record if an observer is installed.
    ///
    /// The slot lock is released before the sink runs, so a sink may install
    /// or clear observers without deadlocking.
    pub(crate) fn emit(
        &self,
        component: &'static str,
        operation: &'static str,
        request_id: Option<i64>,
        detail: impl Into<String>,
    ) {
        let sink = self.slot.read().clone();
        if let Some(sink) = sink {
            sink.record(TraceRecord {
                at: Utc::now(),
                component,
                operation,
                request_id,
                detail: detail.into(),
            });
        }
    }
}

impl fmt::Debug for TraceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceHandle")
            .field("active", &self.is_active())
            .finish()
    }
}
