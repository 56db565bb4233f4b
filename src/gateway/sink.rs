//! Asynchronous correlation of push-delivered gateway callbacks.
//!
//! The gateway answers over a callback stream instead of request/response
//! pairs. The [`CorrelationSink`] gives that stream a consumable shape:
//! - one-shot announcements resolve [`CompletionHandle`]s that any number
//!   of tasks can await
//! - repeatable callbacks accumulate on [`EventQueue`]s that consumers
//!   drain in batches
//!
//! [`CorrelationSink::dispatch`] is total: it never blocks, never fails and
//! has exactly one routing destination per event.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::{debug, warn};

use crate::domain::OrderEvent;
use crate::trace::{component, TraceHandle};
use crate::wire::OrderTranslator;

use super::event::{ContractDetailsRow, GatewayEvent};

/// A single-assignment result slot.
///
/// Resolves at most once; later resolutions are ignored. Any number of
/// tasks may wait, all of them observe the same value.
#[derive(Debug)]
pub struct CompletionHandle<T> {
    cell: OnceLock<T>,
    notify: Notify,
}

impl<T: Clone> CompletionHandle<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: OnceLock::new(),
            notify: Notify::new(),
        }
    }

    /// Resolve the handle. The first call wins and returns `true`; any
    /// later call leaves the stored value untouched and returns `false`.
    pub fn resolve(&self, value: T) -> bool {
        let won = self.cell.set(value).is_ok();
        if won {
            self.notify.notify_waiters();
        }
        won
    }

    /// The resolved value, without waiting.
    #[must_use]
    pub fn peek(&self) -> Option<T> {
        self.cell.get().cloned()
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Wait until the handle is resolved.
    ///
    /// May wait forever if the matching event never arrives; timeout policy
    /// belongs to the caller.
    pub async fn wait(&self) -> T {
        loop {
            // Register interest before re-checking the cell so a resolve
            // racing between the check and the await still wakes us.
            let notified = self.notify.notified();
            if let Some(value) = self.cell.get() {
                return value.clone();
            }
            notified.await;
        }
    }
}

impl<T: Clone> Default for CompletionHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Multi-producer queue with batch-drain consumption.
///
/// Per-producer arrival order is preserved; there is no ordering guarantee
/// across queues. Unbounded unless built with a capacity, in which case the
/// oldest entry is shed on overflow and counted.
#[derive(Debug)]
pub struct EventQueue<T> {
    items: Mutex<VecDeque<T>>,
    capacity: Option<usize>,
    shed: AtomicU64,
}

impl<T> EventQueue<T> {
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            capacity: None,
            shed: AtomicU64::new(0),
        }
    }

    /// A queue holding at most `capacity` entries. Zero is treated as one.
    /// The bound is a shed threshold, not an up-front allocation.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            capacity: Some(capacity.max(1)),
            shed: AtomicU64::new(0),
        }
    }

    pub fn push(&self, item: T) {
        let mut items = self.items.lock();
        if let Some(capacity) = self.capacity {
            if items.len() >= capacity {
                items.pop_front();
                self.shed.fetch_add(1, Ordering::Relaxed);
            }
        }
        items.push_back(item);
    }

    /// Remove and return everything currently queued, oldest first.
    #[must_use]
    pub fn drain(&self) -> Vec<T> {
        self.items.lock().drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    /// Entries discarded because the queue was at capacity.
    #[must_use]
    pub fn shed_count(&self) -> u64 {
        self.shed.load(Ordering::Relaxed)
    }
}

fn queue<T>(capacity: Option<usize>) -> EventQueue<T> {
    match capacity {
        Some(capacity) => EventQueue::bounded(capacity),
        None => EventQueue::unbounded(),
    }
}

/// Routes decoded gateway events to completion handles and event queues.
pub struct CorrelationSink {
    next_order_id: CompletionHandle<i64>,
    managed_accounts: CompletionHandle<String>,
    contract_details_end: CompletionHandle<i64>,
    errors: EventQueue<String>,
    contract_details: EventQueue<ContractDetailsRow>,
    order_events: EventQueue<OrderEvent>,
    translator: OrderTranslator,
    trace: TraceHandle,
}

impl CorrelationSink {
    /// A sink with unbounded queues.
    #[must_use]
    pub fn new() -> Self {
        Self::build(None, TraceHandle::new())
    }

    /// A sink whose queues shed their oldest entry beyond `capacity`.
    #[must_use]
    pub fn bounded(capacity: usize) -> Self {
        Self::build(Some(capacity), TraceHandle::new())
    }

    pub(crate) fn build(capacity: Option<usize>, trace: TraceHandle) -> Self {
        Self {
            next_order_id: CompletionHandle::new(),
            managed_accounts: CompletionHandle::new(),
            contract_details_end: CompletionHandle::new(),
            errors: queue(capacity),
            contract_details: queue(capacity),
            order_events: queue(capacity),
            translator: OrderTranslator::with_trace(trace.clone()),
            trace,
        }
    }

    #[must_use]
    pub fn trace_handle(&self) -> &TraceHandle {
        &self.trace
    }

    /// Route one decoded gateway event.
    ///
    /// One-shot repeats are dropped with a log line; order callbacks are
    /// lowered to canonical records on the way in; faults and notices are
    /// flattened to text so the error queue never loses a payload it cannot
    /// represent.
    pub fn dispatch(&self, event: GatewayEvent) {
        let kind = event.kind();
        let correlation_id = event.correlation_id();
        match event {
            GatewayEvent::NextOrderId(id) => {
                if !self.next_order_id.resolve(id) {
                    debug!(id, "ignoring repeated order-id assignment");
                }
            }
            GatewayEvent::ManagedAccounts(accounts) => {
                if !self.managed_accounts.resolve(accounts) {
                    debug!("ignoring repeated managed-accounts announcement");
                }
            }
            GatewayEvent::ContractDetails(row) => self.contract_details.push(row),
            GatewayEvent::ContractDetailsEnd { request_id } => {
                if !self.contract_details_end.resolve(request_id) {
                    debug!(request_id, "ignoring repeated contract-details end marker");
                }
            }
            GatewayEvent::OrderStatus(update) => {
                self.order_events.push(self.translator.status_event(&update));
            }
            GatewayEvent::OpenOrder(update) => {
                self.order_events
                    .push(self.translator.open_order_event(&update));
            }
            GatewayEvent::Fault {
                request_id,
                code,
                message,
            } => {
                warn!(request_id, code, %message, "gateway fault");
                self.errors
                    .push(format!("id={request_id} code={code}: {message}"));
            }
            GatewayEvent::Notice(text) => self.errors.push(text),
        }
        self.trace
            .emit(component::SINK, "dispatch", correlation_id, kind);
    }

    // -- one-shot announcements ---------------------------------------------

    /// Wait for the session's initial order-id assignment.
    pub async fn await_next_order_id(&self) -> i64 {
        let id = self.next_order_id.wait().await;
        self.trace
            .emit(component::SINK, "await_next_order_id", None, id.to_string());
        id
    }

    /// Wait for the primary account identity.
    pub async fn await_managed_accounts(&self) -> String {
        let accounts = self.managed_accounts.wait().await;
        self.trace.emit(
            component::SINK,
            "await_managed_accounts",
            None,
            accounts.clone(),
        );
        accounts
    }

    /// Wait for the end-of-batch marker of the outstanding contract-details
    /// request; returns the request id the marker referenced.
    pub async fn await_contract_details_end(&self) -> i64 {
        let request_id = self.contract_details_end.wait().await;
        self.trace.emit(
            component::SINK,
            "await_contract_details_end",
            Some(request_id),
            "batch complete",
        );
        request_id
    }

    #[must_use]
    pub fn peek_next_order_id(&self) -> Option<i64> {
        self.next_order_id.peek()
    }

    #[must_use]
    pub fn peek_managed_accounts(&self) -> Option<String> {
        self.managed_accounts.peek()
    }

    #[must_use]
    pub fn peek_contract_details_end(&self) -> Option<i64> {
        self.contract_details_end.peek()
    }

    // -- queue consumption --------------------------------------------------

    /// Drain accumulated fault/notice text, oldest first.
    #[must_use]
    pub fn drain_errors(&self) -> Vec<String> {
        let drained = self.errors.drain();
        self.trace.emit(
            component::SINK,
            "drain_errors",
            None,
            drained.len().to_string(),
        );
        drained
    }

    /// Drain accumulated contract-details rows, oldest first.
    #[must_use]
    pub fn drain_contract_details(&self) -> Vec<ContractDetailsRow> {
        let drained = self.contract_details.drain();
        self.trace.emit(
            component::SINK,
            "drain_contract_details",
            None,
            drained.len().to_string(),
        );
        drained
    }

    /// Drain accumulated order events, oldest first.
    #[must_use]
    pub fn drain_order_events(&self) -> Vec<OrderEvent> {
        let drained = self.order_events.drain();
        self.trace.emit(
            component::SINK,
            "drain_order_events",
            None,
            drained.len().to_string(),
        );
        drained
    }

    #[must_use]
    pub fn pending_errors(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn pending_contract_details(&self) -> usize {
        self.contract_details.len()
    }

    #[must_use]
    pub fn pending_order_events(&self) -> usize {
        self.order_events.len()
    }

    /// Total entries shed across all queues since construction.
    #[must_use]
    pub fn shed_count(&self) -> u64 {
        self.errors.shed_count()
            + self.contract_details.shed_count()
            + self.order_events.shed_count()
    }
}

impl Default for CorrelationSink {
    fn default() -> Self {
        Self::new()
    }
}
