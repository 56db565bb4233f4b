//! Adapter facade: domain objects in, wire sends out, callbacks correlated.
//!
//! A [`TwsBridge`] owns one normalizer/translator pair, one correlation
//! sink and one transport, and allocates request/order ids from the
//! session's initial assignment. The session side feeds callbacks into
//! [`TwsBridge::sink`]; callers work entirely in domain types.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::info;

use crate::config::Config;
use crate::domain::{ContractSpec, OrderIntent};
use crate::error::Result;
use crate::gateway::{ContractDetailsRow, CorrelationSink, GatewayTransport};
use crate::trace::{TraceHandle, TraceSink};
use crate::wire::{ContractNormalizer, OrderTranslator};

pub struct TwsBridge {
    transport: Arc<dyn GatewayTransport>,
    sink: Arc<CorrelationSink>,
    normalizer: ContractNormalizer,
    translator: OrderTranslator,
    trace: TraceHandle,
    id_base: OnceCell<i64>,
    id_offset: AtomicI64,
}

impl TwsBridge {
    /// A bridge with default configuration (unbounded queues).
    #[must_use]
    pub fn new(transport: Arc<dyn GatewayTransport>) -> Self {
        Self::with_config(&Config::default(), transport)
    }

    #[must_use]
    pub fn with_config(config: &Config, transport: Arc<dyn GatewayTransport>) -> Self {
        let trace = TraceHandle::new();
        let sink = Arc::new(CorrelationSink::build(config.queues.capacity, trace.clone()));
        Self {
            transport,
            sink,
            normalizer: ContractNormalizer::with_trace(trace.clone()),
            translator: OrderTranslator::with_trace(trace.clone()),
            trace,
            id_base: OnceCell::new(),
            id_offset: AtomicI64::new(0),
        }
    }

    /// The correlation sink the session's callback decoder should feed.
    #[must_use]
    pub fn sink(&self) -> Arc<CorrelationSink> {
        Arc::clone(&self.sink)
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// Install a trace observer shared by every component of this bridge.
    pub fn install_trace(&self, sink: Arc<dyn TraceSink>) {
        self.trace.install(sink);
    }

    /// Remove the trace observer, if any.
    pub fn clear_trace(&self) {
        self.trace.clear();
    }

    /// Normalize, translate and submit an order. Returns the order id used.
    ///
    /// Validation failures surface before anything reaches the transport.
    /// Waits for the session's initial id assignment if it has not arrived
    /// yet.
    pub async fn place_order(&self, spec: &ContractSpec, intent: &OrderIntent) -> Result<i64> {
        let contract = self.normalizer.normalize(spec)?;
        let order = self.translator.translate(intent)?;
        let order_id = self.allocate_id().await;
        self.transport.place_order(order_id, &contract, &order).await?;
        info!(
            order_id,
            symbol = %contract.symbol,
            action = %order.action,
            order_type = %order.order_type,
            quantity = %order.total_quantity,
            "order submitted"
        );
        Ok(order_id)
    }

    /// Normalize a spec and ask the gateway for its contract details.
    /// Returns the request id; rows accumulate on the sink.
    pub async fn request_contract_details(&self, spec: &ContractSpec) -> Result<i64> {
        let contract = self.normalizer.normalize(spec)?;
        let request_id = self.allocate_id().await;
        self.transport
            .request_contract_details(request_id, &contract)
            .await?;
        info!(request_id, symbol = %contract.symbol, "contract details requested");
        Ok(request_id)
    }

    /// Request contract details and wait for the complete batch.
    ///
    /// The end-of-batch marker resolves once per session, so this is meant
    /// for the session's single outstanding resolution request; a second
    /// call observes the already-resolved marker and returns whatever rows
    /// are queued.
    pub async fn contract_details(&self, spec: &ContractSpec) -> Result<Vec<ContractDetailsRow>> {
        self.request_contract_details(spec).await?;
        self.sink.await_contract_details_end().await;
        Ok(self.sink.drain_contract_details())
    }

    /// The primary account identity announced by the gateway.
    pub async fn managed_account(&self) -> String {
        self.sink.await_managed_accounts().await
    }

    /// Next request/order id, seeded from the gateway's initial assignment.
    async fn allocate_id(&self) -> i64 {
        let base = self
            .id_base
            .get_or_init(|| async { self.sink.await_next_order_id().await })
            .await;
        base + self.id_offset.fetch_add(1, Ordering::Relaxed)
    }
}
