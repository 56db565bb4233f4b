//! Mock [`GatewayTransport`] implementations for testing.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::gateway::{GatewayTransport, OutboundRequest};
use crate::wire::{WireContract, WireOrder};

// ---------------------------------------------------------------------------
// RecordingTransport
// ---------------------------------------------------------------------------

/// A transport that records every send for later assertions.
///
/// Starts connected; flipping [`RecordingTransport::set_connected`] to
/// `false` makes the probe report disconnected and every send fail with
/// [`Error::NotConnected`] without recording anything.
pub struct RecordingTransport {
    connected: AtomicBool,
    sent: Mutex<Vec<OutboundRequest>>,
    send_count: AtomicU32,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(true),
            sent: Mutex::new(Vec::new()),
            send_count: AtomicU32::new(0),
        }
    }

    pub fn disconnected() -> Self {
        let transport = Self::new();
        transport.set_connected(false);
        transport
    }

    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Everything sent so far, in send order.
    pub fn sent(&self) -> Vec<OutboundRequest> {
        self.sent.lock().clone()
    }

    pub fn send_count(&self) -> u32 {
        self.send_count.load(Ordering::SeqCst)
    }

    fn record(&self, request: OutboundRequest) -> Result<()> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        self.send_count.fetch_add(1, Ordering::SeqCst);
        self.sent.lock().push(request);
        Ok(())
    }
}

impl Default for RecordingTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GatewayTransport for RecordingTransport {
    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn request_contract_details(
        &self,
        request_id: i64,
        contract: &WireContract,
    ) -> Result<()> {
        self.record(OutboundRequest::ContractDetails {
            request_id,
            contract: contract.clone(),
        })
    }

    async fn place_order(
        &self,
        order_id: i64,
        contract: &WireContract,
        order: &WireOrder,
    ) -> Result<()> {
        self.record(OutboundRequest::PlaceOrder {
            order_id,
            contract: contract.clone(),
            order: order.clone(),
        })
    }
}
