//! The outbound seam toward the gateway session.
//!
//! Everything the adapter needs from a live session is behind
//! [`GatewayTransport`]: a connectivity probe and two encoded sends.
//! Connection lifecycle, framing and reconnection stay with the session
//! owner on the other side of the seam.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::{Error, Result};
use crate::wire::{WireContract, WireOrder};

/// One encoded outbound request, ready for the session writer to frame.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundRequest {
    ContractDetails {
        request_id: i64,
        contract: WireContract,
    },
    PlaceOrder {
        order_id: i64,
        contract: WireContract,
        order: WireOrder,
    },
}

/// Capability set this adapter requires from a gateway session.
///
/// Implementations perform exactly one send per call and report transport
/// failure through the returned `Result`; they never retry on the
/// adapter's behalf.
#[async_trait]
pub trait GatewayTransport: Send + Sync {
    /// Whether the session can currently accept sends.
    fn is_connected(&self) -> bool;

    /// Ask the gateway to resolve a contract into detail rows.
    async fn request_contract_details(
        &self,
        request_id: i64,
        contract: &WireContract,
    ) -> Result<()>;

    /// Submit an order under the given order id.
    async fn place_order(
        &self,
        order_id: i64,
        contract: &WireContract,
        order: &WireOrder,
    ) -> Result<()>;
}

/// Transport backed by a live session's outbound channel.
///
/// The session owner drains the receiving end and does the socket work. A
/// closed channel means the session is gone, so sends fail with
/// [`Error::NotConnected`].
#[derive(Debug, Clone)]
pub struct SessionTransport {
    outbound: mpsc::UnboundedSender<OutboundRequest>,
}

impl SessionTransport {
    #[must_use]
    pub fn new(outbound: mpsc::UnboundedSender<OutboundRequest>) -> Self {
        Self { outbound }
    }

    /// A transport plus the receiver the session writer drains.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<OutboundRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    fn send(&self, request: OutboundRequest) -> Result<()> {
        self.outbound.send(request).map_err(|_| Error::NotConnected)
    }
}

#[async_trait]
impl GatewayTransport for SessionTransport {
    fn is_connected(&self) -> bool {
        !self.outbound.is_closed()
    }

    async fn request_contract_details(
        &self,
        request_id: i64,
        contract: &WireContract,
    ) -> Result<()> {
        debug!(request_id, symbol = %contract.symbol, "queueing contract-details request");
        self.send(OutboundRequest::ContractDetails {
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
        debug!(
            order_id,
            symbol = %contract.symbol,
            action = %order.action,
            "queueing order submission"
        );
        self.send(OutboundRequest::PlaceOrder {
            order_id,
            contract: contract.clone(),
            order: order.clone(),
        })
    }
}
