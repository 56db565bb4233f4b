//! Decoded inbound gateway events.
//!
//! The session's callback decoder produces these; the correlation sink
//! routes them. Payload structs keep the raw callback fields, lowering into
//! canonical records happens in [`crate::wire::OrderTranslator`].

use rust_decimal::Decimal;

use crate::wire::{WireContract, WireOrder};

/// Raw fields of an order-status callback.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderStatusUpdate {
    pub order_id: i64,
    pub status: String,
    pub filled: Decimal,
    pub remaining: Decimal,
    pub avg_fill_price: Decimal,
    pub perm_id: i64,
    pub parent_id: i64,
    pub last_fill_price: Decimal,
    pub client_id: i64,
    pub why_held: String,
    pub mkt_cap_price: Decimal,
}

impl OrderStatusUpdate {
    /// An update with the given id and status; every other field zero or
    /// empty, to be filled in from the callback.
    pub fn new(order_id: i64, status: impl Into<String>) -> Self {
        Self {
            order_id,
            status: status.into(),
            filled: Decimal::ZERO,
            remaining: Decimal::ZERO,
            avg_fill_price: Decimal::ZERO,
            perm_id: 0,
            parent_id: 0,
            last_fill_price: Decimal::ZERO,
            client_id: 0,
            why_held: String::new(),
            mkt_cap_price: Decimal::ZERO,
        }
    }
}

/// Raw fields of an open-order echo.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenOrderUpdate {
    pub order_id: i64,
    pub contract: WireContract,
    pub order: WireOrder,
    pub status: String,
    pub perm_id: i64,
    pub client_id: i64,
}

/// One resolved row of a contract-details response.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractDetailsRow {
    pub request_id: i64,
    pub contract: WireContract,
}

/// A decoded push event from the gateway session.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    /// Initial order-id assignment, announced once per session.
    NextOrderId(i64),
    /// Primary account identity, announced once per session.
    ManagedAccounts(String),
    /// One row answering the outstanding contract-details request.
    ContractDetails(ContractDetailsRow),
    /// End-of-batch marker for the outstanding contract-details request.
    ContractDetailsEnd { request_id: i64 },
    /// Order lifecycle snapshot.
    OrderStatus(OrderStatusUpdate),
    /// Open-order echo with the order as the gateway holds it.
    OpenOrder(OpenOrderUpdate),
    /// Structured session fault; `request_id` is negative when the fault is
    /// not tied to a request.
    Fault {
        request_id: i64,
        code: i64,
        message: String,
    },
    /// Free-text session notice.
    Notice(String),
}

impl GatewayEvent {
    /// Short label for logs and traces.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            GatewayEvent::NextOrderId(_) => "next_order_id",
            GatewayEvent::ManagedAccounts(_) => "managed_accounts",
            GatewayEvent::ContractDetails(_) => "contract_details",
            GatewayEvent::ContractDetailsEnd { .. } => "contract_details_end",
            GatewayEvent::OrderStatus(_) => "order_status",
            GatewayEvent::OpenOrder(_) => "open_order",
            GatewayEvent::Fault { .. } => "fault",
            GatewayEvent::Notice(_) => "notice",
        }
    }

    /// The request or order id this event correlates to, if it has one.
    #[must_use]
    pub fn correlation_id(&self) -> Option<i64> {
        match self {
            GatewayEvent::NextOrderId(_)
            | GatewayEvent::ManagedAccounts(_)
            | GatewayEvent::Notice(_) => None,
            GatewayEvent::ContractDetails(row) => Some(row.request_id),
            GatewayEvent::ContractDetailsEnd { request_id } => Some(*request_id),
            GatewayEvent::OrderStatus(update) => Some(update.order_id),
            GatewayEvent::OpenOrder(update) => Some(update.order_id),
            GatewayEvent::Fault { request_id, .. } => {
                (*request_id >= 0).then_some(*request_id)
            }
        }
    }
}
