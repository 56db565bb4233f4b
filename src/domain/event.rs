//! Canonical order-event records.
//!
//! Both order-status snapshots and open-order echoes lower into one flat
//! [`OrderEvent`] shape so downstream consumers can persist or display them
//! uniformly. Fields a given source does not carry are zero or empty, never
//! absent.

use rust_decimal::Decimal;
use serde::Serialize;

/// Which callback an [`OrderEvent`] was lowered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OrderEventKind {
    OrderStatus,
    OpenOrder,
}

/// One canonical order lifecycle record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderEvent {
    pub kind: OrderEventKind,
    pub order_id: i64,
    pub perm_id: i64,
    pub client_id: i64,
    pub symbol: String,
    pub action: String,
    pub order_type: String,
    pub status: String,
    pub filled: Decimal,
    pub remaining: Decimal,
    pub avg_fill_price: Decimal,
    pub last_fill_price: Decimal,
    pub account: String,
    /// Compact annotation of hold/cap/parent context, `;`-joined. Empty when
    /// there is nothing noteworthy.
    pub reason: String,
}

impl OrderEvent {
    #[must_use]
    pub fn is_status(&self) -> bool {
        self.kind == OrderEventKind::OrderStatus
    }

    #[must_use]
    pub fn is_open_order(&self) -> bool {
        self.kind == OrderEventKind::OpenOrder
    }
}
