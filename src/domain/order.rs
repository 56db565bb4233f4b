//! Order intent types.
//!
//! An [`OrderIntent`] captures what the caller wants to do, independent of
//! any gateway encoding. Price requirements per order kind are enforced at
//! translation time, not here.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{UnsupportedError, ValidationError};

/// Side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderAction {
    Buy,
    Sell,
}

impl OrderAction {
    #[must_use]
    pub const fn wire_code(self) -> &'static str {
        match self {
            OrderAction::Buy => "BUY",
            OrderAction::Sell => "SELL",
        }
    }
}

impl FromStr for OrderAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(OrderAction::Buy),
            "SELL" => Ok(OrderAction::Sell),
            other => Err(ValidationError::InvalidValue {
                field: "action",
                reason: format!("expected BUY or SELL, got '{other}'"),
            }),
        }
    }
}

impl fmt::Display for OrderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_code())
    }
}

/// Supported order kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    Market,
    Limit,
    Stop,
    StopLimit,
}

impl OrderKind {
    /// Order-type code understood by the gateway. Note the embedded space in
    /// the stop-limit code; it is part of the wire vocabulary.
    #[must_use]
    pub const fn wire_code(self) -> &'static str {
        match self {
            OrderKind::Market => "MKT",
            OrderKind::Limit => "LMT",
            OrderKind::Stop => "STP",
            OrderKind::StopLimit => "STP LMT",
        }
    }
}

impl FromStr for OrderKind {
    type Err = UnsupportedError;

    /// Accepts the kind names case-insensitively; stop-limit also with an
    /// underscore (`STOP_LIMIT`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MARKET" => Ok(OrderKind::Market),
            "LIMIT" => Ok(OrderKind::Limit),
            "STOP" => Ok(OrderKind::Stop),
            "STOPLIMIT" | "STOP_LIMIT" => Ok(OrderKind::StopLimit),
            other => Err(UnsupportedError::OrderType {
                tag: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_code())
    }
}

/// What the caller wants to do, before any gateway encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub action: OrderAction,
    pub order_type: OrderKind,
    pub quantity: Decimal,
    #[serde(default)]
    pub limit_price: Option<Decimal>,
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    #[serde(default)]
    pub time_in_force: Option<String>,
    /// Margin/commission preview instead of a live submission.
    #[serde(default)]
    pub what_if: bool,
    /// Transmit immediately; `false` stages the order at the gateway.
    #[serde(default = "default_transmit")]
    pub transmit: bool,
    #[serde(default)]
    pub order_reference: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub fa_group: Option<String>,
    #[serde(default)]
    pub fa_profile: Option<String>,
    #[serde(default)]
    pub fa_method: Option<String>,
    #[serde(default)]
    pub fa_percentage: Option<String>,
}

fn default_transmit() -> bool {
    true
}

impl OrderIntent {
    pub fn new(action: OrderAction, order_type: OrderKind, quantity: Decimal) -> Self {
        Self {
            action,
            order_type,
            quantity,
            limit_price: None,
            stop_price: None,
            time_in_force: None,
            what_if: false,
            transmit: true,
            order_reference: None,
            account: None,
            fa_group: None,
            fa_profile: None,
            fa_method: None,
            fa_percentage: None,
        }
    }

    pub fn market(action: OrderAction, quantity: Decimal) -> Self {
        Self::new(action, OrderKind::Market, quantity)
    }

    pub fn limit(action: OrderAction, quantity: Decimal, limit_price: Decimal) -> Self {
        let mut intent = Self::new(action, OrderKind::Limit, quantity);
        intent.limit_price = Some(limit_price);
        intent
    }

    pub fn stop(action: OrderAction, quantity: Decimal, stop_price: Decimal) -> Self {
        let mut intent = Self::new(action, OrderKind::Stop, quantity);
        intent.stop_price = Some(stop_price);
        intent
    }

    pub fn stop_limit(
        action: OrderAction,
        quantity: Decimal,
        limit_price: Decimal,
        stop_price: Decimal,
    ) -> Self {
        let mut intent = Self::new(action, OrderKind::StopLimit, quantity);
        intent.limit_price = Some(limit_price);
        intent.stop_price = Some(stop_price);
        intent
    }

    #[must_use]
    pub fn with_limit_price(mut self, price: Decimal) -> Self {
        self.limit_price = Some(price);
        self
    }

    #[must_use]
    pub fn with_stop_price(mut self, price: Decimal) -> Self {
        self.stop_price = Some(price);
        self
    }

    #[must_use]
    pub fn with_time_in_force(mut self, tif: impl Into<String>) -> Self {
        self.time_in_force = Some(tif.into());
        self
    }

    #[must_use]
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    #[must_use]
    pub fn with_order_reference(mut self, reference: impl Into<String>) -> Self {
        self.order_reference = Some(reference.into());
        self
    }

    /// Request a margin/commission preview instead of a live submission.
    #[must_use]
    pub fn as_what_if(mut self) -> Self {
        self.what_if = true;
        self
    }

    #[must_use]
    pub fn with_transmit(mut self, transmit: bool) -> Self {
        self.transmit = transmit;
        self
    }

    #[must_use]
    pub fn with_fa_group(mut self, group: impl Into<String>) -> Self {
        self.fa_group = Some(group.into());
        self
    }

    #[must_use]
    pub fn with_fa_profile(mut self, profile: impl Into<String>) -> Self {
        self.fa_profile = Some(profile.into());
        self
    }

    #[must_use]
    pub fn with_fa_method(mut self, method: impl Into<String>) -> Self {
        self.fa_method = Some(method.into());
        self
    }

    #[must_use]
    pub fn with_fa_percentage(mut self, percentage: impl Into<String>) -> Self {
        self.fa_percentage = Some(percentage.into());
        self
    }
}
