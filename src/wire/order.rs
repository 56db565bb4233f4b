//! Order translation: intents into wire orders, raw callbacks into
//! canonical event records.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::domain::{OrderEvent, OrderEventKind, OrderIntent, OrderKind};
use crate::error::{Result, ValidationError};
use crate::gateway::{OpenOrderUpdate, OrderStatusUpdate};
use crate::trace::{component, TraceHandle};

/// A gateway-ready order. String fields use the gateway's empty-string
/// convention for "not set".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireOrder {
    pub action: String,
    pub order_type: String,
    pub total_quantity: Decimal,
    pub limit_price: Option<Decimal>,
    pub stop_price: Option<Decimal>,
    pub time_in_force: String,
    pub what_if: bool,
    pub transmit: bool,
    pub order_reference: String,
    pub account: String,
    pub fa_group: String,
    pub fa_profile: String,
    pub fa_method: String,
    pub fa_percentage: String,
}

/// Turns [`OrderIntent`] values into [`WireOrder`]s and lowers raw order
/// callbacks into [`OrderEvent`] records.
///
/// Pure and synchronous, like the normalizer.
#[derive(Debug, Default)]
pub struct OrderTranslator {
    trace: TraceHandle,
}

impl OrderTranslator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_trace(trace: TraceHandle) -> Self {
        Self { trace }
    }

    #[must_use]
    pub fn trace_handle(&self) -> &TraceHandle {
        &self.trace
    }

    /// Translate an intent into a wire order.
    ///
    /// Price presence is enforced per kind: limit and stop-limit need a
    /// limit price, stop and stop-limit need a stop price, market needs
    /// neither. Quantity is passed through untouched; fractional and
    /// what-if interpretations belong to the gateway.
    pub fn translate(&self, intent: &OrderIntent) -> Result<WireOrder> {
        let outcome = self.build(intent);
        match &outcome {
            Ok(order) => {
                debug!(
                    action = %order.action,
                    order_type = %order.order_type,
                    quantity = %order.total_quantity,
                    "translated order intent"
                );
                self.trace.emit(
                    component::TRANSLATOR,
                    "translate",
                    None,
                    format!(
                        "{} {} x {}",
                        order.action, order.order_type, order.total_quantity
                    ),
                );
            }
            Err(err) => {
                self.trace.emit(
                    component::TRANSLATOR,
                    "translate",
                    None,
                    format!("{} {}: {err}", intent.action, intent.order_type),
                );
            }
        }
        outcome
    }

    fn build(&self, intent: &OrderIntent) -> Result<WireOrder> {
        let kind = intent.order_type;
        match kind {
            OrderKind::Market => {}
            OrderKind::Limit => require_price(intent.limit_price, kind, "limit_price")?,
            OrderKind::Stop => require_price(intent.stop_price, kind, "stop_price")?,
            OrderKind::StopLimit => {
                require_price(intent.limit_price, kind, "limit_price")?;
                require_price(intent.stop_price, kind, "stop_price")?;
            }
        }

        Ok(WireOrder {
            action: intent.action.wire_code().to_string(),
            order_type: intent.order_type.wire_code().to_string(),
            total_quantity: intent.quantity,
            limit_price: intent.limit_price,
            stop_price: intent.stop_price,
            time_in_force: intent
                .time_in_force
                .as_deref()
                .map(|t| t.trim().to_uppercase())
                .unwrap_or_default(),
            what_if: intent.what_if,
            transmit: intent.transmit,
            order_reference: applied(&intent.order_reference),
            account: applied(&intent.account),
            fa_group: applied(&intent.fa_group),
            fa_profile: applied(&intent.fa_profile),
            fa_method: applied(&intent.fa_method),
            fa_percentage: applied(&intent.fa_percentage),
        })
    }

    /// Lower an order-status callback into a canonical record.
    ///
    /// The reason string folds hold/cap/parent context into `key=value`
    /// parts joined with `;`: a non-blank hold reason, a positive market cap
    /// price, a positive parent order id. Contract-level fields stay empty;
    /// a status callback does not carry them.
    pub fn status_event(&self, update: &OrderStatusUpdate) -> OrderEvent {
        let mut parts: Vec<String> = Vec::new();
        if !update.why_held.trim().is_empty() {
            parts.push(format!("whyHeld={}", update.why_held));
        }
        if update.mkt_cap_price > Decimal::ZERO {
            parts.push(format!("mktCapPrice={}", update.mkt_cap_price));
        }
        if update.parent_id > 0 {
            parts.push(format!("parentId={}", update.parent_id));
        }

        let event = OrderEvent {
            kind: OrderEventKind::OrderStatus,
            order_id: update.order_id,
            perm_id: update.perm_id,
            client_id: update.client_id,
            symbol: String::new(),
            action: String::new(),
            order_type: String::new(),
            status: update.status.clone(),
            filled: update.filled,
            remaining: update.remaining,
            avg_fill_price: update.avg_fill_price,
            last_fill_price: update.last_fill_price,
            account: String::new(),
            reason: parts.join(";"),
        };
        self.trace.emit(
            component::TRANSLATOR,
            "status_event",
            Some(update.order_id),
            event.status.clone(),
        );
        event
    }

    /// Lower an open-order echo into a canonical record.
    ///
    /// Fill progress is unknown here, so filled and the fill prices are
    /// zero and remaining is the order's full quantity.
    pub fn open_order_event(&self, update: &OpenOrderUpdate) -> OrderEvent {
        let event = OrderEvent {
            kind: OrderEventKind::OpenOrder,
            order_id: update.order_id,
            perm_id: update.perm_id,
            client_id: update.client_id,
            symbol: update.contract.symbol.clone(),
            action: update.order.action.clone(),
            order_type: update.order.order_type.clone(),
            status: update.status.clone(),
            filled: Decimal::ZERO,
            remaining: update.order.total_quantity,
            avg_fill_price: Decimal::ZERO,
            last_fill_price: Decimal::ZERO,
            account: update.order.account.clone(),
            reason: String::new(),
        };
        self.trace.emit(
            component::TRANSLATOR,
            "open_order_event",
            Some(update.order_id),
            event.status.clone(),
        );
        event
    }
}

fn require_price(
    price: Option<Decimal>,
    kind: OrderKind,
    field: &'static str,
) -> Result<()> {
    if price.is_none() {
        return Err(ValidationError::MissingPrice {
            order_type: kind.wire_code(),
            field,
        }
        .into());
    }
    Ok(())
}

/// Gateway field application rule: a blank input leaves the field empty, a
/// non-blank input is applied as given.
fn applied(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => String::new(),
    }
}
