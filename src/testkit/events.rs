//! Builders for inbound gateway events with sensible defaults.

use rust_decimal::Decimal;

use crate::gateway::{ContractDetailsRow, GatewayEvent, OpenOrderUpdate, OrderStatusUpdate};
use crate::wire::{WireContract, WireOrder};

/// A stock wire contract for tests that only need a plausible one.
pub fn stock_contract(symbol: &str) -> WireContract {
    WireContract {
        symbol: symbol.to_string(),
        sec_type: "STK".to_string(),
        exchange: "SMART".to_string(),
        currency: "USD".to_string(),
        primary_exchange: String::new(),
        expiry: String::new(),
        strike: None,
        right: String::new(),
        multiplier: "100".to_string(),
        combo_legs: Vec::new(),
    }
}

/// A plain market wire order for tests.
pub fn market_order(action: &str, quantity: Decimal) -> WireOrder {
    WireOrder {
        action: action.to_string(),
        order_type: "MKT".to_string(),
        total_quantity: quantity,
        limit_price: None,
        stop_price: None,
        time_in_force: String::new(),
        what_if: false,
        transmit: true,
        order_reference: String::new(),
        account: String::new(),
        fa_group: String::new(),
        fa_profile: String::new(),
        fa_method: String::new(),
        fa_percentage: String::new(),
    }
}

/// An open-order echo built from the pieces tests care about.
pub fn open_order_update(
    order_id: i64,
    contract: WireContract,
    order: WireOrder,
    status: &str,
) -> OpenOrderUpdate {
    OpenOrderUpdate {
        order_id,
        contract,
        order,
        status: status.to_string(),
        perm_id: 0,
        client_id: 0,
    }
}

/// A contract-details row event for the given request.
pub fn details_row(request_id: i64, symbol: &str) -> GatewayEvent {
    GatewayEvent::ContractDetails(ContractDetailsRow {
        request_id,
        contract: stock_contract(symbol),
    })
}

/// A minimal order-status event.
pub fn status_event(order_id: i64, status: &str) -> GatewayEvent {
    GatewayEvent::OrderStatus(OrderStatusUpdate::new(order_id, status))
}
