mod support;

use rust_decimal_macros::dec;
use serde_json::json;

use twsbridge::domain::{OrderAction, OrderIntent, OrderKind};
use twsbridge::error::{Error, ValidationError};
use twsbridge::gateway::OrderStatusUpdate;
use twsbridge::testkit::events;
use twsbridge::wire::OrderTranslator;

#[test]
fn market_intent_translates_without_prices() {
    let translator = OrderTranslator::new();
    let order = translator
        .translate(&OrderIntent::market(OrderAction::Sell, dec!(250)))
        .unwrap();

    assert_eq!(order.action, "SELL");
    assert_eq!(order.order_type, "MKT");
    assert_eq!(order.total_quantity, dec!(250));
    assert_eq!(order.limit_price, None);
    assert_eq!(order.stop_price, None);
    assert!(order.transmit);
    assert!(!order.what_if);
}

#[test]
fn each_kind_maps_to_its_wire_code() {
    let translator = OrderTranslator::new();

    let order = translator.translate(&support::specs::buy_limit("10", "42.5")).unwrap();
    assert_eq!(order.order_type, "LMT");
    assert_eq!(order.limit_price, Some(dec!(42.5)));

    let order = translator
        .translate(&OrderIntent::stop(OrderAction::Sell, dec!(10), dec!(40)))
        .unwrap();
    assert_eq!(order.order_type, "STP");
    assert_eq!(order.stop_price, Some(dec!(40)));

    let order = translator
        .translate(&OrderIntent::stop_limit(
            OrderAction::Sell,
            dec!(10),
            dec!(39.5),
            dec!(40),
        ))
        .unwrap();
    assert_eq!(order.order_type, "STP LMT");
}

#[test]
fn limit_intent_without_limit_price_is_rejected() {
    let translator = OrderTranslator::new();
    let intent = OrderIntent::new(OrderAction::Buy, OrderKind::Limit, dec!(10));
    let err = translator.translate(&intent).unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingPrice {
            order_type: "LMT",
            field: "limit_price",
        })
    ));
}

#[test]
fn stop_intent_without_stop_price_is_rejected() {
    let translator = OrderTranslator::new();
    let intent = OrderIntent::new(OrderAction::Buy, OrderKind::Stop, dec!(10));
    let err = translator.translate(&intent).unwrap_err();

    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingPrice {
            order_type: "STP",
            field: "stop_price",
        })
    ));
}

#[test]
fn stop_limit_reports_the_first_missing_price() {
    let translator = OrderTranslator::new();

    let err = translator
        .translate(&OrderIntent::new(
            OrderAction::Buy,
            OrderKind::StopLimit,
            dec!(10),
        ))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingPrice {
            order_type: "STP LMT",
            field: "limit_price",
        })
    ));

    let err = translator
        .translate(
            &OrderIntent::new(OrderAction::Buy, OrderKind::StopLimit, dec!(10))
                .with_limit_price(dec!(39.5)),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::MissingPrice {
            order_type: "STP LMT",
            field: "stop_price",
        })
    ));
}

#[test]
fn quantity_passes_through_untouched() {
    // Fractional and zero quantities are the gateway's concern, not ours.
    let translator = OrderTranslator::new();
    let order = translator
        .translate(&OrderIntent::market(OrderAction::Buy, dec!(0.0001)))
        .unwrap();
    assert_eq!(order.total_quantity, dec!(0.0001));

    let order = translator
        .translate(&OrderIntent::market(OrderAction::Buy, dec!(0)))
        .unwrap();
    assert_eq!(order.total_quantity, dec!(0));
}

#[test]
fn routing_fields_apply_only_when_non_blank() {
    let translator = OrderTranslator::new();
    let intent = support::specs::buy_one_market()
        .with_account("DU12345")
        .with_time_in_force(" gtc ")
        .with_order_reference("alpha-1")
        .with_fa_group("growth")
        .with_fa_profile("  ")
        .with_fa_method("NetLiq")
        .with_fa_percentage("100");
    let order = translator.translate(&intent).unwrap();

    assert_eq!(order.account, "DU12345");
    assert_eq!(order.time_in_force, "GTC");
    assert_eq!(order.order_reference, "alpha-1");
    assert_eq!(order.fa_group, "growth");
    assert_eq!(order.fa_profile, "");
    assert_eq!(order.fa_method, "NetLiq");
    assert_eq!(order.fa_percentage, "100");
}

#[test]
fn staging_flags_are_carried() {
    let translator = OrderTranslator::new();
    let order = translator
        .translate(
            &support::specs::buy_one_market()
                .as_what_if()
                .with_transmit(false),
        )
        .unwrap();
    assert!(order.what_if);
    assert!(!order.transmit);
}

#[test]
fn status_event_reason_joins_hold_cap_and_parent() {
    let translator = OrderTranslator::new();

    let mut update = OrderStatusUpdate::new(12, "Submitted");
    update.why_held = "locate".to_string();
    update.mkt_cap_price = dec!(0);
    update.parent_id = 7;
    let event = translator.status_event(&update);
    assert_eq!(event.reason, "whyHeld=locate;parentId=7");

    update.mkt_cap_price = dec!(101.25);
    let event = translator.status_event(&update);
    assert_eq!(event.reason, "whyHeld=locate;mktCapPrice=101.25;parentId=7");

    let event = translator.status_event(&OrderStatusUpdate::new(12, "Filled"));
    assert_eq!(event.reason, "");
}

#[test]
fn status_event_copies_progress_fields() {
    let translator = OrderTranslator::new();
    let mut update = OrderStatusUpdate::new(12, "Filled");
    update.filled = dec!(100);
    update.remaining = dec!(0);
    update.avg_fill_price = dec!(195.12);
    update.last_fill_price = dec!(195.15);
    update.perm_id = 987654;
    update.client_id = 3;

    let event = translator.status_event(&update);
    assert!(event.is_status());
    assert_eq!(event.order_id, 12);
    assert_eq!(event.perm_id, 987654);
    assert_eq!(event.client_id, 3);
    assert_eq!(event.filled, dec!(100));
    assert_eq!(event.remaining, dec!(0));
    assert_eq!(event.avg_fill_price, dec!(195.12));
    assert_eq!(event.last_fill_price, dec!(195.15));
    // A status callback carries no contract identity.
    assert_eq!(event.symbol, "");
    assert_eq!(event.account, "");
}

#[test]
fn open_order_event_takes_identity_from_the_echo() {
    let translator = OrderTranslator::new();
    let mut order = events::market_order("BUY", dec!(40));
    order.account = "DU777".to_string();
    let mut update =
        events::open_order_update(55, events::stock_contract("MSFT"), order, "PreSubmitted");
    update.perm_id = 111222;
    update.client_id = 9;

    let event = translator.open_order_event(&update);
    assert!(event.is_open_order());
    assert_eq!(event.order_id, 55);
    assert_eq!(event.perm_id, 111222);
    assert_eq!(event.client_id, 9);
    assert_eq!(event.symbol, "MSFT");
    assert_eq!(event.action, "BUY");
    assert_eq!(event.order_type, "MKT");
    assert_eq!(event.status, "PreSubmitted");
    assert_eq!(event.account, "DU777");
    // Fill progress is unknown at echo time.
    assert_eq!(event.filled, dec!(0));
    assert_eq!(event.remaining, dec!(40));
    assert_eq!(event.avg_fill_price, dec!(0));
    assert_eq!(event.reason, "");
}

#[test]
fn wire_order_serializes_with_stable_field_names() {
    let translator = OrderTranslator::new();
    let order = translator.translate(&support::specs::buy_limit("10", "42.5")).unwrap();
    let value = serde_json::to_value(&order).unwrap();

    assert_eq!(value["action"], json!("BUY"));
    assert_eq!(value["order_type"], json!("LMT"));
    assert_eq!(value["transmit"], json!(true));
    assert_eq!(value["account"], json!(""));
}
