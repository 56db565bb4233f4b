use std::sync::Arc;

use rust_decimal_macros::dec;
use tokio_test::{assert_pending, assert_ready_eq, task};

use twsbridge::gateway::{
    CompletionHandle, CorrelationSink, GatewayEvent, OrderStatusUpdate,
};
use twsbridge::testkit::events;

#[test]
fn wait_is_pending_until_resolved_then_wakes() {
    let handle: CompletionHandle<i64> = CompletionHandle::new();
    let mut waiter = task::spawn(handle.wait());

    assert_pending!(waiter.poll());
    assert!(handle.resolve(42));
    assert!(waiter.is_woken());
    assert_ready_eq!(waiter.poll(), 42);
}

#[test]
fn wait_on_resolved_handle_returns_immediately() {
    let handle: CompletionHandle<String> = CompletionHandle::new();
    handle.resolve("DU1".to_string());

    let mut waiter = task::spawn(handle.wait());
    assert_ready_eq!(waiter.poll(), "DU1".to_string());
}

#[test]
fn every_waiter_observes_the_single_value() {
    let handle: CompletionHandle<i64> = CompletionHandle::new();
    let mut first = task::spawn(handle.wait());
    let mut second = task::spawn(handle.wait());

    assert_pending!(first.poll());
    assert_pending!(second.poll());
    handle.resolve(7);
    assert_ready_eq!(first.poll(), 7);
    assert_ready_eq!(second.poll(), 7);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_dispatches_resolve_exactly_once() {
    for round in 0..100 {
        let sink = Arc::new(CorrelationSink::new());
        let a = {
            let sink = Arc::clone(&sink);
            tokio::spawn(async move { sink.dispatch(GatewayEvent::NextOrderId(1)) })
        };
        let b = {
            let sink = Arc::clone(&sink);
            tokio::spawn(async move { sink.dispatch(GatewayEvent::NextOrderId(2)) })
        };
        a.await.unwrap();
        b.await.unwrap();

        let observed = sink.await_next_order_id().await;
        assert!(
            observed == 1 || observed == 2,
            "round {round}: observed {observed}"
        );
        // Later reads keep seeing the same winner.
        assert_eq!(sink.peek_next_order_id(), Some(observed));
        assert_eq!(sink.await_next_order_id().await, observed);
    }
}

#[tokio::test]
async fn one_shots_ignore_repeats() {
    let sink = CorrelationSink::new();
    sink.dispatch(GatewayEvent::NextOrderId(90));
    sink.dispatch(GatewayEvent::NextOrderId(95));
    sink.dispatch(GatewayEvent::ManagedAccounts("DU100".to_string()));
    sink.dispatch(GatewayEvent::ManagedAccounts("DU200".to_string()));
    sink.dispatch(GatewayEvent::ContractDetailsEnd { request_id: 4 });
    sink.dispatch(GatewayEvent::ContractDetailsEnd { request_id: 5 });

    assert_eq!(sink.await_next_order_id().await, 90);
    assert_eq!(sink.await_managed_accounts().await, "DU100");
    assert_eq!(sink.await_contract_details_end().await, 4);
}

#[test]
fn dispatch_routes_every_variant_somewhere() {
    let sink = CorrelationSink::new();

    sink.dispatch(GatewayEvent::NextOrderId(1));
    sink.dispatch(GatewayEvent::ManagedAccounts("DU1".to_string()));
    sink.dispatch(events::details_row(10, "AAPL"));
    sink.dispatch(GatewayEvent::ContractDetailsEnd { request_id: 10 });
    sink.dispatch(events::status_event(1, "Submitted"));
    sink.dispatch(GatewayEvent::OpenOrder(events::open_order_update(
        1,
        events::stock_contract("AAPL"),
        events::market_order("BUY", dec!(5)),
        "Submitted",
    )));
    sink.dispatch(GatewayEvent::Fault {
        request_id: 10,
        code: 200,
        message: "No security definition".to_string(),
    });
    sink.dispatch(GatewayEvent::Notice("market data farm ok".to_string()));

    assert_eq!(sink.peek_next_order_id(), Some(1));
    assert_eq!(sink.peek_managed_accounts().as_deref(), Some("DU1"));
    assert_eq!(sink.peek_contract_details_end(), Some(10));
    assert_eq!(sink.pending_contract_details(), 1);
    assert_eq!(sink.pending_order_events(), 2);
    assert_eq!(sink.pending_errors(), 2);
}

#[test]
fn order_callbacks_are_lowered_on_dispatch() {
    let sink = CorrelationSink::new();

    let mut update = OrderStatusUpdate::new(31, "Submitted");
    update.why_held = "locate".to_string();
    update.parent_id = 7;
    sink.dispatch(GatewayEvent::OrderStatus(update));
    sink.dispatch(GatewayEvent::OpenOrder(events::open_order_update(
        31,
        events::stock_contract("AAPL"),
        events::market_order("BUY", dec!(5)),
        "PreSubmitted",
    )));

    let drained = sink.drain_order_events();
    assert_eq!(drained.len(), 2);
    assert!(drained[0].is_status());
    assert_eq!(drained[0].reason, "whyHeld=locate;parentId=7");
    assert!(drained[1].is_open_order());
    assert_eq!(drained[1].symbol, "AAPL");
    assert_eq!(drained[1].remaining, dec!(5));
}

#[test]
fn queues_preserve_arrival_order_independently() {
    let sink = CorrelationSink::new();
    for id in [21, 22, 23] {
        sink.dispatch(events::status_event(id, "Submitted"));
    }
    sink.dispatch(GatewayEvent::Notice("first".to_string()));
    sink.dispatch(events::details_row(5, "AAPL"));
    sink.dispatch(GatewayEvent::Notice("second".to_string()));

    let order_ids: Vec<i64> = sink
        .drain_order_events()
        .into_iter()
        .map(|e| e.order_id)
        .collect();
    assert_eq!(order_ids, vec![21, 22, 23]);
    assert_eq!(
        sink.drain_errors(),
        vec!["first".to_string(), "second".to_string()]
    );
    assert_eq!(sink.drain_contract_details().len(), 1);
}

#[test]
fn drain_empties_the_queue() {
    let sink = CorrelationSink::new();
    sink.dispatch(GatewayEvent::Notice("one".to_string()));
    assert_eq!(sink.drain_errors().len(), 1);
    assert!(sink.drain_errors().is_empty());
    assert_eq!(sink.pending_errors(), 0);
}

#[test]
fn fault_text_keeps_request_id_and_code() {
    let sink = CorrelationSink::new();
    sink.dispatch(GatewayEvent::Fault {
        request_id: 3,
        code: 201,
        message: "Order rejected - reason:".to_string(),
    });

    let errors = sink.drain_errors();
    assert_eq!(errors, vec!["id=3 code=201: Order rejected - reason:".to_string()]);
}

#[test]
fn bounded_sink_sheds_oldest_and_counts() {
    let sink = CorrelationSink::bounded(2);
    sink.dispatch(GatewayEvent::Notice("a".to_string()));
    sink.dispatch(GatewayEvent::Notice("b".to_string()));
    sink.dispatch(GatewayEvent::Notice("c".to_string()));

    assert_eq!(sink.shed_count(), 1);
    assert_eq!(sink.drain_errors(), vec!["b".to_string(), "c".to_string()]);
}

#[tokio::test]
async fn details_batch_flow_resolves_waiters() {
    let sink = Arc::new(CorrelationSink::new());

    let waiter = {
        let sink = Arc::clone(&sink);
        tokio::spawn(async move { sink.await_contract_details_end().await })
    };

    sink.dispatch(events::details_row(77, "AAPL"));
    sink.dispatch(events::details_row(77, "AAPL"));
    sink.dispatch(GatewayEvent::ContractDetailsEnd { request_id: 77 });

    assert_eq!(waiter.await.unwrap(), 77);
    let rows = sink.drain_contract_details();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.request_id == 77));
}
