//! twsbridge - Broker-agnostic trading types bridged to a TWS-style gateway.
//!
//! This crate translates between a caller's domain objects (instrument
//! specs, order intents) and the wire vocabulary of a TWS-style trading
//! gateway, and correlates the gateway's push-delivered callbacks back into
//! awaitable results and drainable event queues.
//!
//! # Architecture
//!
//! Three components do the work, one facade ties them to a session:
//!
//! - **`wire::ContractNormalizer`** - instrument specs into wire contracts,
//!   including option-symbol decoding and future contract-month inference
//! - **`wire::OrderTranslator`** - order intents into wire orders, raw
//!   order callbacks into canonical event records
//! - **`gateway::CorrelationSink`** - one-shot completion handles plus
//!   multi-producer event queues, fed by the session's callback decoder
//! - **`bridge::TwsBridge`** - the facade: normalize, translate, allocate
//!   ids from the session's initial assignment, send via the transport
//!
//! The session itself (sockets, framing, reconnection) lives behind the
//! [`gateway::GatewayTransport`] trait and is not part of this crate.
//!
//! # Modules
//!
//! - [`bridge`] - Adapter facade over transport, translation and correlation
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Broker-agnostic types: specs, intents, event records
//! - [`error`] - Error types for the crate
//! - [`gateway`] - Transport trait, inbound events, correlation sink
//! - [`trace`] - Optional observer hook over the translation pipeline
//! - [`wire`] - Wire encodings and the normalization/translation core
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use twsbridge::bridge::TwsBridge;
//! use twsbridge::domain::{ContractSpec, OrderAction, OrderIntent};
//! use twsbridge::gateway::SessionTransport;
//! use rust_decimal_macros::dec;
//!
//! # async fn run() -> twsbridge::error::Result<()> {
//! let (transport, _outbound) = SessionTransport::channel();
//! let bridge = TwsBridge::new(Arc::new(transport));
//!
//! // The session's callback decoder feeds bridge.sink(); once the initial
//! // order id arrives, orders can flow.
//! let spec = ContractSpec::option("AAPL240621C00195000", "SMART", "USD");
//! let intent = OrderIntent::limit(OrderAction::Buy, dec!(1), dec!(4.20));
//! let order_id = bridge.place_order(&spec, &intent).await?;
//! # let _ = order_id;
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod trace;
pub mod wire;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
