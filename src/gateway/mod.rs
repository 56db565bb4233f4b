//! Gateway-facing seam: outbound capability trait and inbound correlation.

mod event;
mod sink;
mod transport;

pub use event::{ContractDetailsRow, GatewayEvent, OpenOrderUpdate, OrderStatusUpdate};
pub use sink::{CompletionHandle, CorrelationSink, EventQueue};
pub use transport::{GatewayTransport, OutboundRequest, SessionTransport};
