//! Broker-agnostic domain types.

mod contract;
mod event;
mod order;

// Instrument types
pub use contract::{AssetType, ComboLeg, ContractSpec, OptionRight};

// Order types
pub use order::{OrderAction, OrderIntent, OrderKind};

// Canonical event records
pub use event::{OrderEvent, OrderEventKind};
