//! Gateway wire encodings and the translation core.

mod contract;
mod order;
mod symbol;

pub use contract::{ContractNormalizer, WireComboLeg, WireContract};
pub use order::{OrderTranslator, WireOrder};
