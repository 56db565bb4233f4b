use rust_decimal_macros::dec;

use twsbridge::domain::{ContractSpec, OrderAction, OrderIntent};

/// Option spec whose symbol carries expiry, right and strike.
pub fn aapl_call_token() -> ContractSpec {
    ContractSpec::option("AAPL240621C00195000", "SMART", "USD")
}

pub fn aapl_stock() -> ContractSpec {
    ContractSpec::stock("AAPL", "SMART", "USD")
}

/// Future spec whose symbol carries the contract month.
pub fn es_march_future() -> ContractSpec {
    ContractSpec::future("ES202503", "CME", "USD")
}

pub fn buy_limit(quantity: &str, price: &str) -> OrderIntent {
    OrderIntent::limit(
        OrderAction::Buy,
        quantity.parse().expect("quantity"),
        price.parse().expect("price"),
    )
}

pub fn buy_one_market() -> OrderIntent {
    OrderIntent::market(OrderAction::Buy, dec!(1))
}
