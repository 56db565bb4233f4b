//! Instrument specification types.
//!
//! A [`ContractSpec`] is the caller-facing description of a tradable
//! instrument. It stays broker-agnostic; turning it into a gateway wire
//! contract is the job of [`crate::wire::ContractNormalizer`].

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{UnsupportedError, ValidationError};

use super::order::OrderAction;

/// Asset classes this adapter can resolve into wire contracts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetType {
    Stock,
    Option,
    Future,
    Forex,
    Crypto,
    Cfd,
    Index,
    Combo,
}

impl AssetType {
    /// Security-type code understood by the gateway.
    #[must_use]
    pub const fn wire_code(self) -> &'static str {
        match self {
            AssetType::Stock => "STK",
            AssetType::Option => "OPT",
            AssetType::Future => "FUT",
            AssetType::Forex => "CASH",
            AssetType::Crypto => "CRYPTO",
            AssetType::Cfd => "CFD",
            AssetType::Index => "IND",
            AssetType::Combo => "BAG",
        }
    }
}

impl FromStr for AssetType {
    type Err = UnsupportedError;

    /// Accepts both the domain names (`"Stock"`, `"Forex"`, ...) and the
    /// gateway codes (`"STK"`, `"CASH"`, ...), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "STOCK" | "STK" => Ok(AssetType::Stock),
            "OPTION" | "OPT" => Ok(AssetType::Option),
            "FUTURE" | "FUT" => Ok(AssetType::Future),
            "FOREX" | "CASH" => Ok(AssetType::Forex),
            "CRYPTO" => Ok(AssetType::Crypto),
            "CFD" => Ok(AssetType::Cfd),
            "INDEX" | "IND" => Ok(AssetType::Index),
            "COMBO" | "BAG" => Ok(AssetType::Combo),
            other => Err(UnsupportedError::AssetType {
                tag: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_code())
    }
}

/// Option right: call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionRight {
    Call,
    Put,
}

impl OptionRight {
    #[must_use]
    pub const fn wire_code(self) -> &'static str {
        match self {
            OptionRight::Call => "C",
            OptionRight::Put => "P",
        }
    }
}

impl FromStr for OptionRight {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "C" | "CALL" => Ok(OptionRight::Call),
            "P" | "PUT" => Ok(OptionRight::Put),
            other => Err(ValidationError::InvalidValue {
                field: "right",
                reason: format!("expected C or P, got '{other}'"),
            }),
        }
    }
}

impl fmt::Display for OptionRight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_code())
    }
}

/// One leg of a combo (spread) instrument, referenced by contract id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboLeg {
    pub contract_id: i64,
    pub ratio: u32,
    pub action: OrderAction,
    pub exchange: String,
}

impl ComboLeg {
    pub fn new(
        contract_id: i64,
        ratio: u32,
        action: OrderAction,
        exchange: impl Into<String>,
    ) -> Self {
        Self {
            contract_id,
            ratio,
            action,
            exchange: exchange.into(),
        }
    }
}

/// Broker-agnostic description of a tradable instrument.
///
/// Only `asset_type`, `symbol`, `exchange` and `currency` are always
/// required; the optional fields matter per asset class (expiry/strike/right
/// for options, expiry for futures, legs for combos) and are ignored
/// elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContractSpec {
    pub asset_type: AssetType,
    pub symbol: String,
    pub exchange: String,
    pub currency: String,
    #[serde(default)]
    pub primary_exchange: Option<String>,
    #[serde(default)]
    pub expiry: Option<String>,
    #[serde(default)]
    pub strike: Option<Decimal>,
    #[serde(default)]
    pub right: Option<OptionRight>,
    #[serde(default)]
    pub multiplier: Option<String>,
    #[serde(default)]
    pub underlying_sec_type: Option<String>,
    #[serde(default)]
    pub combo_legs: Vec<ComboLeg>,
}

impl ContractSpec {
    pub fn new(
        asset_type: AssetType,
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            asset_type,
            symbol: symbol.into(),
            exchange: exchange.into(),
            currency: currency.into(),
            primary_exchange: None,
            expiry: None,
            strike: None,
            right: None,
            multiplier: None,
            underlying_sec_type: None,
            combo_legs: Vec::new(),
        }
    }

    pub fn stock(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self::new(AssetType::Stock, symbol, exchange, currency)
    }

    /// Option spec. The symbol may be a full option token (root, expiry,
    /// right and strike in one string) or a plain root combined with the
    /// explicit field builders.
    pub fn option(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self::new(AssetType::Option, symbol, exchange, currency)
    }

    /// Future spec. The contract month may ride on the symbol (`ES202503`)
    /// or be supplied via [`ContractSpec::with_expiry`].
    pub fn future(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self::new(AssetType::Future, symbol, exchange, currency)
    }

    pub fn forex(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self::new(AssetType::Forex, symbol, exchange, currency)
    }

    pub fn crypto(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self::new(AssetType::Crypto, symbol, exchange, currency)
    }

    pub fn cfd(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self::new(AssetType::Cfd, symbol, exchange, currency)
    }

    pub fn index(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self::new(AssetType::Index, symbol, exchange, currency)
    }

    pub fn combo(
        symbol: impl Into<String>,
        exchange: impl Into<String>,
        currency: impl Into<String>,
        legs: Vec<ComboLeg>,
    ) -> Self {
        let mut spec = Self::new(AssetType::Combo, symbol, exchange, currency);
        spec.combo_legs = legs;
        spec
    }

    #[must_use]
    pub fn with_primary_exchange(mut self, primary: impl Into<String>) -> Self {
        self.primary_exchange = Some(primary.into());
        self
    }

    #[must_use]
    pub fn with_expiry(mut self, expiry: impl Into<String>) -> Self {
        self.expiry = Some(expiry.into());
        self
    }

    #[must_use]
    pub fn with_strike(mut self, strike: Decimal) -> Self {
        self.strike = Some(strike);
        self
    }

    #[must_use]
    pub fn with_right(mut self, right: OptionRight) -> Self {
        self.right = Some(right);
        self
    }

    #[must_use]
    pub fn with_multiplier(mut self, multiplier: impl Into<String>) -> Self {
        self.multiplier = Some(multiplier.into());
        self
    }

    #[must_use]
    pub fn with_underlying_sec_type(mut self, sec_type: impl Into<String>) -> Self {
        self.underlying_sec_type = Some(sec_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_type_parses_domain_names_and_wire_codes() {
        assert_eq!("Stock".parse::<AssetType>().unwrap(), AssetType::Stock);
        assert_eq!("stk".parse::<AssetType>().unwrap(), AssetType::Stock);
        assert_eq!("FOREX".parse::<AssetType>().unwrap(), AssetType::Forex);
        assert_eq!("cash".parse::<AssetType>().unwrap(), AssetType::Forex);
        assert_eq!(" bag ".parse::<AssetType>().unwrap(), AssetType::Combo);
    }

    #[test]
    fn unknown_asset_tag_is_unsupported() {
        let err = "WARRANT".parse::<AssetType>().unwrap_err();
        assert_eq!(
            err,
            UnsupportedError::AssetType {
                tag: "WARRANT".to_string()
            }
        );
    }

    #[test]
    fn wire_codes_match_gateway_vocabulary() {
        assert_eq!(AssetType::Stock.wire_code(), "STK");
        assert_eq!(AssetType::Option.wire_code(), "OPT");
        assert_eq!(AssetType::Future.wire_code(), "FUT");
        assert_eq!(AssetType::Forex.wire_code(), "CASH");
        assert_eq!(AssetType::Crypto.wire_code(), "CRYPTO");
        assert_eq!(AssetType::Cfd.wire_code(), "CFD");
        assert_eq!(AssetType::Index.wire_code(), "IND");
        assert_eq!(AssetType::Combo.wire_code(), "BAG");
    }

    #[test]
    fn option_right_parses_letters_and_words() {
        assert_eq!("C".parse::<OptionRight>().unwrap(), OptionRight::Call);
        assert_eq!("put".parse::<OptionRight>().unwrap(), OptionRight::Put);
        assert!("X".parse::<OptionRight>().is_err());
    }

    #[test]
    fn builders_populate_optional_fields() {
        let spec = ContractSpec::option("AAPL", "SMART", "USD")
            .with_expiry("20240621")
            .with_strike(Decimal::new(195, 0))
            .with_right(OptionRight::Call)
            .with_multiplier("100");

        assert_eq!(spec.asset_type, AssetType::Option);
        assert_eq!(spec.expiry.as_deref(), Some("20240621"));
        assert_eq!(spec.right, Some(OptionRight::Call));
    }
}
