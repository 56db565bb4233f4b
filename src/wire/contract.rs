//! Instrument normalization: domain specs into gateway wire contracts.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::domain::{AssetType, ComboLeg, ContractSpec};
use crate::error::{Result, UnsupportedError, ValidationError};
use crate::trace::{component, TraceHandle};

use super::symbol;

/// Default contract multiplier applied when the spec does not carry one.
const DEFAULT_MULTIPLIER: &str = "100";

/// One combo leg in wire form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireComboLeg {
    pub contract_id: i64,
    pub ratio: u32,
    pub action: String,
    pub exchange: String,
}

impl From<&ComboLeg> for WireComboLeg {
    fn from(leg: &ComboLeg) -> Self {
        Self {
            contract_id: leg.contract_id,
            ratio: leg.ratio,
            action: leg.action.wire_code().to_string(),
            exchange: leg.exchange.clone(),
        }
    }
}

/// A gateway-ready contract. Always produced complete; fields that do not
/// apply to the asset class are empty strings or `None`, matching what the
/// gateway expects on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireContract {
    pub symbol: String,
    pub sec_type: String,
    pub exchange: String,
    pub currency: String,
    pub primary_exchange: String,
    /// `YYYYMMDD` for options, `YYYYMM` for futures, empty elsewhere.
    pub expiry: String,
    pub strike: Option<Decimal>,
    /// `"C"` or `"P"` for options, empty elsewhere.
    pub right: String,
    pub multiplier: String,
    pub combo_legs: Vec<WireComboLeg>,
}

/// Turns [`ContractSpec`] values into [`WireContract`]s.
///
/// Pure and synchronous. A failed normalization has no observable effect
/// beyond the returned error.
#[derive(Debug, Default)]
pub struct ContractNormalizer {
    trace: TraceHandle,
}

impl ContractNormalizer {
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

    /// Normalize a spec into a wire contract.
    ///
    /// Identifier fields are trimmed and upper-cased first (the symbol also
    /// loses interior spaces), then the asset class decides how derivative
    /// fields are resolved:
    /// - options use explicit expiry/strike/right when all three are
    ///   supplied; otherwise the symbol must decode as an option token, with
    ///   any explicit strike or right overriding the decoded one
    /// - futures normalize an explicit expiry, or infer the contract month
    ///   from the symbol's trailing digits
    /// - combos require at least one leg
    pub fn normalize(&self, spec: &ContractSpec) -> Result<WireContract> {
        let outcome = self.build(spec);
        match &outcome {
            Ok(contract) => {
                debug!(
                    asset = %spec.asset_type,
                    symbol = %contract.symbol,
                    "normalized contract spec"
                );
                self.trace.emit(
                    component::NORMALIZER,
                    "normalize",
                    None,
                    format!("{} {} -> {}", spec.asset_type, spec.symbol, contract.symbol),
                );
            }
            Err(err) => {
                self.trace.emit(
                    component::NORMALIZER,
                    "normalize",
                    None,
                    format!("{} {}: {err}", spec.asset_type, spec.symbol),
                );
            }
        }
        outcome
    }

    fn build(&self, spec: &ContractSpec) -> Result<WireContract> {
        let symbol = normalized_symbol(&spec.symbol)?;
        let exchange = required_upper(&spec.exchange, "exchange")?;
        let currency = required_upper(&spec.currency, "currency")?;
        let primary_exchange = spec
            .primary_exchange
            .as_deref()
            .map(|p| p.trim().to_uppercase())
            .unwrap_or_default();
        let multiplier = match spec.multiplier.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => m.to_string(),
            _ => DEFAULT_MULTIPLIER.to_string(),
        };
        validate_underlying(spec.underlying_sec_type.as_deref())?;

        let mut contract = WireContract {
            symbol,
            sec_type: spec.asset_type.wire_code().to_string(),
            exchange,
            currency,
            primary_exchange,
            expiry: String::new(),
            strike: None,
            right: String::new(),
            multiplier,
            combo_legs: Vec::new(),
        };

        match spec.asset_type {
            AssetType::Option => resolve_option(spec, &mut contract)?,
            AssetType::Future => resolve_future(spec, &mut contract)?,
            AssetType::Combo => {
                if spec.combo_legs.is_empty() {
                    return Err(ValidationError::EmptyComboLegs.into());
                }
                contract.combo_legs = spec.combo_legs.iter().map(WireComboLeg::from).collect();
            }
            AssetType::Stock
            | AssetType::Forex
            | AssetType::Crypto
            | AssetType::Cfd
            | AssetType::Index => {}
        }
        Ok(contract)
    }
}

/// Option fields come from one of two places: all three explicit, or the
/// symbol token. In the token path the symbol collapses to the decoded root
/// and explicit strike/right still win over decoded ones; expiry always
/// comes from the token there.
fn resolve_option(spec: &ContractSpec, contract: &mut WireContract) -> Result<()> {
    let explicit_expiry = spec
        .expiry
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());
    if let (Some(expiry), Some(strike), Some(right)) = (explicit_expiry, spec.strike, spec.right) {
        contract.expiry = expiry.to_string();
        contract.strike = Some(strike);
        contract.right = right.wire_code().to_string();
        return Ok(());
    }
    match symbol::decode_option_token(&contract.symbol) {
        Some(token) => {
            contract.symbol = token.root;
            contract.expiry = token.expiry;
            contract.strike = Some(spec.strike.unwrap_or(token.strike));
            contract.right = spec.right.unwrap_or(token.right).wire_code().to_string();
            Ok(())
        }
        None => Err(ValidationError::OptionFieldsIncomplete {
            symbol: contract.symbol.clone(),
        }
        .into()),
    }
}

fn resolve_future(spec: &ContractSpec, contract: &mut WireContract) -> Result<()> {
    if let Some(raw) = spec
        .expiry
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
    {
        match symbol::normalize_future_expiry(raw) {
            Some(expiry) => {
                contract.expiry = expiry;
                Ok(())
            }
            None => Err(ValidationError::FutureExpiry {
                value: raw.to_string(),
            }
            .into()),
        }
    } else {
        match symbol::infer_future_token(&contract.symbol) {
            Some(token) => {
                contract.symbol = token.root;
                contract.expiry = token.expiry;
                Ok(())
            }
            None => Err(ValidationError::FutureExpiry {
                value: contract.symbol.clone(),
            }
            .into()),
        }
    }
}

fn normalized_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_uppercase().replace(' ', "");
    if symbol.is_empty() {
        return Err(ValidationError::MissingField { field: "symbol" }.into());
    }
    Ok(symbol)
}

fn required_upper(raw: &str, field: &'static str) -> Result<String> {
    let value = raw.trim().to_uppercase();
    if value.is_empty() {
        return Err(ValidationError::MissingField { field }.into());
    }
    Ok(value)
}

/// A stated underlying security type must itself be a supported asset tag.
fn validate_underlying(raw: Option<&str>) -> Result<()> {
    if let Some(tag) = raw.map(str::trim).filter(|t| !t.is_empty()) {
        tag.parse::<AssetType>()
            .map_err(|_| UnsupportedError::SecurityType {
                tag: tag.to_string(),
            })?;
    }
    Ok(())
}
