use thiserror::Error;

/// Rejections raised while normalizing an instrument spec or translating an
/// order intent. Always synchronous and raised before anything reaches the
/// transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("{order_type} order requires {field}")]
    MissingPrice {
        order_type: &'static str,
        field: &'static str,
    },

    #[error(
        "option symbol '{symbol}' is not a decodable option token and \
         explicit expiry/strike/right are incomplete"
    )]
    OptionFieldsIncomplete { symbol: String },

    #[error(
        "cannot determine contract month from '{value}'; supply the expiry \
         as YYYYMM or YYYYMMDD, or embed it in the symbol (e.g. ES202503)"
    )]
    FutureExpiry { value: String },

    #[error("combo contract requires at least one leg")]
    EmptyComboLegs,
}

/// Inputs that are well-formed but outside the capability set this adapter
/// supports.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsupportedError {
    #[error("unsupported asset type: {tag}")]
    AssetType { tag: String },

    #[error("unsupported order type: {tag}")]
    OrderType { tag: String },

    #[error("unsupported underlying security type: {tag}")]
    SecurityType { tag: String },
}

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Unsupported(#[from] UnsupportedError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The gateway session cannot accept sends. Asynchronous gateway faults
    /// never surface here; they arrive as text on the error queue.
    #[error("gateway session is not connected")]
    NotConnected,
}

pub type Result<T> = std::result::Result<T, Error>;
