//! Symbol-token parsing for derivative instruments.
//!
//! Two best-effort decoders over already-normalized (upper-case, no spaces)
//! symbols:
//! - industry option tokens like `AAPL240621C00195000`, where the root,
//!   expiry date, right letter and a thousandths-scaled strike ride in one
//!   string
//! - future symbols like `ES202503`, where a trailing digit run carries the
//!   contract month
//!
//! Both return `None` instead of erroring; the caller decides whether a
//! failed decode is fatal.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::OptionRight;

/// A fully-decoded option symbol token.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OptionToken {
    pub root: String,
    /// Eight-digit `YYYYMMDD` expiry.
    pub expiry: String,
    pub strike: Decimal,
    pub right: OptionRight,
}

/// Root and contract month split out of a future symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FutureToken {
    pub root: String,
    /// Six-digit `YYYYMM` contract month.
    pub expiry: String,
}

/// Decode an option symbol token.
///
/// Anchors on the rightmost `C` or `P`: exactly eight digits (the strike in
/// thousandths) must follow it, six digits (the `YYMMDD` expiry) plus a
/// non-empty root must precede it, and `20` + the date digits must be a real
/// calendar date.
pub(crate) fn decode_option_token(symbol: &str) -> Option<OptionToken> {
    let bytes = symbol.as_bytes();
    let idx = bytes.iter().rposition(|&b| b == b'C' || b == b'P')?;
    if idx < 7 || bytes.len() - idx - 1 != 8 {
        return None;
    }
    let date_digits = &bytes[idx - 6..idx];
    let strike_digits = &bytes[idx + 1..];
    if !date_digits.iter().all(u8::is_ascii_digit)
        || !strike_digits.iter().all(u8::is_ascii_digit)
    {
        return None;
    }
    // The byte regions around the right letter are ASCII, so these str
    // slices cannot split a character.
    let expiry = format!("20{}", &symbol[idx - 6..idx]);
    NaiveDate::parse_from_str(&expiry, "%Y%m%d").ok()?;
    let thousandths: i64 = symbol[idx + 1..].parse().ok()?;
    let right = if bytes[idx] == b'C' {
        OptionRight::Call
    } else {
        OptionRight::Put
    };
    Some(OptionToken {
        root: symbol[..idx - 6].to_string(),
        expiry,
        strike: Decimal::new(thousandths, 3),
        right,
    })
}

/// Split a future symbol into root and contract month.
///
/// The trailing digit run must be at least six characters; the first six are
/// taken as the contract month and must be plausible. Anything after them is
/// ignored.
pub(crate) fn infer_future_token(symbol: &str) -> Option<FutureToken> {
    let root = symbol.trim_end_matches(|c: char| c.is_ascii_digit());
    let run = &symbol[root.len()..];
    if root.is_empty() || run.len() < 6 {
        return None;
    }
    let month = &run[..6];
    if !is_plausible_contract_month(month) {
        return None;
    }
    Some(FutureToken {
        root: root.to_string(),
        expiry: month.to_string(),
    })
}

/// Six digits, year 1970..=2100, month 01..=12.
pub(crate) fn is_plausible_contract_month(token: &str) -> bool {
    if token.len() != 6 || !token.as_bytes().iter().all(u8::is_ascii_digit) {
        return false;
    }
    let year = token[..4].parse::<i32>().unwrap_or(0);
    let month = token[4..6].parse::<u32>().unwrap_or(0);
    (1970..=2100).contains(&year) && (1..=12).contains(&month)
}

/// Normalize an explicitly-supplied future expiry to the six-digit wire
/// form. Dashes are tolerated (`2025-03`); an eight-digit calendar date
/// keeps only its year-month prefix. No plausibility check here, the value
/// was stated on purpose.
pub(crate) fn normalize_future_expiry(raw: &str) -> Option<String> {
    let cleaned = raw.trim().replace('-', "");
    if !cleaned.as_bytes().iter().all(u8::is_ascii_digit) {
        return None;
    }
    match cleaned.len() {
        6 => Some(cleaned),
        8 => Some(cleaned[..6].to_string()),
        _ => None,
    }
}
