//! Fine amounts
//!
//! Fines are decimal amounts with at most two fractional digits. Parsing keeps
//! the scale of the literal as written (see [`FineAmount`]) so the patron
//! validator can reject amounts like `15.500`; a constructed `Fine` is always
//! normalized to exactly two fractional digits.

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use std::fmt;

/// Number of fractional digits a fine is stored and displayed with
pub const FINE_SCALE: u32 = 2;

/// Smallest allowed fine (0.00)
pub const MIN_FINE: Decimal = Decimal::from_parts(0, 0, 0, false, FINE_SCALE);

/// Largest allowed fine (250.00)
pub const MAX_FINE: Decimal = Decimal::from_parts(25_000, 0, 0, false, FINE_SCALE);

/// An outstanding fine, always normalized to two fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fine(Decimal);

impl Fine {
    /// Normalize an already-validated amount
    ///
    /// Callers must have checked precision and range; see
    /// [`crate::models::patron::validate`].
    pub(crate) fn normalized(amount: Decimal) -> Self {
        let mut amount = amount;
        amount.rescale(FINE_SCALE);
        if amount.is_zero() {
            // -0.00 would otherwise render with a sign
            amount.set_sign_positive(true);
        }
        Self(amount)
    }

    /// Get the underlying decimal amount
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Fine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Fine {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A fine as written, before validation
///
/// Literals are exact: `15.500` keeps its three fractional digits. A literal
/// that is well-formed but does not fit in a `Decimal` (more than 28
/// fractional digits, or a magnitude near 8e28 and above) is kept as
/// `Unrepresentable` with its scale, so validation can still decide between
/// the precision and range rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FineAmount {
    Exact(Decimal),
    Unrepresentable { scale: i64 },
}

impl FineAmount {
    /// Number of fractional digits of the literal (negative for `1e2`-style values)
    pub fn scale(&self) -> i64 {
        match self {
            Self::Exact(amount) => i64::from(amount.scale()),
            Self::Unrepresentable { scale } => *scale,
        }
    }

    /// The exact value, if it fits in a `Decimal`
    pub fn exact(&self) -> Option<Decimal> {
        match self {
            Self::Exact(amount) => Some(*amount),
            Self::Unrepresentable { .. } => None,
        }
    }
}

impl From<Decimal> for FineAmount {
    fn from(amount: Decimal) -> Self {
        Self::Exact(amount)
    }
}

/// Most digits a `Decimal` mantissa can hold
const MAX_DECIMAL_DIGITS: usize = 29;

/// Most fractional digits a `Decimal` can hold
const MAX_DECIMAL_SCALE: u32 = 28;

/// Parse a decimal literal such as `12.50`, `-3`, `.5`, `7.` or `1.25e1`
///
/// Accepts an optional sign, digits with an optional fraction, and an
/// optional exponent (`e`/`E`, optional sign, digits). The scale is the
/// number of fractional digits minus the exponent, so `"1.500"` has scale 3
/// and `"1e2"` has scale -2. Separators and currency symbols are rejected.
pub fn parse_fine(s: &str) -> Result<FineAmount, FineParseError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(FineParseError::Empty);
    }
    let invalid = || FineParseError::InvalidFormat(s.to_string());

    let (negative, unsigned) = match s.as_bytes()[0] {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (number, exponent) = match unsigned.find(['e', 'E']) {
        Some(pos) => (&unsigned[..pos], Some(&unsigned[pos + 1..])),
        None => (unsigned, None),
    };

    let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty())
        || !all_digits(int_part)
        || !all_digits(frac_part)
    {
        return Err(invalid());
    }

    let exponent: i64 = match exponent {
        Some(text) => {
            let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
            if digits.is_empty() || !all_digits(digits) {
                return Err(invalid());
            }
            text.parse::<i32>().map_err(|_| invalid())?.into()
        }
        None => 0,
    };

    let scale = frac_part.len() as i64 - exponent;
    let mantissa = format!("{}{}", int_part, frac_part);
    let mantissa = mantissa.trim_start_matches('0');

    if mantissa.is_empty() {
        // Zero keeps its scale for the precision rule but needs no digits
        return Ok(match u32::try_from(scale) {
            Ok(small) if small <= MAX_DECIMAL_SCALE => FineAmount::Exact(Decimal::new(0, small)),
            Ok(_) => FineAmount::Unrepresentable { scale },
            Err(_) => FineAmount::Exact(Decimal::ZERO),
        });
    }

    // A negative scale means trailing zeros on the integer
    let (digits, decimal_scale) = if scale < 0 {
        if mantissa.len() as i64 - scale > MAX_DECIMAL_DIGITS as i64 {
            return Ok(FineAmount::Unrepresentable { scale });
        }
        (format!("{}{}", mantissa, "0".repeat((-scale) as usize)), 0)
    } else {
        (mantissa.to_string(), scale)
    };

    if digits.len() > MAX_DECIMAL_DIGITS || decimal_scale > i64::from(MAX_DECIMAL_SCALE) {
        return Ok(FineAmount::Unrepresentable { scale });
    }

    let magnitude: i128 = digits.parse().map_err(|_| invalid())?;
    let value = if negative { -magnitude } else { magnitude };
    match Decimal::try_from_i128_with_scale(value, decimal_scale as u32) {
        Ok(amount) => Ok(FineAmount::Exact(amount)),
        Err(_) => Ok(FineAmount::Unrepresentable { scale }),
    }
}

/// Error type for fine parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FineParseError {
    Empty,
    InvalidFormat(String),
}

impl fmt::Display for FineParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Fine amount is empty"),
            Self::InvalidFormat(s) => write!(f, "Invalid fine amount: {}", s),
        }
    }
}

impl std::error::Error for FineParseError {}
