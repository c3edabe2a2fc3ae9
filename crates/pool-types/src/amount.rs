//! Normalization of user-entered token amounts
//!
//! Raw input is sanitized into a canonical decimal string before it is ever
//! converted into base units. Sanitizing an already sanitized string is a
//! no-op, so a value may be re-normalized freely.

use alloy::primitives::{U256, utils::parse_units};

use crate::error::PoolTypesError;

/// The maximum number of digits accepted before the decimal point
const MAX_INTEGER_DIGITS: usize = 10;
/// The maximum number of digits accepted after the decimal point
const MAX_FRACTION_DIGITS: usize = 18;

/// A user-entered amount along with its derived validity
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AmountInput {
    /// The sanitized input string
    value: String,
    /// Whether the sanitized string denotes a non-negative number
    valid: bool,
}

impl AmountInput {
    /// Sanitize a raw input string
    pub fn new(raw: &str) -> Self {
        let value = sanitize_amount(raw);
        let valid = is_valid_amount(&value);
        Self { value, valid }
    }

    /// The sanitized input
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether the input denotes a usable amount
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Whether the input is empty
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Convert the input into the token's base units
    pub fn to_base_units(&self, decimals: u8) -> Result<U256, PoolTypesError> {
        if !self.valid {
            return Err(PoolTypesError::invalid_amount(format!("'{}' is not a number", self.value)));
        }

        to_base_units(&self.value, decimals)
    }
}

/// Convert a decimal string into base units of a token with the given decimals
pub fn to_base_units(value: &str, decimals: u8) -> Result<U256, PoolTypesError> {
    let trimmed = value.strip_suffix('.').unwrap_or(value);
    if trimmed.is_empty() {
        return Err(PoolTypesError::invalid_amount("empty amount"));
    }

    parse_units(trimmed, decimals)
        .map(|units| units.get_absolute())
        .map_err(PoolTypesError::invalid_amount)
}

/// Sanitize a raw amount string
///
/// Commas become decimal points, anything but digits and the first decimal
/// point is dropped, a bare leading point gains a zero, and a leading zero
/// followed by a digit is read as a fraction ("05" becomes "0.5"). The
/// integer part is capped at ten digits and the fraction at eighteen.
pub fn sanitize_amount(raw: &str) -> String {
    let mut value: String =
        raw.replace(',', ".").chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();

    if value.starts_with('.') {
        value.insert(0, '0');
    }

    if value.len() > 1 && value.starts_with('0') && !value[1..].starts_with('.') {
        let rest: String = value[1..].chars().filter(char::is_ascii_digit).collect();
        value = format!("0.{rest}");
    }

    // Keep the first decimal point only
    if let Some(idx) = value.find('.') {
        let (int_part, frac_part) = value.split_at(idx + 1);
        value = format!("{int_part}{}", frac_part.replace('.', ""));
    }

    match value.split_once('.') {
        Some((int_part, frac_part)) => {
            let int_part = truncate(int_part, MAX_INTEGER_DIGITS);
            let frac_part = truncate(frac_part, MAX_FRACTION_DIGITS);
            format!("{int_part}.{frac_part}")
        },
        None => truncate(&value, MAX_INTEGER_DIGITS).to_string(),
    }
}

/// Whether a sanitized string denotes a non-negative number
pub fn is_valid_amount(value: &str) -> bool {
    let digits = value.strip_suffix('.').unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Truncate an ascii string to at most `len` characters
fn truncate(s: &str, len: usize) -> &str {
    if s.len() > len { &s[..len] } else { s }
}
