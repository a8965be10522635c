//! Declared monetary amounts and form-value coercion.
//!
//! Form values arrive loosely typed. Every raw value resolves to an
//! `AssetAmount`, never to an error:
//! - missing, empty or non-numeric → 0
//! - leading numeric prefix is honoured (`"1200abc"` → 1200)
//! - non-finite (`"Infinity"`, overflow) → 0
//! - negative → 0
//!
//! The coercion reason is reported alongside the amount so the form
//! boundary can count and log it.

/// A non-negative, finite USD amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct AssetAmount(f64);

impl AssetAmount {
    pub const ZERO: AssetAmount = AssetAmount(0.0);

    /// Build an amount from a number, clamping anything outside the
    /// non-negative finite range to zero.
    pub fn new(value: f64) -> Self {
        Self::checked(value).0
    }

    /// Like [`AssetAmount::new`], also returning why the value was coerced.
    pub fn checked(value: f64) -> (Self, Option<Coercion>) {
        if !value.is_finite() {
            return (Self::ZERO, Some(Coercion::NonFinite));
        }
        if value < 0.0 {
            return (Self::ZERO, Some(Coercion::Negative));
        }
        // Normalise -0.0 so formatting never prints "-$0".
        (AssetAmount(value.abs()), None)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

/// Why a raw form value did not map one-to-one onto an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coercion {
    /// Field absent from the submission.
    Missing,
    /// Field present but blank.
    Empty,
    /// No numeric prefix could be read.
    NotNumeric,
    /// Parsed to infinity or NaN.
    NonFinite,
    /// Parsed to a value below zero.
    Negative,
}

/// Result of parsing one raw form value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedAmount {
    pub amount: AssetAmount,
    pub coercion: Option<Coercion>,
}

/// Parse a raw form value into an amount.
///
/// Reads the longest leading float literal after leading whitespace, the
/// way browser form scripts read `<input>` values. Trailing garbage is
/// ignored.
pub fn parse_amount(raw: Option<&str>) -> ParsedAmount {
    let Some(raw) = raw else {
        return coerced(Coercion::Missing);
    };
    let trimmed = raw.trim_start();
    if trimmed.trim_end().is_empty() {
        return coerced(Coercion::Empty);
    }

    let Some(prefix) = numeric_prefix(trimmed) else {
        return coerced(Coercion::NotNumeric);
    };

    let value = match prefix {
        NumericPrefix::Infinity => f64::INFINITY,
        NumericPrefix::Literal(text) => match text.parse::<f64>() {
            Ok(v) => v,
            Err(_) => return coerced(Coercion::NotNumeric),
        },
    };

    let (amount, coercion) = AssetAmount::checked(value);
    if let Some(reason) = coercion {
        tracing::debug!("amount coerced to zero reason={:?} raw={:?}", reason, raw);
    }
    ParsedAmount { amount, coercion }
}

fn coerced(reason: Coercion) -> ParsedAmount {
    ParsedAmount {
        amount: AssetAmount::ZERO,
        coercion: Some(reason),
    }
}

enum NumericPrefix<'a> {
    Infinity,
    Literal(&'a str),
}

/// Longest prefix of `s` matching `[+-]?(Infinity|digits[.digits][e[+-]digits])`.
fn numeric_prefix(s: &str) -> Option<NumericPrefix<'_>> {
    let bytes = s.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }
    if s[pos..].starts_with("Infinity") {
        return Some(NumericPrefix::Infinity);
    }

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        frac_digits = count_digits(&bytes[pos + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            pos += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        let mut exp = pos + 1;
        if matches!(bytes.get(exp), Some(b'+') | Some(b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(&bytes[exp..]);
        if exp_digits > 0 {
            pos = exp + exp_digits;
        }
    }

    Some(NumericPrefix::Literal(&s[..pos]))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}
