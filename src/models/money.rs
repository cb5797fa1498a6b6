//! Money type for representing currency amounts
//!
//! Amounts are exact decimals at whatever precision the server uses, so a
//! three-decimal currency residual such as `12.345` comes back out as
//! `12.345`. The serde representation is a JSON number in currency units,
//! which is what the server sends and expects.

use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// A monetary amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(Decimal);

/// Why a typed amount was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    #[error("Amount is empty")]
    Empty,

    #[error("Invalid money format: {0}")]
    InvalidFormat(String),
}

impl Money {
    pub const fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Create a Money amount from hundredths of a unit
    ///
    /// # Examples
    /// ```
    /// use pos_invoice_pay::models::Money;
    /// assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
    /// ```
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Take a number as the server sent it
    ///
    /// The float is read back through its shortest textual form, so `12.345`
    /// becomes exactly 12.345 rather than the nearest binary fraction.
    /// Returns `None` for NaN and infinities.
    ///
    /// # Examples
    /// ```
    /// use pos_invoice_pay::models::Money;
    /// assert_eq!(Money::from_f64(12.345).unwrap().to_string(), "$12.345");
    /// ```
    pub fn from_f64(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }
        Decimal::from_str(&amount.to_string()).ok().map(Self)
    }

    /// The amount as a float for the wire
    pub fn to_f64(&self) -> f64 {
        // Parsing the decimal text gives the float nearest to it
        self.0.to_string().parse().unwrap_or_default()
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Parse an amount typed by a user
    ///
    /// Accepts `125.50`, `125.5`, `125`, `-3.20`, `12.345`, with an optional
    /// leading `$`. Every typed decimal is kept.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix('$').unwrap_or(rest);
        if rest.is_empty() {
            return Err(MoneyParseError::Empty);
        }

        let invalid = || MoneyParseError::InvalidFormat(trimmed.to_string());
        let (units, fraction) = rest.split_once('.').unwrap_or((rest, ""));
        let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if (units.is_empty() && fraction.is_empty()) || !all_digits(units) || !all_digits(fraction) {
            return Err(invalid());
        }

        let units = if units.is_empty() { "0" } else { units };
        let text = if fraction.is_empty() {
            units.to_string()
        } else {
            format!("{}.{}", units, fraction)
        };
        let value = Decimal::from_str(&text).map_err(|_| invalid())?;
        Ok(Self(if negative { -value } else { value }))
    }

    /// The amount as typed into an input, at least two decimals
    pub fn to_plain_string(&self) -> String {
        self.format_with_symbol("")
    }

    /// Format with a currency symbol
    ///
    /// Shows at least two decimals, more when the amount carries them.
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let mut magnitude = self.0.abs().normalize();
        if magnitude.scale() < 2 {
            magnitude.rescale(2);
        }
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, symbol, magnitude)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
        Money::from_f64(value).ok_or_else(|| E::custom(format!("amount out of range: {}", value)))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
        Ok(Money(Decimal::from(value)))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
        Ok(Money(Decimal::from(value)))
    }

    // Empty monetary fields come across as `false`
    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Money, E> {
        if value {
            Err(E::invalid_type(de::Unexpected::Bool(true), &self))
        } else {
            Ok(Money::zero())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(text: &str) -> Money {
        Money::new(Decimal::from_str(text).unwrap())
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::from_cents(0).to_string(), "$0.00");
        assert_eq!(Money::from_cents(-1050).to_string(), "-$10.50");
        assert_eq!(Money::from_cents(-5).to_string(), "-$0.05");
        assert_eq!(exact("50").to_string(), "$50.00");
    }

    #[test]
    fn test_display_keeps_extra_decimals() {
        assert_eq!(exact("12.345").to_string(), "$12.345");
        assert_eq!(exact("12.3450").to_string(), "$12.345");
        assert_eq!(exact("-0.125").format_with_symbol(""), "-0.125");
    }

    #[test]
    fn test_format_with_symbol() {
        assert_eq!(Money::from_cents(12550).format_with_symbol("€"), "€125.50");
        assert_eq!(Money::from_cents(-20).format_with_symbol(""), "-0.20");
        assert_eq!(Money::from_cents(12550).to_plain_string(), "125.50");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse(" $10.50 ").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse("-10.50").unwrap(), Money::from_cents(-1050));
        assert_eq!(Money::parse("10").unwrap(), Money::from_cents(1000));
        assert_eq!(Money::parse("10.5").unwrap(), Money::from_cents(1050));
        assert_eq!(Money::parse(".5").unwrap(), Money::from_cents(50));
        assert_eq!(Money::parse("7.").unwrap(), Money::from_cents(700));
    }

    #[test]
    fn test_parse_keeps_third_decimal() {
        assert_eq!(Money::parse("12.345").unwrap(), exact("12.345"));
        assert_eq!(Money::parse("0.001").unwrap().to_f64(), 0.001);
    }

    #[test]
    fn test_parse_rejects() {
        assert_eq!(Money::parse("  "), Err(MoneyParseError::Empty));
        assert_eq!(Money::parse("-$"), Err(MoneyParseError::Empty));
        assert!(matches!(Money::parse("1.2.3"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("."), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse(".."), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("12a"), Err(MoneyParseError::InvalidFormat(_))));
        assert!(matches!(Money::parse("1.+5"), Err(MoneyParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_sum_and_difference() {
        let total: Money = [100, 200, 300].into_iter().map(Money::from_cents).sum();
        assert_eq!(total, Money::from_cents(600));
        assert_eq!(total - Money::from_cents(50), Money::from_cents(550));
    }

    #[test]
    fn test_float_conversion_is_exact_for_server_numbers() {
        assert_eq!(Money::from_f64(125.5).unwrap(), Money::from_cents(12550));
        assert_eq!(Money::from_f64(12.345).unwrap(), exact("12.345"));
        assert_eq!(Money::from_f64(0.1 + 0.2).unwrap(), exact("0.30000000000000004"));
        assert_eq!(exact("12.345").to_f64(), 12.345);
        assert!(Money::from_f64(f64::NAN).is_none());
    }

    #[test]
    fn test_serialization() {
        let m = Money::from_cents(1050);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "10.5");

        let deserialized: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }

    #[test]
    fn test_three_decimal_amount_survives_round_trip() {
        let residual: Money = serde_json::from_str("12.345").unwrap();
        assert_eq!(residual, exact("12.345"));
        assert_eq!(serde_json::to_value(residual).unwrap(), serde_json::json!(12.345));
    }

    #[test]
    fn test_deserialize_integer_and_false() {
        let whole: Money = serde_json::from_str("50").unwrap();
        assert_eq!(whole, Money::from_cents(5000));

        let empty: Money = serde_json::from_str("false").unwrap();
        assert!(empty.is_zero());

        assert!(serde_json::from_str::<Money>("true").is_err());
    }
}
