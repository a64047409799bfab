use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ConversionError;

/// Arbitrary-precision integer kept in its canonical decimal form
///
/// Leading `+` signs and leading zeros are dropped, and negative zero
/// becomes `0`. No arithmetic is provided; the value is carried intact from
/// configuration text to its consumer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BigInteger(String);

impl BigInteger {
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.starts_with('-')
    }
}

impl FromStr for BigInteger {
    type Err = ConversionError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = split_sign(text);
        if digits.is_empty() {
            return Err(ConversionError::invalid_value("BigInteger", text, "no digits"));
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConversionError::invalid_value(
                "BigInteger",
                text,
                "only decimal digits are allowed",
            ));
        }

        let trimmed = digits.trim_start_matches('0');
        let canonical = match (trimmed.is_empty(), negative) {
            (true, _) => "0".to_string(),
            (false, true) => format!("-{}", trimmed),
            (false, false) => trimmed.to_string(),
        };
        Ok(Self(canonical))
    }
}

/// Arbitrary-precision decimal kept in its textual form
///
/// The scale is preserved, so `1.50` and `1.5` are distinct values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BigDecimal(String);

impl BigDecimal {
    pub fn zero() -> Self {
        Self("0".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0.starts_with('-')
    }
}

impl FromStr for BigDecimal {
    type Err = ConversionError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (negative, unsigned) = split_sign(text);
        let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
            Some(index) => (&unsigned[..index], Some(&unsigned[index + 1..])),
            None => (unsigned, None),
        };

        let (integer, fraction) = match mantissa.split_once('.') {
            Some((integer, fraction)) => (integer, fraction),
            None => (mantissa, ""),
        };
        if integer.is_empty() && fraction.is_empty() {
            return Err(ConversionError::invalid_value("BigDecimal", text, "no digits"));
        }
        if !integer.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(ConversionError::invalid_value(
                "BigDecimal",
                text,
                "mantissa must be decimal digits with an optional point",
            ));
        }

        if let Some(exponent) = exponent {
            let (_, exponent_digits) = split_sign(exponent);
            if exponent_digits.is_empty() || !exponent_digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ConversionError::invalid_value(
                    "BigDecimal",
                    text,
                    "exponent must be a signed integer",
                ));
            }
            exponent
                .parse::<i32>()
                .map_err(|e| ConversionError::invalid_value("BigDecimal", text, e.to_string()))?;
        }

        let sign = if negative { "-" } else { "" };
        Ok(Self(format!("{}{}", sign, unsigned)))
    }
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

macro_rules! impl_text_conversions {
    ($($ty:ident),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl Default for $ty {
                fn default() -> Self {
                    Self::zero()
                }
            }

            impl TryFrom<String> for $ty {
                type Error = ConversionError;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl From<i64> for $ty {
                fn from(value: i64) -> Self {
                    Self(value.to_string())
                }
            }
        )+
    };
}

impl_text_conversions!(BigInteger, BigDecimal);
