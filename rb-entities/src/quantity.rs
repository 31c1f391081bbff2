use std::num::ParseFloatError;

use thiserror::Error;

use crate::fraction::{Fraction, ParseFractionError};

/// A displayed ingredient amount, either an exact fraction or a plain
/// decimal. The variant is decided when the initial text is parsed and is
/// fixed for the lifetime of the quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuantityValue {
    Fraction(Fraction),
    Decimal(f64),
}

#[derive(Debug, Error)]
pub enum ParseQuantityError {
    #[error("blank quantity text")]
    Blank,
    #[error("invalid fraction: {0}")]
    Fraction(ParseFractionError),
    #[error("invalid decimal: {0}")]
    Decimal(#[from] ParseFloatError),
}

impl QuantityValue {
    /// Parses either a vulgar fraction (`1⁄2`) or a decimal using the given
    /// locale separator (`2.5` or `2,5`). Text without a fraction slash
    /// falls back to decimal parsing.
    pub fn parse(text: &str, decimal_separator: char) -> Result<Self, ParseQuantityError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseQuantityError::Blank);
        }
        match text.parse::<Fraction>() {
            Ok(fraction) => Ok(Self::Fraction(fraction)),
            Err(ParseFractionError::MissingSlash) => {
                let number = text.replace(decimal_separator, ".").parse()?;
                Ok(Self::Decimal(number))
            }
            Err(err) => Err(ParseQuantityError::Fraction(err)),
        }
    }

    /// Formats for display: fractions as mixed numbers, decimals rounded to
    /// two places with the locale separator substituted back.
    pub fn format(self, decimal_separator: char) -> String {
        match self {
            Self::Fraction(fraction) => fraction.to_string(),
            Self::Decimal(number) => {
                let rounded = (number * 100.0).round() / 100.0;
                rounded.to_string().replace('.', &decimal_separator.to_string())
            }
        }
    }
}

/// An ingredient quantity with a fixed default value and a current value
/// that is recomputed from the default whenever the yield changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantity {
    default_text: String,
    default_value: QuantityValue,
    current_value: QuantityValue,
}

impl Quantity {
    pub fn parse(text: &str, decimal_separator: char) -> Result<Self, ParseQuantityError> {
        let default_value = QuantityValue::parse(text, decimal_separator)?;
        Ok(Self {
            default_text: text.to_owned(),
            default_value,
            current_value: default_value,
        })
    }

    /// Rescales from the default value, never from the previous scaled one,
    /// so repeated yield changes cannot accumulate drift.
    pub fn scale(&mut self, factor: Fraction) {
        self.current_value = match self.default_value {
            QuantityValue::Fraction(fraction) => {
                QuantityValue::Fraction((fraction * factor).reduce())
            }
            QuantityValue::Decimal(number) => {
                QuantityValue::Decimal(factor.scale_number(number))
            }
        };
    }

    pub fn reset(&mut self) {
        self.current_value = self.default_value;
    }

    /// The text to display. At the default value this is the exact original
    /// text, not a numerically equal reformatting.
    pub fn display(&self, decimal_separator: char) -> String {
        if self.current_value == self.default_value {
            self.default_text.clone()
        } else {
            self.current_value.format(decimal_separator)
        }
    }

    pub const fn value(&self) -> QuantityValue {
        self.current_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_quantity_scales_exactly() {
        // "1⁄2" at default yield 4 rescaled to 2 servings
        let mut quantity = Quantity::parse("1\u{2044}2", '.').unwrap();
        quantity.scale(Fraction::new(2, 4));
        assert_eq!(quantity.display('.'), "1\u{2044}4");
    }

    #[test]
    fn decimal_quantity_scales_and_rounds() {
        let mut quantity = Quantity::parse("2.5", '.').unwrap();
        quantity.scale(Fraction::new(6, 4));
        assert_eq!(quantity.display('.'), "3.75");
        quantity.scale(Fraction::new(1, 3));
        assert_eq!(quantity.display('.'), "0.83");
    }

    #[test]
    fn locale_separator_is_substituted() {
        let mut quantity = Quantity::parse("2,5", ',').unwrap();
        quantity.scale(Fraction::new(6, 4));
        assert_eq!(quantity.display(','), "3,75");
    }

    #[test]
    fn reset_restores_the_original_text() {
        // "0.50" would reformat as "0.5"; reset must restore it verbatim.
        let mut quantity = Quantity::parse("0.50", '.').unwrap();
        quantity.scale(Fraction::new(3, 4));
        assert_eq!(quantity.display('.'), "0.38");
        quantity.reset();
        assert_eq!(quantity.display('.'), "0.50");
    }

    #[test]
    fn whole_decimal_displays_without_fraction_digits() {
        let mut quantity = Quantity::parse("1.5", '.').unwrap();
        quantity.scale(Fraction::new(2, 1));
        assert_eq!(quantity.display('.'), "3");
    }

    #[test]
    fn blank_text_is_rejected() {
        assert!(matches!(
            QuantityValue::parse("  ", '.'),
            Err(ParseQuantityError::Blank)
        ));
    }
}
