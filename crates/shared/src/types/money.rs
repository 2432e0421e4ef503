//! Number parsing and display formatting for monetary amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Every amount is parsed straight into `rust_decimal::Decimal`.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Describes how amounts are written in text cells and how they are displayed.
///
/// The same format is used in both directions so a value rendered with
/// [`NumberFormat::format_amount`] parses back with [`NumberFormat::parse_amount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberFormat {
    /// Currency symbol stripped on parse and prefixed on display (e.g. "R$").
    pub currency_symbol: String,
    /// Character separating the integer and fractional parts.
    pub decimal_separator: char,
    /// Character grouping thousands.
    pub thousands_separator: char,
    /// Fractional digits shown on display.
    pub decimal_places: u32,
}

/// Defaults to [`NumberFormat::brazilian`], the layout of the source spreadsheets.
impl Default for NumberFormat {
    fn default() -> Self {
        Self::brazilian()
    }
}

impl NumberFormat {
    /// Brazilian layout: `R$ 1.234,56`.
    #[must_use]
    pub fn brazilian() -> Self {
        Self {
            currency_symbol: "R$".to_string(),
            decimal_separator: ',',
            thousands_separator: '.',
            decimal_places: 2,
        }
    }

    /// Symbol-less layout with a decimal point: `1,234.56`.
    #[must_use]
    pub fn international() -> Self {
        Self {
            currency_symbol: String::new(),
            decimal_separator: '.',
            thousands_separator: ',',
            decimal_places: 2,
        }
    }

    /// Parses a text cell into an amount.
    ///
    /// Strips the currency symbol, percent signs, whitespace and thousands
    /// separators, and reads `(1.234,56)` as a negative amount. Returns `None`
    /// for blank or unparseable text.
    #[must_use]
    pub fn parse_amount(&self, raw: &str) -> Option<Decimal> {
        let mut text = raw.trim().to_string();
        if !self.currency_symbol.is_empty() {
            text = text.replace(self.currency_symbol.as_str(), "");
        }

        let mut cleaned: String = text
            .chars()
            .filter(|c| !c.is_whitespace() && *c != self.thousands_separator && *c != '%')
            .map(|c| if c == self.decimal_separator { '.' } else { c })
            .collect();

        let negative = cleaned.starts_with('(') && cleaned.ends_with(')') && cleaned.len() > 2;
        if negative {
            cleaned = cleaned[1..cleaned.len() - 1].to_string();
        }
        if cleaned.is_empty() {
            return None;
        }

        let value = Decimal::from_str(&cleaned)
            .or_else(|_| Decimal::from_scientific(&cleaned))
            .ok()?;

        Some(if negative { -value } else { value })
    }

    /// Formats an amount for display, e.g. `R$ 1,234.56` or `-R$ 10.00`.
    #[must_use]
    pub fn format_amount(&self, value: Decimal) -> String {
        let number = self.format_number(value);
        let (sign, digits) = match number.strip_prefix('-') {
            Some(rest) => ("-", rest.to_string()),
            None => ("", number),
        };

        if self.currency_symbol.is_empty() {
            format!("{sign}{digits}")
        } else {
            format!("{sign}{} {digits}", self.currency_symbol)
        }
    }

    /// Formats a percentage for display; an undefined percentage renders as `N/A`.
    #[must_use]
    pub fn format_percent(&self, value: Option<Decimal>) -> String {
        match value {
            Some(percent) => {
                let rounded = self.round(percent);
                let text = format!("{:.*}", self.decimal_places as usize, rounded);
                format!("{}%", text.replace('.', &self.decimal_separator.to_string()))
            }
            None => "N/A".to_string(),
        }
    }

    /// Whether the separators can be told apart when parsing.
    #[must_use]
    pub fn is_unambiguous(&self) -> bool {
        self.decimal_separator != self.thousands_separator
    }

    fn round(&self, value: Decimal) -> Decimal {
        value.round_dp_with_strategy(self.decimal_places, RoundingStrategy::MidpointAwayFromZero)
    }

    fn format_number(&self, value: Decimal) -> String {
        let rounded = self.round(value);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let plain = format!("{:.*}", self.decimal_places as usize, rounded.abs());

        let (integer, fraction) = match plain.split_once('.') {
            Some((integer, fraction)) => (integer.to_string(), Some(fraction.to_string())),
            None => (plain, None),
        };

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&group_thousands(&integer, self.thousands_separator));
        if let Some(fraction) = fraction {
            out.push(self.decimal_separator);
            out.push_str(&fraction);
        }
        out
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
