//! Money formatting for display fields
//!
//! Values are rounded half away from zero on their shortest decimal form,
//! so `1.005` rounds to `1.01` at two decimals the way a locale number
//! formatter does, not to the `1.00` that the binary value would give.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Highest fraction digit count honored, like the platform locale formatter
pub const MAX_FRACTION_DIGITS: u32 = 20;

/// Fraction digit bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoneyFormat {
    /// Minimum fraction digits; shorter fractions are zero-padded
    pub min_decimals: u32,
    /// Maximum fraction digits; longer fractions are rounded
    pub max_decimals: u32,
}

impl MoneyFormat {
    pub fn new(min_decimals: u32, max_decimals: u32) -> Self {
        Self {
            min_decimals,
            max_decimals,
        }
    }

    /// Exactly two fraction digits, used for prices and percentages
    pub fn cents() -> Self {
        Self::new(2, 2)
    }
}

/// Separators of a display locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberLocale {
    pub group_separator: char,
    pub decimal_separator: char,
}

impl NumberLocale {
    /// `1,234.50`
    pub const EN_US: NumberLocale = NumberLocale {
        group_separator: ',',
        decimal_separator: '.',
    };

    /// `1.234,50`
    pub const DE_DE: NumberLocale = NumberLocale {
        group_separator: '.',
        decimal_separator: ',',
    };
}

impl Default for NumberLocale {
    fn default() -> Self {
        Self::EN_US
    }
}

/// Formats a value with US grouping and the given fraction bounds
///
/// # Example
/// ```
/// use coingecko_market_sdk::format::{format_money, MoneyFormat};
///
/// assert_eq!(format_money(1234.5, MoneyFormat::cents()), "1,234.50");
/// assert_eq!(format_money(5.0, MoneyFormat::default()), "5");
/// ```
pub fn format_money(value: f64, options: MoneyFormat) -> String {
    format_money_with_locale(value, options, &NumberLocale::default())
}

/// Formats a value with the separators of `locale`
///
/// `max_decimals` below `min_decimals` is raised to `min_decimals`; both are
/// capped at [`MAX_FRACTION_DIGITS`]. Non-finite values render as `∞`, `-∞`
/// and `NaN`. A value that rounds to zero has no sign, unlike the platform
/// locale formatter which renders `-0.001` at two decimals as `-0.00`.
pub fn format_money_with_locale(value: f64, options: MoneyFormat, locale: &NumberLocale) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let min = options.min_decimals.min(MAX_FRACTION_DIGITS) as usize;
    let max = options
        .max_decimals
        .min(MAX_FRACTION_DIGITS)
        .max(min as u32);

    let digits = rounded_abs(value, max);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (digits.as_str(), ""),
    };

    let mut fraction = frac_part.to_string();
    while fraction.len() > min && fraction.ends_with('0') {
        fraction.pop();
    }
    while fraction.len() < min {
        fraction.push('0');
    }

    let is_zero = int_part.chars().chain(fraction.chars()).all(|c| c == '0');

    let mut out = String::with_capacity(int_part.len() + fraction.len() + 8);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, locale.group_separator));
    if !fraction.is_empty() {
        out.push(locale.decimal_separator);
        out.push_str(&fraction);
    }
    out
}

/// `$` followed by the value at two decimals
pub fn format_usd(value: f64) -> String {
    format!("${}", format_money(value, MoneyFormat::cents()))
}

/// Percentage at two decimals followed by `%`
pub fn format_percent_change(value: f64) -> String {
    format!("{}%", format_money(value, MoneyFormat::cents()))
}

/// Absolute value rounded to at most `decimals` fraction digits, as plain
/// decimal text without exponent
fn rounded_abs(value: f64, decimals: u32) -> String {
    let abs = value.abs();

    // f64's Display is the shortest representation that round-trips.
    match Decimal::from_str(&abs.to_string()) {
        Ok(decimal) => decimal
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
            .to_string(),
        // Outside Decimal's range; binary rounding is the best we have.
        Err(_) => format!("{:.*}", decimals as usize, abs),
    }
}

fn group_digits(int_part: &str, separator: char) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
