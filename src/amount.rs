//! Transient numeric views of amount text.
//!
//! Records always keep their amounts as the source text. The helpers here
//! turn that text into numbers only for totals and sort keys, and the result
//! is thrown away afterwards.

use rust_decimal::Decimal;
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A decimal amount used for running totals.
///
/// # Examples
///
/// ```
/// use pga_parser::{Amount, TotalStyle};
///
/// let amount = Amount::parse_lenient("Rp 1.000.000").unwrap();
/// assert_eq!(amount.format(TotalStyle::Grouped), "1.000.000");
/// assert_eq!(amount.format(TotalStyle::Decimal), "1,000,000.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

/// How a total is rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TotalStyle {
    /// `id-ID` style: `.` groups thousands, `,` marks decimals, no trailing zeros.
    #[default]
    Grouped,
    /// Fixed two decimals with `,` grouping: `1,234,567.00`.
    Decimal,
}

impl Amount {
    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Reads amount text the way a person would.
    ///
    /// Everything except digits, `.`, `,` and `-` is dropped first. When both
    /// separators are present the last one is the decimal point. A lone kind
    /// of separator is grouping if it repeats or has exactly three digits
    /// after it, otherwise it is the decimal point.
    pub fn parse_lenient(text: &str) -> Option<Self> {
        let cleaned: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
            .collect();

        let decimal_sep = match (cleaned.rfind('.'), cleaned.rfind(',')) {
            (Some(dot), Some(comma)) => Some(if dot > comma { '.' } else { ',' }),
            (Some(_), None) => lone_separator(&cleaned, '.'),
            (None, Some(_)) => lone_separator(&cleaned, ','),
            (None, None) => None,
        };

        let normalized: String = cleaned
            .chars()
            .filter_map(|c| match c {
                '.' | ',' if Some(c) == decimal_sep => Some('.'),
                '.' | ',' => None,
                other => Some(other),
            })
            .collect();

        Decimal::from_str(&normalized).ok().map(Amount)
    }

    /// Like [`Amount::parse_lenient`], but missing or unreadable text counts as zero.
    pub fn parse_or_zero(text: &str) -> Self {
        Self::parse_lenient(text).unwrap_or(Self::ZERO)
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Renders the amount in the requested display style.
    pub fn format(&self, style: TotalStyle) -> String {
        let sign = if self.0.is_sign_negative() && !self.0.is_zero() {
            "-"
        } else {
            ""
        };
        let fixed = format!("{:.2}", self.0.abs().round_dp(2));
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        match style {
            TotalStyle::Grouped => {
                let grouped = group_digits(int_part, '.');
                let frac = frac_part.trim_end_matches('0');
                if frac.is_empty() {
                    format!("{sign}{grouped}")
                } else {
                    format!("{sign}{grouped},{frac}")
                }
            }
            TotalStyle::Decimal => format!("{sign}{}.{frac_part}", group_digits(int_part, ',')),
        }
    }
}

fn lone_separator(cleaned: &str, sep: char) -> Option<char> {
    if cleaned.matches(sep).count() > 1 {
        return None;
    }
    let tail = &cleaned[cleaned.rfind(sep)? + 1..];
    if tail.len() == 3 {
        None
    } else {
        Some(sep)
    }
}

fn group_digits(int_part: &str, sep: char) -> String {
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(sep);
        }
        grouped.push(c);
    }
    grouped.chars().rev().collect()
}

/// Numeric sort key for an amount-like field.
///
/// Strips everything except digits, `.` and `-`, then reads the longest
/// leading number, so `"1.000.000"` reads as `1.0` and `"1,000,000"` as
/// `1000000.0`. Returns `None` when no number leads the stripped text.
pub fn numeric_sort_key(text: &str) -> Option<f64> {
    let stripped: Vec<u8> = text
        .bytes()
        .filter(|b| b.is_ascii_digit() || *b == b'.' || *b == b'-')
        .collect();

    let mut pos = 0;
    let negative = stripped.first() == Some(&b'-');
    if negative {
        pos += 1;
    }

    let int_start = pos;
    while pos < stripped.len() && stripped[pos].is_ascii_digit() {
        pos += 1;
    }
    let int_digits = &stripped[int_start..pos];

    let mut frac_digits: &[u8] = &[];
    if pos < stripped.len() && stripped[pos] == b'.' {
        let frac_start = pos + 1;
        let mut frac_end = frac_start;
        while frac_end < stripped.len() && stripped[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = &stripped[frac_start..frac_end];
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    let literal = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if int_digits.is_empty() { "0" } else { std::str::from_utf8(int_digits).ok()? },
        if frac_digits.is_empty() { "0" } else { std::str::from_utf8(frac_digits).ok()? },
    );
    literal.parse().ok()
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// Totals saturate at the Decimal bounds instead of panicking.
impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match self.0.checked_add(rhs.0) {
            Some(sum) => Amount(sum),
            None if rhs.0.is_sign_negative() => Amount(Decimal::MIN),
            None => Amount(Decimal::MAX),
        }
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}
