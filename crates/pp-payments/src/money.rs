//! Exact arithmetic on PayPal's decimal amount strings.

use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

use paypal_rest_client::ErrorInfo;

/// Digits after the decimal point PayPal accepts on v1 amounts.
const SCALE_DIGITS: u32 = 2;
const SCALE: i64 = 10i64.pow(SCALE_DIGITS);

/// An amount in hundredths of the currency unit.
///
/// Parsed from strings such as `"10.00"`, `"7.5"` or `"1000"`; never goes
/// through floating point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MinorUnits(i64);

impl MinorUnits {
    pub const ZERO: MinorUnits = MinorUnits(0);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn get_amount_as_i64(&self) -> i64 {
        self.0
    }

    /// Parse a decimal string. Returns `None` for anything that is not a
    /// plain decimal with at most two fraction digits.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let (negative, digits) = match value.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, value),
        };

        let (whole, fraction) = match digits.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (digits, ""),
        };

        if whole.is_empty() || fraction.len() > SCALE_DIGITS as usize {
            return None;
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        if digits.ends_with('.') {
            return None;
        }

        let whole: i64 = whole.parse().ok()?;
        let mut fraction_value: i64 = if fraction.is_empty() {
            0
        } else {
            fraction.parse().ok()?
        };
        for _ in fraction.len()..SCALE_DIGITS as usize {
            fraction_value *= 10;
        }

        let total = whole.checked_mul(SCALE)?.checked_add(fraction_value)?;
        Some(Self(if negative { -total } else { total }))
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Multiply by an item quantity.
    pub fn checked_mul(self, quantity: i64) -> Option<Self> {
        self.0.checked_mul(quantity).map(Self)
    }

    /// Render with exactly two fraction digits, as PayPal expects.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!(
            "{}{}.{:02}",
            sign,
            abs / SCALE as u64,
            abs % SCALE as u64
        )
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl FromStr for MinorUnits {
    type Err = ErrorInfo;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ErrorInfo::input(format!("Invalid amount '{}'", s)))
    }
}

/// Saturates at the `i64` bounds; use [`MinorUnits::checked_add`] when
/// overflow must be detected.
impl Sum for MinorUnits {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}
