//! Money amounts.

use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A non-negative amount of money, held in minor units (cents).
///
/// Reads and writes as a decimal string with two places: `"200.00"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u64);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub const fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub const fn cents(self) -> u64 {
        self.0
    }

    /// Multiplies by a count (nights, beds), saturating on overflow.
    #[must_use]
    pub fn times(self, count: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(count)))
    }

    /// Applies a percentage adjustment: `+10` raises by a tenth, `-100` or
    /// lower yields zero. Rounds half up to the nearest cent.
    #[must_use]
    pub fn adjusted_by_percent(self, percent: i32) -> Self {
        let factor = 100 + i64::from(percent);
        if factor <= 0 {
            return Self::ZERO;
        }
        let scaled = u128::from(self.0) * u128::try_from(factor).unwrap_or(0);
        let cents = (scaled + 50) / 100;
        Self(u64::try_from(cents).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, a| Self(acc.0.saturating_add(a.0)))
    }
}

/// A string that isn't a non-negative decimal amount with at most two places.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid amount '{0}': expected a non-negative number like 120 or 120.50")]
pub struct ParseAmountError(String);

impl FromStr for Amount {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseAmountError(s.to_string());
        let trimmed = s.trim();
        let (whole, frac) = trimmed.split_once('.').unwrap_or((trimmed, ""));

        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() || !all_digits(whole) || !all_digits(frac) || frac.len() > 2 {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let frac: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac))
            .map(Self)
            .ok_or_else(invalid)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!("200".parse::<Amount>(), Ok(Amount::from_cents(20_000)));
        assert_eq!("200.5".parse::<Amount>(), Ok(Amount::from_cents(20_050)));
        assert_eq!("0.07".parse::<Amount>(), Ok(Amount::from_cents(7)));
        assert_eq!("12.".parse::<Amount>(), Ok(Amount::from_cents(1_200)));
    }

    #[test]
    fn rejects_negative_and_malformed_amounts() {
        for bad in ["-5", "", ".50", "1.234", "ten", "1,50"] {
            assert!(bad.parse::<Amount>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn displays_two_decimal_places() {
        assert_eq!(Amount::from_cents(37_500).to_string(), "375.00");
        assert_eq!(Amount::from_cents(5).to_string(), "0.05");
    }

    #[test]
    fn percent_adjustment_rounds_to_cents() {
        let rate = Amount::from_cents(2_500);
        assert_eq!(rate.adjusted_by_percent(10), Amount::from_cents(2_750));
        assert_eq!(rate.adjusted_by_percent(-20), Amount::from_cents(2_000));
        assert_eq!(rate.adjusted_by_percent(-150), Amount::ZERO);
        assert_eq!(Amount::from_cents(1).adjusted_by_percent(50), Amount::from_cents(2));
    }

    #[test]
    fn serializes_as_decimal_string() {
        let json = serde_json::to_string(&Amount::from_cents(15_000)).unwrap();
        assert_eq!(json, "\"150.00\"");
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Amount::from_cents(15_000));
    }
}
