use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::op;

//--------------------------------------       Money        -----------------------------------------------------------
/// A fixed-point monetary amount, held as a signed number of minor units (cents). The payment gateway expresses all
/// amounts with exactly two decimal places, so this type renders as `"12.34"` and refuses to parse anything with more
/// precision than that.
#[derive(Debug, Clone, Copy, Default, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Money(i64);

op!(binary Money, Add, add);
op!(binary Money, Sub, sub);
op!(inplace Money, SubAssign, sub_assign);
op!(unary Money, Neg, neg);

impl Mul<i64> for Money {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from_cents(self.value() * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a monetary amount: {0}")]
pub struct MoneyConversionError(pub String);

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Money {}

impl FromStr for Money {
    type Err = MoneyConversionError;

    /// Parses a decimal string (`"12.34"`, `"12.3"`, `"12"`, `"-0.50"`) into cents. More than two decimal places is
    /// an error rather than a silent truncation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let negative = s.starts_with('-');
        let unsigned = s.strip_prefix('-').unwrap_or(s);
        let mut parts = unsigned.split('.');
        let whole = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| MoneyConversionError(format!("Invalid amount: {s}")))?
            .parse::<i64>()
            .map_err(|e| MoneyConversionError(format!("Invalid amount: {s}. {e}")))?;
        let cents = match parts.next() {
            None => 0,
            Some(frac) if frac.len() > 2 => {
                return Err(MoneyConversionError(format!("Too many decimal places in amount: {s}")))
            },
            Some(frac) => {
                let scale = if frac.len() == 1 { 10 } else { 1 };
                frac.parse::<i64>().map_err(|e| MoneyConversionError(format!("Invalid amount: {s}. {e}")))? * scale
            },
        };
        if parts.next().is_some() {
            return Err(MoneyConversionError(format!("Invalid amount: {s}")));
        }
        let value = 100 * whole + cents;
        Ok(if negative { Self(-value) } else { Self(value) })
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let cents = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", cents / 100, cents % 100)
    }
}

impl Money {
    pub fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn from_major_units(units: i64) -> Self {
        Self(units * 100)
    }

    /// Rounds a floating-point amount to two decimal places. Order totals arrive as floats from the storefront, so
    /// this is the single place where they are snapped onto the fixed-point grid.
    pub fn from_f64_rounded(value: f64) -> Self {
        Self((value * 100.0).round() as i64)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_valid_amounts() {
        assert_eq!("12.34".parse::<Money>().unwrap(), Money::from_cents(1234));
        assert_eq!("12.3".parse::<Money>().unwrap(), Money::from_cents(1230));
        assert_eq!("12".parse::<Money>().unwrap(), Money::from_cents(1200));
        assert_eq!("0.05".parse::<Money>().unwrap(), Money::from_cents(5));
        assert_eq!("-0.50".parse::<Money>().unwrap(), Money::from_cents(-50));
    }

    #[test]
    fn parse_invalid_amounts() {
        assert!("12.345".parse::<Money>().is_err());
        assert!("12.3.4".parse::<Money>().is_err());
        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!(".50".parse::<Money>().is_err());
    }

    #[test]
    fn display_always_has_two_decimals() {
        assert_eq!(Money::from_cents(1234).to_string(), "12.34");
        assert_eq!(Money::from_cents(1230).to_string(), "12.30");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(0).to_string(), "0.00");
        assert_eq!(Money::from_cents(-5).to_string(), "-0.05");
        assert_eq!(Money::from_cents(-1250).to_string(), "-12.50");
    }

    #[test]
    fn rounding_from_floats() {
        assert_eq!(Money::from_f64_rounded(12.344), Money::from_cents(1234));
        assert_eq!(Money::from_f64_rounded(12.346), Money::from_cents(1235));
        assert_eq!(Money::from_f64_rounded(0.0), Money::from_cents(0));
        assert_eq!(Money::from_f64_rounded(99.999), Money::from_cents(10000));
    }

    #[test]
    fn positivity() {
        assert!(Money::from_cents(1).is_positive());
        assert!(!Money::from_cents(0).is_positive());
        assert!(!Money::from_cents(-1).is_positive());
    }

    #[test]
    fn arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(250);
        assert_eq!(a + b, Money::from_cents(1250));
        assert_eq!(a - b, Money::from_cents(750));
        assert_eq!(-b, Money::from_cents(-250));
        assert_eq!(b * 4, Money::from_cents(1000));
        let total: Money = [a, b, b].into_iter().sum();
        assert_eq!(total, Money::from_cents(1500));
    }
}
