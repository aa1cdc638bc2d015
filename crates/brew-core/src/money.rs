//! # Money Module
//!
//! Provides the `Money` type for prices and totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Cart math in floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer cents                                           │
//! │    R35.00 = 3500 cents, R7.00 extra = 700 cents                        │
//! │    Every total is exact to two decimal places                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brew_core::money::Money;
//!
//! let latte = Money::from_major(35);             // R35.00
//! let extra = Money::from_cents(700);            // R7.00
//! let line = (latte + extra).multiply_quantity(2);
//! assert_eq!(line.cents(), 8400);
//! assert_eq!(line.to_string(), "R84.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// A monetary value in cents (the smallest rand unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction stays total; prices themselves are
///   validated non-negative before they get here
/// - **Single field tuple struct**: serializes as a bare integer
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole rands.
    ///
    /// Menu prices in the shop are whole rands, so this is the usual
    /// constructor for catalog data and tests.
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Creates a Money value from rands and cents.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -R5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rand portion.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative.
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// let unit_price = Money::from_major(35);
    /// assert_eq!(unit_price.multiply_quantity(2), Money::from_major(70));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Formats the amount as a plain decimal with two places, e.g. `"84.00"`.
    ///
    /// This is the form payment providers expect in an `amount` field.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

/// Shows the amount in rands, e.g. `R84.00`.
///
/// Client-side formatting should go through the session config instead,
/// which knows the configured currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}R{}.{:02}", sign, self.major().abs(), self.minor())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_and_parts() {
        let money = Money::from_major(35);
        assert_eq!(money.cents(), 3500);
        assert_eq!(money.major(), 35);
        assert_eq!(money.minor(), 0);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.cents(), -550);
        assert_eq!(negative.minor(), 50);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(1099).to_string(), "R10.99");
        assert_eq!(Money::from_major(90).to_string(), "R90.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-R5.50");
        assert_eq!(Money::zero().to_string(), "R0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(8405).to_decimal_string(), "84.05");
        assert_eq!(Money::from_major(7).to_decimal_string(), "7.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_major(5);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut c = a;
        c += b;
        assert_eq!(c, Money::from_major(15));
    }

    #[test]
    fn test_sum() {
        let prices = [Money::from_major(35), Money::from_major(20), Money::from_cents(5)];
        let total: Money = prices.iter().sum();
        assert_eq!(total.cents(), 5505);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    /// 0.1 + 0.2 style drift cannot happen with cents.
    #[test]
    fn test_no_drift_over_many_additions() {
        let ten_cents = Money::from_cents(10);
        let total: Money = std::iter::repeat(ten_cents).take(1000).sum();
        assert_eq!(total, Money::from_major(100));
    }
}
