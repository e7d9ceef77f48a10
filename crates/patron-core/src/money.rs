//! Integer currency.
//!
//! All prices, budgets, and cart totals are `Money` — whole cents in a
//! `u32`.  There is no floating-point currency anywhere in the workspace:
//! budget comparisons must be exact, and a cart total built from float
//! prices could drift past a budget it appears to respect.
//!
//! `u32` cents tops out at ~$42.9 million, comfortably above anything a
//! tabletop shop will ring up in a day.

use std::fmt;
use std::iter::Sum;

/// An amount of money in whole cents.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Money(pub u32);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Whole-dollar constructor: `Money::from_dollars(50)` is $50.00.
    #[inline]
    pub const fn from_dollars(dollars: u32) -> Money {
        Money(dollars * 100)
    }

    /// Dollars-and-cents constructor: `Money::from_parts(12, 50)` is $12.50.
    #[inline]
    pub const fn from_parts(dollars: u32, cents: u32) -> Money {
        Money(dollars * 100 + cents)
    }

    /// The raw cent count.
    #[inline(always)]
    pub const fn cents(self) -> u32 {
        self.0
    }

    #[inline(always)]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Addition clamped at `u32::MAX` cents rather than wrapping.
    #[inline]
    pub const fn saturating_add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }

    /// Subtraction clamped at zero — "remaining budget" can never go
    /// negative, it can only reach empty.
    #[inline]
    pub const fn saturating_sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }

    /// `None` if `rhs` exceeds `self`; the affordability check.
    #[inline]
    pub const fn checked_sub(self, rhs: Money) -> Option<Money> {
        match self.0.checked_sub(rhs.0) {
            Some(c) => Some(Money(c)),
            None => None,
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;
    #[inline]
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl std::ops::AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc.saturating_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}
