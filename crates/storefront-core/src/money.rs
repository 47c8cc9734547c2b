//! Price type for the storefront.
//!
//! Prices are whole won. KRW has no minor unit in practice, so the integer
//! amount is both the stored and the displayed value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A non-negative price in Korean won.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Won(u64);

impl Won {
    /// Create a price from a whole-won amount.
    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    /// Zero won.
    pub const fn zero() -> Self {
        Self(0)
    }

    /// The amount in won.
    pub fn amount(&self) -> u64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a price typed into a form field.
    ///
    /// Accepts plain digits and digits grouped with commas, surrounding
    /// whitespace ignored. Anything else (signs, decimals, empty) is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        let digits: String = trimmed.chars().filter(|c| *c != ',').collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok().map(Self)
    }

    /// Multiply by a quantity, saturating at `u64::MAX`.
    pub fn times(&self, quantity: u32) -> Won {
        Won(self.0.saturating_mul(quantity as u64))
    }

    /// Format the amount with thousands separators (e.g., "25,000").
    pub fn display_amount(&self) -> String {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

impl Add for Won {
    type Output = Won;

    fn add(self, other: Won) -> Won {
        Won(self.0.saturating_add(other.0))
    }
}

impl From<u64> for Won {
    fn from(amount: u64) -> Self {
        Self(amount)
    }
}

impl fmt::Display for Won {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}원", self.display_amount())
    }
}
