use super::schedule::max_multiplier;
use crate::error::GameError;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

/// A monetary value shown to the player.
///
/// Wraps `rust_decimal::Decimal` so payouts stay exact; it always renders with two
/// decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_cents(f, self.0)
    }
}

fn write_cents(f: &mut fmt::Formatter<'_>, amount: Decimal) -> fmt::Result {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    write!(f, "{rounded:.2}")
}

impl Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

// Session totals saturate instead of overflowing on huge bets.
impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// The stake placed at the start of a round.
///
/// Always strictly positive, and small enough that the top multiplier still
/// fits in a `Decimal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd)]
pub struct Bet(Decimal);

impl Bet {
    pub fn new(value: Decimal) -> Result<Self, GameError> {
        if value <= Decimal::ZERO {
            return Err(GameError::InvalidBet(
                "bet must be greater than zero".to_string(),
            ));
        }
        if value.checked_mul(max_multiplier()).is_none() {
            return Err(GameError::InvalidBet(
                "bet is too large to pay out".to_string(),
            ));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Bet {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(GameError::InvalidBet("bet amount is missing".to_string()));
        }
        let value = Decimal::from_str(trimmed)
            .map_err(|_| GameError::InvalidBet(format!("'{trimmed}' is not a number")))?;
        Self::new(value)
    }
}

impl From<Bet> for Money {
    fn from(bet: Bet) -> Self {
        Self(bet.0)
    }
}

// Only schedule multipliers reach this, and `Bet::new` keeps those in range.
impl Mul<Decimal> for Bet {
    type Output = Money;
    fn mul(self, multiplier: Decimal) -> Self::Output {
        Money(self.0 * multiplier)
    }
}

impl fmt::Display for Bet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_cents(f, self.0)
    }
}

impl Serialize for Bet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}
