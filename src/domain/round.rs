use super::money::{Bet, Money};
use super::schedule::{MAX_LEVEL, starting_multiplier};
use super::side::Side;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Where a round sits in its lifecycle.
///
/// `NotStarted` is only reported by the engine before the first round; a live
/// `RoundState` is always in one of the other three phases.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    NotStarted,
    AwaitingChoice,
    Resolved,
    Ended,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::NotStarted => "not started",
            Phase::AwaitingChoice => "awaiting a choice",
            Phase::Resolved => "resolved",
            Phase::Ended => "ended",
        };
        f.write_str(name)
    }
}

/// State of the single live round.
///
/// Fields are only mutated by the engine. The safe side stays hidden while a
/// choice is pending.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub(crate) bet: Bet,
    pub(crate) level: u8,
    pub(crate) multiplier: Decimal,
    pub(crate) safe_side: Side,
    pub(crate) active: bool,
    pub(crate) phase: Phase,
    pub(crate) chosen_side: Option<Side>,
    pub(crate) completed: bool,
}

impl RoundState {
    pub(crate) fn new(bet: Bet, safe_side: Side) -> Self {
        Self {
            bet,
            level: 1,
            multiplier: starting_multiplier(),
            safe_side,
            active: true,
            phase: Phase::AwaitingChoice,
            chosen_side: None,
            completed: false,
        }
    }

    pub fn bet(&self) -> Bet {
        self.bet
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn multiplier(&self) -> Decimal {
        self.multiplier
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once all levels were crossed and the top multiplier was paid.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Side picked on the current level, if any.
    pub fn chosen_side(&self) -> Option<Side> {
        self.chosen_side
    }

    /// The safe side of the current level, once it has been resolved.
    pub fn revealed_safe_side(&self) -> Option<Side> {
        match self.phase {
            Phase::AwaitingChoice | Phase::NotStarted => None,
            Phase::Resolved | Phase::Ended => Some(self.safe_side),
        }
    }

    /// What cashing out right now would pay.
    pub fn potential_payout(&self) -> Money {
        self.bet * self.multiplier
    }

    /// Share of the bridge reached, in percent.
    pub fn progress_percent(&self) -> Decimal {
        Decimal::from(self.level) * Decimal::ONE_HUNDRED / Decimal::from(MAX_LEVEL)
    }
}
