use crate::domain::money::Bet;
use crate::domain::outcome::{LevelAdvance, Outcome, PayoutResult};
use crate::domain::ports::RandomSource;
use crate::domain::round::{Phase, RoundState};
use crate::domain::schedule::{
    MAX_LEVEL, max_multiplier, multiplier_after_surviving, survival_probability,
};
use crate::domain::side::Side;
use crate::error::{GameError, Result};
use crate::infrastructure::random::SystemRandom;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Decides whether a pick survives.
///
/// Level 1 always holds. Above it the wrong panel always breaks, and the safe
/// panel holds only if a single draw lands under the level's survival probability.
/// The draw is taken only in that last case.
pub fn resolve_choice<R: RandomSource + ?Sized>(
    level: u8,
    side: Side,
    safe_side: Side,
    rng: &mut R,
) -> bool {
    if level <= 1 {
        return true;
    }
    if side != safe_side {
        return false;
    }
    rng.next_unit() < survival_probability(level)
}

/// The round state machine.
///
/// `GameEngine` owns the one live `RoundState` and the random source. Every
/// operation resolves synchronously; pacing of reveals is left to the caller.
/// Operations called in the wrong phase fail with `InvalidState` and leave the
/// round untouched.
pub struct GameEngine<R: RandomSource = SystemRandom> {
    rng: R,
    round: Option<RoundState>,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GameEngine {
    /// Creates an engine backed by an entropy-seeded generator.
    pub fn new() -> Self {
        Self::with_random(SystemRandom::from_entropy())
    }
}

impl<R: RandomSource> GameEngine<R> {
    pub fn with_random(rng: R) -> Self {
        Self { rng, round: None }
    }

    /// The current round, if one was ever started.
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    pub fn phase(&self) -> Phase {
        self.round
            .as_ref()
            .map_or(Phase::NotStarted, |round| round.phase)
    }

    pub fn can_choose(&self) -> bool {
        self.accepts(Phase::AwaitingChoice)
    }

    pub fn can_cash_out(&self) -> bool {
        self.accepts(Phase::Resolved)
    }

    pub fn can_continue(&self) -> bool {
        self.accepts(Phase::Resolved)
    }

    fn accepts(&self, phase: Phase) -> bool {
        self.round
            .as_ref()
            .is_some_and(|round| round.active && round.phase == phase)
    }

    /// Places a bet and opens level 1.
    ///
    /// Replaces whatever round came before. On an invalid bet the previous state
    /// is kept as is.
    pub fn start_round(&mut self, bet: Decimal) -> Result<RoundState> {
        let bet = Bet::new(bet).inspect_err(|e| debug!(error = %e, "bet rejected"))?;

        if let Some(previous) = self.round.as_ref().filter(|round| round.active) {
            warn!(
                level = previous.level,
                bet = %previous.bet,
                "replacing a round that was still active"
            );
        }

        let safe_side = Side::from_draw(self.rng.next_unit());
        let round = RoundState::new(bet, safe_side);
        debug!(bet = %bet, "round started");
        self.round = Some(round.clone());
        Ok(round)
    }

    /// Resolves a panel pick on the current level.
    pub fn choose(&mut self, side: Side) -> Result<Outcome> {
        let round = guarded(&mut self.round, "choose a panel", Phase::AwaitingChoice)?;
        round.chosen_side = Some(side);

        let level = round.level;
        let safe_side = round.safe_side;
        if resolve_choice(level, side, safe_side, &mut self.rng) {
            round.multiplier = multiplier_after_surviving(level);
            round.phase = Phase::Resolved;
            debug!(level, %side, multiplier = %round.multiplier, "panel held");
            Ok(Outcome::Safe {
                side,
                safe_side,
                level,
                multiplier_after: round.multiplier,
            })
        } else {
            round.active = false;
            round.phase = Phase::Ended;
            info!(level, %side, lost = %round.bet, "panel broke, round lost");
            Ok(Outcome::Unsafe {
                side,
                safe_side,
                level,
                lost_amount: round.bet.into(),
            })
        }
    }

    /// Banks `bet * multiplier` and ends the round.
    pub fn cash_out(&mut self) -> Result<PayoutResult> {
        let round = guarded(&mut self.round, "cash out", Phase::Resolved)?;
        let payout = round.potential_payout();
        round.active = false;
        round.phase = Phase::Ended;
        info!(level = round.level, %payout, "cashed out");
        Ok(PayoutResult {
            payout,
            level: round.level,
            multiplier: round.multiplier,
        })
    }

    /// Moves on from a resolved level.
    ///
    /// After the last level this pays out the top multiplier and ends the round.
    pub fn continue_to_next_level(&mut self) -> Result<LevelAdvance> {
        let round = guarded(&mut self.round, "continue", Phase::Resolved)?;

        if round.level >= MAX_LEVEL {
            round.multiplier = max_multiplier();
            round.completed = true;
            round.active = false;
            round.phase = Phase::Ended;
            let payout = round.potential_payout();
            info!(%payout, "all levels crossed");
            return Ok(LevelAdvance::Completed { payout });
        }

        round.level += 1;
        round.safe_side = Side::from_draw(self.rng.next_unit());
        round.chosen_side = None;
        round.phase = Phase::AwaitingChoice;
        debug!(level = round.level, "advanced to next level");
        Ok(LevelAdvance::Next {
            level: round.level,
            multiplier: round.multiplier,
        })
    }
}

// Hands out the live round only if it is active and in the expected phase.
fn guarded<'a>(
    round: &'a mut Option<RoundState>,
    operation: &'static str,
    expected: Phase,
) -> Result<&'a mut RoundState> {
    let phase = round.as_ref().map_or(Phase::NotStarted, |r| r.phase);
    match round {
        Some(r) if r.active && r.phase == expected => Ok(r),
        _ => Err(GameError::InvalidState { operation, phase }),
    }
}
