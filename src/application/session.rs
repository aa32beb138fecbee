use super::engine::GameEngine;
use crate::domain::action::{ActionType, PlayerAction};
use crate::domain::money::{Bet, Money};
use crate::domain::outcome::{
    LevelAdvance, Outcome, PayoutResult, RoundResult, RoundSummary, SessionReport,
};
use crate::domain::ports::{RandomSource, RoundLedgerBox};
use crate::domain::round::{Phase, RoundState};
use crate::error::{GameError, Result};
use crate::infrastructure::random::SystemRandom;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// What a single action produced.
#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventDetail {
    Started { bet: Bet },
    Choice(Outcome),
    Payout(PayoutResult),
    Advance(LevelAdvance),
}

/// An action's result plus the round figures a display needs.
#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
pub struct GameEvent {
    pub round: u32,
    pub action: ActionType,
    pub level: u8,
    pub phase: Phase,
    pub multiplier: Decimal,
    pub potential_payout: Money,
    pub progress_percent: Decimal,
    pub detail: EventDetail,
}

/// Plays successive rounds and keeps a ledger of the finished ones.
///
/// Wraps a `GameEngine`, translating `PlayerAction`s into engine calls. Each
/// round that ends is recorded through the `RoundLedger` port before the event
/// is returned.
pub struct GameSession<R: RandomSource = SystemRandom> {
    engine: GameEngine<R>,
    ledger: RoundLedgerBox,
    rounds_started: u32,
}

impl<R: RandomSource> GameSession<R> {
    /// Creates a new `GameSession`.
    ///
    /// # Arguments
    ///
    /// * `engine` - The engine that owns round state.
    /// * `ledger` - Where finished rounds are recorded.
    pub fn new(engine: GameEngine<R>, ledger: RoundLedgerBox) -> Self {
        Self {
            engine,
            ledger,
            rounds_started: 0,
        }
    }

    pub fn engine(&self) -> &GameEngine<R> {
        &self.engine
    }

    pub fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    /// Applies one player action to the engine.
    ///
    /// Engine errors are returned untouched and leave the session as it was.
    pub async fn apply(&mut self, action: PlayerAction) -> Result<GameEvent> {
        let detail = match action {
            PlayerAction::Start(bet) => {
                let abandoned = self
                    .engine
                    .round()
                    .filter(|round| round.is_active())
                    .map(|round| self.summarize(round, RoundResult::Abandoned));

                self.engine.start_round(bet.value())?;
                self.rounds_started += 1;
                if let Some(summary) = abandoned {
                    self.ledger.record(summary).await?;
                }
                EventDetail::Started { bet }
            }
            PlayerAction::Choose(side) => {
                let outcome = self.engine.choose(side)?;
                if !outcome.is_safe() {
                    self.record_end(RoundResult::Lost).await?;
                }
                EventDetail::Choice(outcome)
            }
            PlayerAction::CashOut => {
                let payout = self.engine.cash_out()?;
                self.record_end(RoundResult::CashedOut).await?;
                EventDetail::Payout(payout)
            }
            PlayerAction::Continue => {
                let advance = self.engine.continue_to_next_level()?;
                if advance.is_completed() {
                    self.record_end(RoundResult::Completed).await?;
                }
                EventDetail::Advance(advance)
            }
        };

        let round = self.live_round()?;
        let event = GameEvent {
            round: self.rounds_started,
            action: action.kind(),
            level: round.level(),
            phase: round.phase(),
            multiplier: round.multiplier(),
            potential_payout: round.potential_payout(),
            progress_percent: round.progress_percent(),
            detail,
        };
        debug!(round = event.round, action = %event.action, phase = %event.phase, "action applied");
        Ok(event)
    }

    /// Aggregate figures over every finished round so far.
    pub async fn report(&self) -> Result<SessionReport> {
        let rounds = self.ledger.all_rounds().await?;
        Ok(SessionReport::from_rounds(&rounds))
    }

    /// Consumes the session and returns every finished round.
    pub async fn into_summaries(self) -> Result<Vec<RoundSummary>> {
        self.ledger.all_rounds().await
    }

    fn live_round(&self) -> Result<&RoundState> {
        self.engine.round().ok_or(GameError::InvalidState {
            operation: "read the round",
            phase: Phase::NotStarted,
        })
    }

    fn summarize(&self, round: &RoundState, result: RoundResult) -> RoundSummary {
        let payout = match result {
            RoundResult::CashedOut | RoundResult::Completed => round.potential_payout(),
            RoundResult::Lost | RoundResult::Abandoned => Money::ZERO,
        };
        RoundSummary {
            round: self.rounds_started,
            bet: round.bet(),
            level: round.level(),
            result,
            multiplier: round.multiplier(),
            payout,
        }
    }

    async fn record_end(&self, result: RoundResult) -> Result<()> {
        let summary = self.summarize(self.live_round()?, result);
        self.ledger.record(summary).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::side::Side;
    use crate::infrastructure::in_memory::InMemoryRoundLedger;
    use crate::infrastructure::random::ScriptedRandom;
    use rust_decimal_macros::dec;

    fn rigged_session() -> GameSession<ScriptedRandom> {
        GameSession::new(
            GameEngine::with_random(ScriptedRandom::constant(0.0)),
            Box::new(InMemoryRoundLedger::new()),
        )
    }

    fn start(amount: Decimal) -> PlayerAction {
        PlayerAction::Start(Bet::new(amount).unwrap())
    }

    #[tokio::test]
    async fn test_cash_out_is_recorded() {
        let mut session = rigged_session();
        session.apply(start(dec!(10))).await.unwrap();
        let event = session.apply(PlayerAction::Choose(Side::Right)).await.unwrap();
        assert_eq!(event.potential_payout, Money::new(dec!(14)));
        assert_eq!(event.phase, Phase::Resolved);

        let event = session.apply(PlayerAction::CashOut).await.unwrap();
        assert_eq!(event.phase, Phase::Ended);

        let rounds = session.into_summaries().await.unwrap();
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].result, RoundResult::CashedOut);
        assert_eq!(rounds[0].payout, Money::new(dec!(14)));
    }

    #[tokio::test]
    async fn test_loss_is_recorded_with_zero_payout() {
        let mut session = rigged_session();
        session.apply(start(dec!(50))).await.unwrap();
        session.apply(PlayerAction::Choose(Side::Left)).await.unwrap();
        session.apply(PlayerAction::Continue).await.unwrap();
        let event = session.apply(PlayerAction::Choose(Side::Right)).await.unwrap();

        assert!(matches!(
            event.detail,
            EventDetail::Choice(Outcome::Unsafe { .. })
        ));
        let report = session.report().await.unwrap();
        assert_eq!(report.losses, 1);
        assert_eq!(report.net, Money::new(dec!(-50)));
    }

    #[tokio::test]
    async fn test_rejected_action_records_nothing() {
        let mut session = rigged_session();
        session.apply(start(dec!(10))).await.unwrap();

        let result = session.apply(PlayerAction::CashOut).await;
        assert!(matches!(result, Err(GameError::InvalidState { .. })));
        assert!(session.into_summaries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_new_bet_abandons_active_round() {
        let mut session = rigged_session();
        session.apply(start(dec!(10))).await.unwrap();
        session.apply(PlayerAction::Choose(Side::Left)).await.unwrap();
        let event = session.apply(start(dec!(20))).await.unwrap();

        assert_eq!(event.round, 2);
        assert_eq!(event.level, 1);
        let rounds = session.into_summaries().await.unwrap();
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].round, 1);
        assert_eq!(rounds[0].result, RoundResult::Abandoned);
    }

    struct FailingLedger;

    #[async_trait::async_trait]
    impl crate::domain::ports::RoundLedger for FailingLedger {
        async fn record(&self, _summary: RoundSummary) -> Result<()> {
            Err(GameError::IoError(std::io::Error::other("ledger down")))
        }

        async fn all_rounds(&self) -> Result<Vec<RoundSummary>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_round_count_survives_ledger_failure() {
        let mut session = GameSession::new(
            GameEngine::with_random(ScriptedRandom::constant(0.0)),
            Box::new(FailingLedger),
        );
        session.apply(start(dec!(10))).await.unwrap();

        let result = session.apply(start(dec!(20))).await;
        assert!(matches!(result, Err(GameError::IoError(_))));
        assert_eq!(session.rounds_started(), 2);
        let round = session.engine().round().unwrap();
        assert_eq!(round.bet().value(), dec!(20));

        let event = session.apply(PlayerAction::Choose(Side::Left)).await.unwrap();
        assert_eq!(event.round, 2);
    }

    #[tokio::test]
    async fn test_completion_is_recorded() {
        let mut session = rigged_session();
        session.apply(start(dec!(10))).await.unwrap();
        for _ in 0..12 {
            session.apply(PlayerAction::Choose(Side::Left)).await.unwrap();
            session.apply(PlayerAction::Continue).await.unwrap();
        }

        let report = session.report().await.unwrap();
        assert_eq!(report.wins, 1);
        assert_eq!(report.paid_out, Money::new(dec!(100)));
        assert_eq!(report.best_multiplier, Some(dec!(10.0)));
    }
}
