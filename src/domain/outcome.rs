use super::money::{Bet, Money};
use super::side::Side;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Result of picking a panel.
#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Safe {
        side: Side,
        safe_side: Side,
        level: u8,
        multiplier_after: Decimal,
    },
    Unsafe {
        side: Side,
        safe_side: Side,
        level: u8,
        lost_amount: Money,
    },
}

impl Outcome {
    pub fn is_safe(&self) -> bool {
        matches!(self, Outcome::Safe { .. })
    }

    pub fn side(&self) -> Side {
        match self {
            Outcome::Safe { side, .. } | Outcome::Unsafe { side, .. } => *side,
        }
    }

    pub fn level(&self) -> u8 {
        match self {
            Outcome::Safe { level, .. } | Outcome::Unsafe { level, .. } => *level,
        }
    }
}

/// Result of banking the current multiplier.
#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
pub struct PayoutResult {
    pub payout: Money,
    pub level: u8,
    pub multiplier: Decimal,
}

/// Result of moving past a resolved level.
#[derive(Debug, Serialize, PartialEq, Clone, Copy)]
#[serde(tag = "advance", rename_all = "snake_case")]
pub enum LevelAdvance {
    Next { level: u8, multiplier: Decimal },
    Completed { payout: Money },
}

impl LevelAdvance {
    pub fn is_completed(&self) -> bool {
        matches!(self, LevelAdvance::Completed { .. })
    }
}

/// How a round ended.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum RoundResult {
    Lost,
    CashedOut,
    Completed,
    /// Replaced by a new bet before it ended.
    Abandoned,
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoundResult::Lost => "lost",
            RoundResult::CashedOut => "cashed_out",
            RoundResult::Completed => "completed",
            RoundResult::Abandoned => "abandoned",
        };
        f.write_str(name)
    }
}

/// Record of one finished round.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct RoundSummary {
    pub round: u32,
    pub bet: Bet,
    pub level: u8,
    pub result: RoundResult,
    pub multiplier: Decimal,
    pub payout: Money,
}

/// Totals over every round played in a session.
#[derive(Debug, Serialize, PartialEq, Clone, Default)]
pub struct SessionReport {
    pub rounds: usize,
    pub wins: usize,
    pub losses: usize,
    pub wagered: Money,
    pub paid_out: Money,
    pub net: Money,
    pub best_multiplier: Option<Decimal>,
}

impl SessionReport {
    pub fn from_rounds(rounds: &[RoundSummary]) -> Self {
        let mut report = SessionReport {
            rounds: rounds.len(),
            ..Default::default()
        };

        for summary in rounds {
            report.wagered += Money::from(summary.bet);
            report.paid_out += summary.payout;
            match summary.result {
                RoundResult::CashedOut | RoundResult::Completed => {
                    report.wins += 1;
                    report.best_multiplier = Some(match report.best_multiplier {
                        Some(best) => best.max(summary.multiplier),
                        None => summary.multiplier,
                    });
                }
                RoundResult::Lost => report.losses += 1,
                RoundResult::Abandoned => {}
            }
        }

        report.net = report.paid_out - report.wagered;
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn summary(round: u32, bet: Decimal, result: RoundResult, multiplier: Decimal) -> RoundSummary {
        let bet = Bet::new(bet).unwrap();
        let payout = match result {
            RoundResult::CashedOut | RoundResult::Completed => bet * multiplier,
            _ => Money::ZERO,
        };
        RoundSummary {
            round,
            bet,
            level: 1,
            result,
            multiplier,
            payout,
        }
    }

    #[test]
    fn test_session_report_aggregation() {
        let rounds = vec![
            summary(1, dec!(10), RoundResult::CashedOut, dec!(1.4)),
            summary(2, dec!(50), RoundResult::Lost, dec!(3.2)),
            summary(3, dec!(10), RoundResult::Completed, dec!(10.0)),
        ];

        let report = SessionReport::from_rounds(&rounds);
        assert_eq!(report.rounds, 3);
        assert_eq!(report.wins, 2);
        assert_eq!(report.losses, 1);
        assert_eq!(report.wagered, Money::new(dec!(70)));
        assert_eq!(report.paid_out, Money::new(dec!(114)));
        assert_eq!(report.net, Money::new(dec!(44)));
        assert_eq!(report.best_multiplier, Some(dec!(10.0)));
    }

    #[test]
    fn test_empty_session_report() {
        let report = SessionReport::from_rounds(&[]);
        assert_eq!(report.rounds, 0);
        assert_eq!(report.net, Money::ZERO);
        assert_eq!(report.best_multiplier, None);
    }

    #[test]
    fn test_outcome_serialization_is_tagged() {
        let outcome = Outcome::Unsafe {
            side: Side::Right,
            safe_side: Side::Left,
            level: 5,
            lost_amount: Money::new(dec!(50)),
        };
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json["outcome"], "unsafe");
        assert_eq!(json["lost_amount"], "50.00");
        assert!(!outcome.is_safe());
    }
}
