use crate::application::session::{EventDetail, GameEvent};
use crate::domain::action::ActionType;
use crate::domain::money::Money;
use crate::domain::outcome::{LevelAdvance, Outcome, RoundSummary};
use crate::domain::round::Phase;
use crate::domain::side::Side;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

/// Flat row written for every applied action.
#[derive(Debug, Serialize, PartialEq)]
pub struct EventRow {
    pub round: u32,
    pub action: ActionType,
    pub level: u8,
    pub phase: Phase,
    pub multiplier: Decimal,
    pub potential_payout: Money,
    pub side: Option<Side>,
    pub safe_side: Option<Side>,
    pub payout: Option<Money>,
    pub lost: Option<Money>,
}

impl From<&GameEvent> for EventRow {
    fn from(event: &GameEvent) -> Self {
        let mut row = EventRow {
            round: event.round,
            action: event.action,
            level: event.level,
            phase: event.phase,
            multiplier: event.multiplier,
            potential_payout: event.potential_payout,
            side: None,
            safe_side: None,
            payout: None,
            lost: None,
        };

        match event.detail {
            EventDetail::Started { .. } | EventDetail::Advance(LevelAdvance::Next { .. }) => {}
            EventDetail::Choice(Outcome::Safe {
                side, safe_side, ..
            }) => {
                row.side = Some(side);
                row.safe_side = Some(safe_side);
            }
            EventDetail::Choice(Outcome::Unsafe {
                side,
                safe_side,
                lost_amount,
                ..
            }) => {
                row.side = Some(side);
                row.safe_side = Some(safe_side);
                row.lost = Some(lost_amount);
            }
            EventDetail::Payout(result) => row.payout = Some(result.payout),
            EventDetail::Advance(LevelAdvance::Completed { payout }) => row.payout = Some(payout),
        }
        row
    }
}

/// Writes game events as CSV rows.
pub struct EventWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> EventWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_event(&mut self, event: &GameEvent) -> Result<()> {
        self.writer.serialize(EventRow::from(event))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes finished rounds as CSV rows.
pub struct SummaryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SummaryWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_rounds(&mut self, rounds: &[RoundSummary]) -> Result<()> {
        for round in rounds {
            self.writer.serialize(round)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
