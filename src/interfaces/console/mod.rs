//! Line-based console front end.
//!
//! Reads one command per line, forwards it to a `GameSession` and prints the
//! result. The reveal delay lives here: the engine has already resolved the
//! outcome by the time the console pauses.

use crate::application::session::{EventDetail, GameEvent, GameSession};
use crate::domain::action::PlayerAction;
use crate::domain::money::Bet;
use crate::domain::outcome::{LevelAdvance, Outcome, SessionReport};
use crate::domain::ports::RandomSource;
use crate::domain::schedule::MAX_LEVEL;
use crate::domain::side::Side;
use crate::error::{GameError, Result};
use std::io::Write;
use std::str::FromStr;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

pub const HELP: &str = "Commands: bet <amount>, left (l), right (r), cash, continue (c), status, help, quit";

#[derive(Debug, PartialEq, Clone)]
pub enum ConsoleCommand {
    Bet(String),
    Pick(Side),
    CashOut,
    Continue,
    Status,
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = GameError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or("").to_ascii_lowercase();
        let rest = words.collect::<Vec<_>>().join(" ");

        match verb.as_str() {
            "bet" | "start" => Ok(ConsoleCommand::Bet(rest)),
            "left" | "l" => Ok(ConsoleCommand::Pick(Side::Left)),
            "right" | "r" => Ok(ConsoleCommand::Pick(Side::Right)),
            "cash" | "cashout" => Ok(ConsoleCommand::CashOut),
            "continue" | "c" => Ok(ConsoleCommand::Continue),
            "status" | "s" => Ok(ConsoleCommand::Status),
            "help" | "?" => Ok(ConsoleCommand::Help),
            "quit" | "q" | "exit" => Ok(ConsoleCommand::Quit),
            "" => Err(GameError::ParseError("empty command".to_string())),
            other => Err(GameError::ParseError(format!("unknown command '{other}'"))),
        }
    }
}

/// Interactive game loop over an async line source.
pub struct Console<R: RandomSource, I, O> {
    session: GameSession<R>,
    input: Lines<I>,
    output: O,
    reveal_delay: Duration,
}

impl<R, I, O> Console<R, I, O>
where
    R: RandomSource,
    I: AsyncBufRead + Unpin,
    O: Write,
{
    pub fn new(session: GameSession<R>, input: I, output: O, reveal_delay: Duration) -> Self {
        Self {
            session,
            input: input.lines(),
            output,
            reveal_delay,
        }
    }

    /// Runs until `quit` or end of input, then returns the session totals.
    pub async fn run(mut self) -> Result<SessionReport> {
        writeln!(self.output, "Glass Bridge - place a bet to start.")?;
        writeln!(self.output, "{HELP}")?;

        while let Some(line) = self.input.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let command = match line.parse::<ConsoleCommand>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.output, "{e}. {HELP}")?;
                    continue;
                }
            };
            debug!(?command, "console command");

            if command == ConsoleCommand::Quit {
                break;
            }
            self.handle(command).await?;
        }

        let report = self.session.report().await?;
        writeln!(
            self.output,
            "Session over: {} rounds, {} won, {} lost, net {}",
            report.rounds, report.wins, report.losses, report.net
        )?;
        self.output.flush()?;
        Ok(report)
    }

    async fn handle(&mut self, command: ConsoleCommand) -> Result<()> {
        let action = match command {
            ConsoleCommand::Bet(amount) => match amount.parse::<Bet>() {
                Ok(bet) => PlayerAction::Start(bet),
                Err(_) => {
                    writeln!(self.output, "Please enter a valid bet amount")?;
                    return Ok(());
                }
            },
            ConsoleCommand::Pick(side) => PlayerAction::Choose(side),
            ConsoleCommand::CashOut => PlayerAction::CashOut,
            ConsoleCommand::Continue => PlayerAction::Continue,
            ConsoleCommand::Status => return self.print_status(),
            ConsoleCommand::Help => {
                writeln!(self.output, "{HELP}")?;
                return Ok(());
            }
            ConsoleCommand::Quit => return Ok(()),
        };

        match self.session.apply(action).await {
            Ok(event) => self.render(&event).await,
            Err(GameError::InvalidState { .. }) => {
                writeln!(self.output, "That move is not available right now.")?;
                self.print_available_moves()
            }
            Err(e) if e.is_user_facing() => {
                writeln!(self.output, "{e}")?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    async fn render(&mut self, event: &GameEvent) -> Result<()> {
        match event.detail {
            EventDetail::Started { bet } => {
                writeln!(self.output, "Bet placed: {bet}")?;
                self.print_level_intro(event.level)?;
                self.print_status()?;
            }
            EventDetail::Choice(outcome) => {
                writeln!(self.output, "You step onto the {} panel...", outcome.side())?;
                self.output.flush()?;
                if !self.reveal_delay.is_zero() {
                    tokio::time::sleep(self.reveal_delay).await;
                }
                match outcome {
                    Outcome::Safe { .. } => {
                        writeln!(self.output, "Safe! You made it across.")?;
                        self.print_status()?;
                        writeln!(self.output, "Cash out or continue?")?;
                    }
                    Outcome::Unsafe { lost_amount, .. } => {
                        writeln!(self.output, "The glass breaks beneath you!")?;
                        writeln!(self.output, "Game over. You lost {lost_amount}.")?;
                    }
                }
            }
            EventDetail::Payout(result) => {
                writeln!(self.output, "You cashed out {}!", result.payout)?;
            }
            EventDetail::Advance(LevelAdvance::Next { level, .. }) => {
                self.print_level_intro(level)?;
                self.print_status()?;
            }
            EventDetail::Advance(LevelAdvance::Completed { payout }) => {
                writeln!(self.output, "You crossed the whole bridge! You won {payout}!")?;
            }
        }
        self.output.flush()?;
        Ok(())
    }

    fn print_level_intro(&mut self, level: u8) -> Result<()> {
        if level == 1 {
            writeln!(self.output, "Level 1 - Both paths are safe! Choose wisely...")?;
        } else {
            writeln!(self.output, "Level {level} - Choose your path carefully...")?;
        }
        Ok(())
    }

    fn print_available_moves(&mut self) -> Result<()> {
        let engine = self.session.engine();
        let mut moves = vec!["bet <amount>"];
        if engine.can_choose() {
            moves.push("left");
            moves.push("right");
        }
        if engine.can_cash_out() {
            moves.push("cash");
        }
        if engine.can_continue() {
            moves.push("continue");
        }
        writeln!(self.output, "You can: {}", moves.join(", "))?;
        Ok(())
    }

    fn print_status(&mut self) -> Result<()> {
        match self.session.engine().round() {
            Some(round) => writeln!(
                self.output,
                "Bet: {} | Level: {}/{} | Multiplier: {:.2}x | Potential payout: {}",
                round.bet(),
                round.level(),
                MAX_LEVEL,
                round.multiplier(),
                round.potential_payout()
            )?,
            None => writeln!(self.output, "No round in progress. Place a bet to start.")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::engine::GameEngine;
    use crate::infrastructure::in_memory::InMemoryRoundLedger;
    use crate::infrastructure::random::ScriptedRandom;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "bet 10".parse::<ConsoleCommand>().unwrap(),
            ConsoleCommand::Bet("10".to_string())
        );
        assert_eq!(
            "L".parse::<ConsoleCommand>().unwrap(),
            ConsoleCommand::Pick(Side::Left)
        );
        assert_eq!(
            "right".parse::<ConsoleCommand>().unwrap(),
            ConsoleCommand::Pick(Side::Right)
        );
        assert_eq!("cash".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::CashOut);
        assert_eq!("c".parse::<ConsoleCommand>().unwrap(), ConsoleCommand::Continue);
        assert!(matches!(
            "fly".parse::<ConsoleCommand>(),
            Err(GameError::ParseError(_))
        ));
    }

    async fn play(script: &str) -> (String, SessionReport) {
        let session = GameSession::new(
            GameEngine::with_random(ScriptedRandom::constant(0.0)),
            Box::new(InMemoryRoundLedger::new()),
        );
        let mut output = Vec::new();
        let report = Console::new(session, script.as_bytes(), &mut output, Duration::ZERO)
            .run()
            .await
            .unwrap();
        (String::from_utf8(output).unwrap(), report)
    }

    #[tokio::test]
    async fn test_console_cash_out_flow() {
        let (output, report) = play("bet 10\nright\ncash\nquit\n").await;

        assert!(output.contains("Level 1 - Both paths are safe!"));
        assert!(output.contains("Safe! You made it across."));
        assert!(output.contains("You cashed out 14.00!"));
        assert_eq!(report.paid_out, Money::new(dec!(14)));
    }

    #[tokio::test]
    async fn test_console_rejects_bad_bet_and_early_cash_out() {
        let (output, report) = play("bet -5\nbet 10\ncash\n").await;

        assert!(output.contains("Please enter a valid bet amount"));
        assert!(output.contains("That move is not available right now."));
        assert!(output.contains("You can: bet <amount>, left, right\n"));
        assert_eq!(report.rounds, 0);
    }

    #[tokio::test]
    async fn test_console_lists_moves_after_a_pick() {
        let (output, _) = play("bet 10
left
right
").await;

        assert!(output.contains("You can: bet <amount>, cash, continue\n"));
    }

    #[tokio::test]
    async fn test_console_lists_moves_before_any_bet() {
        let (output, _) = play("left
").await;

        assert!(output.contains("You can: bet <amount>\n"));
    }

    #[tokio::test]
    async fn test_console_loss() {
        let (output, report) = play("bet 50\nleft\ncontinue\nright\n").await;

        assert!(output.contains("Level 2 - Choose your path carefully..."));
        assert!(output.contains("The glass breaks beneath you!"));
        assert!(output.contains("You lost 50.00."));
        assert_eq!(report.losses, 1);
    }
}
