use super::money::Bet;
use super::side::Side;
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Start,
    Choose,
    #[serde(alias = "cash_out", alias = "cash")]
    CashOut,
    Continue,
}

/// One raw row of an action script.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ActionRecord {
    pub action: ActionType,
    #[serde(default)]
    pub value: Option<String>,
}

/// A validated player input, ready for the engine.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PlayerAction {
    Start(Bet),
    Choose(Side),
    CashOut,
    Continue,
}

impl PlayerAction {
    pub fn kind(&self) -> ActionType {
        match self {
            PlayerAction::Start(_) => ActionType::Start,
            PlayerAction::Choose(_) => ActionType::Choose,
            PlayerAction::CashOut => ActionType::CashOut,
            PlayerAction::Continue => ActionType::Continue,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActionType::Start => "start",
            ActionType::Choose => "choose",
            ActionType::CashOut => "cashout",
            ActionType::Continue => "continue",
        };
        f.write_str(name)
    }
}

impl TryFrom<ActionRecord> for PlayerAction {
    type Error = GameError;

    fn try_from(record: ActionRecord) -> Result<Self, Self::Error> {
        let value = record.value.as_deref().unwrap_or("");
        match record.action {
            ActionType::Start => Ok(PlayerAction::Start(value.parse()?)),
            ActionType::Choose => Ok(PlayerAction::Choose(value.parse()?)),
            ActionType::CashOut => Ok(PlayerAction::CashOut),
            ActionType::Continue => Ok(PlayerAction::Continue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn read_one(csv: &str) -> ActionRecord {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(csv.as_bytes());
        let mut iter = reader.deserialize();
        iter.next()
            .unwrap()
            .expect("Failed to deserialize action")
    }

    #[test]
    fn test_start_deserialization() {
        let record = read_one("action, value\nstart, 10.5");
        assert_eq!(record.action, ActionType::Start);

        let action = PlayerAction::try_from(record).unwrap();
        assert_eq!(action, PlayerAction::Start(Bet::new(dec!(10.5)).unwrap()));
    }

    #[test]
    fn test_choose_deserialization() {
        let record = read_one("action, value\nchoose, right");
        let action = PlayerAction::try_from(record).unwrap();
        assert_eq!(action, PlayerAction::Choose(Side::Right));
    }

    #[test]
    fn test_cashout_without_value() {
        // Cash-outs carry no value
        let record = read_one("action, value\ncashout, ");
        assert_eq!(record.action, ActionType::CashOut);
        assert_eq!(PlayerAction::try_from(record).unwrap(), PlayerAction::CashOut);
    }

    #[test]
    fn test_start_with_bad_bet_is_invalid_bet() {
        let record = read_one("action, value\nstart, -5");
        assert!(matches!(
            PlayerAction::try_from(record),
            Err(GameError::InvalidBet(_))
        ));
    }

    #[test]
    fn test_choose_without_side_is_parse_error() {
        let record = read_one("action, value\nchoose,");
        assert!(matches!(
            PlayerAction::try_from(record),
            Err(GameError::ParseError(_))
        ));
    }
}
