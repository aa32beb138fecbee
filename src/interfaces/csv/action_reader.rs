use crate::domain::action::{ActionRecord, PlayerAction};
use crate::error::{GameError, Result};
use std::io::Read;

/// Reads player actions from a CSV script.
///
/// Expects an `action, value` header. Whitespace is trimmed and rows may omit the
/// value column.
pub struct ActionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ActionReader<R> {
    /// Creates a new `ActionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .comment(Some(b'#'))
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads and validates actions, one per row.
    pub fn actions(self) -> impl Iterator<Item = Result<PlayerAction>> {
        self.reader.into_deserialize().map(|result| {
            let record: ActionRecord = result.map_err(GameError::from)?;
            PlayerAction::try_from(record)
        })
    }
}
