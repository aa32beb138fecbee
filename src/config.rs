use crate::domain::ports::RandomSourceBox;
use crate::infrastructure::random::{SeededRandom, SystemRandom};
use std::time::Duration;

/// Pause between a pick and its reveal in the console.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(500);

/// Runtime knobs gathered from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Fixes the random source so a session can be replayed exactly.
    pub seed: Option<u64>,
    pub reveal_delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            reveal_delay: DEFAULT_REVEAL_DELAY,
        }
    }
}

impl GameConfig {
    pub fn random_source(&self) -> RandomSourceBox {
        match self.seed {
            Some(seed) => Box::new(SeededRandom::seeded(seed)),
            None => Box::new(SystemRandom::from_entropy()),
        }
    }
}
