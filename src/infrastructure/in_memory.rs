use crate::domain::outcome::RoundSummary;
use crate::domain::ports::RoundLedger;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger of finished rounds.
///
/// Lives for one session only; nothing is written to disk.
#[derive(Default, Clone)]
pub struct InMemoryRoundLedger {
    rounds: Arc<RwLock<Vec<RoundSummary>>>,
}

impl InMemoryRoundLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoundLedger for InMemoryRoundLedger {
    async fn record(&self, summary: RoundSummary) -> Result<()> {
        let mut rounds = self.rounds.write().await;
        rounds.push(summary);
        Ok(())
    }

    async fn all_rounds(&self) -> Result<Vec<RoundSummary>> {
        let rounds = self.rounds.read().await;
        Ok(rounds.clone())
    }
}
