use super::outcome::RoundSummary;
use crate::error::Result;
use async_trait::async_trait;

/// Source of uniform draws in `[0, 1)`.
///
/// The engine's only external capability. Swapping the source is how tests force
/// outcomes and how runs are made reproducible.
pub trait RandomSource: Send {
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for Box<dyn RandomSource> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Sink for rounds once they have ended.
#[async_trait]
pub trait RoundLedger: Send + Sync {
    async fn record(&self, summary: RoundSummary) -> Result<()>;
    async fn all_rounds(&self) -> Result<Vec<RoundSummary>>;
}

pub type RandomSourceBox = Box<dyn RandomSource>;
pub type RoundLedgerBox = Box<dyn RoundLedger>;
pub type RoundLedgerFactory = Box<dyn Fn() -> RoundLedgerBox + Send + Sync>;
