//! Application layer: the round state machine and the session that drives it.
//!
//! `GameEngine` holds the decision logic and is fully synchronous. `GameSession`
//! layers round bookkeeping on top and records finished rounds through the
//! async `RoundLedger` port.

pub mod engine;
pub mod session;
