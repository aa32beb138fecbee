//! Adapters for the domain ports: random sources and the round ledger.

pub mod in_memory;
pub mod random;
