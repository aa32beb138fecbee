//! Domain layer: the round model, payout tables and the ports the engine depends on.

pub mod action;
pub mod money;
pub mod outcome;
pub mod ports;
pub mod round;
pub mod schedule;
pub mod side;
