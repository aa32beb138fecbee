//! Fixed payout and risk tables.
//!
//! Both are pure lookups; nothing here holds state.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Number of levels in a full crossing.
pub const MAX_LEVEL: u8 = 12;

/// Multiplier table. Index 0 is the starting multiplier shown on level 1;
/// index `n` is unlocked by surviving level `n`.
pub const MULTIPLIERS: [Decimal; MAX_LEVEL as usize] = [
    dec!(1.2),
    dec!(1.4),
    dec!(1.7),
    dec!(2.1),
    dec!(2.6),
    dec!(3.2),
    dec!(4.0),
    dec!(5.0),
    dec!(6.3),
    dec!(7.8),
    dec!(9.0),
    dec!(10.0),
];

/// Multiplier shown before any level has been played.
pub fn starting_multiplier() -> Decimal {
    MULTIPLIERS[0]
}

/// Multiplier awarded for crossing the given level.
///
/// Clamped to the last entry, so surviving the final level keeps the top multiplier.
pub fn multiplier_after_surviving(level: u8) -> Decimal {
    let index = usize::from(level).min(MULTIPLIERS.len() - 1);
    MULTIPLIERS[index]
}

/// Multiplier paid out when all levels are completed.
pub fn max_multiplier() -> Decimal {
    MULTIPLIERS[MULTIPLIERS.len() - 1]
}

/// Chance that the safe panel actually holds on a level.
pub fn survival_probability(level: u8) -> f64 {
    match level {
        0 | 1 => 1.0,
        2..=4 => 0.70,
        5..=8 => 0.55,
        9..=11 => 0.40,
        _ => 0.30,
    }
}
