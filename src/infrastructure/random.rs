use crate::domain::ports::RandomSource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::collections::VecDeque;

/// Adapts any `rand` generator to the engine's `RandomSource` port.
#[derive(Debug, Clone)]
pub struct RngSource<R> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> RandomSource for RngSource<R> {
    fn next_unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }
}

/// Reproducible source: the same seed always plays out the same rounds.
pub type SeededRandom = RngSource<Pcg32>;

/// Entropy-seeded source for normal play.
pub type SystemRandom = RngSource<StdRng>;

impl SeededRandom {
    pub fn seeded(seed: u64) -> Self {
        Self::new(Pcg32::seed_from_u64(seed))
    }
}

impl SystemRandom {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

/// Replays a fixed list of draws, then repeats `fallback` forever.
///
/// Used to force specific panels and survival checks.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    draws: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRandom {
    pub fn new(draws: impl IntoIterator<Item = f64>, fallback: f64) -> Self {
        Self {
            draws: draws.into_iter().map(clamp_unit).collect(),
            fallback: clamp_unit(fallback),
        }
    }

    /// Always returns the same draw.
    pub fn constant(draw: f64) -> Self {
        Self::new([], draw)
    }

    pub fn remaining(&self) -> usize {
        self.draws.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

// Keeps scripted draws inside [0, 1).
fn clamp_unit(draw: f64) -> f64 {
    if draw.is_nan() {
        0.0
    } else {
        draw.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
