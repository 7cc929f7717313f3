//! Random draws for the monthly transition.
//!
//! Everything stochastic in the colony goes through [`UniformSource`], so a
//! driver can swap the ChaCha stream for a scripted sequence of draws.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniformly distributed reals.
pub trait UniformSource {
    /// Draws a value in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

impl<T: UniformSource + ?Sized> UniformSource for &mut T {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        (**self).uniform(low, high)
    }
}

#[derive(Clone, Debug)]
pub struct ColonyRng {
    inner: ChaCha8Rng,
    seed: Option<u64>,
}

impl ColonyRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: ChaCha8Rng::from_entropy(),
            seed: None,
        }
    }

    /// Seeded when a seed is configured, OS entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl UniformSource for ColonyRng {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        // Same shape as `random.uniform`: a degenerate range yields `low`.
        let fraction: f64 = self.inner.gen();
        low + (high - low) * fraction
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted.
///
/// The requested range is ignored: each call returns the next scripted value
/// as-is. An empty script returns the lower bound.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDraws {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedDraws {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            cursor: 0,
        }
    }

    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }

    /// Number of draws handed out so far.
    pub fn draws_taken(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedDraws {
    fn uniform(&mut self, low: f64, _high: f64) -> f64 {
        if self.values.is_empty() {
            return low;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
