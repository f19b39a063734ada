//! Pluggable randomness for every probabilistic decision in the crate.
//!
//! Transforms and the prompt composer never reach for a global RNG; they take
//! `&mut dyn RandomSource`. Production runs use [`SeededRandom`] (seeded from
//! the OS thread RNG unless a seed is supplied), tests use a fixed seed or
//! [`ForcedRandom`] to drive one branch of a decision deterministically.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource: Send {
    /// Bernoulli draw: `true` with probability `p` (clamped to `[0, 1]`).
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform integer in `low..=high`.
    fn between(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        low + self.pick(high - low + 1)
    }
}

/// Pick one element of a non-empty slice.
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.pick(items.len()))
    }
}

/// Fisher–Yates sample of up to `count` distinct elements, in draw order.
pub fn sample<T: Clone>(rng: &mut dyn RandomSource, items: &[T], count: usize) -> Vec<T> {
    let mut pool: Vec<T> = items.to_vec();
    let take = count.min(pool.len());
    for i in 0..take {
        let j = i + rng.pick(pool.len() - i);
        pool.swap(i, j);
    }
    pool.truncate(take);
    pool
}

/// `StdRng`-backed source. Same seed, same sequence.
pub struct SeededRandom {
    inner: StdRng,
    seed: u64,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Fresh seed from the thread RNG; the seed is kept so a run can be replayed.
    pub fn from_entropy() -> Self {
        Self::from_seed(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn chance(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            return false;
        }
        if p >= 1.0 {
            return true;
        }
        self.inner.random_bool(p)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len <= 1 {
            return 0;
        }
        self.inner.random_range(0..len)
    }
}

/// Returns the same answer to every draw.
///
/// `chance` ignores `p` (except `p <= 0`, which is always `false`) and `pick`
/// always returns `index % len`.
#[derive(Debug, Clone, Copy)]
pub struct ForcedRandom {
    fire: bool,
    index: usize,
}

impl ForcedRandom {
    /// Every Bernoulli draw succeeds; picks the first alternative.
    pub fn always() -> Self {
        Self {
            fire: true,
            index: 0,
        }
    }

    /// Every Bernoulli draw fails; picks the first alternative.
    pub fn never() -> Self {
        Self {
            fire: false,
            index: 0,
        }
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}

impl RandomSource for ForcedRandom {
    fn chance(&mut self, p: f64) -> bool {
        p > 0.0 && self.fire
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 { 0 } else { self.index % len }
    }
}
