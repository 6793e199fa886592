//! Core data types for generation: size hints, seeds and the randomness source.

use crate::error::{FalsifyError, Result};
use rand::RngCore;
use std::fmt;

/// Size hint for controlling the breadth of generated values.
///
/// A size scales things like collection length or the width of the
/// oversampled integer region. It is a hint, never a bound on the values
/// a domain may produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Size(pub usize);

impl Size {
    /// Create a new size value.
    pub fn new(value: usize) -> Self {
        Size(value)
    }

    /// Get the inner size value.
    pub fn get(&self) -> usize {
        self.0
    }

    /// Size below which collections are drawn with their full length range.
    pub fn cutoff(&self) -> usize {
        ((self.0 as f64).sqrt() as usize).max(10)
    }
}

impl From<usize> for Size {
    fn from(value: usize) -> Self {
        Size(value)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Size({})", self.0)
    }
}

/// Splittable random seed for deterministic generation.
///
/// Seeds can be split to create independent random streams,
/// so every run is reproducible from the textual seed it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Create a new seed from a single value.
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Parse the textual form of a seed.
    ///
    /// Accepts any decimal `u64` as well as negative `i64` values, which are
    /// reinterpreted bit for bit.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let value = trimmed
            .parse::<u64>()
            .or_else(|_| trimmed.parse::<i64>().map(|v| v as u64))
            .map_err(|_| FalsifyError::InvalidSeed {
                seed: text.to_string(),
            })?;
        Ok(Seed::from_u64(value))
    }

    /// Split a seed into two independent seeds.
    /// Uses SplitMix64 splitting strategy for independence.
    pub fn split(self) -> (Self, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        let new_gamma = mix_gamma(output);

        (Seed(new_state, gamma), Seed(output, new_gamma))
    }

    /// Generate the next random value and advance the seed.
    pub fn next_u64(self) -> (u64, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        (output, Seed(new_state, gamma))
    }

    /// Generate a fresh seed value from thread-local entropy.
    pub fn random_value() -> u64 {
        use rand::Rng;
        rand::thread_rng().gen()
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, {})", self.0, self.1)
    }
}

/// Mutable source of randomness owned by exactly one property run.
///
/// Wraps a [`Seed`] and advances it on every draw. Implements
/// [`RngCore`] so generators can use the `rand::Rng` helpers.
#[derive(Debug, Clone)]
pub struct Random {
    seed: Seed,
}

impl Random {
    /// Create a source from a seed.
    pub fn new(seed: Seed) -> Self {
        Random { seed }
    }

    /// Create a source from a plain `u64`.
    pub fn from_u64(value: u64) -> Self {
        Random::new(Seed::from_u64(value))
    }

    /// Create a source from the textual seed of a configuration.
    pub fn from_seed_str(text: &str) -> Result<Self> {
        Seed::parse(text).map(Random::new)
    }

    /// Fork an independent source, advancing this one.
    pub fn split(&mut self) -> Random {
        let (left, right) = self.seed.split();
        self.seed = left;
        Random::new(right)
    }
}

impl RngCore for Random {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let (value, next) = self.seed.next_u64();
        self.seed = next;
        value
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// SplitMix64 mixing function for high-quality output.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Generate a good gamma value for SplitMix64 splitting.
fn mix_gamma(mut z: u64) -> u64 {
    z = splitmix64_mix(z);
    // Gamma must be odd for maximal period
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}
