//! Permille trace sampling.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Error raised for rates outside 0..=1000.
#[derive(Debug, Error)]
#[error("sampling rate {0} is out of range (0..=1000)")]
pub struct InvalidRate(pub u16);

/// Keyed permille sampler.
///
/// The verdict is a pure function of the key: the same key yields the
/// same verdict for the life of the process, so every span of one trace
/// is either fully retained or fully dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sampler {
    rate: u16,
}

impl Sampler {
    /// Retain every trace.
    pub const ALWAYS: Sampler = Sampler { rate: 1000 };

    /// Retain no trace.
    pub const NEVER: Sampler = Sampler { rate: 0 };

    /// Build a sampler retaining `rate` traces out of 1000.
    pub fn new(rate: u16) -> Result<Self, InvalidRate> {
        if rate > 1000 {
            return Err(InvalidRate(rate));
        }
        Ok(Self { rate })
    }

    /// The configured permille rate.
    pub fn rate(&self) -> u16 {
        self.rate
    }

    /// Decide whether the trace identified by `key` is retained.
    pub fn verdict(&self, key: impl Hash) -> bool {
        match self.rate {
            0 => false,
            1000 => true,
            rate => {
                let mut hasher = DefaultHasher::new();
                key.hash(&mut hasher);
                ((hasher.finish() % 1000) as u16) < rate
            }
        }
    }
}
