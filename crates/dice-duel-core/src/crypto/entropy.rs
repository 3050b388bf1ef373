//! Secure random source for commitment material.

use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

/// The secure random source could not deliver bytes
#[derive(Debug, Error)]
#[error("secure random source unavailable: {0}")]
pub struct EntropyError(String);

impl EntropyError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self(reason.into())
    }
}

/// Source of secret keys and committed values.
///
/// Failures are reported, never papered over with a weaker generator.
pub trait Entropy {
    /// Fill `dest` with secure random bytes
    fn try_fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError>;

    /// Uniform integer in `[0, bound)`. `bound` must be non-zero.
    fn below(&mut self, bound: u32) -> Result<u32, EntropyError> {
        // Draws at or above `zone` would over-represent the low residues.
        let zone = u32::MAX - u32::MAX % bound;
        loop {
            let mut bytes = [0u8; 4];
            self.try_fill(&mut bytes)?;
            let draw = u32::from_le_bytes(bytes);
            if draw < zone {
                return Ok(draw % bound);
            }
        }
    }
}

/// Operating system entropy
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl Entropy for OsEntropy {
    fn try_fill(&mut self, dest: &mut [u8]) -> Result<(), EntropyError> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| EntropyError::new(e.to_string()))
    }
}
