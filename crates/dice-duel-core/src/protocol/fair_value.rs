//! Fair random values built on the commit-reveal scheme.
//!
//! The committer draws a value and publishes only its digest. The
//! counterpart then fixes their own contribution, and only afterwards is
//! the commitment opened. Two uses are provided:
//! - a guess of a committed bit, deciding who moves first
//! - the sum of committed value and contribution modulo `m`, which neither
//!   side can bias alone

use super::types::Player;
use crate::crypto::{Commitment, Entropy, EntropyError, KeyedHash, Opening, SecretKey};
use thiserror::Error;
use tracing::debug;

/// Bound of the turn-order commitment
pub const COIN: u32 = 2;

/// Errors from the fair-value protocol
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("cannot commit to a value in an empty range")]
    EmptyRange,

    #[error("contribution {value} is outside [0, {modulus})")]
    ContributionOutOfRange { value: u32, modulus: u32 },

    #[error("guess {guess} is not 0 or 1")]
    GuessOutOfRange { guess: u32 },

    #[error(transparent)]
    Entropy(#[from] EntropyError),
}

/// Draw a uniform value in `[0, bound)` and seal it under a fresh key
pub fn commit<E, K>(bound: u32, entropy: &mut E, mac: &K) -> Result<Commitment, ProtocolError>
where
    E: Entropy + ?Sized,
    K: KeyedHash + ?Sized,
{
    if bound == 0 {
        return Err(ProtocolError::EmptyRange);
    }

    let value = entropy.below(bound)?;
    let mut key = [0u8; 32];
    entropy.try_fill(&mut key)?;

    let commitment = Commitment::seal(bound, value, SecretKey::from_bytes(key), mac);
    debug!(bound, digest = %commitment.digest(), "sealed commitment");
    Ok(commitment)
}

/// Who moves first once the turn-order commitment is open.
///
/// A correct guess of the committed bit gives the first move to the user.
pub fn first_mover(opening: &Opening, guess: u32) -> Result<Player, ProtocolError> {
    if guess >= COIN {
        return Err(ProtocolError::GuessOutOfRange { guess });
    }
    Ok(if guess == opening.value {
        Player::User
    } else {
        Player::Computer
    })
}

/// `(committed + contribution) mod modulus`
pub fn modular_sum(opening: &Opening, contribution: u32, modulus: u32) -> Result<u32, ProtocolError> {
    if modulus == 0 {
        return Err(ProtocolError::EmptyRange);
    }
    if contribution >= modulus {
        return Err(ProtocolError::ContributionOutOfRange {
            value: contribution,
            modulus,
        });
    }
    let sum = u64::from(opening.value) + u64::from(contribution);
    // below modulus, so it fits back into u32
    Ok((sum % u64::from(modulus)) as u32)
}
