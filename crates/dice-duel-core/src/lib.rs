//! Dice Duel Core Library
//!
//! This crate provides the dice pool, the pairwise win-probability engine,
//! the commit-reveal fair-value protocol and the state machine running a
//! verifiably fair duel between a user and the computer.

pub mod crypto;
pub mod dice;
pub mod duel;
pub mod protocol;

pub use crypto::{Commitment, Digest, Entropy, HmacSha256, KeyedHash, Opening, OsEntropy, SecretKey};
pub use dice::{DicePool, Die, ProbabilityMatrix, ValidationError};
pub use duel::{Conclusion, Console, Duel, DuelConfig, DuelError, Event, Prompt, Reply};
pub use protocol::{DuelId, Outcome, Player, Transcript, Verdict, WinRule};
