//! Dice definitions and win probabilities.

mod pool;
mod probability;

pub use pool::{DicePool, Die, DieSpecError, Selection, ValidationError, FACES, MIN_DICE};
pub use probability::{Cell, Matchup, ProbabilityMatrix, DISPLAY_DIGITS, OUTCOMES};
