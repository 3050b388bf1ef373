//! Boundary between the duel and whoever plays the user's side.

use crate::crypto::{Digest, SecretKey};
use crate::dice::{DicePool, Die, ProbabilityMatrix};
use crate::protocol::{DuelId, Player, Purpose, Verdict};
use std::io;

/// What the duel is asking for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Prompt {
    /// Guess the committed turn-order bit
    GuessTurn,
    /// Pick a die from the offered ones
    ChooseDie,
    /// Contribute a summand in `[0, m)`
    AddModulo(u32),
}

/// Answer to a [`Prompt`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Index into the offered options; may be out of range
    Pick(usize),
    /// Show the probability table, then ask again
    Help,
    /// Leave the duel now
    Exit,
    /// Input that is neither an index nor a reserved token
    Unrecognized(String),
}

/// Status emitted as the duel progresses
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Started {
        duel_id: DuelId,
        dice: usize,
    },
    /// A value was sealed; only its digest is shown
    Committed {
        purpose: Purpose,
        bound: u32,
        digest: Digest,
    },
    /// The sealed value and its key, disclosed once
    Revealed {
        purpose: Purpose,
        value: u32,
        key: SecretKey,
    },
    FirstMove(Player),
    DieChosen {
        player: Player,
        position: usize,
        die: Die,
    },
    Sum {
        purpose: Purpose,
        committed: u32,
        contribution: u32,
        modulus: u32,
        result: u32,
    },
    Throw {
        player: Player,
        face: i64,
    },
    /// Input outside the offered set; the same options follow again
    Rejected {
        input: String,
        options: usize,
    },
    Finished(Verdict),
}

/// Interactive side of the duel.
///
/// Implementations can be:
/// - a terminal for a human player
/// - a scripted console for tests
pub trait Console {
    /// Offer `options` and block until the user replies
    fn request_choice(&mut self, prompt: Prompt, options: &[String]) -> io::Result<Reply>;

    /// Render the win probabilities of `pool`
    fn show_probabilities(&mut self, pool: &DicePool, matrix: &ProbabilityMatrix) -> io::Result<()>;

    fn notify(&mut self, event: &Event) -> io::Result<()>;
}
