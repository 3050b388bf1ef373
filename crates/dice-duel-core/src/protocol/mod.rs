//! Protocol types, fair values and the verification transcript.

mod fair_value;
mod transcript;
mod types;

pub use fair_value::{commit, first_mover, modular_sum, ProtocolError, COIN};
pub use transcript::{Decision, Purpose, Round, Seating, Transcript};
pub use types::{DuelId, Outcome, Player, Verdict, WinRule};
