//! Phases of a duel and the transitions between them.

use super::console::{Event, Prompt};
use super::{Duel, DuelError};
use crate::dice::FACES;
use crate::protocol::{
    first_mover, modular_sum, Decision, Player, Purpose, Seating, Verdict, COIN,
};
use tracing::info;

/// Dice held by each side. The two positions always differ.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub first: Player,
    pub computer: usize,
    pub user: usize,
}

impl Assignment {
    pub fn new(first: Player, computer: usize, user: usize) -> Result<Self, DuelError> {
        if computer == user {
            return Err(DuelError::SharedDie { position: computer });
        }
        Ok(Self {
            first,
            computer,
            user,
        })
    }

    /// Pool position of the die held by `player`
    pub fn die_of(&self, player: Player) -> usize {
        match player {
            Player::Computer => self.computer,
            Player::User => self.user,
        }
    }
}

/// Where the duel currently stands
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    TurnDetermination,
    DiceSelection {
        first: Player,
    },
    ComputerThrow {
        dice: Assignment,
    },
    UserThrow {
        dice: Assignment,
        computer_face: i64,
    },
    Outcome {
        computer_face: i64,
        user_face: i64,
    },
}

/// Result of advancing a phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Next(Phase),
    Done(Verdict),
    Exit,
}

macro_rules! or_exit {
    ($choice:expr) => {
        match $choice {
            Some(value) => value,
            None => return Ok(Transition::Exit),
        }
    };
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::TurnDetermination => "turn-determination",
            Phase::DiceSelection { .. } => "dice-selection",
            Phase::ComputerThrow { .. } => "computer-throw",
            Phase::UserThrow { .. } => "user-throw",
            Phase::Outcome { .. } => "outcome",
        }
    }

    /// Run this phase to completion and say what comes next
    pub(super) fn advance(self, duel: &mut Duel<'_>) -> Result<Transition, DuelError> {
        match self {
            Phase::TurnDetermination => {
                let round = or_exit!(duel.fair_round(Purpose::TurnOrder, COIN, Prompt::GuessTurn)?);
                let first = first_mover(&round.opening, round.contribution)?;
                duel.record(round, Decision::FirstMove(first));
                duel.console.notify(&Event::FirstMove(first))?;
                info!(%first, "turn order decided");
                Ok(Transition::Next(Phase::DiceSelection { first }))
            }

            Phase::DiceSelection { first } => {
                let pool = duel.pool;
                let (computer, user) = match first {
                    Player::User => {
                        let user = or_exit!(duel.pick_die(pool.all())?);
                        let computer = duel.draw_die(pool.excluding(user))?;
                        (computer, user)
                    }
                    Player::Computer => {
                        let computer = duel.draw_die(pool.all())?;
                        let user = or_exit!(duel.pick_die(pool.excluding(computer))?);
                        (computer, user)
                    }
                };
                let dice = Assignment::new(first, computer, user)?;
                duel.transcript.seating = Some(Seating { computer, user });
                info!(computer, user, "dice assigned");
                Ok(Transition::Next(Phase::ComputerThrow { dice }))
            }

            Phase::ComputerThrow { dice } => {
                let computer_face = or_exit!(throw(duel, Player::Computer, &dice)?);
                Ok(Transition::Next(Phase::UserThrow {
                    dice,
                    computer_face,
                }))
            }

            Phase::UserThrow {
                dice,
                computer_face,
            } => {
                let user_face = or_exit!(throw(duel, Player::User, &dice)?);
                Ok(Transition::Next(Phase::Outcome {
                    computer_face,
                    user_face,
                }))
            }

            Phase::Outcome {
                computer_face,
                user_face,
            } => {
                let verdict = Verdict::new(computer_face, user_face, duel.config.win_rule);
                duel.console.notify(&Event::Finished(verdict))?;
                duel.transcript.verdict = Some(verdict);
                info!(outcome = %verdict.outcome, computer_face, user_face, "duel decided");
                Ok(Transition::Done(verdict))
            }
        }
    }
}

/// One throw: a fair index in `[0, 6)` selecting a face of the player's die
fn throw(duel: &mut Duel<'_>, player: Player, dice: &Assignment) -> Result<Option<i64>, DuelError> {
    let modulus = FACES as u32;
    let purpose = Purpose::Throw(player);
    let die = *duel
        .pool
        .get(dice.die_of(player))
        .ok_or(DuelError::NoDieAvailable)?;

    let Some(round) = duel.fair_round(purpose, modulus, Prompt::AddModulo(modulus))? else {
        return Ok(None);
    };
    let index = modular_sum(&round.opening, round.contribution, modulus)?;
    // modular_sum keeps index below FACES
    let face = die.faces()[index as usize];

    duel.console.notify(&Event::Sum {
        purpose,
        committed: round.opening.value,
        contribution: round.contribution,
        modulus,
        result: index,
    })?;
    duel.console.notify(&Event::Throw { player, face })?;
    duel.record(round, Decision::Face { index, value: face });
    Ok(Some(face))
}
