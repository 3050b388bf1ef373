//! Record of every fair-value round of a duel.
//!
//! A transcript carries everything disclosed during the duel, so a
//! counterpart can recompute each digest, each derived value, the faces
//! shown and the verdict after the fact.

use super::fair_value::{first_mover, modular_sum, COIN};
use super::types::{DuelId, Player, Verdict};
use crate::crypto::{Digest, KeyedHash, Opening, SecretKey};
use crate::dice::{Die, FACES};
use serde::{Deserialize, Serialize};

/// What a round decided
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Purpose {
    TurnOrder,
    Throw(Player),
}

impl Purpose {
    /// Range of the committed value for this kind of round
    pub fn bound(&self) -> u32 {
        match self {
            Purpose::TurnOrder => COIN,
            Purpose::Throw(_) => FACES as u32,
        }
    }
}

/// Derived result of a round
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    FirstMove(Player),
    Face { index: u32, value: i64 },
}

/// One commit, contribute, reveal cycle
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub purpose: Purpose,
    pub bound: u32,
    pub digest: Digest,
    pub value: u32,
    pub key: SecretKey,
    /// The counterpart's guess or summand
    pub contribution: u32,
    pub decision: Decision,
}

impl Round {
    /// The opening disclosed in this round
    pub fn opening(&self) -> Opening {
        Opening {
            value: self.value,
            key: self.key.clone(),
        }
    }

    /// Recompute the digest and the decision from the disclosed values
    pub fn verify<K: KeyedHash + ?Sized>(&self, mac: &K) -> bool {
        if self.bound != self.purpose.bound() || self.value >= self.bound {
            return false;
        }
        let opening = self.opening();
        if !opening.verify(&self.digest, mac) {
            return false;
        }
        match (self.purpose, self.decision) {
            (Purpose::TurnOrder, Decision::FirstMove(player)) => {
                first_mover(&opening, self.contribution).ok() == Some(player)
            }
            (Purpose::Throw(_), Decision::Face { index, .. }) => {
                modular_sum(&opening, self.contribution, self.bound).ok() == Some(index)
            }
            _ => false,
        }
    }
}

/// Pool positions of the dice each side threw
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seating {
    pub computer: usize,
    pub user: usize,
}

impl Seating {
    pub fn position(&self, player: Player) -> usize {
        match player {
            Player::Computer => self.computer,
            Player::User => self.user,
        }
    }
}

/// Full record of a duel
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub duel_id: DuelId,
    pub dice: Vec<Die>,
    /// Set once both dice are chosen
    pub seating: Option<Seating>,
    pub rounds: Vec<Round>,
    pub verdict: Option<Verdict>,
}

impl Transcript {
    pub fn new(duel_id: DuelId, dice: Vec<Die>) -> Self {
        Self {
            duel_id,
            dice,
            seating: None,
            rounds: Vec::new(),
            verdict: None,
        }
    }

    pub fn record(&mut self, round: Round) {
        self.rounds.push(round);
    }

    /// Every round checks out, every face is the one the thrower's die
    /// shows at the drawn index, and the verdict follows from those faces
    pub fn verify<K: KeyedHash + ?Sized>(&self, mac: &K) -> bool {
        if !self.rounds.iter().all(|round| round.verify(mac)) {
            return false;
        }
        if let Some(seating) = self.seating {
            let in_pool = |p: usize| p < self.dice.len();
            if seating.computer == seating.user
                || !in_pool(seating.computer)
                || !in_pool(seating.user)
            {
                return false;
            }
        }

        let mut computer_face = None;
        let mut user_face = None;
        for round in &self.rounds {
            let (Purpose::Throw(player), Decision::Face { index, value }) =
                (round.purpose, round.decision)
            else {
                continue;
            };
            let Some(seating) = self.seating else {
                return false;
            };
            let shown = self
                .dice
                .get(seating.position(player))
                .and_then(|die| die.face(index as usize));
            if shown != Some(value) {
                return false;
            }
            let slot = match player {
                Player::Computer => &mut computer_face,
                Player::User => &mut user_face,
            };
            if slot.replace(value).is_some() {
                return false;
            }
        }

        match (self.verdict, computer_face, user_face) {
            (None, _, _) => true,
            (Some(verdict), Some(computer), Some(user)) => {
                verdict == Verdict::new(computer, user, verdict.rule)
            }
            (Some(_), _, _) => false,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
