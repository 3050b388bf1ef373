//! Protocol types.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique duel identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DuelId(Uuid);

impl DuelId {
    /// Create a new random duel ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DuelId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for DuelId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for DuelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DuelId({})", self.0)
    }
}

impl fmt::Display for DuelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Side of the duel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Computer,
    User,
}

impl Player {
    /// Get the opponent
    pub fn opponent(&self) -> Player {
        match self {
            Player::Computer => Player::User,
            Player::User => Player::Computer,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Computer => write!(f, "computer"),
            Player::User => write!(f, "user"),
        }
    }
}

/// Which face value takes the duel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WinRule {
    #[default]
    Higher,
    Lower,
}

impl WinRule {
    /// Decide the duel from both throws
    pub fn judge(&self, computer_face: i64, user_face: i64) -> Outcome {
        let ordering = match self {
            WinRule::Higher => user_face.cmp(&computer_face),
            WinRule::Lower => computer_face.cmp(&user_face),
        };
        match ordering {
            Ordering::Greater => Outcome::UserWins,
            Ordering::Less => Outcome::ComputerWins,
            Ordering::Equal => Outcome::Draw,
        }
    }

    /// Relation symbol that holds between winner and loser
    pub fn symbol(&self) -> &'static str {
        match self {
            WinRule::Higher => ">",
            WinRule::Lower => "<",
        }
    }
}

impl FromStr for WinRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "higher" => Ok(WinRule::Higher),
            "lower" => Ok(WinRule::Lower),
            other => Err(format!("unknown win rule '{}', expected higher or lower", other)),
        }
    }
}

/// Duel result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    ComputerWins,
    UserWins,
    Draw,
}

impl Outcome {
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::ComputerWins => Some(Player::Computer),
            Outcome::UserWins => Some(Player::User),
            Outcome::Draw => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::ComputerWins => "computer wins",
            Outcome::UserWins => "user wins",
            Outcome::Draw => "draw",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Both throws and the decision drawn from them
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub computer_face: i64,
    pub user_face: i64,
    pub rule: WinRule,
    pub outcome: Outcome,
}

impl Verdict {
    pub fn new(computer_face: i64, user_face: i64, rule: WinRule) -> Self {
        Self {
            computer_face,
            user_face,
            rule,
            outcome: rule.judge(computer_face, user_face),
        }
    }
}
