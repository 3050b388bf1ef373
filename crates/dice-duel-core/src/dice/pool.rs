//! Dice and the validated dice pool.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of faces on every die
pub const FACES: usize = 6;

/// Smallest pool that can be played: both players need a die and the
/// second mover still needs a choice.
pub const MIN_DICE: usize = 3;

/// A single malformed dice specification
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DieSpecError {
    #[error("invalid dice configuration #{position} '{spec}': expected exactly 6 comma-separated values, found {found}")]
    FaceCount {
        position: usize,
        spec: String,
        found: usize,
    },

    #[error("invalid dice configuration #{position} '{spec}': '{token}' is not an integer")]
    NotAnInteger {
        position: usize,
        spec: String,
        token: String,
    },
}

impl DieSpecError {
    /// The offending specification, verbatim
    pub fn spec(&self) -> &str {
        match self {
            DieSpecError::FaceCount { spec, .. } | DieSpecError::NotAnInteger { spec, .. } => spec,
        }
    }

    /// 1-based position of the specification in the input
    pub fn position(&self) -> usize {
        match self {
            DieSpecError::FaceCount { position, .. }
            | DieSpecError::NotAnInteger { position, .. } => *position,
        }
    }
}

/// Errors from validating the dice configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("at least {min} dice configurations are required, but {given} given (example: 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7)")]
    TooFewDice { given: usize, min: usize },

    #[error("{}", join_lines(.0))]
    Malformed(Vec<DieSpecError>),
}

fn join_lines(errors: &[DieSpecError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// A six-sided die. Faces are addressed by position, so two dice with the
/// same values in a different order are different dice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Die([i64; FACES]);

impl Die {
    /// Create a die from its face sequence
    pub fn new(faces: [i64; FACES]) -> Self {
        Self(faces)
    }

    /// The face sequence in input order
    pub fn faces(&self) -> &[i64; FACES] {
        &self.0
    }

    /// Value shown on face `index`; `None` past the last face
    pub fn face(&self, index: usize) -> Option<i64> {
        self.0.get(index).copied()
    }

    fn parse(position: usize, spec: &str) -> Result<Self, DieSpecError> {
        let tokens: Vec<&str> = spec.split(',').collect();
        if tokens.len() != FACES {
            return Err(DieSpecError::FaceCount {
                position,
                spec: spec.to_string(),
                found: tokens.len(),
            });
        }

        let mut faces = [0i64; FACES];
        for (face, token) in faces.iter_mut().zip(&tokens) {
            *face = token
                .trim()
                .parse()
                .map_err(|_| DieSpecError::NotAnInteger {
                    position,
                    spec: spec.to_string(),
                    token: token.to_string(),
                })?;
        }
        Ok(Self(faces))
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", faces.join(","))
    }
}

/// Validated, immutable pool of at least [`MIN_DICE`] dice
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DicePool {
    dice: Vec<Die>,
}

impl DicePool {
    /// Parse raw specifications such as `"2,2,4,4,9,9"`.
    ///
    /// Every malformed specification is reported, not only the first one.
    pub fn parse<S: AsRef<str>>(specs: &[S]) -> Result<Self, ValidationError> {
        if specs.len() < MIN_DICE {
            return Err(ValidationError::TooFewDice {
                given: specs.len(),
                min: MIN_DICE,
            });
        }

        let mut dice = Vec::with_capacity(specs.len());
        let mut errors = Vec::new();
        for (i, spec) in specs.iter().enumerate() {
            match Die::parse(i + 1, spec.as_ref()) {
                Ok(die) => dice.push(die),
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(Self { dice })
        } else {
            Err(ValidationError::Malformed(errors))
        }
    }

    /// Build a pool from already typed dice
    pub fn from_dice(dice: Vec<Die>) -> Result<Self, ValidationError> {
        if dice.len() < MIN_DICE {
            return Err(ValidationError::TooFewDice {
                given: dice.len(),
                min: MIN_DICE,
            });
        }
        Ok(Self { dice })
    }

    /// Number of dice in the pool
    pub fn count(&self) -> usize {
        self.dice.len()
    }

    /// Die at pool position `position`
    pub fn get(&self, position: usize) -> Option<&Die> {
        self.dice.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Die> {
        self.dice.iter()
    }

    /// Every position of the pool, as a selection menu
    pub fn all(&self) -> Selection<'_> {
        Selection {
            pool: self,
            positions: (0..self.dice.len()).collect(),
        }
    }

    /// The pool minus the die at `excluded`, as a selection menu
    pub fn excluding(&self, excluded: usize) -> Selection<'_> {
        Selection {
            pool: self,
            positions: (0..self.dice.len()).filter(|&p| p != excluded).collect(),
        }
    }
}

/// A menu over part of a pool.
///
/// Menu indices are resolved back to pool positions through the stored
/// position list, so callers never shift indices by hand.
#[derive(Clone, Debug)]
pub struct Selection<'a> {
    pool: &'a DicePool,
    positions: Vec<usize>,
}

impl<'a> Selection<'a> {
    /// Number of entries on the menu
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Pool positions offered, in menu order
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Pool position behind menu entry `index`
    pub fn resolve(&self, index: usize) -> Option<usize> {
        self.positions.get(index).copied()
    }

    /// Menu labels, one per entry
    pub fn labels(&self) -> Vec<String> {
        self.positions
            .iter()
            .filter_map(|&p| self.pool.get(p))
            .map(ToString::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: [&str; 3] = ["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"];

    #[test]
    fn test_parse_classic_pool() {
        let pool = DicePool::parse(&CLASSIC).unwrap();
        assert_eq!(pool.count(), 3);
        assert_eq!(pool.get(0).unwrap().faces(), &[2, 2, 4, 4, 9, 9]);
        assert_eq!(pool.get(2).unwrap().faces(), &[3, 3, 5, 5, 7, 7]);
        assert!(pool.get(3).is_none());
    }

    #[test]
    fn test_parse_keeps_face_order() {
        let pool = DicePool::parse(&["1,2,3,4,5,6", "6,5,4,3,2,1", "1,1,1,1,1,1"]).unwrap();
        assert_ne!(pool.get(0), pool.get(1));
        assert_eq!(pool.get(1).unwrap().face(0), Some(6));
        assert_eq!(pool.get(1).unwrap().face(6), None);
    }

    #[test]
    fn test_parse_accepts_negative_and_padded_values() {
        let pool = DicePool::parse(&["-1, 0, 1,2,3,4", "0,0,0,0,0,0", "9,9,9,9,9,9"]).unwrap();
        assert_eq!(pool.get(0).unwrap().faces(), &[-1, 0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_wrong_face_count_identifies_spec() {
        let err = DicePool::parse(&["1,2,3", "4,5,6,7", "7,8,9,10,11,12"]).unwrap_err();
        let ValidationError::Malformed(errors) = &err else {
            panic!("expected malformed error, got {err:?}");
        };
        assert!(errors.iter().any(|e| e.spec() == "4,5,6,7" && e.position() == 2));
        assert!(errors
            .iter()
            .all(|e| matches!(e, DieSpecError::FaceCount { .. })));
        assert!(err.to_string().contains("'4,5,6,7'"));
    }

    #[test]
    fn test_too_few_dice() {
        let err = DicePool::parse(&["1,2,3,4,5,6"]).unwrap_err();
        assert_eq!(err, ValidationError::TooFewDice { given: 1, min: 3 });
    }

    #[test]
    fn test_count_checked_before_faces() {
        let err = DicePool::parse(&["1,2", "x"]).unwrap_err();
        assert!(matches!(err, ValidationError::TooFewDice { given: 2, .. }));
    }

    #[test]
    fn test_non_integer_token() {
        let err = DicePool::parse(&["1,2,3,4,5,6", "1,2,three,4,5,6", "1,1,1,1,1,1"]).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Malformed(vec![DieSpecError::NotAnInteger {
                position: 2,
                spec: "1,2,three,4,5,6".to_string(),
                token: "three".to_string(),
            }])
        );
    }

    #[test]
    fn test_empty_token_is_not_an_integer() {
        let err = DicePool::parse(&["1,2,3,4,5,", "1,2,3,4,5,6", "1,2,3,4,5,6"]).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Malformed(ref errors) if errors.len() == 1 && errors[0].position() == 1
        ));
    }

    #[test]
    fn test_excluding_resolves_to_pool_positions() {
        let pool = DicePool::parse(&["1,1,1,1,1,1", "2,2,2,2,2,2", "3,3,3,3,3,3", "4,4,4,4,4,4"]).unwrap();
        let menu = pool.excluding(1);
        assert_eq!(menu.len(), 3);
        assert_eq!(menu.resolve(0), Some(0));
        assert_eq!(menu.resolve(1), Some(2));
        assert_eq!(menu.resolve(2), Some(3));
        assert_eq!(menu.resolve(3), None);
        assert_eq!(menu.labels(), vec!["1,1,1,1,1,1", "3,3,3,3,3,3", "4,4,4,4,4,4"]);
    }

    #[test]
    fn test_excluding_never_offers_excluded_position() {
        let pool = DicePool::parse(&["5,5,5,5,5,5", "5,5,5,5,5,5", "5,5,5,5,5,5"]).unwrap();
        for excluded in 0..pool.count() {
            let menu = pool.excluding(excluded);
            for index in 0..menu.len() {
                assert_ne!(menu.resolve(index), Some(excluded));
            }
        }
    }

    #[test]
    fn test_die_display() {
        let die = Die::new([1, -2, 3, 4, 5, 6]);
        assert_eq!(die.to_string(), "1,-2,3,4,5,6");
    }
}
