//! Pairwise win probabilities over a dice pool.
//!
//! Every ordered pair of distinct dice is evaluated over the full product
//! of their faces. The counts are kept exact; rounding only happens when a
//! probability is rendered.

use super::pool::{DicePool, Die, FACES};
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Outcomes of one die against another over all face pairs
pub const OUTCOMES: u32 = (FACES * FACES) as u32;

/// Digits shown for a rendered probability
pub const DISPLAY_DIGITS: usize = 4;

/// Exact result of throwing die `row` against die `column`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Matchup {
    /// Face pairs where the row die shows more
    pub wins: u32,
    /// Face pairs where the column die shows more
    pub losses: u32,
    /// Face pairs showing the same value
    pub ties: u32,
}

impl Matchup {
    /// Count every face pair of `a` against `b`
    pub fn between(a: &Die, b: &Die) -> Self {
        let mut matchup = Self {
            wins: 0,
            losses: 0,
            ties: 0,
        };
        for x in a.faces() {
            for y in b.faces() {
                match x.cmp(y) {
                    Ordering::Greater => matchup.wins += 1,
                    Ordering::Less => matchup.losses += 1,
                    Ordering::Equal => matchup.ties += 1,
                }
            }
        }
        matchup
    }

    /// The same matchup seen from the other die
    pub fn reversed(&self) -> Self {
        Self {
            wins: self.losses,
            losses: self.wins,
            ties: self.ties,
        }
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Probability that the row die beats the column die, unrounded
    pub fn win_probability(&self) -> f64 {
        f64::from(self.wins) / f64::from(self.total())
    }

    pub fn tie_probability(&self) -> f64 {
        f64::from(self.ties) / f64::from(self.total())
    }

    /// Win probability rounded to `digits` decimals
    pub fn rounded(&self, digits: usize) -> f64 {
        let scale = 10f64.powi(digits as i32);
        (self.win_probability() * scale).round() / scale
    }

    /// Strictly more wins than losses
    pub fn favours_row(&self) -> bool {
        self.wins > self.losses
    }
}

/// One cell of the matrix
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Cell {
    /// A die against itself; carries no probability
    Mirror,
    Odds(Matchup),
}

impl Cell {
    pub fn matchup(&self) -> Option<&Matchup> {
        match self {
            Cell::Mirror => None,
            Cell::Odds(m) => Some(m),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Mirror => write!(f, "-------"),
            Cell::Odds(m) => write!(f, "{:.*}", DISPLAY_DIGITS, m.rounded(DISPLAY_DIGITS)),
        }
    }
}

/// N x N table where cell (i, j) is die i against die j
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProbabilityMatrix {
    cells: Vec<Vec<Cell>>,
}

impl ProbabilityMatrix {
    /// Evaluate every ordered pair of distinct dice in `pool`
    pub fn compute(pool: &DicePool) -> Self {
        let n = pool.count();
        let mut cells = vec![vec![Cell::Mirror; n]; n];

        let dice: Vec<&Die> = pool.iter().collect();
        for i in 0..n {
            for j in (i + 1)..n {
                let matchup = Matchup::between(dice[i], dice[j]);
                cells[i][j] = Cell::Odds(matchup);
                cells[j][i] = Cell::Odds(matchup.reversed());
            }
        }

        Self { cells }
    }

    /// Number of dice covered
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.cells.get(row)?.get(column)
    }

    /// Matchup of `row` against `column`; `None` on the diagonal
    pub fn matchup(&self, row: usize, column: usize) -> Option<&Matchup> {
        self.cell(row, column)?.matchup()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Dice that beat die `column` more often than they lose to it
    pub fn counters(&self, column: usize) -> Vec<usize> {
        (0..self.size())
            .filter(|&row| {
                self.matchup(row, column)
                    .is_some_and(Matchup::favours_row)
            })
            .collect()
    }
}
