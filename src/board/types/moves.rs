//! Move type.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::square::Square;
use crate::board::error::MoveError;

/// A move from one square to another.
///
/// Xiangqi has no special moves, so the two squares are the whole move;
/// captures are read off the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[inline]
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        self.from
    }

    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Index into a 90x90 from/to table
    #[inline]
    #[must_use]
    pub(crate) const fn table_index(self) -> usize {
        self.from.index() * 90 + self.to.index()
    }
}

/// ICCS coordinate notation, e.g. `h2e2`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() != 4 || !s.is_ascii() {
            return Err(MoveError::InvalidNotation {
                notation: s.to_string(),
            });
        }
        let from: Square = s[0..2].parse()?;
        let to: Square = s[2..4].parse()?;
        Ok(Move::new(from, to))
    }
}
