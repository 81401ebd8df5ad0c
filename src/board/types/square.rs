//! Square type and board geometry queries.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Side;
use crate::board::error::SquareError;

/// Number of files (columns)
pub const FILES: u8 = 9;
/// Number of ranks (rows)
pub const RANKS: u8 = 10;
/// Number of cells on the board
pub const NUM_SQUARES: usize = 90;

/// True iff `(file, rank)` lies on the 9x10 grid.
#[inline]
#[must_use]
pub fn is_valid_coordinate(file: i32, rank: i32) -> bool {
    (0..i32::from(FILES)).contains(&file) && (0..i32::from(RANKS)).contains(&rank)
}

/// True iff `square` lies in `side`'s palace: files 3-5, Red ranks 7-9, Black ranks 0-2.
#[inline]
#[must_use]
pub fn is_in_palace(square: Square, side: Side) -> bool {
    if !(3..=5).contains(&square.0) {
        return false;
    }
    match side {
        Side::Red => (7..=9).contains(&square.1),
        Side::Black => square.1 <= 2,
    }
}

/// True iff `rank` lies on `side`'s half of the river: Red owns 5-9, Black 0-4.
#[inline]
#[must_use]
pub fn is_own_side(rank: u8, side: Side) -> bool {
    match side {
        Side::Red => rank >= 5,
        Side::Black => rank <= 4,
    }
}

/// A square on the board, represented as (file, rank).
///
/// Rank 0 is Black's back rank and rank 9 is Red's. Fields are public so
/// positions can be written tersely; operations taking a square from a
/// caller validate it first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(pub u8, pub u8); // (file, rank)

impl Square {
    /// Create a new square with bounds checking
    #[must_use]
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        if file < FILES && rank < RANKS {
            Some(Square(file, rank))
        } else {
            None
        }
    }

    /// Create a square from signed coordinates, reporting what was wrong.
    pub fn try_new(file: i32, rank: i32) -> Result<Self, SquareError> {
        if is_valid_coordinate(file, rank) {
            Ok(Square(file as u8, rank as u8))
        } else {
            Err(SquareError::OutOfRange { file, rank })
        }
    }

    #[inline]
    #[must_use]
    pub const fn file(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn rank(self) -> u8 {
        self.1
    }

    #[inline]
    #[must_use]
    pub fn is_valid(self) -> bool {
        self.0 < FILES && self.1 < RANKS
    }

    /// Validate a caller-supplied square
    pub fn validate(self) -> Result<Self, SquareError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(SquareError::OutOfRange {
                file: i32::from(self.0),
                rank: i32::from(self.1),
            })
        }
    }

    /// Cell index (0-89, rank-major from Black's back rank)
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.1 as usize * FILES as usize + self.0 as usize
    }

    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square((idx % FILES as usize) as u8, (idx / FILES as usize) as u8)
    }

    /// The square `(df, dr)` away, if it is on the board
    #[inline]
    #[must_use]
    pub fn offset(self, df: i8, dr: i8) -> Option<Square> {
        let file = i32::from(self.0) + i32::from(df);
        let rank = i32::from(self.1) + i32::from(dr);
        if is_valid_coordinate(file, rank) {
            Some(Square(file as u8, rank as u8))
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub fn in_palace(self, side: Side) -> bool {
        is_in_palace(self, side)
    }

    #[inline]
    #[must_use]
    pub fn on_own_side(self, side: Side) -> bool {
        is_own_side(self.1, side)
    }

    /// Same file, rank mirrored (used to read Red-authored tables for Black)
    #[inline]
    #[must_use]
    pub const fn flip_rank(self) -> Self {
        Square(self.0, RANKS - 1 - self.1)
    }

    /// Iterator over all 90 squares in index order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..NUM_SQUARES).map(Square::from_index)
    }
}

/// ICCS notation: file letter `a`-`i`, then `9 - rank` so Red's back rank is 0.
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "{}{}", (self.0 + b'a') as char, RANKS - 1 - self.1)
        } else {
            write!(f, "({}, {})", self.0, self.1)
        }
    }
}

impl TryFrom<(i32, i32)> for Square {
    type Error = SquareError;

    fn try_from((file, rank): (i32, i32)) -> Result<Self, Self::Error> {
        Square::try_new(file, rank)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SquareError::InvalidNotation {
            notation: s.to_string(),
        };
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let file = match bytes[0] {
            b'a'..=b'i' => bytes[0] - b'a',
            _ => return Err(invalid()),
        };
        let rank = match bytes[1] {
            b'0'..=b'9' => RANKS - 1 - (bytes[1] - b'0'),
            _ => return Err(invalid()),
        };
        Ok(Square(file, rank))
    }
}
