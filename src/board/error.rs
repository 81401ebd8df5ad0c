//! Error types for board operations.

use std::fmt;

use super::{GameStatus, Move, Side, Square};

/// Error type for square validation and parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SquareError {
    /// File or rank outside the 9x10 grid
    OutOfRange { file: i32, rank: i32 },
    /// Invalid ICCS square notation (e.g. "j3")
    InvalidNotation { notation: String },
}

impl fmt::Display for SquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SquareError::OutOfRange { file, rank } => {
                write!(
                    f,
                    "Square ({file}, {rank}) out of range (file must be 0-8, rank 0-9)"
                )
            }
            SquareError::InvalidNotation { notation } => {
                write!(f, "Invalid square notation '{notation}'")
            }
        }
    }
}

impl std::error::Error for SquareError {}

/// Error type for FEN parsing failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// Empty FEN string
    Empty,
    /// Placement field does not have exactly 10 rows
    WrongRowCount { found: usize },
    /// A row does not describe exactly 9 files
    RowWidth { rank: usize, files: usize },
    /// Invalid piece character in placement field
    InvalidPiece { char: char },
    /// Invalid side to move (must be 'w', 'r' or 'b')
    InvalidSideToMove { found: String },
    /// More than one general for a side
    TooManyGenerals { side: Side },
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenError::Empty => write!(f, "Empty FEN string"),
            FenError::WrongRowCount { found } => {
                write!(f, "FEN must have 10 rows, found {found}")
            }
            FenError::RowWidth { rank, files } => {
                write!(f, "Row {rank} describes {files} files, expected 9")
            }
            FenError::InvalidPiece { char } => {
                write!(f, "Invalid piece character '{char}' in FEN")
            }
            FenError::InvalidSideToMove { found } => {
                write!(f, "Invalid side to move '{found}', expected 'w' or 'b'")
            }
            FenError::TooManyGenerals { side } => {
                write!(f, "{side} has more than one general")
            }
        }
    }
}

impl std::error::Error for FenError {}

/// Error type for board queries and position setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// The queried square is off the board
    InvalidSquare(SquareError),
    /// No piece stands on the queried square
    NoPiece { square: Square },
    /// A piece record disagrees with the cell it is stored in
    Misplaced { square: Square },
    /// More than one general for a side
    TooManyGenerals { side: Side },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidSquare(err) => write!(f, "{err}"),
            BoardError::NoPiece { square } => write!(f, "No piece on {square}"),
            BoardError::Misplaced { square } => {
                write!(f, "Piece stored on {square} records a different square")
            }
            BoardError::TooManyGenerals { side } => {
                write!(f, "{side} has more than one general")
            }
        }
    }
}

impl std::error::Error for BoardError {}

impl From<SquareError> for BoardError {
    fn from(err: SquareError) -> Self {
        BoardError::InvalidSquare(err)
    }
}

/// Error type for move parsing and move application failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// ICCS move string is malformed (must be 4 characters, e.g. "h2e2")
    InvalidNotation { notation: String },
    /// A square of the move is off the board
    InvalidSquare(SquareError),
    /// No piece stands on the origin square
    NoPiece { square: Square },
    /// The piece on the origin square belongs to the side not on move
    WrongSide { square: Square, to_move: Side },
    /// The move is not legal in the current position
    IllegalMove { mv: Move },
    /// The game has already reached a terminal status
    GameOver { status: GameStatus },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidNotation { notation } => {
                write!(f, "Invalid move notation '{notation}'")
            }
            MoveError::InvalidSquare(err) => write!(f, "{err}"),
            MoveError::NoPiece { square } => write!(f, "No piece on {square}"),
            MoveError::WrongSide { square, to_move } => {
                write!(f, "Piece on {square} does not belong to {to_move}, who is to move")
            }
            MoveError::IllegalMove { mv } => write!(f, "Illegal move '{mv}'"),
            MoveError::GameOver { status } => write!(f, "Game is over: {status}"),
        }
    }
}

impl std::error::Error for MoveError {}

impl From<SquareError> for MoveError {
    fn from(err: SquareError) -> Self {
        MoveError::InvalidSquare(err)
    }
}
