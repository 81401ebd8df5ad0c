use std::str::FromStr;

use super::error::FenError;
use super::{Board, Piece, PieceId, PieceKind, Side, Square, FILES, RANKS};

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w";

impl Board {
    /// Parse a position from Xiangqi FEN.
    ///
    /// Rows run from Black's back rank (rank 0) to Red's. The side field
    /// takes `w`/`r` for Red and `b` for Black and defaults to Red when
    /// absent; trailing fields (move counters) are ignored.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().ok_or(FenError::Empty)?;

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != usize::from(RANKS) {
            return Err(FenError::WrongRowCount { found: rows.len() });
        }

        let mut board = Board::empty();
        let mut generals = [false; 2];
        let mut next_id = 0u8;
        for (rank, row) in rows.iter().enumerate() {
            let mut file = 0usize;
            for c in row.chars() {
                if let Some(run) = c.to_digit(10) {
                    file += run as usize;
                    continue;
                }
                let kind = PieceKind::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                if file >= usize::from(FILES) {
                    return Err(FenError::RowWidth {
                        rank,
                        files: file + 1,
                    });
                }
                let side = if c.is_ascii_uppercase() {
                    Side::Red
                } else {
                    Side::Black
                };
                if kind == PieceKind::General {
                    if generals[side.index()] {
                        return Err(FenError::TooManyGenerals { side });
                    }
                    generals[side.index()] = true;
                }
                let square = Square(file as u8, rank as u8);
                board.put(Piece::new(PieceId(next_id), kind, side, square));
                next_id += 1;
                file += 1;
            }
            if file != usize::from(FILES) {
                return Err(FenError::RowWidth { rank, files: file });
            }
        }

        let side = match parts.next() {
            None | Some("w" | "r") => Side::Red,
            Some("b") => Side::Black,
            Some(other) => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };
        board.set_side_to_move(side);
        Ok(board)
    }

    /// Convert the position to Xiangqi FEN (placement and side to move).
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::with_capacity(usize::from(RANKS));
        for rank in 0..RANKS {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..FILES {
                if let Some(piece) = self.cells[Square(file, rank).index()] {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.fen_char());
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Side::Red => "w",
            Side::Black => "b",
        };
        format!("{} {}", rows.join("/"), active)
    }
}

impl FromStr for Board {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}
