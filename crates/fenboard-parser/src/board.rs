//! The 8x8 piece grid decoded from a FEN placement field.

use std::{fmt, str::FromStr};

use crate::{
    error::ParseError,
    parser,
    piece::Piece,
    square::GridPos,
};

/// One rank of the board, a-file first.
pub type Rank = [Option<Piece>; 8];

/// Piece placement, row-major from rank 8 (top) to rank 1, a-file to h-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    rows: [Rank; 8],
}

impl Board {
    /// Returns a board with no pieces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a board from rows, rank 8 first.
    pub fn from_rows(rows: [Rank; 8]) -> Self {
        Self { rows }
    }

    /// Returns the rows, rank 8 first.
    pub fn rows(&self) -> &[Rank; 8] {
        &self.rows
    }

    /// Returns the piece on `pos`, if any.
    pub fn get(&self, pos: GridPos) -> Option<Piece> {
        self.rows[usize::from(pos.rank())][usize::from(pos.file())]
    }

    /// Iterates over occupied tiles, top row first.
    pub fn pieces(&self) -> impl Iterator<Item = (GridPos, Piece)> + '_ {
        GridPos::all().filter_map(|pos| self.get(pos).map(|piece| (pos, piece)))
    }

    /// Returns the board as seen from the other side: the row order and the
    /// order within every row are both reversed.
    pub fn flipped(&self) -> Self {
        let mut rows = self.rows;
        rows.reverse();
        for row in &mut rows {
            row.reverse();
        }
        Self { rows }
    }
}

impl fmt::Display for Board {
    /// Writes the board back as a FEN placement field.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows.iter().enumerate() {
            if index > 0 {
                f.write_str("/")?;
            }
            let mut empty = 0u8;
            for cell in row {
                match cell {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{piece}")?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::parse(s)
    }
}
