//! Board coordinates.
//!
//! A [`GridPos`] addresses one of the 64 tiles by file index (0 = a-file) and
//! rank index counted from the top of the unflipped board (0 = rank 8). The
//! algebraic name of a square (`"e4"`) round-trips exactly through
//! [`GridPos::from_algebraic`] and [`GridPos::algebraic`].

use std::{fmt, str::FromStr};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
};

/// Side length of the board in tiles.
pub const BOARD_TILES: u8 = 8;

/// A tile position: file index 0-7 and rank index 0-7 from the top.
///
/// # Examples
///
/// ```
/// # use fenboard_parser::GridPos;
/// let e4 = GridPos::from_algebraic("e4").unwrap();
/// assert_eq!((e4.file(), e4.rank()), (4, 4));
/// assert_eq!(e4.flip().algebraic(), "d5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    file: u8,
    rank: u8,
}

impl GridPos {
    /// Creates a position, or `None` if either index is outside 0-7.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < BOARD_TILES && rank < BOARD_TILES).then_some(Self { file, rank })
    }

    /// Parses an algebraic square name such as `"e4"`.
    ///
    /// The file letter must be lowercase `a`-`h` and the rank digit `1`-`8`.
    /// The file index is the letter's offset from `a`; the rank index is
    /// `8 - digit`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] carrying an [`ErrorCode::E100`] diagnostic
    /// labeled over the whole input.
    pub fn from_algebraic(square: &str) -> Result<Self, ParseError> {
        let mut chars = square.chars();
        let parsed = match (chars.next(), chars.next(), chars.next()) {
            (Some(file @ 'a'..='h'), Some(rank @ '1'..='8'), None) => Some(Self {
                file: file as u8 - b'a',
                rank: BOARD_TILES - (rank as u8 - b'0'),
            }),
            _ => None,
        };

        parsed.ok_or_else(|| {
            Diagnostic::error(format!("invalid square `{square}`"))
                .with_code(ErrorCode::E100)
                .with_label(Span::new(0..square.len()), "not a square name")
                .with_help("squares are a file letter `a`-`h` followed by a rank digit `1`-`8`, like `e4`")
                .into()
        })
    }

    /// Returns the algebraic name of this position, for example `"a8"` for `(0, 0)`.
    pub fn algebraic(&self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// Returns the file letter, `a`-`h`.
    pub fn file_char(&self) -> char {
        char::from(b'a' + self.file)
    }

    /// Returns the rank digit, `1`-`8`.
    pub fn rank_char(&self) -> char {
        char::from(b'0' + (BOARD_TILES - self.rank))
    }

    /// File index, 0 for the a-file.
    pub fn file(&self) -> u8 {
        self.file
    }

    /// Rank index counted from the top, 0 for rank 8.
    pub fn rank(&self) -> u8 {
        self.rank
    }

    /// Returns the position seen from the other side of the board.
    ///
    /// Flipping twice yields the original position.
    pub fn flip(&self) -> Self {
        Self {
            file: BOARD_TILES - 1 - self.file,
            rank: BOARD_TILES - 1 - self.rank,
        }
    }

    /// Returns `true` for light tiles: `(file + rank) % 2 == 0`.
    ///
    /// a8 and h1 are light; flipping preserves parity.
    pub fn is_light(&self) -> bool {
        (self.file + self.rank) % 2 == 0
    }

    /// Returns `(other.file - self.file, other.rank - self.rank)`.
    pub fn delta(&self, other: GridPos) -> (i8, i8) {
        (
            other.file as i8 - self.file as i8,
            other.rank as i8 - self.rank as i8,
        )
    }

    /// Iterates all 64 positions row by row from the top-left tile.
    pub fn all() -> impl Iterator<Item = GridPos> {
        (0..BOARD_TILES).flat_map(|rank| (0..BOARD_TILES).map(move |file| GridPos { file, rank }))
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for GridPos {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_squares() {
        let a8 = GridPos::from_algebraic("a8").unwrap();
        assert_eq!((a8.file(), a8.rank()), (0, 0));

        let h1 = GridPos::from_algebraic("h1").unwrap();
        assert_eq!((h1.file(), h1.rank()), (7, 7));

        let a1 = GridPos::from_algebraic("a1").unwrap();
        assert_eq!((a1.file(), a1.rank()), (0, 7));
    }

    #[test]
    fn test_algebraic_names() {
        assert_eq!(GridPos::new(4, 4).unwrap().algebraic(), "e4");
        assert_eq!(GridPos::new(0, 0).unwrap().algebraic(), "a8");
        assert_eq!(GridPos::new(7, 7).unwrap().to_string(), "h1");
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(GridPos::new(8, 0).is_none());
        assert!(GridPos::new(0, 8).is_none());
        assert!(GridPos::new(7, 7).is_some());
    }

    #[test]
    fn test_invalid_squares() {
        for square in ["", "e", "e9", "e0", "i4", "E4", "e44", "4e", " e4"] {
            let err = GridPos::from_algebraic(square).unwrap_err();
            let diag = &err.diagnostics()[0];
            assert_eq!(diag.code(), Some(ErrorCode::E100), "square {square:?}");
            assert_eq!(diag.labels()[0].span().len(), square.len());
        }
    }

    #[test]
    fn test_flip() {
        let e4 = GridPos::from_algebraic("e4").unwrap();
        assert_eq!(e4.flip().algebraic(), "d5");
        assert_eq!(GridPos::new(0, 0).unwrap().flip(), GridPos::new(7, 7).unwrap());
    }

    #[test]
    fn test_parity() {
        assert!(GridPos::from_algebraic("a8").unwrap().is_light());
        assert!(GridPos::from_algebraic("h1").unwrap().is_light());
        assert!(!GridPos::from_algebraic("a1").unwrap().is_light());
        assert!(GridPos::from_algebraic("e4").unwrap().is_light());
        assert!(!GridPos::from_algebraic("d4").unwrap().is_light());
    }

    #[test]
    fn test_delta() {
        let e2 = GridPos::from_algebraic("e2").unwrap();
        let e4 = GridPos::from_algebraic("e4").unwrap();
        assert_eq!(e2.delta(e4), (0, -2));

        let g1 = GridPos::from_algebraic("g1").unwrap();
        let f3 = GridPos::from_algebraic("f3").unwrap();
        assert_eq!(g1.delta(f3), (-1, -2));
    }

    #[test]
    fn test_all_visits_every_square_once() {
        let all: Vec<_> = GridPos::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0].algebraic(), "a8");
        assert_eq!(all[63].algebraic(), "h1");
    }

    #[test]
    fn test_from_str() {
        let pos: GridPos = "c6".parse().unwrap();
        assert_eq!((pos.file(), pos.rank()), (2, 2));
        assert!("c9".parse::<GridPos>().is_err());
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    fn grid_pos_strategy() -> impl Strategy<Value = GridPos> {
        (0..BOARD_TILES, 0..BOARD_TILES).prop_map(|(file, rank)| GridPos { file, rank })
    }

    proptest! {
        #[test]
        fn algebraic_round_trip(pos in grid_pos_strategy()) {
            prop_assert_eq!(GridPos::from_algebraic(&pos.algebraic()).unwrap(), pos);
        }

        #[test]
        fn flip_is_involution(pos in grid_pos_strategy()) {
            prop_assert_eq!(pos.flip().flip(), pos);
        }

        #[test]
        fn flip_preserves_parity(pos in grid_pos_strategy()) {
            prop_assert_eq!(pos.flip().is_light(), pos.is_light());
        }

        #[test]
        fn square_names_round_trip(file in proptest::char::range('a', 'h'), rank in proptest::char::range('1', '8')) {
            let name = format!("{file}{rank}");
            prop_assert_eq!(GridPos::from_algebraic(&name).unwrap().algebraic(), name);
        }
    }
}
