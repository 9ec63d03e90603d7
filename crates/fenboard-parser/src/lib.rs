//! # fenboard parser
//!
//! Decodes the placement field of a FEN string into a [`Board`] and converts
//! between algebraic square names and grid positions.
//!
//! ## Usage
//!
//! ```
//! # use fenboard_parser::{parse, GridPos, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let board = parse("rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2")?;
//!
//!     let c5 = GridPos::from_algebraic("c5")?;
//!     assert_eq!(board.get(c5).map(|piece| piece.to_fen_char()), Some('p'));
//!     Ok(())
//! }
//! ```

mod board;
pub mod error;
mod parser;
mod piece;
mod span;
mod square;

pub use board::{Board, Rank};
pub use parser::{parse, parse_rank};
pub use piece::{Piece, PieceKind, Side};
pub use span::Span;
pub use square::{BOARD_TILES, GridPos};
