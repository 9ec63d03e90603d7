//! FEN placement parser.
//!
//! Only the placement field (the text before the first whitespace) is read.
//! Side to move, castling rights and the move counters are ignored. Parsing
//! is strict: a rank that does not describe exactly 8 squares, a placement
//! without exactly 8 ranks, or any character other than a piece letter or a
//! digit `1`-`8` is an error. Every broken rank is reported in one
//! [`ParseError`].

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::repeat,
    error::{ContextError, ErrMode},
    token::any,
};

use crate::{
    board::{Board, Rank},
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    piece::Piece,
    span::Span,
    square::BOARD_TILES,
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

const RANK_HELP: &str = "each rank must describe exactly 8 squares using piece letters and digits 1-8";

/// One token of a rank: a piece or a run of empty squares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    Piece(Piece),
    Empty(u8),
}

impl Run {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Some(Run::Empty(c as u8 - b'0')),
            _ => Piece::from_fen_char(c).map(Run::Piece),
        }
    }

    fn width(&self) -> usize {
        match self {
            Run::Piece(_) => 1,
            Run::Empty(count) => usize::from(*count),
        }
    }
}

/// Consumes the longest prefix of valid rank tokens.
fn rank_runs(input: &mut &str) -> IResult<Vec<Run>> {
    repeat(0.., any.verify_map(Run::from_char)).parse_next(input)
}

/// A rank's source text and its byte offset in the full FEN string.
struct RankSource<'a> {
    text: &'a str,
    offset: usize,
    index: usize,
}

impl RankSource<'_> {
    fn span(&self) -> Span {
        Span::new(self.offset..self.offset + self.text.len())
    }

    /// Human name of the rank: "rank 8" for the first field.
    fn name(&self) -> String {
        let ranks = usize::from(BOARD_TILES);
        if self.index < ranks {
            format!("rank {}", ranks - self.index)
        } else {
            format!("rank field {}", self.index + 1)
        }
    }
}

/// Parses the placement field of a FEN string.
///
/// # Examples
///
/// ```
/// # use fenboard_parser::{parse, GridPos};
/// let board = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
/// let e1 = GridPos::from_algebraic("e1").unwrap();
/// assert_eq!(board.get(e1).unwrap().to_fen_char(), 'K');
/// ```
///
/// # Errors
///
/// Returns a [`ParseError`] with one diagnostic per problem found.
pub fn parse(fen: &str) -> Result<Board, ParseError> {
    let leading = fen.len() - fen.trim_start().len();
    let placement = fen[leading..]
        .split(char::is_whitespace)
        .next()
        .unwrap_or_default();

    if placement.is_empty() {
        return Err(Diagnostic::error("empty FEN string")
            .with_code(ErrorCode::E005)
            .with_label(Span::new(0..fen.len()), "no placement field")
            .with_help("a placement looks like `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`")
            .into());
    }

    let placement_span = Span::new(leading..leading + placement.len());
    let ranks = split_ranks(placement, leading);

    let mut collector = DiagnosticCollector::new();
    if ranks.len() != usize::from(BOARD_TILES) {
        collector.emit(
            Diagnostic::error(format!(
                "placement has {} ranks, expected 8",
                ranks.len()
            ))
            .with_code(ErrorCode::E004)
            .with_label(placement_span, format!("{} ranks", ranks.len()))
            .with_help("separate exactly 8 ranks with `/`, rank 8 first"),
        );
    }

    let mut rows = [Rank::default(); 8];
    for rank in &ranks {
        match parse_rank_source(rank) {
            Ok(row) => {
                if let Some(slot) = rows.get_mut(rank.index) {
                    *slot = row;
                }
            }
            Err(diagnostic) => collector.emit(
                diagnostic.with_secondary_label(placement_span, "in this placement"),
            ),
        }
    }
    collector.finish()?;

    debug!(placement; "Parsed FEN placement");
    Ok(Board::from_rows(rows))
}

/// Parses a single rank such as `"4p3"`.
///
/// # Errors
///
/// Returns a [`ParseError`] when the rank contains an unexpected character or
/// does not expand to exactly 8 squares.
pub fn parse_rank(rank: &str) -> Result<Rank, ParseError> {
    parse_rank_source(&RankSource {
        text: rank,
        offset: 0,
        index: 0,
    })
    .map_err(ParseError::from)
}

fn split_ranks(placement: &str, start: usize) -> Vec<RankSource<'_>> {
    let mut offset = start;
    placement
        .split('/')
        .enumerate()
        .map(|(index, text)| {
            let rank = RankSource {
                text,
                offset,
                index,
            };
            offset += text.len() + 1;
            rank
        })
        .collect()
}

fn parse_rank_source(rank: &RankSource<'_>) -> Result<Rank, Diagnostic> {
    let mut input = rank.text;
    let runs = rank_runs(&mut input).map_err(|_| {
        Diagnostic::error(format!("cannot read {}", rank.name()))
            .with_code(ErrorCode::E001)
            .with_label(rank.span(), "unreadable rank")
            .with_help(RANK_HELP)
    })?;

    if let Some(bad) = input.chars().next() {
        let at = rank.offset + (rank.text.len() - input.len());
        return Err(Diagnostic::error(format!(
            "unexpected character `{bad}` in {}",
            rank.name()
        ))
        .with_code(ErrorCode::E001)
        .with_label(
            Span::new(at..at + bad.len_utf8()),
            "not a piece letter or a digit 1-8",
        )
        .with_help("use one of `kqbnrpKQBNRP` for pieces and digits 1-8 for empty squares"));
    }

    let width: usize = runs.iter().map(Run::width).sum();
    trace!(rank = rank.text, width; "Expanded rank");

    let squares = usize::from(BOARD_TILES);
    if width != squares {
        let code = if width > squares {
            ErrorCode::E002
        } else {
            ErrorCode::E003
        };
        return Err(Diagnostic::error(format!(
            "{} describes {width} squares, expected 8",
            rank.name()
        ))
        .with_code(code)
        .with_label(rank.span(), format!("expands to {width} squares"))
        .with_help(RANK_HELP));
    }

    let mut row = Rank::default();
    let mut file = 0;
    for run in runs {
        match run {
            Run::Piece(piece) => {
                row[file] = Some(piece);
                file += 1;
            }
            Run::Empty(count) => file += usize::from(count),
        }
    }
    Ok(row)
}
