//! Diagnostics reported while parsing FEN placements and square names.
//!
//! The error system is built around [`Diagnostic`]: one problem with an
//! optional [`ErrorCode`], labeled [`Span`](crate::Span)s into the parsed
//! text, and optional help. A failed parse returns a [`ParseError`]
//! holding every diagnostic found, so a FEN string with three broken ranks
//! reports all three at once.
//!
//! # Example
//!
//! ```
//! # use fenboard_parser::error::{Diagnostic, ErrorCode};
//! # use fenboard_parser::Span;
//! let diag = Diagnostic::error("rank 6 describes 9 squares")
//!     .with_code(ErrorCode::E002)
//!     .with_label(Span::new(18..23), "expands to 9 squares")
//!     .with_help("each rank must describe exactly 8 squares");
//!
//! assert_eq!(diag.to_string(), "error[E002]: rank 6 describes 9 squares");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
