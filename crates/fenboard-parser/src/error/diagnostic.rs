//! The core diagnostic type.

use std::fmt;

use crate::{
    error::{error_code::ErrorCode, label::Label},
    span::Span,
};

/// A single problem found in the input, with source locations.
///
/// # Example
///
/// ```text
/// error[E001]: unexpected character `x` in rank 7
///   |
/// 1 | rnbqkbnr/ppxppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1
///   |            ^ not a piece letter or a digit 1-8
///   |
///   = help: use one of `kqbnrpKQBNRP` for pieces and digits for empty squares
/// ```
#[derive(Debug, Clone)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use fenboard_parser::error::{Diagnostic, ErrorCode};
    /// # use fenboard_parser::Span;
    /// let diag = Diagnostic::error("invalid square `i9`")
    ///     .with_code(ErrorCode::E100)
    ///     .with_label(Span::new(0..2), "not a square")
    ///     .with_help("squares look like `e4`");
    /// assert_eq!(diag.code(), Some(ErrorCode::E100));
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get all labels attached to this diagnostic.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a primary label to this diagnostic.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    /// Add a secondary label to this diagnostic.
    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // "error[E001]: message" or "error: message"
        write!(f, "error")?;
        if let Some(code) = self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_new() {
        let diag = Diagnostic::error("empty FEN string");

        assert_eq!(diag.message(), "empty FEN string");
        assert!(diag.code().is_none());
        assert!(diag.labels().is_empty());
        assert!(diag.help().is_none());
    }

    #[test]
    fn test_diagnostic_builder_chain() {
        let diag = Diagnostic::error("rank 3 describes 7 squares")
            .with_code(ErrorCode::E003)
            .with_label(Span::new(30..33), "expands to 7 squares")
            .with_secondary_label(Span::new(0..43), "in this placement")
            .with_help("each rank must describe exactly 8 squares");

        assert_eq!(diag.code(), Some(ErrorCode::E003));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(!diag.labels()[1].is_primary());
        assert_eq!(
            diag.help(),
            Some("each rank must describe exactly 8 squares")
        );
    }

    #[test]
    fn test_diagnostic_display_with_code() {
        let diag = Diagnostic::error("invalid square `z0`").with_code(ErrorCode::E100);
        assert_eq!(diag.to_string(), "error[E100]: invalid square `z0`");
    }

    #[test]
    fn test_diagnostic_display_without_code() {
        let diag = Diagnostic::error("trailing slash");
        assert_eq!(diag.to_string(), "error: trailing slash");
    }
}
