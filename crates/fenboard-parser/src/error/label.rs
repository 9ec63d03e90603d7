//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A message attached to a span of the parsed text.
///
/// Primary labels mark the offending text. Secondary labels add context,
/// such as the whole placement field around a broken rank.
#[derive(Debug, Clone)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    /// Create a new primary label.
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    /// Create a new secondary label.
    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if this is a primary label.
    pub fn is_primary(&self) -> bool {
        self.is_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_label() {
        let label = Label::primary(Span::new(4..5), "unexpected `x`");

        assert_eq!(label.span(), Span::new(4..5));
        assert_eq!(label.message(), "unexpected `x`");
        assert!(label.is_primary());
    }

    #[test]
    fn test_secondary_label() {
        let label = Label::secondary(Span::new(0..43), "in this placement");

        assert!(!label.is_primary());
        assert_eq!(label.span().len(), 43);
    }
}
