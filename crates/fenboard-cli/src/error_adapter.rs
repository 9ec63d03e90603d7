//! Turns [`FenboardError`] into [`miette`] reports.
//!
//! A bad FEN string can break several ranks at once; every parser
//! diagnostic becomes its own report with a snippet of the FEN string.
//! Everything else is a single report carrying a `fenboard::<kind>` code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceCode, SourceSpan};

use fenboard::FenboardError;
use fenboard_parser::{Span, error::Diagnostic};

/// One parser diagnostic, paired with the text its spans index.
#[derive(Debug)]
pub struct FenDiagnostic<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> FenDiagnostic<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Display for FenDiagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for FenDiagnostic<'_> {}

impl MietteDiagnostic for FenDiagnostic<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = self.diag.code()?;
        Some(Box::new(code) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = self.diag.help()?;
        Some(Box::new(help) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let text = Some(label.message().to_string());
            let span = source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(text, span)
            } else {
                LabeledSpan::new_with_span(text, span)
            }
        })))
    }
}

/// A [`FenboardError`] that has no source text to point into.
#[derive(Debug)]
pub struct PlainError<'a>(pub &'a FenboardError);

impl fmt::Display for PlainError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.0, f)
    }
}

impl std::error::Error for PlainError<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for PlainError<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        error_code(self.0).map(|code| Box::new(code) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        error_help(self.0).map(|help| Box::new(help) as Box<dyn fmt::Display>)
    }
}

fn error_code(err: &FenboardError) -> Option<&'static str> {
    Some(match err {
        FenboardError::Io(_) => "fenboard::io",
        FenboardError::Parse { .. } => return None,
        FenboardError::InvalidArrow { .. } => "fenboard::arrow",
        FenboardError::Invariant(_) => "fenboard::invariant",
        FenboardError::MissingSprite(_) => "fenboard::sprite",
        FenboardError::Resource { .. } => "fenboard::resource",
        FenboardError::Raster(_) => "fenboard::raster",
        FenboardError::Config(_) => "fenboard::config",
    })
}

fn error_help(err: &FenboardError) -> Option<&'static str> {
    match err {
        FenboardError::InvalidArrow { .. } => {
            Some("arrows must follow a knight move, a rank, a file, or a diagonal")
        }
        FenboardError::MissingSprite(_) => {
            Some("piece folders need `white/` and `black/` with one PNG per piece kind")
        }
        _ => None,
    }
}

/// Anything [`to_reportables`] hands to the report handler.
#[derive(Debug)]
pub enum Reportable<'a> {
    Diagnostic(FenDiagnostic<'a>),
    Error(PlainError<'a>),
}

impl Reportable<'_> {
    fn inner(&self) -> &dyn MietteDiagnostic {
        match self {
            Reportable::Diagnostic(diag) => diag,
            Reportable::Error(err) => err,
        }
    }
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.inner())
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.inner().code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.inner().help()
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.inner().source_code()
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        self.inner().labels()
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Splits `err` into the reports printed for it: one per diagnostic for a
/// parse error, otherwise exactly one.
pub fn to_reportables(err: &FenboardError) -> Vec<Reportable<'_>> {
    match err {
        FenboardError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Reportable::Diagnostic(FenDiagnostic::new(diag, src)))
            .collect(),
        _ => vec![Reportable::Error(PlainError(err))],
    }
}
