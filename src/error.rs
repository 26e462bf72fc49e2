//! Error types for reading grid-map text

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::grid::Coord;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A malformed grid-map document. Parsing stops at the first one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("no `map` line separating the header from the grid")]
    MissingSeparator { span: Span },

    #[error("`{command}` expects a non-negative integer, found '{found}'")]
    InvalidInteger {
        command: String,
        found: String,
        span: Span,
    },

    #[error("`{command}` is missing its argument")]
    MissingArgument { command: String, span: Span },

    #[error("`key` has {count} coordinate values, coordinates come in (col, row) pairs")]
    OddCoordinateCount { count: usize, span: Span },

    #[error("the grid has no rows")]
    EmptyMatrix { span: Span },

    #[error("row {row} has {found} cells, expected {expected}")]
    RowLength {
        row: usize,
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("the grid has {found} rows, expected {expected}")]
    RowCount {
        expected: usize,
        found: usize,
        span: Span,
    },

    #[error("`{command}` must be at least 1")]
    ZeroDimension { command: String, span: Span },

    #[error("door {door} is unlocked by both key {first} and key {second}")]
    DuplicateDoor {
        door: Coord,
        first: Coord,
        second: Coord,
        span: Span,
    },

    #[error("key {key} is also declared as a door")]
    KeyIsDoor { key: Coord, span: Span },
}

impl FormatError {
    /// Location of the offending line in the source
    pub fn span(&self) -> &Span {
        match self {
            FormatError::MissingSeparator { span }
            | FormatError::InvalidInteger { span, .. }
            | FormatError::MissingArgument { span, .. }
            | FormatError::OddCoordinateCount { span, .. }
            | FormatError::EmptyMatrix { span }
            | FormatError::RowLength { span, .. }
            | FormatError::RowCount { span, .. }
            | FormatError::ZeroDimension { span, .. }
            | FormatError::DuplicateDoor { span, .. }
            | FormatError::KeyIsDoor { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let message = self.to_string();
        let span = self.clamped_span(source.len());

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(message.clone())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("{}: {}", filename, message),
        }
    }

    fn clamped_span(&self, len: usize) -> Span {
        let span = self.span();
        let end = span.end.min(len);
        span.start.min(end)..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = FormatError::OddCoordinateCount {
            count: 3,
            span: 0..9,
        };
        assert_eq!(
            err.to_string(),
            "`key` has 3 coordinate values, coordinates come in (col, row) pairs"
        );

        let err = FormatError::RowLength {
            row: 2,
            expected: 4,
            found: 3,
            span: 0..3,
        };
        assert_eq!(err.to_string(), "row 2 has 3 cells, expected 4");
    }

    #[test]
    fn test_format_includes_filename_and_message() {
        let source = "type octile\nkey 1 2 3\nmap\n..\n";
        let err = FormatError::OddCoordinateCount {
            count: 3,
            span: 12..21,
        };
        let report = err.format(source, "doors.map");
        assert!(report.contains("doors.map"));
        assert!(report.contains("coordinate values"));
    }

    #[test]
    fn test_format_tolerates_span_past_end() {
        let err = FormatError::MissingSeparator { span: 40..50 };
        let report = err.format("type octile\n", "broken.map");
        assert!(report.contains("map"));
    }
}
