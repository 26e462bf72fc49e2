//! Two-pass reader: header commands, then the terrain rows after `map`

use log::{debug, warn};

use crate::error::{FormatError, Span};
use crate::grid::{Coord, DoorRegistry, GridDocument, RegistryConflict, DEFAULT_MAP_TYPE};
use crate::parser::ast::{HeaderCommand, KeyDecl, Spanned};
use crate::parser::lexer::{lex, Token};

/// Line that separates the header from the grid. Matched against the whole line.
pub const MAP_SEPARATOR: &str = "map";

/// Reader settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Reject a door listed under two keys and a key that is also a door.
    /// Off by default: such maps are accepted and a warning is logged.
    pub strict: bool,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// A source line without its terminator, and where it sits in the input
struct Line<'a> {
    text: &'a str,
    span: Span,
}

fn split_lines(input: &str) -> Vec<Line<'_>> {
    let mut offset = 0;
    let mut lines = Vec::new();
    for raw in input.split('\n') {
        let text = raw.strip_suffix('\r').unwrap_or(raw);
        lines.push(Line {
            text,
            span: offset..offset + text.len(),
        });
        offset += raw.len() + 1;
    }
    lines
}

/// Parse grid-map text with default (lenient) options
pub fn parse(input: &str) -> Result<GridDocument, FormatError> {
    parse_with_options(input, ParseOptions::default())
}

/// Parse grid-map text into a [`GridDocument`]
pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<GridDocument, FormatError> {
    let lines = split_lines(input);
    let separator = lines
        .iter()
        .position(|line| line.text == MAP_SEPARATOR)
        .ok_or(FormatError::MissingSeparator {
            span: input.len()..input.len(),
        })?;

    // Header: last `height`/`width`/`type` wins
    let mut map_type: Option<String> = None;
    let mut height: Option<Spanned<usize>> = None;
    let mut width: Option<Spanned<usize>> = None;
    let mut doors = DoorRegistry::new();
    let mut key_spans: Vec<(Coord, Span)> = Vec::new();
    let mut placeholders = 0usize;

    for line in &lines[..separator] {
        let command = parse_header_line(line.text, line.span.start)?;
        match command.node {
            HeaderCommand::Height(h) => height = Some(Spanned::new(h, command.span)),
            HeaderCommand::Width(w) => width = Some(Spanned::new(w, command.span)),
            HeaderCommand::Type(t) => map_type = Some(t),
            HeaderCommand::Key(decl) => {
                if doors.insert(decl.key, decl.doors).is_some() {
                    debug!("key {} declared again, replacing its doors", decl.key);
                }
                key_spans.push((decl.key, command.span));
            }
            HeaderCommand::PlaceholderKey => placeholders += 1,
            HeaderCommand::Unknown(word) => debug!("ignoring header command '{}'", word),
            HeaderCommand::Blank => {}
        }
    }

    for conflict in doors.conflicts() {
        let error = conflict_error(&conflict, &key_spans);
        if options.strict {
            return Err(error);
        }
        warn!("{}", error);
    }

    // Grid: every line after the separator, minus trailing blank lines
    let separator_span = lines[separator].span.clone();
    let mut rows: Vec<&Line<'_>> = lines[separator + 1..].iter().collect();
    while rows.last().is_some_and(|line| line.text.is_empty()) {
        rows.pop();
    }
    if rows.is_empty() {
        return Err(FormatError::EmptyMatrix {
            span: separator_span,
        });
    }

    let matrix: Vec<Vec<char>> = rows.iter().map(|line| line.text.chars().collect()).collect();

    let width = match width {
        Some(w) => w.node,
        None if matrix[0].is_empty() => {
            return Err(FormatError::ZeroDimension {
                command: "width".to_string(),
                span: rows[0].span.clone(),
            })
        }
        None => matrix[0].len(),
    };

    let (height, height_span) = match height {
        Some(h) => (h.node, h.span),
        None => (matrix.len(), separator_span),
    };
    if matrix.len() != height {
        return Err(FormatError::RowCount {
            expected: height,
            found: matrix.len(),
            span: height_span,
        });
    }

    for (row, (cells, line)) in matrix.iter().zip(&rows).enumerate() {
        if cells.len() != width {
            return Err(FormatError::RowLength {
                row,
                expected: width,
                found: cells.len(),
                span: line.span.clone(),
            });
        }
    }

    debug!(
        "parsed {}x{} grid with {} keys ({} placeholder keys skipped)",
        width,
        height,
        doors.len(),
        placeholders
    );

    Ok(GridDocument {
        matrix,
        height,
        width,
        map_type: map_type.unwrap_or_else(|| DEFAULT_MAP_TYPE.to_string()),
        doors,
    })
}

/// Parse a single header line. `offset` is the line's byte offset in the
/// full input, so spans in errors point into the whole document.
pub fn parse_header_line(line: &str, offset: usize) -> Result<Spanned<HeaderCommand>, FormatError> {
    let span = offset..offset + line.len();
    let tokens: Vec<(Token, Span)> = lex(line).collect();

    let Some(((command, command_span), args)) = tokens.split_first() else {
        return Ok(Spanned::new(HeaderCommand::Blank, span));
    };

    let node = match command {
        Token::Word(word) if word == "height" => {
            HeaderCommand::Height(dimension_argument("height", line, args, &span)?)
        }
        Token::Word(word) if word == "width" => {
            HeaderCommand::Width(dimension_argument("width", line, args, &span)?)
        }
        Token::Word(word) if word == "type" => match args.first() {
            Some((_, arg)) => HeaderCommand::Type(line[arg.clone()].to_string()),
            None => {
                return Err(FormatError::MissingArgument {
                    command: "type".to_string(),
                    span,
                })
            }
        },
        Token::Word(word) if word == "key" => key_arguments(line, args, &span)?,
        _ => HeaderCommand::Unknown(line[command_span.clone()].to_string()),
    };

    Ok(Spanned::new(node, span))
}

fn dimension_argument(
    command: &str,
    line: &str,
    args: &[(Token, Span)],
    span: &Span,
) -> Result<usize, FormatError> {
    match args.first() {
        Some((Token::Int(0), _)) => Err(FormatError::ZeroDimension {
            command: command.to_string(),
            span: span.clone(),
        }),
        Some((Token::Int(n), _)) => Ok(*n),
        Some((_, arg)) => Err(FormatError::InvalidInteger {
            command: command.to_string(),
            found: line[arg.clone()].to_string(),
            span: span.clone(),
        }),
        None => Err(FormatError::MissingArgument {
            command: command.to_string(),
            span: span.clone(),
        }),
    }
}

fn key_arguments(line: &str, args: &[(Token, Span)], span: &Span) -> Result<HeaderCommand, FormatError> {
    match args.first() {
        Some((Token::Placeholder, _)) => return Ok(HeaderCommand::PlaceholderKey),
        None => {
            return Err(FormatError::MissingArgument {
                command: "key".to_string(),
                span: span.clone(),
            })
        }
        Some(_) => {}
    }

    let values = args
        .iter()
        .map(|(tok, arg)| match tok {
            Token::Int(n) => Ok(*n),
            _ => Err(FormatError::InvalidInteger {
                command: "key".to_string(),
                found: line[arg.clone()].to_string(),
                span: span.clone(),
            }),
        })
        .collect::<Result<Vec<usize>, _>>()?;

    if values.len() % 2 != 0 {
        return Err(FormatError::OddCoordinateCount {
            count: values.len(),
            span: span.clone(),
        });
    }

    let mut pairs = values.chunks(2).map(|pair| Coord::new(pair[0], pair[1]));
    let key = pairs.next().ok_or(FormatError::MissingArgument {
        command: "key".to_string(),
        span: span.clone(),
    })?;

    Ok(HeaderCommand::Key(KeyDecl {
        key,
        doors: pairs.collect(),
    }))
}

fn conflict_error(conflict: &RegistryConflict, key_spans: &[(Coord, Span)]) -> FormatError {
    let span_of = |key: Coord| {
        key_spans
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, span)| span.clone())
            .unwrap_or(0..0)
    };
    match conflict {
        RegistryConflict::DuplicateDoor { door, first, second } => FormatError::DuplicateDoor {
            door: *door,
            first: *first,
            second: *second,
            span: span_of(*second),
        },
        RegistryConflict::KeyIsDoor { key } => FormatError::KeyIsDoor {
            key: *key,
            span: span_of(*key),
        },
    }
}
