//! Placeholder substitution with randomly drawn free cells

use log::debug;
use rand::Rng;
use thiserror::Error;

use crate::error::FormatError;
use crate::grid::{Coord, GridDocument};
use crate::parser::lexer::PLACEHOLDER;
use crate::parser::{parse_with_options, ParseOptions};

/// Errors that can occur while filling a template
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The grid has no free cell to place a key on
    #[error("no free cell available to place a key")]
    NoFreeCell,

    /// Distinct keys were requested but the grid is too small
    #[error("{requested} distinct keys requested but only {available} free cells")]
    NotEnoughFreeCells { requested: usize, available: usize },
}

/// Options for template instantiation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstantiateOptions {
    /// Draw without replacement so no two placeholders get the same cell.
    /// Off by default: every draw samples the whole free population.
    pub distinct_keys: bool,
}

impl InstantiateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_distinct_keys(mut self, distinct: bool) -> Self {
        self.distinct_keys = distinct;
        self
    }
}

/// Number of `$key$` occurrences in `text` (non-overlapping)
pub fn count_placeholders(text: &str) -> usize {
    text.matches(PLACEHOLDER).count()
}

/// Draw `count` cells uniformly from `free`.
///
/// With `distinct` unset each draw is independent, so a cell can come up
/// more than once.
pub fn draw_free_cells<R: Rng + ?Sized>(
    free: &[Coord],
    count: usize,
    distinct: bool,
    rng: &mut R,
) -> Result<Vec<Coord>, TemplateError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if free.is_empty() {
        return Err(TemplateError::NoFreeCell);
    }

    if distinct {
        if free.len() < count {
            return Err(TemplateError::NotEnoughFreeCells {
                requested: count,
                available: free.len(),
            });
        }
        Ok(rand::seq::index::sample(rng, free.len(), count)
            .into_iter()
            .map(|i| free[i])
            .collect())
    } else {
        Ok((0..count)
            .map(|_| free[rng.random_range(0..free.len())])
            .collect())
    }
}

/// Fill every placeholder of `template` with a free cell of `document`
pub fn instantiate<R: Rng + ?Sized>(
    template: &str,
    document: &GridDocument,
    rng: &mut R,
) -> Result<String, TemplateError> {
    instantiate_with_options(template, document, rng, InstantiateOptions::default())
}

/// Fill every placeholder of `template` with a free cell of `document`.
///
/// Placeholders are replaced first to last with `"<col> <row>"`. Sampled
/// cells are not checked against the template's own doors.
pub fn instantiate_with_options<R: Rng + ?Sized>(
    template: &str,
    document: &GridDocument,
    rng: &mut R,
    options: InstantiateOptions,
) -> Result<String, TemplateError> {
    let count = count_placeholders(template);
    if count == 0 {
        return Ok(template.to_string());
    }

    let free = document.all_free();
    let keys = draw_free_cells(&free, count, options.distinct_keys, rng)?;
    debug!(
        "placing {} keys among {} free cells",
        keys.len(),
        free.len()
    );

    let mut out = String::with_capacity(template.len() + count * 8);
    let mut pieces = template.split(PLACEHOLDER);
    if let Some(head) = pieces.next() {
        out.push_str(head);
    }
    for (piece, key) in pieces.zip(&keys) {
        out.push_str(&key.to_pair());
        out.push_str(piece);
    }
    Ok(out)
}

/// Template text together with its placeholder count
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderTemplate<'a> {
    text: &'a str,
    placeholders: usize,
}

impl<'a> PlaceholderTemplate<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            placeholders: count_placeholders(text),
        }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders
    }

    /// The grid described by the template; placeholder keys are not registered
    pub fn document(&self, options: ParseOptions) -> Result<GridDocument, FormatError> {
        parse_with_options(self.text, options)
    }

    /// Instantiate against the template's own grid
    pub fn instantiate<R: Rng + ?Sized>(
        &self,
        document: &GridDocument,
        rng: &mut R,
        options: InstantiateOptions,
    ) -> Result<String, TemplateError> {
        instantiate_with_options(self.text, document, rng, options)
    }
}
