//! Note-string parsing.
//!
//! The loader turns textual note sequences (`"0 2 4"`) into pattern values
//! through a [`NoteParser`]. A live engine brings its own parser; the
//! [`MiniNotation`] parser here covers the subset of Strudel mini-notation
//! used in instrument bundles and produces the crate's [`Pattern`] graph.

mod parser;
/// Syntax tree for parsed note strings.
pub mod sequence;

use thiserror::Error;

use crate::pattern::Pattern;
use parser::Parser;
pub use sequence::{NoteName, Sequence, Step};

/// A note string the parser could not read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid note string {input:?} at offset {offset}: {message}")]
pub struct ParseError {
    /// The full note string as given
    pub input: String,
    /// Byte offset where parsing failed
    pub offset: usize,
    pub message: String,
}

impl ParseError {
    /// Build an error for parsers that do not track positions.
    pub fn new(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            offset: 0,
            message: message.into(),
        }
    }
}

/// Turns a textual note sequence into a pattern value.
pub trait NoteParser<P> {
    fn parse(&self, text: &str) -> Result<P, ParseError>;
}

impl<F, P> NoteParser<P> for F
where
    F: Fn(&str) -> Result<P, ParseError>,
{
    fn parse(&self, text: &str) -> Result<P, ParseError> {
        self(text)
    }
}

/// Mini-notation parser producing [`Pattern`] values (Strudel's `n("...")`).
#[derive(Debug, Clone, Copy, Default)]
pub struct MiniNotation;

impl NoteParser<Pattern> for MiniNotation {
    fn parse(&self, text: &str) -> Result<Pattern, ParseError> {
        parse_sequence(text).map(Pattern::from_sequence)
    }
}

/// Parse a note string into its syntax tree.
pub fn parse_sequence(text: &str) -> Result<Sequence, ParseError> {
    Parser::new(text).parse()
}
