/*
Declarative Pattern Graph
=========================

`Pattern` is a recorded chain of engine calls: a source (the parsed note
string) followed by every operation applied to it, in order.

  n("0 2 4")                            <- Source::Notation
    .scale("C:major")                   <- Op::Scale
    .note()                             <- Op::Note
    .sound("piano")                     <- Op::Sound
    .gain(0.8)                          <- Op::Control { name: "gain", .. }

Nothing here evaluates the pattern. `Display` prints the chain as Strudel
code so it can be pasted into a REPL or handed to the engine, and the graph
can be inspected directly (`ops()`, `count_control()`) to check which
transforms ran and how many times.
*/

use log::warn;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

use super::extensions::Controllable;
use super::PatternValue;
use crate::notation::Sequence;

/// Parameter passed to a control operation (`.gain(0.8)`, `.vowel("a")`)
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ControlValue {
    Number(f64),
    Text(String),
}

impl From<f64> for ControlValue {
    fn from(value: f64) -> Self {
        ControlValue::Number(value)
    }
}

impl From<f32> for ControlValue {
    fn from(value: f32) -> Self {
        ControlValue::Number(value as f64)
    }
}

impl From<i32> for ControlValue {
    fn from(value: i32) -> Self {
        ControlValue::Number(value as f64)
    }
}

impl From<&str> for ControlValue {
    fn from(value: &str) -> Self {
        ControlValue::Text(value.to_string())
    }
}

impl From<String> for ControlValue {
    fn from(value: String) -> Self {
        ControlValue::Text(value)
    }
}

impl ControlValue {
    /// Text, or a finite number
    pub fn is_valid(&self) -> bool {
        match self {
            ControlValue::Number(n) => n.is_finite(),
            ControlValue::Text(_) => true,
        }
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlValue::Number(n) if n.is_nan() => f.write_str("NaN"),
            ControlValue::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            ControlValue::Number(n) => write!(f, "{n}"),
            ControlValue::Text(s) => write_js_string(f, s),
        }
    }
}

/// True for names usable as a method call in generated code
/// (`[A-Za-z_$][A-Za-z0-9_$]*`)
pub fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Write `s` as a double-quoted JavaScript string literal
fn write_js_string(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            // line/paragraph separators end a string literal in older engines
            '\u{2028}' | '\u{2029}' => write!(f, "\\u{:04x}", c as u32)?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => f.write_char(c)?,
        }
    }
    f.write_char('"')
}

/// One recorded engine call
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Op {
    Scale(String),
    Note,
    Sound(String),
    /// Any further chained call, e.g. `.delay(0.3)`
    Control { name: String, value: ControlValue },
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Scale(name) => {
                f.write_str(".scale(")?;
                write_js_string(f, name)?;
                f.write_str(")")
            }
            Op::Note => f.write_str(".note()"),
            Op::Sound(name) => {
                f.write_str(".sound(")?;
                write_js_string(f, name)?;
                f.write_str(")")
            }
            Op::Control { name, value } => write!(f, ".{name}({value})"),
        }
    }
}

/// Where a pattern's events come from
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Source {
    /// Parsed mini-notation, rendered as `n("...")`
    Notation(Sequence),
    /// An engine expression supplied verbatim, e.g. `s("bd sd")`
    Code(String),
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Notation(sequence) => {
                f.write_str("n(")?;
                write_js_string(f, &sequence.to_string())?;
                f.write_str(")")
            }
            Source::Code(code) => f.write_str(code),
        }
    }
}

/// A pattern value: a source plus the operations applied to it
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Pattern {
    source: Source,
    ops: Vec<Op>,
}

impl Pattern {
    pub fn from_sequence(sequence: Sequence) -> Self {
        Self {
            source: Source::Notation(sequence),
            ops: Vec::new(),
        }
    }

    /// Wrap an engine expression that was built elsewhere
    pub fn from_code(code: impl Into<String>) -> Self {
        Self {
            source: Source::Code(code.into()),
            ops: Vec::new(),
        }
    }

    pub fn source(&self) -> &Source {
        &self.source
    }

    /// Operations applied so far, oldest first
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Append an operation.
    ///
    /// Control calls whose name is not an identifier, or whose value is a
    /// non-finite number, are dropped with a warning.
    pub fn apply(mut self, op: Op) -> Self {
        if let Op::Control { name, value } = &op {
            if !is_js_identifier(name) {
                warn!("dropping control with invalid name {name:?}");
                return self;
            }
            if !value.is_valid() {
                warn!("dropping control .{name}() with non-finite value {value}");
                return self;
            }
        }
        self.ops.push(op);
        self
    }

    /// How many times the named control was applied
    pub fn count_control(&self, name: &str) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Control { name: n, .. } if n == name))
            .count()
    }
}

impl PatternValue for Pattern {
    fn scale(self, name: &str) -> Self {
        self.apply(Op::Scale(name.to_string()))
    }

    fn note(self) -> Self {
        self.apply(Op::Note)
    }

    fn sound(self, name: &str) -> Self {
        self.apply(Op::Sound(name.to_string()))
    }
}

impl Controllable for Pattern {
    fn control(self, name: &str, value: ControlValue) -> Self {
        self.apply(Op::Control {
            name: name.to_string(),
            value,
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)?;
        for op in &self.ops {
            write!(f, "{op}")?;
        }
        Ok(())
    }
}
