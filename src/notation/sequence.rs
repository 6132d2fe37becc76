/*
Mini-Notation Syntax Tree
=========================

A note string like "0 [2 4] <5 7> ~" describes one cycle of music. Every
top-level step gets an equal share of the cycle; brackets subdivide a step.

  "0 2 4 5"        = four equal steps
  "0 [2 4] 5 ~"    = quarter, two eighths, quarter, rest
  "<0 3> 4"        = first step alternates 0, 3, 0, 3 ... per cycle
  "0*2 4"          = first half holds two 0s

Steps are either scale degrees (integers, resolved later by `.scale()`),
note names (c4, eb3, f#2), or rests. The tree is kept as written; timing is
left to the engine.
*/

#[cfg(feature = "serde")]
use serde::Serialize;
use std::fmt;

/// One step of a mini-notation sequence
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Step {
    /// Scale degree (or raw note number when no scale is applied)
    Degree(i32),
    /// Named pitch such as `c4` or `eb3`
    Note(NoteName),
    /// Silence for this step
    Rest,
    /// Subdivide this step into smaller equal parts (`[a b]`)
    Group(Vec<Step>),
    /// Pick one child per cycle, in order (`<a b>`)
    Alternate(Vec<Step>),
    /// Play the step `n` times within its slot (`a*n`)
    Repeat(Box<Step>, u32),
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Degree(degree) => write!(f, "{degree}"),
            Step::Note(name) => write!(f, "{name}"),
            Step::Rest => f.write_str("~"),
            Step::Group(steps) => {
                f.write_str("[")?;
                write_steps(f, steps)?;
                f.write_str("]")
            }
            Step::Alternate(steps) => {
                f.write_str("<")?;
                write_steps(f, steps)?;
                f.write_str(">")
            }
            Step::Repeat(step, times) => write!(f, "{step}*{times}"),
        }
    }
}

fn write_steps(f: &mut fmt::Formatter<'_>, steps: &[Step]) -> fmt::Result {
    for (i, step) in steps.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{step}")?;
    }
    Ok(())
}

/// A named pitch, kept as written alongside its MIDI note number
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct NoteName {
    /// Text as it appeared in the note string (lowercased)
    pub text: String,
    /// MIDI note number (C4 = 60)
    pub midi: u8,
}

impl NoteName {
    /// Octave used when a name carries none (`"c"` is C3, as in Strudel)
    pub const DEFAULT_OCTAVE: i32 = 3;

    /// Parse a note name like `c4`, `eb3`, `f#2` or `a`.
    ///
    /// The MIDI formula is `12 * (octave + 1) + semitone` where
    /// C=0, D=2, E=4, F=5, G=7, A=9, B=11. Sharps are `#` or `s`.
    pub fn parse(token: &str) -> Option<Self> {
        let text = token.to_ascii_lowercase();
        let mut chars = text.chars().peekable();

        let semitone: i32 = match chars.next()? {
            'c' => 0,
            'd' => 2,
            'e' => 4,
            'f' => 5,
            'g' => 7,
            'a' => 9,
            'b' => 11,
            _ => return None,
        };

        let mut accidental: i32 = 0;
        while let Some(&c) = chars.peek() {
            accidental = match c {
                '#' | 's' => accidental.checked_add(1)?,
                'b' => accidental.checked_sub(1)?,
                _ => break,
            };
            chars.next();
        }

        let rest: String = chars.collect();
        let octave = if rest.is_empty() {
            Self::DEFAULT_OCTAVE
        } else {
            rest.parse::<i32>().ok()?
        };

        let midi = octave
            .checked_add(1)
            .and_then(|o| o.checked_mul(12))
            .and_then(|m| m.checked_add(semitone))
            .and_then(|m| m.checked_add(accidental))?;
        let midi = u8::try_from(midi).ok().filter(|m| *m <= 127)?;
        Some(Self { text, midi })
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One cycle of steps, as parsed from a note string
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Sequence {
    pub steps: Vec<Step>,
}

impl Sequence {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Number of top-level steps (each gets an equal share of the cycle)
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_steps(f, &self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_name_midi_numbers() {
        assert_eq!(NoteName::parse("c4").unwrap().midi, 60);
        assert_eq!(NoteName::parse("a4").unwrap().midi, 69);
        assert_eq!(NoteName::parse("eb3").unwrap().midi, 51);
        assert_eq!(NoteName::parse("f#2").unwrap().midi, 42);
        assert_eq!(NoteName::parse("cs4").unwrap().midi, 61);
    }

    #[test]
    fn test_note_name_default_octave() {
        let c = NoteName::parse("C").unwrap();
        assert_eq!(c.midi, 48);
        assert_eq!(c.text, "c");
    }

    #[test]
    fn test_note_name_rejects_garbage() {
        assert!(NoteName::parse("h4").is_none());
        assert!(NoteName::parse("cx").is_none());
        assert!(NoteName::parse("c99").is_none());
        assert!(NoteName::parse("").is_none());
    }

    #[test]
    fn test_display_is_canonical() {
        let seq = Sequence::new(vec![
            Step::Degree(0),
            Step::Group(vec![Step::Degree(2), Step::Degree(-1)]),
            Step::Alternate(vec![Step::Degree(5), Step::Rest]),
            Step::Repeat(Box::new(Step::Note(NoteName::parse("c4").unwrap())), 2),
        ]);
        assert_eq!(seq.to_string(), "0 [2 -1] <5 ~> c4*2");
    }

    #[test]
    fn test_note_name_huge_octave_is_rejected() {
        assert!(NoteName::parse("c2147483647").is_none());
        assert!(NoteName::parse("c999999999").is_none());
        assert!(NoteName::parse("c-2147483648").is_none());
        assert!(NoteName::parse("c-2").is_none());
    }
}
