use super::sequence::{NoteName, Sequence, Step};
use super::ParseError;

/// Recursive-descent parser over one note string.
///
/// Grammar:
///   sequence := step (ws step)*
///   step     := atom ('*' count)?
///   atom     := '[' sequence ']' | '<' sequence '>' | '~' | word
pub(crate) struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn parse(mut self) -> Result<Sequence, ParseError> {
        let steps = self.steps(None)?;
        if steps.is_empty() {
            return Err(self.error(0, "empty note sequence"));
        }
        Ok(Sequence::new(steps))
    }

    /// Parse steps until `close` (or end of input when `close` is None).
    fn steps(&mut self, close: Option<char>) -> Result<Vec<Step>, ParseError> {
        let mut steps = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => {
                    if let Some(close) = close {
                        return Err(self.error(self.pos, format!("expected '{close}'")));
                    }
                    return Ok(steps);
                }
                Some(c) if Some(c) == close => {
                    self.bump();
                    return Ok(steps);
                }
                Some(c @ (']' | '>')) => {
                    return Err(self.error(self.pos, format!("unexpected '{c}'")));
                }
                Some(_) => steps.push(self.step()?),
            }
        }
    }

    fn step(&mut self) -> Result<Step, ParseError> {
        let start = self.pos;
        let atom = match self.peek() {
            Some('[') => {
                self.bump();
                let inner = self.steps(Some(']'))?;
                if inner.is_empty() {
                    return Err(self.error(start, "empty group"));
                }
                Step::Group(inner)
            }
            Some('<') => {
                self.bump();
                let inner = self.steps(Some('>'))?;
                if inner.is_empty() {
                    return Err(self.error(start, "empty alternation"));
                }
                Step::Alternate(inner)
            }
            Some('~') => {
                self.bump();
                Step::Rest
            }
            _ => self.word()?,
        };

        if self.peek() == Some('*') {
            self.bump();
            let count_start = self.pos;
            let digits = self.take_while(|c| c.is_ascii_digit());
            let times: u32 = digits
                .parse()
                .map_err(|_| self.error(count_start, "expected repeat count after '*'"))?;
            if times == 0 {
                return Err(self.error(count_start, "repeat count must be at least 1"));
            }
            return Ok(Step::Repeat(Box::new(atom), times));
        }

        Ok(atom)
    }

    fn word(&mut self) -> Result<Step, ParseError> {
        let start = self.pos;
        let word = self.take_while(|c| c.is_ascii_alphanumeric() || c == '-' || c == '#');
        if word.is_empty() {
            let found = self.peek().unwrap_or(' ');
            return Err(self.error(start, format!("unexpected '{found}'")));
        }

        if let Ok(degree) = word.parse::<i32>() {
            return Ok(Step::Degree(degree));
        }
        NoteName::parse(word)
            .map(Step::Note)
            .ok_or_else(|| self.error(start, format!("invalid note '{word}'")))
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
        &input[start..self.pos]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> ParseError {
        ParseError {
            input: self.input.to_string(),
            offset,
            message: message.into(),
        }
    }
}
