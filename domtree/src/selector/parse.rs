use super::{AttributeMatch, Combinator, Complex, Compound};
use crate::error::SelectorError;

pub(super) struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}

impl<'a> Parser<'a> {
    pub(super) fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    pub(super) fn selector_list(mut self) -> Result<Vec<Complex>, SelectorError> {
        let mut alternatives = Vec::new();
        loop {
            self.skip_whitespace();
            alternatives.push(self.complex()?);
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(',') => self.pos += 1,
                Some(_) => return Err(self.error("unexpected character")),
            }
        }
        Ok(alternatives)
    }

    fn complex(&mut self) -> Result<Complex, SelectorError> {
        let mut parts = vec![self.compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_whitespace = self.skip_whitespace();
            match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_whitespace();
                    combinators.push(Combinator::Child);
                }
                Some(_) if had_whitespace => combinators.push(Combinator::Descendant),
                Some(_) => return Err(self.error("unexpected character")),
            }
            parts.push(self.compound()?);
        }
        Ok(Complex { parts, combinators })
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let start = self.pos;
        let mut compound = Compound::default();

        match self.peek() {
            Some('*') => self.pos += 1,
            Some(c) if is_ident_char(c) => {
                compound.tag = Some(self.ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        loop {
            match self.peek() {
                Some('.') => {
                    self.pos += 1;
                    compound.classes.push(self.ident()?);
                }
                Some('#') => {
                    self.pos += 1;
                    compound.ids.push(self.ident()?);
                }
                Some('[') => {
                    self.pos += 1;
                    compound.attributes.push(self.attribute()?);
                }
                _ => break,
            }
        }

        if self.pos == start {
            return Err(self.error("expected a selector"));
        }
        Ok(compound)
    }

    fn attribute(&mut self) -> Result<AttributeMatch, SelectorError> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();

        let value = if self.peek() == Some('=') {
            self.pos += 1;
            self.skip_whitespace();
            let value = match self.peek() {
                Some(quote @ ('"' | '\'')) => self.quoted(quote)?,
                _ => self.ident()?,
            };
            self.skip_whitespace();
            Some(value)
        } else {
            None
        };

        if self.peek() != Some(']') {
            return Err(self.error("expected ']'"));
        }
        self.pos += 1;
        Ok(AttributeMatch { name, value })
    }

    fn quoted(&mut self, quote: char) -> Result<String, SelectorError> {
        self.pos += 1;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c == quote {
                let value: String = self.chars[start..self.pos].iter().collect();
                self.pos += 1;
                return Ok(value);
            }
            self.pos += 1;
        }
        Err(self.error("unterminated string"))
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected an identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    /// Returns whether any whitespace was consumed.
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos != start
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn error(&self, reason: &'static str) -> SelectorError {
        SelectorError {
            selector: self.source.to_string(),
            position: self.pos,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::Selector;

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", ".", "div,", "[data-x", "[data-x=\"y]", "div > ", "a!b"] {
            assert!(Selector::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn error_reports_position() {
        let err = Selector::parse(".foo !").unwrap_err();
        assert_eq!(err.position, 5);
        assert_eq!(err.selector, ".foo !");
    }
}
