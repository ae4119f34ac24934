//! Recursive-descent parser for the message grammar

use crate::ast::{DateTimePreset, Message, Node, NumberStyle, PluralNode, SelectNode};
use crate::error::{FormatError, FormatResult};

const PLURAL_CATEGORIES: [&str; 6] = ["zero", "one", "two", "few", "many", "other"];

/// Parse a message string into its compiled form
pub fn parse(message: &str) -> FormatResult<Message> {
    let chars: Vec<char> = message.chars().collect();
    let mut parser = Parser {
        chars: &chars,
        pos: 0,
    };
    let nodes = parser.parse_message(0, false)?;
    match parser.peek() {
        None => Ok(nodes),
        Some(found) => Err(FormatError::UnexpectedChar {
            found,
            offset: parser.pos,
        }),
    }
}

struct Parser<'a> {
    chars: &'a [char],
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn expect(&mut self, wanted: char) -> FormatResult<()> {
        match self.peek() {
            Some(c) if c == wanted => {
                self.pos += 1;
                Ok(())
            }
            Some(found) => Err(FormatError::UnexpectedChar {
                found,
                offset: self.pos,
            }),
            None => Err(FormatError::UnexpectedEnd { offset: self.pos }),
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn read_identifier(&mut self) -> FormatResult<String> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_' || c == '-') {
            self.pos += 1;
        }
        if self.pos == start {
            return match self.peek() {
                Some(found) => Err(FormatError::UnexpectedChar {
                    found,
                    offset: self.pos,
                }),
                None => Err(FormatError::UnexpectedEnd { offset: self.pos }),
            };
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn read_integer(&mut self) -> FormatResult<i64> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.pos += 1;
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        text.parse().map_err(|_| match self.peek() {
            Some(found) => FormatError::UnexpectedChar {
                found,
                offset: self.pos,
            },
            None => FormatError::UnexpectedEnd { offset: self.pos },
        })
    }

    /// Parse nodes until end of input, or until an unconsumed `}` when nested
    fn parse_message(&mut self, depth: usize, in_plural: bool) -> FormatResult<Message> {
        let mut nodes = Vec::new();
        let mut literal = String::new();

        while let Some(c) = self.peek() {
            match c {
                '{' => {
                    if !literal.is_empty() {
                        nodes.push(Node::Literal(std::mem::take(&mut literal)));
                    }
                    self.pos += 1;
                    nodes.push(self.parse_placeholder(in_plural)?);
                }
                '}' => {
                    if depth > 0 {
                        break;
                    }
                    return Err(FormatError::UnexpectedChar {
                        found: '}',
                        offset: self.pos,
                    });
                }
                '#' if in_plural => {
                    if !literal.is_empty() {
                        nodes.push(Node::Literal(std::mem::take(&mut literal)));
                    }
                    self.pos += 1;
                    nodes.push(Node::Pound);
                }
                '\'' => {
                    self.pos += 1;
                    self.read_quoted(&mut literal);
                }
                _ => {
                    literal.push(c);
                    self.pos += 1;
                }
            }
        }

        if !literal.is_empty() {
            nodes.push(Node::Literal(literal));
        }
        Ok(nodes)
    }

    /// Apostrophe handling: `''` is a literal quote; a quote before a
    /// syntax character opens a quoted span ending at the next single quote.
    fn read_quoted(&mut self, literal: &mut String) {
        match self.peek() {
            Some('\'') => {
                literal.push('\'');
                self.pos += 1;
            }
            Some('{') | Some('}') | Some('#') => {
                while let Some(c) = self.bump() {
                    if c == '\'' {
                        if self.peek() == Some('\'') {
                            literal.push('\'');
                            self.pos += 1;
                            continue;
                        }
                        return;
                    }
                    literal.push(c);
                }
                // Unterminated quoted span: everything so far is literal
            }
            _ => literal.push('\''),
        }
    }

    fn parse_placeholder(&mut self, in_plural: bool) -> FormatResult<Node> {
        self.skip_whitespace();
        let name = self.read_identifier()?;
        self.skip_whitespace();

        match self.peek() {
            Some('}') => {
                self.pos += 1;
                Ok(Node::Argument(name))
            }
            Some(',') => {
                self.pos += 1;
                self.skip_whitespace();
                let keyword = self.read_identifier()?;
                self.skip_whitespace();
                match keyword.as_str() {
                    "plural" => self.parse_plural(name, false),
                    "selectordinal" => self.parse_plural(name, true),
                    "select" => self.parse_select(name, in_plural),
                    "number" => self.parse_number(name),
                    "date" => self.parse_datetime(name, true),
                    "time" => self.parse_datetime(name, false),
                    _ => Err(FormatError::UnknownType {
                        keyword,
                        offset: self.pos,
                    }),
                }
            }
            Some(found) => Err(FormatError::UnexpectedChar {
                found,
                offset: self.pos,
            }),
            None => Err(FormatError::UnexpectedEnd { offset: self.pos }),
        }
    }

    fn parse_plural(&mut self, arg: String, ordinal: bool) -> FormatResult<Node> {
        let kind = if ordinal { "selectordinal" } else { "plural" };
        self.expect(',')?;

        let mut exact: Vec<(i64, Message)> = Vec::new();
        let mut arms: Vec<(String, Message)> = Vec::new();

        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(FormatError::UnexpectedEnd { offset: self.pos }),
                _ => {}
            }

            if self.peek() == Some('=') {
                self.pos += 1;
                let number = self.read_integer()?;
                if exact.iter().any(|(n, _)| *n == number) {
                    return Err(FormatError::DuplicateArm {
                        selector: format!("={}", number),
                        arg,
                    });
                }
                let body = self.parse_arm_body(true)?;
                exact.push((number, body));
            } else {
                let selector = self.read_identifier()?;
                if !PLURAL_CATEGORIES.contains(&selector.as_str()) {
                    return Err(FormatError::UnknownCategory { selector, arg });
                }
                if arms.iter().any(|(s, _)| *s == selector) {
                    return Err(FormatError::DuplicateArm { selector, arg });
                }
                let body = self.parse_arm_body(true)?;
                arms.push((selector, body));
            }
        }

        if !arms.iter().any(|(s, _)| s == "other") {
            return Err(FormatError::MissingOther { kind, arg });
        }

        Ok(Node::Plural(PluralNode {
            arg,
            ordinal,
            exact,
            arms,
        }))
    }

    fn parse_select(&mut self, arg: String, in_plural: bool) -> FormatResult<Node> {
        self.expect(',')?;

        let mut arms: Vec<(String, Message)> = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some('}') => {
                    self.pos += 1;
                    break;
                }
                None => return Err(FormatError::UnexpectedEnd { offset: self.pos }),
                _ => {}
            }

            let selector = self.read_identifier()?;
            if arms.iter().any(|(s, _)| *s == selector) {
                return Err(FormatError::DuplicateArm { selector, arg });
            }
            // `#` keeps its meaning from an enclosing plural arm
            let body = self.parse_arm_body(in_plural)?;
            arms.push((selector, body));
        }

        if !arms.iter().any(|(s, _)| s == "other") {
            return Err(FormatError::MissingOther {
                kind: "select",
                arg,
            });
        }

        Ok(Node::Select(SelectNode { arg, arms }))
    }

    fn parse_arm_body(&mut self, in_plural: bool) -> FormatResult<Message> {
        self.skip_whitespace();
        self.expect('{')?;
        let body = self.parse_message(1, in_plural)?;
        self.expect('}')?;
        Ok(body)
    }

    fn parse_number(&mut self, arg: String) -> FormatResult<Node> {
        let style = match self.peek() {
            Some(',') => {
                self.pos += 1;
                self.skip_whitespace();
                let word = self.read_identifier()?;
                self.skip_whitespace();
                NumberStyle::from_name(&word).ok_or(FormatError::UnknownStyle {
                    kind: "number",
                    style: word,
                })?
            }
            _ => NumberStyle::Decimal,
        };
        self.expect('}')?;
        Ok(Node::Number { arg, style })
    }

    fn parse_datetime(&mut self, arg: String, is_date: bool) -> FormatResult<Node> {
        let preset = match self.peek() {
            Some(',') => {
                self.pos += 1;
                self.skip_whitespace();
                let word = self.read_identifier()?;
                self.skip_whitespace();
                DateTimePreset::from_name(&word).ok_or(FormatError::UnknownStyle {
                    kind: if is_date { "date" } else { "time" },
                    style: word,
                })?
            }
            _ => DateTimePreset::Medium,
        };
        self.expect('}')?;
        if is_date {
            Ok(Node::Date { arg, preset })
        } else {
            Ok(Node::Time { arg, preset })
        }
    }
}
