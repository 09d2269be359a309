//! Selector grammar: the subset the finder emits plus the usual combinators.
//!
//! ```text
//! list      := complex ( "," complex )*
//! complex   := compound ( combinator compound )*
//! compound  := ( tag | "*" )? ( "#" ident | "." ident | "[" attr "]" | ":" pseudo )*
//! attr      := ident ( op ( ident | string ) )?
//! pseudo    := "nth-child(" int ")" | "nth-of-type(" int ")"
//!            | "first-child" | "first-of-type"
//! ```
//!
//! Identifiers and strings accept CSS escapes (`\31 23`, `\.`).
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

/// `compounds[i + 1]` is related to `compounds[i]` by `combinators[i]`;
/// the subject is the last compound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    pub compounds: Vec<Compound>,
    pub combinators: Vec<Combinator>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    /// Lowercased tag name; `None` is the universal selector.
    pub tag: Option<String>,
    pub simple: Vec<SimpleSelector>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimpleSelector {
    Id(String),
    Class(String),
    Attribute {
        name: String,
        matcher: Option<(AttributeOp, String)>,
    },
    NthChild(usize),
    NthOfType(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeOp {
    /// `=`
    Equals,
    /// `~=`
    Includes,
    /// `|=`
    DashMatch,
    /// `^=`
    Prefix,
    /// `$=`
    Suffix,
    /// `*=`
    Substring,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorParseErrorKind {
    Empty,
    UnexpectedEnd,
    UnexpectedChar(char),
    ExpectedIdentifier,
    UnterminatedString,
    UnsupportedPseudo(String),
    InvalidNth(String),
    DanglingCombinator,
}

/// `position` is a byte offset into the parsed text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorParseError {
    pub position: usize,
    pub kind: SelectorParseErrorKind,
}

impl fmt::Display for SelectorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use SelectorParseErrorKind::*;
        match &self.kind {
            Empty => write!(f, "empty selector at {}", self.position),
            UnexpectedEnd => write!(f, "unexpected end of selector at {}", self.position),
            UnexpectedChar(c) => write!(f, "unexpected {c:?} at {}", self.position),
            ExpectedIdentifier => write!(f, "expected identifier at {}", self.position),
            UnterminatedString => write!(f, "unterminated string at {}", self.position),
            UnsupportedPseudo(name) => {
                write!(f, "unsupported pseudo-class :{name} at {}", self.position)
            }
            InvalidNth(arg) => write!(f, "invalid nth argument {arg:?} at {}", self.position),
            DanglingCombinator => write!(f, "combinator without operand at {}", self.position),
        }
    }
}

impl std::error::Error for SelectorParseError {}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_css_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn error(&self, kind: SelectorParseErrorKind) -> SelectorParseError {
        SelectorParseError {
            position: self.pos,
            kind,
        }
    }

    fn unexpected(&self) -> SelectorParseError {
        match self.peek() {
            Some(c) => self.error(SelectorParseErrorKind::UnexpectedChar(c)),
            None => self.error(SelectorParseErrorKind::UnexpectedEnd),
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(is_css_whitespace) {
            self.bump();
        }
        self.pos > start
    }

    /// Valid escape: a backslash not followed by a newline.
    fn at_escape(&self, offset: usize) -> bool {
        self.peek_at(offset) == Some('\\') && self.peek_at(offset + 1) != Some('\n')
    }

    /// Consumes the escape after the backslash has been eaten.
    fn escape(&mut self) -> char {
        let Some(first) = self.peek() else {
            return char::REPLACEMENT_CHARACTER;
        };
        if !first.is_ascii_hexdigit() {
            self.bump();
            return first;
        }
        let start = self.pos;
        while self.pos - start < 6 && self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
            self.bump();
        }
        let value = u32::from_str_radix(&self.input[start..self.pos], 16).unwrap_or(0);
        if self.peek().is_some_and(is_css_whitespace) {
            self.bump();
        }
        match char::from_u32(value) {
            Some('\0') | None => char::REPLACEMENT_CHARACTER,
            Some(c) => c,
        }
    }

    fn starts_identifier(&self) -> bool {
        match self.peek() {
            Some('-') => match self.peek_at(1) {
                Some(c) if is_name_start(c) || c == '-' => true,
                Some('\\') => self.at_escape(1),
                _ => false,
            },
            Some('\\') => self.at_escape(0),
            Some(c) => is_name_start(c),
            None => false,
        }
    }

    fn identifier(&mut self) -> Result<String, SelectorParseError> {
        if !self.starts_identifier() {
            return Err(self.error(SelectorParseErrorKind::ExpectedIdentifier));
        }
        let mut out = String::new();
        loop {
            match self.peek() {
                Some('\\') if self.at_escape(0) => {
                    self.bump();
                    out.push(self.escape());
                }
                Some(c) if is_name_char(c) => {
                    self.bump();
                    out.push(c);
                }
                _ => break,
            }
        }
        Ok(out)
    }

    fn string(&mut self, quote: char) -> Result<String, SelectorParseError> {
        let mut out = String::new();
        loop {
            match self.bump() {
                None | Some('\n') => {
                    return Err(self.error(SelectorParseErrorKind::UnterminatedString));
                }
                Some(c) if c == quote => return Ok(out),
                Some('\\') => match self.peek() {
                    None => {}
                    Some('\n') => {
                        self.bump();
                    }
                    Some(_) => out.push(self.escape()),
                },
                Some(c) => out.push(c),
            }
        }
    }

    fn attribute(&mut self) -> Result<SimpleSelector, SelectorParseError> {
        self.skip_whitespace();
        let name = self.identifier()?.to_ascii_lowercase();
        self.skip_whitespace();
        if self.eat(']') {
            return Ok(SimpleSelector::Attribute {
                name,
                matcher: None,
            });
        }
        let op = match self.bump() {
            Some('=') => AttributeOp::Equals,
            Some(c @ ('~' | '|' | '^' | '$' | '*')) if self.eat('=') => match c {
                '~' => AttributeOp::Includes,
                '|' => AttributeOp::DashMatch,
                '^' => AttributeOp::Prefix,
                '$' => AttributeOp::Suffix,
                _ => AttributeOp::Substring,
            },
            Some(c) => return Err(self.error(SelectorParseErrorKind::UnexpectedChar(c))),
            None => return Err(self.error(SelectorParseErrorKind::UnexpectedEnd)),
        };
        self.skip_whitespace();
        let value = match self.peek() {
            Some(q @ ('"' | '\'')) => {
                self.bump();
                self.string(q)?
            }
            _ => self.identifier()?,
        };
        self.skip_whitespace();
        if !self.eat(']') {
            return Err(self.unexpected());
        }
        Ok(SimpleSelector::Attribute {
            name,
            matcher: Some((op, value)),
        })
    }

    fn nth_argument(&mut self) -> Result<usize, SelectorParseError> {
        let start = self.pos;
        let Some(close) = self.input[start..].find(')') else {
            return Err(self.error(SelectorParseErrorKind::UnexpectedEnd));
        };
        let raw = &self.input[start..start + close];
        let value = raw
            .trim_matches(is_css_whitespace)
            .parse::<usize>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| self.error(SelectorParseErrorKind::InvalidNth(raw.to_string())))?;
        self.pos = start + close + 1;
        Ok(value)
    }

    fn pseudo(&mut self) -> Result<SimpleSelector, SelectorParseError> {
        let start = self.pos;
        let name = self.identifier()?.to_ascii_lowercase();
        let functional = self.eat('(');
        match (name.as_str(), functional) {
            ("nth-child", true) => Ok(SimpleSelector::NthChild(self.nth_argument()?)),
            ("nth-of-type", true) => Ok(SimpleSelector::NthOfType(self.nth_argument()?)),
            ("first-child", false) => Ok(SimpleSelector::NthChild(1)),
            ("first-of-type", false) => Ok(SimpleSelector::NthOfType(1)),
            _ => Err(SelectorParseError {
                position: start,
                kind: SelectorParseErrorKind::UnsupportedPseudo(name),
            }),
        }
    }

    fn compound(&mut self) -> Result<Compound, SelectorParseError> {
        let mut compound = Compound::default();
        let mut empty = true;
        if self.eat('*') {
            empty = false;
        } else if self.starts_identifier() {
            compound.tag = Some(self.identifier()?.to_ascii_lowercase());
            empty = false;
        }
        loop {
            let simple = match self.peek() {
                Some('#') => {
                    self.bump();
                    SimpleSelector::Id(self.identifier()?)
                }
                Some('.') => {
                    self.bump();
                    SimpleSelector::Class(self.identifier()?)
                }
                Some('[') => {
                    self.bump();
                    self.attribute()?
                }
                Some(':') => {
                    self.bump();
                    self.pseudo()?
                }
                _ => break,
            };
            compound.simple.push(simple);
            empty = false;
        }
        if empty {
            return Err(self.unexpected());
        }
        Ok(compound)
    }

    fn combinator(&mut self) -> Option<Combinator> {
        let had_space = self.skip_whitespace();
        let explicit = match self.peek() {
            Some('>') => Some(Combinator::Child),
            Some('+') => Some(Combinator::NextSibling),
            Some('~') => Some(Combinator::SubsequentSibling),
            _ => None,
        };
        if let Some(c) = explicit {
            self.bump();
            self.skip_whitespace();
            return Some(c);
        }
        match self.peek() {
            Some(',') | None => None,
            Some(_) if had_space => Some(Combinator::Descendant),
            Some(_) => None,
        }
    }

    fn complex(&mut self) -> Result<ComplexSelector, SelectorParseError> {
        self.skip_whitespace();
        if matches!(self.peek(), Some(',') | None) {
            return Err(self.error(SelectorParseErrorKind::Empty));
        }
        if matches!(self.peek(), Some('>' | '+' | '~')) {
            return Err(self.error(SelectorParseErrorKind::DanglingCombinator));
        }
        let mut selector = ComplexSelector {
            compounds: vec![self.compound()?],
            combinators: Vec::new(),
        };
        while let Some(combinator) = self.combinator() {
            if matches!(self.peek(), Some(',') | None) {
                return Err(self.error(SelectorParseErrorKind::DanglingCombinator));
            }
            selector.combinators.push(combinator);
            selector.compounds.push(self.compound()?);
        }
        Ok(selector)
    }
}

pub fn parse_selector_list(input: &str) -> Result<SelectorList, SelectorParseError> {
    let mut parser = Parser { input, pos: 0 };
    let mut list = vec![parser.complex()?];
    loop {
        parser.skip_whitespace();
        if parser.peek().is_none() {
            break;
        }
        if !parser.eat(',') {
            return Err(parser.unexpected());
        }
        list.push(parser.complex()?);
    }
    Ok(SelectorList(list))
}
