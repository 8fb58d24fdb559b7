//! Symbols of a straight-line program.
//!
//! A symbol is either a terminal (an alphabet letter with a sign) or a signed
//! back-reference to an earlier assignment. Negation follows the free-group
//! law: it toggles the sign and never stacks, so `negate(negate(s)) == s`.
//!
//! Equality is structural. Two references with the same index are equal even
//! when they live in different programs and expand to different words.

use crate::error::SlpError;
use crate::notation::Notation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An alphabet letter with a sign.
///
/// The empty name denotes the identity; it is its own inverse and is always
/// stored unnegated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Terminal {
    name: String,
    negated: bool,
}

impl Terminal {
    /// Creates a positive terminal.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), negated: false }
    }

    /// Creates a terminal with an explicit sign.
    pub fn with_sign(name: impl Into<String>, negated: bool) -> Self {
        let name = name.into();
        let negated = negated && !name.is_empty();
        Self { name, negated }
    }

    /// The identity symbol.
    pub fn identity() -> Self {
        Self::new("")
    }

    /// Returns the identifier without its sign.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_negated(&self) -> bool {
        self.negated
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.name.is_empty()
    }

    /// Returns the inverse letter.
    pub fn negate(&self) -> Self {
        Self::with_sign(self.name.clone(), !self.negated)
    }

    /// Renders the terminal with the given notation.
    pub fn render(&self, notation: &Notation) -> String {
        let mut out = self.name.clone();
        if self.negated {
            out.push(notation.negation);
        }
        out
    }
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Notation::default()))
    }
}

/// A signed back-reference to an earlier assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference {
    /// Position of the referenced assignment.
    pub index: usize,
    /// Whether the referenced word is inverted.
    pub negated: bool,
}

impl Reference {
    #[inline]
    pub const fn new(index: usize) -> Self {
        Self { index, negated: false }
    }

    #[inline]
    pub const fn with_sign(index: usize, negated: bool) -> Self {
        Self { index, negated }
    }

    #[inline]
    pub const fn negate(self) -> Self {
        Self { index: self.index, negated: !self.negated }
    }

    /// Moves the reference `offset` positions forward, keeping its sign.
    #[inline]
    pub const fn shifted(self, offset: usize) -> Self {
        Self { index: self.index + offset, negated: self.negated }
    }

    /// Checks the backward-reference invariant for a reference held by the
    /// assignment at `position`.
    #[inline]
    pub fn check(self, position: usize) -> Result<usize, SlpError> {
        if self.index < position {
            Ok(self.index)
        } else {
            Err(SlpError::InvalidReference { assignment: position, target: self.index })
        }
    }

    pub fn render(&self, notation: &Notation) -> String {
        let mut out = format!("{}{}", notation.reference, self.index);
        if self.negated {
            out.push(notation.negation);
        }
        out
    }
}

/// One symbol of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    Terminal(Terminal),
    Reference(Reference),
}

impl Symbol {
    /// Shorthand for a positive terminal symbol.
    pub fn terminal(name: impl Into<String>) -> Self {
        Symbol::Terminal(Terminal::new(name))
    }

    /// Shorthand for a positive reference symbol.
    pub fn reference(index: usize) -> Self {
        Symbol::Reference(Reference::new(index))
    }

    /// Parses a single token with the default notation.
    pub fn parse(token: &str) -> Result<Self, SlpError> {
        Self::parse_with(&Notation::default(), token)
    }

    /// Parses a single token.
    ///
    /// The empty token (and a bare negation marker) is the identity terminal.
    pub fn parse_with(notation: &Notation, token: &str) -> Result<Self, SlpError> {
        notation.validate()?;
        let malformed = || SlpError::MalformedSymbol(token.to_string());
        let (body, negated) = match token.strip_suffix(notation.negation) {
            Some(body) => (body, true),
            None => (token, false),
        };
        if let Some(digits) = body.strip_prefix(notation.reference) {
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            let index = digits.parse::<usize>().map_err(|_| malformed())?;
            return Ok(Symbol::Reference(Reference::with_sign(index, negated)));
        }
        if body.chars().any(|c| notation.is_reserved(c) || c.is_whitespace()) {
            return Err(malformed());
        }
        Ok(Symbol::Terminal(Terminal::with_sign(body, negated)))
    }

    /// Toggles the sign.
    pub fn negate(&self) -> Self {
        match self {
            Symbol::Terminal(t) => Symbol::Terminal(t.negate()),
            Symbol::Reference(r) => Symbol::Reference(r.negate()),
        }
    }

    pub fn is_negated(&self) -> bool {
        match self {
            Symbol::Terminal(t) => t.is_negated(),
            Symbol::Reference(r) => r.negated,
        }
    }

    pub fn as_terminal(&self) -> Option<&Terminal> {
        match self {
            Symbol::Terminal(t) => Some(t),
            Symbol::Reference(_) => None,
        }
    }

    pub fn as_reference(&self) -> Option<Reference> {
        match self {
            Symbol::Reference(r) => Some(*r),
            Symbol::Terminal(_) => None,
        }
    }

    pub fn render(&self, notation: &Notation) -> String {
        match self {
            Symbol::Terminal(t) => t.render(notation),
            Symbol::Reference(r) => r.render(notation),
        }
    }
}

impl From<Terminal> for Symbol {
    fn from(t: Terminal) -> Self {
        Symbol::Terminal(t)
    }
}

impl From<Reference> for Symbol {
    fn from(r: Reference) -> Self {
        Symbol::Reference(r)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Notation::default()))
    }
}
