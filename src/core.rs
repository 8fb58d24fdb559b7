//! Core data structures for straight-line programs.
//!
//! An SLP is an append-only list of assignments. Each assignment is a
//! concatenation of symbols; a reference symbol reuses the word of an earlier
//! assignment, so a program of `n` assignments can denote a word of length up
//! to `2^(n-1)`. The value of the program is the word of its last assignment.
//!
//! # Invariants
//! - The assignment list is never empty.
//! - A reference held by assignment `i` names an index `< i`. This is not
//!   checked on construction; the first operation that dereferences a bad
//!   index fails with [`SlpError::InvalidReference`].

use crate::error::SlpError;
use crate::notation::Notation;
use crate::symbol::{Symbol, Terminal};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One production of the program: a concatenation of symbols.
///
/// The empty assignment denotes the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment(Vec<Symbol>);

impl Assignment {
    #[inline]
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }

    /// The identity assignment.
    #[inline]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Parses an assignment string with the default notation.
    pub fn parse(text: &str) -> Result<Self, SlpError> {
        Self::parse_with(&Notation::default(), text)
    }

    /// Parses an assignment string such as `#0.x.#1*`.
    ///
    /// The empty string is the empty assignment.
    pub fn parse_with(notation: &Notation, text: &str) -> Result<Self, SlpError> {
        notation.validate()?;
        if text.is_empty() {
            return Ok(Self::empty());
        }
        text.split(notation.delimiter)
            .map(|token| Symbol::parse_with(notation, token))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    #[inline]
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Symbol> {
        self.0.iter()
    }

    /// Number of symbols on the right-hand side.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if any symbol is a back-reference.
    pub fn has_references(&self) -> bool {
        self.0.iter().any(|s| matches!(s, Symbol::Reference(_)))
    }

    pub fn render(&self, notation: &Notation) -> String {
        let mut out = String::new();
        for (i, symbol) in self.0.iter().enumerate() {
            if i > 0 {
                out.push(notation.delimiter);
            }
            out.push_str(&symbol.render(notation));
        }
        out
    }
}

impl From<Vec<Symbol>> for Assignment {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self(symbols)
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = &'a Symbol;
    type IntoIter = std::slice::Iter<'a, Symbol>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Notation::default()))
    }
}

/// A straight-line program.
///
/// Values are immutable in spirit: every rewriting and normalization pass
/// returns a new `Slp`. `Clone` is a deep copy, which is what a holder takes
/// to keep a snapshot from before an in-place transformation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Assignment>", into = "Vec<Assignment>")]
pub struct Slp {
    assignments: Vec<Assignment>,
}

impl Slp {
    /// Creates an SLP from explicit assignments.
    ///
    /// References are not validated here.
    pub fn new(assignments: Vec<Assignment>) -> Result<Self, SlpError> {
        if assignments.is_empty() {
            return Err(SlpError::EmptyProgram);
        }
        Ok(Self { assignments })
    }

    /// Parses a list of assignment strings with the default notation.
    ///
    /// ```
    /// use slpcore::Slp;
    ///
    /// let slp = Slp::parse(&["x", "y", "#0.#1"]).unwrap();
    /// assert_eq!(slp.length().unwrap(), 2);
    /// ```
    pub fn parse<S: AsRef<str>>(assignments: &[S]) -> Result<Self, SlpError> {
        Self::parse_with(&Notation::default(), assignments)
    }

    /// Parses a list of assignment strings.
    pub fn parse_with<S: AsRef<str>>(
        notation: &Notation,
        assignments: &[S],
    ) -> Result<Self, SlpError> {
        notation.validate()?;
        let parsed = assignments
            .iter()
            .map(|text| Assignment::parse_with(notation, text.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(parsed)
    }

    /// Internal constructor for passes that always produce at least one
    /// assignment.
    pub(crate) fn from_raw(assignments: Vec<Assignment>) -> Self {
        debug_assert!(!assignments.is_empty(), "SLP must not be empty");
        Self { assignments }
    }

    #[inline]
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    #[inline]
    pub fn assignment(&self, index: usize) -> Option<&Assignment> {
        self.assignments.get(index)
    }

    /// Number of assignments (not the length of the word; see `length`).
    #[inline]
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    #[inline]
    pub fn last_index(&self) -> usize {
        self.assignments.len() - 1
    }

    /// The assignment whose word is the value of the program.
    #[inline]
    pub fn last(&self) -> &Assignment {
        &self.assignments[self.last_index()]
    }

    /// Returns true if the last assignment uses back-references.
    pub fn is_compressed(&self) -> bool {
        self.last().has_references()
    }

    /// Total number of right-hand-side symbols, the classical size measure of
    /// an SLP.
    pub fn complexity(&self) -> usize {
        self.assignments.iter().map(Assignment::len).sum()
    }

    /// Checks the backward-reference invariant of every assignment.
    pub fn validate(&self) -> Result<(), SlpError> {
        for (position, assignment) in self.assignments.iter().enumerate() {
            for symbol in assignment {
                if let Symbol::Reference(r) = symbol {
                    r.check(position)?;
                }
            }
        }
        Ok(())
    }

    /// Renders one `"<index>. <assignment>"` line per assignment.
    pub fn render_with(&self, notation: &Notation) -> String {
        let mut out = String::new();
        for (i, assignment) in self.assignments.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str(&format!("{}. {}", i, assignment.render(notation)));
        }
        out
    }

    /// Returns the assignment strings, the inverse of `parse_with`.
    pub fn to_strings(&self, notation: &Notation) -> Vec<String> {
        self.assignments.iter().map(|a| a.render(notation)).collect()
    }

    pub(crate) fn into_assignments(self) -> Vec<Assignment> {
        self.assignments
    }
}

impl From<Terminal> for Slp {
    /// The one-letter program, used as a substitution replacement.
    fn from(terminal: Terminal) -> Self {
        Self::from_raw(vec![Assignment::new(vec![Symbol::Terminal(terminal)])])
    }
}

impl TryFrom<Vec<Assignment>> for Slp {
    type Error = SlpError;

    fn try_from(assignments: Vec<Assignment>) -> Result<Self, Self::Error> {
        Self::new(assignments)
    }
}

impl From<Slp> for Vec<Assignment> {
    fn from(slp: Slp) -> Self {
        slp.into_assignments()
    }
}

impl fmt::Display for Slp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(&Notation::default()))
    }
}
