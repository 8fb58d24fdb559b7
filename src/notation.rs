//! Textual notation for assignments.
//!
//! An assignment string is a list of symbol tokens joined by the
//! multiplication delimiter, e.g. `#0.x.#1*`. A token is either an identifier
//! or a reference prefix followed by decimal digits, each with an optional
//! trailing negation marker.
//!
//! The markers are configurable so that transcribed intersection sequences
//! from other tools can be read without rewriting them first.

use crate::error::SlpError;
use serde::{Deserialize, Serialize};

/// Reserved markers used when parsing and rendering assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Notation {
    /// Trailing marker for negated symbols.
    pub negation: char,
    /// Separator between the symbols of one assignment.
    pub delimiter: char,
    /// Leading marker of a back-reference token.
    pub reference: char,
}

impl Notation {
    /// Checks that the markers are pairwise distinct and cannot be confused
    /// with identifier characters. Every parser runs this first.
    pub fn validate(&self) -> Result<(), SlpError> {
        let markers = [self.negation, self.delimiter, self.reference];
        for m in markers {
            if m.is_alphanumeric() || m.is_whitespace() {
                return Err(SlpError::InvalidNotation(format!(
                    "marker {:?} may not be alphanumeric or whitespace",
                    m
                )));
            }
        }
        if self.negation == self.delimiter
            || self.negation == self.reference
            || self.delimiter == self.reference
        {
            return Err(SlpError::InvalidNotation(
                "markers must be pairwise distinct".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns true if `c` is one of the reserved markers.
    #[inline]
    pub fn is_reserved(&self, c: char) -> bool {
        c == self.negation || c == self.delimiter || c == self.reference
    }
}

impl Default for Notation {
    fn default() -> Self {
        Self {
            negation: '*',
            delimiter: '.',
            reference: '#',
        }
    }
}
