//! Inversion by sign propagation.
//!
//! The inverse of a word reverses it and inverts every letter. For a
//! compressed program this never touches the stored assignments: one trailing
//! assignment `#last*` is appended and the sign is resolved lazily by the
//! queries and rewrites. A program whose last assignment holds only letters is
//! inverted directly, which gives the same word without growing the program.

use crate::core::{Assignment, Slp};
use crate::symbol::{Reference, Symbol};
use tracing::debug;

/// Reverses an assignment and negates each of its symbols.
pub(crate) fn invert_assignment(assignment: &Assignment) -> Assignment {
    Assignment::new(assignment.iter().rev().map(Symbol::negate).collect())
}

impl Slp {
    /// Returns the program of the inverse word.
    pub fn inverse(&self) -> Slp {
        let mut out = self.assignments().to_vec();
        let last = self.last_index();
        if self.is_compressed() {
            out.push(Assignment::new(vec![Symbol::Reference(Reference::with_sign(
                last, true,
            ))]));
        } else {
            out[last] = invert_assignment(&out[last]);
        }
        debug!(compressed = self.is_compressed(), assignments = out.len(), "inverse");
        Slp::from_raw(out)
    }

    /// In-place form of [`Slp::inverse`].
    pub fn invert_in_place(&mut self) {
        *self = self.inverse();
    }
}
