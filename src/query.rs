//! Query algebra: length and occurrence counts over the compressed form.
//!
//! Every query is one left-to-right pass over the assignments that keeps one
//! value per assignment in a table indexed by position. A reference is then a
//! table lookup instead of a re-expansion, so the cost is linear in the
//! program size no matter how long the denoted word is.
//!
//! Negated references are never expanded. Each accumulator decides what
//! inversion does to its value: nothing for lengths, a swap of the
//! (letter, inverse letter) pair for signed counts.

use crate::core::Slp;
use crate::error::SlpError;
use crate::symbol::{Symbol, Terminal};

/// A per-assignment value that can be summed and pushed through inversion.
pub trait Accumulator: Copy {
    /// Value of the empty word.
    const ZERO: Self;

    /// Concatenation, `None` on overflow.
    fn checked_add(self, other: Self) -> Option<Self>;

    /// Value of the inverted word.
    fn inverted(self) -> Self;
}

impl Accumulator for u64 {
    const ZERO: Self = 0;

    #[inline]
    fn checked_add(self, other: Self) -> Option<Self> {
        u64::checked_add(self, other)
    }

    #[inline]
    fn inverted(self) -> Self {
        self
    }
}

/// Occurrences of a letter and of its inverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SignedPair {
    pub letter: u64,
    pub inverse: u64,
}

impl Accumulator for SignedPair {
    const ZERO: Self = SignedPair { letter: 0, inverse: 0 };

    #[inline]
    fn checked_add(self, other: Self) -> Option<Self> {
        Some(SignedPair {
            letter: self.letter.checked_add(other.letter)?,
            inverse: self.inverse.checked_add(other.inverse)?,
        })
    }

    #[inline]
    fn inverted(self) -> Self {
        SignedPair { letter: self.inverse, inverse: self.letter }
    }
}

/// Evaluates `leaf` over every terminal and folds the results through the
/// assignment DAG, returning one value per assignment.
///
/// Fails with `InvalidReference` at the first reference that does not point
/// strictly backwards.
pub fn evaluate_all<A, F>(slp: &Slp, leaf: F) -> Result<Vec<A>, SlpError>
where
    A: Accumulator,
    F: Fn(&Terminal) -> A,
{
    let mut table: Vec<A> = Vec::with_capacity(slp.assignment_count());
    for (position, assignment) in slp.assignments().iter().enumerate() {
        let mut acc = A::ZERO;
        for symbol in assignment {
            let value = match symbol {
                Symbol::Terminal(t) => leaf(t),
                Symbol::Reference(r) => {
                    let stored = table[r.check(position)?];
                    if r.negated {
                        stored.inverted()
                    } else {
                        stored
                    }
                }
            };
            acc = acc
                .checked_add(value)
                .ok_or(SlpError::Overflow { assignment: position })?;
        }
        table.push(acc);
    }
    Ok(table)
}

/// Like [`evaluate_all`] but returns only the value of the program.
pub fn evaluate<A, F>(slp: &Slp, leaf: F) -> Result<A, SlpError>
where
    A: Accumulator,
    F: Fn(&Terminal) -> A,
{
    let table = evaluate_all(slp, leaf)?;
    Ok(table.last().copied().unwrap_or(A::ZERO))
}

impl Slp {
    /// Length of the denoted word.
    ///
    /// The identity letter has length zero; the sign of a reference does not
    /// matter.
    pub fn length(&self) -> Result<u64, SlpError> {
        evaluate(self, |t: &Terminal| u64::from(!t.is_identity()))
    }

    /// Occurrences of `name` in either sign.
    pub fn raw_count(&self, name: &str) -> Result<u64, SlpError> {
        if name.is_empty() {
            return Ok(0);
        }
        evaluate(self, |t: &Terminal| u64::from(t.name() == name))
    }

    /// Occurrences of `letter` and of its inverse.
    pub fn signed_pair(&self, letter: &Terminal) -> Result<SignedPair, SlpError> {
        if letter.is_identity() {
            return Ok(SignedPair::ZERO);
        }
        let inverse = letter.negate();
        evaluate(self, |t: &Terminal| {
            if t == letter {
                SignedPair { letter: 1, inverse: 0 }
            } else if *t == inverse {
                SignedPair { letter: 0, inverse: 1 }
            } else {
                SignedPair::ZERO
            }
        })
    }

    /// Net occurrences: occurrences of `letter` minus occurrences of its
    /// inverse. Antisymmetric under negation of `letter`.
    pub fn signed_count(&self, letter: &Terminal) -> Result<i64, SlpError> {
        let pair = self.signed_pair(letter)?;
        let overflow = SlpError::Overflow { assignment: self.last_index() };
        let letter = i64::try_from(pair.letter).map_err(|_| overflow.clone())?;
        let inverse = i64::try_from(pair.inverse).map_err(|_| overflow)?;
        Ok(letter - inverse)
    }

    /// Occurrences of exactly `letter`, with its sign.
    pub fn exact_count(&self, letter: &Terminal) -> Result<u64, SlpError> {
        Ok(self.signed_pair(letter)?.letter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Terminal {
        Terminal::new("x")
    }

    #[test]
    fn length_of_compressed_and_flat() {
        let slp = Slp::parse(&["x", "y", "#0.#1.x.x*"]).unwrap();
        assert_eq!(slp.length().unwrap(), 4);
        let flat = Slp::parse(&["a.b.c"]).unwrap();
        assert_eq!(flat.length().unwrap(), 3);
        let identity = Slp::parse(&[""]).unwrap();
        assert_eq!(identity.length().unwrap(), 0);
        let with_identity = Slp::parse(&["x..y"]).unwrap();
        assert_eq!(with_identity.length().unwrap(), 2);
    }

    #[test]
    fn length_grows_exponentially() {
        // d_{i+1} = d_i . d_i, 40 doublings of one letter.
        let mut lines = vec!["x".to_string()];
        for i in 0..40 {
            lines.push(format!("#{}.#{}", i, i));
        }
        let slp = Slp::parse(&lines).unwrap();
        assert_eq!(slp.length().unwrap(), 1u64 << 40);
    }

    #[test]
    fn raw_count_ignores_sign() {
        let slp = Slp::parse(&["x", "x*", "#0.#1"]).unwrap();
        assert_eq!(slp.raw_count("x").unwrap(), 2);
        assert_eq!(slp.raw_count("y").unwrap(), 0);
        // Identifiers are matched exactly, not as substrings.
        let slp = Slp::parse(&["x1", "#0.x"]).unwrap();
        assert_eq!(slp.raw_count("x").unwrap(), 1);
    }

    #[test]
    fn signed_count_swaps_under_negated_reference() {
        let slp = Slp::parse(&["x", "x*", "#0.#1.x*"]).unwrap();
        assert_eq!(slp.exact_count(&x()).unwrap(), 1);
        assert_eq!(slp.exact_count(&x().negate()).unwrap(), 2);
        assert_eq!(slp.signed_count(&x()).unwrap(), -1);

        // #0* turns the two x's of #0 into x*'s.
        let slp = Slp::parse(&["x.x.y", "#0*.x"]).unwrap();
        assert_eq!(slp.signed_pair(&x()).unwrap(), SignedPair { letter: 1, inverse: 2 });
        assert_eq!(slp.signed_count(&x()).unwrap(), -1);
        assert_eq!(slp.signed_count(&x().negate()).unwrap(), 1);
    }

    #[test]
    fn invalid_reference_fails_every_query() {
        let slp = Slp::parse(&["#1"]).unwrap();
        let expected = SlpError::InvalidReference { assignment: 0, target: 1 };
        assert_eq!(slp.length(), Err(expected.clone()));
        assert_eq!(slp.raw_count("x"), Err(expected.clone()));
        assert_eq!(slp.signed_count(&x()), Err(expected.clone()));

        let self_ref = Slp::parse(&["x", "#1"]).unwrap();
        assert_eq!(
            self_ref.length(),
            Err(SlpError::InvalidReference { assignment: 1, target: 1 })
        );
    }

    #[test]
    fn overflow_is_reported() {
        let mut lines = vec!["x".to_string()];
        for i in 0..64 {
            lines.push(format!("#{}.#{}", i, i));
        }
        let slp = Slp::parse(&lines).unwrap();
        assert_eq!(slp.length(), Err(SlpError::Overflow { assignment: 64 }));
    }

    #[test]
    fn table_has_one_entry_per_assignment() {
        let slp = Slp::parse(&["x", "#0.#0", "#1.#1"]).unwrap();
        let table: Vec<u64> = evaluate_all(&slp, |t: &Terminal| u64::from(!t.is_identity())).unwrap();
        assert_eq!(table, vec![1, 2, 4]);
    }
}
