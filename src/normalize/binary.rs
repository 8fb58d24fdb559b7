//! Binary (Chomsky-style) normal form.
//!
//! In the output every assignment is one of
//! - a single letter `a`,
//! - a single, possibly negated, reference,
//! - a pair of references `#i.#j` (either may be negated),
//! - the empty assignment.
//!
//! Long right-hand sides are folded from the left into pairs. Letters, pairs
//! and negated references are looked up in tables before a new assignment is
//! created, so structurally identical pieces are shared.

use crate::core::{Assignment, Slp};
use crate::error::SlpError;
use crate::symbol::{Reference, Symbol, Terminal};
use std::collections::HashMap;
use tracing::debug;

/// Result of [`Slp::to_binary_form`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryForm {
    /// The binary program; it denotes the same word as the input.
    pub slp: Slp,
    /// Output position of every input letter, of every input assignment
    /// (keyed as the positive reference `#k`), and of the assignment holding
    /// each negated reference `#k*` that occurs in the input.
    pub index_map: HashMap<Symbol, usize>,
}

/// Append-only builder with sharing tables.
#[derive(Default)]
struct BinaryBuilder {
    out: Vec<Assignment>,
    letters: HashMap<Terminal, usize>,
    singles: HashMap<Reference, usize>,
    pairs: HashMap<(Reference, Reference), usize>,
    empty: Option<usize>,
}

impl BinaryBuilder {
    fn push(&mut self, assignment: Assignment) -> usize {
        self.out.push(assignment);
        self.out.len() - 1
    }

    fn letter(&mut self, t: &Terminal) -> usize {
        if let Some(&idx) = self.letters.get(t) {
            return idx;
        }
        let idx = self.push(Assignment::new(vec![Symbol::Terminal(t.clone())]));
        self.letters.insert(t.clone(), idx);
        idx
    }

    fn single(&mut self, r: Reference) -> usize {
        if !r.negated {
            return r.index;
        }
        if let Some(&idx) = self.singles.get(&r) {
            return idx;
        }
        let idx = self.push(Assignment::new(vec![Symbol::Reference(r)]));
        self.singles.insert(r, idx);
        idx
    }

    fn pair(&mut self, left: Reference, right: Reference) -> usize {
        if let Some(&idx) = self.pairs.get(&(left, right)) {
            return idx;
        }
        let idx = self.push(Assignment::new(vec![
            Symbol::Reference(left),
            Symbol::Reference(right),
        ]));
        self.pairs.insert((left, right), idx);
        idx
    }

    fn empty(&mut self) -> usize {
        if let Some(idx) = self.empty {
            return idx;
        }
        let idx = self.push(Assignment::empty());
        self.empty = Some(idx);
        idx
    }
}

impl Slp {
    /// Rewrites the program so that every assignment has at most two symbols.
    ///
    /// ```
    /// use slpcore::Slp;
    ///
    /// let slp = Slp::parse(&["x*", "y", "#0.#1.x"]).unwrap();
    /// let binary = slp.to_binary_form().unwrap();
    /// assert!(binary.slp.assignments().iter().all(|a| a.len() <= 2));
    /// assert_eq!(binary.slp.expand().unwrap(), slp.expand().unwrap());
    /// ```
    pub fn to_binary_form(&self) -> Result<BinaryForm, SlpError> {
        let mut builder = BinaryBuilder::default();
        let mut index_map = HashMap::new();
        // Output position of each input assignment.
        let mut origin: Vec<usize> = Vec::with_capacity(self.assignment_count());

        for (position, assignment) in self.assignments().iter().enumerate() {
            let mut parts = Vec::with_capacity(assignment.len());
            for symbol in assignment {
                match symbol {
                    Symbol::Terminal(t) if t.is_identity() => {}
                    Symbol::Terminal(t) => {
                        let idx = builder.letter(t);
                        index_map.insert(symbol.clone(), idx);
                        parts.push(Reference::new(idx));
                    }
                    Symbol::Reference(r) => {
                        let target = origin[r.check(position)?];
                        let translated = Reference::with_sign(target, r.negated);
                        if r.negated {
                            let holder = builder.single(translated);
                            index_map.insert(symbol.clone(), holder);
                        }
                        parts.push(translated);
                    }
                }
            }

            let idx = match parts.as_slice() {
                [] => builder.empty(),
                [only] => builder.single(*only),
                [first, second, rest @ ..] => {
                    let mut acc = builder.pair(*first, *second);
                    for r in rest {
                        acc = builder.pair(Reference::new(acc), *r);
                    }
                    acc
                }
            };
            index_map.insert(Symbol::reference(position), idx);
            origin.push(idx);
        }

        // The value must sit in the last assignment.
        let root = origin[self.last_index()];
        if root + 1 != builder.out.len() {
            builder.push(Assignment::new(vec![Symbol::reference(root)]));
        }
        debug!(
            input = self.assignment_count(),
            output = builder.out.len(),
            shared_pairs = builder.pairs.len(),
            "to_binary_form"
        );
        Ok(BinaryForm { slp: Slp::from_raw(builder.out), index_map })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_binary(slp: &Slp) -> bool {
        slp.assignments().iter().all(|a| {
            a.len() <= 2 && (a.len() < 2 || a.iter().all(|s| s.as_reference().is_some()))
        })
    }

    #[test]
    fn folds_long_assignments() {
        let slp = Slp::parse(&["x*", "y", "#0.#1.x"]).unwrap();
        let binary = slp.to_binary_form().unwrap();
        assert_eq!(
            binary.slp.to_strings(&Default::default()),
            vec!["x*", "y", "x", "#0.#1", "#3.#2"]
        );
        assert!(is_binary(&binary.slp));
        assert_eq!(binary.index_map[&Symbol::reference(2)], 4);
        assert_eq!(binary.index_map[&Symbol::terminal("x")], 2);
        assert_eq!(binary.slp.expand().unwrap(), slp.expand().unwrap());
    }

    #[test]
    fn shares_letters_and_pairs() {
        let slp = Slp::parse(&["x.y.x.y", "x.y.z"]).unwrap();
        let binary = slp.to_binary_form().unwrap();
        // x, y, x.y, (x.y).x, ((x.y).x).y, z, (x.y).z
        assert_eq!(binary.slp.assignment_count(), 7);
        assert_eq!(binary.slp.raw_count("x").unwrap(), 1);
        assert_eq!(binary.slp.expand().unwrap(), slp.expand().unwrap());
    }

    #[test]
    fn single_references_are_forwarded() {
        let slp = Slp::parse(&["x.y", "#0", "#1*", "#1*"]).unwrap();
        let binary = slp.to_binary_form().unwrap();
        assert!(is_binary(&binary.slp));
        assert_eq!(binary.index_map[&Symbol::reference(1)], binary.index_map[&Symbol::reference(0)]);
        assert_eq!(binary.index_map[&Symbol::reference(2)], binary.index_map[&Symbol::reference(3)]);
        let negated = Symbol::Reference(Reference::with_sign(1, true));
        assert_eq!(binary.index_map[&negated], binary.index_map[&Symbol::reference(2)]);
        assert_eq!(binary.slp.assignments()[binary.index_map[&negated]].to_string(), "#2*");
        assert_eq!(binary.slp.expand().unwrap(), slp.expand().unwrap());
    }

    #[test]
    fn negated_references_inside_pairs_are_mapped() {
        let slp = Slp::parse(&["x.y", "#0*.x"]).unwrap();
        let binary = slp.to_binary_form().unwrap();
        // x, y, x.y, the holder of #0*, then the pair.
        assert_eq!(
            binary.slp.to_strings(&Default::default()),
            vec!["x", "y", "#0.#1", "#2*", "#2*.#0"]
        );
        let negated = Symbol::Reference(Reference::with_sign(0, true));
        assert_eq!(binary.index_map[&negated], 3);
        assert_eq!(binary.index_map[&Symbol::reference(1)], 4);
        assert_eq!(binary.slp.expand().unwrap(), slp.expand().unwrap());
    }

    #[test]
    fn root_moves_to_the_end() {
        let slp = Slp::parse(&["x.y", "z", "#0"]).unwrap();
        let binary = slp.to_binary_form().unwrap();
        assert_eq!(binary.slp.last().to_string(), "#2");
        assert_eq!(binary.slp.expand().unwrap(), slp.expand().unwrap());
    }

    #[test]
    fn empty_words() {
        let slp = Slp::parse(&["", "#0.#0", ".."]).unwrap();
        let binary = slp.to_binary_form().unwrap();
        // "", #0.#0, and the root moved behind the shared pair.
        assert_eq!(binary.slp.to_strings(&Default::default()), vec!["", "#0.#0", "#0"]);
        assert_eq!(binary.slp.length().unwrap(), 0);
    }

    #[test]
    fn rejects_forward_references() {
        let slp = Slp::parse(&["x", "#1.x"]).unwrap();
        assert_eq!(
            slp.to_binary_form(),
            Err(SlpError::InvalidReference { assignment: 1, target: 1 })
        );
    }
}
