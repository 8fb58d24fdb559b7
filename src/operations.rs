//! Rewriting algebra on straight-line programs.
//!
//! Every operation builds a new program from an old one. None of them expands
//! the denoted word: substitution and concatenation splice whole programs
//! together by shifting reference indices, and exponentiation adds a
//! logarithmic number of doubling assignments.
//!
//! The `*_in_place` variants are sugar for rebinding `self` to the result.
//! On error `self` is left untouched.

use crate::core::{Assignment, Slp};
use crate::error::SlpError;
use crate::symbol::{Reference, Symbol, Terminal};
use tracing::debug;

/// Rewrites the symbols of the assignment at `position`, checking every
/// reference against the backward-reference invariant before mapping it.
fn rewrite_assignment<F>(
    assignment: &Assignment,
    position: usize,
    mut map: F,
) -> Result<Assignment, SlpError>
where
    F: FnMut(&Symbol) -> Symbol,
{
    assignment
        .iter()
        .map(|symbol| {
            if let Symbol::Reference(r) = symbol {
                r.check(position)?;
            }
            Ok(map(symbol))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Assignment::new)
}

impl Slp {
    /// Replaces every occurrence of the signed letter `target` by the word of
    /// `replacement`.
    ///
    /// `target` is a terminal token in the default notation and matches only
    /// its own sign: `"x"` rewrites `x` and leaves `x*` alone, `"x*"` rewrites
    /// `x*` and leaves `x`. A caller that wants both signs rewritten
    /// substitutes twice. A reference token fails with
    /// [`SlpError::MalformedSymbol`].
    ///
    /// The replacement program is prepended in full, every existing reference
    /// moves forward by its length, and each `target` becomes a reference to
    /// the replacement's last assignment. No assignment is removed.
    ///
    /// A one-letter replacement is written `Slp::from(Terminal::new("z"))`.
    pub fn substitute(&self, target: &str, replacement: &Slp) -> Result<Slp, SlpError> {
        let target = match Symbol::parse(target)? {
            Symbol::Terminal(t) => t,
            Symbol::Reference(_) => return Err(SlpError::MalformedSymbol(target.to_string())),
        };
        self.substitute_terminal(&target, replacement)
    }

    /// [`Slp::substitute`] with an already parsed target.
    pub fn substitute_terminal(
        &self,
        target: &Terminal,
        replacement: &Slp,
    ) -> Result<Slp, SlpError> {
        replacement.validate()?;
        let offset = replacement.assignment_count();
        let hook = Symbol::Reference(Reference::new(offset - 1));

        let mut out = Vec::with_capacity(offset + self.assignment_count());
        out.extend(replacement.assignments().iter().cloned());
        let mut replaced = 0usize;
        for (position, assignment) in self.assignments().iter().enumerate() {
            let rewritten = rewrite_assignment(assignment, position, |symbol| match symbol {
                Symbol::Reference(r) => Symbol::Reference(r.shifted(offset)),
                Symbol::Terminal(t) if !t.is_identity() && t == target => {
                    replaced += 1;
                    hook.clone()
                }
                other => other.clone(),
            })?;
            out.push(rewritten);
        }
        debug!(
            target_letter = %target,
            replacement_assignments = offset,
            replaced,
            assignments = out.len(),
            "substitute"
        );
        Ok(Slp::from_raw(out))
    }

    /// In-place form of [`Slp::substitute`].
    pub fn substitute_in_place(&mut self, target: &str, replacement: &Slp) -> Result<(), SlpError> {
        *self = self.substitute(target, replacement)?;
        Ok(())
    }

    /// Removes every occurrence of the letter `name`, in both signs.
    ///
    /// References are kept as they are, so assignments may become empty.
    pub fn delete(&self, name: &str) -> Slp {
        let mut removed = 0usize;
        let out = self
            .assignments()
            .iter()
            .map(|assignment| {
                let kept: Vec<Symbol> = assignment
                    .iter()
                    .filter(|symbol| match symbol {
                        Symbol::Terminal(t) if !t.is_identity() && t.name() == name => {
                            removed += 1;
                            false
                        }
                        _ => true,
                    })
                    .cloned()
                    .collect();
                Assignment::new(kept)
            })
            .collect();
        debug!(letter = name, removed, "delete");
        Slp::from_raw(out)
    }

    /// The program of the word followed by the word of `suffix`.
    pub fn concat(&self, suffix: &Slp) -> Result<Slp, SlpError> {
        self.validate()?;
        let offset = self.assignment_count();
        let mut out = Vec::with_capacity(offset + suffix.assignment_count() + 1);
        out.extend(self.assignments().iter().cloned());
        for (position, assignment) in suffix.assignments().iter().enumerate() {
            out.push(rewrite_assignment(assignment, position, |symbol| match symbol {
                Symbol::Reference(r) => Symbol::Reference(r.shifted(offset)),
                other => other.clone(),
            })?);
        }
        let tail = out.len() - 1;
        out.push(Assignment::new(vec![
            Symbol::reference(offset - 1),
            Symbol::reference(tail),
        ]));
        debug!(prefix = offset, suffix = suffix.assignment_count(), "concat");
        Ok(Slp::from_raw(out))
    }

    /// The program of the `n`-fold concatenation of the word, for `n >= 1`.
    ///
    /// Uses binary exponentiation: a chain `d0 = word, d(i+1) = d(i).d(i)` up
    /// to the highest set bit of `n`, then one assignment joining the `d(i)`
    /// whose bit is set, in increasing `i`. When `n` is a power of two the
    /// last doubling already is the result and nothing is joined.
    ///
    /// Negative powers are expressed with [`Slp::inverse`].
    pub fn power(&self, n: i64) -> Result<Slp, SlpError> {
        if n <= 0 {
            return Err(SlpError::InvalidExponent(n));
        }
        let n = n as u64;
        let top = (u64::BITS - 1 - n.leading_zeros()) as usize;

        let mut out = self.assignments().to_vec();
        out.reserve(top + 1);
        let mut doublings = Vec::with_capacity(top + 1);
        doublings.push(self.last_index());
        for _ in 0..top {
            let prev = doublings[doublings.len() - 1];
            out.push(Assignment::new(vec![Symbol::reference(prev), Symbol::reference(prev)]));
            doublings.push(out.len() - 1);
        }
        if !n.is_power_of_two() {
            let parts = (0..=top)
                .filter(|bit| (n >> bit) & 1 == 1)
                .map(|bit| Symbol::reference(doublings[bit]))
                .collect();
            out.push(Assignment::new(parts));
        }
        debug!(exponent = n, doublings = top, assignments = out.len(), "power");
        Ok(Slp::from_raw(out))
    }

    /// In-place form of [`Slp::power`].
    pub fn power_in_place(&mut self, n: i64) -> Result<(), SlpError> {
        *self = self.power(n)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(slp: &Slp) -> String {
        slp.expand()
            .unwrap()
            .iter()
            .map(|t| t.to_string())
            .collect::<Vec<_>>()
            .join(".")
    }

    #[test]
    fn substitute_single_letter() {
        let slp = Slp::parse(&["x", "y", "#0.#1"]).unwrap();
        let out = slp.substitute("x", &Slp::from(Terminal::new("z"))).unwrap();
        assert_eq!(
            out.to_strings(&Default::default()),
            vec!["z", "#0", "y", "#1.#2"]
        );
        assert_eq!(word(&out), "z.y");
    }

    #[test]
    fn substitute_shifts_negated_references() {
        let slp = Slp::parse(&["x", "#0*.y"]).unwrap();
        let replacement = Slp::parse(&["a", "b", "#0.#1"]).unwrap();
        let out = slp.substitute("x", &replacement).unwrap();
        assert_eq!(
            out.to_strings(&Default::default()),
            vec!["a", "b", "#0.#1", "#2", "#3*.y"]
        );
        assert_eq!(word(&out), "b*.a*.y");
    }

    #[test]
    fn substitute_leaves_inverse_letter_alone() {
        let slp = Slp::parse(&["x.x*.x"]).unwrap();
        let out = slp.substitute("x", &Slp::from(Terminal::new("z"))).unwrap();
        assert_eq!(word(&out), "z.x*.z");
        assert_eq!(out.raw_count("x").unwrap(), 1);
    }

    #[test]
    fn substitute_negated_letter() {
        let slp = Slp::parse(&["x.x*.x"]).unwrap();
        let out = slp.substitute("x*", &Slp::from(Terminal::new("z"))).unwrap();
        assert_eq!(word(&out), "x.z.x");

        // Through a negated reference the replacement shows up inverted.
        let slp = Slp::parse(&["x*.y", "#0*"]).unwrap();
        let out = slp.substitute("x*", &Slp::parse(&["a.b"]).unwrap()).unwrap();
        assert_eq!(word(&out), "y*.b*.a*");
        assert_eq!(out.exact_count(&Terminal::with_sign("x", true)).unwrap(), 0);
    }

    #[test]
    fn substitute_rejects_reference_targets() {
        let slp = Slp::parse(&["x"]).unwrap();
        assert_eq!(
            slp.substitute("#0", &Slp::from(Terminal::new("z"))),
            Err(SlpError::MalformedSymbol("#0".to_string()))
        );
    }

    #[test]
    fn substitute_checks_references() {
        let slp = Slp::parse(&["x", "#2"]).unwrap();
        let err = slp.substitute("x", &Slp::from(Terminal::new("z"))).unwrap_err();
        assert_eq!(err, SlpError::InvalidReference { assignment: 1, target: 2 });

        let bad = Slp::parse(&["#0"]).unwrap();
        let ok = Slp::parse(&["x"]).unwrap();
        assert!(ok.substitute("x", &bad).is_err());
    }

    #[test]
    fn substitute_in_place_is_atomic() {
        let mut slp = Slp::parse(&["x", "#5"]).unwrap();
        let before = slp.clone();
        assert!(slp.substitute_in_place("x", &Slp::from(Terminal::new("z"))).is_err());
        assert_eq!(slp, before);
    }

    #[test]
    fn delete_removes_both_signs() {
        let slp = Slp::parse(&["x.y", "#0.x*.#0*"]).unwrap();
        let out = slp.delete("x");
        assert_eq!(word(&out), "y.y*");
        assert_eq!(out.raw_count("x").unwrap(), 0);
    }

    #[test]
    fn concat_words() {
        let a = Slp::parse(&["x", "#0.#0"]).unwrap();
        let b = Slp::parse(&["y", "#0*"]).unwrap();
        let ab = a.concat(&b).unwrap();
        assert_eq!(word(&ab), "x.x.y*");
        assert_eq!(ab.length().unwrap(), 3);
    }

    #[test]
    fn power_doubling_chain() {
        let slp = Slp::parse(&["x.y"]).unwrap();
        let cube = slp.power(3).unwrap();
        assert_eq!(cube.to_strings(&Default::default()), vec!["x.y", "#0.#0", "#0.#1"]);
        assert_eq!(word(&cube), "x.y.x.y.x.y");

        // Power of two: no joining assignment.
        let eighth = slp.power(8).unwrap();
        assert_eq!(eighth.assignment_count(), 4);
        assert_eq!(eighth.length().unwrap(), 16);

        assert_eq!(slp.power(1).unwrap(), slp);
    }

    #[test]
    fn power_is_logarithmic() {
        let slp = Slp::parse(&["x"]).unwrap();
        let big = slp.power(1_000_000_007).unwrap();
        assert!(big.assignment_count() <= 32);
        assert_eq!(big.length().unwrap(), 1_000_000_007);
    }

    #[test]
    fn power_rejects_non_positive() {
        let slp = Slp::parse(&["x"]).unwrap();
        assert_eq!(slp.power(0), Err(SlpError::InvalidExponent(0)));
        assert_eq!(slp.power(-2), Err(SlpError::InvalidExponent(-2)));
    }
}
