//! Materialization of the denoted word.
//!
//! Expansion is exponential in the worst case and exists for diagnostics,
//! tests and small programs. Identity letters are dropped; a negated
//! reference contributes its target's word reversed with every letter
//! inverted.

use crate::core::{Assignment, Slp};
use crate::error::SlpError;
use crate::symbol::{Symbol, Terminal};

/// Expands every assignment, memoizing one word per position.
fn expand_all(slp: &Slp) -> Result<Vec<Vec<Terminal>>, SlpError> {
    let mut words: Vec<Vec<Terminal>> = Vec::with_capacity(slp.assignment_count());
    for (position, assignment) in slp.assignments().iter().enumerate() {
        let mut word = Vec::new();
        for symbol in assignment {
            match symbol {
                Symbol::Terminal(t) if t.is_identity() => {}
                Symbol::Terminal(t) => word.push(t.clone()),
                Symbol::Reference(r) => {
                    let target = &words[r.check(position)?];
                    if r.negated {
                        word.extend(target.iter().rev().map(Terminal::negate));
                    } else {
                        word.extend(target.iter().cloned());
                    }
                }
            }
        }
        words.push(word);
    }
    Ok(words)
}

impl Slp {
    /// The flat word of the program.
    pub fn expand(&self) -> Result<Vec<Terminal>, SlpError> {
        Ok(expand_all(self)?.pop().unwrap_or_default())
    }

    /// The program with every assignment replaced by its flat word.
    pub fn uncompressed(&self) -> Result<Slp, SlpError> {
        let out = expand_all(self)?
            .into_iter()
            .map(|word| Assignment::new(word.into_iter().map(Symbol::Terminal).collect()))
            .collect();
        Ok(Slp::from_raw(out))
    }
}
