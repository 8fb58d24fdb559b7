//! slpcore: straight-line programs over free-group words.
//!
//! A straight-line program (SLP) is an append-only list of assignments in
//! which every assignment concatenates letters and references to earlier
//! assignments. A program with `n` assignments can denote a word of length
//! exponential in `n`, and this crate answers questions about that word and
//! rewrites it without ever materializing it.
//!
//! Letters live in a free group: every letter `a` has a formal inverse `a*`,
//! and a reference `#k*` stands for the inverse of the word of assignment
//! `k`. Inversion is never pushed into stored assignments; every query and
//! rewrite resolves the sign on the fly.
//!
//! - [`core`]: [`Slp`] and [`Assignment`], parsing and rendering.
//! - [`query`]: length and letter counts by dynamic programming.
//! - [`operations`]: substitution, deletion, concatenation and powers.
//! - [`normalize`]: inverse, binary normal form, expansion.
//! - [`traceability`]: a replayable history of rewrites.
//!
//! # References
//!
//! - Lohrey, M. "Algorithmics on SLP-compressed strings: A survey" (2012)
//! - Plandowski, W. "Testing equivalence of morphisms on context-free languages" (1994)
//!
//! # Example
//!
//! ```
//! use slpcore::prelude::*;
//!
//! let slp = Slp::parse(&["x", "y", "#0.#1"]).unwrap();
//! assert_eq!(slp.length().unwrap(), 2);
//!
//! let z = Slp::parse(&["z"]).unwrap();
//! let rewritten = slp.substitute("x", &z).unwrap();
//! assert_eq!(rewritten.raw_count("x").unwrap(), 0);
//! assert_eq!(rewritten.raw_count("z").unwrap(), 1);
//! ```

pub mod cache;
pub mod core;
pub mod error;
pub mod fingerprint;
pub mod normalize;
pub mod notation;
pub mod operations;
pub mod query;
pub mod symbol;
pub mod traceability;

pub use crate::core::{Assignment, Slp};
pub use crate::error::SlpError;
pub use crate::fingerprint::{Canonicalizable, HashValue};
pub use crate::normalize::BinaryForm;
pub use crate::notation::Notation;
pub use crate::query::{evaluate, evaluate_all, Accumulator, SignedPair};
pub use crate::symbol::{Reference, Symbol, Terminal};
pub use crate::traceability::{RewriteOp, RewriteStep, RewriteTrace, RuleId, TraceError};

/// Prelude for convenient usage.
pub mod prelude {
    pub use crate::core::{Assignment, Slp};
    pub use crate::error::SlpError;
    pub use crate::fingerprint::{Canonicalizable, HashValue};
    pub use crate::normalize::BinaryForm;
    pub use crate::notation::Notation;
    pub use crate::query::{evaluate, evaluate_all, Accumulator, SignedPair};
    pub use crate::symbol::{Reference, Symbol, Terminal};
    pub use crate::traceability::{RewriteOp, RewriteTrace, RuleId};
}
