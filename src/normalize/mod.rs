//! Normalization passes for straight-line programs.
//!
//! Passes are only run on request; no other operation normalizes implicitly.
//! - [`inverse`]: the inverse word, realized as one negated reference.
//! - [`binary`]: Chomsky-style form with at most two symbols per assignment.
//! - [`expand`]: the flat word and the uncompressed program.

pub mod binary;
pub mod expand;
pub mod inverse;

pub use binary::BinaryForm;
