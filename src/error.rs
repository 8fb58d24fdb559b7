//! Error type shared by every SLP operation.
//!
//! All failures are deterministic: the operations are pure passes over
//! caller-supplied structure, so retrying reproduces the same error.

/// Error type for parsing, querying and rewriting straight-line programs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlpError {
    /// A reference points at or beyond the assignment that contains it.
    InvalidReference {
        /// Position of the assignment holding the reference.
        assignment: usize,
        /// The index the reference names.
        target: usize,
    },
    /// A token is neither a valid identifier nor a valid reference.
    MalformedSymbol(String),
    /// Exponentiation requested with a non-positive power.
    InvalidExponent(i64),
    /// An SLP must hold at least one assignment.
    EmptyProgram,
    /// The reserved markers of a notation clash with each other or with
    /// identifier characters.
    InvalidNotation(String),
    /// A length or count no longer fits the counter type.
    Overflow {
        /// Position of the assignment whose value overflowed.
        assignment: usize,
    },
}

impl std::fmt::Display for SlpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlpError::InvalidReference { assignment, target } => write!(
                f,
                "assignment {} references unassigned position {}",
                assignment, target
            ),
            SlpError::MalformedSymbol(token) => write!(f, "malformed symbol {:?}", token),
            SlpError::InvalidExponent(n) => {
                write!(f, "invalid exponent {}: only positive powers are supported", n)
            }
            SlpError::EmptyProgram => write!(f, "an SLP needs at least one assignment"),
            SlpError::InvalidNotation(reason) => write!(f, "invalid notation: {}", reason),
            SlpError::Overflow { assignment } => {
                write!(f, "counter overflow while evaluating assignment {}", assignment)
            }
        }
    }
}

impl std::error::Error for SlpError {}
