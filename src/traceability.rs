//! Traceability and replay for program rewrites.
//!
//! A [`RewriteTrace`] starts from an initial program and records every
//! rewrite applied to it, together with the fingerprints of the program before
//! and after the step. The trace can replay itself to any version, checking
//! each fingerprint on the way, and can move its current version backwards
//! (undo) or forwards again (redo). Applying a new rewrite after an undo drops
//! the steps that were undone.
//!
//! # Citations
//! - Version control for structured documents: Mens, "A formal foundation for object-oriented software evolution" (1999)

use crate::core::Slp;
use crate::error::SlpError;
use crate::fingerprint::HashValue;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identifier for a rewrite rule.
///
/// Used to track which rule was applied in a rewrite step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleId(pub String);

/// A rewrite that can be applied to a program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewriteOp {
    /// Replace every occurrence of a signed letter by a program.
    Substitute { target: String, replacement: Slp },
    /// Remove a letter in both signs.
    Delete { name: String },
    /// Raise the word to a positive power.
    Power { exponent: i64 },
    /// Invert the word.
    Inverse,
    /// Append another program's word.
    Concat { suffix: Slp },
}

impl RewriteOp {
    /// Applies the rewrite, leaving `slp` untouched.
    pub fn apply(&self, slp: &Slp) -> Result<Slp, SlpError> {
        match self {
            RewriteOp::Substitute { target, replacement } => slp.substitute(target, replacement),
            RewriteOp::Delete { name } => Ok(slp.delete(name)),
            RewriteOp::Power { exponent } => slp.power(*exponent),
            RewriteOp::Inverse => Ok(slp.inverse()),
            RewriteOp::Concat { suffix } => slp.concat(suffix),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            RewriteOp::Substitute { .. } => "substitute",
            RewriteOp::Delete { .. } => "delete",
            RewriteOp::Power { .. } => "power",
            RewriteOp::Inverse => "inverse",
            RewriteOp::Concat { .. } => "concat",
        }
    }
}

/// A single recorded rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteStep {
    op: RewriteOp,
    /// Fingerprint of the program before the rewrite.
    pre_fingerprint: HashValue,
    /// Fingerprint of the program after the rewrite.
    post_fingerprint: HashValue,
    /// Version reached by this step (1 for the first step).
    version: u64,
    rule_id: Option<RuleId>,
}

impl RewriteStep {
    pub fn op(&self) -> &RewriteOp {
        &self.op
    }

    pub fn pre_fingerprint(&self) -> HashValue {
        self.pre_fingerprint
    }

    pub fn post_fingerprint(&self) -> HashValue {
        self.post_fingerprint
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn rule_id(&self) -> Option<&RuleId> {
        self.rule_id.as_ref()
    }
}

/// Error type for traceability and replay operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    /// The rewrite itself failed.
    Rewrite(SlpError),
    /// The requested version is past the end of the trace.
    VersionMismatch { requested: usize, available: usize },
    /// Replaying a step did not reproduce its recorded fingerprints.
    FingerprintMismatch { version: u64 },
}

impl std::fmt::Display for TraceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TraceError::Rewrite(err) => write!(f, "rewrite failed: {}", err),
            TraceError::VersionMismatch { requested, available } => write!(
                f,
                "version {} requested but trace has {} steps",
                requested, available
            ),
            TraceError::FingerprintMismatch { version } => {
                write!(f, "fingerprint mismatch at version {}", version)
            }
        }
    }
}

impl std::error::Error for TraceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TraceError::Rewrite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SlpError> for TraceError {
    fn from(err: SlpError) -> Self {
        TraceError::Rewrite(err)
    }
}

/// A history of rewrites applied to a program.
///
/// Only the initial program, the steps and the version are stored. Decoding
/// replays every step, so a trace whose fingerprints do not check out or
/// whose version is out of range is rejected instead of loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TraceRecord", into = "TraceRecord")]
pub struct RewriteTrace {
    initial: Slp,
    /// Program at `current_version`.
    current: Slp,
    steps: Vec<RewriteStep>,
    /// Number of steps in effect (0 for the initial program).
    current_version: usize,
}

/// Stored form of a [`RewriteTrace`].
#[derive(Serialize, Deserialize)]
struct TraceRecord {
    initial: Slp,
    steps: Vec<RewriteStep>,
    current_version: usize,
}

impl TryFrom<TraceRecord> for RewriteTrace {
    type Error = TraceError;

    fn try_from(record: TraceRecord) -> Result<Self, Self::Error> {
        let mut trace = RewriteTrace {
            current: record.initial.clone(),
            initial: record.initial,
            steps: record.steps,
            current_version: 0,
        };
        trace.replay_to(trace.steps.len())?;
        trace.rollback_to(record.current_version)?;
        Ok(trace)
    }
}

impl From<RewriteTrace> for TraceRecord {
    fn from(trace: RewriteTrace) -> Self {
        TraceRecord {
            initial: trace.initial,
            steps: trace.steps,
            current_version: trace.current_version,
        }
    }
}

impl RewriteTrace {
    /// Creates a new trace starting from the given program.
    pub fn new(initial: Slp) -> Self {
        Self {
            current: initial.clone(),
            initial,
            steps: Vec::new(),
            current_version: 0,
        }
    }

    /// Applies a rewrite to the current program and records it.
    pub fn apply(&mut self, op: RewriteOp) -> Result<&Slp, TraceError> {
        self.record(op, None)
    }

    /// Like [`RewriteTrace::apply`], tagging the step with a rule identifier.
    pub fn apply_rule(&mut self, op: RewriteOp, rule_id: RuleId) -> Result<&Slp, TraceError> {
        self.record(op, Some(rule_id))
    }

    fn record(&mut self, op: RewriteOp, rule_id: Option<RuleId>) -> Result<&Slp, TraceError> {
        let next = op.apply(&self.current)?;
        // Steps past the current version were undone and are now unreachable.
        self.steps.truncate(self.current_version);
        let step = RewriteStep {
            pre_fingerprint: self.current.fingerprint(),
            post_fingerprint: next.fingerprint(),
            version: self.steps.len() as u64 + 1,
            op,
            rule_id,
        };
        debug!(
            op = step.op.kind(),
            version = step.version,
            pre = %step.pre_fingerprint,
            post = %step.post_fingerprint,
            "trace step"
        );
        self.steps.push(step);
        self.current_version = self.steps.len();
        self.current = next;
        Ok(&self.current)
    }

    /// Returns the program at the current version.
    pub fn current(&self) -> &Slp {
        &self.current
    }

    pub fn initial(&self) -> &Slp {
        &self.initial
    }

    /// Returns the number of recorded steps, including undone ones.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Returns the current version index.
    pub fn current_version(&self) -> usize {
        self.current_version
    }

    /// Replays the trace from the initial program up to `target_version`.
    ///
    /// Every step is re-applied and both of its fingerprints are checked.
    pub fn replay_to(&self, target_version: usize) -> Result<Slp, TraceError> {
        if target_version > self.steps.len() {
            return Err(TraceError::VersionMismatch {
                requested: target_version,
                available: self.steps.len(),
            });
        }
        let mut slp = self.initial.clone();
        for step in &self.steps[..target_version] {
            if slp.fingerprint() != step.pre_fingerprint {
                return Err(TraceError::FingerprintMismatch { version: step.version });
            }
            slp = step.op.apply(&slp)?;
            if slp.fingerprint() != step.post_fingerprint {
                return Err(TraceError::FingerprintMismatch { version: step.version });
            }
        }
        Ok(slp)
    }

    /// Moves the current version to `target_version`, backwards or forwards.
    pub fn rollback_to(&mut self, target_version: usize) -> Result<(), TraceError> {
        let slp = self.replay_to(target_version)?;
        debug!(from = self.current_version, to = target_version, "trace rollback");
        self.current = slp;
        self.current_version = target_version;
        Ok(())
    }

    /// Returns a reference to a specific rewrite step (0-indexed).
    pub fn get_step(&self, index: usize) -> Option<&RewriteStep> {
        self.steps.get(index)
    }

    /// Returns an iterator over all rewrite steps.
    pub fn steps(&self) -> impl Iterator<Item = &RewriteStep> {
        self.steps.iter()
    }

    /// Returns the fingerprint of the initial program (version 0).
    pub fn initial_fingerprint(&self) -> HashValue {
        self.initial.fingerprint()
    }
}
