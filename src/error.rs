//! Error types
//!
//! §7 recognizes exactly two error classes. *Precondition violations* are
//! programmer error (the caller handed the synthesizer an overlapping
//! heap/target, or a target that already occurs free in the expression);
//! §4.G.7 says the core has no recovery policy for these and may produce a
//! miscompiled circuit if they're ignored. *Upstream errors* never
//! originate here — they are the caller's own failures (e.g. a front-end
//! reduction that didn't converge to a closed Boolean expression), threaded
//! through [`crate::wrapper`] as opaque [`anyhow::Error`]s.
//!
//! [`SynthesisError`] exists for the precondition-violation class. By
//! default it backs `debug_assert!`s that vanish in release builds, matching
//! §4.G.7 exactly ("implementations should assert on debug builds"). The
//! `strict-asserts` feature promotes the same checks to an unconditional
//! panic, for callers who would rather fail loudly in production than ship
//! a miscompiled circuit.

#![forbid(unsafe_code)]

use thiserror::Error;

use crate::bits::BitId;
use crate::heap::HeapError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("target {target} is not disjoint from the supplied heap")]
    TargetInHeap { target: BitId },
    #[error("target {target} occurs free in the expression being compiled into it")]
    TargetInVars { target: BitId },
    #[error("heap overlaps the free variables of the expression being compiled")]
    HeapVarsOverlap,
    #[error(transparent)]
    Heap(#[from] HeapError),
}
