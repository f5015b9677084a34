//! Crate root: public surface and module map
//!
//! This is the canonical entry point for downstream users of the library.
//! It compiles finite Boolean expression trees over `{false, not, and, xor}`
//! into sequences of reversible gates (`NOT`, `CNOT`, Toffoli) using an
//! ancilla-heap allocator, under a choice of three ancilla-management
//! strategies (Boundaries, Pebbled, Bennett). [`wrapper`] is the intended
//! starting point for most callers; the lower modules are public so that a
//! caller who needs, say, a bare [`heap::AncHeap`] or a raw [`gate::Circuit`]
//! isn't forced through the wrapper's opinions about XDNF normalization or
//! strategy selection.
//!
//! ## Invariants
//!
//! - **Purity of the core.** Everything under [`bits`], [`heap`], [`gate`],
//!   [`bexp`], [`simplify`], [`xdnf`], and [`synth`] is pure: no I/O, no
//!   logging, no randomness. [`wrapper`] is the only module that talks to the
//!   outside world (via `tracing`), and the only module where an
//!   [`anyhow::Error`] from an upstream caller is allowed to appear.
//! - **Value-semantic heap.** [`heap::AncHeap`] is a plain value: every
//!   mutator consumes `self` and returns a new heap. There is no interior
//!   mutability anywhere in this crate, and `unsafe` is forbidden in every
//!   module.
//! - **Two-tier errors.** A precondition violation (overlapping heap/target,
//!   a target free in the expression being compiled into it) is the caller's
//!   bug, not a recoverable runtime condition; see [`error`] and the
//!   `strict-asserts` feature. An upstream failure (e.g. a front end that
//!   never produced a closed expression) is threaded through [`wrapper`]
//!   unchanged as an opaque `anyhow::Error`.
//! - **Determinism.** Every compilation function here is a pure function of
//!   its inputs: the same heap and expression always produce the same
//!   output heap, target, ancilla list, and circuit.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

/// Bit-index newtype, ordered bit sets, and a total-lookup map.
pub mod bits;
/// Reversible gate IR: `NOT`/`CNOT`/Toffoli, circuits, and `uncompute`.
pub mod gate;
/// Value-semantic ancilla heap (`above(k)` threshold-plus-holes pool).
pub mod heap;
/// Boolean expression IR and its structural-recursion attributes.
pub mod bexp;
/// One-pass bottom-up peephole simplifier.
pub mod simplify;
/// XOR-of-ANDs (XDNF/ESOP) normal form and its partial inverse.
pub mod xdnf;
/// Precondition-violation error type shared by the synthesizer.
pub mod error;
/// The synthesizer: in-place/out-of-place compilation under three
/// ancilla-management strategies (Boundaries, Pebbled, Bennett).
pub mod synth;
/// Strategy selection, array/single-location compile entry points, and the
/// canonical textual circuit format. Start here.
pub mod wrapper;

pub use bexp::BExp;
pub use bits::BitId;
pub use error::SynthesisError;
pub use gate::{Circuit, Gate};
pub use heap::AncHeap;
pub use wrapper::{compile_array, compile_program, format_circuit, Strategy};
