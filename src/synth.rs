//! Synthesiser
//!
//! Two mutually recursive compilation modes — in-place ([`compile`]), which
//! XORs the value of an expression into a caller-supplied target, and
//! out-of-place ([`compile_oop`]), which allocates (or reuses, for a bare
//! variable) a bit to hold the value — underlie three ancilla-management
//! strategies that all lower the same [`BExp`] to the same *semantics* but
//! different circuit shapes (§4.G):
//!
//!   - [`compile_boundaries`] / [`compile_oop_boundaries`]: compile plainly,
//!     then append one cleanup suffix at the very end ("Boundaries").
//!   - [`compile_pebbled`] / [`compile_oop_pebbled`]: clean up inline at
//!     every `And` node, trading gate count for peak ancilla count
//!     ("Pebbled").
//!   - [`compile_bennett`] / [`compile_oop_bennett`]: compute every XOR term
//!     out-of-place, copy each into the target, and defer all cleanup to
//!     the end, mirrored ("Bennett"). No ancilla is ever returned to the
//!     heap under this strategy — everything borrowed is reported live.
//!
//! `compile`/`compile_oop` (no cleanup at all) are exposed directly too,
//! since [`compile_boundaries`] and the correctness tests in §8 both need
//! the uncleaned circuit as a building block.

#![forbid(unsafe_code)]

use crate::bexp::BExp;
use crate::bits::BitId;
use crate::error::SynthesisError;
use crate::gate::{self, Circuit, Gate};
use crate::heap::AncHeap;

type CompileResult = (AncHeap, BitId, Vec<BitId>, Circuit);

fn check_in_place_precondition(h: &AncHeap, t: BitId, e: &BExp) -> Result<(), SynthesisError> {
    if h.mem(t) {
        return Err(SynthesisError::TargetInHeap { target: t });
    }
    if e.occurs_in(t) {
        return Err(SynthesisError::TargetInVars { target: t });
    }
    for v in e.vars().iter() {
        if h.mem(*v) {
            return Err(SynthesisError::HeapVarsOverlap);
        }
    }
    Ok(())
}

fn check_oop_precondition(h: &AncHeap, e: &BExp) -> Result<(), SynthesisError> {
    for v in e.vars().iter() {
        if h.mem(*v) {
            return Err(SynthesisError::HeapVarsOverlap);
        }
    }
    Ok(())
}

/// Panics (even in release builds) under the `strict-asserts` feature;
/// otherwise a no-op `debug_assert!` that vanishes from release builds.
/// See the module-level error-handling discussion in [`crate::error`].
macro_rules! assert_precondition {
    ($check:expr) => {{
        #[cfg(feature = "strict-asserts")]
        {
            if let Err(e) = $check {
                panic!("synthesizer precondition violated: {e}");
            }
        }
        #[cfg(not(feature = "strict-asserts"))]
        {
            debug_assert!($check.is_ok(), "synthesizer precondition violated");
        }
    }};
}

// ===========================================================================
// §4.G.1 / §4.G.2 — plain compilation, no cleanup.
// ===========================================================================

/// In-place: XOR the value of `e` into the caller-supplied target `t`.
pub fn compile(h: AncHeap, t: BitId, e: &BExp) -> CompileResult {
    assert_precondition!(check_in_place_precondition(&h, t, e));
    match e {
        BExp::False => (h, t, Vec::new(), Circuit::new()),

        BExp::Var(v) => (h, t, Vec::new(), vec![Gate::Cnot(*v, t)]),

        BExp::Xor(x, y) => {
            let (h1, t, a1, c1) = compile(h, t, x);
            let (h2, t, a2, c2) = compile(h1, t, y);
            let mut a = a1;
            a.extend(a2);
            let mut c = c1;
            c.extend(c2);
            (h2, t, a, c)
        }

        BExp::And(x, y) => {
            let (h1, rx, a1, c1) = compile_oop(h, x);
            let (h2, ry, a2, c2) = compile_oop(h1, y);
            let mut a = a1;
            a.extend(a2);
            let mut c = c1;
            c.extend(c2);
            c.push(Gate::Toff(rx, ry, t));
            (h2, t, a, c)
        }

        BExp::Not(x) => {
            let (h1, t, a1, mut c1) = compile(h, t, x);
            c1.push(Gate::Not(t));
            (h1, t, a1, c1)
        }
    }
}

/// Out-of-place: allocate (or reuse, for a bare variable) a bit holding the
/// value of `e`.
pub fn compile_oop(h: AncHeap, e: &BExp) -> CompileResult {
    assert_precondition!(check_oop_precondition(&h, e));
    if let BExp::Var(v) = e {
        return (h, *v, Vec::new(), Circuit::new());
    }
    let (h1, t) = h.pop_min().expect("above(k) heaps are never empty");
    let (h2, t, a, c) = compile(h1, t, e);
    let mut live = vec![t];
    live.extend(a);
    (h2, t, live, c)
}

// ===========================================================================
// §4.G.3 — Boundaries: one cleanup suffix at the end.
// ===========================================================================

/// Run the uncleaned in-place compile, then append a single cleanup suffix
/// that restores every ancilla it used (and re-inserts them into the heap).
pub fn compile_boundaries(h: AncHeap, t: BitId, e: &BExp) -> CompileResult {
    let (h1, r, a, c1) = compile(h, t, e);
    let u = gate::reverse(&gate::uncompute(&c1, r));
    let h2 = a.iter().fold(h1, |acc, &b| acc.insert(b));
    let mut c = c1;
    c.extend(u);
    (h2, r, Vec::new(), c)
}

pub fn compile_oop_boundaries(h: AncHeap, e: &BExp) -> CompileResult {
    if let BExp::Var(v) = e {
        return (h, *v, Vec::new(), Circuit::new());
    }
    let (h1, t) = h.pop_min().expect("above(k) heaps are never empty");
    let (h2, r, _empty_a, c) = compile_boundaries(h1, t, e);
    (h2, r, vec![r], c)
}

// ===========================================================================
// §4.G.4 — Pebbled: clean up inline at every And node.
// ===========================================================================

/// Identical to [`compile`] except at `And`: the Toffoli's two ancilla
/// operands are cleaned and returned to the heap immediately after the
/// Toffoli fires, so no ancilla allocated inside an `And` ever survives
/// into the caller's ancilla list.
pub fn compile_pebbled(h: AncHeap, t: BitId, e: &BExp) -> CompileResult {
    assert_precondition!(check_in_place_precondition(&h, t, e));
    match e {
        BExp::False => (h, t, Vec::new(), Circuit::new()),

        BExp::Var(v) => (h, t, Vec::new(), vec![Gate::Cnot(*v, t)]),

        BExp::Xor(x, y) => {
            let (h1, t, a1, c1) = compile_pebbled(h, t, x);
            let (h2, t, a2, c2) = compile_pebbled(h1, t, y);
            let mut a = a1;
            a.extend(a2);
            let mut c = c1;
            c.extend(c2);
            (h2, t, a, c)
        }

        BExp::And(x, y) => {
            let (h1, rx, a1, c1) = compile_oop_pebbled(h, x);
            let (h2, ry, a2, c2) = compile_oop_pebbled(h1, y);
            let mut inner = c1.clone();
            inner.extend(c2.iter().copied());
            let u = gate::reverse(&gate::uncompute(&inner, t));
            let mut a = a1;
            a.extend(a2);
            let h3 = a.iter().fold(h2, |acc, &b| acc.insert(b));
            let mut c = inner;
            c.push(Gate::Toff(rx, ry, t));
            c.extend(u);
            (h3, t, Vec::new(), c)
        }

        BExp::Not(x) => {
            let (h1, t, a1, mut c1) = compile_pebbled(h, t, x);
            c1.push(Gate::Not(t));
            (h1, t, a1, c1)
        }
    }
}

pub fn compile_oop_pebbled(h: AncHeap, e: &BExp) -> CompileResult {
    assert_precondition!(check_oop_precondition(&h, e));
    if let BExp::Var(v) = e {
        return (h, *v, Vec::new(), Circuit::new());
    }
    let (h1, t) = h.pop_min().expect("above(k) heaps are never empty");
    let (h2, t, a, c) = compile_pebbled(h1, t, e);
    let mut live = vec![t];
    live.extend(a);
    (h2, t, live, c)
}

// ===========================================================================
// §4.G.5 — Bennett: compute every XOR term out-of-place, copy, defer cleanup.
// ===========================================================================

/// Flatten the top-level right-nested `Xor` spine into its list of terms.
/// A non-`Xor` expression is its own single-element term list.
fn flatten_xor_terms(e: &BExp) -> Vec<BExp> {
    match e {
        BExp::Xor(x, y) => {
            let mut terms = flatten_xor_terms(x);
            terms.extend(flatten_xor_terms(y));
            terms
        }
        other => vec![other.clone()],
    }
}

/// Compute every term of the XOR spine out-of-place, CNOT each term's value
/// into `t`, then append every term's cleanup, in reverse creation order
/// (a "compute, compute, ..., uncompute, ..., uncompute" pyramid). No
/// ancilla is folded back into the heap: every bit this strategy ever
/// allocates — including ones whose value cleanup already zeroed — is
/// reported live, per §4.G.5.
///
/// `False` terms are skipped: they contribute nothing to the XOR and
/// compiling one out-of-place would only waste an ancilla on a bit that is
/// provably always zero.
pub fn compile_bennett(h: AncHeap, t: BitId, e: &BExp) -> CompileResult {
    assert_precondition!(check_in_place_precondition(&h, t, e));
    let terms = flatten_xor_terms(e);
    let mut h = h;
    let mut forward = Circuit::new();
    let mut cleanups: Vec<Circuit> = Vec::new();
    let mut live = Vec::new();

    for term in &terms {
        if matches!(term, BExp::False) {
            continue;
        }
        let (h2, r, a, c) = compile_oop(h, term);
        h = h2;
        forward.extend(c.iter().copied());
        forward.push(Gate::Cnot(r, t));
        cleanups.push(gate::reverse(&gate::uncompute(&c, r)));
        live.extend(a);
    }

    for u in cleanups.into_iter().rev() {
        forward.extend(u);
    }

    (h, t, live, forward)
}

pub fn compile_oop_bennett(h: AncHeap, e: &BExp) -> CompileResult {
    assert_precondition!(check_oop_precondition(&h, e));
    if let BExp::Var(v) = e {
        return (h, *v, Vec::new(), Circuit::new());
    }
    let (h1, t) = h.pop_min().expect("above(k) heaps are never empty");
    let (h2, t, a, c) = compile_bennett(h1, t, e);
    let mut live = vec![t];
    live.extend(a);
    (h2, t, live, c)
}

// ===========================================================================
// §6 — depth-sorted array folds.
// ===========================================================================

/// Compile every expression out-of-place under the given per-expression
/// out-of-place strategy, after sorting by ascending AND-depth to improve
/// ancilla reuse (§4.G.6). A single heap threads through the whole list;
/// the returned gate sequence is the concatenation in *processing* order
/// (i.e. depth-sorted, not input order — §9 notes this wrapper is thin and
/// specified for context only).
fn fold_with<F>(h: AncHeap, exprs: &[BExp], mut compile_one: F) -> (AncHeap, Vec<BitId>, Circuit)
where
    F: FnMut(AncHeap, &BExp) -> CompileResult,
{
    let mut order: Vec<&BExp> = exprs.iter().collect();
    order.sort_by_key(|e| e.and_depth());
    let mut h = h;
    let mut circuit = Circuit::new();
    let mut outputs = Vec::with_capacity(order.len());
    for e in order {
        let (h2, r, _a, c) = compile_one(h, e);
        h = h2;
        circuit.extend(c);
        outputs.push(r);
    }
    (h, outputs, circuit)
}

pub fn fold_boundaries(h: AncHeap, exprs: &[BExp]) -> (AncHeap, Vec<BitId>, Circuit) {
    fold_with(h, exprs, compile_oop_boundaries)
}

pub fn fold_pebbled(h: AncHeap, exprs: &[BExp]) -> (AncHeap, Vec<BitId>, Circuit) {
    fold_with(h, exprs, compile_oop_pebbled)
}

pub fn fold_bennett(h: AncHeap, exprs: &[BExp]) -> (AncHeap, Vec<BitId>, Circuit) {
    fold_with(h, exprs, compile_oop_bennett)
}
