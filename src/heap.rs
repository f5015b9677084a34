//! Ancilla heap
//!
//! A value-type pool of currently-free bit indices. Conceptually a sorted
//! set; represented here as a `(threshold, holes)` pair so that
//! [`AncHeap::above`] can realize the conceptually-infinite heap
//! `{k, k+1, k+2, …}` without allocating anything up front — exactly the
//! "threshold plus a sorted set of holes" representation suggested by §9 of
//! the design notes.
//!
//! Every operation here takes `self` by value and returns a new heap: there
//! is no hidden sharing, matching §4.B's "the heap is a value" requirement.

#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bits::BitId;

/// Ancilla-heap errors. The only way [`AncHeap::pop_min`] can fail is on an
/// empty heap, which §4.G.7 says a well-formed caller never triggers ("the
/// preconditions in §3 imply that `popMin` is never called on empty
/// `above(k)` heaps").
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeapError {
    #[error("pop_min called on an empty ancilla heap")]
    Empty,
}

/// A pool of free bit indices, represented as everything at or above
/// `threshold` plus an explicit set of `holes` below it.
///
/// Invariant maintained by every constructor and mutator in this module:
/// every element of `holes` is strictly less than `threshold`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AncHeap {
    threshold: BitId,
    holes: BTreeSet<BitId>,
}

impl AncHeap {
    /// The heap whose element set is `{k, k+1, k+2, …}`.
    pub fn above(k: BitId) -> Self {
        AncHeap { threshold: k, holes: BTreeSet::new() }
    }

    /// Numerically smallest free index, removed from the heap.
    ///
    /// Guarantee: the returned heap's element set is exactly `elts(self)`
    /// minus the returned index, and the returned index is less than every
    /// remaining element (this is automatic here: either it was the least
    /// hole, which by invariant is below `threshold` and hence below every
    /// other hole and every index `>= threshold`; or it was `threshold`
    /// itself, which is below every index `> threshold` and `holes` was
    /// empty below it).
    pub fn pop_min(mut self) -> Result<(Self, BitId), HeapError> {
        if let Some(&least_hole) = self.holes.iter().next() {
            self.holes.remove(&least_hole);
            Ok((self, least_hole))
        } else {
            let popped = self.threshold;
            self.threshold = self.threshold.succ();
            Ok((self, popped))
        }
    }

    /// Return `i` to the heap. A no-op if `i` is already free.
    pub fn insert(mut self, i: BitId) -> Self {
        // Everything at or above `threshold` is implicitly free already;
        // only indices below it need to be tracked explicitly as holes.
        if i < self.threshold {
            self.holes.insert(i);
        }
        self
    }

    pub fn mem(&self, i: BitId) -> bool {
        i >= self.threshold || self.holes.contains(&i)
    }

    /// Finite view of the element set, for testing and invariant-checking
    /// only: the heap is conceptually infinite, so this is capped at
    /// `threshold + extra` plus every hole below it.
    pub fn elts_below(&self, bound: BitId) -> Vec<BitId> {
        let mut v: Vec<BitId> = self.holes.iter().copied().filter(|h| *h < bound).collect();
        let mut t = self.threshold;
        while t < bound {
            v.push(t);
            t = t.succ();
        }
        v.sort();
        v
    }

    pub fn threshold(&self) -> BitId {
        self.threshold
    }
}
