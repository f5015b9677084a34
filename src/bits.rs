//! Bit-index primitives & sets
//!
//! A [`BitId`] identifies a single classical bit in the caller's address
//! space. Uniqueness of indices is the caller's responsibility (§3 of the
//! design notes): the synthesizer never reuses an index while it is live, but
//! it also never checks that the caller didn't hand it a duplicate — see
//! [`crate::synth`]'s precondition discussion.
//!
//! [`BitSet`] is a thin wrapper over an ordered set with the extensional
//! equality and union/subset/disjoint helpers the rest of the crate needs.
//! [`TotalMap`] gives every lookup a designated default so that `vars(e)`-style
//! folds (see [`crate::bexp`]) never need to handle a missing key.

#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier for a single classical bit.
///
/// Backed by `i64` rather than `usize` because the heap's `above(k)`
/// constructor and the wrapper's "start fresh variables here" convention
/// (§6) both reason about bit indices as points on an unbounded integer
/// line, not as array offsets.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BitId(pub i64);

impl BitId {
    #[inline]
    pub fn new(i: i64) -> Self {
        BitId(i)
    }

    #[inline]
    pub fn get(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn succ(self) -> BitId {
        BitId(self.0 + 1)
    }
}

impl fmt::Display for BitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BitId {
    fn from(i: i64) -> Self {
        BitId(i)
    }
}

/// An ordered set of bit identifiers with extensional equality.
///
/// Ordering is incidental plumbing (it lets [`crate::heap::AncHeap`] reuse
/// this type for its hole set) and is not otherwise load-bearing: nothing in
/// this crate relies on iteration order beyond the heap's `popMin`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitSet(BTreeSet<BitId>);

impl BitSet {
    pub fn new() -> Self {
        BitSet(BTreeSet::new())
    }

    pub fn singleton(b: BitId) -> Self {
        let mut s = BTreeSet::new();
        s.insert(b);
        BitSet(s)
    }

    pub fn from_iter(iter: impl IntoIterator<Item = BitId>) -> Self {
        BitSet(iter.into_iter().collect())
    }

    pub fn insert(&mut self, b: BitId) -> bool {
        self.0.insert(b)
    }

    pub fn contains(&self, b: BitId) -> bool {
        self.0.contains(&b)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BitId> {
        self.0.iter()
    }

    pub fn union(&self, other: &BitSet) -> BitSet {
        BitSet(self.0.union(&other.0).copied().collect())
    }

    pub fn is_subset(&self, other: &BitSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn is_disjoint(&self, other: &BitSet) -> bool {
        self.0.is_disjoint(&other.0)
    }

    pub fn extend(&mut self, other: &BitSet) {
        self.0.extend(other.0.iter().copied());
    }
}

impl FromIterator<BitId> for BitSet {
    fn from_iter<T: IntoIterator<Item = BitId>>(iter: T) -> Self {
        BitSet(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a BitSet {
    type Item = &'a BitId;
    type IntoIter = std::collections::btree_set::Iter<'a, BitId>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A total mapping from bit identifier to `V`: lookup cannot fail, a missing
/// key simply yields the constructor-supplied default.
///
/// Relied on by [`crate::bexp::eval`] and by any test harness that evaluates
/// a [`crate::gate::Circuit`] against a state that doesn't mention every bit
/// the circuit touches.
#[derive(Clone, Debug)]
pub struct TotalMap<V> {
    default: V,
    entries: std::collections::BTreeMap<BitId, V>,
}

impl<V: Clone> TotalMap<V> {
    pub fn new(default: V) -> Self {
        TotalMap { default, entries: std::collections::BTreeMap::new() }
    }

    pub fn get(&self, b: BitId) -> V {
        self.entries.get(&b).cloned().unwrap_or_else(|| self.default.clone())
    }

    pub fn set(&mut self, b: BitId, v: V) {
        self.entries.insert(b, v);
    }
}

impl TotalMap<bool> {
    /// Construct a state that is `true` on exactly the given bits.
    pub fn from_true_bits(bits: impl IntoIterator<Item = BitId>) -> Self {
        let mut m = TotalMap::new(false);
        for b in bits {
            m.set(b, true);
        }
        m
    }
}
