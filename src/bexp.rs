//! Boolean expression IR
//!
//! [`BExp`] is the finite-tree term algebra the rest of the crate compiles:
//! `false`, variables, negation, conjunction, and exclusive-or. All derived
//! attributes (`vars`, `var_max`, `and_depth`) and both substitutions are
//! structural recursions that strictly decrease on tree size, so none of
//! them need a fuel argument or depth bound to terminate (§9).

#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::bits::{BitId, BitSet, TotalMap};

/// A Boolean expression over the connectives `{false, not, and, xor}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BExp {
    False,
    Var(BitId),
    Not(Box<BExp>),
    And(Box<BExp>, Box<BExp>),
    Xor(Box<BExp>, Box<BExp>),
}

impl BExp {
    pub fn var(i: impl Into<BitId>) -> BExp {
        BExp::Var(i.into())
    }

    pub fn not(x: BExp) -> BExp {
        BExp::Not(Box::new(x))
    }

    pub fn and(x: BExp, y: BExp) -> BExp {
        BExp::And(Box::new(x), Box::new(y))
    }

    pub fn xor(x: BExp, y: BExp) -> BExp {
        BExp::Xor(Box::new(x), Box::new(y))
    }

    /// `true` iff `i` occurs as a `Var` anywhere in the tree.
    pub fn occurs_in(&self, i: BitId) -> bool {
        match self {
            BExp::False => false,
            BExp::Var(v) => *v == i,
            BExp::Not(x) => x.occurs_in(i),
            BExp::And(x, y) | BExp::Xor(x, y) => x.occurs_in(i) || y.occurs_in(i),
        }
    }

    /// The set of free variables.
    pub fn vars(&self) -> BitSet {
        match self {
            BExp::False => BitSet::new(),
            BExp::Var(v) => BitSet::singleton(*v),
            BExp::Not(x) => x.vars(),
            BExp::And(x, y) | BExp::Xor(x, y) => x.vars().union(&y.vars()),
        }
    }

    /// The maximum variable index occurring in the expression, or `0` for a
    /// closed expression.
    pub fn var_max(&self) -> BitId {
        match self {
            BExp::False => BitId(0),
            BExp::Var(v) => *v,
            BExp::Not(x) => x.var_max(),
            BExp::And(x, y) | BExp::Xor(x, y) => std::cmp::max(x.var_max(), y.var_max()),
        }
    }

    /// Max number of `And` nodes on any root-to-leaf path: `Not` is
    /// transparent, `Xor` takes the max of its children, `And` adds one.
    pub fn and_depth(&self) -> u32 {
        match self {
            BExp::False | BExp::Var(_) => 0,
            BExp::Not(x) => x.and_depth(),
            BExp::Xor(x, y) => std::cmp::max(x.and_depth(), y.and_depth()),
            BExp::And(x, y) => 1 + std::cmp::max(x.and_depth(), y.and_depth()),
        }
    }

    /// Number of nodes in the tree, used only by tests that want a
    /// depth/size sanity bound (§9: "a simple depth bound ... catches
    /// programming mistakes in test mode").
    pub fn size(&self) -> usize {
        match self {
            BExp::False | BExp::Var(_) => 1,
            BExp::Not(x) => 1 + x.size(),
            BExp::And(x, y) | BExp::Xor(x, y) => 1 + x.size() + y.size(),
        }
    }

    /// Replace each `Var(i)` by `sigma(i)` (a whole `BExp`).
    pub fn subst_bexp(&self, sigma: &BTreeMap<BitId, BExp>) -> BExp {
        match self {
            BExp::False => BExp::False,
            BExp::Var(v) => sigma.get(v).cloned().unwrap_or_else(|| BExp::Var(*v)),
            BExp::Not(x) => BExp::not(x.subst_bexp(sigma)),
            BExp::And(x, y) => BExp::and(x.subst_bexp(sigma), y.subst_bexp(sigma)),
            BExp::Xor(x, y) => BExp::xor(x.subst_bexp(sigma), y.subst_bexp(sigma)),
        }
    }

    /// Replace each `Var(i)` by `Var(sigma(i))` — a pure renaming.
    pub fn subst_var(&self, sigma: &BTreeMap<BitId, BitId>) -> BExp {
        match self {
            BExp::False => BExp::False,
            BExp::Var(v) => BExp::Var(sigma.get(v).copied().unwrap_or(*v)),
            BExp::Not(x) => BExp::not(x.subst_var(sigma)),
            BExp::And(x, y) => BExp::and(x.subst_var(sigma), y.subst_var(sigma)),
            BExp::Xor(x, y) => BExp::xor(x.subst_var(sigma), y.subst_var(sigma)),
        }
    }

    /// The usual two-valued interpretation.
    pub fn eval(&self, st: &TotalMap<bool>) -> bool {
        match self {
            BExp::False => false,
            BExp::Var(v) => st.get(*v),
            BExp::Not(x) => !x.eval(st),
            BExp::And(x, y) => x.eval(st) && y.eval(st),
            BExp::Xor(x, y) => x.eval(st) ^ y.eval(st),
        }
    }
}

impl fmt::Display for BExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BExp::False => write!(f, "0"),
            BExp::Var(v) => write!(f, "x{v}"),
            BExp::Not(x) => write!(f, "!({x})"),
            BExp::And(x, y) => write!(f, "({x} & {y})"),
            BExp::Xor(x, y) => write!(f, "({x} ^ {y})"),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use proptest::prelude::*;

    pub fn arb_bexp(max_var: i64) -> impl Strategy<Value = BExp> {
        let leaf = prop_oneof![
            Just(BExp::False),
            (0..=max_var).prop_map(|v| BExp::Var(BitId(v))),
        ];
        leaf.prop_recursive(4, 32, 4, move |inner| {
            prop_oneof![
                inner.clone().prop_map(BExp::not),
                (inner.clone(), inner.clone()).prop_map(|(x, y)| BExp::and(x, y)),
                (inner.clone(), inner).prop_map(|(x, y)| BExp::xor(x, y)),
            ]
        })
    }

    fn arb_state(max_var: i64) -> impl Strategy<Value = TotalMap<bool>> {
        proptest::collection::vec(any::<bool>(), (max_var + 1) as usize).prop_map(move |bits| {
            let mut m = TotalMap::new(false);
            for (i, v) in bits.into_iter().enumerate() {
                m.set(BitId(i as i64), v);
            }
            m
        })
    }

    #[test]
    fn and_depth_examples() {
        let e = BExp::and(BExp::xor(BExp::var(0), BExp::var(1)), BExp::var(2));
        assert_eq!(e.and_depth(), 1);
        let nested = BExp::and(BExp::var(0), BExp::and(BExp::var(1), BExp::var(2)));
        assert_eq!(nested.and_depth(), 2);
        let xored = BExp::xor(
            BExp::and(BExp::var(0), BExp::var(1)),
            BExp::and(BExp::var(2), BExp::and(BExp::var(3), BExp::var(4))),
        );
        assert_eq!(xored.and_depth(), 2);
    }

    #[test]
    fn var_max_of_closed_expression_is_zero() {
        assert_eq!(BExp::False.var_max(), BitId(0));
    }

    #[test]
    fn subst_var_renames_every_occurrence() {
        let e = BExp::xor(BExp::var(0), BExp::and(BExp::var(0), BExp::var(1)));
        let mut sigma = BTreeMap::new();
        sigma.insert(BitId(0), BitId(9));
        let renamed = e.subst_var(&sigma);
        assert!(!renamed.occurs_in(BitId(0)));
        assert!(renamed.occurs_in(BitId(9)));
        assert!(renamed.occurs_in(BitId(1)));
    }

    proptest! {
        #[test]
        fn var_max_bounds_all_free_vars(e in arb_bexp(6)) {
            let m = e.var_max();
            for v in e.vars().iter() {
                prop_assert!(*v <= m);
            }
        }

        #[test]
        fn subst_var_identity_is_eval_preserving(e in arb_bexp(4), st in arb_state(4)) {
            let sigma: BTreeMap<BitId, BitId> = BTreeMap::new();
            prop_assert_eq!(e.subst_var(&sigma).eval(&st), e.eval(&st));
        }
    }
}
