//! XDNF normaliser
//!
//! `to_xdnf` distributes `And` over `Xor` everywhere, rewriting `Not(x)` as
//! `Xor(Not(False), to_xdnf(x))` — i.e. `1 ^ x` — so the result is an
//! exclusive-or of and-of-literals (ESOP form), semantically equal to the
//! input. `unto_xdnf` is a partial inverse that re-factors shared conjuncts.
//! Both passes preserve `eval` (§8 item 8).
//!
//! The auxiliary cube-list ([`Esop`]) representation supports the same
//! algebra directly on lists of variable indices, which is what
//! [`crate::synth`]'s array wrappers use when an expression is pre-converted
//! to a compact ESOP before compilation.

#![forbid(unsafe_code)]

use crate::bexp::BExp;
use crate::bits::BitId;

/// Distribute `And` over `Xor` when either argument is an `Xor`; otherwise
/// just build the conjunction.
fn distrib(x: BExp, y: BExp) -> BExp {
    match (x, y) {
        (BExp::Xor(a, b), y) => BExp::xor(distrib(*a, y.clone()), distrib(*b, y)),
        (x, BExp::Xor(a, b)) => BExp::xor(distrib(x.clone(), *a), distrib(x, *b)),
        (x, y) => BExp::and(x, y),
    }
}

/// Push every `And` through every `Xor`, rewriting negation as `1 ^ x`.
/// The result is an XOR-of-ANDs of literals (ESOP/XDNF form).
pub fn to_xdnf(e: &BExp) -> BExp {
    match e {
        BExp::False => BExp::False,
        BExp::Var(v) => BExp::Var(*v),
        BExp::Not(x) => BExp::xor(BExp::not(BExp::False), to_xdnf(x)),
        BExp::And(x, y) => distrib(to_xdnf(x), to_xdnf(y)),
        BExp::Xor(x, y) => BExp::xor(to_xdnf(x), to_xdnf(y)),
    }
}

/// Partial inverse of [`to_xdnf`]: re-factor a shared conjunct out of an XOR
/// of two ANDs, recursively. `Xor(And(a,b), And(a,d)) -> And(a, Xor(b,d))`
/// and its three symmetric cases (`a` on either side of either `And`).
pub fn unto_xdnf(e: &BExp) -> BExp {
    match e {
        BExp::False => BExp::False,
        BExp::Var(v) => BExp::Var(*v),
        BExp::Not(x) => BExp::not(unto_xdnf(x)),
        BExp::And(x, y) => BExp::and(unto_xdnf(x), unto_xdnf(y)),
        BExp::Xor(x, y) => {
            let x = unto_xdnf(x);
            let y = unto_xdnf(y);
            if let Some(refactored) = refactor(&x, &y) {
                refactored
            } else {
                BExp::xor(x, y)
            }
        }
    }
}

fn refactor(x: &BExp, y: &BExp) -> Option<BExp> {
    let (BExp::And(a, b), BExp::And(c, d)) = (x, y) else {
        return None;
    };
    if a == c {
        return Some(BExp::and((**a).clone(), BExp::xor((**b).clone(), (**d).clone())));
    }
    if a == d {
        return Some(BExp::and((**a).clone(), BExp::xor((**b).clone(), (**c).clone())));
    }
    if b == c {
        return Some(BExp::and((**b).clone(), BExp::xor((**a).clone(), (**d).clone())));
    }
    if b == d {
        return Some(BExp::and((**b).clone(), BExp::xor((**a).clone(), (**c).clone())));
    }
    None
}

/// A cube: a conjunction of (unnegated) variables, as a sorted list of
/// indices. The empty cube is the constant `true` (the empty product).
pub type Cube = Vec<BitId>;

/// An XOR-of-ANDs of literals as a plain list of cubes: the empty list is
/// `False`, `[[]]` is `True`, `[[v]]` is `Var v`. XOR of two ESOPs is the
/// symmetric difference of their cube lists; AND is the distributive
/// product of every pair of cubes (each itself deduplicated/sorted).
pub type Esop = Vec<Cube>;

fn normalize_cube(mut c: Cube) -> Cube {
    c.sort();
    c.dedup();
    c
}

/// Symmetric difference of two cube lists: a cube present in both operands
/// cancels (matching `x ^ x = 0` at the cube level).
pub fn esop_xor(a: &Esop, b: &Esop) -> Esop {
    let mut out = Vec::new();
    for cube in a {
        if !b.contains(cube) {
            out.push(cube.clone());
        }
    }
    for cube in b {
        if !a.contains(cube) {
            out.push(cube.clone());
        }
    }
    out
}

/// Distributive product: union every pair of cubes, one from each operand.
pub fn esop_and(a: &Esop, b: &Esop) -> Esop {
    let mut out = Vec::new();
    for ca in a {
        for cb in b {
            let mut merged = ca.clone();
            merged.extend(cb.iter().copied());
            out.push(normalize_cube(merged));
        }
    }
    out
}

pub fn esop_false() -> Esop {
    Vec::new()
}

pub fn esop_true() -> Esop {
    vec![Vec::new()]
}

pub fn esop_var(v: BitId) -> Esop {
    vec![vec![v]]
}

/// Convert a (not necessarily XDNF-normalized) expression directly into the
/// cube-list representation, via the same distribution rules as [`to_xdnf`].
pub fn bexp_to_esop(e: &BExp) -> Esop {
    match e {
        BExp::False => esop_false(),
        BExp::Var(v) => esop_var(*v),
        BExp::Not(x) => esop_xor(&esop_true(), &bexp_to_esop(x)),
        BExp::And(x, y) => esop_and(&bexp_to_esop(x), &bexp_to_esop(y)),
        BExp::Xor(x, y) => esop_xor(&bexp_to_esop(x), &bexp_to_esop(y)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::{BitId, TotalMap};
    use proptest::prelude::*;

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
    fn refactors_shared_left_conjunct() {
        let a = BExp::var(0);
        let b = BExp::var(1);
        let d = BExp::var(2);
        let e = BExp::xor(BExp::and(a.clone(), b.clone()), BExp::and(a.clone(), d.clone()));
        assert_eq!(unto_xdnf(&e), BExp::and(a, BExp::xor(b, d)));
    }

    #[test]
    fn esop_xor_cancels_shared_cubes() {
        let a = vec![vec![BitId(0)], vec![BitId(1), BitId(2)]];
        let b = vec![vec![BitId(1), BitId(2)]];
        assert_eq!(esop_xor(&a, &b), vec![vec![BitId(0)]]);
    }

    #[test]
    fn esop_and_distributes() {
        let a = vec![vec![BitId(0)], vec![BitId(1)]];
        let b = vec![vec![BitId(2)]];
        let mut got = esop_and(&a, &b);
        got.sort();
        let mut want = vec![vec![BitId(0), BitId(2)], vec![BitId(1), BitId(2)]];
        want.sort();
        assert_eq!(got, want);
    }

    proptest! {
        /// Property 8: to_xdnf preserves eval.
        #[test]
        fn to_xdnf_preserves_eval(e in crate::bexp::tests::arb_bexp(5), st in arb_state(5)) {
            prop_assert_eq!(to_xdnf(&e).eval(&st), e.eval(&st));
        }

        /// Property 8: unto_xdnf preserves eval.
        #[test]
        fn unto_xdnf_preserves_eval(e in crate::bexp::tests::arb_bexp(5), st in arb_state(5)) {
            prop_assert_eq!(unto_xdnf(&e).eval(&st), e.eval(&st));
        }

        #[test]
        fn bexp_to_esop_matches_eval(e in crate::bexp::tests::arb_bexp(4), st in arb_state(4)) {
            let esop = bexp_to_esop(&e);
            let mut acc = false;
            for cube in &esop {
                let mut term = true;
                for v in cube {
                    term &= st.get(*v);
                }
                acc ^= term;
            }
            prop_assert_eq!(acc, e.eval(&st));
        }
    }
}
