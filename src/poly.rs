//! Coefficient-wise polynomial arithmetic and its lifts over length-K and
//! length-L vectors.
//!
//! All operations take their inputs by shared reference and return a fresh
//! value (the `core::array::from_fn` style used throughout), so aliasing an
//! output with an input cannot arise. None of these functions branch on or
//! index by coefficient data; they are safe on secret polynomials.

use crate::helpers::{self, mont_reduce, reduce32};
use crate::types::Poly;
use crate::D;


/// `c[i] = a[i] + b[i]`; no reduction, the caller owns the growth.
#[must_use]
pub fn add(a: &Poly, b: &Poly) -> Poly {
    Poly(core::array::from_fn(|n| a.0[n] + b.0[n]))
}

/// `c[i] = a[i] - b[i]`; no reduction.
#[must_use]
pub fn sub(a: &Poly, b: &Poly) -> Poly {
    Poly(core::array::from_fn(|n| a.0[n] - b.0[n]))
}

/// Central reduction of every coefficient to magnitude at most `6_283_008`.
#[must_use]
pub fn reduce(a: &Poly) -> Poly {
    Poly(core::array::from_fn(|n| reduce32(a.0[n])))
}

/// Fold negative coefficients up into `[0, q)`.
#[must_use]
pub fn caddq(a: &Poly) -> Poly {
    Poly(core::array::from_fn(|n| helpers::caddq(a.0[n])))
}

/// Multiply every coefficient by `2^D` (no reduction). Coefficients must be
/// below `2^{31-D}` in magnitude.
#[must_use]
pub fn shiftl(a: &Poly) -> Poly {
    Poly(core::array::from_fn(|n| a.0[n] << D))
}

/// Pointwise product in the NTT domain with Montgomery reduction:
/// `c[i] = a[i] * b[i] * 2^{-32} mod q`, `|c[i]| < q`.
#[must_use]
pub fn pointwise_montgomery(a: &Poly, b: &Poly) -> Poly {
    Poly(core::array::from_fn(|n| mont_reduce(i64::from(a.0[n]) * i64::from(b.0[n]))))
}


// ----- ELEMENT-WISE LIFTS OVER [Poly; X] -----

/// Vector addition.
#[must_use]
pub fn add_vec<const X: usize>(a: &[Poly; X], b: &[Poly; X]) -> [Poly; X] {
    core::array::from_fn(|x| add(&a[x], &b[x]))
}

/// Vector subtraction.
#[must_use]
pub fn sub_vec<const X: usize>(a: &[Poly; X], b: &[Poly; X]) -> [Poly; X] {
    core::array::from_fn(|x| sub(&a[x], &b[x]))
}

/// Central reduction across a vector.
#[must_use]
pub fn reduce_vec<const X: usize>(a: &[Poly; X]) -> [Poly; X] {
    core::array::from_fn(|x| reduce(&a[x]))
}

/// Sign fold across a vector.
#[must_use]
pub fn caddq_vec<const X: usize>(a: &[Poly; X]) -> [Poly; X] {
    core::array::from_fn(|x| caddq(&a[x]))
}

/// `2^D` shift across a vector.
#[must_use]
pub fn shiftl_vec<const X: usize>(a: &[Poly; X]) -> [Poly; X] {
    core::array::from_fn(|x| shiftl(&a[x]))
}

/// One polynomial times every element of a vector (all in the NTT domain),
/// e.g. a challenge against a secret vector.
#[must_use]
pub fn pointwise_poly_montgomery_vec<const X: usize>(a: &Poly, v: &[Poly; X]) -> [Poly; X] {
    core::array::from_fn(|x| pointwise_montgomery(a, &v[x]))
}

/// Dot product of two equal-length vectors in the NTT domain: the sum of the
/// pointwise Montgomery products. Sums of up to `L` terms of magnitude `< q`
/// stay far inside `i32`, so no intermediate reduction is needed.
#[must_use]
pub fn pointwise_acc_montgomery<const X: usize>(u: &[Poly; X], v: &[Poly; X]) -> Poly {
    let mut w = pointwise_montgomery(&u[0], &v[0]);
    for x in 1..X {
        let t = pointwise_montgomery(&u[x], &v[x]);
        w = add(&w, &t);
    }
    w
}

/// Matrix times vector in the NTT domain: `t[i] = sum_j A[i][j] o v[j]`.
#[must_use]
pub fn matrix_pointwise_montgomery<const K: usize, const L: usize>(
    mat: &[[Poly; L]; K], v: &[Poly; L],
) -> [Poly; K] {
    core::array::from_fn(|k| pointwise_acc_montgomery(&mat[k], v))
}
