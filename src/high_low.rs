//! High-order / low-order bit decomposition, hints, and the infinity-norm
//! check.
//!
//! The decomposition family (`power2round`, `decompose`, `use_hint`) expects
//! its inputs as representatives in `[0, q)`; run them through
//! [`crate::poly::caddq`] first. `decompose` and `use_hint` act on public
//! signature components and may branch; `chknorm` runs over secret
//! coefficients and is branch-free per coefficient.

use crate::types::Poly;
use crate::{D, Q};

// The branch-free high-bits formulas follow the published reference
// arithmetic (see PQClean / dilithium crypto_sign).


/// Split `r in [0, q)` as `r = r1 * 2^D + r0` with `r0` in
/// `(-2^{D-1}, 2^{D-1}]`.
#[must_use]
pub fn power2round(r: i32) -> (i32, i32) {
    debug_assert!((0..Q).contains(&r), "power2round: input out of range");
    let r1 = (r + (1 << (D - 1)) - 1) >> D;
    let r0 = r - (r1 << D);
    (r1, r0)
}


/// Split `r in [0, q)` as `r = r1 * alpha + r0` with `alpha = 2 * gamma2`
/// and `r0` centered in `(-alpha/2, alpha/2]`; the corner `r1 = (q-1)/alpha`
/// wraps to `r1 = 0` with `r0 = r - q`.
#[must_use]
pub fn decompose(gamma2: i32, r: i32) -> (i32, i32) {
    debug_assert!((0..Q).contains(&r), "decompose: input out of range");
    let mut a1 = (r + 127) >> 7;
    if gamma2 == (Q - 1) / 88 {
        a1 = (a1 * 11_275 + (1 << 23)) >> 24;
        a1 ^= ((43 - a1) >> 31) & a1;
    } else {
        a1 = (a1 * 1025 + (1 << 21)) >> 22;
        a1 &= 15;
    }
    let mut a0 = r - a1 * 2 * gamma2;
    a0 -= (((Q - 1) / 2 - a0) >> 31) & Q;
    (a1, a0)
}


/// Hint bit: 1 iff adding the low part `a0` can change the high part, i.e.
/// `a0 > gamma2`, `a0 < -gamma2`, or `a0 == -gamma2` with `a1 != 0`.
#[must_use]
pub fn make_hint(gamma2: i32, a0: i32, a1: i32) -> i32 {
    i32::from(a0 > gamma2 || a0 < -gamma2 || (a0 == -gamma2 && a1 != 0))
}


/// Recover the high part of `r` using hint `h`, stepping to the neighboring
/// bucket mod `(q-1)/alpha` (44 or 16) in the direction of the low part.
#[must_use]
pub fn use_hint(gamma2: i32, h: i32, r: i32) -> i32 {
    let (a1, a0) = decompose(gamma2, r);
    if h == 0 {
        return a1;
    }
    if gamma2 == (Q - 1) / 88 {
        if a0 > 0 {
            if a1 == 43 {
                0
            } else {
                a1 + 1
            }
        } else if a1 == 0 {
            43
        } else {
            a1 - 1
        }
    } else if a0 > 0 {
        (a1 + 1) & 15
    } else {
        (a1 - 1) & 15
    }
}


// ----- POLYNOMIAL AND VECTOR FORMS -----

/// `power2round` across a polynomial; returns `(high, low)`.
#[must_use]
pub fn poly_power2round(a: &Poly) -> (Poly, Poly) {
    let mut a1 = Poly::ZERO;
    let mut a0 = Poly::ZERO;
    for n in 0..256 {
        (a1.0[n], a0.0[n]) = power2round(a.0[n]);
    }
    (a1, a0)
}

/// `power2round` across a vector; returns `(high, low)`.
#[must_use]
pub fn power2round_vec<const X: usize>(v: &[Poly; X]) -> ([Poly; X], [Poly; X]) {
    let mut v1 = [Poly::ZERO; X];
    let mut v0 = [Poly::ZERO; X];
    for x in 0..X {
        (v1[x], v0[x]) = poly_power2round(&v[x]);
    }
    (v1, v0)
}

/// `decompose` across a polynomial; returns `(high, low)`.
#[must_use]
pub fn poly_decompose(gamma2: i32, a: &Poly) -> (Poly, Poly) {
    let mut a1 = Poly::ZERO;
    let mut a0 = Poly::ZERO;
    for n in 0..256 {
        (a1.0[n], a0.0[n]) = decompose(gamma2, a.0[n]);
    }
    (a1, a0)
}

/// `decompose` across a vector; returns `(high, low)`.
#[must_use]
pub fn decompose_vec<const X: usize>(gamma2: i32, v: &[Poly; X]) -> ([Poly; X], [Poly; X]) {
    let mut v1 = [Poly::ZERO; X];
    let mut v0 = [Poly::ZERO; X];
    for x in 0..X {
        (v1[x], v0[x]) = poly_decompose(gamma2, &v[x]);
    }
    (v1, v0)
}

/// Hint polynomial from low/high parts, plus its popcount.
#[must_use]
pub fn poly_make_hint(gamma2: i32, a0: &Poly, a1: &Poly) -> (Poly, i32) {
    let mut h = Poly::ZERO;
    let mut ones = 0;
    for n in 0..256 {
        h.0[n] = make_hint(gamma2, a0.0[n], a1.0[n]);
        ones += h.0[n];
    }
    (h, ones)
}

/// Hint vector from low/high part vectors, plus the total popcount (which the
/// signing loop checks against OMEGA).
#[must_use]
pub fn make_hint_vec<const X: usize>(
    gamma2: i32, v0: &[Poly; X], v1: &[Poly; X],
) -> ([Poly; X], i32) {
    let mut h = [Poly::ZERO; X];
    let mut ones = 0;
    for x in 0..X {
        let (hx, n) = poly_make_hint(gamma2, &v0[x], &v1[x]);
        h[x] = hx;
        ones += n;
    }
    (h, ones)
}

/// `use_hint` across a polynomial of hints.
#[must_use]
pub fn poly_use_hint(gamma2: i32, a: &Poly, h: &Poly) -> Poly {
    Poly(core::array::from_fn(|n| use_hint(gamma2, h.0[n], a.0[n])))
}

/// `use_hint` across a vector.
#[must_use]
pub fn use_hint_vec<const X: usize>(gamma2: i32, v: &[Poly; X], h: &[Poly; X]) -> [Poly; X] {
    core::array::from_fn(|x| poly_use_hint(gamma2, &v[x], &h[x]))
}


/// Infinity-norm check: true iff some centered coefficient has magnitude at
/// least `b`. Expects centrally reduced input.
///
/// Processes every coefficient without data-dependent branches: the absolute
/// value comes from a sign-mask fold and violations OR-accumulate into a
/// sign bit. The only early return keys on the public parameter `b`.
#[must_use]
pub fn poly_chknorm(a: &Poly, b: i32) -> bool {
    if b > (Q - 1) / 8 {
        return true;
    }
    let mut acc = 0i32;
    for &e in &a.0 {
        let t = e - ((e >> 31) & (2 * e));
        acc |= b - 1 - t;
    }
    acc < 0
}

/// Norm check across a vector; examines every polynomial regardless of
/// earlier verdicts.
#[must_use]
pub fn chknorm_vec<const X: usize>(v: &[Poly; X], b: i32) -> bool {
    let mut out = false;
    for p in v {
        out |= poly_chknorm(p, b);
    }
    out
}


#[cfg(test)]
mod tests {
    use super::*;

    const GAMMA2_44: i32 = (Q - 1) / 88;
    const GAMMA2_65: i32 = (Q - 1) / 32;

    fn probe_values() -> impl Iterator<Item = i32> {
        // edges plus a coarse sweep of [0, q)
        [0, 1, (1 << (D - 1)) - 1, 1 << (D - 1), Q - 1, Q - 2, GAMMA2_44, 2 * GAMMA2_44,
            GAMMA2_65, 2 * GAMMA2_65, Q - GAMMA2_65]
        .into_iter()
        .chain((0..Q).step_by(4099))
    }

    #[test]
    fn power2round_identity_and_range() {
        for r in probe_values() {
            let (r1, r0) = power2round(r);
            assert_eq!(r1 * (1 << D) + r0, r);
            assert!(r0 > -(1 << (D - 1)) && r0 <= 1 << (D - 1));
        }
    }

    #[test]
    fn decompose_identity_and_range() {
        for gamma2 in [GAMMA2_44, GAMMA2_65] {
            let alpha = 2 * gamma2;
            let m = (Q - 1) / alpha;
            for r in probe_values() {
                let (r1, r0) = decompose(gamma2, r);
                assert_eq!(
                    (i64::from(r1) * i64::from(alpha) + i64::from(r0)).rem_euclid(i64::from(Q)),
                    i64::from(r),
                );
                assert!((0..m).contains(&r1), "high part {r1} out of [0, {m})");
                // the wrap bucket carries r0 = r - q, one beyond -alpha/2
                assert!(r0 > -gamma2 - 1 && r0 <= gamma2);
            }
        }
    }

    #[test]
    fn use_hint_steps_to_neighbor_bucket() {
        for gamma2 in [GAMMA2_44, GAMMA2_65] {
            let m = (Q - 1) / (2 * gamma2);
            for r in (0..Q).step_by(7919) {
                let (a1, a0) = decompose(gamma2, r);
                let stepped = use_hint(gamma2, 1, r);
                let expected =
                    if a0 > 0 { (a1 + 1).rem_euclid(m) } else { (a1 - 1).rem_euclid(m) };
                assert_eq!(stepped, expected);
                assert_eq!(use_hint(gamma2, 0, r), a1);
            }
        }
    }

    #[test]
    fn hint_recovers_high_bits_under_perturbation() {
        // The signing identity: the signer knows a = a1*alpha + a0 and the
        // perturbation delta the verifier will fold in; it emits
        // h = make_hint(a0 + delta, a1) and the verifier's
        // use_hint(h, a + delta) must land back on a1. Holds whenever
        // |a0 + delta| < alpha; |delta| <= gamma2 - 1 keeps us inside.
        for gamma2 in [GAMMA2_44, GAMMA2_65] {
            for a in (0..Q).step_by(7919) {
                let (a1, a0) = decompose(gamma2, a);
                for delta in
                    [-(gamma2 - 1), -gamma2 / 2, -3, 0, 3, gamma2 / 2, gamma2 - 1]
                {
                    let v = (a + delta).rem_euclid(Q);
                    let h = make_hint(gamma2, a0 + delta, a1);
                    assert_eq!(
                        use_hint(gamma2, h, v),
                        a1,
                        "gamma2 {gamma2}, a {a}, delta {delta}"
                    );
                }
            }
        }
    }

    #[test]
    fn chknorm_matches_naive_model() {
        let mut a = Poly::ZERO;
        for (i, e) in a.0.iter_mut().enumerate() {
            *e = (i as i32 * 31) % 700 - 350;
        }
        a.0[77] = -600;

        let naive = |p: &Poly, b: i32| p.0.iter().any(|&e| e.abs() >= b);
        for b in [1, 100, 350, 599, 600, 601, 1000] {
            assert_eq!(poly_chknorm(&a, b), naive(&a, b), "bound {b}");
        }
        // parameter guard: bounds beyond (q-1)/8 always reject
        assert!(poly_chknorm(&Poly::ZERO, (Q - 1) / 8 + 1));
    }

    #[test]
    fn chknorm_vec_or_accumulates() {
        let small = Poly::ZERO;
        let mut big = Poly::ZERO;
        big.0[255] = 500;
        assert!(chknorm_vec(&[small, big], 500));
        assert!(!chknorm_vec(&[small, big], 501));
    }
}
