//! Negacyclic Number-Theoretic Transform over `Z_q[X]/(X^256 + 1)`.
//!
//! The 512th root of unity 1753 exists mod q, so the transform splits the
//! ring into 256 linear factors. Twiddle factors are stored in Montgomery
//! form (scaled by 2^32) and in bit-reversed order; every butterfly multiply
//! goes through [`helpers::mont_reduce`], which keeps all products inside the
//! documented `|a| < q * 2^31` window.

use crate::helpers::{mont_reduce, pow_mod_q};
use crate::types::Poly;
use crate::{Q, ZETA};


/// `zeta * 2^32 mod q`, centered to `(-q/2, q/2]`.
const fn to_mont_centered(a: i32) -> i32 {
    let m = ((a as i64) << 32) % (Q as i64);
    let m = if m > (Q as i64) / 2 { m - Q as i64 } else { m };
    m as i32
}

const fn gen_zeta_table() -> [i32; 256] {
    let mut table = [0i32; 256];
    let mut k = 0;
    while k < 256 {
        table[k] = to_mont_centered(pow_mod_q(ZETA, (k as u8).reverse_bits()));
        k += 1;
    }
    table
}

/// `ZETA^brv8(k) * 2^32 mod q`; index 0 is never used.
pub(crate) static ZETAS: [i32; 256] = gen_zeta_table();


/// Forward NTT: 8 layers of Cooley-Tukey butterflies.
///
/// Input coefficients of magnitude below `q` are safe; output coefficients
/// grow to at most `9q` in magnitude, so callers reduce before further
/// additive chains when required.
#[must_use]
pub fn ntt(w: &Poly) -> Poly {
    let mut w = *w;
    let mut k = 0;
    let mut len = 128;
    while len >= 1 {
        let mut start = 0;
        while start < 256 {
            k += 1;
            let zeta = i64::from(ZETAS[k]);
            for j in start..(start + len) {
                let t = mont_reduce(zeta * i64::from(w.0[j + len]));
                w.0[j + len] = w.0[j] - t;
                w.0[j] += t;
            }
            start += 2 * len;
        }
        len /= 2;
    }
    w
}


/// Inverse NTT with Gentleman-Sande butterflies, result in Montgomery form:
/// `inv_ntt_tomont(ntt(a)) == a * 2^32 (mod q)` per coefficient.
///
/// Input coefficients must stay below `q` in magnitude (the additive chain
/// reaches 256x the input bound), so reduce accumulated sums such as matrix
/// products first.
#[must_use]
pub fn inv_ntt_tomont(w_hat: &Poly) -> Poly {
    const F: i64 = 41_978; // 2^56 mod q = (2^32)^2 / 256, folds in the 256^{-1} scaling
    let mut w = *w_hat;
    let mut k = 256;
    let mut len = 1;
    while len < 256 {
        let mut start = 0;
        while start < 256 {
            k -= 1;
            let zeta = -i64::from(ZETAS[k]);
            for j in start..(start + len) {
                let t = w.0[j];
                w.0[j] = t + w.0[j + len];
                w.0[j + len] = t - w.0[j + len];
                w.0[j + len] = mont_reduce(zeta * i64::from(w.0[j + len]));
            }
            start += 2 * len;
        }
        len *= 2;
    }
    for e in &mut w.0 {
        *e = mont_reduce(F * i64::from(*e));
    }
    w
}


/// Per-element forward NTT across a vector.
#[must_use]
pub fn ntt_vec<const X: usize>(v: &[Poly; X]) -> [Poly; X] {
    core::array::from_fn(|x| ntt(&v[x]))
}

/// Per-element inverse NTT across a vector, results in Montgomery form.
#[must_use]
pub fn inv_ntt_tomont_vec<const X: usize>(v: &[Poly; X]) -> [Poly; X] {
    core::array::from_fn(|x| inv_ntt_tomont(&v[x]))
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::reduce32;

    #[test]
    fn zeta_table_first_entries() {
        // brv8(1) = 128, so ZETAS[1] = 1753^128 * 2^32 mod q (centered); the
        // published table opens 25847, -2608894, -518909.
        assert_eq!(ZETAS[1], 25_847);
        assert_eq!(ZETAS[2], -2_608_894);
        assert_eq!(ZETAS[3], -518_909);
    }

    #[test]
    fn zeta_table_centered_and_nonzero() {
        for &z in &ZETAS[1..] {
            assert!(z != 0);
            assert!(z.abs() <= Q / 2 + 1);
        }
    }

    #[test]
    fn round_trip_cancels_montgomery_factor() {
        let mut a = Poly::ZERO;
        for (i, e) in a.0.iter_mut().enumerate() {
            *e = (i as i32 * 2731 - 97) % (Q / 2);
        }

        let back = inv_ntt_tomont(&ntt(&a));
        for (&orig, &got) in a.0.iter().zip(&back.0) {
            // strip the 2^32 factor and compare centrally reduced values
            let stripped = reduce32(mont_reduce(i64::from(got)));
            assert_eq!(stripped.rem_euclid(Q), orig.rem_euclid(Q));
        }
    }

    #[test]
    fn ntt_of_zero_is_zero() {
        assert_eq!(ntt(&Poly::ZERO), Poly::ZERO);
    }
}
