//! Bit-packed byte codecs for every polynomial variant carried inside ML-DSA
//! keys and signatures, plus the hint-vector codec.
//!
//! All encodings are little-endian with coefficient order preserved and no
//! padding bits; each `unpack` is the exact inverse of its `pack` on the
//! documented coefficient domain. Bounded-range variants store the offset
//! `upper_bound - c` so that every field is a small non-negative integer.
//! Packing touches secret polynomials (eta, t0, z) and is branch-free in the
//! coefficient data; only the hint codec, which handles attacker-supplied
//! signature bytes, can fail.

use crate::helpers::{bitlen, ensure, is_in_range};
use crate::types::Poly;
use crate::{D, Q};

/// Packed bytes of a `t1` polynomial (10 bits per coefficient).
pub const POLYT1_PACKEDBYTES: usize = 320;
/// Packed bytes of a `t0` polynomial (13 bits per coefficient).
pub const POLYT0_PACKEDBYTES: usize = 416;


/// Encode `w`, with coefficients in `[-a, b]`, at `bitlen(a + b)` bits each.
/// Fields hold `b - c` when `a > 0` and the raw coefficient when `a == 0`.
pub(crate) fn bit_pack(w: &Poly, a: i32, b: i32, bytes_out: &mut [u8]) {
    debug_assert!((0..(1 << 20)).contains(&a), "bit_pack: a out of range");
    debug_assert!((1..(1 << 20)).contains(&b), "bit_pack: b out of range");
    debug_assert!(is_in_range(w, a, b), "bit_pack: w out of range");
    debug_assert_eq!(w.0.len() * bitlen((a + b) as usize), bytes_out.len() * 8,
        "bit_pack: bad output size");

    let bits = bitlen((a + b) as usize);
    let mut temp = 0u32; // new fields enter at the top, bytes leave from the bottom
    let mut byte_index = 0;
    let mut bit_index = 0;

    for coeff in w.0 {
        if a > 0 {
            temp |= b.abs_diff(coeff) << bit_index;
        } else {
            temp |= coeff.unsigned_abs() << bit_index;
        }
        bit_index += bits;
        while bit_index > 7 {
            bytes_out[byte_index] = temp.to_le_bytes()[0];
            temp >>= 8;
            byte_index += 1;
            bit_index -= 8;
        }
    }
}


/// Reverse [`bit_pack`]: decode `bitlen(a + b)`-bit fields into coefficients
/// `b - field` (or the raw field when `a == 0`).
pub(crate) fn bit_unpack(v: &[u8], a: i32, b: i32) -> Poly {
    debug_assert!((0..(1 << 20)).contains(&a), "bit_unpack: a out of range");
    debug_assert!((1..(1 << 20)).contains(&b), "bit_unpack: b out of range");
    debug_assert_eq!(v.len() * 8, 256 * bitlen((a + b) as usize), "bit_unpack: bad input size");

    let bits = bitlen((a + b) as usize) as u32;
    let mut w = Poly::ZERO;
    let mut temp = 0i32;
    let mut coeff_index = 0;
    let mut bit_index = 0;

    for byte in v {
        temp |= i32::from(*byte) << bit_index;
        bit_index += 8;
        while bit_index >= bits {
            let field = temp & ((1 << bits) - 1);
            // selector fixed by security parameters, not data
            w.0[coeff_index] = if a == 0 { field } else { b - field };
            bit_index -= bits;
            temp >>= bits;
            coeff_index += 1;
        }
    }
    w
}


// ----- PER-VARIANT CODECS -----

/// Pack a small secret polynomial with coefficients in `[-eta, eta]` into
/// `32 * bitlen(2 * eta)` bytes (96 for eta = 2, 128 for eta = 4).
pub fn polyeta_pack(eta: i32, a: &Poly, bytes_out: &mut [u8]) {
    debug_assert!((eta == 2) || (eta == 4), "polyeta_pack: bad eta");
    bit_pack(a, eta, eta, bytes_out);
}

/// Reverse [`polyeta_pack`]. Bytes are trusted (secret-key material); field
/// values outside the eta range decode to out-of-range coefficients exactly
/// as encoded.
#[must_use]
pub fn polyeta_unpack(eta: i32, v: &[u8]) -> Poly {
    debug_assert!((eta == 2) || (eta == 4), "polyeta_unpack: bad eta");
    bit_unpack(v, eta, eta)
}

/// Pack the public high part `t1`, coefficients in `[0, 1024)`, 10 bits each.
#[must_use]
pub fn polyt1_pack(a: &Poly) -> [u8; POLYT1_PACKEDBYTES] {
    let mut bytes = [0u8; POLYT1_PACKEDBYTES];
    bit_pack(a, 0, 1023, &mut bytes);
    bytes
}

/// Reverse [`polyt1_pack`]; every 10-bit pattern is a valid coefficient.
#[must_use]
pub fn polyt1_unpack(v: &[u8; POLYT1_PACKEDBYTES]) -> Poly { bit_unpack(v, 0, 1023) }

/// Pack the secret low part `t0`, coefficients in `(-2^{D-1}, 2^{D-1}]`,
/// 13 bits each as `2^{D-1} - c`.
#[must_use]
pub fn polyt0_pack(a: &Poly) -> [u8; POLYT0_PACKEDBYTES] {
    let mut bytes = [0u8; POLYT0_PACKEDBYTES];
    bit_pack(a, (1 << (D - 1)) - 1, 1 << (D - 1), &mut bytes);
    bytes
}

/// Reverse [`polyt0_pack`].
#[must_use]
pub fn polyt0_unpack(v: &[u8; POLYT0_PACKEDBYTES]) -> Poly {
    bit_unpack(v, (1 << (D - 1)) - 1, 1 << (D - 1))
}

/// Pack a response/mask polynomial with coefficients in
/// `(-gamma1, gamma1]` at 18 (gamma1 = 2^17) or 20 (gamma1 = 2^19) bits,
/// stored as `gamma1 - c`.
pub fn polyz_pack(gamma1: i32, a: &Poly, bytes_out: &mut [u8]) {
    debug_assert!((gamma1 == 1 << 17) || (gamma1 == 1 << 19), "polyz_pack: bad gamma1");
    bit_pack(a, gamma1 - 1, gamma1, bytes_out);
}

/// Reverse [`polyz_pack`]; every bit pattern decodes inside
/// `(-gamma1, gamma1]`.
#[must_use]
pub fn polyz_unpack(gamma1: i32, v: &[u8]) -> Poly {
    debug_assert!((gamma1 == 1 << 17) || (gamma1 == 1 << 19), "polyz_unpack: bad gamma1");
    bit_unpack(v, gamma1 - 1, gamma1)
}

/// Pack the commitment high part `w1`: 6-bit fields in `[0, 44)` when
/// `gamma2 = (q-1)/88`, 4-bit fields in `[0, 16)` when `gamma2 = (q-1)/32`.
/// There is no unpacker; w1 bytes exist only to be hashed.
pub fn polyw1_pack(gamma2: i32, a: &Poly, bytes_out: &mut [u8]) {
    if gamma2 == (Q - 1) / 88 {
        bit_pack(a, 0, 43, bytes_out);
    } else {
        bit_pack(a, 0, 15, bytes_out);
    }
}

/// Concatenated [`polyw1_pack`] across a vector, in element order.
pub fn w1_pack_vec<const X: usize>(gamma2: i32, v: &[Poly; X], bytes_out: &mut [u8]) {
    let step = bytes_out.len() / X;
    for (w, chunk) in v.iter().zip(bytes_out.chunks_exact_mut(step)) {
        polyw1_pack(gamma2, w, chunk);
    }
}


// ----- HINT VECTOR CODEC -----

/// Encode a hint vector (0/1 coefficients, at most `omega` ones in total)
/// into `omega + X` bytes: the positions of the 1-bits in (polynomial,
/// coefficient) order, then the running popcount after each polynomial.
pub fn hint_bits_pack<const X: usize>(omega: i32, h: &[Poly; X], y_bytes: &mut [u8]) {
    let omega_u = usize::try_from(omega).expect("cannot fail");
    debug_assert!((1..256).contains(&(omega_u + X)), "hint_bits_pack: omega+X out of range");
    debug_assert_eq!(y_bytes.len(), omega_u + X, "hint_bits_pack: bad output size");
    debug_assert!(h.iter().all(|r| is_in_range(r, 0, 1)), "hint_bits_pack: h not 0/1");
    debug_assert!(
        h.iter().map(|r| r.0.iter().sum::<i32>()).sum::<i32>() <= omega,
        "hint_bits_pack: too many 1's in h"
    );

    y_bytes.iter_mut().for_each(|e| *e = 0);

    let mut index = 0;
    for i in 0..X {
        for j in 0..256 {
            if h[i].0[j] != 0 {
                y_bytes[index] = j.to_le_bytes()[0];
                index += 1;
            }
        }
        y_bytes[omega_u + i] = index.to_le_bytes()[0];
    }
}


/// Reverse [`hint_bits_pack`] on untrusted signature bytes.
///
/// # Errors
/// Rejects a running count that regresses or exceeds `omega`, positions that
/// are not strictly increasing within a polynomial, and nonzero slack bytes
/// after the last recorded position.
pub fn hint_bits_unpack<const X: usize>(
    omega: i32, y_bytes: &[u8],
) -> Result<[Poly; X], &'static str> {
    let omega_u = usize::try_from(omega).expect("cannot fail");
    debug_assert!((1..256).contains(&(omega_u + X)), "hint_bits_unpack: omega+X out of range");
    debug_assert_eq!(y_bytes.len(), omega_u + X, "hint_bits_unpack: bad input size");

    let mut h = [Poly::ZERO; X];
    let mut index: usize = 0;

    for i in 0..X {
        let count = usize::from(y_bytes[omega_u + i]);
        ensure!(count >= index && count <= omega_u, "hint_bits_unpack: bad running count");

        let first = index;
        while index < count {
            // positions within one polynomial must strictly increase
            if index > first {
                ensure!(
                    y_bytes[index - 1] < y_bytes[index],
                    "hint_bits_unpack: positions not increasing"
                );
            }
            h[i].0[usize::from(y_bytes[index])] = 1;
            index += 1;
        }
    }

    // all unused position bytes must be zero
    for &slack in &y_bytes[index..omega_u] {
        ensure!(slack == 0, "hint_bits_unpack: nonzero slack byte");
    }

    Ok(h)
}
