//! Seed-driven pseudorandom sampling of polynomials.
//!
//! Every sampler is a deterministic function of `(seed, nonce)`; the 16-bit
//! nonce is absorbed little-endian right after the seed. Rejection sampling
//! here branches on sponge output derived from *public* seeds (`rho`, the
//! challenge hash) or from hash-expanded material whose rejection pattern is
//! independent of the secrets, matching the reference implementation's
//! constant-time discipline.

use crate::fips202::{Shake128, Shake256, SHAKE128_RATE, SHAKE256_RATE};
use crate::packing::polyz_unpack;
use crate::types::Poly;
use crate::Q;


/// Uniform sampling mod q via 3-byte rejection on SHAKE128(rho || nonce).
///
/// Each candidate is a 23-bit little-endian integer; values below q are
/// accepted. One rate block holds exactly 56 candidates, so fields never
/// straddle a block boundary.
#[must_use]
pub fn poly_uniform(rho: &[u8; 32], nonce: u16) -> Poly {
    let mut xof = Shake128::init();
    xof.absorb(rho);
    xof.absorb(&nonce.to_le_bytes());
    xof.finalize();

    let mut a = Poly::ZERO;
    let mut ctr = 0;
    let mut buf = [0u8; SHAKE128_RATE];
    while ctr < 256 {
        xof.squeezeblocks(&mut buf);
        for chunk in buf.chunks_exact(3) {
            let t = i32::from(chunk[0])
                | (i32::from(chunk[1]) << 8)
                | (i32::from(chunk[2] & 0x7F) << 16);
            if t < Q && ctr < 256 {
                a.0[ctr] = t;
                ctr += 1;
            }
        }
    }
    a
}


/// Bounded sampling in `[-eta, eta]` via nibble rejection on
/// SHAKE256(seed || nonce): for eta = 2 accept nibbles below 15 and map
/// `2 - (t mod 5)`, for eta = 4 accept nibbles below 9 and map `4 - t`.
#[must_use]
pub fn poly_uniform_eta(eta: i32, seed: &[u8; 64], nonce: u16) -> Poly {
    debug_assert!((eta == 2) || (eta == 4), "poly_uniform_eta: bad eta");
    let mut xof = Shake256::init();
    xof.absorb(seed);
    xof.absorb(&nonce.to_le_bytes());
    xof.finalize();

    let mut a = Poly::ZERO;
    let mut ctr = 0;
    let mut buf = [0u8; SHAKE256_RATE];
    while ctr < 256 {
        xof.squeezeblocks(&mut buf);
        for byte in buf {
            // low nibble first, then high
            for t in [i32::from(byte & 0x0F), i32::from(byte >> 4)] {
                if ctr == 256 {
                    break;
                }
                if eta == 2 && t < 15 {
                    a.0[ctr] = 2 - (t - ((205 * t) >> 10) * 5); // (205*t)>>10 == t/5
                    ctr += 1;
                } else if eta == 4 && t < 9 {
                    a.0[ctr] = 4 - t;
                    ctr += 1;
                }
            }
        }
    }
    a
}


/// Mask sampling in `(-gamma1, gamma1]`: squeeze one packed z-polynomial
/// worth of SHAKE256(seed || nonce) output and decode it. No rejection; the
/// bit width matches the range exactly.
#[must_use]
pub fn poly_uniform_gamma1(gamma1: i32, seed: &[u8; 64], nonce: u16) -> Poly {
    debug_assert!((gamma1 == 1 << 17) || (gamma1 == 1 << 19), "poly_uniform_gamma1: bad gamma1");
    let mut xof = Shake256::init();
    xof.absorb(seed);
    xof.absorb(&nonce.to_le_bytes());
    xof.finalize();

    let mut buf = [0u8; 640];
    let len = if gamma1 == 1 << 17 { 576 } else { 640 };
    xof.squeeze(&mut buf[..len]);
    polyz_unpack(gamma1, &buf[..len])
}


/// Challenge polynomial: exactly `tau` coefficients equal to +-1, the rest
/// zero. An 8-byte sign word comes first, then an in-place tail shuffle
/// driven by single rejected-sampled byte indices.
#[must_use]
pub fn poly_challenge(tau: i32, seed: &[u8]) -> Poly {
    let tau = usize::try_from(tau).expect("cannot fail");
    debug_assert!(tau <= 64, "poly_challenge: tau exceeds sign bits");
    let mut xof = Shake256::init();
    xof.absorb(seed);
    xof.finalize();

    let mut buf = [0u8; SHAKE256_RATE];
    xof.squeezeblocks(&mut buf);
    let mut signs = u64::from_le_bytes(buf[0..8].try_into().expect("cannot fail"));
    let mut pos = 8;

    let mut c = Poly::ZERO;
    for i in (256 - tau)..256 {
        // draw j uniform on [0, i] by rejection
        let j = loop {
            if pos == SHAKE256_RATE {
                xof.squeezeblocks(&mut buf);
                pos = 0;
            }
            let b = usize::from(buf[pos]);
            pos += 1;
            if b <= i {
                break b;
            }
        };
        c.0[i] = c.0[j];
        c.0[j] = 1 - 2 * ((signs & 1) as i32);
        signs >>= 1;
    }
    c
}


/// Expand the public matrix: `A[i][j] = poly_uniform(rho, (i << 8) | j)`,
/// every entry in the NTT domain by construction.
#[must_use]
pub fn expand_a<const K: usize, const L: usize>(rho: &[u8; 32]) -> [[Poly; L]; K] {
    core::array::from_fn(|i| {
        core::array::from_fn(|j| poly_uniform(rho, ((i as u16) << 8) | j as u16))
    })
}

/// A vector of eta-bounded polynomials at consecutive nonces starting from
/// `nonce` (callers continue a second vector at `nonce + X`).
#[must_use]
pub fn uniform_eta_vec<const X: usize>(eta: i32, seed: &[u8; 64], nonce: u16) -> [Poly; X] {
    core::array::from_fn(|x| poly_uniform_eta(eta, seed, nonce + x as u16))
}

/// A vector of mask polynomials at nonces `X * nonce + i`, so each signing
/// attempt consumes a fresh, non-overlapping nonce window.
#[must_use]
pub fn uniform_gamma1_vec<const X: usize>(gamma1: i32, seed: &[u8; 64], nonce: u16) -> [Poly; X] {
    core::array::from_fn(|i| poly_uniform_gamma1(gamma1, seed, (X as u16) * nonce + i as u16))
}
