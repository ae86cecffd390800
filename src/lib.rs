#![no_std]
#![deny(clippy::pedantic, warnings, missing_docs, unsafe_code)]
// Almost all of the 'allow' category...
#![deny(absolute_paths_not_starting_with_crate, dead_code)]
#![deny(elided_lifetimes_in_paths, explicit_outlives_requirements, keyword_idents)]
#![deny(let_underscore_drop, macro_use_extern_crate, meta_variable_misuse, missing_abi)]
#![deny(non_ascii_idents, rust_2021_incompatible_closure_captures)]
#![deny(rust_2021_incompatible_or_patterns, rust_2021_prefixes_incompatible_syntax)]
#![deny(rust_2021_prelude_collisions, single_use_lifetimes, trivial_casts)]
#![deny(trivial_numeric_casts, unreachable_pub, unsafe_op_in_unsafe_fn, unstable_features)]
#![deny(unused_extern_crates, unused_import_braces, unused_lifetimes, unused_macro_rules)]
#![deny(unused_qualifications, unused_results, variant_size_differences)]
#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
//
#![doc = include_str!("../README.md")]


// Functionality map per the reference implementation's file layout
//
// Keccak-f[1600], SHAKE128/256, SHA3-256/512      --> fips202.rs
// Montgomery / central reduction, bit length      --> helpers.rs
// Forward and inverse NTT, zeta table             --> ntt.rs
// Coefficient arithmetic + vector lifts           --> poly.rs
// power2round / decompose / hints / chknorm       --> high_low.rs
// uniform / eta / gamma1 / challenge samplers     --> sampling.rs
// eta, t1, t0, z, w1 and hint byte codecs         --> packing.rs
// Per-level constants and typed wrappers          --> macro below

pub mod fips202;
mod helpers;
pub mod high_low;
pub mod ntt;
pub mod packing;
pub mod poly;
pub mod sampling;
mod types;

pub use crate::types::Poly;

/// Prime ring modulus `q = 2^23 - 2^13 + 1`.
pub const Q: i32 = 8_380_417;
/// 512th root of unity mod q, the NTT twiddle base.
pub const ZETA: i32 = 1753;
/// Dropped bits in the public-key rounding split.
pub const D: i32 = 13;
/// Polynomial degree of the ring `Z_q[X]/(X^N + 1)`.
pub const N: usize = 256;
/// Byte length of expansion seeds (`rho`).
pub const SEEDBYTES: usize = 32;
/// Byte length of collision-resistant hash outputs / 64-byte seeds.
pub const CRHBYTES: usize = 64;
/// Byte length of the public-key hash `tr`.
pub const TRBYTES: usize = 64;
/// Byte length of the signing randomizer `rnd`.
pub const RNDBYTES: usize = 32;


// The common per-level functionality, injected into each security parameter
// set namespace: constants with all byte lengths resolved at compile time,
// and thin typed wrappers binding those constants into the shared generic
// internals.
macro_rules! functionality {
    () => {
        use crate::helpers::bitlen;
        use crate::types::Poly;
        use crate::{high_low, packing, poly, sampling};
        use crate::{CRHBYTES, Q, SEEDBYTES};

        /// Rejection bound `beta = tau * eta` for the signing loop.
        pub const BETA: i32 = TAU * ETA;
        /// Byte length of the challenge hash `c_tilde`.
        pub const CTILDEBYTES: usize = LAMBDA / 4;
        /// Packed bytes of one eta-bounded polynomial.
        pub const POLYETA_PACKEDBYTES: usize = 32 * bitlen(2 * ETA as usize);
        /// Packed bytes of one `t1` polynomial.
        pub const POLYT1_PACKEDBYTES: usize = packing::POLYT1_PACKEDBYTES;
        /// Packed bytes of one `t0` polynomial.
        pub const POLYT0_PACKEDBYTES: usize = packing::POLYT0_PACKEDBYTES;
        /// Packed bytes of one mask/response polynomial.
        pub const POLYZ_PACKEDBYTES: usize = 32 * bitlen(2 * GAMMA1 as usize - 1);
        /// Packed bytes of one `w1` polynomial.
        pub const POLYW1_PACKEDBYTES: usize =
            32 * bitlen(((Q - 1) / (2 * GAMMA2) - 1) as usize);
        /// Packed bytes of the hint vector.
        pub const POLYVECH_PACKEDBYTES: usize = OMEGA as usize + K;
        /// Packed bytes of the full `w1` vector hashed during verification.
        pub const W1_PACKEDBYTES: usize = K * POLYW1_PACKEDBYTES;

        /// Length-L vector of polynomials.
        pub type PolyVecL = [Poly; L];
        /// Length-K vector of polynomials.
        pub type PolyVecK = [Poly; K];
        /// The K x L public matrix, NTT domain.
        pub type Mat = [[Poly; L]; K];


        // ----- SAMPLING -----

        /// Expand the public matrix from `rho`: `A[i][j]` is sampled with
        /// nonce `(i << 8) | j`; all entries are in the NTT domain.
        #[must_use]
        pub fn expand_a(rho: &[u8; SEEDBYTES]) -> Mat { sampling::expand_a::<K, L>(rho) }

        /// One uniform polynomial mod q (NTT domain) from `rho` and a nonce.
        #[must_use]
        pub fn poly_uniform(rho: &[u8; SEEDBYTES], nonce: u16) -> Poly {
            sampling::poly_uniform(rho, nonce)
        }

        /// One eta-bounded secret polynomial from a 64-byte seed and a nonce.
        #[must_use]
        pub fn poly_uniform_eta(seed: &[u8; CRHBYTES], nonce: u16) -> Poly {
            sampling::poly_uniform_eta(ETA, seed, nonce)
        }

        /// One mask polynomial with coefficients in `(-gamma1, gamma1]`.
        #[must_use]
        pub fn poly_uniform_gamma1(seed: &[u8; CRHBYTES], nonce: u16) -> Poly {
            sampling::poly_uniform_gamma1(GAMMA1, seed, nonce)
        }

        /// The sparse ternary challenge polynomial: exactly TAU coefficients
        /// in {-1, +1}.
        #[must_use]
        pub fn poly_challenge(c_tilde: &[u8; CTILDEBYTES]) -> Poly {
            sampling::poly_challenge(TAU, c_tilde)
        }

        /// An L-vector of eta-bounded polynomials at nonces `nonce..nonce+L`.
        #[must_use]
        pub fn polyvecl_uniform_eta(seed: &[u8; CRHBYTES], nonce: u16) -> PolyVecL {
            sampling::uniform_eta_vec::<L>(ETA, seed, nonce)
        }

        /// A K-vector of eta-bounded polynomials at nonces `nonce..nonce+K`
        /// (callers typically pass `nonce = L` to continue after `s1`).
        #[must_use]
        pub fn polyveck_uniform_eta(seed: &[u8; CRHBYTES], nonce: u16) -> PolyVecK {
            sampling::uniform_eta_vec::<K>(ETA, seed, nonce)
        }

        /// An L-vector of mask polynomials at nonces `L * nonce + i`.
        #[must_use]
        pub fn polyvecl_uniform_gamma1(seed: &[u8; CRHBYTES], nonce: u16) -> PolyVecL {
            sampling::uniform_gamma1_vec::<L>(GAMMA1, seed, nonce)
        }


        // ----- ARITHMETIC -----

        /// Matrix times vector in the NTT domain.
        #[must_use]
        pub fn matrix_pointwise_montgomery(mat: &Mat, v: &PolyVecL) -> PolyVecK {
            poly::matrix_pointwise_montgomery(mat, v)
        }


        // ----- DECOMPOSITION AND HINTS -----

        /// `power2round` over a K-vector; returns `(t1, t0)`. Inputs in `[0, q)`.
        #[must_use]
        pub fn polyveck_power2round(v: &PolyVecK) -> (PolyVecK, PolyVecK) {
            high_low::power2round_vec(v)
        }

        /// `decompose` at this level's gamma2; returns `(high, low)`. Input in `[0, q)`.
        #[must_use]
        pub fn poly_decompose(a: &Poly) -> (Poly, Poly) { high_low::poly_decompose(GAMMA2, a) }

        /// `decompose` over a K-vector; returns `(w1, w0)`. Inputs in `[0, q)`.
        #[must_use]
        pub fn polyveck_decompose(v: &PolyVecK) -> (PolyVecK, PolyVecK) {
            high_low::decompose_vec(GAMMA2, v)
        }

        /// Hint polynomial plus popcount from low/high parts.
        #[must_use]
        pub fn poly_make_hint(a0: &Poly, a1: &Poly) -> (Poly, i32) {
            high_low::poly_make_hint(GAMMA2, a0, a1)
        }

        /// Hint vector plus total popcount; signatures require the count
        /// to stay within OMEGA.
        #[must_use]
        pub fn polyveck_make_hint(v0: &PolyVecK, v1: &PolyVecK) -> (PolyVecK, i32) {
            high_low::make_hint_vec(GAMMA2, v0, v1)
        }

        /// Recover high bits with a hint polynomial.
        #[must_use]
        pub fn poly_use_hint(a: &Poly, h: &Poly) -> Poly {
            high_low::poly_use_hint(GAMMA2, a, h)
        }

        /// Recover high bits across a K-vector of hints.
        #[must_use]
        pub fn polyveck_use_hint(v: &PolyVecK, h: &PolyVecK) -> PolyVecK {
            high_low::use_hint_vec(GAMMA2, v, h)
        }

        /// Infinity-norm check against `bound` across an L-vector.
        #[must_use]
        pub fn polyvecl_chknorm(v: &PolyVecL, bound: i32) -> bool {
            high_low::chknorm_vec(v, bound)
        }

        /// Infinity-norm check against `bound` across a K-vector.
        #[must_use]
        pub fn polyveck_chknorm(v: &PolyVecK, bound: i32) -> bool {
            high_low::chknorm_vec(v, bound)
        }


        // ----- PACKING -----

        /// Pack an eta-bounded polynomial.
        #[must_use]
        pub fn polyeta_pack(a: &Poly) -> [u8; POLYETA_PACKEDBYTES] {
            let mut bytes = [0u8; POLYETA_PACKEDBYTES];
            packing::polyeta_pack(ETA, a, &mut bytes);
            bytes
        }

        /// Unpack an eta-bounded polynomial.
        #[must_use]
        pub fn polyeta_unpack(v: &[u8; POLYETA_PACKEDBYTES]) -> Poly {
            packing::polyeta_unpack(ETA, v)
        }

        /// Pack a mask/response polynomial, coefficients in `(-gamma1, gamma1]`.
        #[must_use]
        pub fn polyz_pack(a: &Poly) -> [u8; POLYZ_PACKEDBYTES] {
            let mut bytes = [0u8; POLYZ_PACKEDBYTES];
            packing::polyz_pack(GAMMA1, a, &mut bytes);
            bytes
        }

        /// Unpack a mask/response polynomial.
        #[must_use]
        pub fn polyz_unpack(v: &[u8; POLYZ_PACKEDBYTES]) -> Poly {
            packing::polyz_unpack(GAMMA1, v)
        }

        /// Pack a `w1` polynomial.
        #[must_use]
        pub fn polyw1_pack(a: &Poly) -> [u8; POLYW1_PACKEDBYTES] {
            let mut bytes = [0u8; POLYW1_PACKEDBYTES];
            packing::polyw1_pack(GAMMA2, a, &mut bytes);
            bytes
        }

        /// Pack the full `w1` vector into the byte string hashed during
        /// verification.
        #[must_use]
        pub fn polyveck_pack_w1(v: &PolyVecK) -> [u8; W1_PACKEDBYTES] {
            let mut bytes = [0u8; W1_PACKEDBYTES];
            packing::w1_pack_vec(GAMMA2, v, &mut bytes);
            bytes
        }

        /// Pack a hint vector (popcount at most OMEGA) into `OMEGA + K` bytes.
        #[must_use]
        pub fn pack_hints(h: &PolyVecK) -> [u8; POLYVECH_PACKEDBYTES] {
            let mut bytes = [0u8; POLYVECH_PACKEDBYTES];
            packing::hint_bits_pack(OMEGA, h, &mut bytes);
            bytes
        }

        /// Unpack a hint vector from untrusted signature bytes.
        ///
        /// # Errors
        /// Propagates the codec's rejection of malformed input (non-monotone
        /// positions, running-count regression or overflow, nonzero slack);
        /// verifiers must treat any error as an invalid signature.
        pub fn unpack_hints(
            v: &[u8; POLYVECH_PACKEDBYTES],
        ) -> Result<PolyVecK, &'static str> {
            packing::hint_bits_unpack::<K>(OMEGA, v)
        }


    };
}


/// # Functionality for the **ML-DSA-44** security parameter set.
///
/// Claimed security strength category 2. All sampling, decomposition and
/// packing entry points here have this set's `K = 4`, `L = 4`, `eta = 2`,
/// `gamma1 = 2^17`, `gamma2 = (q-1)/88` baked in; the domain-independent ring
/// operations live in [`crate::poly`], [`crate::ntt`] and [`crate::high_low`].
#[cfg(feature = "ml-dsa-44")]
pub mod ml_dsa_44 {
    /// Challenge weight tau.
    pub const TAU: i32 = 39;
    /// Collision strength of `c_tilde`, in bits.
    pub const LAMBDA: usize = 128;
    /// Mask range bound gamma1.
    pub const GAMMA1: i32 = 1 << 17;
    /// Low-order rounding range gamma2.
    pub const GAMMA2: i32 = (Q - 1) / 88;
    /// Rows of the public matrix.
    pub const K: usize = 4;
    /// Columns of the public matrix.
    pub const L: usize = 4;
    /// Secret coefficient range bound eta.
    pub const ETA: i32 = 2;
    /// Maximum number of hint bits.
    pub const OMEGA: i32 = 80;

    functionality!();
}


/// # Functionality for the **ML-DSA-65** security parameter set.
///
/// Claimed security strength category 3. All sampling, decomposition and
/// packing entry points here have this set's `K = 6`, `L = 5`, `eta = 4`,
/// `gamma1 = 2^19`, `gamma2 = (q-1)/32` baked in; the domain-independent ring
/// operations live in [`crate::poly`], [`crate::ntt`] and [`crate::high_low`].
#[cfg(feature = "ml-dsa-65")]
pub mod ml_dsa_65 {
    /// Challenge weight tau.
    pub const TAU: i32 = 49;
    /// Collision strength of `c_tilde`, in bits.
    pub const LAMBDA: usize = 192;
    /// Mask range bound gamma1.
    pub const GAMMA1: i32 = 1 << 19;
    /// Low-order rounding range gamma2.
    pub const GAMMA2: i32 = (Q - 1) / 32;
    /// Rows of the public matrix.
    pub const K: usize = 6;
    /// Columns of the public matrix.
    pub const L: usize = 5;
    /// Secret coefficient range bound eta.
    pub const ETA: i32 = 4;
    /// Maximum number of hint bits.
    pub const OMEGA: i32 = 55;

    functionality!();
}


/// # Functionality for the **ML-DSA-87** security parameter set.
///
/// Claimed security strength category 5. All sampling, decomposition and
/// packing entry points here have this set's `K = 8`, `L = 7`, `eta = 2`,
/// `gamma1 = 2^19`, `gamma2 = (q-1)/32` baked in; the domain-independent ring
/// operations live in [`crate::poly`], [`crate::ntt`] and [`crate::high_low`].
#[cfg(feature = "ml-dsa-87")]
pub mod ml_dsa_87 {
    /// Challenge weight tau.
    pub const TAU: i32 = 60;
    /// Collision strength of `c_tilde`, in bits.
    pub const LAMBDA: usize = 256;
    /// Mask range bound gamma1.
    pub const GAMMA1: i32 = 1 << 19;
    /// Low-order rounding range gamma2.
    pub const GAMMA2: i32 = (Q - 1) / 32;
    /// Rows of the public matrix.
    pub const K: usize = 8;
    /// Columns of the public matrix.
    pub const L: usize = 7;
    /// Secret coefficient range bound eta.
    pub const ETA: i32 = 2;
    /// Maximum number of hint bits.
    pub const OMEGA: i32 = 75;

    functionality!();
}
