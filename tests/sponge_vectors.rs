// Cross-checks of the in-crate FIPS 202 layer against the RustCrypto `sha3`
// implementation, over inputs of every alignment class around the sponge
// rates (empty, sub-block, exact-rate, rate +/- 1, multi-block).

use rand_chacha::rand_core::SeedableRng;
use rand_core::RngCore;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512};

fn lengths() -> impl Iterator<Item = usize> {
    [0usize, 1, 7, 71, 72, 73, 135, 136, 137, 167, 168, 169, 200, 336, 407, 544]
        .into_iter()
}

#[test]
fn shake128_matches_rustcrypto() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
    for len in lengths() {
        let mut input = vec![0u8; len];
        rng.fill_bytes(&mut input);

        let mut ours = vec![0u8; 499];
        mldsa_core::fips202::shake128(&mut ours, &input);

        let mut hasher = sha3::Shake128::default();
        hasher.update(&input);
        let mut theirs = vec![0u8; 499];
        hasher.finalize_xof().read(&mut theirs);

        assert_eq!(ours, theirs, "shake128 input length {len}");
    }
}

#[test]
fn shake256_matches_rustcrypto() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(2);
    for len in lengths() {
        let mut input = vec![0u8; len];
        rng.fill_bytes(&mut input);

        let mut ours = vec![0u8; 333];
        mldsa_core::fips202::shake256(&mut ours, &input);

        let mut hasher = sha3::Shake256::default();
        hasher.update(&input);
        let mut theirs = vec![0u8; 333];
        hasher.finalize_xof().read(&mut theirs);

        assert_eq!(ours, theirs, "shake256 input length {len}");
    }
}

#[test]
fn sha3_fixed_outputs_match_rustcrypto() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
    for len in lengths() {
        let mut input = vec![0u8; len];
        rng.fill_bytes(&mut input);

        let ours256 = mldsa_core::fips202::sha3_256(&input);
        let theirs256 = Sha3_256::digest(&input);
        assert_eq!(ours256[..], theirs256[..], "sha3-256 input length {len}");

        let ours512 = mldsa_core::fips202::sha3_512(&input);
        let theirs512 = Sha3_512::digest(&input);
        assert_eq!(ours512[..], theirs512[..], "sha3-512 input length {len}");
    }
}

#[test]
fn incremental_squeeze_matches_rustcrypto_stream() {
    let mut hasher = sha3::Shake256::default();
    hasher.update(b"streaming check");
    let mut reader = hasher.finalize_xof();

    let mut state = mldsa_core::fips202::Shake256::absorb_once(b"streaming check");

    // drain both in mismatched chunk sizes
    let mut theirs_total = Vec::new();
    let mut ours_total = Vec::new();
    for (a, b) in [(5usize, 64usize), (64, 5), (136, 17), (1, 183)] {
        let mut theirs = vec![0u8; a + b];
        reader.read(&mut theirs);
        theirs_total.extend_from_slice(&theirs);

        let mut ours_a = vec![0u8; a];
        state.squeeze(&mut ours_a);
        let mut ours_b = vec![0u8; b];
        state.squeeze(&mut ours_b);
        ours_total.extend_from_slice(&ours_a);
        ours_total.extend_from_slice(&ours_b);
    }
    assert_eq!(ours_total, theirs_total);
}
