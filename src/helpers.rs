//! Symmetric primitives shared by the IND-CPA and KEM layers: the two fixed-output hashes used
//! by the Fujisaki-Okamoto wrapper, the SHAKE-128 matrix expansion XOF, and the SHAKE-256 noise
//! PRF.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

/// If the condition is not met, return an error message. Borrowed from the `anyhow` crate.
macro_rules! ensure {
    ($cond:expr, $msg:literal $(,)?) => {
        if !$cond {
            return Err($msg);
        }
    };
}

pub(crate) use ensure; // make available throughout crate

/// `SHA3-256(bytes)`.
#[must_use]
pub(crate) fn sha3_256(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, bytes);
    hasher.finalize().into()
}

/// `SHA3-256` over two concatenated inputs, avoiding an intermediate allocation.
#[must_use]
pub(crate) fn sha3_256_2(a: &[u8], b: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, a);
    Digest::update(&mut hasher, b);
    hasher.finalize().into()
}

/// `SHA3-512(bytes)`, used to derive the (K-bar, coins) pair in the FO transform.
#[must_use]
pub(crate) fn sha3_512(bytes: &[u8]) -> [u8; 64] {
    let mut hasher = Sha3_512::new();
    Digest::update(&mut hasher, bytes);
    hasher.finalize().into()
}

/// SHAKE-128 expandable-output reader seeded with `rho ‖ b0 ‖ b1`, used by `indcpa::gen_matrix`
/// for rejection-sampling matrix entries.
#[must_use]
pub(crate) fn shake128_xof(rho: &[u8; 32], b0: u8, b1: u8) -> impl XofReader {
    let mut hasher = Shake128::default();
    hasher.update(rho);
    hasher.update(&[b0, b1]);
    hasher.finalize_xof()
}

/// SHAKE-256-based PRF: produces `OUT` bytes of noise-sampler input from a 32-byte seed and a
/// single-byte nonce.
#[must_use]
pub(crate) fn prf<const OUT: usize>(seed: &[u8; 32], nonce: u8) -> [u8; OUT] {
    let mut hasher = Shake256::default();
    hasher.update(seed);
    hasher.update(&[nonce]);
    let mut reader = hasher.finalize_xof();
    let mut out = [0u8; OUT];
    reader.read(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::{prf, sha3_256, sha3_256_2, sha3_512};

    #[test]
    fn test_sha3_256_concat_matches_split() {
        let a = [1u8, 2, 3];
        let b = [4u8, 5, 6, 7];
        let mut whole = [0u8; 7];
        whole[..3].copy_from_slice(&a);
        whole[3..].copy_from_slice(&b);
        assert_eq!(sha3_256(&whole), sha3_256_2(&a, &b));
    }

    #[test]
    fn test_sha3_512_len() {
        let out = sha3_512(b"akcn");
        assert_eq!(out.len(), 64);
    }

    #[test]
    fn test_prf_deterministic_and_nonce_sensitive() {
        let seed = [7u8; 32];
        let a: [u8; 64] = prf(&seed, 0);
        let b: [u8; 64] = prf(&seed, 0);
        let c: [u8; 64] = prf(&seed, 1);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
