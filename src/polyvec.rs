//! Vector-of-polynomials operations, generic over the module rank `K`. Mirrors
//! `polyvec_add`/`polyvec_tobytes`/`polyvec_frombytes`/`polyvec_compress`/`polyvec_decompress`/
//! `polyvec_ntt`/`polyvec_invntt`/`polyvec_pointwise_acc` in the reference source, generalized
//! from that source's fixed `AKCN_K` to a const generic.

use crate::ntt::{inv_ntt, ntt, pointwise_multiply_acc};
use crate::poly::{
    poly_add, poly_compress, poly_decompress, poly_frombytes, poly_tobytes, Poly,
    POLY_COMPRESSED_BYTES, POLY_BYTES,
};

/// Adds two vectors of polynomials elementwise.
#[must_use]
pub(crate) fn polyvec_add<const K: usize>(a: &[Poly; K], b: &[Poly; K]) -> [Poly; K] {
    core::array::from_fn(|i| poly_add(&a[i], &b[i]))
}

/// Applies the forward NTT to every polynomial in the vector, in place.
pub(crate) fn polyvec_ntt<const K: usize>(v: &mut [Poly; K]) {
    for p in v.iter_mut() {
        ntt(p);
    }
}

/// Applies the inverse NTT to every polynomial in the vector, in place.
pub(crate) fn polyvec_inv_ntt<const K: usize>(v: &mut [Poly; K]) {
    for p in v.iter_mut() {
        inv_ntt(p);
    }
}

/// Serializes a vector of polynomials into `K * POLY_BYTES` canonically packed bytes.
pub(crate) fn polyvec_tobytes<const K: usize>(v: &[Poly; K], out: &mut [u8]) {
    debug_assert_eq!(out.len(), K * POLY_BYTES);
    for (i, chunk) in out.chunks_exact_mut(POLY_BYTES).enumerate() {
        poly_tobytes(&v[i], chunk);
    }
}

/// Deserializes `K * POLY_BYTES` canonically packed bytes into a vector of polynomials.
#[must_use]
pub(crate) fn polyvec_frombytes<const K: usize>(bytes: &[u8]) -> [Poly; K] {
    debug_assert_eq!(bytes.len(), K * POLY_BYTES);
    core::array::from_fn(|i| poly_frombytes(&bytes[i * POLY_BYTES..(i + 1) * POLY_BYTES]))
}

/// Compresses and serializes a vector of polynomials into `K * POLY_COMPRESSED_BYTES` bytes. Used
/// only for the ciphertext's `u` component; `v` stays canonically packed.
pub(crate) fn polyvec_compress<const K: usize>(v: &[Poly; K], out: &mut [u8]) {
    debug_assert_eq!(out.len(), K * POLY_COMPRESSED_BYTES);
    for (i, chunk) in out.chunks_exact_mut(POLY_COMPRESSED_BYTES).enumerate() {
        poly_compress(&v[i], chunk);
    }
}

/// Deserializes and decompresses `K * POLY_COMPRESSED_BYTES` bytes into a vector of polynomials.
#[must_use]
pub(crate) fn polyvec_decompress<const K: usize>(bytes: &[u8]) -> [Poly; K] {
    debug_assert_eq!(bytes.len(), K * POLY_COMPRESSED_BYTES);
    core::array::from_fn(|i| {
        poly_decompress(&bytes[i * POLY_COMPRESSED_BYTES..(i + 1) * POLY_COMPRESSED_BYTES])
    })
}

/// Computes `sum_i NTT^{-1-domain-pending}(a_hat[i] . b_hat[i])` in NTT domain, i.e. the
/// NTT-domain dot product of two vectors, exactly as `polyvec_pointwise_acc` accumulates a row
/// of `A_hat` against `s_hat` (or `A_hat^T` against `r_hat`).
#[must_use]
pub(crate) fn polyvec_pointwise_acc<const K: usize>(a: &[Poly; K], b: &[Poly; K]) -> Poly {
    let mut acc = [0i16; 256];
    for i in 0..K {
        pointwise_multiply_acc(&mut acc, &a[i], &b[i]);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::{
        polyvec_add, polyvec_compress, polyvec_decompress, polyvec_frombytes, polyvec_tobytes,
    };
    use crate::poly::Poly;
    use crate::Q;

    fn sample(offset: i16) -> Poly { core::array::from_fn(|i| ((i as i16 * 13 + offset) % Q).abs()) }

    #[test]
    fn test_polyvec_tobytes_frombytes_roundtrip() {
        const K: usize = 3;
        let v: [Poly; K] = core::array::from_fn(|k| sample(k as i16));
        let mut bytes = [0u8; K * super::POLY_BYTES];
        polyvec_tobytes(&v, &mut bytes);
        let back: [Poly; K] = polyvec_frombytes(&bytes);
        assert_eq!(v, back);
    }

    #[test]
    fn test_polyvec_compress_decompress_bounded() {
        const K: usize = 2;
        let v: [Poly; K] = core::array::from_fn(|k| sample(k as i16 * 7));
        let mut bytes = [0u8; K * super::POLY_COMPRESSED_BYTES];
        polyvec_compress(&v, &mut bytes);
        let back: [Poly; K] = polyvec_decompress(&bytes);
        for k in 0..K {
            for i in 0..256 {
                let a = i32::from(v[k][i]);
                let b = i32::from(back[k][i]);
                let diff = (a - b).rem_euclid(i32::from(Q));
                let err = diff.min(i32::from(Q) - diff);
                assert!(err <= 4);
            }
        }
    }

    #[test]
    fn test_polyvec_add() {
        const K: usize = 2;
        let a: [Poly; K] = core::array::from_fn(|k| sample(k as i16));
        let b: [Poly; K] = core::array::from_fn(|k| sample(k as i16 + 50));
        let c = polyvec_add(&a, &b);
        for k in 0..K {
            for i in 0..256 {
                let expect = ((i32::from(a[k][i]) + i32::from(b[k][i])).rem_euclid(i32::from(Q))) as i16;
                assert_eq!(crate::reduce::freeze(c[k][i]), expect);
            }
        }
    }
}
