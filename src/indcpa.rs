//! The IND-CPA public-key primitive underlying the KEM: `indcpa_keypair`, `indcpa_enc`,
//! `indcpa_dec`, plus the matrix-expansion XOF shared by the first two. Corresponds to
//! `indcpa_keypair`/`indcpa_enc`/`indcpa_dec`/`gen_a`/`gen_at`/`gen_matrix` in the reference
//! source: single-eta CBD noise, 13-bit canonical coefficient packing, and 10-bit compression
//! applied only to the ciphertext's `u` half (`v` stays canonically packed).

use sha3::digest::XofReader;

use crate::cbd::sample_poly_cbd;
use crate::helpers::{prf, shake128_xof, sha3_512};
use crate::ntt::inv_ntt;
use crate::poly::{
    poly_add, poly_frombytes, poly_frommsg, poly_sub, poly_tobytes, poly_tomsg, Poly, POLY_BYTES,
    POLY_COMPRESSED_BYTES,
};
use crate::polyvec::{
    polyvec_add, polyvec_compress, polyvec_decompress, polyvec_frombytes, polyvec_inv_ntt,
    polyvec_ntt, polyvec_pointwise_acc, polyvec_tobytes,
};
use crate::Q;

/// Samples one polynomial with coefficients uniform in `[0, Q)`, via rejection sampling over a
/// SHAKE-128 stream seeded with `rho ‖ b0 ‖ b1`. Each candidate is a little-endian 16-bit value
/// masked to 13 bits (`Q` needs 13 bits to represent); values `>= Q` are discarded.
fn sample_uniform_poly(rho: &[u8; 32], b0: u8, b1: u8) -> Poly {
    let mut reader = shake128_xof(rho, b0, b1);
    let mut f = [0i16; 256];
    let mut ctr = 0usize;
    let mut buf = [0u8; 2];
    while ctr < 256 {
        reader.read(&mut buf);
        let val = u16::from_le_bytes(buf) & 0x1FFF;
        if val < Q as u16 {
            f[ctr] = val as i16;
            ctr += 1;
        }
    }
    f
}

/// Expands the non-transposed matrix `A` from seed `rho`, for use during key generation. Entry
/// `(i, j)` is sampled from `rho ‖ j ‖ i`.
fn gen_a<const K: usize>(rho: &[u8; 32]) -> [[Poly; K]; K] {
    core::array::from_fn(|i| core::array::from_fn(|j| sample_uniform_poly(rho, j as u8, i as u8)))
}

/// Expands the transposed matrix `A^T` from seed `rho`, for use during encryption. Entry `(i, j)`
/// is sampled from `rho ‖ i ‖ j` — the reversed domain separator is what distinguishes this from
/// `gen_a`, since both otherwise draw from the same rejection-sampling procedure.
fn gen_at<const K: usize>(rho: &[u8; 32]) -> [[Poly; K]; K] {
    core::array::from_fn(|i| core::array::from_fn(|j| sample_uniform_poly(rho, i as u8, j as u8)))
}

/// Generates an IND-CPA keypair from 32 bytes of randomness `d`.
///
/// `ETA` is the CBD noise parameter for this security level; `CBD_BYTES` must equal `64 * ETA`
/// (Rust's const generics can't derive one from the other yet, so callers supply both).
///
/// `pk` receives `polyvec_tobytes(t) ‖ rho` (`K * POLY_BYTES + 32` bytes); `sk` receives
/// `polyvec_tobytes(s_hat)` (`K * POLY_BYTES` bytes).
pub(crate) fn indcpa_keypair<const K: usize, const ETA: usize, const CBD_BYTES: usize>(
    d: &[u8; 32], pk: &mut [u8], sk: &mut [u8],
) {
    debug_assert_eq!(pk.len(), K * POLY_BYTES + 32, "indcpa_keypair: pk wrong length");
    debug_assert_eq!(sk.len(), K * POLY_BYTES, "indcpa_keypair: sk wrong length");
    debug_assert_eq!(CBD_BYTES, 64 * ETA, "indcpa_keypair: CBD_BYTES != 64 * ETA");

    let seed = sha3_512(d);
    let mut rho = [0u8; 32];
    let mut sigma = [0u8; 32];
    rho.copy_from_slice(&seed[0..32]);
    sigma.copy_from_slice(&seed[32..64]);

    let a = gen_a::<K>(&rho);

    let mut nonce = 0u8;
    let mut s: [Poly; K] = core::array::from_fn(|_| {
        let buf: [u8; CBD_BYTES] = prf(&sigma, nonce);
        nonce += 1;
        sample_poly_cbd(&buf, ETA)
    });
    let e: [Poly; K] = core::array::from_fn(|_| {
        let buf: [u8; CBD_BYTES] = prf(&sigma, nonce);
        nonce += 1;
        sample_poly_cbd(&buf, ETA)
    });

    polyvec_ntt(&mut s);
    let mut e_hat = e;
    polyvec_ntt(&mut e_hat);

    let t_hat: [Poly; K] = core::array::from_fn(|i| polyvec_pointwise_acc(&a[i], &s));
    let t_hat = polyvec_add(&t_hat, &e_hat);

    polyvec_tobytes(&t_hat, &mut pk[..K * POLY_BYTES]);
    pk[K * POLY_BYTES..].copy_from_slice(&rho);
    polyvec_tobytes(&s, sk);
}

/// Encrypts a 32-byte message `m` under public key `pk`, using `coins` as the noise seed.
/// `ct` receives `polyvec_compress(u) ‖ poly_tobytes(v)` — `u` is 10-bit compressed, `v` stays
/// canonically packed, per this variant's asymmetric treatment of the two ciphertext halves.
pub(crate) fn indcpa_enc<const K: usize, const ETA: usize, const CBD_BYTES: usize>(
    ct: &mut [u8], m: &[u8; 32], pk: &[u8], coins: &[u8; 32],
) {
    debug_assert_eq!(pk.len(), K * POLY_BYTES + 32, "indcpa_enc: pk wrong length");
    debug_assert_eq!(
        ct.len(),
        K * POLY_COMPRESSED_BYTES + POLY_BYTES,
        "indcpa_enc: ct wrong length"
    );
    debug_assert_eq!(CBD_BYTES, 64 * ETA, "indcpa_enc: CBD_BYTES != 64 * ETA");

    let t_hat: [Poly; K] = polyvec_frombytes(&pk[..K * POLY_BYTES]);
    let mut rho = [0u8; 32];
    rho.copy_from_slice(&pk[K * POLY_BYTES..]);

    let at = gen_at::<K>(&rho);

    let mut nonce = 0u8;
    let mut r: [Poly; K] = core::array::from_fn(|_| {
        let buf: [u8; CBD_BYTES] = prf(coins, nonce);
        nonce += 1;
        sample_poly_cbd(&buf, ETA)
    });
    let e1: [Poly; K] = core::array::from_fn(|_| {
        let buf: [u8; CBD_BYTES] = prf(coins, nonce);
        nonce += 1;
        sample_poly_cbd(&buf, ETA)
    });
    let e2_buf: [u8; CBD_BYTES] = prf(coins, nonce);
    let e2 = sample_poly_cbd(&e2_buf, ETA);

    polyvec_ntt(&mut r);

    let mut u: [Poly; K] = core::array::from_fn(|i| polyvec_pointwise_acc(&at[i], &r));
    polyvec_inv_ntt(&mut u);
    let u = polyvec_add(&u, &e1);

    let mut v = polyvec_pointwise_acc(&t_hat, &r);
    inv_ntt(&mut v);
    let v = poly_add(&poly_add(&v, &e2), &poly_frommsg(m));

    polyvec_compress(&u, &mut ct[..K * POLY_COMPRESSED_BYTES]);
    poly_tobytes(&v, &mut ct[K * POLY_COMPRESSED_BYTES..]);
}

/// Decrypts ciphertext `ct` under secret key `sk`, recovering the original 32-byte message.
pub(crate) fn indcpa_dec<const K: usize>(ct: &[u8], sk: &[u8]) -> [u8; 32] {
    debug_assert_eq!(sk.len(), K * POLY_BYTES, "indcpa_dec: sk wrong length");
    debug_assert_eq!(
        ct.len(),
        K * POLY_COMPRESSED_BYTES + POLY_BYTES,
        "indcpa_dec: ct wrong length"
    );

    let mut u: [Poly; K] = polyvec_decompress(&ct[..K * POLY_COMPRESSED_BYTES]);
    let v: Poly = poly_frombytes(&ct[K * POLY_COMPRESSED_BYTES..]);
    let s: [Poly; K] = polyvec_frombytes(sk);

    polyvec_ntt(&mut u);
    let mut mp = polyvec_pointwise_acc(&s, &u);
    inv_ntt(&mut mp);

    let w = poly_sub(&v, &mp);
    poly_tomsg(&w)
}
