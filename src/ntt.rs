//! The Number-Theoretic Transform over `Z_q[x]/(x^256+1)`.
//!
//! Unlike a Kyber-style NTT, which stops at 128 two-coefficient blocks and finishes each pair off
//! with a degree-one `BaseCaseMultiply`, this transform runs all the way down to block length 1:
//! `polyvec_pointwise_acc` in the reference source multiplies NTT-domain polynomials with a plain
//! per-coefficient product, which is only consistent with a transform that is complete at every
//! coefficient. The twiddle factors are powers of `PSI`, a primitive 512th root of unity (`PSI^2`
//! is the usual primitive 256th root); the extra factor of two in the root order is what lets the
//! transform reach block length 1 instead of 2.

use crate::reduce::{barrett_reduce, montgomery_reduce, R2};
use crate::Q;

/// Primitive 512th root of unity mod `Q`.
const PSI: u32 = 7146;

/// `PSI^{-1} mod Q`.
const PSI_INV: u32 = 7480;

/// `2^18`, matching `reduce::montgomery_reduce`'s radix. Re-stated locally since that module's
/// own `R_LOG2` is private and the zeta tables need it to promote plain powers into Montgomery form.
const R_MONT: u64 = 1 << 18;

/// `2^{-1} mod Q`, pre-promoted into Montgomery form. Each inverse-transform layer halves its
/// butterfly outputs; accumulating that across all 8 layers produces the overall `256^{-1}`
/// scaling factor that a full-depth inverse transform needs.
const INV2_MONT: i16 = ((3841u64 * R_MONT) % (Q as u64)) as i16;

/// Builds a bit-reversal-indexed table of `root^i mod Q`, pre-promoted into Montgomery form so
/// that a single `montgomery_reduce` in the butterfly loop is all a layer needs.
#[must_use]
const fn gen_zeta_table(root: u32) -> [i16; 256] {
    let mut result = [0i16; 256];
    let mut x = 1u64;
    let mut i = 0usize;
    while i < 256 {
        let idx = (i as u8).reverse_bits() as usize;
        result[idx] = ((x * R_MONT) % (Q as u64)) as i16;
        x = (x * root as u64) % (Q as u64);
        i += 1;
    }
    result
}

/// `PSI^{BitRev8(i)} mod Q`, Montgomery form. Indexed by the running layer/start counter `k`
/// described in `ntt` below, not by `i` directly.
static ZETAS: [i16; 256] = gen_zeta_table(PSI);

/// `PSI^{-BitRev8(i)} mod Q`, Montgomery form, for the inverse transform.
static ZETAS_INV: [i16; 256] = gen_zeta_table(PSI_INV);

/// The eight layer widths a complete 256-point transform passes through, largest first.
const LENGTHS: [usize; 8] = [128, 64, 32, 16, 8, 4, 2, 1];

/// Computes the NTT representation of `f` in place.
///
/// At each layer, `k` is re-derived from the layer width and block start rather than carried as a
/// running counter, so a layer can be entered at any `start` independent of the others: `k = N /
/// (2*length) + start / (2*length)`.
pub(crate) fn ntt(f: &mut [i16; 256]) {
    let n = f.len();
    for &length in &LENGTHS {
        let mut start = 0;
        while start < n {
            let k = n / (2 * length) + start / (2 * length);
            let zeta = ZETAS[k];
            for j in start..start + length {
                let t = montgomery_reduce(i32::from(zeta) * i32::from(f[j + length]));
                let a = f[j] + t;
                let b = f[j] - t;
                f[j] = barrett_reduce(a);
                f[j + length] = barrett_reduce(b);
            }
            start += 2 * length;
        }
    }
}

/// Computes the inverse NTT of `f_hat` in place.
///
/// Each layer halves its two butterfly outputs (via `INV2_MONT`) before the zeta multiply on the
/// second half, rather than deferring a single `N^{-1}` scaling to the very end: a full-depth
/// transform's last layer has nothing left to average, so the scaling has to happen layer by
/// layer as each pair collapses.
pub(crate) fn inv_ntt(f: &mut [i16; 256]) {
    let n = f.len();
    for &length in LENGTHS.iter().rev() {
        let mut start = 0;
        while start < n {
            let k = n / (2 * length) + start / (2 * length);
            let zeta_inv = ZETAS_INV[k];
            for j in start..start + length {
                let a = i32::from(f[j]);
                let b = i32::from(f[j + length]);
                let sum = a + b;
                let diff = a - b;
                f[j] = barrett_reduce(montgomery_reduce(sum * i32::from(INV2_MONT)));
                let halved_diff = barrett_reduce(montgomery_reduce(diff * i32::from(INV2_MONT)));
                f[j + length] =
                    barrett_reduce(montgomery_reduce(i32::from(halved_diff) * i32::from(zeta_inv)));
            }
            start += 2 * length;
        }
    }
}

/// Multiplies two NTT-domain polynomials coefficientwise, the way `polyvec_pointwise_acc`
/// multiplies a row of `A_hat` against `s_hat`: `g_hat`'s operand is promoted through the extra
/// Montgomery factor `R2` first, so the single subsequent `montgomery_reduce` lands on a
/// plain-domain product rather than one still scaled by `R^{-1}`.
#[must_use]
pub(crate) fn pointwise_multiply(f_hat: &[i16; 256], g_hat: &[i16; 256]) -> [i16; 256] {
    let mut h_hat = [0i16; 256];
    for i in 0..256 {
        let promoted = montgomery_reduce(R2 * i32::from(g_hat[i]));
        h_hat[i] = barrett_reduce(montgomery_reduce(i32::from(f_hat[i]) * i32::from(promoted)));
    }
    h_hat
}

/// Accumulates `f_hat ⊙ g_hat` into `acc`. Used by the matrix/vector pointwise-accumulate step so
/// a `K`-term dot product only pays one pass over each polynomial.
pub(crate) fn pointwise_multiply_acc(acc: &mut [i16; 256], f_hat: &[i16; 256], g_hat: &[i16; 256]) {
    let product = pointwise_multiply(f_hat, g_hat);
    for i in 0..256 {
        acc[i] = barrett_reduce(acc[i] + product[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::{gen_zeta_table, inv_ntt, ntt, pointwise_multiply, INV2_MONT, PSI, PSI_INV};
    use crate::reduce::freeze;
    use crate::Q;

    #[test]
    fn test_zeta_table_values() {
        let zt = gen_zeta_table(PSI);
        assert_eq!(zt[0], 990); // PSI^0 = 1, Montgomery form of 1 is MONT = 990
        assert_eq!(zt[1], 254);
        assert_eq!(zt[4], 6586);
        let zti = gen_zeta_table(PSI_INV);
        assert_eq!(zti[1], 7427);
        assert_eq!(INV2_MONT, 495);
    }

    fn canonical(f: &[i16; 256]) -> [i16; 256] { core::array::from_fn(|i| freeze(f[i])) }

    #[test]
    fn test_ntt_roundtrip() {
        let mut f = [0i16; 256];
        for (i, c) in f.iter_mut().enumerate() {
            *c = ((i * 37 + 11) % Q as usize) as i16;
        }
        let original = canonical(&f);
        ntt(&mut f);
        inv_ntt(&mut f);
        assert_eq!(canonical(&f), original);
    }

    #[test]
    fn test_ntt_roundtrip_sparse() {
        let mut f = [0i16; 256];
        f[0] = 1;
        let original = canonical(&f);
        ntt(&mut f);
        inv_ntt(&mut f);
        assert_eq!(canonical(&f), original);
    }

    #[test]
    fn test_pointwise_multiply_matches_schoolbook() {
        let mut a = [0i16; 256];
        let mut b = [0i16; 256];
        for i in 0..256 {
            a[i] = ((i * 3 + 1) % Q as usize) as i16;
            b[i] = ((i * 5 + 2) % Q as usize) as i16;
        }
        let a_plain = canonical(&a);
        let b_plain = canonical(&b);

        // schoolbook product mod (x^256 + 1), reduced to [0, Q)
        let mut expect = [0i64; 256];
        for i in 0..256 {
            for j in 0..256 {
                let k = i + j;
                let v = i64::from(a_plain[i]) * i64::from(b_plain[j]);
                if k < 256 {
                    expect[k] += v;
                } else {
                    expect[k - 256] -= v;
                }
            }
        }
        let expect: [i16; 256] =
            core::array::from_fn(|i| freeze(expect[i].rem_euclid(i64::from(Q)) as i16));

        ntt(&mut a);
        ntt(&mut b);
        let mut c_hat = pointwise_multiply(&a, &b);
        inv_ntt(&mut c_hat);
        assert_eq!(canonical(&c_hat), expect);
    }
}
