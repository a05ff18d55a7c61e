//! Constant-time comparison and conditional-move primitives. The reference source exposes these
//! as named top-level functions (`verify`, `cmov`) rather than inlining equality/selection at
//! each call site, so this crate keeps that shape as a small dedicated module, built on `subtle`.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Returns `1u8` if `a` and `b` are equal, `0u8` otherwise, without branching on their contents.
#[must_use]
pub(crate) fn verify(a: &[u8], b: &[u8]) -> u8 {
    debug_assert_eq!(a.len(), b.len());
    a.ct_eq(b).unwrap_u8()
}

/// Overwrites `dst` with `src` when `condition` is nonzero, in constant time; leaves `dst`
/// untouched otherwise. Used by decapsulation's implicit-rejection path to swap the real shared
/// secret for a pseudorandom one derived from `z` without branching on ciphertext validity.
pub(crate) fn cmov(dst: &mut [u8], src: &[u8], condition: u8) {
    debug_assert_eq!(dst.len(), src.len());
    let choice = Choice::from((condition != 0) as u8);
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        d.conditional_assign(s, choice);
    }
}

#[cfg(test)]
mod tests {
    use super::{cmov, verify};

    #[test]
    fn test_verify() {
        assert_eq!(verify(b"abc", b"abc"), 1);
        assert_eq!(verify(b"abc", b"abd"), 0);
    }

    #[test]
    fn test_cmov() {
        let mut dst = *b"aaaa";
        cmov(&mut dst, b"bbbb", 0);
        assert_eq!(&dst, b"aaaa");
        cmov(&mut dst, b"bbbb", 1);
        assert_eq!(&dst, b"bbbb");
    }
}
