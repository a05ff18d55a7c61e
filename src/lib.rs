#![no_std]
#![deny(clippy::pedantic)]
#![deny(warnings)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]


///
/// Implements AKCN-MLWE, a Module-Lattice-based Key-Encapsulation Mechanism packaged via the
/// Fujisaki-Okamoto transform.
//
// Supports automatically clearing sensitive data on drop
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::traits::SerDes;

// Functionality map
//
// Reduction arithmetic (Montgomery/Barrett/freeze)        --> reduce.rs
// NTT / inverse NTT / pointwise multiply-accumulate       --> ntt.rs
// Single-polynomial pack/unpack/compress/message-encode   --> poly.rs
// Vector-of-polynomials operations, generic over K        --> polyvec.rs
// Centered binomial noise sampling                        --> cbd.rs
// SHA3-256/SHA3-512/SHAKE-128/SHAKE-256 primitives         --> helpers.rs
// Constant-time verify / cmov                             --> verify.rs
// IND-CPA keypair / encrypt / decrypt / matrix expansion   --> indcpa.rs
// Fujisaki-Okamoto KEM keypair / encaps / decaps           --> kem.rs
//
// The three parameter sets are modules in this file with injected macro code
// that connects them into the functionality in kem.rs. Some of the 'obtuse'
// coding style is driven by clippy pedantic.

mod cbd;
mod helpers;
mod indcpa;
mod kem;
mod ntt;
mod poly;
mod polyvec;
mod reduce;
mod verify;

/// All functionality is covered by traits, such that consumers can utilize trait objects as desired.
pub mod traits;

// Relevant to all parameter sets: ring degree 256, prime modulus 7681.
const Q: i16 = 7681;

/// Shared Secret Key Length for all AKCN-MLWE variants (in bytes)
pub const SSK_LEN: usize = 32;

/// The (opaque) secret key that can be de/serialized by each party.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecretKey([u8; SSK_LEN]);

impl SerDes for SharedSecretKey {
    type ByteArray = [u8; SSK_LEN];

    fn into_bytes(self) -> Self::ByteArray { self.0 }

    fn try_from_bytes(ssk: Self::ByteArray) -> Result<Self, &'static str> {
        // Not really needed but provided for symmetry.
        // No opportunity for validation, but using a Result for a future possibility
        Ok(SharedSecretKey(ssk))
    }
}


// Conservative (constant-time) paranoia...
impl PartialEq for SharedSecretKey {
    fn eq(&self, other: &Self) -> bool {
        let mut result = true;
        for i in 0..self.0.len() {
            result &= self.0[i] == other.0[i];
        }
        result
    }
}


// This common functionality is injected into each parameter set module
macro_rules! functionality {
    () => {
        const CBD_BYTES: usize = ETA * 64; // Currently, Rust does not allow expressions involving
                                            // constants in generics, so this is handled manually.

        use crate::kem::{kem_decaps, kem_encaps, kem_keypair, kem_keypair_internal};
        use crate::traits::{Decaps, Encaps, KeyGen, SerDes};
        use crate::SharedSecretKey;
        use rand_core::CryptoRngCore;
        use zeroize::{Zeroize, ZeroizeOnDrop};

        /// Correctly sized encapsulation key specific to the target security parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct EncapsKey([u8; EK_LEN]);

        /// Correctly sized decapsulation key specific to the target security parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct DecapsKey([u8; DK_LEN]);

        /// Correctly sized ciphertext specific to the target security parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct CipherText([u8; CT_LEN]);

        /// The key generation algorithm accepts no input, utilizes randomness, and produces an
        /// encapsulation key and a decapsulation key. While the encapsulation key can be made
        /// public, the decapsulation key must remain private. The outputs of this function are
        /// opaque structs specific to a target parameter set.

        pub struct KG();

        impl KeyGen for KG {
            type DecapsByteArray = [u8; DK_LEN];
            type DecapsKey = DecapsKey;
            type EncapsByteArray = [u8; EK_LEN];
            type EncapsKey = EncapsKey;

            fn try_keygen_with_rng(
                rng: &mut impl CryptoRngCore,
            ) -> Result<(EncapsKey, DecapsKey), &'static str> {
                let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
                kem_keypair::<K, ETA, CBD_BYTES>(rng, &mut ek, &mut dk)?;
                Ok((EncapsKey(ek), DecapsKey(dk)))
            }

            fn keygen_from_seed(d: [u8; 32], z: [u8; 32]) -> (EncapsKey, DecapsKey) {
                let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
                kem_keypair_internal::<K, ETA, CBD_BYTES>(&d, &z, &mut ek, &mut dk);
                (EncapsKey(ek), DecapsKey(dk))
            }

            fn validate_keypair_with_rng_vartime(
                _rng: &mut impl CryptoRngCore, ek: &Self::EncapsByteArray, dk: &Self::DecapsByteArray,
            ) -> bool {
                let indcpa_pk_len = K * crate::poly::POLY_BYTES + 32;
                let indcpa_sk_len = K * crate::poly::POLY_BYTES;
                let same_ek = *ek == dk[indcpa_sk_len..indcpa_sk_len + indcpa_pk_len];
                let h_pk = crate::helpers::sha3_256(ek);
                let same_h = h_pk
                    == dk[(indcpa_sk_len + indcpa_pk_len)..(indcpa_sk_len + indcpa_pk_len + 32)];
                same_ek & same_h
            }
        }

        impl Encaps for EncapsKey {
            type CipherText = CipherText;
            type SharedSecretKey = SharedSecretKey;

            fn try_encaps_with_rng(
                &self, rng: &mut impl CryptoRngCore,
            ) -> Result<(Self::SharedSecretKey, Self::CipherText), &'static str> {
                let mut ct = [0u8; CT_LEN];
                let ssk = kem_encaps::<K, ETA, CBD_BYTES>(rng, &self.0, &mut ct)?;
                Ok((ssk, CipherText(ct)))
            }
        }

        impl Decaps for DecapsKey {
            type CipherText = CipherText;
            type SharedSecretKey = SharedSecretKey;

            fn try_decaps(&self, ct: &CipherText) -> Result<(SharedSecretKey, i8), &'static str> {
                kem_decaps::<K, ETA, CBD_BYTES, CT_LEN>(&self.0, &ct.0)
            }
        }


        impl SerDes for EncapsKey {
            type ByteArray = [u8; EK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(ek: Self::ByteArray) -> Result<Self, &'static str> {
                // 13 bits per coefficient has no canonical-encoding round-trip to check here;
                // the byte array's length is already fixed by its type.
                Ok(EncapsKey(ek))
            }
        }


        impl SerDes for DecapsKey {
            type ByteArray = [u8; DK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(dk: Self::ByteArray) -> Result<Self, &'static str> { Ok(DecapsKey(dk)) }
        }

        impl SerDes for CipherText {
            type ByteArray = [u8; CT_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(ct: Self::ByteArray) -> Result<Self, &'static str> { Ok(CipherText(ct)) }
        }
    };
}


/// Functionality for the AKCN-MLWE-2 security parameter set (module rank `k = 2`).
#[cfg(feature = "akcn-mlwe-2")]
pub mod akcn_mlwe_2 {
    //!
    //! Typical usage flow entails:
    //! 1. The originator runs `try_keygen()` to get an encaps key `encapsKey` and decaps key `decapsKey`.
    //! 2. The originator serializes the encaps key via `encapsKey.into_bytes()` and sends to the remote party.
    //! 3. The remote party deserializes the bytes via `try_from_bytes(<bytes>)` and runs `try_encaps()` to get the
    //!    shared secret key `ssk` and ciphertext `cipherText`.
    //! 4. The remote party serializes the ciphertext via `cipherText.into_bytes()` and sends to the originator.
    //! 5. The originator deserializes the ciphertext via `try_from_bytes(<bytes>)` then
    //!    runs `decapsKey.try_decaps(cipherText)` to get the shared secret key `ssk`.
    //! 6. Both the originator and remote party now have the same shared secret key `ssk`.

    const K: usize = 2;
    const ETA: usize = 5;

    /// Serialized Encapsulation Key Length (in bytes)
    pub const EK_LEN: usize = 864;
    /// Serialized Decapsulation Key Length (in bytes)
    pub const DK_LEN: usize = 1760;
    /// Serialized Ciphertext Length (in bytes)
    pub const CT_LEN: usize = 1056;

    functionality!();
}


/// Functionality for the AKCN-MLWE-3 security parameter set (module rank `k = 3`).
#[cfg(feature = "akcn-mlwe-3")]
pub mod akcn_mlwe_3 {
    //!
    //! Typical usage flow entails:
    //! 1. The originator runs `try_keygen()` to get an encaps key `encapsKey` and decaps key `decapsKey`.
    //! 2. The originator serializes the encaps key via `encapsKey.into_bytes()` and sends to the remote party.
    //! 3. The remote party deserializes the bytes via `try_from_bytes(<bytes>)` and runs `try_encaps()` to get the
    //!    shared secret key `ssk` and ciphertext `cipherText`.
    //! 4. The remote party serializes the ciphertext via `cipherText.into_bytes()` and sends to the originator.
    //! 5. The originator deserializes the ciphertext via `try_from_bytes(<bytes>)` then
    //!    runs `decapsKey.try_decaps(cipherText)` to get the shared secret key `ssk`.
    //! 6. Both the originator and remote party now have the same shared secret key `ssk`.

    const K: usize = 3;
    const ETA: usize = 4;

    /// Serialized Encapsulation Key Length (in bytes)
    pub const EK_LEN: usize = 1280;
    /// Serialized Decapsulation Key Length (in bytes)
    pub const DK_LEN: usize = 2592;
    /// Serialized Ciphertext Length (in bytes)
    pub const CT_LEN: usize = 1376;

    functionality!();
}


/// Functionality for the AKCN-MLWE-4 security parameter set (module rank `k = 4`).
#[cfg(feature = "akcn-mlwe-4")]
pub mod akcn_mlwe_4 {
    //!
    //! Typical usage flow entails:
    //! 1. The originator runs `try_keygen()` to get an encaps key `encapsKey` and decaps key `decapsKey`.
    //! 2. The originator serializes the encaps key via `encapsKey.into_bytes()` and sends to the remote party.
    //! 3. The remote party deserializes the bytes via `try_from_bytes(<bytes>)` and runs `try_encaps()` to get the
    //!    shared secret key `ssk` and ciphertext `cipherText`.
    //! 4. The remote party serializes the ciphertext via `cipherText.into_bytes()` and sends to the originator.
    //! 5. The originator deserializes the ciphertext via `try_from_bytes(<bytes>)` then
    //!    runs `decapsKey.try_decaps(cipherText)` to get the shared secret key `ssk`.
    //! 6. Both the originator and remote party now have the same shared secret key `ssk`.

    const K: usize = 4;
    const ETA: usize = 3;

    /// Serialized Encapsulation Key Length (in bytes)
    pub const EK_LEN: usize = 1696;
    /// Serialized Decapsulation Key Length (in bytes)
    pub const DK_LEN: usize = 3424;
    /// Serialized Ciphertext Length (in bytes)
    pub const CT_LEN: usize = 1696;

    functionality!();
}
