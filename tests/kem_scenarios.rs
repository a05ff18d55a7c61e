//! End-to-end scenarios exercising the public API across all three parameter sets: deterministic
//! seeded reproducibility, tampered-ciphertext implicit rejection, and cross-party decapsulation.

use akcn_mlwe::traits::{Decaps, Encaps, KeyGen, SerDes};

macro_rules! scenario_tests {
    ($mod_name:ident, $param_set:path) => {
        mod $mod_name {
            use super::*;
            use $param_set as pset;

            #[test]
            fn scenario_a_seeded_keygen_and_encaps_are_reproducible() {
                let d = [0u8; 32];
                let z = [0u8; 32];
                let seed = [0u8; 32];

                let (ek1, dk1) = pset::KG::keygen_from_seed(d, z);
                let (ssk1, ct1) = ek1.clone().encaps_from_seed(&seed);

                let (ek2, dk2) = pset::KG::keygen_from_seed(d, z);
                let (ssk2, ct2) = ek2.clone().encaps_from_seed(&seed);

                assert_eq!(ek1.into_bytes(), ek2.into_bytes(), "pk must be reproducible from (d, z)");
                assert_eq!(dk1.clone().into_bytes(), dk2.into_bytes(), "sk must be reproducible from (d, z)");
                assert_eq!(ct1.clone().into_bytes(), ct2.into_bytes(), "ct must be reproducible from seed");
                assert_eq!(ssk1, ssk2, "ss must be reproducible from seed");

                let (ssk_decaps, code) = dk1.try_decaps(&ct1).unwrap();
                assert_eq!(code, 0, "a genuine ciphertext must decapsulate with success code 0");
                assert_eq!(ssk1, ssk_decaps, "decapsulation must recover the encapsulated secret");
            }

            #[test]
            fn scenario_b_tampered_ciphertext_triggers_implicit_rejection() {
                let (ek, dk) = pset::KG::keygen_from_seed([1u8; 32], [2u8; 32]);
                let (ssk_good, ct_good) = ek.encaps_from_seed(&[3u8; 32]);

                let mut ct_bytes = ct_good.into_bytes();
                let last = ct_bytes.len() - 1;
                ct_bytes[last] ^= 1;
                let ct_bad = pset::CipherText::try_from_bytes(ct_bytes).unwrap();

                let (ssk_bad_1, code_1) = dk.try_decaps(&ct_bad).unwrap();
                let (ssk_bad_2, code_2) = dk.try_decaps(&ct_bad).unwrap();

                assert_eq!(code_1, -1, "a tampered ciphertext must decapsulate with failure code -1");
                assert_eq!(code_2, -1, "implicit rejection's failure code must be deterministic for a fixed (sk, ct)");
                assert_ne!(ssk_good, ssk_bad_1, "tampered ciphertext must not decapsulate to the real secret");
                assert_eq!(ssk_bad_1, ssk_bad_2, "implicit rejection must be deterministic for a fixed (sk, ct)");
            }

            #[test]
            fn scenario_c_cross_party_decapsulation_is_uncorrelated() {
                let (ek_a, _dk_a) = pset::KG::keygen_from_seed([10u8; 32], [11u8; 32]);
                let (_ek_b, dk_b) = pset::KG::keygen_from_seed([20u8; 32], [21u8; 32]);

                let (ssk_a, ct_a) = ek_a.encaps_from_seed(&[30u8; 32]);
                let (ssk_b, code) = dk_b.try_decaps(&ct_a).unwrap();

                assert_eq!(code, -1, "decapsulating under an unrelated secret key must fail with code -1");
                assert_ne!(ssk_a, ssk_b, "decapsulating under an unrelated secret key must not agree");
            }
        }
    };
}

scenario_tests!(akcn_mlwe_2_scenarios, akcn_mlwe::akcn_mlwe_2);
scenario_tests!(akcn_mlwe_3_scenarios, akcn_mlwe::akcn_mlwe_3);
scenario_tests!(akcn_mlwe_4_scenarios, akcn_mlwe::akcn_mlwe_4);
