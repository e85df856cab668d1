// Skip compilation entirely when no variant features are enabled, since all
// test functions are feature-gated.
#![cfg(any(feature = "kem-512", feature = "kem-768", feature = "kem-1024"))]

//! Property-based tests for the KEM.
//!
//! - roundtrip: encaps then decaps recovers the sender's secret
//! - sizes: typed artefacts match the advertised constants
//! - determinism: the same RNG seed produces the same keys
//! - implicit rejection: a flipped ciphertext byte changes the secret

use proptest::prelude::*;

/// Arbitrary 32-byte seeds.
fn arb_seed() -> impl Strategy<Value = [u8; 32]> {
    prop::array::uniform32(any::<u8>())
}

macro_rules! kem_proptest {
    ($mod_name:ident, $variant:ident, $feature:literal, $cases:expr) => {
        #[cfg(feature = $feature)]
        mod $mod_name {
            use super::*;
            use chroma_kem::$variant;
            use chroma_kem::Kem;
            use rand::rngs::StdRng;
            use rand::SeedableRng;

            proptest! {
                #![proptest_config(ProptestConfig::with_cases($cases))]

                #[test]
                fn basic_properties(seed in arb_seed(), enc_seed in arb_seed()) {
                    let mut keygen_rng = StdRng::from_seed(seed);
                    let (dk, ek) = $variant::keygen(&mut keygen_rng).unwrap();

                    prop_assert_eq!(dk.as_bytes().len(), $variant::DECAPSULATION_KEY_SIZE);
                    prop_assert_eq!(ek.as_bytes().len(), $variant::ENCAPSULATION_KEY_SIZE);

                    let mut encaps_rng = StdRng::from_seed(enc_seed);
                    let (ct, ss_sender) = $variant::encaps(&ek, &mut encaps_rng).unwrap();

                    prop_assert_eq!(ct.as_bytes().len(), $variant::CIPHERTEXT_SIZE);

                    let ss_receiver = $variant::decaps(&dk, &ct).unwrap();
                    prop_assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
                }

                #[test]
                fn determinism(seed in arb_seed()) {
                    let mut rng1 = StdRng::from_seed(seed);
                    let mut rng2 = StdRng::from_seed(seed);
                    let (dk1, ek1) = $variant::keygen(&mut rng1).unwrap();
                    let (dk2, ek2) = $variant::keygen(&mut rng2).unwrap();
                    prop_assert_eq!(dk1.as_bytes(), dk2.as_bytes());
                    prop_assert_eq!(ek1.as_bytes(), ek2.as_bytes());
                }

                #[test]
                fn implicit_rejection(
                    seed in arb_seed(),
                    enc_seed in arb_seed(),
                    flip_pos in 0usize..256,
                    flip_bit in 0u8..8,
                ) {
                    use chroma_kem::$mod_name::Ciphertext;

                    let mut keygen_rng = StdRng::from_seed(seed);
                    let (dk, ek) = $variant::keygen(&mut keygen_rng).unwrap();
                    let mut encaps_rng = StdRng::from_seed(enc_seed);
                    let (ct, ss) = $variant::encaps(&ek, &mut encaps_rng).unwrap();

                    let mut bytes = ct.as_bytes().to_vec();
                    let pos = flip_pos % bytes.len();
                    bytes[pos] ^= 1 << flip_bit;
                    let ct_bad = Ciphertext::from_bytes(&bytes).unwrap();

                    let ss_bad = $variant::decaps(&dk, &ct_bad).unwrap();
                    prop_assert_ne!(ss.as_ref(), ss_bad.as_ref());

                    // rejection is itself deterministic
                    let ss_bad2 = $variant::decaps(&dk, &ct_bad).unwrap();
                    prop_assert_eq!(ss_bad.as_ref(), ss_bad2.as_ref());
                }
            }
        }
    };
}

kem_proptest!(kem512, ColorKem512, "kem-512", 12);
kem_proptest!(kem768, ColorKem768, "kem-768", 10);
kem_proptest!(kem1024, ColorKem1024, "kem-1024", 8);
