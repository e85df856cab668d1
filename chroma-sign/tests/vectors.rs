// Deterministic vector tests; helpers stay ungated while the per-level
// modules are feature-gated.
#![allow(dead_code)]

//! Seeded end-to-end vectors for the signature scheme, the envelope, and
//! the known-answer record codec.

use chroma_sign::Signer;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn hex_decode(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).unwrap())
        .collect()
}

fn seed_from_hex(hex: &str) -> [u8; 32] {
    hex_decode(hex).try_into().unwrap()
}

#[cfg(feature = "sign-44")]
mod sign_44_vectors {
    use super::*;
    use chroma_sign::kat::KatRecord;
    use chroma_sign::ColorSign44;

    #[test]
    fn test_hello_world() {
        let seed =
            seed_from_hex("0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcd00");
        let mut rng = StdRng::from_seed(seed);
        let (sk, pk) = ColorSign44::keygen(&mut rng).unwrap();

        let signature = ColorSign44::sign(&sk, b"Hello World").unwrap();
        assert!(ColorSign44::verify(&pk, b"Hello World", &signature));
        assert!(!ColorSign44::verify(&pk, b"Wrong", &signature));
    }

    #[test]
    fn test_kat_record_regenerates() {
        let record = KatRecord::generate(44, [0u8; 32], b"Hello World").unwrap();
        assert!(record.check().unwrap());

        // codec roundtrip preserves every byte
        let bytes = record.to_bytes();
        let back = KatRecord::from_bytes(&bytes).unwrap();
        assert_eq!(record, back);
        assert!(back.check().unwrap());
    }

    #[test]
    fn test_signature_z_norm_bound() {
        // decode every z coefficient of a produced signature and check the
        // advertised bound gamma1 - beta (here 2^17 - 78)
        let mut rng = StdRng::from_seed([0x11u8; 32]);
        let (sk, _) = ColorSign44::keygen(&mut rng).unwrap();
        let sig = ColorSign44::sign(&sk, b"norm check").unwrap();
        let bytes = sig.as_bytes();

        let bound = (1 << 17) - 78;
        // z spans bytes [32, 32 + 4*576)
        for chunk in bytes[32..32 + 4 * 576].chunks_exact(9) {
            for idx in 0..4 {
                let base = match idx {
                    0 => (chunk[0] as i32) | ((chunk[1] as i32) << 8) | ((chunk[2] as i32) << 16),
                    1 => {
                        ((chunk[2] as i32) >> 2)
                            | ((chunk[3] as i32) << 6)
                            | ((chunk[4] as i32) << 14)
                    }
                    2 => {
                        ((chunk[4] as i32) >> 4)
                            | ((chunk[5] as i32) << 4)
                            | ((chunk[6] as i32) << 12)
                    }
                    _ => {
                        ((chunk[6] as i32) >> 6)
                            | ((chunk[7] as i32) << 2)
                            | ((chunk[8] as i32) << 10)
                    }
                } & 0x3FFFF;
                let coeff = (1 << 17) - base;
                assert!(coeff.abs() < bound, "z coefficient {coeff} exceeds bound");
            }
        }
    }

    #[test]
    fn test_hint_count_bound() {
        // the k running totals at the tail never exceed omega = 80
        let mut rng = StdRng::from_seed([0x12u8; 32]);
        let (sk, _) = ColorSign44::keygen(&mut rng).unwrap();

        for msg in [&b"a"[..], b"bb", b"ccc", b"dddd"] {
            let sig = ColorSign44::sign(&sk, msg).unwrap();
            let bytes = sig.as_bytes();
            let tail = &bytes[bytes.len() - 4..];
            let mut prev = 0u8;
            for &t in tail {
                assert!(t as usize <= 80, "running total {t} exceeds omega");
                assert!(t >= prev, "running totals must be non-decreasing");
                prev = t;
            }
        }
    }

    #[test]
    fn test_non_monotone_hint_rejects() {
        use chroma_sign::sign44::Signature;

        let mut rng = StdRng::from_seed([0x13u8; 32]);
        let (sk, pk) = ColorSign44::keygen(&mut rng).unwrap();
        let sig = ColorSign44::sign(&sk, b"hints").unwrap();

        let mut bytes = *sig.as_bytes();
        let hint_start = bytes.len() - 84; // omega + k
        let total = bytes[bytes.len() - 1] as usize;
        // swap the first two position bytes; skip the degenerate cases
        // where there are fewer than two hints or the swap is a no-op
        if total >= 2 && bytes[hint_start] != bytes[hint_start + 1] {
            bytes.swap(hint_start, hint_start + 1);
            let tampered = Signature::from_bytes(&bytes).unwrap();
            assert!(!ColorSign44::verify(&pk, b"hints", &tampered));
        }
    }
}

#[cfg(feature = "sign-65")]
mod sign_65_vectors {
    use super::*;
    use chroma_sign::cose::{CoseSign1, ALG_LEVEL_65};
    use chroma_sign::sign65::{Signature, VerificationKey};
    use chroma_sign::ColorSign65;

    #[test]
    fn test_seeded_roundtrip() {
        let seed =
            seed_from_hex("a0b1c2d3e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1");
        let mut rng = StdRng::from_seed(seed);
        let (sk, pk) = ColorSign65::keygen(&mut rng).unwrap();

        let message = b"seeded message";
        let sig = ColorSign65::sign(&sk, message).unwrap();
        assert!(ColorSign65::verify(&pk, message, &sig));
    }

    #[test]
    fn test_cose_envelope_end_to_end() {
        let mut rng = StdRng::from_seed([0x44u8; 32]);
        let (sk, pk) = ColorSign65::keygen(&mut rng).unwrap();

        let message = b"enveloped message";
        let sig = ColorSign65::sign(&sk, message).unwrap();

        // wrap, transmit, unwrap
        let envelope = CoseSign1::new(message, sig.as_bytes(), ALG_LEVEL_65);
        let wire = envelope.to_bytes();

        let received = CoseSign1::from_bytes(&wire).unwrap();
        assert_eq!(received.algorithm().unwrap(), ALG_LEVEL_65);

        let pk2 = VerificationKey::from_bytes(pk.as_bytes()).unwrap();
        let sig2 = Signature::from_bytes(&received.signature).unwrap();
        assert!(ColorSign65::verify(&pk2, &received.payload, &sig2));
    }
}

#[cfg(feature = "sign-87")]
mod sign_87_vectors {
    use super::*;
    use chroma_sign::ColorSign87;

    #[test]
    fn test_seeded_roundtrip_and_sizes() {
        let seed =
            seed_from_hex("fedcba9876543210fedcba9876543210fedcba9876543210fedcba9876543210");
        let mut rng = StdRng::from_seed(seed);
        let (sk, pk) = ColorSign87::keygen(&mut rng).unwrap();

        assert_eq!(pk.as_bytes().len(), 2592);
        assert_eq!(sk.as_bytes().len(), 4896);

        let sig = ColorSign87::sign(&sk, b"level 87").unwrap();
        assert_eq!(sig.as_bytes().len(), 4627);
        assert!(ColorSign87::verify(&pk, b"level 87", &sig));
    }
}

#[cfg(all(feature = "sign-44", feature = "sign-65", feature = "sign-87"))]
mod kat_stream {
    use chroma_sign::kat::KatRecord;

    /// A three-level vector stream regenerates and re-parses byte-exactly.
    #[test]
    fn test_multi_level_stream() {
        let mut stream = Vec::new();
        for (level, seed_byte) in [(44u32, 1u8), (65, 2), (87, 3)] {
            let record = KatRecord::generate(level, [seed_byte; 32], b"stream entry").unwrap();
            stream.extend_from_slice(&record.to_bytes());
        }

        let records = KatRecord::read_all(&stream).unwrap();
        assert_eq!(records.len(), 3);
        for record in &records {
            assert!(record.check().unwrap(), "level {}", record.level);
        }
        assert_eq!(
            records.iter().map(|r| r.level).collect::<Vec<_>>(),
            vec![44, 65, 87]
        );
    }
}
