//! Level-512 parameter set (NIST category 1).

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::hash::hash_h;
use crate::kem::{kem_decaps, kem_encaps, kem_keygen};
use crate::params::kem_512::*;
use crate::types::define_kem_types;
use chroma_core::{ColorValue, Error, Kem, Result};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Level-512 algorithm marker.
pub struct ColorKem512;

define_kem_types! {
    dk_size: DECAPSULATION_KEY_SIZE,
    ek_size: ENCAPSULATION_KEY_SIZE,
    ct_size: CIPHERTEXT_SIZE,
    ss_size: SHARED_SECRET_SIZE
}

impl Kem for ColorKem512 {
    type DecapsulationKey = DecapsulationKey;
    type EncapsulationKey = EncapsulationKey;
    type Ciphertext = Ciphertext;
    type SharedSecret = SharedSecret;

    const DECAPSULATION_KEY_SIZE: usize = DECAPSULATION_KEY_SIZE;
    const ENCAPSULATION_KEY_SIZE: usize = ENCAPSULATION_KEY_SIZE;
    const CIPHERTEXT_SIZE: usize = CIPHERTEXT_SIZE;
    const SHARED_SECRET_SIZE: usize = SHARED_SECRET_SIZE;

    fn keygen(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::DecapsulationKey, Self::EncapsulationKey)> {
        let mut d = [0u8; 32];
        let mut z = [0u8; 32];
        rng.try_fill_bytes(&mut d)
            .map_err(|_| Error::RandomnessUnavailable)?;
        rng.try_fill_bytes(&mut z)
            .map_err(|_| Error::RandomnessUnavailable)?;

        let (dk_bytes, ek_bytes) = kem_keygen::<K, ETA1>(&d, &z);

        d.zeroize();
        z.zeroize();

        let dk = DecapsulationKey::from_bytes(&dk_bytes)?;
        let ek = EncapsulationKey::from_bytes(&ek_bytes)?;
        Ok((dk, ek))
    }

    fn encaps(
        ek: &Self::EncapsulationKey,
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::Ciphertext, Self::SharedSecret)> {
        let mut m = [0u8; 32];
        rng.try_fill_bytes(&mut m)
            .map_err(|_| Error::RandomnessUnavailable)?;

        let (ct_bytes, ss_bytes) = kem_encaps::<K, ETA1, ETA2, DU, DV>(ek.as_bytes(), &m)?;
        m.zeroize();

        let ct = Ciphertext::with_hint(&ct_bytes, hash_h(&ss_bytes))?;
        Ok((ct, SharedSecret::new(ss_bytes)))
    }

    fn decaps(dk: &Self::DecapsulationKey, ct: &Self::Ciphertext) -> Result<Self::SharedSecret> {
        let ss_bytes = kem_decaps::<K, ETA1, ETA2, DU, DV>(dk.as_bytes(), ct.as_bytes())?;
        Ok(SharedSecret::new(ss_bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sizes() {
        assert_eq!(ColorKem512::ENCAPSULATION_KEY_SIZE, 800);
        assert_eq!(ColorKem512::DECAPSULATION_KEY_SIZE, 1632);
        assert_eq!(ColorKem512::CIPHERTEXT_SIZE, 768);
    }

    #[test]
    fn test_roundtrip() {
        let mut rng = StdRng::from_seed([5u8; 32]);
        let (dk, ek) = ColorKem512::keygen(&mut rng).unwrap();
        let (ct, ss_sender) = ColorKem512::encaps(&ek, &mut rng).unwrap();
        let ss_receiver = ColorKem512::decaps(&dk, &ct).unwrap();
        assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
    }

    #[test]
    fn test_corrupted_ciphertext_rejects_implicitly() {
        let mut rng = StdRng::from_seed([6u8; 32]);
        let (dk, ek) = ColorKem512::keygen(&mut rng).unwrap();
        let (ct, ss) = ColorKem512::encaps(&ek, &mut rng).unwrap();

        let mut corrupted = ct.as_bytes().to_vec();
        corrupted[10] ^= 0x04;
        let ct_bad = Ciphertext::from_bytes(&corrupted).unwrap();

        let ss_bad = ColorKem512::decaps(&dk, &ct_bad).unwrap();
        assert_ne!(ss.as_ref(), ss_bad.as_ref());
    }

    #[test]
    fn test_seed_accessor() {
        let mut rng = StdRng::from_seed([7u8; 32]);
        let (_, ek) = ColorKem512::keygen(&mut rng).unwrap();
        assert_eq!(ek.seed(), &ek.as_bytes()[768..]);
    }
}
