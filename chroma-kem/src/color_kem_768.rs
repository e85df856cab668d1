//! Level-768 parameter set (NIST category 3).

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::hash::hash_h;
use crate::kem::{kem_decaps, kem_encaps, kem_keygen};
use crate::params::kem_768::*;
use crate::types::define_kem_types;
use chroma_core::{ColorValue, Error, Kem, Result};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Level-768 algorithm marker.
pub struct ColorKem768;

define_kem_types! {
    dk_size: DECAPSULATION_KEY_SIZE,
    ek_size: ENCAPSULATION_KEY_SIZE,
    ct_size: CIPHERTEXT_SIZE,
    ss_size: SHARED_SECRET_SIZE
}

impl Kem for ColorKem768 {
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
