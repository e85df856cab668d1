//! Level-44 parameter set (NIST category 2).

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::params::sign_44::*;
use crate::sign::{sign_keygen, sign_message, verify_signature};
use crate::types::define_sign_types;
use chroma_core::{ColorValue, Error, Result, Signer};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Level-44 algorithm marker.
pub struct ColorSign44;

define_sign_types! {
    sk_size: SK_BYTES,
    pk_size: PK_BYTES,
    sig_size: SIG_BYTES
}

impl Signer for ColorSign44 {
    type SigningKey = SigningKey;
    type VerificationKey = VerificationKey;
    type Signature = Signature;

    const SIGNING_KEY_SIZE: usize = SK_BYTES;
    const VERIFICATION_KEY_SIZE: usize = PK_BYTES;
    const SIGNATURE_SIZE: usize = SIG_BYTES;

    fn keygen(rng: &mut impl CryptoRngCore) -> Result<(Self::SigningKey, Self::VerificationKey)> {
        let mut zeta = [0u8; 32];
        rng.try_fill_bytes(&mut zeta)
            .map_err(|_| Error::RandomnessUnavailable)?;

        let (sk_bytes, pk_bytes) = sign_keygen::<K, L, ETA>(&zeta);
        zeta.zeroize();

        let sk = SigningKey::from_bytes(&sk_bytes)?;
        let pk = VerificationKey::from_bytes(&pk_bytes)?;
        Ok((sk, pk))
    }

    fn sign(sk: &Self::SigningKey, message: &[u8]) -> Result<Self::Signature> {
        // deterministic variant: rnd = 0
        let rnd = [0u8; 32];

        let sig_bytes = sign_message::<K, L, ETA, BETA, GAMMA1, GAMMA2, TAU, OMEGA, C_TILDE_BYTES>(
            sk.as_bytes(),
            message,
            &rnd,
        )
        .ok_or(Error::BoundsViolation)?;

        Signature::from_bytes(&sig_bytes)
    }

    fn verify(pk: &Self::VerificationKey, message: &[u8], signature: &Self::Signature) -> bool {
        verify_signature::<K, L, BETA, GAMMA1, GAMMA2, TAU, OMEGA, C_TILDE_BYTES>(
            pk.as_bytes(),
            message,
            signature.as_bytes(),
        )
    }
}
