//! Level-87 parameter set (NIST category 5).

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::params::sign_87::*;
use crate::sign::{sign_keygen, sign_message, verify_signature};
use crate::types::define_sign_types;
use chroma_core::{ColorValue, Error, Result, Signer};
use rand_core::CryptoRngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Level-87 algorithm marker.
pub struct ColorSign87;

define_sign_types! {
    sk_size: SK_BYTES,
    pk_size: PK_BYTES,
    sig_size: SIG_BYTES
}

impl Signer for ColorSign87 {
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

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sizes() {
        assert_eq!(ColorSign87::SIGNING_KEY_SIZE, 4896);
        assert_eq!(ColorSign87::VERIFICATION_KEY_SIZE, 2592);
        assert_eq!(ColorSign87::SIGNATURE_SIZE, 4627);
    }

    #[test]
    fn test_sign_verify_roundtrip() {
        let mut rng = StdRng::from_seed([41u8; 32]);
        let (sk, pk) = ColorSign87::keygen(&mut rng).unwrap();

        let message = b"category five";
        let signature = ColorSign87::sign(&sk, message).unwrap();
        assert!(ColorSign87::verify(&pk, message, &signature));

        // tampered signature bytes reject
        let mut bytes = *signature.as_bytes();
        bytes[0] ^= 1;
        let tampered = Signature::from_bytes(&bytes).unwrap();
        assert!(!ColorSign87::verify(&pk, message, &tampered));
    }

    #[test]
    fn test_signature_length_strictness() {
        assert!(Signature::from_bytes(&[0u8; 4626]).is_err());
        assert!(Signature::from_bytes(&[0u8; 4628]).is_err());
    }
}
