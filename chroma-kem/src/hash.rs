//! Hash and XOF functions for the KEM.
//!
//! - H = SHA3-256: key and message digests
//! - G = SHA3-512: seed expansion and session-key derivation
//! - KDF = SHAKE256: final shared-secret derivation (both accept and
//!   implicit-reject paths)
//! - XOF = SHAKE128: matrix expansion
//! - PRF = SHAKE256: noise sampling

#![allow(dead_code)]

use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Sha3_256, Sha3_512, Shake128, Shake256,
};

/// H: SHA3-256 digest.
#[inline]
pub fn hash_h(input: &[u8]) -> [u8; 32] {
    use sha3::Digest;
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, input);
    let mut output = [0u8; 32];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// G: SHA3-512 digest, split by callers into two 32-byte halves.
#[inline]
pub fn hash_g(input: &[u8]) -> [u8; 64] {
    use sha3::Digest;
    let mut hasher = Sha3_512::new();
    Digest::update(&mut hasher, input);
    let mut output = [0u8; 64];
    output.copy_from_slice(&hasher.finalize());
    output
}

/// KDF: SHAKE256 over `key ‖ ct_digest`, producing the 32-byte shared
/// secret.
///
/// Used with the session key on the accept path and with the implicit
/// rejection seed z on the reject path; both paths produce the same output
/// length and are selected in constant time by the caller.
#[inline]
pub fn kdf(key: &[u8; 32], ct_digest: &[u8; 32]) -> [u8; 32] {
    let mut hasher = Shake256::default();
    hasher.update(key);
    hasher.update(ct_digest);
    let mut reader = hasher.finalize_xof();
    let mut out = [0u8; 32];
    reader.read(&mut out);
    out
}

/// XOF for matrix expansion: SHAKE128 seeded with rho ‖ col ‖ row.
pub struct Xof {
    reader: sha3::Shake128Reader,
}

impl Xof {
    /// Create the XOF for matrix entry (row, col).
    ///
    /// The seed order is column first, matching the column-major indexing
    /// convention of the sampling step.
    pub fn new(rho: &[u8; 32], row: u8, col: u8) -> Self {
        let mut hasher = Shake128::default();
        hasher.update(rho);
        hasher.update(&[col, row]);
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Squeeze bytes from the XOF, re-permuting as needed.
    #[inline]
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// PRF: SHAKE256 over `sigma ‖ nonce`, filling `output` for CBD sampling.
#[inline]
pub fn prf(sigma: &[u8; 32], nonce: u8, output: &mut [u8]) {
    let mut hasher = Shake256::default();
    hasher.update(sigma);
    hasher.update(&[nonce]);
    let mut reader = hasher.finalize_xof();
    reader.read(output);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_h_deterministic() {
        assert_eq!(hash_h(b"input"), hash_h(b"input"));
        assert_ne!(hash_h(b"input1"), hash_h(b"input2"));
    }

    #[test]
    fn test_hash_g_splits() {
        let g = hash_g(b"seed material");
        let (left, right) = g.split_at(32);
        assert_ne!(left, right);
    }

    #[test]
    fn test_kdf_separates_keys() {
        let ct_digest = [7u8; 32];
        let a = kdf(&[1u8; 32], &ct_digest);
        let b = kdf(&[2u8; 32], &ct_digest);
        assert_ne!(a, b);
        assert_eq!(a, kdf(&[1u8; 32], &ct_digest));
    }

    #[test]
    fn test_xof_deterministic_and_indexed() {
        let rho = [0x42u8; 32];
        let mut out1 = [0u8; 96];
        let mut out2 = [0u8; 96];

        Xof::new(&rho, 0, 0).squeeze(&mut out1);
        Xof::new(&rho, 0, 0).squeeze(&mut out2);
        assert_eq!(out1, out2);

        Xof::new(&rho, 0, 1).squeeze(&mut out2);
        assert_ne!(out1, out2);
        Xof::new(&rho, 1, 0).squeeze(&mut out2);
        assert_ne!(out1, out2);
    }

    #[test]
    fn test_xof_absorbs_any_seed_shape() {
        // squeezing in two chunks equals squeezing at once
        let rho = [9u8; 32];
        let mut whole = [0u8; 64];
        Xof::new(&rho, 2, 3).squeeze(&mut whole);

        let mut xof = Xof::new(&rho, 2, 3);
        let mut first = [0u8; 24];
        let mut second = [0u8; 40];
        xof.squeeze(&mut first);
        xof.squeeze(&mut second);
        assert_eq!(&whole[..24], &first[..]);
        assert_eq!(&whole[24..], &second[..]);
    }

    #[test]
    fn test_prf_nonce_separation() {
        let sigma = [0x42u8; 32];
        let mut out1 = [0u8; 128];
        let mut out2 = [0u8; 128];
        prf(&sigma, 0, &mut out1);
        prf(&sigma, 1, &mut out2);
        assert_ne!(out1, out2);
        prf(&sigma, 0, &mut out2);
        assert_eq!(out1, out2);
    }
}
