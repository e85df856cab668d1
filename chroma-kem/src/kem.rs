//! The CCA-secure KEM built on the inner encryption scheme.
//!
//! Keygen, encapsulation, and decapsulation with implicit rejection: a
//! ciphertext that fails the re-encryption check yields a pseudorandom
//! secret derived from the stored rejection seed, selected in constant
//! time, so rejection is indistinguishable from success to the caller.

#![allow(dead_code)]

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::encode::check_modulus;
use crate::hash::{hash_g, hash_h, kdf};
use crate::pke::{pke_decrypt, pke_encrypt, pke_keygen};
use chroma_core::{Error, Result};
use subtle::{ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// KEM key generation.
///
/// The decapsulation key stores everything decapsulation needs without
/// recomputation: dk = dk_pke ‖ ek ‖ H(ek) ‖ z, with z the 32-byte
/// implicit-rejection seed.
pub fn kem_keygen<const K: usize, const ETA1: usize>(
    d: &[u8; 32],
    z: &[u8; 32],
) -> (Vec<u8>, Vec<u8>) {
    let (ek, dk_pke) = pke_keygen::<K, ETA1>(d);

    let h_ek = hash_h(&ek);

    let dk_pke_size = K * 384;
    let ek_size = K * 384 + 32;
    let dk_size = dk_pke_size + ek_size + 32 + 32;

    let mut dk = Vec::with_capacity(dk_size);
    dk.extend_from_slice(&dk_pke);
    dk.extend_from_slice(&ek);
    dk.extend_from_slice(&h_ek);
    dk.extend_from_slice(z);

    (dk, ek)
}

/// KEM encapsulation.
///
/// The caller-drawn seed m is hashed before use so that encapsulation
/// never commits to raw RNG output: with m̄ = H(m),
/// (K̄, r) = G(m̄ ‖ H(ek)), ct = Encrypt(ek, m̄, r), and the shared secret
/// is KDF(K̄ ‖ H(ct)).
///
/// # Errors
///
/// - [`Error::MalformedEncoding`] if `ek` has the wrong length or any
///   decoded 12-bit coefficient is >= q.
pub fn kem_encaps<
    const K: usize,
    const ETA1: usize,
    const ETA2: usize,
    const DU: usize,
    const DV: usize,
>(
    ek: &[u8],
    m: &[u8; 32],
) -> Result<(Vec<u8>, [u8; 32])> {
    let expected_ek_size = K * 384 + 32;
    if ek.len() != expected_ek_size {
        return Err(Error::MalformedEncoding);
    }
    if !check_modulus(ek) {
        return Err(Error::MalformedEncoding);
    }

    let m_bar = hash_h(m);
    let h_ek = hash_h(ek);

    let mut g_input = [0u8; 64];
    g_input[..32].copy_from_slice(&m_bar);
    g_input[32..].copy_from_slice(&h_ek);
    let g_output = hash_g(&g_input);

    let mut k_bar = [0u8; 32];
    let mut r = [0u8; 32];
    k_bar.copy_from_slice(&g_output[..32]);
    r.copy_from_slice(&g_output[32..]);

    let ct = pke_encrypt::<K, ETA1, ETA2, DU, DV>(ek, &m_bar, &r);

    let shared_secret = kdf(&k_bar, &hash_h(&ct));

    let mut g_output = g_output;
    g_output.zeroize();
    g_input.zeroize();
    k_bar.zeroize();
    r.zeroize();

    Ok((ct, shared_secret))
}

/// KEM decapsulation with implicit rejection.
///
/// Byte-layer validation happens first and deterministically; after that
/// no operation branches on secret data. The recovered seed is re-derived,
/// re-encrypted, and the resulting ciphertext compared against the input
/// in constant time; the output is selected between the accept secret
/// KDF(K̄′ ‖ H(ct)) and the rejection secret KDF(z ‖ H(ct)) without a
/// data-dependent branch. Both paths produce 32 bytes.
///
/// # Errors
///
/// - [`Error::MalformedEncoding`] if `dk` or `ct` has the wrong length.
///   A well-formed but invalid ciphertext is NOT an error.
pub fn kem_decaps<
    const K: usize,
    const ETA1: usize,
    const ETA2: usize,
    const DU: usize,
    const DV: usize,
>(
    dk: &[u8],
    ct: &[u8],
) -> Result<[u8; 32]> {
    let dk_pke_size = K * 384;
    let ek_size = K * 384 + 32;
    let expected_dk_size = dk_pke_size + ek_size + 32 + 32;

    if dk.len() != expected_dk_size {
        return Err(Error::MalformedEncoding);
    }
    let expected_ct_size = 32 * (K * DU + DV);
    if ct.len() != expected_ct_size {
        return Err(Error::MalformedEncoding);
    }

    let (dk_pke, rest) = dk.split_at(dk_pke_size);
    let (ek, rest) = rest.split_at(ek_size);
    let (h_bytes, z_bytes) = rest.split_at(32);

    let h: &[u8; 32] = h_bytes
        .try_into()
        .expect("infallible: h is 32 bytes after dk length check");
    let z: &[u8; 32] = z_bytes
        .try_into()
        .expect("infallible: z is 32 bytes after dk length check");

    let mut m_prime = pke_decrypt::<K, DU, DV>(dk_pke, ct);

    let mut g_input = [0u8; 64];
    g_input[..32].copy_from_slice(&m_prime);
    g_input[32..].copy_from_slice(h);
    let mut g_output = hash_g(&g_input);

    let mut k_bar = [0u8; 32];
    let mut r_prime = [0u8; 32];
    k_bar.copy_from_slice(&g_output[..32]);
    r_prime.copy_from_slice(&g_output[32..]);

    let mut ct_prime = pke_encrypt::<K, ETA1, ETA2, DU, DV>(ek, &m_prime, &r_prime);

    let ct_digest = hash_h(ct);
    let k_accept = kdf(&k_bar, &ct_digest);
    let k_reject = kdf(z, &ct_digest);

    let ciphertexts_equal = ct.ct_eq(&ct_prime);
    let mut result = [0u8; 32];
    for i in 0..32 {
        result[i] = u8::conditional_select(&k_reject[i], &k_accept[i], ciphertexts_equal);
    }

    m_prime.zeroize();
    g_input.zeroize();
    g_output.zeroize();
    k_bar.zeroize();
    r_prime.zeroize();
    ct_prime.zeroize();

    Ok(result)
}
