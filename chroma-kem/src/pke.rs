//! The IND-CPA inner encryption scheme.
//!
//! Module-LWE encryption of a 32-byte seed: the KEM wraps this scheme in a
//! Fujisaki-Okamoto-style transform to reach IND-CCA2. Encryption is
//! deterministic given the randomness seed r, which is what the
//! re-encryption check in decapsulation relies on.

#![allow(dead_code)]

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::encode::{msg_to_poly, poly_to_msg};
use crate::hash::{hash_g, prf};
use crate::matrix::{matrix_vec_mul, sample_matrix};
use crate::ntt::inv_ntt;
use crate::params::common::N;
use crate::poly::{
    poly_cbd, poly_compress, poly_decompress, poly_from_mont, poly_reduce, poly_to_mont, Poly,
};
use crate::polyvec::PolyVec;
use zeroize::Zeroize;

/// Inner key generation.
///
/// Expands (rho ‖ sigma) = G(d ‖ k) — the rank byte is folded into the
/// seed expansion so the same d yields unrelated keys across levels —
/// samples A in evaluation order from rho and the secret and error vectors
/// from sigma, and computes t = A∘s + e.
///
/// Returns (ek, dk) where ek = pack12(t) ‖ rho and dk = pack12(s).
pub fn pke_keygen<const K: usize, const ETA1: usize>(d: &[u8; 32]) -> (Vec<u8>, Vec<u8>) {
    let mut g_input = [0u8; 33];
    g_input[..32].copy_from_slice(d);
    g_input[32] = K as u8;
    let g_output = hash_g(&g_input);

    let mut rho = [0u8; 32];
    let mut sigma = [0u8; 32];
    rho.copy_from_slice(&g_output[..32]);
    sigma.copy_from_slice(&g_output[32..]);

    let a: [[Poly; K]; K] = sample_matrix(&rho, false);

    let prf_len = 64 * ETA1;
    let mut s: PolyVec<K> = PolyVec::new();
    for i in 0..K {
        let mut stream = vec![0u8; prf_len];
        prf(&sigma, i as u8, &mut stream);
        s.polys[i] = poly_cbd(ETA1, &stream);
        stream.zeroize();
    }

    let mut e: PolyVec<K> = PolyVec::new();
    for i in 0..K {
        let mut stream = vec![0u8; prf_len];
        prf(&sigma, (K + i) as u8, &mut stream);
        e.polys[i] = poly_cbd(ETA1, &stream);
        stream.zeroize();
    }

    s.ntt();
    e.ntt();

    // t = A∘s + e, with the Montgomery factor from the base multiplication
    // compensated before the addition
    let mut t = matrix_vec_mul(&a, &s);
    t.to_mont();
    t.add_assign(&e);
    t.reduce_full();

    let mut ek = Vec::with_capacity(K * 384 + 32);
    ek.extend_from_slice(&t.to_bytes());
    ek.extend_from_slice(&rho);

    s.reduce_full();
    let dk = s.to_bytes();

    sigma.zeroize();
    s.zeroize();
    e.zeroize();

    (ek, dk)
}

/// Inner encryption of a 32-byte seed under randomness r.
///
/// u = A^T∘r_vec + e1; v = t·r_vec + e2 + Decompress1(m); the ciphertext is
/// Compress_du(u) ‖ Compress_dv(v).
pub fn pke_encrypt<
    const K: usize,
    const ETA1: usize,
    const ETA2: usize,
    const DU: usize,
    const DV: usize,
>(
    ek: &[u8],
    m: &[u8; 32],
    r: &[u8; 32],
) -> Vec<u8> {
    let t_bytes = &ek[..K * 384];
    let rho: &[u8; 32] = ek[K * 384..K * 384 + 32]
        .try_into()
        .expect("infallible: ek length checked by callers");

    let t: PolyVec<K> = PolyVec::from_bytes(t_bytes);
    let a_t: [[Poly; K]; K] = sample_matrix(rho, true);

    let prf_len1 = 64 * ETA1;
    let mut r_vec: PolyVec<K> = PolyVec::new();
    for i in 0..K {
        let mut stream = vec![0u8; prf_len1];
        prf(r, i as u8, &mut stream);
        r_vec.polys[i] = poly_cbd(ETA1, &stream);
        stream.zeroize();
    }

    let prf_len2 = 64 * ETA2;
    let mut e1: PolyVec<K> = PolyVec::new();
    for i in 0..K {
        let mut stream = vec![0u8; prf_len2];
        prf(r, (K + i) as u8, &mut stream);
        e1.polys[i] = poly_cbd(ETA2, &stream);
        stream.zeroize();
    }

    let mut e2_stream = vec![0u8; prf_len2];
    prf(r, (2 * K) as u8, &mut e2_stream);
    let e2 = poly_cbd(ETA2, &e2_stream);
    e2_stream.zeroize();

    r_vec.ntt();

    let mut u = matrix_vec_mul(&a_t, &r_vec);
    u.to_mont();
    u.inv_ntt();
    u.from_mont();
    u.add_assign(&e1);
    u.reduce();

    let mut v = t.inner_product(&r_vec);
    poly_to_mont(&mut v);
    inv_ntt(&mut v);
    poly_from_mont(&mut v);
    poly_reduce(&mut v);

    let mu = msg_to_poly(m);
    for i in 0..N {
        v.coeffs[i] = v.coeffs[i]
            .wrapping_add(e2.coeffs[i])
            .wrapping_add(mu.coeffs[i]);
    }
    poly_reduce(&mut v);

    let c1 = u.compress(DU);
    let mut c2 = vec![0u8; 32 * DV];
    poly_compress(&v, DV as u32, &mut c2);

    let mut ciphertext = Vec::with_capacity(c1.len() + c2.len());
    ciphertext.extend_from_slice(&c1);
    ciphertext.extend_from_slice(&c2);

    r_vec.zeroize();

    ciphertext
}

/// Inner decryption: recover the embedded seed.
///
/// w = Decompress_dv(c2) − s·NTT(Decompress_du(c1)), rounded channel-wise
/// to one bit per coefficient.
pub fn pke_decrypt<const K: usize, const DU: usize, const DV: usize>(
    dk: &[u8],
    c: &[u8],
) -> [u8; 32] {
    let c1_len = K * 32 * DU;
    let c1 = &c[..c1_len];
    let c2 = &c[c1_len..];

    let mut u: PolyVec<K> = PolyVec::decompress(c1, DU);
    let v = poly_decompress(c2, DV as u32);
    let mut s: PolyVec<K> = PolyVec::from_bytes(dk);

    u.ntt();
    let mut s_dot_u = s.inner_product(&u);
    poly_to_mont(&mut s_dot_u);
    inv_ntt(&mut s_dot_u);
    poly_from_mont(&mut s_dot_u);
    poly_reduce(&mut s_dot_u);

    let mut w = Poly::new();
    for i in 0..N {
        w.coeffs[i] = v.coeffs[i].wrapping_sub(s_dot_u.coeffs[i]);
    }
    poly_reduce(&mut w);

    let m = poly_to_msg(&w);

    s.zeroize();
    s_dot_u.zeroize();
    w.zeroize();

    m
}
