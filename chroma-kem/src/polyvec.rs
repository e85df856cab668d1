//! Vectors of KEM polynomials.

// Vector helpers used across the pipeline; some unused in narrow configs.
#![allow(dead_code)]
#![allow(clippy::wrong_self_convention)]

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::encode::{poly_from_bytes, poly_to_bytes};
use crate::ntt::{inv_ntt, ntt};
use crate::poly::{
    poly_add_assign, poly_basemul_acc, poly_compress, poly_decompress, poly_from_mont, poly_reduce,
    poly_reduce_full, poly_to_mont, Poly,
};
use zeroize::Zeroize;

/// A vector of K polynomials, all in the same domain.
#[derive(Clone)]
pub struct PolyVec<const K: usize> {
    /// The K polynomials in the vector.
    pub polys: [Poly; K],
}

impl<const K: usize> Default for PolyVec<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const K: usize> Zeroize for PolyVec<K> {
    fn zeroize(&mut self) {
        for poly in &mut self.polys {
            poly.zeroize();
        }
    }
}

impl<const K: usize> PolyVec<K> {
    /// Create a new zero vector.
    pub fn new() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::new()),
        }
    }

    /// Forward NTT on every polynomial.
    pub fn ntt(&mut self) {
        for poly in &mut self.polys {
            ntt(poly);
        }
    }

    /// Inverse NTT on every polynomial.
    pub fn inv_ntt(&mut self) {
        for poly in &mut self.polys {
            inv_ntt(poly);
        }
    }

    /// Barrett-reduce all coefficients.
    pub fn reduce(&mut self) {
        for poly in &mut self.polys {
            poly_reduce(poly);
        }
    }

    /// Reduce all coefficients to canonical form [0, q-1].
    pub fn reduce_full(&mut self) {
        for poly in &mut self.polys {
            poly_reduce_full(poly);
        }
    }

    /// Convert every polynomial into Montgomery form.
    pub fn to_mont(&mut self) {
        for poly in &mut self.polys {
            poly_to_mont(poly);
        }
    }

    /// Convert every polynomial out of Montgomery form.
    pub fn from_mont(&mut self) {
        for poly in &mut self.polys {
            poly_from_mont(poly);
        }
    }

    /// Add another vector element-wise in place.
    pub fn add_assign(&mut self, other: &Self) {
        for i in 0..K {
            poly_add_assign(&mut self.polys[i], &other.polys[i]);
        }
    }

    /// Inner product in evaluation order: sum_i self\[i\] * other\[i\].
    pub fn inner_product(&self, other: &Self) -> Poly {
        let mut r = Poly::new();
        for i in 0..K {
            poly_basemul_acc(&mut r, &self.polys[i], &other.polys[i]);
        }
        r
    }

    /// Serialise the vector at 12 bits per coefficient.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(K * 384);
        for poly in &self.polys {
            out.extend_from_slice(&poly_to_bytes(poly));
        }
        out
    }

    /// Deserialise a vector packed at 12 bits per coefficient.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut v = Self::new();
        for (i, chunk) in bytes.chunks_exact(384).take(K).enumerate() {
            v.polys[i] = poly_from_bytes(chunk);
        }
        v
    }

    /// Compress the vector at d bits per coefficient.
    pub fn compress(&self, d: usize) -> Vec<u8> {
        let per_poly = 32 * d;
        let mut out = vec![0u8; K * per_poly];
        for (i, poly) in self.polys.iter().enumerate() {
            poly_compress(poly, d as u32, &mut out[i * per_poly..(i + 1) * per_poly]);
        }
        out
    }

    /// Decompress a vector packed at d bits per coefficient.
    pub fn decompress(bytes: &[u8], d: usize) -> Self {
        let per_poly = 32 * d;
        let mut v = Self::new();
        for (i, chunk) in bytes.chunks_exact(per_poly).take(K).enumerate() {
            v.polys[i] = poly_decompress(chunk, d as u32);
        }
        v
    }
}
