//! The NTT engine capability.
//!
//! A small set of transform operations behind a backend chosen once at
//! construction. The pure-scalar backend is authoritative; vector backends
//! are optional performance variants that must be byte-identical to scalar
//! before they may be enabled, and requesting one that is not built returns
//! [`Error::UnsupportedCapability`]. Tests pin the scalar backend.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::ntt::{bit_reverse_pairs, inv_ntt, ntt};
use crate::poly::{poly_basemul, poly_from_mont, poly_reduce, poly_to_mont, Poly};
use chroma_core::{CpuFeatures, Error, Result};

/// Selectable NTT backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NttBackend {
    /// Portable scalar implementation (always available, authoritative).
    #[default]
    Scalar,
    /// 128-bit SIMD (x86 SSE class).
    Simd128,
    /// 256-bit SIMD (x86 AVX2 class).
    Simd256,
    /// 512-bit SIMD (x86 AVX-512 class).
    Simd512,
    /// ARM NEON.
    Neon,
    /// RISC-V vector extension.
    Rvv,
    /// PowerPC VSX.
    Vsx,
}

/// Transform engine with a backend fixed at construction.
///
/// Concurrent read-only use from multiple threads is safe; the engine holds
/// no mutable state.
#[derive(Debug, Clone, Copy)]
pub struct NttEngine {
    backend: NttBackend,
}

impl Default for NttEngine {
    fn default() -> Self {
        Self::scalar()
    }
}

impl NttEngine {
    /// Construct an engine with the scalar backend.
    pub const fn scalar() -> Self {
        Self {
            backend: NttBackend::Scalar,
        }
    }

    /// Construct an engine with an explicitly requested backend.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedCapability`] if the backend is not built into
    /// this binary. Only the scalar backend currently is; the variants
    /// exist so callers can express a preference and fail closed.
    pub fn new(backend: NttBackend) -> Result<Self> {
        match backend {
            NttBackend::Scalar => Ok(Self::scalar()),
            _ => Err(Error::UnsupportedCapability),
        }
    }

    /// Select the best built backend for the probed CPU.
    ///
    /// Backend choice never changes results, only speed, so falling back
    /// to scalar on any probe outcome is always correct.
    pub fn from_features(_features: &CpuFeatures) -> Self {
        Self::scalar()
    }

    /// The backend this engine was constructed with.
    pub const fn backend(&self) -> NttBackend {
        self.backend
    }

    /// Forward transform, in place.
    pub fn forward(&self, poly: &mut Poly) {
        ntt(poly);
    }

    /// Inverse transform, in place.
    pub fn inverse(&self, poly: &mut Poly) {
        inv_ntt(poly);
    }

    /// Negacyclic product of two coefficient-domain polynomials.
    ///
    /// Forward-transforms both inputs, multiplies pointwise, and
    /// inverse-transforms the product; the output is canonical-reduced.
    pub fn multiply(&self, a: &Poly, b: &Poly) -> Poly {
        let mut a_hat = a.clone();
        let mut b_hat = b.clone();
        self.forward(&mut a_hat);
        self.forward(&mut b_hat);

        let mut r = poly_basemul(&a_hat, &b_hat);
        poly_to_mont(&mut r);
        self.inverse(&mut r);
        poly_from_mont(&mut r);
        poly_reduce(&mut r);
        r
    }

    /// Element-wise products of two equal-length slices of polynomials.
    ///
    /// Semantically identical to mapping [`Self::multiply`]; vector
    /// backends may batch the transforms.
    pub fn batch_multiply(&self, lhs: &[Poly], rhs: &[Poly]) -> Vec<Poly> {
        debug_assert_eq!(lhs.len(), rhs.len());
        lhs.iter()
            .zip(rhs.iter())
            .map(|(a, b)| self.multiply(a, b))
            .collect()
    }

    /// In-place bit-reversal of the evaluation-order pairs.
    pub fn bit_reverse(&self, poly: &mut Poly) {
        bit_reverse_pairs(poly);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::common::{N, Q};
    use crate::reduce::{barrett_reduce_full, from_mont};

    #[test]
    fn test_only_scalar_is_built() {
        assert!(NttEngine::new(NttBackend::Scalar).is_ok());
        for backend in [
            NttBackend::Simd128,
            NttBackend::Simd256,
            NttBackend::Simd512,
            NttBackend::Neon,
            NttBackend::Rvv,
            NttBackend::Vsx,
        ] {
            assert_eq!(
                NttEngine::new(backend).unwrap_err(),
                Error::UnsupportedCapability
            );
        }
    }

    #[test]
    fn test_from_features_always_resolves() {
        let engine = NttEngine::from_features(&CpuFeatures::detect());
        assert_eq!(engine.backend(), NttBackend::Scalar);
        let engine = NttEngine::from_features(&CpuFeatures::scalar_only());
        assert_eq!(engine.backend(), NttBackend::Scalar);
    }

    #[test]
    fn test_forward_inverse_identity() {
        let engine = NttEngine::scalar();
        let mut poly = Poly::new();
        for i in 0..N {
            poly.coeffs[i] = (i as i16 * 7) % Q as i16;
        }
        let original = poly.clone();

        engine.forward(&mut poly);
        engine.inverse(&mut poly);

        for i in 0..N {
            let got = barrett_reduce_full(from_mont(poly.coeffs[i]));
            assert_eq!(got, original.coeffs[i], "identity failed at {i}");
        }
    }

    #[test]
    fn test_multiply_by_one() {
        let engine = NttEngine::scalar();
        let mut one = Poly::new();
        one.coeffs[0] = 1;
        let mut a = Poly::new();
        for i in 0..N {
            a.coeffs[i] = ((i * 3) % 17) as i16;
        }

        let product = engine.multiply(&a, &one);
        for i in 0..N {
            assert_eq!(
                barrett_reduce_full(product.coeffs[i]),
                barrett_reduce_full(a.coeffs[i]),
                "multiply by 1 changed coefficient {i}"
            );
        }
    }

    #[test]
    fn test_multiply_negacyclic_wrap() {
        // X^255 * X = X^256 = -1 in the negacyclic ring
        let engine = NttEngine::scalar();
        let mut x255 = Poly::new();
        x255.coeffs[255] = 1;
        let mut x = Poly::new();
        x.coeffs[1] = 1;

        let product = engine.multiply(&x255, &x);
        assert_eq!(barrett_reduce_full(product.coeffs[0]), (Q - 1) as i16);
        for i in 1..N {
            assert_eq!(barrett_reduce_full(product.coeffs[i]), 0, "index {i}");
        }
    }

    #[test]
    fn test_batch_multiply_matches_loop() {
        let engine = NttEngine::scalar();
        let mut a = Poly::new();
        let mut b = Poly::new();
        for i in 0..N {
            a.coeffs[i] = (i % 5) as i16;
            b.coeffs[i] = (i % 7) as i16;
        }
        let batch = engine.batch_multiply(&[a.clone(), b.clone()], &[b.clone(), a.clone()]);
        let ab = engine.multiply(&a, &b);
        let ba = engine.multiply(&b, &a);
        assert_eq!(batch[0].coeffs, ab.coeffs);
        assert_eq!(batch[1].coeffs, ba.coeffs);
    }
}
