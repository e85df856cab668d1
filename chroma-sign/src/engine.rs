//! The NTT engine capability for the signature ring.
//!
//! Same contract as the KEM engine: a backend fixed at construction, the
//! scalar path authoritative, vector backends admissible only after
//! byte-identical differential testing, and a fail-closed error for
//! backends that are not built.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::ntt::{bit_reverse, inv_ntt, ntt};
use crate::poly::Poly;
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
    /// this binary.
    pub fn new(backend: NttBackend) -> Result<Self> {
        match backend {
            NttBackend::Scalar => Ok(Self::scalar()),
            _ => Err(Error::UnsupportedCapability),
        }
    }

    /// Select the best built backend for the probed CPU.
    pub fn from_features(_features: &CpuFeatures) -> Self {
        Self::scalar()
    }

    /// The backend this engine was constructed with.
    pub const fn backend(&self) -> NttBackend {
        self.backend
    }

    /// Forward transform, in place.
    pub fn forward(&self, poly: &mut Poly) {
        ntt(&mut poly.coeffs);
    }

    /// Inverse transform, in place.
    ///
    /// Output carries the Montgomery factor from the folded n^(-1)
    /// scaling; [`Self::multiply`] accounts for it internally.
    pub fn inverse(&self, poly: &mut Poly) {
        inv_ntt(&mut poly.coeffs);
    }

    /// Negacyclic product of two coefficient-domain polynomials.
    ///
    /// The Montgomery factors of the pointwise step and the inverse
    /// transform cancel, so the result is in standard form, canonical.
    pub fn multiply(&self, a: &Poly, b: &Poly) -> Poly {
        let mut a_hat = a.clone();
        let mut b_hat = b.clone();
        self.forward(&mut a_hat);
        self.forward(&mut b_hat);

        let mut r = a_hat.pointwise_mul(&b_hat);
        r.reduce();
        self.inverse(&mut r);
        r.reduce();
        r.caddq();
        r
    }

    /// Element-wise products of two equal-length slices of polynomials.
    pub fn batch_multiply(&self, lhs: &[Poly], rhs: &[Poly]) -> Vec<Poly> {
        debug_assert_eq!(lhs.len(), rhs.len());
        lhs.iter()
            .zip(rhs.iter())
            .map(|(a, b)| self.multiply(a, b))
            .collect()
    }

    /// In-place bit-reversal of the 256 evaluation slots.
    pub fn bit_reverse(&self, poly: &mut Poly) {
        bit_reverse(&mut poly.coeffs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poly::N;
    use crate::reduce::{freeze, Q};

    #[test]
    fn test_backend_availability() {
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
        assert_eq!(
            NttEngine::from_features(&CpuFeatures::detect()).backend(),
            NttBackend::Scalar
        );
    }

    #[test]
    fn test_multiply_by_constant() {
        // multiplying by the constant polynomial 2 doubles everything
        let engine = NttEngine::scalar();
        let mut two = Poly::zero();
        two.coeffs[0] = 2;
        let mut a = Poly::zero();
        for i in 0..N {
            a.coeffs[i] = (i as i32 * 19) % 1000;
        }

        let product = engine.multiply(&a, &two);
        for i in 0..N {
            assert_eq!(freeze(product.coeffs[i]), freeze(2 * a.coeffs[i]), "at {i}");
        }
    }

    #[test]
    fn test_multiply_negacyclic_wrap() {
        // X^255 * X^2 = -X in the negacyclic ring
        let engine = NttEngine::scalar();
        let mut x255 = Poly::zero();
        x255.coeffs[255] = 1;
        let mut x2 = Poly::zero();
        x2.coeffs[2] = 1;

        let product = engine.multiply(&x255, &x2);
        assert_eq!(freeze(product.coeffs[1]), Q - 1);
        for i in (0..N).filter(|&i| i != 1) {
            assert_eq!(freeze(product.coeffs[i]), 0, "index {i}");
        }
    }

    #[test]
    fn test_batch_matches_single() {
        let engine = NttEngine::scalar();
        let mut a = Poly::zero();
        let mut b = Poly::zero();
        for i in 0..N {
            a.coeffs[i] = (i as i32) % 9;
            b.coeffs[i] = (i as i32) % 11;
        }
        let batch = engine.batch_multiply(&[a.clone()], &[b.clone()]);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].coeffs, engine.multiply(&a, &b).coeffs);
    }
}
