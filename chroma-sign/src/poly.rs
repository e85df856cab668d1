//! Polynomial arithmetic for the signature ring R_q = Z_q[X]/(X^256 + 1),
//! q = 8380417.

use crate::ntt::{inv_ntt, ntt};
use crate::reduce::{caddq, centred_reduce, freeze, montgomery_mul, reduce32};
use subtle::{Choice, ConstantTimeLess};
use zeroize::Zeroize;

/// Ring dimension.
pub const N: usize = 256;

/// A polynomial with 256 coefficients in Z_q.
#[derive(Clone, Zeroize)]
pub struct Poly {
    /// Coefficients; canonical, signed, or Montgomery form by pipeline stage.
    pub coeffs: [i32; N],
}

impl Default for Poly {
    fn default() -> Self {
        Self::zero()
    }
}

impl Poly {
    /// Create a zero polynomial.
    #[inline]
    pub const fn zero() -> Self {
        Self { coeffs: [0; N] }
    }

    /// Create a polynomial from coefficients.
    #[inline]
    pub const fn new(coeffs: [i32; N]) -> Self {
        Self { coeffs }
    }

    /// Barrett-reduce all coefficients to canonical form.
    pub fn reduce(&mut self) {
        for c in &mut self.coeffs {
            *c = reduce32(*c);
        }
    }

    /// Freeze all coefficients to [0, q-1].
    pub fn freeze(&mut self) {
        for c in &mut self.coeffs {
            *c = freeze(*c);
        }
    }

    /// Conditional add q on every coefficient.
    pub fn caddq(&mut self) {
        for c in &mut self.coeffs {
            *c = caddq(*c);
        }
    }

    /// Forward NTT, in place.
    pub fn ntt(&mut self) {
        ntt(&mut self.coeffs);
    }

    /// Inverse NTT, in place (output in Montgomery form).
    pub fn inv_ntt(&mut self) {
        inv_ntt(&mut self.coeffs);
    }

    /// Coefficient-wise sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..N {
            r.coeffs[i] = self.coeffs[i] + other.coeffs[i];
        }
        r
    }

    /// Add another polynomial in place.
    pub fn add_assign(&mut self, other: &Self) {
        for i in 0..N {
            self.coeffs[i] += other.coeffs[i];
        }
    }

    /// Coefficient-wise difference.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..N {
            r.coeffs[i] = self.coeffs[i] - other.coeffs[i];
        }
        r
    }

    /// Pointwise Montgomery product in evaluation order.
    #[must_use]
    pub fn pointwise_mul(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..N {
            r.coeffs[i] = montgomery_mul(self.coeffs[i], other.coeffs[i]);
        }
        r
    }

    /// Constant-time infinity-norm check: every |coefficient| < bound.
    ///
    /// Coefficients are frozen and centred before taking the magnitude, so
    /// any representative form is accepted. No early return: the result
    /// accumulates as a [`Choice`] over all 256 coefficients.
    pub fn check_norm_ct(&self, bound: i32) -> Choice {
        let mut ok = Choice::from(1u8);
        for &c in &self.coeffs {
            let centred = centred_reduce(freeze(c));
            // branch-free |centred|
            let mask = centred >> 31;
            let magnitude = (centred ^ mask) - mask;
            ok &= (magnitude as u32).ct_lt(&(bound as u32));
        }
        ok
    }

    /// Infinity-norm check as a plain boolean (public-data call sites).
    pub fn check_norm(&self, bound: i32) -> bool {
        bool::from(self.check_norm_ct(bound))
    }
}
