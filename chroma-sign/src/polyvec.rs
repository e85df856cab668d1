//! Polynomial vectors and the public matrix for the signature scheme.

use crate::ntt::pointwise_acc;
use crate::poly::Poly;
use subtle::Choice;
use zeroize::Zeroize;

/// Vector of K polynomials (rows side).
#[derive(Clone, Zeroize)]
pub struct PolyVecK<const K: usize> {
    /// The K polynomials.
    pub polys: [Poly; K],
}

impl<const K: usize> Default for PolyVecK<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> PolyVecK<K> {
    /// Create a zero vector.
    pub fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::zero()),
        }
    }

    /// Forward NTT on all polynomials.
    pub fn ntt(&mut self) {
        for p in &mut self.polys {
            p.ntt();
        }
    }

    /// Inverse NTT on all polynomials.
    pub fn inv_ntt(&mut self) {
        for p in &mut self.polys {
            p.inv_ntt();
        }
    }

    /// Element-wise sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..K {
            r.polys[i] = self.polys[i].add(&other.polys[i]);
        }
        r
    }

    /// Add in place.
    pub fn add_assign(&mut self, other: &Self) {
        for i in 0..K {
            self.polys[i].add_assign(&other.polys[i]);
        }
    }

    /// Element-wise difference.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..K {
            r.polys[i] = self.polys[i].sub(&other.polys[i]);
        }
        r
    }

    /// Reduce all coefficients.
    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// Freeze all coefficients to [0, q-1].
    pub fn freeze(&mut self) {
        for p in &mut self.polys {
            p.freeze();
        }
    }

    /// Conditional add q on all coefficients.
    pub fn caddq(&mut self) {
        for p in &mut self.polys {
            p.caddq();
        }
    }

    /// Constant-time infinity-norm check across the whole vector.
    ///
    /// No early return: a [`Choice`] accumulates over every polynomial and
    /// converts to `bool` once at the end.
    pub fn check_norm(&self, bound: i32) -> bool {
        let mut pass = Choice::from(1u8);
        for p in &self.polys {
            pass &= p.check_norm_ct(bound);
        }
        bool::from(pass)
    }
}

/// Vector of L polynomials (columns side).
#[derive(Clone, Zeroize)]
pub struct PolyVecL<const L: usize> {
    /// The L polynomials.
    pub polys: [Poly; L],
}

impl<const L: usize> Default for PolyVecL<L> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const L: usize> PolyVecL<L> {
    /// Create a zero vector.
    pub fn zero() -> Self {
        Self {
            polys: core::array::from_fn(|_| Poly::zero()),
        }
    }

    /// Forward NTT on all polynomials.
    pub fn ntt(&mut self) {
        for p in &mut self.polys {
            p.ntt();
        }
    }

    /// Inverse NTT on all polynomials.
    pub fn inv_ntt(&mut self) {
        for p in &mut self.polys {
            p.inv_ntt();
        }
    }

    /// Element-wise sum.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let mut r = Self::zero();
        for i in 0..L {
            r.polys[i] = self.polys[i].add(&other.polys[i]);
        }
        r
    }

    /// Reduce all coefficients.
    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// Freeze all coefficients to [0, q-1].
    pub fn freeze(&mut self) {
        for p in &mut self.polys {
            p.freeze();
        }
    }

    /// Conditional add q on all coefficients.
    pub fn caddq(&mut self) {
        for p in &mut self.polys {
            p.caddq();
        }
    }

    /// Constant-time infinity-norm check across the whole vector.
    pub fn check_norm(&self, bound: i32) -> bool {
        let mut pass = Choice::from(1u8);
        for p in &self.polys {
            pass &= p.check_norm_ct(bound);
        }
        bool::from(pass)
    }
}

/// The K x L public matrix in evaluation order.
pub struct Matrix<const K: usize, const L: usize> {
    /// Row vectors.
    pub rows: [PolyVecL<L>; K],
}

impl<const K: usize, const L: usize> Matrix<K, L> {
    /// Create a zero matrix.
    pub fn zero() -> Self {
        Self {
            rows: core::array::from_fn(|_| PolyVecL::zero()),
        }
    }

    /// Matrix-vector product in evaluation order: t = A * s.
    pub fn mul_vec(&self, s: &PolyVecL<L>) -> PolyVecK<K> {
        let mut t = PolyVecK::zero();

        for i in 0..K {
            for j in 0..L {
                pointwise_acc(
                    &mut t.polys[i].coeffs,
                    &self.rows[i].polys[j].coeffs,
                    &s.polys[j].coeffs,
                );
            }
        }

        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_sub() {
        let mut v1 = PolyVecK::<4>::zero();
        let mut v2 = PolyVecK::<4>::zero();

        v1.polys[0].coeffs[0] = 100;
        v2.polys[0].coeffs[0] = 50;

        assert_eq!(v1.add(&v2).polys[0].coeffs[0], 150);
        assert_eq!(v1.sub(&v2).polys[0].coeffs[0], 50);
    }

    #[test]
    fn test_check_norm_over_vector() {
        let mut v = PolyVecK::<4>::zero();
        assert!(v.check_norm(1));

        v.polys[3].coeffs[200] = 100;
        assert!(v.check_norm(101));
        assert!(!v.check_norm(100));
    }

    #[test]
    fn test_mul_vec_zero() {
        let a = Matrix::<2, 3>::zero();
        let mut s = PolyVecL::<3>::zero();
        s.polys[0].coeffs[0] = 12345;
        let t = a.mul_vec(&s);
        for p in &t.polys {
            assert!(p.coeffs.iter().all(|&c| c == 0));
        }
    }
}
