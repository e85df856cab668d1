//! Polynomial operations for the KEM ring R_q = Z_q\[X\]/(X^256 + 1).
//!
//! Coefficients are `i16` and may be in canonical, signed-centred, or
//! Montgomery form depending on the pipeline stage; conversions are at the
//! call sites. Compression, decompression, and centred-binomial sampling
//! live here alongside the arithmetic.

// Compression helpers cover all widths; not every parameter set uses all.
#![allow(dead_code)]
#![allow(clippy::needless_range_loop)]
#![allow(clippy::manual_range_contains)]

use crate::ntt::{basemul, ZETAS};
use crate::params::common::{N, Q};
use crate::reduce::{barrett_reduce, barrett_reduce_full};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// A polynomial with 256 coefficients.
///
/// The domain (coefficient vs evaluation order) is a convention tracked at
/// module boundaries: sampling for the public matrix produces evaluation
/// order directly, `ntt`/`inv_ntt` convert explicitly everywhere else.
#[derive(Clone, Zeroize)]
pub struct Poly {
    /// The 256 coefficients.
    pub coeffs: [i16; N],
}

impl Default for Poly {
    fn default() -> Self {
        Self { coeffs: [0i16; N] }
    }
}

impl Poly {
    /// Create a new zero polynomial.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a polynomial from a coefficient array.
    pub fn from_coeffs(coeffs: [i16; N]) -> Self {
        Self { coeffs }
    }
}

impl ConstantTimeEq for Poly {
    fn ct_eq(&self, other: &Self) -> Choice {
        let mut eq = Choice::from(1u8);
        for i in 0..N {
            eq &= self.coeffs[i].ct_eq(&other.coeffs[i]);
        }
        eq
    }
}

impl Poly {
    /// Constant-time conditional selection: `a` if `choice`, else `b`.
    pub fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut r = Poly::default();
        for i in 0..N {
            r.coeffs[i] = i16::conditional_select(&b.coeffs[i], &a.coeffs[i], choice);
        }
        r
    }
}

/// Add two polynomials coefficient-wise (no reduction).
pub fn poly_add(a: &Poly, b: &Poly) -> Poly {
    let mut r = Poly::default();
    for i in 0..N {
        r.coeffs[i] = a.coeffs[i] + b.coeffs[i];
    }
    r
}

/// Add polynomial `b` into `a`.
pub fn poly_add_assign(a: &mut Poly, b: &Poly) {
    for i in 0..N {
        a.coeffs[i] += b.coeffs[i];
    }
}

/// Subtract `b` from `a` coefficient-wise (no reduction).
pub fn poly_sub(a: &Poly, b: &Poly) -> Poly {
    let mut r = Poly::default();
    for i in 0..N {
        r.coeffs[i] = a.coeffs[i] - b.coeffs[i];
    }
    r
}

/// Pointwise product in evaluation order.
///
/// Both inputs must be in evaluation order; the result is too. The product
/// carries one inverse Montgomery factor from the base multiplications.
pub fn poly_basemul(a: &Poly, b: &Poly) -> Poly {
    let mut r = Poly::default();
    for i in 0..64 {
        let zeta = ZETAS[64 + i];
        basemul(
            &mut r.coeffs[4 * i..4 * i + 2],
            &a.coeffs[4 * i..4 * i + 2],
            &b.coeffs[4 * i..4 * i + 2],
            zeta,
        );
        basemul(
            &mut r.coeffs[4 * i + 2..4 * i + 4],
            &a.coeffs[4 * i + 2..4 * i + 4],
            &b.coeffs[4 * i + 2..4 * i + 4],
            -zeta,
        );
    }
    r
}

/// Accumulate a pointwise product: r += a * b (evaluation order).
pub fn poly_basemul_acc(r: &mut Poly, a: &Poly, b: &Poly) {
    for i in 0..64 {
        let zeta = ZETAS[64 + i];
        let mut tmp = [0i16; 2];
        basemul(
            &mut tmp,
            &a.coeffs[4 * i..4 * i + 2],
            &b.coeffs[4 * i..4 * i + 2],
            zeta,
        );
        r.coeffs[4 * i] = r.coeffs[4 * i].wrapping_add(tmp[0]);
        r.coeffs[4 * i + 1] = r.coeffs[4 * i + 1].wrapping_add(tmp[1]);
        basemul(
            &mut tmp,
            &a.coeffs[4 * i + 2..4 * i + 4],
            &b.coeffs[4 * i + 2..4 * i + 4],
            -zeta,
        );
        r.coeffs[4 * i + 2] = r.coeffs[4 * i + 2].wrapping_add(tmp[0]);
        r.coeffs[4 * i + 3] = r.coeffs[4 * i + 3].wrapping_add(tmp[1]);
    }
}

/// Barrett-reduce all coefficients.
pub fn poly_reduce(poly: &mut Poly) {
    for i in 0..N {
        poly.coeffs[i] = barrett_reduce(poly.coeffs[i]);
    }
}

/// Reduce all coefficients to canonical form [0, q-1].
pub fn poly_reduce_full(poly: &mut Poly) {
    for i in 0..N {
        poly.coeffs[i] = barrett_reduce_full(poly.coeffs[i]);
    }
}

/// Convert every coefficient out of Montgomery form.
pub fn poly_from_mont(poly: &mut Poly) {
    use crate::reduce::from_mont;
    for i in 0..N {
        poly.coeffs[i] = from_mont(poly.coeffs[i]);
    }
}

/// Convert every coefficient into Montgomery form.
///
/// Applied after a basemul pipeline stage to compensate the R^-1 factor.
pub fn poly_to_mont(poly: &mut Poly) {
    use crate::reduce::to_mont;
    for i in 0..N {
        poly.coeffs[i] = to_mont(poly.coeffs[i]);
    }
}

/// Compress a single coefficient to d bits.
///
/// round(2^d / q * x) mod 2^d, ties rounded up, mapping [0, q-1] onto
/// [0, 2^d - 1]. Lossy by construction.
#[inline]
pub fn compress(x: i16, d: u32) -> u16 {
    let x = if x < 0 { x + Q as i16 } else { x } as u32;
    let shifted = (x << d) + (Q as u32 / 2);
    let result = shifted / (Q as u32);
    (result & ((1 << d) - 1)) as u16
}

/// Decompress a d-bit value back to a coefficient.
///
/// round(q / 2^d * y); the composition with `compress` is the identity up
/// to an error of at most ceil(q / 2^(d+1)).
#[inline]
pub fn decompress(y: u16, d: u32) -> i16 {
    let y = y as u32;
    (((y * (Q as u32)) + (1 << (d - 1))) >> d) as i16
}

/// Compress a polynomial to d bits per coefficient into `out`.
pub fn poly_compress(poly: &Poly, d: u32, out: &mut [u8]) {
    match d {
        4 => poly_compress_4(poly, out),
        5 => poly_compress_5(poly, out),
        10 => poly_compress_10(poly, out),
        11 => poly_compress_11(poly, out),
        _ => unreachable!("unsupported compression width d={d}"),
    }
}

/// Decompress bytes into a polynomial at d bits per coefficient.
pub fn poly_decompress(bytes: &[u8], d: u32) -> Poly {
    match d {
        4 => poly_decompress_4(bytes),
        5 => poly_decompress_5(bytes),
        10 => poly_decompress_10(bytes),
        11 => poly_decompress_11(bytes),
        _ => unreachable!("unsupported decompression width d={d}"),
    }
}

fn poly_compress_4(poly: &Poly, out: &mut [u8]) {
    for i in 0..128 {
        let t0 = compress(poly.coeffs[2 * i], 4) as u8;
        let t1 = compress(poly.coeffs[2 * i + 1], 4) as u8;
        out[i] = t0 | (t1 << 4);
    }
}

fn poly_decompress_4(bytes: &[u8]) -> Poly {
    let mut poly = Poly::default();
    for i in 0..128 {
        poly.coeffs[2 * i] = decompress((bytes[i] & 0x0F) as u16, 4);
        poly.coeffs[2 * i + 1] = decompress((bytes[i] >> 4) as u16, 4);
    }
    poly
}

fn poly_compress_5(poly: &Poly, out: &mut [u8]) {
    for i in 0..32 {
        let mut t = [0u8; 8];
        for j in 0..8 {
            t[j] = compress(poly.coeffs[8 * i + j], 5) as u8;
        }
        out[5 * i] = t[0] | (t[1] << 5);
        out[5 * i + 1] = (t[1] >> 3) | (t[2] << 2) | (t[3] << 7);
        out[5 * i + 2] = (t[3] >> 1) | (t[4] << 4);
        out[5 * i + 3] = (t[4] >> 4) | (t[5] << 1) | (t[6] << 6);
        out[5 * i + 4] = (t[6] >> 2) | (t[7] << 3);
    }
}

fn poly_decompress_5(bytes: &[u8]) -> Poly {
    let mut poly = Poly::default();
    for i in 0..32 {
        let b = &bytes[5 * i..5 * i + 5];
        poly.coeffs[8 * i] = decompress((b[0] & 0x1F) as u16, 5);
        poly.coeffs[8 * i + 1] = decompress(((b[0] >> 5) | ((b[1] & 0x03) << 3)) as u16, 5);
        poly.coeffs[8 * i + 2] = decompress(((b[1] >> 2) & 0x1F) as u16, 5);
        poly.coeffs[8 * i + 3] = decompress(((b[1] >> 7) | ((b[2] & 0x0F) << 1)) as u16, 5);
        poly.coeffs[8 * i + 4] = decompress(((b[2] >> 4) | ((b[3] & 0x01) << 4)) as u16, 5);
        poly.coeffs[8 * i + 5] = decompress(((b[3] >> 1) & 0x1F) as u16, 5);
        poly.coeffs[8 * i + 6] = decompress(((b[3] >> 6) | ((b[4] & 0x07) << 2)) as u16, 5);
        poly.coeffs[8 * i + 7] = decompress((b[4] >> 3) as u16, 5);
    }
    poly
}

fn poly_compress_10(poly: &Poly, out: &mut [u8]) {
    for i in 0..64 {
        let mut t = [0u16; 4];
        for j in 0..4 {
            t[j] = compress(poly.coeffs[4 * i + j], 10);
        }
        out[5 * i] = t[0] as u8;
        out[5 * i + 1] = ((t[0] >> 8) | (t[1] << 2)) as u8;
        out[5 * i + 2] = ((t[1] >> 6) | (t[2] << 4)) as u8;
        out[5 * i + 3] = ((t[2] >> 4) | (t[3] << 6)) as u8;
        out[5 * i + 4] = (t[3] >> 2) as u8;
    }
}

fn poly_decompress_10(bytes: &[u8]) -> Poly {
    let mut poly = Poly::default();
    for i in 0..64 {
        let b = &bytes[5 * i..5 * i + 5];
        poly.coeffs[4 * i] = decompress((b[0] as u16) | ((b[1] as u16 & 0x03) << 8), 10);
        poly.coeffs[4 * i + 1] = decompress(((b[1] >> 2) as u16) | ((b[2] as u16 & 0x0F) << 6), 10);
        poly.coeffs[4 * i + 2] = decompress(((b[2] >> 4) as u16) | ((b[3] as u16 & 0x3F) << 4), 10);
        poly.coeffs[4 * i + 3] = decompress(((b[3] >> 6) as u16) | ((b[4] as u16) << 2), 10);
    }
    poly
}

fn poly_compress_11(poly: &Poly, out: &mut [u8]) {
    for i in 0..32 {
        let mut t = [0u16; 8];
        for j in 0..8 {
            t[j] = compress(poly.coeffs[8 * i + j], 11);
        }
        out[11 * i] = t[0] as u8;
        out[11 * i + 1] = ((t[0] >> 8) | (t[1] << 3)) as u8;
        out[11 * i + 2] = ((t[1] >> 5) | (t[2] << 6)) as u8;
        out[11 * i + 3] = (t[2] >> 2) as u8;
        out[11 * i + 4] = ((t[2] >> 10) | (t[3] << 1)) as u8;
        out[11 * i + 5] = ((t[3] >> 7) | (t[4] << 4)) as u8;
        out[11 * i + 6] = ((t[4] >> 4) | (t[5] << 7)) as u8;
        out[11 * i + 7] = (t[5] >> 1) as u8;
        out[11 * i + 8] = ((t[5] >> 9) | (t[6] << 2)) as u8;
        out[11 * i + 9] = ((t[6] >> 6) | (t[7] << 5)) as u8;
        out[11 * i + 10] = (t[7] >> 3) as u8;
    }
}

fn poly_decompress_11(bytes: &[u8]) -> Poly {
    let mut poly = Poly::default();
    for i in 0..32 {
        let b = &bytes[11 * i..11 * i + 11];
        poly.coeffs[8 * i] = decompress((b[0] as u16) | ((b[1] as u16 & 0x07) << 8), 11);
        poly.coeffs[8 * i + 1] = decompress(((b[1] >> 3) as u16) | ((b[2] as u16 & 0x3F) << 5), 11);
        poly.coeffs[8 * i + 2] = decompress(
            ((b[2] >> 6) as u16) | ((b[3] as u16) << 2) | ((b[4] as u16 & 0x01) << 10),
            11,
        );
        poly.coeffs[8 * i + 3] = decompress(((b[4] >> 1) as u16) | ((b[5] as u16 & 0x0F) << 7), 11);
        poly.coeffs[8 * i + 4] = decompress(((b[5] >> 4) as u16) | ((b[6] as u16 & 0x7F) << 4), 11);
        poly.coeffs[8 * i + 5] = decompress(
            ((b[6] >> 7) as u16) | ((b[7] as u16) << 1) | ((b[8] as u16 & 0x03) << 9),
            11,
        );
        poly.coeffs[8 * i + 6] = decompress(((b[8] >> 2) as u16) | ((b[9] as u16 & 0x1F) << 6), 11);
        poly.coeffs[8 * i + 7] = decompress(((b[9] >> 5) as u16) | ((b[10] as u16) << 3), 11);
    }
    poly
}

/// Sample a polynomial from the centred binomial distribution.
///
/// Each coefficient is the difference of two sums of eta bits drawn from
/// the PRF stream; the result lands in [-eta, eta] with variance eta/2.
/// Requires 64*eta bytes of input.
pub fn poly_cbd(eta: usize, bytes: &[u8]) -> Poly {
    let mut poly = Poly::default();
    match eta {
        2 => poly_cbd2(&mut poly, bytes),
        3 => poly_cbd3(&mut poly, bytes),
        _ => unreachable!("unsupported eta value {eta}"),
    }
    poly
}

/// eta = 2: 4 bits per coefficient, 128 bytes total.
fn poly_cbd2(poly: &mut Poly, bytes: &[u8]) {
    for i in 0..128 {
        let t = bytes[i] as u32;

        // popcount of each bit pair
        let d = (t & 0x55) + ((t >> 1) & 0x55);

        let a = (d & 0x3) as i16;
        let b = ((d >> 2) & 0x3) as i16;
        poly.coeffs[2 * i] = a - b;

        let a = ((d >> 4) & 0x3) as i16;
        let b = ((d >> 6) & 0x3) as i16;
        poly.coeffs[2 * i + 1] = a - b;
    }
}

/// eta = 3: 6 bits per coefficient, 192 bytes total.
fn poly_cbd3(poly: &mut Poly, bytes: &[u8]) {
    for i in 0..64 {
        let t = (bytes[3 * i] as u32)
            | ((bytes[3 * i + 1] as u32) << 8)
            | ((bytes[3 * i + 2] as u32) << 16);

        // popcount of each bit triple
        let d = (t & 0x249249) + ((t >> 1) & 0x249249) + ((t >> 2) & 0x249249);

        for j in 0..4 {
            let a = ((d >> (6 * j)) & 0x7) as i16;
            let b = ((d >> (6 * j + 3)) & 0x7) as i16;
            poly.coeffs[4 * i + j] = a - b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poly_add_sub() {
        let mut a = Poly::default();
        let mut b = Poly::default();
        for i in 0..N {
            a.coeffs[i] = (2 * i) as i16;
            b.coeffs[i] = i as i16;
        }
        let sum = poly_add(&a, &b);
        let diff = poly_sub(&a, &b);
        for i in 0..N {
            assert_eq!(sum.coeffs[i], (3 * i) as i16);
            assert_eq!(diff.coeffs[i], i as i16);
        }
    }

    #[test]
    fn test_compress_error_bound() {
        for d in [4u32, 5, 10, 11] {
            let max_error = ((Q as i32) + (1 << (d + 1)) - 1) / (1 << (d + 1));
            for x in (0..Q as i16).step_by(37) {
                let y = decompress(compress(x, d), d);
                // distance in the cyclic sense; plain distance suffices away
                // from the wrap boundary
                let err = {
                    let direct = ((x as i32) - (y as i32)).abs();
                    let wrapped = (Q as i32) - direct;
                    direct.min(wrapped)
                };
                assert!(
                    err <= max_error,
                    "d={d}, x={x}: decompressed {y}, error {err} > {max_error}"
                );
            }
        }
    }

    #[test]
    fn test_compress_output_range() {
        for d in [4u32, 5, 10, 11] {
            for x in (0..Q as i16).step_by(101) {
                assert!(compress(x, d) < (1 << d));
            }
        }
    }

    #[test]
    fn test_poly_compress_widths() {
        let mut poly = Poly::default();
        for i in 0..N {
            poly.coeffs[i] = ((i * 17) % Q as usize) as i16;
        }
        let mut out10 = [0u8; 320];
        poly_compress(&poly, 10, &mut out10);
        let back = poly_decompress(&out10, 10);
        let max_error = ((Q as i32) + 2048 - 1) / 2048;
        for i in 0..N {
            let err = ((poly.coeffs[i] as i32) - (back.coeffs[i] as i32)).abs();
            assert!(err <= max_error, "index {i}: error {err}");
        }
    }

    #[test]
    fn test_cbd2_zero_and_ones() {
        // all-zero input: both bit sums are zero
        let poly = poly_cbd(2, &[0u8; 128]);
        assert!(poly.coeffs.iter().all(|&c| c == 0));
        // all-one input: both bit sums are maximal, difference still zero
        let poly = poly_cbd(2, &[0xFFu8; 128]);
        assert!(poly.coeffs.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_cbd_ranges() {
        let bytes2: [u8; 128] = core::array::from_fn(|i| (i * 37) as u8);
        for &c in &poly_cbd(2, &bytes2).coeffs {
            assert!(c >= -2 && c <= 2);
        }
        let bytes3: [u8; 192] = core::array::from_fn(|i| (i * 41) as u8);
        for &c in &poly_cbd(3, &bytes3).coeffs {
            assert!(c >= -3 && c <= 3);
        }
    }

    #[test]
    fn test_basemul_commutes() {
        use crate::ntt::ntt;
        use crate::reduce::to_mont;

        let mut a = Poly::default();
        let mut b = Poly::default();
        for i in 0..N {
            a.coeffs[i] = to_mont(((i * 17) % Q as usize) as i16);
            b.coeffs[i] = to_mont(((i * 31) % Q as usize) as i16);
        }
        ntt(&mut a);
        ntt(&mut b);

        let ab = poly_basemul(&a, &b);
        let ba = poly_basemul(&b, &a);
        for i in 0..N {
            assert_eq!(
                barrett_reduce_full(ab.coeffs[i]),
                barrett_reduce_full(ba.coeffs[i]),
                "not commutative at index {i}"
            );
        }
    }

    #[test]
    fn test_conditional_select_and_ct_eq() {
        let mut a = Poly::default();
        let mut b = Poly::default();
        for i in 0..N {
            a.coeffs[i] = 1;
            b.coeffs[i] = 2;
        }
        let picked = Poly::conditional_select(&a, &b, Choice::from(1u8));
        assert!(bool::from(picked.ct_eq(&a)));
        let picked = Poly::conditional_select(&a, &b, Choice::from(0u8));
        assert!(bool::from(picked.ct_eq(&b)));
        assert!(!bool::from(a.ct_eq(&b)));
    }
}
