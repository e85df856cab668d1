//! Canonical bit-packed serialisation for KEM polynomials.
//!
//! Coefficients pack little-endian to exactly d bits, within and across
//! bytes: byte 0 holds the low 8 bits of coefficient 0. Vector packings
//! are the concatenation of per-polynomial packings. The 12-bit width is
//! the uncompressed key encoding; narrower widths serve the ciphertext
//! compression schedule and the 1-bit message embedding.

// Encoding helpers for all widths; not every parameter set uses all.
#![allow(dead_code)]
#![allow(clippy::needless_range_loop)]

use crate::params::common::Q;
use crate::poly::Poly;
use subtle::{Choice, ConstantTimeLess};

/// Unpack two 12-bit coefficients from a 3-byte chunk.
///
/// Layout: `c0 = b0 | ((b1 & 0x0F) << 8)`, `c1 = (b1 >> 4) | (b2 << 4)`.
#[inline]
fn unpack_12bit_coeffs(chunk: &[u8]) -> (u16, u16) {
    debug_assert_eq!(chunk.len(), 3);
    let b0 = chunk[0] as u16;
    let b1 = chunk[1] as u16;
    let b2 = chunk[2] as u16;
    (b0 | ((b1 & 0x0F) << 8), (b1 >> 4) | (b2 << 4))
}

/// Encode a polynomial at 12 bits per coefficient (384 bytes).
///
/// Coefficients must be canonical in [0, q-1].
pub fn poly_to_bytes(poly: &Poly) -> [u8; 384] {
    let mut bytes = [0u8; 384];

    for i in 0..128 {
        let c0 = poly.coeffs[2 * i] as u16;
        let c1 = poly.coeffs[2 * i + 1] as u16;

        bytes[3 * i] = c0 as u8;
        bytes[3 * i + 1] = ((c0 >> 8) | (c1 << 4)) as u8;
        bytes[3 * i + 2] = (c1 >> 4) as u8;
    }

    bytes
}

/// Decode 384 bytes into a polynomial at 12 bits per coefficient.
///
/// Coefficients are reduced mod q. Callers that require strict validation
/// run [`check_modulus`] on the byte stream first; this decoder also serves
/// secret-key material where the reduction is the defined behaviour.
pub fn poly_from_bytes(bytes: &[u8]) -> Poly {
    let mut poly = Poly::new();

    for (i, chunk) in bytes.chunks_exact(3).take(128).enumerate() {
        let (c0, c1) = unpack_12bit_coeffs(chunk);
        poly.coeffs[2 * i] = (c0 % Q) as i16;
        poly.coeffs[2 * i + 1] = (c1 % Q) as i16;
    }

    poly
}

/// Embed a 32-byte seed as a polynomial.
///
/// Bit b of the seed becomes coefficient b * round(q/2): the 1-bit
/// decompression used by the encryption step.
pub fn msg_to_poly(m: &[u8; 32]) -> Poly {
    let mut poly = Poly::new();
    let half_q = ((Q as i16) + 1) / 2; // 1665

    for i in 0..32 {
        for j in 0..8 {
            let bit = (m[i] >> j) & 1;
            poly.coeffs[8 * i + j] = if bit == 1 { half_q } else { 0 };
        }
    }

    poly
}

/// Round a noisy polynomial back to the embedded 32-byte seed.
///
/// Each coefficient compresses to one bit: closer to q/2 reads as 1,
/// closer to 0 or q reads as 0.
pub fn poly_to_msg(poly: &Poly) -> [u8; 32] {
    let mut m = [0u8; 32];
    let half_q = (Q as i16) / 2; // 1664

    for i in 0..32 {
        for j in 0..8 {
            let c = poly.coeffs[8 * i + j];
            let c = if c < 0 { c + Q as i16 } else { c };
            let bit = if c > half_q / 2 && c < Q as i16 - half_q / 2 {
                1u8
            } else {
                0u8
            };
            m[i] |= bit << j;
        }
    }

    m
}

/// Check that every 12-bit coefficient of an encapsulation key is < q.
///
/// Runs before encapsulation uses untrusted key bytes. The scan is
/// constant-time over the coefficient values (the up-front length and
/// alignment checks depend only on public lengths).
pub(crate) fn check_modulus(ek: &[u8]) -> bool {
    // ek = one or more 384-byte polynomials followed by the 32-byte seed
    if ek.len() <= 32 {
        return false;
    }
    let t_len = ek.len() - 32;
    if t_len % 384 != 0 {
        return false;
    }

    let mut all_valid = Choice::from(1u8);
    for chunk in ek[..t_len].chunks_exact(3) {
        let (c0, c1) = unpack_12bit_coeffs(chunk);
        all_valid &= c0.ct_lt(&Q);
        all_valid &= c1.ct_lt(&Q);
    }
    all_valid.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::common::N;

    #[test]
    fn test_12bit_roundtrip() {
        let mut poly = Poly::new();
        for i in 0..N {
            poly.coeffs[i] = (i as i16 * 13) % (Q as i16);
        }
        let bytes = poly_to_bytes(&poly);
        let back = poly_from_bytes(&bytes);
        assert_eq!(poly.coeffs, back.coeffs);
    }

    #[test]
    fn test_12bit_extremes() {
        let mut poly = Poly::new();
        for i in 0..N {
            poly.coeffs[i] = if i % 2 == 0 { 0 } else { (Q - 1) as i16 };
        }
        let back = poly_from_bytes(&poly_to_bytes(&poly));
        assert_eq!(poly.coeffs, back.coeffs);
    }

    #[test]
    fn test_msg_poly_roundtrip() {
        for pattern in [[0u8; 32], [0xFFu8; 32], [0x42u8; 32]] {
            let poly = msg_to_poly(&pattern);
            assert_eq!(poly_to_msg(&poly), pattern);
        }
    }

    #[test]
    fn test_check_modulus_accepts_max() {
        let ek_size = 3 * 384 + 32;
        let t_size = 3 * 384;

        assert!(check_modulus(&vec![0u8; ek_size]));

        // every coefficient = q-1 = 0xD00
        let mut ek = vec![0u8; ek_size];
        for chunk in ek[..t_size].chunks_exact_mut(3) {
            chunk[0] = 0x00;
            chunk[1] = 0x0D;
            chunk[2] = 0xD0;
        }
        assert!(check_modulus(&ek));
    }

    #[test]
    fn test_check_modulus_rejects() {
        let ek_size = 3 * 384 + 32;

        // first coefficient = q = 0xD01
        let mut ek = vec![0u8; ek_size];
        ek[0] = 0x01;
        ek[1] = 0x0D;
        assert!(!check_modulus(&ek));

        // second coefficient of a chunk = 0xFFF
        let mut ek = vec![0u8; ek_size];
        ek[1] = 0xF0;
        ek[2] = 0xFF;
        assert!(!check_modulus(&ek));

        // degenerate shapes
        assert!(!check_modulus(&[]));
        assert!(!check_modulus(&[0u8; 32]));
        assert!(!check_modulus(&[0u8; 32 + 383]));
        assert!(!check_modulus(&[0u8; 32 + 385]));
    }
}
