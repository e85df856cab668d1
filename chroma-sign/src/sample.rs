//! Deterministic samplers for the signature scheme.
//!
//! Matrix expansion by 23-bit rejection, secret sampling by nibble
//! rejection, mask sampling from 18/20-bit windows, and the challenge
//! sampler (an inside-out partial Fisher-Yates over the coefficient
//! positions). Every sampler is a pure function of its seed; identical
//! seeds and requests give identical polynomials on any platform.

use crate::hash::{Shake128Xof, Shake256Xof};
use crate::poly::{Poly, N};
use crate::reduce::Q;

/// Rejection bound for uniform sampling: the 23-bit mask covers q.
const REJECTION_BOUND: i32 = Q;

/// Sample a uniform polynomial in evaluation order from SHAKE128.
///
/// Three squeezed bytes give one masked 23-bit candidate; values >= q are
/// rejected. The rejection count depends only on public XOF output.
pub fn sample_uniform(xof: &mut Shake128Xof) -> Poly {
    let mut poly = Poly::zero();
    let mut buf = [0u8; 3];
    let mut ctr = 0;

    while ctr < N {
        xof.squeeze(&mut buf);

        let t = (buf[0] as i32) | ((buf[1] as i32) << 8) | (((buf[2] & 0x7F) as i32) << 16);

        if t < REJECTION_BOUND {
            poly.coeffs[ctr] = t;
            ctr += 1;
        }
    }

    poly
}

/// Sample a secret polynomial with coefficients in [-eta, eta].
///
/// Nibble rejection per the half-byte tables: eta = 2 keeps nibbles < 15
/// and reduces mod 5; eta = 4 keeps nibbles < 9. The stream extends
/// whenever rejection exhausts a block.
pub fn sample_eta<const ETA: usize>(seed: &[u8], nonce: u16) -> Poly {
    let mut poly = Poly::zero();

    let mut input = [0u8; 66];
    input[..seed.len()].copy_from_slice(seed);
    input[seed.len()] = nonce as u8;
    input[seed.len() + 1] = (nonce >> 8) as u8;

    let mut xof = Shake256Xof::from_data(&input[..seed.len() + 2]);

    let mut ctr = 0;
    let mut buf = [0u8; 136];
    while ctr < N {
        xof.squeeze(&mut buf);
        let mut pos = 0;

        while ctr < N && pos < buf.len() {
            let t0 = (buf[pos] & 0x0F) as i32;
            let t1 = (buf[pos] >> 4) as i32;
            pos += 1;

            if ETA == 2 {
                // keep 15 values: three copies each of {0..4}, then mod 5
                if t0 < 15 {
                    let a = t0 - (205 * t0 >> 10) * 5;
                    poly.coeffs[ctr] = 2 - a;
                    ctr += 1;
                }
                if ctr < N && t1 < 15 {
                    let a = t1 - (205 * t1 >> 10) * 5;
                    poly.coeffs[ctr] = 2 - a;
                    ctr += 1;
                }
            } else {
                // ETA == 4: keep nibbles < 9
                if t0 < 9 {
                    poly.coeffs[ctr] = 4 - t0;
                    ctr += 1;
                }
                if ctr < N && t1 < 9 {
                    poly.coeffs[ctr] = 4 - t1;
                    ctr += 1;
                }
            }
        }
    }

    poly
}

/// Sample the masking polynomial y with coefficients in (-gamma1, gamma1].
///
/// Fixed-width windows, no rejection: 18 bits when gamma1 = 2^17, 20 bits
/// when gamma1 = 2^19.
pub fn sample_mask(seed: &[u8; 64], nonce: u16, gamma1_bits: u32) -> Poly {
    let mut poly = Poly::zero();

    let mut input = [0u8; 66];
    input[..64].copy_from_slice(seed);
    input[64] = nonce as u8;
    input[65] = (nonce >> 8) as u8;

    let mut xof = Shake256Xof::from_data(&input);

    if gamma1_bits == 17 {
        let mut buf = [0u8; 576]; // 256 * 18 / 8
        xof.squeeze(&mut buf);

        for i in 0..N {
            let idx = i * 18 / 8;
            let off = (i * 18) % 8;

            let mut t = (buf[idx] as i32) >> off;
            t |= (buf[idx + 1] as i32) << (8 - off);
            t |= ((buf[idx + 2] as i32) << (16 - off)) & 0x3FFFF;
            t &= 0x3FFFF;

            poly.coeffs[i] = (1 << 17) - t;
        }
    } else {
        let mut buf = [0u8; 640]; // 256 * 20 / 8
        xof.squeeze(&mut buf);

        for i in 0..N {
            let idx = i * 20 / 8;
            let off = (i * 20) % 8;

            let mut t = (buf[idx] as i32) >> off;
            t |= (buf[idx + 1] as i32) << (8 - off);
            t |= (buf[idx + 2] as i32) << (16 - off);
            if off > 4 {
                t |= (buf[idx + 3] as i32) << (24 - off);
            }
            t &= 0xFFFFF;

            poly.coeffs[i] = (1 << 19) - t;
        }
    }

    poly
}

/// Sample the challenge: exactly tau coefficients in {-1, +1}, rest zero.
///
/// Inside-out partial Fisher-Yates over positions [0, n): each of the tau
/// placements swaps with a uniformly drawn earlier slot, so every support
/// pattern is equiprobable. Sign bits come from a dedicated 8-byte squeeze
/// prefix.
pub fn sample_in_ball(seed: &[u8], tau: usize) -> Poly {
    let mut poly = Poly::zero();
    let mut xof = Shake256Xof::from_data(seed);

    let mut signs = [0u8; 8];
    xof.squeeze(&mut signs);
    let mut sign_bits = u64::from_le_bytes(signs);

    let mut buf = [0u8; 1];
    for i in (N - tau)..N {
        // draw j uniformly from [0, i] by rejection
        loop {
            xof.squeeze(&mut buf);
            let j = buf[0] as usize;
            if j <= i {
                poly.coeffs[i] = poly.coeffs[j];
                poly.coeffs[j] = if sign_bits & 1 != 0 { -1 } else { 1 };
                sign_bits >>= 1;
                break;
            }
        }
    }

    poly
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_eta2_range() {
        let poly = sample_eta::<2>(&[0u8; 64], 0);
        for &c in &poly.coeffs {
            assert!((-2..=2).contains(&c), "coefficient {c} out of range");
        }
    }

    #[test]
    fn test_sample_eta4_range() {
        let poly = sample_eta::<4>(&[0u8; 64], 0);
        for &c in &poly.coeffs {
            assert!((-4..=4).contains(&c), "coefficient {c} out of range");
        }
    }

    #[test]
    fn test_sample_eta_nonce_separation() {
        let seed = [42u8; 64];
        let a = sample_eta::<2>(&seed, 0);
        let b = sample_eta::<2>(&seed, 1);
        let a2 = sample_eta::<2>(&seed, 0);
        assert_ne!(a.coeffs, b.coeffs);
        assert_eq!(a.coeffs, a2.coeffs);
    }

    #[test]
    fn test_sample_mask_ranges() {
        let seed = [7u8; 64];
        let poly = sample_mask(&seed, 0, 17);
        for &c in &poly.coeffs {
            assert!(c > -(1 << 17) && c <= (1 << 17), "17-bit mask: {c}");
        }
        let poly = sample_mask(&seed, 0, 19);
        for &c in &poly.coeffs {
            assert!(c > -(1 << 19) && c <= (1 << 19), "19-bit mask: {c}");
        }
    }

    #[test]
    fn test_sample_in_ball_support() {
        for tau in [39usize, 49, 60] {
            let poly = sample_in_ball(&[0u8; 32], tau);
            let mut count = 0;
            for &c in &poly.coeffs {
                if c != 0 {
                    assert!(c == 1 || c == -1, "non-zero coefficient must be +/-1");
                    count += 1;
                }
            }
            assert_eq!(count, tau, "exactly tau non-zero coefficients");
        }
    }

    #[test]
    fn test_sample_in_ball_seed_lengths() {
        // commitment hashes come in 32, 48, and 64 bytes; all absorb fine
        for len in [32usize, 48, 64] {
            let seed = vec![0x5Au8; len];
            let poly = sample_in_ball(&seed, 49);
            let nonzero = poly.coeffs.iter().filter(|&&c| c != 0).count();
            assert_eq!(nonzero, 49);
        }
    }

    #[test]
    fn test_sample_in_ball_deterministic() {
        let a = sample_in_ball(&[9u8; 32], 39);
        let b = sample_in_ball(&[9u8; 32], 39);
        assert_eq!(a.coeffs, b.coeffs);
        let c = sample_in_ball(&[10u8; 32], 39);
        assert_ne!(a.coeffs, c.coeffs);
    }
}
