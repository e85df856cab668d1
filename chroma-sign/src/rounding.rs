//! Decomposition and hint machinery.
//!
//! Power2Round splits the public vector t at bit d = 13; Decompose splits
//! working values around alpha = 2 * gamma2; MakeHint/UseHint let the
//! verifier recover high bits through the error introduced by dropping t0.

use crate::reduce::{centred_reduce, Q};

/// Dropped low-order bits in Power2Round.
pub const D: u32 = 13;

/// gamma2 = (q - 1) / 32, used by the higher levels.
pub const GAMMA2_32: i32 = (Q - 1) / 32; // 261888

/// gamma2 = (q - 1) / 88, used by the lowest level.
pub const GAMMA2_88: i32 = (Q - 1) / 88; // 95232

/// Power2Round: r = r1 * 2^d + r0 with r0 in (-2^(d-1), 2^(d-1)].
///
/// Input must be in [0, q-1]. The low part is the centred remainder mod
/// 2^d; the high part is whatever is left after removing it.
#[inline]
pub fn power2round(r: i32) -> (i32, i32) {
    const HALF: i32 = 1 << (D - 1);
    const MASK: i32 = (1 << D) - 1;

    let remainder = r & MASK;
    // centre the remainder, keeping +2^(d-1) on the positive side
    let r0 = remainder - (((HALF - remainder) >> 31) & (1 << D));
    ((r - r0) >> D, r0)
}

/// Decompose r into (r1, r0) with r0 in (-gamma2, gamma2].
///
/// Input in [0, q-1]; alpha = 2 * gamma2. The division by alpha is a
/// two-stage multiply-shift: a coarse ceil(r / 128) followed by the
/// per-gamma2 reciprocal (1025 / 2^22 for alpha/128 = 4096, 11275 / 2^24
/// for alpha/128 = 1488). The m = 44 boundary wraps to zero through a
/// sign mask rather than a branch.
#[inline]
pub fn decompose(r: i32, gamma2: i32) -> (i32, i32) {
    let alpha = 2 * gamma2;
    let coarse = (r + 127) >> 7;

    let r1 = if gamma2 == GAMMA2_32 {
        ((coarse * 1025 + (1 << 21)) >> 22) & 15
    } else {
        let approx = (coarse * 11275 + (1 << 23)) >> 24;
        approx & !((43 - approx) >> 31)
    };

    (r1, centred_reduce(r - r1 * alpha))
}

/// High part of the decomposition.
#[inline]
pub fn highbits(r: i32, gamma2: i32) -> i32 {
    decompose(r, gamma2).0
}

/// Low part of the decomposition.
#[inline]
pub fn lowbits(r: i32, gamma2: i32) -> i32 {
    decompose(r, gamma2).1
}

/// MakeHint: 1 iff adding z to r changes the high bits.
///
/// Constant time over its inputs: the inequality goes through subtle
/// rather than a data-dependent branch.
#[inline]
pub fn make_hint(z: i32, r: i32, gamma2: i32) -> i32 {
    use crate::reduce::freeze;
    use subtle::ConstantTimeEq;

    let before = highbits(r, gamma2) as u32;
    let after = highbits(freeze(r + z), gamma2) as u32;
    i32::from((!before.ct_eq(&after)).unwrap_u8())
}

/// UseHint: recover the high bits of r given the hint bit.
///
/// With hint = 1 the high part steps up or down by one modulo
/// m = (q - 1) / (2 * gamma2), direction taken from the sign of the low
/// part.
#[inline]
pub fn use_hint(hint: i32, r: i32, gamma2: i32) -> i32 {
    let (r1, r0) = decompose(r, gamma2);

    if hint == 0 {
        return r1;
    }

    let m = if gamma2 == GAMMA2_32 { 16 } else { 44 };
    let step = if r0 > 0 { 1 } else { m - 1 };
    (r1 + step) % m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::freeze;

    #[test]
    fn test_power2round_reconstructs() {
        for r in [0, 100, 1000, 4095, 4096, 4097, 8191, 8192, 12288, Q / 2, Q - 1] {
            let (r1, r0) = power2round(r);
            assert_eq!(r1 * (1 << D) + r0, r, "failed for r={r}");
            let bound = 1 << (D - 1);
            assert!(r0 > -bound && r0 <= bound, "r0={r0} out of range for r={r}");
        }
    }

    #[test]
    fn test_decompose_reconstructs() {
        for gamma2 in [GAMMA2_88, GAMMA2_32] {
            let alpha = 2 * gamma2;
            for r in [0, 1, 100, 1000, alpha - 1, alpha, alpha + 1, Q / 2, Q - 1] {
                let (r1, r0) = decompose(r, gamma2);
                assert_eq!(
                    freeze(r1 * alpha + r0),
                    freeze(r),
                    "reconstruction failed for r={r}, gamma2={gamma2}"
                );
                assert!(r0.abs() <= gamma2, "r0={r0} out of range");
            }
        }
    }

    #[test]
    fn test_decompose_high_range() {
        for r in (0..Q).step_by(131_071) {
            let (r1, _) = decompose(r, GAMMA2_32);
            assert!((0..16).contains(&r1), "r1={r1} for r={r}");
            let (r1, _) = decompose(r, GAMMA2_88);
            assert!((0..44).contains(&r1), "r1={r1} for r={r}");
        }
    }

    #[test]
    fn test_hint_recovers_highbits() {
        // UseHint(MakeHint(z, r), r) must equal HighBits(r + z)
        for gamma2 in [GAMMA2_88, GAMMA2_32] {
            for r in (0..Q).step_by(524_287) {
                for z in [-100, -1, 0, 1, 100, gamma2 / 2, -gamma2 / 2] {
                    let r = freeze(r);
                    let hint = make_hint(z, r, gamma2);
                    let recovered = use_hint(hint, r, gamma2);
                    let expected = highbits(freeze(r + z), gamma2);
                    assert_eq!(
                        recovered, expected,
                        "hint recovery failed: r={r}, z={z}, gamma2={gamma2}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_no_hint_is_identity() {
        for r in [0, 1_000_000, Q - 1] {
            assert_eq!(use_hint(0, r, GAMMA2_32), highbits(r, GAMMA2_32));
        }
    }
}
