//! Bit-packed encodings for signature polynomials.
//!
//! Little-endian within and across bytes. Signed ranges encode with an
//! offset: t0 as 2^(d-1) - c, secrets as eta - c, z as gamma1 - c. The w1
//! encoding width follows gamma2 (4 bits at (q-1)/32, 6 bits at (q-1)/88).

use crate::poly::{Poly, N};
use crate::rounding::D;

/// Pack t1 (10-bit coefficients, 320 bytes).
pub fn pack_t1(poly: &Poly, out: &mut [u8]) {
    debug_assert_eq!(out.len(), 320);

    for i in 0..N / 4 {
        let t0 = poly.coeffs[4 * i] as u32;
        let t1 = poly.coeffs[4 * i + 1] as u32;
        let t2 = poly.coeffs[4 * i + 2] as u32;
        let t3 = poly.coeffs[4 * i + 3] as u32;

        out[5 * i] = t0 as u8;
        out[5 * i + 1] = ((t0 >> 8) | (t1 << 2)) as u8;
        out[5 * i + 2] = ((t1 >> 6) | (t2 << 4)) as u8;
        out[5 * i + 3] = ((t2 >> 4) | (t3 << 6)) as u8;
        out[5 * i + 4] = (t3 >> 2) as u8;
    }
}

/// Unpack t1 (10-bit coefficients).
pub fn unpack_t1(input: &[u8], poly: &mut Poly) {
    debug_assert_eq!(input.len(), 320);

    for i in 0..N / 4 {
        poly.coeffs[4 * i] = ((input[5 * i] as i32) | ((input[5 * i + 1] as i32) << 8)) & 0x3FF;
        poly.coeffs[4 * i + 1] =
            (((input[5 * i + 1] as i32) >> 2) | ((input[5 * i + 2] as i32) << 6)) & 0x3FF;
        poly.coeffs[4 * i + 2] =
            (((input[5 * i + 2] as i32) >> 4) | ((input[5 * i + 3] as i32) << 4)) & 0x3FF;
        poly.coeffs[4 * i + 3] =
            (((input[5 * i + 3] as i32) >> 6) | ((input[5 * i + 4] as i32) << 2)) & 0x3FF;
    }
}

/// Pack t0 (13-bit signed range, offset-encoded, 416 bytes).
pub fn pack_t0(poly: &Poly, out: &mut [u8]) {
    debug_assert_eq!(out.len(), 416);

    for i in 0..N / 8 {
        let mut t = [0i32; 8];
        for j in 0..8 {
            t[j] = (1 << (D - 1)) - poly.coeffs[8 * i + j];
        }

        out[13 * i] = t[0] as u8;
        out[13 * i + 1] = ((t[0] >> 8) | (t[1] << 5)) as u8;
        out[13 * i + 2] = (t[1] >> 3) as u8;
        out[13 * i + 3] = ((t[1] >> 11) | (t[2] << 2)) as u8;
        out[13 * i + 4] = ((t[2] >> 6) | (t[3] << 7)) as u8;
        out[13 * i + 5] = (t[3] >> 1) as u8;
        out[13 * i + 6] = ((t[3] >> 9) | (t[4] << 4)) as u8;
        out[13 * i + 7] = (t[4] >> 4) as u8;
        out[13 * i + 8] = ((t[4] >> 12) | (t[5] << 1)) as u8;
        out[13 * i + 9] = ((t[5] >> 7) | (t[6] << 6)) as u8;
        out[13 * i + 10] = (t[6] >> 2) as u8;
        out[13 * i + 11] = ((t[6] >> 10) | (t[7] << 3)) as u8;
        out[13 * i + 12] = (t[7] >> 5) as u8;
    }
}

/// Unpack t0 (13-bit signed range).
pub fn unpack_t0(input: &[u8], poly: &mut Poly) {
    debug_assert_eq!(input.len(), 416);

    for i in 0..N / 8 {
        poly.coeffs[8 * i] =
            ((input[13 * i] as i32) | ((input[13 * i + 1] as i32) << 8)) & 0x1FFF;

        poly.coeffs[8 * i + 1] = (((input[13 * i + 1] as i32) >> 5)
            | ((input[13 * i + 2] as i32) << 3)
            | ((input[13 * i + 3] as i32) << 11))
            & 0x1FFF;

        poly.coeffs[8 * i + 2] =
            (((input[13 * i + 3] as i32) >> 2) | ((input[13 * i + 4] as i32) << 6)) & 0x1FFF;

        poly.coeffs[8 * i + 3] = (((input[13 * i + 4] as i32) >> 7)
            | ((input[13 * i + 5] as i32) << 1)
            | ((input[13 * i + 6] as i32) << 9))
            & 0x1FFF;

        poly.coeffs[8 * i + 4] = (((input[13 * i + 6] as i32) >> 4)
            | ((input[13 * i + 7] as i32) << 4)
            | ((input[13 * i + 8] as i32) << 12))
            & 0x1FFF;

        poly.coeffs[8 * i + 5] =
            (((input[13 * i + 8] as i32) >> 1) | ((input[13 * i + 9] as i32) << 7)) & 0x1FFF;

        poly.coeffs[8 * i + 6] = (((input[13 * i + 9] as i32) >> 6)
            | ((input[13 * i + 10] as i32) << 2)
            | ((input[13 * i + 11] as i32) << 10))
            & 0x1FFF;

        poly.coeffs[8 * i + 7] =
            (((input[13 * i + 11] as i32) >> 3) | ((input[13 * i + 12] as i32) << 5)) & 0x1FFF;

        for j in 0..8 {
            poly.coeffs[8 * i + j] = (1 << (D - 1)) - poly.coeffs[8 * i + j];
        }
    }
}

/// Pack a secret polynomial, eta = 2 (3-bit offset encoding, 96 bytes).
pub fn pack_eta2(poly: &Poly, out: &mut [u8]) {
    debug_assert_eq!(out.len(), 96);

    for i in 0..N / 8 {
        let mut t = [0u8; 8];
        for j in 0..8 {
            t[j] = (2 - poly.coeffs[8 * i + j]) as u8;
        }

        out[3 * i] = t[0] | (t[1] << 3) | (t[2] << 6);
        out[3 * i + 1] = (t[2] >> 2) | (t[3] << 1) | (t[4] << 4) | (t[5] << 7);
        out[3 * i + 2] = (t[5] >> 1) | (t[6] << 2) | (t[7] << 5);
    }
}

/// Unpack a secret polynomial, eta = 2.
pub fn unpack_eta2(input: &[u8], poly: &mut Poly) {
    debug_assert_eq!(input.len(), 96);

    for i in 0..N / 8 {
        poly.coeffs[8 * i] = (input[3 * i] & 0x07) as i32;
        poly.coeffs[8 * i + 1] = ((input[3 * i] >> 3) & 0x07) as i32;
        poly.coeffs[8 * i + 2] = ((input[3 * i] >> 6) | ((input[3 * i + 1] << 2) & 0x07)) as i32;
        poly.coeffs[8 * i + 3] = ((input[3 * i + 1] >> 1) & 0x07) as i32;
        poly.coeffs[8 * i + 4] = ((input[3 * i + 1] >> 4) & 0x07) as i32;
        poly.coeffs[8 * i + 5] =
            ((input[3 * i + 1] >> 7) | ((input[3 * i + 2] << 1) & 0x07)) as i32;
        poly.coeffs[8 * i + 6] = ((input[3 * i + 2] >> 2) & 0x07) as i32;
        poly.coeffs[8 * i + 7] = ((input[3 * i + 2] >> 5) & 0x07) as i32;

        for j in 0..8 {
            poly.coeffs[8 * i + j] = 2 - poly.coeffs[8 * i + j];
        }
    }
}

/// Pack a secret polynomial, eta = 4 (4-bit offset encoding, 128 bytes).
pub fn pack_eta4(poly: &Poly, out: &mut [u8]) {
    debug_assert_eq!(out.len(), 128);

    for i in 0..N / 2 {
        let t0 = (4 - poly.coeffs[2 * i]) as u8;
        let t1 = (4 - poly.coeffs[2 * i + 1]) as u8;
        out[i] = t0 | (t1 << 4);
    }
}

/// Unpack a secret polynomial, eta = 4.
pub fn unpack_eta4(input: &[u8], poly: &mut Poly) {
    debug_assert_eq!(input.len(), 128);

    for i in 0..N / 2 {
        poly.coeffs[2 * i] = 4 - ((input[i] & 0x0F) as i32);
        poly.coeffs[2 * i + 1] = 4 - ((input[i] >> 4) as i32);
    }
}

/// Pack a response polynomial, gamma1 = 2^17 (18 bits, 576 bytes).
pub fn pack_z_17(poly: &Poly, out: &mut [u8]) {
    debug_assert_eq!(out.len(), 576);

    for i in 0..N / 4 {
        let mut t = [0i32; 4];
        for j in 0..4 {
            t[j] = (1 << 17) - poly.coeffs[4 * i + j];
        }

        out[9 * i] = t[0] as u8;
        out[9 * i + 1] = (t[0] >> 8) as u8;
        out[9 * i + 2] = ((t[0] >> 16) | (t[1] << 2)) as u8;
        out[9 * i + 3] = (t[1] >> 6) as u8;
        out[9 * i + 4] = ((t[1] >> 14) | (t[2] << 4)) as u8;
        out[9 * i + 5] = (t[2] >> 4) as u8;
        out[9 * i + 6] = ((t[2] >> 12) | (t[3] << 6)) as u8;
        out[9 * i + 7] = (t[3] >> 2) as u8;
        out[9 * i + 8] = (t[3] >> 10) as u8;
    }
}

/// Unpack a response polynomial, gamma1 = 2^17.
pub fn unpack_z_17(input: &[u8], poly: &mut Poly) {
    debug_assert_eq!(input.len(), 576);

    for i in 0..N / 4 {
        poly.coeffs[4 * i] = ((input[9 * i] as i32)
            | ((input[9 * i + 1] as i32) << 8)
            | ((input[9 * i + 2] as i32) << 16))
            & 0x3FFFF;

        poly.coeffs[4 * i + 1] = (((input[9 * i + 2] as i32) >> 2)
            | ((input[9 * i + 3] as i32) << 6)
            | ((input[9 * i + 4] as i32) << 14))
            & 0x3FFFF;

        poly.coeffs[4 * i + 2] = (((input[9 * i + 4] as i32) >> 4)
            | ((input[9 * i + 5] as i32) << 4)
            | ((input[9 * i + 6] as i32) << 12))
            & 0x3FFFF;

        poly.coeffs[4 * i + 3] = (((input[9 * i + 6] as i32) >> 6)
            | ((input[9 * i + 7] as i32) << 2)
            | ((input[9 * i + 8] as i32) << 10))
            & 0x3FFFF;

        for j in 0..4 {
            poly.coeffs[4 * i + j] = (1 << 17) - poly.coeffs[4 * i + j];
        }
    }
}

/// Pack a response polynomial, gamma1 = 2^19 (20 bits, 640 bytes).
pub fn pack_z_19(poly: &Poly, out: &mut [u8]) {
    debug_assert_eq!(out.len(), 640);

    for i in 0..N / 4 {
        let mut t = [0i32; 4];
        for j in 0..4 {
            t[j] = (1 << 19) - poly.coeffs[4 * i + j];
        }

        out[10 * i] = t[0] as u8;
        out[10 * i + 1] = (t[0] >> 8) as u8;
        out[10 * i + 2] = ((t[0] >> 16) | (t[1] << 4)) as u8;
        out[10 * i + 3] = (t[1] >> 4) as u8;
        out[10 * i + 4] = (t[1] >> 12) as u8;
        out[10 * i + 5] = t[2] as u8;
        out[10 * i + 6] = (t[2] >> 8) as u8;
        out[10 * i + 7] = ((t[2] >> 16) | (t[3] << 4)) as u8;
        out[10 * i + 8] = (t[3] >> 4) as u8;
        out[10 * i + 9] = (t[3] >> 12) as u8;
    }
}

/// Unpack a response polynomial, gamma1 = 2^19.
pub fn unpack_z_19(input: &[u8], poly: &mut Poly) {
    debug_assert_eq!(input.len(), 640);

    for i in 0..N / 4 {
        poly.coeffs[4 * i] = ((input[10 * i] as i32)
            | ((input[10 * i + 1] as i32) << 8)
            | ((input[10 * i + 2] as i32) << 16))
            & 0xFFFFF;

        poly.coeffs[4 * i + 1] = (((input[10 * i + 2] as i32) >> 4)
            | ((input[10 * i + 3] as i32) << 4)
            | ((input[10 * i + 4] as i32) << 12))
            & 0xFFFFF;

        poly.coeffs[4 * i + 2] = ((input[10 * i + 5] as i32)
            | ((input[10 * i + 6] as i32) << 8)
            | ((input[10 * i + 7] as i32) << 16))
            & 0xFFFFF;

        poly.coeffs[4 * i + 3] = (((input[10 * i + 7] as i32) >> 4)
            | ((input[10 * i + 8] as i32) << 4)
            | ((input[10 * i + 9] as i32) << 12))
            & 0xFFFFF;

        for j in 0..4 {
            poly.coeffs[4 * i + j] = (1 << 19) - poly.coeffs[4 * i + j];
        }
    }
}

/// Pack a w1 polynomial for hashing (width follows gamma2).
pub fn pack_w1(poly: &Poly, gamma2: i32, out: &mut [u8]) {
    if gamma2 == 261_888 {
        // 4 bits per coefficient
        debug_assert_eq!(out.len(), 128);
        for i in 0..N / 2 {
            out[i] = (poly.coeffs[2 * i] | (poly.coeffs[2 * i + 1] << 4)) as u8;
        }
    } else {
        // 6 bits per coefficient
        debug_assert_eq!(out.len(), 192);
        for i in 0..N / 4 {
            out[3 * i] = (poly.coeffs[4 * i] | (poly.coeffs[4 * i + 1] << 6)) as u8;
            out[3 * i + 1] = ((poly.coeffs[4 * i + 1] >> 2) | (poly.coeffs[4 * i + 2] << 4)) as u8;
            out[3 * i + 2] = ((poly.coeffs[4 * i + 2] >> 4) | (poly.coeffs[4 * i + 3] << 2)) as u8;
        }
    }
}
