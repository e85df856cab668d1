//! Modular arithmetic for the signature field (q = 8380417 = 2^23 - 2^13 + 1).
//!
//! Coefficients are `i32`; products widen to `i64`. Barrett reduction
//! canonicalises sums, Montgomery reduction handles products. Control flow
//! never depends on the values being reduced.

/// The prime modulus.
pub const Q: i32 = 8_380_417;

/// (Q - 1) / 2.
pub const Q_HALF: i32 = (Q - 1) / 2;

/// q^(-1) mod 2^32 for Montgomery reduction.
pub const QINV: i32 = 58_728_449;

/// 2^32 mod q (Montgomery R).
pub const MONT_R: i32 = 4_193_792;

/// (2^32)^2 mod q, for conversion into Montgomery form.
pub const MONT_R2: i64 = 2_365_951;

/// floor(2^48 / q) for Barrett reduction.
pub const BARRETT_MUL: i64 = 33_556_102;

/// Reduce to canonical form [0, q-1].
///
/// Input: |a| < 2^31. The scaled-reciprocal estimate floors, so the raw
/// residue lands in [0, 2q) and one masked subtract finishes the job.
#[inline]
pub const fn reduce32(a: i32) -> i32 {
    let estimate = ((a as i64) * BARRETT_MUL) >> 48;
    let residue = (a as i64 - estimate * Q as i64) as i32;
    caddq(residue - Q)
}

/// Freeze: reduce to canonical [0, q-1] range.
#[inline]
pub const fn freeze(a: i32) -> i32 {
    reduce32(a)
}

/// Montgomery reduction: a * R^(-1) mod q with R = 2^32.
///
/// m = a * q^(-1) mod R makes a - m*q divisible by R exactly, so the
/// shift loses nothing. Output magnitude stays below q for |a| < q * 2^31.
#[inline]
pub const fn montgomery_reduce(a: i64) -> i32 {
    let m = (a as i32).wrapping_mul(QINV);
    ((a - (m as i64) * (Q as i64)) >> 32) as i32
}

/// Montgomery multiplication: a * b * R^(-1) mod q.
#[inline]
pub const fn montgomery_mul(a: i32, b: i32) -> i32 {
    montgomery_reduce((a as i64) * (b as i64))
}

/// Convert into Montgomery form: a * R mod q.
#[inline]
pub const fn to_mont(a: i32) -> i32 {
    montgomery_reduce((a as i64) * MONT_R2)
}

/// Convert out of Montgomery form: a * R^(-1) mod q.
#[inline]
pub const fn from_mont(a: i32) -> i32 {
    montgomery_reduce(a as i64)
}

/// Conditional add q: map a signed representative into [0, q).
#[inline]
pub const fn caddq(a: i32) -> i32 {
    a + (Q & (a >> 31))
}

/// Centred reduction: map a canonical representative into (-q/2, q/2].
#[inline]
pub const fn centred_reduce(a: i32) -> i32 {
    let mask = (Q_HALF - a) >> 31;
    a - (Q & mask)
}

/// Modular addition of canonical representatives.
#[inline]
pub const fn add_mod(a: i32, b: i32) -> i32 {
    let r = a + b - Q;
    r + (Q & (r >> 31))
}

/// Modular subtraction into [0, q-1].
#[inline]
pub const fn sub_mod(a: i32, b: i32) -> i32 {
    let r = a - b;
    r + (Q & (r >> 31))
}

/// Modular exponentiation: base^exponent mod q by square-and-multiply.
///
/// The exponent is a public value (parameter-derived), never a secret.
pub const fn pow_mod(base: i32, exponent: u32) -> i32 {
    let q = Q as i64;
    let mut result: i64 = 1;
    let mut square = (base as i64).rem_euclid(q);
    let mut bits = exponent;
    while bits != 0 {
        if bits & 1 == 1 {
            result = result * square % q;
        }
        square = square * square % q;
        bits >>= 1;
    }
    result as i32
}

/// Modular inverse: a^(q-2) mod q (q prime, a nonzero).
#[inline]
pub const fn inverse_mod(a: i32) -> i32 {
    pow_mod(a, Q as u32 - 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce32() {
        assert_eq!(reduce32(0), 0);
        assert_eq!(reduce32(Q), 0);
        assert_eq!(reduce32(Q + 1), 1);
        assert_eq!(reduce32(2 * Q), 0);
        assert_eq!(reduce32(-1), Q - 1);
        assert_eq!(reduce32(-Q), 0);
        assert_eq!(reduce32(i32::MAX), i32::MAX % Q);
        assert_eq!(reduce32(i32::MIN + 1), (i32::MIN as i64 + 1).rem_euclid(Q as i64) as i32);
    }

    #[test]
    fn test_montgomery_roundtrip() {
        for a in [0, 1, 100, 1000, Q - 1, Q / 2] {
            let mont = to_mont(a);
            let back = freeze(from_mont(mont));
            assert_eq!(back, a, "failed for a={a}");
        }
    }

    #[test]
    fn test_montgomery_mul_matches_schoolbook() {
        let a = 12345;
        let b = 67890;
        let expected = ((a as i64) * (b as i64) % (Q as i64)) as i32;

        let result = freeze(from_mont(montgomery_mul(to_mont(a), to_mont(b))));
        assert_eq!(result, expected);
    }

    #[test]
    fn test_q_structure() {
        assert_eq!(Q, (1 << 23) - (1 << 13) + 1);
    }

    #[test]
    fn test_caddq() {
        assert_eq!(caddq(-5), Q - 5);
        assert_eq!(caddq(5), 5);
        assert_eq!(caddq(0), 0);
    }

    #[test]
    fn test_add_sub_mod() {
        assert_eq!(add_mod(Q - 1, 1), 0);
        assert_eq!(add_mod(Q - 1, Q - 1), Q - 2);
        assert_eq!(sub_mod(0, 1), Q - 1);
        assert_eq!(sub_mod(5, 5), 0);
    }

    #[test]
    fn test_centred_reduce() {
        assert_eq!(centred_reduce(0), 0);
        assert_eq!(centred_reduce(Q_HALF), Q_HALF);
        assert_eq!(centred_reduce(Q_HALF + 1), Q_HALF + 1 - Q);
        assert_eq!(centred_reduce(Q - 1), -1);
    }

    #[test]
    fn test_inverse_of_root() {
        // 1753 is the 512th primitive root used by the transform tables
        let inv = inverse_mod(1753);
        assert_eq!((1753i64 * inv as i64).rem_euclid(Q as i64), 1);
        // n^(-1): 256^(-1) mod q
        assert_eq!(pow_mod(256, (Q as u32) - 2), 8_347_681);
    }
}
