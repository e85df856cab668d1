//! Signature parameter sets.

use crate::reduce::Q;

/// Common parameters shared across all levels.
pub mod common {
    use super::Q;

    /// Ring dimension.
    pub const N: usize = 256;

    /// Modulus q = 8380417.
    pub const Q_VAL: i32 = Q;

    /// Number of bits in q.
    pub const Q_BITS: usize = 23;

    /// Dropped low-order bits in the public key rounding.
    pub const D: usize = 13;

    /// Seed size in bytes.
    pub const SEED_BYTES: usize = 32;

    /// Collision-resistant hash output size in bytes.
    pub const CRH_BYTES: usize = 64;
}

/// Level-44 parameters (NIST category 2).
#[cfg(feature = "sign-44")]
pub mod sign_44 {
    pub use super::common::*;

    /// Rows in matrix A.
    pub const K: usize = 4;
    /// Columns in matrix A.
    pub const L: usize = 4;
    /// Secret coefficient range.
    pub const ETA: usize = 2;
    /// Non-zero challenge coefficients.
    pub const TAU: usize = 39;
    /// Rejection slack (tau * eta).
    pub const BETA: i32 = 78;
    /// Masking range for y.
    pub const GAMMA1: i32 = 1 << 17;
    /// Low-order rounding range.
    pub const GAMMA2: i32 = (Q_VAL - 1) / 88; // 95232
    /// Maximum number of hint ones.
    pub const OMEGA: usize = 80;

    /// Commitment hash size (lambda / 4 with lambda = 128).
    pub const C_TILDE_BYTES: usize = 32;

    /// Public key size in bytes.
    pub const PK_BYTES: usize = 1312;
    /// Secret key size in bytes.
    pub const SK_BYTES: usize = 2560;
    /// Signature size in bytes.
    pub const SIG_BYTES: usize = 2420;

    /// Packed t1 polynomial size.
    pub const POLY_T1_PACKED_BYTES: usize = 320;
    /// Packed t0 polynomial size.
    pub const POLY_T0_PACKED_BYTES: usize = 416;
    /// Packed secret polynomial size (eta = 2).
    pub const POLY_ETA_PACKED_BYTES: usize = 96;
    /// Packed z polynomial size (gamma1 = 2^17).
    pub const POLY_Z_PACKED_BYTES: usize = 576;
}

/// Level-65 parameters (NIST category 3).
#[cfg(feature = "sign-65")]
pub mod sign_65 {
    pub use super::common::*;

    /// Rows in matrix A.
    pub const K: usize = 6;
    /// Columns in matrix A.
    pub const L: usize = 5;
    /// Secret coefficient range.
    pub const ETA: usize = 4;
    /// Non-zero challenge coefficients.
    pub const TAU: usize = 49;
    /// Rejection slack.
    pub const BETA: i32 = 196;
    /// Masking range for y.
    pub const GAMMA1: i32 = 1 << 19;
    /// Low-order rounding range.
    pub const GAMMA2: i32 = (Q_VAL - 1) / 32; // 261888
    /// Maximum number of hint ones.
    pub const OMEGA: usize = 55;

    /// Commitment hash size (lambda / 4 with lambda = 192).
    pub const C_TILDE_BYTES: usize = 48;

    /// Public key size in bytes.
    pub const PK_BYTES: usize = 1952;
    /// Secret key size in bytes.
    pub const SK_BYTES: usize = 4032;
    /// Signature size in bytes.
    pub const SIG_BYTES: usize = 3309;

    /// Packed t1 polynomial size.
    pub const POLY_T1_PACKED_BYTES: usize = 320;
    /// Packed t0 polynomial size.
    pub const POLY_T0_PACKED_BYTES: usize = 416;
    /// Packed secret polynomial size (eta = 4).
    pub const POLY_ETA_PACKED_BYTES: usize = 128;
    /// Packed z polynomial size (gamma1 = 2^19).
    pub const POLY_Z_PACKED_BYTES: usize = 640;
}

/// Level-87 parameters (NIST category 5).
#[cfg(feature = "sign-87")]
pub mod sign_87 {
    pub use super::common::*;

    /// Rows in matrix A.
    pub const K: usize = 8;
    /// Columns in matrix A.
    pub const L: usize = 7;
    /// Secret coefficient range.
    pub const ETA: usize = 2;
    /// Non-zero challenge coefficients.
    pub const TAU: usize = 60;
    /// Rejection slack.
    pub const BETA: i32 = 120;
    /// Masking range for y.
    pub const GAMMA1: i32 = 1 << 19;
    /// Low-order rounding range.
    pub const GAMMA2: i32 = (Q_VAL - 1) / 32; // 261888
    /// Maximum number of hint ones.
    pub const OMEGA: usize = 75;

    /// Commitment hash size (lambda / 4 with lambda = 256).
    pub const C_TILDE_BYTES: usize = 64;

    /// Public key size in bytes.
    pub const PK_BYTES: usize = 2592;
    /// Secret key size in bytes.
    pub const SK_BYTES: usize = 4896;
    /// Signature size in bytes.
    pub const SIG_BYTES: usize = 4627;

    /// Packed t1 polynomial size.
    pub const POLY_T1_PACKED_BYTES: usize = 320;
    /// Packed t0 polynomial size.
    pub const POLY_T0_PACKED_BYTES: usize = 416;
    /// Packed secret polynomial size (eta = 2).
    pub const POLY_ETA_PACKED_BYTES: usize = 96;
    /// Packed z polynomial size (gamma1 = 2^19).
    pub const POLY_Z_PACKED_BYTES: usize = 640;
}
