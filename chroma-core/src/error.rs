//! Error types for Chroma cryptographic operations.

use core::fmt;

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur during cryptographic operations.
///
/// Two conditions are deliberately absent from this taxonomy:
/// decapsulation rejection (implicit rejection returns a pseudorandom
/// shared secret and must be indistinguishable from success), and
/// signature verification failure (a boolean result, not an error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Parameter set inconsistent at construction.
    InvalidParameters,

    /// Byte length wrong, a decoded coefficient out of its declared range,
    /// hint indices not strictly increasing, or CBOR structure invalid.
    MalformedEncoding,

    /// A coefficient exceeded its contractual norm bound during verification.
    BoundsViolation,

    /// The caller-supplied randomness capability failed to produce bytes.
    RandomnessUnavailable,

    /// The requested SIMD backend is not available at runtime.
    UnsupportedCapability,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameters => write!(f, "invalid or inconsistent parameter set"),
            Error::MalformedEncoding => write!(f, "malformed encoding"),
            Error::BoundsViolation => write!(f, "coefficient norm bound exceeded"),
            Error::RandomnessUnavailable => write!(f, "randomness capability failed"),
            Error::UnsupportedCapability => {
                write!(f, "requested backend not available at runtime")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
