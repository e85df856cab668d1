//! # Colour-Sign
//!
//! Module-lattice signatures at three security levels, carrying a
//! colour-word presentation of their byte artefacts, plus the COSE_Sign1
//! envelope and the known-answer record codec. Signing is the
//! deterministic rejection-loop construction; verification is a boolean
//! check, never an error.
//!
//! # Supported Parameter Sets
//!
//! | Variant | Public Key | Secret Key | Signature |
//! |---------|------------|------------|-----------|
//! | 44      | 1,312 bytes | 2,560 bytes | 2,420 bytes |
//! | 65      | 1,952 bytes | 4,032 bytes | 3,309 bytes |
//! | 87      | 2,592 bytes | 4,896 bytes | 4,627 bytes |
//!
//! # Example
//!
//! ```ignore
//! use chroma_sign::{ColorSign65, Signer};
//!
//! let (sk, pk) = ColorSign65::keygen(&mut rng)?;
//! let signature = ColorSign65::sign(&sk, b"Hello, post-quantum world!")?;
//! assert!(ColorSign65::verify(&pk, b"Hello, post-quantum world!", &signature));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(
    clippy::many_single_char_names,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_possible_wrap,
    clippy::module_name_repetitions
)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[allow(dead_code)]
mod reduce;
#[allow(dead_code)]
mod poly;
#[allow(dead_code)]
mod ntt;
#[allow(dead_code)]
mod engine;
#[allow(dead_code)]
mod hash;
#[allow(dead_code)]
mod sample;
#[allow(dead_code)]
mod rounding;
#[allow(dead_code)]
mod packing;
#[allow(dead_code)]
mod polyvec;
#[allow(dead_code)]
mod sign;
#[allow(dead_code)]
mod params;
mod types;

pub mod cose;
pub mod kat;

#[cfg(feature = "sign-44")]
mod color_sign_44;
#[cfg(feature = "sign-65")]
mod color_sign_65;
#[cfg(feature = "sign-87")]
mod color_sign_87;

#[cfg(feature = "sign-44")]
pub use color_sign_44::ColorSign44;
#[cfg(feature = "sign-65")]
pub use color_sign_65::ColorSign65;
#[cfg(feature = "sign-87")]
pub use color_sign_87::ColorSign87;

pub use engine::{NttBackend, NttEngine};

/// Level-44 key and signature types (NIST category 2).
#[cfg(feature = "sign-44")]
pub mod sign44 {
    pub use crate::color_sign_44::*;
}

/// Level-65 key and signature types (NIST category 3).
#[cfg(feature = "sign-65")]
pub mod sign65 {
    pub use crate::color_sign_65::*;
}

/// Level-87 key and signature types (NIST category 5).
#[cfg(feature = "sign-87")]
pub mod sign87 {
    pub use crate::color_sign_87::*;
}

pub use chroma_core::{Error, Result, Signer};
