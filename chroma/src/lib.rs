//! # Chroma
//!
//! A post-quantum cryptography library implementing a module-lattice key
//! encapsulation mechanism and a module-lattice signature scheme, with a
//! colour-word presentation of every byte artefact.
//!
//! ## Features
//!
//! - `std` (default): standard library support
//! - `kem` (default): the key encapsulation mechanism
//! - `sign` (default): the signature scheme, COSE envelope, and KAT codec
//!
//! ## Example
//!
//! ```ignore
//! use chroma::kem::{ColorKem768, Kem};
//!
//! let (dk, ek) = ColorKem768::keygen(&mut rng)?;
//! let (ct, ss_sender) = ColorKem768::encaps(&ek, &mut rng)?;
//! let ss_receiver = ColorKem768::decaps(&dk, &ct)?;
//!
//! assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub use chroma_core::{Error, Result};

/// Core traits for cryptographic primitives.
pub mod traits {
    pub use chroma_core::{Kem, Signer};
}

/// Colour-word views of byte artefacts and coefficient slices.
pub mod color {
    pub use chroma_core::{
        bytes_as_colors, colors_to_bytes, decode_coefficients, encode_coefficients, ColorValue,
    };
}

/// CPU capability probing for backend selection.
pub mod cpu {
    pub use chroma_core::{CpuArchitecture, CpuFeatures, SimdLevel};
}

/// Key encapsulation at three security levels.
#[cfg(feature = "kem")]
pub mod kem {
    pub use chroma_core::Kem;
    pub use chroma_kem::*;
}

/// Signatures at three security levels, with the COSE_Sign1 envelope and
/// the known-answer record codec.
#[cfg(feature = "sign")]
pub mod sign {
    pub use chroma_core::Signer;
    pub use chroma_sign::*;
}
