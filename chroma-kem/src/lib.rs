//! # Colour-KEM
//!
//! Module-lattice key encapsulation at three security levels, carrying a
//! colour-word presentation of its byte artefacts. The cryptographic
//! semantics are those of a standard module-LWE KEM with implicit
//! rejection; the colour view is a mechanical reshaping of the canonical
//! bytes and adds no payload.
//!
//! ## Parameter Sets
//!
//! | Parameter Set | Public Key | Secret Key | Ciphertext | Shared Secret |
//! |---------------|------------|------------|------------|---------------|
//! | 512           | 800 bytes  | 1632 bytes | 768 bytes  | 32 bytes      |
//! | 768           | 1184 bytes | 2400 bytes | 1088 bytes | 32 bytes      |
//! | 1024          | 1568 bytes | 3168 bytes | 1568 bytes | 32 bytes      |
//!
//! ## Example
//!
//! ```ignore
//! use chroma_kem::{ColorKem768, Kem};
//! use rand::rngs::OsRng;
//!
//! let (dk, ek) = ColorKem768::keygen(&mut OsRng)?;
//! let (ct, ss_sender) = ColorKem768::encaps(&ek, &mut OsRng)?;
//! let ss_receiver = ColorKem768::decaps(&dk, &ct)?;
//!
//! assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod encode;
mod engine;
mod hash;
mod kem;
mod matrix;
mod ntt;
mod params;
mod pke;
mod poly;
mod polyvec;
mod reduce;
mod sample;
mod types;

#[cfg(feature = "kem-512")]
mod color_kem_512;
#[cfg(feature = "kem-768")]
mod color_kem_768;
#[cfg(feature = "kem-1024")]
mod color_kem_1024;

pub use chroma_core::Kem;
pub use engine::{NttBackend, NttEngine};

#[cfg(feature = "kem-512")]
pub use color_kem_512::ColorKem512;
#[cfg(feature = "kem-768")]
pub use color_kem_768::ColorKem768;
#[cfg(feature = "kem-1024")]
pub use color_kem_1024::ColorKem1024;

/// Level-512 key, ciphertext, and shared-secret types.
#[cfg(feature = "kem-512")]
pub mod kem512 {
    pub use crate::color_kem_512::*;
}

/// Level-768 key, ciphertext, and shared-secret types.
#[cfg(feature = "kem-768")]
pub mod kem768 {
    pub use crate::color_kem_768::*;
}

/// Level-1024 key, ciphertext, and shared-secret types.
#[cfg(feature = "kem-1024")]
pub mod kem1024 {
    pub use crate::color_kem_1024::*;
}
