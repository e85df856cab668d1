//! # Chroma Core
//!
//! Core traits and utilities for the Chroma post-quantum cryptography library.
//!
//! This crate provides:
//! - Common error types
//! - Cryptographic primitive traits (`Kem`, `Signer`)
//! - The colour-word view used at serialisation and visualisation boundaries
//! - CPU capability probing for NTT backend selection
//! - Secure memory handling with zeroize integration
//!
//! The field arithmetic and transform kernels live in the scheme crates:
//! the two rings differ in coefficient width, modulus, and transform depth,
//! and each crate carries its own concrete implementation.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

#[cfg(not(feature = "std"))]
extern crate alloc;

mod color;
mod cpu;
mod error;
mod traits;

pub use color::{
    bytes_as_colors, colors_to_bytes, decode_coefficients, encode_coefficients, ColorValue,
};
pub use cpu::{CpuArchitecture, CpuFeatures, SimdLevel};
pub use error::{Error, Result};
pub use traits::{Kem, Signer};

/// Re-export zeroize for convenience.
pub use zeroize::{Zeroize, ZeroizeOnDrop};

/// Re-export subtle for constant-time operations.
pub use subtle;
