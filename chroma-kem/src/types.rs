//! Key, ciphertext, and shared-secret wrapper macro.
//!
//! Generates the typed artefacts for one parameter set: fixed-size byte
//! wrappers with strict length validation, zeroization of secret material,
//! and the colour views of the public artefacts.

/// Generate the typed artefacts for a specific parameter set.
macro_rules! define_kem_types {
    (
        dk_size: $dk_size:expr,
        ek_size: $ek_size:expr,
        ct_size: $ct_size:expr,
        ss_size: $ss_size:expr
    ) => {
        /// Decapsulation key (secret key).
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct DecapsulationKey {
            bytes: [u8; $dk_size],
        }

        impl DecapsulationKey {
            /// Create a decapsulation key from bytes.
            ///
            /// Writes directly into the struct to avoid intermediate
            /// buffers that could leave key material on the stack.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $dk_size {
                    return Err(Error::MalformedEncoding);
                }
                let mut result = Self {
                    bytes: [0u8; $dk_size],
                };
                result.bytes.copy_from_slice(bytes);
                Ok(result)
            }

            /// Get the key as a byte slice.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }
        }

        /// Encapsulation key (public key).
        #[derive(Clone)]
        pub struct EncapsulationKey {
            bytes: [u8; $ek_size],
        }

        impl EncapsulationKey {
            /// Create an encapsulation key from bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $ek_size {
                    return Err(Error::MalformedEncoding);
                }
                let mut key = [0u8; $ek_size];
                key.copy_from_slice(bytes);
                Ok(Self { bytes: key })
            }

            /// Get the key as a byte slice.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }

            /// The 32-byte matrix seed carried at the end of the key.
            pub fn seed(&self) -> &[u8] {
                &self.bytes[$ek_size - 32..]
            }

            /// Colour view of the key bytes.
            ///
            /// A mechanical reshaping into channel quadruples; carries no
            /// extra payload.
            pub fn as_colors(&self) -> Vec<ColorValue> {
                chroma_core::bytes_as_colors(&self.bytes)
                    .expect("infallible: key size is a multiple of 4")
            }
        }

        /// Ciphertext with its shared-secret hint companion.
        ///
        /// The wire encoding is the canonical compressed bytes only; the
        /// hint (a digest of the shared secret, filled by encapsulation)
        /// travels beside them for the presentation layer and is never
        /// consulted by decapsulation.
        #[derive(Clone)]
        pub struct Ciphertext {
            bytes: [u8; $ct_size],
            ss_hint: [u8; 32],
        }

        impl Ciphertext {
            /// Create a ciphertext from its canonical bytes.
            ///
            /// The hint companion is zeroed: it is not part of the wire
            /// format and cannot be reconstructed from it.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $ct_size {
                    return Err(Error::MalformedEncoding);
                }
                let mut ct = [0u8; $ct_size];
                ct.copy_from_slice(bytes);
                Ok(Self {
                    bytes: ct,
                    ss_hint: [0u8; 32],
                })
            }

            pub(crate) fn with_hint(bytes: &[u8], ss_hint: [u8; 32]) -> Result<Self> {
                let mut ct = Self::from_bytes(bytes)?;
                ct.ss_hint = ss_hint;
                Ok(ct)
            }

            /// Get the canonical ciphertext bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }

            /// The shared-secret hint companion.
            pub fn ss_hint(&self) -> &[u8; 32] {
                &self.ss_hint
            }

            /// Colour view of the ciphertext bytes.
            pub fn as_colors(&self) -> Vec<ColorValue> {
                chroma_core::bytes_as_colors(&self.bytes)
                    .expect("infallible: ciphertext size is a multiple of 4")
            }
        }

        /// Shared secret.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct SharedSecret {
            bytes: [u8; $ss_size],
        }

        impl SharedSecret {
            pub(crate) fn new(bytes: [u8; $ss_size]) -> Self {
                Self { bytes }
            }

            /// Colour view of the secret: eight channel quadruples.
            pub fn as_colors(&self) -> [ColorValue; 8] {
                core::array::from_fn(|i| {
                    ColorValue::from_bytes([
                        self.bytes[4 * i],
                        self.bytes[4 * i + 1],
                        self.bytes[4 * i + 2],
                        self.bytes[4 * i + 3],
                    ])
                })
            }
        }

        impl AsRef<[u8]> for SharedSecret {
            fn as_ref(&self) -> &[u8] {
                &self.bytes
            }
        }
    };
}

pub(crate) use define_kem_types;
