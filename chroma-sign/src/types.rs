//! Key and signature wrapper macro.

/// Generate the typed key and signature wrappers for one parameter set.
macro_rules! define_sign_types {
    (
        sk_size: $sk_size:expr,
        pk_size: $pk_size:expr,
        sig_size: $sig_size:expr
    ) => {
        /// Signing key (secret key).
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct SigningKey {
            bytes: [u8; $sk_size],
        }

        impl SigningKey {
            /// Create from bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $sk_size {
                    return Err(Error::MalformedEncoding);
                }
                let mut result = Self {
                    bytes: [0u8; $sk_size],
                };
                result.bytes.copy_from_slice(bytes);
                Ok(result)
            }

            /// Get the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $sk_size] {
                &self.bytes
            }
        }

        /// Verification key (public key).
        #[derive(Clone)]
        pub struct VerificationKey {
            bytes: [u8; $pk_size],
        }

        impl VerificationKey {
            /// Create from bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $pk_size {
                    return Err(Error::MalformedEncoding);
                }
                let mut key = [0u8; $pk_size];
                key.copy_from_slice(bytes);
                Ok(Self { bytes: key })
            }

            /// Get the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $pk_size] {
                &self.bytes
            }

            /// The 32-byte matrix seed at the front of the key.
            pub fn seed(&self) -> &[u8] {
                &self.bytes[..32]
            }

            /// Colour view of the key bytes.
            pub fn as_colors(&self) -> Vec<ColorValue> {
                chroma_core::bytes_as_colors(&self.bytes)
                    .expect("infallible: key size is a multiple of 4")
            }
        }

        /// Signature.
        #[derive(Clone)]
        pub struct Signature {
            bytes: [u8; $sig_size],
        }

        impl Signature {
            /// Create from bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                if bytes.len() != $sig_size {
                    return Err(Error::MalformedEncoding);
                }
                let mut sig = [0u8; $sig_size];
                sig.copy_from_slice(bytes);
                Ok(Self { bytes: sig })
            }

            /// Get the raw bytes.
            pub fn as_bytes(&self) -> &[u8; $sig_size] {
                &self.bytes
            }

            /// The commitment hash prefix of the signature.
            pub fn commitment(&self) -> &[u8] {
                &self.bytes[..C_TILDE_BYTES]
            }
        }
    };
}

pub(crate) use define_sign_types;
