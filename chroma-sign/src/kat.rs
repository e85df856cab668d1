//! Known-answer record codec.
//!
//! A vector file is a sequence of binary records, each carrying the level,
//! the 32-byte keygen seed, the message, and the expected public key,
//! secret key, and signature bytes. Lengths are little-endian u32; byte
//! strings are the exact canonical encodings. Decoding is strict: short,
//! trailing, or oversized fields fail rather than truncate.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use chroma_core::{Error, Result};

/// One known-answer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KatRecord {
    /// Security level tag (44, 65, or 87).
    pub level: u32,
    /// Deterministic key-generation seed.
    pub seed: [u8; 32],
    /// Message that was signed.
    pub message: Vec<u8>,
    /// Expected public key bytes.
    pub public_key: Vec<u8>,
    /// Expected secret key bytes.
    pub secret_key: Vec<u8>,
    /// Expected signature bytes.
    pub signature: Vec<u8>,
}

fn put_field(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
    out.extend_from_slice(bytes);
}

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::MalformedEncoding)?;
        let s = self.data.get(self.pos..end).ok_or(Error::MalformedEncoding)?;
        self.pos = end;
        Ok(s)
    }

    fn u32_le(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn field(&mut self) -> Result<Vec<u8>> {
        let len = self.u32_le()? as usize;
        Ok(self.take(len)?.to_vec())
    }
}

impl KatRecord {
    /// Serialise the record.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            4 + 32
                + 4 * 4
                + self.message.len()
                + self.public_key.len()
                + self.secret_key.len()
                + self.signature.len(),
        );
        out.extend_from_slice(&self.level.to_le_bytes());
        out.extend_from_slice(&self.seed);
        put_field(&mut out, &self.message);
        put_field(&mut out, &self.public_key);
        put_field(&mut out, &self.secret_key);
        put_field(&mut out, &self.signature);
        out
    }

    /// Parse exactly one record; trailing bytes are an error.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut cursor = Cursor { data, pos: 0 };
        let record = Self::read_one(&mut cursor)?;
        if cursor.pos != data.len() {
            return Err(Error::MalformedEncoding);
        }
        Ok(record)
    }

    /// Parse a stream of concatenated records.
    pub fn read_all(data: &[u8]) -> Result<Vec<Self>> {
        let mut cursor = Cursor { data, pos: 0 };
        let mut records = Vec::new();
        while cursor.pos != data.len() {
            records.push(Self::read_one(&mut cursor)?);
        }
        Ok(records)
    }

    fn read_one(cursor: &mut Cursor<'_>) -> Result<Self> {
        let level = cursor.u32_le()?;
        let seed: [u8; 32] = cursor
            .take(32)?
            .try_into()
            .map_err(|_| Error::MalformedEncoding)?;
        let message = cursor.field()?;
        let public_key = cursor.field()?;
        let secret_key = cursor.field()?;
        let signature = cursor.field()?;

        Ok(Self {
            level,
            seed,
            message,
            public_key,
            secret_key,
            signature,
        })
    }

    /// Generate a record by running deterministic keygen and signing.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameters`] for a level tag this build does not
    /// carry.
    pub fn generate(level: u32, seed: [u8; 32], message: &[u8]) -> Result<Self> {
        let rnd = [0u8; 32];
        let (secret_key, public_key, signature) = match level {
            #[cfg(feature = "sign-44")]
            44 => {
                use crate::params::sign_44::*;
                let (sk, pk) = crate::sign::sign_keygen::<K, L, ETA>(&seed);
                let sig = crate::sign::sign_message::<
                    K,
                    L,
                    ETA,
                    BETA,
                    GAMMA1,
                    GAMMA2,
                    TAU,
                    OMEGA,
                    C_TILDE_BYTES,
                >(&sk, message, &rnd)
                .ok_or(Error::BoundsViolation)?;
                (sk, pk, sig)
            }
            #[cfg(feature = "sign-65")]
            65 => {
                use crate::params::sign_65::*;
                let (sk, pk) = crate::sign::sign_keygen::<K, L, ETA>(&seed);
                let sig = crate::sign::sign_message::<
                    K,
                    L,
                    ETA,
                    BETA,
                    GAMMA1,
                    GAMMA2,
                    TAU,
                    OMEGA,
                    C_TILDE_BYTES,
                >(&sk, message, &rnd)
                .ok_or(Error::BoundsViolation)?;
                (sk, pk, sig)
            }
            #[cfg(feature = "sign-87")]
            87 => {
                use crate::params::sign_87::*;
                let (sk, pk) = crate::sign::sign_keygen::<K, L, ETA>(&seed);
                let sig = crate::sign::sign_message::<
                    K,
                    L,
                    ETA,
                    BETA,
                    GAMMA1,
                    GAMMA2,
                    TAU,
                    OMEGA,
                    C_TILDE_BYTES,
                >(&sk, message, &rnd)
                .ok_or(Error::BoundsViolation)?;
                (sk, pk, sig)
            }
            _ => return Err(Error::InvalidParameters),
        };

        Ok(Self {
            level,
            seed,
            message: message.to_vec(),
            public_key,
            secret_key,
            signature,
        })
    }

    /// Re-run keygen and signing from the stored seed and compare every
    /// byte against the stored expectations.
    pub fn check(&self) -> Result<bool> {
        let regenerated = Self::generate(self.level, self.seed, &self.message)?;
        Ok(regenerated == *self)
    }
}
