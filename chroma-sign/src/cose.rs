//! COSE_Sign1 envelope with a minimal CBOR codec.
//!
//! The envelope is a definite-length four-element CBOR array of byte
//! strings: protected header, unprotected header, payload, signature. The
//! protected header is itself a definite-length CBOR map with the single
//! key 1 (`alg`) mapping to the algorithm identifier. Algorithm codes are
//! caller-supplied and carried verbatim; no registry lookup happens here.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use chroma_core::{Error, Result};

/// Algorithm identifier for the level-44 signature scheme.
pub const ALG_LEVEL_44: i64 = -48;
/// Algorithm identifier for the level-65 signature scheme.
pub const ALG_LEVEL_65: i64 = -49;
/// Algorithm identifier for the level-87 signature scheme.
pub const ALG_LEVEL_87: i64 = -50;

/// CBOR major types used by the envelope.
mod major {
    pub const UNSIGNED_INT: u8 = 0;
    pub const NEGATIVE_INT: u8 = 1;
    pub const BYTE_STRING: u8 = 2;
    pub const ARRAY: u8 = 4;
    pub const MAP: u8 = 5;
}

/// Encode a CBOR head: major type plus argument, shortest form.
fn encode_head(major_type: u8, value: u64, out: &mut Vec<u8>) {
    let m = major_type << 5;
    if value < 24 {
        out.push(m | value as u8);
    } else if value <= 0xFF {
        out.push(m | 24);
        out.push(value as u8);
    } else if value <= 0xFFFF {
        out.push(m | 25);
        out.extend_from_slice(&(value as u16).to_be_bytes());
    } else if value <= 0xFFFF_FFFF {
        out.push(m | 26);
        out.extend_from_slice(&(value as u32).to_be_bytes());
    } else {
        out.push(m | 27);
        out.extend_from_slice(&value.to_be_bytes());
    }
}

/// Encode a signed integer (major type 0 or 1).
fn encode_int(value: i64, out: &mut Vec<u8>) {
    if value >= 0 {
        encode_head(major::UNSIGNED_INT, value as u64, out);
    } else {
        encode_head(major::NEGATIVE_INT, (-1 - value) as u64, out);
    }
}

/// Encode a byte string.
fn encode_bstr(data: &[u8], out: &mut Vec<u8>) {
    encode_head(major::BYTE_STRING, data.len() as u64, out);
    out.extend_from_slice(data);
}

/// Cursor-based strict CBOR reader.
struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn byte(&mut self) -> Result<u8> {
        let b = *self.data.get(self.pos).ok_or(Error::MalformedEncoding)?;
        self.pos += 1;
        Ok(b)
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(n).ok_or(Error::MalformedEncoding)?;
        let slice = self.data.get(self.pos..end).ok_or(Error::MalformedEncoding)?;
        self.pos = end;
        Ok(slice)
    }

    /// Read a head, checking the major type. Definite lengths only.
    fn head(&mut self, expected_major: u8) -> Result<u64> {
        let initial = self.byte()?;
        if initial >> 5 != expected_major {
            return Err(Error::MalformedEncoding);
        }
        let minor = initial & 0x1F;
        match minor {
            0..=23 => Ok(minor as u64),
            24 => Ok(self.byte()? as u64),
            25 => {
                let b = self.take(2)?;
                Ok(u16::from_be_bytes([b[0], b[1]]) as u64)
            }
            26 => {
                let b = self.take(4)?;
                Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]) as u64)
            }
            27 => {
                let b = self.take(8)?;
                Ok(u64::from_be_bytes([
                    b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
                ]))
            }
            // indefinite lengths and reserved minors are structural errors
            _ => Err(Error::MalformedEncoding),
        }
    }

    fn bstr(&mut self) -> Result<&'a [u8]> {
        let len = self.head(major::BYTE_STRING)?;
        let len = usize::try_from(len).map_err(|_| Error::MalformedEncoding)?;
        self.take(len)
    }

    /// Read a signed integer of either integer major type.
    fn int(&mut self) -> Result<i64> {
        let initial = *self.data.get(self.pos).ok_or(Error::MalformedEncoding)?;
        match initial >> 5 {
            0 => {
                let v = self.head(major::UNSIGNED_INT)?;
                i64::try_from(v).map_err(|_| Error::MalformedEncoding)
            }
            1 => {
                let v = self.head(major::NEGATIVE_INT)?;
                let v = i64::try_from(v).map_err(|_| Error::MalformedEncoding)?;
                Ok(-1 - v)
            }
            _ => Err(Error::MalformedEncoding),
        }
    }

    fn finished(&self) -> bool {
        self.pos == self.data.len()
    }
}

/// A single-signer envelope bundling a signature with its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoseSign1 {
    /// CBOR-encoded protected header (the `{1: alg}` map).
    pub protected: Vec<u8>,
    /// Unprotected header bytes (empty in this profile).
    pub unprotected: Vec<u8>,
    /// Message payload.
    pub payload: Vec<u8>,
    /// Raw signature bytes.
    pub signature: Vec<u8>,
}

impl CoseSign1 {
    /// Bundle a raw signature, its message, and an algorithm identifier.
    pub fn new(message: &[u8], signature: &[u8], alg: i64) -> Self {
        let mut protected = Vec::with_capacity(11);
        encode_head(major::MAP, 1, &mut protected);
        encode_int(1, &mut protected); // key 1 = alg
        encode_int(alg, &mut protected);

        Self {
            protected,
            unprotected: Vec::new(),
            payload: message.to_vec(),
            signature: signature.to_vec(),
        }
    }

    /// The algorithm identifier from the protected header.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedEncoding`] if the protected header is not the
    /// single-entry `{1: alg}` map.
    pub fn algorithm(&self) -> Result<i64> {
        let mut r = Reader::new(&self.protected);
        if r.head(major::MAP)? != 1 {
            return Err(Error::MalformedEncoding);
        }
        if r.int()? != 1 {
            return Err(Error::MalformedEncoding);
        }
        let alg = r.int()?;
        if !r.finished() {
            return Err(Error::MalformedEncoding);
        }
        Ok(alg)
    }

    /// Encode the envelope as a definite-length CBOR array of four byte
    /// strings.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            1 + self.protected.len()
                + self.unprotected.len()
                + self.payload.len()
                + self.signature.len()
                + 16,
        );
        encode_head(major::ARRAY, 4, &mut out);
        encode_bstr(&self.protected, &mut out);
        encode_bstr(&self.unprotected, &mut out);
        encode_bstr(&self.payload, &mut out);
        encode_bstr(&self.signature, &mut out);
        out
    }

    /// Decode an envelope, strictly.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedEncoding`] if the outer array does not hold
    /// exactly four byte strings, any item has the wrong major type, or
    /// bytes remain after the array.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut r = Reader::new(data);
        if r.head(major::ARRAY)? != 4 {
            return Err(Error::MalformedEncoding);
        }
        let protected = r.bstr()?.to_vec();
        let unprotected = r.bstr()?.to_vec();
        let payload = r.bstr()?.to_vec();
        let signature = r.bstr()?.to_vec();
        if !r.finished() {
            return Err(Error::MalformedEncoding);
        }

        Ok(Self {
            protected,
            unprotected,
            payload,
            signature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let env = CoseSign1::new(b"payload bytes", &[0xAB; 64], ALG_LEVEL_65);
        let bytes = env.to_bytes();
        let back = CoseSign1::from_bytes(&bytes).unwrap();
        assert_eq!(env, back);
        assert_eq!(back.algorithm().unwrap(), ALG_LEVEL_65);
        assert_eq!(back.payload, b"payload bytes");
        assert_eq!(back.signature, vec![0xAB; 64]);
    }

    #[test]
    fn test_protected_header_shape() {
        // {1: -48} encodes as a2-free single-pair map: A1 01 38 2F
        let env = CoseSign1::new(b"", b"", ALG_LEVEL_44);
        assert_eq!(env.protected, vec![0xA1, 0x01, 0x38, 0x2F]);
    }

    #[test]
    fn test_positive_and_large_algorithms() {
        for alg in [0i64, 1, 23, 24, 255, 256, 65536, -1, -24, -25, -65537] {
            let env = CoseSign1::new(b"m", b"s", alg);
            assert_eq!(env.algorithm().unwrap(), alg, "alg {alg}");
            let back = CoseSign1::from_bytes(&env.to_bytes()).unwrap();
            assert_eq!(back.algorithm().unwrap(), alg);
        }
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let env = CoseSign1::new(b"m", b"s", ALG_LEVEL_87);
        let mut bytes = env.to_bytes();
        bytes.push(0x00);
        assert_eq!(
            CoseSign1::from_bytes(&bytes).unwrap_err(),
            Error::MalformedEncoding
        );
    }

    #[test]
    fn test_truncation_rejected() {
        let env = CoseSign1::new(b"message", &[1u8; 100], ALG_LEVEL_44);
        let bytes = env.to_bytes();
        for cut in [0, 1, bytes.len() / 2, bytes.len() - 1] {
            assert_eq!(
                CoseSign1::from_bytes(&bytes[..cut]).unwrap_err(),
                Error::MalformedEncoding,
                "cut at {cut}"
            );
        }
    }

    #[test]
    fn test_wrong_arity_rejected() {
        // array(3) of three byte strings
        let mut bytes = vec![0x83];
        for _ in 0..3 {
            bytes.push(0x41);
            bytes.push(0x00);
        }
        assert_eq!(
            CoseSign1::from_bytes(&bytes).unwrap_err(),
            Error::MalformedEncoding
        );
    }

    #[test]
    fn test_wrong_major_type_rejected() {
        // array(4) whose first item is a text string, not a byte string
        let bytes = vec![0x84, 0x61, 0x61, 0x40, 0x40, 0x40];
        assert_eq!(
            CoseSign1::from_bytes(&bytes).unwrap_err(),
            Error::MalformedEncoding
        );
    }

    #[test]
    fn test_indefinite_length_rejected() {
        // indefinite-length array header
        let bytes = vec![0x9F, 0x40, 0x40, 0x40, 0x40, 0xFF];
        assert_eq!(
            CoseSign1::from_bytes(&bytes).unwrap_err(),
            Error::MalformedEncoding
        );
    }

    #[test]
    fn test_garbage_protected_header() {
        let mut env = CoseSign1::new(b"m", b"s", ALG_LEVEL_44);
        env.protected = vec![0xFF, 0x00];
        assert_eq!(env.algorithm().unwrap_err(), Error::MalformedEncoding);

        // map with the wrong key
        let mut protected = Vec::new();
        encode_head(major::MAP, 1, &mut protected);
        encode_int(3, &mut protected);
        encode_int(-48, &mut protected);
        env.protected = protected;
        assert_eq!(env.algorithm().unwrap_err(), Error::MalformedEncoding);
    }
}
