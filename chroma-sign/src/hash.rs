//! SHAKE-based hashing for the signature scheme.
//!
//! The sponge with the 168-byte rate (SHAKE128) expands the public matrix;
//! the 136-byte rate (SHAKE256) serves everywhere a wider capacity is
//! needed: key digests, the message representative, the signing seed, and
//! the commitment hash.

use sha3::{
    digest::{ExtendableOutput, Update, XofReader},
    Shake128, Shake256,
};

/// SHAKE256 XOF wrapper: absorb at construction, squeeze on demand.
pub struct Shake256Xof {
    reader: sha3::Shake256Reader,
}

impl Shake256Xof {
    /// Absorb `data` and finalise the sponge.
    ///
    /// Seeds of any length absorb without error; padding and the domain
    /// byte are applied at finalisation.
    pub fn from_data(data: &[u8]) -> Self {
        let mut hasher = Shake256::default();
        hasher.update(data);
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Squeeze bytes, re-permuting whenever the rate is exhausted.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// SHAKE128 XOF wrapper for matrix expansion.
pub struct Shake128Xof {
    reader: sha3::Shake128Reader,
}

impl Shake128Xof {
    /// Absorb rho and the (row, col) position of the matrix entry.
    ///
    /// Column byte first: the matrix is expanded in column-major index
    /// order.
    pub fn new(rho: &[u8; 32], row: u8, col: u8) -> Self {
        let mut hasher = Shake128::default();
        hasher.update(rho);
        hasher.update(&[col, row]);
        Self {
            reader: hasher.finalize_xof(),
        }
    }

    /// Squeeze bytes from the XOF.
    pub fn squeeze(&mut self, out: &mut [u8]) {
        self.reader.read(out);
    }
}

/// H: SHAKE256 with caller-chosen output length.
pub fn h(input: &[u8], output: &mut [u8]) {
    let mut hasher = Shake256::default();
    hasher.update(input);
    let mut reader = hasher.finalize_xof();
    reader.read(output);
}

/// H over two concatenated inputs.
pub fn h2(a: &[u8], b: &[u8], output: &mut [u8]) {
    let mut hasher = Shake256::default();
    hasher.update(a);
    hasher.update(b);
    let mut reader = hasher.finalize_xof();
    reader.read(output);
}

/// H over three concatenated inputs.
pub fn h3(a: &[u8], b: &[u8], c: &[u8], output: &mut [u8]) {
    let mut hasher = Shake256::default();
    hasher.update(a);
    hasher.update(b);
    hasher.update(c);
    let mut reader = hasher.finalize_xof();
    reader.read(output);
}

/// tr = H(pk, 64): the public-key binding digest stored in the secret key.
pub fn hash_pk(pk: &[u8]) -> [u8; 64] {
    let mut tr = [0u8; 64];
    h(pk, &mut tr);
    tr
}

/// mu = H(tr ‖ m, 64): the message representative.
pub fn hash_message(tr: &[u8; 64], message: &[u8]) -> [u8; 64] {
    let mut mu = [0u8; 64];
    h2(tr, message, &mut mu);
    mu
}
