//! The primitive capability trait
//!
//! The envelope codec receives an implementation of [`Primitives`] at
//! construction time and never touches a cipher directly. Production code
//! uses [`crate::RustCryptoPrimitives`]; tests substitute doubles that count
//! or record calls.

use crate::{constant_time::constant_time_eq, error::PrimitiveError};

/// Symmetric cipher key size (AES-256)
pub const CIPHER_KEY_SIZE: usize = 32;

/// Symmetric cipher IV size (one AES block)
pub const CIPHER_IV_SIZE: usize = 16;

/// Full HMAC-SHA256 tag size
pub const MAC_SIZE: usize = 32;

/// SHA-256 digest size
pub const DIGEST_SIZE: usize = 32;

/// AEAD nonce size (96 bits)
pub const AEAD_NONCE_SIZE: usize = 12;

/// AEAD authentication tag size (128 bits)
pub const AEAD_TAG_SIZE: usize = 16;

/// Cryptographic capabilities required by the envelope codec.
///
/// # Invariants
///
/// Implementations MUST guarantee:
///
/// - `verify_mac` compares in constant time and never succeeds on a tag of
///   the wrong length
/// - `aead_decrypt` returns [`PrimitiveError::AuthenticationFailed`] on tag
///   mismatch and never returns unauthenticated plaintext
/// - `random_bytes` draws from a cryptographically secure source in
///   production
/// - Calls share no mutable state, so one instance may serve concurrent
///   callers
pub trait Primitives: Send + Sync {
    /// Encrypt `plaintext` under `key` and `iv` (CBC semantics).
    fn encrypt(&self, key: &[u8], plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>, PrimitiveError>;

    /// Decrypt `ciphertext` under `key` and `iv` (CBC semantics).
    fn decrypt(&self, key: &[u8], ciphertext: &[u8], iv: &[u8])
    -> Result<Vec<u8>, PrimitiveError>;

    /// Compute a full-length keyed MAC over `data`.
    fn compute_mac(&self, key: &[u8], data: &[u8]) -> Result<[u8; MAC_SIZE], PrimitiveError>;

    /// Verify that `expected` matches the first `length` bytes of the MAC
    /// over `data`.
    ///
    /// `expected` must be exactly `length` bytes and `length` may not exceed
    /// [`MAC_SIZE`]. Truncated comparison is how the signaling envelope
    /// carries a 10-byte tag.
    fn verify_mac(
        &self,
        data: &[u8],
        key: &[u8],
        expected: &[u8],
        length: usize,
    ) -> Result<(), PrimitiveError> {
        if expected.len() != length || length > MAC_SIZE {
            return Err(PrimitiveError::BadMacLength { expected: length, actual: expected.len() });
        }

        let calculated = self.compute_mac(key, data)?;
        if constant_time_eq(&calculated[..length], expected) {
            Ok(())
        } else {
            Err(PrimitiveError::MacMismatch)
        }
    }

    /// One-way digest of `data`.
    fn digest(&self, data: &[u8]) -> [u8; DIGEST_SIZE];

    /// Fill `buffer` with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]) -> Result<(), PrimitiveError>;

    /// AEAD-encrypt `plaintext`, returning `ciphertext || tag`.
    ///
    /// `tag_len` is in bytes; only [`AEAD_TAG_SIZE`] is supported.
    fn aead_encrypt(
        &self,
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        tag_len: usize,
    ) -> Result<Vec<u8>, PrimitiveError>;

    /// AEAD-decrypt `ciphertext || tag`, verifying the tag first.
    fn aead_decrypt(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        tag_len: usize,
    ) -> Result<Vec<u8>, PrimitiveError>;
}
