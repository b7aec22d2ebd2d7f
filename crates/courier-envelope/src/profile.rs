//! Profile envelope
//!
//! Small profile fields sealed with AES-256-GCM under a 32-byte profile key.
//!
//! ```text
//! nonce(12) | ciphertext(N) | tag(16)
//! ```
//!
//! Names are zero-padded to a fixed width before encryption so the envelope
//! length does not reveal the name length. Unpadding strips trailing zero
//! bytes.
//!
//! An authentication failure here usually means the owner rotated their
//! profile key, so it is reported as [`EnvelopeError::ProfileKeyRotated`]
//! rather than as a generic integrity failure.

use base64::{Engine, engine::general_purpose::STANDARD};
use courier_crypto::{AEAD_NONCE_SIZE, AEAD_TAG_SIZE, PrimitiveError, Primitives};

use crate::{
    codec::EnvelopeCodec,
    error::EnvelopeError,
    keys::{EnvelopeKind, PROFILE_KEY_SIZE, check_key_length},
};

/// Smallest structurally valid profile envelope (at least one content byte)
pub const PROFILE_MIN_SIZE: usize = AEAD_NONCE_SIZE + AEAD_TAG_SIZE + 1;

impl<P: Primitives> EnvelopeCodec<P> {
    /// Encrypt a profile field under a fresh random nonce.
    ///
    /// Empty `data` seals to a 28-byte envelope, one byte below
    /// [`PROFILE_MIN_SIZE`], which [`Self::decrypt_profile`] rejects. Profile
    /// fields are never empty on the wire; names are padded to at least one
    /// byte.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: `key` is not 32 bytes
    pub fn encrypt_profile(&self, data: &[u8], key: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        check_key_length(key, EnvelopeKind::Profile, PROFILE_KEY_SIZE)?;

        let mut nonce = [0u8; AEAD_NONCE_SIZE];
        self.primitives().random_bytes(&mut nonce)?;

        let sealed = self.primitives().aead_encrypt(key, &nonce, data, AEAD_TAG_SIZE)?;

        let mut envelope = Vec::with_capacity(AEAD_NONCE_SIZE + sealed.len());
        envelope.extend_from_slice(&nonce);
        envelope.extend_from_slice(&sealed);
        Ok(envelope)
    }

    /// Authenticate and decrypt a profile field.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: `key` is not 32 bytes
    /// - `InvalidEnvelopeLength`: envelope is shorter than 29 bytes
    /// - `ProfileKeyRotated`: AEAD tag did not verify
    pub fn decrypt_profile(&self, envelope: &[u8], key: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        check_key_length(key, EnvelopeKind::Profile, PROFILE_KEY_SIZE)?;

        if envelope.len() < PROFILE_MIN_SIZE {
            return Err(EnvelopeError::InvalidEnvelopeLength {
                kind: EnvelopeKind::Profile,
                minimum: PROFILE_MIN_SIZE,
                actual: envelope.len(),
            });
        }

        let (nonce, sealed) = envelope.split_at(AEAD_NONCE_SIZE);

        match self.primitives().aead_decrypt(key, nonce, sealed, AEAD_TAG_SIZE) {
            Ok(data) => Ok(data),
            Err(PrimitiveError::AuthenticationFailed) => {
                tracing::debug!(
                    envelope_len = envelope.len(),
                    "profile field failed authentication, key likely rotated"
                );
                Err(EnvelopeError::ProfileKeyRotated)
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Zero-pad `name` to the configured width and encrypt it.
    ///
    /// # Errors
    ///
    /// - `NameTooLong`: `name` is wider than the padded field
    /// - `InvalidKeyLength`: `key` is not 32 bytes
    pub fn encrypt_profile_name(&self, name: &[u8], key: &[u8]) -> Result<Vec<u8>, EnvelopeError> {
        let width = self.config().profile_name_width;
        if name.len() > width {
            return Err(EnvelopeError::NameTooLong { max: width, actual: name.len() });
        }

        let mut padded = vec![0u8; width];
        padded[..name.len()].copy_from_slice(name);

        self.encrypt_profile(&padded, key)
    }

    /// Decrypt a padded profile name and strip the trailing zero padding.
    ///
    /// An all-zero field unpads to an empty name.
    pub fn decrypt_profile_name(
        &self,
        envelope: &[u8],
        key: &[u8],
    ) -> Result<Vec<u8>, EnvelopeError> {
        let mut name = self.decrypt_profile(envelope, key)?;
        name.truncate(unpadded_len(&name));
        Ok(name)
    }

    /// [`Self::encrypt_profile_name`], base64-encoding the envelope.
    pub fn encrypt_profile_name_base64(
        &self,
        name: &[u8],
        key: &[u8],
    ) -> Result<String, EnvelopeError> {
        let envelope = self.encrypt_profile_name(name, key)?;
        Ok(STANDARD.encode(envelope))
    }

    /// [`Self::decrypt_profile_name`] for a base64-encoded envelope, the form
    /// profile names are exchanged in.
    ///
    /// # Errors
    ///
    /// - `InvalidEncoding`: `encoded` is not valid standard base64
    pub fn decrypt_profile_name_base64(
        &self,
        encoded: &str,
        key: &[u8],
    ) -> Result<Vec<u8>, EnvelopeError> {
        let envelope =
            STANDARD.decode(encoded).map_err(|e| EnvelopeError::InvalidEncoding(e.to_string()))?;
        self.decrypt_profile_name(&envelope, key)
    }
}

/// Length of `padded` once trailing zero bytes are removed.
fn unpadded_len(padded: &[u8]) -> usize {
    padded.iter().rposition(|&b| b != 0x00).map_or(0, |last| last + 1)
}
