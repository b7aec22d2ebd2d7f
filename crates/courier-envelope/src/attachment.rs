//! Attachment envelope
//!
//! Large binary blobs encrypted under a 64-byte attachment key.
//!
//! ```text
//! iv(16) | ciphertext(N) | mac(32)
//! ```
//!
//! The MAC covers `iv || ciphertext`. A detached SHA-256 digest covers the
//! whole envelope including the MAC, so a receiver holding a digest pinned
//! out-of-band (for example in a signed attachment pointer) can reject an
//! envelope that was re-encrypted by someone else holding the same keys.
//!
//! Decryption order is fixed: MAC, then digest (when supplied), then
//! decrypt.

use courier_crypto::{CIPHER_IV_SIZE, DIGEST_SIZE, MAC_SIZE, Primitives, constant_time_eq};

use crate::{
    codec::{EnvelopeCodec, mac_failure},
    error::EnvelopeError,
    keys::{ATTACHMENT_KEY_SIZE, AttachmentSubKeys, EnvelopeKind},
};

/// Smallest structurally valid attachment envelope
pub const ATTACHMENT_MIN_SIZE: usize = CIPHER_IV_SIZE + MAC_SIZE;

/// An encrypted attachment and its detached digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedAttachment {
    /// The complete `iv || ciphertext || mac` envelope
    pub ciphertext: Vec<u8>,
    /// SHA-256 over the complete envelope
    pub digest: [u8; DIGEST_SIZE],
}

impl<P: Primitives> EnvelopeCodec<P> {
    /// Encrypt an attachment.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: `keys` is not 64 bytes
    /// - `InvalidIvLength`: `iv` is not 16 bytes
    pub fn encrypt_attachment(
        &self,
        plaintext: &[u8],
        keys: &[u8],
        iv: &[u8],
    ) -> Result<EncryptedAttachment, EnvelopeError> {
        let keys = AttachmentSubKeys::split(keys, EnvelopeKind::Attachment)?;

        if iv.len() != CIPHER_IV_SIZE {
            return Err(EnvelopeError::InvalidIvLength {
                expected: CIPHER_IV_SIZE,
                actual: iv.len(),
            });
        }

        let ciphertext = self.primitives().encrypt(keys.encryption(), plaintext, iv)?;

        let mut envelope = Vec::with_capacity(CIPHER_IV_SIZE + ciphertext.len() + MAC_SIZE);
        envelope.extend_from_slice(iv);
        envelope.extend_from_slice(&ciphertext);

        let mac = self.primitives().compute_mac(keys.mac(), &envelope)?;
        envelope.extend_from_slice(&mac);

        let digest = self.primitives().digest(&envelope);

        Ok(EncryptedAttachment { ciphertext: envelope, digest })
    }

    /// Verify and decrypt an attachment envelope.
    ///
    /// When `their_digest` is `Some`, the SHA-256 of the received envelope
    /// must equal it exactly (32 bytes, constant-time comparison).
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: `keys` is not 64 bytes
    /// - `InvalidEnvelopeLength`: envelope is shorter than 48 bytes
    /// - `IntegrityFailure`: MAC mismatch
    /// - `DigestMismatch`: pinned digest does not match
    pub fn decrypt_attachment(
        &self,
        envelope: &[u8],
        keys: &[u8],
        their_digest: Option<&[u8]>,
    ) -> Result<Vec<u8>, EnvelopeError> {
        let keys = AttachmentSubKeys::split(keys, EnvelopeKind::Attachment)?;

        if envelope.len() < ATTACHMENT_MIN_SIZE {
            return Err(EnvelopeError::InvalidEnvelopeLength {
                kind: EnvelopeKind::Attachment,
                minimum: ATTACHMENT_MIN_SIZE,
                actual: envelope.len(),
            });
        }

        let (signed, mac) = envelope.split_at(envelope.len() - MAC_SIZE);
        let (iv, ciphertext) = signed.split_at(CIPHER_IV_SIZE);

        self.primitives()
            .verify_mac(signed, keys.mac(), mac, MAC_SIZE)
            .map_err(|e| mac_failure(EnvelopeKind::Attachment, e))?;

        if let Some(their_digest) = their_digest {
            let our_digest = self.primitives().digest(envelope);
            if !constant_time_eq(&our_digest, their_digest) {
                tracing::warn!(envelope_len = envelope.len(), "attachment digest mismatch");
                return Err(EnvelopeError::DigestMismatch);
            }
        }

        let plaintext = self.primitives().decrypt(keys.encryption(), ciphertext, iv)?;

        tracing::debug!(
            envelope_len = envelope.len(),
            plaintext_len = plaintext.len(),
            digest_checked = their_digest.is_some(),
            "decrypted attachment"
        );

        Ok(plaintext)
    }

    /// Generate fresh 64-byte attachment key material.
    pub fn generate_attachment_keys(&self) -> Result<Vec<u8>, EnvelopeError> {
        self.random_bytes(ATTACHMENT_KEY_SIZE)
    }

    /// Generate a fresh attachment IV.
    pub fn generate_attachment_iv(&self) -> Result<[u8; CIPHER_IV_SIZE], EnvelopeError> {
        let mut iv = [0u8; CIPHER_IV_SIZE];
        self.primitives().random_bytes(&mut iv)?;
        Ok(iv)
    }
}
