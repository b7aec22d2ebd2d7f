//! Signaling envelope
//!
//! A single websocket datagram protected by a pre-shared 52-byte signaling
//! key.
//!
//! ```text
//! version(1) = 0x01 | iv(16) | ciphertext(N) | mac(10)
//! ```
//!
//! The MAC is HMAC-SHA256 over `version || iv || ciphertext` truncated to 10
//! bytes. The trailing MAC is verified in constant time before the
//! ciphertext is decrypted.

use courier_crypto::{CIPHER_IV_SIZE, Primitives};

use crate::{
    codec::{EnvelopeCodec, mac_failure},
    error::EnvelopeError,
    keys::{EnvelopeKind, SignalingSubKeys},
};

/// The only supported signaling version byte
pub const SIGNALING_VERSION: u8 = 1;

/// Size of the truncated signaling MAC
pub const SIGNALING_MAC_SIZE: usize = 10;

/// Smallest structurally valid signaling envelope
pub const SIGNALING_MIN_SIZE: usize = 1 + CIPHER_IV_SIZE + SIGNALING_MAC_SIZE;

impl<P: Primitives> EnvelopeCodec<P> {
    /// Verify and decrypt a signaling envelope.
    ///
    /// Checks run in order: key length, envelope length, version byte, MAC.
    /// The ciphertext is decrypted only after the MAC matches.
    ///
    /// # Errors
    ///
    /// - `InvalidKeyLength`: `signaling_key` is not 52 bytes
    /// - `InvalidEnvelopeLength`: `message` is shorter than 27 bytes
    /// - `UnsupportedVersion`: first byte is not 1
    /// - `IntegrityFailure`: MAC mismatch
    pub fn decode_signaling(
        &self,
        message: &[u8],
        signaling_key: &[u8],
    ) -> Result<Vec<u8>, EnvelopeError> {
        let keys = SignalingSubKeys::split(signaling_key, EnvelopeKind::Signaling)?;

        if message.len() < SIGNALING_MIN_SIZE {
            return Err(EnvelopeError::InvalidEnvelopeLength {
                kind: EnvelopeKind::Signaling,
                minimum: SIGNALING_MIN_SIZE,
                actual: message.len(),
            });
        }

        let version = message[0];
        if version != SIGNALING_VERSION {
            return Err(EnvelopeError::UnsupportedVersion(version));
        }

        let (signed, mac) = message.split_at(message.len() - SIGNALING_MAC_SIZE);
        let (iv, ciphertext) = signed[1..].split_at(CIPHER_IV_SIZE);

        self.primitives()
            .verify_mac(signed, keys.mac(), mac, SIGNALING_MAC_SIZE)
            .map_err(|e| mac_failure(EnvelopeKind::Signaling, e))?;

        let plaintext = self.primitives().decrypt(keys.encryption(), ciphertext, iv)?;

        tracing::debug!(
            envelope_len = message.len(),
            plaintext_len = plaintext.len(),
            "decoded signaling envelope"
        );

        Ok(plaintext)
    }

    /// Encrypt `plaintext` into a signaling envelope.
    ///
    /// The sending side of [`Self::decode_signaling`]. The caller supplies
    /// the 16-byte IV.
    pub fn encode_signaling(
        &self,
        plaintext: &[u8],
        signaling_key: &[u8],
        iv: &[u8],
    ) -> Result<Vec<u8>, EnvelopeError> {
        let keys = SignalingSubKeys::split(signaling_key, EnvelopeKind::Signaling)?;

        if iv.len() != CIPHER_IV_SIZE {
            return Err(EnvelopeError::InvalidIvLength {
                expected: CIPHER_IV_SIZE,
                actual: iv.len(),
            });
        }

        let ciphertext = self.primitives().encrypt(keys.encryption(), plaintext, iv)?;

        let mut message =
            Vec::with_capacity(1 + CIPHER_IV_SIZE + ciphertext.len() + SIGNALING_MAC_SIZE);
        message.push(SIGNALING_VERSION);
        message.extend_from_slice(iv);
        message.extend_from_slice(&ciphertext);

        let mac = self.primitives().compute_mac(keys.mac(), &message)?;
        message.extend_from_slice(&mac[..SIGNALING_MAC_SIZE]);

        Ok(message)
    }
}
