//! Error types for envelope operations

use courier_crypto::PrimitiveError;
use thiserror::Error;

use crate::keys::EnvelopeKind;

/// Errors from envelope encoding and decoding.
///
/// Every variant is terminal for the call: no partial plaintext accompanies
/// an error and nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvelopeError {
    /// Key material does not match the exact size for the envelope type
    #[error("invalid {kind} key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Envelope type the key was supplied for
        kind: EnvelopeKind,
        /// Required key length
        expected: usize,
        /// Supplied key length
        actual: usize,
    },

    /// Caller-supplied IV has the wrong length
    #[error("invalid iv length: expected {expected}, got {actual}")]
    InvalidIvLength {
        /// Required IV length
        expected: usize,
        /// Supplied IV length
        actual: usize,
    },

    /// Envelope is shorter than its structural minimum
    #[error("invalid {kind} envelope length: need at least {minimum}, got {actual}")]
    InvalidEnvelopeLength {
        /// Envelope type being decoded
        kind: EnvelopeKind,
        /// Minimum structural length
        minimum: usize,
        /// Received length
        actual: usize,
    },

    /// Signaling envelope carries a version byte other than the supported one
    #[error("unsupported signaling version: {0}")]
    UnsupportedVersion(u8),

    /// MAC verification failed; the payload was not decrypted
    #[error("{kind} envelope failed integrity check")]
    IntegrityFailure {
        /// Envelope type that failed verification
        kind: EnvelopeKind,
    },

    /// Pinned attachment digest does not match the received envelope
    #[error("attachment digest mismatch")]
    DigestMismatch,

    /// Profile field failed AEAD authentication
    #[error("failed to decrypt profile data: the profile key has most likely changed")]
    ProfileKeyRotated,

    /// Profile name does not fit the padded field width
    #[error("profile name too long: at most {max} bytes, got {actual}")]
    NameTooLong {
        /// Padded field width
        max: usize,
        /// Supplied name length
        actual: usize,
    },

    /// Transport encoding (base64) of an envelope is malformed
    #[error("invalid envelope encoding: {0}")]
    InvalidEncoding(String),

    /// Any other failure reported by the primitive facade
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),
}

impl EnvelopeError {
    /// Returns true if the envelope was altered or forged.
    ///
    /// Callers should discard the payload; retrying with the same keys will
    /// not help.
    pub fn is_tampering(&self) -> bool {
        matches!(self, Self::IntegrityFailure { .. } | Self::DigestMismatch)
    }

    /// Returns true if the sender has likely rotated their profile key.
    ///
    /// Expected during normal operation; callers refetch the key rather than
    /// alerting the user.
    pub fn is_key_rotation(&self) -> bool {
        matches!(self, Self::ProfileKeyRotated)
    }
}
