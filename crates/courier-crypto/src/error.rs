//! Error types for primitive operations

use thiserror::Error;

/// Errors from the primitive facade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrimitiveError {
    /// Key does not have the length the primitive requires
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Required key length
        expected: usize,
        /// Supplied key length
        actual: usize,
    },

    /// IV or nonce does not have the length the primitive requires
    #[error("invalid iv length: expected {expected}, got {actual}")]
    InvalidIvLength {
        /// Required IV length
        expected: usize,
        /// Supplied IV length
        actual: usize,
    },

    /// Expected MAC has the wrong size for the requested comparison length
    #[error("bad mac length: expected {expected}, got {actual}")]
    BadMacLength {
        /// Requested comparison length
        expected: usize,
        /// Length of the supplied tag
        actual: usize,
    },

    /// Recomputed MAC does not match the supplied tag
    #[error("mac mismatch")]
    MacMismatch,

    /// CBC plaintext padding is malformed
    #[error("invalid cipher padding")]
    Padding,

    /// AEAD tag verification failed
    #[error("aead authentication failed")]
    AuthenticationFailed,

    /// AEAD tag length other than 128 bits was requested
    #[error("unsupported aead tag length: {0} bytes")]
    UnsupportedTagLength(usize),

    /// Plaintext exceeds what the AEAD can seal under one nonce
    #[error("message too large for aead: {0} bytes")]
    MessageTooLarge(usize),

    /// Operating system entropy source failed
    #[error("entropy source failed: {0}")]
    Entropy(String),
}

impl PrimitiveError {
    /// Returns true if the failure means the input did not authenticate.
    ///
    /// Everything else is a caller bug (bad lengths) or an environment
    /// failure (entropy).
    pub fn is_authentication_failure(&self) -> bool {
        matches!(self, Self::MacMismatch | Self::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mac_mismatch_is_authentication_failure() {
        assert!(PrimitiveError::MacMismatch.is_authentication_failure());
        assert!(PrimitiveError::AuthenticationFailed.is_authentication_failure());
    }

    #[test]
    fn length_errors_are_not_authentication_failures() {
        let err = PrimitiveError::InvalidKeyLength { expected: 32, actual: 31 };
        assert!(!err.is_authentication_failure());
        assert!(!PrimitiveError::Padding.is_authentication_failure());
    }

    #[test]
    fn error_display() {
        let err = PrimitiveError::BadMacLength { expected: 10, actual: 32 };
        assert_eq!(err.to_string(), "bad mac length: expected 10, got 32");
    }
}
