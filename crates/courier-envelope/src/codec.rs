//! The envelope codec and its injected primitive facade

use courier_crypto::{PrimitiveError, Primitives, RustCryptoPrimitives};

use crate::{config::CodecConfig, error::EnvelopeError, keys::EnvelopeKind};

/// Encodes and decodes signaling, attachment and profile envelopes.
///
/// The codec owns no mutable state. Every operation takes `&self`, works on
/// caller-owned buffers, and may run concurrently with any other operation,
/// including on the same key material.
///
/// Cryptographic work is delegated to `P`, supplied at construction.
/// Verification always completes before any decryption is attempted, and no
/// operation returns partially verified plaintext.
#[derive(Debug, Clone, Default)]
pub struct EnvelopeCodec<P = RustCryptoPrimitives> {
    primitives: P,
    config: CodecConfig,
}

impl<P: Primitives> EnvelopeCodec<P> {
    /// Create a codec over `primitives` with the default configuration.
    pub fn new(primitives: P) -> Self {
        Self::with_config(primitives, CodecConfig::default())
    }

    /// Create a codec over `primitives` with an explicit configuration.
    ///
    /// Out-of-range fields are clamped, see [`CodecConfig`].
    pub fn with_config(primitives: P, config: CodecConfig) -> Self {
        Self { primitives, config: config.normalized() }
    }

    /// Active configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// The injected primitive facade.
    pub fn primitives(&self) -> &P {
        &self.primitives
    }

    /// Draw `len` bytes from the facade's CSPRNG.
    ///
    /// Callers use this to mint attachment keys and IVs.
    pub fn random_bytes(&self, len: usize) -> Result<Vec<u8>, EnvelopeError> {
        let mut buffer = vec![0u8; len];
        self.primitives.random_bytes(&mut buffer)?;
        Ok(buffer)
    }
}

/// Classify a failed MAC verification.
///
/// An authentication failure becomes [`EnvelopeError::IntegrityFailure`];
/// anything else is passed through as a primitive error.
pub(crate) fn mac_failure(kind: EnvelopeKind, err: PrimitiveError) -> EnvelopeError {
    if err.is_authentication_failure() {
        tracing::warn!(%kind, "envelope MAC verification failed");
        EnvelopeError::IntegrityFailure { kind }
    } else {
        EnvelopeError::Primitive(err)
    }
}
