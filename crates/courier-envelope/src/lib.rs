//! Courier Envelope Codec
//!
//! Authenticated-encryption envelopes for the three payload classes
//! exchanged with the messaging service. Each class has its own key layout,
//! tag placement and padding rules; all of them verify before decrypting and
//! never return partially verified data.
//!
//! # Wire Formats
//!
//! ```text
//! Signaling   version(1)=0x01 | iv(16) | ciphertext(N) | mac(10)
//! Attachment  iv(16) | ciphertext(N) | mac(32)      + detached digest(32)
//! Profile     nonce(12) | ciphertext(N) | tag(16)
//! ```
//!
//! # Verification Order
//!
//! ```text
//! key length ─▶ envelope length ─▶ (version) ─▶ MAC ─▶ (digest) ─▶ decrypt
//! ```
//!
//! Length checks reject malformed input before any primitive is invoked.
//! MAC and digest comparisons are constant time. A profile AEAD failure is
//! reported as [`EnvelopeError::ProfileKeyRotated`] because it is the
//! expected outcome of a key rotation, not evidence of tampering.
//!
//! # Primitives
//!
//! [`EnvelopeCodec`] is generic over [`courier_crypto::Primitives`] and
//! receives its implementation at construction. Production code uses
//! [`courier_crypto::RustCryptoPrimitives`], which is also the default type
//! parameter.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod attachment;
pub mod codec;
pub mod config;
pub mod error;
pub mod keys;
pub mod profile;
pub mod signaling;

pub use attachment::{ATTACHMENT_MIN_SIZE, EncryptedAttachment};
pub use codec::EnvelopeCodec;
pub use config::{CodecConfig, DEFAULT_PROFILE_NAME_WIDTH, MIN_PROFILE_NAME_WIDTH};
pub use error::EnvelopeError;
pub use keys::{ATTACHMENT_KEY_SIZE, EnvelopeKind, PROFILE_KEY_SIZE, SIGNALING_KEY_SIZE};
pub use profile::PROFILE_MIN_SIZE;
pub use signaling::{SIGNALING_MAC_SIZE, SIGNALING_MIN_SIZE, SIGNALING_VERSION};
