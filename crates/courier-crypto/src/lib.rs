//! Courier Cryptographic Primitives
//!
//! The primitive facade consumed by the envelope codec. Every operation the
//! codec needs (block cipher, MAC, digest, randomness, AEAD) is reached
//! through the [`Primitives`] trait so that the codec can be driven by the
//! production backend or by a test double that records or counts calls.
//!
//! # Capabilities
//!
//! ```text
//! encrypt / decrypt        AES-256-CBC, PKCS#7 padding
//! compute_mac / verify_mac HMAC-SHA256, truncated verification supported
//! digest                   SHA-256
//! random_bytes             OS CSPRNG
//! aead_encrypt / decrypt   AES-256-GCM, 96-bit nonce, 128-bit tag
//! ```
//!
//! # Security
//!
//! - MAC and digest comparisons go through [`constant_time_eq`], whose
//!   running time does not depend on the position of the first differing
//!   byte
//! - Failed verification never yields data; callers get a
//!   [`PrimitiveError`] and nothing else
//! - Cipher state holding expanded keys is dropped at the end of each call

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod constant_time;
pub mod error;
pub mod primitives;
pub mod rust_crypto;

pub use constant_time::constant_time_eq;
pub use error::PrimitiveError;
pub use primitives::{
    AEAD_NONCE_SIZE, AEAD_TAG_SIZE, CIPHER_IV_SIZE, CIPHER_KEY_SIZE, DIGEST_SIZE, MAC_SIZE,
    Primitives,
};
pub use rust_crypto::RustCryptoPrimitives;
