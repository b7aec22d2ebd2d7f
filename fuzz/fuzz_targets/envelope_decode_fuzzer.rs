//! Fuzz target for envelope decoding
//!
//! Feeds arbitrary bytes and arbitrary-length keys into every decode path.
//!
//! # Invariants
//!
//! - Decoding never panics, whatever the input length
//! - Keys of the wrong length are always rejected as key length errors
//! - Inputs below the structural minimum are rejected before verification
//! - Random bytes never verify (a forged MAC or tag is an error, never
//!   plaintext)

#![no_main]

use arbitrary::Arbitrary;
use courier_crypto::RustCryptoPrimitives;
use courier_envelope::{
    ATTACHMENT_KEY_SIZE, ATTACHMENT_MIN_SIZE, EnvelopeCodec, EnvelopeError, PROFILE_KEY_SIZE,
    PROFILE_MIN_SIZE, SIGNALING_KEY_SIZE, SIGNALING_MIN_SIZE,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Target {
    Signaling,
    Attachment { digest: Option<[u8; 32]> },
    Profile,
    ProfileName,
    ProfileNameBase64 { encoded: String },
}

#[derive(Debug, Arbitrary)]
struct DecodeInput {
    target: Target,
    key: Vec<u8>,
    envelope: Vec<u8>,
}

fn expect_rejected(
    result: Result<Vec<u8>, EnvelopeError>,
    key_len: usize,
    key: &[u8],
    min: usize,
    envelope: &[u8],
) {
    match result {
        Err(EnvelopeError::InvalidKeyLength { .. }) => {
            assert_ne!(key.len(), key_len, "correct key length must not be rejected");
        },
        Err(EnvelopeError::InvalidEnvelopeLength { .. }) => {
            assert_eq!(key.len(), key_len);
            assert!(envelope.len() < min, "long enough envelope must not be rejected");
        },
        Err(_) => {
            assert_eq!(key.len(), key_len);
        },
        Ok(_) => {
            panic!("random bytes must never authenticate");
        },
    }
}

fuzz_target!(|input: DecodeInput| {
    let codec = EnvelopeCodec::new(RustCryptoPrimitives);
    let key = &input.key;
    let envelope = &input.envelope;

    match input.target {
        Target::Signaling => {
            let result = codec.decode_signaling(envelope, key);
            expect_rejected(result, SIGNALING_KEY_SIZE, key, SIGNALING_MIN_SIZE, envelope);
        },
        Target::Attachment { digest } => {
            let result = codec.decrypt_attachment(envelope, key, digest.as_ref().map(|d| &d[..]));
            expect_rejected(result, ATTACHMENT_KEY_SIZE, key, ATTACHMENT_MIN_SIZE, envelope);
        },
        Target::Profile => {
            let result = codec.decrypt_profile(envelope, key);
            expect_rejected(result, PROFILE_KEY_SIZE, key, PROFILE_MIN_SIZE, envelope);
        },
        Target::ProfileName => {
            let result = codec.decrypt_profile_name(envelope, key);
            expect_rejected(result, PROFILE_KEY_SIZE, key, PROFILE_MIN_SIZE, envelope);
        },
        Target::ProfileNameBase64 { encoded } => {
            // Only checks for panics; the decoded length is not known up front
            let _ = codec.decrypt_profile_name_base64(&encoded, key);
        },
    }
});
