//! Fuzz target for tamper detection
//!
//! Builds valid envelopes from arbitrary plaintexts and keys, applies an
//! arbitrary corruption, and decodes.
//!
//! # Invariants
//!
//! - Untouched envelopes round-trip exactly
//! - Any XOR corruption is detected: signaling and attachment envelopes fail
//!   with `IntegrityFailure` (or `UnsupportedVersion` for the signaling
//!   version byte), profile envelopes with `ProfileKeyRotated`
//! - Truncation never panics and never yields plaintext

#![no_main]

use arbitrary::Arbitrary;
use courier_crypto::RustCryptoPrimitives;
use courier_envelope::{EnvelopeCodec, EnvelopeError};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Envelope {
    Signaling { key: [u8; 32], mac_key: [u8; 20], iv: [u8; 16] },
    Attachment { key: [u8; 32], mac_key: [u8; 32], iv: [u8; 16], pin_digest: bool },
    Profile { key: [u8; 32] },
}

#[derive(Debug, Arbitrary)]
enum Corruption {
    None,
    Xor { position: usize, mask: u8 },
    Truncate { len: usize },
}

#[derive(Debug, Arbitrary)]
struct TamperInput {
    envelope: Envelope,
    plaintext: Vec<u8>,
    corruption: Corruption,
}

fn corrupt(bytes: &mut Vec<u8>, corruption: &Corruption) -> bool {
    match *corruption {
        Corruption::None => false,
        Corruption::Xor { position, mask } => {
            if mask == 0 || bytes.is_empty() {
                return false;
            }
            let index = position % bytes.len();
            bytes[index] ^= mask;
            true
        },
        Corruption::Truncate { len } => {
            if bytes.is_empty() {
                return false;
            }
            let len = len % bytes.len();
            bytes.truncate(len);
            true
        },
    }
}

fuzz_target!(|input: TamperInput| {
    let codec = EnvelopeCodec::new(RustCryptoPrimitives);
    let plaintext = input.plaintext;

    match input.envelope {
        Envelope::Signaling { key, mac_key, iv } => {
            let mut signaling_key = key.to_vec();
            signaling_key.extend_from_slice(&mac_key);

            let mut message = codec.encode_signaling(&plaintext, &signaling_key, &iv).unwrap();
            let corrupted = corrupt(&mut message, &input.corruption);

            match codec.decode_signaling(&message, &signaling_key) {
                Ok(decoded) => {
                    assert!(!corrupted, "corrupted signaling envelope decoded");
                    assert_eq!(decoded, plaintext);
                },
                Err(EnvelopeError::IntegrityFailure { .. })
                | Err(EnvelopeError::UnsupportedVersion(_))
                | Err(EnvelopeError::InvalidEnvelopeLength { .. }) => {
                    assert!(corrupted, "valid signaling envelope rejected");
                },
                Err(other) => panic!("unexpected signaling error: {other}"),
            }
        },
        Envelope::Attachment { key, mac_key, iv, pin_digest } => {
            let mut keys = key.to_vec();
            keys.extend_from_slice(&mac_key);

            let encrypted = codec.encrypt_attachment(&plaintext, &keys, &iv).unwrap();
            let mut envelope = encrypted.ciphertext;
            let corrupted = corrupt(&mut envelope, &input.corruption);
            let digest = pin_digest.then_some(&encrypted.digest[..]);

            match codec.decrypt_attachment(&envelope, &keys, digest) {
                Ok(decrypted) => {
                    assert!(!corrupted, "corrupted attachment decrypted");
                    assert_eq!(decrypted, plaintext);
                },
                Err(EnvelopeError::IntegrityFailure { .. })
                | Err(EnvelopeError::InvalidEnvelopeLength { .. }) => {
                    assert!(corrupted, "valid attachment rejected");
                },
                Err(other) => panic!("unexpected attachment error: {other}"),
            }
        },
        Envelope::Profile { key } => {
            if plaintext.is_empty() {
                return;
            }

            let mut envelope = codec.encrypt_profile(&plaintext, &key).unwrap();
            let corrupted = corrupt(&mut envelope, &input.corruption);

            match codec.decrypt_profile(&envelope, &key) {
                Ok(decrypted) => {
                    assert!(!corrupted, "corrupted profile field decrypted");
                    assert_eq!(decrypted, plaintext);
                },
                Err(EnvelopeError::ProfileKeyRotated)
                | Err(EnvelopeError::InvalidEnvelopeLength { .. }) => {
                    assert!(corrupted, "valid profile field rejected");
                },
                Err(other) => panic!("unexpected profile error: {other}"),
            }
        },
    }
});
