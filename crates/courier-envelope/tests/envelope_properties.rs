//! Property-based tests for the envelope codec
//!
//! These tests verify the fundamental invariants of the three envelopes:
//!
//! 1. **Round-trip**: decrypt(encrypt(m)) == m for every envelope type
//! 2. **Tamper detection**: any single flipped bit is rejected, never
//!    decrypted into a wrong plaintext
//! 3. **Digest pinning**: a wrong pinned digest fails even with a valid MAC
//! 4. **Unpadding**: profile names survive the fixed-width padding

use courier_crypto::RustCryptoPrimitives;
use courier_envelope::{
    ATTACHMENT_KEY_SIZE, EnvelopeCodec, EnvelopeError, EnvelopeKind, PROFILE_KEY_SIZE,
    SIGNALING_KEY_SIZE,
};
use proptest::prelude::*;

fn codec() -> EnvelopeCodec {
    EnvelopeCodec::new(RustCryptoPrimitives)
}

fn key_bytes(len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), len)
}

fn strip_trailing_zeros(name: &[u8]) -> Vec<u8> {
    let end = name.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    name[..end].to_vec()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_signaling_roundtrip(
        plaintext in prop::collection::vec(any::<u8>(), 0..512),
        key in key_bytes(SIGNALING_KEY_SIZE),
        iv in any::<[u8; 16]>(),
    ) {
        let codec = codec();
        let message = codec.encode_signaling(&plaintext, &key, &iv).unwrap();
        let decoded = codec.decode_signaling(&message, &key).unwrap();

        prop_assert_eq!(decoded, plaintext);
    }

    #[test]
    fn prop_attachment_roundtrip(
        plaintext in prop::collection::vec(any::<u8>(), 0..2048),
        keys in key_bytes(ATTACHMENT_KEY_SIZE),
        iv in any::<[u8; 16]>(),
    ) {
        let codec = codec();
        let encrypted = codec.encrypt_attachment(&plaintext, &keys, &iv).unwrap();

        let without_digest = codec.decrypt_attachment(&encrypted.ciphertext, &keys, None).unwrap();
        let with_digest = codec
            .decrypt_attachment(&encrypted.ciphertext, &keys, Some(&encrypted.digest))
            .unwrap();

        prop_assert_eq!(&without_digest, &plaintext);
        prop_assert_eq!(&with_digest, &plaintext);
    }

    #[test]
    fn prop_profile_roundtrip(
        data in prop::collection::vec(any::<u8>(), 1..256),
        key in any::<[u8; PROFILE_KEY_SIZE]>(),
    ) {
        let codec = codec();
        let envelope = codec.encrypt_profile(&data, &key).unwrap();

        prop_assert_eq!(envelope.len(), 12 + data.len() + 16);
        prop_assert_eq!(codec.decrypt_profile(&envelope, &key).unwrap(), data);
    }

    #[test]
    fn prop_profile_name_unpadding(
        name in prop::collection::vec(any::<u8>(), 0..=26),
        key in any::<[u8; PROFILE_KEY_SIZE]>(),
    ) {
        let codec = codec();
        let envelope = codec.encrypt_profile_name(&name, &key).unwrap();

        prop_assert_eq!(envelope.len(), 12 + 26 + 16);
        prop_assert_eq!(
            codec.decrypt_profile_name(&envelope, &key).unwrap(),
            strip_trailing_zeros(&name)
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_signaling_bit_flip_detected(
        plaintext in prop::collection::vec(any::<u8>(), 0..128),
        key in key_bytes(SIGNALING_KEY_SIZE),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let codec = codec();
        let mut message = codec.encode_signaling(&plaintext, &key, &[0x24; 16]).unwrap();

        // Byte 0 is the version; flipping it is a version error, not a MAC error
        let index = 1 + position.index(message.len() - 1);
        message[index] ^= 1 << bit;

        prop_assert_eq!(
            codec.decode_signaling(&message, &key),
            Err(EnvelopeError::IntegrityFailure { kind: EnvelopeKind::Signaling })
        );
    }

    #[test]
    fn prop_attachment_bit_flip_detected(
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        keys in key_bytes(ATTACHMENT_KEY_SIZE),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let codec = codec();
        let encrypted = codec.encrypt_attachment(&plaintext, &keys, &[0x42; 16]).unwrap();
        let mut envelope = encrypted.ciphertext;

        let index = position.index(envelope.len());
        envelope[index] ^= 1 << bit;

        prop_assert_eq!(
            codec.decrypt_attachment(&envelope, &keys, Some(&encrypted.digest)),
            Err(EnvelopeError::IntegrityFailure { kind: EnvelopeKind::Attachment })
        );
    }

    #[test]
    fn prop_profile_bit_flip_detected(
        data in prop::collection::vec(any::<u8>(), 1..64),
        key in any::<[u8; PROFILE_KEY_SIZE]>(),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let codec = codec();
        let mut envelope = codec.encrypt_profile(&data, &key).unwrap();

        let index = position.index(envelope.len());
        envelope[index] ^= 1 << bit;

        prop_assert_eq!(
            codec.decrypt_profile(&envelope, &key),
            Err(EnvelopeError::ProfileKeyRotated)
        );
    }

    #[test]
    fn prop_wrong_digest_rejected_with_valid_mac(
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        keys in key_bytes(ATTACHMENT_KEY_SIZE),
        wrong_digest in any::<[u8; 32]>(),
    ) {
        let codec = codec();
        let encrypted = codec.encrypt_attachment(&plaintext, &keys, &[0x42; 16]).unwrap();
        prop_assume!(wrong_digest != encrypted.digest);

        prop_assert_eq!(
            codec.decrypt_attachment(&encrypted.ciphertext, &keys, Some(&wrong_digest)),
            Err(EnvelopeError::DigestMismatch)
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_signaling_key_length_enforced(
        key in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        prop_assume!(key.len() != SIGNALING_KEY_SIZE);

        let result = codec().decode_signaling(&[1u8; 64], &key);
        let is_key_length_error = matches!(
            result,
            Err(EnvelopeError::InvalidKeyLength { kind: EnvelopeKind::Signaling, .. })
        );
        prop_assert!(is_key_length_error);
    }

    #[test]
    fn prop_attachment_key_length_enforced(
        keys in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        prop_assume!(keys.len() != ATTACHMENT_KEY_SIZE);

        let codec = codec();
        let encrypt = codec.encrypt_attachment(b"payload", &keys, &[0u8; 16]);
        let decrypt = codec.decrypt_attachment(&[0u8; 96], &keys, None);

        let encrypt_rejected = matches!(encrypt, Err(EnvelopeError::InvalidKeyLength { .. }));
        let decrypt_rejected = matches!(decrypt, Err(EnvelopeError::InvalidKeyLength { .. }));
        prop_assert!(encrypt_rejected);
        prop_assert!(decrypt_rejected);
    }

    #[test]
    fn prop_short_envelopes_rejected(
        envelope in prop::collection::vec(any::<u8>(), 0..27),
    ) {
        let codec = codec();

        let signaling = codec.decode_signaling(&envelope, &[0u8; SIGNALING_KEY_SIZE]);
        let attachment = codec.decrypt_attachment(&envelope, &[0u8; ATTACHMENT_KEY_SIZE], None);
        let profile = codec.decrypt_profile(&envelope, &[0u8; PROFILE_KEY_SIZE]);

        let all_rejected = matches!(signaling, Err(EnvelopeError::InvalidEnvelopeLength { .. }))
            && matches!(attachment, Err(EnvelopeError::InvalidEnvelopeLength { .. }))
            && matches!(profile, Err(EnvelopeError::InvalidEnvelopeLength { .. }));
        prop_assert!(all_rejected);
    }
}
