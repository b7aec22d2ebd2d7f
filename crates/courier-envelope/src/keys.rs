//! Key material sizes and sub-key slicing
//!
//! Each envelope type receives one opaque key buffer. Signaling and
//! attachment keys are split by fixed offsets into an encryption sub-key and
//! a MAC sub-key; the profile key is used whole as an AEAD key.
//!
//! ```text
//! signaling  (52): [0..32) cipher key | [32..52) MAC key
//! attachment (64): [0..32) cipher key | [32..64) MAC key
//! profile    (32): [0..32) AEAD key
//! ```

use std::fmt;

use courier_crypto::CIPHER_KEY_SIZE;
use zeroize::Zeroize;

use crate::error::EnvelopeError;

/// MAC sub-key size inside a signaling key
pub const SIGNALING_MAC_KEY_SIZE: usize = 20;

/// Total signaling key size
pub const SIGNALING_KEY_SIZE: usize = CIPHER_KEY_SIZE + SIGNALING_MAC_KEY_SIZE;

/// MAC sub-key size inside an attachment key
pub const ATTACHMENT_MAC_KEY_SIZE: usize = 32;

/// Total attachment key size
pub const ATTACHMENT_KEY_SIZE: usize = CIPHER_KEY_SIZE + ATTACHMENT_MAC_KEY_SIZE;

/// Profile AEAD key size
pub const PROFILE_KEY_SIZE: usize = 32;

/// The envelope type an operation works on.
///
/// Carried in errors and log events so failures name the payload class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvelopeKind {
    /// Websocket-delivered signaling message
    Signaling,
    /// Binary attachment blob
    Attachment,
    /// Profile field
    Profile,
}

impl fmt::Display for EnvelopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Signaling => "signaling",
            Self::Attachment => "attachment",
            Self::Profile => "profile",
        };
        f.write_str(name)
    }
}

/// Require `key` to be exactly `expected` bytes.
pub(crate) fn check_key_length(
    key: &[u8],
    kind: EnvelopeKind,
    expected: usize,
) -> Result<(), EnvelopeError> {
    if key.len() != expected {
        return Err(EnvelopeError::InvalidKeyLength { kind, expected, actual: key.len() });
    }
    Ok(())
}

/// Encryption and MAC sub-keys copied out of a caller's key buffer.
///
/// Both halves are zeroized on drop.
pub(crate) struct SubKeys<const MAC_LEN: usize> {
    encryption: [u8; CIPHER_KEY_SIZE],
    mac: [u8; MAC_LEN],
}

/// Sub-keys of a 52-byte signaling key
pub(crate) type SignalingSubKeys = SubKeys<SIGNALING_MAC_KEY_SIZE>;

/// Sub-keys of a 64-byte attachment key
pub(crate) type AttachmentSubKeys = SubKeys<ATTACHMENT_MAC_KEY_SIZE>;

impl<const MAC_LEN: usize> SubKeys<MAC_LEN> {
    /// Split `material` at the fixed offset.
    ///
    /// Fails before copying anything if the length is not exactly
    /// `CIPHER_KEY_SIZE + MAC_LEN`.
    pub(crate) fn split(material: &[u8], kind: EnvelopeKind) -> Result<Self, EnvelopeError> {
        check_key_length(material, kind, CIPHER_KEY_SIZE + MAC_LEN)?;

        let (encryption_part, mac_part) = material.split_at(CIPHER_KEY_SIZE);

        let mut encryption = [0u8; CIPHER_KEY_SIZE];
        encryption.copy_from_slice(encryption_part);
        let mut mac = [0u8; MAC_LEN];
        mac.copy_from_slice(mac_part);

        Ok(Self { encryption, mac })
    }

    pub(crate) fn encryption(&self) -> &[u8] {
        &self.encryption
    }

    pub(crate) fn mac(&self) -> &[u8] {
        &self.mac
    }
}

impl<const MAC_LEN: usize> Drop for SubKeys<MAC_LEN> {
    fn drop(&mut self) {
        self.encryption.zeroize();
        self.mac.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting_bytes(len: usize) -> Vec<u8> {
        (0..len).map(|i| i as u8).collect()
    }

    #[test]
    fn signaling_key_split_offsets() {
        let material = counting_bytes(SIGNALING_KEY_SIZE);
        let keys = SignalingSubKeys::split(&material, EnvelopeKind::Signaling).unwrap();

        assert_eq!(keys.encryption(), &material[0..32]);
        assert_eq!(keys.mac(), &material[32..52]);
    }

    #[test]
    fn attachment_key_split_offsets() {
        let material = counting_bytes(ATTACHMENT_KEY_SIZE);
        let keys = AttachmentSubKeys::split(&material, EnvelopeKind::Attachment).unwrap();

        assert_eq!(keys.encryption(), &material[0..32]);
        assert_eq!(keys.mac(), &material[32..64]);
    }

    #[test]
    fn wrong_length_is_rejected() {
        let result = AttachmentSubKeys::split(&[0u8; 63], EnvelopeKind::Attachment);

        assert!(matches!(
            result,
            Err(EnvelopeError::InvalidKeyLength {
                kind: EnvelopeKind::Attachment,
                expected: 64,
                actual: 63,
            })
        ));
    }

    #[test]
    fn signaling_split_rejects_attachment_sized_key() {
        let result = SignalingSubKeys::split(&[0u8; 64], EnvelopeKind::Signaling);
        assert!(result.is_err());
    }

    #[test]
    fn check_key_length_accepts_exact() {
        assert!(check_key_length(&[0u8; 32], EnvelopeKind::Profile, PROFILE_KEY_SIZE).is_ok());
        assert!(check_key_length(&[0u8; 33], EnvelopeKind::Profile, PROFILE_KEY_SIZE).is_err());
    }

    #[test]
    fn kind_display() {
        assert_eq!(EnvelopeKind::Signaling.to_string(), "signaling");
        assert_eq!(EnvelopeKind::Attachment.to_string(), "attachment");
        assert_eq!(EnvelopeKind::Profile.to_string(), "profile");
    }
}
