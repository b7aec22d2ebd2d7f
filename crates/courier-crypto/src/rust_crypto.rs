//! Production primitives backed by the `RustCrypto` crates
//!
//! - AES-256-CBC with PKCS#7 padding (`aes` + `cbc`)
//! - HMAC-SHA256 (`hmac` + `sha2`)
//! - SHA-256 (`sha2`)
//! - AES-256-GCM (`aes-gcm`)
//! - OS entropy (`getrandom`)

use aes::Aes256;
use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, KeyInit},
};
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit, block_padding::Pkcs7};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::{
    error::PrimitiveError,
    primitives::{
        AEAD_NONCE_SIZE, AEAD_TAG_SIZE, CIPHER_IV_SIZE, CIPHER_KEY_SIZE, DIGEST_SIZE, MAC_SIZE,
        Primitives,
    },
};

type HmacSha256 = Hmac<Sha256>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Stateless primitive backend. Cheap to copy; every call builds its own
/// cipher instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCryptoPrimitives;

impl RustCryptoPrimitives {
    /// Create the production backend.
    pub fn new() -> Self {
        Self
    }
}

fn check_cipher_inputs(key: &[u8], iv: &[u8], iv_size: usize) -> Result<(), PrimitiveError> {
    if key.len() != CIPHER_KEY_SIZE {
        return Err(PrimitiveError::InvalidKeyLength {
            expected: CIPHER_KEY_SIZE,
            actual: key.len(),
        });
    }
    if iv.len() != iv_size {
        return Err(PrimitiveError::InvalidIvLength { expected: iv_size, actual: iv.len() });
    }
    Ok(())
}

fn check_tag_len(tag_len: usize) -> Result<(), PrimitiveError> {
    if tag_len != AEAD_TAG_SIZE {
        return Err(PrimitiveError::UnsupportedTagLength(tag_len));
    }
    Ok(())
}

fn gcm_cipher(key: &[u8]) -> Result<Aes256Gcm, PrimitiveError> {
    Aes256Gcm::new_from_slice(key).map_err(|_| PrimitiveError::InvalidKeyLength {
        expected: CIPHER_KEY_SIZE,
        actual: key.len(),
    })
}

impl Primitives for RustCryptoPrimitives {
    fn encrypt(&self, key: &[u8], plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>, PrimitiveError> {
        check_cipher_inputs(key, iv, CIPHER_IV_SIZE)?;

        let cipher = Aes256CbcEnc::new_from_slices(key, iv).map_err(|_| {
            PrimitiveError::InvalidKeyLength { expected: CIPHER_KEY_SIZE, actual: key.len() }
        })?;
        Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
    }

    fn decrypt(
        &self,
        key: &[u8],
        ciphertext: &[u8],
        iv: &[u8],
    ) -> Result<Vec<u8>, PrimitiveError> {
        check_cipher_inputs(key, iv, CIPHER_IV_SIZE)?;

        let cipher = Aes256CbcDec::new_from_slices(key, iv).map_err(|_| {
            PrimitiveError::InvalidKeyLength { expected: CIPHER_KEY_SIZE, actual: key.len() }
        })?;
        cipher.decrypt_padded_vec_mut::<Pkcs7>(ciphertext).map_err(|_| PrimitiveError::Padding)
    }

    fn compute_mac(&self, key: &[u8], data: &[u8]) -> Result<[u8; MAC_SIZE], PrimitiveError> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(key).map_err(|_| {
            PrimitiveError::InvalidKeyLength { expected: MAC_SIZE, actual: key.len() }
        })?;
        mac.update(data);

        let mut tag = [0u8; MAC_SIZE];
        tag.copy_from_slice(&mac.finalize().into_bytes());
        Ok(tag)
    }

    fn digest(&self, data: &[u8]) -> [u8; DIGEST_SIZE] {
        let mut digest = [0u8; DIGEST_SIZE];
        digest.copy_from_slice(&Sha256::digest(data));
        digest
    }

    fn random_bytes(&self, buffer: &mut [u8]) -> Result<(), PrimitiveError> {
        getrandom::fill(buffer).map_err(|e| PrimitiveError::Entropy(e.to_string()))
    }

    fn aead_encrypt(
        &self,
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        tag_len: usize,
    ) -> Result<Vec<u8>, PrimitiveError> {
        check_tag_len(tag_len)?;
        check_cipher_inputs(key, nonce, AEAD_NONCE_SIZE)?;

        let cipher = gcm_cipher(key)?;
        // GCM only fails to encrypt past its 64 GiB message limit
        cipher
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|_| PrimitiveError::MessageTooLarge(plaintext.len()))
    }

    fn aead_decrypt(
        &self,
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        tag_len: usize,
    ) -> Result<Vec<u8>, PrimitiveError> {
        check_tag_len(tag_len)?;
        check_cipher_inputs(key, nonce, AEAD_NONCE_SIZE)?;

        let cipher = gcm_cipher(key)?;
        cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| PrimitiveError::AuthenticationFailed)
    }
}
