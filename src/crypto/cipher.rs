//! AES-256-CBC note encryption with byte padding.
//!
//! A `NoteCipher` holds one key and one IV for the lifetime of the
//! process.  `encrypt` pads the payload to the 16-byte block size,
//! encrypts it in CBC mode and returns standard base64 text; `decrypt`
//! reverses each step.
//!
//! The IV is fixed, so equal plaintexts always produce equal ciphertexts.
//! Existing stored values depend on this; do not randomize it without a
//! migration.
//!
//! Padding layout (always at least one pad byte):
//!   [ plaintext | N bytes of value N ]   where 1 <= N <= 16

use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{NoteVaultError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// Required key length in bytes (AES-256).
pub const KEY_LEN: usize = 32;

/// Required IV length in bytes (one AES block).
pub const IV_LEN: usize = 16;

/// Symmetric cipher for secure note values.
pub struct NoteCipher {
    key: Zeroizing<[u8; KEY_LEN]>,
    iv: [u8; IV_LEN],
}

impl NoteCipher {
    /// Build a cipher from raw key and IV bytes.
    ///
    /// Fails with `InvalidConfiguration` unless the key is exactly 32
    /// bytes and the IV exactly 16 bytes.
    pub fn new(key: &[u8], iv: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LEN] = key.try_into().map_err(|_| {
            NoteVaultError::InvalidConfiguration(format!(
                "encryption key must be exactly {KEY_LEN} bytes (got {})",
                key.len()
            ))
        })?;
        let iv: [u8; IV_LEN] = iv.try_into().map_err(|_| {
            NoteVaultError::InvalidConfiguration(format!(
                "encryption IV must be exactly {IV_LEN} bytes (got {})",
                iv.len()
            ))
        })?;

        Ok(Self {
            key: Zeroizing::new(key),
            iv,
        })
    }

    /// Encrypt `plaintext` and return the ciphertext as base64 text.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String> {
        let mut buf = pad(plaintext, BLOCK_SIZE);
        let len = buf.len();

        let encryptor = Aes256CbcEnc::new_from_slices(self.key.as_slice(), &self.iv)
            .map_err(|e| NoteVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

        let ciphertext = encryptor
            .encrypt_padded_mut::<NoPadding>(&mut buf, len)
            .map_err(|_| NoteVaultError::EncryptionFailed("buffer not block aligned".into()))?;

        Ok(BASE64.encode(ciphertext))
    }

    /// Decrypt base64 text produced by `encrypt` into raw bytes.
    pub fn decrypt_bytes(&self, ciphertext_text: &str) -> Result<Vec<u8>> {
        let mut buf = Zeroizing::new(
            BASE64
                .decode(ciphertext_text)
                .map_err(|_| NoteVaultError::DecryptionFailed)?,
        );

        // Structural check before touching the cipher.
        if buf.is_empty() || buf.len() % BLOCK_SIZE != 0 {
            return Err(NoteVaultError::DecryptionFailed);
        }

        let decryptor = Aes256CbcDec::new_from_slices(self.key.as_slice(), &self.iv)
            .map_err(|_| NoteVaultError::DecryptionFailed)?;

        let padded = decryptor
            .decrypt_padded_mut::<NoPadding>(buf.as_mut_slice())
            .map_err(|_| NoteVaultError::DecryptionFailed)?;

        Ok(unpad(padded, BLOCK_SIZE)?.to_vec())
    }

    /// Decrypt base64 text produced by `encrypt` into a UTF-8 string.
    pub fn decrypt(&self, ciphertext_text: &str) -> Result<String> {
        let plaintext = self.decrypt_bytes(ciphertext_text)?;
        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            NoteVaultError::DecryptionFailed
        })
    }
}

/// Append `N` bytes of value `N` so the length becomes a multiple of
/// `block_size`.  A block-aligned input gains a whole block of padding.
pub(crate) fn pad(data: &[u8], block_size: usize) -> Vec<u8> {
    let pad_len = block_size - data.len() % block_size;
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    // block_size is at most 255, so the count fits in one byte.
    padded.resize(data.len() + pad_len, pad_len as u8);
    padded
}

/// Strip padding added by `pad`.
///
/// Reads the pad count from the final byte and requires every pad byte
/// to carry that same value.
pub(crate) fn unpad(data: &[u8], block_size: usize) -> Result<&[u8]> {
    if data.is_empty() || data.len() % block_size != 0 {
        return Err(NoteVaultError::DecryptionFailed);
    }

    let pad_len = usize::from(data[data.len() - 1]);
    if pad_len == 0 || pad_len > block_size {
        return Err(NoteVaultError::DecryptionFailed);
    }

    let (body, padding) = data.split_at(data.len() - pad_len);
    let expected = vec![pad_len as u8; pad_len];
    if !bool::from(padding.ct_eq(&expected)) {
        return Err(NoteVaultError::DecryptionFailed);
    }

    Ok(body)
}
