//! Deterministic field encryption for personal data.
//!
//! Names and phone numbers are stored encrypted, and reservations are looked
//! up by comparing ciphertext, so the same plaintext must always encrypt to
//! the same value. Each value is sealed with AES-256-GCM under a synthetic
//! nonce: the truncated HMAC-SHA256 of the plaintext under a separate key.
//!
//! Text form: URL-safe base64 (no padding) of `nonce || ciphertext || tag`.

use std::{fmt, str::FromStr, string::FromUtf8Error};

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{self, Aead, KeyInit},
};
use base64::{DecodeError, Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{
    Hmac, Mac,
    digest::{InvalidLength, Output},
};
use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroize;

/// Number of bytes of key material.
pub const CODEC_KEY_BYTES: usize = 32;

const CODEC_KEY_HEX_CHARS: usize = CODEC_KEY_BYTES * 2;

const NONCE_BYTES: usize = 12;

const TAG_BYTES: usize = 16;

const ENCRYPTION_KEY_LABEL: &[u8] = b"visitor.codec.v1.encryption";

const NONCE_KEY_LABEL: &[u8] = b"visitor.codec.v1.nonce";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("codec key must be {CODEC_KEY_HEX_CHARS} hex characters")]
    InvalidKey,

    #[error("codec key has an invalid length")]
    KeyLength(#[from] InvalidLength),

    #[error("ciphertext is not valid base64")]
    Encoding(#[from] DecodeError),

    #[error("ciphertext is truncated")]
    Truncated,

    #[error("ciphertext failed authentication")]
    Aead(aead::Error),

    #[error("decrypted value is not valid utf-8")]
    Utf8(#[from] FromUtf8Error),

    #[error("ciphertext nonce does not match its plaintext")]
    NonceMismatch,
}

/// Process-wide key material for the field codec.
#[derive(Clone)]
pub struct CodecKey {
    bytes: [u8; CODEC_KEY_BYTES],
}

impl CodecKey {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; CODEC_KEY_BYTES]) -> Self {
        Self { bytes }
    }

    /// Generate fresh random key material.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; CODEC_KEY_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self::from_bytes(bytes)
    }

    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; CODEC_KEY_BYTES] {
        &self.bytes
    }

    /// Lowercase hex form, as accepted by [`FromStr`].
    #[must_use]
    pub fn to_hex(&self) -> String {
        const HEX: &[u8; 16] = b"0123456789abcdef";

        let mut encoded = String::with_capacity(CODEC_KEY_HEX_CHARS);

        for byte in &self.bytes {
            encoded.push(char::from(HEX[usize::from(byte >> 4)]));
            encoded.push(char::from(HEX[usize::from(byte & 0x0f)]));
        }

        encoded
    }
}

impl FromStr for CodecKey {
    type Err = CodecError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();

        if value.len() != CODEC_KEY_HEX_CHARS {
            return Err(CodecError::InvalidKey);
        }

        let mut bytes = [0_u8; CODEC_KEY_BYTES];

        for (byte, pair) in bytes.iter_mut().zip(value.as_bytes().chunks_exact(2)) {
            let [hi, lo] = pair else {
                return Err(CodecError::InvalidKey);
            };

            let hi = decode_hex_nibble(*hi).ok_or(CodecError::InvalidKey)?;
            let lo = decode_hex_nibble(*lo).ok_or(CodecError::InvalidKey)?;

            *byte = (hi << 4) | lo;
        }

        Ok(Self::from_bytes(bytes))
    }
}

impl fmt::Debug for CodecKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CodecKey(**redacted**)")
    }
}

impl Drop for CodecKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

/// Encrypts and decrypts personal data fields.
#[derive(Clone)]
pub struct FieldCodec {
    cipher: Aes256Gcm,
    nonce_mac: HmacSha256,
}

impl FieldCodec {
    /// Build a codec from key material.
    ///
    /// # Errors
    ///
    /// Returns an error when a derived subkey is rejected by the cipher.
    pub fn new(key: &CodecKey) -> Result<Self, CodecError> {
        let mut encryption_key = derive_subkey(key, ENCRYPTION_KEY_LABEL);
        let mut nonce_key = derive_subkey(key, NONCE_KEY_LABEL);

        let cipher = Aes256Gcm::new_from_slice(&encryption_key);
        let nonce_mac = <HmacSha256 as Mac>::new_from_slice(&nonce_key);

        encryption_key.zeroize();
        nonce_key.zeroize();

        Ok(Self {
            cipher: cipher?,
            nonce_mac: nonce_mac?,
        })
    }

    /// Encrypt a plaintext value. Equal inputs give equal outputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the cipher fails to seal the value.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CodecError> {
        let nonce = self.synthetic_nonce(plaintext.as_bytes());

        let sealed = self
            .cipher
            .encrypt(Nonce::from_slice(&nonce), plaintext.as_bytes())
            .map_err(CodecError::Aead)?;

        let mut encoded = Vec::with_capacity(NONCE_BYTES + sealed.len());
        encoded.extend_from_slice(&nonce);
        encoded.extend_from_slice(&sealed);

        Ok(URL_SAFE_NO_PAD.encode(encoded))
    }

    /// Decrypt a value produced by [`FieldCodec::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns an error when the ciphertext is malformed, was produced under a
    /// different key, or has been tampered with.
    pub fn decrypt(&self, ciphertext: &str) -> Result<String, CodecError> {
        let raw = URL_SAFE_NO_PAD.decode(ciphertext)?;

        if raw.len() < NONCE_BYTES + TAG_BYTES {
            return Err(CodecError::Truncated);
        }

        let (nonce, sealed) = raw
            .split_at_checked(NONCE_BYTES)
            .ok_or(CodecError::Truncated)?;

        let opened = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), sealed)
            .map_err(CodecError::Aead)?;

        let plaintext = String::from_utf8(opened)?;

        if self.synthetic_nonce(plaintext.as_bytes()).as_slice() != nonce {
            return Err(CodecError::NonceMismatch);
        }

        Ok(plaintext)
    }

    fn synthetic_nonce(&self, plaintext: &[u8]) -> [u8; NONCE_BYTES] {
        let mut mac = self.nonce_mac.clone();
        mac.update(plaintext);

        let digest = mac.finalize().into_bytes();

        let mut nonce = [0_u8; NONCE_BYTES];

        for (dst, src) in nonce.iter_mut().zip(digest.iter()) {
            *dst = *src;
        }

        nonce
    }
}

impl fmt::Debug for FieldCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldCodec(**redacted**)")
    }
}

fn derive_subkey(key: &CodecKey, label: &[u8]) -> Output<Sha256> {
    Sha256::new()
        .chain_update(label)
        .chain_update(key.as_bytes())
        .finalize()
}

fn decode_hex_nibble(value: u8) -> Option<u8> {
    match value {
        b'0'..=b'9' => Some(value - b'0'),
        b'a'..=b'f' => Some(value - b'a' + 10),
        b'A'..=b'F' => Some(value - b'A' + 10),
        _ => None,
    }
}
