//! Session token codec.
//!
//! Session IDs and access tokens are stored in browser cookies, so they are
//! sealed with AES-256-GCM under a key derived from a server secret. The
//! cookie value is `base64url(nonce || ciphertext)` without padding.

use aes_gcm::{
    Aes256Gcm, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use anyhow::{Context, Result, bail};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use sha2::{Digest, Sha256};

/// AES-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes.
const TAG_LEN: usize = 16;

/// Shortest possible sealed token (empty payload).
const MIN_SEALED_LEN: usize = NONCE_LEN + TAG_LEN;

/// Encrypts and decrypts cookie tokens with a server-held secret.
#[derive(Clone)]
pub struct TokenCodec {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}

impl TokenCodec {
    /// Derives a 256-bit key from `secret` with SHA-256.
    ///
    /// # Errors
    ///
    /// Returns an error if `secret` is empty.
    pub fn from_secret(secret: &str) -> Result<Self> {
        if secret.is_empty() {
            bail!("token secret must not be empty");
        }
        let digest = Sha256::digest(secret.as_bytes());
        let key = Key::<Aes256Gcm>::from_slice(&digest);
        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    /// Seals `plain` under a fresh random nonce.
    ///
    /// # Errors
    ///
    /// Returns an error if encryption fails.
    pub fn encrypt(&self, plain: &str) -> Result<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plain.as_bytes())
            .map_err(|e| anyhow::anyhow!("token encryption failed: {e}"))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN.saturating_add(ciphertext.len()));
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    /// Opens a token produced by [`Self::encrypt`].
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not valid base64url, is too short,
    /// fails authentication (tampered or sealed with another secret), or
    /// does not decrypt to UTF-8.
    pub fn decrypt(&self, token: &str) -> Result<String> {
        let sealed = URL_SAFE_NO_PAD
            .decode(token.trim())
            .context("token is not valid base64url")?;
        if sealed.len() < MIN_SEALED_LEN {
            bail!("token is too short ({} bytes)", sealed.len());
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let plain = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| anyhow::anyhow!("token failed authentication"))?;
        String::from_utf8(plain).context("token payload is not UTF-8")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_encrypt_then_decrypt() {
        // Arrange
        let codec = TokenCodec::from_secret("test-secret").unwrap();

        // Act
        let token = codec.encrypt("2629f70fb498edc263a0adb99118ac41f0053e8c").unwrap();
        let plain = codec.decrypt(&token).unwrap();

        // Assert
        assert_eq!(plain, "2629f70fb498edc263a0adb99118ac41f0053e8c");
    }

    #[test]
    fn test_encrypt_is_url_safe() {
        // Arrange
        let codec = TokenCodec::from_secret("test-secret").unwrap();

        // Act
        let token = codec.encrypt("session").unwrap();

        // Assert
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_encrypt_uses_fresh_nonce() {
        // Arrange
        let codec = TokenCodec::from_secret("test-secret").unwrap();

        // Act
        let first = codec.encrypt("session").unwrap();
        let second = codec.encrypt("session").unwrap();

        // Assert
        assert_ne!(first, second);
    }

    #[test]
    fn test_decrypt_with_other_secret_fails() {
        // Arrange
        let codec = TokenCodec::from_secret("test-secret").unwrap();
        let other = TokenCodec::from_secret("other-secret").unwrap();
        let token = codec.encrypt("session").unwrap();

        // Act
        let result = other.decrypt(&token);

        // Assert
        assert!(result.unwrap_err().to_string().contains("authentication"));
    }

    #[test]
    fn test_decrypt_tampered_token_fails() {
        // Arrange
        let codec = TokenCodec::from_secret("test-secret").unwrap();
        let token = codec.encrypt("session").unwrap();
        let mut sealed = URL_SAFE_NO_PAD.decode(&token).unwrap();
        let last = sealed.len() - 1;
        sealed[last] ^= 0x01;
        let tampered = URL_SAFE_NO_PAD.encode(sealed);

        // Act
        let result = codec.decrypt(&tampered);

        // Assert
        assert!(result.is_err());
    }

    #[test]
    fn test_decrypt_malformed_base64_fails() {
        // Arrange
        let codec = TokenCodec::from_secret("test-secret").unwrap();

        // Act
        let result = codec.decrypt("not base64!");

        // Assert
        assert!(result.unwrap_err().to_string().contains("base64url"));
    }

    #[test]
    fn test_decrypt_short_token_fails() {
        // Arrange
        let codec = TokenCodec::from_secret("test-secret").unwrap();

        // Act
        let result = codec.decrypt("AAAA");

        // Assert
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_empty_secret_rejected() {
        // Arrange & Act
        let result = TokenCodec::from_secret("");

        // Assert
        assert!(result.is_err());
    }
}
