//! Signing secret
//!
//! The secret is loaded once at startup and shared read-only by every
//! codec call. Its bytes are wiped on drop and never printed.

use crate::error::ConfigError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::fmt;
use zeroize::Zeroizing;

/// Minimum secret length for HS256 (256 bits)
pub const MIN_SECRET_LEN: usize = 32;

/// Symmetric secret used to sign and verify tokens
#[derive(Clone)]
pub struct SecretKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl SecretKey {
    /// Wrap raw key material
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidKey` if the key is shorter than
    /// [`MIN_SECRET_LEN`] bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, ConfigError> {
        let bytes = Zeroizing::new(bytes.into());
        if bytes.len() < MIN_SECRET_LEN {
            return Err(ConfigError::InvalidKey(format!(
                "HMAC key for HS256 must be at least {MIN_SECRET_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        Ok(Self { bytes })
    }

    /// Parse key material from its textual form
    ///
    /// Hex is tried first, then standard base64; either is only accepted
    /// when it decodes to at least [`MIN_SECRET_LEN`] bytes. Anything else
    /// is taken as raw UTF-8.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidKey` if the resulting key is too short.
    pub fn from_text(text: &str) -> Result<Self, ConfigError> {
        if let Ok(decoded) = hex::decode(text) {
            if decoded.len() >= MIN_SECRET_LEN {
                return Self::new(decoded);
            }
        }

        if let Ok(decoded) = STANDARD.decode(text) {
            if decoded.len() >= MIN_SECRET_LEN {
                return Self::new(decoded);
            }
        }

        Self::new(text.as_bytes())
    }

    /// Load key material from an environment variable
    ///
    /// # Errors
    /// Returns `ConfigError::MissingEnv` if the variable is unset or not
    /// unicode, or `ConfigError::InvalidKey` if the key is too short.
    pub fn from_env(var: &str) -> Result<Self, ConfigError> {
        let value = Zeroizing::new(
            std::env::var(var).map_err(|_| ConfigError::MissingEnv(var.to_string()))?,
        );
        Self::from_text(&value)
    }

    /// Raw key bytes
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Key length in bytes
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Always false; empty keys are rejected at construction
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED; {} bytes])", self.bytes.len())
    }
}
