//! Token header
//!
//! The header names the signing algorithm and the token format version.
//! Only one combination is issued today; carrying it explicitly means a
//! future migration shows up as a rejected header rather than a silently
//! mis-verified token.

use crate::error::{TokenError, TokenResult};
use serde::{Deserialize, Serialize};

/// Algorithm identifier written into every header
pub const ALGORITHM: &str = "HS256";

/// Token type written into every header
pub const TOKEN_TYPE: &str = "JWT";

/// Current token format version
pub const FORMAT_VERSION: u32 = 1;

/// Token header structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Signing algorithm
    pub alg: String,
    /// Token type
    pub typ: String,
    /// Format version
    pub ver: u32,
}

impl TokenHeader {
    /// The header this crate issues
    #[must_use]
    pub fn current() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
            ver: FORMAT_VERSION,
        }
    }

    /// Encode as compact JSON
    ///
    /// # Errors
    /// Returns a `ConversionFailure` if serialization fails.
    pub fn to_bytes(&self) -> TokenResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| TokenError::conversion(format!("header: {e}")))
    }

    /// Decode from JSON bytes
    ///
    /// # Errors
    /// Returns a `ConversionFailure` if the bytes are not a header object.
    pub fn from_bytes(bytes: &[u8]) -> TokenResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| TokenError::conversion(format!("header: {e}")))
    }

    /// Check that this header describes a token format we verify
    ///
    /// # Errors
    /// Returns a `VerificationFailure` for any other algorithm or version.
    pub fn ensure_supported(&self) -> TokenResult<()> {
        if self.alg != ALGORITHM || self.ver != FORMAT_VERSION {
            return Err(TokenError::verification(format!(
                "unsupported algorithm {} v{}",
                self.alg, self.ver
            )));
        }
        Ok(())
    }
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn current_header_json() {
        let bytes = TokenHeader::current().to_bytes().unwrap();
        assert_eq!(bytes, br#"{"alg":"HS256","typ":"JWT","ver":1}"#);
    }

    #[test]
    fn parses_current_header() {
        let header = TokenHeader::from_bytes(br#"{"alg":"HS256","typ":"JWT","ver":1}"#).unwrap();
        assert_eq!(header, TokenHeader::current());
        assert!(header.ensure_supported().is_ok());
    }

    #[test]
    fn rejects_other_algorithm() {
        let header = TokenHeader {
            alg: "none".to_string(),
            ..TokenHeader::current()
        };
        let err = header.ensure_supported().unwrap_err();
        assert_eq!(err.code(), ErrorCode::VerificationFailure);
    }

    #[test]
    fn rejects_other_version() {
        let header = TokenHeader {
            ver: 2,
            ..TokenHeader::current()
        };
        assert!(header.ensure_supported().is_err());
    }

    #[test]
    fn missing_version_is_conversion_failure() {
        let err = TokenHeader::from_bytes(br#"{"alg":"HS256","typ":"JWT"}"#).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ConversionFailure);
    }
}
