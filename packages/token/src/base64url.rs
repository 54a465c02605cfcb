//! Base64 URL-safe encoding without padding (RFC 4648 §5)
//!
//! Every token segment uses this alphabet. Decoding is strict: padding
//! characters, characters outside `A-Z a-z 0-9 - _`, impossible lengths and
//! non-zero trailing bits are all rejected as [`ErrorCode::BadTokenFormat`].
//!
//! [`ErrorCode::BadTokenFormat`]: crate::ErrorCode::BadTokenFormat

use crate::error::{TokenError, TokenResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// Encode bytes as unpadded base64url
#[inline]
#[must_use]
pub fn encode(input: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode an unpadded base64url string
///
/// # Errors
/// Returns a `BadTokenFormat` error for any input that is not canonical
/// unpadded base64url.
#[inline]
pub fn decode(input: &str) -> TokenResult<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(input)
        .map_err(|e| TokenError::bad_format(format!("invalid base64url: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn uses_url_safe_alphabet() {
        // 0xfb 0xff encodes to "+/8" in the standard alphabet
        assert_eq!(encode([0xfb, 0xff]), "-_8");
        assert_eq!(decode("-_8").ok(), Some(vec![0xfb, 0xff]));
    }

    #[test]
    fn omits_padding() {
        assert_eq!(encode(b"a"), "YQ");
        assert_eq!(encode(b"ab"), "YWI");
        assert_eq!(encode(b"abc"), "YWJj");
        assert_eq!(encode(b""), "");
    }

    #[test]
    fn rejects_standard_alphabet() {
        let err = decode("+/8").err().map(|e| e.code());
        assert_eq!(err, Some(ErrorCode::BadTokenFormat));
    }

    #[test]
    fn rejects_padding() {
        let err = decode("YQ==").err().map(|e| e.code());
        assert_eq!(err, Some(ErrorCode::BadTokenFormat));
    }

    #[test]
    fn rejects_impossible_length() {
        // 4n + 1 characters can never be produced by an encoder
        let err = decode("YWJjZ").err().map(|e| e.code());
        assert_eq!(err, Some(ErrorCode::BadTokenFormat));
    }

    #[test]
    fn rejects_non_zero_trailing_bits() {
        // "YR" carries the same byte as "YQ" but with a stray low bit set
        let err = decode("YR").err().map(|e| e.code());
        assert_eq!(err, Some(ErrorCode::BadTokenFormat));
    }
}
