//! Token wire format
//!
//! ```text
//! token = base64url(header) "." base64url(claims) "." base64url(mac)
//! ```

use crate::base64url;
use crate::error::{TokenError, TokenResult};
use crate::signer::MAC_LEN;

/// Segment delimiter
pub const DELIMITER: char = '.';

/// Build the `header.claims` signing input from raw segment bytes
#[must_use]
pub fn signing_input(header: &[u8], claims: &[u8]) -> String {
    let mut input = base64url::encode(header);
    input.push(DELIMITER);
    input.push_str(&base64url::encode(claims));
    input
}

/// Append the encoded MAC to a signing input
#[must_use]
pub fn seal(mut signing_input: String, mac: &[u8]) -> String {
    signing_input.push(DELIMITER);
    signing_input.push_str(&base64url::encode(mac));
    signing_input
}

/// Encode and join the three segments
#[must_use]
pub fn assemble(header: &[u8], claims: &[u8], mac: &[u8]) -> String {
    seal(signing_input(header, claims), mac)
}

/// The three encoded segments of a token, borrowed from the input string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    signing_input: &'a str,
    header: &'a str,
    claims: &'a str,
    mac: &'a str,
}

impl<'a> Segments<'a> {
    /// Encoded `header.claims` prefix the MAC was computed over
    #[inline]
    #[must_use]
    pub fn signing_input(&self) -> &'a str {
        self.signing_input
    }

    /// Encoded header segment
    #[inline]
    #[must_use]
    pub fn header(&self) -> &'a str {
        self.header
    }

    /// Encoded claims segment
    #[inline]
    #[must_use]
    pub fn claims(&self) -> &'a str {
        self.claims
    }

    /// Encoded MAC segment
    #[inline]
    #[must_use]
    pub fn mac(&self) -> &'a str {
        self.mac
    }

    /// Decode all three segments
    ///
    /// # Errors
    /// Returns `BadTokenFormat` if any segment is not valid base64url or the
    /// MAC segment does not decode to exactly one HS256 tag.
    pub fn decode(&self) -> TokenResult<DecodedSegments> {
        let header = base64url::decode(self.header)?;
        let claims = base64url::decode(self.claims)?;
        let mac = base64url::decode(self.mac)?;
        if mac.len() != MAC_LEN {
            return Err(TokenError::bad_format(format!(
                "signature must be {MAC_LEN} bytes, got {}",
                mac.len()
            )));
        }
        Ok(DecodedSegments {
            header,
            claims,
            mac,
        })
    }
}

/// Raw bytes of the three segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSegments {
    /// Header JSON
    pub header: Vec<u8>,
    /// Claims JSON
    pub claims: Vec<u8>,
    /// MAC tag
    pub mac: Vec<u8>,
}

/// Split a token into its three segments
///
/// # Errors
/// Returns `BadTokenFormat` unless the token has exactly two delimiters and
/// three non-empty segments.
pub fn split(token: &str) -> TokenResult<Segments<'_>> {
    let mut parts = token.splitn(4, DELIMITER);
    let (Some(header), Some(claims), Some(mac), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::bad_format("expected three segments"));
    };

    if header.is_empty() || claims.is_empty() || mac.is_empty() {
        return Err(TokenError::bad_format("empty segment"));
    }

    let signing_input = &token[..header.len() + 1 + claims.len()];
    Ok(Segments {
        signing_input,
        header,
        claims,
        mac,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn format_error(token: &str) -> Option<ErrorCode> {
        split(token).err().map(|e| e.code())
    }

    #[test]
    fn assemble_joins_encoded_segments() {
        assert_eq!(assemble(b"a", b"ab", b"abc"), "YQ.YWI.YWJj");
    }

    #[test]
    fn split_borrows_segments() {
        let segments = split("YQ.YWI.YWJj").unwrap();
        assert_eq!(segments.header(), "YQ");
        assert_eq!(segments.claims(), "YWI");
        assert_eq!(segments.mac(), "YWJj");
        assert_eq!(segments.signing_input(), "YQ.YWI");
    }

    #[test]
    fn rejects_wrong_delimiter_count() {
        assert_eq!(format_error(""), Some(ErrorCode::BadTokenFormat));
        assert_eq!(format_error("abc"), Some(ErrorCode::BadTokenFormat));
        assert_eq!(format_error("a.b"), Some(ErrorCode::BadTokenFormat));
        assert_eq!(format_error("a.b.c.d"), Some(ErrorCode::BadTokenFormat));
        assert_eq!(format_error("a.b.c."), Some(ErrorCode::BadTokenFormat));
    }

    #[test]
    fn rejects_empty_segments() {
        assert_eq!(format_error(".b.c"), Some(ErrorCode::BadTokenFormat));
        assert_eq!(format_error("a..c"), Some(ErrorCode::BadTokenFormat));
        assert_eq!(format_error("a.b."), Some(ErrorCode::BadTokenFormat));
        assert_eq!(format_error(".."), Some(ErrorCode::BadTokenFormat));
    }

    #[test]
    fn decode_rejects_short_mac() {
        let token = assemble(b"{}", b"{}", &[0u8; 16]);
        let err = split(&token).unwrap().decode().unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadTokenFormat);
    }

    #[test]
    fn decode_rejects_bad_alphabet() {
        let err = split("e30.e3+.AAAA").unwrap().decode().unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadTokenFormat);
    }

    #[test]
    fn decode_returns_raw_bytes() {
        let token = assemble(b"{}", b"{\"a\":1}", &[7u8; MAC_LEN]);
        let decoded = split(&token).unwrap().decode().unwrap();
        assert_eq!(decoded.header, b"{}");
        assert_eq!(decoded.claims, b"{\"a\":1}");
        assert_eq!(decoded.mac, vec![7u8; MAC_LEN]);
    }
}
