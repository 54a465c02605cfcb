//! Token error types
//!
//! Every failure a token operation can produce falls into one of a small,
//! closed set of [`ErrorCode`]s. Callers branch on the code; the optional
//! detail string is meant for internal logs only and must not be echoed
//! back to the client.

use thiserror::Error;

/// Token operation result type
pub type TokenResult<T> = Result<T, TokenError>;

/// Closed classification of token failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorCode {
    /// No error
    #[error("OK")]
    Ok,
    /// Input string is not a well-formed token
    #[error("bad token format")]
    BadTokenFormat,
    /// Segments decoded but did not convert into the expected shape
    #[error("conversion failure")]
    ConversionFailure,
    /// Forged, expired or otherwise semantically invalid token
    #[error("verification failure")]
    VerificationFailure,
}

impl ErrorCode {
    /// Stable human-readable name of the code
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Ok => "OK",
            ErrorCode::BadTokenFormat => "bad token format",
            ErrorCode::ConversionFailure => "conversion failure",
            ErrorCode::VerificationFailure => "verification failure",
        }
    }
}

/// Error raised while signing or verifying a token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}{}", detail_suffix(.detail))]
pub struct TokenError {
    code: ErrorCode,
    detail: Option<String>,
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {detail}"),
        None => String::new(),
    }
}

impl TokenError {
    /// Create an error with the given code and no detail
    #[inline]
    #[must_use]
    pub fn new(code: ErrorCode) -> Self {
        Self { code, detail: None }
    }

    /// Create an error with the given code and a detail string
    #[inline]
    #[must_use]
    pub fn with_detail(code: ErrorCode, detail: impl Into<String>) -> Self {
        Self {
            code,
            detail: Some(detail.into()),
        }
    }

    /// Create a bad token format error
    #[inline]
    #[must_use]
    pub fn bad_format(detail: impl Into<String>) -> Self {
        Self::with_detail(ErrorCode::BadTokenFormat, detail)
    }

    /// Create a conversion failure error
    #[inline]
    #[must_use]
    pub fn conversion(detail: impl Into<String>) -> Self {
        Self::with_detail(ErrorCode::ConversionFailure, detail)
    }

    /// Create a verification failure error
    #[inline]
    #[must_use]
    pub fn verification(detail: impl Into<String>) -> Self {
        Self::with_detail(ErrorCode::VerificationFailure, detail)
    }

    /// The classification of this error
    #[inline]
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Internal detail, if any. Not for user-facing output.
    #[inline]
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl From<ErrorCode> for TokenError {
    fn from(code: ErrorCode) -> Self {
        Self::new(code)
    }
}

/// Configuration errors raised while loading the signing secret or settings
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Required environment variable is not set
    #[error("Missing Environment Variable: {0}")]
    MissingEnv(String),
    /// Environment variable is set but could not be parsed
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue {
        /// Variable name
        var: String,
        /// Raw value that failed to parse
        value: String,
    },
    /// Secret key material is unusable
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}
