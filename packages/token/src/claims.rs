//! Claims serialization
//!
//! Caller payloads are encoded as a single JSON object holding the payload
//! fields plus the registered `iat` and `exp` claims (unix milliseconds).
//! The registered claims always win: a payload field named `iat` or `exp`
//! is overwritten when signing. Keys are emitted in sorted order, so the
//! encoded bytes are stable for a given value.

use crate::error::{TokenError, TokenResult};
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Registered claim holding the expiration instant
pub const EXPIRES_AT: &str = "exp";

/// Registered claim holding the issue instant
pub const ISSUED_AT: &str = "iat";

/// Claims object as read back from a token
#[derive(Debug, Clone)]
pub struct Envelope<T> {
    /// Caller payload
    pub claims: T,
    /// Issue instant, unix milliseconds
    pub iat: Option<i64>,
    /// Expiration instant, unix milliseconds
    pub exp: Option<i64>,
}

/// Encode a payload together with its registered time claims
///
/// # Errors
/// Returns a `ConversionFailure` if the payload does not serialize to a
/// JSON object.
pub fn serialize<T: Serialize + ?Sized>(
    claims: &T,
    issued_at: i64,
    expires_at: i64,
) -> TokenResult<Vec<u8>> {
    let value =
        serde_json::to_value(claims).map_err(|e| TokenError::conversion(format!("claims: {e}")))?;
    let Value::Object(mut object) = value else {
        return Err(TokenError::conversion("claims must be a JSON object"));
    };

    object.insert(ISSUED_AT.to_string(), Value::from(issued_at));
    object.insert(EXPIRES_AT.to_string(), Value::from(expires_at));

    serde_json::to_vec(&object).map_err(|e| TokenError::conversion(format!("claims: {e}")))
}

/// Decode claims bytes into the raw JSON object and the typed envelope
///
/// The payload type is read from the whole object, registered claims
/// included, so a payload may declare `exp` or `iat` fields of its own.
///
/// # Errors
/// Returns a `ConversionFailure` if the bytes are not a JSON object, a
/// payload field is missing, or a field has the wrong type.
pub fn deserialize<T: DeserializeOwned>(bytes: &[u8]) -> TokenResult<(Map<String, Value>, Envelope<T>)> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| TokenError::conversion(format!("claims: {e}")))?;

    let Value::Object(object) = value else {
        return Err(TokenError::conversion("claims must be a JSON object"));
    };

    let iat = instant(&object, ISSUED_AT)?;
    let exp = instant(&object, EXPIRES_AT)?;
    let claims = T::deserialize(&Value::Object(object.clone()))
        .map_err(|e| TokenError::conversion(format!("claims: {e}")))?;

    Ok((object, Envelope { claims, iat, exp }))
}

fn instant(object: &Map<String, Value>, name: &str) -> TokenResult<Option<i64>> {
    match object.get(name) {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| TokenError::conversion(format!("claims: {name} is not an integer"))),
    }
}

/// A payload that passed every verification step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verified<T> {
    /// Caller payload
    pub claims: T,
    /// When the token was issued, if it says
    pub issued_at: Option<DateTime<Utc>>,
    /// When the token stops being valid
    pub expires_at: DateTime<Utc>,
}

impl<T> Verified<T> {
    /// Discard the time claims and keep the payload
    #[inline]
    pub fn into_claims(self) -> T {
        self.claims
    }
}

/// Convert unix milliseconds to a UTC instant
pub(crate) fn from_unix_millis(millis: i64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single()
}
