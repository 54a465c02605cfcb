//! Login and email-verification tokens
//!
//! A login token carries the user's identity plus the hash of a random
//! session fingerprint. The raw fingerprint goes to the browser in an
//! http-only cookie; a token presented without the matching cookie is
//! treated as replayed outside its original session.

use crate::claims::Verified;
use crate::clock::{Clock, SystemClock};
use crate::codec::TokenCodec;
use crate::error::{TokenError, TokenResult};
use crate::units;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::time::Duration;
use subtle::ConstantTimeEq;

/// Default lifetime of a login session
pub const SESSION_TTL: Duration = units::weeks(2);

/// Default lifetime of an email-verification link
pub const EMAIL_VERIFICATION_TTL: Duration = units::days(1);

/// `Max-Age` for the fingerprint cookie, in seconds
pub const SESSION_COOKIE_MAX_AGE: u64 = SESSION_TTL.as_secs();

/// Default fingerprint length in hex characters
pub const FINGERPRINT_LEN: usize = 16;

/// Kind of account a user holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Regular account
    #[default]
    User,
    /// Administrator
    Admin,
}

/// Claims carried by a login token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserToken {
    /// Unique user name
    pub username: String,
    /// Name shown in the UI
    pub display_name: String,
    /// Account email
    pub email: String,
    /// Account kind
    #[serde(rename = "type")]
    pub account_type: AccountType,
    /// Hex SHA-256 of the session fingerprint
    pub fingerprint: String,
}

/// Claims carried by an email-verification token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailVerificationToken {
    /// Id of the user whose address is being verified
    pub user_id: String,
    /// Address being verified
    pub email: String,
}

/// Random session fingerprint (lowercase hex)
#[derive(Clone, PartialEq, Eq)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Generate a fingerprint of [`FINGERPRINT_LEN`] hex characters
    #[must_use]
    pub fn generate() -> Self {
        Self::with_len(FINGERPRINT_LEN)
    }

    /// Generate a fingerprint of `len` hex characters
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        let mut bytes = vec![0u8; len.div_ceil(2)];
        rand::rng().fill(bytes.as_mut_slice());
        let mut text = hex::encode(bytes);
        text.truncate(len);
        Self(text)
    }

    /// Raw value, as stored in the cookie
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Hex SHA-256 digest, as stored in the token
    #[must_use]
    pub fn hash(&self) -> String {
        hash_fingerprint(&self.0)
    }

    /// Check a cookie value against a digest taken from a token
    #[must_use]
    pub fn matches(cookie_value: &str, stored_hash: &str) -> bool {
        let computed = hash_fingerprint(cookie_value);
        computed.as_bytes().ct_eq(stored_hash.as_bytes()).into()
    }
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fingerprint([REDACTED])")
    }
}

fn hash_fingerprint(value: &str) -> String {
    hex::encode(Sha256::digest(value.as_bytes()))
}

/// Token and cookie value produced by a login
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Signed login token
    pub token: String,
    /// Raw fingerprint for the cookie
    pub fingerprint: Fingerprint,
}

/// Issues and checks login and email-verification tokens
#[derive(Debug, Clone)]
pub struct SessionTokens<C = SystemClock> {
    codec: TokenCodec<C>,
    session_ttl: Duration,
    verification_ttl: Duration,
}

impl<C: Clock> SessionTokens<C> {
    /// Use `codec` with the default lifetimes
    #[must_use]
    pub fn new(codec: TokenCodec<C>) -> Self {
        Self {
            codec,
            session_ttl: SESSION_TTL,
            verification_ttl: EMAIL_VERIFICATION_TTL,
        }
    }

    /// Override the login session lifetime
    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Override the email-verification lifetime
    #[must_use]
    pub fn with_verification_ttl(mut self, ttl: Duration) -> Self {
        self.verification_ttl = ttl;
        self
    }

    /// Underlying codec
    #[inline]
    #[must_use]
    pub fn codec(&self) -> &TokenCodec<C> {
        &self.codec
    }

    /// Login session lifetime
    #[inline]
    #[must_use]
    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Sign a login token bound to a freshly generated fingerprint
    ///
    /// Whatever `user.fingerprint` held is replaced by the new digest.
    ///
    /// # Errors
    /// Propagates signing errors from the codec.
    pub fn issue_session(&self, mut user: UserToken) -> TokenResult<IssuedSession> {
        let fingerprint = Fingerprint::generate();
        user.fingerprint = fingerprint.hash();
        let token = self.codec.sign(&user, self.session_ttl)?;
        Ok(IssuedSession { token, fingerprint })
    }

    /// Verify a login token and the fingerprint cookie sent with it
    ///
    /// # Errors
    /// Any codec error, or a `VerificationFailure` if the cookie is absent
    /// or does not match the token.
    pub fn verify_session(
        &self,
        token: &str,
        fingerprint_cookie: Option<&str>,
    ) -> TokenResult<Verified<UserToken>> {
        let verified = self.codec.verify::<UserToken>(token)?;
        let matched = fingerprint_cookie
            .is_some_and(|cookie| Fingerprint::matches(cookie, &verified.claims.fingerprint));
        if !matched {
            tracing::debug!(username = %verified.claims.username, "fingerprint mismatch");
            return Err(TokenError::verification("fingerprint mismatch"));
        }
        Ok(verified)
    }

    /// Sign an email-verification token
    ///
    /// # Errors
    /// Propagates signing errors from the codec.
    pub fn issue_email_verification(
        &self,
        user_id: impl Into<String>,
        email: impl Into<String>,
    ) -> TokenResult<String> {
        let claims = EmailVerificationToken {
            user_id: user_id.into(),
            email: email.into(),
        };
        self.codec.sign(&claims, self.verification_ttl)
    }

    /// Verify an email-verification token
    ///
    /// # Errors
    /// Any codec error.
    pub fn verify_email_verification(
        &self,
        token: &str,
    ) -> TokenResult<Verified<EmailVerificationToken>> {
        self.codec.verify(token)
    }
}
