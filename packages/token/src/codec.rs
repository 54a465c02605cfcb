//! Token signing and verification
//!
//! [`TokenCodec`] ties the pieces together. Verification runs its checks in
//! a fixed order: format (segment count, base64url, tag length), then the
//! MAC, then header and claims conversion, then expiry and required claims.
//! Nothing past the MAC check ever sees bytes an attacker could have chosen.

use crate::claims::{self, Verified};
use crate::clock::{Clock, SystemClock};
use crate::error::{TokenError, TokenResult};
use crate::header::TokenHeader;
use crate::key::SecretKey;
use crate::policy::ValidationPolicy;
use crate::signer::Hs256Signer;
use crate::token;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Signs payloads into tokens and verifies tokens back into payloads
///
/// The codec holds no mutable state; share it by reference (or `Arc`)
/// across threads.
#[derive(Debug, Clone)]
pub struct TokenCodec<C = SystemClock> {
    signer: Hs256Signer,
    clock: C,
    policy: ValidationPolicy,
}

impl TokenCodec<SystemClock> {
    /// Create a codec using the system clock and the default policy
    #[must_use]
    pub fn new(key: &SecretKey) -> Self {
        Self {
            signer: Hs256Signer::new(key),
            clock: SystemClock,
            policy: ValidationPolicy::default(),
        }
    }
}

impl<C: Clock> TokenCodec<C> {
    /// Replace the time source
    #[must_use]
    pub fn with_clock<D: Clock>(self, clock: D) -> TokenCodec<D> {
        TokenCodec {
            signer: self.signer,
            clock,
            policy: self.policy,
        }
    }

    /// Replace the validation policy
    #[must_use]
    pub fn with_policy(mut self, policy: ValidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validation policy in effect
    #[inline]
    #[must_use]
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Time source in effect
    #[inline]
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Sign `claims`, valid for `ttl` from now
    ///
    /// `iat` is set to the current instant and `exp` to `iat + ttl`, both in
    /// unix milliseconds; a sub-millisecond remainder of `ttl` rounds up.
    /// Any values the payload carried under those names are overwritten.
    /// Signing the same payload at the same instant yields the same token.
    ///
    /// # Errors
    /// Returns a `ConversionFailure` if the payload does not serialize to a
    /// JSON object or the expiry overflows.
    pub fn sign<T: Serialize + ?Sized>(&self, claims: &T, ttl: Duration) -> TokenResult<String> {
        let issued_at = self.clock.now().timestamp_millis();
        let expires_at = i64::try_from(ttl.as_nanos().div_ceil(1_000_000))
            .ok()
            .and_then(|ttl| issued_at.checked_add(ttl))
            .ok_or_else(|| TokenError::conversion("ttl out of range"))?;

        let header = TokenHeader::current().to_bytes()?;
        let claims = claims::serialize(claims, issued_at, expires_at)?;
        let input = token::signing_input(&header, &claims);
        let mac = self.signer.sign(input.as_bytes());

        tracing::trace!(alg = self.signer.alg(), issued_at, expires_at, "signed token");
        Ok(token::seal(input, &mac))
    }

    /// Verify `token` and convert its claims into `T`
    ///
    /// # Errors
    /// - `BadTokenFormat` if the token is not three non-empty base64url
    ///   segments with a full-length tag
    /// - `VerificationFailure` if the MAC does not match, the header names
    ///   another algorithm, a required claim is missing, or the token expired
    /// - `ConversionFailure` if the header or claims do not convert
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> TokenResult<Verified<T>> {
        self.verify_inner(token).map_err(|err| {
            tracing::debug!(
                code = %err.code(),
                detail = err.detail().unwrap_or_default(),
                "token rejected"
            );
            err
        })
    }

    fn verify_inner<T: DeserializeOwned>(&self, token: &str) -> TokenResult<Verified<T>> {
        let segments = token::split(token)?;
        let decoded = segments.decode()?;

        if !self
            .signer
            .verify(segments.signing_input().as_bytes(), &decoded.mac)
        {
            return Err(TokenError::verification("signature mismatch"));
        }

        TokenHeader::from_bytes(&decoded.header)?.ensure_supported()?;

        let (object, envelope) = claims::deserialize::<T>(&decoded.claims)?;
        let exp = self.policy.check(&object, envelope.exp, self.clock.now())?;

        let expires_at = claims::from_unix_millis(exp)
            .ok_or_else(|| TokenError::conversion("exp out of range"))?;
        let issued_at = envelope.iat.and_then(claims::from_unix_millis);

        Ok(Verified {
            claims: envelope.claims,
            issued_at,
            expires_at,
        })
    }
}
