//! Expiration and required-claim checks applied after a token's MAC has
//! been verified and its claims converted.

use crate::claims::EXPIRES_AT;
use crate::error::{TokenError, TokenResult};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::time::Duration;

/// Semantic validation rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    /// Grace period granted past `exp`
    pub leeway: Duration,
    /// Claims that must be present in addition to `exp`
    pub required_claims: Vec<String>,
}

impl ValidationPolicy {
    /// Policy with no leeway and no extra required claims
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grace period past `exp`
    #[must_use]
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Require a claim to be present
    #[must_use]
    pub fn require_claim(mut self, claim: impl Into<String>) -> Self {
        self.required_claims.push(claim.into());
        self
    }

    /// Check the decoded claims against this policy
    ///
    /// `expires_at` is in unix milliseconds and is exclusive.
    ///
    /// # Errors
    /// Returns a `VerificationFailure` if a required claim is missing or the
    /// token has expired.
    pub fn check(
        &self,
        claims: &Map<String, Value>,
        expires_at: Option<i64>,
        now: DateTime<Utc>,
    ) -> TokenResult<i64> {
        let exp = expires_at
            .ok_or_else(|| TokenError::verification(format!("missing claim: {EXPIRES_AT}")))?;

        if let Some(missing) = self
            .required_claims
            .iter()
            .find(|name| !claims.contains_key(name.as_str()))
        {
            return Err(TokenError::verification(format!("missing claim: {missing}")));
        }

        let leeway = i64::try_from(self.leeway.as_millis()).unwrap_or(i64::MAX);
        if exp.saturating_add(leeway) <= now.timestamp_millis() {
            return Err(TokenError::verification("expired"));
        }

        Ok(exp)
    }
}
