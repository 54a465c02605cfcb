//! Environment-driven configuration
//!
//! | Variable | Required | Meaning |
//! |---|---|---|
//! | `JWT_SECRET` | yes | signing secret (hex, base64 or raw text, >= 32 bytes) |
//! | `JWT_SESSION_TTL_SECS` | no | login session lifetime, default two weeks |
//! | `JWT_VERIFICATION_TTL_SECS` | no | email-verification lifetime, default one day |
//! | `JWT_LEEWAY_SECS` | no | grace period past `exp`, default zero |

use crate::codec::TokenCodec;
use crate::error::ConfigError;
use crate::key::SecretKey;
use crate::policy::ValidationPolicy;
use crate::session::{EMAIL_VERIFICATION_TTL, SESSION_TTL, SessionTokens};
use std::time::Duration;

/// Variable holding the signing secret
pub const SECRET_VAR: &str = "JWT_SECRET";
/// Variable overriding the session lifetime
pub const SESSION_TTL_VAR: &str = "JWT_SESSION_TTL_SECS";
/// Variable overriding the email-verification lifetime
pub const VERIFICATION_TTL_VAR: &str = "JWT_VERIFICATION_TTL_SECS";
/// Variable overriding the expiry leeway
pub const LEEWAY_VAR: &str = "JWT_LEEWAY_SECS";

/// Token settings
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Signing secret
    pub secret: SecretKey,
    /// Login session lifetime
    pub session_ttl: Duration,
    /// Email-verification lifetime
    pub verification_ttl: Duration,
    /// Grace period past `exp`
    pub leeway: Duration,
}

impl TokenConfig {
    /// Settings with default lifetimes and no leeway
    #[must_use]
    pub fn new(secret: SecretKey) -> Self {
        Self {
            secret,
            session_ttl: SESSION_TTL,
            verification_ttl: EMAIL_VERIFICATION_TTL,
            leeway: Duration::ZERO,
        }
    }

    /// Load settings from the process environment
    ///
    /// # Errors
    /// Returns `ConfigError` if the secret is missing or unusable, or an
    /// optional variable is set to something other than whole seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load settings through an arbitrary variable lookup
    ///
    /// # Errors
    /// Same as [`TokenConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup(SECRET_VAR).ok_or_else(|| ConfigError::MissingEnv(SECRET_VAR.to_string()))?;
        let secret = SecretKey::from_text(&zeroize::Zeroizing::new(secret))?;

        let mut config = Self::new(secret);
        if let Some(ttl) = seconds(&lookup, SESSION_TTL_VAR)? {
            config.session_ttl = ttl;
        }
        if let Some(ttl) = seconds(&lookup, VERIFICATION_TTL_VAR)? {
            config.verification_ttl = ttl;
        }
        if let Some(leeway) = seconds(&lookup, LEEWAY_VAR)? {
            config.leeway = leeway;
        }

        tracing::debug!(
            session_ttl_secs = config.session_ttl.as_secs(),
            verification_ttl_secs = config.verification_ttl.as_secs(),
            leeway_secs = config.leeway.as_secs(),
            "token configuration loaded"
        );
        Ok(config)
    }

    /// Build a codec on the system clock
    #[must_use]
    pub fn codec(&self) -> TokenCodec {
        TokenCodec::new(&self.secret)
            .with_policy(ValidationPolicy::new().with_leeway(self.leeway))
    }

    /// Build the login / email-verification service on the system clock
    #[must_use]
    pub fn sessions(&self) -> SessionTokens {
        SessionTokens::new(self.codec())
            .with_session_ttl(self.session_ttl)
            .with_verification_ttl(self.verification_ttl)
    }
}

fn seconds<F>(lookup: &F, var: &str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<u64>()
        .map(|secs| Some(Duration::from_secs(secs)))
        .map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value,
        })
}
