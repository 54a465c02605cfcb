//! Signed, expiring tokens
//!
//! This crate provides:
//! - HS256 signing over `base64url(header).base64url(claims)`
//! - Typed claims via serde, with registered `iat` / `exp` claims
//! - A closed error taxonomy ([`ErrorCode`]) for callers to branch on
//! - Injectable clocks so expiry can be tested deterministically
//! - Login (fingerprint-bound) and email-verification token helpers
//!
//! ```
//! use cryypt_token::{SecretKey, TokenCodec, units::DurationExt};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Login {
//!     username: String,
//! }
//!
//! let key = SecretKey::new(vec![42u8; 32])?;
//! let codec = TokenCodec::new(&key);
//!
//! let token = codec.sign(&Login { username: "alice".into() }, 2_u64.weeks())?;
//! let login = codec.verify::<Login>(&token)?.into_claims();
//! assert_eq!(login.username, "alice");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod base64url;
pub mod claims;
pub mod clock;
mod codec;
pub mod config;
mod error;
pub mod header;
mod key;
pub mod policy;
pub mod session;
pub mod signer;
pub mod token;
pub mod units;

pub use claims::Verified;
pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::TokenCodec;
pub use config::TokenConfig;
pub use error::*;
pub use key::{MIN_SECRET_LEN, SecretKey};
pub use policy::ValidationPolicy;
pub use session::{
    AccountType, EmailVerificationToken, Fingerprint, IssuedSession, SessionTokens, UserToken,
};
