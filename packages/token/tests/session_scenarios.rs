//! End-to-end scenarios: login tokens, expiry, tampering and key mismatch

use cryypt_token::units::DurationExt;
use cryypt_token::{
    AccountType, ErrorCode, ManualClock, SecretKey, SessionTokens, TokenCodec, UserToken, token,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const T0: i64 = 1_700_000_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Session {
    username: String,
    fingerprint_hash: String,
}

fn alice() -> Session {
    Session {
        username: "alice".to_string(),
        fingerprint_hash: "abc123".to_string(),
    }
}

fn secret(text: &str) -> SecretKey {
    SecretKey::new(format!("{text:0<32}").into_bytes()).unwrap()
}

#[test]
fn two_week_session_lifecycle() {
    let clock = Arc::new(ManualClock::at_unix(T0));
    let codec = TokenCodec::new(&secret("k1")).with_clock(Arc::clone(&clock));

    let token = codec.sign(&alice(), 2_u64.weeks()).unwrap();
    assert_eq!(codec.verify::<Session>(&token).unwrap().claims, alice());

    // one character changed in the middle (claims) segment
    let segments = token::split(&token).unwrap();
    let claims = segments.claims();
    let mid = claims.len() / 2;
    let flipped = if &claims[mid..=mid] == "A" { "B" } else { "A" };
    let tampered = format!(
        "{}.{}{}{}.{}",
        segments.header(),
        &claims[..mid],
        flipped,
        &claims[mid + 1..],
        segments.mac()
    );
    let code = codec.verify::<Session>(&tampered).unwrap_err().code();
    assert!(matches!(
        code,
        ErrorCode::VerificationFailure | ErrorCode::BadTokenFormat
    ));

    clock.advance(15_u64.days());
    let err = codec.verify::<Session>(&token).unwrap_err();
    assert_eq!(err.code(), ErrorCode::VerificationFailure);
    assert_eq!(err.to_string(), "verification failure: expired");
}

#[test]
fn other_secret_cannot_verify() {
    let k1 = TokenCodec::new(&secret("k1")).with_clock(ManualClock::at_unix(T0));
    let k2 = TokenCodec::new(&secret("k2")).with_clock(ManualClock::at_unix(T0));
    let token = k1.sign(&alice(), 1_u64.hours()).unwrap();
    assert_eq!(
        k2.verify::<Session>(&token).unwrap_err().code(),
        ErrorCode::VerificationFailure
    );
}

#[test]
fn malformed_tokens() {
    let codec = TokenCodec::new(&secret("k1"));
    for bad in [
        "",
        "no-delimiters",
        "one.delimiter",
        "too.many.delimiters.here",
        "e30.e30.e30=",
        "e30.e3$.AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
    ] {
        assert_eq!(
            codec.verify::<Session>(bad).unwrap_err().code(),
            ErrorCode::BadTokenFormat,
            "{bad:?}"
        );
    }
}

#[test]
fn codec_is_shareable_across_threads() {
    let codec = Arc::new(TokenCodec::new(&secret("shared")));
    std::thread::scope(|scope| {
        for n in 0..8 {
            let codec = Arc::clone(&codec);
            scope.spawn(move || {
                let claims = Session {
                    username: format!("user{n}"),
                    fingerprint_hash: String::new(),
                };
                let token = codec.sign(&claims, 5_u64.minutes()).unwrap();
                assert_eq!(codec.verify::<Session>(&token).unwrap().claims, claims);
            });
        }
    });
}

#[test]
fn login_flow() {
    let clock = Arc::new(ManualClock::at_unix(T0));
    let sessions =
        SessionTokens::new(TokenCodec::new(&secret("login")).with_clock(Arc::clone(&clock)));

    let issued = sessions
        .issue_session(UserToken {
            username: "alice".to_string(),
            display_name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            account_type: AccountType::Admin,
            fingerprint: String::new(),
        })
        .unwrap();

    let verified = sessions
        .verify_session(&issued.token, Some(issued.fingerprint.as_str()))
        .unwrap();
    assert_eq!(verified.claims.account_type, AccountType::Admin);

    // stolen token replayed from a browser without the cookie
    assert!(sessions.verify_session(&issued.token, None).is_err());
}
