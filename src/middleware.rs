//! Slack signed-secrets check guarding the `/setup` slash command.

use actix_web::HttpRequest;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_WINDOW_SECS: i64 = 60 * 5;

pub fn validate_slack_request(secret: &str, request: &HttpRequest, body: &[u8]) -> bool {
    let timestamp = request
        .headers()
        .get("x-slack-request-timestamp")
        .and_then(|value| value.to_str().ok());
    let signature = request
        .headers()
        .get("x-slack-signature")
        .and_then(|value| value.to_str().ok());
    validate_signature(secret, timestamp, signature, body)
}

pub fn validate_signature(
    secret: &str,
    timestamp: Option<&str>,
    signature: Option<&str>,
    body: &[u8],
) -> bool {
    validate_signature_at(secret, timestamp, signature, body, chrono::Utc::now().timestamp())
}

/// Core check with the clock injected. Every failure path answers false,
/// no detail leaves this function.
fn validate_signature_at(
    secret: &str,
    timestamp: Option<&str>,
    signature: Option<&str>,
    body: &[u8],
    now: i64,
) -> bool {
    let Some(ts_raw) = timestamp else {
        return false;
    };
    let Ok(ts) = ts_raw.trim().parse::<i64>() else {
        return false;
    };
    if now - ts > SIGNATURE_WINDOW_SECS {
        return false;
    }

    let Some((version, hash)) = signature.unwrap_or("=").split_once('=') else {
        return false;
    };
    let Ok(expected) = hex::decode(hash) else {
        return false;
    };

    let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
        return false;
    };
    mac.update(version.as_bytes());
    mac.update(b":");
    mac.update(ts_raw.as_bytes());
    mac.update(b":");
    mac.update(body);

    // constant-time comparison
    mac.verify_slice(&expected).is_ok()
}
