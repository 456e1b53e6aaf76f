// src/util.rs
//! Small helpers shared by the store and the gate
//!
//! Password hashing and the timestamp text codec.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, ParseError, SecondsFormat, SubsecRound, Utc};
use sha2::{Digest, Sha256};

/// base64(SHA-256(UTF-8 password)), the encoding stored under the `Password` setting
pub fn password_digest(password: &str) -> String {
    STANDARD.encode(Sha256::digest(password.as_bytes()))
}

/// ISO-8601 / RFC 3339 text with microseconds and a `Z` suffix
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc3339(text).map(|dt| dt.with_timezone(&Utc))
}

/// Current UTC time truncated to what `format_timestamp` preserves
pub fn now_utc() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_known_vector() {
        // SHA-256("P1")
        assert_eq!(
            password_digest("P1"),
            "++rnwYZntph1GPOuYe2LGQOOWWHo5zaFl0KO/3bkhCo="
        );
    }

    #[test]
    fn timestamp_text_roundtrips() {
        let now = now_utc();
        let text = format_timestamp(&now);
        assert!(text.ends_with('Z'));
        assert_eq!(parse_timestamp(&text).unwrap(), now);
    }

    #[test]
    fn offset_timestamps_are_normalised_to_utc() {
        let ts = parse_timestamp("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(format_timestamp(&ts), "2024-05-01T10:00:00.000000Z");
    }
}
