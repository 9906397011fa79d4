use std::collections::HashMap;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Payload of a signed bearer token.
///
/// Carries the subject, the issue and expiry instants (Unix seconds), and
/// any custom fields flattened into the token body. Unlike the standard's
/// all-optional claim set, `sub`, `iat` and `exp` are mandatory here: a
/// token without them is not a token this system ever issued.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Subject (the account's login identifier)
    pub sub: String,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Additional custom fields (flattened into the token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Build claims for `subject`, issued at `now` and valid for `validity`.
    ///
    /// Invariant: `exp == iat + validity`.
    pub fn issued_at(subject: impl Into<String>, now: DateTime<Utc>, validity: Duration) -> Self {
        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: (now + validity).timestamp(),
            extra: HashMap::new(),
        }
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }

    /// Expiry is exclusive: the token is already expired at the instant
    /// `exp` itself.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_issued_at_sets_expiry_from_validity() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let claims = Claims::issued_at("john.doe@example.com", now, Duration::hours(24));

        assert_eq!(claims.sub, "john.doe@example.com");
        assert_eq!(claims.iat, now.timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_with_extra() {
        let now = Utc::now();
        let claims =
            Claims::issued_at("user", now, Duration::hours(1)).with_extra("device", "mobile");

        assert_eq!(claims.extra.get("device").unwrap().as_str(), Some("mobile"));
    }

    #[test]
    fn test_is_expired_is_exclusive_at_boundary() {
        let issued = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let claims = Claims::issued_at("user", issued, Duration::hours(1));

        let just_before = issued + Duration::seconds(3599);
        let boundary = issued + Duration::seconds(3600);
        let after = issued + Duration::seconds(3601);

        assert!(!claims.is_expired(just_before));
        assert!(claims.is_expired(boundary));
        assert!(claims.is_expired(after));
    }
}
