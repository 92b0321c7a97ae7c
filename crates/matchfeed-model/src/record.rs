//! Primary-store match records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One candidate match returned by the primary store
///
/// Immutable once returned by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// Stable match identity
    pub match_id: i64,
    /// User the feed belongs to
    pub owner_user_id: i64,
    /// The other side of the match
    pub matched_user_id: i64,
    /// Profile of the matched user
    pub matched_user: MatchedUserProfile,
}

impl MatchRecord {
    /// Create record with an empty profile
    #[inline]
    #[must_use]
    pub fn new(match_id: i64, owner_user_id: i64, matched_user_id: i64) -> Self {
        Self {
            match_id,
            owner_user_id,
            matched_user_id,
            matched_user: MatchedUserProfile::default(),
        }
    }

    /// With matched-user profile
    #[inline]
    #[must_use]
    pub fn with_profile(mut self, profile: MatchedUserProfile) -> Self {
        self.matched_user = profile;
        self
    }

    /// Key of this record in the legacy feed
    #[inline]
    #[must_use]
    pub fn legacy_key(&self) -> String {
        self.match_id.to_string()
    }
}

/// Matched-user profile embedded in a [`MatchRecord`]
///
/// Non-positive codes, blank strings and absent dates mean "missing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedUserProfile {
    /// Gender code
    pub gender: i32,
    /// Country code
    pub country: i32,
    /// City name
    pub city: Option<String>,
    /// First name
    pub first_name: Option<String>,
    /// State or region code
    pub state_code: Option<String>,
    /// Birthdate
    pub birthdate: Option<DateTime<Utc>>,
}

impl MatchedUserProfile {
    /// Gender if it is a positive code
    #[inline]
    #[must_use]
    pub fn present_gender(&self) -> Option<i32> {
        (self.gender > 0).then_some(self.gender)
    }

    /// Country if it is a positive code
    #[inline]
    #[must_use]
    pub fn present_country(&self) -> Option<i32> {
        (self.country > 0).then_some(self.country)
    }

    /// City if not blank
    #[inline]
    #[must_use]
    pub fn present_city(&self) -> Option<&str> {
        non_blank(self.city.as_deref())
    }

    /// First name if not blank
    #[inline]
    #[must_use]
    pub fn present_first_name(&self) -> Option<&str> {
        non_blank(self.first_name.as_deref())
    }

    /// State code if not blank
    #[inline]
    #[must_use]
    pub fn present_state_code(&self) -> Option<&str> {
        non_blank(self.state_code.as_deref())
    }

    /// Birthdate as epoch milliseconds
    #[inline]
    #[must_use]
    pub fn birthdate_millis(&self) -> Option<i64> {
        self.birthdate.map(|d| d.timestamp_millis())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn non_positive_codes_are_missing() {
        let profile = MatchedUserProfile {
            gender: 0,
            country: -1,
            ..MatchedUserProfile::default()
        };
        assert_eq!(profile.present_gender(), None);
        assert_eq!(profile.present_country(), None);
    }

    #[test]
    fn whitespace_strings_are_blank() {
        let profile = MatchedUserProfile {
            city: Some("   ".to_string()),
            first_name: Some(String::new()),
            state_code: Some("TX".to_string()),
            ..MatchedUserProfile::default()
        };
        assert_eq!(profile.present_city(), None);
        assert_eq!(profile.present_first_name(), None);
        assert_eq!(profile.present_state_code(), Some("TX"));
    }

    #[test]
    fn birthdate_converts_to_millis() {
        let date = Utc.with_ymd_and_hms(1990, 1, 1, 0, 0, 0).unwrap();
        let profile = MatchedUserProfile {
            birthdate: Some(date),
            ..MatchedUserProfile::default()
        };
        assert_eq!(profile.birthdate_millis(), Some(631_152_000_000));
    }

    #[test]
    fn legacy_key_is_decimal_match_id() {
        assert_eq!(MatchRecord::new(42, 1, 99).legacy_key(), "42");
    }
}
