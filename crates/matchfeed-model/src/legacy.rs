//! Legacy feed document
//!
//! The legacy store produces a feed shaped as
//! `matchId -> section -> field -> value`. The `profile` section is the only
//! one the primary store refines, so it gets typed accessors through
//! [`ProfileOverlay`]; every other section is carried through untouched.
//! Serializing a [`LegacyFeed`] with serde yields the same literal shape it
//! was read from.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Name of the profile section in the legacy wire shape
pub const PROFILE_SECTION: &str = "profile";

/// Untyped legacy section: field name to scalar value
pub type Section = BTreeMap<String, Value>;

/// Legacy matches feed keyed by decimal match id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LegacyFeed {
    matches: BTreeMap<String, LegacyMatch>,
}

impl LegacyFeed {
    /// Create empty feed
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of matches
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Check if feed has no matches
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Look up a match
    #[inline]
    #[must_use]
    pub fn get(&self, match_id: &str) -> Option<&LegacyMatch> {
        self.matches.get(match_id)
    }

    /// Look up a match for in-place refinement
    #[inline]
    pub fn get_mut(&mut self, match_id: &str) -> Option<&mut LegacyMatch> {
        self.matches.get_mut(match_id)
    }

    /// Insert or replace a match entry
    ///
    /// Used by legacy-feed producers; reconciliation only ever refines
    /// entries that already exist.
    pub fn insert(&mut self, match_id: impl Into<String>, entry: LegacyMatch) {
        self.matches.insert(match_id.into(), entry);
    }

    /// With match entry
    #[inline]
    #[must_use]
    pub fn with_match(mut self, match_id: impl Into<String>, entry: LegacyMatch) -> Self {
        self.insert(match_id, entry);
        self
    }

    /// Iterate over `(match_id, entry)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &LegacyMatch)> {
        self.matches.iter()
    }
}

/// One legacy feed entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyMatch {
    /// Profile section of the matched user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileOverlay>,

    /// Every other section, untouched by reconciliation
    #[serde(flatten)]
    pub sections: BTreeMap<String, Section>,
}

impl LegacyMatch {
    /// Create entry with a profile section
    #[inline]
    #[must_use]
    pub fn with_profile(profile: ProfileOverlay) -> Self {
        Self {
            profile: Some(profile),
            sections: BTreeMap::new(),
        }
    }

    /// With an untyped section
    #[inline]
    #[must_use]
    pub fn with_section(mut self, name: impl Into<String>, section: Section) -> Self {
        self.sections.insert(name.into(), section);
        self
    }

    /// Profile section, created empty if the legacy entry had none
    pub fn profile_mut(&mut self) -> &mut ProfileOverlay {
        self.profile.get_or_insert_with(ProfileOverlay::default)
    }
}

/// Field names of the legacy `profile` section
const GENDER: &str = "gender";
const COUNTRY: &str = "country";
const USER_ID: &str = "userid";
const CITY: &str = "city";
const FIRST_NAME: &str = "firstName";
const STATE_CODE: &str = "stateCode";
const BIRTHDATE: &str = "birthdate";

/// The legacy `profile` section
///
/// Values are held exactly as the legacy store wrote them, including explicit
/// nulls and values of an unexpected type, so a section that reconciliation
/// does not write serializes back unchanged. Typed getters return `None` for
/// an absent, null or ill-typed value; setters replace the raw value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileOverlay {
    fields: Section,
}

impl ProfileOverlay {
    /// Create empty profile section
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a raw field value
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Raw value of a field, as the legacy store wrote it
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Replace a raw field value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Number of fields, including nulls
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the section has no fields
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Gender code
    #[must_use]
    pub fn gender(&self) -> Option<i32> {
        self.int(GENDER)
    }

    /// Country code
    #[must_use]
    pub fn country(&self) -> Option<i32> {
        self.int(COUNTRY)
    }

    /// Matched user id
    #[must_use]
    pub fn user_id(&self) -> Option<i64> {
        self.long(USER_ID)
    }

    /// City name
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.text(CITY)
    }

    /// First name
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.text(FIRST_NAME)
    }

    /// State code
    #[must_use]
    pub fn state_code(&self) -> Option<&str> {
        self.text(STATE_CODE)
    }

    /// Birthdate in epoch milliseconds
    #[must_use]
    pub fn birthdate(&self) -> Option<i64> {
        self.long(BIRTHDATE)
    }

    /// Set gender code
    pub fn set_gender(&mut self, gender: i32) {
        self.insert(GENDER, gender);
    }

    /// Set country code
    pub fn set_country(&mut self, country: i32) {
        self.insert(COUNTRY, country);
    }

    /// Set matched user id
    pub fn set_user_id(&mut self, user_id: i64) {
        self.insert(USER_ID, user_id);
    }

    /// Set city name
    pub fn set_city(&mut self, city: &str) {
        self.insert(CITY, city);
    }

    /// Set first name
    pub fn set_first_name(&mut self, first_name: &str) {
        self.insert(FIRST_NAME, first_name);
    }

    /// Set state code
    pub fn set_state_code(&mut self, state_code: &str) {
        self.insert(STATE_CODE, state_code);
    }

    /// Set birthdate in epoch milliseconds
    pub fn set_birthdate(&mut self, millis: i64) {
        self.insert(BIRTHDATE, millis);
    }

    fn long(&self, name: &str) -> Option<i64> {
        self.fields.get(name).and_then(Value::as_i64)
    }

    fn int(&self, name: &str) -> Option<i32> {
        self.long(name).and_then(|v| i32::try_from(v).ok())
    }

    fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn wire_shape_round_trips() {
        let wire = json!({
            "42": {
                "profile": { "gender": 1, "city": "Austin", "photo": "a.jpg" },
                "match": { "status": 3, "deliveredDate": 1_700_000_000_000_i64 }
            },
            "43": {
                "communication": { "stage": 2 }
            }
        });

        let feed: LegacyFeed = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(feed.len(), 2);

        let entry = feed.get("42").unwrap();
        let profile = entry.profile.as_ref().unwrap();
        assert_eq!(profile.gender(), Some(1));
        assert_eq!(profile.city(), Some("Austin"));
        assert_eq!(profile.get("photo"), Some(&json!("a.jpg")));
        assert!(entry.sections.contains_key("match"));
        assert!(feed.get("43").unwrap().profile.is_none());

        assert_eq!(serde_json::to_value(&feed).unwrap(), wire);
    }

    #[test]
    fn user_id_uses_legacy_field_name() {
        let mut overlay = ProfileOverlay::new();
        overlay.set_user_id(99);
        assert_eq!(serde_json::to_value(&overlay).unwrap(), json!({ "userid": 99 }));
    }

    #[test]
    fn profile_mut_creates_missing_section() {
        let mut entry = LegacyMatch::default();
        entry.profile_mut().set_gender(2);
        assert_eq!(entry.profile.unwrap().gender(), Some(2));
    }

    #[test]
    fn ill_typed_profile_value_is_kept_raw() {
        let wire = json!({ "42": { "profile": { "gender": "1", "country": 3 } } });

        let feed: LegacyFeed = serde_json::from_value(wire.clone()).unwrap();
        let profile = feed.get("42").unwrap().profile.as_ref().unwrap();
        assert_eq!(profile.gender(), None);
        assert_eq!(profile.get("gender"), Some(&json!("1")));
        assert_eq!(profile.country(), Some(3));

        assert_eq!(serde_json::to_value(&feed).unwrap(), wire);
    }

    #[test]
    fn explicit_null_survives_round_trip() {
        let wire = json!({ "42": { "profile": { "city": null, "gender": 1 } } });

        let feed: LegacyFeed = serde_json::from_value(wire.clone()).unwrap();
        let profile = feed.get("42").unwrap().profile.as_ref().unwrap();
        assert_eq!(profile.city(), None);
        assert_eq!(profile.len(), 2);

        assert_eq!(serde_json::to_value(&feed).unwrap(), wire);
    }

    #[test]
    fn setter_replaces_ill_typed_value() {
        let mut profile = ProfileOverlay::new().with("gender", "1");
        profile.set_gender(2);
        assert_eq!(profile.get("gender"), Some(&json!(2)));
    }
}
