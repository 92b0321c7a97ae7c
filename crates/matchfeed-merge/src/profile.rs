//! Field-level profile overlay

use matchfeed_model::{EventSink, FeedEvent, MatchRecord, ProfileField, ProfileOverlay};

/// Overwrite legacy profile fields the primary-store record actually has
///
/// A field whose primary-store value is missing (non-positive code, blank
/// string, absent date) keeps its legacy value and is reported as
/// [`FeedEvent::FieldMissing`]. The matched user id is always written. A
/// missing state code is kept silently.
pub fn overlay_profile(profile: &mut ProfileOverlay, record: &MatchRecord, events: &dyn EventSink) {
    let source = &record.matched_user;
    let matched_user_id = record.matched_user_id;
    let missing = |field: ProfileField| {
        events.emit(FeedEvent::FieldMissing {
            field,
            matched_user_id,
            match_id: record.legacy_key(),
        });
    };

    match source.present_gender() {
        Some(gender) => profile.set_gender(gender),
        None => missing(ProfileField::Gender),
    }
    match source.present_country() {
        Some(country) => profile.set_country(country),
        None => missing(ProfileField::Country),
    }
    profile.set_user_id(matched_user_id);
    match source.present_city() {
        Some(city) => profile.set_city(city),
        None => missing(ProfileField::City),
    }
    match source.present_first_name() {
        Some(first_name) => profile.set_first_name(first_name),
        None => missing(ProfileField::FirstName),
    }
    if let Some(state_code) = source.present_state_code() {
        profile.set_state_code(state_code);
    }
    match source.birthdate_millis() {
        Some(millis) => profile.set_birthdate(millis),
        None => missing(ProfileField::Birthdate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use matchfeed_model::{MatchedUserProfile, NoopEventSink};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Missing(Mutex<Vec<ProfileField>>);

    impl EventSink for Missing {
        fn emit(&self, event: FeedEvent) {
            if let FeedEvent::FieldMissing { field, .. } = event {
                self.0.lock().unwrap().push(field);
            }
        }
    }

    fn legacy_profile() -> ProfileOverlay {
        ProfileOverlay::new()
            .with("gender", 1)
            .with("country", 2)
            .with("userid", 5)
            .with("city", "Dallas")
            .with("firstName", "Ann")
            .with("stateCode", "TX")
            .with("birthdate", 1)
    }

    #[test]
    fn present_fields_overwrite() {
        let birthdate = Utc.with_ymd_and_hms(1985, 6, 1, 0, 0, 0).unwrap();
        let record = MatchRecord::new(42, 7, 99).with_profile(MatchedUserProfile {
            gender: 2,
            country: 3,
            city: Some("Austin".to_string()),
            first_name: Some("Bea".to_string()),
            state_code: Some("CA".to_string()),
            birthdate: Some(birthdate),
        });

        let mut profile = legacy_profile();
        overlay_profile(&mut profile, &record, &NoopEventSink);

        assert_eq!(
            serde_json::to_value(&profile).unwrap(),
            json!({
                "gender": 2,
                "country": 3,
                "userid": 99,
                "city": "Austin",
                "firstName": "Bea",
                "stateCode": "CA",
                "birthdate": birthdate.timestamp_millis(),
            })
        );
    }

    #[test]
    fn missing_fields_keep_legacy_values() {
        let record = MatchRecord::new(42, 7, 99).with_profile(MatchedUserProfile {
            city: Some("  ".to_string()),
            ..MatchedUserProfile::default()
        });

        let mut profile = legacy_profile();
        let events = Missing::default();
        overlay_profile(&mut profile, &record, &events);

        let mut expected = legacy_profile();
        expected.set_user_id(99);
        assert_eq!(profile, expected);
    }

    #[test]
    fn missing_state_code_is_silent() {
        let record = MatchRecord::new(42, 7, 99);
        let events = Missing::default();
        overlay_profile(&mut ProfileOverlay::default(), &record, &events);

        assert_eq!(
            *events.0.lock().unwrap(),
            vec![
                ProfileField::Gender,
                ProfileField::Country,
                ProfileField::City,
                ProfileField::FirstName,
                ProfileField::Birthdate,
            ]
        );
    }

    #[test]
    fn unknown_profile_fields_survive() {
        let mut profile = ProfileOverlay::new().with("photo", "a.jpg");
        overlay_profile(&mut profile, &MatchRecord::new(1, 2, 3), &NoopEventSink);
        assert_eq!(profile.get("photo"), Some(&json!("a.jpg")));
    }

    #[test]
    fn ill_typed_legacy_value_kept_when_store_value_missing() {
        let mut profile = ProfileOverlay::new().with("gender", "1").with("city", json!(null));
        overlay_profile(&mut profile, &MatchRecord::new(1, 2, 3), &NoopEventSink);

        assert_eq!(profile.get("gender"), Some(&json!("1")));
        assert_eq!(profile.get("city"), Some(&json!(null)));
        assert_eq!(profile.user_id(), Some(3));
    }
}
