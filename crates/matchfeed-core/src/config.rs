//! Service configuration
//!
//! Read-only, process-wide settings: the profile-field projection requested
//! for profile merges and the per-group feed limits. Callers load the text
//! however they like and hand it to [`MatchFeedConfig::from_toml_str`].

use crate::error::ConfigError;
use matchfeed_store::FeedLimitsConfig;
use serde::Deserialize;

/// Profile fields requested from the primary store for profile merges
pub const DEFAULT_PROFILE_FIELDS: [&str; 7] = [
    "gender",
    "country",
    "city",
    "firstName",
    "stateCode",
    "birthdate",
    "matchedUserId",
];

/// Matches feed configuration
///
/// ```toml
/// profile_fields = ["gender", "country", "city"]
///
/// [limits.groups.new]
/// default = 20
/// fallback = 50
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MatchFeedConfig {
    /// Field projection for profile merges
    #[serde(default = "default_profile_fields")]
    pub profile_fields: Vec<String>,
    /// Limits by status group
    #[serde(default)]
    pub limits: FeedLimitsConfig,
}

impl MatchFeedConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    /// - `ConfigError::Parse` if the document is not valid TOML for this shape
    /// - `ConfigError::Invalid` if a profile field name is blank
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// With field projection
    #[inline]
    #[must_use]
    pub fn with_profile_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.profile_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// With limits
    #[inline]
    #[must_use]
    pub fn with_limits(mut self, limits: FeedLimitsConfig) -> Self {
        self.limits = limits;
        self
    }

    /// Check invariants the parser cannot express
    ///
    /// # Errors
    /// `ConfigError::Invalid` if a profile field name is blank
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(index) = self.profile_fields.iter().position(|f| f.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "profile_fields[{index}] is blank"
            )));
        }
        Ok(())
    }
}

impl Default for MatchFeedConfig {
    fn default() -> Self {
        Self {
            profile_fields: default_profile_fields(),
            limits: FeedLimitsConfig::default(),
        }
    }
}

fn default_profile_fields() -> Vec<String> {
    DEFAULT_PROFILE_FIELDS.iter().map(ToString::to_string).collect()
}
