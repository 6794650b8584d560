use serde::{Deserialize, Serialize};

use crate::constants::layout::MAX_INITIALS;

/// Creator identity shown in the page header
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub verified: bool,
    #[serde(default, skip_serializing_if = "ProfileStyle::is_empty")]
    pub style: ProfileStyle,
}

/// Optional per-field color overrides stored on the profile.
/// Only honored by the user-customizable theme.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text_color: Option<String>,
}

impl ProfileStyle {
    pub fn is_empty(&self) -> bool {
        self.background_color.is_none()
            && self.text_color.is_none()
            && self.button_color.is_none()
            && self.button_text_color.is_none()
    }
}

impl Profile {
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Uppercase initials of the display name, at most two letters.
    /// Falls back to the username when the display name is blank.
    pub fn initials(&self) -> String {
        let source = if self.display_name.trim().is_empty() {
            &self.username
        } else {
            &self.display_name
        };
        source
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(MAX_INITIALS)
            .collect()
    }

    /// `@username` handle
    pub fn handle(&self) -> String {
        format!("@{}", self.username)
    }

    pub fn has_bio(&self) -> bool {
        !self.bio.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initials_two_words() {
        let profile = Profile::new("demo", "Demo User");
        assert_eq!(profile.initials(), "DU");
    }

    #[test]
    fn test_initials_truncated_to_two() {
        let profile = Profile::new("jrr", "john ronald reuel");
        assert_eq!(profile.initials(), "JR");
    }

    #[test]
    fn test_initials_fall_back_to_username() {
        let profile = Profile::new("alice", "   ");
        assert_eq!(profile.initials(), "A");
    }

    #[test]
    fn test_handle() {
        assert_eq!(Profile::new("demo", "Demo").handle(), "@demo");
    }

    #[test]
    fn test_empty_style_skipped_in_json() {
        let json = serde_json::to_string(&Profile::new("demo", "Demo")).unwrap();
        assert!(!json.contains("style"));
        assert!(!json.contains("avatar_url"));
    }
}
