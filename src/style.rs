//! Theme resolution
//!
//! Turns a theme id plus optional custom colors into concrete
//! [`StyleTokens`]. Named presets are fixed; only the customizable theme
//! lets overrides through, field by field.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{ColorScheme, ProfileStyle, ThemeId};

/// Resolved colors consumed by the layout renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleTokens {
    pub background: String,
    pub text: String,
    pub accent: String,
    pub button_bg: String,
    pub button_text: String,
}

/// Partial token set; `None` or blank fields keep the preset value
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_bg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
}

impl CustomOverrides {
    /// Layer the profile's own colors on top
    pub fn with_profile(mut self, style: &ProfileStyle) -> Self {
        fn take(slot: &mut Option<String>, value: &Option<String>) {
            if let Some(value) = value {
                *slot = Some(value.clone());
            }
        }
        take(&mut self.background, &style.background_color);
        take(&mut self.text, &style.text_color);
        take(&mut self.button_bg, &style.button_color);
        take(&mut self.button_text, &style.button_text_color);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.background.is_none()
            && self.text.is_none()
            && self.accent.is_none()
            && self.button_bg.is_none()
            && self.button_text.is_none()
    }
}

impl From<&ColorScheme> for CustomOverrides {
    fn from(scheme: &ColorScheme) -> Self {
        Self {
            background: Some(scheme.background.clone()),
            text: Some(scheme.text.clone()),
            accent: Some(scheme.accent.clone()),
            button_bg: Some(scheme.button_bg.clone()),
            button_text: Some(scheme.button_text.clone()),
        }
    }
}

impl StyleTokens {
    fn new(background: &str, text: &str, accent: &str, button_bg: &str, button_text: &str) -> Self {
        Self {
            background: background.to_string(),
            text: text.to_string(),
            accent: accent.to_string(),
            button_bg: button_bg.to_string(),
            button_text: button_text.to_string(),
        }
    }

    /// Fixed preset for a theme
    pub fn preset(theme: ThemeId) -> Self {
        match theme {
            ThemeId::Minimal => Self::new("#ffffff", "#000000", "#3399ff", "#3399ff", "#ffffff"),
            ThemeId::Dark => Self::new("#0f0f23", "#ffffff", "#3399ff", "#3399ff", "#ffffff"),
            ThemeId::Gradient => Self::new(
                "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
                "#ffffff",
                "#ffffff",
                "rgba(255, 255, 255, 0.2)",
                "#ffffff",
            ),
            ThemeId::Neon => Self::new("#000000", "#00ff88", "#ff0080", "#ff0080", "#ffffff"),
            ThemeId::Glass => Self::new(
                "linear-gradient(135deg, rgba(255, 255, 255, 0.1), rgba(255, 255, 255, 0))",
                "#ffffff",
                "#3399ff",
                "rgba(255, 255, 255, 0.25)",
                "#ffffff",
            ),
            ThemeId::Cyber => Self::new(
                "linear-gradient(135deg, #0c0c0c 0%, #1a0033 50%, #000066 100%)",
                "#00ffff",
                "#ff00ff",
                "#ff00ff",
                "#ffffff",
            ),
            ThemeId::Retro => Self::new(
                "linear-gradient(135deg, #ff006e 0%, #8338ec 50%, #3a86ff 100%)",
                "#ffffff",
                "#ffbe0b",
                "#ffbe0b",
                "#1a1a1a",
            ),
        }
    }

    fn apply(&mut self, overrides: &CustomOverrides) {
        fn merge(slot: &mut String, value: &Option<String>) {
            if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
                *slot = value.to_string();
            }
        }
        merge(&mut self.background, &overrides.background);
        merge(&mut self.text, &overrides.text);
        merge(&mut self.accent, &overrides.accent);
        merge(&mut self.button_bg, &overrides.button_bg);
        merge(&mut self.button_text, &overrides.button_text);
    }
}

/// Resolve a theme to concrete tokens.
///
/// Overrides are applied only for the customizable theme and ignored for
/// every named preset.
pub fn resolve(theme: ThemeId, overrides: Option<&CustomOverrides>) -> StyleTokens {
    let mut tokens = StyleTokens::preset(theme);
    match overrides {
        Some(overrides) if theme.is_customizable() => tokens.apply(overrides),
        Some(overrides) if !overrides.is_empty() => {
            debug!(theme = %theme, "Ignoring custom colors for preset theme");
        }
        _ => {}
    }
    tokens
}

/// Resolve from a raw theme id string; unknown ids use the minimal preset
pub fn resolve_named(theme: &str, overrides: Option<&CustomOverrides>) -> StyleTokens {
    let id = ThemeId::lookup(theme).unwrap_or_else(|| {
        warn!(theme = %theme, "Unknown theme, resolving minimal defaults");
        ThemeId::Minimal
    });
    resolve(id, overrides)
}
