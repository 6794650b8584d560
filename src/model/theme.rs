use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::constants::defaults;

/// Named visual theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ThemeId {
    /// The user-customizable theme
    #[default]
    Minimal,
    Dark,
    Gradient,
    Neon,
    Glass,
    Cyber,
    Retro,
}

impl ThemeId {
    pub const ALL: [ThemeId; 7] = [
        ThemeId::Minimal,
        ThemeId::Dark,
        ThemeId::Gradient,
        ThemeId::Neon,
        ThemeId::Glass,
        ThemeId::Cyber,
        ThemeId::Retro,
    ];

    /// Parse a theme id; unknown ids fall back to minimal
    pub fn parse(value: &str) -> Self {
        Self::lookup(value).unwrap_or_else(|| {
            warn!(theme = %value, "Unknown theme id, falling back to minimal");
            Self::Minimal
        })
    }

    /// Exact lookup without fallback
    pub fn lookup(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "minimal" | "custom" => Some(Self::Minimal),
            "dark" => Some(Self::Dark),
            "gradient" => Some(Self::Gradient),
            "neon" => Some(Self::Neon),
            "glass" => Some(Self::Glass),
            "cyber" => Some(Self::Cyber),
            "retro" => Some(Self::Retro),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Dark => "dark",
            Self::Gradient => "gradient",
            Self::Neon => "neon",
            Self::Glass => "glass",
            Self::Cyber => "cyber",
            Self::Retro => "retro",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Minimal => "Minimal",
            Self::Dark => "Dark Mode",
            Self::Gradient => "Gradient",
            Self::Neon => "Neon",
            Self::Glass => "Glassmorphism",
            Self::Cyber => "Cyberpunk",
            Self::Retro => "Retro Wave",
        }
    }

    /// Only this theme accepts custom color overrides
    pub fn is_customizable(&self) -> bool {
        matches!(self, Self::Minimal)
    }

    /// Premium themes require the `premium_theme` feature
    pub fn is_premium(&self) -> bool {
        !matches!(self, Self::Minimal | Self::Dark)
    }
}

impl From<String> for ThemeId {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ThemeId> for String {
    fn from(value: ThemeId) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Editable color scheme. For the minimal theme these are the custom colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    pub accent: String,
    pub button_bg: String,
    pub button_text: String,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#000000".to_string(),
            accent: "#3399ff".to_string(),
            button_bg: "#3399ff".to_string(),
            button_text: "#ffffff".to_string(),
        }
    }
}

/// Field of a [`ColorScheme`], used by color edits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorField {
    Background,
    Text,
    Accent,
    ButtonBg,
    ButtonText,
}

impl ColorScheme {
    pub fn set(&mut self, field: ColorField, value: impl Into<String>) {
        let value = value.into();
        match field {
            ColorField::Background => self.background = value,
            ColorField::Text => self.text = value,
            ColorField::Accent => self.accent = value,
            ColorField::ButtonBg => self.button_bg = value,
            ColorField::ButtonText => self.button_text = value,
        }
    }

    pub fn get(&self, field: ColorField) -> &str {
        match field {
            ColorField::Background => &self.background,
            ColorField::Text => &self.text,
            ColorField::Accent => &self.accent,
            ColorField::ButtonBg => &self.button_bg,
            ColorField::ButtonText => &self.button_text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: String,
    pub font_size: u16,
    pub line_height: f32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: defaults::FONT_FAMILY.to_string(),
            font_size: defaults::FONT_SIZE,
            line_height: defaults::LINE_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    pub card_spacing: u16,
    pub border_radius: u16,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            card_spacing: defaults::CARD_SPACING,
            border_radius: defaults::BORDER_RADIUS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeFlags {
    pub animations: bool,
    pub gradient: bool,
}

impl Default for ThemeFlags {
    fn default() -> Self {
        Self {
            animations: true,
            gradient: false,
        }
    }
}

/// Full appearance configuration edited by the creator.
/// `Default` is the baseline restored by a reset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(rename = "theme")]
    pub theme_id: ThemeId,
    #[serde(default)]
    pub color_scheme: ColorScheme,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default)]
    pub spacing: Spacing,
    #[serde(default)]
    pub flags: ThemeFlags,
}
