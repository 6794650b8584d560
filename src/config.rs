//! Engine settings
//!
//! Stored as JSON under the platform config directory. Missing fields take
//! their defaults, and every load is followed by `validate_and_clamp`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::constants::{config, defaults, validation};
use crate::gate::{FeatureGate, FeatureKey};
use crate::logging;
use crate::model::SubscriptionTier;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Upper bound for a single video-metadata fetch or asset search
    #[serde(default = "default_collaborator_timeout_ms")]
    pub collaborator_timeout_ms: u64,

    /// Brand named in the footer attribution
    #[serde(default = "default_footer_brand")]
    pub footer_brand: String,

    /// Feature key -> minimum tier, replacing entries of the built-in table
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub feature_tiers: BTreeMap<String, String>,
}

fn default_log_level() -> String {
    defaults::LOG_LEVEL.to_string()
}

fn default_collaborator_timeout_ms() -> u64 {
    defaults::COLLABORATOR_TIMEOUT_MS
}

fn default_footer_brand() -> String {
    defaults::FOOTER_BRAND.to_string()
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            collaborator_timeout_ms: default_collaborator_timeout_ms(),
            footer_brand: default_footer_brand(),
            feature_tiers: BTreeMap::new(),
        }
    }
}

impl EngineSettings {
    pub fn path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(config::APP_DIR);
        path.push(config::FILENAME);
        path
    }

    /// Load settings from the default location, writing defaults if absent
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "Settings file not found, writing defaults");
            let settings = Self::default();
            settings.save_to(path)?;
            return Ok(settings);
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        let settings = Self::from_json_str(&contents)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))?;

        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Parse and validate settings held in memory
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let mut settings: Self = serde_json::from_str(contents).context("Invalid settings JSON")?;
        settings.validate_and_clamp();
        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, json).with_context(|| format!("Failed to write settings to {}", path.display()))?;
        info!(path = %path.display(), "Saved settings");
        Ok(())
    }

    /// Clamp values to safe ranges and drop entries that cannot be honored
    pub fn validate_and_clamp(&mut self) {
        use validation::*;

        if self.collaborator_timeout_ms < MIN_COLLABORATOR_TIMEOUT_MS {
            warn!(collaborator_timeout_ms = self.collaborator_timeout_ms, min = MIN_COLLABORATOR_TIMEOUT_MS, "collaborator_timeout_ms below minimum, clamping");
            self.collaborator_timeout_ms = MIN_COLLABORATOR_TIMEOUT_MS;
        } else if self.collaborator_timeout_ms > MAX_COLLABORATOR_TIMEOUT_MS {
            warn!(collaborator_timeout_ms = self.collaborator_timeout_ms, max = MAX_COLLABORATOR_TIMEOUT_MS, "collaborator_timeout_ms exceeds maximum, clamping");
            self.collaborator_timeout_ms = MAX_COLLABORATOR_TIMEOUT_MS;
        }

        if logging::lookup_level(&self.log_level).is_none() {
            warn!(log_level = %self.log_level, using = defaults::LOG_LEVEL, "Unknown log_level, using default");
            self.log_level = default_log_level();
        }

        if self.footer_brand.trim().is_empty() {
            warn!(using = defaults::FOOTER_BRAND, "footer_brand is empty, using default");
            self.footer_brand = default_footer_brand();
        }

        self.feature_tiers.retain(|feature, tier| {
            if FeatureKey::parse(feature).is_none() {
                warn!(feature = %feature, "Unknown feature key in feature_tiers, dropping");
                return false;
            }
            if SubscriptionTier::lookup(tier).is_none() {
                warn!(feature = %feature, tier = %tier, "Unknown tier in feature_tiers, dropping");
                return false;
            }
            true
        });
    }

    /// Tracing level: `LOG_LEVEL` when set, otherwise `log_level`
    pub fn trace_level(&self) -> tracing::Level {
        logging::level_from_env_or(&self.log_level)
    }

    pub fn collaborator_timeout(&self) -> Duration {
        Duration::from_millis(self.collaborator_timeout_ms)
    }

    /// Built-in gate table with this file's overrides applied
    pub fn feature_gate(&self) -> FeatureGate {
        let overrides = self
            .feature_tiers
            .iter()
            .filter_map(|(feature, tier)| Some((FeatureKey::parse(feature)?, SubscriptionTier::lookup(tier)?)));
        FeatureGate::default().with_overrides(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("linkbio-settings-{}-{}", name, std::process::id()))
            .join(config::FILENAME)
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let settings = EngineSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, EngineSettings::default());
        assert_eq!(settings.collaborator_timeout(), Duration::from_millis(5_000));
    }

    #[test]
    fn test_timeout_is_clamped() {
        let low = EngineSettings::from_json_str(r#"{"collaborator_timeout_ms": 5}"#).unwrap();
        assert_eq!(low.collaborator_timeout_ms, 100);
        let high = EngineSettings::from_json_str(r#"{"collaborator_timeout_ms": 900000}"#).unwrap();
        assert_eq!(high.collaborator_timeout_ms, 60_000);
    }

    #[test]
    fn test_unknown_log_level_restored() {
        let settings = EngineSettings::from_json_str(r#"{"log_level": "chatty"}"#).unwrap();
        assert_eq!(settings.log_level, "info");
        let kept = EngineSettings::from_json_str(r#"{"log_level": "debug"}"#).unwrap();
        assert_eq!(kept.log_level, "debug");
        assert_eq!(logging::resolve_level(None, &kept.log_level), tracing::Level::DEBUG);
    }

    #[test]
    fn test_blank_brand_restored() {
        let settings = EngineSettings::from_json_str(r#"{"footer_brand": "  "}"#).unwrap();
        assert_eq!(settings.footer_brand, "OpenUp");
    }

    #[test]
    fn test_unknown_feature_entries_dropped() {
        let settings = EngineSettings::from_json_str(
            r#"{"feature_tiers": {"white_label": "pro", "link_expiry": "gold", "utm_params": "Starter"}}"#,
        )
        .unwrap();
        assert_eq!(settings.feature_tiers.len(), 1);
        assert!(settings.feature_tiers.contains_key("utm_params"));
    }

    #[test]
    fn test_feature_gate_applies_overrides() {
        let settings = EngineSettings::from_json_str(r#"{"feature_tiers": {"utm_params": "starter"}}"#).unwrap();
        let gate = settings.feature_gate();
        assert!(gate.is_available(FeatureKey::UtmParams, SubscriptionTier::Starter));
        assert!(!gate.is_available(FeatureKey::LinkExpiry, SubscriptionTier::Starter));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(EngineSettings::from_json_str("{not json").is_err());
    }

    #[test]
    fn test_load_writes_defaults_then_round_trips() {
        let path = temp_path("load");
        let _ = fs::remove_file(&path);

        let created = EngineSettings::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created, EngineSettings::default());

        let mut edited = created;
        edited.footer_brand = "Acme".to_string();
        edited.save_to(&path).unwrap();
        assert_eq!(EngineSettings::load_from(&path).unwrap().footer_brand, "Acme");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
