//! Tier-based feature gating
//!
//! A single table maps each feature to the lowest tier that unlocks it.
//! Features missing from the table are denied for every tier.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

use crate::constants::limits;
use crate::model::{Link, LinkSettings, SubscriptionTier, ThemeId};
use crate::template::TemplateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureKey {
    CustomSlug,
    Password,
    LinkExpiry,
    UtmParams,
    ClickLimit,
    PremiumTheme,
    PremiumTemplate,
    /// More than one video link on the page
    MultipleVideos,
}

impl FeatureKey {
    pub const ALL: [FeatureKey; 8] = [
        FeatureKey::CustomSlug,
        FeatureKey::Password,
        FeatureKey::LinkExpiry,
        FeatureKey::UtmParams,
        FeatureKey::ClickLimit,
        FeatureKey::PremiumTheme,
        FeatureKey::PremiumTemplate,
        FeatureKey::MultipleVideos,
    ];

    /// Exact lookup; `None` for unknown keys
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "custom_slug" => Some(Self::CustomSlug),
            "password" => Some(Self::Password),
            "link_expiry" => Some(Self::LinkExpiry),
            "utm_params" => Some(Self::UtmParams),
            "click_limit" => Some(Self::ClickLimit),
            "premium_theme" => Some(Self::PremiumTheme),
            "premium_template" => Some(Self::PremiumTemplate),
            "multiple_videos" => Some(Self::MultipleVideos),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CustomSlug => "custom_slug",
            Self::Password => "password",
            Self::LinkExpiry => "link_expiry",
            Self::UtmParams => "utm_params",
            Self::ClickLimit => "click_limit",
            Self::PremiumTheme => "premium_theme",
            Self::PremiumTemplate => "premium_template",
            Self::MultipleVideos => "multiple_videos",
        }
    }
}

impl fmt::Display for FeatureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Built-in minimum tiers
pub const DEFAULT_TABLE: [(FeatureKey, SubscriptionTier); 8] = [
    (FeatureKey::CustomSlug, SubscriptionTier::Starter),
    (FeatureKey::Password, SubscriptionTier::Starter),
    (FeatureKey::LinkExpiry, SubscriptionTier::Pro),
    (FeatureKey::UtmParams, SubscriptionTier::Pro),
    (FeatureKey::ClickLimit, SubscriptionTier::Pro),
    (FeatureKey::PremiumTheme, SubscriptionTier::Pro),
    (FeatureKey::PremiumTemplate, SubscriptionTier::Pro),
    (FeatureKey::MultipleVideos, SubscriptionTier::Pro),
];

/// Upgrade prompt attached to a denial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upsell {
    pub feature: FeatureKey,
    /// `None` when no tier unlocks the feature
    pub required_tier: Option<SubscriptionTier>,
}

impl Upsell {
    pub fn message(&self) -> String {
        match self.required_tier {
            Some(tier) => format!("{} requires the {} plan", self.feature, tier),
            None => format!("{} is not available on any plan", self.feature),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied(Upsell),
}

impl Access {
    pub fn is_granted(&self) -> bool {
        matches!(self, Access::Granted)
    }

    pub fn upsell(&self) -> Option<&Upsell> {
        match self {
            Access::Granted => None,
            Access::Denied(upsell) => Some(upsell),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureGate {
    table: BTreeMap<FeatureKey, SubscriptionTier>,
}

impl Default for FeatureGate {
    fn default() -> Self {
        Self::with_table(DEFAULT_TABLE)
    }
}

impl FeatureGate {
    pub fn with_table(entries: impl IntoIterator<Item = (FeatureKey, SubscriptionTier)>) -> Self {
        Self {
            table: entries.into_iter().collect(),
        }
    }

    /// Replace or add table entries
    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = (FeatureKey, SubscriptionTier)>) -> Self {
        self.table.extend(overrides);
        self
    }

    pub fn required_tier(&self, feature: FeatureKey) -> Option<SubscriptionTier> {
        self.table.get(&feature).copied()
    }

    /// Monotonic in tier: a feature open at one tier is open at every higher tier
    pub fn is_available(&self, feature: FeatureKey, tier: SubscriptionTier) -> bool {
        self.required_tier(feature).is_some_and(|required| tier >= required)
    }

    /// String-keyed check for callers holding raw keys. Unknown keys are denied.
    pub fn is_available_str(&self, feature: &str, tier: SubscriptionTier) -> bool {
        match FeatureKey::parse(feature) {
            Some(key) => self.is_available(key, tier),
            None => {
                debug!(feature = %feature, "Unknown feature key, denying");
                false
            }
        }
    }

    pub fn check(&self, feature: FeatureKey, tier: SubscriptionTier) -> Access {
        if self.is_available(feature, tier) {
            Access::Granted
        } else {
            info!(feature = %feature, tier = %tier, "Feature gated for tier");
            Access::Denied(Upsell {
                feature,
                required_tier: self.required_tier(feature),
            })
        }
    }

    pub fn check_theme(&self, theme: ThemeId, tier: SubscriptionTier) -> Access {
        if theme.is_premium() {
            self.check(FeatureKey::PremiumTheme, tier)
        } else {
            Access::Granted
        }
    }

    pub fn check_template(&self, template: TemplateId, tier: SubscriptionTier) -> Access {
        if template.is_premium() {
            self.check(FeatureKey::PremiumTemplate, tier)
        } else {
            Access::Granted
        }
    }

    /// Check the gated options a link edit sets. Options equal to `previous`
    /// and options being cleared always pass.
    pub fn check_link_settings(
        &self,
        previous: Option<&LinkSettings>,
        next: &LinkSettings,
        tier: SubscriptionTier,
    ) -> Access {
        for feature in LINK_SETTING_FEATURES {
            let unchanged = previous.is_some_and(|previous| same_setting(previous, next, feature));
            if !is_set(next, feature) || unchanged {
                continue;
            }
            if let denied @ Access::Denied(_) = self.check(feature, tier) {
                return denied;
            }
        }
        Access::Granted
    }

    /// Check that `link` may join `links` as a video. Replacing a link that is
    /// already a video never counts against the limit.
    pub fn check_video_slot(&self, links: &[Link], link: &Link, tier: SubscriptionTier) -> Access {
        if !link.is_video() {
            return Access::Granted;
        }
        let others = links
            .iter()
            .filter(|existing| existing.is_video() && existing.id != link.id)
            .count();
        if others < limits::VIDEOS_WITHOUT_MULTIPLE {
            return Access::Granted;
        }
        debug!(link_id = %link.id, videos = others, "Video limit reached");
        self.check(FeatureKey::MultipleVideos, tier)
    }

    /// Options actually honored: any the tier no longer allows are cleared
    pub fn effective_link_settings(&self, settings: &LinkSettings, tier: SubscriptionTier) -> LinkSettings {
        let mut effective = settings.clone();
        for feature in LINK_SETTING_FEATURES {
            if is_set(settings, feature) && !self.is_available(feature, tier) {
                info!(feature = %feature, tier = %tier, "Masking gated link option");
                clear_setting(&mut effective, feature);
            }
        }
        effective
    }

    /// Theme actually shown: a selection the tier no longer allows is masked
    pub fn effective_theme(&self, theme: ThemeId, tier: SubscriptionTier) -> ThemeId {
        if self.check_theme(theme, tier).is_granted() {
            theme
        } else {
            info!(theme = %theme, tier = %tier, "Masking gated theme with minimal");
            ThemeId::Minimal
        }
    }

    /// Template actually shown: a gated selection falls back to the free baseline
    pub fn effective_template(&self, template: TemplateId, tier: SubscriptionTier) -> TemplateId {
        if self.check_template(template, tier).is_granted() {
            template
        } else {
            info!(template = %template, tier = %tier, "Masking gated template with standard");
            TemplateId::BASELINE
        }
    }
}

/// Features stored on individual links
const LINK_SETTING_FEATURES: [FeatureKey; 5] = [
    FeatureKey::CustomSlug,
    FeatureKey::Password,
    FeatureKey::LinkExpiry,
    FeatureKey::UtmParams,
    FeatureKey::ClickLimit,
];

fn is_set(settings: &LinkSettings, feature: FeatureKey) -> bool {
    match feature {
        FeatureKey::CustomSlug => settings.custom_slug.is_some(),
        FeatureKey::Password => settings.password.is_some(),
        FeatureKey::LinkExpiry => settings.expires_at.is_some(),
        FeatureKey::ClickLimit => settings.click_limit.is_some(),
        FeatureKey::UtmParams => settings.utm.as_ref().is_some_and(|utm| !utm.is_empty()),
        FeatureKey::PremiumTheme | FeatureKey::PremiumTemplate | FeatureKey::MultipleVideos => false,
    }
}

fn same_setting(a: &LinkSettings, b: &LinkSettings, feature: FeatureKey) -> bool {
    match feature {
        FeatureKey::CustomSlug => a.custom_slug == b.custom_slug,
        FeatureKey::Password => a.password == b.password,
        FeatureKey::LinkExpiry => a.expires_at == b.expires_at,
        FeatureKey::ClickLimit => a.click_limit == b.click_limit,
        FeatureKey::UtmParams => a.utm == b.utm,
        FeatureKey::PremiumTheme | FeatureKey::PremiumTemplate | FeatureKey::MultipleVideos => true,
    }
}

fn clear_setting(settings: &mut LinkSettings, feature: FeatureKey) {
    match feature {
        FeatureKey::CustomSlug => settings.custom_slug = None,
        FeatureKey::Password => settings.password = None,
        FeatureKey::LinkExpiry => settings.expires_at = None,
        FeatureKey::ClickLimit => settings.click_limit = None,
        FeatureKey::UtmParams => settings.utm = None,
        FeatureKey::PremiumTheme | FeatureKey::PremiumTemplate | FeatureKey::MultipleVideos => {}
    }
}
