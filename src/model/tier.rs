use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Subscription level supplied by the session collaborator.
///
/// Variants are declared in rank order so the derived `Ord` is the tier order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Starter,
    Pro,
    Premium,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 4] = [
        SubscriptionTier::Free,
        SubscriptionTier::Starter,
        SubscriptionTier::Pro,
        SubscriptionTier::Premium,
    ];

    /// Case-insensitive lookup without fallback
    pub fn lookup(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Some(Self::Free),
            "starter" => Some(Self::Starter),
            "pro" => Some(Self::Pro),
            "premium" => Some(Self::Premium),
            _ => None,
        }
    }

    /// Parse an opaque tier string. Unknown values grant nothing.
    pub fn parse(value: &str) -> Self {
        Self::lookup(value).unwrap_or_else(|| {
            warn!(tier = %value, "Unknown subscription tier, treating as free");
            Self::Free
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Starter => "starter",
            Self::Pro => "pro",
            Self::Premium => "premium",
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
