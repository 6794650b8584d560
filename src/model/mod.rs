//! Data model for a link-in-bio page
//!
//! - **profile**: creator identity and per-field style overrides
//! - **link**: link entities with variant-specific metadata
//! - **theme**: theme ids and the editable appearance configuration
//! - **tier**: ordered subscription tiers

pub mod link;
pub mod profile;
pub mod theme;
pub mod tier;

pub use link::{
    DonationMeta, FeaturedMeta, IconTag, Link, LinkId, LinkKind, LinkRecord, LinkSettings, ProductMeta, UtmParams,
    VariantTag, VideoMeta,
};
pub use profile::{Profile, ProfileStyle};
pub use theme::{ColorField, ColorScheme, Spacing, ThemeConfig, ThemeFlags, ThemeId, Typography};
pub use tier::SubscriptionTier;
