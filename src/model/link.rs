//! Link entity model
//!
//! A [`Link`] carries exactly one [`LinkKind`], and each kind owns its own
//! metadata block, so a link can never hold metadata for another variant.
//! The loose wire shape ([`LinkRecord`]) is normalized on the way in.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Stable link identifier
pub type LinkId = String;

/// Icon shown next to a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IconTag {
    Video,
    Email,
    Phone,
    Location,
    Website,
    Github,
    Linkedin,
    Twitter,
    Instagram,
    Youtube,
    Facebook,
    Tiktok,
    #[default]
    Link,
}

impl IconTag {
    /// Parse an icon tag; unknown tags fall back to the generic link icon
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "video" => Self::Video,
            "email" | "mail" => Self::Email,
            "phone" => Self::Phone,
            "location" => Self::Location,
            "website" | "globe" => Self::Website,
            "github" => Self::Github,
            "linkedin" => Self::Linkedin,
            "twitter" | "x" => Self::Twitter,
            "instagram" => Self::Instagram,
            "youtube" => Self::Youtube,
            "facebook" => Self::Facebook,
            "tiktok" => Self::Tiktok,
            _ => Self::Link,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Location => "location",
            Self::Website => "website",
            Self::Github => "github",
            Self::Linkedin => "linkedin",
            Self::Twitter => "twitter",
            Self::Instagram => "instagram",
            Self::Youtube => "youtube",
            Self::Facebook => "facebook",
            Self::Tiktok => "tiktok",
            Self::Link => "link",
        }
    }

    /// Whether a link carrying this icon belongs in the social grid
    pub fn is_social(&self) -> bool {
        matches!(
            self,
            Self::Twitter
                | Self::Instagram
                | Self::Youtube
                | Self::Linkedin
                | Self::Github
                | Self::Facebook
                | Self::Tiktok
        )
    }

    /// Guess the icon from a target URL's host
    pub fn infer_from_url(url: &str) -> Self {
        let lower = url.trim().to_ascii_lowercase();
        if lower.starts_with("mailto:") {
            return Self::Email;
        }
        if lower.starts_with("tel:") {
            return Self::Phone;
        }

        let host = host_of(&lower);
        let on = |domain: &str| host == domain || host.ends_with(&format!(".{domain}"));
        if on("youtube.com") || on("youtu.be") {
            Self::Youtube
        } else if on("instagram.com") {
            Self::Instagram
        } else if on("twitter.com") || on("x.com") {
            Self::Twitter
        } else if on("facebook.com") {
            Self::Facebook
        } else if on("tiktok.com") {
            Self::Tiktok
        } else if on("github.com") {
            Self::Github
        } else if on("linkedin.com") {
            Self::Linkedin
        } else {
            Self::Link
        }
    }
}

/// Host part of a lowercase URL, without scheme, credentials or port
fn host_of(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    host.split(':').next().unwrap_or_default()
}

impl From<String> for IconTag {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<IconTag> for String {
    fn from(value: IconTag) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for IconTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VideoMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DonationMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raised: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeaturedMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counter_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

/// Campaign tags appended to the target URL
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UtmParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign: Option<String>,
}

impl UtmParams {
    /// Non-empty tags as `(query key, value)` pairs
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("utm_source", self.source.as_deref()),
            ("utm_medium", self.medium.as_deref()),
            ("utm_campaign", self.campaign.as_deref()),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.map(str::trim).filter(|v| !v.is_empty()).map(|v| (key, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }
}

/// Per-link options that are unlocked by subscription tier.
///
/// Empty strings count as unset, so a cleared form field never reads as a
/// configured option.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LinkSettings {
    pub custom_slug: Option<String>,
    pub password: Option<String>,
    /// Expiry instant as entered by the creator (RFC 3339)
    pub expires_at: Option<String>,
    pub click_limit: Option<u64>,
    pub utm: Option<UtmParams>,
}

impl LinkSettings {
    /// Drop blank values
    pub fn normalized(self) -> Self {
        let text = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        Self {
            custom_slug: text(self.custom_slug),
            password: text(self.password),
            expires_at: text(self.expires_at),
            click_limit: self.click_limit.filter(|limit| *limit > 0),
            utm: self.utm.filter(|utm| !utm.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Link variant with its metadata
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LinkKind {
    #[default]
    Standard,
    Social,
    Video(VideoMeta),
    Donation(DonationMeta),
    Featured(FeaturedMeta),
    Product(ProductMeta),
}

/// Bare discriminant of a [`LinkKind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantTag {
    Standard,
    Social,
    Video,
    Donation,
    Featured,
    Product,
}

impl VariantTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Social => "social",
            Self::Video => "video",
            Self::Donation => "donation",
            Self::Featured => "featured",
            Self::Product => "product",
        }
    }
}

impl LinkKind {
    pub fn tag(&self) -> VariantTag {
        match self {
            Self::Standard => VariantTag::Standard,
            Self::Social => VariantTag::Social,
            Self::Video(_) => VariantTag::Video,
            Self::Donation(_) => VariantTag::Donation,
            Self::Featured(_) => VariantTag::Featured,
            Self::Product(_) => VariantTag::Product,
        }
    }
}

/// One entry of the link collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "LinkRecord", into = "LinkRecord")]
pub struct Link {
    pub id: LinkId,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub icon: IconTag,
    /// Dense 1-based display rank, maintained by the order module
    pub order_index: u32,
    pub active: bool,
    /// Display-only click counter
    pub clicks: u64,
    pub kind: LinkKind,
    pub settings: LinkSettings,
}

impl Link {
    /// Active standard link with its icon inferred from the URL.
    /// `order_index` is assigned when the link joins a collection.
    pub fn new(id: impl Into<LinkId>, title: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            icon: IconTag::infer_from_url(&url),
            url,
            order_index: 0,
            active: true,
            clicks: 0,
            kind: LinkKind::Standard,
            settings: LinkSettings::default(),
        }
    }

    pub fn with_kind(mut self, kind: LinkKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: IconTag) -> Self {
        self.icon = icon;
        self
    }

    pub fn with_order_index(mut self, order_index: u32) -> Self {
        self.order_index = order_index;
        self
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn with_clicks(mut self, clicks: u64) -> Self {
        self.clicks = clicks;
        self
    }

    pub fn with_settings(mut self, settings: LinkSettings) -> Self {
        self.settings = settings.normalized();
        self
    }

    pub fn is_video(&self) -> bool {
        matches!(self.kind, LinkKind::Video(_))
    }

    /// URL a click should open, with campaign tags appended
    pub fn target_url(&self) -> String {
        let pairs = self.settings.utm.as_ref().map(UtmParams::pairs).unwrap_or_default();
        if pairs.is_empty() {
            return self.url.clone();
        }
        let (base, fragment) = match self.url.split_once('#') {
            Some((base, fragment)) => (base, Some(fragment)),
            None => (self.url.as_str(), None),
        };
        let query: Vec<String> = pairs
            .iter()
            .map(|(key, value)| format!("{key}={}", value.replace(' ', "+")))
            .collect();
        let separator = if base.contains('?') { '&' } else { '?' };
        let mut url = format!("{base}{separator}{}", query.join("&"));
        if let Some(fragment) = fragment {
            url.push('#');
            url.push_str(fragment);
        }
        url
    }

    pub fn variant(&self) -> VariantTag {
        self.kind.tag()
    }

    /// Social variant, or an untyped link whose icon is a social network
    pub fn is_social(&self) -> bool {
        match self.kind {
            LinkKind::Social => true,
            LinkKind::Standard => self.icon.is_social(),
            _ => false,
        }
    }

    /// Featured, video and donation links are promoted above the rest
    pub fn is_promoted(&self) -> bool {
        matches!(
            self.kind,
            LinkKind::Featured(_) | LinkKind::Video(_) | LinkKind::Donation(_)
        )
    }

    /// Image carried by the variant metadata, if any
    pub fn image(&self) -> Option<&str> {
        match &self.kind {
            LinkKind::Video(meta) => meta.thumbnail.as_deref(),
            LinkKind::Donation(meta) => meta.image.as_deref(),
            LinkKind::Featured(meta) => meta.image.as_deref(),
            LinkKind::Standard | LinkKind::Social | LinkKind::Product(_) => None,
        }
    }

    /// Store an image into the variant metadata.
    /// Returns false when the variant has no image slot.
    pub fn set_image(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        match &mut self.kind {
            LinkKind::Video(meta) => meta.thumbnail = Some(url),
            LinkKind::Donation(meta) => meta.image = Some(url),
            LinkKind::Featured(meta) => meta.image = Some(url),
            LinkKind::Standard | LinkKind::Social | LinkKind::Product(_) => return false,
        }
        true
    }
}

/// Wire shape of a link as exchanged with persistence.
///
/// Every metadata block is optional here; [`Link::from`] keeps only the one
/// matching `type` and drops the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub order_index: u32,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub clicks: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_metadata: Option<VideoMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_metadata: Option<DonationMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_metadata: Option<FeaturedMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_metadata: Option<ProductMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub click_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utm_params: Option<UtmParams>,
}

fn default_active() -> bool {
    true
}

impl From<LinkRecord> for Link {
    fn from(record: LinkRecord) -> Self {
        let LinkRecord {
            id,
            title,
            description,
            url,
            icon,
            order_index,
            is_active,
            clicks,
            link_type,
            video_metadata,
            donation_metadata,
            featured_metadata,
            product_metadata,
            custom_slug,
            password,
            expires_at,
            click_limit,
            utm_params,
        } = record;

        let declared = link_type
            .as_deref()
            .map(|t| t.trim().to_ascii_lowercase())
            .unwrap_or_default();

        let (kind, kept) = match declared.as_str() {
            "video" => (LinkKind::Video(video_metadata.clone().unwrap_or_default()), "video"),
            "donation" => (LinkKind::Donation(donation_metadata.clone().unwrap_or_default()), "donation"),
            "featured" => (LinkKind::Featured(featured_metadata.clone().unwrap_or_default()), "featured"),
            "product" => (LinkKind::Product(product_metadata.clone().unwrap_or_default()), "product"),
            "social" => (LinkKind::Social, "social"),
            "" | "standard" | "link" => (LinkKind::Standard, "standard"),
            other => {
                debug!(link_id = %id, link_type = %other, "Unknown link type, treating as standard");
                (LinkKind::Standard, "standard")
            }
        };

        let stripped: Vec<&str> = [
            ("video", video_metadata.is_some()),
            ("donation", donation_metadata.is_some()),
            ("featured", featured_metadata.is_some()),
            ("product", product_metadata.is_some()),
        ]
        .into_iter()
        .filter(|(name, present)| *present && *name != kept)
        .map(|(name, _)| name)
        .collect();
        if !stripped.is_empty() {
            debug!(link_id = %id, kind = %kept, stripped = ?stripped, "Stripped metadata not matching link type");
        }

        let icon = match icon {
            Some(tag) if !tag.trim().is_empty() => IconTag::parse(&tag),
            _ => IconTag::infer_from_url(&url),
        };

        Link {
            id,
            title,
            description: description.filter(|d| !d.trim().is_empty()),
            url,
            icon,
            order_index,
            active: is_active,
            clicks,
            kind,
            settings: LinkSettings {
                custom_slug,
                password,
                expires_at,
                click_limit,
                utm: utm_params,
            }
            .normalized(),
        }
    }
}

impl From<Link> for LinkRecord {
    fn from(link: Link) -> Self {
        let mut record = LinkRecord {
            link_type: Some(link.kind.tag().as_str().to_string()),
            id: link.id,
            title: link.title,
            description: link.description,
            url: link.url,
            icon: Some(link.icon.as_str().to_string()),
            order_index: link.order_index,
            is_active: link.active,
            clicks: link.clicks,
            custom_slug: link.settings.custom_slug,
            password: link.settings.password,
            expires_at: link.settings.expires_at,
            click_limit: link.settings.click_limit,
            utm_params: link.settings.utm,
            ..LinkRecord::default()
        };
        match link.kind {
            LinkKind::Video(meta) => record.video_metadata = Some(meta),
            LinkKind::Donation(meta) => record.donation_metadata = Some(meta),
            LinkKind::Featured(meta) => record.featured_metadata = Some(meta),
            LinkKind::Product(meta) => record.product_metadata = Some(meta),
            LinkKind::Standard | LinkKind::Social => {}
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(link_type: Option<&str>) -> LinkRecord {
        LinkRecord {
            id: "a".to_string(),
            title: "A".to_string(),
            url: "https://example.com".to_string(),
            is_active: true,
            link_type: link_type.map(str::to_string),
            ..LinkRecord::default()
        }
    }

    #[test]
    fn test_record_with_mismatched_metadata_is_stripped() {
        let mut rec = record(Some("video"));
        rec.video_metadata = Some(VideoMeta {
            thumbnail: Some("thumb.jpg".to_string()),
            ..VideoMeta::default()
        });
        rec.donation_metadata = Some(DonationMeta::default());
        rec.product_metadata = Some(ProductMeta::default());

        let link = Link::from(rec);
        assert_eq!(link.variant(), VariantTag::Video);

        let back = LinkRecord::from(link);
        assert!(back.video_metadata.is_some());
        assert!(back.donation_metadata.is_none());
        assert!(back.product_metadata.is_none());
    }

    #[test]
    fn test_record_without_type_drops_all_metadata() {
        let mut rec = record(None);
        rec.featured_metadata = Some(FeaturedMeta::default());

        let link = Link::from(rec);
        assert_eq!(link.kind, LinkKind::Standard);
        assert!(LinkRecord::from(link).featured_metadata.is_none());
    }

    #[test]
    fn test_unknown_type_becomes_standard() {
        let link = Link::from(record(Some("hologram")));
        assert_eq!(link.kind, LinkKind::Standard);
    }

    #[test]
    fn test_typed_record_without_metadata_gets_empty_block() {
        let link = Link::from(record(Some("donation")));
        assert_eq!(link.kind, LinkKind::Donation(DonationMeta::default()));
    }

    #[test]
    fn test_link_json_uses_wire_shape() {
        let json = r#"{
            "id": "v1",
            "title": "Latest video",
            "url": "https://youtu.be/dQw4w9WgXcQ",
            "type": "video",
            "order_index": 2,
            "is_active": false,
            "video_metadata": { "thumbnail": "t.jpg", "duration": "12:34" },
            "product_metadata": { "price": "$5" }
        }"#;
        let link: Link = serde_json::from_str(json).unwrap();
        assert_eq!(link.icon, IconTag::Youtube);
        assert_eq!(link.order_index, 2);
        assert!(!link.active);
        match &link.kind {
            LinkKind::Video(meta) => assert_eq!(meta.duration.as_deref(), Some("12:34")),
            other => panic!("expected video, got {other:?}"),
        }

        let out = serde_json::to_value(&link).unwrap();
        assert_eq!(out["type"], "video");
        assert!(out.get("product_metadata").is_none());
    }

    #[test]
    fn test_blank_settings_read_as_unset() {
        let mut rec = record(Some("standard"));
        rec.custom_slug = Some("  ".to_string());
        rec.password = Some("hunter2".to_string());
        rec.click_limit = Some(0);
        rec.utm_params = Some(UtmParams {
            source: Some(String::new()),
            ..UtmParams::default()
        });

        let link = Link::from(rec);
        assert_eq!(link.settings.custom_slug, None);
        assert_eq!(link.settings.password.as_deref(), Some("hunter2"));
        assert_eq!(link.settings.click_limit, None);
        assert_eq!(link.settings.utm, None);

        let out = serde_json::to_value(&link).unwrap();
        assert_eq!(out["password"], "hunter2");
        assert!(out.get("custom_slug").is_none());
    }

    #[test]
    fn test_target_url_carries_utm_tags() {
        let plain = Link::new("a", "A", "https://example.com/page");
        assert_eq!(plain.target_url(), "https://example.com/page");

        let tagged = Link::new("b", "B", "https://example.com/page?ref=bio#top").with_settings(LinkSettings {
            utm: Some(UtmParams {
                source: Some("bio".to_string()),
                medium: None,
                campaign: Some("spring sale".to_string()),
            }),
            ..LinkSettings::default()
        });
        assert_eq!(
            tagged.target_url(),
            "https://example.com/page?ref=bio&utm_source=bio&utm_campaign=spring+sale#top"
        );
    }

    #[test]
    fn test_icon_unknown_falls_back_to_link() {
        assert_eq!(IconTag::parse("myspace"), IconTag::Link);
        assert_eq!(IconTag::from("GitHub".to_string()), IconTag::Github);
    }

    #[test]
    fn test_icon_inferred_from_url() {
        assert_eq!(IconTag::infer_from_url("https://www.instagram.com/demo"), IconTag::Instagram);
        assert_eq!(IconTag::infer_from_url("https://x.com/demo"), IconTag::Twitter);
        assert_eq!(IconTag::infer_from_url("https://www.tiktok.com/@demo"), IconTag::Tiktok);
        assert_eq!(IconTag::infer_from_url("mailto:me@example.com"), IconTag::Email);
        assert_eq!(IconTag::infer_from_url("https://example.com"), IconTag::Link);
        assert_eq!(IconTag::infer_from_url("https://dropbox.com/s/file"), IconTag::Link);
        assert_eq!(IconTag::infer_from_url("youtu.be/dQw4w9WgXcQ"), IconTag::Youtube);
    }

    #[test]
    fn test_is_social_for_standard_with_social_icon() {
        let link = Link::new("g", "GitHub", "https://github.com/demo");
        assert!(link.is_social());

        let typed = Link::new("p", "Shop", "https://github.com/demo")
            .with_kind(LinkKind::Product(ProductMeta::default()));
        assert!(!typed.is_social());
    }

    #[test]
    fn test_set_image_only_on_variants_with_slot() {
        let mut featured = Link::new("f", "F", "https://example.com")
            .with_kind(LinkKind::Featured(FeaturedMeta::default()));
        assert!(featured.set_image("cover.png"));
        assert_eq!(featured.image(), Some("cover.png"));

        let mut plain = Link::new("s", "S", "https://example.com");
        assert!(!plain.set_image("cover.png"));
        assert_eq!(plain.image(), None);
    }
}
