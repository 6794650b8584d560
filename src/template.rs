//! Template registry
//!
//! Nine layout ids split across two catalogs. Every id maps to exactly one
//! renderer; unknown ids resolve to a catalog default.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::render::{classic, creator, LayoutRenderer, RenderFn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    /// Plain layouts
    Classic,
    /// Creator-style layouts with promoted content
    Creator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TemplateId {
    #[default]
    Standard,
    Grid,
    Cards,
    Masonry,
    Sidebar,
    BeastStyle,
    CreatorPro,
    Influencer,
    BrandHub,
}

impl TemplateId {
    pub const ALL: [TemplateId; 9] = [
        TemplateId::Standard,
        TemplateId::Grid,
        TemplateId::Cards,
        TemplateId::Masonry,
        TemplateId::Sidebar,
        TemplateId::BeastStyle,
        TemplateId::CreatorPro,
        TemplateId::Influencer,
        TemplateId::BrandHub,
    ];

    /// Free template shown in place of a gated selection
    pub const BASELINE: TemplateId = TemplateId::Standard;

    pub fn lookup(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "grid" => Some(Self::Grid),
            "cards" => Some(Self::Cards),
            "masonry" => Some(Self::Masonry),
            "sidebar" => Some(Self::Sidebar),
            "beast-style" => Some(Self::BeastStyle),
            "creator-pro" => Some(Self::CreatorPro),
            "influencer" => Some(Self::Influencer),
            "brand-hub" => Some(Self::BrandHub),
            _ => None,
        }
    }

    /// Parse an id; unknown ids resolve to the classic default
    pub fn parse(value: &str) -> Self {
        Self::parse_in(Catalog::Classic, value)
    }

    /// Parse an id; unknown ids resolve to the given catalog's default
    pub fn parse_in(catalog: Catalog, value: &str) -> Self {
        Self::lookup(value).unwrap_or_else(|| {
            let fallback = catalog.default_template();
            warn!(template = %value, catalog = ?catalog, fallback = %fallback, "Unknown template id, using catalog default");
            fallback
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Grid => "grid",
            Self::Cards => "cards",
            Self::Masonry => "masonry",
            Self::Sidebar => "sidebar",
            Self::BeastStyle => "beast-style",
            Self::CreatorPro => "creator-pro",
            Self::Influencer => "influencer",
            Self::BrandHub => "brand-hub",
        }
    }

    pub fn catalog(&self) -> Catalog {
        match self {
            Self::Standard | Self::Grid | Self::Cards | Self::Masonry | Self::Sidebar => Catalog::Classic,
            Self::BeastStyle | Self::CreatorPro | Self::Influencer | Self::BrandHub => Catalog::Creator,
        }
    }

    /// Premium templates require the `premium_template` feature
    pub fn is_premium(&self) -> bool {
        !matches!(self, Self::Standard | Self::Grid)
    }
}

impl Catalog {
    pub fn default_template(&self) -> TemplateId {
        match self {
            Catalog::Classic => TemplateId::Standard,
            Catalog::Creator => TemplateId::BeastStyle,
        }
    }

    pub fn templates(&self) -> impl Iterator<Item = TemplateId> + '_ {
        TemplateId::ALL.into_iter().filter(move |t| t.catalog() == *self)
    }
}

impl From<String> for TemplateId {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<TemplateId> for String {
    fn from(value: TemplateId) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Renderer registered for a template
pub fn renderer_for(template: TemplateId) -> LayoutRenderer {
    let render: RenderFn = match template {
        TemplateId::Standard => classic::standard,
        TemplateId::Grid => classic::grid,
        TemplateId::Cards => classic::cards,
        TemplateId::Masonry => classic::masonry,
        TemplateId::Sidebar => classic::sidebar,
        TemplateId::BeastStyle => creator::beast_style,
        TemplateId::CreatorPro => creator::creator_pro,
        TemplateId::Influencer => creator::influencer,
        TemplateId::BrandHub => creator::brand_hub,
    };
    LayoutRenderer::new(template, render)
}

/// Select a renderer by raw id; unknown ids get the classic default
pub fn select_layout(template_id: &str) -> LayoutRenderer {
    renderer_for(TemplateId::parse(template_id))
}

/// Select a renderer by raw id within a catalog
pub fn select_layout_in(catalog: Catalog, template_id: &str) -> LayoutRenderer {
    renderer_for(TemplateId::parse_in(catalog, template_id))
}
