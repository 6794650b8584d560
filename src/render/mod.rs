//! Layout renderers
//!
//! A renderer is a pure function from (profile, ordered active links, style
//! tokens) to a [`RenderTree`]. Trees are made of zones emitted in a fixed
//! order: header, promoted, social grid, links, footer. A page with no
//! active link gets an empty-state zone in place of the link zones.

pub mod classic;
pub mod creator;

use serde::Serialize;
use std::fmt;

use crate::constants::{copy, defaults, layout};
use crate::model::{IconTag, Link, LinkId, LinkKind, Profile};
use crate::order;
use crate::style::StyleTokens;
use crate::template::TemplateId;

/// Signature shared by every layout
pub type RenderFn = fn(&Profile, &[Link], &StyleTokens) -> RenderTree;

/// A registered layout. Equality is by template id.
#[derive(Clone, Copy)]
pub struct LayoutRenderer {
    template: TemplateId,
    render: RenderFn,
}

impl LayoutRenderer {
    pub fn new(template: TemplateId, render: RenderFn) -> Self {
        Self { template, render }
    }

    pub fn template(&self) -> TemplateId {
        self.template
    }

    /// Render a page. Inactive links are dropped and the rest sorted by rank
    /// before the layout sees them.
    pub fn render(&self, profile: &Profile, links: &[Link], tokens: &StyleTokens) -> RenderTree {
        let visible = order::ordered_active(links);
        (self.render)(profile, &visible, tokens)
    }
}

impl PartialEq for LayoutRenderer {
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
    }
}

impl Eq for LayoutRenderer {}

impl fmt::Debug for LayoutRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutRenderer").field("template", &self.template).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderTree {
    pub template: TemplateId,
    pub tokens: StyleTokens,
    pub zones: Vec<Zone>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Header,
    Promoted,
    SocialGrid,
    Links,
    EmptyState,
    Footer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub kind: ZoneKind,
    pub nodes: Vec<Node>,
}

impl Zone {
    pub fn new(kind: ZoneKind, nodes: Vec<Node>) -> Self {
        Self { kind, nodes }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Avatar {
    pub image: Option<String>,
    pub initials: String,
    pub background: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub value: String,
    pub label: String,
}

/// Plain clickable link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkButton {
    pub link_id: LinkId,
    pub title: String,
    pub description: Option<String>,
    pub icon: IconTag,
    pub background: String,
    pub color: String,
}

/// Link shown as a card or tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkCard {
    pub link_id: LinkId,
    pub title: String,
    pub description: Option<String>,
    pub icon: IconTag,
    pub image: Option<String>,
    pub background: String,
    pub color: String,
    pub icon_background: String,
    pub metric: Option<Metric>,
    /// Fixed tile height for masonry layouts
    pub height: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoCard {
    pub link_id: LinkId,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub badge: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DonationCard {
    pub link_id: LinkId,
    pub title: String,
    pub description: Option<String>,
    pub raised: Option<String>,
    pub goal: Option<String>,
    pub organization: Option<String>,
    pub image: Option<String>,
    /// 0..=100 when both amounts are numeric
    pub progress_percent: Option<u8>,
    pub background: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedCard {
    pub link_id: LinkId,
    pub title: String,
    pub description: Option<String>,
    pub subtitle: Option<String>,
    pub counter: Option<Metric>,
    pub image: Option<String>,
    pub cta: Option<String>,
    pub color: String,
    pub counter_color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductCard {
    pub link_id: LinkId,
    pub title: String,
    pub description: Option<String>,
    pub price: Option<String>,
    pub badge: Option<String>,
    pub background: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SocialTile {
    pub link_id: LinkId,
    pub title: String,
    pub description: Option<String>,
    pub icon: IconTag,
    pub icon_background: String,
    pub icon_color: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    /// Colored container around other nodes (header card, hero, bio card)
    Surface { background: String, children: Vec<Node> },
    Avatar(Avatar),
    Title { text: String, verified: bool, color: String },
    Handle { text: String, color: String },
    Bio { text: String, color: String },
    Stats { items: Vec<Metric> },
    Actions { labels: Vec<String> },
    Grid { columns: u8, children: Vec<Node> },
    Button(LinkButton),
    Card(LinkCard),
    Video(VideoCard),
    Donation(DonationCard),
    Featured(FeaturedCard),
    Product(ProductCard),
    Social(SocialTile),
    EmptyState { message: String },
    Attribution { prefix: String, brand: String },
}

impl Node {
    /// Link carried by this node, for raising click events
    pub fn link_id(&self) -> Option<&str> {
        match self {
            Node::Button(n) => Some(&n.link_id),
            Node::Card(n) => Some(&n.link_id),
            Node::Video(n) => Some(&n.link_id),
            Node::Donation(n) => Some(&n.link_id),
            Node::Featured(n) => Some(&n.link_id),
            Node::Product(n) => Some(&n.link_id),
            Node::Social(n) => Some(&n.link_id),
            _ => None,
        }
    }

    fn collect_link_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(id) = self.link_id() {
            out.push(id);
        }
        if let Node::Surface { children, .. } | Node::Grid { children, .. } = self {
            for child in children {
                child.collect_link_ids(out);
            }
        }
    }

    fn rebrand(&mut self, new_brand: &str) {
        match self {
            Node::Attribution { brand, .. } => *brand = new_brand.to_string(),
            Node::Surface { children, .. } | Node::Grid { children, .. } => {
                for child in children {
                    child.rebrand(new_brand);
                }
            }
            _ => {}
        }
    }
}

impl RenderTree {
    /// Ids of every rendered link, in document order
    pub fn link_ids(&self) -> Vec<&str> {
        let mut out = Vec::new();
        for zone in &self.zones {
            for node in &zone.nodes {
                node.collect_link_ids(&mut out);
            }
        }
        out
    }

    pub fn zone_kinds(&self) -> Vec<ZoneKind> {
        self.zones.iter().map(|zone| zone.kind).collect()
    }

    pub fn zone(&self, kind: ZoneKind) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.kind == kind)
    }

    pub fn is_empty_state(&self) -> bool {
        self.zone(ZoneKind::EmptyState).is_some()
    }

    /// Replace the brand in the footer attribution
    pub fn with_brand(mut self, brand: &str) -> Self {
        for zone in &mut self.zones {
            for node in &mut zone.nodes {
                node.rebrand(brand);
            }
        }
        self
    }
}

/// Links split by where they land on a bucketing layout
pub(crate) struct Buckets<'a> {
    pub promoted: Vec<&'a Link>,
    pub social: Vec<&'a Link>,
    pub other: Vec<&'a Link>,
}

pub(crate) fn bucket(links: &[Link]) -> Buckets<'_> {
    let mut buckets = Buckets {
        promoted: Vec::new(),
        social: Vec::new(),
        other: Vec::new(),
    };
    for link in links {
        if link.is_promoted() {
            buckets.promoted.push(link);
        } else if link.is_social() {
            buckets.social.push(link);
        } else {
            buckets.other.push(link);
        }
    }
    buckets
}

/// Put the page together: header first, non-empty body zones in their fixed
/// order, the empty state when no body zone has content, footer last.
pub(crate) fn assemble(template: TemplateId, tokens: &StyleTokens, header: Vec<Node>, body: Vec<Zone>) -> RenderTree {
    const BODY_ORDER: [ZoneKind; 3] = [ZoneKind::Promoted, ZoneKind::SocialGrid, ZoneKind::Links];

    let mut zones = vec![Zone::new(ZoneKind::Header, header)];
    let mut body: Vec<Zone> = body.into_iter().filter(|zone| !zone.nodes.is_empty()).collect();
    body.sort_by_key(|zone| BODY_ORDER.iter().position(|kind| *kind == zone.kind));

    if body.is_empty() {
        zones.push(Zone::new(
            ZoneKind::EmptyState,
            vec![Node::EmptyState {
                message: copy::EMPTY_STATE.to_string(),
            }],
        ));
    } else {
        zones.extend(body);
    }
    zones.push(footer());

    RenderTree {
        template,
        tokens: tokens.clone(),
        zones,
    }
}

fn footer() -> Zone {
    Zone::new(
        ZoneKind::Footer,
        vec![Node::Attribution {
            prefix: copy::FOOTER_PREFIX.to_string(),
            brand: defaults::FOOTER_BRAND.to_string(),
        }],
    )
}

pub(crate) fn avatar(profile: &Profile, background: &str, color: &str) -> Node {
    Node::Avatar(Avatar {
        image: profile.avatar_url.clone().filter(|url| !url.trim().is_empty()),
        initials: profile.initials(),
        background: background.to_string(),
        color: color.to_string(),
    })
}

pub(crate) fn title(profile: &Profile, color: &str) -> Node {
    Node::Title {
        text: profile.display_name.clone(),
        verified: profile.verified,
        color: color.to_string(),
    }
}

pub(crate) fn handle(profile: &Profile, color: &str) -> Node {
    Node::Handle {
        text: profile.handle(),
        color: color.to_string(),
    }
}

pub(crate) fn bio(profile: &Profile, color: &str) -> Option<Node> {
    profile.has_bio().then(|| Node::Bio {
        text: profile.bio.clone(),
        color: color.to_string(),
    })
}

/// Avatar, name, handle and bio in the theme's colors
pub(crate) fn standard_header(profile: &Profile, tokens: &StyleTokens) -> Vec<Node> {
    let mut nodes = vec![
        avatar(profile, &tokens.button_bg, &tokens.button_text),
        title(profile, &tokens.text),
        handle(profile, &tokens.text),
    ];
    nodes.extend(bio(profile, &tokens.text));
    nodes
}

pub(crate) fn button(link: &Link, tokens: &StyleTokens) -> Node {
    Node::Button(LinkButton {
        link_id: link.id.clone(),
        title: link.title.clone(),
        description: link.description.clone(),
        icon: link.icon,
        background: tokens.button_bg.clone(),
        color: tokens.button_text.clone(),
    })
}

pub(crate) fn card(link: &Link, tokens: &StyleTokens) -> LinkCard {
    LinkCard {
        link_id: link.id.clone(),
        title: link.title.clone(),
        description: link.description.clone(),
        icon: link.icon,
        image: link.image().map(str::to_string),
        background: tokens.background.clone(),
        color: tokens.text.clone(),
        icon_background: tokens.button_bg.clone(),
        metric: None,
        height: None,
    }
}

pub(crate) fn social_tile(link: &Link, tokens: &StyleTokens) -> Node {
    Node::Social(SocialTile {
        link_id: link.id.clone(),
        title: link.title.clone(),
        description: link.description.clone(),
        icon: link.icon,
        icon_background: tokens.button_bg.clone(),
        icon_color: tokens.button_text.clone(),
        color: tokens.text.clone(),
    })
}

/// `"{n} {label}"`-style metric, omitted for zero counts
pub(crate) fn count_metric(count: u64, label: &str) -> Option<Metric> {
    (count > 0).then(|| Metric {
        value: count.to_string(),
        label: label.to_string(),
    })
}

/// Node for a link according to its variant; standard and social links
/// become buttons.
pub(crate) fn variant_node(link: &Link, tokens: &StyleTokens) -> Node {
    match &link.kind {
        LinkKind::Video(meta) => Node::Video(VideoCard {
            link_id: link.id.clone(),
            title: link.title.clone(),
            description: link.description.clone(),
            thumbnail: meta.thumbnail.clone(),
            duration: meta.duration.clone(),
            badge: meta
                .views
                .clone()
                .unwrap_or_else(|| copy::NEW_VIDEO_BADGE.to_string()),
            color: tokens.text.clone(),
        }),
        LinkKind::Donation(meta) => Node::Donation(DonationCard {
            link_id: link.id.clone(),
            title: link.title.clone(),
            description: link.description.clone(),
            raised: meta.raised.clone(),
            goal: meta.goal.clone(),
            organization: meta.organization.clone(),
            image: meta.image.clone(),
            progress_percent: progress_percent(meta.raised.as_deref(), meta.goal.as_deref()),
            background: layout::DONATION_GRADIENT.to_string(),
        }),
        LinkKind::Featured(meta) => Node::Featured(FeaturedCard {
            link_id: link.id.clone(),
            title: link.title.clone(),
            description: link.description.clone(),
            subtitle: meta.subtitle.clone(),
            counter: meta.counter.clone().map(|value| Metric {
                value,
                label: meta.counter_label.clone().unwrap_or_default(),
            }),
            image: meta.image.clone(),
            cta: meta.cta.clone(),
            color: tokens.text.clone(),
            counter_color: tokens.button_bg.clone(),
        }),
        LinkKind::Product(meta) => Node::Product(ProductCard {
            link_id: link.id.clone(),
            title: link.title.clone(),
            description: link.description.clone(),
            price: meta.price.clone(),
            badge: meta.badge.clone(),
            background: tokens.button_bg.clone(),
            color: tokens.button_text.clone(),
        }),
        LinkKind::Standard | LinkKind::Social => button(link, tokens),
    }
}

/// Share of `goal` reached by `raised`, when both read as amounts
pub(crate) fn progress_percent(raised: Option<&str>, goal: Option<&str>) -> Option<u8> {
    let raised = parse_amount(raised?)?;
    let goal = parse_amount(goal?)?;
    if goal <= 0.0 {
        return None;
    }
    Some((raised / goal * 100.0).clamp(0.0, 100.0).round() as u8)
}

/// Read "2,574,056", "40M$" or "12.5k" as a number. A k/M/B suffix counts
/// only right after the digits and not as the start of a word.
fn parse_amount(text: &str) -> Option<f64> {
    let start = text.find(|ch: char| ch.is_ascii_digit())?;
    let number = &text[start..];
    let end = number
        .find(|ch: char| !(ch.is_ascii_digit() || ch == '.' || ch == ','))
        .unwrap_or(number.len());
    let digits: String = number[..end].chars().filter(|ch| *ch != ',').collect();

    let mut after = number[end..].chars();
    let multiplier = match (after.next(), after.next()) {
        (Some(suffix), next) if !next.is_some_and(char::is_alphabetic) => match suffix {
            'k' | 'K' => 1e3,
            'm' | 'M' => 1e6,
            'b' | 'B' => 1e9,
            _ => 1.0,
        },
        _ => 1.0,
    };
    digits.parse::<f64>().ok().map(|value| value * multiplier)
}
