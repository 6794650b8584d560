//! Creator catalog layouts
//!
//! These layouts promote video, featured and donation links above the rest
//! and put profile statistics in the header.

use super::{
    assemble, avatar, bio, bucket, button, card, count_metric, handle, social_tile, standard_header, title,
    variant_node, Metric, Node, RenderTree, Zone, ZoneKind,
};
use crate::constants::{copy, layout};
use crate::model::{Link, LinkKind, Profile};
use crate::style::StyleTokens;
use crate::template::TemplateId;

/// Promoted cards, then a social grid, then the remaining links as buttons
pub fn beast_style(profile: &Profile, links: &[Link], tokens: &StyleTokens) -> RenderTree {
    let buckets = bucket(links);

    let promoted = buckets.promoted.iter().map(|link| variant_node(link, tokens)).collect();
    let social: Vec<Node> = buckets.social.iter().map(|link| social_tile(link, tokens)).collect();
    let social_nodes = if social.is_empty() {
        Vec::new()
    } else {
        vec![Node::Grid {
            columns: layout::GRID_COLUMNS,
            children: social,
        }]
    };
    let rest = buckets.other.iter().map(|link| button(link, tokens)).collect();

    assemble(
        TemplateId::BeastStyle,
        tokens,
        standard_header(profile, tokens),
        vec![
            Zone::new(ZoneKind::Promoted, promoted),
            Zone::new(ZoneKind::SocialGrid, social_nodes),
            Zone::new(ZoneKind::Links, rest),
        ],
    )
}

/// Header with a stat row; each link on a gradient card with its click count
pub fn creator_pro(profile: &Profile, links: &[Link], tokens: &StyleTokens) -> RenderTree {
    let total_clicks: u64 = links.iter().map(|link| link.clicks).sum();
    let mut header = standard_header(profile, tokens);
    header.push(Node::Stats {
        items: vec![
            Metric {
                value: links.len().to_string(),
                label: copy::LINKS_STAT_LABEL.to_string(),
            },
            Metric {
                value: total_clicks.to_string(),
                label: copy::CLICKS_STAT_LABEL.to_string(),
            },
        ],
    });

    let nodes = links
        .iter()
        .zip(layout::CREATOR_GRADIENTS.iter().cycle())
        .map(|(link, gradient)| {
            let mut tile = card(link, tokens);
            tile.background = gradient.to_string();
            tile.color = copy::ON_GRADIENT_TEXT.to_string();
            tile.metric = Some(Metric {
                value: link.clicks.to_string(),
                label: copy::CLICKS_METRIC_LABEL.to_string(),
            });
            Node::Card(tile)
        })
        .collect();

    assemble(TemplateId::CreatorPro, tokens, header, vec![Zone::new(ZoneKind::Links, nodes)])
}

/// Gradient hero, bio on its own card, links with view counts
pub fn influencer(profile: &Profile, links: &[Link], tokens: &StyleTokens) -> RenderTree {
    let mut header = vec![Node::Surface {
        background: layout::INFLUENCER_HERO.to_string(),
        children: vec![
            avatar(profile, &tokens.button_bg, &tokens.button_text),
            title(profile, copy::ON_GRADIENT_TEXT),
            handle(profile, copy::ON_GRADIENT_TEXT),
        ],
    }];
    if let Some(bio) = bio(profile, &tokens.text) {
        header.push(Node::Surface {
            background: tokens.background.clone(),
            children: vec![bio],
        });
    }

    let nodes = links
        .iter()
        .map(|link| {
            let mut tile = card(link, tokens);
            tile.metric = view_metric(link);
            Node::Card(tile)
        })
        .collect();

    assemble(TemplateId::Influencer, tokens, header, vec![Zone::new(ZoneKind::Links, nodes)])
}

/// Video links report their own view count; other links fall back to clicks
fn view_metric(link: &Link) -> Option<Metric> {
    match &link.kind {
        LinkKind::Video(meta) => match &meta.views {
            Some(views) => Some(Metric {
                value: views.clone(),
                label: copy::VIEWS_METRIC_LABEL.to_string(),
            }),
            None => count_metric(link.clicks, copy::VIEWS_METRIC_LABEL),
        },
        LinkKind::Standard
        | LinkKind::Social
        | LinkKind::Donation(_)
        | LinkKind::Featured(_)
        | LinkKind::Product(_) => count_metric(link.clicks, copy::VIEWS_METRIC_LABEL),
    }
}

/// Two-column grid of cards with click counts
pub fn brand_hub(profile: &Profile, links: &[Link], tokens: &StyleTokens) -> RenderTree {
    let tiles: Vec<Node> = links
        .iter()
        .map(|link| {
            let mut tile = card(link, tokens);
            tile.metric = Some(Metric {
                value: link.clicks.to_string(),
                label: copy::CLICKS_METRIC_LABEL.to_string(),
            });
            Node::Card(tile)
        })
        .collect();
    let nodes = if tiles.is_empty() {
        Vec::new()
    } else {
        vec![Node::Grid {
            columns: layout::GRID_COLUMNS,
            children: tiles,
        }]
    };

    assemble(
        TemplateId::BrandHub,
        tokens,
        standard_header(profile, tokens),
        vec![Zone::new(ZoneKind::Links, nodes)],
    )
}
