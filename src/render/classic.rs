//! Classic catalog layouts

use super::{
    assemble, avatar, bio, card, count_metric, handle, standard_header, title, variant_node, Node, RenderTree, Zone,
    ZoneKind,
};
use crate::constants::{copy, layout};
use crate::model::{Link, Profile};
use crate::style::StyleTokens;
use crate::template::TemplateId;

/// Grid zone, empty when there is nothing to lay out
fn grid_zone(kind: ZoneKind, columns: u8, children: Vec<Node>) -> Zone {
    if children.is_empty() {
        return Zone::new(kind, Vec::new());
    }
    Zone::new(kind, vec![Node::Grid { columns, children }])
}

/// Single column; typed links get their own cards, the rest are buttons
pub fn standard(profile: &Profile, links: &[Link], tokens: &StyleTokens) -> RenderTree {
    let nodes = links.iter().map(|link| variant_node(link, tokens)).collect();
    assemble(
        TemplateId::Standard,
        tokens,
        standard_header(profile, tokens),
        vec![Zone::new(ZoneKind::Links, nodes)],
    )
}

/// Two-column grid of tiles
pub fn grid(profile: &Profile, links: &[Link], tokens: &StyleTokens) -> RenderTree {
    let tiles = links.iter().map(|link| Node::Card(card(link, tokens))).collect();
    assemble(
        TemplateId::Grid,
        tokens,
        standard_header(profile, tokens),
        vec![grid_zone(ZoneKind::Links, layout::GRID_COLUMNS, tiles)],
    )
}

/// Header and links each on their own card; cards show clicks once a link has any
pub fn cards(profile: &Profile, links: &[Link], tokens: &StyleTokens) -> RenderTree {
    let mut inner = vec![
        avatar(profile, &tokens.button_bg, &tokens.button_text),
        title(profile, &tokens.text),
        handle(profile, &tokens.text),
    ];
    inner.extend(bio(profile, &tokens.text));
    let header = vec![Node::Surface {
        background: tokens.background.clone(),
        children: inner,
    }];

    let nodes = links
        .iter()
        .map(|link| {
            let mut tile = card(link, tokens);
            tile.metric = count_metric(link.clicks, copy::CLICKS_METRIC_LABEL);
            Node::Card(tile)
        })
        .collect();

    assemble(TemplateId::Cards, tokens, header, vec![Zone::new(ZoneKind::Links, nodes)])
}

/// Three-column grid with staggered tile heights
pub fn masonry(profile: &Profile, links: &[Link], tokens: &StyleTokens) -> RenderTree {
    let tiles = links
        .iter()
        .zip(layout::MASONRY_HEIGHTS.iter().cycle())
        .map(|(link, height)| {
            let mut tile = card(link, tokens);
            tile.height = Some(*height);
            Node::Card(tile)
        })
        .collect();
    assemble(
        TemplateId::Masonry,
        tokens,
        standard_header(profile, tokens),
        vec![grid_zone(ZoneKind::Links, layout::MASONRY_COLUMNS, tiles)],
    )
}

/// Profile column with follow/share actions next to a two-column card grid
pub fn sidebar(profile: &Profile, links: &[Link], tokens: &StyleTokens) -> RenderTree {
    let mut header = standard_header(profile, tokens);
    header.push(Node::Actions {
        labels: vec![copy::FOLLOW_ACTION.to_string(), copy::SHARE_ACTION.to_string()],
    });
    let tiles = links.iter().map(|link| Node::Card(card(link, tokens))).collect();
    assemble(
        TemplateId::Sidebar,
        tokens,
        header,
        vec![grid_zone(ZoneKind::Links, layout::GRID_COLUMNS, tiles)],
    )
}
