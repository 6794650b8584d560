//! Link ordering
//!
//! Every function here takes the collection in display order and returns a
//! new collection whose `order_index` values are exactly `1..=N` matching
//! array position. Inputs are never mutated.

use tracing::debug;

use crate::model::Link;

/// Move `dragged_id` to the position currently held by `target_id`.
///
/// Returns the collection unchanged when the ids are equal or either is
/// missing, so a cancelled drag is a no-op.
pub fn reorder(links: &[Link], dragged_id: &str, target_id: &str) -> Vec<Link> {
    try_reorder(links, dragged_id, target_id).unwrap_or_else(|| links.to_vec())
}

/// Like [`reorder`], but `None` on a no-op
pub fn try_reorder(links: &[Link], dragged_id: &str, target_id: &str) -> Option<Vec<Link>> {
    if dragged_id == target_id {
        debug!(link_id = %dragged_id, "Reorder onto itself, ignoring");
        return None;
    }
    let Some(from) = position_of(links, dragged_id) else {
        debug!(dragged = %dragged_id, "Reorder source not found, ignoring");
        return None;
    };
    let Some(to) = position_of(links, target_id) else {
        debug!(target = %target_id, "Reorder target not found, ignoring");
        return None;
    };

    let mut next = links.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Some(reindex(next))
}

/// Move a link to a 1-based position, clamped to the collection bounds.
/// Used for keyboard reordering. `None` when the id is missing or the link
/// is already there.
pub fn move_to(links: &[Link], id: &str, position: usize) -> Option<Vec<Link>> {
    let from = position_of(links, id)?;
    let to = position.clamp(1, links.len()) - 1;
    if from == to {
        return None;
    }
    let mut next = links.to_vec();
    let moved = next.remove(from);
    next.insert(to, moved);
    Some(reindex(next))
}

/// Add a link at the end with the next unused index
pub fn append(links: &[Link], link: Link) -> Vec<Link> {
    let mut next = links.to_vec();
    next.push(link);
    reindex(next)
}

/// Remove a link and compact the indices behind it.
/// `None` when the id is missing.
pub fn remove(links: &[Link], id: &str) -> Option<Vec<Link>> {
    let index = position_of(links, id)?;
    let mut next = links.to_vec();
    next.remove(index);
    Some(reindex(next))
}

/// Edit one link in place. The closure cannot change the link's id or rank.
pub fn update<F>(links: &[Link], id: &str, edit: F) -> Option<Vec<Link>>
where
    F: FnOnce(&mut Link),
{
    let index = position_of(links, id)?;
    let mut next = links.to_vec();
    let link = &mut next[index];
    let (id, order_index) = (link.id.clone(), link.order_index);
    edit(link);
    link.id = id;
    link.order_index = order_index;
    Some(next)
}

/// Flip a link's active flag. Inactive links keep their rank.
pub fn toggle_active(links: &[Link], id: &str) -> Option<Vec<Link>> {
    update(links, id, |link| link.active = !link.active)
}

/// Rebuild a dense ranking from arbitrary input, e.g. a loaded snapshot.
/// Sorts by existing index (stable on ties) and renumbers from 1.
pub fn normalize(links: &[Link]) -> Vec<Link> {
    let mut next = links.to_vec();
    next.sort_by_key(|link| link.order_index);
    reindex(next)
}

/// Whether `order_index` values are exactly `1..=N` in array order
pub fn is_dense(links: &[Link]) -> bool {
    links
        .iter()
        .enumerate()
        .all(|(position, link)| link.order_index as usize == position + 1)
}

/// Active links sorted by ascending rank; what the renderers consume
pub fn ordered_active(links: &[Link]) -> Vec<Link> {
    let mut active: Vec<Link> = links.iter().filter(|link| link.active).cloned().collect();
    active.sort_by_key(|link| link.order_index);
    active
}

fn position_of(links: &[Link], id: &str) -> Option<usize> {
    links.iter().position(|link| link.id == id)
}

fn reindex(mut links: Vec<Link>) -> Vec<Link> {
    for (position, link) in links.iter_mut().enumerate() {
        link.order_index = position as u32 + 1;
    }
    links
}
