//! Grouping engine — flat items to the Room → Category → Sub-Category tree.
//!
//! The tree is derived, never stored: callers recompute it from the flat
//! collections on every data change, so there is no second source of truth
//! to reconcile. Output is deterministic for identical inputs.
//!
//! Ordering rules:
//! - Rooms render in canonical vocabulary order; unknown room names after
//!   all known ones, alphabetically among themselves.
//! - Categories render in the fixed priority order; unknown categories
//!   after all known ones, in encounter order.
//! - Sub-categories and items keep arrival order (the server returns items
//!   reverse-chronological by creation).

use serde::Serialize;

use atelier_core::taxonomy::{category_rank, room_rank, CATEGORY_PRIORITY};
use atelier_core::{Item, Room};

use crate::filter::{RoomScope, SheetFilter};

/// The derived render tree for one sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedSheet {
    pub rooms: Vec<RoomGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomGroup {
    pub room: Room,
    pub categories: Vec<CategoryGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub sub_categories: Vec<SubCategoryGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubCategoryGroup {
    pub sub_category: String,
    pub items: Vec<Item>,
}

impl GroupedSheet {
    /// Total items across the tree.
    pub fn item_count(&self) -> usize {
        self.rooms
            .iter()
            .flat_map(|r| &r.categories)
            .flat_map(|c| &c.sub_categories)
            .map(|s| s.items.len())
            .sum()
    }

    /// Item ids in one (room, category, sub-category) section, render order.
    pub fn section_item_ids(&self, room_id: &str, category: &str, sub_category: &str) -> Vec<String> {
        self.rooms
            .iter()
            .filter(|r| r.room.id == room_id)
            .flat_map(|r| &r.categories)
            .filter(|c| c.category == category)
            .flat_map(|c| &c.sub_categories)
            .filter(|s| s.sub_category == sub_category)
            .flat_map(|s| &s.items)
            .map(|i| i.id.clone())
            .collect()
    }
}

/// Project `(rooms, items, filter)` into the grouped render tree.
///
/// `items` must already be restricted to the sheet's status set. A room
/// with zero matching items is emitted only when it is the explicit room
/// filter target; under [`RoomScope::All`] empty rooms are omitted.
pub fn group_sheet(rooms: &[Room], items: &[Item], filter: &SheetFilter) -> GroupedSheet {
    let filtered: Vec<&Item> = items.iter().filter(|i| filter.matches(i)).collect();

    let mut ordered_rooms: Vec<&Room> = rooms.iter().collect();
    ordered_rooms.sort_by(|a, b| compare_rooms(a, b));

    let mut out = Vec::new();
    for room in ordered_rooms {
        let room_items: Vec<&Item> = filtered
            .iter()
            .copied()
            .filter(|i| i.room_id == room.id)
            .collect();

        let is_filter_target = matches!(&filter.room, RoomScope::Only(id) if *id == room.id);
        if room_items.is_empty() && !is_filter_target {
            continue;
        }

        out.push(RoomGroup {
            room: room.clone(),
            categories: group_categories(&room_items),
        });
    }

    GroupedSheet { rooms: out }
}

/// Known rooms by vocabulary position, then unknown rooms alphabetically.
/// Ties (duplicate names) keep input order via the stable sort.
fn compare_rooms(a: &Room, b: &Room) -> std::cmp::Ordering {
    match (room_rank(&a.name), room_rank(&b.name)) {
        (Some(ra), Some(rb)) => ra.cmp(&rb),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    }
}

fn group_categories(items: &[&Item]) -> Vec<CategoryGroup> {
    // Bucket in encounter order first; the rank sort below is stable, so
    // unknown categories keep that encounter order relative to each other.
    let mut buckets: Vec<(String, Vec<&Item>)> = Vec::new();
    for &item in items {
        let category = item.effective_category();
        match buckets.iter_mut().find(|(name, _)| name == category) {
            Some((_, bucket)) => bucket.push(item),
            None => buckets.push((category.to_string(), vec![item])),
        }
    }

    buckets.sort_by_key(|(name, _)| category_rank(name).unwrap_or(CATEGORY_PRIORITY.len()));

    buckets
        .into_iter()
        .map(|(category, bucket)| CategoryGroup {
            category,
            sub_categories: group_sub_categories(&bucket),
        })
        .collect()
}

fn group_sub_categories(items: &[&Item]) -> Vec<SubCategoryGroup> {
    let mut buckets: Vec<(String, Vec<Item>)> = Vec::new();
    for &item in items {
        let sub = item.effective_sub_category();
        match buckets.iter_mut().find(|(name, _)| name == sub) {
            Some((_, bucket)) => bucket.push(item.clone()),
            None => buckets.push((sub.to_string(), vec![item.clone()])),
        }
    }

    buckets
        .into_iter()
        .map(|(sub_category, items)| SubCategoryGroup { sub_category, items })
        .collect()
}
