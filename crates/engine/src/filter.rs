//! Sheet filtering — the predicate applied before grouping.
//!
//! All criteria are ANDed. Text search is a case-insensitive substring
//! match against item name and vendor SKU; room and category are exact
//! scopes. The filter never reorders anything.

use atelier_core::Item;

/// Room criterion: everything, or one room by id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RoomScope {
    #[default]
    All,
    Only(String),
}

/// Category criterion: everything, or one category by its effective name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryScope {
    #[default]
    All,
    Only(String),
}

/// Combined filter for one sheet view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetFilter {
    /// Free-text search; empty string means no search criterion.
    pub search: String,
    pub room: RoomScope,
    pub category: CategoryScope,
}

impl SheetFilter {
    /// Filter that passes every item.
    pub fn all() -> Self {
        Self::default()
    }

    /// Does this item pass every active criterion?
    pub fn matches(&self, item: &Item) -> bool {
        if let RoomScope::Only(room_id) = &self.room {
            if item.room_id != *room_id {
                return false;
            }
        }

        if let CategoryScope::Only(category) = &self.category {
            if item.effective_category() != category {
                return false;
            }
        }

        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let name_hit = item.name.to_lowercase().contains(&needle);
            let sku_hit = item
                .vendor_sku
                .as_deref()
                .map(|sku| sku.to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !name_hit && !sku_hit {
                return false;
            }
        }

        true
    }
}
