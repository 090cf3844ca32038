//! Canonical ordering tables for categories and room types.
//!
//! Neither list constrains what the backend accepts — category and room name
//! are free text on the wire. The tables only drive render order: known
//! values sort by table position, unknown values sort after every known one.

/// Category bucket applied when an item has no category.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

/// Sub-category bucket applied when an item has no sub-category.
pub const DEFAULT_SUB_CATEGORY: &str = "Misc.";

/// Fixed category render priority. Unknown categories sort after all of
/// these, in encounter order.
pub const CATEGORY_PRIORITY: [&str; 12] = [
    "LIGHTING",
    "FURNITURE",
    "PLUMBING",
    "APPLIANCES",
    "CABINETS",
    "COUNTERTOPS & TILE",
    "ACCESSORIES",
    "TEXTILES",
    "OUTDOOR",
    "PAINT/WALLPAPER/HARDWARE & FINISHES",
    "ARCHITECTURAL ELEMENTS",
    "Uncategorized",
];

/// Canonical room-type vocabulary, in render order. Unknown room names sort
/// after all of these, alphabetically among themselves.
pub const ROOM_TYPES: [&str; 45] = [
    "Entry",
    "Foyer",
    "Living Room",
    "Family Room",
    "Great Room",
    "Den",
    "Study",
    "Library",
    "Home Office",
    "Kitchen",
    "Kitchenette",
    "Butler's Pantry",
    "Pantry",
    "Breakfast Nook",
    "Dining Room",
    "Formal Dining Room",
    "Primary Bedroom",
    "Primary Bathroom",
    "Primary Closet",
    "Guest Bedroom",
    "Guest Bathroom",
    "Bedroom",
    "Nursery",
    "Kids Bedroom",
    "Playroom",
    "Bathroom",
    "Powder Room",
    "Laundry Room",
    "Mudroom",
    "Hallway",
    "Stairway",
    "Basement",
    "Attic",
    "Garage",
    "Gym",
    "Media Room",
    "Game Room",
    "Bar",
    "Wine Cellar",
    "Sunroom",
    "Screened Porch",
    "Porch",
    "Patio",
    "Deck",
    "Outdoor Kitchen",
];

/// Position of a category in the priority table, `None` if unknown.
pub fn category_rank(category: &str) -> Option<usize> {
    CATEGORY_PRIORITY.iter().position(|c| *c == category)
}

/// Position of a room name in the canonical vocabulary, `None` if unknown.
pub fn room_rank(name: &str) -> Option<usize> {
    ROOM_TYPES.iter().position(|r| *r == name)
}
