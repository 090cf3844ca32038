//! Expand/collapse tracking per room and per (room, category) section.
//!
//! Everything starts expanded; only collapsed keys are stored, so state for
//! rooms and sections that appear later needs no registration step.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct CollapseState {
    collapsed_rooms: HashSet<String>,
    collapsed_sections: HashSet<(String, String)>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_room_expanded(&self, room_id: &str) -> bool {
        !self.collapsed_rooms.contains(room_id)
    }

    pub fn toggle_room(&mut self, room_id: &str) {
        if !self.collapsed_rooms.remove(room_id) {
            self.collapsed_rooms.insert(room_id.to_string());
        }
    }

    pub fn is_section_expanded(&self, room_id: &str, category: &str) -> bool {
        !self
            .collapsed_sections
            .contains(&(room_id.to_string(), category.to_string()))
    }

    pub fn toggle_section(&mut self, room_id: &str, category: &str) {
        let key = (room_id.to_string(), category.to_string());
        if !self.collapsed_sections.remove(&key) {
            self.collapsed_sections.insert(key);
        }
    }

    /// Expand everything (drops all stored keys).
    pub fn expand_all(&mut self) {
        self.collapsed_rooms.clear();
        self.collapsed_sections.clear();
    }

    /// Collapse the given rooms wholesale.
    pub fn collapse_rooms<'a>(&mut self, room_ids: impl IntoIterator<Item = &'a str>) {
        for id in room_ids {
            self.collapsed_rooms.insert(id.to_string());
        }
    }
}
