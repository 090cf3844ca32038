//! Undo buffer — the single most recent destructive batch.
//!
//! One slot, no history stack: each destructive action overwrites the
//! previous contents. Undo re-creates equivalent records through the bulk
//! create endpoint, which necessarily assigns new identifiers; links to the
//! old identifiers are not preserved.
//!
//! Known limitation, kept on purpose: when a room cascade delete fills the
//! buffer, the buffered items still carry the deleted `room_id`, and a
//! later undo recreates them pointing at a room that no longer exists.

use atelier_core::Item;

/// Fields the server assigns; stripped before re-creating a record.
const SERVER_FIELDS: [&str; 4] = ["id", "created_date", "updated_date", "created_by"];

/// Snapshot of one destructive batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedBatch {
    pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default)]
pub struct UndoBuffer {
    slot: Option<DeletedBatch>,
}

impl UndoBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a destructive batch, overwriting whatever was buffered.
    pub fn record(&mut self, items: Vec<Item>) {
        self.slot = Some(DeletedBatch { items });
    }

    /// Consume the buffered batch. The undo attempt owns it from here on;
    /// the buffer is empty afterward regardless of how the recreate goes.
    pub fn take(&mut self) -> Option<DeletedBatch> {
        self.slot.take()
    }

    pub fn peek(&self) -> Option<&DeletedBatch> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

/// Build the bulk-create payload for one buffered record: every field
/// verbatim (including `room_id`) minus the server-assigned ones.
pub fn recreate_payload(item: &Item) -> serde_json::Value {
    let mut value = serde_json::to_value(item).unwrap_or(serde_json::Value::Null);
    if let Some(obj) = value.as_object_mut() {
        for field in SERVER_FIELDS {
            obj.remove(field);
        }
    }
    value
}
