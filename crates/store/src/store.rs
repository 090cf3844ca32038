//! Project store — the in-memory cache behind every sheet view.
//!
//! One store per open project. The backend stays the source of truth:
//! single-item mutations patch the cache in place, bulk mutations go
//! through the chunked executor and end with a full refetch rather than
//! incremental reconciliation.

use std::thread;

use atelier_client::{ApiClient, ApiError};
use atelier_core::{Item, ItemStatus, Project, Room, Sheet};
use atelier_engine::{
    group_sheet, recreate_payload, FieldEdit, GroupedSheet, SelectionSet, SheetFilter, UndoBuffer,
};

use crate::batch::{run_chunked, BatchConfig, BatchFailure, BatchReport};

#[derive(Debug)]
pub enum StoreError {
    Api(ApiError),
    /// A destructive batch is already running.
    Busy,
    /// Undo requested with an empty buffer.
    NothingToUndo,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Api(err) => write!(f, "{}", err),
            StoreError::Busy => write!(f, "a bulk operation is already in progress"),
            StoreError::NothingToUndo => write!(f, "nothing to undo"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<ApiError> for StoreError {
    fn from(err: ApiError) -> Self {
        StoreError::Api(err)
    }
}

/// Room and item cache for one project, plus the sheet-level state that
/// drives bulk actions.
pub struct ProjectStore {
    client: ApiClient,
    project_id: String,
    batch: BatchConfig,
    rooms: Vec<Room>,
    items: Vec<Item>,
    pub selection: SelectionSet,
    undo: UndoBuffer,
    processing: bool,
}

impl ProjectStore {
    pub fn new(client: ApiClient, project_id: impl Into<String>) -> Self {
        Self::with_batch_config(client, project_id, BatchConfig::default())
    }

    pub fn with_batch_config(
        client: ApiClient,
        project_id: impl Into<String>,
        batch: BatchConfig,
    ) -> Self {
        Self {
            client,
            project_id: project_id.into(),
            batch,
            rooms: Vec::new(),
            items: Vec::new(),
            selection: SelectionSet::new(),
            undo: UndoBuffer::new(),
            processing: false,
        }
    }

    // ── Cache access ────────────────────────────────────────────────

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn undo_available(&self) -> bool {
        !self.undo.is_empty()
    }

    /// True while a destructive batch is running.
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Refetch rooms and items from the backend.
    pub fn refresh(&mut self) -> Result<(), StoreError> {
        self.rooms = self.client.list_rooms(&self.project_id)?;
        self.items = self.client.list_items(&self.project_id, None)?;
        Ok(())
    }

    // ── Derived views ───────────────────────────────────────────────

    pub fn items_for_sheet(&self, sheet: Sheet) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| sheet.contains(i.status))
            .collect()
    }

    /// The grouped render tree for one sheet under a filter.
    pub fn grouped(&self, sheet: Sheet, filter: &SheetFilter) -> GroupedSheet {
        let sheet_items: Vec<Item> = self
            .items
            .iter()
            .filter(|i| sheet.contains(i.status))
            .cloned()
            .collect();
        group_sheet(&self.rooms, &sheet_items, filter)
    }

    // ── Single-item mutations (patch the cache in place) ────────────

    /// Commit a single-cell edit. On failure the edit is logged and
    /// dropped: the cache keeps the server value and the cell reverts.
    pub fn commit_edit(&mut self, edit: &FieldEdit) -> Result<(), StoreError> {
        let mut patch = serde_json::Map::new();
        patch.insert(edit.field.json_key().to_string(), edit.value.clone());

        match self
            .client
            .update_item(&edit.item_id, &serde_json::Value::Object(patch))
        {
            Ok(updated) => {
                self.patch_local(updated);
                Ok(())
            }
            Err(error) => {
                log::warn!(
                    "dropping edit of {} on {}: {}",
                    edit.field.json_key(),
                    edit.item_id,
                    error
                );
                Err(error.into())
            }
        }
    }

    /// Move one item to a new status.
    pub fn update_item_status(
        &mut self,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<(), StoreError> {
        let patch = serde_json::json!({ "status": status.as_str() });
        let updated = self.client.update_item(item_id, &patch)?;
        self.patch_local(updated);
        Ok(())
    }

    pub fn create_item(&mut self, payload: &serde_json::Value) -> Result<Item, StoreError> {
        let item = self.client.create_item(payload)?;
        // Server lists newest first; keep the cache in the same order.
        self.items.insert(0, item.clone());
        Ok(item)
    }

    pub fn create_room(&mut self, name: &str, notes: Option<&str>) -> Result<Room, StoreError> {
        let room = self.client.create_room(&self.project_id, name, notes)?;
        self.rooms.push(room.clone());
        Ok(room)
    }

    /// Create one room per questionnaire room type.
    pub fn seed_rooms_from_questionnaire(
        &mut self,
        project: &Project,
    ) -> Result<Vec<Room>, StoreError> {
        let mut created = Vec::new();
        for room_type in &project.rooms_involved {
            let room = self.client.create_room(&self.project_id, room_type, None)?;
            self.rooms.push(room.clone());
            created.push(room);
        }
        Ok(created)
    }

    fn patch_local(&mut self, updated: Item) {
        if let Some(slot) = self.items.iter_mut().find(|i| i.id == updated.id) {
            *slot = updated;
        }
    }

    // ── Bulk mutations (chunked, snapshot to undo, refetch) ─────────

    /// Delete items by id. Snapshots the deleted records into the undo
    /// buffer, overwriting whatever was there.
    pub fn delete_items(&mut self, ids: &[String]) -> Result<BatchReport, StoreError> {
        self.enter_batch()?;
        let result = self.delete_items_inner(ids);
        self.processing = false;
        result
    }

    fn delete_items_inner(&mut self, ids: &[String]) -> Result<BatchReport, StoreError> {
        let snapshot: Vec<Item> = self
            .items
            .iter()
            .filter(|i| ids.contains(&i.id))
            .cloned()
            .collect();
        self.undo.record(snapshot);

        let client = self.client.clone();
        let report = run_chunked(ids, &self.batch, |id| client.delete_item(id));
        self.refresh()?;
        Ok(report)
    }

    /// Delete every item in one (room, category, sub-category) section.
    pub fn delete_section(
        &mut self,
        room_id: &str,
        category: &str,
        sub_category: &str,
    ) -> Result<BatchReport, StoreError> {
        let ids: Vec<String> = self
            .items
            .iter()
            .filter(|i| {
                i.room_id == room_id
                    && i.effective_category() == category
                    && i.effective_sub_category() == sub_category
            })
            .map(|i| i.id.clone())
            .collect();
        self.delete_items(&ids)
    }

    /// Delete a room and, client-side, every item referencing it. The
    /// items land in the undo buffer; the room itself does not.
    pub fn delete_room(&mut self, room_id: &str) -> Result<BatchReport, StoreError> {
        self.enter_batch()?;
        let result = self.delete_room_inner(room_id);
        self.processing = false;
        result
    }

    fn delete_room_inner(&mut self, room_id: &str) -> Result<BatchReport, StoreError> {
        let ids: Vec<String> = self
            .items
            .iter()
            .filter(|i| i.room_id == room_id)
            .map(|i| i.id.clone())
            .collect();
        let snapshot: Vec<Item> = self
            .items
            .iter()
            .filter(|i| i.room_id == room_id)
            .cloned()
            .collect();
        self.undo.record(snapshot);

        let client = self.client.clone();
        let report = run_chunked(&ids, &self.batch, |id| client.delete_item(id));
        self.client.delete_room(room_id)?;
        self.refresh()?;
        Ok(report)
    }

    /// Move every selected item to `status`. The selection is cleared
    /// unconditionally once the batch has run.
    pub fn move_selected_to(&mut self, status: ItemStatus) -> Result<BatchReport, StoreError> {
        self.enter_batch()?;
        let result = self.move_selected_inner(status);
        self.processing = false;
        result
    }

    fn move_selected_inner(&mut self, status: ItemStatus) -> Result<BatchReport, StoreError> {
        let ids = self.selection.ids();
        if ids.is_empty() {
            return Ok(BatchReport {
                attempted: 0,
                failures: Vec::new(),
            });
        }

        let patch = serde_json::json!({ "status": status.as_str() });
        let client = self.client.clone();
        let report = run_chunked(&ids, &self.batch, |id| {
            client.update_item(id, &patch).map(|_| ())
        });

        self.selection.clear();
        self.refresh()?;
        Ok(report)
    }

    /// Recreate the most recently deleted batch via bulk create. The
    /// attempt consumes the buffer; recreated records get new ids.
    pub fn undo_last_delete(&mut self) -> Result<BatchReport, StoreError> {
        self.enter_batch()?;
        let result = self.undo_last_delete_inner();
        self.processing = false;
        result
    }

    fn undo_last_delete_inner(&mut self) -> Result<BatchReport, StoreError> {
        let batch = self.undo.take().ok_or(StoreError::NothingToUndo)?;
        let payloads: Vec<serde_json::Value> =
            batch.items.iter().map(recreate_payload).collect();

        let chunk_size = self.batch.chunk_size.max(1);
        let mut failures = Vec::new();
        for (index, (payload_chunk, item_chunk)) in payloads
            .chunks(chunk_size)
            .zip(batch.items.chunks(chunk_size))
            .enumerate()
        {
            if index > 0 {
                thread::sleep(self.batch.chunk_delay);
            }
            if let Err(error) = self.client.create_items_bulk(payload_chunk) {
                log::warn!(
                    "undo recreate failed for a chunk of {}: {}",
                    payload_chunk.len(),
                    error
                );
                for item in item_chunk {
                    failures.push(BatchFailure {
                        id: item.id.clone(),
                        error: error.clone(),
                    });
                }
            }
        }

        let report = BatchReport {
            attempted: payloads.len(),
            failures,
        };
        self.refresh()?;
        Ok(report)
    }

    fn enter_batch(&mut self) -> Result<(), StoreError> {
        if self.processing {
            return Err(StoreError::Busy);
        }
        self.processing = true;
        Ok(())
    }
}
