//! `atelier-engine` — pure sheet-state engine.
//!
//! Receives pre-loaded rooms and items, returns derived structure: the
//! grouped render tree, filter predicates, selection/collapse state, the
//! undo snapshot, and the inline cell-editor state machine. No IO, no HTTP,
//! no clock.

pub mod collapse;
pub mod editor;
pub mod filter;
pub mod grouping;
pub mod selection;
pub mod undo;

pub use collapse::CollapseState;
pub use editor::{CellEditor, EditError, EditorState, FieldEdit, ItemField};
pub use filter::{CategoryScope, RoomScope, SheetFilter};
pub use grouping::{group_sheet, CategoryGroup, GroupedSheet, RoomGroup, SubCategoryGroup};
pub use selection::SelectionSet;
pub use undo::{recreate_payload, DeletedBatch, UndoBuffer};
