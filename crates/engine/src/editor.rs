//! Inline cell editor — the per-cell state machine.
//!
//! Every editable cell follows the same cycle: `Viewing → begin → Editing →
//! commit/cancel → Viewing`. Commit validates the draft and emits a
//! [`FieldEdit`] for the store to send as a single-field update; there is
//! no intermediate saving state, and the editor returns to `Viewing`
//! whether or not the backend later accepts the edit.

use atelier_core::ItemStatus;

/// An editable item field, with its wire key and draft-parsing rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    Category,
    SubCategory,
    Quantity,
    VendorSku,
    Size,
    FinishColor,
    ActualCost,
    ImageLink,
    Link,
    EstimatedShipDate,
    EstimatedDeliveryDate,
    InstallDate,
    ShippingTo,
    TrackingNumber,
    Carrier,
    OrderDate,
    Remarks,
    Status,
}

impl ItemField {
    /// JSON key in the item payload.
    pub fn json_key(&self) -> &'static str {
        match self {
            ItemField::Name => "name",
            ItemField::Category => "category",
            ItemField::SubCategory => "sub_category",
            ItemField::Quantity => "quantity",
            ItemField::VendorSku => "vendor_sku",
            ItemField::Size => "size",
            ItemField::FinishColor => "finish_color",
            ItemField::ActualCost => "actual_cost",
            ItemField::ImageLink => "image_link",
            ItemField::Link => "link",
            ItemField::EstimatedShipDate => "estimated_ship_date",
            ItemField::EstimatedDeliveryDate => "estimated_delivery_date",
            ItemField::InstallDate => "install_date",
            ItemField::ShippingTo => "shipping_to",
            ItemField::TrackingNumber => "tracking_number",
            ItemField::Carrier => "carrier",
            ItemField::OrderDate => "order_date",
            ItemField::Remarks => "remarks",
            ItemField::Status => "status",
        }
    }

    /// Validate and convert a raw draft into its wire value.
    ///
    /// Validation happens before any network call: numbers must parse,
    /// status must be a known value, name must be non-empty. An empty
    /// draft clears an optional field (`null`).
    pub fn parse_draft(&self, draft: &str) -> Result<serde_json::Value, EditError> {
        let trimmed = draft.trim();
        match self {
            ItemField::Name => {
                if trimmed.is_empty() {
                    Err(EditError::RequiredField("name"))
                } else {
                    Ok(serde_json::Value::from(trimmed))
                }
            }
            ItemField::Quantity => trimmed
                .parse::<u32>()
                .map(serde_json::Value::from)
                .map_err(|_| EditError::InvalidNumber {
                    field: "quantity",
                    draft: draft.to_string(),
                }),
            ItemField::ActualCost => {
                if trimmed.is_empty() {
                    return Ok(serde_json::Value::Null);
                }
                trimmed
                    .parse::<f64>()
                    .map(serde_json::Value::from)
                    .map_err(|_| EditError::InvalidNumber {
                        field: "actual_cost",
                        draft: draft.to_string(),
                    })
            }
            ItemField::Status => ItemStatus::parse(trimmed)
                .map(|s| serde_json::Value::from(s.as_str()))
                .ok_or_else(|| EditError::UnknownStatus(draft.to_string())),
            _ => {
                if trimmed.is_empty() {
                    Ok(serde_json::Value::Null)
                } else {
                    Ok(serde_json::Value::from(trimmed))
                }
            }
        }
    }
}

/// Validation failure for a draft value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    RequiredField(&'static str),
    InvalidNumber { field: &'static str, draft: String },
    UnknownStatus(String),
}

impl std::fmt::Display for EditError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EditError::RequiredField(field) => write!(f, "{field} is required"),
            EditError::InvalidNumber { field, draft } => {
                write!(f, "{field}: not a number: {draft:?}")
            }
            EditError::UnknownStatus(draft) => write!(f, "unknown status: {draft:?}"),
        }
    }
}

impl std::error::Error for EditError {}

/// A committed single-field edit, ready for the store to send.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    pub item_id: String,
    pub field: ItemField,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    Viewing,
    Editing { field: ItemField, draft: String },
}

/// Editor for one item's cells.
#[derive(Debug, Clone)]
pub struct CellEditor {
    item_id: String,
    state: EditorState,
}

impl CellEditor {
    pub fn new(item_id: impl Into<String>) -> Self {
        Self {
            item_id: item_id.into(),
            state: EditorState::Viewing,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditorState::Editing { .. })
    }

    /// Click: start editing a field, seeding the draft with the current value.
    pub fn begin(&mut self, field: ItemField, current: &str) {
        self.state = EditorState::Editing {
            field,
            draft: current.to_string(),
        };
    }

    /// Keystrokes: replace the draft. No-op while viewing.
    pub fn set_draft(&mut self, draft: &str) {
        if let EditorState::Editing { draft: d, .. } = &mut self.state {
            *d = draft.to_string();
        }
    }

    /// Escape: drop the draft.
    pub fn cancel(&mut self) {
        self.state = EditorState::Viewing;
    }

    /// Blur/Enter: validate the draft and emit the edit. The editor
    /// returns to `Viewing` in every case — also on validation failure,
    /// mirroring a cell that reverts to its displayed value.
    pub fn commit(&mut self) -> Result<Option<FieldEdit>, EditError> {
        let state = std::mem::replace(&mut self.state, EditorState::Viewing);
        match state {
            EditorState::Viewing => Ok(None),
            EditorState::Editing { field, draft } => {
                let value = field.parse_draft(&draft)?;
                Ok(Some(FieldEdit {
                    item_id: self.item_id.clone(),
                    field,
                    value,
                }))
            }
        }
    }
}
