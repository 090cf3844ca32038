//! Wire-format entities owned by the backend.
//!
//! These are transient in-memory copies with lifetime = one session; the
//! REST backend is the source of truth. Optional fields deserialize from
//! absent/null alike and are omitted when serializing, so partial server
//! payloads round-trip cleanly.

use serde::{Deserialize, Serialize};

use crate::status::ItemStatus;

/// A client project, created once via questionnaire submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,

    // Client metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_address: Option<String>,

    // Questionnaire answers
    /// Room types selected at submission; each becomes a Room.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rooms_involved: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub style_preferences: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_scope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
}

/// A named space within a project that groups items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub project_id: String,
    /// Free text; usually one of [`crate::taxonomy::ROOM_TYPES`].
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
}

/// A furniture/fixture/product record attached to a room.
///
/// `category`/`sub_category` are free text; grouping applies the defaults
/// from [`crate::taxonomy`] when they are absent. Dates are ISO 8601 date
/// strings as the backend returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub project_id: String,
    pub room_id: String,
    pub name: String,
    pub status: ItemStatus,
    #[serde(default = "default_quantity")]
    pub quantity: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,

    // Descriptive / logistics fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vendor_sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_ship_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_delivery_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,

    // Server-assigned; stripped when a record is recreated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

fn default_quantity() -> u32 {
    1
}

impl Item {
    /// Category with the default bucket applied.
    pub fn effective_category(&self) -> &str {
        self.category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(crate::taxonomy::DEFAULT_CATEGORY)
    }

    /// Sub-category with the default bucket applied.
    pub fn effective_sub_category(&self) -> &str {
        self.sub_category
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(crate::taxonomy::DEFAULT_SUB_CATEGORY)
    }
}
