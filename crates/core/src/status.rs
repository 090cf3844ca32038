//! Item status and sheet membership.
//!
//! An item belongs to a sheet purely by its status value: `Walkthrough`
//! items live on the Walkthrough sheet, `PICKED` items on the Checklist,
//! and every non-Walkthrough status on the FF&E sheet (so the Checklist is
//! a subset view of the FF&E status set).

use serde::{Deserialize, Serialize};

/// Lifecycle status of an item. Serialized with the exact wire strings the
/// backend stores (`"Delivered to Receiver"`, `"PICKED"`, …).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    Approved,
    Ordered,
    Shipped,
    #[serde(rename = "Delivered to Receiver")]
    DeliveredToReceiver,
    #[serde(rename = "Delivered to Store")]
    DeliveredToStore,
    #[serde(rename = "Delivered to Jobsite")]
    DeliveredToJobsite,
    #[serde(rename = "On Hold")]
    OnHold,
    #[serde(rename = "Partially Delivered")]
    PartiallyDelivered,
    Damaged,
    Backordered,
    #[serde(rename = "At Workroom")]
    AtWorkroom,
    #[serde(rename = "Ask Advisor")]
    AskAdvisor,
    #[serde(rename = "Ask Client")]
    AskClient,
    #[serde(rename = "Ready for Install")]
    ReadyForInstall,
    Installed,
    #[serde(rename = "PICKED")]
    Picked,
    Walkthrough,
}

impl ItemStatus {
    /// All 17 statuses, FF&E set first, `Walkthrough` last.
    pub const ALL: [ItemStatus; 17] = [
        ItemStatus::Approved,
        ItemStatus::Ordered,
        ItemStatus::Shipped,
        ItemStatus::DeliveredToReceiver,
        ItemStatus::DeliveredToStore,
        ItemStatus::DeliveredToJobsite,
        ItemStatus::OnHold,
        ItemStatus::PartiallyDelivered,
        ItemStatus::Damaged,
        ItemStatus::Backordered,
        ItemStatus::AtWorkroom,
        ItemStatus::AskAdvisor,
        ItemStatus::AskClient,
        ItemStatus::ReadyForInstall,
        ItemStatus::Installed,
        ItemStatus::Picked,
        ItemStatus::Walkthrough,
    ];

    /// The wire string for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Approved => "Approved",
            ItemStatus::Ordered => "Ordered",
            ItemStatus::Shipped => "Shipped",
            ItemStatus::DeliveredToReceiver => "Delivered to Receiver",
            ItemStatus::DeliveredToStore => "Delivered to Store",
            ItemStatus::DeliveredToJobsite => "Delivered to Jobsite",
            ItemStatus::OnHold => "On Hold",
            ItemStatus::PartiallyDelivered => "Partially Delivered",
            ItemStatus::Damaged => "Damaged",
            ItemStatus::Backordered => "Backordered",
            ItemStatus::AtWorkroom => "At Workroom",
            ItemStatus::AskAdvisor => "Ask Advisor",
            ItemStatus::AskClient => "Ask Client",
            ItemStatus::ReadyForInstall => "Ready for Install",
            ItemStatus::Installed => "Installed",
            ItemStatus::Picked => "PICKED",
            ItemStatus::Walkthrough => "Walkthrough",
        }
    }

    /// Parse a wire string. Returns `None` for unrecognized values.
    pub fn parse(s: &str) -> Option<ItemStatus> {
        ItemStatus::ALL.iter().copied().find(|v| v.as_str() == s)
    }

    /// The sheet this status places an item on (Checklist reported for
    /// `PICKED`, which the FF&E sheet also admits).
    pub fn sheet(&self) -> Sheet {
        match self {
            ItemStatus::Walkthrough => Sheet::Walkthrough,
            ItemStatus::Picked => Sheet::Checklist,
            _ => Sheet::Ffe,
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the three item sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sheet {
    /// Strictly `Walkthrough` status.
    Walkthrough,
    /// Strictly `PICKED` status.
    Checklist,
    /// Any of the 16 non-Walkthrough statuses (includes `PICKED`).
    Ffe,
}

impl Sheet {
    /// Does an item with this status appear on this sheet?
    pub fn contains(&self, status: ItemStatus) -> bool {
        match self {
            Sheet::Walkthrough => status == ItemStatus::Walkthrough,
            Sheet::Checklist => status == ItemStatus::Picked,
            Sheet::Ffe => status != ItemStatus::Walkthrough,
        }
    }

    /// The statuses admitted by this sheet.
    pub fn statuses(&self) -> Vec<ItemStatus> {
        ItemStatus::ALL
            .iter()
            .copied()
            .filter(|s| self.contains(*s))
            .collect()
    }
}
