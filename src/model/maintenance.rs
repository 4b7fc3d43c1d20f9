//! Maintenance requests: work orders raised against a room.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;

/// A reported problem with a room and the work to fix it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub room_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: MaintenanceStatus,
    pub category: Category,
    pub assigned_staff: Option<String>,
    pub reported_by: String,
    pub reported_at: Timestamp,
    pub scheduled_date: Option<Date>,

    /// Set when the request reaches `completed`.
    pub completed_date: Option<Date>,

    pub estimated_cost: Option<Amount>,
    pub actual_cost: Option<Amount>,
    pub notes: String,
}

impl MaintenanceRequest {
    pub fn is_open(&self) -> bool {
        self.status != MaintenanceStatus::Completed
    }
}

string_enum! {
    pub enum Priority ("priority") {
        Low => "low",
        #[default]
        Medium => "medium",
        High => "high",
    }
}

string_enum! {
    pub enum MaintenanceStatus ("maintenance status") {
        #[default]
        Pending => "pending",
        Scheduled => "scheduled",
        InProgress => "in-progress",
        Completed => "completed",
    }
}

string_enum! {
    /// Trade responsible for the work.
    pub enum Category ("category") {
        #[default]
        General => "general",
        Hvac => "hvac",
        Plumbing => "plumbing",
        Electrical => "electrical",
        Furniture => "furniture",
        Technology => "technology",
        Security => "security",
        Cleaning => "cleaning",
    }
}
