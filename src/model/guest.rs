//! Guest types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person who stays, or is due to stay, at the hostel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub status: GuestStatus,
    pub created_at: Timestamp,
}

string_enum! {
    /// Whether the guest is on the premises.
    pub enum GuestStatus ("guest status") {
        #[default]
        Reserved => "reserved",
        CheckedIn => "checked-in",
        CheckedOut => "checked-out",
    }
}
