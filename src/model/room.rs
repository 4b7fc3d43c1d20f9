//! Room types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;

/// A bookable room.
///
/// `status` is set by staff and is not derived from bookings: a room can
/// be marked for cleaning or maintenance regardless of who is booked in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: Uuid,

    /// Door number shown to guests, e.g. `"101"`. Unique.
    pub number: String,

    pub room_type: RoomType,
    pub bed_count: u32,
    pub max_occupancy: u32,
    pub current_occupants: u32,
    pub status: RoomStatus,
    pub amenities: Vec<String>,
    pub bathroom: BathroomType,
    pub window_view: String,
    pub pricing: Pricing,
    pub last_updated: Timestamp,
}

/// Nightly rates for a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    /// Price of one dorm bed for one night.
    pub base_rate_per_bed: Amount,

    /// Price of the whole room for one night.
    pub private_room_rate: Amount,

    /// Seasonal percentage applied on top of either rate.
    pub seasonal_adjustment_pct: i32,
}

impl Default for Pricing {
    fn default() -> Self {
        Self {
            base_rate_per_bed: Amount::from_cents(2_500),
            private_room_rate: Amount::from_cents(8_000),
            seasonal_adjustment_pct: 0,
        }
    }
}

impl Pricing {
    /// The seasonally adjusted rate for one night.
    ///
    /// Private rooms are sold whole; dorms are sold per bed.
    pub fn nightly_rate(&self, room_type: RoomType) -> Amount {
        let base = if room_type.is_private() {
            self.private_room_rate
        } else {
            self.base_rate_per_bed
        };
        base.adjusted_by_percent(self.seasonal_adjustment_pct)
    }
}

string_enum! {
    /// Room layout.
    pub enum RoomType ("room type") {
        #[default]
        FourBedDorm => "4-bed-dorm",
        SixBedDorm => "6-bed-dorm",
        EightBedDorm => "8-bed-dorm",
        FemaleDorm => "female-dorm",
        Private => "private",
    }
}

impl RoomType {
    pub fn is_private(self) -> bool {
        self == Self::Private
    }
}

string_enum! {
    /// Staff-maintained room state.
    pub enum RoomStatus ("room status") {
        #[default]
        Available => "available",
        Occupied => "occupied",
        Reserved => "reserved",
        Cleaning => "cleaning",
        Maintenance => "maintenance",
    }
}

string_enum! {
    pub enum BathroomType ("bathroom type") {
        #[default]
        Shared => "shared",
        Ensuite => "ensuite",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dorms_are_priced_per_bed() {
        let pricing = Pricing::default();
        assert_eq!(
            pricing.nightly_rate(RoomType::SixBedDorm),
            Amount::from_cents(2_500)
        );
    }

    #[test]
    fn private_rooms_use_room_rate_with_season() {
        let pricing = Pricing {
            seasonal_adjustment_pct: 25,
            ..Pricing::default()
        };
        assert_eq!(
            pricing.nightly_rate(RoomType::Private),
            Amount::from_cents(10_000)
        );
    }
}
