//! Booking types: a guest's claim on a room for a range of nights.

use jiff::{Timestamp, civil::Date};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Amount;

/// A reservation of one room by one guest.
///
/// `check_out` is exclusive: the guest leaves that morning and the room
/// is free for a new arrival the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub check_in: Date,
    pub check_out: Date,
    pub status: BookingStatus,
    pub source: BookingSource,
    pub total_amount: Amount,
    pub notes: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Booking {
    /// Whether the booking takes part in availability math.
    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    /// Length of stay in whole nights.
    pub fn nights(&self) -> i32 {
        (self.check_out - self.check_in).get_days()
    }

    /// The booked date range.
    pub fn stay(&self) -> Stay {
        Stay {
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }
}

/// A half-open date range `[check_in, check_out)` with at least one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stay {
    check_in: Date,
    check_out: Date,
}

/// A check-out that doesn't fall after the check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("check-out {check_out} must be after check-in {check_in}")]
pub struct InvalidStay {
    pub check_in: Date,
    pub check_out: Date,
}

impl Stay {
    /// Validates the date ordering. Zero-length and inverted ranges are rejected.
    pub fn new(check_in: Date, check_out: Date) -> Result<Self, InvalidStay> {
        if check_out <= check_in {
            return Err(InvalidStay {
                check_in,
                check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> Date {
        self.check_in
    }

    pub fn check_out(&self) -> Date {
        self.check_out
    }

    pub fn nights(&self) -> i32 {
        (self.check_out - self.check_in).get_days()
    }

    /// Whether two stays share at least one night. Touching ranges don't overlap.
    pub fn overlaps(&self, other: &Stay) -> bool {
        !(self.check_out <= other.check_in || self.check_in >= other.check_out)
    }
}

string_enum! {
    /// Where a booking stands in its lifecycle.
    ///
    /// Moves forward through `inquiry → pending → confirmed`; may be
    /// cancelled from any other state. Cancelled bookings are kept for
    /// history but never block a room.
    pub enum BookingStatus ("booking status") {
        #[default]
        Inquiry => "inquiry",
        Pending => "pending",
        Confirmed => "confirmed",
        Cancelled => "cancelled",
    }
}

impl BookingStatus {
    /// Statuses a booking may be created in.
    pub fn is_initial(self) -> bool {
        matches!(self, Self::Inquiry | Self::Pending)
    }

    /// Whether `self → next` is a legal lifecycle move.
    ///
    /// Same-status moves are not transitions; callers treat them as no-ops.
    pub fn can_transition_to(self, next: Self) -> bool {
        match (self, next) {
            (Self::Cancelled, _) => false,
            (_, Self::Cancelled) => true,
            (from, to) => to.rank() > from.rank(),
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::Inquiry => 0,
            Self::Pending => 1,
            Self::Confirmed => 2,
            Self::Cancelled => 3,
        }
    }
}

string_enum! {
    /// How the booking reached the desk.
    pub enum BookingSource ("booking source") {
        #[default]
        Direct => "direct",
        Phone => "phone",
        Email => "email",
        WalkIn => "walk-in",
        Online => "online",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    #[test]
    fn stay_rejects_zero_length_and_inverted_ranges() {
        let day = date(2024, 12, 18);
        assert!(Stay::new(day, day).is_err());
        assert!(Stay::new(day, date(2024, 12, 17)).is_err());
        assert!(Stay::new(day, date(2024, 12, 19)).is_ok());
    }

    #[test]
    fn stay_counts_nights_across_month_boundary() {
        let stay = Stay::new(date(2024, 12, 29), date(2025, 1, 2)).unwrap();
        assert_eq!(stay.nights(), 4);
    }

    #[test]
    fn touching_stays_do_not_overlap() {
        let a = Stay::new(date(2024, 12, 18), date(2024, 12, 22)).unwrap();
        let b = Stay::new(date(2024, 12, 22), date(2024, 12, 25)).unwrap();
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn nested_stay_overlaps() {
        let outer = Stay::new(date(2024, 12, 18), date(2024, 12, 28)).unwrap();
        let inner = Stay::new(date(2024, 12, 20), date(2024, 12, 21)).unwrap();
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn status_moves_forward_only() {
        use BookingStatus::*;
        assert!(Inquiry.can_transition_to(Pending));
        assert!(Inquiry.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Confirmed));
        assert!(!Confirmed.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Inquiry));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn cancel_is_reachable_from_everywhere_and_final() {
        use BookingStatus::*;
        for from in [Inquiry, Pending, Confirmed] {
            assert!(from.can_transition_to(Cancelled));
        }
        for to in BookingStatus::ALL {
            assert!(!Cancelled.can_transition_to(*to));
        }
    }

    #[test]
    fn only_inquiry_and_pending_are_initial() {
        assert!(BookingStatus::Inquiry.is_initial());
        assert!(BookingStatus::Pending.is_initial());
        assert!(!BookingStatus::Confirmed.is_initial());
        assert!(!BookingStatus::Cancelled.is_initial());
    }
}
