//! Booking overlap and availability.
//!
//! Every range here is half-open: a booking occupies the nights from
//! `check_in` up to, but not including, `check_out`. A room vacated on the
//! 22nd can take a new arrival on the 22nd.
//!
//! These are pure functions over slices. Date ordering is validated by the
//! caller (see [`Stay::new`]) before anything reaches the overlap test.

use jiff::{ToSpan, civil::Date};
use serde::Serialize;
use uuid::Uuid;

use crate::model::{Booking, BookingSource, BookingStatus, Room, RoomType, Stay};

/// Whether `booking` occupies the night of `date`: `check_in <= date < check_out`.
pub fn is_date_in_booking(date: Date, booking: &Booking) -> bool {
    booking.check_in <= date && date < booking.check_out
}

/// Optional restrictions for [`bookings_for_date`]. `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingFilter {
    /// Matched against the booked room's type, looked up by room id.
    pub room_type: Option<RoomType>,
    pub status: Option<BookingStatus>,
    pub source: Option<BookingSource>,
}

impl BookingFilter {
    fn matches(&self, booking: &Booking, rooms: &[Room]) -> bool {
        if self.status.is_some_and(|s| s != booking.status) {
            return false;
        }
        if self.source.is_some_and(|s| s != booking.source) {
            return false;
        }
        if let Some(room_type) = self.room_type {
            let booked_type = rooms
                .iter()
                .find(|r| r.id == booking.room_id)
                .map(|r| r.room_type);
            if booked_type != Some(room_type) {
                return false;
            }
        }
        true
    }
}

/// Active bookings occupying `date` that pass `filter`.
///
/// Keeps the order of `bookings`. A booking whose room is missing from
/// `rooms` never matches a room-type filter.
pub fn bookings_for_date<'b>(
    date: Date,
    bookings: &'b [Booking],
    rooms: &[Room],
    filter: &BookingFilter,
) -> Vec<&'b Booking> {
    bookings
        .iter()
        .filter(|b| b.is_active() && is_date_in_booking(date, b))
        .filter(|b| filter.matches(b, rooms))
        .collect()
}

/// Bookings with at least one night between `from` and `to`, both days
/// included, ordered by check-in. Cancelled bookings are kept; ties keep
/// the order of `bookings`.
pub fn bookings_in_range(bookings: &[Booking], from: Date, to: Date) -> Vec<&Booking> {
    let mut found: Vec<&Booking> = bookings
        .iter()
        .filter(|b| b.check_in <= to && b.check_out > from)
        .collect();
    found.sort_by_key(|b| b.check_in);
    found
}

/// Outcome of an availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub available: bool,

    /// Active bookings on the same room whose nights overlap the candidate stay.
    pub conflicts: Vec<Booking>,
}

/// Checks whether `room_id` is free for `stay`.
///
/// Bookings for other rooms, cancelled bookings, and `exclude` (the booking
/// being edited) are ignored.
pub fn check_availability(
    bookings: &[Booking],
    room_id: Uuid,
    stay: Stay,
    exclude: Option<Uuid>,
) -> Availability {
    let conflicts: Vec<Booking> = bookings
        .iter()
        .filter(|b| b.room_id == room_id)
        .filter(|b| exclude != Some(b.id))
        .filter(|b| b.is_active())
        .filter(|b| stay.overlaps(&b.stay()))
        .cloned()
        .collect();

    Availability {
        available: conflicts.is_empty(),
        conflicts,
    }
}

/// Moves a booking to start on `new_check_in`, keeping its length of stay.
///
/// Does not check the destination; run [`check_availability`] on the
/// result before committing if double-booking must be prevented.
pub fn reschedule(booking: &Booking, new_check_in: Date) -> Result<Booking, jiff::Error> {
    let new_check_out = new_check_in.checked_add(booking.nights().days())?;
    Ok(Booking {
        check_in: new_check_in,
        check_out: new_check_out,
        ..booking.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::{Timestamp, civil::date};

    use crate::model::{Amount, BathroomType, Pricing, RoomStatus};

    fn booking(room_id: Uuid, check_in: Date, check_out: Date, status: BookingStatus) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            guest_id: Uuid::new_v4(),
            room_id,
            check_in,
            check_out,
            status,
            source: BookingSource::Direct,
            total_amount: Amount::from_cents(20_000),
            notes: String::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn room(room_type: RoomType) -> Room {
        Room {
            id: Uuid::new_v4(),
            number: "101".into(),
            room_type,
            bed_count: 4,
            max_occupancy: 4,
            current_occupants: 0,
            status: RoomStatus::Available,
            amenities: vec![],
            bathroom: BathroomType::Shared,
            window_view: "Interior".into(),
            pricing: Pricing::default(),
            last_updated: Timestamp::UNIX_EPOCH,
        }
    }

    fn stay(check_in: Date, check_out: Date) -> Stay {
        Stay::new(check_in, check_out).unwrap()
    }

    #[test]
    fn date_in_booking_is_half_open() {
        let b = booking(
            Uuid::new_v4(),
            date(2024, 12, 18),
            date(2024, 12, 22),
            BookingStatus::Confirmed,
        );
        assert!(!is_date_in_booking(date(2024, 12, 17), &b));
        assert!(is_date_in_booking(date(2024, 12, 18), &b));
        assert!(is_date_in_booking(date(2024, 12, 21), &b));
        assert!(!is_date_in_booking(date(2024, 12, 22), &b));
    }

    #[test]
    fn overlapping_candidate_conflicts_with_confirmed_booking() {
        let room_id = Uuid::new_v4();
        let existing = booking(
            room_id,
            date(2024, 12, 18),
            date(2024, 12, 22),
            BookingStatus::Confirmed,
        );
        let bookings = vec![existing.clone()];

        let result = check_availability(
            &bookings,
            room_id,
            stay(date(2024, 12, 20), date(2024, 12, 23)),
            None,
        );

        assert!(!result.available);
        assert_eq!(result.conflicts, vec![existing]);
    }

    #[test]
    fn same_day_turnover_is_available() {
        let room_id = Uuid::new_v4();
        let bookings = vec![booking(
            room_id,
            date(2024, 12, 18),
            date(2024, 12, 22),
            BookingStatus::Confirmed,
        )];

        let result = check_availability(
            &bookings,
            room_id,
            stay(date(2024, 12, 22), date(2024, 12, 25)),
            None,
        );

        assert!(result.available);
        assert!(result.conflicts.is_empty());
    }

    #[test]
    fn cancelled_bookings_never_conflict() {
        let room_id = Uuid::new_v4();
        let bookings = vec![
            booking(
                room_id,
                date(2024, 12, 18),
                date(2024, 12, 22),
                BookingStatus::Cancelled,
            ),
            booking(
                room_id,
                date(2024, 12, 1),
                date(2024, 12, 31),
                BookingStatus::Cancelled,
            ),
        ];

        let result = check_availability(
            &bookings,
            room_id,
            stay(date(2024, 12, 19), date(2024, 12, 21)),
            None,
        );

        assert!(result.available);
    }

    #[test]
    fn other_rooms_never_conflict() {
        let bookings = vec![booking(
            Uuid::new_v4(),
            date(2024, 12, 18),
            date(2024, 12, 22),
            BookingStatus::Confirmed,
        )];

        let result = check_availability(
            &bookings,
            Uuid::new_v4(),
            stay(date(2024, 12, 18), date(2024, 12, 22)),
            None,
        );

        assert!(result.available);
    }

    #[test]
    fn excluding_own_id_allows_edit_without_move() {
        let room_id = Uuid::new_v4();
        let own = booking(
            room_id,
            date(2024, 12, 18),
            date(2024, 12, 22),
            BookingStatus::Confirmed,
        );
        let bookings = vec![own.clone()];

        let without = check_availability(&bookings, room_id, own.stay(), None);
        let with = check_availability(&bookings, room_id, own.stay(), Some(own.id));

        assert!(!without.available);
        assert!(with.available);
    }

    #[test]
    fn every_overlapping_booking_is_reported() {
        let room_id = Uuid::new_v4();
        let bookings = vec![
            booking(
                room_id,
                date(2024, 12, 18),
                date(2024, 12, 20),
                BookingStatus::Pending,
            ),
            booking(
                room_id,
                date(2024, 12, 21),
                date(2024, 12, 23),
                BookingStatus::Inquiry,
            ),
            booking(
                room_id,
                date(2024, 12, 23),
                date(2024, 12, 24),
                BookingStatus::Confirmed,
            ),
        ];

        let result = check_availability(
            &bookings,
            room_id,
            stay(date(2024, 12, 19), date(2024, 12, 23)),
            None,
        );

        assert!(!result.available);
        assert_eq!(result.conflicts.len(), 2);
    }

    #[test]
    fn reschedule_preserves_length_of_stay() {
        let b = booking(
            Uuid::new_v4(),
            date(2024, 12, 18),
            date(2024, 12, 22),
            BookingStatus::Confirmed,
        );

        let moved = reschedule(&b, date(2024, 12, 30)).unwrap();

        assert_eq!(moved.check_in, date(2024, 12, 30));
        assert_eq!(moved.check_out, date(2025, 1, 3));
        assert_eq!(moved.nights(), b.nights());
        assert_eq!(moved.id, b.id);
    }

    #[test]
    fn reschedule_does_not_check_destination() {
        let room_id = Uuid::new_v4();
        let blocker = booking(
            room_id,
            date(2024, 12, 24),
            date(2024, 12, 26),
            BookingStatus::Confirmed,
        );
        let b = booking(
            room_id,
            date(2024, 12, 18),
            date(2024, 12, 20),
            BookingStatus::Confirmed,
        );

        let moved = reschedule(&b, date(2024, 12, 24)).unwrap();
        let check = check_availability(
            &[blocker.clone(), b.clone()],
            room_id,
            moved.stay(),
            Some(b.id),
        );

        assert!(!check.available);
        assert_eq!(check.conflicts, vec![blocker]);
    }

    #[test]
    fn bookings_for_date_filters_by_exact_status() {
        let room_id = Uuid::new_v4();
        let day = date(2024, 12, 20);
        let confirmed = booking(
            room_id,
            date(2024, 12, 18),
            date(2024, 12, 22),
            BookingStatus::Confirmed,
        );
        let pending = booking(
            room_id,
            date(2024, 12, 19),
            date(2024, 12, 21),
            BookingStatus::Pending,
        );
        let cancelled = booking(
            room_id,
            date(2024, 12, 19),
            date(2024, 12, 21),
            BookingStatus::Cancelled,
        );
        let bookings = vec![confirmed.clone(), pending, cancelled];

        let filter = BookingFilter {
            status: Some(BookingStatus::Confirmed),
            ..BookingFilter::default()
        };
        let found = bookings_for_date(day, &bookings, &[], &filter);

        assert_eq!(found, vec![&confirmed]);
    }

    #[test]
    fn bookings_for_date_excludes_cancelled_even_when_asked_for() {
        let b = booking(
            Uuid::new_v4(),
            date(2024, 12, 18),
            date(2024, 12, 22),
            BookingStatus::Cancelled,
        );
        let filter = BookingFilter {
            status: Some(BookingStatus::Cancelled),
            ..BookingFilter::default()
        };

        let found = bookings_for_date(date(2024, 12, 20), std::slice::from_ref(&b), &[], &filter);

        assert!(found.is_empty());
    }

    #[test]
    fn bookings_for_date_keeps_input_order() {
        let room_id = Uuid::new_v4();
        let late = booking(room_id, date(2024, 12, 20), date(2024, 12, 21), BookingStatus::Pending);
        let early = booking(
            room_id,
            date(2024, 12, 10),
            date(2024, 12, 25),
            BookingStatus::Pending,
        );
        let bookings = vec![late.clone(), early.clone()];

        let found = bookings_for_date(
            date(2024, 12, 20),
            &bookings,
            &[],
            &BookingFilter::default(),
        );

        assert_eq!(found, vec![&late, &early]);
    }

    #[test]
    fn bookings_for_date_looks_up_room_type_by_reference() {
        let dorm = room(RoomType::SixBedDorm);
        let private = room(RoomType::Private);
        let day = date(2024, 12, 20);
        let in_dorm = booking(
            dorm.id,
            date(2024, 12, 19),
            date(2024, 12, 21),
            BookingStatus::Confirmed,
        );
        let in_private = booking(
            private.id,
            date(2024, 12, 19),
            date(2024, 12, 21),
            BookingStatus::Confirmed,
        );
        let orphan = booking(
            Uuid::new_v4(),
            date(2024, 12, 19),
            date(2024, 12, 21),
            BookingStatus::Confirmed,
        );
        let bookings = vec![in_dorm, in_private.clone(), orphan];
        let rooms = vec![dorm, private];

        let filter = BookingFilter {
            room_type: Some(RoomType::Private),
            ..BookingFilter::default()
        };
        let found = bookings_for_date(day, &bookings, &rooms, &filter);

        assert_eq!(found, vec![&in_private]);
    }

    #[test]
    fn bookings_for_date_filters_by_source() {
        let room_id = Uuid::new_v4();
        let mut walk_in = booking(
            room_id,
            date(2024, 12, 19),
            date(2024, 12, 21),
            BookingStatus::Confirmed,
        );
        walk_in.source = BookingSource::WalkIn;
        let direct = booking(
            room_id,
            date(2024, 12, 19),
            date(2024, 12, 21),
            BookingStatus::Confirmed,
        );
        let bookings = vec![direct, walk_in.clone()];

        let filter = BookingFilter {
            source: Some(BookingSource::WalkIn),
            ..BookingFilter::default()
        };
        let found = bookings_for_date(date(2024, 12, 19), &bookings, &[], &filter);

        assert_eq!(found, vec![&walk_in]);
    }

    #[test]
    fn range_query_orders_by_check_in() {
        let room_id = Uuid::new_v4();
        let late = booking(room_id, date(2024, 12, 24), date(2024, 12, 26), BookingStatus::Pending);
        let early = booking(
            room_id,
            date(2024, 12, 18),
            date(2024, 12, 21),
            BookingStatus::Cancelled,
        );
        let outside = booking(
            room_id,
            date(2025, 1, 5),
            date(2025, 1, 7),
            BookingStatus::Confirmed,
        );
        let bookings = vec![late.clone(), outside, early.clone()];

        let found = bookings_in_range(&bookings, date(2024, 12, 20), date(2024, 12, 31));

        assert_eq!(found, vec![&early, &late]);
    }

    #[test]
    fn range_query_includes_both_end_days() {
        let room_id = Uuid::new_v4();
        let arrives_on_last_day = booking(
            room_id,
            date(2024, 12, 22),
            date(2024, 12, 23),
            BookingStatus::Confirmed,
        );
        let leaves_on_first_day = booking(
            room_id,
            date(2024, 12, 18),
            date(2024, 12, 20),
            BookingStatus::Confirmed,
        );
        let last_night_on_first_day = booking(
            room_id,
            date(2024, 12, 19),
            date(2024, 12, 21),
            BookingStatus::Confirmed,
        );
        let bookings = vec![
            arrives_on_last_day.clone(),
            leaves_on_first_day,
            last_night_on_first_day.clone(),
        ];

        let found = bookings_in_range(&bookings, date(2024, 12, 20), date(2024, 12, 22));

        assert_eq!(found, vec![&last_night_on_first_day, &arrives_on_last_day]);
    }
}
