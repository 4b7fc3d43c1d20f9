//! Per-day occupancy for calendar rendering.

use jiff::{ToSpan, civil::Date};
use serde::Serialize;
use uuid::Uuid;

use crate::availability::{BookingFilter, bookings_for_date};
use crate::model::{Booking, Room};

/// One calendar cell: a date and the bookings occupying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: Date,
    pub bookings: Vec<Booking>,
}

impl CalendarDay {
    /// Distinct rooms occupied on this day.
    pub fn occupied_rooms(&self) -> usize {
        let mut rooms: Vec<Uuid> = self.bookings.iter().map(|b| b.room_id).collect();
        rooms.sort_unstable();
        rooms.dedup();
        rooms.len()
    }
}

/// `days` consecutive dates starting at `start`.
pub fn window(start: Date, days: u32) -> impl Iterator<Item = Date> {
    start.series(1.day()).take(days as usize)
}

/// Buckets bookings into one [`CalendarDay`] per date in the window.
pub fn occupancy_grid(
    start: Date,
    days: u32,
    bookings: &[Booking],
    rooms: &[Room],
    filter: &BookingFilter,
) -> Vec<CalendarDay> {
    window(start, days)
        .map(|date| CalendarDay {
            date,
            bookings: bookings_for_date(date, bookings, rooms, filter)
                .into_iter()
                .cloned()
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::{Timestamp, civil::date};

    use crate::model::{Amount, BookingSource, BookingStatus};

    fn booking(room_id: Uuid, check_in: Date, check_out: Date) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            guest_id: Uuid::new_v4(),
            room_id,
            check_in,
            check_out,
            status: BookingStatus::Confirmed,
            source: BookingSource::Direct,
            total_amount: Amount::ZERO,
            notes: String::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn window_crosses_year_end() {
        let dates: Vec<Date> = window(date(2024, 12, 30), 4).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 12, 30),
                date(2024, 12, 31),
                date(2025, 1, 1),
                date(2025, 1, 2),
            ]
        );
    }

    #[test]
    fn grid_buckets_each_night_of_a_stay() {
        let room = Uuid::new_v4();
        let stay = booking(room, date(2024, 12, 18), date(2024, 12, 20));

        let grid = occupancy_grid(
            date(2024, 12, 17),
            4,
            std::slice::from_ref(&stay),
            &[],
            &BookingFilter::default(),
        );

        let counts: Vec<usize> = grid.iter().map(|d| d.bookings.len()).collect();
        assert_eq!(counts, vec![0, 1, 1, 0]);
    }

    #[test]
    fn occupied_rooms_counts_distinct_rooms() {
        let room = Uuid::new_v4();
        let day = CalendarDay {
            date: date(2024, 12, 20),
            bookings: vec![
                booking(room, date(2024, 12, 19), date(2024, 12, 21)),
                booking(room, date(2024, 12, 20), date(2024, 12, 22)),
                booking(Uuid::new_v4(), date(2024, 12, 20), date(2024, 12, 22)),
            ],
        };
        assert_eq!(day.occupied_rooms(), 2);
    }

    #[test]
    fn empty_window_yields_no_days() {
        let grid = occupancy_grid(date(2024, 12, 1), 0, &[], &[], &BookingFilter::default());
        assert!(grid.is_empty());
    }
}
