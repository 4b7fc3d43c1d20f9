//! Repositories for hostel records.
//!
//! Each entity has its own repository trait with explicit create, read,
//! update, and delete contracts:
//!
//! - `create_*` fails with [`StoreError::AlreadyExists`] if the id is taken.
//! - `get_*` returns `Ok(None)` for an unknown id.
//! - `list_*` returns records in insertion order.
//! - `update_*` and `delete_*` fail with [`StoreError::NotFound`] for an unknown id.
//!
//! Writes are last-write-wins. Two backends implement every trait:
//! [`MemoryStore`] and [`SqliteStore`].

mod memory;
mod sqlite;

use std::io;

use uuid::Uuid;

use crate::model::{Booking, Guest, MaintenanceRequest, Room};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: Uuid },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt record: {0}")]
    Corrupt(String),
}

pub type Result<T> = core::result::Result<T, StoreError>;

/// A stored record with a stable id.
pub trait Record: Clone {
    /// Entity name used in error messages.
    const ENTITY: &'static str;

    fn id(&self) -> Uuid;
}

impl Record for Booking {
    const ENTITY: &'static str = "booking";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Room {
    const ENTITY: &'static str = "room";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Guest {
    const ENTITY: &'static str = "guest";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for MaintenanceRequest {
    const ENTITY: &'static str = "maintenance request";

    fn id(&self) -> Uuid {
        self.id
    }
}

pub trait BookingRepository {
    fn create_booking(&self, booking: &Booking) -> Result<()>;
    fn get_booking(&self, id: Uuid) -> Result<Option<Booking>>;
    fn list_bookings(&self) -> Result<Vec<Booking>>;
    fn update_booking(&self, booking: &Booking) -> Result<()>;
    fn delete_booking(&self, id: Uuid) -> Result<()>;

    /// Bookings on one room, in insertion order.
    fn list_bookings_for_room(&self, room_id: Uuid) -> Result<Vec<Booking>> {
        let mut bookings = self.list_bookings()?;
        bookings.retain(|b| b.room_id == room_id);
        Ok(bookings)
    }
}

pub trait RoomRepository {
    fn create_room(&self, room: &Room) -> Result<()>;
    fn get_room(&self, id: Uuid) -> Result<Option<Room>>;
    fn list_rooms(&self) -> Result<Vec<Room>>;
    fn update_room(&self, room: &Room) -> Result<()>;
    fn delete_room(&self, id: Uuid) -> Result<()>;

    fn find_room_by_number(&self, number: &str) -> Result<Option<Room>> {
        Ok(self.list_rooms()?.into_iter().find(|r| r.number == number))
    }
}

pub trait GuestRepository {
    fn create_guest(&self, guest: &Guest) -> Result<()>;
    fn get_guest(&self, id: Uuid) -> Result<Option<Guest>>;
    fn list_guests(&self) -> Result<Vec<Guest>>;
    fn update_guest(&self, guest: &Guest) -> Result<()>;
    fn delete_guest(&self, id: Uuid) -> Result<()>;
}

pub trait MaintenanceRepository {
    fn create_maintenance(&self, request: &MaintenanceRequest) -> Result<()>;
    fn get_maintenance(&self, id: Uuid) -> Result<Option<MaintenanceRequest>>;
    fn list_maintenance(&self) -> Result<Vec<MaintenanceRequest>>;
    fn update_maintenance(&self, request: &MaintenanceRequest) -> Result<()>;
    fn delete_maintenance(&self, id: Uuid) -> Result<()>;
}

/// Everything the booking desk needs from a backend.
pub trait Store: BookingRepository + RoomRepository + GuestRepository + MaintenanceRepository {}

impl<T> Store for T where
    T: BookingRepository + RoomRepository + GuestRepository + MaintenanceRepository
{
}

#[cfg(test)]
mod contract_tests {
    //! The same contract run against both backends.

    use super::*;

    use jiff::{Timestamp, civil::date};
    use tempfile::TempDir;

    use crate::model::{
        Amount, BathroomType, BookingSource, BookingStatus, Category, GuestStatus,
        MaintenanceStatus, Pricing, Priority, RoomStatus, RoomType,
    };

    fn backends() -> (TempDir, Vec<(&'static str, Box<dyn Store>)>) {
        let dir = TempDir::new().unwrap();
        let sqlite = SqliteStore::open(dir.path().join("hostel.sqlite")).unwrap();
        let stores: Vec<(&'static str, Box<dyn Store>)> = vec![
            ("memory", Box::new(MemoryStore::new())),
            ("sqlite", Box::new(sqlite)),
        ];
        (dir, stores)
    }

    fn sample_room(number: &str) -> Room {
        Room {
            id: Uuid::new_v4(),
            number: number.into(),
            room_type: RoomType::EightBedDorm,
            bed_count: 8,
            max_occupancy: 8,
            current_occupants: 2,
            status: RoomStatus::Occupied,
            amenities: vec!["Lockers".into(), "Reading lights".into()],
            bathroom: BathroomType::Ensuite,
            window_view: "Street".into(),
            pricing: Pricing {
                base_rate_per_bed: Amount::from_cents(2_250),
                private_room_rate: Amount::from_cents(9_000),
                seasonal_adjustment_pct: -10,
            },
            last_updated: Timestamp::new(1_734_000_000, 0).unwrap(),
        }
    }

    fn sample_guest() -> Guest {
        Guest {
            id: Uuid::new_v4(),
            name: "Ana Silva".into(),
            email: "ana@example.com".into(),
            phone: "+351 900 000 000".into(),
            nationality: "Portugal".into(),
            status: GuestStatus::Reserved,
            created_at: Timestamp::new(1_734_000_000, 0).unwrap(),
        }
    }

    fn sample_booking(room_id: Uuid, guest_id: Uuid) -> Booking {
        Booking {
            id: Uuid::new_v4(),
            guest_id,
            room_id,
            check_in: date(2024, 12, 18),
            check_out: date(2024, 12, 22),
            status: BookingStatus::Confirmed,
            source: BookingSource::Online,
            total_amount: Amount::from_cents(20_000),
            notes: "Early check-in requested".into(),
            created_at: Timestamp::new(1_734_256_800, 0).unwrap(),
            updated_at: Timestamp::new(1_734_256_800, 0).unwrap(),
        }
    }

    fn sample_request(room_id: Uuid) -> MaintenanceRequest {
        MaintenanceRequest {
            id: Uuid::new_v4(),
            room_id,
            title: "Leaking tap".into(),
            description: "Bathroom tap drips overnight".into(),
            priority: Priority::High,
            status: MaintenanceStatus::Scheduled,
            category: Category::Plumbing,
            assigned_staff: Some("Marco".into()),
            reported_by: "Front desk".into(),
            reported_at: Timestamp::new(1_734_000_000, 0).unwrap(),
            scheduled_date: Some(date(2024, 12, 19)),
            completed_date: None,
            estimated_cost: Some(Amount::from_cents(4_500)),
            actual_cost: None,
            notes: String::new(),
        }
    }

    #[test]
    fn room_round_trips_every_field() {
        let (_dir, stores) = backends();
        for (name, store) in &stores {
            let room = sample_room("101");
            store.create_room(&room).unwrap();
            assert_eq!(store.get_room(room.id).unwrap(), Some(room.clone()), "{name}");
            assert_eq!(
                store.find_room_by_number("101").unwrap().map(|r| r.id),
                Some(room.id),
                "{name}"
            );
        }
    }

    #[test]
    fn booking_round_trips_and_lists_in_insertion_order() {
        let (_dir, stores) = backends();
        for (name, store) in &stores {
            let room = Uuid::new_v4();
            let guest = Uuid::new_v4();
            let mut later = sample_booking(room, guest);
            later.check_in = date(2025, 1, 10);
            later.check_out = date(2025, 1, 15);
            let earlier = sample_booking(room, guest);

            store.create_booking(&later).unwrap();
            store.create_booking(&earlier).unwrap();

            let ids: Vec<Uuid> = store.list_bookings().unwrap().iter().map(|b| b.id).collect();
            assert_eq!(ids, vec![later.id, earlier.id], "{name}");
            assert_eq!(store.get_booking(earlier.id).unwrap(), Some(earlier), "{name}");
        }
    }

    #[test]
    fn update_keeps_position_in_listing() {
        let (_dir, stores) = backends();
        for (name, store) in &stores {
            let first = sample_booking(Uuid::new_v4(), Uuid::new_v4());
            let second = sample_booking(Uuid::new_v4(), Uuid::new_v4());
            store.create_booking(&first).unwrap();
            store.create_booking(&second).unwrap();

            let mut edited = first.clone();
            edited.status = BookingStatus::Cancelled;
            edited.notes = "Guest called to cancel".into();
            store.update_booking(&edited).unwrap();

            let listed = store.list_bookings().unwrap();
            assert_eq!(listed[0], edited, "{name}");
            assert_eq!(listed[1], second, "{name}");
        }
    }

    #[test]
    fn duplicate_create_fails() {
        let (_dir, stores) = backends();
        for (name, store) in &stores {
            let guest = sample_guest();
            store.create_guest(&guest).unwrap();
            let err = store.create_guest(&guest).unwrap_err();
            assert!(matches!(err, StoreError::AlreadyExists { .. }), "{name}");
        }
    }

    #[test]
    fn unknown_ids_read_as_none_and_fail_to_write() {
        let (_dir, stores) = backends();
        for (name, store) in &stores {
            let booking = sample_booking(Uuid::new_v4(), Uuid::new_v4());

            assert_eq!(store.get_booking(booking.id).unwrap(), None, "{name}");
            assert!(
                matches!(
                    store.update_booking(&booking).unwrap_err(),
                    StoreError::NotFound { entity: "booking", .. }
                ),
                "{name}"
            );
            assert!(
                matches!(
                    store.delete_booking(booking.id).unwrap_err(),
                    StoreError::NotFound { .. }
                ),
                "{name}"
            );
        }
    }

    #[test]
    fn delete_removes_record() {
        let (_dir, stores) = backends();
        for (name, store) in &stores {
            let room = sample_room("202");
            let request = sample_request(room.id);
            store.create_maintenance(&request).unwrap();

            store.delete_maintenance(request.id).unwrap();

            assert!(store.list_maintenance().unwrap().is_empty(), "{name}");
        }
    }

    #[test]
    fn maintenance_round_trips_optional_fields() {
        let (_dir, stores) = backends();
        for (name, store) in &stores {
            let mut request = sample_request(Uuid::new_v4());
            store.create_maintenance(&request).unwrap();

            request.status = MaintenanceStatus::Completed;
            request.completed_date = Some(date(2024, 12, 20));
            request.actual_cost = Some(Amount::from_cents(3_990));
            request.assigned_staff = None;
            store.update_maintenance(&request).unwrap();

            assert_eq!(store.get_maintenance(request.id).unwrap(), Some(request), "{name}");
        }
    }

    #[test]
    fn bookings_for_room_filters_by_room() {
        let (_dir, stores) = backends();
        for (name, store) in &stores {
            let room = Uuid::new_v4();
            let mine = sample_booking(room, Uuid::new_v4());
            let other = sample_booking(Uuid::new_v4(), Uuid::new_v4());
            store.create_booking(&mine).unwrap();
            store.create_booking(&other).unwrap();

            assert_eq!(store.list_bookings_for_room(room).unwrap(), vec![mine], "{name}");
        }
    }
}
