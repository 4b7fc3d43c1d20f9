//! In-memory store: plain vectors behind `RefCell`s.
//!
//! Nothing is persisted. Used for tests and for wiring the desk without a
//! database file.

use std::cell::RefCell;

use uuid::Uuid;

use crate::model::{Booking, Guest, MaintenanceRequest, Room};

use super::{
    BookingRepository, GuestRepository, MaintenanceRepository, Record, Result, RoomRepository,
    StoreError,
};

#[derive(Debug, Default)]
pub struct MemoryStore {
    bookings: RefCell<Vec<Booking>>,
    rooms: RefCell<Vec<Room>>,
    guests: RefCell<Vec<Guest>>,
    maintenance: RefCell<Vec<MaintenanceRequest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn insert<T: Record>(table: &RefCell<Vec<T>>, record: &T) -> Result<()> {
    let mut rows = table.borrow_mut();
    if rows.iter().any(|r| r.id() == record.id()) {
        return Err(StoreError::AlreadyExists {
            entity: T::ENTITY,
            id: record.id(),
        });
    }
    rows.push(record.clone());
    Ok(())
}

fn get<T: Record>(table: &RefCell<Vec<T>>, id: Uuid) -> Option<T> {
    table.borrow().iter().find(|r| r.id() == id).cloned()
}

fn replace<T: Record>(table: &RefCell<Vec<T>>, record: &T) -> Result<()> {
    let mut rows = table.borrow_mut();
    let slot = rows
        .iter_mut()
        .find(|r| r.id() == record.id())
        .ok_or(StoreError::NotFound {
            entity: T::ENTITY,
            id: record.id(),
        })?;
    *slot = record.clone();
    Ok(())
}

fn remove<T: Record>(table: &RefCell<Vec<T>>, id: Uuid) -> Result<()> {
    let mut rows = table.borrow_mut();
    let index = rows
        .iter()
        .position(|r| r.id() == id)
        .ok_or(StoreError::NotFound {
            entity: T::ENTITY,
            id,
        })?;
    rows.remove(index);
    Ok(())
}

impl BookingRepository for MemoryStore {
    fn create_booking(&self, booking: &Booking) -> Result<()> {
        insert(&self.bookings, booking)
    }

    fn get_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        Ok(get(&self.bookings, id))
    }

    fn list_bookings(&self) -> Result<Vec<Booking>> {
        Ok(self.bookings.borrow().clone())
    }

    fn update_booking(&self, booking: &Booking) -> Result<()> {
        replace(&self.bookings, booking)
    }

    fn delete_booking(&self, id: Uuid) -> Result<()> {
        remove::<Booking>(&self.bookings, id)
    }
}

impl RoomRepository for MemoryStore {
    fn create_room(&self, room: &Room) -> Result<()> {
        insert(&self.rooms, room)
    }

    fn get_room(&self, id: Uuid) -> Result<Option<Room>> {
        Ok(get(&self.rooms, id))
    }

    fn list_rooms(&self) -> Result<Vec<Room>> {
        Ok(self.rooms.borrow().clone())
    }

    fn update_room(&self, room: &Room) -> Result<()> {
        replace(&self.rooms, room)
    }

    fn delete_room(&self, id: Uuid) -> Result<()> {
        remove::<Room>(&self.rooms, id)
    }
}

impl GuestRepository for MemoryStore {
    fn create_guest(&self, guest: &Guest) -> Result<()> {
        insert(&self.guests, guest)
    }

    fn get_guest(&self, id: Uuid) -> Result<Option<Guest>> {
        Ok(get(&self.guests, id))
    }

    fn list_guests(&self) -> Result<Vec<Guest>> {
        Ok(self.guests.borrow().clone())
    }

    fn update_guest(&self, guest: &Guest) -> Result<()> {
        replace(&self.guests, guest)
    }

    fn delete_guest(&self, id: Uuid) -> Result<()> {
        remove::<Guest>(&self.guests, id)
    }
}

impl MaintenanceRepository for MemoryStore {
    fn create_maintenance(&self, request: &MaintenanceRequest) -> Result<()> {
        insert(&self.maintenance, request)
    }

    fn get_maintenance(&self, id: Uuid) -> Result<Option<MaintenanceRequest>> {
        Ok(get(&self.maintenance, id))
    }

    fn list_maintenance(&self) -> Result<Vec<MaintenanceRequest>> {
        Ok(self.maintenance.borrow().clone())
    }

    fn update_maintenance(&self, request: &MaintenanceRequest) -> Result<()> {
        replace(&self.maintenance, request)
    }

    fn delete_maintenance(&self, id: Uuid) -> Result<()> {
        remove::<MaintenanceRequest>(&self.maintenance, id)
    }
}
