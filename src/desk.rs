//! The booking desk: validated entry points over a store.
//!
//! Every mutation is checked here before it reaches the store: date
//! ordering, referenced rooms and guests, lifecycle moves, and room
//! availability. The overlap math itself lives in [`crate::availability`].

use jiff::{Timestamp, Zoned, civil::Date};
use tracing::{info, warn};
use uuid::Uuid;

use crate::availability::{
    Availability, BookingFilter, bookings_for_date, bookings_in_range, check_availability,
    reschedule,
};
use crate::calendar::{CalendarDay, occupancy_grid};
use crate::error::{DeskError, Result};
use crate::model::{
    Amount, BathroomType, Booking, BookingSource, BookingStatus, Category, Guest, GuestStatus,
    MaintenanceRequest, MaintenanceStatus, Pricing, Priority, Room, RoomStatus, RoomType, Stay,
};
use crate::store::{Record, Store};

/// Desk behavior switches.
#[derive(Debug, Clone, Copy)]
pub struct DeskOptions {
    /// Reject a move onto dates already taken, instead of committing it
    /// and reporting the overlap.
    pub strict_reschedule: bool,
}

impl Default for DeskOptions {
    fn default() -> Self {
        Self {
            strict_reschedule: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewRoom {
    pub number: String,
    pub room_type: RoomType,
    pub bed_count: u32,
    pub max_occupancy: u32,
    pub amenities: Vec<String>,
    pub bathroom: BathroomType,
    pub window_view: String,
    pub pricing: Pricing,
}

#[derive(Debug, Clone, Default)]
pub struct NewGuest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
}

#[derive(Debug, Clone)]
pub struct NewBooking {
    pub guest_id: Uuid,
    pub room_id: Uuid,
    pub check_in: Date,
    pub check_out: Date,
    pub status: BookingStatus,
    pub source: BookingSource,

    /// Quoted from the room's nightly rate when absent.
    pub total_amount: Option<Amount>,

    pub notes: String,
}

/// Fields to change on an existing booking. `None` leaves a field alone.
///
/// Status is not editable here; use [`Desk::set_booking_status`].
#[derive(Debug, Clone, Default)]
pub struct BookingPatch {
    pub guest_id: Option<Uuid>,
    pub room_id: Option<Uuid>,
    pub check_in: Option<Date>,
    pub check_out: Option<Date>,
    pub source: Option<BookingSource>,
    pub total_amount: Option<Amount>,
    pub notes: Option<String>,
}

/// A committed move, with any bookings it now overlaps.
///
/// `conflicts` is only ever non-empty when strict rescheduling is off.
#[derive(Debug, Clone)]
pub struct Rescheduled {
    pub booking: Booking,
    pub conflicts: Vec<Booking>,
}

#[derive(Debug, Clone)]
pub struct NewMaintenance {
    pub room_id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: Category,
    pub assigned_staff: Option<String>,
    pub reported_by: String,
    pub scheduled_date: Option<Date>,
    pub estimated_cost: Option<Amount>,
    pub notes: String,
}

/// Validated operations over a [`Store`].
pub struct Desk<'a, S> {
    store: &'a S,
    options: DeskOptions,
    today: Date,
}

fn not_found<T: Record>(id: Uuid) -> DeskError {
    DeskError::NotFound {
        entity: T::ENTITY,
        id: id.to_string(),
    }
}

fn short(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

impl<'a, S: Store> Desk<'a, S> {
    pub fn new(store: &'a S, options: DeskOptions) -> Self {
        Self {
            store,
            options,
            today: Zoned::now().date(),
        }
    }

    /// Pins "today", which otherwise comes from the system clock.
    #[must_use]
    pub fn with_today(mut self, today: Date) -> Self {
        self.today = today;
        self
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn store(&self) -> &'a S {
        self.store
    }

    // ── Rooms ──

    pub fn add_room(&self, new: NewRoom) -> Result<Room> {
        let number = new.number.trim().to_string();
        if number.is_empty() {
            return Err(DeskError::validation("room number is required"));
        }
        if new.bed_count == 0 {
            return Err(DeskError::validation("a room needs at least one bed"));
        }
        if new.max_occupancy == 0 {
            return Err(DeskError::validation("max occupancy must be at least 1"));
        }
        if self.store.find_room_by_number(&number)?.is_some() {
            return Err(DeskError::validation(format!(
                "room {number} already exists"
            )));
        }

        let room = Room {
            id: Uuid::new_v4(),
            number,
            room_type: new.room_type,
            bed_count: new.bed_count,
            max_occupancy: new.max_occupancy,
            current_occupants: 0,
            status: RoomStatus::Available,
            amenities: new.amenities,
            bathroom: new.bathroom,
            window_view: new.window_view,
            pricing: new.pricing,
            last_updated: Timestamp::now(),
        };
        self.store.create_room(&room)?;
        info!(room = %room.number, id = %room.id, "room added");
        Ok(room)
    }

    pub fn room(&self, id: Uuid) -> Result<Room> {
        self.store
            .get_room(id)?
            .ok_or_else(|| not_found::<Room>(id))
    }

    pub fn rooms(&self) -> Result<Vec<Room>> {
        Ok(self.store.list_rooms()?)
    }

    /// Sets the staff-maintained status. Bookings are not consulted.
    pub fn set_room_status(&self, id: Uuid, status: RoomStatus) -> Result<Room> {
        let mut room = self.room(id)?;
        room.status = status;
        room.last_updated = Timestamp::now();
        self.store.update_room(&room)?;
        info!(room = %room.number, %status, "room status set");
        Ok(room)
    }

    /// Records how many people are in the room, flipping it between
    /// `occupied` and `available`.
    pub fn set_occupants(&self, id: Uuid, count: u32) -> Result<Room> {
        let mut room = self.room(id)?;
        if count > room.max_occupancy {
            return Err(DeskError::validation(format!(
                "room {} holds at most {} people",
                room.number, room.max_occupancy
            )));
        }
        room.current_occupants = count;
        room.status = if count > 0 {
            RoomStatus::Occupied
        } else {
            RoomStatus::Available
        };
        room.last_updated = Timestamp::now();
        self.store.update_room(&room)?;
        info!(room = %room.number, count, "occupants recorded");
        Ok(room)
    }

    /// Administrative delete. Refused while the room has upcoming or
    /// current active bookings.
    pub fn delete_room(&self, id: Uuid) -> Result<()> {
        let room = self.room(id)?;
        let pending = self
            .store
            .list_bookings_for_room(id)?
            .into_iter()
            .filter(|b| b.is_active() && b.check_out > self.today)
            .count();
        if pending > 0 {
            return Err(DeskError::validation(format!(
                "room {} still has {pending} active booking(s); cancel them first",
                room.number
            )));
        }
        self.store.delete_room(id)?;
        info!(room = %room.number, "room deleted");
        Ok(())
    }

    // ── Guests ──

    pub fn add_guest(&self, new: NewGuest) -> Result<Guest> {
        let name = new.name.trim().to_string();
        if name.is_empty() {
            return Err(DeskError::validation("guest name is required"));
        }
        let email = new.email.trim().to_string();
        if !email.is_empty() && !email.contains('@') {
            return Err(DeskError::validation(format!(
                "'{email}' is not an email address"
            )));
        }

        let guest = Guest {
            id: Uuid::new_v4(),
            name,
            email,
            phone: new.phone.trim().to_string(),
            nationality: new.nationality.trim().to_string(),
            status: GuestStatus::Reserved,
            created_at: Timestamp::now(),
        };
        self.store.create_guest(&guest)?;
        info!(id = %guest.id, "guest added");
        Ok(guest)
    }

    pub fn guest(&self, id: Uuid) -> Result<Guest> {
        self.store
            .get_guest(id)?
            .ok_or_else(|| not_found::<Guest>(id))
    }

    pub fn guests(&self) -> Result<Vec<Guest>> {
        Ok(self.store.list_guests()?)
    }

    pub fn check_in_guest(&self, id: Uuid) -> Result<Guest> {
        let mut guest = self.guest(id)?;
        if guest.status == GuestStatus::CheckedIn {
            return Err(DeskError::validation(format!(
                "{} is already checked in",
                guest.name
            )));
        }
        guest.status = GuestStatus::CheckedIn;
        self.store.update_guest(&guest)?;
        info!(id = %guest.id, "guest checked in");
        Ok(guest)
    }

    pub fn check_out_guest(&self, id: Uuid) -> Result<Guest> {
        let mut guest = self.guest(id)?;
        if guest.status != GuestStatus::CheckedIn {
            return Err(DeskError::validation(format!(
                "{} is not checked in",
                guest.name
            )));
        }
        guest.status = GuestStatus::CheckedOut;
        self.store.update_guest(&guest)?;
        info!(id = %guest.id, "guest checked out");
        Ok(guest)
    }

    /// Administrative delete. Refused while the guest has upcoming or
    /// current active bookings.
    pub fn delete_guest(&self, id: Uuid) -> Result<()> {
        let guest = self.guest(id)?;
        let pending = self
            .store
            .list_bookings()?
            .into_iter()
            .filter(|b| b.guest_id == id && b.is_active() && b.check_out > self.today)
            .count();
        if pending > 0 {
            return Err(DeskError::validation(format!(
                "{} still has {pending} active booking(s); cancel them first",
                guest.name
            )));
        }
        self.store.delete_guest(id)?;
        info!(%id, "guest deleted");
        Ok(())
    }

    // ── Bookings ──

    /// Creates a booking after validating dates, references, the initial
    /// status, and room availability.
    pub fn create_booking(&self, new: NewBooking) -> Result<Booking> {
        let stay = Stay::new(new.check_in, new.check_out)?;
        if !new.status.is_initial() {
            return Err(DeskError::validation(format!(
                "new bookings start as inquiry or pending, not {}",
                new.status
            )));
        }
        self.guest(new.guest_id)?;
        let room = self.room(new.room_id)?;
        self.ensure_available(room.id, stay, None)?;

        let now = Timestamp::now();
        let booking = Booking {
            id: Uuid::new_v4(),
            guest_id: new.guest_id,
            room_id: room.id,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            status: new.status,
            source: new.source,
            total_amount: new.total_amount.unwrap_or_else(|| quote(&room, stay)),
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };
        self.store.create_booking(&booking)?;
        info!(
            id = %booking.id,
            room = %room.number,
            check_in = %booking.check_in,
            check_out = %booking.check_out,
            "booking created"
        );
        Ok(booking)
    }

    pub fn booking(&self, id: Uuid) -> Result<Booking> {
        self.store
            .get_booking(id)?
            .ok_or_else(|| not_found::<Booking>(id))
    }

    pub fn bookings(&self) -> Result<Vec<Booking>> {
        Ok(self.store.list_bookings()?)
    }

    /// Bookings with a night between `from` and `to` inclusive, by check-in.
    pub fn bookings_between(&self, from: Date, to: Date) -> Result<Vec<Booking>> {
        if to < from {
            return Err(DeskError::validation(format!(
                "range end {to} is before its start {from}"
            )));
        }
        let bookings = self.store.list_bookings()?;
        Ok(bookings_in_range(&bookings, from, to)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Quotes the price of a stay from the room's seasonal nightly rate.
    pub fn quote(&self, room_id: Uuid, check_in: Date, check_out: Date) -> Result<Amount> {
        let stay = Stay::new(check_in, check_out)?;
        let room = self.room(room_id)?;
        Ok(quote(&room, stay))
    }

    /// Checks whether a room is free for a stay.
    ///
    /// `exclude` names a booking to ignore, so an edit can be checked
    /// against everything except itself.
    pub fn check_availability(
        &self,
        room_id: Uuid,
        check_in: Date,
        check_out: Date,
        exclude: Option<Uuid>,
    ) -> Result<Availability> {
        let stay = Stay::new(check_in, check_out)?;
        self.room(room_id)?;
        self.availability(room_id, stay, exclude)
    }

    /// Applies a patch. Active bookings are re-checked for availability
    /// against everything except themselves.
    pub fn update_booking(&self, id: Uuid, patch: BookingPatch) -> Result<Booking> {
        let mut booking = self.booking(id)?;

        if let Some(guest_id) = patch.guest_id {
            self.guest(guest_id)?;
            booking.guest_id = guest_id;
        }
        if let Some(room_id) = patch.room_id {
            self.room(room_id)?;
            booking.room_id = room_id;
        }
        if let Some(check_in) = patch.check_in {
            booking.check_in = check_in;
        }
        if let Some(check_out) = patch.check_out {
            booking.check_out = check_out;
        }

        let stay = Stay::new(booking.check_in, booking.check_out)?;
        if booking.is_active() {
            self.ensure_available(booking.room_id, stay, Some(id))?;
        }

        if let Some(source) = patch.source {
            booking.source = source;
        }
        if let Some(amount) = patch.total_amount {
            booking.total_amount = amount;
        }
        if let Some(notes) = patch.notes {
            booking.notes = notes;
        }
        booking.updated_at = Timestamp::now();

        self.store.update_booking(&booking)?;
        info!(id = %booking.id, "booking updated");
        Ok(booking)
    }

    /// Moves a booking to a new check-in date, keeping its length of stay.
    ///
    /// With strict rescheduling a move onto taken dates is rejected with
    /// [`DeskError::Conflict`]. Otherwise it is committed and the overlapping
    /// bookings are returned alongside.
    pub fn reschedule_booking(&self, id: Uuid, new_check_in: Date) -> Result<Rescheduled> {
        let current = self.booking(id)?;
        if !current.is_active() {
            return Err(DeskError::validation(format!(
                "booking {} is cancelled and cannot be moved",
                short(id)
            )));
        }

        let mut moved = reschedule(&current, new_check_in).map_err(|e| {
            DeskError::validation(format!("cannot move booking to {new_check_in}: {e}"))
        })?;
        let stay = Stay::new(moved.check_in, moved.check_out)?;

        let availability = self.availability(moved.room_id, stay, Some(id))?;
        if !availability.available {
            if self.options.strict_reschedule {
                warn!(
                    id = %id,
                    conflicts = availability.conflicts.len(),
                    "move rejected: dates taken"
                );
                return Err(DeskError::Conflict {
                    conflicts: availability.conflicts,
                });
            }
            warn!(
                id = %id,
                conflicts = availability.conflicts.len(),
                "booking moved onto occupied dates"
            );
        }

        moved.updated_at = Timestamp::now();
        self.store.update_booking(&moved)?;
        info!(
            id = %moved.id,
            from = %current.check_in,
            to = %moved.check_in,
            "booking moved"
        );
        Ok(Rescheduled {
            booking: moved,
            conflicts: availability.conflicts,
        })
    }

    /// Moves a booking along its lifecycle. Setting the current status is a no-op.
    pub fn set_booking_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking> {
        let mut booking = self.booking(id)?;
        if booking.status == status {
            return Ok(booking);
        }
        if !booking.status.can_transition_to(status) {
            return Err(DeskError::validation(format!(
                "cannot move booking {} from {} to {status}",
                short(id),
                booking.status
            )));
        }

        booking.status = status;
        booking.updated_at = Timestamp::now();
        self.store.update_booking(&booking)?;
        info!(id = %booking.id, %status, "booking status changed");
        Ok(booking)
    }

    /// Cancels a booking. It stays on record but no longer blocks the room.
    pub fn cancel_booking(&self, id: Uuid) -> Result<Booking> {
        self.set_booking_status(id, BookingStatus::Cancelled)
    }

    /// Administrative hard delete.
    pub fn delete_booking(&self, id: Uuid) -> Result<()> {
        self.store.delete_booking(id)?;
        info!(%id, "booking deleted");
        Ok(())
    }

    // ── Calendar ──

    /// Active bookings occupying `date`, in booking order.
    pub fn day_view(&self, date: Date, filter: &BookingFilter) -> Result<Vec<Booking>> {
        let bookings = self.store.list_bookings()?;
        let rooms = self.store.list_rooms()?;
        Ok(bookings_for_date(date, &bookings, &rooms, filter)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn calendar(
        &self,
        start: Date,
        days: u32,
        filter: &BookingFilter,
    ) -> Result<Vec<CalendarDay>> {
        let bookings = self.store.list_bookings()?;
        let rooms = self.store.list_rooms()?;
        Ok(occupancy_grid(start, days, &bookings, &rooms, filter))
    }

    // ── Maintenance ──

    pub fn report_maintenance(&self, new: NewMaintenance) -> Result<MaintenanceRequest> {
        let title = new.title.trim().to_string();
        if title.is_empty() {
            return Err(DeskError::validation("maintenance title is required"));
        }
        let room = self.room(new.room_id)?;

        let request = MaintenanceRequest {
            id: Uuid::new_v4(),
            room_id: room.id,
            title,
            description: new.description,
            priority: new.priority,
            status: if new.scheduled_date.is_some() {
                MaintenanceStatus::Scheduled
            } else {
                MaintenanceStatus::Pending
            },
            category: new.category,
            assigned_staff: new.assigned_staff,
            reported_by: new.reported_by,
            reported_at: Timestamp::now(),
            scheduled_date: new.scheduled_date,
            completed_date: None,
            estimated_cost: new.estimated_cost,
            actual_cost: None,
            notes: new.notes,
        };
        self.store.create_maintenance(&request)?;
        info!(
            id = %request.id,
            room = %room.number,
            priority = %request.priority,
            "maintenance reported"
        );
        Ok(request)
    }

    pub fn maintenance_request(&self, id: Uuid) -> Result<MaintenanceRequest> {
        self.store
            .get_maintenance(id)?
            .ok_or_else(|| not_found::<MaintenanceRequest>(id))
    }

    pub fn maintenance_requests(&self) -> Result<Vec<MaintenanceRequest>> {
        Ok(self.store.list_maintenance()?)
    }

    /// Moves a request to `status`.
    ///
    /// Completing stamps `completed_on`, or today when none is given.
    /// Reopening clears the completion date.
    pub fn set_maintenance_status(
        &self,
        id: Uuid,
        status: MaintenanceStatus,
        completed_on: Option<Date>,
        actual_cost: Option<Amount>,
    ) -> Result<MaintenanceRequest> {
        let mut request = self.maintenance_request(id)?;
        request.status = status;
        request.completed_date = match status {
            MaintenanceStatus::Completed => Some(completed_on.unwrap_or(self.today)),
            _ => completed_on,
        };
        if actual_cost.is_some() {
            request.actual_cost = actual_cost;
        }
        self.store.update_maintenance(&request)?;
        info!(id = %request.id, %status, "maintenance status changed");
        Ok(request)
    }

    pub fn delete_maintenance(&self, id: Uuid) -> Result<()> {
        self.store.delete_maintenance(id)?;
        info!(%id, "maintenance request deleted");
        Ok(())
    }

    // ── Internals ──

    fn availability(
        &self,
        room_id: Uuid,
        stay: Stay,
        exclude: Option<Uuid>,
    ) -> Result<Availability> {
        let bookings = self.store.list_bookings_for_room(room_id)?;
        Ok(check_availability(&bookings, room_id, stay, exclude))
    }

    fn ensure_available(&self, room_id: Uuid, stay: Stay, exclude: Option<Uuid>) -> Result<()> {
        let availability = self.availability(room_id, stay, exclude)?;
        if availability.available {
            return Ok(());
        }
        warn!(
            room = %room_id,
            check_in = %stay.check_in(),
            check_out = %stay.check_out(),
            conflicts = availability.conflicts.len(),
            "booking conflict"
        );
        Err(DeskError::Conflict {
            conflicts: availability.conflicts,
        })
    }
}

/// Price of a stay at the room's seasonal nightly rate.
fn quote(room: &Room, stay: Stay) -> Amount {
    let nights = u32::try_from(stay.nights()).unwrap_or(0);
    room.pricing.nightly_rate(room.room_type).times(nights)
}
