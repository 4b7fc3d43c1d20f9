//! Output formatting for CLI display.

use serde::Serialize;
use uuid::Uuid;

use crate::calendar::CalendarDay;
use crate::model::{Amount, Booking, Guest, MaintenanceRequest, Room};

pub(super) fn short(id: Uuid) -> String {
    id.to_string()[..8].to_string()
}

pub(super) fn money(currency: &str, amount: Amount) -> String {
    format!("{currency}{amount}")
}

pub(super) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("failed to serialize output: {e}"))?;
    println!("{json}");
    Ok(())
}

pub(super) fn room_line(room: &Room, currency: &str) -> String {
    format!(
        "{}  {:<6} {:<11} [{}]  {}/{} guests  {} beds  {}/night",
        short(room.id),
        room.number,
        room.room_type,
        room.status,
        room.current_occupants,
        room.max_occupancy,
        room.bed_count,
        money(currency, room.pricing.nightly_rate(room.room_type)),
    )
}

pub(super) fn guest_line(guest: &Guest) -> String {
    let mut line = format!("{}  {}  [{}]", short(guest.id), guest.name, guest.status);
    if !guest.email.is_empty() {
        line.push_str(&format!("  {}", guest.email));
    }
    line
}

/// One booking, with room number and guest name when they can be found.
pub(super) fn booking_line(
    booking: &Booking,
    rooms: &[Room],
    guests: &[Guest],
    currency: &str,
) -> String {
    let room = rooms
        .iter()
        .find(|r| r.id == booking.room_id)
        .map_or_else(|| format!("?{}", short(booking.room_id)), |r| r.number.clone());
    let guest = guests
        .iter()
        .find(|g| g.id == booking.guest_id)
        .map_or_else(|| format!("?{}", short(booking.guest_id)), |g| g.name.clone());
    let nights = booking.nights();

    format!(
        "{}  room {room}  {guest}  {}..{} ({nights} night{})  [{}] {}  {}",
        short(booking.id),
        booking.check_in,
        booking.check_out,
        if nights == 1 { "" } else { "s" },
        booking.status,
        booking.source,
        money(currency, booking.total_amount),
    )
}

pub(super) fn maintenance_line(request: &MaintenanceRequest, rooms: &[Room]) -> String {
    let room = rooms
        .iter()
        .find(|r| r.id == request.room_id)
        .map_or_else(|| format!("?{}", short(request.room_id)), |r| r.number.clone());
    let mut line = format!(
        "{}  room {room}  [{}] {} {}  {}",
        short(request.id),
        request.status,
        request.priority,
        request.category,
        request.title,
    );
    if let Some(staff) = &request.assigned_staff {
        line.push_str(&format!("  → {staff}"));
    }
    line
}

/// One row per day: the date, how many rooms are taken, and which.
pub(super) fn calendar_line(day: &CalendarDay, rooms: &[Room]) -> String {
    let mut numbers: Vec<&str> = day
        .bookings
        .iter()
        .filter_map(|b| rooms.iter().find(|r| r.id == b.room_id))
        .map(|r| r.number.as_str())
        .collect();
    numbers.sort_unstable();
    numbers.dedup();

    if numbers.is_empty() {
        return format!("{} {}  -", weekday(day.date), day.date);
    }
    format!(
        "{} {}  {} room(s): {}",
        weekday(day.date),
        day.date,
        day.occupied_rooms(),
        numbers.join(", ")
    )
}

fn weekday(date: jiff::civil::Date) -> &'static str {
    use jiff::civil::Weekday;
    match date.weekday() {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}
