//! Derived statistics over rooms, bookings, and maintenance requests.
//!
//! Everything here is computed from the records passed in. Nothing is
//! sampled or cached.

use std::collections::BTreeMap;

use jiff::civil::Date;
use serde::Serialize;
use uuid::Uuid;

use crate::availability::is_date_in_booking;
use crate::calendar::window;
use crate::model::{
    Amount, Booking, BookingStatus, Category, MaintenanceRequest, MaintenanceStatus, Priority,
    Room, RoomStatus,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    pub total: usize,
    pub confirmed: usize,
    pub pending: usize,
    pub inquiries: usize,
    pub cancelled: usize,

    /// Bookings checking in during the calendar month of `today`.
    pub this_month: usize,

    /// Sum over confirmed bookings.
    pub revenue: Amount,

    /// Mean amount over every booking, cancelled ones included.
    pub average_value: Amount,

    /// Cancelled bookings as a rounded percentage of all bookings.
    pub cancellation_rate: u32,
}

/// Counts and money over every booking. An empty slice gives all zeros.
pub fn booking_stats(bookings: &[Booking], today: Date) -> BookingStats {
    let count = |status: BookingStatus| bookings.iter().filter(|b| b.status == status).count();
    let cancelled = count(BookingStatus::Cancelled);
    let booked: Amount = bookings.iter().map(|b| b.total_amount).sum();

    BookingStats {
        total: bookings.len(),
        confirmed: count(BookingStatus::Confirmed),
        pending: count(BookingStatus::Pending),
        inquiries: count(BookingStatus::Inquiry),
        cancelled,
        this_month: bookings
            .iter()
            .filter(|b| b.check_in.year() == today.year() && b.check_in.month() == today.month())
            .count(),
        revenue: bookings
            .iter()
            .filter(|b| b.status == BookingStatus::Confirmed)
            .map(|b| b.total_amount)
            .sum(),
        average_value: average(booked, bookings.len()),
        cancellation_rate: percent(cancelled, bookings.len()),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_rooms: usize,
    pub available: usize,
    pub occupied: usize,
    pub reserved: usize,
    pub cleaning: usize,
    pub maintenance: usize,

    /// Beds in rooms currently marked available.
    pub available_beds: u32,

    /// Rooms marked occupied, as a rounded percentage of all rooms.
    pub occupancy_rate: u32,

    pub check_ins_today: usize,
    pub check_outs_today: usize,
}

/// Front-desk summary for `today`. Room counts follow the recorded room
/// status; arrivals and departures come from active bookings.
pub fn dashboard_metrics(rooms: &[Room], bookings: &[Booking], today: Date) -> DashboardMetrics {
    let count = |status: RoomStatus| rooms.iter().filter(|r| r.status == status).count();
    let occupied = count(RoomStatus::Occupied);
    let active = || bookings.iter().filter(|b| b.is_active());

    DashboardMetrics {
        total_rooms: rooms.len(),
        available: count(RoomStatus::Available),
        occupied,
        reserved: count(RoomStatus::Reserved),
        cleaning: count(RoomStatus::Cleaning),
        maintenance: count(RoomStatus::Maintenance),
        available_beds: rooms
            .iter()
            .filter(|r| r.status == RoomStatus::Available)
            .map(|r| r.bed_count)
            .sum(),
        occupancy_rate: percent(occupied, rooms.len()),
        check_ins_today: active().filter(|b| b.check_in == today).count(),
        check_outs_today: active().filter(|b| b.check_out == today).count(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: Date,
    pub occupied_rooms: usize,
    pub occupancy_rate: u32,
}

/// Rooms occupied by active bookings on each day of the window.
pub fn occupancy_trend(
    rooms: &[Room],
    bookings: &[Booking],
    start: Date,
    days: u32,
) -> Vec<TrendPoint> {
    window(start, days)
        .map(|date| {
            let occupied_rooms = rooms
                .iter()
                .filter(|room| booked_on(room.id, bookings, date))
                .count();
            TrendPoint {
                date,
                occupied_rooms,
                occupancy_rate: percent(occupied_rooms, rooms.len()),
            }
        })
        .collect()
}

/// A trend with its summary figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyAnalytics {
    pub trend: Vec<TrendPoint>,

    /// Mean of the daily rates, rounded half up.
    pub average_occupancy: u32,
    pub peak_occupancy: u32,
    pub lowest_occupancy: u32,
}

/// [`occupancy_trend`] plus average, peak, and lowest daily rate.
/// An empty window reports zeros.
pub fn occupancy_analytics(
    rooms: &[Room],
    bookings: &[Booking],
    start: Date,
    days: u32,
) -> OccupancyAnalytics {
    let trend = occupancy_trend(rooms, bookings, start, days);
    let rates = || trend.iter().map(|p| p.occupancy_rate);
    let average_occupancy = match u64::try_from(trend.len()) {
        Ok(0) | Err(_) => 0,
        Ok(len) => {
            let total: u64 = rates().map(u64::from).sum();
            u32::try_from((total + len / 2) / len).unwrap_or(u32::MAX)
        }
    };

    OccupancyAnalytics {
        average_occupancy,
        peak_occupancy: rates().max().unwrap_or(0),
        lowest_occupancy: rates().min().unwrap_or(0),
        trend,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceStats {
    pub total: usize,
    pub open: usize,
    pub by_status: BTreeMap<&'static str, usize>,
    pub by_priority: BTreeMap<&'static str, usize>,
    pub by_category: BTreeMap<&'static str, usize>,
    pub estimated_cost: Amount,
    pub actual_cost: Amount,
}

/// Totals per status, priority, and category. Every variant is listed,
/// including those with no requests.
pub fn maintenance_stats(requests: &[MaintenanceRequest]) -> MaintenanceStats {
    let mut by_status: BTreeMap<_, _> = MaintenanceStatus::ALL
        .iter()
        .map(|s| (s.as_str(), 0))
        .collect();
    let mut by_priority: BTreeMap<_, _> = Priority::ALL.iter().map(|p| (p.as_str(), 0)).collect();
    let mut by_category: BTreeMap<_, _> = Category::ALL.iter().map(|c| (c.as_str(), 0)).collect();

    for request in requests {
        *by_status.entry(request.status.as_str()).or_default() += 1;
        *by_priority.entry(request.priority.as_str()).or_default() += 1;
        *by_category.entry(request.category.as_str()).or_default() += 1;
    }

    MaintenanceStats {
        total: requests.len(),
        open: requests.iter().filter(|r| r.is_open()).count(),
        by_status,
        by_priority,
        by_category,
        estimated_cost: requests.iter().filter_map(|r| r.estimated_cost).sum(),
        actual_cost: requests.iter().filter_map(|r| r.actual_cost).sum(),
    }
}

/// A room whose recorded status disagrees with its bookings for the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discrepancy {
    pub room_id: Uuid,
    pub number: String,
    pub recorded: RoomStatus,
    pub derived: RoomStatus,
}

/// The status a room would have if occupancy came only from bookings.
///
/// A room booked for `today` is `occupied`, whatever it is marked. An
/// unbooked room marked `occupied` is `available`. Other unbooked rooms
/// keep their recorded status.
pub fn effective_status(room: &Room, bookings: &[Booking], today: Date) -> RoomStatus {
    if booked_on(room.id, bookings, today) {
        RoomStatus::Occupied
    } else if room.status == RoomStatus::Occupied {
        RoomStatus::Available
    } else {
        room.status
    }
}

/// Rooms with their status replaced by [`effective_status`].
pub fn with_derived_status(rooms: &[Room], bookings: &[Booking], today: Date) -> Vec<Room> {
    rooms
        .iter()
        .map(|room| Room {
            status: effective_status(room, bookings, today),
            ..room.clone()
        })
        .collect()
}

/// Rooms whose recorded status differs from [`effective_status`], so the
/// report names exactly the rooms a derived listing would change.
pub fn room_status_discrepancies(
    rooms: &[Room],
    bookings: &[Booking],
    today: Date,
) -> Vec<Discrepancy> {
    rooms
        .iter()
        .filter_map(|room| {
            let derived = effective_status(room, bookings, today);
            (derived != room.status).then(|| Discrepancy {
                room_id: room.id,
                number: room.number.clone(),
                recorded: room.status,
                derived,
            })
        })
        .collect()
}

fn booked_on(room_id: Uuid, bookings: &[Booking], date: Date) -> bool {
    bookings
        .iter()
        .any(|b| b.room_id == room_id && b.is_active() && is_date_in_booking(date, b))
}

/// `total / count` rounded half up. Zero when `count` is zero.
fn average(total: Amount, count: usize) -> Amount {
    match u64::try_from(count) {
        Ok(0) | Err(_) => Amount::ZERO,
        Ok(count) => Amount::from_cents(total.cents().saturating_add(count / 2) / count),
    }
}

/// `part / whole` as a percentage rounded half up. Zero when `whole` is zero.
fn percent(part: usize, whole: usize) -> u32 {
    if whole == 0 {
        return 0;
    }
    u32::try_from((part * 100 + whole / 2) / whole).unwrap_or(u32::MAX)
}
