//! Front-desk management for a hostel: rooms, guests, bookings, and
//! maintenance, with double-booking prevention at the core.

pub mod availability;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod desk;
pub mod error;
pub mod model;
pub mod report;
pub mod store;
