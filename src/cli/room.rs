//! Room commands: add, list, show, status, occupants, delete.

use clap::Subcommand;

use crate::config::{Config, RoomStatusMode};
use crate::desk::{Desk, NewRoom};
use crate::model::{Amount, BathroomType, Pricing, Room, RoomStatus, RoomType};
use crate::report::with_derived_status;
use crate::store::SqliteStore;

use super::format::{print_json, room_line};
use super::resolve;

#[derive(Debug, Subcommand)]
pub enum RoomCommand {
    /// Add a room. Prints the room ID.
    Add {
        /// Room number shown to guests (e.g. `101`). Must be unique.
        number: String,

        #[arg(long, default_value = "4-bed-dorm")]
        room_type: RoomType,

        #[arg(long, default_value_t = 4)]
        beds: u32,

        /// Defaults to the number of beds.
        #[arg(long)]
        max_occupancy: Option<u32>,

        /// Can be specified multiple times.
        #[arg(long = "amenity")]
        amenities: Vec<String>,

        #[arg(long, default_value = "shared")]
        bathroom: BathroomType,

        #[arg(long, default_value = "Interior")]
        view: String,

        /// Nightly price of one dorm bed (default 25.00).
        #[arg(long)]
        bed_rate: Option<Amount>,

        /// Nightly price of the whole room when private (default 80.00).
        #[arg(long)]
        private_rate: Option<Amount>,

        /// Seasonal adjustment in percent, e.g. `15` or `-10`.
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        seasonal_pct: i32,
    },

    /// List rooms.
    ///
    /// With `room-status = "derived"` in the config, the status shown comes
    /// from today's bookings instead of the recorded one.
    List {
        #[arg(long)]
        status: Option<RoomStatus>,

        #[arg(long)]
        room_type: Option<RoomType>,

        #[arg(long)]
        json: bool,
    },

    /// Show one room.
    Show {
        /// Room number, full UUID, or unambiguous prefix.
        room: String,

        #[arg(long)]
        json: bool,
    },

    /// Set a room's recorded status (e.g. `cleaning`, `maintenance`).
    Status {
        /// Room number, full UUID, or unambiguous prefix.
        room: String,

        status: RoomStatus,
    },

    /// Record how many guests are in a room.
    ///
    /// Any occupants mark the room occupied; zero marks it available.
    Occupants {
        /// Room number, full UUID, or unambiguous prefix.
        room: String,

        count: u32,
    },

    /// Delete a room. Refused while it has active bookings.
    Delete {
        /// Room number, full UUID, or unambiguous prefix.
        room: String,
    },
}

pub(super) fn run(
    desk: &Desk<'_, SqliteStore>,
    config: &Config,
    command: RoomCommand,
) -> Result<(), String> {
    match command {
        RoomCommand::Add {
            number,
            room_type,
            beds,
            max_occupancy,
            amenities,
            bathroom,
            view,
            bed_rate,
            private_rate,
            seasonal_pct,
        } => {
            let defaults = Pricing::default();
            let new = NewRoom {
                number,
                room_type,
                bed_count: beds,
                max_occupancy: max_occupancy.unwrap_or(beds),
                amenities,
                bathroom,
                window_view: view,
                pricing: Pricing {
                    base_rate_per_bed: bed_rate.unwrap_or(defaults.base_rate_per_bed),
                    private_room_rate: private_rate.unwrap_or(defaults.private_room_rate),
                    seasonal_adjustment_pct: seasonal_pct,
                },
            };
            cmd_add(desk, new)
        }
        RoomCommand::List {
            status,
            room_type,
            json,
        } => cmd_list(desk, config, status, room_type, json),
        RoomCommand::Show { room, json } => cmd_show(desk, config, &room, json),
        RoomCommand::Status { room, status } => {
            let room = resolve::room(desk, &room)?;
            let room = desk
                .set_room_status(room.id, status)
                .map_err(|e| format!("failed to set room status: {e}"))?;
            eprintln!("Room {} is now {}", room.number, room.status);
            Ok(())
        }
        RoomCommand::Occupants { room, count } => {
            let room = resolve::room(desk, &room)?;
            let room = desk
                .set_occupants(room.id, count)
                .map_err(|e| format!("failed to record occupants: {e}"))?;
            eprintln!(
                "Room {}: {}/{} guests [{}]",
                room.number, room.current_occupants, room.max_occupancy, room.status
            );
            Ok(())
        }
        RoomCommand::Delete { room } => {
            let room = resolve::room(desk, &room)?;
            desk.delete_room(room.id)
                .map_err(|e| format!("failed to delete room: {e}"))?;
            eprintln!("Room {} deleted", room.number);
            Ok(())
        }
    }
}

fn cmd_add(desk: &Desk<'_, SqliteStore>, new: NewRoom) -> Result<(), String> {
    let room = desk
        .add_room(new)
        .map_err(|e| format!("failed to add room: {e}"))?;
    println!("{}", room.id);
    Ok(())
}

/// Rooms as the configured status mode presents them.
fn displayed_rooms(desk: &Desk<'_, SqliteStore>, config: &Config) -> Result<Vec<Room>, String> {
    let rooms = desk
        .rooms()
        .map_err(|e| format!("failed to list rooms: {e}"))?;
    match config.room_status {
        RoomStatusMode::Independent => Ok(rooms),
        RoomStatusMode::Derived => {
            let bookings = desk
                .bookings()
                .map_err(|e| format!("failed to list bookings: {e}"))?;
            Ok(with_derived_status(&rooms, &bookings, desk.today()))
        }
    }
}

fn cmd_list(
    desk: &Desk<'_, SqliteStore>,
    config: &Config,
    status: Option<RoomStatus>,
    room_type: Option<RoomType>,
    json: bool,
) -> Result<(), String> {
    let rooms: Vec<Room> = displayed_rooms(desk, config)?
        .into_iter()
        .filter(|r| status.is_none_or(|s| r.status == s))
        .filter(|r| room_type.is_none_or(|t| r.room_type == t))
        .collect();

    if json {
        return print_json(&rooms);
    }
    if rooms.is_empty() {
        println!("No rooms");
        return Ok(());
    }
    for room in &rooms {
        println!("{}", room_line(room, &config.currency));
    }
    Ok(())
}

fn cmd_show(
    desk: &Desk<'_, SqliteStore>,
    config: &Config,
    reference: &str,
    json: bool,
) -> Result<(), String> {
    let id = resolve::room(desk, reference)?.id;
    let room = displayed_rooms(desk, config)?
        .into_iter()
        .find(|r| r.id == id)
        .ok_or_else(|| format!("room not found: {id}"))?;

    if json {
        return print_json(&room);
    }
    println!("{}", room_line(&room, &config.currency));
    println!("  id:         {}", room.id);
    println!("  bathroom:   {}", room.bathroom);
    println!("  view:       {}", room.window_view);
    if !room.amenities.is_empty() {
        println!("  amenities:  {}", room.amenities.join(", "));
    }
    println!(
        "  rates:      {}{} per bed, {}{} private, {:+}% seasonal",
        config.currency,
        room.pricing.base_rate_per_bed,
        config.currency,
        room.pricing.private_room_rate,
        room.pricing.seasonal_adjustment_pct
    );
    println!("  updated:    {}", room.last_updated);
    Ok(())
}
