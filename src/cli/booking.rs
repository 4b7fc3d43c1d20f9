//! Booking commands: new, list, show, edit, move, status, cancel, delete,
//! check, quote.

use clap::Subcommand;
use jiff::civil::Date;

use crate::config::Config;
use crate::desk::{BookingPatch, Desk, NewBooking};
use crate::error::DeskError;
use crate::model::{Amount, Booking, BookingSource, BookingStatus, Guest, Room};
use crate::store::SqliteStore;

use super::format::{booking_line, money, print_json, short};
use super::resolve;

#[derive(Debug, Subcommand)]
pub enum BookingCommand {
    /// Create a booking. Prints the booking ID.
    ///
    /// Fails if the room is already booked for any of the nights.
    /// When `--amount` is omitted the stay is priced from the room's rates.
    New {
        /// Guest ID: full UUID or unambiguous prefix.
        #[arg(long)]
        guest: String,

        /// Room number, full UUID, or unambiguous prefix.
        #[arg(long)]
        room: String,

        /// First night, e.g. `2024-12-18`.
        #[arg(long)]
        check_in: Date,

        /// Departure day. The room is free again that night.
        #[arg(long)]
        check_out: Date,

        /// `inquiry` or `pending`.
        #[arg(long, default_value = "inquiry")]
        status: BookingStatus,

        #[arg(long, default_value = "direct")]
        source: BookingSource,

        #[arg(long)]
        amount: Option<Amount>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List bookings.
    ///
    /// With `--from` or `--to`, only bookings with a night in that range
    /// are listed, ordered by check-in.
    List {
        /// Only bookings for this room.
        #[arg(long)]
        room: Option<String>,

        /// Only bookings for this guest.
        #[arg(long)]
        guest: Option<String>,

        #[arg(long)]
        status: Option<BookingStatus>,

        /// First day of the range.
        #[arg(long)]
        from: Option<Date>,

        /// Last day of the range, inclusive.
        #[arg(long)]
        to: Option<Date>,

        #[arg(long)]
        json: bool,
    },

    /// Show one booking.
    Show {
        /// Booking ID: full UUID or unambiguous prefix.
        booking: String,

        #[arg(long)]
        json: bool,
    },

    /// Edit a booking. Unspecified fields are left alone.
    ///
    /// Changed dates or rooms are checked for availability, ignoring the
    /// booking itself.
    Edit {
        /// Booking ID: full UUID or unambiguous prefix.
        booking: String,

        #[arg(long)]
        guest: Option<String>,

        #[arg(long)]
        room: Option<String>,

        #[arg(long)]
        check_in: Option<Date>,

        #[arg(long)]
        check_out: Option<Date>,

        #[arg(long)]
        source: Option<BookingSource>,

        #[arg(long)]
        amount: Option<Amount>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Move a booking to a new check-in date, keeping its length of stay.
    Move {
        /// Booking ID: full UUID or unambiguous prefix.
        booking: String,

        /// New check-in date.
        #[arg(long)]
        to: Date,
    },

    /// Move a booking along its lifecycle: inquiry → pending → confirmed.
    Status {
        /// Booking ID: full UUID or unambiguous prefix.
        booking: String,

        status: BookingStatus,
    },

    /// Cancel a booking. It stays on record but frees the room.
    Cancel {
        /// Booking ID: full UUID or unambiguous prefix.
        booking: String,
    },

    /// Permanently delete a booking.
    Delete {
        /// Booking ID: full UUID or unambiguous prefix.
        booking: String,
    },

    /// Check whether a room is free for a stay.
    ///
    /// Prints `available` or the conflicting bookings. Exits 0 either way.
    Check {
        /// Room number, full UUID, or unambiguous prefix.
        #[arg(long)]
        room: String,

        #[arg(long)]
        check_in: Date,

        #[arg(long)]
        check_out: Date,

        /// Booking to ignore, e.g. the one being edited.
        #[arg(long)]
        exclude: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Price a stay from the room's rates without booking it.
    Quote {
        /// Room number, full UUID, or unambiguous prefix.
        #[arg(long)]
        room: String,

        #[arg(long)]
        check_in: Date,

        #[arg(long)]
        check_out: Date,
    },
}

/// Rooms and guests for labelling booking lines.
struct Lookup {
    rooms: Vec<Room>,
    guests: Vec<Guest>,
}

impl Lookup {
    fn load(desk: &Desk<'_, SqliteStore>) -> Result<Self, String> {
        Ok(Self {
            rooms: desk
                .rooms()
                .map_err(|e| format!("failed to list rooms: {e}"))?,
            guests: desk
                .guests()
                .map_err(|e| format!("failed to list guests: {e}"))?,
        })
    }

    fn line(&self, booking: &Booking, currency: &str) -> String {
        booking_line(booking, &self.rooms, &self.guests, currency)
    }
}

pub(super) fn run(
    desk: &Desk<'_, SqliteStore>,
    config: &Config,
    command: BookingCommand,
) -> Result<(), String> {
    match command {
        BookingCommand::New {
            guest,
            room,
            check_in,
            check_out,
            status,
            source,
            amount,
            notes,
        } => {
            let new = NewBooking {
                guest_id: resolve::guest(desk, &guest)?.id,
                room_id: resolve::room(desk, &room)?.id,
                check_in,
                check_out,
                status,
                source,
                total_amount: amount,
                notes,
            };
            let booking = desk
                .create_booking(new)
                .map_err(|e| describe_failure("create booking", &e))?;
            println!("{}", booking.id);
            Ok(())
        }
        BookingCommand::List {
            room,
            guest,
            status,
            from,
            to,
            json,
        } => {
            let filter = ListFilter {
                room: room.as_deref(),
                guest: guest.as_deref(),
                status,
                from,
                to,
            };
            cmd_list(desk, config, &filter, json)
        }
        BookingCommand::Show { booking, json } => {
            let booking = resolve::booking(desk, &booking)?;
            if json {
                return print_json(&booking);
            }
            let lookup = Lookup::load(desk)?;
            println!("{}", lookup.line(&booking, &config.currency));
            println!("  id:       {}", booking.id);
            if !booking.notes.is_empty() {
                println!("  notes:    {}", booking.notes);
            }
            println!("  created:  {}", booking.created_at);
            println!("  updated:  {}", booking.updated_at);
            Ok(())
        }
        BookingCommand::Edit {
            booking,
            guest,
            room,
            check_in,
            check_out,
            source,
            amount,
            notes,
        } => {
            let booking = resolve::booking(desk, &booking)?;
            let patch = BookingPatch {
                guest_id: guest.map(|g| resolve::guest(desk, &g)).transpose()?.map(|g| g.id),
                room_id: room.map(|r| resolve::room(desk, &r)).transpose()?.map(|r| r.id),
                check_in,
                check_out,
                source,
                total_amount: amount,
                notes,
            };
            let updated = desk
                .update_booking(booking.id, patch)
                .map_err(|e| describe_failure("update booking", &e))?;
            eprintln!("Booking {} updated", short(updated.id));
            Ok(())
        }
        BookingCommand::Move { booking, to } => {
            let booking = resolve::booking(desk, &booking)?;
            let moved = desk
                .reschedule_booking(booking.id, to)
                .map_err(|e| describe_failure("move booking", &e))?;
            eprintln!(
                "Booking {} moved to {}..{}",
                short(moved.booking.id),
                moved.booking.check_in,
                moved.booking.check_out
            );
            if !moved.conflicts.is_empty() {
                let lookup = Lookup::load(desk)?;
                eprintln!("Warning: now overlaps {} booking(s):", moved.conflicts.len());
                for conflict in &moved.conflicts {
                    eprintln!("  {}", lookup.line(conflict, &config.currency));
                }
            }
            Ok(())
        }
        BookingCommand::Status { booking, status } => {
            let booking = resolve::booking(desk, &booking)?;
            let updated = desk
                .set_booking_status(booking.id, status)
                .map_err(|e| describe_failure("change status", &e))?;
            eprintln!("Booking {} is {}", short(updated.id), updated.status);
            Ok(())
        }
        BookingCommand::Cancel { booking } => {
            let booking = resolve::booking(desk, &booking)?;
            desk.cancel_booking(booking.id)
                .map_err(|e| describe_failure("cancel booking", &e))?;
            eprintln!("Booking {} cancelled", short(booking.id));
            Ok(())
        }
        BookingCommand::Delete { booking } => {
            let booking = resolve::booking(desk, &booking)?;
            desk.delete_booking(booking.id)
                .map_err(|e| describe_failure("delete booking", &e))?;
            eprintln!("Booking {} deleted", short(booking.id));
            Ok(())
        }
        BookingCommand::Check {
            room,
            check_in,
            check_out,
            exclude,
            json,
        } => {
            let room = resolve::room(desk, &room)?;
            let exclude = exclude
                .map(|b| resolve::booking(desk, &b))
                .transpose()?
                .map(|b| b.id);
            let availability = desk
                .check_availability(room.id, check_in, check_out, exclude)
                .map_err(|e| describe_failure("check availability", &e))?;
            if json {
                return print_json(&availability);
            }
            if availability.available {
                println!("available");
                return Ok(());
            }
            let lookup = Lookup::load(desk)?;
            println!("unavailable: room {} is booked by", room.number);
            for conflict in &availability.conflicts {
                println!("  {}", lookup.line(conflict, &config.currency));
            }
            Ok(())
        }
        BookingCommand::Quote {
            room,
            check_in,
            check_out,
        } => {
            let room = resolve::room(desk, &room)?;
            let amount = desk
                .quote(room.id, check_in, check_out)
                .map_err(|e| describe_failure("quote stay", &e))?;
            println!("{}", money(&config.currency, amount));
            Ok(())
        }
    }
}

struct ListFilter<'a> {
    room: Option<&'a str>,
    guest: Option<&'a str>,
    status: Option<BookingStatus>,
    from: Option<Date>,
    to: Option<Date>,
}

fn cmd_list(
    desk: &Desk<'_, SqliteStore>,
    config: &Config,
    filter: &ListFilter<'_>,
    json: bool,
) -> Result<(), String> {
    let room_id = filter
        .room
        .map(|r| resolve::room(desk, r))
        .transpose()?
        .map(|r| r.id);
    let guest_id = filter
        .guest
        .map(|g| resolve::guest(desk, g))
        .transpose()?
        .map(|g| g.id);
    let status = filter.status;

    let listed = if filter.from.is_some() || filter.to.is_some() {
        desk.bookings_between(
            filter.from.unwrap_or(Date::MIN),
            filter.to.unwrap_or(Date::MAX),
        )
    } else {
        desk.bookings()
    };
    let bookings: Vec<Booking> = listed
        .map_err(|e| format!("failed to list bookings: {e}"))?
        .into_iter()
        .filter(|b| room_id.is_none_or(|id| b.room_id == id))
        .filter(|b| guest_id.is_none_or(|id| b.guest_id == id))
        .filter(|b| status.is_none_or(|s| b.status == s))
        .collect();

    if json {
        return print_json(&bookings);
    }
    if bookings.is_empty() {
        println!("No bookings");
        return Ok(());
    }
    let lookup = Lookup::load(desk)?;
    for booking in &bookings {
        println!("{}", lookup.line(booking, &config.currency));
    }
    Ok(())
}

/// The error as one line, prefixed with what was attempted.
fn describe_failure(action: &str, err: &DeskError) -> String {
    format!("failed to {action}: {err}")
}
