//! Calendar commands: day, grid.

use clap::{Args, Subcommand};
use jiff::civil::Date;

use crate::availability::BookingFilter;
use crate::config::Config;
use crate::desk::Desk;
use crate::model::{BookingSource, BookingStatus, RoomType};
use crate::store::SqliteStore;

use super::format::{booking_line, calendar_line, print_json};

#[derive(Debug, Subcommand)]
pub enum CalendarCommand {
    /// Bookings occupying one night.
    ///
    /// A booking occupies its check-in night through the night before
    /// check-out. Cancelled bookings never appear.
    Day {
        date: Date,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long)]
        json: bool,
    },

    /// Occupied rooms for consecutive days.
    Grid {
        #[arg(long)]
        from: Date,

        /// Number of days, 1 to 366.
        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..=366))]
        days: u32,

        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    /// Only bookings in rooms of this type.
    #[arg(long)]
    room_type: Option<RoomType>,

    #[arg(long)]
    status: Option<BookingStatus>,

    #[arg(long)]
    source: Option<BookingSource>,
}

impl FilterArgs {
    fn to_domain(&self) -> BookingFilter {
        BookingFilter {
            room_type: self.room_type,
            status: self.status,
            source: self.source,
        }
    }
}

pub(super) fn run(
    desk: &Desk<'_, SqliteStore>,
    config: &Config,
    command: CalendarCommand,
) -> Result<(), String> {
    let rooms = desk
        .rooms()
        .map_err(|e| format!("failed to list rooms: {e}"))?;

    match command {
        CalendarCommand::Day { date, filter, json } => {
            let bookings = desk
                .day_view(date, &filter.to_domain())
                .map_err(|e| format!("failed to load {date}: {e}"))?;
            if json {
                return print_json(&bookings);
            }
            if bookings.is_empty() {
                println!("No bookings on {date}");
                return Ok(());
            }
            let guests = desk
                .guests()
                .map_err(|e| format!("failed to list guests: {e}"))?;
            for booking in &bookings {
                println!(
                    "{}",
                    booking_line(booking, &rooms, &guests, &config.currency)
                );
            }
            Ok(())
        }
        CalendarCommand::Grid {
            from,
            days,
            filter,
            json,
        } => {
            let grid = desk
                .calendar(from, days, &filter.to_domain())
                .map_err(|e| format!("failed to load calendar: {e}"))?;
            if json {
                return print_json(&grid);
            }
            for day in &grid {
                println!("{}", calendar_line(day, &rooms));
            }
            Ok(())
        }
    }
}
