//! CLI interface for the hostel desk.
//!
//! Each subcommand is non-interactive: arguments in, one line per record
//! out (or JSON with `--json`). Status messages go to stderr so stdout can
//! be piped.
//!
//! Records are addressed by full UUID or unambiguous prefix. Rooms can also
//! be addressed by their number.

mod booking;
mod calendar;
mod format;
mod guest;
mod maintenance;
mod report;
mod resolve;
mod room;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::desk::Desk;
use crate::store::SqliteStore;

use booking::BookingCommand;
use calendar::CalendarCommand;
use guest::GuestCommand;
use maintenance::MaintenanceCommand;
use report::ReportCommand;
use room::RoomCommand;

/// Hostel: rooms, guests, bookings, and upkeep from the front desk.
#[derive(Debug, Parser)]
#[command(name = "hostel", version, after_long_help = WORKFLOW_HELP)]
pub struct Cli {
    /// Directory holding `hostel.sqlite`.
    /// Overrides `HOSTEL_DATA_DIR` and `data-dir` in the config file.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const WORKFLOW_HELP: &str = r"Workflow: taking a booking
  1. hostel room add 101 --room-type 6-bed-dorm --beds 6
  2. hostel guest add 'Ana Lima' --email ana@example.com
     → prints a guest ID (e.g. 5c1e09aa)
  3. hostel booking check --room 101 --check-in 2024-12-18 --check-out 2024-12-22
  4. hostel booking new --guest 5c1 --room 101 --check-in 2024-12-18 --check-out 2024-12-22
  5. hostel booking status a3b confirmed

Front desk:
  hostel calendar day 2024-12-20 --status confirmed
  hostel calendar grid --from 2024-12-16 --days 14
  hostel report dashboard";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage rooms: inventory, status, occupants.
    Room {
        #[command(subcommand)]
        command: RoomCommand,
    },

    /// Manage guests and their check-in state.
    Guest {
        #[command(subcommand)]
        command: GuestCommand,
    },

    /// Create, edit, move, and cancel bookings.
    Booking {
        #[command(subcommand)]
        command: BookingCommand,
    },

    /// Which bookings occupy which nights.
    Calendar {
        #[command(subcommand)]
        command: CalendarCommand,
    },

    /// Track maintenance requests.
    Maintenance {
        #[command(subcommand)]
        command: MaintenanceCommand,
    },

    /// Statistics derived from the current records.
    Report {
        #[command(subcommand)]
        command: ReportCommand,
    },
}

/// Run the CLI, returning an error message on failure.
pub fn run(config: &Config) -> Result<(), String> {
    let cli = Cli::parse();

    let data_dir = config.data_dir(cli.data_dir.as_deref())?;
    let store = SqliteStore::open_in(&data_dir)
        .map_err(|e| format!("failed to open store in {}: {e}", data_dir.display()))?;
    let desk = Desk::new(&store, config.desk_options());

    match cli.command {
        Command::Room { command } => room::run(&desk, config, command),
        Command::Guest { command } => guest::run(&desk, command),
        Command::Booking { command } => booking::run(&desk, config, command),
        Command::Calendar { command } => calendar::run(&desk, config, command),
        Command::Maintenance { command } => maintenance::run(&desk, config, command),
        Command::Report { command } => report::run(&desk, config, command),
    }
}
