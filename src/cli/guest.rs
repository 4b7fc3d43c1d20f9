//! Guest commands: add, list, show, check-in, check-out, delete.

use clap::Subcommand;

use crate::desk::{Desk, NewGuest};
use crate::store::SqliteStore;

use super::format::{guest_line, print_json};
use super::resolve;

#[derive(Debug, Subcommand)]
pub enum GuestCommand {
    /// Register a guest. Prints the guest ID.
    Add {
        name: String,

        #[arg(long, default_value = "")]
        email: String,

        #[arg(long, default_value = "")]
        phone: String,

        #[arg(long, default_value = "")]
        nationality: String,
    },

    /// List guests.
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show one guest.
    Show {
        /// Guest ID: full UUID or unambiguous prefix.
        guest: String,

        #[arg(long)]
        json: bool,
    },

    /// Mark a guest as arrived.
    CheckIn {
        /// Guest ID: full UUID or unambiguous prefix.
        guest: String,
    },

    /// Mark a checked-in guest as departed.
    CheckOut {
        /// Guest ID: full UUID or unambiguous prefix.
        guest: String,
    },

    /// Delete a guest. Refused while they have active bookings.
    Delete {
        /// Guest ID: full UUID or unambiguous prefix.
        guest: String,
    },
}

pub(super) fn run(desk: &Desk<'_, SqliteStore>, command: GuestCommand) -> Result<(), String> {
    match command {
        GuestCommand::Add {
            name,
            email,
            phone,
            nationality,
        } => {
            let guest = desk
                .add_guest(NewGuest {
                    name,
                    email,
                    phone,
                    nationality,
                })
                .map_err(|e| format!("failed to add guest: {e}"))?;
            println!("{}", guest.id);
            Ok(())
        }
        GuestCommand::List { json } => {
            let guests = desk
                .guests()
                .map_err(|e| format!("failed to list guests: {e}"))?;
            if json {
                return print_json(&guests);
            }
            if guests.is_empty() {
                println!("No guests");
            }
            for guest in &guests {
                println!("{}", guest_line(guest));
            }
            Ok(())
        }
        GuestCommand::Show { guest, json } => {
            let guest = resolve::guest(desk, &guest)?;
            if json {
                return print_json(&guest);
            }
            println!("{}", guest_line(&guest));
            println!("  id:          {}", guest.id);
            println!("  phone:       {}", guest.phone);
            println!("  nationality: {}", guest.nationality);
            println!("  registered:  {}", guest.created_at);
            Ok(())
        }
        GuestCommand::CheckIn { guest } => {
            let guest = resolve::guest(desk, &guest)?;
            let guest = desk
                .check_in_guest(guest.id)
                .map_err(|e| format!("failed to check in: {e}"))?;
            eprintln!("{} checked in", guest.name);
            Ok(())
        }
        GuestCommand::CheckOut { guest } => {
            let guest = resolve::guest(desk, &guest)?;
            let guest = desk
                .check_out_guest(guest.id)
                .map_err(|e| format!("failed to check out: {e}"))?;
            eprintln!("{} checked out", guest.name);
            Ok(())
        }
        GuestCommand::Delete { guest } => {
            let guest = resolve::guest(desk, &guest)?;
            desk.delete_guest(guest.id)
                .map_err(|e| format!("failed to delete guest: {e}"))?;
            eprintln!("Guest {} deleted", guest.name);
            Ok(())
        }
    }
}
