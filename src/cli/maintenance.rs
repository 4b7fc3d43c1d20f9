//! Maintenance commands: report, list, show, status, delete.

use clap::Subcommand;
use jiff::civil::Date;

use crate::config::Config;
use crate::desk::{Desk, NewMaintenance};
use crate::model::{Amount, Category, MaintenanceRequest, MaintenanceStatus, Priority, Room};
use crate::store::SqliteStore;

use super::format::{maintenance_line, money, print_json, short};
use super::resolve;

#[derive(Debug, Subcommand)]
pub enum MaintenanceCommand {
    /// Report a problem in a room. Prints the request ID.
    ///
    /// Requests with a `--scheduled` date start as `scheduled`,
    /// the rest as `pending`.
    Report {
        /// Room number, full UUID, or unambiguous prefix.
        #[arg(long)]
        room: String,

        title: String,

        #[arg(long, default_value = "")]
        description: String,

        #[arg(long, default_value = "medium")]
        priority: Priority,

        #[arg(long, default_value = "general")]
        category: Category,

        /// Who is handling it.
        #[arg(long)]
        staff: Option<String>,

        #[arg(long, default_value = "")]
        reported_by: String,

        #[arg(long)]
        scheduled: Option<Date>,

        #[arg(long)]
        estimate: Option<Amount>,

        #[arg(long, default_value = "")]
        notes: String,
    },

    /// List maintenance requests.
    List {
        /// Only requests for this room.
        #[arg(long)]
        room: Option<String>,

        /// Only requests that are not completed.
        #[arg(long)]
        open: bool,

        #[arg(long)]
        json: bool,
    },

    /// Show one request.
    Show {
        /// Request ID: full UUID or unambiguous prefix.
        request: String,

        #[arg(long)]
        json: bool,
    },

    /// Move a request to a new status.
    ///
    /// Completing a request stamps today as its completion date unless
    /// `--completed` says otherwise.
    Status {
        /// Request ID: full UUID or unambiguous prefix.
        request: String,

        status: MaintenanceStatus,

        #[arg(long)]
        completed: Option<Date>,

        /// What the work actually cost.
        #[arg(long)]
        cost: Option<Amount>,
    },

    /// Delete a request.
    Delete {
        /// Request ID: full UUID or unambiguous prefix.
        request: String,
    },
}

pub(super) fn run(
    desk: &Desk<'_, SqliteStore>,
    config: &Config,
    command: MaintenanceCommand,
) -> Result<(), String> {
    match command {
        MaintenanceCommand::Report {
            room,
            title,
            description,
            priority,
            category,
            staff,
            reported_by,
            scheduled,
            estimate,
            notes,
        } => {
            let new = NewMaintenance {
                room_id: resolve::room(desk, &room)?.id,
                title,
                description,
                priority,
                category,
                assigned_staff: staff,
                reported_by,
                scheduled_date: scheduled,
                estimated_cost: estimate,
                notes,
            };
            let request = desk
                .report_maintenance(new)
                .map_err(|e| format!("failed to report maintenance: {e}"))?;
            println!("{}", request.id);
            Ok(())
        }
        MaintenanceCommand::List { room, open, json } => {
            let rooms = desk
                .rooms()
                .map_err(|e| format!("failed to list rooms: {e}"))?;
            let room_id = room.map(|r| resolve::room(desk, &r)).transpose()?.map(|r| r.id);
            let requests: Vec<MaintenanceRequest> = desk
                .maintenance_requests()
                .map_err(|e| format!("failed to list maintenance requests: {e}"))?
                .into_iter()
                .filter(|r| room_id.is_none_or(|id| r.room_id == id))
                .filter(|r| !open || r.is_open())
                .collect();

            if json {
                return print_json(&requests);
            }
            if requests.is_empty() {
                println!("No maintenance requests");
            }
            for request in &requests {
                println!("{}", maintenance_line(request, &rooms));
            }
            Ok(())
        }
        MaintenanceCommand::Show { request, json } => {
            let request = resolve::maintenance(desk, &request)?;
            if json {
                return print_json(&request);
            }
            let rooms = desk
                .rooms()
                .map_err(|e| format!("failed to list rooms: {e}"))?;
            print_details(&request, &rooms, &config.currency);
            Ok(())
        }
        MaintenanceCommand::Status {
            request,
            status,
            completed,
            cost,
        } => {
            let request = resolve::maintenance(desk, &request)?;
            let updated = desk
                .set_maintenance_status(request.id, status, completed, cost)
                .map_err(|e| format!("failed to update maintenance request: {e}"))?;
            match updated.completed_date {
                Some(date) => eprintln!(
                    "Request {} {} on {date}",
                    short(updated.id),
                    updated.status
                ),
                None => eprintln!("Request {} is {}", short(updated.id), updated.status),
            }
            Ok(())
        }
        MaintenanceCommand::Delete { request } => {
            let request = resolve::maintenance(desk, &request)?;
            desk.delete_maintenance(request.id)
                .map_err(|e| format!("failed to delete maintenance request: {e}"))?;
            eprintln!("Request {} deleted", short(request.id));
            Ok(())
        }
    }
}

fn print_details(request: &MaintenanceRequest, rooms: &[Room], currency: &str) {
    println!("{}", maintenance_line(request, rooms));
    println!("  id:          {}", request.id);
    if !request.description.is_empty() {
        println!("  description: {}", request.description);
    }
    if !request.reported_by.is_empty() {
        println!("  reported by: {}", request.reported_by);
    }
    println!("  reported:    {}", request.reported_at);
    if let Some(date) = request.scheduled_date {
        println!("  scheduled:   {date}");
    }
    if let Some(date) = request.completed_date {
        println!("  completed:   {date}");
    }
    if let Some(cost) = request.estimated_cost {
        println!("  estimate:    {}", money(currency, cost));
    }
    if let Some(cost) = request.actual_cost {
        println!("  actual:      {}", money(currency, cost));
    }
    if !request.notes.is_empty() {
        println!("  notes:       {}", request.notes);
    }
}
