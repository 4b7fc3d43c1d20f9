//! Report commands: bookings, dashboard, trend, maintenance, discrepancies.

use clap::Subcommand;
use jiff::{ToSpan, civil::Date};

use crate::config::Config;
use crate::desk::Desk;
use crate::model::{Booking, Room};
use crate::report::{
    booking_stats, dashboard_metrics, maintenance_stats, occupancy_analytics,
    room_status_discrepancies,
};
use crate::store::SqliteStore;

use super::format::{money, print_json};

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Booking counts by status, confirmed revenue, average value, and
    /// cancellation rate.
    Bookings {
        #[arg(long)]
        json: bool,
    },

    /// Today at a glance: rooms by status, arrivals, departures.
    Dashboard {
        #[arg(long)]
        json: bool,
    },

    /// Daily occupancy from active bookings, with average, peak, and lowest.
    Trend {
        /// First day. Defaults to `--days` days ending today.
        #[arg(long)]
        from: Option<Date>,

        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..=366))]
        days: u32,

        #[arg(long)]
        json: bool,
    },

    /// Maintenance requests by status, priority, and category.
    Maintenance {
        #[arg(long)]
        json: bool,
    },

    /// Rooms whose recorded status disagrees with today's bookings.
    Discrepancies {
        #[arg(long)]
        json: bool,
    },
}

pub(super) fn run(
    desk: &Desk<'_, SqliteStore>,
    config: &Config,
    command: ReportCommand,
) -> Result<(), String> {
    let today = desk.today();

    match command {
        ReportCommand::Bookings { json } => {
            let stats = booking_stats(&bookings(desk)?, today);
            if json {
                return print_json(&stats);
            }
            println!("total:       {}", stats.total);
            println!("confirmed:   {}", stats.confirmed);
            println!("pending:     {}", stats.pending);
            println!("inquiries:   {}", stats.inquiries);
            println!("cancelled:   {}", stats.cancelled);
            println!("this month:  {}", stats.this_month);
            println!("revenue:     {}", money(&config.currency, stats.revenue));
            println!("average:     {}", money(&config.currency, stats.average_value));
            println!("cancelled %: {}%", stats.cancellation_rate);
            Ok(())
        }
        ReportCommand::Dashboard { json } => {
            let metrics = dashboard_metrics(&rooms(desk)?, &bookings(desk)?, today);
            if json {
                return print_json(&metrics);
            }
            println!("{today}");
            println!(
                "rooms:       {} total, {} available, {} occupied, {} reserved, {} cleaning, {} maintenance",
                metrics.total_rooms,
                metrics.available,
                metrics.occupied,
                metrics.reserved,
                metrics.cleaning,
                metrics.maintenance
            );
            println!("free beds:   {}", metrics.available_beds);
            println!("occupancy:   {}%", metrics.occupancy_rate);
            println!("arrivals:    {}", metrics.check_ins_today);
            println!("departures:  {}", metrics.check_outs_today);
            Ok(())
        }
        ReportCommand::Trend { from, days, json } => {
            let from = match from {
                Some(date) => date,
                None => today
                    .checked_sub(i64::from(days.saturating_sub(1)).days())
                    .map_err(|e| format!("invalid trend window: {e}"))?,
            };
            let analytics = occupancy_analytics(&rooms(desk)?, &bookings(desk)?, from, days);
            if json {
                return print_json(&analytics);
            }
            for point in &analytics.trend {
                println!(
                    "{}  {:>3}%  {} room(s)",
                    point.date, point.occupancy_rate, point.occupied_rooms
                );
            }
            println!(
                "average {}%  peak {}%  lowest {}%",
                analytics.average_occupancy, analytics.peak_occupancy, analytics.lowest_occupancy
            );
            Ok(())
        }
        ReportCommand::Maintenance { json } => {
            let requests = desk
                .maintenance_requests()
                .map_err(|e| format!("failed to list maintenance requests: {e}"))?;
            let stats = maintenance_stats(&requests);
            if json {
                return print_json(&stats);
            }
            println!("total: {}  open: {}", stats.total, stats.open);
            for (label, counts) in [
                ("status", &stats.by_status),
                ("priority", &stats.by_priority),
                ("category", &stats.by_category),
            ] {
                let parts: Vec<String> = counts
                    .iter()
                    .filter(|(_, n)| **n > 0)
                    .map(|(name, n)| format!("{name} {n}"))
                    .collect();
                println!("{label:<9} {}", parts.join(", "));
            }
            println!(
                "cost:     {} estimated, {} actual",
                money(&config.currency, stats.estimated_cost),
                money(&config.currency, stats.actual_cost)
            );
            Ok(())
        }
        ReportCommand::Discrepancies { json } => {
            let found = room_status_discrepancies(&rooms(desk)?, &bookings(desk)?, today);
            if json {
                return print_json(&found);
            }
            if found.is_empty() {
                println!("No discrepancies");
                return Ok(());
            }
            for d in &found {
                println!(
                    "room {}  recorded {}, bookings say {}",
                    d.number, d.recorded, d.derived
                );
            }
            Ok(())
        }
    }
}

fn rooms(desk: &Desk<'_, SqliteStore>) -> Result<Vec<Room>, String> {
    desk.rooms()
        .map_err(|e| format!("failed to list rooms: {e}"))
}

fn bookings(desk: &Desk<'_, SqliteStore>) -> Result<Vec<Booking>, String> {
    desk.bookings()
        .map_err(|e| format!("failed to list bookings: {e}"))
}
