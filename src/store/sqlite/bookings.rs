//! Booking table.

use rusqlite::{OptionalExtension, Row, params};
use tracing::debug;
use uuid::Uuid;

use crate::model::Booking;
use crate::store::{BookingRepository, Record, Result, StoreError};

use super::{SqliteStore, amount_from_column, amount_to_column, parse};

const COLUMNS: &str = "id, guest_id, room_id, check_in, check_out, status, source, \
                       total_amount, notes, created_at, updated_at";

/// Raw column values, before parsing.
struct BookingRow {
    id: String,
    guest_id: String,
    room_id: String,
    check_in: String,
    check_out: String,
    status: String,
    source: String,
    total_amount: i64,
    notes: String,
    created_at: String,
    updated_at: String,
}

impl BookingRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            guest_id: row.get(1)?,
            room_id: row.get(2)?,
            check_in: row.get(3)?,
            check_out: row.get(4)?,
            status: row.get(5)?,
            source: row.get(6)?,
            total_amount: row.get(7)?,
            notes: row.get(8)?,
            created_at: row.get(9)?,
            updated_at: row.get(10)?,
        })
    }

    fn into_booking(self) -> Result<Booking> {
        Ok(Booking {
            id: parse(&self.id, "booking id")?,
            guest_id: parse(&self.guest_id, "guest_id")?,
            room_id: parse(&self.room_id, "room_id")?,
            check_in: parse(&self.check_in, "check_in")?,
            check_out: parse(&self.check_out, "check_out")?,
            status: parse(&self.status, "status")?,
            source: parse(&self.source, "source")?,
            total_amount: amount_from_column(self.total_amount, "total_amount")?,
            notes: self.notes,
            created_at: parse(&self.created_at, "created_at")?,
            updated_at: parse(&self.updated_at, "updated_at")?,
        })
    }
}

impl SqliteStore {
    fn query_bookings(&self, sql: &str, param: Option<String>) -> Result<Vec<Booking>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = match param {
            Some(p) => stmt.query_map([p], BookingRow::read)?,
            None => stmt.query_map([], BookingRow::read)?,
        };
        let bookings = rows
            .map(|row| row.map_err(StoreError::from).and_then(BookingRow::into_booking))
            .collect::<Result<Vec<_>>>()?;
        Ok(bookings)
    }
}

impl BookingRepository for SqliteStore {
    fn create_booking(&self, booking: &Booking) -> Result<()> {
        if self.exists("bookings", booking.id)? {
            return Err(StoreError::AlreadyExists {
                entity: Booking::ENTITY,
                id: booking.id,
            });
        }
        debug!(id = %booking.id, "inserting booking");
        self.conn.execute(
            &format!("INSERT INTO bookings ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"),
            params![
                booking.id.to_string(),
                booking.guest_id.to_string(),
                booking.room_id.to_string(),
                booking.check_in.to_string(),
                booking.check_out.to_string(),
                booking.status.as_str(),
                booking.source.as_str(),
                amount_to_column(booking.total_amount),
                &booking.notes,
                booking.created_at.to_string(),
                booking.updated_at.to_string(),
            ],
        )?;
        Ok(())
    }

    fn get_booking(&self, id: Uuid) -> Result<Option<Booking>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM bookings WHERE id = ?1"),
                [id.to_string()],
                BookingRow::read,
            )
            .optional()?;
        row.map(BookingRow::into_booking).transpose()
    }

    fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.query_bookings(&format!("SELECT {COLUMNS} FROM bookings ORDER BY rowid"), None)
    }

    fn list_bookings_for_room(&self, room_id: Uuid) -> Result<Vec<Booking>> {
        self.query_bookings(
            &format!("SELECT {COLUMNS} FROM bookings WHERE room_id = ?1 ORDER BY rowid"),
            Some(room_id.to_string()),
        )
    }

    fn update_booking(&self, booking: &Booking) -> Result<()> {
        debug!(id = %booking.id, "updating booking");
        let rows = self.conn.execute(
            "UPDATE bookings
             SET guest_id = ?1, room_id = ?2, check_in = ?3, check_out = ?4, status = ?5,
                 source = ?6, total_amount = ?7, notes = ?8, created_at = ?9, updated_at = ?10
             WHERE id = ?11",
            params![
                booking.guest_id.to_string(),
                booking.room_id.to_string(),
                booking.check_in.to_string(),
                booking.check_out.to_string(),
                booking.status.as_str(),
                booking.source.as_str(),
                amount_to_column(booking.total_amount),
                &booking.notes,
                booking.created_at.to_string(),
                booking.updated_at.to_string(),
                booking.id.to_string(),
            ],
        )?;
        if rows == 0 {
            return Err(StoreError::NotFound {
                entity: Booking::ENTITY,
                id: booking.id,
            });
        }
        Ok(())
    }

    fn delete_booking(&self, id: Uuid) -> Result<()> {
        debug!(%id, "deleting booking");
        let rows = self
            .conn
            .execute("DELETE FROM bookings WHERE id = ?1", [id.to_string()])?;
        if rows == 0 {
            return Err(StoreError::NotFound {
                entity: Booking::ENTITY,
                id,
            });
        }
        Ok(())
    }
}
