//! Room table.

use rusqlite::{OptionalExtension, Row, params};
use tracing::debug;
use uuid::Uuid;

use crate::model::{Pricing, Room};
use crate::store::{Record, Result, RoomRepository, StoreError};

use super::{SqliteStore, amount_from_column, amount_to_column, parse};

const COLUMNS: &str = "id, number, room_type, bed_count, max_occupancy, current_occupants, \
                       status, amenities, bathroom, window_view, base_rate_per_bed, \
                       private_room_rate, seasonal_adjustment_pct, last_updated";

struct RoomRow {
    id: String,
    number: String,
    room_type: String,
    bed_count: u32,
    max_occupancy: u32,
    current_occupants: u32,
    status: String,
    amenities: String,
    bathroom: String,
    window_view: String,
    base_rate_per_bed: i64,
    private_room_rate: i64,
    seasonal_adjustment_pct: i32,
    last_updated: String,
}

impl RoomRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            number: row.get(1)?,
            room_type: row.get(2)?,
            bed_count: row.get(3)?,
            max_occupancy: row.get(4)?,
            current_occupants: row.get(5)?,
            status: row.get(6)?,
            amenities: row.get(7)?,
            bathroom: row.get(8)?,
            window_view: row.get(9)?,
            base_rate_per_bed: row.get(10)?,
            private_room_rate: row.get(11)?,
            seasonal_adjustment_pct: row.get(12)?,
            last_updated: row.get(13)?,
        })
    }

    fn into_room(self) -> Result<Room> {
        Ok(Room {
            id: parse(&self.id, "room id")?,
            number: self.number,
            room_type: parse(&self.room_type, "room_type")?,
            bed_count: self.bed_count,
            max_occupancy: self.max_occupancy,
            current_occupants: self.current_occupants,
            status: parse(&self.status, "status")?,
            amenities: serde_json::from_str(&self.amenities)?,
            bathroom: parse(&self.bathroom, "bathroom")?,
            window_view: self.window_view,
            pricing: Pricing {
                base_rate_per_bed: amount_from_column(self.base_rate_per_bed, "base_rate_per_bed")?,
                private_room_rate: amount_from_column(self.private_room_rate, "private_room_rate")?,
                seasonal_adjustment_pct: self.seasonal_adjustment_pct,
            },
            last_updated: parse(&self.last_updated, "last_updated")?,
        })
    }
}

impl RoomRepository for SqliteStore {
    fn create_room(&self, room: &Room) -> Result<()> {
        if self.exists("rooms", room.id)? {
            return Err(StoreError::AlreadyExists {
                entity: Room::ENTITY,
                id: room.id,
            });
        }
        debug!(id = %room.id, number = %room.number, "inserting room");
        self.conn.execute(
            &format!(
                "INSERT INTO rooms ({COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)"
            ),
            params![
                room.id.to_string(),
                &room.number,
                room.room_type.as_str(),
                room.bed_count,
                room.max_occupancy,
                room.current_occupants,
                room.status.as_str(),
                serde_json::to_string(&room.amenities)?,
                room.bathroom.as_str(),
                &room.window_view,
                amount_to_column(room.pricing.base_rate_per_bed),
                amount_to_column(room.pricing.private_room_rate),
                room.pricing.seasonal_adjustment_pct,
                room.last_updated.to_string(),
            ],
        )?;
        Ok(())
    }

    fn get_room(&self, id: Uuid) -> Result<Option<Room>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM rooms WHERE id = ?1"),
                [id.to_string()],
                RoomRow::read,
            )
            .optional()?;
        row.map(RoomRow::into_room).transpose()
    }

    fn list_rooms(&self) -> Result<Vec<Room>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM rooms ORDER BY rowid"))?;
        let rows = stmt.query_map([], RoomRow::read)?;
        let rooms = rows
            .map(|row| row.map_err(StoreError::from).and_then(RoomRow::into_room))
            .collect::<Result<Vec<_>>>()?;
        Ok(rooms)
    }

    fn find_room_by_number(&self, number: &str) -> Result<Option<Room>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM rooms WHERE number = ?1"),
                [number],
                RoomRow::read,
            )
            .optional()?;
        row.map(RoomRow::into_room).transpose()
    }

    fn update_room(&self, room: &Room) -> Result<()> {
        debug!(id = %room.id, "updating room");
        let rows = self.conn.execute(
            "UPDATE rooms
             SET number = ?1, room_type = ?2, bed_count = ?3, max_occupancy = ?4,
                 current_occupants = ?5, status = ?6, amenities = ?7, bathroom = ?8,
                 window_view = ?9, base_rate_per_bed = ?10, private_room_rate = ?11,
                 seasonal_adjustment_pct = ?12, last_updated = ?13
             WHERE id = ?14",
            params![
                &room.number,
                room.room_type.as_str(),
                room.bed_count,
                room.max_occupancy,
                room.current_occupants,
                room.status.as_str(),
                serde_json::to_string(&room.amenities)?,
                room.bathroom.as_str(),
                &room.window_view,
                amount_to_column(room.pricing.base_rate_per_bed),
                amount_to_column(room.pricing.private_room_rate),
                room.pricing.seasonal_adjustment_pct,
                room.last_updated.to_string(),
                room.id.to_string(),
            ],
        )?;
        if rows == 0 {
            return Err(StoreError::NotFound {
                entity: Room::ENTITY,
                id: room.id,
            });
        }
        Ok(())
    }

    fn delete_room(&self, id: Uuid) -> Result<()> {
        debug!(%id, "deleting room");
        let rows = self
            .conn
            .execute("DELETE FROM rooms WHERE id = ?1", [id.to_string()])?;
        if rows == 0 {
            return Err(StoreError::NotFound {
                entity: Room::ENTITY,
                id,
            });
        }
        Ok(())
    }
}
