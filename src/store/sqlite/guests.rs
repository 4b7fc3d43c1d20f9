//! Guest table.

use rusqlite::{OptionalExtension, Row, params};
use tracing::debug;
use uuid::Uuid;

use crate::model::Guest;
use crate::store::{GuestRepository, Record, Result, StoreError};

use super::{SqliteStore, parse};

const COLUMNS: &str = "id, name, email, phone, nationality, status, created_at";

fn read_row(row: &Row<'_>) -> rusqlite::Result<[String; 7]> {
    Ok([
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
    ])
}

fn into_guest(row: [String; 7]) -> Result<Guest> {
    let [id, name, email, phone, nationality, status, created_at] = row;
    Ok(Guest {
        id: parse(&id, "guest id")?,
        name,
        email,
        phone,
        nationality,
        status: parse(&status, "status")?,
        created_at: parse(&created_at, "created_at")?,
    })
}

impl GuestRepository for SqliteStore {
    fn create_guest(&self, guest: &Guest) -> Result<()> {
        if self.exists("guests", guest.id)? {
            return Err(StoreError::AlreadyExists {
                entity: Guest::ENTITY,
                id: guest.id,
            });
        }
        debug!(id = %guest.id, "inserting guest");
        self.conn.execute(
            &format!("INSERT INTO guests ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"),
            params![
                guest.id.to_string(),
                &guest.name,
                &guest.email,
                &guest.phone,
                &guest.nationality,
                guest.status.as_str(),
                guest.created_at.to_string(),
            ],
        )?;
        Ok(())
    }

    fn get_guest(&self, id: Uuid) -> Result<Option<Guest>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM guests WHERE id = ?1"),
                [id.to_string()],
                read_row,
            )
            .optional()?;
        row.map(into_guest).transpose()
    }

    fn list_guests(&self) -> Result<Vec<Guest>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM guests ORDER BY rowid"))?;
        let rows = stmt.query_map([], read_row)?;
        let guests = rows
            .map(|row| row.map_err(StoreError::from).and_then(into_guest))
            .collect::<Result<Vec<_>>>()?;
        Ok(guests)
    }

    fn update_guest(&self, guest: &Guest) -> Result<()> {
        debug!(id = %guest.id, "updating guest");
        let rows = self.conn.execute(
            "UPDATE guests
             SET name = ?1, email = ?2, phone = ?3, nationality = ?4, status = ?5, created_at = ?6
             WHERE id = ?7",
            params![
                &guest.name,
                &guest.email,
                &guest.phone,
                &guest.nationality,
                guest.status.as_str(),
                guest.created_at.to_string(),
                guest.id.to_string(),
            ],
        )?;
        if rows == 0 {
            return Err(StoreError::NotFound {
                entity: Guest::ENTITY,
                id: guest.id,
            });
        }
        Ok(())
    }

    fn delete_guest(&self, id: Uuid) -> Result<()> {
        debug!(%id, "deleting guest");
        let rows = self
            .conn
            .execute("DELETE FROM guests WHERE id = ?1", [id.to_string()])?;
        if rows == 0 {
            return Err(StoreError::NotFound {
                entity: Guest::ENTITY,
                id,
            });
        }
        Ok(())
    }
}
