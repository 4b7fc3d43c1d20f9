//! Maintenance table.

use rusqlite::{OptionalExtension, Row, params};
use tracing::debug;
use uuid::Uuid;

use crate::model::MaintenanceRequest;
use crate::store::{MaintenanceRepository, Record, Result, StoreError};

use super::{SqliteStore, amount_from_column, amount_to_column, parse, parse_opt};

const COLUMNS: &str = "id, room_id, title, description, priority, status, category, \
                       assigned_staff, reported_by, reported_at, scheduled_date, \
                       completed_date, estimated_cost, actual_cost, notes";

struct MaintenanceRow {
    id: String,
    room_id: String,
    title: String,
    description: String,
    priority: String,
    status: String,
    category: String,
    assigned_staff: Option<String>,
    reported_by: String,
    reported_at: String,
    scheduled_date: Option<String>,
    completed_date: Option<String>,
    estimated_cost: Option<i64>,
    actual_cost: Option<i64>,
    notes: String,
}

impl MaintenanceRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            room_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            priority: row.get(4)?,
            status: row.get(5)?,
            category: row.get(6)?,
            assigned_staff: row.get(7)?,
            reported_by: row.get(8)?,
            reported_at: row.get(9)?,
            scheduled_date: row.get(10)?,
            completed_date: row.get(11)?,
            estimated_cost: row.get(12)?,
            actual_cost: row.get(13)?,
            notes: row.get(14)?,
        })
    }

    fn into_request(self) -> Result<MaintenanceRequest> {
        Ok(MaintenanceRequest {
            id: parse(&self.id, "maintenance id")?,
            room_id: parse(&self.room_id, "room_id")?,
            title: self.title,
            description: self.description,
            priority: parse(&self.priority, "priority")?,
            status: parse(&self.status, "status")?,
            category: parse(&self.category, "category")?,
            assigned_staff: self.assigned_staff,
            reported_by: self.reported_by,
            reported_at: parse(&self.reported_at, "reported_at")?,
            scheduled_date: parse_opt(self.scheduled_date.as_deref(), "scheduled_date")?,
            completed_date: parse_opt(self.completed_date.as_deref(), "completed_date")?,
            estimated_cost: self
                .estimated_cost
                .map(|c| amount_from_column(c, "estimated_cost"))
                .transpose()?,
            actual_cost: self
                .actual_cost
                .map(|c| amount_from_column(c, "actual_cost"))
                .transpose()?,
            notes: self.notes,
        })
    }
}

impl MaintenanceRepository for SqliteStore {
    fn create_maintenance(&self, request: &MaintenanceRequest) -> Result<()> {
        if self.exists("maintenance", request.id)? {
            return Err(StoreError::AlreadyExists {
                entity: MaintenanceRequest::ENTITY,
                id: request.id,
            });
        }
        debug!(id = %request.id, "inserting maintenance request");
        self.conn.execute(
            &format!(
                "INSERT INTO maintenance ({COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
            ),
            params![
                request.id.to_string(),
                request.room_id.to_string(),
                &request.title,
                &request.description,
                request.priority.as_str(),
                request.status.as_str(),
                request.category.as_str(),
                &request.assigned_staff,
                &request.reported_by,
                request.reported_at.to_string(),
                request.scheduled_date.map(|d| d.to_string()),
                request.completed_date.map(|d| d.to_string()),
                request.estimated_cost.map(amount_to_column),
                request.actual_cost.map(amount_to_column),
                &request.notes,
            ],
        )?;
        Ok(())
    }

    fn get_maintenance(&self, id: Uuid) -> Result<Option<MaintenanceRequest>> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {COLUMNS} FROM maintenance WHERE id = ?1"),
                [id.to_string()],
                MaintenanceRow::read,
            )
            .optional()?;
        row.map(MaintenanceRow::into_request).transpose()
    }

    fn list_maintenance(&self) -> Result<Vec<MaintenanceRequest>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {COLUMNS} FROM maintenance ORDER BY rowid"))?;
        let rows = stmt.query_map([], MaintenanceRow::read)?;
        let requests = rows
            .map(|row| {
                row.map_err(StoreError::from)
                    .and_then(MaintenanceRow::into_request)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(requests)
    }

    fn update_maintenance(&self, request: &MaintenanceRequest) -> Result<()> {
        debug!(id = %request.id, "updating maintenance request");
        let rows = self.conn.execute(
            "UPDATE maintenance
             SET room_id = ?1, title = ?2, description = ?3, priority = ?4, status = ?5,
                 category = ?6, assigned_staff = ?7, reported_by = ?8, reported_at = ?9,
                 scheduled_date = ?10, completed_date = ?11, estimated_cost = ?12,
                 actual_cost = ?13, notes = ?14
             WHERE id = ?15",
            params![
                request.room_id.to_string(),
                &request.title,
                &request.description,
                request.priority.as_str(),
                request.status.as_str(),
                request.category.as_str(),
                &request.assigned_staff,
                &request.reported_by,
                request.reported_at.to_string(),
                request.scheduled_date.map(|d| d.to_string()),
                request.completed_date.map(|d| d.to_string()),
                request.estimated_cost.map(amount_to_column),
                request.actual_cost.map(amount_to_column),
                &request.notes,
                request.id.to_string(),
            ],
        )?;
        if rows == 0 {
            return Err(StoreError::NotFound {
                entity: MaintenanceRequest::ENTITY,
                id: request.id,
            });
        }
        Ok(())
    }

    fn delete_maintenance(&self, id: Uuid) -> Result<()> {
        debug!(%id, "deleting maintenance request");
        let rows = self
            .conn
            .execute("DELETE FROM maintenance WHERE id = ?1", [id.to_string()])?;
        if rows == 0 {
            return Err(StoreError::NotFound {
                entity: MaintenanceRequest::ENTITY,
                id,
            });
        }
        Ok(())
    }
}
