//! Errors surfaced by the booking desk.

use crate::model::{Booking, InvalidStay};
use crate::store::StoreError;

/// What can go wrong at the desk. None of these are fatal; the caller
/// reports them and the user re-triggers the action.
#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("validation failed: {0}")]
    Validation(String),

    #[error(
        "room is already booked for those dates ({} conflicting booking(s): {})",
        .conflicts.len(),
        describe(.conflicts)
    )]
    Conflict { conflicts: Vec<Booking> },

    #[error(transparent)]
    Store(StoreError),
}

pub type Result<T> = core::result::Result<T, DeskError>;

impl DeskError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl From<StoreError> for DeskError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::NotFound {
                entity,
                id: id.to_string(),
            },
            other => Self::Store(other),
        }
    }
}

impl From<InvalidStay> for DeskError {
    fn from(err: InvalidStay) -> Self {
        Self::Validation(err.to_string())
    }
}

fn describe(conflicts: &[Booking]) -> String {
    conflicts
        .iter()
        .map(|b| {
            let id = b.id.to_string();
            format!("{} {}..{}", &id[..8], b.check_in, b.check_out)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
