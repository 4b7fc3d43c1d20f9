//! Turning user-typed references into records.

use uuid::Uuid;

use crate::desk::Desk;
use crate::model::{Booking, Guest, MaintenanceRequest, Room};
use crate::store::Store;

/// Picks the one candidate whose id is `reference` or starts with it.
fn pick<T: Clone>(
    candidates: &[T],
    reference: &str,
    id_of: impl Fn(&T) -> Uuid,
    kind: &str,
) -> Result<T, String> {
    let reference = reference.trim().to_ascii_lowercase();
    if reference.is_empty() {
        return Err(format!("empty {kind} reference"));
    }

    if let Ok(id) = reference.parse::<Uuid>() {
        return candidates
            .iter()
            .find(|c| id_of(*c) == id)
            .cloned()
            .ok_or_else(|| format!("{kind} not found: {id}"));
    }

    let matches: Vec<&T> = candidates
        .iter()
        .filter(|c| id_of(*c).to_string().starts_with(&reference))
        .collect();

    match matches.as_slice() {
        [] => Err(format!("no {kind} matching '{reference}'")),
        [one] => Ok((*one).clone()),
        many => {
            let ids: Vec<String> = many
                .iter()
                .map(|c| id_of(*c).to_string()[..8].to_string())
                .collect();
            Err(format!(
                "'{reference}' is ambiguous: matches {} {kind}s: {}",
                many.len(),
                ids.join(", ")
            ))
        }
    }
}

/// A room by number, full UUID, or unambiguous id prefix. Numbers win.
pub(super) fn room<S: Store>(desk: &Desk<'_, S>, reference: &str) -> Result<Room, String> {
    let rooms = desk
        .rooms()
        .map_err(|e| format!("failed to list rooms: {e}"))?;
    if let Some(room) = rooms.iter().find(|r| r.number == reference.trim()) {
        return Ok(room.clone());
    }
    pick(&rooms, reference, |r| r.id, "room")
}

pub(super) fn guest<S: Store>(desk: &Desk<'_, S>, reference: &str) -> Result<Guest, String> {
    let guests = desk
        .guests()
        .map_err(|e| format!("failed to list guests: {e}"))?;
    pick(&guests, reference, |g| g.id, "guest")
}

pub(super) fn booking<S: Store>(desk: &Desk<'_, S>, reference: &str) -> Result<Booking, String> {
    let bookings = desk
        .bookings()
        .map_err(|e| format!("failed to list bookings: {e}"))?;
    pick(&bookings, reference, |b| b.id, "booking")
}

pub(super) fn maintenance<S: Store>(
    desk: &Desk<'_, S>,
    reference: &str,
) -> Result<MaintenanceRequest, String> {
    let requests = desk
        .maintenance_requests()
        .map_err(|e| format!("failed to list maintenance requests: {e}"))?;
    pick(&requests, reference, |r| r.id, "maintenance request")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> Vec<Uuid> {
        [
            "a3b0fc12-0000-4000-8000-000000000001",
            "a3b7e001-0000-4000-8000-000000000002",
            "5c1e09aa-0000-4000-8000-000000000003",
        ]
        .iter()
        .map(|s| s.parse().unwrap())
        .collect()
    }

    #[test]
    fn unique_prefix_resolves() {
        let ids = ids();
        assert_eq!(pick(&ids, "5c1", |id| *id, "guest").unwrap(), ids[2]);
        assert_eq!(pick(&ids, "A3B0", |id| *id, "guest").unwrap(), ids[0]);
    }

    #[test]
    fn full_uuid_resolves_exactly() {
        let ids = ids();
        let full = ids[1].to_string();
        assert_eq!(pick(&ids, &full, |id| *id, "guest").unwrap(), ids[1]);
    }

    #[test]
    fn ambiguous_prefix_lists_candidates() {
        let err = pick(&ids(), "a3b", |id| *id, "booking").unwrap_err();
        assert!(err.contains("ambiguous"), "{err}");
        assert!(err.contains("a3b0fc12"));
        assert!(err.contains("a3b7e001"));
    }

    #[test]
    fn no_match_and_empty_reference_fail() {
        assert!(pick(&ids(), "ffff", |id| *id, "room").is_err());
        assert!(pick(&ids(), "  ", |id| *id, "room").is_err());
    }

    #[test]
    fn unknown_full_uuid_is_not_found() {
        let err = pick(
            &ids(),
            "00000000-0000-4000-8000-000000000000",
            |id| *id,
            "room",
        )
        .unwrap_err();
        assert!(err.starts_with("room not found"), "{err}");
    }
}
