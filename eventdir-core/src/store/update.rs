//! Update event record files in place.

use std::path::Path;

use super::{StoredEvent, find};
use crate::error::EventDirResult;
use crate::event::{EventPatch, EventStatus};
use crate::record;

/// Apply a partial update to an event record and rewrite its file.
///
/// The filename (and therefore the id) is kept stable even when the event
/// name or start time change, so links to the event keep working.
pub fn update(dir: &Path, id: &str, patch: &EventPatch) -> EventDirResult<StoredEvent> {
    let mut stored = find(dir, id)?;

    patch.apply(&mut stored.event);

    let content = record::generate_yaml(&stored.event)?;
    std::fs::write(&stored.path, content)?;

    Ok(stored)
}

/// Set the review status of an event record.
pub fn set_status(dir: &Path, id: &str, status: EventStatus) -> EventDirResult<StoredEvent> {
    let mut stored = find(dir, id)?;

    stored.event.status = status;

    let content = record::generate_yaml(&stored.event)?;
    std::fs::write(&stored.path, content)?;

    Ok(stored)
}
