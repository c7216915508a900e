//! List and look up event records in a directory.

use std::path::Path;

use chrono::{DateTime, Utc};

use super::{StoredEvent, is_record_file};
use crate::error::{EventDirError, EventDirResult};
use crate::record;

/// List all event records in a directory.
///
/// Unreadable or malformed files are skipped; a missing directory yields an
/// empty list. Results are ordered by id for determinism.
pub fn list(dir: &Path) -> EventDirResult<Vec<StoredEvent>> {
    let mut events: Vec<StoredEvent> = Vec::new();

    if !dir.exists() {
        return Ok(events);
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if is_record_file(&path)
            && let Some(id) = path.file_stem().and_then(|s| s.to_str())
            && let Ok(content) = std::fs::read_to_string(&path)
        {
            match record::parse_event(id, &content) {
                Ok(event) => {
                    let modified = std::fs::metadata(&path)
                        .ok()
                        .and_then(|m| m.modified().ok())
                        .map(DateTime::<Utc>::from);

                    events.push(StoredEvent {
                        event,
                        path,
                        modified,
                    });
                }
                Err(e) => {
                    tracing::warn!("Skipping {}: {}", path.display(), e);
                }
            }
        }
    }

    events.sort_by(|a, b| a.event.id.cmp(&b.event.id));
    Ok(events)
}

/// Find a single event record by id.
pub fn find(dir: &Path, id: &str) -> EventDirResult<StoredEvent> {
    for ext in ["yml", "yaml"] {
        let path = dir.join(format!("{}.{}", id, ext));
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let event = record::parse_event(id, &content)?;
            let modified = std::fs::metadata(&path)
                .ok()
                .and_then(|m| m.modified().ok())
                .map(DateTime::<Utc>::from);

            return Ok(StoredEvent {
                event,
                path,
                modified,
            });
        }
    }

    Err(EventDirError::EventNotFound(id.to_string()))
}
