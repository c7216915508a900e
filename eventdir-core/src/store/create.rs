//! Create event record files.

use std::path::Path;

use chrono::{DateTime, Utc};

use super::{StoredEvent, list};
use crate::error::{EventDirError, EventDirResult};
use crate::event::Event;
use crate::record;
use crate::utils::slugify;

/// Create a new event record in the directory.
///
/// Generates the YAML content and a human-readable filename based on the
/// event's start time and name, handling collisions with numeric suffixes
/// (-2, -3, etc). The event's id is rewritten to the filename stem.
///
/// Returns the created StoredEvent.
pub fn create(dir: &Path, event: &Event) -> EventDirResult<StoredEvent> {
    // Duplicate submission guard: same organization, name and start
    let existing = list(dir)?;
    let duplicate = existing.iter().any(|stored| {
        stored.event.organization_name == event.organization_name
            && stored.event.event_name == event.event_name
            && stored.event.start_datetime == event.start_datetime
    });
    if duplicate {
        return Err(EventDirError::DuplicateEvent);
    }

    std::fs::create_dir_all(dir)?;

    let stem = unique_stem(&base_stem(event), dir)?;
    let path = dir.join(format!("{}.yml", stem));

    let mut event = event.clone();
    event.id = stem;

    let content = record::generate_yaml(&event)?;
    std::fs::write(&path, &content)?;

    let modified = std::fs::metadata(&path)
        .ok()
        .and_then(|m| m.modified().ok())
        .map(DateTime::<Utc>::from);

    Ok(StoredEvent {
        event,
        path,
        modified,
    })
}

/// Generate the base filename stem for an event: `YYYY-MM-DDTHHMM__slug`
fn base_stem(event: &Event) -> String {
    let date_part = event.start_datetime.format("%Y-%m-%dT%H%M").to_string();
    let slug = slugify(&event.event_name);

    if slug.is_empty() {
        return format!("{}__event", date_part);
    }

    format!("{}__{}", date_part, slug)
}

/// Generate a unique stem, adding -2, -3, etc. suffix if there's a collision.
fn unique_stem(base: &str, dir: &Path) -> EventDirResult<String> {
    if !dir.join(format!("{}.yml", base)).exists() && !dir.join(format!("{}.yaml", base)).exists() {
        return Ok(base.to_string());
    }

    for n in 2..=100 {
        let suffixed = format!("{}-{}", base, n);
        if !dir.join(format!("{}.yml", suffixed)).exists()
            && !dir.join(format!("{}.yaml", suffixed)).exists()
        {
            return Ok(suffixed);
        }
    }

    Err(EventDirError::Config(format!(
        "Too many record name collisions for '{}'",
        base
    )))
}
