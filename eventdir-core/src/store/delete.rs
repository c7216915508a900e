//! Delete event record files.

use std::path::Path;

use super::find;
use crate::error::EventDirResult;
use crate::event::Event;

/// Delete an event record by id. Returns the deleted event.
pub fn delete(dir: &Path, id: &str) -> EventDirResult<Event> {
    let stored = find(dir, id)?;

    std::fs::remove_file(&stored.path)?;

    Ok(stored.event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EventDirError;
    use crate::event::{EventStatus, Language, Translation};
    use crate::store::{create, list};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn sample() -> Event {
        let start = NaiveDate::from_ymd_opt(2026, 7, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let mut intl = BTreeMap::new();
        intl.insert(
            Language::PtBr,
            Translation {
                event_edition: "Edição 1".to_string(),
                cost: 0.0,
                currency: None,
                banner_link: None,
                short_description: "Oficina de introdução a Rust.".to_string(),
            },
        );
        Event {
            id: String::new(),
            organization_name: "Rust Floripa".to_string(),
            event_name: "Oficina Rust".to_string(),
            start_datetime: start,
            end_datetime: start + chrono::Duration::hours(2),
            address: None,
            state: None,
            maps_link: None,
            online: true,
            is_free: true,
            event_link: None,
            status: EventStatus::Requested,
            tags: vec!["rust".to_string()],
            intl,
        }
    }

    #[test]
    fn delete_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let stored = create(dir.path(), &sample()).unwrap();

        delete(dir.path(), &stored.event.id).expect("Should delete");

        assert!(!stored.path.exists());
        assert!(list(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn delete_of_missing_record_fails() {
        let dir = tempfile::tempdir().unwrap();

        let err = delete(dir.path(), "missing").unwrap_err();
        assert!(matches!(err, EventDirError::EventNotFound(_)));
    }
}
