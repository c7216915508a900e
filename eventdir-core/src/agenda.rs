//! Agenda: the root event record directory.

use std::path::PathBuf;

use config::{Config, File};

use crate::error::{EventDirError, EventDirResult};
use crate::event::{Event, EventPatch, EventStatus};
use crate::global_config::GlobalConfig;
use crate::store::{self, StoredEvent};

/// Handle on the event record directory, resolved from global config or an
/// explicit path. Cheap to construct; every operation re-reads the files so
/// external edits (git pulls, manual fixes) are picked up immediately.
#[derive(Clone)]
pub struct Agenda {
    config: GlobalConfig,
    root: Option<PathBuf>,
}

impl Agenda {
    pub fn load() -> EventDirResult<Self> {
        let config_path = GlobalConfig::config_path()?;

        if !config_path.exists() {
            GlobalConfig::create_default_config(&config_path)?;
        }

        let config: GlobalConfig = Config::builder()
            .add_source(File::from(config_path).required(false))
            .build()
            .map_err(|e| EventDirError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventDirError::Config(e.to_string()))?;

        Ok(Agenda { config, root: None })
    }

    /// An agenda rooted at an explicit directory, bypassing global config.
    /// Used by the server (configurable data dir) and by tests.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Agenda {
            config: GlobalConfig::default(),
            root: Some(root.into()),
        }
    }

    pub fn config(&self) -> &GlobalConfig {
        &self.config
    }

    pub fn data_path(&self) -> PathBuf {
        if let Some(ref root) = self.root {
            return root.clone();
        }

        let full_path_str =
            shellexpand::tilde(&self.config.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// All records, regardless of status.
    pub fn events(&self) -> EventDirResult<Vec<StoredEvent>> {
        store::list(&self.data_path())
    }

    /// Publicly visible events.
    pub fn approved(&self) -> EventDirResult<Vec<Event>> {
        Ok(self
            .events()?
            .into_iter()
            .map(|s| s.event)
            .filter(|e| e.status == EventStatus::Approved)
            .collect())
    }

    /// Submissions waiting for review.
    pub fn pending(&self) -> EventDirResult<Vec<Event>> {
        Ok(self
            .events()?
            .into_iter()
            .map(|s| s.event)
            .filter(|e| e.status == EventStatus::Requested)
            .collect())
    }

    pub fn find(&self, id: &str) -> EventDirResult<Event> {
        store::find(&self.data_path(), id).map(|s| s.event)
    }

    /// Store a new submission. The record always lands with status
    /// `requested`, whatever the caller set.
    pub fn submit(&self, event: &Event) -> EventDirResult<Event> {
        let mut event = event.clone();
        event.status = EventStatus::Requested;

        store::create(&self.data_path(), &event).map(|s| s.event)
    }

    /// Store an already-approved record (local tooling, mock data).
    pub fn create_approved(&self, event: &Event) -> EventDirResult<Event> {
        let mut event = event.clone();
        event.status = EventStatus::Approved;

        store::create(&self.data_path(), &event).map(|s| s.event)
    }

    pub fn update_event(&self, id: &str, patch: &EventPatch) -> EventDirResult<Event> {
        store::update(&self.data_path(), id, patch).map(|s| s.event)
    }

    pub fn delete_event(&self, id: &str) -> EventDirResult<Event> {
        store::delete(&self.data_path(), id)
    }

    pub fn set_status(&self, id: &str, status: EventStatus) -> EventDirResult<Event> {
        store::set_status(&self.data_path(), id, status).map(|s| s.event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Language, Translation};
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    fn sample(name: &str) -> Event {
        let start = NaiveDate::from_ymd_opt(2026, 11, 21)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        let mut intl = BTreeMap::new();
        intl.insert(
            Language::PtBr,
            Translation {
                event_edition: "Edição 7".to_string(),
                cost: 0.0,
                currency: None,
                banner_link: None,
                short_description: "Tarde de palestras da comunidade.".to_string(),
            },
        );
        Event {
            id: String::new(),
            organization_name: "GDG Floripa".to_string(),
            event_name: name.to_string(),
            start_datetime: start,
            end_datetime: start + chrono::Duration::hours(4),
            address: None,
            state: None,
            maps_link: None,
            online: true,
            is_free: true,
            event_link: None,
            status: EventStatus::Approved,
            tags: vec!["gcp".to_string()],
            intl,
        }
    }

    #[test]
    fn submissions_always_land_as_requested() {
        let dir = tempfile::tempdir().unwrap();
        let agenda = Agenda::at(dir.path());

        let created = agenda.submit(&sample("DevFest")).unwrap();

        assert_eq!(created.status, EventStatus::Requested);
        assert!(agenda.approved().unwrap().is_empty());
        assert_eq!(agenda.pending().unwrap().len(), 1);
    }

    #[test]
    fn approval_moves_a_submission_into_the_public_list() {
        let dir = tempfile::tempdir().unwrap();
        let agenda = Agenda::at(dir.path());

        let created = agenda.submit(&sample("DevFest")).unwrap();
        agenda.set_status(&created.id, EventStatus::Approved).unwrap();

        assert_eq!(agenda.approved().unwrap().len(), 1);
        assert!(agenda.pending().unwrap().is_empty());
    }
}
